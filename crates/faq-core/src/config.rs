//! Configuration management
//!
//! 設定は環境変数から読み込まれます。未設定の項目はデフォルト値になります:
//!
//! | 変数 | 内容 | デフォルト |
//! |---|---|---|
//! | `REDIS_HOST` | Redis ホスト | `localhost` |
//! | `REDIS_PORT` | Redis ポート | `6379` |
//! | `REDIS_PASSWORD` | Redis パスワード (空 = 認証なし) | `""` |
//! | `PORT` | Webhook サーバーの待ち受けポート | `5000` |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Redis connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis host
    #[serde(default = "default_redis_host")]
    pub host: String,

    /// Redis port
    #[serde(default = "default_redis_port")]
    pub port: u16,

    /// Redis password (empty means no AUTH)
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: default_redis_host(),
            port: default_redis_port(),
            password: String::new(),
        }
    }
}

impl RedisConfig {
    /// Render a `redis://` connection URL
    ///
    /// パスワードはパーセントエンコードされます。
    pub fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}:{}/", self.host, self.port)
        } else {
            format!(
                "redis://:{}@{}:{}/",
                urlencoding::encode(&self.password),
                self.host,
                self.port
            )
        }
    }
}

/// Webhook server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the webhook HTTP server
    #[serde(default = "default_listen_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_listen_port(),
        }
    }
}

/// Main configuration for faq-gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Session store configuration
    #[serde(default)]
    pub redis: RedisConfig,

    /// Webhook server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_redis_host() -> String {
    "localhost".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_listen_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// `from_env` はこれを `std::env::var` で呼び出します。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let redis = RedisConfig {
            host: lookup("REDIS_HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or_else(default_redis_host),
            port: parse_port(&lookup, "REDIS_PORT")?.unwrap_or_else(default_redis_port),
            password: lookup("REDIS_PASSWORD").unwrap_or_default(),
        };

        let server = ServerConfig {
            port: parse_port(&lookup, "PORT")?.unwrap_or_else(default_listen_port),
        };

        debug!(
            "Loaded configuration: redis={}:{}, listen port={}",
            redis.host, redis.port, server.port
        );

        Ok(Config { redis, server })
    }
}

fn parse_port<F>(lookup: &F, name: &str) -> Result<Option<u16>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} is not a valid port: {}", name, value))),
        _ => Ok(None),
    }
}
