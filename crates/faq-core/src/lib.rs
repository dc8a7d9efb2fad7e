//! faq-core: FAQ Gateway Core Library
//!
//! 設定の読み込みと共通エラー型を提供します。

pub mod config;
pub mod error;

pub use config::{Config, RedisConfig, ServerConfig};
pub use error::{Error, Result};
