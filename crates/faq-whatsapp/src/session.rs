//! Session management for WhatsApp bot
//!
//! Sessions live only in an expiring key-value store. Every write resets the
//! record's lifetime to [`SESSION_TTL`], so a session disappears only after a
//! full day without interaction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{Result, WhatsAppError};

/// Lifetime of a session record after its last write
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// State assigned to freshly created sessions
pub const INITIAL_STATE: &str = "INITIAL";

const KEY_PREFIX: &str = "whatsapp_session:";

/// Store key for a phone number
pub fn session_key(phone_number: &str) -> String {
    format!("{}{}", KEY_PREFIX, phone_number)
}

/// A single conversation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phone_number: String,
    /// Written as RFC 3339 in UTC; offset-less ISO-8601 values are read as UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_interaction: DateTime<Utc>,
    /// Reserved for conversational flow; nothing transitions it yet.
    pub current_state: String,
    /// Reserved for conversational flow; nothing populates it yet.
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
}

impl Session {
    /// Create a session in its initial state
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            last_interaction: Utc::now(),
            current_state: INITIAL_STATE.to_string(),
            context: serde_json::Map::new(),
        }
    }

    /// Record an interaction at the current time
    pub fn touch(&mut self) {
        self.last_interaction = Utc::now();
    }

    /// Store key for this session
    pub fn key(&self) -> String {
        session_key(&self.phone_number)
    }

    fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| WhatsAppError::CorruptSession(e.to_string()))
    }

    fn decode(key: &str, raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| WhatsAppError::CorruptSession(format!("{}: {}", key, e)))
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
}

/// Session persistence backend
///
/// The store is the only owner of session records. Writes are last-writer-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the session for `phone_number`, creating and persisting a new one on a miss
    async fn get_or_create(&self, phone_number: &str) -> Result<Session>;

    /// Overwrite the stored session and reset its TTL
    async fn save(&self, session: &Session) -> Result<()>;
}

/// Redis-backed session store
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: redis::Client,
}

impl RedisSessionStore {
    /// Create a store for the given connection settings
    ///
    /// No connection is opened until the first operation.
    pub fn new(config: &faq_core::RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url())
            .map_err(|e| WhatsAppError::Config(format!("Invalid Redis settings: {}", e)))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// `SET <key> <record> EX <ttl>`: overwrite and restart the expiry clock
    fn write_command(session: &Session) -> Result<redis::Cmd> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(session.key())
            .arg(session.encode()?)
            .arg("EX")
            .arg(SESSION_TTL.as_secs());
        Ok(cmd)
    }

    async fn write(
        &self,
        conn: &mut redis::aio::MultiplexedConnection,
        session: &Session,
    ) -> Result<()> {
        let _: () = Self::write_command(session)?.query_async(conn).await?;
        Ok(())
    }

    /// Remaining lifetime of the stored record as Redis reports it
    ///
    /// `None` when there is no record.
    pub async fn ttl(&self, phone_number: &str) -> Result<Option<Duration>> {
        let mut conn = self.connection().await?;
        let seconds: i64 = redis::cmd("TTL")
            .arg(session_key(phone_number))
            .query_async(&mut conn)
            .await?;
        // -2: no such key, -1: key without expiry
        Ok(u64::try_from(seconds).ok().map(Duration::from_secs))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_or_create(&self, phone_number: &str) -> Result<Session> {
        let key = session_key(phone_number);
        let mut conn = self.connection().await?;

        let existing: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut conn).await?;
        if let Some(raw) = existing {
            return Session::decode(&key, &raw);
        }

        let session = Session::new(phone_number);
        self.write(&mut conn, &session).await?;
        debug!("Created session {}", key);
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut conn = self.connection().await?;
        self.write(&mut conn, session).await?;
        debug!("Saved session {}", session.key());
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredRecord {
    value: String,
    expires_at: Instant,
}

impl StoredRecord {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory session store with the same expiry semantics as Redis
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<String, StoredRecord>>>,
}

impl InMemorySessionStore {
    /// Create a new session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions that have not expired
    pub async fn session_count(&self) -> usize {
        let now = Instant::now();
        let records = self.records.read().await;
        records.values().filter(|r| r.is_live(now)).count()
    }

    /// Remaining lifetime of the stored record, `None` when there is none
    pub async fn ttl(&self, phone_number: &str) -> Result<Option<Duration>> {
        let now = Instant::now();
        let records = self.records.read().await;
        Ok(records
            .get(&session_key(phone_number))
            .filter(|r| r.is_live(now))
            .map(|r| r.expires_at - now))
    }

    async fn write(&self, session: &Session) -> Result<()> {
        let now = Instant::now();
        let record = StoredRecord {
            value: session.encode()?,
            expires_at: now + SESSION_TTL,
        };
        let mut records = self.records.write().await;
        records.retain(|_, r| r.is_live(now));
        records.insert(session.key(), record);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, phone_number: &str) -> Result<Session> {
        let key = session_key(phone_number);
        let records = self.records.read().await;
        if let Some(record) = records.get(&key).filter(|r| r.is_live(Instant::now())) {
            return Session::decode(&key, &record.value);
        }
        drop(records);

        let session = Session::new(phone_number);
        self.write(&session).await?;
        debug!("Created session {}", key);
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.write(session).await?;
        debug!("Saved session {}", session.key());
        Ok(())
    }
}
