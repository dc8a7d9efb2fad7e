//! Shared test doubles

use async_trait::async_trait;

use crate::error::{Result, WhatsAppError};
use crate::session::{Session, SessionStore};

/// Store whose backend is never reachable
pub(crate) struct UnreachableStore;

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn get_or_create(&self, _phone_number: &str) -> Result<Session> {
        Err(unreachable_backend())
    }

    async fn save(&self, _session: &Session) -> Result<()> {
        Err(unreachable_backend())
    }
}

fn unreachable_backend() -> WhatsAppError {
    WhatsAppError::StoreUnavailable("connection refused".to_string())
}
