//! History persistence port
//!
//! The engine hands a finalized [`SessionRecord`] to this port exactly
//! once per session, after orchestration completes. Implementations append
//! it as one record to a durable append-only log.
//!
//! [`SessionRecord`]: council_domain::SessionRecord

use council_domain::SessionRecord;
use thiserror::Error;

/// Errors that can occur while persisting a session
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only store of finished debate sessions
pub trait HistoryStore: Send + Sync {
    fn append(&self, record: &SessionRecord) -> Result<(), HistoryError>;
}

/// No-op implementation for tests and `--no-history`
pub struct NoHistory;

impl HistoryStore for NoHistory {
    fn append(&self, _record: &SessionRecord) -> Result<(), HistoryError> {
        Ok(())
    }
}
