pub mod messages;
pub mod sessions;

pub use messages::{get_messages, insert_message};
pub use sessions::{get_session, insert_session, list_sessions};

/// Emits each SQL statement at debug level when enabled
#[derive(Debug, Clone, Copy)]
pub struct QueryLog {
    enabled: bool,
}

impl QueryLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) fn statement(&self, sql: &str) {
        if self.enabled {
            tracing::debug!(target: "chat_relay::sql", sql = sql.trim(), "query");
        }
    }
}
