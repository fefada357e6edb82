use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::Result,
    types::{ChatMessage, NewMessage, Role},
};

use super::QueryLog;

const INSERT_MESSAGE: &str = "
    INSERT INTO chat_messages (id, session_id, user_id, role, content)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, session_id, user_id, role, content, created_at";

// seq breaks ties between messages committed within the same microsecond
const SELECT_MESSAGES: &str = "
    SELECT id, session_id, user_id, role, content, created_at
    FROM chat_messages
    WHERE session_id = $1 AND user_id = $2
    ORDER BY created_at ASC, seq ASC";

/// Insert one message
///
/// # Errors
///
/// * `StoreError::NotFoundError` - if `msg.session_id` names no session
/// * `StoreError::DatabaseError` - for other SQL errors
pub async fn insert_message(pool: &Pool, log: QueryLog, msg: NewMessage) -> Result<ChatMessage> {
    let conn = pool.get().await?;
    log.statement(INSERT_MESSAGE);

    let id = Uuid::new_v4();
    let row = conn
        .query_one(
            INSERT_MESSAGE,
            &[
                &id,
                &msg.session_id,
                &msg.user_id,
                &msg.role.as_str(),
                &msg.content,
            ],
        )
        .await?;

    parse_message_row(&row)
}

/// Messages of a session written by or for `user_id`, in creation order
pub async fn get_messages(
    pool: &Pool,
    log: QueryLog,
    session_id: Uuid,
    user_id: &str,
) -> Result<Vec<ChatMessage>> {
    let conn = pool.get().await?;
    log.statement(SELECT_MESSAGES);

    let rows = conn.query(SELECT_MESSAGES, &[&session_id, &user_id]).await?;
    rows.iter().map(parse_message_row).collect()
}

fn parse_message_row(row: &Row) -> Result<ChatMessage> {
    let role: String = row.get("role");
    Ok(ChatMessage {
        id: row.get("id"),
        session_id: row.get("session_id"),
        user_id: row.get("user_id"),
        role: role.parse::<Role>()?,
        content: row.get("content"),
        created_at: row.get("created_at"),
    })
}
