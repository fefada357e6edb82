use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::{Result, StoreError},
    types::Session,
};

use super::QueryLog;

const INSERT_SESSION: &str = "
    INSERT INTO chat_sessions (id, user_id, title)
    VALUES ($1, $2, $3)
    RETURNING id, user_id, title, created_at";

const SELECT_SESSION: &str = "
    SELECT id, user_id, title, created_at
    FROM chat_sessions
    WHERE id = $1 AND user_id = $2";

const LIST_SESSIONS: &str = "
    SELECT id, user_id, title, created_at
    FROM chat_sessions
    WHERE user_id = $1
    ORDER BY created_at DESC";

/// Insert a new session owned by `user_id`
pub async fn insert_session(
    pool: &Pool,
    log: QueryLog,
    user_id: &str,
    title: &str,
) -> Result<Session> {
    let conn = pool.get().await?;
    log.statement(INSERT_SESSION);

    let id = Uuid::new_v4();
    let row = conn.query_one(INSERT_SESSION, &[&id, &user_id, &title]).await?;
    Ok(parse_session_row(&row))
}

/// Look up one session of `user_id`
///
/// A session owned by someone else is reported the same as a missing one.
pub async fn get_session(
    pool: &Pool,
    log: QueryLog,
    session_id: Uuid,
    user_id: &str,
) -> Result<Session> {
    let conn = pool.get().await?;
    log.statement(SELECT_SESSION);

    let row = conn.query_opt(SELECT_SESSION, &[&session_id, &user_id]).await?;
    row.map(|row| parse_session_row(&row))
        .ok_or_else(|| StoreError::NotFoundError(format!("chat session {}", session_id)))
}

/// Sessions owned by `user_id`, newest first
pub async fn list_sessions(pool: &Pool, log: QueryLog, user_id: &str) -> Result<Vec<Session>> {
    let conn = pool.get().await?;
    log.statement(LIST_SESSIONS);

    let rows = conn.query(LIST_SESSIONS, &[&user_id]).await?;
    Ok(rows.iter().map(parse_session_row).collect())
}

fn parse_session_row(row: &Row) -> Session {
    let created_at: DateTime<Utc> = row.get("created_at");
    Session {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        created_at,
    }
}
