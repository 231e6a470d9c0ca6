//! Message Database Operations
//!
//! Conversations are derived at read time: the query selects every message
//! whose participant pair matches, ordered explicitly by creation timestamp.
//! Storage order is never relied on.

use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::{Message, UserProfile};

/// All users except the caller, for the sidebar
///
/// No pagination or filtering; small deployments only.
pub async fn list_peers(pool: &PgPool, caller: Uuid) -> Result<Vec<UserProfile>, sqlx::Error> {
    let users = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, username, email, created_at
        FROM users
        WHERE id <> $1
        ORDER BY username
        "#,
    )
    .bind(caller)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Every message between the caller and the peer, oldest first
pub async fn conversation_messages(
    pool: &PgPool,
    caller: Uuid,
    peer: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, sender_id, receiver_id, text, image, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(caller)
    .bind(peer)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Persist a new message and return the canonical record
pub async fn insert_message(
    pool: &PgPool,
    sender: Uuid,
    receiver: Uuid,
    text: Option<String>,
    image: Option<String>,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, text, image, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, sender_id, receiver_id, text, image, created_at
        "#,
    )
    .bind(id)
    .bind(sender)
    .bind(receiver)
    .bind(&text)
    .bind(&image)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Get a message by ID
pub async fn get_message(pool: &PgPool, id: Uuid) -> Result<Option<Message>, sqlx::Error> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, sender_id, receiver_id, text, image, created_at
        FROM messages
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}

/// Delete a message by ID, returning the removed record
///
/// Atomic delete-returning: if two requests race on the same ID, exactly one
/// gets the record back and the other gets `None`. Callers map `None` to
/// not-found.
pub async fn delete_message(pool: &PgPool, id: Uuid) -> Result<Option<Message>, sqlx::Error> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        DELETE FROM messages
        WHERE id = $1
        RETURNING id, sender_id, receiver_id, text, image, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}
