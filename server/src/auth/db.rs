use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_token};

/// Open a session for the user and return the bearer token. Expired
/// sessions of the same user are dropped on the way.
pub fn create_session(
    conn: &mut SqliteConnection,
    user_id: i32,
    lifetime_seconds: i64,
) -> AppResult<String> {
    let token = generate_token().map_err(|e| AppError::Internal(e.to_string()))?;
    let token_hash = hash_token(&token);
    let now = Utc::now().naive_utc();
    let expires_at = now + Duration::seconds(lifetime_seconds);

    diesel::delete(
        sessions::table
            .filter(sessions::user_id.eq(user_id))
            .filter(sessions::expires_at.le(now)),
    )
    .execute(conn)?;

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> QueryResult<bool> {
    let token_hash = hash_token(token);
    let deleted =
        diesel::delete(sessions::table.filter(sessions::token_hash.eq(&token_hash))).execute(conn)?;
    Ok(deleted > 0)
}

/// Active user owning an unexpired session for `token`. Pool and query
/// failures are errors, not a missing user.
pub fn get_user_from_token(pool: &DbPool, token: &str) -> AppResult<Option<User>> {
    let mut conn = pool.get()?;
    let token_hash = hash_token(token);

    let user = sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now().naive_utc()))
        .filter(users::is_active.eq(true))
        .select(User::as_select())
        .first(&mut conn)
        .optional()?;
    Ok(user)
}
