use rusqlite::{params, Connection};

use crate::error::TaskpadError;
use crate::models::User;

const USER_COLUMNS: &str = "uid, name, username, email, profile_image_url, created_at";

pub fn create_user(
    conn: &Connection,
    uid: &str,
    name: &str,
    username: &str,
    email: &str,
    profile_image_url: Option<&str>,
) -> Result<User, TaskpadError> {
    if find_user_by_username(conn, username)?.is_some() {
        return Err(TaskpadError::username_conflict(username));
    }

    conn.execute(
        "INSERT INTO users (uid, name, username, email, profile_image_url)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![uid, name, username, email, profile_image_url],
    )?;

    get_user_by_uid(conn, uid)
}

pub fn get_user_by_uid(conn: &Connection, uid: &str) -> Result<User, TaskpadError> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE uid = ?1"),
        params![uid],
        row_to_user,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TaskpadError::user_not_found(uid),
        _ => TaskpadError::from(e),
    })
}

pub fn find_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, TaskpadError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"))?;
    let mut rows = stmt.query(params![username])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_user(row)?)),
        None => Ok(None),
    }
}

/// Resolve a user reference: exact username first, then uid prefix.
pub fn resolve_user(conn: &Connection, reference: &str) -> Result<User, TaskpadError> {
    if let Some(user) = find_user_by_username(conn, reference)? {
        return Ok(user);
    }

    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE uid LIKE ?1"))?;
    let prefix = format!("{reference}%");
    let users: Vec<User> = stmt
        .query_map(params![prefix], row_to_user)?
        .collect::<Result<Vec<_>, _>>()?;

    // An ambiguous prefix is treated the same as no match; the caller only
    // ever passes usernames or full uids from config.
    match users.len() {
        1 => Ok(users.into_iter().next().unwrap()),
        _ => Err(TaskpadError::user_not_found(reference)),
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        uid: row.get(0)?,
        name: row.get(1)?,
        username: row.get(2)?,
        email: row.get(3)?,
        profile_image_url: row.get(4)?,
        created_at: row.get(5)?,
    })
}
