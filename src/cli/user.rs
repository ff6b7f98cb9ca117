use rusqlite::Connection;
use serde_json::json;

use crate::cli::commands::UserCommands;
use crate::error::TaskpadError;
use crate::models::User;
use crate::output;
use crate::store::{connection, user_repo};

pub fn run(cmd: UserCommands, json_output: bool, user_flag: Option<&str>) -> i32 {
    let result = match cmd {
        UserCommands::Register {
            username,
            name,
            email,
            image_url,
        } => run_register(&username, &name, &email, image_url.as_deref(), json_output),
        UserCommands::Login { reference } => run_login(&reference, json_output),
        UserCommands::Show => run_show(json_output, user_flag),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

fn validate_username(username: &str) -> Result<(), TaskpadError> {
    if !username_slug_ok(username) {
        return Err(TaskpadError::validation(
            "Username must match ^[a-z0-9][a-z0-9-]*[a-z0-9]$ (or single char [a-z0-9])",
        ));
    }
    Ok(())
}

fn username_slug_ok(username: &str) -> bool {
    if username.is_empty() {
        return false;
    }
    if username.len() == 1 {
        return username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    }
    let chars: Vec<char> = username.chars().collect();
    let first = chars[0];
    let last = *chars.last().unwrap();
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return false;
    }
    if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
        return false;
    }
    chars
        .iter()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
}

fn run_register(
    username: &str,
    name: &str,
    email: &str,
    image_url: Option<&str>,
    json_output: bool,
) -> Result<i32, TaskpadError> {
    validate_username(username)?;
    if name.trim().is_empty() {
        return Err(TaskpadError::validation("Display name must not be empty"));
    }
    if email.trim().is_empty() {
        return Err(TaskpadError::validation("Email must not be empty"));
    }

    let conn = connection::open_db()?;
    let uid = ulid::Ulid::new().to_string();
    let user = user_repo::create_user(&conn, &uid, name, username, email, image_url)?;

    // First user in, or the previous active user is gone: make this one
    // active so commands work right after registering.
    let mut activated = false;
    if active_uid_valid(&conn).is_none() {
        write_active_uid(&user.uid)?;
        activated = true;
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "user": output::json::user_json(&user),
                "activated": activated
            })))
            .unwrap()
        );
    } else {
        println!("Registered user: {} ({})", user.username, user.uid);
        if activated {
            println!("Active user is now @{}", user.username);
        }
    }
    Ok(0)
}

fn run_login(reference: &str, json_output: bool) -> Result<i32, TaskpadError> {
    let conn = connection::open_db()?;
    let user = user_repo::resolve_user(&conn, reference)?;
    write_active_uid(&user.uid)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "activated": { "uid": user.uid, "username": user.username }
            })))
            .unwrap()
        );
    } else {
        println!("Logged in as @{} ({})", user.username, user.uid);
    }
    Ok(0)
}

fn run_show(json_output: bool, user_flag: Option<&str>) -> Result<i32, TaskpadError> {
    let conn = connection::open_db()?;
    let user = resolve_active_user(&conn, user_flag)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "user": output::json::user_json(&user)
            })))
            .unwrap()
        );
    } else {
        output::text::print_user(&user);
    }
    Ok(0)
}

/// Resolve the user a command should act for: the `--user` flag when given,
/// otherwise the active user from config.
pub fn resolve_active_user(
    conn: &Connection,
    user_flag: Option<&str>,
) -> Result<User, TaskpadError> {
    if let Some(reference) = user_flag {
        return user_repo::resolve_user(conn, reference);
    }
    let uid = active_uid_valid(conn).ok_or_else(TaskpadError::no_active_user)?;
    user_repo::get_user_by_uid(conn, &uid)
}

pub fn resolve_uid(conn: &Connection, user_flag: Option<&str>) -> Result<String, TaskpadError> {
    Ok(resolve_active_user(conn, user_flag)?.uid)
}

/// Active uid from config, only if that user still exists.
fn active_uid_valid(conn: &Connection) -> Option<String> {
    let uid = read_active_uid()?;
    user_repo::get_user_by_uid(conn, &uid).ok().map(|u| u.uid)
}

fn read_active_uid() -> Option<String> {
    let path = connection::config_path().ok()?;
    let raw = std::fs::read_to_string(path).ok()?;
    let config: serde_json::Value = serde_json::from_str(&raw).ok()?;
    config["active_uid"].as_str().map(|s| s.to_string())
}

fn write_active_uid(uid: &str) -> Result<(), TaskpadError> {
    let config_path = connection::config_path()?;
    let config = json!({ "active_uid": uid });
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TaskpadError::store(e.to_string()))?;
    }
    std::fs::write(
        &config_path,
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .map_err(|e| TaskpadError::store(e.to_string()))?;
    Ok(())
}
