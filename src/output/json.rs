use serde_json::{json, Value};

use crate::error::TaskpadError;
use crate::models::{format_timestamp, Task, User};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskpadError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "task_id": t.task_id,
        "text": t.text,
        "created_at": format_timestamp(&t.created_at),
        "is_done": t.is_done,
        "done_at": t.done_at.as_ref().map(format_timestamp),
    })
}

pub fn user_json(u: &User) -> Value {
    json!({
        "uid": u.uid,
        "name": u.name,
        "username": u.username,
        "email": u.email,
        "profile_image_url": u.profile_image_url,
        "created_at": u.created_at
    })
}
