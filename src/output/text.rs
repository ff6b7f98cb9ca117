use crate::export::csv::NOT_COMPLETED;
use crate::models::{format_timestamp, Task, User};

fn short_id(id: &str) -> &str {
    &id[..std::cmp::min(8, id.len())]
}

pub fn print_user(u: &User) {
    println!("User: {} (@{})", u.name, u.username);
    println!("  Uid: {}", u.uid);
    println!("  Email: {}", u.email);
    if let Some(ref url) = u.profile_image_url {
        println!("  Image: {url}");
    }
    println!("  Registered: {}", u.created_at);
}

/// Numbered task listing. The numbers are the indices `task done` accepts,
/// relative to whatever filter produced this view.
pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for (i, t) in tasks.iter().enumerate() {
        let mark = if t.is_done { "x" } else { " " };
        println!(
            "  {i:>3}. [{mark}] {} ({}) {}",
            t.text,
            short_id(&t.task_id),
            format_timestamp(&t.created_at)
        );
    }
}

pub fn print_history_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No completed tasks.");
        return;
    }
    for t in tasks {
        let done = t
            .done_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| NOT_COMPLETED.to_string());
        println!("  {} ({}) done {}", t.text, short_id(&t.task_id), done);
    }
}
