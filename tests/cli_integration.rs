use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create tempdir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskpad").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env("TASKPAD_HOME", self.dir.path().join(".taskpad"));
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("read exported file")
    }
}

fn setup_with_user(env: &TestEnv) {
    env.run_ok(&["init"]);
    env.run_ok(&[
        "user",
        "register",
        "ada",
        "--name",
        "Ada Lovelace",
        "--email",
        "ada@example.com",
    ]);
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with("taskpad.db"));
    assert!(std::path::PathBuf::from(path).exists());
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["init"]);
    assert!(v["data"]["path"].as_str().unwrap().contains("taskpad.db"));
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

// ─── 2. users ──────────────────────────────────────────────────────

#[test]
fn test_register_activates_first_user() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&[
        "user",
        "register",
        "ada",
        "--name",
        "Ada Lovelace",
        "--email",
        "ada@example.com",
    ]);
    assert_eq!(v["data"]["user"]["username"], "ada");
    assert_eq!(v["data"]["activated"], true);

    let v = env.run_ok(&["user", "show"]);
    assert_eq!(v["data"]["user"]["name"], "Ada Lovelace");
    assert_eq!(v["data"]["user"]["email"], "ada@example.com");
}

#[test]
fn test_register_validation() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&[
        "user", "register", "Bad Name", "--name", "X", "--email", "x@example.com",
    ]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    let v = env.run_err(&["user", "register", "ok", "--name", "", "--email", "x@example.com"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_username_conflict() {
    let env = TestEnv::new();
    setup_with_user(&env);
    let v = env.run_err(&[
        "user",
        "register",
        "ada",
        "--name",
        "Other",
        "--email",
        "other@example.com",
    ]);
    assert_eq!(v["error"]["code"], "USERNAME_CONFLICT");
}

#[test]
fn test_login_switches_active_user() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&[
        "user",
        "register",
        "grace",
        "--name",
        "Grace Hopper",
        "--email",
        "grace@example.com",
    ]);

    // ada registered first and stays active until an explicit login.
    let v = env.run_ok(&["user", "show"]);
    assert_eq!(v["data"]["user"]["username"], "ada");

    env.run_ok(&["user", "login", "grace"]);
    let v = env.run_ok(&["user", "show"]);
    assert_eq!(v["data"]["user"]["username"], "grace");
}

#[test]
fn test_user_flag_overrides_active_user() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&[
        "user",
        "register",
        "grace",
        "--name",
        "Grace Hopper",
        "--email",
        "grace@example.com",
    ]);
    env.run_ok(&["task", "add", "ada task"]);
    env.run_ok(&["--user", "grace", "task", "add", "grace task"]);

    let v = env.run_ok(&["task", "list"]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(v["data"]["tasks"][0]["text"], "ada task");

    let v = env.run_ok(&["--user", "grace", "task", "list"]);
    assert_eq!(v["data"]["tasks"][0]["text"], "grace task");
}

#[test]
fn test_no_active_user() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "NO_ACTIVE_USER");
}

// ─── 3. tasks ──────────────────────────────────────────────────────

#[test]
fn test_add_and_list_in_creation_order() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);
    env.run_ok(&["task", "add", "Walk dog"]);

    let v = env.run_ok(&["task", "list"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[1]["text"], "Walk dog");
    assert_eq!(tasks[0]["is_done"], false);
    assert_eq!(v["data"]["total"], 2);
}

#[test]
fn test_add_rejects_empty_text() {
    let env = TestEnv::new();
    setup_with_user(&env);
    let v = env.run_err(&["task", "add", "   "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_add_rejects_bad_due_time() {
    let env = TestEnv::new();
    setup_with_user(&env);
    let v = env.run_err(&["task", "add", "Buy milk", "--due", "tomorrow"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_search_is_case_insensitive() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);
    env.run_ok(&["task", "add", "Walk dog"]);
    env.run_ok(&["task", "add", "Buy bread"]);

    let v = env.run_ok(&["task", "list", "--search", "BUY"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[1]["text"], "Buy bread");
    // total reflects the authoritative list, not the view.
    assert_eq!(v["data"]["total"], 3);
}

#[test]
fn test_done_marks_and_keeps_task_in_list() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);
    env.run_ok(&["task", "add", "Walk dog"]);

    let v = env.run_ok(&["task", "done", "0"]);
    assert_eq!(v["data"]["completed"]["text"], "Buy milk");
    assert_eq!(v["data"]["completed"]["is_done"], true);
    assert_eq!(v["data"]["remaining"], 1);

    let v = env.run_ok(&["task", "list"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["is_done"], true);
    assert_eq!(tasks[1]["is_done"], false);
}

#[test]
fn test_done_index_addresses_filtered_view() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);
    env.run_ok(&["task", "add", "Walk dog"]);
    env.run_ok(&["task", "add", "Buy bread"]);

    // Index 0 under --search dog is "Walk dog", not "Buy milk".
    let v = env.run_ok(&["task", "done", "0", "--search", "dog"]);
    assert_eq!(v["data"]["completed"]["text"], "Walk dog");
    assert_eq!(v["data"]["remaining"], 0);

    let v = env.run_ok(&["past", "list"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Walk dog");
}

#[test]
fn test_done_out_of_range() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);

    let v = env.run_err(&["task", "done", "5"]);
    assert_eq!(v["error"]["code"], "INDEX_OUT_OF_RANGE");

    // Nothing changed.
    let v = env.run_ok(&["task", "list"]);
    assert_eq!(v["data"]["tasks"][0]["is_done"], false);
}

// ─── 4. history and export ─────────────────────────────────────────

#[test]
fn test_past_list_empty() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);

    let v = env.run_ok(&["past", "list"]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 0);
}

#[test]
fn test_task_export_csv() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);
    env.run_ok(&["task", "add", "Walk dog"]);
    env.run_ok(&["task", "done", "0"]);

    let v = env.run_ok(&["task", "export"]);
    assert_eq!(v["data"]["rows"], 2);
    assert!(v["data"]["path"].as_str().unwrap().ends_with("tasks.csv"));

    let csv = env.read_file("tasks.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "TaskID,Text,Timestamp,IsDone");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(",Buy milk,"));
    assert!(lines[1].ends_with(",true"));
    assert!(lines[2].contains(",Walk dog,"));
    assert!(lines[2].ends_with(",false"));
}

#[test]
fn test_past_export_csv() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["task", "add", "Buy milk"]);
    env.run_ok(&["task", "add", "Walk dog"]);
    env.run_ok(&["task", "done", "1"]);

    env.run_ok(&["past", "export", "--out", "history.csv"]);
    let csv = env.read_file("history.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Task Name,Task Description,Completion Date");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Walk dog,"));
    assert!(!lines[1].ends_with("Not Completed"));
}

#[test]
fn test_past_export_header_only_when_empty() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.run_ok(&["past", "export"]);
    assert_eq!(
        env.read_file("pastTasks.csv"),
        "Task Name,Task Description,Completion Date\n"
    );
}

// ─── 5. text output ────────────────────────────────────────────────

#[test]
fn test_text_output_empty_list() {
    let env = TestEnv::new();
    setup_with_user(&env);
    env.cmd()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_text_output_error_goes_to_stderr() {
    let env = TestEnv::new();
    env.cmd()
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}
