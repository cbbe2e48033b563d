use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct RunResult {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Run the binary with a clean `SUBCS_*` environment and no color.
pub fn run_subcs(args: &[&str]) -> RunResult {
    run_subcs_with_env(args, &[])
}

pub fn run_subcs_with_env(args: &[&str], vars: &[(&str, &str)]) -> RunResult {
    let mut command = Command::new(subcs_binary_path());
    command
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("SUBCS_PROVIDER")
        .env_remove("SUBCS_VECTORS")
        .env_remove("SUBCS_QUIET");
    for (key, value) in vars {
        command.env(key, value);
    }
    command.output().expect("spawn subcs").into()
}

pub fn unique_temp_dir(tag: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("subcs-it-{tag}-{now}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub fn write_text(path: &Path, text: &str) {
    fs::write(path, text).expect("write file");
}

fn subcs_binary_path() -> PathBuf {
    option_env!("CARGO_BIN_EXE_subcs")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/debug/subcs"))
}
