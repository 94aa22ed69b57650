//! Helpers for driving the `libms` binary with scripted input.

use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Scratch working directory for one test; removed on drop.
pub struct LibmsWorkspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl LibmsWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Default data file inside the workspace.
    pub fn data_file(&self) -> PathBuf {
        self.root.join("library_data.jsonl")
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `libms` in the workspace with `args`, feeding `input` on stdin.
pub fn run_libms<I, S>(workspace: &LibmsWorkspace, args: I, input: &str, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    run_libms_bytes(workspace, args, input.as_bytes(), label)
}

/// Like [`run_libms`], for stdin that is not valid UTF-8.
pub fn run_libms_bytes<I, S>(
    workspace: &LibmsWorkspace,
    args: I,
    input: &[u8],
    label: &str,
) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = Command::cargo_bin("libms")
        .expect("libms binary")
        .current_dir(&workspace.root)
        .env_remove("LIBMS_DATA_FILE")
        .env_remove("RUST_LOG")
        .args(args)
        .write_stdin(input.to_vec())
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run libms: {e}"));

    CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
