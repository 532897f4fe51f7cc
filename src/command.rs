//! External command collaborator.
//!
//! The traversal engine has no process, file, or network surface of its own;
//! this module is the one external boundary the crate exposes: run a
//! command, capture its output, fail on abnormal exit. Only available with
//! the `std` feature.

use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Failure to run an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started at all.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited abnormally.
    #[error("`{program}` exited with status {status}")]
    NonZeroExit {
        program: String,
        status: i32,
        /// Captured stderr, for diagnostics.
        stderr: String,
    },
}

/// Runs `program` with `args` and captures its stdout.
///
/// Fails with [`CommandError::NonZeroExit`] carrying the exit status and the
/// captured stderr when the process exits abnormally. On Unix, death by
/// signal is reported as `128 + signal`.
pub fn run(program: &str, args: &[&str]) -> Result<String, CommandError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.into(),
            source,
        })?;

    if !output.status.success() {
        return Err(CommandError::NonZeroExit {
            program: program.into(),
            status: exit_code(output.status),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match ExitStatusExt::signal(&status) {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> i32 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn captures_stdout_on_success() {
        let out = run("sh", &["-c", "echo hello"]).expect("sh should run");
        assert_eq!(out, "hello\n");
    }

    #[test]
    #[cfg(unix)]
    fn nonzero_exit_carries_status_and_stderr() {
        let err = run("sh", &["-c", "echo oops >&2; exit 3"]).unwrap_err();
        match err {
            CommandError::NonZeroExit {
                program,
                status,
                stderr,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(status, 3);
                assert_eq!(stderr, "oops\n");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let err = run("treewalk-no-such-program", &[]).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
