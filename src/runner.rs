use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;

/// Captured result of a single child-process run.
#[derive(Debug, Clone)]
pub struct Capture {
    pub stdout: String,
    pub stderr: String,
    /// Both streams in arrival order, newline-joined, no trailing newline.
    /// The suite reports its status on the first line of whatever it prints,
    /// so the first line of `combined` is what gets parsed downstream.
    pub combined: String,
    pub exit_code: i32,
}

enum Stream {
    Out,
    Err,
}

/// Exit code for a finished child, mapping signal death to `128 + N` on Unix.
fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .unwrap_or_else(|| status.signal().map_or(1, |s| 128 + s))
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(1)
    }
}

/// Run `command` (split on whitespace) with `args` appended, blocking until
/// the child exits. Stdout and stderr are drained by dedicated reader threads
/// so that `combined` preserves real-time interleaving: a status line written
/// to stdout after auth chatter on stderr must not end up reordered.
///
/// # Errors
///
/// Returns an error if `command` is empty, the child fails to spawn, or a
/// reader thread panics. A child that starts and exits nonzero is not an
/// error; its code is reported in the `Capture`.
pub fn run_command(command: &str, args: &[String]) -> anyhow::Result<Capture> {
    let mut words = command.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty command"))?;
    let leading_args: Vec<&str> = words.collect();

    let mut child = Command::new(program)
        .args(&leading_args)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to launch `{program}`"))?;

    let stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("stdout not captured"))?;
    let stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("stderr not captured"))?;

    let (out_tx, rx) = mpsc::channel();
    let err_tx = out_tx.clone();

    let out_reader = thread::spawn(move || {
        for line in BufReader::new(stdout_pipe).lines().map_while(Result::ok) {
            let _ = out_tx.send((Stream::Out, line));
        }
    });
    let err_reader = thread::spawn(move || {
        for line in BufReader::new(stderr_pipe).lines().map_while(Result::ok) {
            let _ = err_tx.send((Stream::Err, line));
        }
    });

    // Drain while the readers run; the iteration ends once both threads
    // finish and drop their senders.
    let mut stdout_lines: Vec<String> = Vec::new();
    let mut stderr_lines: Vec<String> = Vec::new();
    let mut combined_lines: Vec<String> = Vec::new();
    for (stream, line) in rx {
        combined_lines.push(line.clone());
        match stream {
            Stream::Out => stdout_lines.push(line),
            Stream::Err => stderr_lines.push(line),
        }
    }

    out_reader
        .join()
        .map_err(|_| anyhow::anyhow!("stdout reader thread panicked"))?;
    err_reader
        .join()
        .map_err(|_| anyhow::anyhow!("stderr reader thread panicked"))?;

    let exit_status = child
        .wait()
        .with_context(|| format!("failed to wait for `{program}`"))?;

    Ok(Capture {
        stdout: stdout_lines.join("\n"),
        stderr: stderr_lines.join("\n"),
        combined: combined_lines.join("\n"),
        exit_code: exit_code_of(exit_status),
    })
}
