use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{SubdomainError, SubdomainResult};

/// Run a command that reads `stdin_data` on its stdin and capture
/// its stdout. Fails if the command returns a non-zero exit code.
pub fn run_with_stdin(program: &str, args: &[&str], stdin_data: &[u8]) -> SubdomainResult<String> {
    log::debug!("running {}", format_command(program, args));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SubdomainError::CommandNotFound(program.to_string())
            } else {
                SubdomainError::Io(e)
            }
        })?;

    if let Some(stdin) = &mut child.stdin {
        stdin.write_all(stdin_data)?;
    }
    drop(child.stdin.take());

    let output = child.wait_with_output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::error!("stderr: {stderr}");
        Err(SubdomainError::CommandFailed {
            command: format_command(program, args),
            status: output.status,
        })
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| (*a).to_string()));
    parts.join(" ")
}
