use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use chrono::Local;
use tokio::{
    fs::OpenOptions,
    io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader},
    process::Command,
    sync::mpsc,
};

use crate::info;

use super::{DownloadError, DownloadOutcome};

/// Runs `program` with `args` and streams its output.
///
/// A header naming the command is appended to `log_file` first. Then every
/// line the child writes to stdout or stderr is echoed to the console and
/// appended to the log as soon as it arrives. The call returns once the
/// child has exited; its exit status is reported but not interpreted.
pub async fn run_logged(
    program: &str,
    args: &[String],
    log_file: &Path,
) -> Result<DownloadOutcome, DownloadError> {
    let command_line = render_command(program, args);

    let mut log = open_log(log_file).await?;
    let header = format!(
        "\n=== [{timestamp}] Command: {command} ===\n",
        timestamp = Local::now().format("%Y-%m-%d %H:%M:%S"),
        command = command_line
    );
    write_log(&mut log, log_file, header.as_bytes()).await?;
    info!("{}", header.trim());

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| DownloadError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, tx.clone()));
    }
    drop(tx);

    while let Some(line) = rx.recv().await {
        println!("{}", line);
        write_log(&mut log, log_file, format!("{}\n", line).as_bytes()).await?;
    }

    let status = child.wait().await.map_err(|source| DownloadError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let exit_code = status.code();
    let trailer = match exit_code {
        Some(code) => format!("=== Exit status: {} ===\n", code),
        None => "=== Exit status: terminated by signal ===\n".to_string(),
    };
    write_log(&mut log, log_file, trailer.as_bytes()).await?;
    log.flush().await.map_err(|source| DownloadError::Log {
        path: log_file.to_path_buf(),
        source,
    })?;

    Ok(DownloadOutcome {
        command: command_line,
        exit_code,
    })
}

/// Renders a command the way it would be typed in a shell.
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

async fn open_log(log_file: &Path) -> Result<tokio::fs::File, DownloadError> {
    let to_error = |source| DownloadError::Log {
        path: log_file.to_path_buf(),
        source,
    };

    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .await
        .map_err(to_error)
}

async fn write_log(
    log: &mut tokio::fs::File,
    log_file: &Path,
    bytes: &[u8],
) -> Result<(), DownloadError> {
    log.write_all(bytes)
        .await
        .map_err(|source| DownloadError::Log {
            path: PathBuf::from(log_file),
            source,
        })
}

// Reads raw lines so that non UTF-8 output neither stops the forwarding nor
// leaves the child blocked on a full pipe.
async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(line).is_err() {
                    break;
                }
            }
        }
    }
}
