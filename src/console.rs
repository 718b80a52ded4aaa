use std::io::BufRead;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

// ============================================================================
// Control Console - line-oriented "stop" command on stdin
// ============================================================================
//
// Lines are read on a detached OS thread and forwarded over a channel, so a
// pending read never holds up runtime shutdown after a signal stops the server.
//
// ============================================================================

pub const PROMPT: &str = "Stop to shutdown the server: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// Operator typed `stop`
    Stop,
    /// Control input closed; the server keeps running
    InputClosed,
}

/// Forward each line of `input` to the returned channel from a dedicated
/// thread. The channel closes on EOF, on a read error, or once the
/// receiver is dropped and the next line arrives.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Control input read failed");
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    rx
}

/// Prompt for commands until `stop` is entered or the input ends.
/// Anything else is echoed back as invalid and the prompt repeats.
pub async fn wait_for_stop<W>(
    mut lines: mpsc::Receiver<String>,
    mut output: W,
) -> std::io::Result<ConsoleExit>
where
    W: AsyncWrite + Unpin,
{
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.recv().await else {
            return Ok(ConsoleExit::InputClosed);
        };

        let command = line.trim();
        if command == "stop" {
            output.write_all(b"Shutting down the server\n").await?;
            output.flush().await?;
            return Ok(ConsoleExit::Stop);
        }

        output
            .write_all(format!("Invalid command: {}\n", command).as_bytes())
            .await?;
    }
}
