//! Interactive prompt
//!
//! Stdin is read on a dedicated thread and forwarded over a channel, so the
//! prompt loop can race each line against a shutdown signal (Ctrl+C) without
//! leaving a blocked read behind when it exits.

use std::future::Future;
use std::io::{self, BufRead, Write};

use tokio::sync::mpsc;

use crate::engine::{CliError, CommandProcessor};

pub const PROMPT: &str = "$ ";

/// What the prompt loop should do with one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// `exit` in any letter case
    Exit,
    /// Blank line, nothing to print
    Skip,
    /// Print this message and keep going
    Reply(String),
}

/// Interpret one line of user input
pub fn handle_line(processor: &mut CommandProcessor, line: &str) -> LineAction {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        LineAction::Exit
    } else if trimmed.is_empty() {
        LineAction::Skip
    } else {
        LineAction::Reply(processor.process(trimmed))
    }
}

/// Spawn a thread that forwards stdin lines until EOF or the receiver is dropped
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Run the prompt loop
///
/// Ends on `exit`, on end of input, or when `shutdown` resolves. A line that
/// could not be read is reported and the loop continues.
pub async fn run_interactive<W, S>(
    processor: &mut CommandProcessor,
    lines: &mut mpsc::UnboundedReceiver<io::Result<String>>,
    out: &mut W,
    shutdown: S,
) -> Result<(), CliError>
where
    W: Write,
    S: Future,
{
    tokio::pin!(shutdown);

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        tokio::select! {
            _ = &mut shutdown => {
                writeln!(out, "\nExiting...")?;
                break;
            }
            next = lines.recv() => match next {
                Some(Ok(line)) => match handle_line(processor, &line) {
                    LineAction::Exit => break,
                    LineAction::Skip => {}
                    LineAction::Reply(message) => writeln!(out, "{}", message)?,
                },
                Some(Err(e)) => {
                    tracing::warn!("Failed to read input line: {}", e);
                    writeln!(out, "Error: {}", e)?;
                }
                None => {
                    writeln!(out)?;
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{StockCodeRegistry, TradeBookStore, TradeValidator};
    use tempfile::TempDir;

    fn processor(temp_dir: &TempDir) -> CommandProcessor {
        CommandProcessor::new(
            TradeValidator::new(StockCodeRegistry::from_codes(["AAPL"])),
            TradeBookStore::open(temp_dir.path().join("orders.csv")).unwrap(),
        )
    }

    fn feed(lines: &[&str]) -> mpsc::UnboundedReceiver<io::Result<String>> {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(Ok(line.to_string())).unwrap();
        }
        rx
    }

    #[test]
    fn test_handle_line() {
        let temp_dir = TempDir::new().unwrap();
        let mut p = processor(&temp_dir);

        assert_eq!(handle_line(&mut p, "exit"), LineAction::Exit);
        assert_eq!(handle_line(&mut p, "  EXIT "), LineAction::Exit);
        assert_eq!(handle_line(&mut p, "   "), LineAction::Skip);
        assert_eq!(
            handle_line(&mut p, "buy AAPL 1.00 1"),
            LineAction::Reply("Trade book added.".to_string())
        );
    }

    #[tokio::test]
    async fn test_prompt_loop_stops_at_exit() {
        let temp_dir = TempDir::new().unwrap();
        let mut p = processor(&temp_dir);
        let mut rx = feed(&["buy AAPL 1.00 1", "", "buy AAPL 1.00 2", "Exit", "buy AAPL 1.00 3"]);
        let mut out = Vec::new();

        run_interactive(&mut p, &mut rx, &mut out, std::future::pending::<()>())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "$ Trade book added.\n$ $ Trade book updated.\n$ "
        );
        assert_eq!(p.store().records()[0].volume, 3);
    }

    #[tokio::test]
    async fn test_prompt_loop_continues_after_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut p = processor(&temp_dir);
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")))
            .unwrap();
        tx.send(Ok("buy AAPL 1.00 1".to_string())).unwrap();
        drop(tx);
        let mut out = Vec::new();

        run_interactive(&mut p, &mut rx, &mut out, std::future::pending::<()>())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: bad utf-8\n"));
        assert!(text.contains("Trade book added.\n"));
        assert_eq!(p.store().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_signal_exits_gracefully() {
        let temp_dir = TempDir::new().unwrap();
        let mut p = processor(&temp_dir);
        // Sender kept alive so the loop would otherwise wait forever
        let (_tx, mut rx) = mpsc::unbounded_channel::<io::Result<String>>();
        let mut out = Vec::new();

        run_interactive(&mut p, &mut rx, &mut out, std::future::ready(()))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "$ \nExiting...\n");
    }
}
