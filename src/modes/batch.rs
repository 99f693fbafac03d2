use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::engine::{CliError, CommandProcessor};

/// Run every command in `path`, one per line, in file order
///
/// For each non-empty line the trimmed line is echoed, followed by the
/// processor's result. A missing file is reported once and nothing is
/// processed. A read failure part-way through stops the run after reporting it.
///
/// Returns the number of commands processed. Only failures to write to `out`
/// are returned as errors.
pub fn run_batch<W: Write>(
    processor: &mut CommandProcessor,
    path: &Path,
    out: &mut W,
) -> Result<usize, CliError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("Batch file {} not found", path.display());
            writeln!(out, "Error: File '{}' not found.", path.display())?;
            return Ok(0);
        }
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            return Ok(0);
        }
    };

    let mut processed = 0;
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Reading {} failed: {}", path.display(), e);
                writeln!(out, "Error: {}", e)?;
                break;
            }
        };

        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        let result = processor.process(command);
        writeln!(out, "{}", command)?;
        writeln!(out, "{}", result)?;
        processed += 1;
    }

    tracing::debug!("Batch run processed {} commands", processed);
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{StockCodeRegistry, TradeBookStore, TradeValidator};
    use std::fs;
    use tempfile::TempDir;

    fn processor(temp_dir: &TempDir) -> CommandProcessor {
        CommandProcessor::new(
            TradeValidator::new(StockCodeRegistry::from_codes(["AAPL", "MSFT"])),
            TradeBookStore::open(temp_dir.path().join("orders.csv")).unwrap(),
        )
    }

    #[test]
    fn test_batch_echoes_lines_and_results() {
        let temp_dir = TempDir::new().unwrap();
        let commands = temp_dir.path().join("commands.txt");
        fs::write(
            &commands,
            "buy AAPL 150.00 100\n\n  buy AAPL 150.00 50  \nsell MSFT 50.00 10\nbogus\n",
        )
        .unwrap();

        let mut p = processor(&temp_dir);
        let mut out = Vec::new();
        let processed = run_batch(&mut p, &commands, &mut out).unwrap();

        assert_eq!(processed, 4);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "buy AAPL 150.00 100",
                "Trade book added.",
                "buy AAPL 150.00 50",
                "Trade book updated.",
                "sell MSFT 50.00 10",
                "Trade book added.",
                "bogus",
                "Invalid command. Format: [buy|sell] [STOCKCODE] [PRICE] [VOLUME]",
            ]
        );
        assert_eq!(p.store().records()[0].volume, 150);
    }

    #[test]
    fn test_batch_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.txt");

        let mut p = processor(&temp_dir);
        let mut out = Vec::new();
        let processed = run_batch(&mut p, &missing, &mut out).unwrap();

        assert_eq!(processed, 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("Error: File '{}' not found.\n", missing.display()));
        assert!(p.store().is_empty());
    }
}
