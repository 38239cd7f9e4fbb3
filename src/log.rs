use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub action: String,
    pub input: String,
    pub output: Option<String>,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

impl LogEntry {
    pub fn new(
        action: &str,
        input: &Path,
        output: Option<&Path>,
        input_bytes: usize,
        output_bytes: usize,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            input: input.display().to_string(),
            output: output.map(|p| p.display().to_string()),
            input_bytes,
            output_bytes,
        }
    }
}

/// Appends one JSON line to the action log.
pub fn log_action(log_path: &Path, entry: &LogEntry) -> anyhow::Result<()> {
    let json = serde_json::to_string(entry).context("serializing log entry")?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    writeln!(file, "{}", json).with_context(|| format!("writing to {}", log_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_json_lines() {
        let log_path = std::env::temp_dir().join(format!("huff-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&log_path);

        let first = LogEntry::new("compress", Path::new("a.txt"), Some(Path::new("a.txt.huff")), 10, 7);
        let second = LogEntry::new("inspect", Path::new("a.txt.huff"), None, 7, 0);
        log_action(&log_path, &first).unwrap();
        log_action(&log_path, &second).unwrap();

        let contents = std::fs::read_to_string(&log_path).unwrap();
        let entries: Vec<LogEntry> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(entries, vec![first, second]);
        std::fs::remove_file(&log_path).unwrap();
    }
}
