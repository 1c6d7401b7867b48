//! JSONL file writer for finished debate sessions.
//!
//! Each [`SessionRecord`] is serialized as a single JSON line with a
//! `recorded_at` field added, and appended to the history file via a
//! buffered writer.
//!
//! [`SessionRecord`]: council_domain::SessionRecord

use council_application::ports::history::{HistoryError, HistoryStore};
use council_domain::SessionRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only JSONL history store.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record
/// and on `Drop` - history survives a crash mid-session-stream.
pub struct JsonlHistoryStore {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlHistoryStore {
    /// Open the history file for appending, creating it (and parent
    /// directories) if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonlHistoryStore {
    fn append(&self, record: &SessionRecord) -> Result<(), HistoryError> {
        let mut value = serde_json::to_value(record)?;
        if let serde_json::Value::Object(map) = &mut value {
            let recorded_at =
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
            map.insert(
                "recorded_at".to_string(),
                serde_json::Value::String(recorded_at),
            );
        }
        let line = serde_json::to_string(&value)?;

        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlHistoryStore {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        Completion, MemberName, Question, Round, RoundEntry, RoundOutcome, SessionId,
        SessionRecord,
    };
    use std::io::Read;

    fn record(id: &str) -> SessionRecord {
        SessionRecord {
            id: SessionId::new(id),
            question: Question::new("q"),
            started_at: "2026-01-01T00:00:00Z".to_string(),
            rounds: vec![RoundOutcome::new(
                Round::One,
                vec![RoundEntry::completed(
                    MemberName::new("openai"),
                    Completion::new("answer"),
                )],
            )],
            moderator: RoundEntry::completed(
                MemberName::new("moderator"),
                Completion::new("verdict"),
            ),
        }
    }

    #[test]
    fn test_appends_one_line_per_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let store = JsonlHistoryStore::open(&path).unwrap();

        store.append(&record("s-1")).unwrap();
        store.append(&record("s-2")).unwrap();
        drop(store);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("recorded_at").is_some());
            assert_eq!(value["question"], "q");
        }
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "s-1");
    }

    #[test]
    fn test_reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");

        {
            let store = JsonlHistoryStore::open(&path).unwrap();
            store.append(&record("s-1")).unwrap();
        }
        {
            let store = JsonlHistoryStore::open(&path).unwrap();
            store.append(&record("s-2")).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim().lines().count(), 2);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deeply").join("nested").join("history.jsonl");
        let store = JsonlHistoryStore::open(&path).unwrap();
        store.append(&record("s-1")).unwrap();
        assert!(path.exists());
    }
}
