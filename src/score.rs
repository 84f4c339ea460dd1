use std::{
    fmt::Write as _,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::error::ScoreError;

pub const MAX_SCORES: usize = 100;
pub const MAX_NAME_LEN: usize = 49;
const DEFAULT_NAME: &str = "player";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i32,
}

impl ScoreEntry {
    pub fn new(name: &str, score: i32) -> Self {
        ScoreEntry { name: sanitize_name(name), score }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Saved,
    /// The table already held `MAX_SCORES` entries, so the new one was not added.
    TableFull,
}

/// High-score table kept in a flat `name score` file.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a score, keep the table sorted best-first and write it back.
    pub fn record(&self, name: &str, score: i32) -> Result<RecordOutcome, ScoreError> {
        let mut entries = self.list()?;

        let outcome = if entries.len() < MAX_SCORES {
            entries.push(ScoreEntry::new(name, score));
            RecordOutcome::Saved
        } else {
            warn!(max = MAX_SCORES, name, score, "score table is full, score not recorded");
            RecordOutcome::TableFull
        };

        // Stable, so equal scores keep their order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_SCORES);

        let mut content = String::new();
        for entry in &entries {
            // Writing into a String cannot fail.
            let _ = writeln!(content, "{} {}", entry.name, entry.score);
        }
        fs::write(&self.path, content).map_err(|source| ScoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), entries = entries.len(), ?outcome, "scores saved");
        Ok(outcome)
    }

    /// Stored entries in file order. A missing file is an empty table.
    pub fn list(&self) -> Result<Vec<ScoreEntry>, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_scores(&content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no score file yet");
                Ok(Vec::new())
            }
            Err(source) => Err(ScoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Reads `name score` pairs up to the first malformed record.
fn parse_scores(content: &str) -> Vec<ScoreEntry> {
    let mut entries = Vec::new();
    let mut tokens = content.split_whitespace();

    while entries.len() < MAX_SCORES {
        let (name, score) = match (tokens.next(), tokens.next()) {
            (Some(name), Some(score)) => (name, score),
            (Some(name), None) => {
                warn!(name, "score entry without a score, ignoring it");
                break;
            }
            _ => break,
        };

        match score.parse() {
            Ok(score) => entries.push(ScoreEntry { name: name.to_string(), score }),
            Err(_) => {
                warn!(name, score, "malformed score entry, ignoring the rest of the file");
                break;
            }
        }
    }

    entries
}

/// One whitespace-free token of at most `MAX_NAME_LEN` characters.
pub fn sanitize_name(name: &str) -> String {
    let name: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_NAME_LEN)
        .collect();

    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}

pub fn format_report(entries: &[ScoreEntry]) -> String {
    if entries.is_empty() {
        return "No scores available.\n".to_string();
    }

    let mut report = String::from("Top Scores:\n");
    for entry in entries {
        let _ = writeln!(report, "{} {}", entry.name, entry.score);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ScoreStore {
        ScoreStore::new(dir.path().join("scores.txt"))
    }

    #[test]
    fn test_record_inserts_in_descending_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "alice 10\nbob 20\n").unwrap();

        assert_eq!(store.record("carol", 15).unwrap(), RecordOutcome::Saved);

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "bob 20\ncarol 15\nalice 10\n"
        );
    }

    #[test]
    fn test_listing_is_sorted_after_many_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for (i, score) in [3, 17, 8, 17, 1, 42, 0, 9].iter().enumerate() {
            store.record(&format!("p{}", i), *score).unwrap();
        }

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 8);
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(entries[0], ScoreEntry::new("p5", 42));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.record("first", 5).unwrap();
        store.record("second", 5).unwrap();
        store.record("third", 7).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_full_table_refuses_new_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let content: String = (0..MAX_SCORES).map(|i| format!("p{} {}\n", i, 1000 - i)).collect();
        fs::write(store.path(), &content).unwrap();

        assert_eq!(store.record("late", 5000).unwrap(), RecordOutcome::TableFull);

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), MAX_SCORES);
        assert!(entries.iter().all(|e| e.name != "late"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.list().unwrap().is_empty());
        assert_eq!(format_report(&store.list().unwrap()), "No scores available.\n");
    }

    #[test]
    fn test_parsing_stops_at_malformed_record() {
        let entries = parse_scores("ann 4\nben x\ncid 2\n");
        assert_eq!(entries, vec![ScoreEntry::new("ann", 4)]);

        let entries = parse_scores("ann 4 dangling");
        assert_eq!(entries, vec![ScoreEntry::new("ann", 4)]);
    }

    #[test]
    fn test_record_into_malformed_file_keeps_valid_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "ann 4\n???\n").unwrap();

        store.record("zed", 9).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "zed 9\nann 4\n");
    }

    #[test]
    fn test_negative_scores_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "bob 20\nalice -5\ncarl 3\n").unwrap();

        store.record("dan", 7).unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "bob 20\ndan 7\ncarl 3\nalice -5\n"
        );
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  Ada Lovelace \n"), "Ada_Lovelace");
        assert_eq!(sanitize_name("\t\n"), "player");
        assert_eq!(sanitize_name(&"x".repeat(80)).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_format_report() {
        let entries = vec![ScoreEntry::new("bob", 20), ScoreEntry::new("alice", 10)];
        assert_eq!(format_report(&entries), "Top Scores:\nbob 20\nalice 10\n");
    }
}
