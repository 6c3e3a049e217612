//! CSV feedback persistence
//!
//! Feedback is an append-only CSV file with the header
//! `news_id,name,feedback,comment`:
//! - Rows are appended with a single write while holding the writer lock,
//!   so concurrent submissions never interleave
//! - Reads scan the whole file and tolerate rows still being written
//! - A missing file reads as "no feedback yet"

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use truthlens_core::{Error, NewsId, Result, Vote};

/// Column names, in file order
pub const HEADER: [&str; 4] = ["news_id", "name", "feedback", "comment"];

/// Name reported for rows without a submitter
pub const UNKNOWN_NAME: &str = "Unknown";

/// Message returned when a vote arrives without a submitter name
pub const MISSING_NAME: &str = "Please enter your name.";

/// One stored vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub news_id: NewsId,
    pub name: String,
    pub vote: Vote,
    pub comment: String,
}

/// Aggregated votes for one news identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub likes: usize,
    pub dislikes: usize,
    pub like_names: Vec<String>,
    pub dislike_names: Vec<String>,
}

impl FeedbackSummary {
    /// Total number of votes
    pub fn total(&self) -> usize {
        self.likes + self.dislikes
    }
}

/// Append-only feedback file
pub struct FeedbackStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedbackStore {
    /// Create a store backed by `path`; nothing is touched until the first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the feedback file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a vote, creating the file (with header) if needed
    pub fn append(&self, news_id: &NewsId, name: &str, vote: Vote, comment: &str) -> Result<()> {
        let record = FeedbackRecord {
            news_id: news_id.clone(),
            name: name.to_string(),
            vote,
            comment: comment.to_string(),
        };
        self.append_record(&record)
    }

    /// Validate and record a vote, returning the updated summary
    pub fn submit(
        &self,
        news_id: &NewsId,
        name: &str,
        vote: Vote,
        comment: &str,
    ) -> Result<FeedbackSummary> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input(MISSING_NAME));
        }
        self.append(news_id, name, vote, comment.trim())?;
        self.summarize(news_id)
    }

    /// Record a prepared feedback row
    pub fn append_record(&self, record: &FeedbackRecord) -> Result<()> {
        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::Writer::from_writer(Vec::new());
        if needs_header {
            writer.write_record(HEADER)?;
            info!("Created feedback store at {}", self.path.display());
        }
        writer.write_record([
            record.news_id.as_str(),
            record.name.as_str(),
            record.vote.as_str(),
            record.comment.as_str(),
        ])?;
        let buf = writer
            .into_inner()
            .map_err(|e| Error::feedback(e.to_string()))?;

        file.write_all(&buf)?;
        file.flush()?;

        metrics::counter!("truthlens_feedback_total", "vote" => record.vote.as_str()).increment(1);
        debug!("Recorded {} for {}", record.vote, record.news_id);
        Ok(())
    }

    /// All well-formed rows for `news_id`, in file order
    pub fn records(&self, news_id: &NewsId) -> Result<Vec<FeedbackRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let content = String::from_utf8_lossy(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);
        let (Some(id_idx), Some(vote_idx)) = (column("news_id"), column("feedback")) else {
            debug!("Feedback file {} has no usable header", self.path.display());
            return Ok(Vec::new());
        };
        let name_idx = column("name");
        let comment_idx = column("comment");

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    debug!("Skipping unreadable feedback row {}: {}", idx + 1, e);
                    continue;
                }
            };

            if row.get(id_idx) != Some(news_id.as_str()) {
                continue;
            }
            let vote = match row.get(vote_idx) {
                Some("like") => Vote::Like,
                Some("dislike") => Vote::Dislike,
                _ => continue,
            };

            records.push(FeedbackRecord {
                news_id: news_id.clone(),
                name: name_idx
                    .and_then(|i| row.get(i))
                    .unwrap_or(UNKNOWN_NAME)
                    .to_string(),
                vote,
                comment: comment_idx
                    .and_then(|i| row.get(i))
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        Ok(records)
    }

    /// Count likes and dislikes for `news_id`
    pub fn summarize(&self, news_id: &NewsId) -> Result<FeedbackSummary> {
        let mut summary = FeedbackSummary::default();
        for record in self.records(news_id)? {
            match record.vote {
                Vote::Like => {
                    summary.likes += 1;
                    summary.like_names.push(record.name);
                }
                Vote::Dislike => {
                    summary.dislikes += 1;
                    summary.dislike_names.push(record.name);
                }
            }
        }
        Ok(summary)
    }
}

impl std::fmt::Debug for FeedbackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FeedbackStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FeedbackStore::new(dir.path().join("data").join("feedback.csv"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_summarizes_to_zero() {
        let (_dir, store) = store();
        let summary = store.summarize(&NewsId::from_text("anything")).unwrap();
        assert_eq!(summary, FeedbackSummary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let (_dir, store) = store();
        let id = NewsId::from_text("Free laptops for students");

        store.append(&id, "Asha", Vote::Like, "").unwrap();
        store.append(&id, "Ravi", Vote::Dislike, "looks fake, really").unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("news_id,name,feedback,comment"));
        assert_eq!(lines.next(), Some(format!("{id},Asha,like,").as_str()));
        assert_eq!(
            lines.next(),
            Some(format!("{id},Ravi,dislike,\"looks fake, really\"").as_str())
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_summary_filters_by_news_id() {
        let (_dir, store) = store();
        let a = NewsId::from_text("story a");
        let b = NewsId::from_text("story b");

        store.append(&a, "Asha", Vote::Like, "").unwrap();
        store.append(&b, "Ravi", Vote::Like, "").unwrap();
        store.append(&a, "Meena", Vote::Dislike, "").unwrap();
        store.append(&a, "Kiran", Vote::Like, "").unwrap();

        let summary = store.summarize(&a).unwrap();
        assert_eq!(summary.likes, 2);
        assert_eq!(summary.dislikes, 1);
        assert_eq!(summary.like_names, vec!["Asha", "Kiran"]);
        assert_eq!(summary.dislike_names, vec!["Meena"]);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_tolerates_garbage_rows() {
        let (_dir, store) = store();
        let id = NewsId::from_text("story");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let content = format!(
            "news_id,name,feedback,comment\n\
             {id},Asha,like,\n\
             {id},Ravi,meh,\n\
             {id}\n\
             {id},,dislike\n\
             {id},Meena,dis"
        );
        let mut bytes = content.into_bytes();
        bytes.extend_from_slice(b"\n\xff\xfe,broken,like,\n");
        std::fs::write(store.path(), bytes).unwrap();

        let summary = store.summarize(&id).unwrap();
        assert_eq!(summary.likes, 1);
        assert_eq!(summary.dislikes, 1);
        assert_eq!(summary.dislike_names, vec![""]);
    }

    #[test]
    fn test_missing_name_column_reports_unknown() {
        let (_dir, store) = store();
        let id = NewsId::from_text("story");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), format!("news_id,feedback\n{id},like\n")).unwrap();

        let summary = store.summarize(&id).unwrap();
        assert_eq!(summary.like_names, vec![UNKNOWN_NAME]);
    }

    #[test]
    fn test_submit_rejects_blank_name() {
        let (_dir, store) = store();
        let id = NewsId::from_text("story");

        let err = store.submit(&id, "   ", Vote::Like, "").unwrap_err();
        assert!(err.is_user_error());
        assert!(!store.path().exists());

        let summary = store.submit(&id, "  Asha ", Vote::Like, " ok ").unwrap();
        assert_eq!(summary.like_names, vec!["Asha"]);
        assert_eq!(store.records(&id).unwrap()[0].comment, "ok");
    }

    #[test]
    fn test_header_not_repeated_for_existing_file() {
        let (_dir, store) = store();
        let id = NewsId::from_text("story");
        store.append(&id, "Asha", Vote::Like, "").unwrap();

        let reopened = FeedbackStore::new(store.path());
        reopened.append(&id, "Ravi", Vote::Like, "").unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.matches("news_id,name").count(), 1);
        assert_eq!(reopened.summarize(&id).unwrap().likes, 2);
    }
}
