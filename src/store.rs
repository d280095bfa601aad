//! Storage of uploads, messages and issues.
//!
//! The engine produces messages and issues without identity. A
//! [`LedgerStore`] persists them in batches, assigns sequential identifiers,
//! tracks the upload lifecycle and serves paginated reads. [`MemoryStore`]
//! is the in-process implementation used by the CLI and the tests.
//!
//! # Example
//!
//! ```rust
//! use chatledger::parser::parse_chat;
//! use chatledger::store::{LedgerStore, MemoryStore, Page, UploadStatus};
//!
//! let mut store = MemoryStore::new();
//! let upload = store.create_upload("chat.txt");
//! assert_eq!(upload.status, UploadStatus::Processing);
//!
//! let result = parse_chat("01/02/23, 10:00 - Alice: hi", upload.id);
//! store.insert_messages(result.messages)?;
//! store.insert_issues(result.issues)?;
//! store.set_status(upload.id, UploadStatus::Completed)?;
//!
//! let page = store.messages(upload.id, Page::default())?;
//! assert_eq!(page.total, 1);
//! assert_eq!(page.items[0].id, 1);
//! # Ok::<(), chatledger::LedgerError>(())
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::issue::ParsingIssue;
use crate::message::{ReconstructedMessage, UploadId};

/// Default number of messages per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Processing state of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Pending => "pending",
            UploadStatus::Processing => "processing",
            UploadStatus::Completed => "completed",
            UploadStatus::Failed => "failed",
        }
    }

    /// Returns `true` once processing has ended, successfully or not.
    pub fn is_finished(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Failed)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingested file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id: UploadId,
    pub filename: String,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
}

/// A persisted message with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: u64,
    #[serde(flatten)]
    pub message: ReconstructedMessage,
}

/// A persisted issue with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIssue {
    pub id: u64,
    #[serde(flatten)]
    pub issue: ParsingIssue,
}

/// Page request: 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: usize,
    page_size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Creates a page request. The page is clamped to at least 1 and the
    /// size to `1..=MAX_PAGE_SIZE`.
    ///
    /// ```rust
    /// use chatledger::store::Page;
    ///
    /// let page = Page::new(0, 5000);
    /// assert_eq!(page.page(), 1);
    /// assert_eq!(page.page_size(), 1000);
    /// assert_eq!(Page::new(3, 20).offset(), 40);
    /// ```
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of records skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of messages plus the total for the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub items: Vec<StoredMessage>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Aggregate counts for one upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStats {
    pub message_count: usize,
    pub issue_count: usize,
}

/// Persistence contract for parse results.
///
/// Identifiers are assigned in insertion order and reads are ordered by
/// identifier, so pages are stable.
pub trait LedgerStore {
    /// Registers a new upload in the `processing` state.
    fn create_upload(&mut self, filename: &str) -> Upload;

    /// Looks up an upload.
    fn upload(&self, id: UploadId) -> Option<Upload>;

    /// All uploads, newest first.
    fn uploads(&self) -> Vec<Upload>;

    /// Moves an upload to a new state.
    fn set_status(&mut self, id: UploadId, status: UploadStatus) -> Result<Upload>;

    /// Persists a batch of messages. Returns the identifiers assigned.
    fn insert_messages(&mut self, messages: Vec<ReconstructedMessage>) -> Result<Vec<u64>>;

    /// One page of an upload's messages.
    fn messages(&self, upload: UploadId, page: Page) -> Result<MessagePage>;

    /// Every message of an upload, in identifier order.
    fn all_messages(&self, upload: UploadId) -> Result<Vec<StoredMessage>>;

    /// Persists a batch of issues. Returns the identifiers assigned.
    fn insert_issues(&mut self, issues: Vec<ParsingIssue>) -> Result<Vec<u64>>;

    /// Every issue of an upload, in identifier order.
    fn issues(&self, upload: UploadId) -> Result<Vec<StoredIssue>>;

    /// Message and issue counts for an upload.
    fn stats(&self, upload: UploadId) -> Result<UploadStats>;
}

/// In-memory [`LedgerStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    uploads: Vec<Upload>,
    messages: Vec<StoredMessage>,
    issues: Vec<StoredIssue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_upload(&self, id: UploadId) -> Result<()> {
        if self.uploads.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(LedgerError::UploadNotFound(id))
        }
    }

    fn messages_of(&self, upload: UploadId) -> impl Iterator<Item = &StoredMessage> {
        self.messages
            .iter()
            .filter(move |m| m.message.upload_id == upload)
    }

    fn issues_of(&self, upload: UploadId) -> impl Iterator<Item = &StoredIssue> {
        self.issues
            .iter()
            .filter(move |i| i.issue.upload_id == upload)
    }
}

impl LedgerStore for MemoryStore {
    fn create_upload(&mut self, filename: &str) -> Upload {
        let upload = Upload {
            id: UploadId::new(self.uploads.len() as u64 + 1),
            filename: filename.to_string(),
            status: UploadStatus::Processing,
            created_at: Utc::now(),
        };
        self.uploads.push(upload.clone());
        upload
    }

    fn upload(&self, id: UploadId) -> Option<Upload> {
        self.uploads.iter().find(|u| u.id == id).cloned()
    }

    fn uploads(&self) -> Vec<Upload> {
        // Ids grow with creation time, so reverse id order is newest first.
        self.uploads.iter().rev().cloned().collect()
    }

    fn set_status(&mut self, id: UploadId, status: UploadStatus) -> Result<Upload> {
        let upload = self
            .uploads
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(LedgerError::UploadNotFound(id))?;
        upload.status = status;
        Ok(upload.clone())
    }

    fn insert_messages(&mut self, messages: Vec<ReconstructedMessage>) -> Result<Vec<u64>> {
        for message in &messages {
            self.ensure_upload(message.upload_id)?;
        }
        let first = self.messages.len() as u64 + 1;
        let ids: Vec<u64> = (first..first + messages.len() as u64).collect();
        self.messages.extend(
            ids.iter()
                .zip(messages)
                .map(|(&id, message)| StoredMessage { id, message }),
        );
        Ok(ids)
    }

    fn messages(&self, upload: UploadId, page: Page) -> Result<MessagePage> {
        self.ensure_upload(upload)?;
        let total = self.messages_of(upload).count();
        let items = self
            .messages_of(upload)
            .skip(page.offset())
            .take(page.page_size())
            .cloned()
            .collect();
        Ok(MessagePage {
            items,
            total,
            page: page.page(),
            page_size: page.page_size(),
        })
    }

    fn all_messages(&self, upload: UploadId) -> Result<Vec<StoredMessage>> {
        self.ensure_upload(upload)?;
        Ok(self.messages_of(upload).cloned().collect())
    }

    fn insert_issues(&mut self, issues: Vec<ParsingIssue>) -> Result<Vec<u64>> {
        for issue in &issues {
            self.ensure_upload(issue.upload_id)?;
        }
        let first = self.issues.len() as u64 + 1;
        let ids: Vec<u64> = (first..first + issues.len() as u64).collect();
        self.issues.extend(
            ids.iter()
                .zip(issues)
                .map(|(&id, issue)| StoredIssue { id, issue }),
        );
        Ok(ids)
    }

    fn issues(&self, upload: UploadId) -> Result<Vec<StoredIssue>> {
        self.ensure_upload(upload)?;
        Ok(self.issues_of(upload).cloned().collect())
    }

    fn stats(&self, upload: UploadId) -> Result<UploadStats> {
        self.ensure_upload(upload)?;
        Ok(UploadStats {
            message_count: self.messages_of(upload).count(),
            issue_count: self.issues_of(upload).count(),
        })
    }
}
