//! Upload lifecycle: decode, reconstruct, persist, report.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use chatledger::ingest::{export_report, ingest_upload};
//! use chatledger::parser::ChatLogParser;
//! use chatledger::store::{MemoryStore, UploadStatus};
//!
//! let mut store = MemoryStore::new();
//! let summary = ingest_upload(
//!     &mut store,
//!     "chat.txt",
//!     b"Export header\n01/02/23, 10:00 - Alice: hi",
//!     &ChatLogParser::new(),
//! )?;
//! assert_eq!(summary.upload.status, UploadStatus::Completed);
//! assert_eq!((summary.message_count, summary.issue_count), (1, 1));
//!
//! let report = export_report(&store, summary.upload.id, Utc::now())?;
//! assert_eq!(report.summary.total_messages, 1);
//! # Ok::<(), chatledger::LedgerError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::LedgerReport;
use crate::error::{LedgerError, Result};
use crate::message::UploadId;
use crate::parser::ChatLogParser;
use crate::store::{LedgerStore, Upload, UploadStatus};

/// Prefix of exported report file names.
pub const REPORT_FILE_PREFIX: &str = "ChatLedger-Audit-";

/// Outcome of a completed ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub upload: Upload,
    pub message_count: usize,
    pub issue_count: usize,
}

/// Registers, parses and persists one uploaded file.
///
/// The upload is created in the `processing` state and moved to
/// `completed` once its messages and issues are stored. If the bytes cannot
/// be decoded the upload is marked `failed`, nothing is persisted for it and
/// the decoding error is returned.
///
/// # Errors
///
/// Returns [`LedgerError::Utf8`] for undecodable input, or any error the
/// store reports.
pub fn ingest_upload<S>(
    store: &mut S,
    filename: &str,
    bytes: &[u8],
    parser: &ChatLogParser,
) -> Result<UploadSummary>
where
    S: LedgerStore + ?Sized,
{
    let upload = store.create_upload(filename);

    let result = match parser.parse_bytes(bytes, upload.id) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(upload_id = %upload.id, filename, error = %err, "upload failed");
            store.set_status(upload.id, UploadStatus::Failed)?;
            return Err(err);
        }
    };

    let message_count = result.messages.len();
    let issue_count = result.issues.len();
    store.insert_messages(result.messages)?;
    store.insert_issues(result.issues)?;
    let upload = store.set_status(upload.id, UploadStatus::Completed)?;

    tracing::info!(
        upload_id = %upload.id,
        filename,
        messages = message_count,
        issues = issue_count,
        "upload processed"
    );

    Ok(UploadSummary {
        upload,
        message_count,
        issue_count,
    })
}

/// Builds the audit report of a stored upload.
///
/// # Errors
///
/// Returns [`LedgerError::UploadNotFound`] for an unknown upload.
pub fn export_report<S>(
    store: &S,
    upload_id: UploadId,
    generated_at: DateTime<Utc>,
) -> Result<LedgerReport>
where
    S: LedgerStore + ?Sized,
{
    if store.upload(upload_id).is_none() {
        return Err(LedgerError::UploadNotFound(upload_id));
    }
    let messages = store.all_messages(upload_id)?;
    let issues = store.issues(upload_id)?;
    Ok(LedgerReport::new(messages, issues, generated_at))
}

/// Name under which an upload's report is offered for download.
///
/// ```rust
/// use chatledger::ingest::report_file_name;
/// use chatledger::store::{LedgerStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// let upload = store.create_upload("family.txt");
/// assert_eq!(report_file_name(&upload), "ChatLedger-Audit-family.txt");
/// ```
pub fn report_file_name(upload: &Upload) -> String {
    format!("{REPORT_FILE_PREFIX}{}", upload.filename)
}
