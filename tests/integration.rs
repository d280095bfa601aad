//! Integration tests for chatledger.
//!
//! These tests drive the public API the way an application would: parse
//! whole exports, persist them, and build reports.

use std::fs;

use chrono::{Datelike, Timelike, Utc};
use tempfile::tempdir;

use chatledger::config::ParserConfig;
use chatledger::ingest::{export_report, ingest_upload, report_file_name};
use chatledger::issue::{IssueType, Severity};
use chatledger::message::{MessageType, ReliabilityStatus, UploadId};
use chatledger::parser::{ChatLogParser, parse_chat};
use chatledger::store::{LedgerStore, MemoryStore, Page, UploadStatus};

const UPLOAD: UploadId = UploadId::new(1);

fn parse(content: &str) -> chatledger::ParseResult {
    parse_chat(content, UPLOAD)
}

/// A realistic mixed export.
const MIXED_EXPORT: &str = "\
Messages and calls are end-to-end encrypted.
Export generated by WhatsApp

[3/14/24, 9:15:02 PM] Dana: Did everyone get the tickets?
3/14/24, 21:16 - Eli: Yes
Got mine this morning
and printed them
3/14/24, 21:17 - Farah: <Media omitted>
3/14/24, 21:18 - Eli: This message was deleted
3/14/24, 21:19 - Farah added Gus
[3/14/24, 9:20 PM] Gus: hi all";

// ============================================================================
// Line accounting
// ============================================================================

#[test]
fn test_every_line_accounted_once() {
    let result = parse(MIXED_EXPORT);

    let non_blank = MIXED_EXPORT.lines().filter(|l| !l.trim().is_empty()).count();
    let in_messages: usize = result.messages.iter().map(|m| m.line_count()).sum();

    assert_eq!(in_messages + result.issues.len(), non_blank);
    assert_eq!(result.messages.len(), 6);
    assert_eq!(result.issues.len(), 2);
}

#[test]
fn test_no_line_start_yields_only_orphans() {
    let content = "just some notes\n\n  more notes  \nand a third line";
    let result = parse(content);

    assert!(result.messages.is_empty());
    assert_eq!(result.issues.len(), 3);
    let raws: Vec<_> = result
        .issues
        .iter()
        .map(|i| i.raw_message.as_deref().unwrap())
        .collect();
    assert_eq!(raws, ["just some notes", "more notes", "and a third line"]);
    let lines: Vec<_> = result.issues.iter().map(|i| i.line_number.unwrap()).collect();
    assert_eq!(lines, [1, 3, 4]);
}

#[test]
fn test_orphan_before_first_message() {
    let result = parse("hello\n01/02/23, 10:00 - Alice: hi");

    assert_eq!(result.issues.len(), 1);
    let issue = &result.issues[0];
    assert_eq!(issue.issue_type, IssueType::OrphanedLine);
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.message_id, None);
    assert_eq!(issue.raw_message.as_deref(), Some("hello"));

    assert_eq!(result.messages.len(), 1);
    assert_eq!(result.messages[0].sender_name.as_deref(), Some("Alice"));
    assert_eq!(result.messages[0].content, "hi");
}

#[test]
fn test_order_is_preserved() {
    let result = parse(MIXED_EXPORT);
    let senders: Vec<_> = result
        .messages
        .iter()
        .map(|m| m.sender_name.as_deref().unwrap())
        .collect();
    assert_eq!(senders, ["Dana", "Eli", "Farah", "Eli", "System", "Gus"]);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_parsing_is_idempotent() {
    let first = parse(MIXED_EXPORT);
    let second = parse(MIXED_EXPORT);
    assert_eq!(first, second);
}

#[test]
fn test_upload_id_is_the_only_difference() {
    let a = parse_chat(MIXED_EXPORT, UploadId::new(1));
    let mut b = parse_chat(MIXED_EXPORT, UploadId::new(2));

    for msg in &mut b.messages {
        msg.upload_id = UploadId::new(1);
    }
    for issue in &mut b.issues {
        issue.upload_id = UploadId::new(1);
    }
    assert_eq!(a, b);
}

#[test]
fn test_parser_is_shareable_across_threads() {
    let parser = ChatLogParser::new();
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let parser = &parser;
                scope.spawn(move || parser.parse_str(MIXED_EXPORT, UploadId::new(i)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.messages.len(), 6);
        assert!(
            result
                .messages
                .iter()
                .all(|m| m.upload_id == UploadId::new(i as u64 + 1))
        );
    }
}

// ============================================================================
// Confidence
// ============================================================================

#[test]
fn test_bracketed_single_line_is_verified() {
    let result = parse("[1/15/24, 10:30:45 AM] Alice: Hello");
    let msg = &result.messages[0];

    assert_eq!(msg.confidence_score, 1.0);
    assert_eq!(
        msg.confidence_reason,
        "✓ Verified\nStandard iOS format with 12-hour timestamp. No ambiguities detected."
    );
    assert_eq!(msg.reliability(), Some(ReliabilityStatus::Verified));
}

#[test]
fn test_dashed_with_two_continuations() {
    let result = parse("01/02/23, 10:00 - Bob: first\nsecond\nthird");

    assert_eq!(result.messages.len(), 1);
    let msg = &result.messages[0];
    assert_eq!(msg.content, "first\nsecond\nthird");
    assert_eq!(msg.confidence_score, 0.95);
    assert_eq!(
        msg.confidence_reason,
        "◐ Likely Accurate\nMessage spans multiple lines. Sender confirmed by timestamp match."
    );
}

#[test]
fn test_system_message_keeps_score_with_continuation() {
    let result = parse("01/02/23, 10:00 - Alice changed the subject\nto \"Trip\"");
    let msg = &result.messages[0];

    assert_eq!(msg.confidence_score, 0.9);
    assert_eq!(
        msg.confidence_reason,
        "◐ Likely Accurate\nSystem message format recognized, but sender auto-filled."
    );
    assert_eq!(msg.content, "Alice changed the subject\nto \"Trip\"");
}

// ============================================================================
// Content types
// ============================================================================

#[test]
fn test_content_types() {
    let result = parse(MIXED_EXPORT);
    let types: Vec<_> = result.messages.iter().map(|m| m.message_type).collect();
    assert_eq!(
        types,
        [
            MessageType::Text,
            MessageType::Text,
            MessageType::Media,
            MessageType::Deleted,
            MessageType::System,
            MessageType::Text,
        ]
    );
}

#[test]
fn test_system_lines_ignore_markers() {
    let result = parse("01/02/23, 10:00 - <Media omitted>\n01/02/23, 10:01 - This message was deleted");
    assert!(result.messages.iter().all(|m| m.message_type == MessageType::System));
}

/// The type is decided by the opening line alone; markers that only show up
/// on continuation lines do not re-type the message.
#[test]
fn test_type_is_fixed_when_message_opens() {
    let result = parse("01/02/23, 10:00 - Bob: look at this\n<Media omitted>");
    let msg = &result.messages[0];

    assert!(msg.content.contains("<Media omitted>"));
    assert_eq!(msg.message_type, MessageType::Text);
}

// ============================================================================
// Timestamps
// ============================================================================

#[test]
fn test_impossible_date_is_kept_verbatim() {
    let result = parse("2/30/23, 10:00 - Alice: leap?");

    assert!(result.issues.is_empty());
    let msg = &result.messages[0];
    assert_eq!(msg.timestamp_original, "2/30/23, 10:00");
    assert!(msg.timestamp_normalized.is_none());
    assert_eq!(msg.confidence_score, 1.0);
}

#[test]
fn test_timestamps_normalize_month_first() {
    let result = parse(MIXED_EXPORT);

    let dana = result.messages[0].timestamp_normalized.unwrap();
    assert_eq!((dana.year(), dana.month(), dana.day()), (2024, 3, 14));
    assert_eq!((dana.hour(), dana.minute(), dana.second()), (21, 15, 2));

    let eli = result.messages[1].timestamp_normalized.unwrap();
    assert_eq!((eli.hour(), eli.minute()), (21, 16));
}

// ============================================================================
// Configuration and files
// ============================================================================

#[test]
fn test_custom_config() {
    let parser = ChatLogParser::with_config(
        ParserConfig::new()
            .with_chat_name("Trip planning")
            .with_system_sender("WhatsApp"),
    );
    let result = parser.parse_str(MIXED_EXPORT, UPLOAD);

    assert!(result.messages.iter().all(|m| m.chat_name == "Trip planning"));
    assert_eq!(result.messages[4].sender_name.as_deref(), Some("WhatsApp"));
}

#[test]
fn test_parse_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, MIXED_EXPORT).unwrap();

    let result = ChatLogParser::new().parse(&path, UPLOAD).unwrap();
    assert_eq!(result, parse(MIXED_EXPORT));
}

// ============================================================================
// Store and ingest
// ============================================================================

#[test]
fn test_ingest_and_page_through_messages() {
    let mut store = MemoryStore::new();
    let summary = ingest_upload(
        &mut store,
        "trip.txt",
        MIXED_EXPORT.as_bytes(),
        &ChatLogParser::new(),
    )
    .unwrap();

    assert_eq!(summary.upload.status, UploadStatus::Completed);
    assert_eq!(summary.message_count, 6);
    assert_eq!(summary.issue_count, 2);

    let first = store.messages(summary.upload.id, Page::new(1, 4)).unwrap();
    let second = store.messages(summary.upload.id, Page::new(2, 4)).unwrap();
    assert_eq!(first.total, 6);
    assert_eq!(first.items.len(), 4);
    assert_eq!(second.items.len(), 2);
    assert!(first.items.last().unwrap().id < second.items[0].id);

    let stats = store.stats(summary.upload.id).unwrap();
    assert_eq!((stats.message_count, stats.issue_count), (6, 2));
}

#[test]
fn test_failed_ingest_leaves_nothing_behind() {
    let mut store = MemoryStore::new();
    let mut bytes = MIXED_EXPORT.as_bytes().to_vec();
    bytes.push(0xC0);

    let err = ingest_upload(&mut store, "broken.txt", &bytes, &ChatLogParser::new()).unwrap_err();
    assert!(err.is_utf8());

    let uploads = store.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].status, UploadStatus::Failed);
    assert_eq!(store.stats(uploads[0].id).unwrap().message_count, 0);
}

#[test]
fn test_export_report() {
    let mut store = MemoryStore::new();
    let summary = ingest_upload(
        &mut store,
        "trip.txt",
        MIXED_EXPORT.as_bytes(),
        &ChatLogParser::new(),
    )
    .unwrap();

    let report = export_report(&store, summary.upload.id, Utc::now()).unwrap();
    assert_eq!(report.summary.total_messages, 6);
    assert_eq!(report.summary.total_issues, 2);
    assert_eq!(report.summary.stats.by_reliability.verified, 4);
    assert_eq!(report.summary.stats.by_reliability.likely, 2);
    assert_eq!(report_file_name(&summary.upload), "ChatLedger-Audit-trip.txt");
}
