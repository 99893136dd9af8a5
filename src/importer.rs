//! Telegram export importer.
//!
//! Reads a whole-account Telegram Desktop export (`result.json`) and turns it
//! into [`Chat`]s. The expected shape is:
//!
//! ```json
//! {
//!   "chats": {
//!     "list": [
//!       {
//!         "name": "Family",
//!         "messages": [
//!           {"type": "message", "date": "2024-01-15T10:30:00", "from": "Mom", "text": "Hi"},
//!           {"type": "service", "action": "pin_message"}
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Unknown keys are ignored. Record-level rules live in
//! [`parsing::telegram`](crate::parsing::telegram).

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::Chat;
use crate::error::ImportError;
use crate::parsing::telegram::{
    DiscardReason, MessageOutcome, RecordPath, as_object, get_array, get_object, get_str,
    parse_message,
};

/// Counts gathered during one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Number of chats imported
    pub chats: usize,
    /// Number of messages kept
    pub included: usize,
    /// Records whose type was not `"message"`
    pub not_a_message: usize,
    /// Messages with empty text
    pub empty_content: usize,
    /// Messages from deleted accounts
    pub deleted_sender: usize,
}

impl ImportReport {
    /// Total number of discarded records.
    pub fn discarded(&self) -> usize {
        self.not_a_message + self.empty_content + self.deleted_sender
    }

    fn record_discard(&mut self, reason: DiscardReason) {
        match reason {
            DiscardReason::NotAMessage => self.not_a_message += 1,
            DiscardReason::EmptyContent => self.empty_content += 1,
            DiscardReason::DeletedSender => self.deleted_sender += 1,
        }
    }
}

/// Imports chats from a Telegram JSON export.
///
/// The importer owns its input and is consumed by
/// [`import_chats`](Self::import_chats), so a stream is read at most once.
///
/// # Example
///
/// ```
/// use chatgram::importer::TelegramImporter;
///
/// let json = r#"{"chats": {"list": [{"name": "Notes", "messages": [
///     {"type": "message", "date": "2024-01-15T10:30:00", "from": "Me", "text": "todo"}
/// ]}]}}"#;
///
/// let chats = TelegramImporter::new(json.as_bytes()).import_chats()?;
/// assert_eq!(chats[0].name(), "Notes");
/// assert_eq!(chats[0].len(), 1);
/// # Ok::<(), chatgram::ImportError>(())
/// ```
#[derive(Debug)]
pub struct TelegramImporter<R> {
    input: R,
}

impl TelegramImporter<BufReader<File>> {
    /// Opens an export file.
    ///
    /// Fails with [`ImportError::FileUnreadable`] if the path does not exist,
    /// cannot be opened or is not a regular file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let unreadable = |source| ImportError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        let metadata = file.metadata().map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        tracing::debug!(path = %path.display(), bytes = metadata.len(), "Opened export");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> TelegramImporter<R> {
    /// Wraps a byte stream containing an export document.
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Reads the whole document and returns its chats in document order.
    ///
    /// Any structural defect aborts the import; no partial result is
    /// returned.
    pub fn import_chats(self) -> Result<Vec<Chat>, ImportError> {
        self.import_chats_with_report().map(|(chats, _)| chats)
    }

    /// Like [`import_chats`](Self::import_chats), also returning counts of
    /// kept and discarded records.
    pub fn import_chats_with_report(self) -> Result<(Vec<Chat>, ImportReport), ImportError> {
        let document: Value = serde_json::from_reader(self.input)?;
        let root = RecordPath::root();

        let top = as_object(&document, || root.record())?;
        let chats = get_object(top, "chats", || root.field("chats"))?;
        let list = get_array(chats, "list", || root.field("chats.list"))?;

        let mut report = ImportReport::default();
        let mut imported = Vec::with_capacity(list.len());
        for (index, value) in list.iter().enumerate() {
            imported.push(parse_chat(value, RecordPath::chat(index), &mut report)?);
        }
        report.chats = imported.len();

        tracing::info!(
            chats = report.chats,
            messages = report.included,
            discarded = report.discarded(),
            "Import finished"
        );
        Ok((imported, report))
    }
}

fn parse_chat(value: &Value, at: RecordPath, report: &mut ImportReport) -> Result<Chat, ImportError> {
    let record = as_object(value, || at.record())?;
    let name = get_str(record, "name", || at.field("name"))?;
    let entries = get_array(record, "messages", || at.field("messages"))?;

    let mut messages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_message(entry, at.message(index))? {
            MessageOutcome::Included(msg) => messages.push(msg),
            MessageOutcome::Discarded(reason) => {
                tracing::debug!(chat = name, index, %reason, "Discarded record");
                report.record_discard(reason);
            }
        }
    }

    tracing::debug!(chat = name, messages = messages.len(), "Imported chat");
    report.included += messages.len();
    Ok(Chat::new(name, messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputFault;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn import(json: &str) -> Result<Vec<Chat>, ImportError> {
        TelegramImporter::new(json.as_bytes()).import_chats()
    }

    const MIXED: &str = r#"{
        "about": "export",
        "chats": {"list": [
            {"name": "Alpha", "type": "personal_chat", "id": 1, "messages": [
                {"id": 1, "type": "message", "date": "2024-01-15T10:30:00", "from": "Alice", "text": "Hi"},
                {"id": 2, "type": "service", "date": "2024-01-15T10:31:00", "actor": "Bob", "action": "pin_message", "text": ""},
                {"id": 3, "type": "message", "date": "2024-01-15T10:32:00", "from": "Bob", "text": ""},
                {"id": 4, "type": "message", "date": "2024-01-15T10:33:00", "from": null, "text": "ghost"},
                {"id": 5, "type": "message", "date": "2024-01-16T08:00:00", "from": "Bob", "text": ["a", {"type": "bold", "text": "b"}]}
            ]},
            {"name": "Beta", "messages": []}
        ]}
    }"#;

    #[test]
    fn test_import_keeps_document_order() {
        let chats = import(MIXED).unwrap();
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].name(), "Alpha");
        assert_eq!(chats[1].name(), "Beta");
        assert!(chats[1].is_empty());
    }

    #[test]
    fn test_import_filters_discards() {
        let chats = import(MIXED).unwrap();
        let contents: Vec<&str> = chats[0].iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["Hi", "ab"]);
    }

    #[test]
    fn test_report_counts() {
        let (_, report) = TelegramImporter::new(MIXED.as_bytes())
            .import_chats_with_report()
            .unwrap();
        assert_eq!(
            report,
            ImportReport {
                chats: 2,
                included: 2,
                not_a_message: 1,
                empty_content: 1,
                deleted_sender: 1,
            }
        );
        assert_eq!(report.discarded(), 3);
    }

    #[test]
    fn test_empty_list() {
        assert!(import(r#"{"chats": {"list": []}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_chats() {
        let err = import(r#"{"personal_information": {}}"#).unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(err.field(), Some("chats"));
    }

    #[test]
    fn test_missing_list() {
        let err = import(r#"{"chats": {}}"#).unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(err.field(), Some("chats.list"));
    }

    #[test]
    fn test_list_wrong_type() {
        let err = import(r#"{"chats": {"list": {}}}"#).unwrap_err();
        assert!(err.is_unexpected_schema());
    }

    #[test]
    fn test_top_level_array() {
        let err = import("[]").unwrap_err();
        assert!(err.is_unexpected_schema());
    }

    #[test]
    fn test_chat_without_name() {
        let err = import(r#"{"chats": {"list": [{"messages": []}]}}"#).unwrap_err();
        assert_eq!(err.field(), Some("chats.list[0].name"));
    }

    #[test]
    fn test_chat_without_messages() {
        let err = import(r#"{"chats": {"list": [{"name": "X"}]}}"#).unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(err.field(), Some("chats.list[0].messages"));
    }

    #[test]
    fn test_one_bad_date_fails_everything() {
        let json = r#"{"chats": {"list": [
            {"name": "Ok", "messages": [
                {"type": "message", "date": "2024-01-15T10:30:00", "from": "A", "text": "fine"}
            ]},
            {"name": "Broken", "messages": [
                {"type": "message", "date": "15/01/2024", "from": "A", "text": "bad"}
            ]}
        ]}}"#;
        let err = import(json).unwrap_err();
        assert!(err.is_invalid_date());
        assert_eq!(err.field(), Some("chats.list[1].messages[0].date"));
    }

    #[test]
    fn test_malformed_json() {
        let err = import(r#"{"chats": {"list": ["#).unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput(InputFault::Json(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(import("").unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MIXED.as_bytes()).unwrap();

        let chats = TelegramImporter::from_path(file.path())
            .unwrap()
            .import_chats()
            .unwrap();
        assert_eq!(chats.len(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = TelegramImporter::from_path("/nonexistent/result.json").unwrap_err();
        assert!(err.is_file_unreadable());
    }

    #[test]
    fn test_from_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = TelegramImporter::from_path(dir.path()).unwrap_err();
        assert!(err.is_file_unreadable());
    }

    #[test]
    fn test_repeated_import_is_equal() {
        assert_eq!(import(MIXED).unwrap(), import(MIXED).unwrap());
    }
}
