// Host environment interface. The workflow never touches files or editor
// state directly; it goes through `Host` so the same publish/pull logic can
// run against the filesystem (`FsHost`) or an in-memory fake in tests.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Handle to a document owned by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentHandle {
    path: PathBuf,
}

impl DocumentHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocumentHandle { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display title: the file name without its extension.
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Folder that contains the document. A bare file name lives in `.`.
    pub fn folder(&self) -> Option<&Path> {
        match self.path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Some(Path::new(".")),
            parent => parent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
    Other,
}

/// One direct child of a folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Capabilities the workflow needs from the document environment.
pub trait Host {
    /// The document the user is working on, if any.
    fn active_document(&self) -> Option<DocumentHandle>;

    fn read_text(&self, doc: &DocumentHandle) -> Result<String>;

    fn write_text(&self, doc: &DocumentHandle, text: &str) -> Result<()>;

    /// Set one metadata key, leaving the rest of the map as it was.
    fn set_metadata_field(
        &self,
        doc: &DocumentHandle,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<()>;

    fn list_folder_children(&self, folder: &Path) -> Result<Vec<Entry>>;

    fn read_file_bytes(&self, file: &Path) -> Result<Vec<u8>>;
}

/// Fire-and-forget sink for short user-facing notices.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Discards notices.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) {}
}
