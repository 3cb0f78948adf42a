// In-memory fakes for the workflow tests.
//
// Uses `RefCell` for interior mutability: the traits take `&self` and the
// workflow is single-threaded.

use crate::api::{PostApi, PostId};
use crate::error::{Error, Result};
use crate::host::{DocumentHandle, Entry, EntryKind, Host, Notifier};
use crate::media::MediaForm;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

fn not_found(path: &Path) -> Error {
    Error::local_io(
        "no such entry",
        path,
        std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    )
}

#[derive(Default)]
pub struct MemHost {
    active: Option<PathBuf>,
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    folders: RefCell<BTreeSet<PathBuf>>,
    metadata: RefCell<HashMap<PathBuf, Map<String, Value>>>,
    unreadable: RefCell<HashSet<PathBuf>>,
    reject_metadata: bool,
}

impl MemHost {
    pub fn without_document() -> Self {
        Self::default()
    }

    /// Host with `path` open as the active document.
    pub fn with_document(path: &str, text: &str) -> Self {
        let host = MemHost {
            active: Some(PathBuf::from(path)),
            ..Self::default()
        };
        host.add_file(path, text);
        host
    }

    /// Add a file, creating its parent folders.
    pub fn add_file(&self, path: impl AsRef<Path>, bytes: impl AsRef<[u8]>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_folder(parent);
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), bytes.as_ref().to_vec());
    }

    pub fn add_folder(&self, path: impl AsRef<Path>) {
        let mut folders = self.folders.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            folders.insert(ancestor.to_path_buf());
        }
    }

    /// Make every metadata write fail as a malformed front-matter block would.
    pub fn reject_metadata(&mut self) {
        self.reject_metadata = true;
    }

    pub fn make_unreadable(&self, path: impl AsRef<Path>) {
        self.unreadable.borrow_mut().insert(path.as_ref().to_path_buf());
    }

    pub fn set_metadata(&self, path: impl AsRef<Path>, key: &str, value: Value) {
        self.metadata
            .borrow_mut()
            .entry(path.as_ref().to_path_buf())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn metadata(&self, path: impl AsRef<Path>) -> Map<String, Value> {
        self.metadata
            .borrow()
            .get(path.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    pub fn text(&self, path: impl AsRef<Path>) -> String {
        let files = self.files.borrow();
        String::from_utf8(files[path.as_ref()].clone()).expect("document is utf-8")
    }
}

impl Host for MemHost {
    fn active_document(&self) -> Option<DocumentHandle> {
        self.active.clone().map(DocumentHandle::new)
    }

    fn read_text(&self, doc: &DocumentHandle) -> Result<String> {
        let bytes = self.read_file_bytes(doc.path())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_text(&self, doc: &DocumentHandle, text: &str) -> Result<()> {
        self.add_file(doc.path(), text);
        Ok(())
    }

    fn set_metadata_field(&self, doc: &DocumentHandle, key: &str, value: &Value) -> Result<()> {
        if self.reject_metadata {
            return Err(Error::Frontmatter {
                path: doc.path().to_path_buf(),
                message: "unterminated front-matter block: expected closing '---'".to_string(),
            });
        }
        self.set_metadata(doc.path(), key, value.clone());
        Ok(())
    }

    fn list_folder_children(&self, folder: &Path) -> Result<Vec<Entry>> {
        if !self.folders.borrow().contains(folder) {
            return Err(not_found(folder));
        }
        let child = |path: &PathBuf, kind| {
            (path.parent() == Some(folder)).then(|| Entry {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path: path.clone(),
                kind,
            })
        };
        let mut entries: Vec<Entry> = self
            .folders
            .borrow()
            .iter()
            .filter_map(|p| child(p, EntryKind::Folder))
            .chain(
                self.files
                    .borrow()
                    .keys()
                    .filter_map(|p| child(p, EntryKind::File)),
            )
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file_bytes(&self, file: &Path) -> Result<Vec<u8>> {
        if self.unreadable.borrow().contains(file) {
            return Err(Error::local_io(
                "failed to read media file",
                file,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ));
        }
        self.files
            .borrow()
            .get(file)
            .cloned()
            .ok_or_else(|| not_found(file))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreatePost(String),
    UploadMedia { post_id: PostId, form: MediaForm },
    SearchPost(String),
}

/// Records every call and replays queued responses. Uploads succeed and
/// searches find nothing unless told otherwise.
#[derive(Default)]
pub struct RecordingApi {
    calls: RefCell<Vec<Call>>,
    create_results: RefCell<VecDeque<Result<String>>>,
    upload_failure: Option<StatusCode>,
    search_result: Option<String>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_returns(self, body: &str) -> Self {
        self.create_results.borrow_mut().push_back(Ok(body.to_string()));
        self
    }

    pub fn create_fails(self, status: StatusCode) -> Self {
        self.create_results.borrow_mut().push_back(Err(Error::Status {
            status,
            text: String::new(),
        }));
        self
    }

    pub fn upload_fails(mut self, status: StatusCode) -> Self {
        self.upload_failure = Some(status);
        self
    }

    pub fn search_returns(mut self, body: &str) -> Self {
        self.search_result = Some(body.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl PostApi for RecordingApi {
    fn create_post(&self, content: &str) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(Call::CreatePost(content.to_string()));
        self.create_results
            .borrow_mut()
            .pop_front()
            .expect("unexpected create_post call")
    }

    fn upload_media(&self, post_id: &PostId, form: MediaForm) -> Result<()> {
        self.calls.borrow_mut().push(Call::UploadMedia {
            post_id: post_id.clone(),
            form,
        });
        match self.upload_failure {
            Some(status) => Err(Error::Status {
                status,
                text: status.canonical_reason().unwrap_or_default().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn search_post(&self, title: &str) -> Result<Option<String>> {
        self.calls
            .borrow_mut()
            .push(Call::SearchPost(title.to_string()));
        Ok(self.search_result.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
