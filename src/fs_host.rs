// Filesystem implementation of `Host`: documents are Markdown files on disk
// and metadata lives in their YAML front-matter.

use crate::error::{Error, Result};
use crate::frontmatter;
use crate::host::{DocumentHandle, Entry, EntryKind, Host};
use std::path::{Path, PathBuf};

pub struct FsHost {
    active: Option<PathBuf>,
}

impl FsHost {
    /// Host whose active document is `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FsHost {
            active: Some(path.into()),
        }
    }

    /// Host with no document open.
    pub fn empty() -> Self {
        FsHost { active: None }
    }
}

fn entry_kind(path: &Path) -> std::io::Result<EntryKind> {
    // `metadata` follows symlinks, so a linked folder counts as a folder.
    let meta = std::fs::metadata(path)?;
    Ok(if meta.is_dir() {
        EntryKind::Folder
    } else if meta.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    })
}

impl Host for FsHost {
    fn active_document(&self) -> Option<DocumentHandle> {
        self.active.as_ref().map(|path| DocumentHandle::new(path.clone()))
    }

    fn read_text(&self, doc: &DocumentHandle) -> Result<String> {
        std::fs::read_to_string(doc.path())
            .map_err(|err| Error::local_io("failed to read document", doc.path(), err))
    }

    fn write_text(&self, doc: &DocumentHandle, text: &str) -> Result<()> {
        std::fs::write(doc.path(), text)
            .map_err(|err| Error::local_io("failed to write document", doc.path(), err))
    }

    fn set_metadata_field(
        &self,
        doc: &DocumentHandle,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<()> {
        let text = self.read_text(doc)?;
        let yaml = serde_yaml::to_value(value).map_err(|err| Error::Frontmatter {
            path: doc.path().to_path_buf(),
            message: err.to_string(),
        })?;
        let updated =
            frontmatter::set_field(&text, key, yaml).map_err(|message| Error::Frontmatter {
                path: doc.path().to_path_buf(),
                message,
            })?;
        self.write_text(doc, &updated)
    }

    fn list_folder_children(&self, folder: &Path) -> Result<Vec<Entry>> {
        let read_dir = std::fs::read_dir(folder)
            .map_err(|err| Error::local_io("failed to list folder", folder, err))?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry =
                dir_entry.map_err(|err| Error::local_io("failed to list folder", folder, err))?;
            let path = dir_entry.path();
            let kind = match entry_kind(&path) {
                Ok(kind) => kind,
                // Dangling symlink.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => EntryKind::Other,
                Err(err) => return Err(Error::local_io("failed to inspect entry", path, err)),
            };
            entries.push(Entry {
                name: dir_entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file_bytes(&self, file: &Path) -> Result<Vec<u8>> {
        std::fs::read(file).map_err(|err| Error::local_io("failed to read media file", file, err))
    }
}
