// Media discovery and the ordered multipart model for the upload request.

use crate::host::Entry;
use reqwest::blocking::multipart;

/// Name of the sibling folder holding a post's media.
pub const MEDIA_FOLDER_NAME: &str = "media";

/// Form field every asset is appended under.
pub const FILES_FIELD: &str = "files";

pub const FALLBACK_MIME: &str = "application/octet-stream";

const MIME_TABLE: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
    ("ico", "image/x-icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("json", "application/json"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("html", "text/html"),
];

/// MIME type for a file name, looked up by extension (case-insensitive).
pub fn mime_type_for(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return FALLBACK_MIME,
    };
    MIME_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

/// First child named `media` that is a folder.
pub fn find_media_folder(children: &[Entry]) -> Option<&Entry> {
    children
        .iter()
        .find(|entry| entry.name == MEDIA_FOLDER_NAME && entry.is_folder())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Assets for one upload request, in the order they were appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaForm {
    parts: Vec<MediaPart>,
}

impl MediaForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one asset; its MIME type comes from the file name.
    pub fn push(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name);
        self.parts.push(MediaPart {
            file_name,
            mime_type,
            bytes,
        });
    }

    pub fn parts(&self) -> &[MediaPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Build the multipart body: one `files` part per asset, same order.
    pub fn into_multipart(self) -> Result<multipart::Form, reqwest::Error> {
        let mut form = multipart::Form::new();
        for part in self.parts {
            let body = multipart::Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(part.mime_type)?;
            form = form.part(FILES_FIELD, body);
        }
        Ok(form)
    }
}
