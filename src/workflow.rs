// Publish and pull workflows.
//
// Publishing creates the post, records its id in the document's metadata,
// then uploads everything in the sibling `media` folder as one multipart
// request. The upload only starts once the server has returned a usable id.
// Neither a failed metadata write nor a failed upload undoes the created
// post; the report still names its id.
//
// Pulling looks the document's title up on the server and, when a post is
// found, replaces the local text with the remote content.
//
// The lower-level operations return typed errors. The `*_active` entry
// points report each phase through the `Notifier` and never return an error.

use crate::api::{PostApi, PostId};
use crate::error::{Error, Result};
use crate::host::{DocumentHandle, Host, Notifier};
use crate::media::{find_media_folder, MediaForm};
use tracing::{debug, error, info, warn};

/// Metadata key the post id is stored under.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The document has no `media` folder; no request was sent.
    NoMediaFolder,
    /// One request carrying `count` assets succeeded.
    Uploaded { count: usize },
}

impl UploadOutcome {
    pub fn count(&self) -> usize {
        match self {
            UploadOutcome::NoMediaFolder => 0,
            UploadOutcome::Uploaded { count } => *count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    Found(String),
    NotFound,
}

/// Result of a full publish: one entry per phase that ran.
#[derive(Debug)]
pub enum PublishReport {
    NoActiveDocument,
    Failed(Error),
    Published {
        post_id: PostId,
        /// Writing the id into the document's metadata.
        metadata: Result<()>,
        media: Result<UploadOutcome>,
    },
}

impl PublishReport {
    /// True when the post was created, its id recorded and its media sent.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            PublishReport::Published {
                metadata: Ok(()),
                media: Ok(_),
                ..
            }
        )
    }
}

#[derive(Debug)]
pub enum PullReport {
    NoActiveDocument,
    Pulled,
    NotFound,
    Failed(Error),
}

impl PullReport {
    pub fn is_success(&self) -> bool {
        matches!(self, PullReport::Pulled | PullReport::NotFound)
    }
}

pub struct Workflow<'a, A, H, N> {
    api: &'a A,
    host: &'a H,
    notifier: &'a N,
}

impl<'a, A, H, N> Workflow<'a, A, H, N>
where
    A: PostApi,
    H: Host,
    N: Notifier,
{
    pub fn new(api: &'a A, host: &'a H, notifier: &'a N) -> Self {
        Workflow { api, host, notifier }
    }

    /// Send the document text as a new post and return the id the server
    /// assigned. Every call creates a new post.
    pub fn create_post(&self, doc: &DocumentHandle) -> Result<PostId> {
        let content = self.host.read_text(doc)?;
        let body = self.api.create_post(&content)?;
        let post_id = PostId::from_response(&body)?;
        info!(%post_id, document = %doc.path().display(), "post created");
        Ok(post_id)
    }

    /// Store `post_id` under the `id` metadata key, replacing any old value.
    pub fn record_id(&self, doc: &DocumentHandle, post_id: &PostId) -> Result<()> {
        self.host.set_metadata_field(doc, ID_FIELD, &post_id.to_value())
    }

    /// Create a post and record its id. Metadata is only touched once a
    /// valid id is in hand.
    pub fn publish(&self, doc: &DocumentHandle) -> Result<PostId> {
        let post_id = self.create_post(doc)?;
        self.record_id(doc, &post_id)?;
        Ok(post_id)
    }

    /// Upload every regular file in the document's `media` folder. Any read
    /// failure aborts before the request is sent.
    pub fn upload_media(&self, doc: &DocumentHandle, post_id: &PostId) -> Result<UploadOutcome> {
        let Some(folder) = doc.folder() else {
            return Ok(UploadOutcome::NoMediaFolder);
        };
        let children = self.host.list_folder_children(folder)?;
        let Some(media_folder) = find_media_folder(&children) else {
            debug!(folder = %folder.display(), "no media folder");
            return Ok(UploadOutcome::NoMediaFolder);
        };

        let mut form = MediaForm::new();
        for entry in self.host.list_folder_children(&media_folder.path)? {
            if !entry.is_file() {
                continue;
            }
            let bytes = self.host.read_file_bytes(&entry.path)?;
            form.push(entry.name, bytes);
        }

        if form.is_empty() {
            debug!(folder = %media_folder.path.display(), "media folder has no files");
        }
        let count = form.len();
        self.api.upload_media(post_id, form)?;
        info!(%post_id, count, "media uploaded");
        Ok(UploadOutcome::Uploaded { count })
    }

    pub fn find_by_title(&self, title: &str) -> Result<FindOutcome> {
        Ok(match self.api.search_post(title)? {
            Some(content) => FindOutcome::Found(content),
            None => FindOutcome::NotFound,
        })
    }

    /// Replace the document text with the remote post of the same title.
    pub fn pull(&self, doc: &DocumentHandle) -> Result<FindOutcome> {
        let outcome = self.find_by_title(&doc.title())?;
        if let FindOutcome::Found(content) = &outcome {
            self.host.write_text(doc, content)?;
        }
        Ok(outcome)
    }

    /// Publish the active document, then upload its media.
    pub fn publish_active(&self) -> PublishReport {
        let Some(doc) = self.host.active_document() else {
            debug!("publish requested with no active document");
            return PublishReport::NoActiveDocument;
        };

        let post_id = match self.create_post(&doc) {
            Ok(post_id) => post_id,
            Err(err) => {
                error!(error = %err, "failed to publish post");
                self.notifier.notify(&format!("Failed to publish post: {}", err));
                return PublishReport::Failed(err);
            }
        };
        self.notifier
            .notify(&format!("Post created successfully with ID: {}", post_id));

        let metadata = self.record_id(&doc, &post_id);
        if let Err(err) = &metadata {
            warn!(error = %err, %post_id, "failed to record post id");
            self.notifier.notify(&format!(
                "Failed to record post ID {} in document: {}",
                post_id, err
            ));
        }

        let media = self.upload_media(&doc, &post_id);
        match &media {
            Ok(UploadOutcome::NoMediaFolder) => {}
            Ok(UploadOutcome::Uploaded { count }) => {
                self.notifier
                    .notify(&format!("{} media files uploaded successfully", count));
            }
            Err(err) => {
                warn!(error = %err, %post_id, "failed to upload media files");
                self.notifier
                    .notify(&format!("Failed to upload media files: {}", err));
            }
        }
        PublishReport::Published {
            post_id,
            metadata,
            media,
        }
    }

    /// Pull the remote post matching the active document's title.
    pub fn pull_active(&self) -> PullReport {
        let Some(doc) = self.host.active_document() else {
            debug!("pull requested with no active document");
            return PullReport::NoActiveDocument;
        };

        let pulled = match self.find_by_title(&doc.title()) {
            Ok(FindOutcome::Found(content)) => {
                self.notifier.notify("Post found - pulling content");
                self.host.write_text(&doc, &content)
            }
            Ok(FindOutcome::NotFound) => {
                self.notifier.notify("No post found");
                return PullReport::NotFound;
            }
            Err(err) => Err(err),
        };

        match pulled {
            Ok(()) => {
                self.notifier.notify("File updated with post content");
                PullReport::Pulled
            }
            Err(err) => {
                error!(error = %err, "failed to pull post");
                self.notifier.notify(&format!("Failed to pull post: {}", err));
                PullReport::Failed(err)
            }
        }
    }
}
