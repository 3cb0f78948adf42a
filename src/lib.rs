// Library root
// -----------
// This crate publishes a Markdown document and its sibling `media` folder to
// a Flow2 site, and can pull a post's content back into the document. The
// binary (`main.rs`) wires these modules into a small CLI.
//
// Module responsibilities:
// - `api`: HTTP calls to the admin API (create post, upload media, search)
//   behind the `PostApi` trait, plus Basic auth and post id parsing.
// - `workflow`: the publish -> upload and pull sequences, written against
//   the `PostApi` and `Host` traits only.
// - `host` / `fs_host`: the document environment interface and its
//   filesystem implementation (front-matter lives in `frontmatter`).
// - `media`: media folder discovery, MIME lookup and the multipart model.
// - `config`: persisted settings.
// - `commands` / `ui`: one-shot commands and the interactive menu.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod fs_host;
pub mod host;
pub mod media;
pub mod ui;
pub mod workflow;

#[cfg(test)]
mod test_utils;

pub use error::{Error, ErrorKind, Result};
