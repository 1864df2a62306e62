//! In-memory document host
//!
//! Backs the CLI: the whole file is the document, command-line byte ranges
//! are the selections. Status notices go to a transient stderr line, errors
//! to the log.

use super::{EditorHost, Region};
use anyhow::{bail, Result};
use tracing::error;

#[derive(Debug)]
pub struct TextBuffer {
    text: String,
    selections: Vec<Region>,
    revision: u64,
    errors: u64,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selections: Vec::new(),
            revision: 0,
            errors: 0,
        }
    }

    /// Set the active selections (dispatch reads them back in order)
    pub fn select(&mut self, selections: Vec<Region>) {
        self.selections = selections;
    }

    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of errors surfaced to this host
    pub fn error_count(&self) -> u64 {
        self.errors
    }
}

impl EditorHost for TextBuffer {
    fn selections(&self) -> Vec<Region> {
        self.selections.clone()
    }

    fn text(&self, region: Region) -> Option<String> {
        self.text.get(region.start..region.end).map(str::to_string)
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn replace(&mut self, region: Region, text: &str) -> Result<()> {
        if self.text.get(region.start..region.end).is_none() {
            bail!(
                "region {}..{} does not fall on valid boundaries of the document",
                region.start,
                region.end
            );
        }
        self.text.replace_range(region.start..region.end, text);
        self.revision += 1;
        Ok(())
    }

    fn status(&mut self, message: &str) {
        eprint!("\r{message}\x1b[K");
    }

    fn error(&mut self, message: &str) {
        self.errors += 1;
        error!("{message}");
    }
}
