//! Mock Editor Host for Testing
//!
//! Records every mutation together with the thread it happened on, so tests
//! can check that the document is only ever touched from the UI loop.

use redraft::editor::{EditorHost, Region};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

#[derive(Debug, Default)]
pub struct MockEditorState {
    pub text: String,
    pub selections: Vec<Region>,
    pub revision: u64,
    /// (region, new text, thread the splice ran on)
    pub replacements: Vec<(Region, String, ThreadId)>,
    pub statuses: Vec<String>,
    pub errors: Vec<String>,
}

/// Mock editor host backed by shared state
#[derive(Debug)]
pub struct MockEditor {
    pub state: Arc<Mutex<MockEditorState>>,
}

impl MockEditor {
    pub fn new(text: &str, selections: Vec<Region>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockEditorState {
                text: text.to_string(),
                selections,
                ..Default::default()
            })),
        }
    }

    /// Handle for inspecting state after the UI loop consumed the host
    pub fn handle(&self) -> Arc<Mutex<MockEditorState>> {
        self.state.clone()
    }
}

impl EditorHost for MockEditor {
    fn selections(&self) -> Vec<Region> {
        self.state.lock().unwrap().selections.clone()
    }

    fn text(&self, region: Region) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .text
            .get(region.start..region.end)
            .map(str::to_string)
    }

    fn revision(&self) -> u64 {
        self.state.lock().unwrap().revision
    }

    fn replace(&mut self, region: Region, text: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.text.get(region.start..region.end).is_none() {
            anyhow::bail!("invalid region {}..{}", region.start, region.end);
        }
        state.text.replace_range(region.start..region.end, text);
        state.revision += 1;
        state
            .replacements
            .push((region, text.to_string(), std::thread::current().id()));
        Ok(())
    }

    fn status(&mut self, message: &str) {
        self.state.lock().unwrap().statuses.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.state.lock().unwrap().errors.push(message.to_string());
    }
}
