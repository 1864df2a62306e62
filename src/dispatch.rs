//! Request Dispatcher
//!
//! Runs in the UI-owning context: reads the active selections, resolves the
//! provider from the settings, and spawns one background task per non-empty
//! region. Empty selections and a missing selection produce non-blocking
//! status notices. Credential and provider problems fail here, before any
//! network activity.

use crate::config::Config;
use crate::editor::EditorHost;
use crate::error::RedraftResult;
use crate::executor::{self, Job, Transport};
use crate::prompts;
use crate::providers::{create_adapter, ProviderProfile};
use crate::ui::UiMessage;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::debug;

/// A requested transformation: a fixed action or a literal user prompt
#[derive(Debug, Clone)]
pub struct TransformCommand {
    pub action: String,
    pub literal_prompt: Option<String>,
}

impl TransformCommand {
    /// Fixed-action transformation (template lookup)
    pub fn action(name: impl Into<String>) -> Self {
        Self {
            action: name.into(),
            literal_prompt: None,
        }
    }

    /// Dynamic-prompt transformation (user text passed through verbatim)
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            action: "dynamic_prompt".to_string(),
            literal_prompt: Some(text.into()),
        }
    }

    /// The prompt actually sent for a given selection
    pub fn outbound_prompt(&self, source_text: &str) -> String {
        match &self.literal_prompt {
            Some(literal) => literal.clone(),
            None => prompts::render(&self.action, source_text),
        }
    }
}

/// Spawn one background request per non-empty selected region.
///
/// Returns the number of tasks spawned; results and failures arrive on the
/// UI channel. The settings are read once, here, and never re-read by the
/// spawned tasks.
pub fn dispatch(
    host: &mut dyn EditorHost,
    config: &Config,
    command: &TransformCommand,
    runtime: &tokio::runtime::Handle,
    transport: Arc<dyn Transport>,
    ui_tx: &Sender<UiMessage>,
) -> RedraftResult<usize> {
    let profile = ProviderProfile::from_config(config)?;
    let adapter = create_adapter(profile.kind);

    let selections = host.selections();
    if selections.is_empty() {
        host.status("No selection found");
        return Ok(0);
    }

    let mut spawned = 0;
    for region in selections {
        let source_text = match host.text(region) {
            Some(text) if !region.is_empty() => text,
            _ => {
                host.status("No text selected");
                continue;
            }
        };

        let prompt = command.outbound_prompt(&source_text);
        let request = adapter.build_request(&prompt, &profile)?;
        let job = Job {
            request,
            region,
            revision: host.revision(),
        };

        let _ = ui_tx.send(UiMessage::TaskStarted);
        runtime.spawn(executor::run(
            job,
            adapter.clone(),
            transport.clone(),
            ui_tx.clone(),
        ));
        spawned += 1;
    }

    debug!("dispatched {spawned} request(s) to {}", profile.kind);
    Ok(spawned)
}
