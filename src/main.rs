//! Redraft - LLM-assisted rewriting of editor selections
//!
//! Demo CLI host: treats a file (or stdin) as the document and byte ranges
//! given on the command line as the selections.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use redraft::commands;
use redraft::config::Config;
use redraft::dispatch::{dispatch, TransformCommand};
use redraft::editor::{Region, TextBuffer};
use redraft::executor::{HttpTransport, Transport};
use redraft::prompts;
use redraft::providers::ProviderKind;
use redraft::ui::UiLoop;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform selected byte ranges of a file with a fixed action
    Transform {
        /// Action name, e.g. summarise, rewrite_casual, correct_grammar
        #[arg(long)]
        action: String,

        /// Byte range to transform (START..END); repeatable
        #[arg(long = "select", value_name = "START..END")]
        selections: Vec<String>,

        /// Print the transformed document instead of rewriting the file
        #[arg(long)]
        stdout: bool,

        /// Document to transform; "-" reads stdin
        file: PathBuf,
    },

    /// Transform selected byte ranges with a free-form prompt
    Prompt {
        /// Prompt sent to the model verbatim
        prompt: String,

        /// Byte range to replace (START..END); repeatable
        #[arg(long = "select", value_name = "START..END")]
        selections: Vec<String>,

        /// Print the transformed document instead of rewriting the file
        #[arg(long)]
        stdout: bool,

        /// Document to transform; "-" reads stdin
        file: PathBuf,
    },

    /// List the available fixed actions
    Actions,

    /// Store an API key for a provider (read from stdin)
    SetKey {
        /// openai or anthropic
        provider: String,
    },

    /// Choose the model used by a provider
    SetModel {
        model: String,

        /// Defaults to the active provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// List quick-pick models for a provider
    Models {
        /// Defaults to the active provider
        provider: Option<String>,
    },

    /// Switch the active provider
    Use {
        /// openai or anthropic
        provider: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load()?;

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Transform {
            action,
            selections,
            stdout,
            file,
        } => run_transform(
            &config,
            TransformCommand::action(action),
            &file,
            &selections,
            stdout,
        ),
        Command::Prompt {
            prompt,
            selections,
            stdout,
            file,
        } => run_transform(
            &config,
            TransformCommand::prompt(prompt),
            &file,
            &selections,
            stdout,
        ),
        Command::Actions => {
            for action in prompts::ACTIONS {
                println!("{action}");
            }
            Ok(())
        }
        Command::SetKey { provider } => {
            let kind = ProviderKind::parse(&provider)?;
            eprint!("Enter {kind} API key: ");
            std::io::stderr().flush()?;
            let mut key = String::new();
            std::io::stdin().read_line(&mut key)?;
            commands::set_api_key(&mut config, kind, key.trim())?;
            Ok(())
        }
        Command::SetModel { model, provider } => {
            let kind = resolve_provider(&config, provider.as_deref())?;
            commands::select_model(&mut config, kind, &model)?;
            Ok(())
        }
        Command::Models { provider } => {
            let kind = resolve_provider(&config, provider.as_deref())?;
            for model in commands::known_models(kind) {
                println!("{model}");
            }
            Ok(())
        }
        Command::Use { provider } => {
            commands::switch_provider(&mut config, &provider)?;
            Ok(())
        }
    }
}

fn resolve_provider(config: &Config, name: Option<&str>) -> Result<ProviderKind> {
    Ok(ProviderKind::parse(
        name.unwrap_or(&config.selected_provider),
    )?)
}

/// Dispatch one request per selected range, drive the UI loop on this
/// thread until every task has completed, then write the document back.
fn run_transform(
    config: &Config,
    command: TransformCommand,
    file: &Path,
    selections: &[String],
    stdout: bool,
) -> Result<()> {
    let regions = selections
        .iter()
        .map(|range| parse_region(range))
        .collect::<Result<Vec<_>>>()?;

    let from_stdin = file == Path::new("-");
    let text = if from_stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Could not read {}", file.display()))?
    };

    let mut buffer = TextBuffer::new(text);
    buffer.select(regions);

    // Worker tasks live on the runtime's threads; this thread stays the
    // UI-owning one.
    let runtime = tokio::runtime::Runtime::new()?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new());
    let (ui_tx, ui_rx) = mpsc::channel();

    let spawned = dispatch(
        &mut buffer,
        config,
        &command,
        runtime.handle(),
        transport,
        &ui_tx,
    )?;
    drop(ui_tx);

    let buffer = UiLoop::new(ui_rx, buffer).run();
    eprintln!();

    if buffer.error_count() > 0 {
        bail!("{} request(s) failed", buffer.error_count());
    }

    if spawned > 0 {
        if stdout || from_stdin {
            print!("{}", buffer.text_content());
        } else {
            std::fs::write(file, buffer.text_content())?;
            info!("Updated {}", file.display());
        }
    }
    Ok(())
}

fn parse_region(range: &str) -> Result<Region> {
    let (start, end) = range
        .split_once("..")
        .with_context(|| format!("Invalid range '{range}', expected START..END"))?;
    let start = start.trim().parse().context("Invalid range start")?;
    let end = end.trim().parse().context("Invalid range end")?;
    Ok(Region::new(start, end))
}
