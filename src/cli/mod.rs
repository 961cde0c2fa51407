//! Operator command surface
//!
//! Every command is a single request/response cycle with three outcomes:
//! validation failure (nothing sent), transport failure (one call, error
//! surfaced) or success (one call, result rendered).

pub mod args;
pub mod cluster;
pub mod commands;
pub mod display;
pub mod vm;

pub use commands::{CliArgs, Commands, Settings};

use crate::infrastructure::http::{ControlPlaneClient, HttpTransport, ReqwestTransport};
use crate::shared::error::Result;
use display::{OutputRenderer, PayloadKind};
use serde_json::Value;
use std::fmt;
use std::io::Write;

/// Client and renderer handed to every command handler.
pub struct CommandContext<T = ReqwestTransport> {
    pub client: ControlPlaneClient<T>,
    pub renderer: OutputRenderer,
}

impl CommandContext<ReqwestTransport> {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: ControlPlaneClient::new(&settings.base_url)?,
            renderer: OutputRenderer::new(settings.output),
        })
    }
}

impl<T: HttpTransport> CommandContext<T> {
    pub fn with_client(client: ControlPlaneClient<T>, renderer: OutputRenderer) -> Self {
        Self { client, renderer }
    }

    pub fn render(&self, payload: &Value, kind: PayloadKind) -> anyhow::Result<CommandOutput> {
        Ok(CommandOutput::new(self.renderer.render(payload, kind)?))
    }
}

/// What a successful command prints on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub rendered: String,
    pub confirmation: Option<String>,
}

impl CommandOutput {
    pub fn new(rendered: String) -> Self {
        Self {
            rendered,
            confirmation: None,
        }
    }

    pub fn confirmed(mut self, message: impl Into<String>) -> Self {
        self.confirmation = Some(message.into());
        self
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered)?;
        if let Some(ref message) = self.confirmation {
            write!(f, "\n✅ {}", message)?;
        }
        Ok(())
    }
}

pub async fn dispatch<T: HttpTransport>(
    command: &Commands,
    ctx: &CommandContext<T>,
) -> anyhow::Result<CommandOutput> {
    match command {
        Commands::Vm(cmd) => cmd.execute(ctx).await,
        Commands::Cluster(cmd) => cmd.execute(ctx).await,
    }
}

/// Runs one command and returns the process exit status.
pub async fn run<T, O, E>(command: &Commands, ctx: &CommandContext<T>, out: &mut O, err: &mut E) -> u8
where
    T: HttpTransport,
    O: Write,
    E: Write,
{
    match dispatch(command, ctx).await {
        Ok(output) => {
            tracing::info!("command completed");
            match writeln!(out, "{}", output) {
                Ok(()) => 0,
                Err(e) => {
                    let _ = writeln!(err, "❌ Failed to write output: {}", e);
                    1
                }
            }
        }
        Err(e) => {
            let _ = writeln!(err, "{}", failure_line(&e));
            1
        }
    }
}

/// Single-line failure message including the full cause chain.
pub fn failure_line(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    format!("❌ {}", message.split_whitespace().collect::<Vec<_>>().join(" "))
}
