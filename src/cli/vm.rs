//! VM management commands

use super::args::ProvisionArgs;
use super::display::PayloadKind;
use super::{CommandContext, CommandOutput};
use crate::domain::request::{ProvisionInput, VmRequest};
use crate::infrastructure::http::HttpTransport;
use anyhow::Context;
use clap::Parser;

#[derive(clap::Subcommand, Debug)]
pub enum VmCommand {
    /// Create a new VM
    Create(VmCreateCommand),

    /// Delete a VM
    Delete(VmDeleteCommand),

    /// List all VMs
    List(VmListCommand),

    /// Show a single VM
    Get(VmGetCommand),

    /// Start a stopped VM
    Start(VmStartCommand),

    /// Shut a VM down
    Stop(VmStopCommand),
}

impl VmCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        match self {
            VmCommand::Create(cmd) => cmd.execute(ctx).await,
            VmCommand::Delete(cmd) => cmd.execute(ctx).await,
            VmCommand::List(cmd) => cmd.execute(ctx).await,
            VmCommand::Get(cmd) => cmd.execute(ctx).await,
            VmCommand::Start(cmd) => cmd.execute(ctx).await,
            VmCommand::Stop(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct VmCreateCommand {
    #[command(flatten)]
    pub args: ProvisionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct VmDeleteCommand {
    /// Name of the VM
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct VmListCommand {}

#[derive(Parser, Debug, Clone)]
pub struct VmGetCommand {
    /// Name of the VM
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct VmStartCommand {
    /// Name of the VM
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct VmStopCommand {
    /// Name of the VM
    pub name: String,
}

impl VmCreateCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let vm = VmRequest::new(ProvisionInput::from(&self.args))
            .context("Failed to create VM")?;

        tracing::debug!(vm = %vm.name(), "creating VM");
        let result = ctx
            .client
            .create_vm(&vm)
            .await
            .context("Failed to create VM")?;

        ctx.render(&result, PayloadKind::Vms)
            .map(|out| out.confirmed("VM created successfully"))
    }
}

impl VmDeleteCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .delete_vm(&self.name)
            .await
            .context("Failed to delete VM")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("VM deleted successfully"))
    }
}

impl VmListCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx.client.list_vms().await.context("Failed to list VMs")?;
        ctx.render(&result, PayloadKind::Vms)
    }
}

impl VmGetCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .get_vm(&self.name)
            .await
            .with_context(|| format!("Failed to get VM {}", self.name))?;
        ctx.render(&result, PayloadKind::Vms)
    }
}

impl VmStartCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .start_vm(&self.name)
            .await
            .context("Failed to start VM")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("VM started successfully"))
    }
}

impl VmStopCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .stop_vm(&self.name)
            .await
            .context("Failed to stop VM")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("VM stopped successfully"))
    }
}
