//! Cluster management commands

use super::args::NodeArgs;
use super::display::PayloadKind;
use super::{CommandContext, CommandOutput};
use crate::domain::request::{NodeRequest, ProvisionInput};
use crate::infrastructure::http::HttpTransport;
use anyhow::Context;
use clap::Parser;

#[derive(clap::Subcommand, Debug)]
pub enum ClusterCommand {
    /// Provision a VM and join it to the cluster as a node
    Create(NodeCreateCommand),

    /// Get the cluster join token
    JoinToken(JoinTokenCommand),

    /// Join a node to the cluster
    Join(JoinCommand),

    /// Delete a pod from the cluster
    DeletePod(DeletePodCommand),

    /// Delete a node and its backing VM
    Delete(NodeDeleteCommand),

    /// Update a node in the cluster
    UpdateNode(NodeUpdateCommand),

    /// List cluster nodes
    Nodes(NodesCommand),
}

impl ClusterCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        match self {
            ClusterCommand::Create(cmd) => cmd.execute(ctx).await,
            ClusterCommand::JoinToken(cmd) => cmd.execute(ctx).await,
            ClusterCommand::Join(cmd) => cmd.execute(ctx).await,
            ClusterCommand::DeletePod(cmd) => cmd.execute(ctx).await,
            ClusterCommand::Delete(cmd) => cmd.execute(ctx).await,
            ClusterCommand::UpdateNode(cmd) => cmd.execute(ctx).await,
            ClusterCommand::Nodes(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct NodeCreateCommand {
    #[command(flatten)]
    pub args: NodeArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct JoinTokenCommand {}

#[derive(Parser, Debug, Clone)]
pub struct JoinCommand {
    /// IP address of the node to join
    #[arg(long)]
    pub node_ip: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeletePodCommand {
    /// Name of the pod to delete
    #[arg(long)]
    pub pod_name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct NodeDeleteCommand {
    /// Name of the node
    pub name: String,

    /// Libvirt connection URI of the host running the node's VM
    /// If not specified, the control plane uses its configured default
    #[arg(long)]
    pub libvirt_uri: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct NodeUpdateCommand {
    #[command(flatten)]
    pub args: NodeArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct NodesCommand {}

impl NodeCreateCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let node = NodeRequest::new(ProvisionInput::from(&self.args))
            .context("Failed to create Node")?;

        tracing::debug!(node = %node.name(), "creating node");
        let result = ctx
            .client
            .create_node(&node)
            .await
            .context("Failed to create Node")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("Node created successfully"))
    }
}

impl JoinTokenCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .get_join_token()
            .await
            .context("Failed to get join token")?;
        ctx.render(&result, PayloadKind::Other)
    }
}

impl JoinCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .join_cluster(&self.node_ip)
            .await
            .context("Failed to join node to cluster")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("Node joined cluster successfully"))
    }
}

impl DeletePodCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .delete_pod(&self.pod_name)
            .await
            .context("Failed to delete pod")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("Pod deleted successfully"))
    }
}

impl NodeDeleteCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .delete_node(&self.name, self.libvirt_uri.as_deref())
            .await
            .context("Failed to delete Node")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("Node deleted successfully"))
    }
}

impl NodeUpdateCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let node = NodeRequest::new(ProvisionInput::from(&self.args))
            .context("Failed to update node")?;

        tracing::debug!(node = %node.name(), "updating node");
        let result = ctx
            .client
            .update_node(&node)
            .await
            .context("Failed to update node")?;

        ctx.render(&result, PayloadKind::Other)
            .map(|out| out.confirmed("Node updated successfully"))
    }
}

impl NodesCommand {
    pub async fn execute<T: HttpTransport>(
        &self,
        ctx: &CommandContext<T>,
    ) -> anyhow::Result<CommandOutput> {
        let result = ctx
            .client
            .list_nodes()
            .await
            .context("Failed to list nodes")?;
        ctx.render(&result, PayloadKind::Nodes)
    }
}
