// CLI command definitions

use super::cluster::ClusterCommand;
use super::vm::VmCommand;
use crate::domain::config::{CliConf, OutputFormat};
use crate::shared::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "k3skvm",
    version,
    about = "K3s CLI tool for managing VMs and clusters",
    long_about = "Provision KVM-backed virtual machines and manage K3s cluster nodes through the k3s-kvm control plane API"
)]
pub struct CliArgs {
    /// Base URL for the API server [default: http://127.0.0.1:8080]
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format: json, yaml or table [default: json]
    #[arg(long, short = 'o', global = true, value_name = "FORMAT")]
    pub output: Option<String>,

    /// Path to configuration file (k3skvm.toml)
    /// If not provided, K3SKVM_CONF_FILE is consulted, then built-in defaults
    #[arg(long, global = true, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Log requests and responses to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Manage VMs
    #[command(subcommand)]
    Vm(VmCommand),

    /// Manage cluster operations
    #[command(subcommand)]
    Cluster(ClusterCommand),
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub output: OutputFormat,
}

impl CliArgs {
    /// Resolve settings: command line > config file > defaults
    pub fn settings(&self) -> Result<Settings> {
        let conf = CliConf::load(self.config_file.as_deref())?;

        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| conf.client.base_url.clone());

        let output = self
            .output
            .as_deref()
            .unwrap_or(conf.client.output.as_str())
            .parse::<OutputFormat>()?;

        Ok(Settings { base_url, output })
    }
}
