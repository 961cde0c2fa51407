//! Flags shared by the provisioning commands

use crate::domain::request::{IntInput, ProvisionInput};

#[derive(clap::Args, Debug, Clone)]
pub struct ProvisionArgs {
    /// Name of the VM
    #[arg(long)]
    pub name: String,

    /// IP address of the VM
    #[arg(long)]
    pub ip_address: String,

    /// Gateway IP address
    #[arg(long)]
    pub gateway: String,

    /// System user for the VM
    #[arg(long)]
    pub system_user: String,

    /// Path to cloud-init ISO file
    #[arg(long)]
    pub iso_path: String,

    /// VCPU amount (1, 2, etc.) [default: 1]
    #[arg(long)]
    pub vcpu: Option<String>,

    /// Memory (in MB) ex: 2048 [default: 2048]
    #[arg(long)]
    pub memory: Option<String>,

    /// Root password baked into the disk image [server default: ubuntu]
    #[arg(long)]
    pub root_password: Option<String>,

    /// Libvirt connection URI of the KVM host to provision on
    /// If not specified, the control plane uses its configured default
    #[arg(long)]
    pub libvirt_uri: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct NodeArgs {
    #[command(flatten)]
    pub provision: ProvisionArgs,

    /// K3s role of the node (e.g. agent)
    #[arg(long)]
    pub k3s_role: Option<String>,
}

impl From<&ProvisionArgs> for ProvisionInput {
    fn from(args: &ProvisionArgs) -> Self {
        ProvisionInput {
            name: Some(args.name.clone()),
            ip_address: Some(args.ip_address.clone()),
            gateway: Some(args.gateway.clone()),
            system_user: Some(args.system_user.clone()),
            iso_path: Some(args.iso_path.clone()),
            vcpu: args.vcpu.as_deref().map(IntInput::from),
            memory: args.memory.as_deref().map(IntInput::from),
            root_password: args.root_password.clone(),
            libvirt_uri: args.libvirt_uri.clone(),
            k3s_role: None,
        }
    }
}

impl From<&NodeArgs> for ProvisionInput {
    fn from(args: &NodeArgs) -> Self {
        ProvisionInput {
            k3s_role: args.k3s_role.clone(),
            ..ProvisionInput::from(&args.provision)
        }
    }
}
