//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::response::{NodeMap, VmInfo};
use chrono::NaiveDateTime;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

const PLACEHOLDER: &str = "-";

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render VMs as a formatted table
    pub fn render_vms_list(&self, vms: &[VmInfo]) -> String {
        if vms.is_empty() {
            return "No VMs found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
                Cell::new("IP ADDRESS").set_alignment(CellAlignment::Left),
                Cell::new("VCPU").set_alignment(CellAlignment::Right),
                Cell::new("MEMORY").set_alignment(CellAlignment::Right),
                Cell::new("ROLE").set_alignment(CellAlignment::Left),
                Cell::new("CREATED").set_alignment(CellAlignment::Left),
            ]);

        for vm in vms {
            let icon = StatusIcon::get_vm_icon(vm.status.as_deref());
            let status = vm.status.as_deref().unwrap_or("unknown");

            table.add_row(vec![
                Cell::new(&vm.name),
                Cell::new(format!("{} {}", icon, status)).fg(self.theme.get_icon_color(icon)),
                Cell::new(vm.ip_address.as_deref().unwrap_or(PLACEHOLDER)),
                Cell::new(optional_number(vm.vcpu.map(u64::from))),
                Cell::new(optional_number(vm.memory)),
                Cell::new(vm.k3s_role.as_deref().unwrap_or(PLACEHOLDER)),
                Cell::new(format_created_at(vm.created_at.as_deref())),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Virtual Machines {} ─╮\n",
            format!("[{} VMs]", vms.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Running  {} Stopped  {} Unknown\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::ERROR.red(),
            StatusIcon::UNKNOWN.bright_black()
        ));

        output
    }

    /// Render cluster nodes as a formatted table
    pub fn render_nodes_list(&self, message: Option<&str>, nodes: &NodeMap) -> String {
        if nodes.is_empty() {
            return "No cluster nodes found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("NODE").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
                Cell::new("INTERNAL IP").set_alignment(CellAlignment::Left),
                Cell::new("OS IMAGE").set_alignment(CellAlignment::Left),
                Cell::new("KUBELET").set_alignment(CellAlignment::Left),
            ]);

        for (name, node) in nodes {
            let ready = node.status.as_deref();
            let icon = StatusIcon::get_node_icon(ready);

            table.add_row(vec![
                Cell::new(name),
                Cell::new(format!("{} {}", icon, StatusIcon::get_node_status_text(ready)))
                    .fg(self.theme.get_icon_color(icon)),
                Cell::new(node.ip.as_deref().unwrap_or(PLACEHOLDER)),
                Cell::new(node.os_image.as_deref().unwrap_or(PLACEHOLDER)),
                Cell::new(node.kubelet_version.as_deref().unwrap_or(PLACEHOLDER))
                    .fg(self.theme.info),
            ]);
        }

        let mut output = String::new();
        if let Some(message) = message {
            output.push_str(&format!("{}\n", message.bright_black()));
        }
        output.push_str(&table.to_string());
        output.push('\n');

        output
    }
}

fn optional_number(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Shortens an ISO-8601 local timestamp to minutes; anything else is shown verbatim.
fn format_created_at(raw: Option<&str>) -> String {
    match raw {
        None => PLACEHOLDER.to_string(),
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::NodeInfo;

    fn vm(name: &str, status: &str) -> VmInfo {
        VmInfo {
            name: name.to_string(),
            status: Some(status.to_string()),
            ip_address: Some("192.168.50.10".to_string()),
            vcpu: Some(2),
            memory: Some(4096),
            created_at: Some("2025-03-01T10:15:42.123".to_string()),
            k3s_role: None,
        }
    }

    #[test]
    fn test_render_empty_vms() {
        let renderer = TableRenderer::new();
        assert!(renderer.render_vms_list(&[]).contains("No VMs found"));
    }

    #[test]
    fn test_render_vms() {
        let renderer = TableRenderer::new();
        let output = renderer.render_vms_list(&[vm("web-1", "running"), vm("web-2", "stopped")]);
        assert!(output.contains("web-1"));
        assert!(output.contains("web-2"));
        assert!(output.contains("4096"));
        assert!(output.contains("2025-03-01 10:15"));
        assert!(output.contains("running"));
    }

    #[test]
    fn test_render_nodes() {
        let renderer = TableRenderer::new();
        let mut nodes = NodeMap::new();
        nodes.insert(
            "master".to_string(),
            NodeInfo {
                status: Some("True".to_string()),
                ip: Some("192.168.50.2".to_string()),
                os_image: Some("Ubuntu 22.04.4 LTS".to_string()),
                kubelet_version: Some("v1.30.4+k3s1".to_string()),
            },
        );

        let output = renderer.render_nodes_list(Some("Successfully retrieved 1 nodes"), &nodes);
        assert!(output.contains("master"));
        assert!(output.contains("Ready"));
        assert!(output.contains("v1.30.4+k3s1"));
    }

    #[test]
    fn test_render_empty_nodes() {
        let renderer = TableRenderer::new();
        assert!(renderer
            .render_nodes_list(None, &NodeMap::new())
            .contains("No cluster nodes found"));
    }

    #[test]
    fn test_format_created_at() {
        assert_eq!(format_created_at(None), "-");
        assert_eq!(format_created_at(Some("2025-03-01T10:15:42")), "2025-03-01 10:15");
        assert_eq!(format_created_at(Some("yesterday")), "yesterday");
    }
}
