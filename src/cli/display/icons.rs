//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Running VM / Ready node
    pub const SUCCESS: &'static str = "✓";

    /// Stopped VM / NotReady node
    pub const ERROR: &'static str = "✗";

    /// Anything the control plane could not classify
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon for a libvirt domain state
    pub fn get_vm_icon(status: Option<&str>) -> &'static str {
        match status.map(str::to_ascii_lowercase).as_deref() {
            Some("running") => Self::SUCCESS,
            Some("stopped") | Some("shut off") | Some("shutoff") => Self::ERROR,
            _ => Self::UNKNOWN,
        }
    }

    /// Get status icon for a node `Ready` condition (`True`/`False`/`Unknown`)
    pub fn get_node_icon(ready: Option<&str>) -> &'static str {
        match ready {
            Some(s) if s.eq_ignore_ascii_case("true") => Self::SUCCESS,
            Some(s) if s.eq_ignore_ascii_case("false") => Self::ERROR,
            _ => Self::UNKNOWN,
        }
    }

    /// Get status text for a node `Ready` condition
    pub fn get_node_status_text(ready: Option<&str>) -> &'static str {
        match Self::get_node_icon(ready) {
            Self::SUCCESS => "Ready",
            Self::ERROR => "NotReady",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_vm_icon() {
        assert_eq!(StatusIcon::get_vm_icon(Some("running")), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_vm_icon(Some("Stopped")), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_vm_icon(Some("paused")), StatusIcon::UNKNOWN);
        assert_eq!(StatusIcon::get_vm_icon(None), StatusIcon::UNKNOWN);
    }

    #[test]
    fn test_get_node_status_text() {
        assert_eq!(StatusIcon::get_node_status_text(Some("True")), "Ready");
        assert_eq!(StatusIcon::get_node_status_text(Some("False")), "NotReady");
        assert_eq!(StatusIcon::get_node_status_text(Some("Unknown")), "Unknown");
        assert_eq!(StatusIcon::get_node_status_text(None), "Unknown");
    }
}
