//! Rendering of control plane payloads

use super::TableRenderer;
use crate::domain::config::OutputFormat;
use crate::domain::response::{ApiResponse, NodeMap, VmInfo};
use crate::shared::error::{ClientError, Result};
use serde_json::Value;

/// Tabular shape a payload should be laid out in, when printed as a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Vms,
    Nodes,
    Other,
}

/// Turns opaque payloads into text for the selected output format.
pub struct OutputRenderer {
    format: OutputFormat,
    tables: TableRenderer,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            tables: TableRenderer::new(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render(&self, payload: &Value, kind: PayloadKind) -> Result<String> {
        match self.format {
            OutputFormat::Json => pretty_json(payload),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(payload)?.trim_end().to_string()),
            OutputFormat::Table => self.render_table(payload, kind),
        }
    }

    /// Falls back to pretty JSON when the payload has no tabular shape.
    fn render_table(&self, payload: &Value, kind: PayloadKind) -> Result<String> {
        let rendered = match kind {
            PayloadKind::Vms => VmInfo::list_from_value(payload)
                .map(|vms| self.tables.render_vms_list(&vms)),
            PayloadKind::Nodes => ApiResponse::<NodeMap>::from_value(payload).map(|response| {
                self.tables
                    .render_nodes_list(Some(&response.message), &response.data.unwrap_or_default())
            }),
            PayloadKind::Other => match payload {
                Value::String(text) => Some(text.clone()),
                _ => None,
            },
        };

        match rendered {
            Some(text) => Ok(text.trim_end().to_string()),
            None => pretty_json(payload),
        }
    }
}

fn pretty_json(payload: &Value) -> Result<String> {
    serde_json::to_string_pretty(payload)
        .map_err(|e| ClientError::render_error(format!("failed to format response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_pretty_printed() {
        let renderer = OutputRenderer::new(OutputFormat::Json);
        let output = renderer
            .render(&json!({"message": "ok", "data": true}), PayloadKind::Other)
            .unwrap();
        assert_eq!(output, "{\n  \"message\": \"ok\",\n  \"data\": true\n}");
    }

    #[test]
    fn test_yaml_output() {
        let renderer = OutputRenderer::new(OutputFormat::Yaml);
        let output = renderer
            .render(&json!({"message": "ok"}), PayloadKind::Other)
            .unwrap();
        assert_eq!(output, "message: ok");
    }

    #[test]
    fn test_null_payload() {
        let renderer = OutputRenderer::new(OutputFormat::Json);
        assert_eq!(renderer.render(&Value::Null, PayloadKind::Other).unwrap(), "null");
    }

    #[test]
    fn test_table_falls_back_to_json() {
        let renderer = OutputRenderer::new(OutputFormat::Table);
        let output = renderer
            .render(&json!({"unexpected": [1, 2]}), PayloadKind::Nodes)
            .unwrap();
        assert!(output.contains("\"unexpected\""));
    }

    #[test]
    fn test_table_for_vms() {
        let renderer = OutputRenderer::new(OutputFormat::Table);
        let output = renderer
            .render(&json!([{"name": "web-1", "status": "running"}]), PayloadKind::Vms)
            .unwrap();
        assert!(output.contains("web-1"));
        assert!(output.contains("Virtual Machines"));
    }

    #[test]
    fn test_table_for_plain_text() {
        let renderer = OutputRenderer::new(OutputFormat::Table);
        let output = renderer
            .render(&json!("K10abc::server:xyz"), PayloadKind::Other)
            .unwrap();
        assert_eq!(output, "K10abc::server:xyz");
    }
}
