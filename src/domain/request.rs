// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provisioning requests sent to the control plane.
//!
//! Operator input arrives as loosely typed strings (or a JSON map using either
//! snake_case or camelCase keys). It is validated and normalized once, here,
//! before any network call is attempted. On the wire the control plane expects
//! camelCase keys (`ipAddress`, `systemUser`, `isoPath`). Optional keys the
//! operator leaves unset are omitted so the control plane applies its own
//! defaults (root password `ubuntu`, its configured libvirt connection).

use crate::shared::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::IpAddr;

pub const DEFAULT_VCPU: u32 = 1;
pub const DEFAULT_MEMORY_MB: u32 = 2048;

/// Integer field as supplied by the operator: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntInput {
    Int(i64),
    Text(String),
}

impl From<&str> for IntInput {
    fn from(value: &str) -> Self {
        IntInput::Text(value.to_string())
    }
}

impl From<u32> for IntInput {
    fn from(value: u32) -> Self {
        IntInput::Int(i64::from(value))
    }
}

/// Unvalidated operator input shared by VM and node requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProvisionInput {
    pub name: Option<String>,
    #[serde(alias = "ipAddress")]
    pub ip_address: Option<String>,
    pub gateway: Option<String>,
    #[serde(alias = "systemUser")]
    pub system_user: Option<String>,
    #[serde(alias = "isoPath")]
    pub iso_path: Option<String>,
    pub vcpu: Option<IntInput>,
    pub memory: Option<IntInput>,
    #[serde(alias = "rootPassword")]
    pub root_password: Option<String>,
    #[serde(alias = "libvirtUri")]
    pub libvirt_uri: Option<String>,
    #[serde(alias = "k3sRole")]
    pub k3s_role: Option<String>,
}

impl ProvisionInput {
    pub fn new(
        name: impl Into<String>,
        ip_address: impl Into<String>,
        gateway: impl Into<String>,
        system_user: impl Into<String>,
        iso_path: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            ip_address: Some(ip_address.into()),
            gateway: Some(gateway.into()),
            system_user: Some(system_user.into()),
            iso_path: Some(iso_path.into()),
            ..Default::default()
        }
    }

    pub fn with_vcpu(mut self, vcpu: impl Into<IntInput>) -> Self {
        self.vcpu = Some(vcpu.into());
        self
    }

    pub fn with_memory(mut self, memory: impl Into<IntInput>) -> Self {
        self.memory = Some(memory.into());
        self
    }

    pub fn with_root_password(mut self, password: impl Into<String>) -> Self {
        self.root_password = Some(password.into());
        self
    }

    /// Targets a specific KVM host instead of the control plane's default.
    pub fn with_libvirt_uri(mut self, uri: impl Into<String>) -> Self {
        self.libvirt_uri = Some(uri.into());
        self
    }

    pub fn with_k3s_role(mut self, role: impl Into<String>) -> Self {
        self.k3s_role = Some(role.into());
        self
    }

    fn validate(&self) -> Result<ProvisionSpec> {
        let name = required("name", &self.name)?;
        let ip_address = ip_literal("ip_address", required("ip_address", &self.ip_address)?)?;
        let gateway = ip_literal("gateway", required("gateway", &self.gateway)?)?;
        let system_user = required("system_user", &self.system_user)?;
        let iso_path = required("iso_path", &self.iso_path)?;
        let vcpu = positive_int("vcpu", self.vcpu.as_ref(), DEFAULT_VCPU)?;
        let memory = positive_int("memory", self.memory.as_ref(), DEFAULT_MEMORY_MB)?;

        Ok(ProvisionSpec {
            name,
            ip_address,
            gateway,
            system_user,
            iso_path,
            vcpu,
            memory,
            root_password: optional(&self.root_password),
            libvirt_uri: optional(&self.libvirt_uri),
        })
    }
}

/// Validated fields common to every provisioning request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionSpec {
    pub name: String,
    pub ip_address: String,
    pub gateway: String,
    pub system_user: String,
    pub iso_path: String,
    pub vcpu: u32,
    pub memory: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libvirt_uri: Option<String>,
}

impl ProvisionSpec {
    fn internal_fields(&self) -> Value {
        let mut fields = json!({
            "name": self.name,
            "ip_address": self.ip_address,
            "gateway": self.gateway,
            "system_user": self.system_user,
            "iso_path": self.iso_path,
            "vcpu": self.vcpu,
            "memory": self.memory,
        });
        if let Some(map) = fields.as_object_mut() {
            if let Some(ref password) = self.root_password {
                map.insert("root_password".to_string(), json!(password));
            }
            if let Some(ref uri) = self.libvirt_uri {
                map.insert("libvirt_uri".to_string(), json!(uri));
            }
        }
        fields
    }
}

/// Intent to create a standalone VM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProvisionInput")]
pub struct VmRequest {
    #[serde(flatten)]
    spec: ProvisionSpec,
}

impl VmRequest {
    pub fn new(input: ProvisionInput) -> Result<Self> {
        Ok(Self {
            spec: input.validate()?,
        })
    }

    /// Builds a request from a JSON map keyed by either field names or wire aliases.
    pub fn from_json(value: Value) -> Result<Self> {
        let input: ProvisionInput = serde_json::from_value(value)
            .map_err(|e| ClientError::validation(format!("malformed VM request: {}", e)))?;
        Self::new(input)
    }

    pub fn spec(&self) -> &ProvisionSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Payload keyed by wire aliases, as sent to the control plane.
    pub fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Payload keyed by internal field names.
    pub fn to_internal(&self) -> Value {
        self.spec.internal_fields()
    }
}

impl TryFrom<ProvisionInput> for VmRequest {
    type Error = ClientError;

    fn try_from(input: ProvisionInput) -> Result<Self> {
        Self::new(input)
    }
}

/// Intent to add a VM-backed member to the cluster, or to update one.
///
/// Shares the VM payload today; the control plane decides between create and
/// update by whether the named node already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProvisionInput")]
pub struct NodeRequest {
    #[serde(flatten)]
    spec: ProvisionSpec,
    #[serde(rename = "k3sRole", skip_serializing_if = "Option::is_none")]
    k3s_role: Option<String>,
}

impl NodeRequest {
    pub fn new(input: ProvisionInput) -> Result<Self> {
        let spec = input.validate()?;
        let k3s_role = optional(&input.k3s_role);
        Ok(Self { spec, k3s_role })
    }

    pub fn from_json(value: Value) -> Result<Self> {
        let input: ProvisionInput = serde_json::from_value(value)
            .map_err(|e| ClientError::validation(format!("malformed node request: {}", e)))?;
        Self::new(input)
    }

    pub fn spec(&self) -> &ProvisionSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn k3s_role(&self) -> Option<&str> {
        self.k3s_role.as_deref()
    }

    pub fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_internal(&self) -> Value {
        let mut fields = self.spec.internal_fields();
        if let (Some(role), Some(map)) = (&self.k3s_role, fields.as_object_mut()) {
            map.insert("k3s_role".to_string(), Value::String(role.clone()));
        }
        fields
    }
}

impl TryFrom<ProvisionInput> for NodeRequest {
    type Error = ClientError;

    fn try_from(input: ProvisionInput) -> Result<Self> {
        Self::new(input)
    }
}

fn required(field: &str, value: &Option<String>) -> Result<String> {
    require(field, value.as_deref().unwrap_or_default())
}

/// Trims a single operator-supplied value and rejects it if blank.
pub(crate) fn require(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn ip_literal(field: &str, value: String) -> Result<String> {
    value.parse::<IpAddr>().map_err(|_| {
        ClientError::validation(format!(
            "{} must be a valid IPv4 or IPv6 address, got '{}'",
            field, value
        ))
    })?;
    Ok(value)
}

fn positive_int(field: &str, value: Option<&IntInput>, default: u32) -> Result<u32> {
    let invalid = |raw: String| {
        ClientError::validation(format!(
            "{} must be a positive integer, got '{}'",
            field, raw
        ))
    };

    match value {
        None => Ok(default),
        Some(IntInput::Int(n)) => u32::try_from(*n)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| invalid(n.to_string())),
        Some(IntInput::Text(s)) if s.trim().is_empty() => Ok(default),
        Some(IntInput::Text(s)) => s
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| invalid(s.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProvisionInput {
        ProvisionInput::new(
            "web-1",
            "192.168.50.10",
            "192.168.50.1",
            "ubuntu",
            "/var/lib/libvirt/images/seed.iso",
        )
    }

    #[test]
    fn test_defaults_applied_when_sizing_omitted() {
        let vm = VmRequest::new(input()).unwrap();
        assert_eq!(vm.spec().vcpu, 1);
        assert_eq!(vm.spec().memory, 2048);
    }

    #[test]
    fn test_sizing_overrides_defaults() {
        let vm = VmRequest::new(input().with_vcpu("4").with_memory(8192u32)).unwrap();
        assert_eq!(vm.spec().vcpu, 4);
        assert_eq!(vm.spec().memory, 8192);
    }

    #[test]
    fn test_blank_sizing_string_uses_default() {
        let vm = VmRequest::new(input().with_vcpu("  ")).unwrap();
        assert_eq!(vm.spec().vcpu, DEFAULT_VCPU);
    }

    #[test]
    fn test_wire_form_uses_aliases() {
        let wire = VmRequest::new(input()).unwrap().to_wire().unwrap();
        let obj = wire.as_object().unwrap();
        for key in ["name", "ipAddress", "gateway", "systemUser", "isoPath", "vcpu", "memory"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        for key in ["ip_address", "system_user", "iso_path"] {
            assert!(!obj.contains_key(key), "unexpected {}", key);
        }
        assert_eq!(obj.len(), 7);
    }

    #[test]
    fn test_internal_form_uses_field_names() {
        let internal = VmRequest::new(input()).unwrap().to_internal();
        assert_eq!(internal["ip_address"], "192.168.50.10");
        assert_eq!(internal["system_user"], "ubuntu");
        assert!(internal.get("ipAddress").is_none());
    }

    #[test]
    fn test_accepts_alias_and_field_names() {
        let by_alias = VmRequest::from_json(json!({
            "name": "web-1",
            "ipAddress": "192.168.50.10",
            "gateway": "192.168.50.1",
            "systemUser": "ubuntu",
            "isoPath": "/var/lib/libvirt/images/seed.iso",
        }))
        .unwrap();
        let by_name = VmRequest::from_json(json!({
            "name": "web-1",
            "ip_address": "192.168.50.10",
            "gateway": "192.168.50.1",
            "system_user": "ubuntu",
            "iso_path": "/var/lib/libvirt/images/seed.iso",
        }))
        .unwrap();
        assert_eq!(by_alias, by_name);
        assert_eq!(by_alias.to_wire().unwrap(), by_name.to_wire().unwrap());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let err = serde_json::from_value::<VmRequest>(json!({
            "name": "web-1",
            "ipAddress": "not-an-ip",
            "gateway": "192.168.50.1",
            "systemUser": "ubuntu",
            "isoPath": "/seed.iso",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("ip_address"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut raw = input();
        raw.name = Some("   ".to_string());
        let err = VmRequest::new(raw).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut raw = input();
        raw.iso_path = None;
        let err = NodeRequest::new(raw).unwrap_err();
        assert!(err.to_string().contains("iso_path is required"));
    }

    #[test]
    fn test_invalid_gateway_rejected() {
        let mut raw = input();
        raw.gateway = Some("192.168.50".to_string());
        assert!(VmRequest::new(raw).unwrap_err().is_validation());
    }

    #[test]
    fn test_ipv6_literals_accepted() {
        let mut raw = input();
        raw.ip_address = Some("fd00::10".to_string());
        raw.gateway = Some("fd00::1".to_string());
        assert!(VmRequest::new(raw).is_ok());
    }

    #[test]
    fn test_non_positive_sizing_rejected() {
        for bad in ["0", "-2", "two", "1.5"] {
            let err = VmRequest::new(input().with_vcpu(bad)).unwrap_err();
            assert!(err.to_string().contains("vcpu must be a positive integer"), "{}", bad);
        }
        let err = VmRequest::new(input().with_memory(IntInput::Int(0))).unwrap_err();
        assert!(err.to_string().contains("memory"));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let raw = ProvisionInput::new(" web-1 ", " 10.0.0.5", "10.0.0.1 ", "ubuntu", "/seed.iso");
        let vm = VmRequest::new(raw).unwrap();
        assert_eq!(vm.name(), "web-1");
        assert_eq!(vm.spec().ip_address, "10.0.0.5");
    }

    #[test]
    fn test_node_and_vm_share_body_shape() {
        let vm = VmRequest::new(input()).unwrap().to_wire().unwrap();
        let node = NodeRequest::new(input()).unwrap().to_wire().unwrap();
        assert_eq!(vm, node);
    }

    #[test]
    fn test_host_options_serialized_only_when_set() {
        let plain = VmRequest::new(input()).unwrap().to_wire().unwrap();
        assert!(plain.get("rootPassword").is_none());
        assert!(plain.get("libvirtUri").is_none());

        let vm = VmRequest::new(
            input()
                .with_root_password("s3cret")
                .with_libvirt_uri(" qemu+ssh://root@kvm-2/system "),
        )
        .unwrap();
        let wire = vm.to_wire().unwrap();
        assert_eq!(wire["rootPassword"], "s3cret");
        assert_eq!(wire["libvirtUri"], "qemu+ssh://root@kvm-2/system");
        assert_eq!(vm.to_internal()["root_password"], "s3cret");
        assert_eq!(vm.to_internal()["libvirt_uri"], "qemu+ssh://root@kvm-2/system");

        let blank = VmRequest::new(input().with_root_password("  ")).unwrap();
        assert_eq!(blank.spec().root_password, None);
    }

    #[test]
    fn test_host_options_accept_wire_aliases() {
        let vm = VmRequest::from_json(json!({
            "name": "web-1",
            "ipAddress": "192.168.50.10",
            "gateway": "192.168.50.1",
            "systemUser": "ubuntu",
            "isoPath": "/seed.iso",
            "rootPassword": "s3cret",
            "libvirtUri": "qemu:///system",
        }))
        .unwrap();
        assert_eq!(vm.spec().root_password.as_deref(), Some("s3cret"));
        assert_eq!(vm.spec().libvirt_uri.as_deref(), Some("qemu:///system"));
    }

    #[test]
    fn test_node_and_vm_share_host_options() {
        let raw = input()
            .with_root_password("s3cret")
            .with_libvirt_uri("qemu:///system");
        let vm = VmRequest::new(raw.clone()).unwrap().to_wire().unwrap();
        let node = NodeRequest::new(raw).unwrap().to_wire().unwrap();
        assert_eq!(vm, node);
    }

    #[test]
    fn test_node_role_serialized_only_when_set() {
        let node = NodeRequest::new(input().with_k3s_role("agent")).unwrap();
        assert_eq!(node.k3s_role(), Some("agent"));
        let wire = node.to_wire().unwrap();
        assert_eq!(wire["k3sRole"], "agent");
        assert_eq!(node.to_internal()["k3s_role"], "agent");

        let plain = NodeRequest::new(input()).unwrap().to_wire().unwrap();
        assert!(plain.get("k3sRole").is_none());
    }
}
