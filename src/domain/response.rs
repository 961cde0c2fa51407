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

//! Response shapes returned by the control plane.
//!
//! The client hands payloads back as opaque JSON. These views are only used
//! when a renderer wants to lay a payload out as a table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope used by the cluster endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: for<'de> Deserialize<'de>,
{
    /// Reads the envelope out of an opaque payload, if it has that shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// A libvirt domain as reported by `/api/v1/vms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmInfo {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub vcpu: Option<u32>,
    #[serde(default)]
    pub memory: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub k3s_role: Option<String>,
}

impl VmInfo {
    /// Accepts either a bare list of VMs or a single VM object.
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        match value {
            Value::Array(_) => serde_json::from_value(value.clone()).ok(),
            Value::Object(_) => serde_json::from_value(value.clone()).ok().map(|vm| vec![vm]),
            _ => None,
        }
    }
}

/// A cluster member as reported by `/api/v1/clusters/nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub os_image: Option<String>,
    #[serde(default)]
    pub kubelet_version: Option<String>,
}

/// Node listing keyed by node name.
pub type NodeMap = BTreeMap<String, NodeInfo>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_listing_envelope() {
        let payload = json!({
            "message": "Successfully retrieved 2 nodes",
            "data": {
                "master": {"status": "True", "ip": "192.168.50.2", "osImage": "Ubuntu 22.04", "kubeletVersion": "v1.30.4+k3s1"},
                "worker-1": {"status": "False", "ip": "192.168.50.3"}
            }
        });

        let response = ApiResponse::<NodeMap>::from_value(&payload).unwrap();
        assert_eq!(response.message, "Successfully retrieved 2 nodes");
        let nodes = response.data.unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes["master"].kubelet_version.as_deref(), Some("v1.30.4+k3s1"));
        assert_eq!(nodes["worker-1"].os_image, None);
    }

    #[test]
    fn test_envelope_without_data() {
        let response = ApiResponse::<bool>::from_value(&json!({"message": "ok"})).unwrap();
        assert_eq!(response.data, None);
    }

    #[test]
    fn test_envelope_without_data_for_non_default_payload() {
        let response = ApiResponse::<VmInfo>::from_value(&json!({"message": "VM stopped"})).unwrap();
        assert_eq!(response.message, "VM stopped");
        assert_eq!(response.data, None);

        let response =
            ApiResponse::<VmInfo>::from_value(&json!({"message": "ok", "data": {"name": "web-1"}}))
                .unwrap();
        assert_eq!(response.data.unwrap().name, "web-1");
    }

    #[test]
    fn test_vm_list_from_array_and_object() {
        let list = json!([
            {"name": "web-1", "status": "running", "ipAddress": "10.0.0.5", "vcpu": 2, "memory": 4096},
            {"name": "web-2"}
        ]);
        let vms = VmInfo::list_from_value(&list).unwrap();
        assert_eq!(vms.len(), 2);
        assert_eq!(vms[0].ip_address.as_deref(), Some("10.0.0.5"));

        let single = VmInfo::list_from_value(&json!({"name": "web-3", "status": "shut off"})).unwrap();
        assert_eq!(single[0].name, "web-3");

        assert!(VmInfo::list_from_value(&json!("token")).is_none());
    }
}
