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

use crate::domain::request::{ip_literal, require, NodeRequest, VmRequest};
use crate::infrastructure::constants::*;
use crate::infrastructure::http::transport::{
    ApiReply, ApiRequest, HttpTransport, ReqwestTransport,
};
use crate::shared::error::{ClientError, Result, TransportError};
use serde_json::Value;

/// One method per control plane capability.
///
/// Every call is issued exactly once. Non-2xx replies become
/// `ClientError::RequestFailed` carrying the status and body.
pub struct ControlPlaneClient<T = ReqwestTransport> {
    transport: T,
}

impl ControlPlaneClient<ReqwestTransport> {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(base_url)?))
    }
}

impl<T: HttpTransport> ControlPlaneClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url().as_str()
    }

    pub async fn create_vm(&self, vm: &VmRequest) -> Result<Value> {
        self.call(ApiRequest::post(VMS_PATH).json(vm.to_wire()?))
            .await
    }

    pub async fn delete_vm(&self, name: &str) -> Result<Value> {
        let name = require("name", name)?;
        self.call(ApiRequest::delete(VMS_PATH).segment(name)).await
    }

    pub async fn list_vms(&self) -> Result<Value> {
        self.call(ApiRequest::get(VMS_PATH)).await
    }

    pub async fn get_vm(&self, name: &str) -> Result<Value> {
        let name = require("name", name)?;
        self.call(ApiRequest::get(VMS_PATH).segment(name)).await
    }

    pub async fn start_vm(&self, name: &str) -> Result<Value> {
        let name = require("name", name)?;
        self.call(
            ApiRequest::post(VMS_PATH)
                .segment(name)
                .segment(VM_START_SUFFIX),
        )
        .await
    }

    pub async fn stop_vm(&self, name: &str) -> Result<Value> {
        let name = require("name", name)?;
        self.call(
            ApiRequest::post(VMS_PATH)
                .segment(name)
                .segment(VM_STOP_SUFFIX),
        )
        .await
    }

    pub async fn get_join_token(&self) -> Result<Value> {
        self.call(ApiRequest::get(JOIN_TOKEN_PATH)).await
    }

    pub async fn join_cluster(&self, node_ip: &str) -> Result<Value> {
        let node_ip = ip_literal("node_ip", require("node_ip", node_ip)?)?;
        self.call(ApiRequest::get(JOIN_CLUSTER_PATH).query(QUERY_NODE_IP, node_ip))
            .await
    }

    /// Creates the node, or updates it if the control plane already knows it.
    pub async fn create_node(&self, node: &NodeRequest) -> Result<Value> {
        self.call(ApiRequest::put(NODE_PATH).json(node.to_wire()?))
            .await
    }

    /// Same endpoint as [`create_node`](Self::create_node).
    pub async fn update_node(&self, node: &NodeRequest) -> Result<Value> {
        self.create_node(node).await
    }

    pub async fn delete_node(&self, name: &str, libvirt_uri: Option<&str>) -> Result<Value> {
        let name = require("name", name)?;
        let mut request = ApiRequest::delete(NODE_PATH).query(QUERY_NODE_NAME, name);
        if let Some(uri) = libvirt_uri.map(str::trim).filter(|u| !u.is_empty()) {
            request = request.query(QUERY_LIBVIRT_URI, uri);
        }
        self.call(request).await
    }

    pub async fn list_nodes(&self) -> Result<Value> {
        self.call(ApiRequest::get(NODES_PATH)).await
    }

    pub async fn delete_pod(&self, pod_name: &str) -> Result<Value> {
        let pod_name = require("pod_name", pod_name)?;
        self.call(ApiRequest::delete(POD_PATH).query(QUERY_POD_NAME, pod_name))
            .await
    }

    async fn call(&self, request: ApiRequest) -> Result<Value> {
        let reply = self.transport.send(&request).await?;

        if !reply.is_success() {
            let url = request
                .url(self.transport.base_url())
                .map(|u| u.to_string())
                .unwrap_or_else(|_| request.path());
            tracing::warn!(method = %request.method, %url, status = reply.status, "control plane rejected request");
            return Err(TransportError::Status {
                method: request.method.to_string(),
                url,
                status: reply.status,
                body: reply.body.trim().to_string(),
            }
            .into());
        }

        decode_body(&reply)
    }
}

/// Parses a successful reply body into opaque JSON.
fn decode_body(reply: &ApiReply) -> Result<Value> {
    if reply.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str(&reply.body) {
        Ok(value) => Ok(value),
        Err(e) if reply.expects_json() => Err(ClientError::render_error(format!(
            "expected a JSON body: {}",
            e
        ))),
        Err(_) => Ok(Value::String(reply.body.clone())),
    }
}
