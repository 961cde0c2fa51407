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

/// Control plane endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Configuration file
pub const CONF_FILE_ENV: &str = "K3SKVM_CONF_FILE";

/// VM endpoints
pub const VMS_PATH: &str = "/api/v1/vms";
pub const VM_START_SUFFIX: &str = "start";
pub const VM_STOP_SUFFIX: &str = "stop";

/// Cluster endpoints
pub const JOIN_TOKEN_PATH: &str = "/api/v1/clusters/join-token";
pub const JOIN_CLUSTER_PATH: &str = "/api/v1/clusters/join-cluster";
pub const NODE_PATH: &str = "/api/v1/clusters/node";
pub const NODES_PATH: &str = "/api/v1/clusters/nodes";
pub const POD_PATH: &str = "/api/v1/clusters/pod";

/// Query parameter names
pub const QUERY_NODE_IP: &str = "nodeIp";
pub const QUERY_NODE_NAME: &str = "nodeName";
pub const QUERY_POD_NAME: &str = "podName";
pub const QUERY_LIBVIRT_URI: &str = "libvirtUri";

/// Headers
pub const CONTENT_TYPE_JSON: &str = "application/json";
