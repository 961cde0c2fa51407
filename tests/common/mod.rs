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

#![allow(dead_code)]

use k3skvm_cli::cli::display::OutputRenderer;
use k3skvm_cli::cli::CommandContext;
use k3skvm_cli::{
    ApiReply, ApiRequest, ControlPlaneClient, HttpTransport, OutputFormat, TransportError,
};
use serde_json::Value;
use std::io;
use std::sync::Mutex;
use url::Url;

pub const BASE_URL: &str = "http://127.0.0.1:8080";

/// Transport that records every request and answers with a canned reply.
pub struct MockTransport {
    base_url: Url,
    outcome: Result<ApiReply, String>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn replying(status: u16, content_type: Option<&str>, body: &str) -> Self {
        Self {
            base_url: Url::parse(BASE_URL).unwrap(),
            outcome: Ok(ApiReply {
                status,
                content_type: content_type.map(str::to_string),
                body: body.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok_json(body: Value) -> Self {
        Self::replying(200, Some("application/json"), &body.to_string())
    }

    pub fn unreachable() -> Self {
        Self {
            outcome: Err("Connection refused (os error 111)".to_string()),
            ..Self::replying(200, None, "")
        }
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn only_call(&self) -> ApiRequest {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {:?}", calls);
        calls.into_iter().next().unwrap()
    }

    pub fn url_of(&self, request: &ApiRequest) -> String {
        request.url(&self.base_url).unwrap().to_string()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiReply, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        self.outcome.clone().map_err(|reason| {
            TransportError::Connection(
                io::Error::new(io::ErrorKind::ConnectionRefused, reason).into(),
            )
        })
    }
}

pub fn client(transport: MockTransport) -> ControlPlaneClient<MockTransport> {
    ControlPlaneClient::with_transport(transport)
}

pub fn context(transport: MockTransport, format: OutputFormat) -> CommandContext<MockTransport> {
    CommandContext::with_client(client(transport), OutputRenderer::new(format))
}

pub fn vm_flags(name: &str) -> Vec<String> {
    [
        "--name",
        name,
        "--ip-address",
        "192.168.50.10",
        "--gateway",
        "192.168.50.1",
        "--system-user",
        "ubuntu",
        "--iso-path",
        "/home/ubuntu/iso/seed.iso",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
