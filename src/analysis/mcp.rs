use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AnalysisClient;

/// Prompt name requested from the analysis server.
const PROMPT_NAME: &str = "analyze_copyright";

/// Instructions sent alongside the extracted notices.
pub const ANALYSIS_INSTRUCTIONS: &str = "You are a copyright analysis expert. Analyze the provided copyright information and provide:
1. A summary of all copyright holders
2. The years covered by the copyrights
3. Any potential conflicts or overlapping claims
4. Recommendations for compliance
Please format your response in a clear, structured manner.";

/// Connection settings for [`McpClient`].
#[derive(Debug, Clone)]
pub struct McpSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

/// JSON-RPC client for a Model Context Protocol server over HTTP.
pub struct McpClient {
    http: Client,
    url: String,
    api_key: String,
    model: String,
}

impl McpClient {
    pub fn new(settings: McpSettings) -> Result<Self> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        let url = format!("{}/mcp", settings.endpoint.trim_end_matches('/'));
        Ok(Self {
            http,
            url,
            api_key: settings.api_key,
            model: settings.model,
        })
    }
}

impl AnalysisClient for McpClient {
    async fn analyze(&self, copyright_info: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", concat!("copyright-scanr/", env!("CARGO_PKG_VERSION")))
            .header("Accept", "application/json")
            .json(&build_request(&self.model, copyright_info))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("analysis service returned HTTP {}", status);
        }

        let body: RpcResponse = response.json().await?;
        analysis_text(body)
    }
}

fn build_request(model: &str, copyright_info: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "prompts/get",
        "params": {
            "name": PROMPT_NAME,
            "arguments": {
                "model": model,
                "instructions": ANALYSIS_INSTRUCTIONS,
                "content": format!(
                    "Please analyze the following copyright information from a software project:\n\n{}",
                    copyright_info
                ),
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<PromptResult>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct PromptResult {
    #[serde(default)]
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Deserialize)]
struct PromptMessage {
    content: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Pull the analysis out of the last message of a `prompts/get` result.
fn analysis_text(response: RpcResponse) -> Result<String> {
    if let Some(err) = response.error {
        bail!("analysis service error {}: {}", err.code, err.message);
    }

    response
        .result
        .and_then(|r| r.messages.into_iter().last())
        .and_then(|m| m.content)
        .filter(|c| c.kind == "text")
        .and_then(|c| c.text)
        .ok_or_else(|| anyhow!("no analysis result received from the analysis service"))
}
