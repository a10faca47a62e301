//! src/llm/anthropic.rs
use super::{Conversation, LLMClient, Turn};
use crate::config::LLMConfig;
use crate::errors::CommitError;
use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

pub const API_VERSION: &str = "2023-06-01";

pub const SYSTEM_PROMPT: &str = "You are a Git commit message assistant. If you need more context, ask exactly one clear question.
If you have enough context, provide ONLY the commit message without any explanations or questions.
The commit message should follow best practices and be wrapped in triple backticks.";

// --- 数据结构定义 (Messages API) ---
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: &'a [Turn],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

// --- 客户端实现 ---
pub struct AnthropicClient {
    api_key: String,
    model_name: String,
    api_url: String,
    max_tokens: u32,
    client: Client,
}

impl AnthropicClient {
    pub fn new(api_key: String, config: &LLMConfig) -> Result<Self> {
        Ok(Self::with_client(api_key, config, build_http_client()?))
    }

    pub fn with_client(api_key: String, config: &LLMConfig, client: Client) -> Self {
        Self {
            api_key,
            model_name: config.model.clone(),
            api_url: config.api_url.clone(),
            max_tokens: config.max_tokens,
            client,
        }
    }
}

fn build_http_client() -> Result<Client> {
    let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    // ALL_PROXY 不在 reqwest 默认读取范围内，这里显式处理
    let builder = Client::builder().user_agent(user_agent);
    let builder = match env::var("ALL_PROXY").ok() {
        Some(url) => {
            let proxy = reqwest::Proxy::all(&url)?.no_proxy(reqwest::NoProxy::from_env());
            builder.proxy(proxy)
        }
        None => builder,
    };
    Ok(builder.build()?)
}

#[async_trait::async_trait]
impl LLMClient for AnthropicClient {
    fn name(&self) -> &str {
        "Claude"
    }

    async fn call(&self, conversation: &Conversation) -> Result<String> {
        let request_payload = MessagesRequest {
            model: &self.model_name,
            system: SYSTEM_PROMPT,
            messages: conversation.turns(),
            max_tokens: self.max_tokens,
        };
        log::debug!(
            "POST {} ({} turns, model {})",
            self.api_url,
            conversation.turns().len(),
            self.model_name
        );

        let res = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request_payload)
            .send()
            .await
            .map_err(CommitError::Transport)?;

        let res_status = res.status();
        log::debug!("API responded with {}", res_status);

        if res_status != reqwest::StatusCode::OK {
            let error_body = res.text().await.unwrap_or_default();
            return Err(CommitError::ApiStatus {
                status: res_status.to_string(),
                body: error_body,
            }
            .into());
        }

        let response = res
            .json::<MessagesResponse>()
            .await
            .map_err(CommitError::MalformedResponse)?;
        response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CommitError::EmptyResponse.into())
    }
}
