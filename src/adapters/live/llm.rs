//! Live adapter for the `LlmClient` port.
//!
//! One adapter serves all three providers: the variant is fixed when the
//! client is constructed, so the request path never inspects provider
//! shapes. Anthropic speaks its messages API; OpenAI and Ollama share the
//! chat-completions wire format (Ollama through its `/v1` compatibility
//! endpoint).

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmProvider;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Live LLM client for the configured provider.
pub struct LiveLlmClient {
    client: Client,
    provider: LlmProvider,
}

impl LiveLlmClient {
    /// Creates a client for the given provider.
    #[must_use]
    pub fn new(provider: LlmProvider) -> Self {
        Self { client: Client::new(), provider }
    }

    async fn complete_anthropic(
        &self,
        api_key: &str,
        model: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, BoxError> {
        let body = AnthropicRequest {
            model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message { role: "user", content: &request.prompt }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| -> BoxError { format!("Anthropic API request failed: {e}").into() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| -> BoxError { format!("Failed to read Anthropic API response: {e}").into() })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(format!("Anthropic API error ({}): {msg}", status.as_u16()).into());
        }

        let parsed: AnthropicResponse = serde_json::from_str(&text)
            .map_err(|e| -> BoxError { format!("Failed to parse Anthropic API response: {e}").into() })?;

        Ok(CompletionResponse {
            text: parsed.content.into_iter().map(|block| block.text).collect(),
            prompt_tokens: parsed.usage.input_tokens,
            completion_tokens: parsed.usage.output_tokens,
        })
    }

    async fn complete_openai(
        &self,
        url: &str,
        api_key: Option<&str>,
        model: &str,
        json_mode: bool,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, BoxError> {
        let body = OpenAiRequest {
            model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message { role: "user", content: &request.prompt }],
            response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
        };

        let mut builder = self.client.post(url).json(&body);
        if let Some(key) = api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| -> BoxError { format!("Chat API request failed: {e}").into() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| -> BoxError { format!("Failed to read chat API response: {e}").into() })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(format!("Chat API error ({}): {msg}", status.as_u16()).into());
        }

        let parsed: OpenAiResponse = serde_json::from_str(&text)
            .map_err(|e| -> BoxError { format!("Failed to parse chat API response: {e}").into() })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or("Chat API response contained no completion")?;
        let usage = parsed.usage.unwrap_or_default();

        Ok(CompletionResponse {
            text: content,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        })
    }
}

/// A single chat message, shared by both wire formats.
#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<Message<'a>>,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Request body for the OpenAI-style chat-completions API.
#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Error envelope shared by both APIs.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            match &self.provider {
                LlmProvider::Anthropic { api_key, model } => {
                    self.complete_anthropic(api_key, model, &request).await
                }
                LlmProvider::OpenAi { api_key, model } => {
                    self.complete_openai(OPENAI_API_URL, Some(api_key), model, true, &request)
                        .await
                }
                LlmProvider::Ollama { base_url, model } => {
                    let url =
                        format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));
                    self.complete_openai(&url, None, model, false, &request).await
                }
            }
        })
    }
}
