//! Configuration loaded from the environment.
//!
//! There is no global settings object: [`Config::from_env`] is called once
//! at the command boundary and the value is passed into the collaborators
//! that need it. The LLM provider is resolved once into a tagged
//! [`LlmProvider`]; nothing downstream inspects provider names again.

use std::env;

/// The resolved text-generation provider and its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    /// Anthropic messages API.
    Anthropic {
        /// API key for the `x-api-key` header.
        api_key: String,
        /// Model identifier.
        model: String,
    },
    /// OpenAI chat-completions API.
    OpenAi {
        /// Bearer token.
        api_key: String,
        /// Model identifier.
        model: String,
    },
    /// Local Ollama server, spoken to via its OpenAI-compatible endpoint.
    Ollama {
        /// Server base URL, e.g. `http://localhost:11434`.
        base_url: String,
        /// Model identifier, e.g. `llama3:8b`.
        model: String,
    },
}

/// Application configuration, read from `.env` / process environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Jira instance URL, e.g. `https://your-domain.atlassian.net`.
    pub jira_url: String,
    /// Email for Jira basic auth.
    pub jira_email: String,
    /// Jira API token.
    pub jira_api_token: String,
    /// Project key used when the CLI does not pass one.
    pub default_project: Option<String>,
    /// Raw provider name from `LLM_PROVIDER`.
    pub llm_provider: String,
    /// `OPENAI_API_KEY`.
    pub openai_api_key: String,
    /// `ANTHROPIC_API_KEY`.
    pub anthropic_api_key: String,
    /// `OLLAMA_BASE_URL`.
    pub ollama_base_url: String,
    /// `OLLAMA_MODEL`.
    pub ollama_model: String,
    /// `LLM_MODEL`, used for the hosted providers.
    pub llm_model: String,
}

impl Config {
    /// Loads configuration, reading a `.env` file first when present.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            jira_url: var_or_default("JIRA_URL", ""),
            jira_email: var_or_default("JIRA_EMAIL", ""),
            jira_api_token: var_or_default("JIRA_API_TOKEN", ""),
            default_project: env::var("DEFAULT_PROJECT_KEY").ok().filter(|v| !v.is_empty()),
            llm_provider: var_or_default("LLM_PROVIDER", "openai").to_lowercase(),
            openai_api_key: var_or_default("OPENAI_API_KEY", ""),
            anthropic_api_key: var_or_default("ANTHROPIC_API_KEY", ""),
            ollama_base_url: var_or_default("OLLAMA_BASE_URL", "http://localhost:11434"),
            ollama_model: var_or_default("OLLAMA_MODEL", "llama3:8b"),
            llm_model: var_or_default("LLM_MODEL", "gpt-4-turbo"),
        }
    }

    /// Validates required settings, returning every problem found.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.jira_url.is_empty() {
            errors.push("JIRA_URL not set".to_string());
        }
        if self.jira_email.is_empty() {
            errors.push("JIRA_EMAIL not set".to_string());
        }
        if self.jira_api_token.is_empty() {
            errors.push("JIRA_API_TOKEN not set".to_string());
        }

        match self.llm_provider.as_str() {
            "openai" => {
                if self.openai_api_key.is_empty() {
                    errors.push("OPENAI_API_KEY not set (LLM_PROVIDER=openai)".to_string());
                }
            }
            "anthropic" => {
                if self.anthropic_api_key.is_empty() {
                    errors.push("ANTHROPIC_API_KEY not set (LLM_PROVIDER=anthropic)".to_string());
                }
            }
            "ollama" => {
                if self.ollama_base_url.is_empty() {
                    errors.push("OLLAMA_BASE_URL not set (LLM_PROVIDER=ollama)".to_string());
                }
            }
            other => errors.push(format!(
                "Invalid LLM_PROVIDER: {other} (must be 'openai', 'anthropic', or 'ollama')"
            )),
        }

        errors
    }

    /// Resolves the provider tag, or `None` when no usable LLM is
    /// configured (the extraction agent then runs in fallback mode).
    #[must_use]
    pub fn provider(&self) -> Option<LlmProvider> {
        match self.llm_provider.as_str() {
            "openai" if !self.openai_api_key.is_empty() => Some(LlmProvider::OpenAi {
                api_key: self.openai_api_key.clone(),
                model: self.llm_model.clone(),
            }),
            "anthropic" if !self.anthropic_api_key.is_empty() => Some(LlmProvider::Anthropic {
                api_key: self.anthropic_api_key.clone(),
                model: self.llm_model.clone(),
            }),
            "ollama" if !self.ollama_base_url.is_empty() => Some(LlmProvider::Ollama {
                base_url: self.ollama_base_url.clone(),
                model: self.ollama_model.clone(),
            }),
            _ => None,
        }
    }
}

fn var_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
