//! Ranking assistant: provider abstraction for the language-model call.
//! One request per ranking, no retries, no caching.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

use crate::config::ai::AiConfig;

/// Env switch for deterministic local runs and tests.
pub const ENV_AI_TEST_MODE: &str = "AI_TEST_MODE";

pub const DEFAULT_MOCK_REPLY: &str = "```json\n[0, 1, 2, 3]\n```";

/// Trait object used by the news pipeline and the router.
pub trait RankingAssistant: Send + Sync {
    /// Send `prompt`, return the raw reply text.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynRankingAssistant = Arc<dyn RankingAssistant>;

/// Factory: build an assistant according to config and environment.
///
/// * `AI_TEST_MODE=mock` returns a [`MockAssistant`].
/// * `enabled == false` returns a [`DisabledAssistant`].
/// * `provider == "openai"` with a key returns an [`OpenAiAssistant`].
pub fn build_assistant(cfg: &AiConfig, http: reqwest::Client) -> DynRankingAssistant {
    if std::env::var(ENV_AI_TEST_MODE)
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockAssistant::new(DEFAULT_MOCK_REPLY));
    }

    if !cfg.enabled {
        return Arc::new(DisabledAssistant);
    }

    match cfg.provider.as_str() {
        "openai" if !cfg.api_key.is_empty() => Arc::new(OpenAiAssistant::new(cfg, http)),
        "openai" => {
            tracing::warn!(target: "ranking", "OpenAI selected but no API key; news ranking disabled");
            Arc::new(DisabledAssistant)
        }
        other => {
            tracing::warn!(target: "ranking", provider = other, "unsupported ranking provider; news ranking disabled");
            Arc::new(DisabledAssistant)
        }
    }
}

/// OpenAI Chat Completions.
pub struct OpenAiAssistant {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiAssistant {
    pub fn new(cfg: &AiConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            endpoint: cfg.endpoint.clone(),
        }
    }

    async fn complete_impl(&self, prompt: &str) -> anyhow::Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: Option<String>,
        }

        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .http
            .post(self.endpoint.as_str())
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("openai http post()")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("openai returned status {status}");
        }
        let body: Resp = resp.json().await.context("decoding openai response")?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            bail!("openai returned an empty reply");
        }
        Ok(content)
    }
}

impl RankingAssistant for OpenAiAssistant {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(self.complete_impl(prompt))
    }
    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Always fails; used when AI is disabled or misconfigured.
pub struct DisabledAssistant;

impl RankingAssistant for DisabledAssistant {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async { Err(anyhow!("ranking assistant is disabled")) })
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Returns a fixed reply regardless of the prompt.
#[derive(Clone)]
pub struct MockAssistant {
    pub reply: String,
}

impl MockAssistant {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl RankingAssistant for MockAssistant {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        let out = self.reply.clone();
        Box::pin(async move { Ok(out) })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_assistant_errors() {
        assert!(DisabledAssistant.complete("x").await.is_err());
    }

    #[tokio::test]
    async fn mock_assistant_echoes_reply() {
        let m = MockAssistant::new("[1]");
        assert_eq!(m.complete("anything").await.unwrap(), "[1]");
    }

    #[serial_test::serial]
    #[test]
    fn factory_respects_enabled_flag_and_key() {
        std::env::remove_var(ENV_AI_TEST_MODE);
        let http = reqwest::Client::new();

        let mut cfg = AiConfig::default();
        cfg.enabled = false;
        assert_eq!(build_assistant(&cfg, http.clone()).provider_name(), "disabled");

        cfg.enabled = true;
        cfg.provider = "openai".into();
        cfg.api_key = String::new();
        assert_eq!(build_assistant(&cfg, http.clone()).provider_name(), "disabled");

        cfg.api_key = "sk-test".into();
        assert_eq!(build_assistant(&cfg, http.clone()).provider_name(), "openai");

        cfg.provider = "claude".into();
        assert_eq!(build_assistant(&cfg, http).provider_name(), "disabled");
    }

    #[serial_test::serial]
    #[test]
    fn test_mode_mock_overrides_config() {
        std::env::set_var(ENV_AI_TEST_MODE, "mock");
        let cfg = AiConfig::default();
        let a = build_assistant(&cfg, reqwest::Client::new());
        std::env::remove_var(ENV_AI_TEST_MODE);
        assert_eq!(a.provider_name(), "mock");
    }
}
