use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;

/// Provider names accepted in `[generator] provider`.
pub const KNOWN_PROVIDERS: &[&str] = &["echo"];

/// Trait for reply backends. Takes the flattened conversation and returns
/// the assistant's reply text.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        session_id: Option<&str>,
    ) -> Result<String, GenerationError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Stand-in backend that echoes the prompt back with a prefix.
pub struct EchoGenerator {
    prefix: String,
}

impl EchoGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EchoGenerator {
    fn default() -> Self {
        Self::new("Echo: ")
    }
}

#[async_trait]
impl ReplyGenerator for EchoGenerator {
    async fn generate(
        &self,
        prompt: &str,
        session_id: Option<&str>,
    ) -> Result<String, GenerationError> {
        debug!(session = session_id.unwrap_or("-"), len = prompt.len(), "echo generate");
        Ok(format!("{}{prompt}", self.prefix))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Create a generator from config.
pub fn from_config(config: &GeneratorConfig) -> anyhow::Result<Arc<dyn ReplyGenerator>> {
    match config.provider.as_str() {
        "echo" => Ok(Arc::new(EchoGenerator::new(config.prefix.clone()))),
        other => anyhow::bail!(
            "unknown provider '{other}': must be one of {:?}",
            KNOWN_PROVIDERS
        ),
    }
}
