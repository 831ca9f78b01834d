//! Text-generation collaborator.
//!
//! The report assembler asks this service for narrative prose around the
//! computed numbers. The service is fallible and untyped; responses are
//! validated defensively and any failure degrades to a clearly labeled
//! offline paragraph rather than fabricated content.

mod client;

use async_trait::async_trait;

use crate::errors::Result;

pub use client::HttpNarrativeService;

/// Structured prompt: who the narrator is, what it must do, and which
/// response schema it should follow.
#[derive(Clone, Debug)]
pub struct NarrativePrompt {
    pub persona: String,
    pub directives: Vec<String>,
    pub schema: String,
}

impl NarrativePrompt {
    pub fn analyst(schema: &str) -> Self {
        Self {
            persona: "You are a market-entry analyst writing for an executive audience."
                .to_string(),
            directives: vec![
                "Ground every statement in the supplied figures.".to_string(),
                "Keep each answer to one paragraph.".to_string(),
                "Never invent numbers.".to_string(),
            ],
            schema: schema.to_string(),
        }
    }
}

#[async_trait]
pub trait NarrativeService: Send + Sync {
    /// One paragraph of prose for the given prompt and figure context.
    async fn generate(&self, prompt: &NarrativePrompt, context: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// Produces labeled placeholder prose without any external call.
pub struct OfflineNarrative;

#[async_trait]
impl NarrativeService for OfflineNarrative {
    async fn generate(&self, prompt: &NarrativePrompt, context: &str) -> Result<String> {
        Ok(offline_paragraph(&prompt.schema, context))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// The fallback text interleaved when the collaborator is unreachable.
/// Labeled so a reader can never mistake it for generated analysis.
pub fn offline_paragraph(schema: &str, context: &str) -> String {
    let digest: String = context.chars().take(280).collect();
    format!(
        "[offline narrative: {}] Narrative service unavailable; figures stand on their own. {}",
        schema,
        digest.trim()
    )
}
