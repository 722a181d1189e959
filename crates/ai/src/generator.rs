//! The remote generation seam used by the request orchestrator.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use medvision_core::effects::{FaceEffect, Procedure};
use medvision_core::makeup::MakeupType;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{refined_prompt, OpenAiClient, VisionPrompt};
use crate::config::AiConfig;
use crate::error::RemoteError;
use crate::prompts;

/// Hosted image generation. URLs returned here point at the provider.
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    async fn surgical_visualization(
        &self,
        image: &Path,
        procedure: &Procedure,
        intensity: u8,
    ) -> Result<String, RemoteError>;

    async fn apply_makeup(
        &self,
        image: &Path,
        kind: MakeupType,
        color: &str,
        intensity: u8,
    ) -> Result<String, RemoteError>;

    async fn age_progression(&self, image: &Path, target_age: u32) -> Result<String, RemoteError>;

    /// Structured facial analysis (`faceShape`, `skinCondition`,
    /// `suitableProcedures`, `recommendations`).
    async fn analyze_image(&self, image: &Path) -> Result<Value, RemoteError>;

    /// Edit the photo and return the downloaded result bytes.
    async fn face_effect(
        &self,
        image: &Path,
        effect: &FaceEffect,
        intensity: u8,
    ) -> Result<Vec<u8>, RemoteError>;
}

/* --------------------------------------------------------------------------
OpenAI
-------------------------------------------------------------------------- */

pub struct OpenAiGenerator {
    client: OpenAiClient,
}

impl OpenAiGenerator {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, RemoteError> {
        Ok(Self::new(OpenAiClient::from_config(config)?))
    }
}

#[async_trait]
impl RemoteGenerator for OpenAiGenerator {
    async fn surgical_visualization(
        &self,
        image: &Path,
        procedure: &Procedure,
        intensity: u8,
    ) -> Result<String, RemoteError> {
        let bytes = tokio::fs::read(image).await?;
        let text = prompts::surgical_request(procedure, intensity);
        let answer = self
            .client
            .chat_json(VisionPrompt {
                system: Some(prompts::SURGICAL_SYSTEM),
                text: &text,
                image: &bytes,
                max_tokens: Some(1000),
            })
            .await?;
        let prompt = prompts::surgical_image_prompt(refined_prompt(&answer)?);
        debug!(procedure = procedure.as_str(), "requesting surgical visualization");
        self.client.generate_image(&prompt).await
    }

    async fn apply_makeup(
        &self,
        image: &Path,
        kind: MakeupType,
        color: &str,
        intensity: u8,
    ) -> Result<String, RemoteError> {
        let bytes = tokio::fs::read(image).await?;
        let text = prompts::makeup_request(kind, color, intensity);
        let answer = self
            .client
            .chat_json(VisionPrompt {
                system: Some(prompts::MAKEUP_SYSTEM),
                text: &text,
                image: &bytes,
                max_tokens: Some(500),
            })
            .await?;
        let prompt = prompts::makeup_image_prompt(refined_prompt(&answer)?);
        debug!(makeup = kind.as_str(), "requesting makeup image");
        self.client.generate_image(&prompt).await
    }

    async fn age_progression(&self, _image: &Path, target_age: u32) -> Result<String, RemoteError> {
        self.client.generate_image(&prompts::age_prompt(target_age)).await
    }

    async fn analyze_image(&self, image: &Path) -> Result<Value, RemoteError> {
        let bytes = tokio::fs::read(image).await?;
        self.client
            .chat_json(VisionPrompt {
                system: None,
                text: prompts::ANALYSIS_REQUEST,
                image: &bytes,
                max_tokens: None,
            })
            .await
    }

    async fn face_effect(
        &self,
        image: &Path,
        effect: &FaceEffect,
        intensity: u8,
    ) -> Result<Vec<u8>, RemoteError> {
        let bytes = tokio::fs::read(image).await?;
        let prompt = prompts::face_effect_prompt(effect, intensity);
        let url = self.client.edit_image(bytes, &prompt).await?;
        info!(effect = effect.as_str(), "downloading edited image");
        self.client.download(&url).await
    }
}

/* --------------------------------------------------------------------------
Offline
-------------------------------------------------------------------------- */

/// Used when no API key is configured: every call fails immediately, so
/// requests always take the local path.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

#[async_trait]
impl RemoteGenerator for OfflineGenerator {
    async fn surgical_visualization(&self, _: &Path, _: &Procedure, _: u8) -> Result<String, RemoteError> {
        Err(RemoteError::NotConfigured)
    }

    async fn apply_makeup(&self, _: &Path, _: MakeupType, _: &str, _: u8) -> Result<String, RemoteError> {
        Err(RemoteError::NotConfigured)
    }

    async fn age_progression(&self, _: &Path, _: u32) -> Result<String, RemoteError> {
        Err(RemoteError::NotConfigured)
    }

    async fn analyze_image(&self, _: &Path) -> Result<Value, RemoteError> {
        Err(RemoteError::NotConfigured)
    }

    async fn face_effect(&self, _: &Path, _: &FaceEffect, _: u8) -> Result<Vec<u8>, RemoteError> {
        Err(RemoteError::NotConfigured)
    }
}

/// Pick the OpenAI generator when a key is configured, otherwise offline.
pub fn build_generator(config: &AiConfig) -> Arc<dyn RemoteGenerator> {
    match OpenAiGenerator::from_config(config) {
        Ok(generator) => Arc::new(generator),
        Err(e) => {
            info!(error = %e, "remote AI disabled, using local processing only");
            Arc::new(OfflineGenerator)
        }
    }
}
