//! HTTP client for an OpenAI-compatible API.
//!
//! Covers the three endpoints the adapter needs: chat completions with a
//! JSON-object response format, image generation, and image edits. Result
//! images are fetched with [`OpenAiClient::download`].

use std::time::Duration;

use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::AiConfig;
use crate::error::RemoteError;

/// Square output size requested from the image model.
pub const IMAGE_SIZE: &str = "1024x1024";

/// HTTP client bound to one provider and key.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    image_model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// A chat request carrying an optional system prompt and an inline image.
#[derive(Debug, Clone)]
pub struct VisionPrompt<'a> {
    pub system: Option<&'a str>,
    pub text: &'a str,
    pub image: &'a [u8],
    pub max_tokens: Option<u32>,
}

impl OpenAiClient {
    /// Build a client from configuration. Fails with
    /// [`RemoteError::NotConfigured`] when no API key is set.
    pub fn from_config(config: &AiConfig) -> Result<Self, RemoteError> {
        let api_key = config.api_key.clone().ok_or(RemoteError::NotConfigured)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    /// Ask the chat model for a JSON object about an image.
    pub async fn chat_json(&self, prompt: VisionPrompt<'_>) -> Result<Value, RemoteError> {
        let data_url = format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(prompt.image)
        );
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = prompt.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({
            "role": "user",
            "content": [
                { "type": "text", "text": prompt.text },
                { "type": "image_url", "image_url": { "url": data_url } },
            ],
        }));

        let mut body = json!({
            "model": self.chat_model,
            "messages": messages,
            "response_format": { "type": "json_object" },
        });
        if let Some(max) = prompt.max_tokens {
            body["max_tokens"] = json!(max);
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let completion: ChatCompletion = Self::ensure_success(response).await?.json().await?;
        parse_chat_content(completion)
    }

    /// Generate one HD image from a prompt and return its URL.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, RemoteError> {
        let body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "size": IMAGE_SIZE,
            "quality": "hd",
            "n": 1,
        });
        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let images: ImagesResponse = Self::ensure_success(response).await?.json().await?;
        first_image_url(images)
    }

    /// Edit an uploaded JPEG according to `prompt` and return the result URL.
    pub async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> Result<String, RemoteError> {
        let part = reqwest::multipart::Part::bytes(image)
            .file_name("image.jpg")
            .mime_str("image/jpeg")?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("prompt", prompt.to_string())
            .text("n", "1")
            .text("size", IMAGE_SIZE);
        let response = self
            .client
            .post(format!("{}/images/edits", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;
        let images: ImagesResponse = Self::ensure_success(response).await?.json().await?;
        first_image_url(images)
    }

    /// Fetch a result image.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self.client.get(url).send().await?;
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn parse_chat_content(completion: ChatCompletion) -> Result<Value, RemoteError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| RemoteError::MalformedResponse("chat completion has no content".into()))?;
    let value: Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(RemoteError::MalformedResponse(
            "chat answer is not a JSON object".into(),
        ));
    }
    Ok(value)
}

fn first_image_url(images: ImagesResponse) -> Result<String, RemoteError> {
    images
        .data
        .into_iter()
        .find_map(|d| d.url.filter(|u| !u.is_empty()))
        .ok_or(RemoteError::EmptyResult)
}

/// Pull the refined image prompt out of a chat answer.
pub fn refined_prompt(answer: &Value) -> Result<&str, RemoteError> {
    answer
        .get("dallePrompt")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| RemoteError::MalformedResponse("answer has no dallePrompt".into()))
}
