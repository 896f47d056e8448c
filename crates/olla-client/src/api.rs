//! Request and response bodies for the Ollama HTTP API, plus the shared
//! request helpers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::OllamaError;
use crate::message::Message;

/// Request to `/api/generate`.
///
/// Also used for load/unload hints, which carry only `model` and `keep_alive`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct GenerateRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<KeepAlive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Request to `/api/chat`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<&'a Message>,
    pub stream: bool,
    pub options: Options,
}

/// Generation options.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Options {
    pub temperature: f32,
}

/// How long the server should keep a model resident.
///
/// Ollama accepts either a duration string (`"5m"`) or a number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub(crate) enum KeepAlive {
    Duration(String),
    Seconds(u64),
}

/// Response from `/api/tags`.
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagModel {
    pub name: String,
}

/// Response from `/api/ps`.
#[derive(Debug, Deserialize)]
pub(crate) struct PsResponse {
    #[serde(default)]
    pub models: Vec<RunningModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunningModel {
    pub name: String,
    pub model: String,
}

/// Error body returned on failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

fn reason_phrase(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

/// GET `url` and decode the JSON body.
///
/// A non-success status becomes [`OllamaError::Status`] with its reason phrase.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<T, OllamaError> {
    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let reason = reason_phrase(status);
        debug!("{} {}", url, reason);
        return Err(OllamaError::Status {
            status: status.as_u16(),
            reason,
        });
    }

    Ok(response.json().await?)
}

/// POST `body` to `url` and decode the JSON reply.
///
/// A non-success status becomes [`OllamaError::Status`] with its reason phrase.
pub(crate) async fn post_json<B: Serialize>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<Value, OllamaError> {
    let response = send(http, url, body).await?;

    let status = response.status();
    if !status.is_success() {
        let reason = reason_phrase(status);
        debug!("{} {}", url, reason);
        return Err(OllamaError::Status {
            status: status.as_u16(),
            reason,
        });
    }

    Ok(response.json().await?)
}

/// Like [`post_json`], but a failure surfaces the server's `error` text.
pub(crate) async fn post_json_server_error<B: Serialize>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<Value, OllamaError> {
    let response = send(http, url, body).await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        let err = OllamaError::Server {
            status: status.as_u16(),
            message,
        };
        debug!("{} {}", url, err);
        return Err(err);
    }

    Ok(response.json().await?)
}

/// POST `body` to `url`, ignoring whatever comes back.
pub(crate) async fn post_ignore<B: Serialize>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<(), OllamaError> {
    send(http, url, body).await?;
    Ok(())
}

async fn send<B: Serialize>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<reqwest::Response, OllamaError> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!("POST {} {}", url, serde_json::to_string(body)?);
    }
    Ok(http.post(url).json(body).send().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_request_has_only_model_and_keep_alive() {
        let request = GenerateRequest {
            model: "llama3.1".to_string(),
            keep_alive: Some(KeepAlive::Duration("5m".to_string())),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"model": "llama3.1", "keep_alive": "5m"})
        );
    }

    #[test]
    fn test_unload_keep_alive_is_numeric_zero() {
        let request = GenerateRequest {
            model: "llama3.1".to_string(),
            keep_alive: Some(KeepAlive::Seconds(0)),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap()["keep_alive"], json!(0));
    }

    #[test]
    fn test_ps_response_decodes() {
        let ps: PsResponse = serde_json::from_value(json!({
            "models": [{"name": "llama3.1:latest", "model": "llama3.1:latest", "size": 1}]
        }))
        .unwrap();
        assert_eq!(ps.models.len(), 1);
        assert_eq!(ps.models[0].model, "llama3.1:latest");
    }

    #[test]
    fn test_reason_phrase() {
        assert_eq!(reason_phrase(reqwest::StatusCode::NOT_FOUND), "Not Found");
    }
}
