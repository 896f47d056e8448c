//! Server-wide operations that do not depend on any one client.

use tracing::{debug, error, info};

use crate::api::{self, PsResponse, TagsResponse};
use crate::client::unload_model;
use crate::config::base_url;

/// Names of every model the server has available.
///
/// Returns an empty list on failure.
pub async fn list_models(host: &str, port: u16) -> Vec<String> {
    let http = reqwest::Client::new();
    let url = format!("{}/api/tags", base_url(host, port));

    match api::get_json::<TagsResponse>(&http, &url).await {
        Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

/// Find the available model whose name best matches `search`.
pub async fn search_models(search: &str, host: &str, port: u16) -> Option<String> {
    let models = list_models(host, port).await;
    best_match(search, &models)
}

/// Among names containing `search`, prefer the shortest part before the
/// first `:`, then the alphabetically first name.
///
/// `llama3.1:8b` wins over `llama3.1-uncensored:8b` for `"llama3.1"`.
pub fn best_match(search: &str, models: &[String]) -> Option<String> {
    models
        .iter()
        .filter(|name| name.contains(search))
        .min_by(|a, b| {
            base_name(a)
                .len()
                .cmp(&base_name(b).len())
                .then_with(|| a.cmp(b))
        })
        .cloned()
}

fn base_name(model: &str) -> &str {
    model.split_once(':').map(|(base, _)| base).unwrap_or(model)
}

/// Unload every model the server currently has loaded.
///
/// Best-effort: if the loaded list cannot be fetched nothing is attempted,
/// and individual unload failures are only logged.
pub async fn unload_all(host: &str, port: u16) {
    let http = reqwest::Client::new();
    let base = base_url(host, port);

    let ps = match api::get_json::<PsResponse>(&http, &format!("{}/api/ps", base)).await {
        Ok(ps) => ps,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    debug!("{} model(s) loaded on {}", ps.models.len(), base);
    for model in ps.models {
        info!("Unloading {}", model.model);
        if let Err(e) = unload_model(&http, &base, &model.model).await {
            error!("Failed to unload {}: {}", model.model, e);
        }
    }
}
