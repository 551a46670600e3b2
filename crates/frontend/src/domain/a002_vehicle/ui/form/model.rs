use crate::shared::api_utils::read_text;
use contracts::domain::a002_vehicle::registry::{first_record, prefill};
use contracts::shared::envelope::decode_body;
use contracts::shared::error::ApiError;
use gloo_net::http::Request;

/// Query the public vehicle registry. `Ok(None)` when it has no record
/// for the plate. The registry is not our backend: no auth header.
pub async fn lookup_registry(
    url: &str,
) -> Result<Option<Vec<(&'static str, String)>>, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let (status, text) = read_text(response).await?;
    let body = decode_body(url, status, &text)?;
    Ok(first_record(&body).map(prefill))
}
