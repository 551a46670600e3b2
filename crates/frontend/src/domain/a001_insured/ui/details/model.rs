use crate::shared::api_utils::ApiClient;
use contracts::domain::a001_insured::aggregate::{FIND, FIND_KEY};
use contracts::shared::error::ApiError;
use serde_json::Value;

/// Customer document, including its `vehicles` array.
pub async fn fetch_customer(api: &ApiClient, insured_id: &str) -> Result<Value, ApiError> {
    let path = FIND.fill(&[insured_id])?;
    api.fetch_object(&path, Some(FIND_KEY)).await
}
