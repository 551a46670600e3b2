//! API utilities for frontend-backend communication
//!
//! Every backend call goes through [`ApiClient`], which carries the
//! configuration and the session explicitly. Failures come back as
//! [`ApiError`] and are never fatal.

use contracts::shared::config::ConsoleConfig;
use contracts::shared::descriptor::EntityDescriptor;
use contracts::shared::envelope::{
    decode_body, decode_list, decode_mutation_body, decode_object,
};
use contracts::shared::error::ApiError;
use contracts::shared::form_state::MultipartBody;
use contracts::shared::list_state::ListItem;
use contracts::shared::normalizer::NormalizeOptions;
use contracts::system::auth::Session;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, FormData};

#[derive(Clone, Debug)]
pub struct ApiClient {
    config: Arc<ConsoleConfig>,
    session: Session,
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not found in context")
}

/// Text of a JS exception.
pub fn js_error(err: JsValue) -> ApiError {
    let text = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{err:?}"));
    ApiError::InvalidRequest(text)
}

/// Status and raw text of a response.
pub async fn read_text(response: Response) -> Result<(u16, String), ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok((status, text))
}

/// Multipart body: the scalar parts, then the staged file under its field name.
pub fn to_form_data(body: &MultipartBody, file: Option<&File>) -> Result<FormData, ApiError> {
    let data = FormData::new().map_err(js_error)?;
    for (name, value) in &body.fields {
        data.append_with_str(name, value).map_err(js_error)?;
    }
    if let (Some(field), Some(file)) = (body.file_field, file) {
        data.append_with_blob_and_filename(field, file, &file.name())
            .map_err(js_error)?;
    }
    Ok(data)
}

impl ApiClient {
    pub fn new(config: Arc<ConsoleConfig>, session: Session) -> Self {
        Self { config, session }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        self.config.normalize_options()
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let (name, value) = self.session.header(&self.config.api);
        builder.header(&name, &value)
    }

    async fn send(&self, request: Request) -> Result<(u16, String), ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_text(response).await
    }

    async fn read(&self, path: &str, request: Request) -> Result<Value, ApiError> {
        let (status, text) = self.send(request).await?;
        decode_body(path, status, &text)
    }

    async fn mutate(&self, request: Request) -> Result<Value, ApiError> {
        let (status, text) = self.send(request).await?;
        decode_mutation_body(status, &text)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        log::debug!("GET {path}");
        let request = self
            .authorized(Request::get(&self.config.api_url(path)))
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.read(path, request).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        log::debug!("POST {path}");
        let request = self
            .authorized(Request::post(&self.config.api_url(path)))
            .json(body)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.mutate(request).await
    }

    pub async fn patch_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        log::debug!("PATCH {path}");
        let request = self
            .authorized(Request::patch(&self.config.api_url(path)))
            .json(body)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.mutate(request).await
    }

    /// The browser sets the multipart boundary header itself.
    pub async fn post_form(&self, path: &str, data: FormData) -> Result<Value, ApiError> {
        log::debug!("POST {path} (multipart)");
        let request = self
            .authorized(Request::post(&self.config.api_url(path)))
            .body(data)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.mutate(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        log::debug!("DELETE {path}");
        let request = self
            .authorized(Request::delete(&self.config.api_url(path)))
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.mutate(request).await.map(|_| ())
    }

    /// Fetch an entity collection and normalize it for display.
    pub async fn fetch_list(
        &self,
        descriptor: &EntityDescriptor,
        scope: &[&str],
    ) -> Result<Vec<ListItem>, ApiError> {
        let path = descriptor.list_path(scope)?;
        let body = self.get_json(&path).await?;
        let records = decode_list(&path, body, descriptor.list_shape)?;
        Ok(descriptor.to_items(records, &self.normalize_options()))
    }

    /// Fetch a single document, optionally wrapped under `key`.
    pub async fn fetch_object(&self, path: &str, key: Option<&str>) -> Result<Value, ApiError> {
        let body = self.get_json(path).await?;
        decode_object(path, body, key)
    }
}
