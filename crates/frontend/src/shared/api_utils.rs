//! API utilities for frontend-backend communication
//!
//! Base URL resolution plus the JSON and multipart request helpers the
//! `api.rs` modules build on. Every helper attaches the bearer token when one
//! is stored and turns error bodies into one readable message.

use contracts::shared::api_error::{describe_error_text, NO_RESPONSE_MESSAGE};
use contracts::shared::media::resolve_media_url;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{File, FormData};

use crate::system::auth::storage;

/// Build-time override of the API origin, e.g. `API_BASE_URL=https://api.example.com`.
const API_BASE_OVERRIDE: Option<&str> = option_env!("API_BASE_URL");

/// Get the origin API requests go to
///
/// The build-time override wins; otherwise the app talks to the origin it was
/// served from (the dev server proxies `/api`).
///
/// # Returns
/// - Origin like "http://localhost:5173"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(base) = API_BASE_OVERRIDE.filter(|b| !b.trim().is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path under `/api`
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/courses/courses/");
/// ```
pub fn api_url(path: &str) -> String {
    join_api_url(&api_base(), path)
}

/// Absolute URL for a media path returned by the API.
pub fn media_url(url: Option<&str>) -> Option<String> {
    resolve_media_url(&api_base(), url)
}

fn join_api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}/api{}", base, path)
    } else {
        format!("{}/api/{}", base, path)
    }
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn send_failed(path: &str, e: gloo_net::Error) -> String {
    log::error!("request to {} failed: {}", path, e);
    NO_RESPONSE_MESSAGE.to_string()
}

/// Error message for a non-2xx response.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = describe_error_text(status, &text);
    log::error!("{} {} -> {}", status, response.url(), message);
    message
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn read_empty(response: Response) -> Result<(), String> {
    if !response.ok() {
        return Err(error_message(response).await);
    }
    Ok(())
}

/// GET `path` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_json(response).await
}

/// POST a JSON body and decode the JSON answer.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_json(response).await
}

/// PUT a JSON body and decode the JSON answer.
pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_json(response).await
}

/// PATCH a JSON body and decode the JSON answer.
pub async fn patch_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::patch(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_json(response).await
}

/// POST a JSON body, ignoring the answer.
pub async fn post_json_discard<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_empty(response).await
}

/// POST without a body, ignoring the answer.
pub async fn post_empty(path: &str) -> Result<(), String> {
    let response = with_auth(Request::post(&api_url(path)))
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_empty(response).await
}

/// DELETE `path`; 204 answers have no body.
pub async fn delete(path: &str) -> Result<(), String> {
    let response = with_auth(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_empty(response).await
}

/// DELETE with a JSON body (e.g. a password confirmation).
pub async fn delete_json<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    let response = with_auth(Request::delete(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_empty(response).await
}

/// A file part of a multipart body.
pub struct Upload<'a> {
    pub field: &'static str,
    pub file: &'a File,
}

fn build_form(fields: &[(&'static str, String)], upload: Option<Upload<'_>>) -> Result<FormData, String> {
    let form = FormData::new().map_err(|e| format!("Failed to build form: {:?}", e))?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|e| format!("Failed to build form: {:?}", e))?;
    }
    if let Some(upload) = upload {
        form.append_with_blob_and_filename(upload.field, upload.file, &upload.file.name())
            .map_err(|e| format!("Failed to attach {}: {:?}", upload.field, e))?;
    }
    Ok(form)
}

/// The browser sets the multipart boundary; no Content-Type header here.
async fn send_form<T: DeserializeOwned>(
    builder: RequestBuilder,
    path: &str,
    form: FormData,
) -> Result<T, String> {
    let response = with_auth(builder)
        .body(form)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| send_failed(path, e))?;
    read_json(response).await
}

/// POST a multipart body and decode the JSON answer.
pub async fn post_form<T: DeserializeOwned>(
    path: &str,
    fields: &[(&'static str, String)],
    upload: Option<Upload<'_>>,
) -> Result<T, String> {
    let form = build_form(fields, upload)?;
    send_form(Request::post(&api_url(path)), path, form).await
}

/// PATCH a multipart body and decode the JSON answer.
pub async fn patch_form<T: DeserializeOwned>(
    path: &str,
    fields: &[(&'static str, String)],
    upload: Option<Upload<'_>>,
) -> Result<T, String> {
    let form = build_form(fields, upload)?;
    send_form(Request::patch(&api_url(path)), path, form).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_api_url() {
        assert_eq!(
            join_api_url("http://localhost:5173", "/courses/courses/"),
            "http://localhost:5173/api/courses/courses/"
        );
        assert_eq!(
            join_api_url("https://example.com/", "auth/login/"),
            "https://example.com/api/auth/login/"
        );
        assert_eq!(join_api_url("", "/auth/me/"), "/api/auth/me/");
    }
}
