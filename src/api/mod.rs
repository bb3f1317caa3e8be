//! REST API Client
//!
//! Thin typed wrappers over the backend, organized by domain. Every call goes
//! through [`ApiClient`], which signs requests with the stored token, applies
//! the request timeout and maps failures to [`ApiError`].

mod admin;
mod auth;
mod community;
mod donations;
mod notifications;
mod payments;
mod piggy_banks;
mod projects;
mod settlements;
mod statistics;
mod users;

pub use admin::*;
pub use auth::*;
pub use community::*;
pub use donations::*;
pub use notifications::*;
pub use payments::*;
pub use piggy_banks::*;
pub use projects::*;
pub use settlements::*;
pub use statistics::*;
pub use users::*;

use std::time::Duration;

use futures::future::{select, Either};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{use_config, AppConfig};
use crate::error::{ApiError, ApiResult};
use crate::models::ApiEnvelope;
use crate::storage::SessionStore;

/// Characters left unescaped in query values (same set as `encodeURIComponent`)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Build `?a=1&b=2` from optional pairs; `None` and blank values are dropped
pub fn query_string<K: AsRef<str>>(pairs: &[(K, Option<String>)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            if value.is_empty() {
                return None;
            }
            Some(format!("{}={}", encode_component(key.as_ref()), encode_component(value)))
        })
        .collect();
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

/// File picked in the browser, read into memory for multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Read a `File` from an `<input type="file">`
    pub async fn from_file(file: &web_sys::File) -> ApiResult<Self> {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| ApiError::Validation(format!("파일을 읽을 수 없습니다: {:?}", e)))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(Self { name: file.name(), mime: file.type_(), bytes })
    }

    fn into_part(self) -> ApiResult<Part> {
        let part = Part::bytes(self.bytes).file_name(self.name);
        if self.mime.is_empty() {
            Ok(part)
        } else {
            part.mime_str(&self.mime).map_err(ApiError::from)
        }
    }
}

/// Multipart body: text fields plus files under named fields
#[derive(Debug, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, UploadFile)>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, file: UploadFile) -> Self {
        self.files.push((name.to_string(), file));
        self
    }

    pub fn files(mut self, name: &str, files: impl IntoIterator<Item = UploadFile>) -> Self {
        for file in files {
            self.files.push((name.to_string(), file));
        }
        self
    }

    fn into_form(self) -> ApiResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for (name, file) in self.files {
            form = form.part(name, file.into_part()?);
        }
        Ok(form)
    }
}

/// HTTP client bound to the configured API root
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match SessionStore::local().ok().and_then(|s| s.token()) {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// Multipart POST
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, body: MultipartBody) -> ApiResult<T> {
        let form = body.into_form()?;
        self.send(self.request(Method::POST, path).multipart(form)).await
    }

    /// GET whose payload comes inside `{ success, data, message, errorCode }`
    pub async fn get_enveloped<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        unwrap_envelope(self.get(path).await?)
    }

    pub async fn post_enveloped<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        unwrap_envelope(self.post(path, body).await?)
    }

    pub async fn post_empty_enveloped<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        unwrap_envelope(self.post_empty(path).await?)
    }

    pub async fn upload_enveloped<T: DeserializeOwned>(&self, path: &str, body: MultipartBody) -> ApiResult<T> {
        unwrap_envelope(self.upload(path, body).await?)
    }

    // ========================
    // Calls answered with a status line
    // ========================
    // These answer with plain text, an empty body or a payload-less
    // envelope; only the status (and an envelope's `success`) matters.

    pub async fn get_no_content(&self, path: &str) -> ApiResult<()> {
        self.send_no_content(self.request(Method::GET, path)).await
    }

    pub async fn post_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send_no_content(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_empty_no_content(&self, path: &str) -> ApiResult<()> {
        self.send_no_content(self.request(Method::POST, path)).await
    }

    pub async fn put_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send_no_content(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn put_empty_no_content(&self, path: &str) -> ApiResult<()> {
        self.send_no_content(self.request(Method::PUT, path)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send_no_content(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let body = self.send_raw(builder).await?;
        decode_body(&body)
    }

    async fn send_no_content(&self, builder: RequestBuilder) -> ApiResult<()> {
        let body = self.send_raw(builder).await?;
        decode_status(&body)
    }

    async fn send_raw(&self, builder: RequestBuilder) -> ApiResult<String> {
        let millis = self.timeout.as_millis().min(u32::MAX as u128) as u32;
        let request = Box::pin(async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, ApiError>((status, body))
        });
        let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));

        let (status, body) = match select(request, timer).await {
            Either::Left((result, _)) => result?,
            Either::Right(_) => {
                log::warn!("request timed out after {}ms", millis);
                return Err(ApiError::Timeout);
            }
        };

        if (200..300).contains(&status) {
            return Ok(body);
        }
        let err = ApiError::from_status(status, &body);
        log::debug!("request failed: {}", err);
        if err == ApiError::Unauthorized {
            handle_unauthorized();
        }
        Err(err)
    }
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<T>` work for 204s
pub fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(ApiError::from)
}

/// Failure reported inside a 200 envelope
fn envelope_error(message: String) -> ApiError {
    let message = if message.trim().is_empty() { "요청을 처리하지 못했습니다.".to_string() } else { message };
    ApiError::Server { status: 200, message }
}

/// Payload of a successful envelope; `success: false` or a missing payload is an error
pub fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> ApiResult<T> {
    match envelope.data {
        Some(data) if envelope.success => Ok(data),
        _ => Err(envelope_error(envelope.message)),
    }
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    message: String,
}

fn default_true() -> bool {
    true
}

/// Outcome of a 2xx call whose body carries no payload. Plain text and empty
/// bodies are success; a JSON object is read as an envelope.
pub fn decode_status(body: &str) -> ApiResult<()> {
    match serde_json::from_str::<StatusEnvelope>(body) {
        Ok(envelope) if !envelope.success => Err(envelope_error(envelope.message)),
        _ => Ok(()),
    }
}

/// Expired or invalid token: drop the session and start over at the login page
fn handle_unauthorized() {
    log::info!("session rejected by server, logging out");
    if let Ok(persist) = SessionStore::local() {
        persist.clear();
    }
    let Some(window) = web_sys::window() else { return };
    let location = window.location();
    if location.pathname().map(|p| p == "/login").unwrap_or(false) {
        return;
    }
    if let Err(e) = location.set_href("/login") {
        log::error!("redirect to /login failed: {:?}", e);
    }
}

/// Client for the configured API root
pub fn use_api() -> ApiClient {
    ApiClient::new(&use_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_drops_empty() {
        let pairs = vec![
            ("category", Some("Education".to_string())),
            ("keyword", None),
            ("status", Some("  ".to_string())),
            ("page", Some("0".to_string())),
        ];
        assert_eq!(query_string(&pairs), "?category=Education&page=0");
        assert_eq!(query_string::<&str>(&[]), "");
        assert_eq!(query_string(&[("keyword", None)]), "");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let pairs = [("keyword", Some("아동 복지&교육".to_string())), ("email", Some("a+b@x.com".to_string()))];
        assert_eq!(
            query_string(&pairs),
            "?keyword=%EC%95%84%EB%8F%99%20%EB%B3%B5%EC%A7%80%26%EA%B5%90%EC%9C%A1&email=a%2Bb%40x.com"
        );
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        let unit: () = decode_body("").unwrap();
        assert_eq!(unit, ());
        let none: Option<u32> = decode_body("  ").unwrap();
        assert_eq!(none, None);
        let err = decode_body::<u32>("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_unwrap_envelope() {
        let ok: ApiEnvelope<bool> = decode_body(r#"{"success":true,"data":true,"message":"ok"}"#).unwrap();
        assert_eq!(unwrap_envelope(ok), Ok(true));

        let failed: ApiEnvelope<bool> =
            decode_body(r#"{"success":false,"data":null,"message":"이미 가입된 이메일","errorCode":"DUPLICATE"}"#).unwrap();
        assert_eq!(
            unwrap_envelope(failed),
            Err(ApiError::Server { status: 200, message: "이미 가입된 이메일".to_string() })
        );

        let empty: ApiEnvelope<Vec<u64>> = decode_body(r#"{"success":true,"data":null,"message":"ok"}"#).unwrap();
        assert!(unwrap_envelope(empty).is_err());
    }

    #[test]
    fn test_plain_text_status_body_is_success() {
        assert_eq!(decode_status("알림을 읽음으로 표시했습니다."), Ok(()));
        assert_eq!(decode_status("결제가 취소되었습니다."), Ok(()));
        assert_eq!(decode_status(""), Ok(()));
    }

    #[test]
    fn test_status_body_envelope() {
        assert_eq!(decode_status(r#"{"success":true,"message":"삭제되었습니다","data":null}"#), Ok(()));
        assert_eq!(
            decode_status(r#"{"success":false,"message":"현재 비밀번호가 틀립니다"}"#),
            Err(ApiError::Server { status: 200, message: "현재 비밀번호가 틀립니다".to_string() })
        );
        assert!(matches!(decode_status(r#"{"success":false}"#), Err(ApiError::Server { .. })));
    }

    #[test]
    fn test_multipart_body_builder() {
        let file = UploadFile { name: "plan.pdf".to_string(), mime: "application/pdf".to_string(), bytes: vec![1, 2, 3] };
        let body = MultipartBody::default()
            .text("title", "급식 지원")
            .files("images", vec![file.clone(), file.clone()])
            .file("planDocument", file);
        assert_eq!(body.fields, vec![("title".to_string(), "급식 지원".to_string())]);
        assert_eq!(body.files.len(), 3);
        assert_eq!(body.files[2].0, "planDocument");
        assert_eq!(body.files[0].1.size(), 3);
    }
}
