use std::sync::{Arc, Mutex};

use reqwest::{Client, Method, Proxy, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use super::credentials::CredentialStore;
use super::models::{CsrfTokenResponse, ErrorBody};
use crate::config::ApiConfig;
use crate::{Error, Result};

pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP client for the compliance backend
///
/// Every request carries a fresh request id and, when the credential store
/// holds one, a bearer token. State-changing requests additionally carry a
/// CSRF token which is fetched lazily and cached until the server rejects it.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
    csrf_token: Mutex<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = Self::build_client(config)?;
        let base_url = normalize_base(&config.base_url)?;

        Ok(Self {
            client,
            base_url,
            credentials,
            csrf_token: Mutex::new(None),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(config: &ApiConfig) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .user_agent(concat!("complyviz/", env!("CARGO_PKG_VERSION")));

        if let Some(ref proxy) = config.proxy_url {
            check_proxy_scheme(proxy)?;
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for API requests");
        }

        builder.build().map_err(Error::Http)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Resolve a path relative to the base URL, keeping any base path prefix
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(Method::GET, url, None::<&()>).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, url, body).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn send_empty(&self, method: Method, url: Url) -> Result<()> {
        self.send(method, url, None::<&()>).await?;
        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response> {
        let mutating = is_state_changing(&method);
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, %url, %request_id, "API request");

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string());
        builder = self.authorize(builder)?;
        if mutating {
            let csrf = self.ensure_csrf().await?;
            builder = builder.header(CSRF_HEADER, csrf);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if mutating && status == StatusCode::FORBIDDEN {
            // Token may have rotated server-side; refetch on next write
            self.clear_csrf();
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%method, %url, status = status.as_u16(), "API request failed");
        Err(status_error(status.as_u16(), &body))
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self.credentials.get_token()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Fetch a CSRF token from the server, replacing any cached one
    pub async fn fetch_csrf_token(&self) -> Result<String> {
        let url = self.endpoint("auth/csrf-token")?;
        let builder = self
            .client
            .get(url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        let response = self.authorize(builder)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let parsed: CsrfTokenResponse = response.json().await?;
        self.store_csrf(Some(parsed.csrf_token.clone()))?;
        Ok(parsed.csrf_token)
    }

    async fn ensure_csrf(&self) -> Result<String> {
        if let Some(token) = self.cached_csrf()? {
            return Ok(token);
        }
        self.fetch_csrf_token().await
    }

    fn cached_csrf(&self) -> Result<Option<String>> {
        let guard = self
            .csrf_token
            .lock()
            .map_err(|_| Error::Other("csrf lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn store_csrf(&self, token: Option<String>) -> Result<()> {
        let mut guard = self
            .csrf_token
            .lock()
            .map_err(|_| Error::Other("csrf lock poisoned".to_string()))?;
        *guard = token;
        Ok(())
    }

    pub fn clear_csrf(&self) {
        if let Ok(mut guard) = self.csrf_token.lock() {
            *guard = None;
        }
    }
}

fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Only proxy schemes reqwest can actually tunnel through
fn check_proxy_scheme(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid proxy URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" | "socks5" | "socks5h" => Ok(()),
        other => Err(Error::Config(format!(
            "Unsupported proxy scheme '{}' in '{}'",
            other, raw
        ))),
    }
}

fn is_state_changing(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Map a non-success status and its body to an error
///
/// 401 and 403 both become [`Error::Forbidden`]. Other statuses keep the
/// server's `message` (or `error`) field when the body is JSON.
pub fn status_error(status: u16, body: &str) -> Error {
    if status == 401 || status == 403 {
        return Error::Forbidden;
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
        })
        .or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "request failed".to_string());

    Error::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::credentials::MemoryCredentials;

    fn client_for(base: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base.to_string(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, Arc::new(MemoryCredentials::new())).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let client = client_for("http://localhost:3000/api");
        assert_eq!(
            client.endpoint("/auth/login").unwrap().as_str(),
            "http://localhost:3000/api/auth/login"
        );
        assert_eq!(
            client.endpoint("questions").unwrap().as_str(),
            "http://localhost:3000/api/questions"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let client = client_for("https://example.com/v2/");
        assert_eq!(
            client.endpoint("answers").unwrap().as_str(),
            "https://example.com/v2/answers"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let result = ApiClient::new(&config, Arc::new(MemoryCredentials::new()));
        assert!(matches!(result, Err(Error::UrlParse(_))));
    }

    #[test]
    fn test_invalid_proxy() {
        let config = ApiConfig {
            proxy_url: Some("ftp://proxy.invalid".to_string()),
            ..ApiConfig::default()
        };
        let result = ApiClient::new(&config, Arc::new(MemoryCredentials::new()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_proxy_schemes() {
        assert!(check_proxy_scheme("http://127.0.0.1:7890").is_ok());
        assert!(check_proxy_scheme("socks5h://127.0.0.1:1080").is_ok());
        assert!(matches!(check_proxy_scheme("ftp://proxy.invalid"), Err(Error::Config(_))));
        assert!(matches!(check_proxy_scheme("not a url"), Err(Error::Config(_))));

        let config = ApiConfig {
            proxy_url: Some("http://127.0.0.1:7890".to_string()),
            ..ApiConfig::default()
        };
        assert!(ApiClient::new(&config, Arc::new(MemoryCredentials::new())).is_ok());
    }

    #[test]
    fn test_unauthorized_and_forbidden_are_uniform() {
        assert!(matches!(status_error(401, ""), Error::Forbidden));
        assert!(matches!(status_error(403, r#"{"message":"nope"}"#), Error::Forbidden));
    }

    #[test]
    fn test_status_error_messages() {
        match status_error(422, r#"{"message":"value must be yes or no"}"#) {
            Error::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "value must be yes or no");
            }
            other => panic!("unexpected {other:?}"),
        }
        match status_error(500, r#"{"error":"boom"}"#) {
            Error::Api { message, .. } => assert_eq!(message, "boom"),
            other => panic!("unexpected {other:?}"),
        }
        match status_error(502, "") {
            Error::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected {other:?}"),
        }
        match status_error(500, "plain text failure") {
            Error::Api { message, .. } => assert_eq!(message, "plain text failure"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_state_changing_methods() {
        assert!(!is_state_changing(&Method::GET));
        assert!(is_state_changing(&Method::POST));
        assert!(is_state_changing(&Method::DELETE));
    }
}
