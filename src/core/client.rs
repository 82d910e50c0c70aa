use crate::core::{ApiResponse, ClientError, ResponseInterceptor, Result, ServiceEndpoint};
use crate::domain::model::Service;
use reqwest::{Client, Method};
use serde::Serialize;
use std::sync::Arc;

/// Request-issuing handle bound to one backend service.
///
/// Every call goes through the shared interceptor exactly once, whether it
/// ends in a response or a failure.
#[derive(Clone)]
pub struct ServiceClient {
    endpoint: ServiceEndpoint,
    client: Client,
    interceptor: Arc<dyn ResponseInterceptor>,
}

impl ServiceClient {
    pub fn new(
        endpoint: ServiceEndpoint,
        client: Client,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> Self {
        Self {
            endpoint,
            client,
            interceptor,
        }
    }

    pub fn service(&self) -> Service {
        self.endpoint.service()
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn url(&self, path: &str) -> String {
        self.endpoint.url_for(path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    /// GET and decode the body as JSON.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path).await?.json()
    }

    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let outcome = self.execute(method, path, body).await;
        self.interceptor.intercept(outcome)
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        tracing::debug!("{} {} -> {}", method, url, self.service());

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            return Ok(ApiResponse::new(status, headers, body));
        }

        let raw = response.bytes().await?;
        Err(ClientError::Remote {
            url,
            status,
            payload: error_payload(&raw),
        })
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.service())
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// JSON body if it parses, the raw text otherwise. Empty bodies and falsy
/// JSON (`null`, `false`, `0`, `""`) carry no payload.
fn error_payload(raw: &[u8]) -> Option<serde_json::Value> {
    use serde_json::Value;

    if raw.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    match serde_json::from_slice(raw) {
        Ok(Value::Null) | Ok(Value::Bool(false)) => None,
        Ok(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Ok(Value::String(s)) if s.is_empty() => None,
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(raw).into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_payload_json() {
        assert_eq!(
            error_payload(br#"{"error":"unavailable"}"#),
            Some(json!({"error": "unavailable"}))
        );
    }

    #[test]
    fn test_error_payload_plain_text() {
        assert_eq!(
            error_payload(b"Service Unavailable"),
            Some(json!("Service Unavailable"))
        );
    }

    #[test]
    fn test_error_payload_empty() {
        assert_eq!(error_payload(b""), None);
        assert_eq!(error_payload(b"  \n"), None);
    }

    #[test]
    fn test_error_payload_falsy_json_falls_back_to_description() {
        assert_eq!(error_payload(b"null"), None);
        assert_eq!(error_payload(b"false"), None);
        assert_eq!(error_payload(b"0"), None);
        assert_eq!(error_payload(br#""""#), None);

        assert_eq!(error_payload(b"true"), Some(json!(true)));
        assert_eq!(error_payload(b"[]"), Some(json!([])));
    }
}
