//! HTTP transport for form submissions
//!
//! Posts the JSON payload with `reqwest` and maps the outcome onto
//! [`SubmitError`].

use super::error::SubmitError;
use super::payload::SubmissionPayload;
use super::traits::SubmitTransport;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// `reqwest`-backed [`SubmitTransport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Value, SubmitError> {
        let response = self
            .client
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Submission request failed: {e}");
                SubmitError::Network {
                    detail: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Submission rejected by endpoint");
            return Err(SubmitError::Http {
                status: status.as_u16(),
            });
        }

        // The endpoint already accepted the submission; a broken body must not
        // turn that into a failure the user would resubmit
        match response.bytes().await {
            Ok(body) => Ok(echo_body(&body, payload)),
            Err(e) => {
                tracing::warn!("Accepted, but failed to read the response body: {e}");
                Ok(echo_body(&[], payload))
            }
        }
    }
}

/// The endpoint's JSON body, or the submitted payload when it sent nothing back
fn echo_body(body: &[u8], payload: &SubmissionPayload) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::to_value(payload).unwrap_or_default();
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Service;
    use axum::{
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::net::TcpListener;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            full_name: "Jane O'Brien".to_string(),
            email: "jane@example.com".to_string(),
            company_name: "Acme Studio".to_string(),
            services: vec![Service::WebDev],
            budget_usd: None,
            project_start_date: NaiveDate::from_ymd_opt(2027, 1, 4).unwrap(),
            accept_terms: true,
        }
    }

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/inquiries")
    }

    fn transport() -> HttpTransport {
        HttpTransport::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_echoes_json_body() {
        let router = Router::new().route(
            "/inquiries",
            post(|Json(body): Json<Value>| async move { Json(json!({ "received": body })) }),
        );
        let endpoint = serve(router).await;

        let echoed = transport().post_json(&endpoint, &payload()).await.unwrap();

        assert_eq!(echoed["received"]["fullName"], "Jane O'Brien");
        assert_eq!(echoed["received"]["services"], json!(["Web Dev"]));
        assert_eq!(echoed["received"]["projectStartDate"], "2027-01-04");
        assert!(echoed["received"].get("budgetUsd").is_none());
    }

    #[tokio::test]
    async fn test_sends_json_content_type() {
        let router = Router::new().route(
            "/inquiries",
            post(|headers: HeaderMap| async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "contentType": content_type }))
            }),
        );
        let endpoint = serve(router).await;

        let echoed = transport().post_json(&endpoint, &payload()).await.unwrap();
        assert_eq!(echoed["contentType"], "application/json");
    }

    #[tokio::test]
    async fn test_empty_success_body_echoes_payload() {
        let router = Router::new().route("/inquiries", post(|| async { StatusCode::NO_CONTENT }));
        let endpoint = serve(router).await;

        let echoed = transport().post_json(&endpoint, &payload()).await.unwrap();
        assert_eq!(echoed, serde_json::to_value(payload()).unwrap());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http_status() {
        let router = Router::new().route(
            "/inquiries",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let endpoint = serve(router).await;

        let err = transport().post_json(&endpoint, &payload()).await.unwrap_err();
        assert_eq!(err, SubmitError::Http { status: 500 });
    }

    #[tokio::test]
    async fn test_not_found_maps_to_http_status() {
        let router = Router::new();
        let endpoint = serve(router).await;

        let err = transport().post_json(&endpoint, &payload()).await.unwrap_err();
        assert_eq!(err, SubmitError::Http { status: 404 });
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport()
            .post_json(&format!("http://{addr}/inquiries"), &payload())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Network { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let router = Router::new().route(
            "/inquiries",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                StatusCode::OK
            }),
        );
        let endpoint = serve(router).await;

        let transport = HttpTransport::new(Duration::from_millis(100)).unwrap();
        let err = transport.post_json(&endpoint, &payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network { .. }));
    }

    #[tokio::test]
    async fn test_truncated_success_body_still_succeeds() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Read the whole request before answering
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            // Promise 100 bytes, send a few, then hang up
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"id\"")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let echoed = transport()
            .post_json(&format!("http://{addr}/inquiries"), &payload())
            .await
            .unwrap();
        assert_eq!(echoed, serde_json::to_value(payload()).unwrap());
    }

    #[test]
    fn test_echo_body_keeps_plain_text() {
        let echoed = echo_body(b"thanks!", &payload());
        assert_eq!(echoed, Value::String("thanks!".to_string()));
    }
}
