use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use customerhub_core::config::ApiConfig;
use customerhub_core::{ClientError, Customer, CustomerApi, RegisterRequest};

/// `{ data: Customer[] }`
#[derive(Debug, Deserialize)]
struct CustomerEnvelope {
    #[serde(default)]
    data: Vec<Customer>,
}

/// `{ message: string }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// reqwest-backed client for the registration backend
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpApi {
    pub fn new(config: &ApiConfig, user_agent: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }
        // Keep any path prefix when joining endpoint paths.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let request_timeout = Duration::from_secs(config.request_timeout_seconds);
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            request_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

fn map_send_error(err: reqwest::Error, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(timeout.as_millis() as u64)
    } else {
        ClientError::Network(err.to_string())
    }
}

#[async_trait]
impl CustomerApi for HttpApi {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn liveness(&self, timeout: Duration) -> Result<(), ClientError> {
        let start = Instant::now();
        debug!(url = %self.base_url, "liveness probe");

        let resp = self
            .client
            .get(self.base_url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout))?;

        let status = resp.status().as_u16();
        debug!(status, elapsed_ms = start.elapsed().as_millis() as u64, "liveness response");
        if status != 200 {
            return Err(ClientError::Status(status));
        }
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        let url = self.endpoint("api/register")?;
        debug!(url = %url, email = %request.form.email, "submitting registration");

        let resp = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.request_timeout))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        warn!(url = %url, status = status.as_u16(), message = ?message, "registration rejected");

        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn all_customers(&self) -> Result<Vec<Customer>, ClientError> {
        let url = self.endpoint("api/allcustomer")?;
        debug!(url = %url, "fetching customers");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.request_timeout))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let envelope: CustomerEnvelope = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customerhub_core::{DeviceInfo, DeviceType, OperatingSystem, RegistrationForm};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Answers a single HTTP request with a canned response and hands back
    /// the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn api(base_url: &str) -> HttpApi {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        HttpApi::new(&config, "customerhub-test").unwrap()
    }

    fn request() -> RegisterRequest {
        RegisterRequest {
            form: RegistrationForm {
                full_name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                ..RegistrationForm::default()
            },
            device_info: DeviceInfo {
                browser_name: "Firefox".into(),
                browser_version: "115.0".into(),
                device_type: DeviceType::Desktop,
                os: OperatingSystem::Windows,
                raw_user_agent: "customerhub-test".into(),
            },
        }
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HttpApi::new(&config, "ua"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let api = api("https://example.com/backend");
        assert_eq!(api.base_url().as_str(), "https://example.com/backend/");
        assert_eq!(
            api.endpoint("api/register").unwrap().as_str(),
            "https://example.com/backend/api/register"
        );
    }

    #[tokio::test]
    async fn test_liveness_requires_200() {
        let (base, _) = serve_once("200 OK", "ok").await;
        assert!(api(&base).liveness(Duration::from_secs(5)).await.is_ok());

        let (base, _) = serve_once("201 Created", "{}").await;
        assert!(matches!(
            api(&base).liveness(Duration::from_secs(5)).await,
            Err(ClientError::Status(201))
        ));
    }

    #[tokio::test]
    async fn test_register_posts_form_and_device_info() {
        let (base, raw) = serve_once("201 Created", "{}").await;
        api(&base).register(&request()).await.unwrap();

        let raw = raw.await.unwrap();
        assert!(raw.starts_with("POST /api/register"));
        assert!(raw.contains("\"fullName\":\"Asha Rao\""));
        assert!(raw.contains("\"deviceInfo\":{"));
        assert!(raw.contains("\"browser\":\"Firefox 115.0\""));
    }

    #[tokio::test]
    async fn test_register_surfaces_server_message() {
        let (base, _) = serve_once("400 Bad Request", r#"{"message":"Email already exists"}"#).await;
        let err = api(&base).register(&request()).await.unwrap_err();
        assert_eq!(err.server_message(), Some("Email already exists"));
    }

    #[tokio::test]
    async fn test_register_without_message_body() {
        let (base, _) = serve_once("500 Internal Server Error", "oops").await;
        let err = api(&base).register(&request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 500, message: None }));
    }

    #[tokio::test]
    async fn test_all_customers_unwraps_data() {
        let (base, raw) = serve_once(
            "200 OK",
            r#"{"data":[{"id":1,"full_name":"Asha Rao"},{"id":2,"full_name":"Ravi Kumar"}]}"#,
        )
        .await;
        let customers = api(&base).all_customers().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].full_name, "Asha Rao");
        assert_eq!(customers[1].id, "2");
        assert!(raw.await.unwrap().starts_with("GET /api/allcustomer"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = api(&format!("http://{}", addr))
            .liveness(Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
