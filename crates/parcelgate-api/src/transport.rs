// Transport boundary for the FedEx XML gateway.
//
// The protocol layer only needs `submit(request, test) -> reply`. The
// `Transport` trait captures that, and `HttpTransport` implements it over
// `reqwest`, posting to the beta or production gateway.

use std::future::Future;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Production gateway.
pub const LIVE_URL: &str = "https://gateway.fedex.com:443/xml";
/// Beta gateway used when test mode is on.
pub const TEST_URL: &str = "https://gatewaybeta.fedex.com:443/xml";

static LIVE_ENDPOINT: LazyLock<Url> =
    LazyLock::new(|| Url::parse(LIVE_URL).expect("LIVE_URL is a valid URL"));
static TEST_ENDPOINT: LazyLock<Url> =
    LazyLock::new(|| Url::parse(TEST_URL).expect("TEST_URL is a valid URL"));

/// Sends a request document and returns the raw reply text.
///
/// Implementations carry no protocol knowledge; timeouts and TLS are
/// their own concern.
pub trait Transport: Send + Sync {
    fn submit(&self, request: &str, test: bool)
    -> impl Future<Output = Result<String, Error>> + Send;
}

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
}

/// Shared transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub live_url: Url,
    pub test_url: Url,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            live_url: LIVE_ENDPOINT.clone(),
            test_url: TEST_ENDPOINT.clone(),
        }
    }
}

impl TransportConfig {
    /// Point both endpoints at a single URL (mock servers, proxies).
    pub fn with_endpoint(mut self, url: Url) -> Self {
        self.live_url = url.clone();
        self.test_url = url;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("parcelgate/", env!("CARGO_PKG_VERSION")));

        if let TlsMode::CustomCa(path) = &self.tls {
            let cert_pem = std::fs::read(path)
                .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&cert_pem)
                .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// `Transport` over HTTPS POST.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    live_url: Url,
    test_url: Url,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
            live_url: config.live_url.clone(),
            test_url: config.test_url.clone(),
        })
    }

    /// Create a transport with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, live_url: Url, test_url: Url) -> Self {
        Self {
            http,
            live_url,
            test_url,
        }
    }

    /// The endpoint a request goes to for the given mode.
    pub fn endpoint(&self, test: bool) -> &Url {
        if test { &self.test_url } else { &self.live_url }
    }
}

impl Transport for HttpTransport {
    async fn submit(&self, request: &str, test: bool) -> Result<String, Error> {
        let url = self.endpoint(test).clone();
        debug!(%url, test, "POST request document");

        // The gateway rejects documents with embedded line breaks.
        let body = request.replace('\n', "");

        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = text.len(), "reply received");

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
