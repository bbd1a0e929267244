use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, Response, Url};
use ring_logging::{ring_debug, ring_trace};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Retrieves the raw payload of one source. Implementations must not retry.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// HTTP(S) fetcher over one shared client. Redirects are followed by hand;
/// every hop counts against `redirect_limit` for that request only.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Sends the request and follows redirects up to the configured limit.
    async fn follow(&self, start: Url) -> Result<(Response, usize), FetchError> {
        let mut current = start;
        let mut hops = 0;
        loop {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(map_reqwest_error)?;
            if !response.status().is_redirection() {
                return Ok((response, hops));
            }
            // A redirect without a usable Location is reported as a status failure.
            let Some(target) = redirect_target(&current, &response) else {
                return Ok((response, hops));
            };
            if hops == self.settings.redirect_limit {
                return Err(FetchError::new(
                    FailureKind::RedirectLimitExceeded,
                    format!("more than {} redirects", self.settings.redirect_limit),
                ));
            }
            hops += 1;
            ring_trace!("redirect {} -> {}", current, target);
            current = target;
        }
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let limit = self.settings.max_bytes;
        if let Some(declared) = response.content_length().filter(|len| *len > limit) {
            return Err(too_large(limit, declared));
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let received = (body.len() + chunk.len()) as u64;
            if received > limit {
                return Err(too_large(limit, received));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let start = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let (response, redirect_count) = self.follow(start).await?;

        let status = response.status();
        if !status.is_success() {
            ring_debug!("{} answered {}", url, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = self.read_body(response).await?;
        ring_trace!("fetched {} bytes from {}", bytes.len(), final_url);

        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                redirect_count,
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn redirect_target(base: &Url, response: &Response) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    base.join(location).ok()
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
