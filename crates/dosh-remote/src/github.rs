//! GitHub Contents API client.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dosh_config::remote::RemoteConfig;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, Result};
use crate::store::{RemoteStore, Resource, Revision};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("dosh/", env!("CARGO_PKG_VERSION"));

/// Media type returning the file body itself, used for files too large to inline.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// Remote store backed by a GitHub repository's Contents API.
///
/// The bearer token, when configured, is attached to every request.
#[derive(Debug, Clone)]
pub struct GitHubStore {
    client: reqwest::Client,
    api_url: Url,
    owner: String,
    repo: String,
    branch: String,
    message_prefix: String,
}

impl GitHubStore {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                RemoteError::Unauthorized("token contains invalid characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            tracing::warn!("No GitHub token configured, writes will be rejected");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(&config.api_url)
            .map_err(|e| RemoteError::InvalidPayload(format!("bad API url {}: {e}", config.api_url)))?;

        Ok(Self {
            client,
            api_url,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            message_prefix: config.committer_message_prefix.clone(),
        })
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}` with each segment escaped
    fn contents_url(&self, path: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RemoteError::InvalidPayload(format!("API url cannot be a base: {}", self.api_url))
            })?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    async fn get_contents(&self, path: &str) -> Result<Resource> {
        let url = self.contents_url(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .query(&[("ref", &self.branch)])
            .send()
            .await?;
        let response = check_status(response, path, None).await?;
        let body: ContentsResponse = response.json().await?;

        let content = match (&body.encoding, &body.content) {
            (Some(encoding), Some(content)) if encoding == "base64" && !content.is_empty() => {
                decode_base64(content)?
            }
            _ if body.size == 0 => Vec::new(),
            _ => {
                tracing::debug!("{} is {} bytes, requesting raw body", path, body.size);
                self.get_raw(url, path).await?
            }
        };

        Ok(Resource {
            revision: Revision::new(body.sha),
            content,
        })
    }

    async fn get_raw(&self, url: Url, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .query(&[("ref", &self.branch)])
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await?;
        let response = check_status(response, path, None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn put_contents(
        &self,
        path: &str,
        bytes: &[u8],
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        let url = self.contents_url(path)?;
        let verb = if expected.is_some() { "Update" } else { "Create" };
        let request = PutRequest {
            message: format!("{} {verb} {path}", self.message_prefix),
            content: STANDARD.encode(bytes),
            branch: &self.branch,
            sha: expected.map(Revision::as_str),
        };

        tracing::debug!("PUT {} ({} bytes, expected {:?})", url, bytes.len(), request.sha);

        let response = self.client.put(url).json(&request).send().await?;
        let response = check_status(response, path, Some(expected)).await?;
        let body: PutResponse = response.json().await?;

        Ok(Revision::new(body.content.sha))
    }
}

#[async_trait::async_trait]
impl RemoteStore for GitHubStore {
    async fn fetch_resource(&self, path: &str) -> Result<Resource> {
        self.get_contents(path).await
    }

    async fn put_resource(
        &self,
        path: &str,
        content: &str,
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        self.put_contents(path, content.as_bytes(), expected).await
    }

    async fn put_binary(
        &self,
        path: &str,
        bytes: &[u8],
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        self.put_contents(path, bytes, expected).await
    }
}

/// Map GitHub status codes onto the store's error kinds.
///
/// `write` is `Some(expected)` for PUT requests so that 422 can be told apart:
/// GitHub answers 422 when a file exists but no sha was supplied.
async fn check_status(
    response: reqwest::Response,
    path: &str,
    write: Option<Option<&Revision>>,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = status == StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|remaining| remaining.to_str().unwrap_or("1") == "0");
    let body = response.text().await.unwrap_or_default();

    let err = match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound {
            path: path.to_string(),
        },
        StatusCode::UNAUTHORIZED => RemoteError::Unauthorized(body),
        StatusCode::FORBIDDEN if !rate_limited => RemoteError::Unauthorized(body),
        StatusCode::CONFLICT => RemoteError::RevisionConflict {
            path: path.to_string(),
        },
        StatusCode::UNPROCESSABLE_ENTITY if matches!(write, Some(None)) => {
            RemoteError::AlreadyExists {
                path: path.to_string(),
            }
        }
        _ => RemoteError::Remote {
            status: status.as_u16(),
            body,
        },
    };

    tracing::debug!("{} failed: {}", path, err);
    Err(err)
}

/// GitHub wraps base64 at 60 columns
fn decode_base64(content: &str) -> Result<Vec<u8>> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| RemoteError::InvalidPayload(format!("bad base64 content: {e}")))
}

#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Serialize)]
struct PutRequest<'a> {
    message: String,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Deserialize)]
struct PutContent {
    sha: String,
}
