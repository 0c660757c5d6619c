//! API client for the template service

use std::fmt;
use std::str::FromStr;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::token::BearerToken;

/// API client for the template endpoints.
///
/// The bearer token is fixed at construction and sent verbatim on every
/// request, even when empty. No timeout is configured.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: BearerToken,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: BearerToken) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("tmpl-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into();
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ApiError::InvalidEndpoint {
                url: base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Endpoint URL with each segment percent-encoded onto the base path
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    fn authenticated_request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        self.client
            .request(method, url)
            .bearer_auth(self.token.as_str())
    }

    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(ApiError::Decode)
    }

    /// `GET /templates`
    pub async fn list_templates(&self) -> ApiResult<Vec<Template>> {
        debug!(base_url = %self.base_url, "listing templates");
        let response = self
            .authenticated_request(Method::GET, &["templates"])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// `POST /templates`. The response body is ignored.
    pub async fn create_template(&self, request: &NewTemplate) -> ApiResult<()> {
        debug!(base_url = %self.base_url, name = %request.name, "creating template");
        let response = self
            .authenticated_request(Method::POST, &["templates"])
            .json(request)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// `GET /templates/{id}`
    pub async fn get_template(&self, id: &TemplateId) -> ApiResult<Template> {
        debug!(base_url = %self.base_url, %id, "fetching template");
        let id = id.to_string();
        let response = self
            .authenticated_request(Method::GET, &["templates", &id])
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

/// Server-assigned template identifier. Opaque to this client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateId::Number(n) => write!(f, "{}", n),
            TemplateId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for TemplateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(TemplateId::Number)
            .unwrap_or_else(|_| TemplateId::Text(s.to_string())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /templates`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTemplate {
    pub name: String,
    pub html: String,
}
