//! HTTP client for the campaign workflow API.
//!
//! Wraps `reqwest` with envelope checking and typed response decoding. Every
//! JSON endpoint answers `{"success": bool, "message": ..., ...}`; a `false`
//! flag surfaces as [`ClientError::Api`] carrying the server's message. The
//! body is read whatever the HTTP status, because the backend reports
//! rejections as JSON on 4xx/5xx responses.

use std::time::Duration;

use inflo_core::{
    AppConfig, CampaignAnalysis, CampaignData, CampaignDraft, CampaignSummary, InstagramProfile,
    SearchFilters,
};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::types::{
    ActionAck, AnalysisResponse, CampaignDataResponse, CampaignIdRequest, CampaignListResponse,
    CreatedCampaign, EmailRequest, InfluencerIdsRequest, InfluencerSearch, ProfileResponse,
    ProxiedImage, SearchRequest,
};

/// Client-side bound on the influencer search, which waits on slow
/// AI-driven analysis in the backend.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(45);

const DEFAULT_USER_AGENT: &str = "inflo/0.1 (campaign-workflow)";

/// Client for the campaign workflow REST API.
///
/// Use [`ApiClient::from_config`] in the binary or [`ApiClient::new`] to
/// point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    request_timeout: Option<Duration>,
    search_timeout: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` with the default search timeout and no
    /// bound on other requests.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::build(base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Ok(Self::build(&config.api_base_url, &config.user_agent)?
            .with_request_timeout(config.request_timeout())
            .with_search_timeout(config.search_timeout()))
    }

    fn build(base_url: &str, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to one trailing slash; `endpoint` pops the empty segment
        // and appends `api/...` below any path prefix.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            request_timeout: None,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    #[must_use]
    pub fn search_timeout(&self) -> Duration {
        self.search_timeout
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submits a new campaign.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the API answers `success: false`.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::Deserialize`] if the body is not the expected shape.
    pub async fn create_campaign(
        &self,
        draft: &CampaignDraft,
    ) -> Result<CreatedCampaign, ClientError> {
        let url = self.endpoint("api/create_campaign", &[]);
        let body = self.post_json(&url, draft, self.request_timeout).await?;
        Self::decode(body, "create_campaign")
    }

    /// Searches influencers for a campaign.
    ///
    /// The whole exchange is bounded by the search timeout; when it elapses
    /// the in-flight request is dropped and [`ClientError::Timeout`] returned.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Timeout`] if no complete response arrives in time.
    /// - Otherwise as for [`ApiClient::create_campaign`].
    pub async fn fetch_influencers(
        &self,
        campaign_id: &str,
        filters: &SearchFilters,
    ) -> Result<InfluencerSearch, ClientError> {
        let url = self.endpoint("api/fetch_influencers", &[]);
        let request = SearchRequest {
            campaign_id,
            filters,
        };
        let after = self.search_timeout;
        let body = tokio::time::timeout(after, self.post_json(&url, &request, None))
            .await
            .map_err(|_| {
                tracing::warn!(
                    campaign_id,
                    timeout_secs = after.as_secs(),
                    "influencer search cancelled after timeout"
                );
                ClientError::Timeout { after }
            })??;
        Self::decode(body, &format!("fetch_influencers(campaign_id={campaign_id})"))
    }

    /// Adds influencers to a campaign.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::create_campaign`].
    pub async fn add_influencers(
        &self,
        campaign_id: &str,
        influencer_ids: &[String],
    ) -> Result<ActionAck, ClientError> {
        let url = self.endpoint("api/add_influencers", &[]);
        let request = InfluencerIdsRequest {
            campaign_id,
            influencer_ids,
        };
        let body = self.post_json(&url, &request, self.request_timeout).await?;
        Self::decode(body, "add_influencers")
    }

    /// Sends outreach emails built from `email_template`.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::create_campaign`].
    pub async fn send_emails(
        &self,
        campaign_id: &str,
        influencer_ids: &[String],
        email_template: &str,
    ) -> Result<ActionAck, ClientError> {
        let url = self.endpoint("api/send_emails", &[]);
        let request = EmailRequest {
            campaign_id,
            influencer_ids,
            email_template,
        };
        let body = self.post_json(&url, &request, self.request_timeout).await?;
        Self::decode(body, "send_emails")
    }

    /// Requests a fresh analysis of a campaign.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::create_campaign`].
    pub async fn analyze_campaign(
        &self,
        campaign_id: &str,
    ) -> Result<CampaignAnalysis, ClientError> {
        let url = self.endpoint("api/analyze_campaign", &[]);
        let body = self
            .post_json(&url, &CampaignIdRequest { campaign_id }, self.request_timeout)
            .await?;
        let response: AnalysisResponse = Self::decode(body, "analyze_campaign")?;
        Ok(response.analysis)
    }

    /// Lists campaigns for the campaign picker.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::create_campaign`].
    pub async fn list_campaigns(&self) -> Result<Vec<CampaignSummary>, ClientError> {
        let url = self.endpoint("api/list_campaigns", &[]);
        let body = self.get_json(&url).await?;
        let response: CampaignListResponse = Self::decode(body, "list_campaigns")?;
        Ok(response.campaigns)
    }

    /// Loads previously stored influencers and analysis for a campaign.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::create_campaign`].
    pub async fn fetch_campaign_data(
        &self,
        campaign_id: &str,
    ) -> Result<CampaignData, ClientError> {
        let url = self.endpoint("api/fetch_campaign_data", &[("campaign_id", campaign_id)]);
        let body = self.get_json(&url).await?;
        let response: CampaignDataResponse =
            Self::decode(body, &format!("fetch_campaign_data(campaign_id={campaign_id})"))?;
        Ok(response.campaign_data)
    }

    /// Looks up a public Instagram profile. `username` is sent as given.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::create_campaign`].
    pub async fn instagram_profile(&self, username: &str) -> Result<InstagramProfile, ClientError> {
        let url = self.endpoint("api/instagram_profile", &[("username", username)]);
        let body = self.get_json(&url).await?;
        let response: ProfileResponse =
            Self::decode(body, &format!("instagram_profile(username={username})"))?;
        Ok(response.profile)
    }

    /// URL that relays `image_url` through the backend's image proxy.
    #[must_use]
    pub fn proxy_image_url(&self, image_url: &str) -> Url {
        self.endpoint("api/proxy_image", &[("url", image_url)])
    }

    /// Downloads an image through the backend's proxy.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the proxy answers with a JSON rejection.
    /// - [`ClientError::UnexpectedStatus`] for any other non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    pub async fn fetch_proxy_image(&self, image_url: &str) -> Result<ProxiedImage, ClientError> {
        let url = self.proxy_image_url(image_url);
        tracing::debug!(endpoint = %url, "GET proxied image");
        let response = self.apply_timeout(self.client.get(url.clone())).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(body) => Err(Self::rejection(&body)),
                Err(_) => Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                }),
            };
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        Ok(ProxiedImage {
            content_type,
            bytes,
        })
    }

    /// Builds an endpoint URL under the base with percent-encoded query
    /// parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // `build` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/'));
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    fn apply_timeout(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(endpoint = %url, "POST");
        let mut builder = self.client.post(url.clone()).json(body);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send().await?;
        Self::read_envelope(response, url).await
    }

    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(endpoint = %url, "GET");
        let response = self.apply_timeout(self.client.get(url.clone())).send().await?;
        Self::read_envelope(response, url).await
    }

    /// Reads the body as a JSON envelope and checks its `success` flag.
    ///
    /// A body that is not JSON is reported as [`ClientError::UnexpectedStatus`]
    /// on a non-2xx response and as [`ClientError::Deserialize`] otherwise.
    async fn read_envelope(
        response: Response,
        url: &Url,
    ) -> Result<serde_json::Value, ClientError> {
        let status = response.status();
        let text = response.text().await?;
        let body: serde_json::Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            Err(e) => {
                return Err(ClientError::Deserialize {
                    context: url.to_string(),
                    source: e,
                });
            }
        };

        if body.get("success").and_then(serde_json::Value::as_bool) == Some(true) {
            Ok(body)
        } else {
            tracing::debug!(endpoint = %url, status = status.as_u16(), "request rejected");
            Err(Self::rejection(&body))
        }
    }

    fn rejection(body: &serde_json::Value) -> ClientError {
        ClientError::Api {
            message: body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }
    }

    fn decode<T: DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, ClientError> {
        serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
