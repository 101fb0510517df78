//! reqwest-backed implementation of [`TfeApi`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{ListPage, RunListOptions, TfeApi, TfeError, Workspace};
use crate::types::{ApplyId, OrganizationName, PlanId, WorkspaceId, WorkspaceName};

/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Connection settings for [`TfeClient`].
#[derive(Clone)]
pub struct TfeClientConfig {
    pub address: Url,
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for TfeClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfeClientConfig")
            .field("address", &self.address.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TfeClientConfig {
    /// Parse `address` and pair it with `token`, using [`DEFAULT_TIMEOUT`].
    pub fn new(address: &str, token: impl Into<String>) -> Result<Self, TfeError> {
        let address = Url::parse(address)
            .map_err(|e| TfeError::Config(format!("invalid address '{}': {}", address, e)))?;
        if address.cannot_be_a_base() {
            return Err(TfeError::Config(format!(
                "address '{}' cannot carry an API path",
                address
            )));
        }

        Ok(Self {
            address,
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the `/api/v2` endpoints used by the tools.
#[derive(Debug, Clone)]
pub struct TfeClient {
    client: Client,
    address: Url,
    /// Sent only to `/api/v2` endpoints, never to log archive URLs.
    authorization: header::HeaderValue,
}

impl TfeClient {
    pub fn new(config: TfeClientConfig) -> Result<Self, TfeError> {
        let mut authorization = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| TfeError::Config("invalid token format".to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(JSON_API_CONTENT_TYPE),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TfeError::Config(e.to_string()))?;

        Ok(Self {
            client,
            address: config.address,
            authorization,
        })
    }

    /// `<address>/api/v2/<segments...>`, with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.address.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v2"]).extend(segments);
        }
        url
    }

    /// Authenticated GET against the API.
    async fn get(&self, url: Url, what: &str) -> Result<Response, TfeError> {
        debug!(url = %url, "GET request");

        let request = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.authorization.clone());
        Self::send(request, what).await
    }

    async fn send(request: RequestBuilder, what: &str) -> Result<Response, TfeError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TfeError::from_response(status.as_u16(), what, &body))
    }

    /// Fetch a single resource and return its `data` member.
    async fn get_resource(&self, url: Url, what: &str) -> Result<Value, TfeError> {
        let mut document: Value = self.get(url, what).await?.json().await?;
        match document.get_mut("data").map(Value::take) {
            Some(data) if data.is_object() => Ok(data),
            _ => Err(TfeError::Decode(format!("{} response has no data object", what))),
        }
    }

    async fn get_page(&self, url: Url, what: &str) -> Result<ListPage, TfeError> {
        let document: Value = self.get(url, what).await?.json().await?;

        let items = match document.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(TfeError::Decode(format!("{} response has no data array", what))),
        };
        let pagination = document
            .get("meta")
            .and_then(|meta| meta.get("pagination"))
            .cloned();

        Ok(ListPage { items, pagination })
    }

    /// Download the logs referenced by a plan's or apply's `log-read-url`.
    async fn read_logs(&self, resource: &Value, what: &str) -> Result<String, TfeError> {
        let log_url = resource
            .get("attributes")
            .and_then(|attrs| attrs.get("log-read-url"))
            .and_then(Value::as_str)
            .ok_or_else(|| TfeError::Decode(format!("{} has no log-read-url", what)))?;
        let log_url = Url::parse(log_url)
            .map_err(|e| TfeError::Decode(format!("{} log-read-url: {}", what, e)))?;

        // The log URL is pre-signed and may live on another host.
        debug!(url = %log_url, "GET logs");
        let request = self.client.get(log_url);
        Ok(Self::send(request, what).await?.text().await?)
    }

    fn run_list_url(&self, segments: &[&str], options: &RunListOptions) -> Url {
        let mut url = self.endpoint(segments);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page[number]", &options.page_number.to_string())
                .append_pair("page[size]", &options.page_size.to_string());
            if let Some(status) = &options.status {
                query.append_pair("filter[status]", status);
            }
            if let Some(user) = &options.user {
                query.append_pair("search[user]", user);
            }
        }
        url
    }
}

#[async_trait]
impl TfeApi for TfeClient {
    async fn read_plan(&self, plan_id: &PlanId) -> Result<Value, TfeError> {
        let url = self.endpoint(&["plans", plan_id.as_str()]);
        self.get_resource(url, &format!("plan {}", plan_id)).await
    }

    async fn read_plan_json_output(&self, plan_id: &PlanId) -> Result<String, TfeError> {
        // Redirects to a short-lived archive URL; reqwest follows it.
        let url = self.endpoint(&["plans", plan_id.as_str(), "json-output"]);
        let what = format!("plan JSON output {}", plan_id);
        Ok(self.get(url, &what).await?.text().await?)
    }

    async fn read_plan_logs(&self, plan_id: &PlanId) -> Result<String, TfeError> {
        let plan = self.read_plan(plan_id).await?;
        self.read_logs(&plan, &format!("plan {}", plan_id)).await
    }

    async fn read_apply(&self, apply_id: &ApplyId) -> Result<Value, TfeError> {
        let url = self.endpoint(&["applies", apply_id.as_str()]);
        self.get_resource(url, &format!("apply {}", apply_id)).await
    }

    async fn read_apply_logs(&self, apply_id: &ApplyId) -> Result<String, TfeError> {
        let apply = self.read_apply(apply_id).await?;
        self.read_logs(&apply, &format!("apply {}", apply_id)).await
    }

    async fn read_workspace(
        &self,
        organization: &OrganizationName,
        workspace: &WorkspaceName,
    ) -> Result<Workspace, TfeError> {
        let url = self.endpoint(&[
            "organizations",
            organization.as_str(),
            "workspaces",
            workspace.as_str(),
        ]);
        let what = format!("workspace {}/{}", organization, workspace);
        let data = self.get_resource(url, &what).await?;

        let id = data
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| TfeError::Decode(format!("{} has no id", what)))?;
        let name = data
            .get("attributes")
            .and_then(|attrs| attrs.get("name"))
            .and_then(Value::as_str)
            .unwrap_or(workspace.as_str());

        Ok(Workspace {
            id: WorkspaceId::new(id),
            name: WorkspaceName::new(name),
        })
    }

    async fn list_runs(
        &self,
        workspace_id: &WorkspaceId,
        options: &RunListOptions,
    ) -> Result<ListPage, TfeError> {
        let url = self.run_list_url(&["workspaces", workspace_id.as_str(), "runs"], options);
        self.get_page(url, &format!("runs of workspace {}", workspace_id))
            .await
    }

    async fn list_runs_for_organization(
        &self,
        organization: &OrganizationName,
        options: &RunListOptions,
    ) -> Result<ListPage, TfeError> {
        let url = self.run_list_url(&["organizations", organization.as_str(), "runs"], options);
        self.get_page(url, &format!("runs of organization {}", organization))
            .await
    }
}
