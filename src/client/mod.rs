//! Client for the HCP Terraform / Terraform Enterprise API.
//!
//! Tool handlers talk to the API through the [`TfeApi`] trait and obtain an
//! implementation from a [`ClientProvider`], so tests can swap in a fake.

mod error;
mod http;

pub use error::{ClientUnavailable, TfeError};
pub use http::{DEFAULT_ADDRESS, DEFAULT_TIMEOUT, TfeClient, TfeClientConfig};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{ApplyId, OrganizationName, PlanId, WorkspaceId, WorkspaceName};

/// A workspace as far as run listing needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: WorkspaceName,
}

/// Filters and paging for run listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunListOptions {
    pub page_number: u32,
    pub page_size: u32,
    /// Comma-separated run statuses.
    pub status: Option<String>,
    /// VCS username to search for.
    pub user: Option<String>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    /// JSON:API resource objects from `data`.
    pub items: Vec<Value>,
    /// `meta.pagination` from the response, if the API sent it.
    pub pagination: Option<Value>,
}

/// Operations the tool handlers need from the Terraform API.
///
/// Single-resource reads return the JSON:API resource object (the `data`
/// member of the response document).
#[async_trait]
pub trait TfeApi: Send + Sync {
    async fn read_plan(&self, plan_id: &PlanId) -> Result<Value, TfeError>;

    /// The JSON execution plan, as the raw JSON text.
    async fn read_plan_json_output(&self, plan_id: &PlanId) -> Result<String, TfeError>;

    async fn read_plan_logs(&self, plan_id: &PlanId) -> Result<String, TfeError>;

    async fn read_apply(&self, apply_id: &ApplyId) -> Result<Value, TfeError>;

    async fn read_apply_logs(&self, apply_id: &ApplyId) -> Result<String, TfeError>;

    async fn read_workspace(
        &self,
        organization: &OrganizationName,
        workspace: &WorkspaceName,
    ) -> Result<Workspace, TfeError>;

    async fn list_runs(
        &self,
        workspace_id: &WorkspaceId,
        options: &RunListOptions,
    ) -> Result<ListPage, TfeError>;

    async fn list_runs_for_organization(
        &self,
        organization: &OrganizationName,
        options: &RunListOptions,
    ) -> Result<ListPage, TfeError>;
}

/// Hands out an API client for the current request.
pub trait ClientProvider: Send + Sync {
    fn client(&self) -> Result<Arc<dyn TfeApi>, ClientUnavailable>;
}

/// Provider backed by one client configured at start-up.
///
/// Without a configured client every request fails with
/// [`ClientUnavailable`] and the reason given at construction.
pub struct StaticClientProvider {
    client: Option<Arc<dyn TfeApi>>,
    unavailable_reason: String,
}

impl StaticClientProvider {
    /// Provider that always returns `client`.
    pub fn new(client: Arc<dyn TfeApi>) -> Self {
        Self {
            client: Some(client),
            unavailable_reason: String::new(),
        }
    }

    /// Provider that never has a client.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            client: None,
            unavailable_reason: reason.into(),
        }
    }

    /// Build the provider from client configuration. A missing token yields
    /// an unavailable provider rather than an error so that tools which do
    /// not need the API keep working.
    pub fn from_config(config: Option<TfeClientConfig>) -> Result<Self, TfeError> {
        match config {
            Some(config) => Ok(Self::new(Arc::new(TfeClient::new(config)?))),
            None => Ok(Self::unavailable("no TFE_TOKEN configured")),
        }
    }
}

impl ClientProvider for StaticClientProvider {
    fn client(&self) -> Result<Arc<dyn TfeApi>, ClientUnavailable> {
        self.client
            .clone()
            .ok_or_else(|| ClientUnavailable(self.unavailable_reason.clone()))
    }
}
