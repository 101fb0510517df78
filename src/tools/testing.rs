//! In-memory `TfeApi` used by the handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::registry::ToolContext;
use crate::client::{
    ClientProvider, ClientUnavailable, ListPage, RunListOptions, StaticClientProvider, TfeApi,
    TfeError, Workspace,
};
use crate::types::{ApplyId, OrganizationName, PlanId, WorkspaceId, WorkspaceName};

/// Which list endpoint a call went to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunScope {
    Workspace(String),
    Organization(String),
}

/// Fake API. Anything not seeded answers with `TfeError::NotFound`.
#[derive(Default)]
pub struct FakeTfe {
    plans: HashMap<String, Value>,
    plan_json: HashMap<String, String>,
    plan_logs: HashMap<String, String>,
    applies: HashMap<String, Value>,
    apply_logs: HashMap<String, String>,
    workspaces: HashMap<(String, String), Workspace>,
    runs: Option<ListPage>,
    hang: bool,
    pub calls: AtomicUsize,
    pub run_requests: Mutex<Vec<(RunScope, RunListOptions)>>,
}

impl FakeTfe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, id: &str, data: Value) -> Self {
        self.plans.insert(id.to_string(), data);
        self
    }

    pub fn with_plan_json(mut self, id: &str, json: &str) -> Self {
        self.plan_json.insert(id.to_string(), json.to_string());
        self
    }

    pub fn with_plan_logs(mut self, id: &str, logs: &str) -> Self {
        self.plan_logs.insert(id.to_string(), logs.to_string());
        self
    }

    pub fn with_apply(mut self, id: &str, data: Value) -> Self {
        self.applies.insert(id.to_string(), data);
        self
    }

    pub fn with_apply_logs(mut self, id: &str, logs: &str) -> Self {
        self.apply_logs.insert(id.to_string(), logs.to_string());
        self
    }

    pub fn with_workspace(mut self, org: &str, name: &str, id: &str) -> Self {
        self.workspaces.insert(
            (org.to_string(), name.to_string()),
            Workspace {
                id: WorkspaceId::new(id),
                name: WorkspaceName::new(name),
            },
        );
        self
    }

    pub fn with_runs(mut self, page: ListPage) -> Self {
        self.runs = Some(page);
        self
    }

    /// Every call waits forever.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
    }

    fn lookup<T: Clone>(map: &HashMap<String, T>, id: &str, what: &str) -> Result<T, TfeError> {
        map.get(id)
            .cloned()
            .ok_or_else(|| TfeError::NotFound(format!("{} {}", what, id)))
    }

    fn record_runs(&self, scope: RunScope, options: &RunListOptions) -> Result<ListPage, TfeError> {
        if let Ok(mut requests) = self.run_requests.lock() {
            requests.push((scope, options.clone()));
        }
        self.runs.clone().ok_or_else(|| TfeError::Api {
            status: 500,
            message: "runs unavailable".to_string(),
        })
    }
}

#[async_trait]
impl TfeApi for FakeTfe {
    async fn read_plan(&self, plan_id: &PlanId) -> Result<Value, TfeError> {
        self.enter().await;
        Self::lookup(&self.plans, plan_id.as_str(), "plan")
    }

    async fn read_plan_json_output(&self, plan_id: &PlanId) -> Result<String, TfeError> {
        self.enter().await;
        Self::lookup(&self.plan_json, plan_id.as_str(), "plan JSON output")
    }

    async fn read_plan_logs(&self, plan_id: &PlanId) -> Result<String, TfeError> {
        self.enter().await;
        Self::lookup(&self.plan_logs, plan_id.as_str(), "plan logs")
    }

    async fn read_apply(&self, apply_id: &ApplyId) -> Result<Value, TfeError> {
        self.enter().await;
        Self::lookup(&self.applies, apply_id.as_str(), "apply")
    }

    async fn read_apply_logs(&self, apply_id: &ApplyId) -> Result<String, TfeError> {
        self.enter().await;
        Self::lookup(&self.apply_logs, apply_id.as_str(), "apply logs")
    }

    async fn read_workspace(
        &self,
        organization: &OrganizationName,
        workspace: &WorkspaceName,
    ) -> Result<Workspace, TfeError> {
        self.enter().await;
        let key = (organization.to_string(), workspace.to_string());
        self.workspaces
            .get(&key)
            .cloned()
            .ok_or_else(|| TfeError::NotFound(format!("workspace {}", workspace)))
    }

    async fn list_runs(
        &self,
        workspace_id: &WorkspaceId,
        options: &RunListOptions,
    ) -> Result<ListPage, TfeError> {
        self.enter().await;
        self.record_runs(RunScope::Workspace(workspace_id.to_string()), options)
    }

    async fn list_runs_for_organization(
        &self,
        organization: &OrganizationName,
        options: &RunListOptions,
    ) -> Result<ListPage, TfeError> {
        self.enter().await;
        self.record_runs(RunScope::Organization(organization.to_string()), options)
    }
}

/// A context whose provider always hands out `fake`.
pub fn context_with(fake: Arc<FakeTfe>) -> ToolContext {
    ToolContext::new(
        Arc::new(StaticClientProvider::new(fake)),
        CancellationToken::new(),
    )
}

/// A context with no client.
pub fn context_without_client() -> ToolContext {
    ToolContext::new(
        Arc::new(StaticClientProvider::unavailable("no TFE_TOKEN configured")),
        CancellationToken::new(),
    )
}

/// Provider that counts how often a client was requested.
#[derive(Default)]
pub struct CountingProvider {
    pub requests: AtomicUsize,
}

impl ClientProvider for CountingProvider {
    fn client(&self) -> Result<Arc<dyn TfeApi>, ClientUnavailable> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeTfe::new()))
    }
}

pub fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => panic!("test arguments must be an object"),
    }
}
