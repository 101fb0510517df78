//! Server configuration, populated from command-line flags and environment.

use std::time::Duration;

use clap::Args;
use tracing::{info, warn};

use crate::client::{DEFAULT_ADDRESS, TfeClientConfig, TfeError};
use crate::toolsets::{ALL, Enablement, Toolset, ToolsetRegistry, parse_tool_names};

/// Settings shared by every transport.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address of HCP Terraform or Terraform Enterprise
    #[arg(long = "tfe-address", env = "TFE_ADDRESS", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// API token used for every request
    #[arg(long = "tfe-token", env = "TFE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Timeout for a single API request, in seconds
    #[arg(long = "timeout", env = "TFE_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Comma-separated toolsets to enable (registry, registry-private, terraform, or all)
    #[arg(
        long,
        env = "TFE_TOOLSETS",
        value_delimiter = ',',
        default_value = ALL
    )]
    pub toolsets: Vec<String>,

    /// Comma-separated tool names to enable; overrides --toolsets
    #[arg(long, env = "TFE_TOOLS", value_delimiter = ',')]
    pub tools: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: None,
            timeout_secs: 30,
            toolsets: vec![ALL.to_string()],
            tools: Vec::new(),
        }
    }
}

/// Enablement chosen from configuration, plus the names that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnablement {
    pub enablement: Enablement,
    /// Unknown tool names (individual mode) or unknown toolset names.
    pub rejected: Vec<String>,
}

impl ServerConfig {
    /// Decide which tools this server exposes.
    ///
    /// A non-empty `tools` list selects individual-tool mode and ignores
    /// `toolsets`. Unknown names are reported in `rejected` and never fatal;
    /// individual mode with no valid names enables nothing.
    pub fn resolve_enablement(&self, registry: &ToolsetRegistry) -> ResolvedEnablement {
        let tools = trimmed(&self.tools);
        if !tools.is_empty() {
            let selection = parse_tool_names(registry, &tools);
            info!(tools = ?selection.valid, "individual tool mode");
            return ResolvedEnablement {
                enablement: Enablement::individual_tools(selection.valid),
                rejected: selection.invalid,
            };
        }

        let names = trimmed(&self.toolsets);
        if names.is_empty() || names.iter().any(|name| name == ALL) {
            return ResolvedEnablement {
                enablement: Enablement::All,
                rejected: Vec::new(),
            };
        }

        let mut toolsets = Vec::new();
        let mut rejected = Vec::new();
        for name in names {
            match name.parse::<Toolset>() {
                Ok(toolset) => toolsets.push(toolset),
                Err(_) => {
                    if !rejected.contains(&name) {
                        rejected.push(name);
                    }
                }
            }
        }

        if toolsets.is_empty() {
            warn!(rejected = ?rejected, "no valid toolsets configured; no tools will be exposed");
        }

        ResolvedEnablement {
            enablement: Enablement::toolsets(toolsets),
            rejected,
        }
    }

    /// Client configuration, or `None` when no token is set.
    pub fn client_config(&self) -> Result<Option<TfeClientConfig>, TfeError> {
        let Some(token) = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let config = TfeClientConfig::new(&self.address, token)?
            .with_timeout(Duration::from_secs(self.timeout_secs));
        Ok(Some(config))
    }
}

fn trimmed(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
