//! Toolset registration and enablement.
//!
//! Every tool the server knows about belongs to exactly one toolset. Operators
//! enable tools either by toolset (`--toolsets terraform`), all at once
//! (`--toolsets all`), or one by one (`--tools list_runs,get_plan_logs`).
//!
//! - [`ToolsetRegistry`] is the immutable tool → toolset table.
//! - [`parse_tool_names`] / [`build_individual_mode_list`] handle the
//!   individual-tool selection.
//! - [`Enablement`] / [`is_enabled`] decide whether a tool may be listed or
//!   called.

mod enablement;
mod registry;
mod selector;

pub use enablement::{Enablement, is_enabled};
pub use registry::ToolsetRegistry;
pub use selector::{ToolNameSelection, build_individual_mode_list, parse_tool_names};

use std::fmt;
use std::str::FromStr;

/// Reserved entry that enables every tool, registered or not.
pub const ALL: &str = "all";

/// Reserved entry switching an enabled list into individual-tool mode.
///
/// When present, the remaining entries are tool names, not toolset names.
pub const INDIVIDUAL_TOOLS_MARKER: &str = "__individual_tools__";

/// A named, fixed grouping of tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Toolset {
    /// Public Terraform Registry: providers, modules, policies.
    Registry,
    /// Private registry of an HCP Terraform / TFE organization.
    RegistryPrivate,
    /// HCP Terraform / TFE workspaces, runs, variables.
    Terraform,
}

impl Toolset {
    /// Every built-in toolset, in declaration order.
    pub const ALL: [Toolset; 3] = [Toolset::Registry, Toolset::RegistryPrivate, Toolset::Terraform];

    /// The name used on the command line and in enabled lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Toolset::Registry => "registry",
            Toolset::RegistryPrivate => "registry-private",
            Toolset::Terraform => "terraform",
        }
    }
}

impl fmt::Display for Toolset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known toolset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToolset(pub String);

impl fmt::Display for UnknownToolset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown toolset: {}", self.0)
    }
}

impl std::error::Error for UnknownToolset {}

impl FromStr for Toolset {
    type Err = UnknownToolset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Toolset::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownToolset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolset_names_round_trip() {
        for toolset in Toolset::ALL {
            assert_eq!(toolset.as_str().parse::<Toolset>(), Ok(toolset));
            assert_eq!(toolset.to_string(), toolset.as_str());
        }
    }

    #[test]
    fn test_toolset_parse_is_exact() {
        assert!("Terraform".parse::<Toolset>().is_err());
        assert!(" terraform".parse::<Toolset>().is_err());
        assert_eq!(
            "nope".parse::<Toolset>(),
            Err(UnknownToolset("nope".to_string()))
        );
    }

    #[test]
    fn test_sentinels_are_not_toolsets() {
        assert!(ALL.parse::<Toolset>().is_err());
        assert!(INDIVIDUAL_TOOLS_MARKER.parse::<Toolset>().is_err());
    }
}
