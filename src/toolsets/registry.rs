//! The tool → toolset table.

use std::collections::{BTreeSet, HashMap};

use super::Toolset;

/// Built-in catalogue of every tool name and the toolset it belongs to.
///
/// Includes tools that are served by other deployments of the server; a name
/// being registered here does not imply a handler exists for it.
const BUILTIN_TOOLS: &[(&str, Toolset)] = &[
    // Public registry
    ("search_providers", Toolset::Registry),
    ("get_provider_details", Toolset::Registry),
    ("get_latest_provider_version", Toolset::Registry),
    ("get_provider_capabilities", Toolset::Registry),
    ("search_modules", Toolset::Registry),
    ("get_module_details", Toolset::Registry),
    ("get_latest_module_version", Toolset::Registry),
    ("search_policies", Toolset::Registry),
    ("get_policy_details", Toolset::Registry),
    // Private registry
    ("search_private_modules", Toolset::RegistryPrivate),
    ("get_private_module_details", Toolset::RegistryPrivate),
    ("search_private_providers", Toolset::RegistryPrivate),
    ("get_private_provider_details", Toolset::RegistryPrivate),
    // Workspaces, runs, variables
    ("list_terraform_orgs", Toolset::Terraform),
    ("list_terraform_projects", Toolset::Terraform),
    ("list_workspaces", Toolset::Terraform),
    ("get_workspace_details", Toolset::Terraform),
    ("create_workspace", Toolset::Terraform),
    ("create_no_code_workspace", Toolset::Terraform),
    ("update_workspace", Toolset::Terraform),
    ("delete_workspace_safely", Toolset::Terraform),
    ("list_runs", Toolset::Terraform),
    ("get_run_details", Toolset::Terraform),
    ("get_plan_details", Toolset::Terraform),
    ("get_plan_logs", Toolset::Terraform),
    ("get_plan_json_output", Toolset::Terraform),
    ("get_apply_details", Toolset::Terraform),
    ("get_apply_logs", Toolset::Terraform),
    ("create_run", Toolset::Terraform),
    ("action_run", Toolset::Terraform),
    ("list_workspace_variables", Toolset::Terraform),
    ("create_workspace_variable", Toolset::Terraform),
    ("update_workspace_variable", Toolset::Terraform),
    ("list_variable_sets", Toolset::Terraform),
    ("create_variable_set", Toolset::Terraform),
    ("create_variable_in_variable_set", Toolset::Terraform),
    ("delete_variable_in_variable_set", Toolset::Terraform),
    ("attach_variable_set_to_workspaces", Toolset::Terraform),
    ("detach_variable_set_from_workspaces", Toolset::Terraform),
    ("create_workspace_tags", Toolset::Terraform),
    ("read_workspace_tags", Toolset::Terraform),
    ("attach_policy_set_to_workspaces", Toolset::Terraform),
    ("get_token_permissions", Toolset::Terraform),
    ("list_stacks", Toolset::Terraform),
    ("get_stack_details", Toolset::Terraform),
    ("list_workspace_policy_sets", Toolset::Terraform),
];

/// Immutable lookup table from tool name to [`Toolset`].
///
/// Built once at start-up and shared by reference; there is no way to mutate
/// it after construction.
#[derive(Debug, Clone)]
pub struct ToolsetRegistry {
    tools: HashMap<String, Toolset>,
}

impl ToolsetRegistry {
    /// The registry of every tool this server family knows about.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_TOOLS.iter().map(|(name, toolset)| (*name, *toolset)))
    }

    /// Build a registry from explicit entries. A repeated name keeps its
    /// last toolset, so each name maps to exactly one toolset.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, Toolset)>) -> Self {
        Self {
            tools: entries
                .into_iter()
                .map(|(name, toolset)| (name.to_string(), toolset))
                .collect(),
        }
    }

    /// Look up which toolset a tool belongs to. `None` means the name is not
    /// registered.
    pub fn toolset_of(&self, tool_name: &str) -> Option<Toolset> {
        self.tools.get(tool_name).copied()
    }

    /// Every registered tool name.
    pub fn all_tool_names(&self) -> BTreeSet<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Check if a tool name is registered.
    pub fn contains(&self, tool_name: &str) -> bool {
        self.tools.contains_key(tool_name)
    }

    /// Registered tool names belonging to `toolset`, sorted.
    pub fn tools_in(&self, toolset: Toolset) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tools
            .iter()
            .filter(|(_, t)| **t == toolset)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolsetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
