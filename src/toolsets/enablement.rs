//! Deciding whether a tool may be listed or called.

use std::collections::BTreeSet;
use std::fmt;

use super::{ALL, INDIVIDUAL_TOOLS_MARKER, Toolset, ToolsetRegistry};

/// Which tools a session may see and call.
///
/// This is the typed form of an enabled-toolset list: the `all` sentinel,
/// a set of toolsets, or (behind the individual-tools marker) a set of
/// explicit tool names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enablement {
    /// Every tool, including names the registry does not know.
    All,
    /// Tools whose toolset is in the set.
    ByToolset(BTreeSet<Toolset>),
    /// Exactly the named tools, plus the marker itself: in list form the
    /// marker and the names are one flat membership set. Reserved names are
    /// not stored here.
    ByIndividualTools(BTreeSet<String>),
}

impl Enablement {
    /// Interpret an enabled-toolset list.
    ///
    /// `all` anywhere wins; otherwise the individual-tools marker anywhere
    /// turns every other entry into a tool name. Without either, entries that
    /// name no toolset are ignored.
    pub fn from_list<S: AsRef<str>>(list: &[S]) -> Self {
        let entries = || list.iter().map(|s| s.as_ref());

        if entries().any(|e| e == ALL) {
            return Enablement::All;
        }

        if entries().any(|e| e == INDIVIDUAL_TOOLS_MARKER) {
            return Enablement::ByIndividualTools(
                entries()
                    .filter(|e| *e != INDIVIDUAL_TOOLS_MARKER)
                    .map(str::to_string)
                    .collect(),
            );
        }

        Enablement::ByToolset(entries().filter_map(|e| e.parse().ok()).collect())
    }

    /// Enable the given toolsets.
    pub fn toolsets(toolsets: impl IntoIterator<Item = Toolset>) -> Self {
        Enablement::ByToolset(toolsets.into_iter().collect())
    }

    /// Enable exactly the given tool names.
    ///
    /// `all` and the marker are reserved and dropped: in list form `all`
    /// would enable everything, and the marker is always a member.
    pub fn individual_tools<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Enablement::ByIndividualTools(
            names
                .into_iter()
                .map(|n| n.as_ref().to_string())
                .filter(|n| !is_reserved(n))
                .collect(),
        )
    }

    /// Check if `tool_name` is enabled.
    ///
    /// Under [`Enablement::All`] this is true even for unregistered names.
    /// Under toolset mode an unregistered name is always denied.
    pub fn allows(&self, registry: &ToolsetRegistry, tool_name: &str) -> bool {
        match self {
            Enablement::All => true,
            Enablement::ByIndividualTools(names) => {
                tool_name == INDIVIDUAL_TOOLS_MARKER || names.contains(tool_name)
            }
            Enablement::ByToolset(toolsets) => registry
                .toolset_of(tool_name)
                .is_some_and(|toolset| toolsets.contains(&toolset)),
        }
    }

    /// The enabled-toolset list equivalent to this value.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Enablement::All => vec![ALL.to_string()],
            Enablement::ByToolset(toolsets) => {
                toolsets.iter().map(|t| t.as_str().to_string()).collect()
            }
            Enablement::ByIndividualTools(names) => {
                let names: Vec<&String> = names.iter().filter(|n| !is_reserved(n)).collect();
                super::build_individual_mode_list(&names)
            }
        }
    }
}

impl Default for Enablement {
    fn default() -> Self {
        Enablement::All
    }
}

impl fmt::Display for Enablement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enablement::All => f.write_str(ALL),
            Enablement::ByToolset(toolsets) => {
                let names: Vec<&str> = toolsets.iter().map(|t| t.as_str()).collect();
                write!(f, "toolsets [{}]", names.join(", "))
            }
            Enablement::ByIndividualTools(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "tools [{}]", names.join(", "))
            }
        }
    }
}

fn is_reserved(name: &str) -> bool {
    name == ALL || name == INDIVIDUAL_TOOLS_MARKER
}

/// Check if `tool_name` is enabled under an enabled-toolset list.
pub fn is_enabled<S: AsRef<str>>(
    registry: &ToolsetRegistry,
    tool_name: &str,
    enabled_list: &[S],
) -> bool {
    Enablement::from_list(enabled_list).allows(registry, tool_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolsets::build_individual_mode_list;

    #[test]
    fn test_all_allows_anything() {
        let registry = ToolsetRegistry::builtin();
        for name in ["list_runs", "not_a_tool", "", INDIVIDUAL_TOOLS_MARKER] {
            assert!(is_enabled(&registry, name, &[ALL]));
        }
    }

    #[test]
    fn test_all_wins_over_marker() {
        let registry = ToolsetRegistry::builtin();
        let list = [INDIVIDUAL_TOOLS_MARKER, "list_runs", ALL];
        assert!(is_enabled(&registry, "create_run", &list));
        assert_eq!(Enablement::from_list(&list), Enablement::All);
    }

    #[test]
    fn test_empty_list_denies_everything() {
        let registry = ToolsetRegistry::builtin();
        for name in registry.all_tool_names() {
            assert!(!is_enabled::<&str>(&registry, name, &[]));
        }
        assert!(!is_enabled::<&str>(&registry, "not_a_tool", &[]));
    }

    #[test]
    fn test_individual_mode() {
        let registry = ToolsetRegistry::builtin();
        let list = build_individual_mode_list(&["get_plan_details"]);
        assert!(is_enabled(&registry, "get_plan_details", &list));
        assert!(!is_enabled(&registry, "create_run", &list));
    }

    #[test]
    fn test_individual_mode_ignores_toolset_names() {
        let registry = ToolsetRegistry::builtin();
        let list = build_individual_mode_list(&["terraform"]);
        assert!(!is_enabled(&registry, "list_runs", &list));
    }

    #[test]
    fn test_individual_mode_membership_ignores_position() {
        let registry = ToolsetRegistry::builtin();
        let list = ["list_runs", INDIVIDUAL_TOOLS_MARKER];
        assert!(is_enabled(&registry, "list_runs", &list));
    }

    #[test]
    fn test_individual_mode_marker_is_a_member() {
        let registry = ToolsetRegistry::builtin();
        let list = [INDIVIDUAL_TOOLS_MARKER, "list_runs"];
        assert!(is_enabled(&registry, INDIVIDUAL_TOOLS_MARKER, &list));
        assert!(Enablement::from_list(&list).allows(&registry, INDIVIDUAL_TOOLS_MARKER));
        assert!(!is_enabled(&registry, INDIVIDUAL_TOOLS_MARKER, &["terraform"]));
    }

    #[test]
    fn test_individual_tools_drop_reserved_names() {
        let registry = ToolsetRegistry::builtin();
        let value = Enablement::individual_tools([ALL, "list_runs"]);
        assert_eq!(value, Enablement::individual_tools(["list_runs"]));
        assert_eq!(
            value.to_list(),
            vec![INDIVIDUAL_TOOLS_MARKER.to_string(), "list_runs".to_string()]
        );
        assert!(!value.allows(&registry, "get_plan_logs"));
        assert!(!value.allows(&registry, ALL));
    }

    #[test]
    fn test_toolset_mode() {
        let registry = ToolsetRegistry::builtin();
        let tool = "get_plan_logs";
        assert_eq!(registry.toolset_of(tool), Some(Toolset::Terraform));
        assert!(is_enabled(&registry, tool, &[Toolset::Terraform.as_str()]));
        assert!(!is_enabled(&registry, tool, &[Toolset::Registry.as_str()]));
        assert!(is_enabled(&registry, "search_modules", &["terraform", "registry"]));
    }

    #[test]
    fn test_toolset_mode_denies_unregistered() {
        let registry = ToolsetRegistry::builtin();
        let every = ["registry", "registry-private", "terraform"];
        assert!(!is_enabled(&registry, "not_a_tool", &every));
    }

    #[test]
    fn test_toolset_mode_ignores_unknown_entries() {
        let registry = ToolsetRegistry::builtin();
        assert_eq!(
            Enablement::from_list(&["terraform", "bogus"]),
            Enablement::toolsets([Toolset::Terraform])
        );
        assert!(!is_enabled(&registry, "search_modules", &["Registry"]));
    }

    #[test]
    fn test_list_round_trip_agrees() {
        let registry = ToolsetRegistry::builtin();
        let values = [
            Enablement::All,
            Enablement::toolsets([Toolset::Registry]),
            Enablement::individual_tools(["list_runs", "get_apply_logs"]),
            Enablement::ByToolset(BTreeSet::new()),
            Enablement::individual_tools([ALL, INDIVIDUAL_TOOLS_MARKER, "list_runs"]),
        ];
        let mut names: Vec<&str> = registry.all_tool_names().into_iter().collect();
        names.extend(["not_a_tool", ALL, INDIVIDUAL_TOOLS_MARKER]);

        for value in values {
            let list = value.to_list();
            assert_eq!(Enablement::from_list(&list), value);
            for name in &names {
                assert_eq!(
                    value.allows(&registry, name),
                    is_enabled(&registry, name, &list),
                    "disagreement for {name} under {value}"
                );
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Enablement::All.to_string(), "all");
        assert_eq!(
            Enablement::toolsets([Toolset::Terraform, Toolset::Registry]).to_string(),
            "toolsets [registry, terraform]"
        );
        assert_eq!(
            Enablement::individual_tools(["list_runs"]).to_string(),
            "tools [list_runs]"
        );
    }
}
