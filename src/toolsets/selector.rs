//! Parsing and validation of individually selected tool names.

use std::collections::HashSet;

use super::{INDIVIDUAL_TOOLS_MARKER, ToolsetRegistry};

/// Result of validating a raw list of tool names against the registry.
///
/// `valid` and `invalid` are disjoint, free of duplicates and blanks, and
/// both keep the order in which names first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolNameSelection {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl ToolNameSelection {
    /// Return `true` if every surviving name was recognised.
    pub fn is_all_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Split `raw_names` into registered and unregistered tool names.
///
/// Each name is trimmed; names that are empty after trimming are dropped.
/// Only the first occurrence of a name is kept.
pub fn parse_tool_names<S: AsRef<str>>(
    registry: &ToolsetRegistry,
    raw_names: &[S],
) -> ToolNameSelection {
    let mut seen = HashSet::new();
    let mut selection = ToolNameSelection::default();

    for raw in raw_names {
        let name = raw.as_ref().trim();
        if name.is_empty() || !seen.insert(name) {
            continue;
        }
        if registry.contains(name) {
            selection.valid.push(name.to_string());
        } else {
            selection.invalid.push(name.to_string());
        }
    }

    selection
}

/// Build an enabled list in individual-tool mode: the marker followed by
/// `tool_names` as given. Validation is the caller's job.
pub fn build_individual_mode_list<S: AsRef<str>>(tool_names: &[S]) -> Vec<String> {
    let mut list = Vec::with_capacity(tool_names.len() + 1);
    list.push(INDIVIDUAL_TOOLS_MARKER.to_string());
    list.extend(tool_names.iter().map(|n| n.as_ref().to_string()));
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_blank_and_unknown() {
        let registry = ToolsetRegistry::builtin();
        let selection = parse_tool_names(&registry, &["list_runs", " ", "list_runs", "not_a_tool"]);
        assert_eq!(selection.valid, vec!["list_runs"]);
        assert_eq!(selection.invalid, vec!["not_a_tool"]);
        assert!(!selection.is_all_valid());
    }

    #[test]
    fn test_trims_and_keeps_first_occurrence_order() {
        let registry = ToolsetRegistry::builtin();
        let selection = parse_tool_names(
            &registry,
            &["  get_plan_logs", "bogus", "list_runs ", "get_plan_logs", "bogus", "", "other"],
        );
        assert_eq!(selection.valid, vec!["get_plan_logs", "list_runs"]);
        assert_eq!(selection.invalid, vec!["bogus", "other"]);
    }

    #[test]
    fn test_reparsing_valid_output_is_stable() {
        let registry = ToolsetRegistry::builtin();
        let first = parse_tool_names(
            &registry,
            &["get_apply_logs", "x", "search_modules", "get_apply_logs"],
        );
        let second = parse_tool_names(&registry, &first.valid);
        assert_eq!(second.valid, first.valid);
        assert!(second.invalid.is_empty());
    }

    #[test]
    fn test_outputs_are_disjoint_and_bounded() {
        let registry = ToolsetRegistry::builtin();
        let raw = ["a", "list_runs", "\t", "a", "list_runs", "b ", " b", ""];
        let non_blank = raw.iter().filter(|s| !s.trim().is_empty()).count();

        let selection = parse_tool_names(&registry, &raw);
        let combined: Vec<&String> = selection.valid.iter().chain(&selection.invalid).collect();
        let unique: HashSet<&String> = combined.iter().copied().collect();

        assert_eq!(unique.len(), combined.len());
        assert!(combined.iter().all(|n| !n.trim().is_empty()));
        assert!(combined.len() <= non_blank);
        assert_eq!(selection.invalid, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        let registry = ToolsetRegistry::builtin();
        let selection = parse_tool_names::<&str>(&registry, &[]);
        assert_eq!(selection, ToolNameSelection::default());
    }

    #[test]
    fn test_build_individual_mode_list() {
        let list = build_individual_mode_list(&["get_plan_details", "anything"]);
        assert_eq!(list, vec![INDIVIDUAL_TOOLS_MARKER, "get_plan_details", "anything"]);

        let empty = build_individual_mode_list::<&str>(&[]);
        assert_eq!(empty, vec![INDIVIDUAL_TOOLS_MARKER]);
    }
}
