//! NewType wrappers for the identifiers passed to the Terraform API.
//!
//! These keep a plan ID from being passed where an apply ID or workspace
//! name is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate a NewType wrapper with standard trait implementations.
macro_rules! newtype_string {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

newtype_string!(
    /// ID of a plan (e.g., `plan-8F5JFydVYAmtTjET`).
    PlanId
);

newtype_string!(
    /// ID of an apply (e.g., `apply-47MBvjwzBG8YKc2v`).
    ApplyId
);

newtype_string!(
    /// Name of an HCP Terraform / TFE organization.
    OrganizationName
);

newtype_string!(
    /// Name of a workspace, unique within its organization.
    WorkspaceName
);

newtype_string!(
    /// ID of a workspace (e.g., `ws-6jrRyVDv1J8zQMB5`).
    WorkspaceId
);
