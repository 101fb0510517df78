//! Optional `page` / `pageSize` parameters shared by list tools.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::contract::{ToolError, value_type_name};
use super::schema::{ParamKind, ToolParam};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Parameter declarations to append to a list tool's schema.
    pub fn params() -> [ToolParam; 2] {
        [
            ToolParam::optional(
                "page",
                "Page number to fetch, starting at 1 (default 1)",
                ParamKind::Integer {
                    minimum: Some(1),
                    maximum: None,
                },
            ),
            ToolParam::optional(
                "pageSize",
                "Number of items per page (default 20, max 100)",
                ParamKind::Integer {
                    minimum: Some(1),
                    maximum: Some(MAX_PAGE_SIZE),
                },
            ),
        ]
    }

    /// Read `page` and `pageSize` from the arguments, applying defaults for
    /// absent values.
    pub fn from_args(args: &JsonObject) -> Result<Self, ToolError> {
        let page = read_u32(args, "page")?.unwrap_or(DEFAULT_PAGE);
        let page_size = read_u32(args, "pageSize")?.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(ToolError::InvalidPagination(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ToolError::InvalidPagination(format!(
                "pageSize must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }

        Ok(Self { page, page_size })
    }
}

/// Whole numbers only; `3.0` is accepted since JSON clients often send
/// integers as floats.
fn read_u32(args: &JsonObject, name: &str) -> Result<Option<u32>, ToolError> {
    let value = match args.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let number = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        })
        .and_then(|n| u32::try_from(n).ok());

    match number {
        Some(n) => Ok(Some(n)),
        None if value.is_number() => Err(ToolError::InvalidPagination(format!(
            "{} must be a non-negative whole number, got {}",
            name, value
        ))),
        None => Err(ToolError::InvalidPagination(format!(
            "{} must be a number, got {}",
            name,
            value_type_name(value)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            Pagination::from_args(&JsonObject::new()).unwrap(),
            Pagination::default()
        );
        assert_eq!(
            Pagination::from_args(&args(json!({ "page": null }))).unwrap(),
            Pagination {
                page: 1,
                page_size: 20
            }
        );
    }

    #[test]
    fn test_explicit_values() {
        let p = Pagination::from_args(&args(json!({ "page": 3, "pageSize": 100 }))).unwrap();
        assert_eq!(p, Pagination { page: 3, page_size: 100 });

        let p = Pagination::from_args(&args(json!({ "page": 2.0, "pageSize": 5.0 }))).unwrap();
        assert_eq!(p, Pagination { page: 2, page_size: 5 });
    }

    #[test]
    fn test_rejects_out_of_range() {
        for bad in [
            json!({ "page": 0 }),
            json!({ "pageSize": 0 }),
            json!({ "pageSize": 101 }),
            json!({ "page": -1 }),
            json!({ "page": 1.5 }),
        ] {
            let err = Pagination::from_args(&args(bad.clone())).unwrap_err();
            assert!(
                matches!(err, ToolError::InvalidPagination(_)),
                "expected pagination error for {bad}"
            );
        }
    }

    #[test]
    fn test_rejects_non_numbers() {
        let err = Pagination::from_args(&args(json!({ "page": "2" }))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid pagination parameters: page must be a number, got string"
        );
    }

    #[test]
    fn test_params_schema() {
        let [page, size] = Pagination::params();
        assert_eq!(page.name, "page");
        assert!(!page.required);
        assert_eq!(
            size.kind,
            ParamKind::Integer {
                minimum: Some(1),
                maximum: Some(MAX_PAGE_SIZE)
            }
        );
    }
}
