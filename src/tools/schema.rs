//! Static tool metadata: name, annotations, parameter schema.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool as McpTool, ToolAnnotations};
use serde_json::{Value, json};

/// Primitive type of a tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    String,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
    /// An array of strings, optionally restricted to the listed values.
    StringArray(Option<&'static [&'static str]>),
    Integer { minimum: Option<u32>, maximum: Option<u32> },
}

impl ParamKind {
    fn json_schema(&self) -> JsonObject {
        let value = match self {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Enum(values) => json!({ "type": "string", "enum": values }),
            ParamKind::StringArray(None) => json!({
                "type": "array",
                "items": { "type": "string" }
            }),
            ParamKind::StringArray(Some(values)) => json!({
                "type": "array",
                "items": { "type": "string", "enum": values }
            }),
            ParamKind::Integer { minimum, maximum } => {
                let mut schema = json!({ "type": "integer" });
                if let Some(min) = minimum {
                    schema["minimum"] = json!(min);
                }
                if let Some(max) = maximum {
                    schema["maximum"] = json!(max);
                }
                schema
            }
        };

        match value {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }
}

/// A named tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ToolParam {
    pub fn required(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
        }
    }

    pub fn optional(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
        }
    }
}

/// Everything a client needs to know about a tool before calling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// The tool never changes remote state.
    pub read_only: bool,
    /// Invoking the tool may destroy or overwrite remote state.
    pub destructive: bool,
    pub params: Vec<ToolParam>,
}

impl ToolDefinition {
    /// A tool that only reads remote state.
    pub fn read_only(name: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            name,
            title,
            description,
            read_only: true,
            destructive: false,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: ToolParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ToolParam>) -> Self {
        self.params.extend(params);
        self
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_params(&self) -> Vec<&'static str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }

    /// JSON Schema for the tool's arguments.
    pub fn input_schema(&self) -> JsonObject {
        let mut properties = serde_json::Map::new();
        for param in &self.params {
            let mut schema = param.kind.json_schema();
            schema.insert("description".to_string(), json!(param.description));
            properties.insert(param.name.to_string(), Value::Object(schema));
        }

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(self.required_params()));
        schema
    }

    pub fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations {
            title: Some(self.title.to_string()),
            read_only_hint: Some(self.read_only),
            destructive_hint: Some(self.destructive),
            idempotent_hint: None,
            open_world_hint: None,
        }
    }

    /// Converts this definition to an `McpTool` for use in `list_tools`.
    pub fn to_mcp_tool(&self) -> McpTool {
        McpTool {
            name: Cow::Borrowed(self.name),
            title: Some(self.title.to_string()),
            description: Some(Cow::Borrowed(self.description)),
            input_schema: Arc::new(self.input_schema()),
            output_schema: None,
            annotations: Some(self.annotations()),
            icons: None,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["red", "blue"];

    fn sample() -> ToolDefinition {
        ToolDefinition::read_only("paint", "Paint things", "Paints a thing.").params([
            ToolParam::required("thing_id", "The thing", ParamKind::String),
            ToolParam::optional("color", "Color", ParamKind::Enum(COLORS)),
            ToolParam::optional("layers", "Layers", ParamKind::StringArray(Some(COLORS))),
            ToolParam::optional(
                "coats",
                "Coats",
                ParamKind::Integer {
                    minimum: Some(1),
                    maximum: None,
                },
            ),
        ])
    }

    #[test]
    fn test_input_schema() {
        let schema = sample().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["thing_id"]));

        let props = &schema["properties"];
        assert_eq!(props["thing_id"]["type"], "string");
        assert_eq!(props["thing_id"]["description"], "The thing");
        assert_eq!(props["color"]["enum"], json!(["red", "blue"]));
        assert_eq!(props["layers"]["type"], "array");
        assert_eq!(props["layers"]["items"]["enum"], json!(["red", "blue"]));
        assert_eq!(props["coats"]["type"], "integer");
        assert_eq!(props["coats"]["minimum"], 1);
        assert!(props["coats"].get("maximum").is_none());
    }

    #[test]
    fn test_mcp_tool_annotations() {
        let tool = sample().to_mcp_tool();
        assert_eq!(tool.name, "paint");
        assert_eq!(tool.title.as_deref(), Some("Paint things"));

        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.read_only_hint, Some(true));
        assert_eq!(annotations.destructive_hint, Some(false));
        assert_eq!(annotations.title.as_deref(), Some("Paint things"));
    }
}
