//! Tool registry and `tools/call` execution
//!
//! Exposes the single `bandcamp.search` tool. The input schema is chosen once
//! from `RegistryConfig` and rendered into every descriptor shape the hosts
//! expect (MCP, function-calling, classic actions) from one canonical value.

use rust_mcp_sdk::schema::TextContent;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::domain::{
    filter::ToolArguments,
    search::{search_link_only, SearchResult},
};
use crate::errors::AppError;

pub const TOOL_NAME: &str = "bandcamp.search";
/// Function-calling conventions do not allow dots in names.
pub const FUNCTION_NAME: &str = "bandcamp_search";
pub const TOOL_TITLE: &str = "Search Bandcamp";
pub const OUTPUT_TEMPLATE: &str = "/app/ui.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    /// Advertise only the `query` field, for hosts with strict schema validators.
    pub minimal_schema: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Minimal,
    Full,
}

impl SchemaVariant {
    pub fn from_config(config: &RegistryConfig) -> Self {
        if config.minimal_schema {
            Self::Minimal
        } else {
            Self::Full
        }
    }

    pub fn input_schema(self) -> Value {
        let query = json!({
            "type": "string",
            "title": "Query",
            "description": "Free-text search query"
        });

        match self {
            Self::Minimal => json!({
                "type": "object",
                "title": "Bandcamp Search (Minimal)",
                "description": "Minimal schema for connector creation",
                "properties": { "query": query },
                "required": ["query"],
                "additionalProperties": false
            }),
            Self::Full => json!({
                "type": "object",
                "title": "Bandcamp Search",
                "description": "Search Bandcamp with optional filters",
                "properties": {
                    "query": query,
                    "tags": {
                        "type": "array",
                        "title": "Tags",
                        "items": { "type": "string" },
                        "description": "Optional tag filters"
                    },
                    "genre": {
                        "type": "string",
                        "title": "Genre",
                        "description": "Primary tag or genre"
                    },
                    "format": {
                        "type": "string",
                        "title": "Format",
                        "enum": ["any", "digital", "vinyl", "cassette", "cd"]
                    },
                    "price": {
                        "type": "string",
                        "title": "Price",
                        "enum": ["any", "free", "name-your-price", "under-10", "under-20"]
                    },
                    "location": { "type": "string", "title": "Location" },
                    "sort": {
                        "type": "string",
                        "title": "Sort",
                        "enum": ["best-selling", "new-arrivals", "top"]
                    },
                    "page": { "type": "integer", "title": "Page", "minimum": 1 }
                },
                "required": [],
                "additionalProperties": false
            }),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Minimal => "Search Bandcamp (minimal schema during connector creation)",
            Self::Full => "Search Bandcamp (link-only)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn bandcamp_search(variant: SchemaVariant) -> Self {
        Self {
            name: TOOL_NAME,
            title: TOOL_TITLE,
            description: variant.description(),
            input_schema: variant.input_schema(),
        }
    }

    /// MCP `tools/list` shape.
    pub fn mcp_projection(&self) -> Map<String, Value> {
        Map::from_iter([
            ("name".to_string(), json!(self.name)),
            ("title".to_string(), json!(self.title)),
            ("description".to_string(), json!(self.description)),
            ("inputSchema".to_string(), self.input_schema.clone()),
            ("input_schema".to_string(), self.input_schema.clone()),
        ])
    }

    /// Function-calling shape, both flat and nested under `function`.
    pub fn function_projection(&self) -> Map<String, Value> {
        Map::from_iter([
            ("parameters".to_string(), self.input_schema.clone()),
            ("type".to_string(), json!("function")),
            (
                "function".to_string(),
                json!({
                    "name": FUNCTION_NAME,
                    "description": self.description,
                    "parameters": self.input_schema,
                }),
            ),
        ])
    }

    pub fn ui_hints(&self) -> Map<String, Value> {
        Map::from_iter([(
            "_meta".to_string(),
            json!({
                "openai": {
                    "outputTemplate": OUTPUT_TEMPLATE,
                    "toolInvocation": {
                        "invoking": "Searching Bandcamp…",
                        "invoked": "Showing Bandcamp results"
                    }
                }
            }),
        )])
    }

    pub fn to_value(&self) -> Value {
        let mut descriptor = self.mcp_projection();
        descriptor.extend(self.function_projection());
        descriptor.extend(self.ui_hints());
        Value::Object(descriptor)
    }
}

impl Serialize for ToolDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Immutable after construction; shared read-only across requests.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        let variant = SchemaVariant::from_config(config);
        Self {
            tools: vec![ToolDescriptor::bandcamp_search(variant)],
        }
    }

    pub fn describe_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

pub fn handle_tools_call(registry: &ToolRegistry, params: Option<Value>) -> Result<Value, AppError> {
    let params = params.unwrap_or(Value::Null);
    let name = match params.get("name") {
        Some(Value::String(name)) => name.as_str(),
        Some(other) => return Err(AppError::tool_not_found(other.to_string())),
        None => return Err(AppError::tool_not_found("<missing>")),
    };

    if registry.find(name).is_none() {
        return Err(AppError::tool_not_found(name));
    }

    let result = run_bandcamp_search(params.get("arguments"))?;
    tool_call_result(&result)
}

fn run_bandcamp_search(arguments: Option<&Value>) -> Result<SearchResult, AppError> {
    match ToolArguments::parse(arguments) {
        ToolArguments::Valid { filter, ignored } => {
            if !ignored.is_empty() {
                debug!(fields = ?ignored, "ignored malformed search filter fields");
            }
            Ok(search_link_only(&filter))
        }
        ToolArguments::Rejected { reason } => {
            Err(AppError::bad_request("invalid_arguments", reason))
        }
    }
}

fn tool_call_result(result: &SearchResult) -> Result<Value, AppError> {
    let text = TextContent::new(
        format!("Open the result in Bandcamp to browse: {}", result.link),
        None,
        None,
    );
    let text = serde_json::to_value(text)
        .map_err(|err| AppError::internal(format!("failed to serialize text content: {err}")))?;

    Ok(json!({
        "content": [
            text,
            {
                "type": "application/json",
                "data": { "items": result.items }
            }
        ],
        "structuredContent": {
            "items": result.items,
            "link": result.link
        }
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{filter::SearchFilter, url_builder::build_browse_url};

    fn full_registry() -> ToolRegistry {
        ToolRegistry::new(&RegistryConfig::default())
    }

    fn minimal_registry() -> ToolRegistry {
        ToolRegistry::new(&RegistryConfig {
            minimal_schema: true,
        })
    }

    #[test]
    fn registry_exposes_one_tool() {
        let registry = full_registry();
        assert_eq!(registry.describe_tools().len(), 1);
        assert_eq!(registry.describe_tools()[0].name, TOOL_NAME);
        assert!(registry.find(TOOL_NAME).is_some());
        assert!(registry.find(FUNCTION_NAME).is_none());
    }

    #[test]
    fn both_schema_variants_coexist() {
        let full = full_registry();
        let minimal = minimal_registry();

        let full_schema = &full.describe_tools()[0].input_schema;
        let minimal_schema = &minimal.describe_tools()[0].input_schema;

        assert_eq!(full_schema["required"], json!([]));
        assert!(full_schema["properties"]["page"].is_object());
        assert_eq!(minimal_schema["required"], json!(["query"]));
        assert_eq!(
            minimal_schema["properties"].as_object().map(Map::len),
            Some(1)
        );
        assert_ne!(
            full.describe_tools()[0].description,
            minimal.describe_tools()[0].description
        );
    }

    #[test]
    fn every_shape_carries_the_same_schema() {
        for registry in [full_registry(), minimal_registry()] {
            let descriptor = &registry.describe_tools()[0];
            let value = descriptor.to_value();

            assert_eq!(value["inputSchema"], descriptor.input_schema);
            assert_eq!(value["input_schema"], value["inputSchema"]);
            assert_eq!(value["parameters"], value["inputSchema"]);
            assert_eq!(value["function"]["parameters"], value["inputSchema"]);
            assert_eq!(value["function"]["description"], value["description"]);
            assert_eq!(value["function"]["name"], FUNCTION_NAME);
            assert_eq!(value["type"], "function");
            assert_eq!(value["_meta"]["openai"]["outputTemplate"], OUTPUT_TEMPLATE);
        }
    }

    #[test]
    fn serialize_matches_to_value() {
        let registry = full_registry();
        let descriptor = &registry.describe_tools()[0];
        let serialized = serde_json::to_value(descriptor).expect("descriptor serialization");
        assert_eq!(serialized, descriptor.to_value());
    }

    #[test]
    fn full_schema_enums_match_filter_parsing() {
        let schema = SchemaVariant::Full.input_schema();
        for field in ["format", "price", "sort"] {
            for value in schema["properties"][field]["enum"]
                .as_array()
                .expect("enum values")
            {
                let arguments = json!({ field: value });
                let ToolArguments::Valid { ignored, .. } = ToolArguments::parse(Some(&arguments))
                else {
                    panic!("object arguments must be valid");
                };
                assert!(ignored.is_empty(), "{field}={value} should be accepted");
            }
        }
    }

    #[test]
    fn call_returns_text_then_data_blocks() {
        let result = handle_tools_call(
            &full_registry(),
            Some(json!({ "name": TOOL_NAME, "arguments": { "query": "ambient" } })),
        )
        .expect("tool call");

        let link = build_browse_url(&SearchFilter {
            query: Some("ambient".to_string()),
            ..SearchFilter::default()
        });
        let content = result["content"].as_array().expect("content array");

        assert_eq!(content.len(), 2);
        assert_eq!(content[0]["type"], "text");
        assert!(content[0]["text"]
            .as_str()
            .expect("text block")
            .ends_with(&link));
        assert_eq!(content[1]["type"], "application/json");
        assert_eq!(content[1]["data"]["items"][0]["url"], link.as_str());
        assert_eq!(content[1]["data"]["items"][0]["title"], "Search: ambient");
        assert_eq!(result["structuredContent"]["link"], link.as_str());
        assert_eq!(
            result["structuredContent"]["items"],
            content[1]["data"]["items"]
        );
    }

    #[test]
    fn call_without_arguments_browses() {
        let result = handle_tools_call(&full_registry(), Some(json!({ "name": TOOL_NAME })))
            .expect("tool call");

        assert_eq!(
            result["content"][1]["data"]["items"][0]["title"],
            "Browse Bandcamp"
        );
    }

    #[test]
    fn call_with_unknown_tool_fails_with_tool_not_found() {
        let err = handle_tools_call(
            &full_registry(),
            Some(json!({ "name": FUNCTION_NAME, "arguments": {} })),
        )
        .expect_err("unknown tool");

        assert!(matches!(err, AppError::ToolNotFound { ref name } if name == FUNCTION_NAME));
    }

    #[test]
    fn call_without_string_name_fails_with_tool_not_found() {
        let cases = [
            (None, "<missing>"),
            (Some(json!({})), "<missing>"),
            (Some(json!({ "name": 5 })), "5"),
            (Some(json!({ "name": null })), "null"),
        ];
        for (params, expected) in cases {
            let err = handle_tools_call(&full_registry(), params).expect_err("no usable name");
            assert!(
                matches!(err, AppError::ToolNotFound { ref name } if name == expected),
                "expected unknown tool {expected}, got {err:?}"
            );
        }
    }

    #[test]
    fn call_with_non_object_arguments_is_rejected() {
        let err = handle_tools_call(
            &full_registry(),
            Some(json!({ "name": TOOL_NAME, "arguments": "ambient" })),
        )
        .expect_err("rejected arguments");

        assert!(matches!(
            err,
            AppError::BadRequest {
                code: "invalid_arguments",
                ..
            }
        ));
    }

    #[test]
    fn minimal_registry_still_accepts_full_filters() {
        let result = handle_tools_call(
            &minimal_registry(),
            Some(json!({ "name": TOOL_NAME, "arguments": { "genre": "ambient", "page": 2 } })),
        )
        .expect("tool call");

        assert_eq!(
            result["structuredContent"]["link"],
            "https://bandcamp.com/tag/ambient?page=2"
        );
    }
}
