//! Search filter model and validation of untyped `tools/call` arguments
//!
//! Arguments arrive as arbitrary JSON. Only the overall shape is checked
//! strictly (it must be an object); every field inside is validated on its
//! own and dropped when malformed, so a bad option never fails a search.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Any,
    Digital,
    Vinyl,
    Cassette,
    Cd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Price {
    Any,
    Free,
    NameYourPrice,
    #[serde(rename = "under-10")]
    Under10,
    #[serde(rename = "under-20")]
    Under20,
}

impl Price {
    /// Human-readable label, `None` for the unconstrained tier.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Free => Some("Free"),
            Self::NameYourPrice => Some("Name your price"),
            Self::Under10 => Some("Under $10"),
            Self::Under20 => Some("Under $20"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    BestSelling,
    NewArrivals,
    Top,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestSelling => "best-selling",
            Self::NewArrivals => "new-arrivals",
            Self::Top => "top",
        }
    }
}

/// Structured search input. Every field is optional and any combination,
/// including the empty filter, is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub tags: Option<Vec<String>>,
    pub genre: Option<String>,
    pub format: Option<Format>,
    pub price: Option<Price>,
    pub location: Option<String>,
    pub sort: Option<Sort>,
    /// Always >= 1 when set.
    pub page: Option<u32>,
}

impl SearchFilter {
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().filter(|query| !query.is_empty())
    }

    pub fn genre_text(&self) -> Option<&str> {
        self.genre.as_deref().filter(|genre| !genre.is_empty())
    }
}

/// Outcome of validating `tools/call` arguments at the protocol boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolArguments {
    Valid {
        filter: SearchFilter,
        /// Names of fields that were present but malformed and therefore dropped.
        ignored: Vec<String>,
    },
    Rejected {
        reason: String,
    },
}

impl ToolArguments {
    pub fn parse(arguments: Option<&Value>) -> Self {
        let fields = match arguments {
            None | Some(Value::Null) => {
                return Self::Valid {
                    filter: SearchFilter::default(),
                    ignored: Vec::new(),
                }
            }
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                return Self::Rejected {
                    reason: format!("arguments must be an object, got {}", json_type(other)),
                }
            }
        };

        let mut ignored = Vec::new();
        let filter = SearchFilter {
            query: string_field(fields, "query", &mut ignored),
            tags: tags_field(fields, &mut ignored),
            genre: string_field(fields, "genre", &mut ignored),
            format: enum_field(fields, "format", &mut ignored),
            price: enum_field(fields, "price", &mut ignored),
            location: string_field(fields, "location", &mut ignored),
            sort: enum_field(fields, "sort", &mut ignored),
            page: page_field(fields, &mut ignored),
        };

        Self::Valid { filter, ignored }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_field(
    fields: &Map<String, Value>,
    key: &str,
    ignored: &mut Vec<String>,
) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        _ => {
            ignored.push(key.to_string());
            None
        }
    }
}

fn enum_field<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &str,
    ignored: &mut Vec<String>,
) -> Option<T> {
    let value = fields.get(key)?;
    if value.is_null() {
        return None;
    }

    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            ignored.push(key.to_string());
            None
        }
    }
}

fn tags_field(fields: &Map<String, Value>, ignored: &mut Vec<String>) -> Option<Vec<String>> {
    match fields.get("tags")? {
        Value::Null => None,
        Value::Array(items) => {
            let mut tags = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(tag) => tags.push(tag.to_string()),
                    None => ignored.push(format!("tags[{index}]")),
                }
            }
            Some(tags)
        }
        _ => {
            ignored.push("tags".to_string());
            None
        }
    }
}

fn page_field(fields: &Map<String, Value>, ignored: &mut Vec<String>) -> Option<u32> {
    let value = fields.get("page")?;
    if value.is_null() {
        return None;
    }

    // JSON does not distinguish `2` from `2.0`; both name page two.
    let page = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|page| page.is_finite() && page.fract() == 0.0 && *page >= 1.0)
                .filter(|page| *page <= f64::from(u32::MAX))
                .map(|page| page as u64)
        })
        .filter(|page| *page >= 1)
        .and_then(|page| u32::try_from(page).ok());
    if page.is_none() {
        ignored.push("page".to_string());
    }
    page
}
