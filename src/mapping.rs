//! Field mappings: the declared type and analysis options of every field.
//!
//! Mappings decode from the usual `{"properties": {...}}` object. Object
//! fields (a nested `properties`) are flattened into dotted names, and the
//! `fields` of a text field become `<field>.<name>` sub-fields.
//!
//! # Examples
//!
//! ```
//! use querydsl::mapping::{FieldType, Mappings};
//! use serde_json::json;
//!
//! let mappings = Mappings::from_value(json!({
//!     "properties": {
//!         "title": {"type": "text", "analyzer": "english"},
//!         "author": {"properties": {"name": {"type": "keyword"}}},
//!         "year": {"type": "integer"}
//!     }
//! })).unwrap();
//!
//! assert_eq!(mappings.lookup("author.name").unwrap().field_type, FieldType::Keyword);
//! assert_eq!(mappings.lookup("year").unwrap().field_type, FieldType::Numeric);
//! assert_eq!(mappings.lookup("_id").unwrap().field_type, FieldType::Keyword);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{QueryDslError, Result};
use crate::util::time::parse_time_zone;

/// The reserved document identifier field.
pub const ID_FIELD: &str = "_id";

static ID_PROPERTY: LazyLock<Property> = LazyLock::new(|| Property::new(FieldType::Keyword));

// ============================================================================
// Field types
// ============================================================================

/// The closed set of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum FieldType {
    Text,
    Keyword,
    Numeric,
    Bool,
    Date,
    GeoPoint,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Numeric => "numeric",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
            FieldType::GeoPoint => "geo_point",
        }
    }

    /// Map a type name to a field type. `Ok(None)` for types that are
    /// accepted but not searchable (object-like and exotic types).
    fn decode(name: &str) -> Result<Option<Self>> {
        let field_type = match name.to_lowercase().as_str() {
            "text" | "match_only_text" => FieldType::Text,
            "keyword" | "constant_keyword" => FieldType::Keyword,
            "numeric" | "long" | "integer" | "int" | "short" | "byte" | "double" | "float"
            | "half_float" | "scaled_float" => FieldType::Numeric,
            "bool" | "boolean" => FieldType::Bool,
            "date" | "time" | "datetime" => FieldType::Date,
            "geo_point" => FieldType::GeoPoint,
            "flattened" | "object" | "nested" | "wildcard" | "alias" | "ip" | "ip_range" => {
                return Ok(None);
            }
            other => {
                return Err(QueryDslError::x_content_parse(format!(
                    "[mappings] doesn't support type [{other}]"
                )));
            }
        };
        Ok(Some(field_type))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = QueryDslError;

    fn from_str(s: &str) -> Result<Self> {
        FieldType::decode(s)?.ok_or_else(|| {
            QueryDslError::x_content_parse(format!("[mappings] doesn't support type [{s}]"))
        })
    }
}

impl TryFrom<String> for FieldType {
    type Error = QueryDslError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

// ============================================================================
// Properties
// ============================================================================

fn default_true() -> bool {
    true
}

/// The mapping of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_analyzer: Option<String>,

    /// Date format: `yyyy-MM-dd HH:mm:ss`, `epoch_millis`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(default = "default_true")]
    pub index: bool,

    #[serde(default)]
    pub store: bool,

    #[serde(default = "default_true")]
    pub sortable: bool,

    #[serde(default = "default_true")]
    pub aggregatable: bool,

    #[serde(default)]
    pub highlightable: bool,
}

impl Property {
    /// A property with the defaults of `field_type`. Text fields are stored
    /// and highlightable, but neither sortable nor aggregatable.
    pub fn new(field_type: FieldType) -> Self {
        let text = field_type == FieldType::Text;
        Property {
            field_type,
            analyzer: None,
            search_analyzer: None,
            format: None,
            time_zone: None,
            index: true,
            store: text,
            sortable: !text,
            aggregatable: !text,
            highlightable: text,
        }
    }

    pub fn with_analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_search_analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
        self.search_analyzer = Some(analyzer.into());
        self
    }

    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_time_zone<S: Into<String>>(mut self, time_zone: S) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn is_text(&self) -> bool {
        self.field_type == FieldType::Text
    }

    /// Names of the analyzers this property refers to.
    pub fn analyzer_names(&self) -> impl Iterator<Item = &str> {
        self.analyzer.iter().chain(self.search_analyzer.iter()).map(String::as_str)
    }
}

// ============================================================================
// Mappings
// ============================================================================

/// Field name to property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    #[serde(default)]
    pub properties: BTreeMap<String, Property>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one field.
    pub fn with_property<S: Into<String>>(mut self, field: S, property: Property) -> Self {
        self.properties.insert(field.into(), property);
        self
    }

    /// The property of `field`. `_id` is always a keyword.
    pub fn lookup(&self, field: &str) -> Option<&Property> {
        if field == ID_FIELD {
            return Some(&*ID_PROPERTY);
        }
        self.properties.get(field)
    }

    /// The type of `field`, if mapped.
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.lookup(field).map(|p| p.field_type)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Mapped fields of the given types, sorted by name.
    pub fn fields_of_type<'a>(
        &'a self,
        types: &'a [FieldType],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.properties
            .iter()
            .filter(|(_, p)| types.contains(&p.field_type))
            .map(|(name, _)| name.as_str())
    }

    /// Decode mappings from JSON, accepting both the bare mappings object and
    /// one wrapped in a `mappings` key. Null or `{}` is an empty mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        let value = match value {
            Value::Object(mut map) if map.contains_key("mappings") => {
                map.remove("mappings").unwrap_or(Value::Null)
            }
            other => other,
        };
        let data = match value {
            Value::Null => return Ok(Mappings::default()),
            Value::Object(map) if map.is_empty() => return Ok(Mappings::default()),
            Value::Object(map) => map,
            _ => {
                return Err(QueryDslError::parsing(
                    "[mappings] mappings should be an object",
                ));
            }
        };

        let mut mappings = Mappings::default();
        decode_properties(&data, "", &mut mappings)?;
        Ok(mappings)
    }

    /// Load mappings from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_value(serde_json::from_str(&content)?)
    }
}

fn decode_properties(data: &Map<String, Value>, prefix: &str, mappings: &mut Mappings) -> Result<()> {
    let properties = match data.get("properties") {
        None | Some(Value::Null) => {
            return Err(QueryDslError::parsing(
                "[mappings] properties should be defined",
            ));
        }
        Some(Value::Object(properties)) => properties,
        Some(_) => {
            return Err(QueryDslError::parsing(
                "[mappings] properties should be an object",
            ));
        }
    };

    for (name, definition) in properties {
        let field = format!("{prefix}{name}");
        let definition = definition.as_object().ok_or_else(|| {
            QueryDslError::parsing(format!("[mappings] properties [{field}] should be an object"))
        })?;

        if definition.contains_key("properties") {
            decode_properties(definition, &format!("{field}."), mappings)?;
            continue;
        }

        let Some(property) = decode_property(&field, definition)? else {
            continue;
        };

        if property.is_text() {
            match definition.get("fields") {
                None | Some(Value::Null) => {}
                Some(Value::Object(fields)) => {
                    for (sub, sub_definition) in fields {
                        let sub_field = format!("{field}.{sub}");
                        let sub_definition = sub_definition.as_object().ok_or_else(|| {
                            QueryDslError::parsing(format!(
                                "[mappings] properties [{sub_field}] should be an object"
                            ))
                        })?;
                        if let Some(sub_property) = decode_property(&sub_field, sub_definition)? {
                            mappings.properties.insert(sub_field, sub_property);
                        }
                    }
                }
                Some(other) => {
                    return Err(QueryDslError::parsing(format!(
                        "[mappings] property.fields [{field}] should be an object, got {}",
                        json_type(other)
                    )));
                }
            }
        }

        mappings.properties.insert(field, property);
    }
    Ok(())
}

fn decode_property(field: &str, definition: &Map<String, Value>) -> Result<Option<Property>> {
    let field_type = match definition.get("type") {
        None => {
            return Err(QueryDslError::parsing(format!(
                "[mappings] properties [{field}] option [type] should be exists"
            )));
        }
        Some(Value::String(name)) => FieldType::decode(name).map_err(|_| {
            QueryDslError::x_content_parse(format!(
                "[mappings] properties [{field}] doesn't support type [{name}]"
            ))
        })?,
        Some(_) => {
            return Err(QueryDslError::parsing(format!(
                "[mappings] properties [{field}] option [type] should be a string"
            )));
        }
    };
    let Some(field_type) = field_type else {
        return Ok(None);
    };

    let mut property = Property::new(field_type);
    for (key, value) in definition {
        let invalid = |expected: &str| {
            QueryDslError::parsing(format!(
                "[mappings] properties [{field}] option [{key}] should be {expected}"
            ))
        };
        let string = || value.as_str().map(str::to_string).ok_or_else(|| invalid("a string"));
        let boolean = || value.as_bool().ok_or_else(|| invalid("a boolean"));

        match key.as_str() {
            "analyzer" => property.analyzer = Some(string()?),
            "search_analyzer" => property.search_analyzer = Some(string()?),
            "format" => property.format = Some(string()?),
            "time_zone" => {
                let zone = string()?;
                parse_time_zone(&zone).map_err(|e| {
                    QueryDslError::parsing(format!("[mappings] {field} time_zone parse err {e}"))
                })?;
                property.time_zone = Some(zone);
            }
            "index" => property.index = boolean()?,
            "store" => property.store = boolean()?,
            "sortable" => property.sortable = boolean()?,
            "aggregatable" => property.aggregatable = boolean()?,
            "highlightable" => property.highlightable = boolean()?,
            _ => {}
        }
    }
    if property.highlightable {
        property.store = true;
    }
    Ok(Some(property))
}

/// Name of the JSON type of `value`, as used in error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float64",
        Value::Number(_) => "int64",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
