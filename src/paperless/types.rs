//! Entity types mirrored from the paperless-ngx API.
//!
//! All records are flat and reference related resources by integer ID,
//! exactly as the API represents them. The tool layer holds no local copy
//! of any of these; every read re-fetches from the API.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A timestamp that parses both RFC 3339 and date-only (`YYYY-MM-DD`) strings.
///
/// Paperless mixes the two formats across fields (`created` vs `created_date`),
/// so a plain `DateTime` deserializer rejects valid responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleDateTime(pub DateTime<Utc>);

impl FlexibleDateTime {
    fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

impl Serialize for FlexibleDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for FlexibleDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unable to parse '{s}' as RFC 3339 or date-only timestamp"
            ))
        })
    }
}

/// Deserialize an optional flexible timestamp, treating null and `""` as absent.
fn flexible_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<FlexibleDateTime>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FlexibleDateTime::parse(s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unable to parse '{s}' as RFC 3339 or date-only timestamp"
            ))
        }),
    }
}

/// A page of results from a paginated list endpoint.
///
/// `results` is always an array, even when empty; `next`/`previous` are null
/// exactly when no further/previous page exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all: Vec<i64>,
    pub results: Vec<T>,
}

/// A document stored in paperless.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub correspondent: Option<i64>,
    pub document_type: Option<i64>,
    pub storage_path: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[schemars(with = "Option<String>")]
    #[serde(default, deserialize_with = "flexible_opt")]
    pub created: Option<FlexibleDateTime>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[schemars(with = "Option<String>")]
    #[serde(default, deserialize_with = "flexible_opt")]
    pub modified: Option<FlexibleDateTime>,
    #[schemars(with = "Option<String>")]
    #[serde(default, deserialize_with = "flexible_opt")]
    pub added: Option<FlexibleDateTime>,
    pub archive_serial_number: Option<i64>,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub archived_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
}

/// A correspondent (sender/recipient) of documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Correspondent {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub r#match: String,
    #[serde(default)]
    pub matching_algorithm: i64,
    #[serde(default)]
    pub is_insensitive: bool,
    #[serde(default)]
    pub document_count: i64,
    #[schemars(with = "Option<String>")]
    #[serde(default, deserialize_with = "flexible_opt")]
    pub last_correspondence: Option<FlexibleDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

/// A document type classification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentType {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub r#match: String,
    #[serde(default)]
    pub matching_algorithm: i64,
    #[serde(default)]
    pub is_insensitive: bool,
    #[serde(default)]
    pub document_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

/// A tag attachable to documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Tag {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub r#match: String,
    #[serde(default)]
    pub matching_algorithm: i64,
    #[serde(default)]
    pub is_insensitive: bool,
    #[serde(default)]
    pub is_inbox_tag: bool,
    #[serde(default)]
    pub document_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

/// A storage path controlling where archived files land on disk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StoragePath {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub r#match: String,
    #[serde(default)]
    pub matching_algorithm: i64,
    #[serde(default)]
    pub is_insensitive: bool,
    #[serde(default)]
    pub document_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

/// A custom field definition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CustomField {
    pub id: i64,
    pub name: String,
    pub data_type: String,
}

/// A custom field value attached to a document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CustomFieldValue {
    pub field: i64,
    pub value: serde_json::Value,
}

/// A free-form note attached to a document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Note {
    pub id: i64,
    pub note: String,
    #[schemars(with = "Option<String>")]
    #[serde(default, deserialize_with = "flexible_opt")]
    pub created: Option<FlexibleDateTime>,
    #[serde(default)]
    pub document: Option<i64>,
    #[serde(default)]
    pub user: Option<i64>,
}
