//! Operator-defined extra fields and their values.

use super::RecordId;
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Values attached to a client or order, keyed by custom field ID.
pub type CustomValues = BTreeMap<RecordId, CustomFieldValue>;

/// Declared type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Numeric value.
    Number,
    /// Calendar date.
    Date,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// One of a fixed list of options.
    Select,
    /// Boolean flag.
    Checkbox,
}

impl FieldType {
    /// All field types in declaration order.
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Date,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Select,
        FieldType::Checkbox,
    ];

    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::validation(format!("unknown field type: {s}")))
    }
}

/// Which record type a custom field applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Client records.
    Client,
    /// Order records.
    Order,
}

impl EntityType {
    /// Returns the wire name of the entity type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityType::Client => "client",
            EntityType::Order => "order",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" | "clients" => Ok(EntityType::Client),
            "order" | "orders" => Ok(EntityType::Order),
            _ => Err(CoreError::validation(format!("unknown entity type: {s}"))),
        }
    }
}

/// Definition of an extra attribute shown on client or order forms.
///
/// The values themselves live in each record's `customFields` map keyed by
/// this definition's ID. Deleting a definition leaves those values in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Record ID.
    pub id: RecordId,
    /// Label shown to the user.
    pub name: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Record type the field is attached to.
    pub entity_type: EntityType,
    /// Whether every record of the entity type must carry a value.
    pub required: bool,
    /// Allowed values for select fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl CustomField {
    /// Returns the select options, or an empty slice.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if the field applies to `entity`.
    #[must_use]
    pub fn applies_to(&self, entity: EntityType) -> bool {
        self.entity_type == entity
    }
}

/// A custom field value, tagged with the type it was entered as.
///
/// Stored as `{"type": "<field type>", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CustomFieldValue {
    /// Free text.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Email address.
    Email(String),
    /// Phone number.
    Phone(String),
    /// Selected option.
    Select(String),
    /// Boolean flag.
    Checkbox(bool),
}

impl CustomFieldValue {
    /// Returns the field type this value was entered as.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Number(_) => FieldType::Number,
            Self::Date(_) => FieldType::Date,
            Self::Email(_) => FieldType::Email,
            Self::Phone(_) => FieldType::Phone,
            Self::Select(_) => FieldType::Select,
            Self::Checkbox(_) => FieldType::Checkbox,
        }
    }

    /// Returns `true` for text-like values that are empty or whitespace.
    ///
    /// Numbers, dates and checkboxes are never blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) | Self::Email(s) | Self::Phone(s) | Self::Select(s) => {
                s.trim().is_empty()
            }
            Self::Number(_) | Self::Date(_) | Self::Checkbox(_) => false,
        }
    }

    /// Re-reads a legacy text value as `field_type`.
    ///
    /// Older versions stored every form input as a bare string, which reads
    /// back as [`CustomFieldValue::Text`]. Numbers, ISO dates (`YYYY-MM-DD`)
    /// and `true`/`false` are parsed; email, phone and select text is
    /// re-tagged. Anything else, including text that does not parse, is
    /// returned unchanged.
    #[must_use]
    pub fn coerce_to(self, field_type: FieldType) -> Self {
        let text = match self {
            Self::Text(text) => text,
            other => return other,
        };
        let trimmed = text.trim();
        let parsed = match field_type {
            FieldType::Text => None,
            FieldType::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Self::Number),
            FieldType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(Self::Date),
            FieldType::Checkbox => trimmed.parse::<bool>().ok().map(Self::Checkbox),
            FieldType::Email => return Self::Email(text),
            FieldType::Phone => return Self::Phone(text),
            FieldType::Select => return Self::Select(text),
        };
        parsed.unwrap_or(Self::Text(text))
    }

    /// Converts a JSON value into a custom value.
    ///
    /// Tagged objects are parsed directly. Bare values written by older
    /// versions map to the closest variant: booleans to checkbox, numbers to
    /// number, strings to text. `null` yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for arrays, untagged objects, or malformed tags.
    pub fn from_json(value: serde_json::Value) -> Result<Option<Self>, serde_json::Error> {
        use serde::de::Error as _;
        use serde_json::Value;

        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Self::Checkbox(b))),
            Value::Number(n) => Ok(n.as_f64().map(Self::Number)),
            Value::String(s) => Ok(Some(Self::Text(s))),
            Value::Object(map) if map.contains_key("type") => {
                serde_json::from_value(Value::Object(map)).map(Some)
            }
            other => Err(serde_json::Error::custom(format!(
                "unsupported custom field value: {other}"
            ))),
        }
    }
}

impl fmt::Display for CustomFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Email(s) | Self::Phone(s) | Self::Select(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Checkbox(b) => f.write_str(if *b { "yes" } else { "no" }),
        }
    }
}

/// Serde helpers for `customFields` maps that accept legacy bare values.
pub(crate) mod custom_values {
    use super::{CustomFieldValue, CustomValues};
    use crate::model::RecordId;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use std::collections::BTreeMap;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<CustomValues, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<RecordId, serde_json::Value>>::deserialize(deserializer)?;
        let mut values = CustomValues::new();
        for (id, value) in raw.unwrap_or_default() {
            if let Some(value) = CustomFieldValue::from_json(value).map_err(D::Error::custom)? {
                values.insert(id, value);
            }
        }
        Ok(values)
    }
}
