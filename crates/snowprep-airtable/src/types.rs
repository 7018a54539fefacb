//! Airtable list-records response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One Airtable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl AirtableRecord {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// String value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// One page of a list-records response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordPage {
    pub records: Vec<AirtableRecord>,
    /// Cursor for the next page; absent on the last page.
    #[serde(default)]
    pub offset: Option<String>,
}
