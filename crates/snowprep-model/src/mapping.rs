use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only lookup from external code identifiers to human-readable labels.
///
/// Serializes as a flat JSON object (`{"recXXXX": "Billing Error"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeMapping {
    entries: BTreeMap<String, String>,
}

impl CodeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label for `code`, if one is defined.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Returns the label for `code`, or `code` itself when it is unmapped.
    pub fn translate<'a>(&'a self, code: &'a str) -> &'a str {
        self.label(code).unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CodeMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(code, label)| (code.into(), label.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_falls_back_to_code() {
        let mapping: CodeMapping = [("A1", "Billing Error")].into_iter().collect();
        assert_eq!(mapping.translate("A1"), "Billing Error");
        assert_eq!(mapping.translate("Z9"), "Z9");
        assert!(mapping.label("Z9").is_none());
    }

    #[test]
    fn later_entries_overwrite_earlier_labels() {
        let mapping: CodeMapping = [("A1", "Old"), ("A1", "New")].into_iter().collect();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.label("A1"), Some("New"));
    }
}
