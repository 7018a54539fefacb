//! Per-field translators.
//!
//! Both translators are total: malformed input is normalized, never raised.
//! `translate_codes` normalizes malformed input to `"[]"` while
//! `translate_subcategories` normalizes it to null.

use snowprep_model::{CodeMapping, EMPTY_ARRAY};

/// Outcome of translating one `Codes` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodesTranslation {
    /// JSON array of labels, with per-code lookup counts.
    Translated {
        value: String,
        mapped: usize,
        unmapped: usize,
    },
    /// The field held an empty array.
    Empty,
    /// The field was not a JSON array of strings.
    Malformed,
}

impl CodesTranslation {
    /// Output cell value: the JSON array, null for [`Self::Empty`], or `"[]"`
    /// for [`Self::Malformed`].
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Translated { value, .. } => Some(value),
            Self::Empty => None,
            Self::Malformed => Some(EMPTY_ARRAY.to_string()),
        }
    }
}

/// Outcome of translating one `Product Type Sub Category` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcategoryTranslation {
    Joined(String),
    Empty,
    Malformed,
}

impl SubcategoryTranslation {
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Joined(value) => Some(value),
            Self::Empty | Self::Malformed => None,
        }
    }
}

fn decode_string_array(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).ok()
}

pub fn classify_codes(raw: &str, mapping: &CodeMapping) -> CodesTranslation {
    let Some(codes) = decode_string_array(raw) else {
        return CodesTranslation::Malformed;
    };
    if codes.is_empty() {
        return CodesTranslation::Empty;
    }

    let mut mapped = 0usize;
    let translated: Vec<&str> = codes
        .iter()
        .map(|code| match mapping.label(code) {
            Some(label) => {
                mapped += 1;
                label
            }
            None => code.as_str(),
        })
        .collect();

    match serde_json::to_string(&translated) {
        Ok(value) => CodesTranslation::Translated {
            value,
            mapped,
            unmapped: codes.len() - mapped,
        },
        Err(_) => CodesTranslation::Malformed,
    }
}

/// Translates a JSON array of codes into a JSON array of labels.
///
/// Unmapped codes pass through unchanged. Returns `None` for an empty array
/// and `"[]"` when `raw` is not a JSON array of strings.
///
/// ```
/// use snowprep_model::CodeMapping;
/// use snowprep_transform::translate_codes;
///
/// let mapping: CodeMapping = [("A1", "Billing Error")].into_iter().collect();
/// assert_eq!(
///     translate_codes(r#"["A1","Z9"]"#, &mapping).as_deref(),
///     Some(r#"["Billing Error","Z9"]"#)
/// );
/// assert_eq!(translate_codes("not json", &mapping).as_deref(), Some("[]"));
/// assert_eq!(translate_codes("[]", &mapping), None);
/// ```
pub fn translate_codes(raw: &str, mapping: &CodeMapping) -> Option<String> {
    classify_codes(raw, mapping).into_value()
}

pub fn classify_subcategories(raw: &str) -> SubcategoryTranslation {
    match decode_string_array(raw) {
        Some(subcategories) if subcategories.is_empty() => SubcategoryTranslation::Empty,
        Some(subcategories) => SubcategoryTranslation::Joined(subcategories.join(",")),
        None => SubcategoryTranslation::Malformed,
    }
}

/// Joins a JSON array of subcategory names with commas.
///
/// Returns `None` for an empty array and for anything that is not a JSON
/// array of strings.
///
/// ```
/// use snowprep_transform::translate_subcategories;
///
/// assert_eq!(
///     translate_subcategories(r#"["Loans","Mortgage"]"#).as_deref(),
///     Some("Loans,Mortgage")
/// );
/// assert_eq!(translate_subcategories("[]"), None);
/// ```
pub fn translate_subcategories(raw: &str) -> Option<String> {
    classify_subcategories(raw).into_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> CodeMapping {
        [("A1", "Billing Error"), ("B2", "Late Fee")]
            .into_iter()
            .collect()
    }

    #[test]
    fn codes_counts_mapped_and_unmapped() {
        let outcome = classify_codes(r#"["A1","Z9","B2"]"#, &mapping());
        assert_eq!(
            outcome,
            CodesTranslation::Translated {
                value: r#"["Billing Error","Z9","Late Fee"]"#.to_string(),
                mapped: 2,
                unmapped: 1,
            }
        );
    }

    #[test]
    fn codes_malformed_inputs_normalize_to_empty_array() {
        let mapping = mapping();
        for raw in ["not json", "", "{\"A1\":1}", "\"A1\"", "42", "[1,2]", "[\"A1\",null]"] {
            assert_eq!(
                translate_codes(raw, &mapping).as_deref(),
                Some("[]"),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn codes_preserve_order_and_duplicates() {
        let value = translate_codes(r#"["B2","A1","B2"]"#, &mapping());
        assert_eq!(
            value.as_deref(),
            Some(r#"["Late Fee","Billing Error","Late Fee"]"#)
        );
    }

    #[test]
    fn codes_translation_is_idempotent_on_labels() {
        let once = translate_codes(r#"["A1","Z9"]"#, &mapping()).unwrap();
        let twice = translate_codes(&once, &mapping()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn subcategories_malformed_inputs_are_null() {
        for raw in ["not json", "", "{}", "\"Loans\"", "[1]"] {
            assert_eq!(translate_subcategories(raw), None, "input {raw:?}");
        }
    }

    #[test]
    fn subcategory_single_value_has_no_separator() {
        assert_eq!(
            translate_subcategories(r#"["Credit Cards"]"#).as_deref(),
            Some("Credit Cards")
        );
    }
}
