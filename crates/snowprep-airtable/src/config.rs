//! Airtable base and table identifiers.

/// Only reviewed complaints are exported.
pub const REVIEW_STATUS_FILTER: &str = "OR({Review Status}='Done',{Review Status}='Archive')";

/// Identifiers of the Airtable base and the three tables read by the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtableConfig {
    pub base_id: String,
    /// US regulatory complaints.
    pub complaints_table_id: String,
    /// Product type subcategories (`Name`).
    pub subcategories_table_id: String,
    /// Complaint codes (`Code Name`).
    pub codes_table_id: String,
}

impl AirtableConfig {
    pub const DEFAULT_BASE_ID: &'static str = "appirNSRfONSuJzM6";
    pub const DEFAULT_COMPLAINTS_TABLE_ID: &'static str = "tblBpLdX6B5DfK8pt";
    pub const DEFAULT_SUBCATEGORIES_TABLE_ID: &'static str = "tblKHi5AqBkTrFJEN";
    pub const DEFAULT_CODES_TABLE_ID: &'static str = "tbl13uzimoOgGOIG6";
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            base_id: Self::DEFAULT_BASE_ID.to_string(),
            complaints_table_id: Self::DEFAULT_COMPLAINTS_TABLE_ID.to_string(),
            subcategories_table_id: Self::DEFAULT_SUBCATEGORIES_TABLE_ID.to_string(),
            codes_table_id: Self::DEFAULT_CODES_TABLE_ID.to_string(),
        }
    }
}
