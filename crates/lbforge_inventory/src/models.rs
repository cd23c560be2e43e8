//! Data models for the inventory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single cell value from the inventory.
///
/// The inventory is spreadsheet-shaped: a cell holds a boolean, an integer, or
/// free text (which may itself encode a comma-separated list or `k=v` map).
/// An empty or whitespace-only string models an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FieldValue {
    /// Stringified form used for regex and allowed-value checks and for display.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Str(s) => s.clone(),
        }
    }

    /// Whether this value models an empty spreadsheet cell.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Str(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Boolean coercion: only an actual boolean `true` counts as set.
    pub fn is_true(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

/// One inventory row: the desired configuration of a single load balancer.
///
/// Field presence is sparse. `lb_name` is guaranteed present and unique across
/// the table by the loader; it doubles as the Terraform workspace name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl InventoryRow {
    /// Raw lookup, blank cells included.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Lookup treating blank cells as absent.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).filter(|v| !v.is_blank())
    }

    /// Stringified non-blank value.
    pub fn text(&self, field: &str) -> Option<String> {
        self.value(field).map(FieldValue::as_text)
    }

    /// Boolean flag lookup; anything other than an explicit `true` is false.
    pub fn flag(&self, field: &str) -> bool {
        self.value(field).map(FieldValue::is_true).unwrap_or(false)
    }

    /// The row's display identifier and workspace name.
    pub fn name(&self) -> &str {
        match self.fields.get("lb_name") {
            Some(FieldValue::Str(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Builder-style field setter, used heavily in tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

/// Provider/global configuration consumed by the tfvars renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_url: String,
    pub tenant_name: String,
    pub api_p12_file: String,
}

/// The full inventory document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    /// Declared column set, mirroring a spreadsheet header row. Optional:
    /// rows are sparse, so only an explicit header can meaningfully drift
    /// from the rule schema. Empty means the file is headerless.
    #[serde(default)]
    pub columns: Vec<String>,
    pub load_balancers: Vec<InventoryRow>,
    pub provider: ProviderConfig,
}

impl Inventory {
    /// Whether the data source declares the given column at all.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Find a row by its `lb_name`.
    pub fn row(&self, name: &str) -> Option<&InventoryRow> {
        self.load_balancers.iter().find(|r| r.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_string_is_absent() {
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("site_name", "  ");
        assert!(row.get("site_name").is_some());
        assert!(row.value("site_name").is_none());
    }

    #[test]
    fn flag_only_true_for_boolean_true() {
        let row = InventoryRow::default()
            .with("enable_csrf", true)
            .with("enable_hsts", "true")
            .with("http_redirect", false);
        assert!(row.flag("enable_csrf"));
        assert!(!row.flag("enable_hsts"));
        assert!(!row.flag("http_redirect"));
        assert!(!row.flag("missing"));
    }

    #[test]
    fn field_value_text_forms() {
        assert_eq!(FieldValue::Bool(true).as_text(), "true");
        assert_eq!(FieldValue::Int(443).as_text(), "443");
        assert_eq!(FieldValue::from("https").as_text(), "https");
    }
}
