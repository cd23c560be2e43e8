//! Row validation against the rule schema.

use lbforge_inventory::{Inventory, InventoryRow};
use regex::Regex;
use tracing::debug;

use crate::crossfield;
use crate::error::{RulesError, RulesResult, ValidationError};
use crate::schema::{FieldRule, RuleSchema};

/// RFC-1123-like hostname: dot-separated labels of alphanumerics and hyphens,
/// no leading or trailing hyphen per label.
const HOSTNAME_PATTERN: &str =
    r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$";

/// Evaluates the rule schema against one inventory row.
///
/// Stateless between invocations; the error list for a row depends only on
/// (row, schema). Error order per row is fixed: schema entries in definition
/// order, the `domains` list check, the `csrf_custom_domains` list check, then
/// the cross-field invariants.
#[derive(Debug)]
pub struct RowValidator<'a> {
    schema: &'a RuleSchema,
    /// Anchored format regexes, one slot per schema entry, compiled once here.
    patterns: Vec<Option<Regex>>,
    hostname: Regex,
}

impl<'a> RowValidator<'a> {
    pub fn new(schema: &'a RuleSchema) -> RulesResult<Self> {
        let patterns = schema
            .iter()
            .map(|rule| {
                rule.pattern
                    .as_ref()
                    .map(|pattern| {
                        Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                            RulesError::InvalidPattern {
                                field: rule.field.clone(),
                                message: e.to_string(),
                            }
                        })
                    })
                    .transpose()
            })
            .collect::<RulesResult<Vec<_>>>()?;

        let hostname = Regex::new(HOSTNAME_PATTERN).map_err(|e| RulesError::InvalidPattern {
            field: "domains".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            schema,
            patterns,
            hostname,
        })
    }

    /// Produce the ordered error list for a single row.
    pub fn validate_row(&self, row: &InventoryRow) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (rule, pattern) in self.schema.iter().zip(&self.patterns) {
            self.check_field(row, rule, pattern.as_ref(), &mut errors);
        }

        if let Some(error) = self.check_domain_list(row, "domains") {
            errors.push(error);
        }

        // Custom-domain entries are only meaningful when CSRF protection is on.
        if row.flag("enable_csrf") {
            if let Some(error) = self.check_domain_list(row, "csrf_custom_domains") {
                errors.push(error);
            }
        }

        errors.extend(crossfield::check(row));

        errors
    }

    fn check_field(
        &self,
        row: &InventoryRow,
        rule: &FieldRule,
        pattern: Option<&Regex>,
        errors: &mut Vec<ValidationError>,
    ) {
        let value = row.value(&rule.field);

        if rule.required && value.is_none() {
            errors.push(ValidationError::missing(
                row.name(),
                &rule.field,
                "required field is empty",
            ));
            return;
        }

        if let Some(dep) = &rule.depends_on {
            let triggered = row.value(&dep.field) == Some(&dep.value);
            if !triggered {
                // Untriggered dependency leaves the value entirely unchecked.
                return;
            }

            match value {
                None => {
                    if dep.required {
                        errors.push(ValidationError::missing(
                            row.name(),
                            &rule.field,
                            format!("required when {} = {}", dep.field, dep.value.as_text()),
                        ));
                    }
                }
                Some(v) => {
                    self.check_value(row, rule, pattern, &v.as_text(), errors);
                }
            }
            return;
        }

        if let Some(v) = value {
            self.check_value(row, rule, pattern, &v.as_text(), errors);
        }
    }

    /// Allowed-value and format checks; only ever reached with a present value.
    fn check_value(
        &self,
        row: &InventoryRow,
        rule: &FieldRule,
        pattern: Option<&Regex>,
        text: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if !rule.allowed_values.is_empty() && !rule.allowed_values.iter().any(|a| a == text) {
            errors.push(ValidationError::invalid(
                row.name(),
                &rule.field,
                format!(
                    "value '{}' is not one of [{}]",
                    text,
                    rule.allowed_values.join(", ")
                ),
            ));
        }

        if let (Some(regex), Some(raw)) = (pattern, &rule.pattern) {
            if !regex.is_match(text) {
                errors.push(ValidationError::invalid(
                    row.name(),
                    &rule.field,
                    format!("value '{}' does not match pattern '{}'", text, raw),
                ));
            }
        }
    }

    /// Validate every comma-separated entry of a domain list field, listing all
    /// invalid entries in one aggregated error.
    fn check_domain_list(&self, row: &InventoryRow, field: &str) -> Option<ValidationError> {
        let text = row.text(field)?;

        let invalid: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .filter(|item| !self.is_hostname(item))
            .collect();

        if invalid.is_empty() {
            None
        } else {
            Some(ValidationError::invalid(
                row.name(),
                field,
                format!("invalid hostnames: {}", invalid.join(", ")),
            ))
        }
    }

    fn is_hostname(&self, item: &str) -> bool {
        item.len() <= 253
            && item.split('.').all(|label| label.len() <= 63)
            && self.hostname.is_match(item)
    }
}

/// Validate the full inventory table.
///
/// When the source declares a column header, the drift pre-check runs first:
/// schema drift aborts the pass before any per-row work. A headerless source
/// has nothing to drift, so it goes straight to the per-row checks. Errors
/// from all rows and all rule kinds accumulate into one list, in row order;
/// policy (block vs. warn) is the caller's.
pub fn validate_table(
    inventory: &Inventory,
    schema: &RuleSchema,
) -> RulesResult<Vec<ValidationError>> {
    if !inventory.columns.is_empty() {
        schema.check_columns(&inventory.columns)?;
    }

    let validator = RowValidator::new(schema)?;
    let mut errors = Vec::new();
    for row in &inventory.load_balancers {
        errors.extend(validator.validate_row(row));
    }

    debug!(
        "Validated {} rows, {} errors",
        inventory.load_balancers.len(),
        errors.len()
    );
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::FieldRule;
    use lbforge_inventory::InventoryRow;

    fn validate(schema: &RuleSchema, row: &InventoryRow) -> Vec<ValidationError> {
        RowValidator::new(schema).unwrap().validate_row(row)
    }

    fn clean_row() -> InventoryRow {
        InventoryRow::default()
            .with("lb_name", "web-01")
            .with("domains", "app.example.com")
    }

    #[test]
    fn clean_row_has_no_errors() {
        let schema = RuleSchema::standard();
        assert!(validate(&schema, &clean_row()).is_empty());
    }

    #[test]
    fn required_field_missing_emits_exactly_one_error() {
        let schema = RuleSchema::standard();
        let row = InventoryRow::default().with("lb_name", "web-01");
        let errors = validate(&schema, &row);

        let domain_errors: Vec<_> = errors.iter().filter(|e| e.field == "domains").collect();
        assert_eq!(domain_errors.len(), 1);
        assert_eq!(domain_errors[0].kind, ErrorKind::FieldMissing);
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let schema = RuleSchema::standard();
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("domains", "   ");
        let errors = validate(&schema, &row);
        assert!(errors
            .iter()
            .any(|e| e.field == "domains" && e.kind == ErrorKind::FieldMissing));
    }

    #[test]
    fn untriggered_dependency_is_never_checked() {
        let schema = RuleSchema::standard();
        // create_origin_pool absent: none of the origin-pool fields are required,
        // and a present value on one of them is left unchecked.
        let row = clean_row().with("origin_server_type", "not-a-valid-kind");
        let errors = validate(&schema, &row);
        assert!(errors.iter().all(|e| e.field != "origin_server_type"));
        assert!(errors.iter().all(|e| e.field != "origin_pool_name"));
    }

    #[test]
    fn triggered_dependency_requires_and_checks_values() {
        let schema = RuleSchema::standard();
        let row = clean_row()
            .with("create_origin_pool", true)
            .with("origin_server_type", "carrier_pigeon")
            .with("origin_port", 8080)
            .with("network_type", "inside")
            .with("site_name", "dc1-site");
        let errors = validate(&schema, &row);

        // origin_pool_name missing under the trigger
        assert!(errors
            .iter()
            .any(|e| e.field == "origin_pool_name" && e.kind == ErrorKind::FieldMissing));
        // origin_server_type present but outside the allowed set
        assert!(errors
            .iter()
            .any(|e| e.field == "origin_server_type" && e.kind == ErrorKind::FieldInvalid));
        // origin_port satisfies its pattern
        assert!(errors.iter().all(|e| e.field != "origin_port"));
    }

    #[test]
    fn false_trigger_requires_existing_pool_reference() {
        let schema = RuleSchema::standard();
        let row = clean_row().with("create_origin_pool", false);
        let errors = validate(&schema, &row);
        assert!(errors
            .iter()
            .any(|e| e.field == "existing_origin_pool_name" && e.kind == ErrorKind::FieldMissing));

        // Absent flag is not the same as an explicit false: no requirement fires.
        let errors = validate(&schema, &clean_row());
        assert!(errors.iter().all(|e| e.field != "existing_origin_pool_name"));
    }

    #[test]
    fn absent_optional_value_never_produces_field_invalid() {
        let schema = RuleSchema::standard();
        // lb_type is optional with an allowed set; leaving it out is fine.
        let errors = validate(&schema, &clean_row());
        assert!(errors.iter().all(|e| e.kind != ErrorKind::FieldInvalid));
    }

    #[test]
    fn domain_list_error_names_only_invalid_entries() {
        let schema = RuleSchema::standard();
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("domains", "good.example.com, bad_host!, another.good.org");
        let errors = validate(&schema, &row);

        let error = errors
            .iter()
            .find(|e| e.field == "domains")
            .expect("domains error");
        assert!(error.message.contains("bad_host!"));
        assert!(!error.message.contains("good.example.com"));
        assert!(!error.message.contains("another.good.org"));
    }

    #[test]
    fn hostname_labels_reject_edge_hyphens() {
        let schema = RuleSchema::standard();
        let validator = RowValidator::new(&schema).unwrap();
        assert!(validator.is_hostname("a-b.example.com"));
        assert!(validator.is_hostname("example"));
        assert!(!validator.is_hostname("-leading.example.com"));
        assert!(!validator.is_hostname("trailing-.example.com"));
        assert!(!validator.is_hostname("under_score.example.com"));
        assert!(!validator.is_hostname("dot..dot.com"));
    }

    #[test]
    fn csrf_domains_checked_only_when_flag_set() {
        let schema = RuleSchema::standard();
        let base = clean_row().with("csrf_custom_domains", "bad_host!");

        let errors = validate(&schema, &base);
        assert!(errors.iter().all(|e| e.field != "csrf_custom_domains"));

        let row = base
            .with("enable_csrf", true)
            .with("csrf_policy_mode", "custom_domains");
        let errors = validate(&schema, &row);
        assert!(errors
            .iter()
            .any(|e| e.field == "csrf_custom_domains" && e.kind == ErrorKind::FieldInvalid));
    }

    #[test]
    fn error_order_follows_schema_then_lists_then_crossfield() {
        let schema = RuleSchema::standard();
        let row = InventoryRow::default()
            .with("lb_name", "UPPER")
            .with("domains", "bad_host!")
            .with("lb_type", "quic")
            .with("advertise_on_public_default_vip", true)
            .with("advertise_custom", true)
            .with("site_network", "site");
        let errors = validate(&schema, &row);

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        let name_pos = fields.iter().position(|f| *f == "lb_name").unwrap();
        let type_pos = fields.iter().position(|f| *f == "lb_type").unwrap();
        let domains_pos = fields.iter().position(|f| *f == "domains").unwrap();
        let conflict_pos = errors
            .iter()
            .position(|e| e.kind == ErrorKind::CrossFieldConflict)
            .unwrap();

        assert!(name_pos < type_pos);
        assert!(type_pos < domains_pos);
        assert!(domains_pos < conflict_pos);
    }

    #[test]
    fn validation_is_idempotent() {
        let schema = RuleSchema::standard();
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("create_origin_pool", true)
            .with("advertise_custom", true);
        let first = validate(&schema, &row);
        let second = validate(&schema, &row);
        assert_eq!(first, second);
    }

    #[test]
    fn unconditional_rule_checks_present_values() {
        let schema = RuleSchema::new(vec![FieldRule::new("lb_port").pattern("[0-9]+")]);
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("lb_port", "eighty");
        let errors = validate(&schema, &row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::FieldInvalid);
    }

    #[test]
    fn pattern_is_full_match() {
        let schema = RuleSchema::new(vec![FieldRule::new("lb_port").pattern("[0-9]+")]);
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("lb_port", "80 or so");
        let errors = validate(&schema, &row);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn malformed_pattern_fails_at_construction() {
        let schema = RuleSchema::new(vec![FieldRule::new("lb_port").pattern("[0-9")]);
        let err = RowValidator::new(&schema).unwrap_err();
        assert!(matches!(err, RulesError::InvalidPattern { field, .. } if field == "lb_port"));
    }
}
