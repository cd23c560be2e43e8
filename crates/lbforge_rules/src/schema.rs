//! The declarative rule schema.

use lbforge_inventory::FieldValue;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Object-name pattern for F5 XC resources (lowercase RFC-1035 style).
pub const NAME_PATTERN: &str = "[a-z0-9]([a-z0-9-]*[a-z0-9])?";

/// Port numbers are stringified digits.
pub const PORT_PATTERN: &str = "[0-9]+";

/// Conditional trigger: the rule only activates when another field in the same
/// row equals `value` exactly (including boolean equality).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependsOn {
    pub field: String,
    pub value: FieldValue,
    /// When active, the dependent field must be present.
    pub required: bool,
}

/// Constraint set for a single inventory field.
///
/// When `depends_on` is set, `allowed_values` and `pattern` apply only inside
/// the triggered branch; an untriggered dependency leaves the value unchecked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub required: bool,
    pub allowed_values: Vec<String>,
    /// Full-match format pattern; the validator anchors it on both ends.
    pub pattern: Option<String>,
    pub depends_on: Option<DependsOn>,
}

impl FieldRule {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            required: false,
            allowed_values: Vec::new(),
            pattern: None,
            depends_on: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn allowed(mut self, values: &[&str]) -> Self {
        self.allowed_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Require this field whenever `field` equals `value`.
    pub fn required_when(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.depends_on = Some(DependsOn {
            field: field.into(),
            value: value.into(),
            required: true,
        });
        self
    }
}

/// The canonical, immutable list of constrainable fields and their rules.
///
/// Constructed once at startup and consulted read-only by every validation
/// pass. Entry order is the schema iteration order and therefore part of the
/// engine's observable output contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSchema {
    entries: Vec<FieldRule>,
}

impl RuleSchema {
    pub fn new(entries: Vec<FieldRule>) -> Self {
        Self { entries }
    }

    /// The canonical schema for the load-balancer inventory.
    pub fn standard() -> Self {
        Self::new(vec![
            FieldRule::new("lb_name").required().pattern(NAME_PATTERN),
            FieldRule::new("domains").required(),
            FieldRule::new("lb_type").allowed(&["http", "https", "https_auto_cert"]),
            FieldRule::new("lb_port").pattern(PORT_PATTERN),
            FieldRule::new("origin_pool_name")
                .required_when("create_origin_pool", true)
                .pattern(NAME_PATTERN),
            FieldRule::new("origin_server_type")
                .required_when("create_origin_pool", true)
                .allowed(&[
                    "public_ip",
                    "private_ip",
                    "public_name",
                    "private_name",
                    "k8s_service",
                ]),
            FieldRule::new("origin_port")
                .required_when("create_origin_pool", true)
                .pattern(PORT_PATTERN),
            FieldRule::new("existing_origin_pool_name").required_when("create_origin_pool", false),
            FieldRule::new("healthcheck_name")
                .required_when("enable_healthcheck", true)
                .pattern(NAME_PATTERN),
            FieldRule::new("healthcheck_type")
                .required_when("enable_healthcheck", true)
                .allowed(&["http", "tcp"]),
            FieldRule::new("app_firewall_name").required_when("enable_app_firewall", true),
            FieldRule::new("csrf_policy_mode")
                .required_when("enable_csrf", true)
                .allowed(&["all_domains", "custom_domains"]),
            FieldRule::new("custom_cert_namespace").pattern(NAME_PATTERN),
        ])
    }

    /// Iterate all entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.entries.iter()
    }

    /// Lookup a rule by field name.
    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.entries.iter().find(|r| r.field == field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pre-check the data source's column set against the schema.
    ///
    /// A missing column means the source has drifted (renamed or misspelled
    /// header); per-row checks would silently report every row as missing the
    /// field, so this is fatal and reported once instead.
    pub fn check_columns(&self, columns: &[String]) -> Result<(), RulesError> {
        let missing: Vec<String> = self
            .entries
            .iter()
            .filter(|rule| !columns.iter().any(|c| *c == rule.field))
            .map(|rule| rule.field.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RulesError::SchemaMismatch { columns: missing })
        }
    }
}
