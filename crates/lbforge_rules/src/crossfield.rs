//! Hand-coded multi-field invariants.
//!
//! These rules have multi-field trigger shapes that the flat per-field schema
//! cannot encode, so each is kept as an explicit, named check. All checks run
//! on every row, independent of earlier failures and of each other.

use lbforge_inventory::InventoryRow;

use crate::error::ValidationError;

/// Origin server kinds that live on a private network and therefore need a
/// site to be reachable from.
const PRIVATE_ORIGIN_TYPES: [&str; 3] = ["private_ip", "private_name", "k8s_service"];

const SITE_NETWORKS: [&str; 2] = ["inside", "outside"];

const ADVERTISE_TARGETS: [&str; 2] = ["site", "virtual_site"];

/// Run all cross-field checks for one row.
pub fn check(row: &InventoryRow) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    advertise_conflict(row, &mut errors);
    private_origin_site(row, &mut errors);
    custom_advertise_target(row, &mut errors);
    errors
}

/// The two advertisement modes are mutually exclusive.
fn advertise_conflict(row: &InventoryRow, errors: &mut Vec<ValidationError>) {
    if row.flag("advertise_on_public_default_vip") && row.flag("advertise_custom") {
        errors.push(ValidationError::conflict(
            row.name(),
            "advertise_custom",
            "advertise_on_public_default_vip and advertise_custom are mutually exclusive",
        ));
    }
}

/// A new origin pool with a private-network server kind needs a site: both the
/// network side to attach to and the site (or virtual site) name.
fn private_origin_site(row: &InventoryRow, errors: &mut Vec<ValidationError>) {
    if !row.flag("create_origin_pool") {
        return;
    }
    let is_private = row
        .text("origin_server_type")
        .map(|t| PRIVATE_ORIGIN_TYPES.contains(&t.as_str()))
        .unwrap_or(false);
    if !is_private {
        return;
    }

    match row.text("network_type") {
        None => errors.push(ValidationError::conflict(
            row.name(),
            "network_type",
            "required for private origin server types",
        )),
        Some(t) if !SITE_NETWORKS.contains(&t.as_str()) => {
            errors.push(ValidationError::conflict(
                row.name(),
                "network_type",
                format!("value '{}' is not one of [{}]", t, SITE_NETWORKS.join(", ")),
            ))
        }
        Some(_) => {}
    }

    if row.value("site_name").is_none() {
        errors.push(ValidationError::conflict(
            row.name(),
            "site_name",
            "required for private origin server types",
        ));
    }
}

/// Custom advertisement needs a target kind; advertising on a virtual site
/// additionally needs the namespace the virtual site lives in.
fn custom_advertise_target(row: &InventoryRow, errors: &mut Vec<ValidationError>) {
    if !row.flag("advertise_custom") {
        return;
    }

    match row.text("site_network") {
        None => errors.push(ValidationError::conflict(
            row.name(),
            "site_network",
            "required when advertise_custom is set",
        )),
        Some(t) if !ADVERTISE_TARGETS.contains(&t.as_str()) => {
            errors.push(ValidationError::conflict(
                row.name(),
                "site_network",
                format!(
                    "value '{}' is not one of [{}]",
                    t,
                    ADVERTISE_TARGETS.join(", ")
                ),
            ))
        }
        Some(target) => {
            if target == "virtual_site" && row.value("namespace").is_none() {
                errors.push(ValidationError::conflict(
                    row.name(),
                    "namespace",
                    "required when advertising on a virtual site",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn row() -> InventoryRow {
        InventoryRow::default().with("lb_name", "web-01")
    }

    #[test]
    fn both_advertise_flags_is_exactly_one_conflict() {
        let row = row()
            .with("advertise_on_public_default_vip", true)
            .with("advertise_custom", true)
            .with("site_network", "site");
        let errors = check(&row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::CrossFieldConflict);
    }

    #[test]
    fn single_advertise_flag_is_fine() {
        let row = row().with("advertise_on_public_default_vip", true);
        assert!(check(&row).is_empty());
    }

    #[test]
    fn private_origin_requires_site_fields() {
        let row = row()
            .with("create_origin_pool", true)
            .with("origin_server_type", "private_ip");
        let errors = check(&row);
        assert!(errors.iter().any(|e| e.field == "network_type"));
        assert!(errors.iter().any(|e| e.field == "site_name"));
    }

    #[test]
    fn private_origin_rejects_unknown_network_side() {
        let row = row()
            .with("create_origin_pool", true)
            .with("origin_server_type", "k8s_service")
            .with("network_type", "sideways")
            .with("site_name", "dc1-site");
        let errors = check(&row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "network_type");
    }

    #[test]
    fn public_origin_needs_no_site() {
        let row = row()
            .with("create_origin_pool", true)
            .with("origin_server_type", "public_ip");
        assert!(check(&row).is_empty());
    }

    #[test]
    fn custom_advertise_needs_target() {
        let row = row().with("advertise_custom", true);
        let errors = check(&row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "site_network");
    }

    #[test]
    fn virtual_site_target_needs_namespace() {
        let row = row()
            .with("advertise_custom", true)
            .with("site_network", "virtual_site");
        let errors = check(&row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "namespace");

        let row = row.with("namespace", "shared");
        assert!(check(&row).is_empty());
    }

    #[test]
    fn site_target_needs_no_namespace() {
        let row = row()
            .with("advertise_custom", true)
            .with("site_network", "site");
        assert!(check(&row).is_empty());
    }

    #[test]
    fn checks_are_independent() {
        // All three invariants violated at once: each reports its own error.
        let row = row()
            .with("advertise_on_public_default_vip", true)
            .with("advertise_custom", true)
            .with("create_origin_pool", true)
            .with("origin_server_type", "private_name");
        let errors = check(&row);
        assert!(errors.iter().any(|e| e.field == "advertise_custom"));
        assert!(errors.iter().any(|e| e.field == "network_type"));
        assert!(errors.iter().any(|e| e.field == "site_name"));
        assert!(errors.iter().any(|e| e.field == "site_network"));
    }
}
