//! Variable-file rendering.
//!
//! Pure transform of (validated row, provider record) into the `.tfvars` text
//! handed unmodified to terraform. Only fields present on the row are emitted;
//! the section layout and key alignment follow the files operators are used to
//! reading.

use lbforge_inventory::{FieldValue, InventoryRow, ProviderConfig};

const SECTION_BAR: &str = "####################################################";

/// How a field is formatted in HCL.
#[derive(Debug, Clone, Copy)]
enum Fmt {
    /// Quoted string
    Str,
    /// Lowercase boolean
    Bool,
    /// Comma-separated cell rendered as a list of quoted strings
    List,
    /// Comma-separated `k=v` pairs rendered as a map
    Map,
    /// Integer, or `null` when unparsable
    Num,
}

/// Top-level origin pool variables, in emission order.
const ORIGIN_POOL_VARS: [(&str, Fmt); 11] = [
    ("origin_pool_name", Fmt::Str),
    ("origin_server_type", Fmt::Str),
    ("origin_port", Fmt::Num),
    ("origin_labels", Fmt::Map),
    ("network_type", Fmt::Str),
    ("site_name", Fmt::Str),
    ("dns_name_private", Fmt::Str),
    ("k8s_service_name", Fmt::Str),
    ("ip_address_private", Fmt::Str),
    ("ip_address_public", Fmt::Str),
    ("dns_name_public", Fmt::Str),
];

const HEALTHCHECK_VARS: [(&str, Fmt); 3] = [
    ("healthcheck_name", Fmt::Str),
    ("healthcheck_type", Fmt::Str),
    ("healthcheck_http_path", Fmt::Str),
];

/// Attributes of the load balancer object itself, in emission order.
const LB_OBJECT_ATTRS: [(&str, Fmt); 23] = [
    ("lb_name", Fmt::Str),
    ("domains", Fmt::List),
    ("lb_labels", Fmt::Map),
    ("ip_threat_categories", Fmt::List),
    ("create_origin_pool", Fmt::Bool),
    ("existing_origin_pool_name", Fmt::Str),
    ("enable_bot_defense", Fmt::Bool),
    ("advertise_on_public_default_vip", Fmt::Bool),
    ("advertise_custom", Fmt::Bool),
    ("custom_site_name", Fmt::Str),
    ("site_network", Fmt::Str),
    ("app_firewall_name", Fmt::Str),
    ("enable_app_firewall", Fmt::Bool),
    ("enable_csrf", Fmt::Bool),
    ("csrf_policy_mode", Fmt::Str),
    ("csrf_custom_domains", Fmt::Str),
    ("lb_type", Fmt::Str),
    ("lb_port", Fmt::Num),
    ("add_hsts", Fmt::Bool),
    ("http_redirect", Fmt::Bool),
    ("custom_cert_names", Fmt::Str),
    ("custom_cert_namespace", Fmt::Str),
    ("enable_healthcheck", Fmt::Bool),
];

/// Render the tfvars content for one load balancer.
pub fn render(row: &InventoryRow, provider: &ProviderConfig) -> String {
    let mut content: Vec<String> = vec![
        SECTION_BAR.to_string(),
        "# Global & Provider Variables".to_string(),
        SECTION_BAR.to_string(),
        format!("api_p12_file = {}", quote(&provider.api_p12_file)),
        format!("tenant_name  = {}", quote(&provider.tenant_name)),
        format!("api_url      = {}", quote(&provider.api_url)),
        format!(
            "namespace    = {}",
            quote(&row.text("namespace").unwrap_or_default())
        ),
        String::new(),
    ];

    if row.flag("create_origin_pool") {
        content.push(SECTION_BAR.to_string());
        content.push("# Origin Pool Variables (Top-Level)".to_string());
        content.push(SECTION_BAR.to_string());
        for (name, fmt) in ORIGIN_POOL_VARS {
            if let Some(value) = row.value(name) {
                content.push(format!("{:<25} = {}", name, format_value(value, fmt)));
            }
        }
        content.push(String::new());

        if row.flag("enable_healthcheck") {
            content.push(SECTION_BAR.to_string());
            content.push("# Health Check Variables (Top-Level)".to_string());
            content.push(SECTION_BAR.to_string());
            for (name, fmt) in HEALTHCHECK_VARS {
                if let Some(value) = row.value(name) {
                    content.push(format!("{:<21} = {}", name, format_value(value, fmt)));
                }
            }
            content.push(String::new());
        }
    }

    let object_lines: Vec<String> = LB_OBJECT_ATTRS
        .iter()
        .filter_map(|(name, fmt)| {
            row.value(name)
                .map(|value| format!("    {:<31} = {}", name, format_value(value, *fmt)))
        })
        .collect();

    content.push(SECTION_BAR.to_string());
    content.push("# Load Balancer Object".to_string());
    content.push(SECTION_BAR.to_string());
    content.push("load_balancers = [".to_string());
    content.push("  {".to_string());
    content.push(object_lines.join(",\n"));
    content.push("  }".to_string());
    content.push("]".to_string());

    content.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

fn format_value(value: &FieldValue, fmt: Fmt) -> String {
    match fmt {
        Fmt::Str => quote(&value.as_text()),
        Fmt::Bool => value.is_true().to_string(),
        Fmt::Num => match value {
            FieldValue::Int(i) => i.to_string(),
            other => other
                .as_text()
                .trim()
                .parse::<i64>()
                .map(|i| i.to_string())
                .unwrap_or_else(|_| "null".to_string()),
        },
        Fmt::List => {
            let items: Vec<String> = value
                .as_text()
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(quote)
                .collect();
            format!("[{}]", items.join(", "))
        }
        Fmt::Map => {
            let entries: Vec<String> = value
                .as_text()
                .split(',')
                .filter_map(|item| item.split_once('='))
                .map(|(k, v)| format!("{} = {}", quote(k.trim()), quote(v.trim())))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbforge_inventory::InventoryRow;

    fn provider() -> ProviderConfig {
        ProviderConfig {
            api_url: "https://tenant.console.ves.volterra.io/api".to_string(),
            tenant_name: "tenant".to_string(),
            api_p12_file: "creds/api.p12".to_string(),
        }
    }

    #[test]
    fn renders_provider_block_always() {
        let row = InventoryRow::default().with("lb_name", "web-01");
        let content = render(&row, &provider());
        assert!(content.contains("api_url      = \"https://tenant.console.ves.volterra.io/api\""));
        assert!(content.contains("tenant_name  = \"tenant\""));
        // Absent namespace renders as an empty string.
        assert!(content.contains("namespace    = \"\""));
    }

    #[test]
    fn origin_pool_block_only_when_flag_set() {
        let base = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("origin_pool_name", "web-pool");
        let content = render(&base, &provider());
        assert!(!content.contains("# Origin Pool Variables"));

        let row = base
            .with("create_origin_pool", true)
            .with("origin_port", 8443);
        let content = render(&row, &provider());
        assert!(content.contains("# Origin Pool Variables"));
        assert!(content.contains(&format!("{:<25} = \"web-pool\"", "origin_pool_name")));
        assert!(content.contains(&format!("{:<25} = 8443", "origin_port")));
    }

    #[test]
    fn healthcheck_block_requires_both_flags() {
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("enable_healthcheck", true)
            .with("healthcheck_name", "web-hc");
        let content = render(&row, &provider());
        assert!(!content.contains("# Health Check Variables"));

        let row = row.with("create_origin_pool", true);
        let content = render(&row, &provider());
        assert!(content.contains("# Health Check Variables"));
        assert!(content.contains(&format!("{:<21} = \"web-hc\"", "healthcheck_name")));
    }

    #[test]
    fn lb_object_lists_maps_and_booleans() {
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("domains", "app.example.com, api.example.com")
            .with("lb_labels", "env=prod, team=platform")
            .with("http_redirect", true)
            .with("add_hsts", false)
            .with("lb_port", 443);
        let content = render(&row, &provider());

        assert!(content.contains("load_balancers = ["));
        assert!(content.contains(r#"= ["app.example.com", "api.example.com"]"#));
        assert!(content.contains(r#"= {"env" = "prod", "team" = "platform"}"#));
        assert!(content.contains("http_redirect"));
        assert!(content.contains("= false"));
        assert!(content.contains("= 443"));
    }

    #[test]
    fn absent_fields_are_not_emitted() {
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("custom_cert_names", "  ");
        let content = render(&row, &provider());
        assert!(!content.contains("custom_cert_names"));
        assert!(!content.contains("enable_bot_defense"));
    }

    #[test]
    fn unparsable_number_renders_null() {
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("lb_port", "eighty");
        let content = render(&row, &provider());
        assert!(content.contains("lb_port"));
        assert!(content.contains("= null"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let row = InventoryRow::default()
            .with("lb_name", "web-01")
            .with("domains", "app.example.com")
            .with("create_origin_pool", true)
            .with("origin_pool_name", "web-pool");
        assert_eq!(render(&row, &provider()), render(&row, &provider()));
    }
}
