//! Descriptor file bodies.

use std::sync::{LazyLock, OnceLock};

use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::AppError;
use super::values::{EnvironmentValues, parse_scalar};

const TYPESCRIPT_TEMPLATE: &str = "\
export const environment = {
  production: {{ production }},
{% for field in fields %}  {{ field.key }}: {{ field.value }},
{% endfor %}};
";

const BROWSER_GLOBAL_TEMPLATE: &str = "\
(function (window) {
  window.{{ namespace }} = window.{{ namespace }} || {};
  Object.assign(window.{{ namespace }}, {{ values }});
})(this);
";

pub const DEFAULT_GLOBAL_NAMESPACE: &str = "__env";

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Debug, Serialize)]
struct Field {
    key: String,
    value: String,
}

/// Whether an environment name denotes a production build.
pub fn is_production(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.eq_ignore_ascii_case("prod") || n.eq_ignore_ascii_case("production"))
}

/// Render a TypeScript descriptor.
///
/// `production` comes first and is derived from `name`; every value follows
/// in insertion order as a coerced JSON literal.
pub fn render_descriptor(
    name: Option<&str>,
    values: &EnvironmentValues,
) -> Result<String, AppError> {
    let fields: Vec<Field> = values
        .iter()
        .map(|(key, raw)| Field { key: object_key(key), value: parse_scalar(raw).to_literal() })
        .collect();

    render(
        "environment.ts",
        TYPESCRIPT_TEMPLATE,
        context! { production => is_production(name), fields => fields },
    )
}

/// Minimal descriptor exporting only `production: false`.
pub fn render_minimal() -> Result<String, AppError> {
    render_descriptor(None, &EnvironmentValues::new())
}

/// Render an IIFE that assigns the coerced values onto `window.<namespace>`.
pub fn render_browser_global(
    namespace: &str,
    values: &EnvironmentValues,
) -> Result<String, AppError> {
    let object = Value::Object(values.to_json_object());
    render(
        "env.js",
        BROWSER_GLOBAL_TEMPLATE,
        context! { namespace => namespace, values => object.to_string() },
    )
}

/// Whether `key` can appear unquoted as a JavaScript property name.
pub fn is_identifier(key: &str) -> bool {
    IDENTIFIER.is_match(key)
}

fn object_key(key: &str) -> String {
    if is_identifier(key) { key.to_string() } else { Value::String(key.to_string()).to_string() }
}

fn render(name: &str, template: &str, ctx: minijinja::Value) -> Result<String, AppError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env
    });

    env.render_str(template, ctx).map_err(|err| template_render_error(name, err))
}

fn template_render_error(template_name: &str, err: impl std::fmt::Display) -> AppError {
    AppError::TemplateRender { template: template_name.to_string(), reason: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::parse_pairs;

    #[test]
    fn minimal_descriptor() {
        assert_eq!(
            render_minimal().unwrap(),
            "export const environment = {\n  production: false,\n};\n"
        );
    }

    #[test]
    fn production_flag_follows_name() {
        assert!(is_production(Some("prod")));
        assert!(is_production(Some("PRODUCTION")));
        assert!(!is_production(Some("preprod")));
        assert!(!is_production(None));

        let body = render_descriptor(Some("Prod"), &EnvironmentValues::new()).unwrap();
        assert!(body.contains("production: true,"));
    }

    #[test]
    fn fields_follow_insertion_order_with_coercion() {
        let values = parse_pairs(&[
            "apiUrl=https://api.example.com",
            "retries=3",
            "debug=false",
            "hosts=[\"a\",\"b\"]",
        ]);
        let body = render_descriptor(Some("uat"), &values).unwrap();
        assert_eq!(
            body,
            "export const environment = {\n\
             \x20 production: false,\n\
             \x20 apiUrl: \"https://api.example.com\",\n\
             \x20 retries: 3,\n\
             \x20 debug: false,\n\
             \x20 hosts: [\"a\",\"b\"],\n\
             };\n"
        );
    }

    #[test]
    fn non_identifier_keys_are_quoted() {
        let values = parse_pairs(&["api-url=x", "$ok=1"]);
        let body = render_descriptor(None, &values).unwrap();
        assert!(body.contains("  \"api-url\": \"x\",\n"));
        assert!(body.contains("  $ok: 1,\n"));
    }

    #[test]
    fn values_are_not_html_escaped() {
        let values = parse_pairs(&["q=<a&b>"]);
        let body = render_descriptor(None, &values).unwrap();
        assert!(body.contains("q: \"<a&b>\""));
    }

    #[test]
    fn browser_global_assigns_namespace() {
        let values = parse_pairs(&["apiUrl=/api", "debug=true"]);
        let body = render_browser_global("__env", &values).unwrap();
        assert_eq!(
            body,
            "(function (window) {\n\
             \x20 window.__env = window.__env || {};\n\
             \x20 Object.assign(window.__env, {\"apiUrl\":\"/api\",\"debug\":true});\n\
             })(this);\n"
        );
    }
}
