//! Optional `.ngenv.toml` project defaults.

use serde::Deserialize;

use super::AppError;
use super::descriptor::is_identifier;

/// Parsed `.ngenv.toml`. Every field is optional; CLI flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub project: Option<String>,
    pub source_root: Option<String>,
    pub folder: Option<String>,
    pub backup: Option<bool>,
    pub global_namespace: Option<String>,
}

/// Parse tool configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ToolConfig, AppError> {
    let config: ToolConfig = toml::from_str(content)?;
    if let Some(ns) = &config.defaults.global_namespace
        && !is_identifier(ns)
    {
        return Err(AppError::config_error(format!(
            "Invalid .ngenv.toml: global_namespace '{}' is not a JavaScript identifier",
            ns
        )));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let toml = r#"
[defaults]
project = "shop"
source_root = "apps/shop/src"
backup = false
global_namespace = "APP_ENV"
"#;
        let config = parse_config_content(toml).unwrap();
        assert_eq!(config.defaults.project.as_deref(), Some("shop"));
        assert_eq!(config.defaults.source_root.as_deref(), Some("apps/shop/src"));
        assert_eq!(config.defaults.backup, Some(false));
        assert_eq!(config.defaults.folder, None);
    }

    #[test]
    fn empty_content_uses_defaults() {
        assert_eq!(parse_config_content("").unwrap(), ToolConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_content("[defaults]\nprojekt = \"x\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }

    #[test]
    fn namespace_must_be_identifier() {
        let err = parse_config_content("[defaults]\nglobal_namespace = \"my-env\"\n").unwrap_err();
        assert!(err.to_string().contains("global_namespace"));
    }
}
