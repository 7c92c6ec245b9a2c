//! Typed, validated construction options.
//!
//! Options are TOML text parsed once when a node is declared. Keys are
//! checked against the attribute list of the view kind before values are
//! deserialized, so a misspelled attribute is reported by name instead of
//! being silently ignored.

use arbor_core::{Color, Insets};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::env::EnvOverrides;
use crate::error::ConfigError;
use crate::node::Priority;

/// Attributes every node accepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Space between the border and the content.
    pub padding: Insets,
    /// Border width.
    pub border: Insets,
    /// Frame fill drawn before the widget.
    pub background: Option<Color>,
    /// Ignore input.
    pub disabled: bool,
    /// Resolution priority.
    pub priority: Priority,
    /// Environment overrides for this subtree.
    pub env: EnvOverrides,
}

impl NodeConfig {
    /// Recognized option keys.
    pub const ATTRIBUTES: &'static [&'static str] =
        &["padding", "border", "background", "disabled", "priority", "env"];

    /// Parses node options for a view of kind `view`.
    pub fn parse(view: &'static str, options: &str) -> Result<Self, ConfigError> {
        parse_options(view, Self::ATTRIBUTES, options)
    }
}

/// Parses `options` into `C`, rejecting keys outside `attributes`.
pub fn parse_options<C: DeserializeOwned>(
    view: &'static str,
    attributes: &[&str],
    options: &str,
) -> Result<C, ConfigError> {
    let table: toml::Table = options
        .parse()
        .map_err(|source| ConfigError::Invalid { view, source })?;

    if let Some(name) = table.keys().find(|key| !attributes.contains(&key.as_str())) {
        return Err(ConfigError::UnknownAttribute {
            view,
            name: name.clone(),
        });
    }

    toml::Value::Table(table)
        .try_into()
        .map_err(|source| ConfigError::Invalid { view, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_attributes() {
        let config = NodeConfig::parse(
            "Panel",
            r#"
            padding = [4, 8]
            border = 1
            background = [0, 0, 0, 128]
            disabled = true
            priority = "high"
            env = { font_size = 18 }
            "#,
        )
        .unwrap();

        assert_eq!(config.padding, Insets::symmetric(4, 8));
        assert_eq!(config.border, Insets::all(1));
        assert_eq!(config.background, Some(Color::rgba(0, 0, 0, 128)));
        assert!(config.disabled);
        assert_eq!(config.priority, Priority::High);
        assert_eq!(config.env.font_size, Some(18));
    }

    #[test]
    fn test_empty_options_are_defaults() {
        let config = NodeConfig::parse("Panel", "").unwrap();
        assert_eq!(config.padding, Insets::ZERO);
        assert_eq!(config.priority, Priority::Normal);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_unknown_attribute_is_named() {
        let err = NodeConfig::parse("Panel", "margin = 3").unwrap_err();
        match err {
            ConfigError::UnknownAttribute { view, name } => {
                assert_eq!(view, "Panel");
                assert_eq!(name, "margin");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_value_shape_is_invalid() {
        let err = NodeConfig::parse("Panel", "padding = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { view: "Panel", .. }));
    }

    #[test]
    fn test_unknown_env_key_is_invalid() {
        assert!(NodeConfig::parse("Panel", "env = { shade = 1 }").is_err());
    }
}
