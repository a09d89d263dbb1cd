//! Rule configuration
//!
//! A [`Config`] owns the rule table (rule name -> rule) and the resolved
//! setting of every active rule. Raw settings come from JSON/YAML and accept
//! several shapes:
//!
//! ```yaml
//! rules:
//!   attr-req-value: error          # severity keyword, options = true
//!   tag-name-match: false          # off
//!   lang-style: [warning, case]    # [severity, options]
//!   other-rule:
//!     severity: error
//!     options: { max: 3 }
//! ```

use crate::error::ConfigError;
use crate::issue::Severity;
use crate::rule::Rule;
use crate::rules::builtin_rules;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Resolved setting of an active rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    /// Options after `Rule::validate_config`
    pub options: Value,
}

/// Accepted shapes of a raw rule setting
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRuleSetting {
    Toggle(bool),
    Level(String),
    Tuple(Vec<Value>),
    Full {
        severity: String,
        #[serde(default = "default_options")]
        options: Value,
    },
}

fn default_options() -> Value {
    Value::Bool(true)
}

/// Parse a severity keyword; `None` means "off"
fn parse_level(rule: &str, level: &str) -> Result<Option<Severity>, ConfigError> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    level
        .parse::<Severity>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidSetting {
            rule: rule.to_string(),
            message: format!(
                "Unknown severity \"{}\", expected \"error\", \"warning\" or \"off\"",
                level
            ),
        })
}

impl RawRuleSetting {
    /// Normalize into `(severity, raw options)`; `None` means "off"
    pub fn normalize(self, rule: &str) -> Result<Option<(Severity, Value)>, ConfigError> {
        match self {
            RawRuleSetting::Toggle(false) => Ok(None),
            RawRuleSetting::Toggle(true) => Ok(Some((Severity::Error, default_options()))),
            RawRuleSetting::Level(level) => {
                Ok(parse_level(rule, &level)?.map(|s| (s, default_options())))
            }
            RawRuleSetting::Tuple(items) => {
                let mut items = items.into_iter();
                let level = match items.next() {
                    Some(Value::String(level)) => level,
                    Some(Value::Bool(false)) => return Ok(None),
                    Some(Value::Bool(true)) => Severity::Error.to_string(),
                    _ => {
                        return Err(ConfigError::InvalidSetting {
                            rule: rule.to_string(),
                            message: "Expected [severity, options]".to_string(),
                        })
                    }
                };
                let options = items.next().unwrap_or_else(default_options);
                if items.next().is_some() {
                    return Err(ConfigError::InvalidSetting {
                        rule: rule.to_string(),
                        message: "Expected at most two entries: [severity, options]".to_string(),
                    });
                }
                Ok(parse_level(rule, &level)?.map(|s| (s, options)))
            }
            RawRuleSetting::Full { severity, options } => {
                Ok(parse_level(rule, &severity)?.map(|s| (s, options)))
            }
        }
    }
}

/// Rule table with resolved settings
#[derive(Clone, Default)]
pub struct Config {
    /// Registered rules, in registration order
    rules: Vec<Arc<dyn Rule>>,

    /// Rule name -> index in `rules`
    index: HashMap<String, usize>,

    /// Settings of active rules
    settings: HashMap<String, RuleSetting>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rules", &self.rule_names())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Config {
    /// Create a config from a rule table; every rule starts off
    pub fn new(rules: Vec<Arc<dyn Rule>>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for rule in rules {
            config.register(rule)?;
        }
        Ok(config)
    }

    /// Config holding every built-in rule
    pub fn with_builtin_rules() -> Self {
        let rules = builtin_rules();
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.name().to_string(), i))
            .collect();
        Self {
            rules,
            index,
            settings: HashMap::new(),
        }
    }

    /// Add a rule to the table
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<(), ConfigError> {
        let name = rule.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateRule(name));
        }
        self.index.insert(name, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Get a registered rule by name
    pub fn get_rule(&self, name: &str) -> Result<Arc<dyn Rule>, ConfigError> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.rules[i]))
            .ok_or_else(|| ConfigError::RuleNotFound(name.to_string()))
    }

    /// Names of registered rules, in registration order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Resolve the setting of `rule` from a raw rules object.
    ///
    /// Only `raw[rule.name()]` is read. A missing entry turns the rule off.
    pub fn set_rule_config(&mut self, rule: &dyn Rule, raw: &Value) -> Result<(), ConfigError> {
        let name = rule.name();
        if !self.index.contains_key(name) {
            return Err(ConfigError::RuleNotFound(name.to_string()));
        }
        // A rejected setting leaves the rule off
        self.settings.remove(name);

        let entry = raw.get(name).cloned().unwrap_or(Value::Null);
        let resolved = if entry.is_null() {
            None
        } else {
            let setting: RawRuleSetting =
                serde_json::from_value(entry).map_err(|e| ConfigError::InvalidSetting {
                    rule: name.to_string(),
                    message: e.to_string(),
                })?;
            setting.normalize(name)?
        };

        match resolved {
            Some((severity, options)) => {
                let options = rule.validate_config(&options)?;
                debug!("rule {} active as {} with options {}", name, severity, options);
                self.settings
                    .insert(name.to_string(), RuleSetting { severity, options });
            }
            None => debug!("rule {} turned off", name),
        }
        Ok(())
    }

    /// Apply every entry of a raw rules object
    pub fn apply(&mut self, raw: &Map<String, Value>) -> Result<(), ConfigError> {
        let wrapped = Value::Object(raw.clone());
        for name in raw.keys() {
            let rule = self.get_rule(name)?;
            self.set_rule_config(rule.as_ref(), &wrapped)?;
        }
        Ok(())
    }

    /// Turn every registered rule on with its default options
    pub fn enable_all(&mut self, severity: Severity) -> Result<(), ConfigError> {
        let raw: Map<String, Value> = self
            .rule_names()
            .into_iter()
            .map(|name| (name.to_string(), Value::String(severity.to_string())))
            .collect();
        self.apply(&raw)
    }

    /// Built-in rules configured from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Built-in rules configured from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Load configuration from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(ConfigError::Invalid(format!(
                "Unknown config file format: {}",
                ext
            ))),
        }
    }

    /// Accepts either `{ rules: {...} }` or a bare rules object
    fn from_value(value: Value) -> Result<Self, ConfigError> {
        let rules = match value {
            Value::Null => Map::new(),
            Value::Object(mut map) => match map.remove("rules") {
                Some(Value::Object(rules)) => rules,
                Some(Value::Null) => Map::new(),
                Some(_) => {
                    return Err(ConfigError::Invalid(
                        "\"rules\" must be a mapping".to_string(),
                    ))
                }
                None => map,
            },
            _ => {
                return Err(ConfigError::Invalid(
                    "configuration must be a mapping".to_string(),
                ))
            }
        };

        let mut config = Self::with_builtin_rules();
        config.apply(&rules)?;
        Ok(config)
    }

    /// Resolved setting of an active rule
    pub fn setting(&self, name: &str) -> Option<&RuleSetting> {
        self.settings.get(name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.settings.contains_key(name)
    }

    /// Active rules with their settings, in registration order
    pub fn active_rules(&self) -> impl Iterator<Item = (&dyn Rule, &RuleSetting)> + '_ {
        self.rules.iter().filter_map(|rule| {
            self.settings
                .get(rule.name())
                .map(|setting| (rule.as_ref(), setting))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::node::Node;
    use crate::rule::RuleContext;
    use serde_json::json;

    struct Foo;

    impl Rule for Foo {
        fn name(&self) -> &str {
            "foo"
        }

        fn lint(&self, _: &Node, _: &Value, _: &mut RuleContext<'_>) -> Result<(), RuleError> {
            Ok(())
        }
    }

    fn foo_config() -> Config {
        Config::new(vec![Arc::new(Foo)]).unwrap()
    }

    fn resolve(raw: Value) -> Result<Option<RuleSetting>, ConfigError> {
        let mut config = foo_config();
        config.set_rule_config(&Foo, &raw)?;
        Ok(config.setting("foo").cloned())
    }

    #[test]
    fn test_get_rule() {
        let config = foo_config();
        assert_eq!(config.get_rule("foo").unwrap().name(), "foo");
        assert!(matches!(
            config.get_rule("bar"),
            Err(ConfigError::RuleNotFound(name)) if name == "bar"
        ));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let result = Config::new(vec![Arc::new(Foo), Arc::new(Foo)]);
        assert!(matches!(result, Err(ConfigError::DuplicateRule(_))));
    }

    #[test]
    fn test_severity_keywords() {
        let setting = resolve(json!({ "foo": "error" })).unwrap().unwrap();
        assert_eq!(setting.severity, Severity::Error);
        assert_eq!(setting.options, json!(true));

        let setting = resolve(json!({ "foo": "warning" })).unwrap().unwrap();
        assert_eq!(setting.severity, Severity::Warning);
    }

    #[test]
    fn test_off_forms() {
        assert_eq!(resolve(json!({ "foo": "off" })).unwrap(), None);
        assert_eq!(resolve(json!({ "foo": false })).unwrap(), None);
        assert_eq!(resolve(json!({ "foo": null })).unwrap(), None);
        assert_eq!(resolve(json!({})).unwrap(), None);
        assert_eq!(resolve(json!({ "foo": ["off", 3] })).unwrap(), None);
    }

    #[test]
    fn test_tuple_and_object_forms() {
        let setting = resolve(json!({ "foo": ["warning", { "max": 3 }] }))
            .unwrap()
            .unwrap();
        assert_eq!(setting.severity, Severity::Warning);
        assert_eq!(setting.options, json!({ "max": 3 }));

        let setting = resolve(json!({ "foo": { "severity": "error", "options": "x" } }))
            .unwrap()
            .unwrap();
        assert_eq!(setting.severity, Severity::Error);
        assert_eq!(setting.options, json!("x"));

        let setting = resolve(json!({ "foo": true })).unwrap().unwrap();
        assert_eq!(setting.severity, Severity::Error);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            resolve(json!({ "foo": "loud" })),
            Err(ConfigError::InvalidSetting { rule, .. }) if rule == "foo"
        ));
        assert!(resolve(json!({ "foo": 12 })).is_err());
        assert!(resolve(json!({ "foo": [] })).is_err());
        assert!(resolve(json!({ "foo": ["error", 1, 2] })).is_err());
    }

    #[test]
    fn test_setting_can_be_turned_off_again() {
        let mut config = foo_config();
        config.set_rule_config(&Foo, &json!({ "foo": "error" })).unwrap();
        assert!(config.is_active("foo"));
        config.set_rule_config(&Foo, &json!({ "foo": "off" })).unwrap();
        assert!(!config.is_active("foo"));
    }

    #[test]
    fn test_validation_failure_names_rule() {
        let mut config = Config::with_builtin_rules();
        let rule = config.get_rule("lang-style").unwrap();
        let err = config
            .set_rule_config(rule.as_ref(), &json!({ "lang-style": ["error", "strict"] }))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidRuleOptions(_)));
        assert!(err.to_string().contains("\"lang-style\""));
        assert!(!config.is_active("lang-style"));
    }

    #[test]
    fn test_rejected_reconfiguration_turns_rule_off() {
        let mut config = Config::with_builtin_rules();
        let rule = config.get_rule("lang-style").unwrap();
        config
            .set_rule_config(rule.as_ref(), &json!({ "lang-style": "warning" }))
            .unwrap();
        assert!(config.is_active("lang-style"));

        assert!(config
            .set_rule_config(rule.as_ref(), &json!({ "lang-style": ["error", 5] }))
            .is_err());
        assert!(!config.is_active("lang-style"));

        config
            .set_rule_config(rule.as_ref(), &json!({ "lang-style": "error" }))
            .unwrap();
        assert!(config
            .set_rule_config(rule.as_ref(), &json!({ "lang-style": "loud" }))
            .is_err());
        assert!(config.setting("lang-style").is_none());
    }

    #[test]
    fn test_apply_unknown_rule() {
        let mut config = Config::with_builtin_rules();
        let raw = json!({ "no-such-rule": "error" });
        let err = config.apply(raw.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::RuleNotFound(name) if name == "no-such-rule"));
    }

    #[test]
    fn test_active_rules_registration_order() {
        let mut config = Config::with_builtin_rules();
        config.enable_all(Severity::Warning).unwrap();
        let names: Vec<&str> = config.active_rules().map(|(r, _)| r.name()).collect();
        assert_eq!(names, vec!["attr-req-value", "lang-style", "tag-name-match"]);

        config
            .apply(json!({ "lang-style": "off" }).as_object().unwrap())
            .unwrap();
        let names: Vec<&str> = config.active_rules().map(|(r, _)| r.name()).collect();
        assert_eq!(names, vec!["attr-req-value", "tag-name-match"]);
    }

    #[test]
    fn test_yaml_deserialize() {
        let yaml = r#"
rules:
  attr-req-value: error
  lang-style: [warning, case]
  tag-name-match: false
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.setting("lang-style"),
            Some(&RuleSetting {
                severity: Severity::Warning,
                options: json!("case"),
            })
        );
        assert!(config.is_active("attr-req-value"));
        assert!(!config.is_active("tag-name-match"));
    }

    #[test]
    fn test_json_bare_rules_object() {
        let config = Config::from_json_str(r#"{ "tag-name-match": "warning" }"#).unwrap();
        assert_eq!(
            config.setting("tag-name-match").map(|s| s.severity),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert!(matches!(
            Config::from_yaml_str("- a\n- b"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
