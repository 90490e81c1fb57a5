use crate::error::{DocketError, DocketResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

/// Reserved group name; its docket carries no explicit group label
pub const DEFAULT_GROUP: &str = "default";

/// Environment variable overriding `swagger2.enabled`
pub const ENV_ENABLED: &str = "SWAGGER2_ENABLED";

/// Environment variable overriding `swagger2.host`
pub const ENV_HOST: &str = "SWAGGER2_HOST";

/// Host application configuration as far as documentation is concerned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// The `swagger2` block. Absence is valid and yields a single default docket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger2: Option<SwaggerProperties>,
}

/// Configuration of all documentation groups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SwaggerProperties {
    /// Whether documentation is produced at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Host applied to every docket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Groups keyed by name, in declaration order
    #[serde(default)]
    pub group_docket: GroupDockets,
}

/// Per-group documentation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DocketInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_contact: Option<String>,

    /// Module path prefix of the handlers documented by this group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_packages: Option<String>,

    /// Include patterns; empty means every path
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub base_path: Vec<String>,

    /// Exclude patterns; empty means nothing is excluded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_path: Vec<String>,

    /// Header name of the api key security scheme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

/// Ordered mapping of group name to settings.
///
/// Keeps source document order. Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDockets {
    entries: Vec<(String, DocketInfo)>,
}

fn default_enabled() -> bool {
    true
}

impl Default for SwaggerProperties {
    fn default() -> Self {
        Self {
            enabled: true,
            host: None,
            group_docket: GroupDockets::default(),
        }
    }
}

impl SwaggerProperties {
    /// Create properties with no groups
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global host
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Add or replace a group
    pub fn with_group(mut self, name: &str, info: DocketInfo) -> Self {
        self.group_docket.insert(name, info);
        self
    }

    /// Whether no group is configured
    pub fn is_empty_group(&self) -> bool {
        self.group_docket.is_empty()
    }

    /// Make sure at least one group exists by adding an empty `default` group
    pub fn construct_group_docket(&mut self) {
        if self.is_empty_group() {
            self.group_docket.insert(DEFAULT_GROUP, DocketInfo::default());
        }
    }
}

impl DocketInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_base_packages(mut self, base_packages: &str) -> Self {
        self.base_packages = Some(base_packages.to_string());
        self
    }

    pub fn with_base_path(mut self, pattern: &str) -> Self {
        self.base_path.push(pattern.to_string());
        self
    }

    pub fn with_exclude_path(mut self, pattern: &str) -> Self {
        self.exclude_path.push(pattern.to_string());
        self
    }

    pub fn with_key_name(mut self, key_name: &str) -> Self {
        self.key_name = Some(key_name.to_string());
        self
    }

    /// Key name when set to a non-empty value
    pub fn security_key(&self) -> Option<&str> {
        self.key_name.as_deref().filter(|k| !k.is_empty())
    }
}

impl GroupDockets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: &str, info: DocketInfo) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = info,
            None => self.entries.push((name.to_string(), info)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DocketInfo> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate groups in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocketInfo)> {
        self.entries.iter().map(|(n, info)| (n.as_str(), info))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Serialize for GroupDockets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, info) in &self.entries {
            map.serialize_entry(name, info)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupDockets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupDocketsVisitor;

        impl<'de> Visitor<'de> for GroupDocketsVisitor {
            type Value = GroupDockets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of group names to docket settings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = GroupDockets::new();
                while let Some((name, info)) = access.next_entry::<String, Option<DocketInfo>>()? {
                    groups.insert(&name, info.unwrap_or_default());
                }
                Ok(groups)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
                deserializer.deserialize_map(self)
            }

            // `group-docket:` with no value
            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(GroupDockets::new())
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(GroupDockets::new())
            }
        }

        deserializer.deserialize_option(GroupDocketsVisitor)
    }
}

impl ApplicationConfig {
    /// Wrap explicit properties
    pub fn with_swagger(properties: SwaggerProperties) -> Self {
        Self {
            swagger2: Some(properties),
        }
    }

    /// Whether documentation should be produced
    pub fn is_enabled(&self) -> bool {
        self.swagger2.as_ref().map_or(true, |p| p.enabled)
    }

    pub fn from_yaml_str(content: &str) -> DocketResult<Self> {
        // An empty YAML document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> DocketResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> DocketResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file, choosing the format by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> DocketResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        tracing::debug!("Loading documentation config from {}", path.as_ref().display());

        match extension.to_lowercase().as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "toml" => Self::from_toml_str(&content),
            _ => {
                // Try to detect format from content
                if content.trim_start().starts_with('{') {
                    Self::from_json_str(&content)
                } else {
                    Self::from_yaml_str(&content)
                }
            }
        }
    }

    /// Apply `SWAGGER2_ENABLED` and `SWAGGER2_HOST` on top of the loaded values
    pub fn apply_env_overrides(&mut self) -> DocketResult<()> {
        if let Ok(value) = env::var(ENV_ENABLED) {
            let enabled = parse_bool(&value).ok_or_else(|| {
                DocketError::config_error(format!(
                    "{} must be true or false, got '{}'",
                    ENV_ENABLED, value
                ))
            })?;
            self.swagger2.get_or_insert_with(SwaggerProperties::default).enabled = enabled;
        }

        if let Ok(host) = env::var(ENV_HOST) {
            self.swagger2.get_or_insert_with(SwaggerProperties::default).host = Some(host);
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const YAML: &str = r#"
swagger2:
  host: api.example.com
  group-docket:
    public:
      title: Public API
      base-packages: shop::api
      exclude-path:
        - /admin/**
    internal:
      base-path:
        - /internal/**
      key-name: X-Api-Key
    audit:
"#;

    #[test]
    fn test_yaml_preserves_group_order() {
        let config = ApplicationConfig::from_yaml_str(YAML).unwrap();
        let swagger = config.swagger2.unwrap();

        assert!(swagger.enabled);
        assert_eq!(swagger.host.as_deref(), Some("api.example.com"));
        assert_eq!(swagger.group_docket.names(), vec!["public", "internal", "audit"]);

        let public = swagger.group_docket.get("public").unwrap();
        assert_eq!(public.title.as_deref(), Some("Public API"));
        assert_eq!(public.base_packages.as_deref(), Some("shop::api"));
        assert_eq!(public.exclude_path, vec!["/admin/**"]);
        assert!(public.base_path.is_empty());

        let internal = swagger.group_docket.get("internal").unwrap();
        assert_eq!(internal.security_key(), Some("X-Api-Key"));

        assert_eq!(swagger.group_docket.get("audit"), Some(&DocketInfo::default()));
    }

    #[test]
    fn test_missing_block_is_valid() {
        let config = ApplicationConfig::from_yaml_str("server:\n  port: 8080\n").unwrap();
        assert!(config.swagger2.is_none());
        assert!(config.is_enabled());

        assert!(ApplicationConfig::from_yaml_str("").unwrap().swagger2.is_none());
    }

    #[test]
    fn test_disabled_flag() {
        let config = ApplicationConfig::from_yaml_str("swagger2:\n  enabled: false\n").unwrap();
        assert!(!config.is_enabled());
        assert!(config.swagger2.unwrap().is_empty_group());
    }

    #[test]
    fn test_toml_and_json_sources() {
        let toml = r#"
[swagger2]
host = "localhost:3000"

[swagger2.group-docket.orders]
base-path = ["/orders/**"]
"#;
        let config = ApplicationConfig::from_toml_str(toml).unwrap();
        let swagger = config.swagger2.unwrap();
        assert_eq!(swagger.host.as_deref(), Some("localhost:3000"));
        assert_eq!(swagger.group_docket.get("orders").unwrap().base_path, vec!["/orders/**"]);

        let json = r#"{"swagger2":{"group-docket":{"b":{},"a":{"key-name":""}}}}"#;
        let swagger = ApplicationConfig::from_json_str(json).unwrap().swagger2.unwrap();
        assert_eq!(swagger.group_docket.names(), vec!["b", "a"]);
        assert_eq!(swagger.group_docket.get("a").unwrap().security_key(), None);
    }

    #[test]
    fn test_null_group_docket_is_empty_in_every_format() {
        let json = ApplicationConfig::from_json_str(r#"{"swagger2":{"group-docket":null}}"#).unwrap();
        assert!(json.swagger2.unwrap().is_empty_group());

        let yaml = ApplicationConfig::from_yaml_str("swagger2:\n  group-docket:\n").unwrap();
        assert!(yaml.swagger2.unwrap().is_empty_group());

        let yaml = ApplicationConfig::from_yaml_str("swagger2:\n  group-docket: ~\n").unwrap();
        assert!(yaml.swagger2.unwrap().is_empty_group());
    }

    #[test]
    fn test_repeated_group_overwrites_in_place() {
        let mut groups = GroupDockets::new();
        groups.insert("a", DocketInfo::new().with_title("first"));
        groups.insert("b", DocketInfo::new());
        groups.insert("a", DocketInfo::new().with_title("second"));

        assert_eq!(groups.names(), vec!["a", "b"]);
        assert_eq!(groups.get("a").unwrap().title.as_deref(), Some("second"));
    }

    #[test]
    fn test_construct_group_docket_only_when_empty() {
        let mut properties = SwaggerProperties::new();
        properties.construct_group_docket();
        assert_eq!(properties.group_docket.names(), vec![DEFAULT_GROUP]);

        let mut properties = SwaggerProperties::new().with_group("public", DocketInfo::new());
        properties.construct_group_docket();
        assert_eq!(properties.group_docket.names(), vec!["public"]);
    }

    #[test]
    fn test_from_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = ApplicationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.swagger2.unwrap().group_docket.len(), 3);
    }

    #[test]
    fn test_from_file_sniffs_json() {
        let mut file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        file.write_all(br#"{"swagger2":{"host":"h"}}"#).unwrap();

        let config = ApplicationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.swagger2.unwrap().host.as_deref(), Some("h"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ApplicationConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(DocketError::Io(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var(ENV_ENABLED, "false");
        env::set_var(ENV_HOST, "docs.example.com");

        let mut config = ApplicationConfig::default();
        config.apply_env_overrides().unwrap();

        env::remove_var(ENV_ENABLED);
        env::remove_var(ENV_HOST);

        let swagger = config.swagger2.unwrap();
        assert!(!swagger.enabled);
        assert_eq!(swagger.host.as_deref(), Some("docs.example.com"));
    }

    #[test]
    #[serial]
    fn test_env_override_rejects_bad_bool() {
        env::set_var(ENV_ENABLED, "maybe");

        let mut config = ApplicationConfig::default();
        let result = config.apply_env_overrides();

        env::remove_var(ENV_ENABLED);

        assert!(matches!(result, Err(DocketError::Config(_))));
    }
}
