use crate::{
    config::SwaggerProperties,
    docket::{assemble_docket, Docket},
    error::{DocketError, DocketResult},
    info::ApiInfo,
    path::{exclude_predicate, include_predicate},
};

/// Name under which the docket is registered when no configuration exists
pub const DEFAULT_DOCKET: &str = "defaultDocket";

/// Dockets registered by name, in registration order
#[derive(Debug, Clone, Default)]
pub struct DocketRegistry {
    entries: Vec<(String, Docket)>,
}

impl DocketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a docket. Names are unique.
    pub fn register(&mut self, name: &str, docket: Docket) -> DocketResult<()> {
        if self.contains(name) {
            return Err(DocketError::DuplicateDocket(name.to_string()));
        }

        tracing::info!("Registered docket '{}' (group '{}')", name, docket.name());
        self.entries.push((name.to_string(), docket));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Docket> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, docket)| docket)
    }

    /// Find a docket by the group it documents
    pub fn by_group(&self, group: &str) -> Option<&Docket> {
        self.dockets().find(|docket| docket.name() == group)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Dockets in registration order
    pub fn dockets(&self) -> impl Iterator<Item = &Docket> {
        self.entries.iter().map(|(_, docket)| docket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Docket)> {
        self.entries.iter().map(|(n, docket)| (n.as_str(), docket))
    }

    /// Take the dockets out as an ordered list
    pub fn into_dockets(self) -> Vec<Docket> {
        self.entries.into_iter().map(|(_, docket)| docket).collect()
    }
}

/// Build and register one docket per configured group.
///
/// Without configuration a single default docket is registered as
/// [`DEFAULT_DOCKET`]. A configuration without groups gets a `default` group.
pub fn create_rest_api(properties: Option<&SwaggerProperties>) -> DocketResult<DocketRegistry> {
    let mut registry = DocketRegistry::new();

    let Some(properties) = properties else {
        tracing::info!("No documentation configuration found, using default docket");
        let docket = Docket::new().api_info(ApiInfo::default());
        registry.register(DEFAULT_DOCKET, docket)?;
        return Ok(registry);
    };

    let mut properties = properties.clone();
    if properties.is_empty_group() {
        tracing::warn!("No documentation groups configured, synthesizing the default group");
        properties.construct_group_docket();
    }

    for (group_name, info) in properties.group_docket.iter() {
        let include = include_predicate(&info.base_path)?;
        let exclude = exclude_predicate(&info.exclude_path)?;
        let docket = assemble_docket(&properties, info, group_name, include, exclude);
        registry.register(group_name, docket)?;
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocketInfo, DEFAULT_GROUP};

    #[test]
    fn test_absent_configuration_registers_default_docket() {
        let registry = create_rest_api(None).unwrap();

        assert_eq!(registry.names(), vec![DEFAULT_DOCKET]);
        let docket = registry.get(DEFAULT_DOCKET).unwrap();
        assert_eq!(docket.info(), &ApiInfo::default());
        assert_eq!(docket.group_label(), None);
        assert!(docket.is_path_selected("/anything/at/all"));
    }

    #[test]
    fn test_empty_groups_synthesize_default_group() {
        let properties = SwaggerProperties::new();
        let registry = create_rest_api(Some(&properties)).unwrap();

        assert_eq!(registry.names(), vec![DEFAULT_GROUP]);
        let docket = registry.get(DEFAULT_GROUP).unwrap();
        assert_eq!(docket.info(), &ApiInfo::default());
        assert_eq!(docket.group_label(), None);

        // the caller's configuration is left untouched
        assert!(properties.is_empty_group());
    }

    #[test]
    fn test_groups_registered_in_declaration_order() {
        let properties = SwaggerProperties::new()
            .with_group("zeta", DocketInfo::new())
            .with_group("alpha", DocketInfo::new())
            .with_group(DEFAULT_GROUP, DocketInfo::new());

        let registry = create_rest_api(Some(&properties)).unwrap();

        assert_eq!(registry.names(), vec!["zeta", "alpha", DEFAULT_GROUP]);
        let labels: Vec<_> = registry.dockets().map(Docket::group_label).collect();
        assert_eq!(labels, vec![Some("zeta"), Some("alpha"), None]);
    }

    #[test]
    fn test_groups_do_not_share_path_filters() {
        let properties = SwaggerProperties::new()
            .with_group("public", DocketInfo::new().with_exclude_path("/admin/**"))
            .with_group("admin", DocketInfo::new().with_base_path("/admin/**"));

        let registry = create_rest_api(Some(&properties)).unwrap();
        let public = registry.get("public").unwrap();
        let admin = registry.get("admin").unwrap();

        assert!(!public.is_path_selected("/admin/users"));
        assert!(public.is_path_selected("/users"));
        assert!(admin.is_path_selected("/admin/users"));
        assert!(!admin.is_path_selected("/users"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = DocketRegistry::new();
        registry.register("public", Docket::new()).unwrap();

        let result = registry.register("public", Docket::new());
        assert!(matches!(result, Err(DocketError::DuplicateDocket(name)) if name == "public"));
    }

    #[test]
    fn test_lookup_by_group() {
        let registry = create_rest_api(None).unwrap();
        assert!(registry.by_group(DEFAULT_GROUP).is_some());
        assert!(registry.by_group(DEFAULT_DOCKET).is_none());
    }
}
