use serde::{Deserialize, Serialize};

/// Swagger UI display preferences, served to the UI as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfiguration {
    pub deep_linking: bool,
    pub display_operation_id: bool,
    /// `-1` hides the models section entirely
    pub default_models_expand_depth: i32,
    pub default_model_expand_depth: i32,
    pub default_model_rendering: String,
    pub display_request_duration: bool,
    pub doc_expansion: String,
    pub filter: bool,
    pub operations_sorter: String,
    pub show_extensions: bool,
    pub tags_sorter: String,
    pub supported_submit_methods: Vec<String>,
    pub validator_url: String,
}

impl Default for UiConfiguration {
    fn default() -> Self {
        Self {
            deep_linking: true,
            display_operation_id: false,
            default_models_expand_depth: -1,
            default_model_expand_depth: 1,
            default_model_rendering: "example".to_string(),
            display_request_duration: true,
            doc_expansion: "none".to_string(),
            filter: false,
            operations_sorter: "alpha".to_string(),
            show_extensions: false,
            tags_sorter: "alpha".to_string(),
            supported_submit_methods: ["get", "put", "post", "delete", "options", "head", "patch", "trace"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            validator_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_hidden_and_durations_shown() {
        let ui = UiConfiguration::default();
        assert_eq!(ui.default_models_expand_depth, -1);
        assert!(ui.display_request_duration);
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(UiConfiguration::default()).unwrap();
        assert_eq!(json["defaultModelsExpandDepth"], -1);
        assert_eq!(json["displayRequestDuration"], true);
        assert_eq!(json["supportedSubmitMethods"].as_array().unwrap().len(), 8);
    }
}
