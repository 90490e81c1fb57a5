use crate::config::DocketInfo;
use serde::{Deserialize, Serialize};

/// Descriptive metadata rendered at the top of a docket's documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    pub terms_of_service_url: String,
    pub contact: Contact,
    pub license: String,
    pub license_url: String,
}

/// Contact details of the service owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub url: String,
    pub email: String,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "Api Documentation".to_string(),
            description: "Api Documentation".to_string(),
            version: "1.0".to_string(),
            terms_of_service_url: "urn:tos".to_string(),
            contact: Contact::default(),
            license: "Apache 2.0".to_string(),
            license_url: "http://www.apache.org/licenses/LICENSE-2.0".to_string(),
        }
    }
}

impl Contact {
    pub fn new(name: &str, url: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            email: email.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.url.is_empty() && self.email.is_empty()
    }
}

/// Builder for [`ApiInfo`], starting from the default metadata
#[derive(Debug, Clone, Default)]
pub struct ApiInfoBuilder {
    info: ApiInfo,
}

impl ApiInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.info.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info.description = description.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.info.version = version.to_string();
        self
    }

    pub fn terms_of_service_url(mut self, url: &str) -> Self {
        self.info.terms_of_service_url = url.to_string();
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.info.contact = contact;
        self
    }

    pub fn license(mut self, license: &str) -> Self {
        self.info.license = license.to_string();
        self
    }

    pub fn license_url(mut self, url: &str) -> Self {
        self.info.license_url = url.to_string();
        self
    }

    pub fn build(self) -> ApiInfo {
        self.info
    }
}

/// Build a group's metadata. Without settings the default metadata is used;
/// otherwise every configured field is copied verbatim.
pub fn build_api_info(info: Option<&DocketInfo>) -> ApiInfo {
    let Some(info) = info else {
        return ApiInfo::default();
    };

    let mut builder = ApiInfoBuilder::new();
    if let Some(title) = &info.title {
        builder = builder.title(title);
    }
    if let Some(description) = &info.description {
        builder = builder.description(description);
    }
    if let Some(version) = &info.version {
        builder = builder.version(version);
    }
    if let Some(license) = &info.license {
        builder = builder.license(license);
    }
    if let Some(license_url) = &info.license_url {
        builder = builder.license_url(license_url);
    }
    if let Some(contact) = &info.service_contact {
        builder = builder.contact(Contact::new(contact, "", ""));
    }
    if let Some(terms) = &info.terms_of_service_url {
        builder = builder.terms_of_service_url(terms);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_settings_use_default() {
        assert_eq!(build_api_info(None), ApiInfo::default());
    }

    #[test]
    fn test_empty_settings_use_default() {
        assert_eq!(build_api_info(Some(&DocketInfo::default())), ApiInfo::default());
    }

    #[test]
    fn test_fields_are_copied_verbatim() {
        let settings = DocketInfo {
            title: Some("Orders".to_string()),
            description: Some("  Order management  ".to_string()),
            version: Some("2.1.0".to_string()),
            license: Some("MIT".to_string()),
            license_url: Some("https://opensource.org/licenses/MIT".to_string()),
            terms_of_service_url: Some("https://example.com/tos".to_string()),
            service_contact: Some("orders-team".to_string()),
            ..Default::default()
        };

        let info = build_api_info(Some(&settings));

        assert_eq!(info.title, "Orders");
        assert_eq!(info.description, "  Order management  ");
        assert_eq!(info.version, "2.1.0");
        assert_eq!(info.license, "MIT");
        assert_eq!(info.license_url, "https://opensource.org/licenses/MIT");
        assert_eq!(info.terms_of_service_url, "https://example.com/tos");
        assert_eq!(info.contact, Contact::new("orders-team", "", ""));
    }

    #[test]
    fn test_partial_settings_keep_remaining_defaults() {
        let settings = DocketInfo::new().with_title("Users");
        let info = build_api_info(Some(&settings));

        assert_eq!(info.title, "Users");
        assert_eq!(info.version, ApiInfo::default().version);
        assert!(info.contact.is_empty());
    }
}
