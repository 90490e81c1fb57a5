/*!
Dockets: one documentation unit per configured group.

A docket decides which request handlers belong to its group (by module and by
path) and renders those handlers into an OpenAPI document carrying the group's
metadata and security scheme.
*/

use crate::{
    config::{DocketInfo, SwaggerProperties, DEFAULT_GROUP},
    error::{DocketError, DocketResult},
    handler::{HandlerSelector, RequestHandler},
    info::{build_api_info, ApiInfo},
    path::{PathPredicate, PathSelector},
    specification::{
        Components, Contact, Info, License, OpenApiSpec, Operation, Response,
        SecuritySchemeObject, Server, Tag,
    },
};
use std::collections::{BTreeMap, BTreeSet};

/// Where an api key is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
}

impl ApiKeyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
        }
    }
}

/// Credential input the documentation UI prompts for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityScheme {
    ApiKey {
        /// Name of the key, also the parameter name sent by the UI
        name: String,
        /// Prefix the UI puts in front of the entered value
        key_prefix: String,
        location: ApiKeyLocation,
    },
}

impl SecurityScheme {
    /// Header api key with an empty value prefix
    pub fn header_api_key(name: &str) -> Self {
        Self::ApiKey {
            name: name.to_string(),
            key_prefix: String::new(),
            location: ApiKeyLocation::Header,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::ApiKey { name, .. } => name,
        }
    }

    fn to_object(&self) -> SecuritySchemeObject {
        match self {
            Self::ApiKey { name, location, .. } => SecuritySchemeObject::ApiKey {
                name: name.clone(),
                location: location.as_str().to_string(),
            },
        }
    }
}

/// Documentation unit scoped to one group of routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docket {
    group_name: Option<String>,
    host: Option<String>,
    api_info: ApiInfo,
    handlers: HandlerSelector,
    paths: PathSelector,
    security_schemes: Vec<SecurityScheme>,
}

impl Default for Docket {
    fn default() -> Self {
        Self::new()
    }
}

impl Docket {
    /// Docket with default metadata documenting every handler and path
    pub fn new() -> Self {
        Self {
            group_name: None,
            host: None,
            api_info: ApiInfo::default(),
            handlers: HandlerSelector::any(),
            paths: PathSelector::any(),
            security_schemes: Vec::new(),
        }
    }

    pub fn host(mut self, host: Option<&str>) -> Self {
        self.host = host.map(str::to_string);
        self
    }

    pub fn api_info(mut self, api_info: ApiInfo) -> Self {
        self.api_info = api_info;
        self
    }

    pub fn group_name(mut self, group_name: &str) -> Self {
        self.group_name = Some(group_name.to_string());
        self
    }

    /// Restrict the documented handlers and paths
    pub fn select(mut self, handlers: HandlerSelector, paths: PathSelector) -> Self {
        self.handlers = handlers;
        self.paths = paths;
        self
    }

    pub fn security_schemes(mut self, schemes: Vec<SecurityScheme>) -> Self {
        self.security_schemes = schemes;
        self
    }

    /// Group this docket documents; unlabelled dockets belong to `default`
    pub fn name(&self) -> &str {
        self.group_name.as_deref().unwrap_or(DEFAULT_GROUP)
    }

    /// Explicit group label, if any
    pub fn group_label(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn info(&self) -> &ApiInfo {
        &self.api_info
    }

    pub fn handler_selector(&self) -> &HandlerSelector {
        &self.handlers
    }

    pub fn path_selector(&self) -> &PathSelector {
        &self.paths
    }

    pub fn schemes(&self) -> &[SecurityScheme] {
        &self.security_schemes
    }

    pub fn is_path_selected(&self, path: &str) -> bool {
        self.paths.is_selected(path)
    }

    pub fn is_handler_selected(&self, handler: &RequestHandler) -> bool {
        self.handlers.is_selected(handler) && self.paths.is_selected(&handler.path)
    }

    /// Render the selected handlers into an OpenAPI document
    pub fn documentation(&self, handlers: &[RequestHandler]) -> DocketResult<OpenApiSpec> {
        let mut spec = OpenApiSpec::new(&self.api_info.title, &self.api_info.version);
        spec.info = self.convert_info();

        if let Some(host) = &self.host {
            spec.servers.push(Server {
                url: server_url(host),
                description: None,
            });
        }

        let mut tags = BTreeSet::new();
        for handler in handlers.iter().filter(|h| self.is_handler_selected(h)) {
            let path_item = spec.paths.entry(handler.path.clone()).or_default();
            let slot = path_item.operation_mut(&handler.method).ok_or_else(|| {
                DocketError::UnsupportedMethod {
                    method: handler.method.clone(),
                    path: handler.path.clone(),
                }
            })?;

            if slot.is_some() {
                return Err(DocketError::DuplicateOperation {
                    method: handler.method.clone(),
                    path: handler.path.clone(),
                });
            }
            *slot = Some(create_operation(handler));
            tags.extend(handler.tags.iter().cloned());
        }

        spec.tags = tags
            .into_iter()
            .map(|name| Tag {
                name,
                description: None,
            })
            .collect();

        if !self.security_schemes.is_empty() {
            let security_schemes = self
                .security_schemes
                .iter()
                .map(|scheme| (scheme.name().to_string(), scheme.to_object()))
                .collect::<BTreeMap<_, _>>();
            spec.components = Some(Components { security_schemes });
        }

        tracing::debug!(
            "Rendered docket '{}' with {} operations",
            self.name(),
            spec.operation_count()
        );

        Ok(spec)
    }

    fn convert_info(&self) -> Info {
        let info = &self.api_info;
        Info {
            title: info.title.clone(),
            description: non_empty(&info.description),
            terms_of_service: non_empty(&info.terms_of_service_url),
            contact: (!info.contact.is_empty()).then(|| Contact {
                name: non_empty(&info.contact.name),
                url: non_empty(&info.contact.url),
                email: non_empty(&info.contact.email),
            }),
            license: non_empty(&info.license).map(|name| License {
                name,
                url: non_empty(&info.license_url),
            }),
            version: info.version.clone(),
        }
    }
}

fn create_operation(handler: &RequestHandler) -> Operation {
    let mut responses = BTreeMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: "Successful operation".to_string(),
        },
    );

    Operation {
        tags: handler.tags.clone(),
        summary: handler.summary.clone(),
        description: handler.description.clone(),
        operation_id: handler.operation_id.clone(),
        responses,
        security: Vec::new(),
        deprecated: handler.deprecated.then_some(true),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Server URL for a configured host; bare hosts are served over http
fn server_url(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

/// Build the docket of one configured group
pub fn assemble_docket(
    properties: &SwaggerProperties,
    info: &DocketInfo,
    group_name: &str,
    include: PathPredicate,
    exclude: PathPredicate,
) -> Docket {
    let handlers = info
        .base_packages
        .as_deref()
        .map(HandlerSelector::base_package)
        .unwrap_or_default();

    let mut docket = Docket::new()
        .host(properties.host.as_deref())
        .api_info(build_api_info(Some(info)))
        .select(handlers, PathSelector::new(include, exclude));

    if group_name != DEFAULT_GROUP {
        docket = docket.group_name(group_name);
    }

    if let Some(key_name) = info.security_key() {
        docket = docket.security_schemes(vec![SecurityScheme::header_api_key(key_name)]);
    }

    docket
}
