/*!
Request handlers exposed by the host application and the base-package filter
dockets apply to them.
*/

/// Route information handed over by the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHandler {
    /// HTTP method
    pub method: String,
    /// Path template, e.g. `/users/{id}`
    pub path: String,
    /// Module path of the handler function, e.g. `shop::api::users`
    pub module_path: String,
    /// Operation summary
    pub summary: Option<String>,
    /// Operation description
    pub description: Option<String>,
    /// Operation ID
    pub operation_id: Option<String>,
    /// Tags for grouping
    pub tags: Vec<String>,
    /// Deprecated flag
    pub deprecated: bool,
}

impl RequestHandler {
    pub fn new(method: &str, path: &str, module_path: &str) -> Self {
        Self {
            method: method.to_uppercase(),
            path: path.to_string(),
            module_path: module_path.to_string(),
            summary: None,
            description: None,
            operation_id: None,
            tags: Vec::new(),
            deprecated: false,
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_operation_id(mut self, operation_id: &str) -> Self {
        self.operation_id = Some(operation_id.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// Selects handlers by the module they are declared in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSelector {
    base_package: Option<String>,
}

impl HandlerSelector {
    /// Selector accepting every handler
    pub fn any() -> Self {
        Self::default()
    }

    /// Selector accepting handlers declared in `base_package` or below it.
    /// Both `::` and `.` separate segments. An empty package accepts every handler.
    pub fn base_package(base_package: &str) -> Self {
        let trimmed = base_package.trim().trim_end_matches("::").trim_end_matches('.');
        Self {
            base_package: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.base_package.as_deref()
    }

    pub fn is_selected(&self, handler: &RequestHandler) -> bool {
        match &self.base_package {
            None => true,
            Some(package) => {
                let module = handler.module_path.as_str();
                module == package.as_str()
                    || module
                        .strip_prefix(package.as_str())
                        .is_some_and(|rest| rest.starts_with("::") || rest.starts_with('.'))
            }
        }
    }
}
