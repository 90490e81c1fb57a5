/*!
Startup entry point.

The host calls [`SwaggerBootstrap::init`] once while starting up and keeps the
returned [`SwaggerDocumentation`] for the lifetime of the process.
*/

use crate::{
    config::ApplicationConfig,
    docket::Docket,
    error::DocketResult,
    registry::{create_rest_api, DocketRegistry},
    ui::UiConfiguration,
};

/// Everything produced at startup when documentation is enabled
#[derive(Debug, Clone)]
pub struct SwaggerDocumentation {
    registry: DocketRegistry,
    ui: UiConfiguration,
}

impl SwaggerDocumentation {
    pub fn registry(&self) -> &DocketRegistry {
        &self.registry
    }

    pub fn ui_configuration(&self) -> &UiConfiguration {
        &self.ui
    }

    /// Dockets in registration order
    pub fn dockets(&self) -> Vec<&Docket> {
        self.registry.dockets().collect()
    }
}

/// Explicit initialization of grouped documentation
pub struct SwaggerBootstrap;

impl SwaggerBootstrap {
    /// Build every configured docket.
    ///
    /// Returns `Ok(None)` when `swagger2.enabled` is `false`.
    pub fn init(config: &ApplicationConfig) -> DocketResult<Option<SwaggerDocumentation>> {
        if !config.is_enabled() {
            tracing::info!("API documentation disabled by configuration");
            return Ok(None);
        }

        let registry = create_rest_api(config.swagger2.as_ref())?;
        tracing::info!("API documentation ready with {} docket(s)", registry.len());

        Ok(Some(SwaggerDocumentation {
            registry,
            ui: UiConfiguration::default(),
        }))
    }
}
