/*!
Swagger UI integration for grouped API documentation.

Serves the springfox-style discovery endpoints so a single Swagger UI page can
switch between dockets:

- `GET /swagger-resources` lists every group
- `GET /swagger-resources/configuration/ui` returns the UI preferences
- `GET /v3/api-docs?group=<name>` returns one group's OpenAPI document
- `GET /swagger-ui.html` serves the UI itself
*/

use crate::{
    bootstrap::SwaggerDocumentation,
    config::DEFAULT_GROUP,
    error::{DocketError, DocketResult},
    handler::RequestHandler,
    specification::OpenApiSpec,
    ui::UiConfiguration,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Path of the per-group OpenAPI documents
pub const API_DOCS_PATH: &str = "/v3/api-docs";

/// Application state for the documentation routes
#[derive(Clone)]
pub struct SwaggerState {
    /// Dockets and UI preferences built at startup
    pub documentation: Arc<SwaggerDocumentation>,
    /// Routes of the host application
    pub handlers: Arc<Vec<RequestHandler>>,
    /// Page configuration
    pub config: SwaggerConfig,
}

/// Configuration for the Swagger UI page
#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    /// Page title
    pub title: String,
    /// Custom CSS
    pub custom_css: Option<String>,
}

/// One entry of the group selector in Swagger UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerResource {
    pub name: String,
    pub url: String,
    pub swagger_version: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
struct ApiDocsQuery {
    group: Option<String>,
}

/// Swagger UI server for grouped documentation
pub struct SwaggerUi {
    state: SwaggerState,
}

impl SwaggerUi {
    pub fn new(
        documentation: SwaggerDocumentation,
        handlers: Vec<RequestHandler>,
        config: SwaggerConfig,
    ) -> Self {
        Self {
            state: SwaggerState {
                documentation: Arc::new(documentation),
                handlers: Arc::new(handlers),
                config,
            },
        }
    }

    pub fn config(&self) -> &SwaggerConfig {
        &self.state.config
    }

    /// Routes to merge into the host application's router
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Serve the documentation on its own listener bound to `addr`
    pub async fn serve(&self, addr: &str) -> DocketResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| DocketError::generic(format!("Failed to bind to {}: {}", addr, e)))?;

        self.serve_listener(listener).await
    }

    /// Serve the documentation on an already bound listener
    pub async fn serve_listener(&self, listener: tokio::net::TcpListener) -> DocketResult<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Swagger UI available at http://{}/swagger-ui.html", addr);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| DocketError::generic(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// Build the documentation router
pub fn router(state: SwaggerState) -> Router {
    Router::new()
        .route("/swagger-resources", get(swagger_resources))
        .route("/swagger-resources/configuration/ui", get(ui_configuration))
        .route(API_DOCS_PATH, get(api_docs))
        .route("/swagger-ui.html", get(serve_index))
        .route("/swagger-ui/", get(|| async { Redirect::permanent("/swagger-ui.html") }))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Group selector entries, one per docket in registration order
pub fn resources(documentation: &SwaggerDocumentation) -> Vec<SwaggerResource> {
    documentation
        .registry()
        .dockets()
        .map(|docket| {
            let url = if docket.name() == DEFAULT_GROUP {
                API_DOCS_PATH.to_string()
            } else {
                format!("{}?group={}", API_DOCS_PATH, urlencoding::encode(docket.name()))
            };
            SwaggerResource {
                name: docket.name().to_string(),
                location: url.clone(),
                url,
                swagger_version: "3.0.3".to_string(),
            }
        })
        .collect()
}

async fn swagger_resources(State(state): State<SwaggerState>) -> Json<Vec<SwaggerResource>> {
    Json(resources(&state.documentation))
}

async fn ui_configuration(State(state): State<SwaggerState>) -> Json<UiConfiguration> {
    Json(state.documentation.ui_configuration().clone())
}

async fn api_docs(
    State(state): State<SwaggerState>,
    Query(query): Query<ApiDocsQuery>,
) -> Result<Json<OpenApiSpec>, (StatusCode, String)> {
    let group = query.group.as_deref().unwrap_or(DEFAULT_GROUP);

    let docket = state
        .documentation
        .registry()
        .by_group(group)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown documentation group '{}'", group)))?;

    docket
        .documentation(&state.handlers)
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to render documentation for group '{}': {}", group, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

async fn serve_index(State(state): State<SwaggerState>) -> Result<Html<String>, (StatusCode, String)> {
    SwaggerUi::generate_index_html(&state.documentation, &state.config)
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

impl SwaggerUi {
    /// Generate the Swagger UI page with a group selector
    pub fn generate_index_html(
        documentation: &SwaggerDocumentation,
        config: &SwaggerConfig,
    ) -> DocketResult<String> {
        let urls = resources(documentation)
            .into_iter()
            .map(|r| serde_json::json!({ "url": r.url, "name": r.name }))
            .collect::<Vec<_>>();
        let urls = serde_json::to_string(&urls)?;
        let ui = serde_json::to_string(documentation.ui_configuration())?;
        let custom_css = config.custom_css.as_deref().unwrap_or("");

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body {{
            margin:0;
            background: #fafafa;
        }}

        {}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>

    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-standalone-preset.js"></script>
    <script>
        const uiConfig = {};

        window.onload = function() {{
            const ui = SwaggerUIBundle(Object.assign({{
                urls: {},
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            }}, uiConfig, {{ validatorUrl: uiConfig.validatorUrl || null }}));

            window.ui = ui;
        }};
    </script>
</body>
</html>"#,
            config.title, custom_css, ui, urls
        ))
    }
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_string(),
            custom_css: None,
        }
    }
}

impl SwaggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_custom_css(mut self, css: &str) -> Self {
        self.custom_css = Some(css.to_string());
        self
    }
}
