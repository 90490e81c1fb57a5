//! # elif-docket
//!
//! Configuration-driven, grouped API documentation for elif.rs applications.
//!
//! A `swagger2` block in the application config describes one or more groups
//! ("dockets"). Each group selects the request handlers it documents by module
//! path and by Ant-style path patterns, carries its own metadata and may ask the
//! UI for an api key header.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use elif_docket::{ApplicationConfig, SwaggerBootstrap};
//!
//! let config = ApplicationConfig::from_yaml_str(r#"
//! swagger2:
//!   host: api.example.com
//!   group-docket:
//!     public:
//!       base-packages: shop::api
//!       exclude-path: ["/admin/**"]
//! "#).unwrap();
//!
//! let documentation = SwaggerBootstrap::init(&config).unwrap().expect("enabled");
//! for (name, docket) in documentation.registry().iter() {
//!     println!("{} documents group {}", name, docket.name());
//! }
//! ```

// Re-export main types
pub use crate::{
    bootstrap::{SwaggerBootstrap, SwaggerDocumentation},
    config::{ApplicationConfig, DocketInfo, GroupDockets, SwaggerProperties},
    docket::{assemble_docket, ApiKeyLocation, Docket, SecurityScheme},
    error::{DocketError, DocketResult},
    handler::{HandlerSelector, RequestHandler},
    info::{build_api_info, ApiInfo, ApiInfoBuilder},
    path::{exclude_predicate, include_predicate, AntPattern, PathPredicate, PathSelector},
    registry::{create_rest_api, DocketRegistry, DEFAULT_DOCKET},
    specification::OpenApiSpec,
    swagger::{SwaggerConfig, SwaggerUi},
    ui::UiConfiguration,
};

// Configuration
pub mod config;
pub mod error;

// Docket construction
pub mod docket;
pub mod handler;
pub mod info;
pub mod path;
pub mod registry;

// Startup
pub mod bootstrap;

// Rendering and serving
pub mod specification;
pub mod swagger;
pub mod ui;

pub mod logging;
