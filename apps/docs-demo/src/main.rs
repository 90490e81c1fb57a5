mod routes;

use clap::Parser;
use elif_docket::{
    logging::{init_logging, LoggingConfig},
    ApplicationConfig, SwaggerBootstrap, SwaggerConfig, SwaggerUi,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docs-demo", about = "Shop API with grouped documentation")]
struct Args {
    /// Application config file (yaml, json or toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Serve the documentation on its own address instead of the API port
    #[arg(long)]
    docs_addr: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let logging = if args.json_logs {
        LoggingConfig::production()
    } else {
        LoggingConfig::development()
    };
    init_logging(logging)?;

    let mut config = match &args.config {
        Some(path) => ApplicationConfig::from_file(path)?,
        None => ApplicationConfig::default(),
    };
    config.apply_env_overrides()?;

    let app = routes::router();
    let app = match SwaggerBootstrap::init(&config)? {
        Some(documentation) => {
            let swagger = SwaggerUi::new(
                documentation,
                routes::handlers(),
                SwaggerConfig::new().with_title("Shop API Documentation"),
            );
            match args.docs_addr.clone() {
                Some(docs_addr) => {
                    tokio::spawn(async move {
                        if let Err(e) = swagger.serve(&docs_addr).await {
                            tracing::error!("Documentation server stopped: {}", e);
                        }
                    });
                    app
                }
                None => app.merge(swagger.router()),
            }
        }
        None => app,
    };

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Shop API listening on http://{}", addr);
    if args.docs_addr.is_none() {
        tracing::info!("Documentation at http://{}/swagger-ui.html", addr);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
