//! # People API server
//!
//! ```bash
//! # Run with default settings (people.db, port 3333)
//! people-api
//!
//! # Custom database and port
//! people-api --db /var/lib/people.db --port 8080
//!
//! # In-memory mode (for testing)
//! people-api --memory
//! ```
//!
//! ```bash
//! curl -X POST http://localhost:3333/people \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Ana", "age": 31, "sex": "f"}'
//!
//! curl "http://localhost:3333/people?search=an"
//!
//! open http://localhost:3333/docs
//! ```

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use people_api::api::{create_router, AppState};
use people_api::db::PeopleStore;
use people_api::docs::{create_docs_router, openapi_document};
use people_api::schema::ensure_people_table;

const DEFAULT_PORT: u16 = 3333;

/// CLI arguments
struct Args {
    /// Database file path
    db_path: String,
    /// Server port
    port: u16,
    /// Use in-memory database
    in_memory: bool,
    /// Externally visible base URL, advertised in the docs
    external_url: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            db_path: "people.db".to_string(),
            port: DEFAULT_PORT,
            in_memory: false,
            external_url: None,
        }
    }
}

impl Args {
    fn from_env() -> Self {
        let mut args = Args::default();
        let env_args: Vec<String> = env::args().collect();
        let mut i = 1;

        while i < env_args.len() {
            match env_args[i].as_str() {
                "--db" | "-d" => {
                    if i + 1 < env_args.len() {
                        args.db_path = env_args[i + 1].clone();
                        i += 1;
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < env_args.len() {
                        args.port = env_args[i + 1].parse().unwrap_or(DEFAULT_PORT);
                        i += 1;
                    }
                }
                "--memory" | "-m" => {
                    args.in_memory = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        // Environment variable overrides
        if let Ok(port) = env::var("PORT") {
            args.port = port.parse().unwrap_or(args.port);
        }
        if let Ok(db) = env::var("PEOPLE_DB_PATH") {
            args.db_path = db;
        }
        if env::var("PEOPLE_DB_MEMORY").is_ok() {
            args.in_memory = true;
        }
        if let Ok(url) = env::var("RENDER_EXTERNAL_URL") {
            if !url.is_empty() {
                args.external_url = Some(url);
            }
        }

        args
    }

    /// Base URL published in the OpenAPI `servers` list
    fn docs_base_url(&self) -> String {
        self.external_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

fn print_help() {
    println!(
        r#"
People API - person registry over HTTP

USAGE:
    people-api [OPTIONS]

OPTIONS:
    -d, --db <PATH>      Database file path [default: people.db]
    -p, --port <PORT>    Server port [default: 3333]
    -m, --memory         Use in-memory database
    -h, --help           Print this help message

ENVIRONMENT VARIABLES:
    PORT                 Server port
    PEOPLE_DB_PATH       Database file path
    PEOPLE_DB_MEMORY     Set to use in-memory database
    RENDER_EXTERNAL_URL  Public base URL shown in the API docs
    RUST_LOG             Log filter [default: info]

API ENDPOINTS:
    POST   /people         Create a person
    GET    /people         List people (?search= filters by name)
    PUT    /people/:id     Update a person
    DELETE /people/:id     Delete a person
    GET    /docs           Interactive API documentation
    GET    /docs/json      OpenAPI document
"#
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let args = Args::from_env();

    let store = if args.in_memory {
        info!("🧪 Using in-memory database");
        Arc::new(PeopleStore::in_memory().await?)
    } else {
        info!("💾 Using database file: {}", args.db_path);
        Arc::new(PeopleStore::new(&args.db_path).await?)
    };

    ensure_people_table(&store).await?;

    let docs_url = args.docs_base_url();
    info!("📚 Docs advertise base URL {}", docs_url);

    let app = create_router(AppState::new(Arc::clone(&store)))
        .merge(create_docs_router(openapi_document(&docs_url)));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
    info!("🚀 People API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("👋 Shutting down");
        })
        .await?;

    Ok(())
}
