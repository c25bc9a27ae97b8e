//! HTTP server core implementation

use crate::config::{CorsConfig, ServerConfig};
use crate::server::handlers::{json_error, path_error, query_error, route_not_found};
use crate::server::middleware::Authenticate;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{AdminError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server over prepared state
    pub fn new(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Start the HTTP server and wait for it to stop
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| AdminError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        server.await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Build the actix application: extractor error handlers, tracing, CORS,
/// authentication and every route module.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = build_cors(&state.config.server.cors);

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .wrap(Authenticate)
        .wrap(cors)
        .wrap(DefaultHeaders::new().add(("Server", "rbac-admin")))
        .wrap(TracingLogger::default())
        .configure(routes::health::configure_routes)
        .configure(routes::casbin_rules::configure_routes)
        .configure(routes::menus::configure_routes)
        .configure(routes::roles::configure_routes)
        .default_service(web::to(route_not_found))
}

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(config.max_age);

    if config.allows_all_origins() {
        cors = cors.allow_any_origin();
        if let Err(e) = config.validate() {
            warn!(error = %e, "CORS configuration warning");
        }
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }
    cors
}
