use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::middleware;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::middleware::log_requests;
use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::database::DocumentStore;
use crate::services::{RosterService, StatsService};

pub struct ServerService {
    port: u16,
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self { port, config, store }
    }

    pub async fn run(&self) -> Result<()> {
        let state = Arc::new(AppState {
            stats: StatsService::new(self.store.clone(), &self.config.collections),
            roster: RosterService::new(self.store.clone(), &self.config.collections),
        });

        let app = create_router(state)
            .layer(self.cors_layer()?)
            .layer(middleware::from_fn(log_requests));

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn cors_layer(&self) -> Result<CorsLayer> {
        match &self.config.server.allowed_origin {
            None => Ok(CorsLayer::permissive()),
            Some(origin) => {
                let origin = HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid ALLOWED_ORIGIN: {}", origin))?;
                Ok(CorsLayer::permissive().allow_origin(origin))
            }
        }
    }
}
