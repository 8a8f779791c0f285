use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::{build_router, db, AppState};

/// A bound listener with its router, ready to serve.
pub struct Server {
    listener: TcpListener,
    router: Router,
    config: AppConfig,
}

impl Server {
    /// Attempts the database connection, builds the router and binds the
    /// configured address. A database failure is logged and does not stop
    /// the listener from binding.
    pub async fn bind(config: AppConfig) -> Result<Self, ServiceError> {
        let database = db::bootstrap(&config).await;
        let state = AppState::new(config.clone(), database);
        let router = build_router(state);

        let listener = TcpListener::bind(config.bind_address()).await?;
        Ok(Self {
            listener,
            router,
            config,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServiceError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until the process exits.
    pub async fn serve(self) -> Result<(), ServiceError> {
        let addr = self.local_addr()?;
        info!(
            "Server running on http://localhost:{}{}",
            addr.port(),
            self.config.graphql_path
        );

        axum::serve(self.listener, self.router.into_make_service()).await?;
        Ok(())
    }
}
