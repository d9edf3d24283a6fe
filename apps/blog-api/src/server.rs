//! Server process lifecycle.
//!
//! [`ServerHandle::start`] connects the store, binds the listener and returns
//! only once the server is running. [`ServerHandle::stop`] consumes the
//! handle, so a stop can never overlap the start that produced it.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use blog_core::error::RepoError;
use blog_core::ports::PostRepository;
use blog_infra::{PostStore, RandomPostFactory, seed_posts};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Failures while starting or stopping the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store unavailable: {0}")]
    Store(#[from] RepoError),

    #[error("HTTP listener error: {0}")]
    Io(#[from] std::io::Error),

    #[error("listener bound to no address")]
    NoAddress,

    #[error("server task failed: {0}")]
    Task(String),
}

type ServerTask = actix_rt::task::JoinHandle<std::io::Result<()>>;

/// A running server: the HTTP listener plus the store connection it serves.
pub struct ServerHandle {
    addr: SocketAddr,
    server: actix_web::dev::ServerHandle,
    task: ServerTask,
    store: PostStore,
}

impl ServerHandle {
    /// Connect to the store, then bind and run the HTTP server.
    ///
    /// Nothing is left listening if the store is unreachable.
    pub async fn start(config: &AppConfig) -> Result<Self, ServerError> {
        tracing::info!(host = %config.host, port = config.port, "Server starting");

        let store = PostStore::connect(&config.database).await?;

        match Self::serve(config, &store).await {
            Ok((addr, server, task)) => {
                tracing::info!(%addr, "Server running");
                Ok(Self {
                    addr,
                    server,
                    task,
                    store,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Server failed to start");
                if let Err(close_err) = store.close().await {
                    tracing::warn!(error = %close_err, "Failed to close store after aborted start");
                }
                Err(e)
            }
        }
    }

    async fn serve(
        config: &AppConfig,
        store: &PostStore,
    ) -> Result<(SocketAddr, actix_web::dev::ServerHandle, ServerTask), ServerError> {
        let posts = store.posts();

        if config.seed_posts > 0 {
            seed_posts(posts.as_ref(), &mut RandomPostFactory::new(), config.seed_posts).await?;
        }

        let state = AppState::new(posts);

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(state.clone()))
                .configure(handlers::configure_routes)
                .default_service(web::to(handlers::not_found))
        })
        .disable_signals();

        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }

        let server = server.bind((config.host.as_str(), config.port))?;
        let addr = server
            .addrs()
            .first()
            .copied()
            .ok_or(ServerError::NoAddress)?;

        let server = server.run();
        let handle = server.handle();
        let task = actix_rt::spawn(server);

        Ok((addr, handle, task))
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://host:port` of the running server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Direct access to the store, bypassing HTTP.
    pub fn posts(&self) -> Arc<dyn PostRepository> {
        self.store.posts()
    }

    /// Stop accepting connections, drain in-flight requests, close the store.
    pub async fn stop(self) -> Result<(), ServerError> {
        tracing::info!(addr = %self.addr, "Server stopping");

        self.server.stop(true).await;
        let served = self.task.await;

        // Close the store even if the server itself ended badly.
        let closed = self.store.close().await;
        served.map_err(|e| ServerError::Task(e.to_string()))??;
        closed?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
