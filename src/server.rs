//! The front door: route registration, start and stop.
//!
//! `FrontDoor` composes the router without touching the network, so tests can
//! drive it in-process. `start` binds the listener and serves in a background
//! task; the returned `RunningServer` is the stop handle.

use std::net::SocketAddr;

use axum::routing::MethodRouter;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{apply_layers, base_routes, AppState};
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::utils::shutdown_signal;

/// Entry component for all inbound HTTP traffic.
pub struct FrontDoor {
    config: Config,
    state: AppState,
    extra_routes: Router<AppState>,
}

impl FrontDoor {
    /// Create a front door with the built-in routes.
    pub fn new(config: Config, state: AppState) -> Self {
        Self {
            config,
            state,
            extra_routes: Router::new(),
        }
    }

    /// Register an additional route behind the same middleware chain.
    ///
    /// # Panics
    ///
    /// When the router is built, if `path` overlaps a built-in route.
    #[must_use]
    pub fn route(mut self, path: &str, method_router: MethodRouter<AppState>) -> Self {
        self.extra_routes = self.extra_routes.route(path, method_router);
        self
    }

    /// The fully layered router, ready to serve or to drive with `oneshot`.
    pub fn router(&self) -> Router {
        let routes = base_routes(&self.state).merge(self.extra_routes.clone());
        apply_layers(routes, self.state.clone())
    }

    /// Bind the listener and start serving in the background.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub async fn start(self) -> Result<RunningServer> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        let router = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    // A dropped sender also stops the server.
                    let _ = shutdown_rx.await;
                })
                .await
        });

        println!(
            "Server is listening on port http://{}:{}",
            self.config.host,
            local_addr.port()
        );
        debug!(%local_addr, "Listener bound");

        Ok(RunningServer {
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Handle to a server started with [`FrontDoor::start`].
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections, drain in-flight requests and wait.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        join(self.task.await)
    }

    /// Serve until Ctrl-C / SIGTERM, then stop gracefully.
    pub async fn run_until_shutdown(mut self) -> Result<()> {
        tokio::select! {
            () = shutdown_signal() => {}
            joined = &mut self.task => return join(joined),
        }

        info!("Shutdown signal received, stopping server");
        self.stop().await
    }
}

fn join(joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>) -> Result<()> {
    match joined {
        Ok(served) => served.map_err(ServerError::from),
        Err(e) => Err(ServerError::Io(std::io::Error::other(e))),
    }
}
