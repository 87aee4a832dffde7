// src/server.rs
// Binding the listener and running until a shutdown is requested

use crate::access_log::RequestLogger;
use crate::error::ServeError;
use crate::network::NetworkUtils;
use crate::routes::RouteTable;
use crate::shutdown::ShutdownManager;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

pub const BIND_HOST: &str = "0.0.0.0";

#[derive(Debug)]
pub struct ServerRunner {
    routes: Arc<RouteTable>,
    listener: TcpListener,
    shutdown_timeout: u64,
}

impl ServerRunner {
    /// Bind `0.0.0.0:<port>`. Port 0 picks an ephemeral port.
    pub fn bind(routes: RouteTable, port: u16, shutdown_timeout: u64) -> Result<Self, ServeError> {
        if port != 0 && !NetworkUtils::is_port_available("127.0.0.1", port) {
            return Err(ServeError::PortInUse(port));
        }

        let listener = TcpListener::bind((BIND_HOST, port))
            .map_err(|source| ServeError::Bind { port, source })?;

        Ok(Self {
            routes: Arc::new(routes),
            listener,
            shutdown_timeout,
        })
    }

    /// The port actually bound.
    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Serve until SIGINT, SIGTERM or a request to the shutdown route, then
    /// stop gracefully.
    pub async fn run(self) -> Result<(), ServeError> {
        let port = self.port();
        let mut shutdown = ShutdownManager::new();
        shutdown.listen_for_signals()?;
        let trigger = web::Data::new(shutdown.trigger());
        let routes = self.routes;

        let server = HttpServer::new(move || {
            let routes = Arc::clone(&routes);
            App::new()
                .wrap(RequestLogger)
                .app_data(trigger.clone())
                .configure(move |cfg| routes.configure(cfg))
        })
        .disable_signals()
        .shutdown_timeout(self.shutdown_timeout)
        .listen(self.listener)
        .map_err(|source| ServeError::Bind { port, source })?
        .run();

        let watcher = shutdown.watch(server.handle());

        let result = server.await;
        watcher.abort();

        result.map_err(|source| ServeError::Bind { port, source })
    }
}
