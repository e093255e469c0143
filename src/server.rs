use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    routes::{control, github, misc, resend},
    state::AppState,
};

/// Every simulated provider endpoint on one router. The hosts' paths do not
/// overlap, so clients only swap the base URL.
pub fn build_router(state: AppState) -> Router {
    // github.com and api.github.com
    let github_routes = Router::new()
        .route("/login/oauth/access_token", post(github::exchange_code))
        .route("/ghost.png", get(github::avatar))
        .route("/user", get(github::current_user))
        .route("/user/emails", get(github::list_emails))
        .route("/user/{id}", get(github::user_by_id));

    // api.resend.com
    let resend_routes = Router::new().route("/emails", post(resend::send_email));

    let control_routes = Router::new()
        .route(
            "/github/users",
            post(control::insert_github_user).delete(control::delete_github_users),
        )
        .route("/emails/{recipient}", get(control::read_email));

    let mut app = Router::new()
        .merge(github_routes)
        .merge(resend_routes)
        .nest("/__mocks", control_routes);

    if let Some(origin) = state.config.dev_origin.as_deref() {
        app = app.route(&misc::ping_path(origin), post(misc::dev_ping));
    }

    app.fallback(misc::unhandled)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// A running mock server. Dropping it without [`MockServer::shutdown`] leaves
/// the listener running until the runtime stops.
pub struct MockServer {
    addr: SocketAddr,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl MockServer {
    /// Binds `config.bind_addr` (port 0 picks a free port) and starts serving.
    pub async fn start(config: Config) -> std::io::Result<Self> {
        let bind_addr = config.bind_addr;
        Self::start_with_state(bind_addr, AppState::from_config(config)).await
    }

    pub async fn start_with_state(
        bind_addr: SocketAddr,
        state: AppState,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(bind_addr).await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = build_router(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        info!(
            %addr,
            worker_id = %state.config.worker_id,
            passthrough_github = state.config.passthrough_github,
            "mock server listening"
        );

        Ok(MockServer {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stops accepting connections and waits for in-flight requests.
    pub async fn shutdown(mut self) -> std::io::Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let result = match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(std::io::Error::other(err)),
        };
        info!(addr = %self.addr, "mock server closed");
        result
    }
}

/// Resolves on ctrl-c or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
