//! Liveness server lifecycle.

use axum::Router;
use concierge_error::{HttpError, HttpErrorKind};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Bind the liveness listener.
///
/// # Errors
///
/// Returns error if the address cannot be bound.
#[instrument]
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, HttpError> {
    let address = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| {
            HttpError::new(HttpErrorKind::Bind {
                address: address.clone(),
                reason: e.to_string(),
            })
        })?;
    if let Ok(local) = listener.local_addr() {
        info!("Liveness server listening on {}", local);
    }
    Ok(listener)
}

/// Serve `router` until `shutdown` completes.
///
/// Peer addresses are made available to handlers for request logging.
///
/// # Errors
///
/// Returns error if the server fails while running.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), HttpError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| HttpError::new(HttpErrorKind::Serve(e.to_string())))?;

    info!("Liveness server stopped");
    Ok(())
}
