//! Shutdown hooks
//!
//! Every exit path (normal return, interrupt, panic) closes the process-wide
//! logger so the sink is flushed before the process ends.

use std::panic;
use std::sync::Once;

use crate::logging;

static PANIC_HOOK: Once = Once::new();

/// Close the global logger before running the previously installed panic hook
///
/// Installing more than once has no additional effect.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Err(e) = logging::close_global() {
                // tracing may be unavailable while panicking
                eprintln!("modlog: failed to close log file: {}", e);
            }
            previous(info);
        }));
    });
}

/// Resolve when the process receives Ctrl+C or (on unix) SIGTERM
pub async fn wait_for_shutdown_signal() -> &'static str {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            "SIGINT"
        }
        _ = terminate() => "SIGTERM",
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to set up SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    // Ctrl+C is the only shutdown signal here
    std::future::pending::<()>().await;
}
