//! # Quitting a dispatcher from OS signals.
//!
//! Enabled by the `signals` feature. [`quit_on_signal`] is meant to be
//! spawned on a tokio runtime next to the thread that runs the loop:
//!
//! ```text
//! tokio task: quit_on_signal(d) ── SIGINT | SIGTERM | SIGQUIT ──► d.quit()
//! owner thread: d.run_loop() ──────────────────────────────────► drains, returns Quit
//! ```
//!
//! Off unix only Ctrl-C is observed.

use std::sync::Arc;

use tracing::info;

use crate::dispatcher::Dispatcher;

/// Resolves on the first termination signal the process receives.
///
/// # Errors
/// Fails when a signal listener cannot be installed.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let [int, term, quit] = [
        SignalKind::interrupt(),
        SignalKind::terminate(),
        SignalKind::quit(),
    ]
    .map(signal);
    let (mut int, mut term, mut quit) = (int?, term?, quit?);

    tokio::select! {
        _ = int.recv() => {},
        _ = term.recv() => {},
        _ = quit.recv() => {},
    }
    Ok(())
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Quits `dispatcher` once a termination signal arrives.
///
/// Completes right after calling [`Dispatcher::quit`]; the run loop itself
/// keeps draining on its own thread.
pub async fn quit_on_signal(dispatcher: Arc<Dispatcher>) -> std::io::Result<()> {
    quit_when(dispatcher, wait_for_shutdown_signal()).await
}

/// Quits `dispatcher` once `trigger` resolves successfully.
pub(crate) async fn quit_when<F>(dispatcher: Arc<Dispatcher>, trigger: F) -> std::io::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    trigger.await?;
    info!(
        dispatcher = dispatcher.config().label(),
        "shutdown signal received"
    );
    dispatcher.quit();
    Ok(())
}
