use cinematch_core::{Controller, HttpMovieApi, MovieApi, Service, join_all_ordered};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Drive `controller` from UI commands, one trigger at a time, until the
/// command channel closes or `cancel` fires. A trigger already running is
/// allowed to finish.
pub async fn run_controller<A: MovieApi>(
    mut controller: Controller<A>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    cancel: CancellationToken,
) -> Controller<A> {
    loop {
        let cmd = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            BackendCommand::LoadPopular => controller.load_popular().await,
            BackendCommand::Search(query) => controller.submit_search(&query).await,
            BackendCommand::SelectMovie(movie) => controller.select_movie(movie).await,
            BackendCommand::Back => controller.back(),
        }
    }
    tracing::debug!("controller task stopped");
    controller
}

/// Probe both services concurrently and report each result to the UI.
pub async fn probe_health(api: HttpMovieApi, event_tx: mpsc::UnboundedSender<BackendEvent>) {
    let api = &api;
    let results = join_all_ordered(
        vec![Service::Backend, Service::Proxy],
        move |service| async move { (service, api.check_health(service).await) },
    )
    .await;

    for (service, result) in results {
        let healthy = match result {
            Ok(()) => {
                tracing::info!(service = service.name(), "service reachable");
                true
            }
            Err(e) => {
                tracing::warn!(service = service.name(), error = %e, "service health check failed");
                false
            }
        };
        let _ = event_tx.send(BackendEvent::Health { service, healthy });
    }
}
