use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::service::ReactionService;

/// Configuration for the background counter audit.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Seconds between audit passes.
    pub audit_interval: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { audit_interval: 300 }
    }
}

/// Start the periodic audit loop.
///
/// Each tick recounts edges and repairs drifted movie stats. Returns a
/// CancellationToken that stops the loop when cancelled.
pub fn start(service: Arc<ReactionService>, config: WorkerConfig) -> CancellationToken {
    let cancel = CancellationToken::new();
    let interval = Duration::from_secs(config.audit_interval.max(1));

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            info!("reaction audit worker started (interval={interval:?})");
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        info!("reaction audit worker stopped");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        debug!("reaction audit scan");
                        let svc = Arc::clone(&service);
                        match tokio::task::spawn_blocking(move || svc.audit_stats()).await {
                            Ok(Ok(report)) if report.movies_repaired > 0 => {
                                info!("audit worker: repaired {} movies", report.movies_repaired)
                            }
                            Ok(Ok(_)) => {}
                            Ok(Err(e)) => error!("audit worker error: {e}"),
                            Err(e) => error!("audit worker task failed: {e}"),
                        }
                    }
                }
            }
        });
    }

    cancel
}
