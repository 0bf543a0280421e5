use crate::components;
use crate::data::collector::DataCollector;
use crate::data::provider::MetricsProvider;
use crate::tui::Screen;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;

pub mod collector;
pub mod hardware;
pub mod network;
pub mod provider;
pub mod snapshot;
pub mod temperature;

/// How long the startup CPU and network samples are given before the first frame.
pub const CALIBRATION_WINDOW: Duration = Duration::from_millis(200);

/// Waits out [`CALIBRATION_WINDOW`] after the startup samples.
///
/// Returns `None` if shutdown was requested in the meantime. Otherwise returns
/// a receiver that can be handed to [`DataManager::run`].
pub async fn calibrate(mut shutdown: oneshot::Receiver<()>) -> Option<oneshot::Receiver<()>> {
    tokio::time::sleep(CALIBRATION_WINDOW).await;
    match shutdown.try_recv() {
        Ok(()) => None,
        Err(TryRecvError::Empty) => Some(shutdown),
        // A receiver whose sender is gone must not be polled again; a fresh
        // one without a sender never fires.
        Err(TryRecvError::Closed) => Some(oneshot::channel().1),
    }
}

pub struct DataManager<P> {
    pub collector: DataCollector<P>,
    update_interval: Duration,
}

impl<P: MetricsProvider> DataManager<P> {
    pub fn new(collector: DataCollector<P>, update_interval: Duration) -> Self {
        Self {
            collector,
            update_interval,
        }
    }

    /// Draws one frame per interval until `shutdown` fires. Returns the number
    /// of frames drawn.
    ///
    /// Shutdown is only observed between frames: a frame that has started
    /// sampling is always drawn whole, and no sampling starts after shutdown.
    pub async fn run<W: Write>(
        &mut self,
        screen: &mut Screen<W>,
        mut shutdown: oneshot::Receiver<()>,
    ) -> io::Result<u64> {
        let mut cycles = 0;
        // A dropped sender means nobody can ask us to stop; keep running.
        let mut shutdown_open = true;

        loop {
            let snapshot = self.collector.collect();
            let frame = components::render_frame(&snapshot)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            screen.draw(&frame)?;
            cycles += 1;

            tokio::select! {
                biased;
                res = &mut shutdown, if shutdown_open => match res {
                    Ok(()) => {
                        debug!("Shutdown requested after {} cycles", cycles);
                        break;
                    }
                    Err(_) => {
                        shutdown_open = false;
                        tokio::time::sleep(self.update_interval).await;
                    }
                },
                _ = tokio::time::sleep(self.update_interval) => {}
            }
        }

        Ok(cycles)
    }
}
