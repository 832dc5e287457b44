//! Background redraw of the window table.
//!
//! One tokio task renders the table on a fixed tick until the shutdown channel
//! fires, then renders one last time. Producer updates that finished before
//! that final pass are on screen; an update racing the final pass may not be.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::ui::WindowTable;

const MIN_TICK: Duration = Duration::from_millis(1);

/// Handle to the running refresh task
#[derive(Debug)]
pub struct RefreshScheduler {
    handle: JoinHandle<Result<()>>,
}

impl RefreshScheduler {
    /// Redraw period used when none is configured
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30);

    /// Spawn the refresh task on the current tokio runtime.
    ///
    /// The task stops when `shutdown` receives a message or its sender is dropped.
    pub fn start(
        table: Arc<WindowTable>,
        tick: Duration,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        let handle = tokio::spawn(refresh_task(table, tick, shutdown));
        Self { handle }
    }

    /// Wait for the task to finish its final render.
    ///
    /// Returns the write error that stopped the task, if any.
    pub async fn join(self) -> Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::Refresh(e.to_string())),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn refresh_task(
    table: Arc<WindowTable>,
    tick: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    log::debug!("refresh task started, redrawing every {:?}", tick);

    let mut ticker = interval(tick.max(MIN_TICK));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = table.render() {
                    log::error!("failed to redraw progress table: {}", e);
                    return Err(e);
                }
            }
            _ = shutdown.recv() => {
                break;
            }
        }
    }

    // Final frame
    let result = table.render();
    log::debug!("refresh task stopped");
    result
}
