//! Demo command: simulated concurrent downloads on the progress table.
//!
//! Each simulated download owns one `ProgressLine` and advances it once per
//! finished item, the way a real downloader would.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use tokio::sync::broadcast;

use crate::core::{Config, RefreshScheduler};
use crate::platform::TerminalSession;
use crate::ui::{ProgressLine, WindowTable};

/// Settings for one demo run
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub downloads: usize,
    pub items: usize,
    pub item_delay: Duration,
}

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(interval_ms) = matches.get_one::<u64>("interval-ms") {
        config.refresh_interval_ms = *interval_ms;
    }
    if let Some(fill) = matches.get_one::<char>("fill") {
        config.fill_symbol = *fill;
    }

    let options = DemoOptions {
        downloads: matches.get_one::<usize>("lines").copied().unwrap_or(3),
        items: matches.get_one::<usize>("items").copied().unwrap_or(20),
        item_delay: Duration::from_millis(
            matches.get_one::<u64>("delay-ms").copied().unwrap_or(50),
        ),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .thread_name("ptable-worker")
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(options, config))
}

/// Run the demo on the live table, or in plain mode when the terminal can't host it.
pub async fn run(options: DemoOptions, config: Config) -> Result<()> {
    let session = match TerminalSession::setup() {
        Ok(session) => session,
        Err(e) => {
            log::warn!("progress table unavailable, using plain output: {}", e);
            return run_plain(options).await;
        }
    };

    let table = Arc::new(WindowTable::new(&session));
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let scheduler =
        RefreshScheduler::start(table.clone(), config.refresh_interval(), shutdown_rx);

    let mut producers = Vec::with_capacity(options.downloads);
    for id in 0..options.downloads {
        let line = ProgressLine::with_fill(config.fill_symbol);
        table
            .add_line(line.blocks())
            .context("Failed to add progress line")?;
        producers.push(tokio::spawn(simulate_download(id, line, options.clone())));
    }

    let mut outcome = Ok(());
    for producer in producers {
        if let Err(e) = producer.await {
            outcome = Err(anyhow!("download task failed: {}", e));
        }
    }

    let _ = shutdown_tx.send(());
    let rendered = scheduler.join().await;
    session.close().context("Failed to restore terminal")?;

    rendered.context("Progress display failed")?;
    outcome?;

    println!(
        "{}",
        format!("✓ {} downloads finished", options.downloads).green()
    );
    Ok(())
}

/// Line-based fallback: one message per finished download.
async fn run_plain(options: DemoOptions) -> Result<()> {
    let mut producers = Vec::with_capacity(options.downloads);
    for id in 0..options.downloads {
        let line = ProgressLine::new();
        producers.push(tokio::spawn(simulate_download(id, line, options.clone())));
    }

    for (id, producer) in producers.into_iter().enumerate() {
        producer
            .await
            .map_err(|e| anyhow!("download task failed: {}", e))?;
        println!("{} file {} downloaded", "✓".green(), id + 1);
    }
    Ok(())
}

/// Pretend to fetch `items` pieces, advancing the line after each one.
async fn simulate_download(id: usize, line: ProgressLine, options: DemoOptions) {
    let step = ProgressLine::step_percentage(options.items);
    // Stagger the downloads so the rows move at different speeds.
    let delay = options.item_delay + options.item_delay * (id as u32) / 2;

    for item in 1..=options.items {
        line.update_info(&format!(
            "file {} item {}/{}",
            id + 1,
            item,
            options.items
        ));
        tokio::time::sleep(delay).await;
        line.progress(step);
    }

    line.update_info(&format!("file {} done", id + 1));
    log::debug!("download {} finished", id + 1);
}
