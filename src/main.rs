use std::io::Write;
use std::process::ExitCode;
use syscheck::config::AppConfig;
use syscheck::data::collector::DataCollector;
use syscheck::data::hardware::Capability;
use syscheck::data::provider::SysinfoProvider;
use syscheck::data::{calibrate, DataManager};
use syscheck::tui::Screen;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> ExitCode {
    // stdout is the display, so logs go to stderr and stay quiet by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    rt.block_on(run(config))
}

async fn run(config: AppConfig) -> ExitCode {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => warn!("Unable to listen for Ctrl+C: {}", e),
        }
    });
    // Let the signal task register its handler before anything else runs
    tokio::task::yield_now().await;

    let capability = Capability::probe();
    let collector = DataCollector::new(SysinfoProvider::new(), capability, &config);

    let mut screen = Screen::stdout();
    let Some(shutdown_rx) = calibrate(shutdown_rx).await else {
        return stopped(&mut screen, 0);
    };

    let mut manager = DataManager::new(collector, config.update_interval());
    match manager.run(&mut screen, shutdown_rx).await {
        Ok(cycles) => stopped(&mut screen, cycles),
        Err(e) => {
            error!("Monitor loop failed: {}", e);
            let message = e.to_string();
            let mut text = format!("An unexpected error occurred: {}", message);
            if let Some(hint) = manager.collector.capability().load_failure_hint(&message) {
                text.push_str("\n\n");
                text.push_str(&hint);
            }
            let _ = screen.exit_with(&text);
            ExitCode::FAILURE
        }
    }
}

fn stopped<W: Write>(screen: &mut Screen<W>, cycles: u64) -> ExitCode {
    info!("Stopped after {} cycles", cycles);
    let _ = screen.exit_with("System monitor stopped by user.");
    ExitCode::SUCCESS
}
