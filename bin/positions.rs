use anyhow::Context;
use jemallocator::Jemalloc;
use log::{error, info};
use simple_logger::SimpleLogger;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use positions_indexer::{PositionHandler, Settings};

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;

    SimpleLogger::new()
        .with_level(settings.logging.level_filter())
        .init()
        .context("Failed to initialize logger")?;

    let handler = PositionHandler::new(settings.positions.clone());
    let cancellation_token = CancellationToken::new();

    // Events in on stdin, amounts out on stdout; logs go to stderr
    let handler_token = cancellation_token.child_token();
    let mut handler_handle = tokio::spawn(async move {
        handler
            .run(
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                handler_token,
            )
            .await
    });

    info!("Position handler running. Reading events from stdin.");

    #[cfg(unix)]
    let mut sigterm_stream = {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?
    };

    let shutdown = async {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
                },
                _ = sigterm_stream.recv() => {
                    info!("Received SIGTERM, exiting gracefully...");
                },
            };
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
        }
    };

    let result = tokio::select! {
        result = &mut handler_handle => result,
        _ = shutdown => {
            cancellation_token.cancel();
            info!("Waiting for position handler to stop...");
            handler_handle.await
        }
    };

    match result.context("Position handler task panicked")? {
        Ok(summary) => {
            info!(
                "Done: {} positions handled, {} skipped",
                summary.handled, summary.skipped
            );
            Ok(())
        }
        Err(e) => {
            error!("Position handler failed: {:#}", e);
            Err(e)
        }
    }
}
