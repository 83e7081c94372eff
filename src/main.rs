use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use modlog::config::Config;
use modlog::logging::{self, Logger, OutputCapabilities};
use modlog::shutdown;

const STDIN_MODULE: &str = "STDIN";

/// Split `MODULE LEVEL: message`; anything else is an INFO line from STDIN
fn parse_input_line(line: &str) -> (&str, &str, &str) {
    if let Some((head, message)) = line.split_once(": ") {
        let mut words = head.split_whitespace();
        if let (Some(module), Some(level), None) = (words.next(), words.next(), words.next()) {
            return (module, level, message);
        }
    }
    (STDIN_MODULE, "INFO", line)
}

async fn pipe_stdin(logger: &Logger) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let (module, level, message) = parse_input_line(&line);
        logger.log(module, message, level);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Internal diagnostics only; log lines themselves go through the Logger
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "modlog=warn".into()),
        )
        .init();

    let config = Config::load()?;
    let caps = OutputCapabilities::detect();
    let level = config.effective_level(&caps);

    shutdown::install_panic_hook();

    let logger = logging::get_instance_with(level.as_str(), config.file.as_deref(), || caps)
        .context("Failed to initialize logger")?;
    logger.debug("modlog", format!("Logging at {} and above", level));

    tokio::select! {
        result = pipe_stdin(logger) => {
            if let Err(e) = result {
                logger.exception("modlog", &e, "Input failed");
            }
        }
        signal = shutdown::wait_for_shutdown_signal() => {
            logger.info("modlog", format!("Received {}, shutting down", signal));
            logging::close_global().context("Failed to close log file")?;
            // The blocking stdin read would otherwise hold up runtime shutdown
            std::process::exit(0);
        }
    }

    logging::close_global().context("Failed to close log file")?;
    Ok(())
}
