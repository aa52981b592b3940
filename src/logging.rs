use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing.
///
/// Logs go to stderr so stdout stays clean for command output. Set
/// `CATFETCH_LOG` to a file path to write them to
/// `{path}.{timestamp}.{pid}` instead. The level comes from `RUST_LOG`
/// (default: info).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(log_path) = std::env::var("CATFETCH_LOG") {
        let pid = std::process::id();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

        match std::fs::File::create(&unique_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339());

                tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .init();
                return;
            }
            Err(_) => eprintln!("Warning: Failed to create log file: {}", unique_path),
        }
    }

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
