use pricer::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. The returned guard flushes the
/// file writer and must be held for the life of the process.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{level},pricer={level},tower_http=info", level = config.level))
    });

    let mut guard = None;
    let file_layer = config.dir.as_ref().and_then(|log_dir| {
        // `tracing_appender::rolling::daily` panics if it can't create the
        // initial log file, so preflight writability.
        let writable = std::fs::create_dir_all(log_dir).is_ok() && {
            let test_path = log_dir.join(".pricer_write_test");
            let ok = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&test_path)
                .is_ok();
            let _ = std::fs::remove_file(&test_path);
            ok
        };
        if !writable {
            eprintln!(
                "Warning: Could not write to log directory {}, file logging disabled",
                log_dir.display()
            );
            return None;
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "pricer.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No color codes in file
                .with_target(true),
        )
    });

    // Console layer
    let console_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_target(true).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(filter)
        .init();

    if let Some(dir) = config.dir.as_ref().filter(|_| guard.is_some()) {
        eprintln!("Logging to: {}/pricer.log", dir.display());
    }
    guard
}
