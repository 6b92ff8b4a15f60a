use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the crate logs at `info`, or `debug` when
/// `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "gradebook=debug" } else { "gradebook=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
