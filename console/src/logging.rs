use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// Log lines go to stderr so they never interleave with prompts on stdout.
/// `RUST_LOG` wins over `default_directive` when set.
pub fn init_tracing(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
