use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Sets up the global tracing subscriber. `RUST_LOG` still wins over the
/// defaults; `verbose` raises the crate's own directive to debug.
pub fn init_logging(verbose: bool) {
    let crate_directive = if verbose {
        "sampamap=debug"
    } else {
        "sampamap=info"
    };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into())
        .add_directive(crate_directive.parse().unwrap());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact());

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set up tracing subscriber");
}
