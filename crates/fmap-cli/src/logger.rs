//! Logging infrastructure for the fmap CLI.
//!
//! Structured logging via the `tracing` ecosystem with verbosity flags and
//! a `RUST_LOG` override.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at program start. Level resolution order: `--verbose` (debug
/// for fmap crates), `--quiet` (errors only), `RUST_LOG`, then the info
/// default.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("fmap_core=debug,fmap_cli=debug")
    } else if quiet {
        EnvFilter::new("fmap_core=error,fmap_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fmap_core=info,fmap_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // tests only exercise filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _filter = EnvFilter::new("fmap_core=debug,fmap_cli=debug");
    }

    #[test]
    fn quiet_filter_parses() {
        let _filter = EnvFilter::new("fmap_core=error,fmap_cli=error");
    }
}
