use env_logger::{Builder, Env};
use log::LevelFilter;

/// Route this crate's log output through `env_logger`.
///
/// Without `RUST_LOG` the filter keeps dependencies at `warn` and shows this
/// crate at `info` (world build, session start) or, with `verbose`, at `debug`
/// (embedded player, sprint gesture). Per-step state is logged at `trace`.
///
/// Calling it again after a logger is installed has no effect.
pub fn init(verbose: bool) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format_timestamp_millis()
        .try_init();
}

fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level.as_str().to_lowercase())
}
