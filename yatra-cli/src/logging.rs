//! Logger installation for the CLI.

use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

/// Install `env_logger`, honouring `RUST_LOG`.
///
/// Installing twice is harmless; the second attempt is ignored.
pub(crate) fn init_logging() {
    let installed = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed");
    }
}
