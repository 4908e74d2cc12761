//! Logging setup for the `chainkv` binary.
//!
//! The library emits through the [`log`] facade only:
//!
//! - `info`: account loads, table expansions, batch summaries;
//! - `warn`: batch lines that were skipped;
//! - `debug`: every parsed command and every bucket collision.
//!
//! `RUST_LOG` overrides the defaults, e.g. `RUST_LOG=chainkv=debug`.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Level for everything outside this crate.
const DEPENDENCY_LEVEL: LevelFilter = LevelFilter::Warn;

/// Level for the `chainkv` target.
const CRATE_LEVEL: LevelFilter = LevelFilter::Info;

/// Returns the stderr logger configuration used by the binary, with
/// `RUST_LOG` already applied on top of the defaults.
pub fn logger_builder() -> Builder {
    let mut builder = Builder::new();

    builder
        .filter_level(DEPENDENCY_LEVEL)
        .filter_module(env!("CARGO_CRATE_NAME"), CRATE_LEVEL)
        .format_timestamp_millis()
        .parse_default_env();

    builder
}

/// Installs [`logger_builder`] as the global logger. Calls after the first,
/// or after another logger was installed, do nothing.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let _ = logger_builder().try_init();
    });
}

#[cfg(test)]
mod tests {
    use log::{debug, info};

    use super::*;

    #[test]
    fn test_initialize_twice() {
        initialize_logger();
        initialize_logger();
        debug!("debug message in test");
        info!("info message in test");
    }

    #[test]
    fn test_builder_enables_crate_info() {
        let logger = logger_builder().build();

        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(logger.filter(), CRATE_LEVEL);
        }
    }
}
