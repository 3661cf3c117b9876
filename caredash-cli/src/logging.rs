//! Logging setup for the `caredash` binary.
//!
//! The terminal belongs to the dashboard, so log lines go to a file. The
//! filter comes from `RUST_LOG` when set, else from `[logging] level`.
//!
//! ```bash
//! RUST_LOG=caredash_core=debug caredash
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter from the environment, falling back to the configured directive
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to `path`
pub fn init(level: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_common_directives() {
        for directive in ["info", "debug", "caredash_core=trace,warn"] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{}", directive);
        }
    }

    #[test]
    fn bad_directive_falls_back() {
        // Must not panic on garbage from the config file
        let _ = filter("caredash_core=notalevel[");
    }
}
