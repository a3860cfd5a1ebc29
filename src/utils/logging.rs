use std::error::Error;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives.
pub const LOG_FILTER_ENV: &str = "AGENTDECK_LOG";

const DEFAULT_FILTER: &str = "info";

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global tracing subscriber.
///
/// The console owns the terminal, so diagnostics go to `log_file` when one
/// is given and are discarded otherwise.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let filter = build_filter();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_file_is_created() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("agentdeck.log");
        init_tracing(Some(&path)).expect("init");
        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("agentdeck.log");
        assert!(init_tracing(Some(&path)).is_err());
    }
}
