use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "dieselscope.log";

/// Roll over once the log passes 2 MB
const MAX_LOG_SIZE: u64 = 2 * 1024 * 1024;

/// The log file and the single previous generation kept beside it
#[derive(Debug, Clone)]
struct LogFile {
    path: PathBuf,
    max_size: u64,
}

impl LogFile {
    fn in_dir(data_dir: &Path, max_size: u64) -> Self {
        Self {
            path: data_dir.join(LOG_FILE_NAME),
            max_size,
        }
    }

    /// `dieselscope.log.1`
    fn previous_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".1");
        PathBuf::from(name)
    }

    /// Move an oversized log to `.1`, replacing the older generation.
    ///
    /// Returns whether a rollover happened.
    fn roll_over(&self) -> io::Result<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > self.max_size => {
                let previous = self.previous_path();
                if previous.exists() {
                    fs::remove_file(&previous)?;
                }
                fs::rename(&self.path, previous)?;
                Ok(true)
            }
            Ok(_) => Ok(false),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn open_append(&self) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

fn default_filter(level: &str) -> String {
    format!("dieselscope={level},dieselscope_core=warn")
}

/// Initialize logging to `{data_dir}/dieselscope.log`.
///
/// Terminal output stays clean for reports and the explorer prompt, so
/// nothing is logged to stdout or stderr. `RUST_LOG` overrides `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<PathBuf> {
    fs::create_dir_all(data_dir)?;

    let log = LogFile::in_dir(data_dir, MAX_LOG_SIZE);
    let rolled = match log.roll_over() {
        Ok(rolled) => rolled,
        Err(e) => {
            eprintln!("Warning: failed to roll over log file: {}", e);
            false
        }
    };
    let file = log.open_append()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log.path.display(), rolled, "dieselscope logging initialized");
    Ok(log.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_small_log_kept_in_place() {
        let dir = tempdir().unwrap();
        let log = LogFile::in_dir(dir.path(), 1024);
        fs::write(&log.path, "line one\nline two\n").unwrap();

        assert!(!log.roll_over().unwrap());
        assert_eq!(fs::read_to_string(&log.path).unwrap(), "line one\nline two\n");
        assert!(!log.previous_path().exists());
    }

    #[test]
    fn test_missing_log_is_ignored() {
        let dir = tempdir().unwrap();
        assert!(!LogFile::in_dir(dir.path(), 10).roll_over().unwrap());
    }

    #[test]
    fn test_large_log_rolls_to_previous_generation() {
        let dir = tempdir().unwrap();
        let log = LogFile::in_dir(dir.path(), 16);
        fs::write(log.previous_path(), "oldest\n").unwrap();
        fs::write(&log.path, "an entry longer than sixteen bytes\n").unwrap();

        assert!(log.roll_over().unwrap());

        assert!(!log.path.exists());
        assert_eq!(
            fs::read_to_string(log.previous_path()).unwrap(),
            "an entry longer than sixteen bytes\n"
        );
        assert!(log.previous_path().ends_with("dieselscope.log.1"));

        let mut file = log.open_append().unwrap();
        io::Write::write_all(&mut file, b"fresh\n").unwrap();
        assert_eq!(fs::read_to_string(&log.path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "dieselscope=debug,dieselscope_core=warn");
    }
}
