use crate::Utils::task_config::LoggingConfig;
use crate::numerical::disk_method::SampleSet;
use crate::revolution::RevolutionError;
use chrono::Local;
use csv::Writer;
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::{Path, PathBuf};

/// A directory gets a timestamped log file inside it, anything else is used as is.
pub fn log_file_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        path.join(format!("log_{}.txt", date_and_time))
    } else {
        path.to_path_buf()
    }
}

/// Initialize the global logger from the `[logging]` section.
/// Returns false if a logger was already installed by someone else.
pub fn init_logger(config: &LoggingConfig) -> Result<bool, RevolutionError> {
    let level = config.level_filter()?;

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    if config.console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    // File logger
    if let Some(ref path) = config.file {
        let file = File::create(log_file_path(path))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    if loggers.is_empty() {
        return Ok(false);
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}

/// Writes the samples as two columns with header `x,f(x)` (or the variable's name).
pub fn save_samples_to_csv(
    samples: &SampleSet,
    arg: &str,
    label: &str,
    filename: &Path,
) -> Result<(), RevolutionError> {
    let mut writer = Writer::from_path(filename)?;
    writer.write_record([arg, label])?;
    for (x, y) in samples.iter() {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    info!("{} samples saved to {}", samples.len(), filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_lambdify::parse;
    use std::fs;

    #[test]
    fn test_save_samples_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        let samples = SampleSet::new(&parse("2*t").unwrap(), 0.0, 1.0, 3);
        save_samples_to_csv(&samples, "t", "f(t)", &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "t,f(t)\n0,0\n0.5,1\n1,2\n");
    }

    #[test]
    fn test_csv_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("samples.csv");
        let samples = SampleSet::new(&parse("x").unwrap(), 0.0, 1.0, 2);
        assert!(save_samples_to_csv(&samples, "x", "f(x)", &path).is_err());
    }

    #[test]
    fn test_log_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let in_dir = log_file_path(dir.path());
        assert_eq!(in_dir.parent(), Some(dir.path()));
        let name = in_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("log_") && name.ends_with(".txt"));

        let plain = dir.path().join("run.log");
        assert_eq!(log_file_path(&plain), plain);
    }

    #[test]
    fn test_init_logger_rejects_bad_level() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
            ..Default::default()
        };
        assert!(matches!(init_logger(&config), Err(RevolutionError::Config(_))));
        let silent = LoggingConfig {
            console: false,
            ..Default::default()
        };
        assert!(!init_logger(&silent).unwrap());
    }
}
