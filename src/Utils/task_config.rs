//! Task files: one TOML document describes one calculation.
//!
//! ```toml
//! function = "sqrt(4 - x^2)"
//! a = -2.0
//! b = 2.0
//!
//! [quadrature]
//! method = "adaptive"     # "adaptive" | "gauss_legendre" | "simpson"
//! epsabs = 1.49e-8
//! limit = 50
//!
//! [sampling]
//! points = 100
//! bounds_policy = "swap"  # "reject" (default) | "swap"
//!
//! [plots]
//! output_dir = "plots"
//!
//! [logging]
//! level = "debug"
//! file = "revolve.log"
//!
//! [export]
//! csv = "samples.csv"
//! ```
//! Everything except `function`, `a` and `b` is optional.
use crate::numerical::disk_method::{BoundsPolicy, DEFAULT_SAMPLE_POINTS, VolumeSettings};
use crate::numerical::quadrature::QuadratureConfig;
use crate::numerical::revolution_surface::{DEFAULT_FRAMES, DEFAULT_THETA_POINTS};
use crate::revolution::RevolutionError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// curve samples
    pub points: usize,
    /// angles per turn of the 3D mesh
    pub theta_points: usize,
    /// frames of each animation
    pub frames: usize,
    pub bounds_policy: BoundsPolicy,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            points: DEFAULT_SAMPLE_POINTS,
            theta_points: DEFAULT_THETA_POINTS,
            frames: DEFAULT_FRAMES,
            bounds_policy: BoundsPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub enabled: bool,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// delay between animation frames
    pub frame_delay_ms: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            enabled: true,
            output_dir: PathBuf::from("plots"),
            width: 800,
            height: 600,
            frame_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// off, error, warn, info, debug or trace
    pub level: String,
    pub console: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            console: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, RevolutionError> {
        LevelFilter::from_str(self.level.trim()).map_err(|_| {
            RevolutionError::Config(format!(
                "unknown log level '{}', expected off, error, warn, info, debug or trace",
                self.level
            ))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// where to write the (x, f(x)) samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevolutionTask {
    pub function: String,
    pub a: f64,
    pub b: f64,
    #[serde(default)]
    pub quadrature: QuadratureConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub plots: PlotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl RevolutionTask {
    /// task with default settings for everything but the function and bounds
    pub fn new(function: &str, a: f64, b: f64) -> Self {
        RevolutionTask {
            function: function.to_string(),
            a,
            b,
            quadrature: QuadratureConfig::default(),
            sampling: SamplingConfig::default(),
            plots: PlotConfig::default(),
            logging: LoggingConfig::default(),
            export: ExportConfig::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, RevolutionError> {
        let task: RevolutionTask = toml::from_str(content)
            .map_err(|e| RevolutionError::Config(format!("bad task file: {}", e)))?;
        task.validate()?;
        Ok(task)
    }

    pub fn from_file(path: &Path) -> Result<Self, RevolutionError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, RevolutionError> {
        toml::to_string(self).map_err(|e| RevolutionError::Config(e.to_string()))
    }

    /// Checks the settings that can be checked without running anything.
    pub fn validate(&self) -> Result<(), RevolutionError> {
        self.quadrature.validate()?;
        self.logging.level_filter()?;
        let sampling = &self.sampling;
        if sampling.points < 2 || sampling.theta_points < 2 {
            return Err(RevolutionError::Config(
                "sampling.points and sampling.theta_points must be at least 2".to_string(),
            ));
        }
        if sampling.frames == 0 {
            return Err(RevolutionError::Config(
                "sampling.frames must be at least 1".to_string(),
            ));
        }
        if self.plots.width == 0 || self.plots.height == 0 {
            return Err(RevolutionError::Config(
                "plot width and height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn volume_settings(&self) -> VolumeSettings {
        VolumeSettings {
            quadrature: self.quadrature.clone(),
            points: self.sampling.points,
            bounds_policy: self.sampling.bounds_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::quadrature::{IntegrationError, QuadMethod};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_task_gets_defaults() {
        let task = RevolutionTask::from_toml("function = \"x^2\"\na = 0.0\nb = 1.0\n").unwrap();
        assert_eq!(task, RevolutionTask::new("x^2", 0.0, 1.0));
        assert_eq!(task.sampling.points, 100);
        assert_eq!(task.sampling.frames, 50);
        assert_eq!(task.quadrature.method, QuadMethod::Adaptive);
        assert_eq!(task.quadrature.epsabs, 1.49e-8);
        assert_eq!(task.sampling.bounds_policy, BoundsPolicy::Reject);
        assert!(task.plots.enabled);
        assert_eq!(task.logging.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_full_task() {
        let content = r#"
            function = "sqrt(4 - x^2)"
            a = -2.0
            b = 2.0

            [quadrature]
            method = "simpson"
            simpson_intervals = 200

            [sampling]
            points = 50
            bounds_policy = "swap"

            [plots]
            enabled = false
            output_dir = "out"

            [logging]
            level = "DEBUG"
            console = false
            file = "revolve.log"

            [export]
            csv = "samples.csv"
        "#;
        let task = RevolutionTask::from_toml(content).unwrap();
        assert_eq!(task.a, -2.0);
        assert_eq!(task.quadrature.method, QuadMethod::Simpson);
        assert_eq!(task.quadrature.simpson_intervals, 200);
        assert_eq!(task.quadrature.limit, 50);
        assert_eq!(task.sampling.bounds_policy, BoundsPolicy::Swap);
        assert_eq!(task.sampling.theta_points, 100);
        assert!(!task.plots.enabled);
        assert_eq!(task.plots.output_dir, PathBuf::from("out"));
        assert_eq!(task.logging.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(task.logging.file, Some(PathBuf::from("revolve.log")));
        assert_eq!(task.export.csv, Some(PathBuf::from("samples.csv")));

        let settings = task.volume_settings();
        assert_eq!(settings.points, 50);
        assert_eq!(settings.bounds_policy, BoundsPolicy::Swap);
    }

    #[test]
    fn test_bad_tasks() {
        let missing_bound = "function = \"x\"\na = 0.0\n";
        let unknown_key = "function = \"x\"\na = 0.0\nb = 1.0\ncolour = \"red\"\n";
        let bad_method = "function = \"x\"\na = 0\nb = 1\n[quadrature]\nmethod = \"romberg\"\n";
        let bad_level = "function = \"x\"\na = 0\nb = 1\n[logging]\nlevel = \"loud\"\n";
        let bad_points = "function = \"x\"\na = 0\nb = 1\n[sampling]\npoints = 1\n";
        for content in [missing_bound, unknown_key, bad_method, bad_level, bad_points] {
            assert!(matches!(
                RevolutionTask::from_toml(content),
                Err(RevolutionError::Config(_))
            ));
        }
        let odd_simpson = "function = \"x\"\na = 0\nb = 1\n[quadrature]\nsimpson_intervals = 3\n";
        assert!(matches!(
            RevolutionTask::from_toml(odd_simpson),
            Err(RevolutionError::Integration(IntegrationError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_from_file_and_back() {
        let mut task = RevolutionTask::new("exp(-x)", 0.0, 3.0);
        task.quadrature.method = QuadMethod::GaussLegendre;
        task.export.csv = Some(PathBuf::from("exp.csv"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", task.to_toml().unwrap()).unwrap();
        let loaded = RevolutionTask::from_file(file.path()).unwrap();
        assert_eq!(loaded, task);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RevolutionTask::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, RevolutionError::Io(_)));
    }
}
