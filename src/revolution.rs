//! One calculation from start to end: parse the function, integrate, sample.
//!
//! Every failure on the way is a [`RevolutionError`]. [`run_task`] is the outer
//! boundary: it never fails and turns errors into the message shown to the user.
use crate::Utils::task_config::RevolutionTask;
use crate::numerical::disk_method::{BoundsError, VolumeResult, compute_volume_with};
use crate::numerical::quadrature::IntegrationError;
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_lambdify::{ParsedFunction, parse};
use log::{error, info};
use tabled::{Table, Tabled, settings::Style};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevolutionError {
    #[error("invalid function: {0}")]
    Parse(#[from] ParseError),
    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationError),
    #[error("invalid bounds: {0}")]
    Bounds(#[from] BoundsError),
    #[error("invalid task: {0}")]
    Config(String),
    #[error("plotting failed: {0}")]
    Plot(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of one calculation
#[derive(Debug)]
pub struct Calculation {
    pub function: ParsedFunction,
    pub result: VolumeResult,
}

#[derive(Tabled)]
struct SummaryRow {
    quantity: &'static str,
    value: String,
}

impl Calculation {
    pub fn volume(&self) -> f64 {
        self.result.volume
    }

    /// line shown to the user
    pub fn message(&self) -> String {
        format!(
            "The volume of the solid of revolution is: {:.4}",
            self.result.volume
        )
    }

    /// pretty table of the inputs and outputs
    pub fn summary_table(&self) -> String {
        let (lower, upper) = self.result.interval;
        let rows = vec![
            SummaryRow {
                quantity: "function",
                value: self.function.to_string(),
            },
            SummaryRow {
                quantity: "integrand",
                value: self.function.expr().disk_area().to_string(),
            },
            SummaryRow {
                quantity: "interval",
                value: format!("[{}, {}]", lower, upper),
            },
            SummaryRow {
                quantity: "volume",
                value: format!("{:.10}", self.result.volume),
            },
            SummaryRow {
                quantity: "estimated error",
                value: format!("{:.3e}", self.result.abs_error),
            },
            SummaryRow {
                quantity: "evaluations",
                value: self.result.evaluations.to_string(),
            },
            SummaryRow {
                quantity: "samples",
                value: self.result.samples.len().to_string(),
            },
        ];
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.to_string()
    }
}

/// Parses the task's function and computes the volume and samples.
pub fn calculate(task: &RevolutionTask) -> Result<Calculation, RevolutionError> {
    let function = parse(&task.function)?;
    let result = compute_volume_with(&function, task.a, task.b, &task.volume_settings())?;
    Ok(Calculation { function, result })
}

/// Runs [`calculate`] and returns the user-facing line: the volume, or "Error: ...".
pub fn run_task(task: &RevolutionTask) -> String {
    match calculate(task) {
        Ok(calculation) => {
            let message = calculation.message();
            info!("{}", message);
            message
        }
        Err(e) => {
            error!("calculation for '{}' failed: {}", task.function, e);
            format!("Error: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::disk_method::BoundsPolicy;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_calculate_cone() {
        let calculation = calculate(&RevolutionTask::new("x", 0.0, 3.0)).unwrap();
        assert_relative_eq!(calculation.volume(), 9.0 * PI, epsilon = 1e-9);
        assert_eq!(
            calculation.message(),
            "The volume of the solid of revolution is: 28.2743"
        );
        let table = calculation.summary_table();
        assert!(table.contains("volume"));
        assert!(table.contains("[0, 3]"));
    }

    #[test]
    fn test_run_task_messages() {
        assert_eq!(
            run_task(&RevolutionTask::new("1", 0.0, 1.0)),
            "The volume of the solid of revolution is: 3.1416"
        );
        assert_eq!(
            run_task(&RevolutionTask::new("x", 1.0, 1.0)),
            "The volume of the solid of revolution is: 0.0000"
        );

        let errors = [
            RevolutionTask::new("", 0.0, 1.0),
            RevolutionTask::new("x + ", 0.0, 1.0),
            RevolutionTask::new("x + y", 0.0, 1.0),
            RevolutionTask::new("x", 1.0, 0.0),
            RevolutionTask::new("x", f64::NAN, 0.0),
            RevolutionTask::new("1/x", -1.0, 1.0),
        ];
        for task in errors {
            let message = run_task(&task);
            assert!(message.starts_with("Error: "), "got '{}'", message);
        }
    }

    #[test]
    fn test_error_kinds() {
        let err = calculate(&RevolutionTask::new("x + y", 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, RevolutionError::Parse(ParseError::TooManyVariables { .. })));
        assert!(err.to_string().starts_with("invalid function"));

        let err = calculate(&RevolutionTask::new("x", 2.0, 1.0)).unwrap_err();
        assert!(matches!(err, RevolutionError::Bounds(BoundsError::Reversed { .. })));
    }

    #[test]
    fn test_deep_input_is_an_error_message() {
        let nested = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
        let chain = vec!["x"; 20_000].join("+");
        let signs = format!("{}x", "-".repeat(1000));
        for function in [nested, chain, signs] {
            let task = RevolutionTask::new(&function, 0.0, 1.0);
            assert!(matches!(
                calculate(&task),
                Err(RevolutionError::Parse(ParseError::TooDeep { .. }))
            ));
            let message = run_task(&task);
            assert!(message.starts_with("Error: invalid function"), "got '{}'", message);
        }
    }

    #[test]
    fn test_swap_policy_from_task() {
        let mut task = RevolutionTask::new("x", 3.0, 0.0);
        task.sampling.bounds_policy = BoundsPolicy::Swap;
        let calculation = calculate(&task).unwrap();
        assert_relative_eq!(calculation.volume(), 9.0 * PI, epsilon = 1e-9);
        assert_eq!(calculation.result.interval, (0.0, 3.0));
    }
}
