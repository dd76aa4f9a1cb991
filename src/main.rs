#![allow(non_snake_case)]
use RustedRevolve::Utils::logger::{init_logger, save_samples_to_csv};
use RustedRevolve::Utils::plots::render_all;
use RustedRevolve::Utils::task_config::RevolutionTask;
use RustedRevolve::revolution::{Calculation, RevolutionError, calculate};
use log::{error, info, warn};
use std::env;
use std::path::Path;
use std::process;

const USAGE: &str = "usage:\n  RustedRevolve <task.toml>\n  RustedRevolve \"<f(x)>\" <a> <b>";

fn parse_bound(name: &str, value: &str) -> Result<f64, RevolutionError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RevolutionError::Config(format!("{} must be a number, got '{}'", name, value)))
}

fn task_from_args(args: &[String]) -> Result<RevolutionTask, RevolutionError> {
    match args {
        [path] => RevolutionTask::from_file(Path::new(path)),
        [function, a, b] => {
            let task = RevolutionTask::new(function, parse_bound("a", a)?, parse_bound("b", b)?);
            task.validate()?;
            Ok(task)
        }
        _ => Err(RevolutionError::Config(USAGE.to_string())),
    }
}

fn report(calculation: &Calculation, task: &RevolutionTask) -> Result<(), RevolutionError> {
    println!("{}", calculation.message());
    println!("{}", calculation.summary_table());

    if let Some(ref path) = task.export.csv {
        let function = &calculation.function;
        save_samples_to_csv(
            &calculation.result.samples,
            function.variable().unwrap_or("x"),
            &function.label(),
            path,
        )?;
    }
    if task.plots.enabled {
        let written = render_all(calculation, task)?;
        info!("{} plots written to {}", written.len(), task.plots.output_dir.display());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let task = match task_from_args(&args) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    match init_logger(&task.logging) {
        Ok(true) => {}
        Ok(false) => eprintln!("logging is off"),
        Err(e) => eprintln!("logger not initialized: {}", e),
    }
    info!("task: f = {}, a = {}, b = {}", task.function, task.a, task.b);

    let calculation = match calculate(&task) {
        Ok(calculation) => calculation,
        Err(e) => {
            error!("{}", e);
            println!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = report(&calculation, &task) {
        // the volume is already printed, only the extras failed
        warn!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_task_from_function_and_bounds() {
        let task = task_from_args(&strings(&["x^2", "0", "2.5"])).unwrap();
        assert_eq!(task, RevolutionTask::new("x^2", 0.0, 2.5));
    }

    #[test]
    fn test_bad_arguments() {
        for args in [vec![], strings(&["x", "0"]), strings(&["x", "zero", "1"])] {
            assert!(matches!(task_from_args(&args), Err(RevolutionError::Config(_))));
        }
        assert!(matches!(
            task_from_args(&strings(&["/no/such/task.toml"])),
            Err(RevolutionError::Io(_))
        ));
    }
}
