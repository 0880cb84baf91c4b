use crate::Examples::parabolic_examples::parabolic_examples;
use crate::ParabolicPDE::convergence_sweep::{ConvergenceReport, convergence_sweep};
use crate::ParabolicPDE::manufactured_problems::{PROBLEM_NAMES, problem_by_name};
use crate::ParabolicPDE::parabolic_error::ParabolicError;
use crate::ParabolicPDE::parabolic_task::{ParabolicTask, SolveOutcome};
use crate::ParabolicPDE::solve_settings::RunConfig;
use log::{error, info};
use std::io::{self, Write};

fn task_from_config(config: &RunConfig) -> Result<ParabolicTask, String> {
    match problem_by_name(&config.problem) {
        Some(task) => task.map_err(|e| e.to_string()),
        None => Err(format!(
            "unknown problem \"{}\", available problems: {}",
            config.problem,
            PROBLEM_NAMES.join(", ")
        )),
    }
}

fn print_outcome(outcome: &SolveOutcome) {
    use prettytable::{Table, row};
    let mesh = outcome.mesh();
    let mut table = Table::new();
    table.add_row(row!["Parameter", "Value"]);
    table.add_row(row!["scheme", outcome.scheme.to_string()]);
    table.add_row(row!["approximation", outcome.approximation.to_string()]);
    table.add_row(row!["n", mesh.n]);
    table.add_row(row!["k", mesh.k]);
    table.add_row(row!["h", format!("{:.4e}", mesh.h)]);
    table.add_row(row!["tau", format!("{:.4e}", mesh.tau)]);
    table.add_row(row!["a·tau/h²", format!("{:.4}", mesh.realized_courant)]);
    if let Some(max_error) = outcome.max_error() {
        table.add_row(row!["max |error|", format!("{:.4e}", max_error)]);
    }
    table.printstd();
    for diagnostic in &outcome.diagnostics {
        println!("\x1b[33m{}\x1b[0m", diagnostic);
    }
}

/// Load a run config and solve it once
pub fn solve_config_file(path: &str) -> Result<SolveOutcome, String> {
    let config = RunConfig::load_from_file(path).map_err(|e| e.to_string())?;
    let task = task_from_config(&config)?;
    task.pretty_print_task();
    let outcome = task.solve(&config.settings).map_err(|e| e.to_string())?;
    print_outcome(&outcome);
    Ok(outcome)
}

/// Load a run config and sweep it; the default sweep is used when the file has none
pub fn sweep_config_file(path: &str) -> Result<ConvergenceReport, String> {
    let config = RunConfig::load_from_file(path).map_err(|e| e.to_string())?;
    let task = task_from_config(&config)?;
    let sweep = match config.sweep {
        Some(sweep) => sweep,
        None => RunConfig::default()
            .sweep
            .ok_or_else(|| "no sweep configured".to_string())?,
    };
    let report = convergence_sweep(&task, &sweep).map_err(|e| e.to_string())?;
    report.pretty_print();
    Ok(report)
}

pub fn create_template(path: &str) -> Result<(), ParabolicError> {
    RunConfig::create_template(path)?;
    println!("template written to {}", path);
    Ok(())
}

pub fn parabolic_menu() {
    loop {
        println!("\n=== Parabolic PDE ===");
        println!("\x1b[33m1. Solve a run config file\x1b[0m");
        println!("\x1b[33m2. Convergence sweep of a run config file\x1b[0m");
        println!("\x1b[33m3. Create a run config template\x1b[0m");
        println!("\x1b[33m4. Examples\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");
        let choice = prompt("Enter your choice: ");
        match choice.trim() {
            "1" => {
                let path = prompt("Path to the run config: ");
                if let Err(e) = solve_config_file(path.trim()) {
                    error!("{}", e);
                }
            }
            "2" => {
                let path = prompt("Path to the run config: ");
                if let Err(e) = sweep_config_file(path.trim()) {
                    error!("{}", e);
                }
            }
            "3" => {
                let path = prompt("Path of the new template [run_config.json]: ");
                let path = match path.trim() {
                    "" => "run_config.json",
                    other => other,
                };
                if let Err(e) = create_template(path) {
                    error!("{}", e);
                }
            }
            "4" => {
                let number = prompt("Example number (0-4): ");
                match number.trim().parse::<usize>() {
                    Ok(task) => parabolic_examples(task),
                    Err(_) => println!("Invalid example number."),
                }
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
    info!("leaving parabolic menu");
}

pub(crate) fn prompt(message: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", message);
    let _ = io::stdout().flush();
    let mut input = String::new();
    if let Err(e) = io::stdin().read_line(&mut input) {
        error!("failed to read input: {}", e);
    }
    input
}
