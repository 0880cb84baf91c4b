use super::cli_parabolic::{parabolic_menu, prompt, solve_config_file, sweep_config_file};
use crate::Examples::parabolic_examples::parabolic_examples;
use log::error;

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = prompt("Enter your choice: ");

        match choice.trim() {
            "1" => parabolic_menu(),
            "2" => {
                for task in 0..5 {
                    parabolic_examples(task);
                }
            }
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

/// Non-interactive entry: `ParaThe <run_config.json> [--sweep]`
pub fn run_with_args(args: &[String]) {
    let Some(path) = args.first() else {
        return run_interactive_menu();
    };
    let sweep = args.iter().skip(1).any(|a| a == "--sweep");
    let result = if sweep {
        sweep_config_file(path).map(|_| ())
    } else {
        solve_config_file(path).map(|_| ())
    };
    if let Err(e) = result {
        error!("{}", e);
    }
}

/* colors
Blue (\x1b[34m) - Welcome header text
Yellow (\x1b[33m) - Menu options
Cyan (\x1b[36m) - prompts
Reset (\x1b[0m) - back to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to ParaThe: finite-difference solver for 1-D parabolic equations\n
    u_t = a·u_xx + b·u_x + c·u + f(x, t) with Robin boundary conditions \n \x1b[0m"
    );
    println!("\x1b[33m1. Parabolic PDE problems\x1b[0m");
    println!("\x1b[33m2. Run all examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
}
