use ParaThe::Utils::logging::init_logger;
use ParaThe::cli::cli_main::run_with_args;

pub fn main() {
    let log_file = std::env::var("PARATHE_LOG_FILE").ok();
    init_logger(None, log_file.as_deref());
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_with_args(&args);
}
