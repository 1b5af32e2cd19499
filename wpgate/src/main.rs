use clap::Parser;
use wpgate_core::cli::{self, Cli};
use wpgate_core::logging::{default_log_mode, init_logging};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log.unwrap_or_else(default_log_mode));

    if let Err(e) = cli::run(cli) {
        eprintln!("wpgate error: {e:#}");
        std::process::exit(1);
    }
}
