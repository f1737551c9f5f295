use clap::Parser;
use tick::cli::commands::Cli;
use tick::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let result = handlers::dispatch(cli);
    if let Err(e) = &result {
        log::error!("fatal: {}", e);
    }
    log::logger().flush();

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
