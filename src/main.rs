use clap::Parser;

use hitung::cli::{self, Cli};

fn main() {
    cli::init_tracing();
    let cli = Cli::parse();
    if let Err(error) = cli::run(cli) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
