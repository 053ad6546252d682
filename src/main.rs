use clap::Parser;
use focusdeck::cli::{self, Args};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("focusdeck=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
