use clap::Parser;
use env_logger::Env;
use log::debug;

mod args;
mod topsis;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
    debug!("args: {:?}", args);

    match topsis::run_ranking(&args) {
        Ok(()) => println!("Result saved to {}", args.output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
