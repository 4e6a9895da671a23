use clap::Parser;
use std::process;
use tidal_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    match commands::run(&args) {
        Ok(report) => {
            if !args.quiet {
                commands::print_report(&report);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
