//! # TreePad
//!
//! Command line entry point.

use std::env;
use std::io;
use std::process;
use treepad::{parse_args, run, usage, Invocation};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("treepad");

    let options = match parse_args(&args) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Help) => {
            eprintln!("{}", usage(program));
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", usage(program));
            process::exit(2);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&options, &mut out) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
