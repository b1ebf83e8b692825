//! # Round-Robin Simulation Host
//!
//! Main entry point: runs a workload and prints the report as JSON.

use rrsimd::{SimRuntime, SimRuntimeConfig};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = program_name(&args);

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let default_filter = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut runtime = SimRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    let report = runtime.run();
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            process::exit(1);
        }
    }
}

/// argv[0], or the crate name when the OS passes an empty argv
fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("rrsimd")
}

fn parse_args(args: &[String]) -> Result<SimRuntimeConfig, String> {
    let mut config = SimRuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--workload" | "-w" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --workload".to_string());
                }
                config.workload = Some(PathBuf::from(&args[i]));
            }
            "--quantum" | "-q" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --quantum".to_string());
                }
                let quantum: u64 = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid quantum value: {}", args[i]))?;
                if quantum == 0 {
                    return Err("Quantum must be positive".to_string());
                }
                config.quantum = Some(quantum);
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                config.max_steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?;
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                print_usage(program_name(args));
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -w, --workload <FILE>    JSON workload (default: built-in sample)");
    eprintln!("  -q, --quantum <N>        Quantum override");
    eprintln!("  --max-steps <N>          Maximum steps to run (0 = unlimited)");
    eprintln!("  -v, --verbose            Debug logging and per-event log in the report");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --workload demos/two_equal.json", program);
    eprintln!("  {} --quantum 50 --max-steps 1000", program);
}
