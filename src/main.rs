// NetIdent - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # NetIdent
//!
//! AP/client network identity manager for single-radio embedded Linux
//! hosts.
//!
//! This is the thin command-line entry point; the validation and
//! reconciliation logic lives in `models` and `services`.

use std::env;
use std::process::ExitCode;

mod commands;
mod models;
mod network_utils;
mod nm_client;
mod services;
mod storage;

/// Human-readable application name.
pub const APP_NAME: &str = "NetIdent";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
    println!();
    println!("AP/client network identity manager for single-radio embedded Linux hosts.");
}

/// Print help information and exit.
fn print_help() {
    let program = env::args().next().unwrap_or_else(|| "netident".to_string());
    println!("Usage: {} [OPTIONS] COMMAND [ARGS]", program);
    println!();
    println!("AP/client network identity manager for single-radio embedded Linux hosts.");
    println!();
    println!("Commands:");
    println!("  status                                Show adapters, active subnets, connection");
    println!("  scan                                  List visible networks by signal strength");
    println!("  validate-ap CIDR GATEWAY              Validate a candidate AP subnet and gateway");
    println!("  set-ap SSID PASSPHRASE CIDR GATEWAY   Validate and persist an AP configuration");
    println!("  join SSID [PASSPHRASE]                Connect to a network, reconciling profiles");
    println!("  hostname NAME                         Validate and propagate a new hostname");
    println!("  policy [exact|overlap]                Show or set the subnet conflict policy");
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message and exit");
    println!("  -v, --version    Show version information and exit");
    println!("  -d, --debug      Enable debug logging");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG         Set log level (trace, debug, info, warn, error)");
    println!();
    println!("Report bugs to: https://github.com/christosdaggas/netident/issues");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let mut debug_mode = false;
    let mut positional: Vec<&str> = Vec::new();

    for arg in &args[1..] {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            "-d" | "--debug" => {
                debug_mode = true;
            }
            other => {
                if other.starts_with('-') {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Try '--help' for more information.");
                    return ExitCode::FAILURE;
                }
                positional.push(other);
            }
        }
    }

    let mut settings = storage::load_settings();

    // Initialize logging with appropriate level
    let log_level = if debug_mode {
        tracing::Level::DEBUG
    } else {
        settings
            .log_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level.into()),
        )
        .init();

    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    let code = match positional.as_slice() {
        ["status"] => commands::status(&settings),
        ["scan"] => commands::scan(&settings),
        ["validate-ap", cidr, gateway] => commands::validate_ap(&settings, cidr, gateway),
        ["set-ap", ssid, passphrase, cidr, gateway] => {
            commands::set_ap(&settings, ssid, passphrase, cidr, gateway)
        }
        ["join", ssid] => commands::join(&settings, ssid, None),
        ["join", ssid, passphrase] => commands::join(&settings, ssid, Some(*passphrase)),
        ["hostname", name] => commands::hostname(name),
        ["policy"] => commands::policy(&mut settings, None),
        ["policy", value] => commands::policy(&mut settings, Some(*value)),
        [] => {
            print_help();
            return ExitCode::FAILURE;
        }
        other => {
            eprintln!("Unknown or incomplete command: {}", other.join(" "));
            eprintln!("Try '--help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
