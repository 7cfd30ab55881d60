use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scandoc::cli::CliArgs;
use scandoc::config::{self, merged::MergedConfig};
use scandoc::pipeline::job_runner::{JobOutcome, run_job};

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load settings from the working directory, if present.
    let settings = match config::load_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: Failed to load {}: {e}", config::SETTINGS_FILE);
            return ExitCode::FAILURE;
        }
    };

    // Resolve the requested preset against the settings file.
    let preset = match &cli.preset {
        Some(name) => match settings.presets.get(name) {
            Some(p) => Some(p),
            None => {
                eprintln!(
                    "ERROR: Unknown preset '{name}' (not defined in {})",
                    config::SETTINGS_FILE
                );
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    // Merge settings, preset, and flags into the job configuration.
    // Invalid paper sizes and resolutions are rejected here, before any
    // external tool runs.
    let merged = match MergedConfig::new(&settings, preset, &cli) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_job(&merged) {
        Ok(JobOutcome::Completed { output, bytes }) => {
            eprintln!("OK: {} ({bytes} bytes)", output.display());
            ExitCode::SUCCESS
        }
        Ok(JobOutcome::Benchmark { entries }) => {
            if merged.json {
                match serde_json::to_string_pretty(&entries) {
                    Ok(report) => println!("{report}"),
                    Err(e) => {
                        eprintln!("ERROR: Failed to serialize benchmark report: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("profile    bytes");
                for entry in &entries {
                    println!("{:<10} {}", entry.profile, entry.bytes);
                }
            }
            ExitCode::SUCCESS
        }
        Ok(JobOutcome::DryRun) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
