//! Stowaway - command-line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse flags with clap
//! 2. Start from a saved profile (`--profile`) or the defaults
//! 3. Overlay the flags that were passed
//! 4. Initialize logging (stderr, plus rotating files with `--log-dir`)
//! 5. Optionally save the raw options (`--save-profile`)
//! 6. Normalize and validate
//! 7. Print the accepted configuration, or the problem(s) and exit with status 2

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use stowaway::cli::Cli;
use stowaway::services::{self, ConfigurationError};
use stowaway::{APP_NAME, ProfileManager, VERSION, ValidatedOptions};

/// Exit status for rejected options
const EXIT_INVALID_OPTIONS: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let profiles = cli
        .uses_profiles()
        .then(|| ProfileManager::new(cli.profile_dir()));

    // The profile is read before logging starts so its `verbose` setting counts
    let mut options = match (&profiles, &cli.profile) {
        (Some(manager), Some(name)) => manager.load_profile(name)?,
        _ => Default::default(),
    };
    cli.apply(&mut options);

    let _guard =
        stowaway::logging::setup_logging(cli.log_dir.as_deref(), APP_NAME, options.verbose)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    if let Some(name) = &cli.profile {
        tracing::info!("Using profile '{}'", name);
    }

    if let (Some(manager), Some(name)) = (&profiles, &cli.save_profile) {
        manager.save_profile(name, &options)?;
        println!("Saved profile '{}'", name);
    }

    let result = if cli.all_errors {
        services::prepare_all(options)
    } else {
        services::prepare(options).map_err(|e| vec![e])
    };

    match result {
        Ok(validated) => {
            print_summary(&validated)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(violations) => {
            report(&violations);
            Ok(ExitCode::from(EXIT_INVALID_OPTIONS))
        }
    }
}

fn report(violations: &[ConfigurationError]) {
    for violation in violations {
        eprintln!("Invalid options: {}", violation);
    }
}

fn join(values: &indexmap::IndexSet<String>) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn print_summary(options: &ValidatedOptions) -> Result<()> {
    println!("Source:          {}", options.source_path()?);
    println!("Target:          {}", options.target_path());
    println!("Backup folder:   {}", options.backup_folder_name()?);
    println!("Preset:          {}", options.preset);
    println!("Inclusions:      {}", join(&options.file_inclusions));
    println!("Exclusions:      {}", join(&options.file_exclusions));
    println!("Excluded dirs:   {}", join(&options.dir_exclusions));
    println!("Max file size:   {} bytes", options.max_size);
    println!(
        "Threads:         {}{}",
        options.effective_threads(),
        if options.multithread { " (multithreaded)" } else { "" }
    );
    println!("Beep:            {}", options.beep);
    Ok(())
}
