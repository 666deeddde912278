//! link-harvester - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Instrument;

use link_harvester::{
    browser::default_launcher,
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    fs::data_directory,
    harvest,
    logging::{init_console_logging, init_logging},
    output::{
        print_banner, print_config_summary, print_error, print_harvest, print_info, print_success,
        print_summary, print_warning, RunSummary,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_)
                | Error::UrlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Fetch(_) => {
                    ExitCode::from(exit_codes::FETCH_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();
    let debug = args.debug;

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let config_found = config_path.exists();
    let mut config = if config_found {
        Config::load(&config_path)?
    } else {
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    // Set up logging
    let log_file = match init_logging(&config.logging, debug) {
        Ok(path) => Some(path),
        Err(e) => {
            init_console_logging(debug);
            print_warning(&format!("Logging to console only: {}", e));
            None
        }
    };

    if !config_found {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
    }

    // Print configuration summary
    let output_dir = config.output_directory();
    print_config_summary(&RunSummary {
        url: config.target_url()?,
        mode: config.fetch.mode.to_string(),
        file_types: &config.target.file_types,
        directory: data_directory(&output_dir, config.target.is_subpage)
            .display()
            .to_string(),
        subpages: config.target.get_subpages,
        log_file: log_file.map(|p| p.display().to_string()),
    });

    let span = tracing::info_span!("harvest", resource = %config.logging.resource_name);
    let launcher = default_launcher(&config.fetch.browser_args);
    let summary = harvest(&config, launcher).instrument(span).await?;

    print_harvest(&summary);
    print_summary(&summary.report);

    if summary.has_failures() {
        return Err(Error::Download(format!(
            "{} of {} file(s) failed",
            summary.report.failed_count,
            summary.report.total()
        )));
    }

    print_success("Harvest complete");
    Ok(())
}
