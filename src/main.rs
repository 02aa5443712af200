//! post-media-dl - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use post_media_dl::{
    api::PostClient,
    cli::Args,
    config::{validate_config, validate_post_url, Config},
    download::{download_post, fetch_media_urls, plan_downloads, ConnectionPool},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_batch_stats, print_config_summary, print_error, print_info,
        print_planned_downloads, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
                Error::Fetch { .. } => exit_codes::FETCH_ERROR,
                ref e if e.is_extraction_error() => exit_codes::EXTRACT_ERROR,
                Error::NoMedia(_) => exit_codes::NO_MEDIA,
                _ => exit_codes::UNEXPECTED_ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    if !args.quiet {
        print_banner();
    }

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        if !args.quiet {
            print_warning(&format!(
                "Configuration file not found: {}",
                args.config.display()
            ));
            print_info("Using default configuration with CLI arguments");
        }
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate inputs
    validate_config(&config)?;
    let post_url = validate_post_url(&args.url)?;
    let save_dir = config.download_directory()?.to_path_buf();

    if !args.quiet {
        print_config_summary(
            post_url.as_str(),
            &save_dir.display().to_string(),
            config.http.max_connections_per_scheme,
        );
    }

    let client = PostClient::new(&config.http)?;

    if args.dry_run {
        let urls = fetch_media_urls(&client, post_url.as_str()).await?;
        let (tasks, rejected) = plan_downloads(&urls, &save_dir);
        print_planned_downloads(&tasks);
        for failure in &rejected {
            print_warning(&format!("Cannot download {}: {}", failure.url, failure.reason));
        }
        return Ok(());
    }

    let pool = ConnectionPool::new(config.http.max_connections_per_scheme);
    let report = download_post(&client, &pool, &config, post_url.as_str()).await?;

    print_batch_stats(&report);

    if report.has_failures() {
        print_warning(&format!(
            "{} of {} downloads failed",
            report.failed_count(),
            report.total()
        ));
    } else {
        print_success(&format!("Downloaded {} file(s)", report.downloaded_count()));
    }

    Ok(())
}
