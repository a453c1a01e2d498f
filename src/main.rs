use clap::Parser;
use cv_uploader::domain::model::{BannerKind, FieldValue, FilePart, SubmitOutcome};
use cv_uploader::processing::candidate::write_report;
use cv_uploader::utils::error::{ErrorSeverity, Result, UploaderError};
use cv_uploader::utils::{logger, validation::Validate};
use cv_uploader::{CliConfig, Command, FormData, HttpUploader, PageState, Screener, UploadController};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cv-uploader");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ cv-uploader failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // Network trouble is often transient, so it gets its own code
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<i32> {
    match &cli.command {
        Command::Upload { file, job_position } => upload(cli, file, job_position).await,
        Command::Rank {
            files,
            job_position,
            format,
            output,
        } => {
            let screener = Screener::default();
            let records = screener.screen_files(files, job_position).await?;
            tracing::info!("📊 Ranked {} candidates for {}", records.len(), job_position);

            match output {
                Some(path) => {
                    let file = std::fs::File::create(path)?;
                    write_report(&records, *format, file)?;
                    println!("📁 Report saved to: {}", path);
                }
                None => write_report(&records, *format, std::io::stdout().lock())?,
            }
            Ok(0)
        }
        Command::Health => {
            let config = cli.resolve()?;
            let uploader = HttpUploader::from_config(&config.server);
            let health = uploader.health().await?;
            println!(
                "✅ {} is {}",
                health.service.as_deref().unwrap_or(&config.server.base_url),
                health.status
            );
            Ok(0)
        }
    }
}

async fn upload(cli: &CliConfig, file: &str, job_position: &str) -> Result<i32> {
    let config = cli.resolve()?;
    let settings = config.settings();

    let bytes = tokio::fs::read(file).await?;
    // Only the base name goes on the wire as the part's file name
    let file_name = Path::new(file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    // Empty defaults: resetting after success clears both fields
    let page = Arc::new(PageState::new(FormData::new(), &settings.idle_label));
    page.fill(
        &config.server.file_field,
        FieldValue::File(FilePart {
            file_name,
            content_type: None,
            bytes,
        }),
    );
    page.fill_text(&config.server.position_field, job_position);

    let uploader = HttpUploader::from_config(&config.server);
    tracing::info!("📤 Uploading {} to {}", file, uploader.upload_url());

    // Same path as a browser click: bind, click, wait for the handler
    let controller = Arc::new(UploadController::new(uploader, Arc::clone(&page), settings));
    let mut subscription = controller.attach(page.subscribe_submit());

    if !page.click_submit() {
        return Err(UploaderError::ConfigError {
            message: "upload form is not accepting submissions".to_string(),
        });
    }

    let outcome = subscription
        .next_outcome()
        .await
        .ok_or_else(|| UploaderError::ConfigError {
            message: "upload controller stopped before answering".to_string(),
        })?;
    // Exit before the scheduled reload; a one-shot run has nothing to reload
    subscription.detach();

    // Banners are still on the page here, newest first
    for banner in page.banners() {
        match banner.kind {
            BannerKind::Success => println!("✅ {}", banner.message),
            BannerKind::Error => eprintln!("❌ {}", banner.message),
        }
    }

    Ok(match outcome {
        SubmitOutcome::Uploaded { .. } => 0,
        SubmitOutcome::Rejected { .. } => 1,
        SubmitOutcome::NetworkFailure { .. } => 2,
    })
}
