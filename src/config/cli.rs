use crate::config::toml_config::UploaderConfig;
use crate::processing::candidate::ReportFormat;
use crate::processing::ranking::GENERAL_POSITION;
use crate::utils::error::{Result, UploaderError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cv-uploader")]
#[command(about = "Upload CVs to the screening service and rank candidates locally")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Base URL of the screening service")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit a CV through the upload form
    Upload {
        #[arg(long)]
        file: String,

        #[arg(long, default_value = GENERAL_POSITION)]
        job_position: String,
    },
    /// Parse and score CV files locally, best candidate first
    Rank {
        #[arg(required = true)]
        files: Vec<String>,

        #[arg(long, default_value = GENERAL_POSITION)]
        job_position: String,

        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        #[arg(long, help = "Write the report here instead of stdout")]
        output: Option<String>,
    },
    /// Check that the screening service is up
    Health,
}

impl CliConfig {
    /// Config file (or defaults) with command line overrides applied.
    pub fn resolve(&self) -> Result<UploaderConfig> {
        let mut config = match &self.config {
            Some(path) => UploaderConfig::from_file(path)?,
            None => UploaderConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.server.base_url = endpoint.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }

        match &self.command {
            Command::Upload { file, job_position } => {
                validate_path("file", file)?;
                validate_non_empty_string("job_position", job_position)?;
            }
            Command::Rank {
                files,
                job_position,
                output,
                ..
            } => {
                if files.is_empty() {
                    return Err(UploaderError::MissingConfigError {
                        field: "files".to_string(),
                    });
                }
                for file in files {
                    validate_path("files", file)?;
                }
                validate_non_empty_string("job_position", job_position)?;
                if let Some(output) = output {
                    validate_path("output", output)?;
                }
            }
            Command::Health => {}
        }
        Ok(())
    }
}
