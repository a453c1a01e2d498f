use crate::processing::cv_parser::CvProfile;
use crate::processing::ranking::Score;
use crate::utils::error::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io::Write;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// A screened candidate as shown on the recruiter dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub candidate_id: String,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub job_position: String,
    pub ranking_score: f64,
    pub skills_matched: String,
    pub experience_years: u32,
    pub education: String,
    pub skills: Vec<String>,
    pub source_file: String,
    pub status: String,
    pub upload_date: String,
}

/// Flat row for CSV, where nested lists are not allowed.
#[derive(Serialize)]
struct CsvRow<'a> {
    candidate_id: &'a str,
    candidate_name: &'a str,
    email: &'a str,
    phone: &'a str,
    job_position: &'a str,
    ranking_score: f64,
    skills_matched: &'a str,
    experience_years: u32,
    education: &'a str,
    skills: String,
    source_file: &'a str,
    status: &'a str,
    upload_date: &'a str,
}

impl CandidateRecord {
    pub fn new(
        profile: CvProfile,
        score: Score,
        job_position: &str,
        source_file: &str,
        processed_at: DateTime<Local>,
    ) -> Self {
        Self {
            candidate_id: format!("{}_{}", profile.name, processed_at.timestamp_millis()),
            candidate_name: profile.name,
            email: profile.email.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            phone: profile.phone.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            job_position: job_position.to_string(),
            ranking_score: score.value,
            skills_matched: score.skills_matched,
            experience_years: profile.experience_years,
            education: profile.education,
            skills: profile.skills,
            source_file: source_file.to_string(),
            status: "processed".to_string(),
            upload_date: processed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    fn csv_row(&self) -> CsvRow<'_> {
        CsvRow {
            candidate_id: &self.candidate_id,
            candidate_name: &self.candidate_name,
            email: &self.email,
            phone: &self.phone,
            job_position: &self.job_position,
            ranking_score: self.ranking_score,
            skills_matched: &self.skills_matched,
            experience_years: self.experience_years,
            education: &self.education,
            skills: self.skills.join(";"),
            source_file: &self.source_file,
            status: &self.status,
            upload_date: &self.upload_date,
        }
    }
}

/// Best score first; ties keep their input order.
pub fn rank_candidates(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| b.ranking_score.total_cmp(&a.ranking_score));
}

pub fn write_report<W: Write>(
    records: &[CandidateRecord],
    format: ReportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ReportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(record.csv_row())?;
            }
            csv_writer.flush()?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(writer, records)?;
        }
    }
    Ok(())
}
