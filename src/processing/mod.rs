//! Local CV screening: text extraction, scoring and the candidate report.

pub mod candidate;
pub mod cv_parser;
pub mod document;
pub mod ranking;

use crate::utils::error::Result;
use candidate::{rank_candidates, CandidateRecord};
use cv_parser::CvParser;
use ranking::RankingEngine;
use std::path::Path;

#[derive(Default)]
pub struct Screener {
    parser: CvParser,
    engine: RankingEngine,
}

impl Screener {
    pub fn new(parser: CvParser, engine: RankingEngine) -> Self {
        Self { parser, engine }
    }

    pub fn screen(&self, content: &[u8], source_file: &str, job_position: &str) -> CandidateRecord {
        let profile = self.parser.parse(content, source_file);
        let score = self.engine.score(&profile, job_position);
        tracing::info!(
            candidate = %profile.name,
            score = score.value,
            skills_matched = %score.skills_matched,
            "screened {}",
            source_file
        );
        CandidateRecord::new(profile, score, job_position, source_file, chrono::Local::now())
    }

    /// Screens every file and returns the candidates best first.
    pub async fn screen_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        job_position: &str,
    ) -> Result<Vec<CandidateRecord>> {
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let content = tokio::fs::read(path).await?;
            let source = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            records.push(self.screen(&content, &source, job_position));
        }

        rank_candidates(&mut records);
        Ok(records)
    }
}
