//! Heuristic CV parsing.
//!
//! Skills are matched as whole words and reported under a fixed display name
//! ("AWS", "CI/CD"), so "java" is not counted inside "javascript". A CV that
//! mentions only JavaScript therefore scores fewer `skills_matched` than a
//! plain substring search would give.

use super::document;
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Skill keywords matched in CV text, with the spelling used in reports.
pub const SKILL_KEYWORDS: &[(&str, &str)] = &[
    ("python", "Python"),
    ("java", "Java"),
    ("javascript", "JavaScript"),
    ("react", "React"),
    ("node.js", "Node.js"),
    ("aws", "AWS"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("sql", "SQL"),
    ("mongodb", "MongoDB"),
    ("machine learning", "Machine Learning"),
    ("ai", "AI"),
    ("git", "Git"),
    ("agile", "Agile"),
    ("scrum", "Scrum"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("typescript", "TypeScript"),
    ("go", "Go"),
    ("rust", "Rust"),
    ("cloud", "Cloud"),
    ("devops", "DevOps"),
    ("ci/cd", "CI/CD"),
    ("terraform", "Terraform"),
    ("ansible", "Ansible"),
];

/// Checked in order; the first keyword found wins.
const EDUCATION_LEVELS: &[(&str, &str)] = &[
    ("phd", "PhD"),
    ("doctorate", "PhD"),
    ("master", "Master's Degree"),
    ("msc", "Master's Degree"),
    ("mba", "MBA"),
    ("bachelor", "Bachelor's Degree"),
    ("bsc", "Bachelor's Degree"),
    ("diploma", "Diploma"),
];

pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";
pub const EDUCATION_NOT_SPECIFIED: &str = "Not specified";
const MAX_EXPERIENCE_YEARS: u32 = 40;
const NAME_SCAN_LINES: usize = 5;
const NAME_MAX_WORDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub education: String,
    #[serde(skip)]
    pub raw_text: String,
}

/// Heuristic extractor for the contact details, skills and history in a CV.
///
/// PDF and DOCX files have their text extracted first. Any other file,
/// legacy `.doc` included, is read as lossy UTF-8.
pub struct CvParser {
    email: Regex,
    phone: Regex,
    year_range: Regex,
    skills: Vec<(Regex, &'static str)>,
    reference_year: i32,
}

impl CvParser {
    pub fn new() -> Self {
        Self::with_reference_year(chrono::Local::now().year())
    }

    /// `reference_year` closes open ranges such as `2020 - present`.
    pub fn with_reference_year(reference_year: i32) -> Self {
        let skills = SKILL_KEYWORDS
            .iter()
            .map(|(keyword, display)| {
                let pattern = format!(r"(?i)(?:^|[^a-z0-9]){}(?:$|[^a-z0-9])", regex::escape(keyword));
                (Regex::new(&pattern).expect("skill pattern is valid"), *display)
            })
            .collect();

        Self {
            email: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("email pattern is valid"),
            phone: Regex::new(r"[+(]?[1-9][0-9 .\-()]{8,}[0-9]").expect("phone pattern is valid"),
            year_range: Regex::new(
                r"(?P<start>(?:19|20)\d{2})\s*[-–]\s*(?P<end>present|current|(?:19|20)\d{2})",
            )
            .expect("year range pattern is valid"),
            skills,
            reference_year,
        }
    }

    /// An unreadable document parses as an empty CV rather than failing the batch.
    pub fn parse(&self, content: &[u8], file_name: &str) -> CvProfile {
        let text = document::extract_text(content, file_name).unwrap_or_else(|e| {
            tracing::warn!(file = file_name, error = %e, "could not extract CV text");
            String::new()
        });
        tracing::debug!(file = file_name, chars = text.len(), "parsing CV text");
        self.parse_text(text)
    }

    pub fn parse_text(&self, text: String) -> CvProfile {
        CvProfile {
            name: self.extract_name(&text),
            email: self.extract_email(&text),
            phone: self.extract_phone(&text),
            skills: self.extract_skills(&text),
            experience_years: self.extract_experience_years(&text),
            education: self.extract_education(&text),
            raw_text: text,
        }
    }

    /// First short, capitalised line near the top of the document.
    pub fn extract_name(&self, text: &str) -> String {
        text.trim()
            .lines()
            .take(NAME_SCAN_LINES)
            .map(str::trim)
            .find(|line| {
                !line.is_empty()
                    && line.split_whitespace().count() <= NAME_MAX_WORDS
                    && line.chars().next().is_some_and(char::is_uppercase)
            })
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string())
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone.find(text).map(|m| m.as_str().trim().to_string())
    }

    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skills
            .iter()
            .filter(|(pattern, _)| pattern.is_match(text))
            .map(|(_, display)| display.to_string())
            .collect()
    }

    /// Sums every `YYYY - YYYY` or `YYYY - present` range found, capped at 40.
    pub fn extract_experience_years(&self, text: &str) -> u32 {
        let lower = text.to_lowercase();
        let total: i64 = self
            .year_range
            .captures_iter(&lower)
            .filter_map(|caps| {
                let start: i32 = caps["start"].parse().ok()?;
                let end = match &caps["end"] {
                    "present" | "current" => self.reference_year,
                    year => year.parse().ok()?,
                };
                Some(i64::from((end - start).max(0)))
            })
            .sum();

        total.min(i64::from(MAX_EXPERIENCE_YEARS)) as u32
    }

    pub fn extract_education(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        EDUCATION_LEVELS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, level)| level.to_string())
            .unwrap_or_else(|| EDUCATION_NOT_SPECIFIED.to_string())
    }
}

impl Default for CvParser {
    fn default() -> Self {
        Self::new()
    }
}
