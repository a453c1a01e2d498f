use crate::processing::cv_parser::CvProfile;
use serde::Serialize;

pub const GENERAL_POSITION: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobRequirements {
    pub position: &'static str,
    pub skills: &'static [&'static str],
    pub min_experience: u32,
    pub education_weight: f64,
}

const REQUIREMENTS: &[JobRequirements] = &[
    JobRequirements {
        position: "Software Engineer",
        skills: &["python", "java", "javascript", "git", "sql"],
        min_experience: 2,
        education_weight: 0.2,
    },
    JobRequirements {
        position: "Cloud Engineer",
        skills: &["aws", "docker", "kubernetes", "terraform", "devops"],
        min_experience: 3,
        education_weight: 0.15,
    },
    JobRequirements {
        position: "Data Scientist",
        skills: &["python", "machine learning", "sql", "ai"],
        min_experience: 2,
        education_weight: 0.25,
    },
    JobRequirements {
        position: "DevOps Engineer",
        skills: &["docker", "kubernetes", "ci/cd", "aws", "git"],
        min_experience: 3,
        education_weight: 0.15,
    },
];

const GENERAL: JobRequirements = JobRequirements {
    position: GENERAL_POSITION,
    skills: &["python", "java", "javascript"],
    min_experience: 1,
    education_weight: 0.2,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    /// 0–100, two decimals.
    pub value: f64,
    /// `"matched/required"`, e.g. `"3/5"`.
    pub skills_matched: String,
}

/// Scores a parsed CV against the requirements of a job position.
///
/// Skills weigh 0.5; experience and education share the other half, with the
/// education part set per position.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Unknown positions are scored as `General`.
    pub fn requirements(&self, job_position: &str) -> &'static JobRequirements {
        REQUIREMENTS
            .iter()
            .find(|r| r.position == job_position)
            .unwrap_or(&GENERAL)
    }

    pub fn score(&self, profile: &CvProfile, job_position: &str) -> Score {
        let requirements = self.requirements(job_position);
        if requirements.position != job_position {
            tracing::debug!(job_position, "unknown position, scoring as {}", GENERAL_POSITION);
        }

        let skills = self.skills_score(&profile.skills, requirements.skills);
        let experience =
            self.experience_score(profile.experience_years, requirements.min_experience);
        let education = self.education_score(&profile.education);
        let education_weight = requirements.education_weight;

        let total = (skills * 0.5
            + experience * (0.5 - education_weight)
            + education * education_weight)
            * 100.0;

        let matched = profile
            .skills
            .iter()
            .filter(|skill| {
                requirements
                    .skills
                    .iter()
                    .any(|required| required.eq_ignore_ascii_case(skill))
            })
            .count();

        Score {
            value: (total * 100.0).round() / 100.0,
            skills_matched: format!("{}/{}", matched, requirements.skills.len()),
        }
    }

    /// Share of required skills the candidate has, 0–1.
    pub fn skills_score<S: AsRef<str>>(&self, candidate: &[S], required: &[&str]) -> f64 {
        if required.is_empty() {
            return 1.0;
        }

        let matched = required
            .iter()
            .filter(|req| candidate.iter().any(|c| c.as_ref().eq_ignore_ascii_case(req)))
            .count();

        matched as f64 / required.len() as f64
    }

    pub fn experience_score(&self, years: u32, min_required: u32) -> f64 {
        if years >= min_required + 3 {
            1.0
        } else if years >= min_required {
            0.7 + f64::from(years - min_required) * 0.1
        } else if years + 1 >= min_required {
            0.5
        } else {
            (f64::from(years) * 0.1).max(0.2)
        }
    }

    pub fn education_score(&self, education: &str) -> f64 {
        match education {
            "PhD" => 1.0,
            "MBA" => 0.95,
            "Master's Degree" => 0.9,
            "Bachelor's Degree" => 0.7,
            "Diploma" => 0.5,
            _ => 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(skills: &[&str], experience_years: u32, education: &str) -> CvProfile {
        CvProfile {
            name: "Test Candidate".to_string(),
            email: None,
            phone: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_years,
            education: education.to_string(),
            raw_text: String::new(),
        }
    }

    #[test]
    fn perfect_software_engineer() {
        let cv = profile(&["Python", "Java", "JavaScript", "Git", "SQL"], 5, "Master's Degree");
        let score = RankingEngine::new().score(&cv, "Software Engineer");

        assert_eq!(score.value, 98.0);
        assert_eq!(score.skills_matched, "5/5");
    }

    #[test]
    fn partial_match_lands_mid_range() {
        let cv = profile(&["Python", "Git"], 2, "Bachelor's Degree");
        let score = RankingEngine::new().score(&cv, "Software Engineer");

        assert_eq!(score.value, 55.0);
        assert_eq!(score.skills_matched, "2/5");
    }

    #[test]
    fn no_experience_lowers_score() {
        let cv = profile(&["Python", "JavaScript", "Git"], 0, "Bachelor's Degree");
        let score = RankingEngine::new().score(&cv, "Software Engineer");

        assert!(score.value < 60.0);
        assert_eq!(score.skills_matched, "3/5");
    }

    #[test]
    fn cloud_engineer_and_data_scientist() {
        let engine = RankingEngine::new();

        let cloud = profile(&["AWS", "Docker", "Kubernetes", "Terraform", "DevOps"], 4, "Master's Degree");
        let score = engine.score(&cloud, "Cloud Engineer");
        assert_eq!(score.value, 91.5);
        assert_eq!(score.skills_matched, "5/5");

        let data = profile(&["Python", "Machine Learning", "SQL", "AI"], 3, "PhD");
        let score = engine.score(&data, "Data Scientist");
        assert_eq!(score.value, 95.0);
        assert_eq!(score.skills_matched, "4/4");
    }

    #[test]
    fn unknown_position_uses_general() {
        let engine = RankingEngine::new();
        assert_eq!(engine.requirements("Astronaut").position, GENERAL_POSITION);

        let cv = profile(&["Python", "Java"], 2, "Bachelor's Degree");
        let score = engine.score(&cv, "Astronaut");
        assert_eq!(score.skills_matched, "2/3");
        assert!(score.value > 0.0);
    }

    #[test]
    fn skills_score_is_case_insensitive() {
        let engine = RankingEngine::new();
        assert_eq!(engine.skills_score(&["python", "AWS", "Docker"], &["Python", "aws", "docker"]), 1.0);
        assert_eq!(
            engine.skills_score(&["Python", "AWS", "Docker"], &["python", "java", "aws", "docker", "sql"]),
            0.6
        );
        assert_eq!(engine.skills_score::<&str>(&[], &[]), 1.0);
    }

    #[test]
    fn experience_score_bands() {
        let engine = RankingEngine::new();
        assert_eq!(engine.experience_score(5, 2), 1.0);
        assert_eq!(engine.experience_score(3, 3), 0.7);
        assert_eq!(engine.experience_score(2, 3), 0.5);
        assert_eq!(engine.experience_score(1, 3), 0.2);
        assert_eq!(engine.experience_score(0, 0), 0.7);
    }

    #[test]
    fn education_score_table() {
        let engine = RankingEngine::new();
        assert_eq!(engine.education_score("PhD"), 1.0);
        assert_eq!(engine.education_score("Master's Degree"), 0.9);
        assert_eq!(engine.education_score("Bachelor's Degree"), 0.7);
        assert_eq!(engine.education_score("Not specified"), 0.3);
        assert_eq!(engine.education_score("Clown College"), 0.3);
    }
}
