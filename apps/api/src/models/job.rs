use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Incoming job posting. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    #[default]
    Mid,
    Senior,
    Staff,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Staff => "staff",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(Seniority::Junior),
            "mid" => Ok(Seniority::Mid),
            "senior" => Ok(Seniority::Senior),
            "staff" => Ok(Seniority::Staff),
            other => Err(format!("unknown seniority '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Remote,
    Hybrid,
    Onsite,
    #[default]
    Unknown,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Remote => "remote",
            LocationType::Hybrid => "hybrid",
            LocationType::Onsite => "onsite",
            LocationType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(LocationType::Remote),
            "hybrid" => Ok(LocationType::Hybrid),
            "onsite" => Ok(LocationType::Onsite),
            "unknown" => Ok(LocationType::Unknown),
            other => Err(format!("unknown location type '{other}'")),
        }
    }
}

/// Hard-requirement checks surfaced next to the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MustHaveFlags {
    pub core_stack_match: bool,
    pub location_match: bool,
    pub seniority_match: bool,
}

/// A scored posting as stored in the `jobs` table.
///
/// `tech_stack` is comma-separated, `suggested_resume_bullets` is a JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub fit_score: i64,
    pub seniority: String,
    pub match_summary: String,
    pub tech_stack: String,
    pub location_type: String,
    pub requires_relocation: bool,
    pub core_stack_match: bool,
    pub location_match: bool,
    pub seniority_match: bool,
    pub suggested_resume_bullets: String,
    pub why_me_paragraph: String,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub fn tech_stack_list(&self) -> Vec<String> {
        split_tech_stack(&self.tech_stack)
    }
}

pub fn join_tech_stack(stack: &[String]) -> String {
    stack.join(",")
}

pub fn split_tech_stack(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// API representation of a scored job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOut {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,

    pub fit_score: u32,
    pub seniority: Seniority,
    pub match_summary: String,
    pub reasons_for_score: Vec<String>,
    pub tech_stack: Vec<String>,
    pub location_type: LocationType,
    pub requires_relocation: bool,

    pub must_have_flags: MustHaveFlags,
    pub suggested_resume_bullets: Vec<String>,
    pub why_me_paragraph: String,
}

impl JobOut {
    /// Builds the list-view representation of a stored row.
    /// Reasons and resume bullets are left empty; list responses carry only the summary.
    pub fn summary_from_row(row: JobRow) -> Self {
        let tech_stack = row.tech_stack_list();
        let seniority = row.seniority.parse().unwrap_or_else(|e| {
            tracing::warn!("Job {}: {e}, defaulting to mid", row.id);
            Seniority::default()
        });
        let location_type = row.location_type.parse().unwrap_or_else(|e| {
            tracing::warn!("Job {}: {e}, defaulting to unknown", row.id);
            LocationType::default()
        });

        JobOut {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description,
            fit_score: row.fit_score.clamp(0, 100) as u32,
            seniority,
            match_summary: row.match_summary,
            reasons_for_score: vec![],
            tech_stack,
            location_type,
            requires_relocation: row.requires_relocation,
            must_have_flags: MustHaveFlags {
                core_stack_match: row.core_stack_match,
                location_match: row.location_match,
                seniority_match: row.seniority_match,
            },
            suggested_resume_bullets: vec![],
            why_me_paragraph: row.why_me_paragraph,
        }
    }
}
