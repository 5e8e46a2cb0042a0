use analytics::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationIssue;

use crate::error::EventsError;

/// The result of running one request through validation and analysis.
///
/// The `#[serde(tag = "status")]` attribute serializes the variant name next to
/// its fields, e.g. `{ "status": "Rejected", "errors": [...], "warnings": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Evaluation {
    /// Validation passed and the analysis completed.
    Completed {
        analysis: Box<AnalysisResult>,
        warnings: Vec<String>,
    },
    /// Validation failed; no calculation was attempted.
    Rejected {
        errors: Vec<ValidationIssue>,
        warnings: Vec<String>,
    },
    /// Validation passed but the calculation still refused the input.
    Failed {
        message: String,
        warnings: Vec<String>,
    },
}

impl Evaluation {
    pub fn is_completed(&self) -> bool {
        matches!(self, Evaluation::Completed { .. })
    }

    /// Advisory warnings, present whatever the outcome.
    pub fn warnings(&self) -> &[String] {
        match self {
            Evaluation::Completed { warnings, .. }
            | Evaluation::Rejected { warnings, .. }
            | Evaluation::Failed { warnings, .. } => warnings,
        }
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match self {
            Evaluation::Completed { analysis, .. } => Some(analysis),
            _ => None,
        }
    }
}

/// An evaluation tagged with the request it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Sequence number of the request, increasing with every submission.
    pub sequence: u64,
    pub evaluated_at: DateTime<Utc>,
    pub evaluation: Evaluation,
}

impl Outcome {
    pub fn new(sequence: u64, evaluation: Evaluation) -> Self {
        Self {
            sequence,
            evaluated_at: Utc::now(),
            evaluation,
        }
    }

    pub fn to_json(&self) -> Result<String, EventsError> {
        Ok(serde_json::to_string(self)?)
    }
}
