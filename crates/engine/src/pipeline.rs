use analytics::AnalysisEngine;
use configuration::Settings;
use core_types::PartialInput;
use events::Evaluation;
use validator::{InputValidator, RawInput, ValidationReport};

/// Validation followed by analysis, the full path from form to result.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    validator: InputValidator,
    engine: AnalysisEngine,
}

impl Pipeline {
    pub fn new(validator: InputValidator, engine: AnalysisEngine) -> Self {
        Self { validator, engine }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            InputValidator::from_settings(settings),
            AnalysisEngine::from_settings(settings),
        )
    }

    pub fn validator(&self) -> &InputValidator {
        &self.validator
    }

    /// Evaluates a structured input.
    pub fn evaluate(&self, input: &PartialInput) -> Evaluation {
        let report = self.validator.validate(input);
        self.finish(report, input)
    }

    /// Parses, validates and evaluates a raw form.
    pub fn evaluate_raw(&self, raw: &RawInput) -> Evaluation {
        let (report, partial) = self.validator.validate_raw(raw);
        self.finish(report, &partial)
    }

    fn finish(&self, report: ValidationReport, partial: &PartialInput) -> Evaluation {
        let ValidationReport {
            is_valid,
            errors,
            warnings,
        } = report;

        if !is_valid {
            return Evaluation::Rejected { errors, warnings };
        }

        let input = match partial.complete() {
            Ok(input) => input,
            Err(e) => {
                return Evaluation::Failed {
                    message: e.to_string(),
                    warnings,
                };
            }
        };

        match self.engine.analyze(&input) {
            Ok(analysis) => Evaluation::Completed {
                analysis: Box::new(analysis),
                warnings,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Validated input was refused by the calculator.");
                Evaluation::Failed {
                    message: e.to_string(),
                    warnings,
                }
            }
        }
    }
}
