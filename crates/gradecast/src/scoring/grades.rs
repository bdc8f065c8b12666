use serde::{Deserialize, Serialize};

use super::{ScoringError, ScoringResult};

/// Minimum percentage required for a letter grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBreakpoint {
    pub threshold: f64,
    pub letter: String,
}

impl GradeBreakpoint {
    pub fn new(threshold: f64, letter: impl Into<String>) -> Self {
        Self {
            threshold,
            letter: letter.into(),
        }
    }
}

/// Validated breakpoint table: strictly descending and ending at zero, so
/// every score in `[0, 100]` resolves to a letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeScale {
    breakpoints: Vec<GradeBreakpoint>,
}

impl GradeScale {
    pub fn new(breakpoints: Vec<GradeBreakpoint>) -> ScoringResult<Self> {
        let Some(last) = breakpoints.last() else {
            return Err(ScoringError::IncompleteBreakpoints(
                "grade table is empty".to_string(),
            ));
        };
        if last.threshold != 0.0 {
            return Err(ScoringError::IncompleteBreakpoints(format!(
                "lowest threshold is {} but the table must end at 0",
                last.threshold
            )));
        }

        for breakpoint in &breakpoints {
            if !breakpoint.threshold.is_finite()
                || !(0.0..=100.0).contains(&breakpoint.threshold)
            {
                return Err(ScoringError::IncompleteBreakpoints(format!(
                    "threshold {} for grade '{}' is outside [0, 100]",
                    breakpoint.threshold, breakpoint.letter
                )));
            }
            if breakpoint.letter.trim().is_empty() {
                return Err(ScoringError::IncompleteBreakpoints(format!(
                    "threshold {} has a blank letter grade",
                    breakpoint.threshold
                )));
            }
        }

        if let Some(pair) = breakpoints
            .windows(2)
            .find(|pair| pair[0].threshold <= pair[1].threshold)
        {
            return Err(ScoringError::IncompleteBreakpoints(format!(
                "thresholds must be strictly descending ({} '{}' is followed by {} '{}')",
                pair[0].threshold, pair[0].letter, pair[1].threshold, pair[1].letter
            )));
        }

        Ok(Self { breakpoints })
    }

    /// `90 A, 80 B, 70 C, 60 D, 0 F`.
    pub fn standard() -> Self {
        Self {
            breakpoints: vec![
                GradeBreakpoint::new(90.0, "A"),
                GradeBreakpoint::new(80.0, "B"),
                GradeBreakpoint::new(70.0, "C"),
                GradeBreakpoint::new(60.0, "D"),
                GradeBreakpoint::new(0.0, "F"),
            ],
        }
    }

    /// Parses a compact `threshold:letter` list such as `"90:A,80:B,0:F"`.
    pub fn parse(raw: &str) -> ScoringResult<Self> {
        let breakpoints = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (threshold, letter) = entry.split_once(':').ok_or_else(|| {
                    ScoringError::IncompleteBreakpoints(format!(
                        "entry '{entry}' is not in threshold:letter form"
                    ))
                })?;
                let threshold = threshold.trim().parse::<f64>().map_err(|_| {
                    ScoringError::IncompleteBreakpoints(format!(
                        "entry '{entry}' has a non-numeric threshold"
                    ))
                })?;
                Ok(GradeBreakpoint::new(threshold, letter.trim()))
            })
            .collect::<ScoringResult<Vec<_>>>()?;

        Self::new(breakpoints)
    }

    pub fn breakpoints(&self) -> &[GradeBreakpoint] {
        &self.breakpoints
    }

    pub fn grade_for(&self, score: f64) -> ScoringResult<&str> {
        map_to_grade(score, &self.breakpoints)
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns the letter of the first breakpoint whose threshold is `<= score`.
///
/// `breakpoints` must already be sorted descending; use [`GradeScale`] to get
/// that checked once instead of on every call.
pub fn map_to_grade(score: f64, breakpoints: &[GradeBreakpoint]) -> ScoringResult<&str> {
    breakpoints
        .iter()
        .find(|breakpoint| breakpoint.threshold <= score)
        .map(|breakpoint| breakpoint.letter.as_str())
        .ok_or_else(|| {
            ScoringError::IncompleteBreakpoints(format!("no breakpoint covers score {score}"))
        })
}
