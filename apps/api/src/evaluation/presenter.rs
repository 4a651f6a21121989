//! Result Presenter — recovers the match percentage from the model's reply
//! and classifies it into a qualitative fit tier.
//!
//! The reply is expected (not guaranteed) to be a JSON object with four named
//! string fields. Structured parsing runs first; the marker-slice heuristic
//! only covers replies where the object is buried in surrounding prose.

use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::strip_json_fences;

/// Literal marker preceding the percentage value in the model's reply.
const MATCH_MARKER: &str = "\"Job Description Match\":\"";

/// Qualitative bands for a match percentage, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTier {
    StrongMatch,
    ConsiderableFit,
    PotentialFit,
    LimitedAlignment,
}

impl FitTier {
    /// Half-open bands from below: ≥90, ≥80, ≥70, rest.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::StrongMatch
        } else if percentage >= 80.0 {
            Self::ConsiderableFit
        } else if percentage >= 70.0 {
            Self::PotentialFit
        } else {
            Self::LimitedAlignment
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StrongMatch => "Strong Match - Highly Recommended for Consideration",
            Self::ConsiderableFit => "Considerable Fit - Strong Candidate",
            Self::PotentialFit => "Potential Fit - Good Candidate",
            Self::LimitedAlignment => "Limited Alignment - Review Required",
        }
    }

    /// Presentation class used by the page template.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::StrongMatch => "strong-match",
            Self::ConsiderableFit => "considerable-fit",
            Self::PotentialFit => "potential-fit",
            Self::LimitedAlignment => "limited-alignment",
        }
    }
}

/// The response shape the prompt asks for. Only the match field is
/// load-bearing; the rest of the object is rendered verbatim.
#[derive(Debug, Deserialize)]
struct EvaluationFields {
    #[serde(rename = "Job Description Match")]
    job_description_match: String,
}

/// Recovers the numeric match percentage from the raw reply.
/// A trailing percent sign is tolerated. Absence of the field or a
/// non-numeric value is `MalformedResponse`, never a panic.
pub fn parse_match_percentage(raw: &str) -> Result<f64, AppError> {
    let field = match serde_json::from_str::<EvaluationFields>(strip_json_fences(raw)) {
        Ok(fields) => fields.job_description_match,
        Err(_) => slice_match_field(raw)?.to_string(),
    };

    let trimmed = field.trim().trim_end_matches('%').trim();
    trimmed.parse::<f64>().map_err(|_| {
        AppError::MalformedResponse(format!("match percentage is not numeric: {field:?}"))
    })
}

fn slice_match_field(raw: &str) -> Result<&str, AppError> {
    let start = raw
        .find(MATCH_MARKER)
        .ok_or_else(|| {
            AppError::MalformedResponse("match percentage field not found".to_string())
        })?
        + MATCH_MARKER.len();
    let rest = &raw[start..];
    let end = rest.find('"').ok_or_else(|| {
        AppError::MalformedResponse("unterminated match percentage field".to_string())
    })?;
    Ok(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_are_half_open_from_below() {
        assert_eq!(FitTier::from_percentage(90.0), FitTier::StrongMatch);
        assert_eq!(FitTier::from_percentage(89.9), FitTier::ConsiderableFit);
        assert_eq!(FitTier::from_percentage(80.0), FitTier::ConsiderableFit);
        assert_eq!(FitTier::from_percentage(79.9), FitTier::PotentialFit);
        assert_eq!(FitTier::from_percentage(70.0), FitTier::PotentialFit);
        assert_eq!(FitTier::from_percentage(69.9), FitTier::LimitedAlignment);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(
            FitTier::StrongMatch.label(),
            "Strong Match - Highly Recommended for Consideration"
        );
        assert_eq!(
            FitTier::ConsiderableFit.label(),
            "Considerable Fit - Strong Candidate"
        );
        assert_eq!(FitTier::PotentialFit.label(), "Potential Fit - Good Candidate");
        assert_eq!(
            FitTier::LimitedAlignment.label(),
            "Limited Alignment - Review Required"
        );
    }

    #[test]
    fn test_parse_from_structured_reply() {
        let raw = r#"{"Job Description Match":"92%","Missing Keywords":"","Candidate Summary":"Strong backend profile","Experience":"6 years"}"#;
        assert_eq!(parse_match_percentage(raw).unwrap(), 92.0);
    }

    #[test]
    fn test_parse_tolerates_code_fences() {
        let raw = "```json\n{\"Job Description Match\":\"85.5%\",\"Missing Keywords\":\"\",\"Candidate Summary\":\"\",\"Experience\":\"\"}\n```";
        assert_eq!(parse_match_percentage(raw).unwrap(), 85.5);
    }

    #[test]
    fn test_parse_tolerates_missing_percent_sign() {
        let raw = r#"{"Job Description Match":"73","Missing Keywords":"","Candidate Summary":"","Experience":""}"#;
        assert_eq!(parse_match_percentage(raw).unwrap(), 73.0);
    }

    #[test]
    fn test_parse_falls_back_to_marker_slice() {
        let raw = r#"Here is my assessment: {"Job Description Match":"78%","Missing Keywords":"Kubernetes"} hope this helps"#;
        assert_eq!(parse_match_percentage(raw).unwrap(), 78.0);
    }

    #[test]
    fn test_missing_marker_is_malformed() {
        let raw = "I am unable to evaluate this resume.";
        assert!(matches!(
            parse_match_percentage(raw),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let raw = r#"{"Job Description Match":"high","Missing Keywords":"","Candidate Summary":"","Experience":""}"#;
        assert!(matches!(
            parse_match_percentage(raw),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_unterminated_field_is_malformed() {
        let raw = r#"prefix "Job Description Match":"92"#;
        assert!(matches!(
            parse_match_percentage(raw),
            Err(AppError::MalformedResponse(_))
        ));
    }
}
