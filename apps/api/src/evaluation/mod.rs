//! Evaluation pipeline: prompt construction, the remote model round-trip,
//! and presentation of the reply.

pub mod handlers;
pub mod presenter;
pub mod prompts;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError};
use self::presenter::FitTier;

/// The evaluation seam. `AppState` carries an `Arc<dyn ResumeEvaluator>` so
/// the shell pipeline can be exercised without a network round-trip.
#[async_trait]
pub trait ResumeEvaluator: Send + Sync {
    async fn evaluate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Production evaluator backed by the Gemini client.
pub struct GeminiEvaluator(pub GeminiClient);

#[async_trait]
impl ResumeEvaluator for GeminiEvaluator {
    async fn evaluate(&self, prompt: &str) -> Result<String, LlmError> {
        self.0.generate(prompt).await
    }
}

/// Everything the shell renders for one successful submission.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// The model's reply, verbatim.
    pub raw: String,
    pub match_percentage: f64,
    pub tier: FitTier,
}

/// Runs prompt → remote call → presenter for one submission.
/// Remote failures surface as `EvaluationFailed`; a reply without a usable
/// percentage surfaces as `MalformedResponse`.
pub async fn run_evaluation(
    evaluator: &dyn ResumeEvaluator,
    resume_text: &str,
    job_description: &str,
) -> Result<EvaluationReport, AppError> {
    let prompt = prompts::build_evaluation_prompt(resume_text, job_description);
    let raw = evaluator.evaluate(&prompt).await.map_err(AppError::from)?;
    debug!("model reply: {} chars", raw.len());

    let match_percentage = presenter::parse_match_percentage(&raw)?;
    Ok(EvaluationReport {
        raw,
        match_percentage,
        tier: FitTier::from_percentage(match_percentage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    /// Evaluator that replays a scripted reply and records every prompt.
    struct ScriptedEvaluator {
        reply: Result<String, LlmError>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedEvaluator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: LlmError) -> Self {
            Self {
                reply: Err(error),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResumeEvaluator for ScriptedEvaluator {
        async fn evaluate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(LlmError::EmptyContent) => Err(LlmError::EmptyContent),
                Err(e) => Err(LlmError::Api {
                    status: 500,
                    message: e.to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_end_to_end_strong_match_scenario() {
        let evaluator = ScriptedEvaluator::replying(
            r#"{"Job Description Match":"92%","Missing Keywords":"","Candidate Summary":"Strong backend profile","Experience":"6 years"}"#,
        );

        let report = run_evaluation(
            &evaluator,
            "Experienced backend engineer, 6 years, Go, distributed systems",
            "Seeking a backend engineer with 5 years Go experience",
        )
        .await
        .unwrap();

        assert_eq!(report.match_percentage, 92.0);
        assert_eq!(report.tier, FitTier::StrongMatch);
        assert_eq!(
            report.tier.label(),
            "Strong Match - Highly Recommended for Consideration"
        );
        assert!(report.raw.contains("Strong backend profile"));

        let prompts = evaluator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("distributed systems"));
        assert!(prompts[0].contains("5 years Go experience"));
    }

    #[tokio::test]
    async fn test_remote_failure_surfaces_as_evaluation_failed() {
        let evaluator = ScriptedEvaluator::failing(LlmError::EmptyContent);

        let result = run_evaluation(&evaluator, "resume text", "job description").await;
        assert!(matches!(result, Err(AppError::EvaluationFailed(_))));
    }

    #[tokio::test]
    async fn test_unusable_reply_surfaces_as_malformed_response() {
        let evaluator = ScriptedEvaluator::replying("I cannot evaluate this document.");

        let result = run_evaluation(&evaluator, "resume text", "job description").await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
