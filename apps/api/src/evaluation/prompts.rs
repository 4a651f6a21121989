// Prompt constants for the evaluation module.

/// Instruction template for resume-vs-job-description evaluation.
/// Replace `{text}` and `{job_description}` before sending.
///
/// The requested response shape is a single string holding an object with
/// exactly four named string fields; the presenter depends on the
/// `"Job Description Match"` field being present.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"As an experienced Applicant Tracking System (ATS) analyst,
with profound knowledge in technology, software engineering, data science,
and big data engineering, your role involves evaluating resumes against job descriptions.
Recognizing the competitive job market, provide top-notch assistance for resume improvement.
Your goal is to analyze the resume against the given job description,
assign a percentage match based on key criteria, and pinpoint missing keywords accurately.
resume:{text}
description:{job_description}
I want the response in one single string having the structure
{"Job Description Match":"%","Missing Keywords":"","Candidate Summary":"","Experience":""}"#;

/// Builds the evaluation prompt. Neither input is escaped or sanitized;
/// downstream parsing assumes (but does not enforce) the requested shape.
pub fn build_evaluation_prompt(resume_text: &str, job_description: &str) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{text}", resume_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_substitutes_both_inputs() {
        let prompt = build_evaluation_prompt(
            "Experienced backend engineer, 6 years, Go",
            "Seeking a backend engineer with 5 years Go experience",
        );
        assert!(prompt.contains("resume:Experienced backend engineer, 6 years, Go"));
        assert!(prompt.contains("description:Seeking a backend engineer with 5 years Go experience"));
        assert!(!prompt.contains("{text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_prompt_requests_the_four_field_shape() {
        let prompt = build_evaluation_prompt("resume", "jd");
        assert!(prompt.contains(r#"{"Job Description Match":"%","Missing Keywords":"","Candidate Summary":"","Experience":""}"#));
    }
}
