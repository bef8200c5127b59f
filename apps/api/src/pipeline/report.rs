//! Presentation view of a finished pipeline run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::outreach::build_mailto;
use crate::pipeline::{ApplicationState, StageFailure};

const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Coarse rating of the match score used to color the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Medium,
    Bad,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Good
        } else if score >= 60 {
            Self::Medium
        } else {
            Self::Bad
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Medium => "medium",
            Self::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub ats_score: u8,
    pub score_band: ScoreBand,
    pub company_name: String,
    pub job_id: Option<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub edit_suggestions: String,
    pub cold_mail_subject: String,
    pub cold_mail_body: String,
    pub potential_emails: Vec<String>,
    pub company_domain: Option<String>,
    /// Only set when there is at least one recipient.
    pub mailto_link: Option<String>,
    pub failures: Vec<StageFailure>,
}

impl ApplicationReport {
    /// Missing stage results fall back to empty values, as the results page shows them.
    pub fn from_state(state: &ApplicationState) -> Self {
        let analysis = state.ats_analysis();
        let ats_score = analysis.map_or(0, |a| a.job_description_match_score);

        let company_name = analysis
            .map(|a| a.company_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_COMPANY)
            .to_string();
        let job_id = analysis
            .map(|a| a.job_id.trim())
            .filter(|id| !id.is_empty() && !id.starts_with('<'))
            .map(String::from);

        let (cold_mail_subject, cold_mail_body) = state
            .cold_email()
            .map(|e| (e.subject.clone(), e.main_body.clone()))
            .unwrap_or_default();

        let potential_emails = state
            .contacts()
            .map(|c| c.emails().to_vec())
            .unwrap_or_default();
        let company_domain = match state.contacts() {
            Some(crate::contacts::ContactLookup::Found { domain, .. }) => Some(domain.clone()),
            _ => None,
        };

        let mailto_link = (!potential_emails.is_empty())
            .then(|| build_mailto(&potential_emails, &cold_mail_subject, &cold_mail_body));

        Self {
            run_id: state.run_id(),
            generated_at: Utc::now(),
            ats_score,
            score_band: ScoreBand::from_score(ats_score),
            company_name,
            job_id,
            matched_keywords: analysis
                .map(|a| a.matching_keywords.clone())
                .unwrap_or_default(),
            missing_keywords: analysis
                .map(|a| a.missing_keywords.clone())
                .unwrap_or_default(),
            edit_suggestions: analysis
                .map(|a| a.resume_edit_suggestions.clone())
                .unwrap_or_default(),
            cold_mail_subject,
            cold_mail_body,
            potential_emails,
            company_domain,
            mailto_link,
            failures: state.failures().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ContactLookup;
    use crate::pipeline::{AtsAnalysis, ColdEmail};

    fn analysis(score: u8, company: &str) -> AtsAnalysis {
        AtsAnalysis {
            company_name: company.to_string(),
            job_id: "<null>".to_string(),
            job_description_match_score: score,
            missing_keywords: vec!["Kafka".to_string()],
            matching_keywords: vec!["Rust".to_string()],
            resume_edit_suggestions: "- Mention Kafka".to_string(),
        }
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Bad);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Bad);
    }

    #[test]
    fn test_empty_state_uses_defaults() {
        let state = ApplicationState::new("JD", "/tmp/cv.pdf");
        let report = ApplicationReport::from_state(&state);
        assert_eq!(report.ats_score, 0);
        assert_eq!(report.score_band, ScoreBand::Bad);
        assert_eq!(report.company_name, "Unknown Company");
        assert!(report.potential_emails.is_empty());
        assert!(report.mailto_link.is_none());
    }

    #[test]
    fn test_full_state_builds_mailto() {
        let mut state = ApplicationState::new("JD", "/tmp/cv.pdf");
        state.set_ats_analysis(analysis(85, "Acme")).unwrap();
        state
            .set_cold_email(ColdEmail {
                subject: "Hi there".to_string(),
                main_body: "Body".to_string(),
            })
            .unwrap();
        state
            .set_contacts(ContactLookup::Found {
                emails: vec!["a@acme.io".to_string(), "b@acme.io".to_string()],
                domain: "acme.io".to_string(),
            })
            .unwrap();

        let report = ApplicationReport::from_state(&state);
        assert_eq!(report.score_band, ScoreBand::Good);
        assert_eq!(report.company_name, "Acme");
        assert_eq!(report.job_id, None);
        assert_eq!(report.company_domain.as_deref(), Some("acme.io"));
        assert_eq!(
            report.mailto_link.as_deref(),
            Some("mailto:a@acme.io,b@acme.io?subject=Hi%20there&body=Body")
        );
    }

    #[test]
    fn test_unavailable_contacts_have_no_emails() {
        let mut state = ApplicationState::new("JD", "/tmp/cv.pdf");
        state
            .set_contacts(ContactLookup::Unavailable {
                error: "Organization details not found!".to_string(),
            })
            .unwrap();
        let report = ApplicationReport::from_state(&state);
        assert!(report.potential_emails.is_empty());
        assert!(report.company_domain.is_none());
    }
}
