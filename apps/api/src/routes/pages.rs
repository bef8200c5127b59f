//! Server-rendered HTML for the interactive form and the results page.

use std::fmt::Write;

use axum::response::Html;

use crate::pipeline::report::ApplicationReport;

const STYLE: &str = r#"<style>
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.main-header { font-size: 2.5rem; font-weight: bold; margin-bottom: 1rem; }
.section-header { font-size: 1.5rem; font-weight: bold; margin: 1.5rem 0 0.75rem; }
.score-box { padding: 1rem; border-radius: 0.5rem; text-align: center; font-size: 2rem; }
.good-score { background-color: #d4edda; color: #155724; }
.medium-score { background-color: #fff3cd; color: #856404; }
.bad-score { background-color: #f8d7da; color: #721c24; }
.info-box { background-color: #e2f0fd; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }
.warning { background-color: #fff3cd; border-radius: 0.5rem; padding: 1rem; }
.columns { display: flex; gap: 2rem; }
.columns > div { flex: 1; }
textarea { width: 100%; }
pre { white-space: pre-wrap; }
.button { padding: 10px 20px; background-color: #4CAF50; color: white; border-radius: 5px; text-decoration: none; }
</style>"#;

const FOOTER: &str = "<hr><p>Job Application Assistant</p>";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Job Application Assistant</title>{STYLE}</head>\
         <body><div class=\"main-header\">Job Application Assistant</div>{body}{FOOTER}</body></html>"
    )
}

/// The upload form, optionally with a warning above it.
pub fn render_form(warning: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(warning) = warning {
        let _ = write!(body, "<div class=\"warning\">{}</div>", escape(warning));
    }
    body.push_str(
        r#"<div class="info-box">Upload your resume and paste a job description to:
<ul>
<li>Get an ATS compatibility score</li>
<li>See matched and missing keywords</li>
<li>Get personalized resume suggestions</li>
<li>Generate a cold email and find company contacts</li>
</ul></div>
<form action="/analyze" method="post" enctype="multipart/form-data">
<div class="section-header">Upload Your Resume</div>
<input type="file" name="resume" accept=".pdf,.docx" required>
<div class="section-header">Enter Job Description</div>
<textarea name="job_description" rows="12" placeholder="Paste the job description here" required></textarea>
<p><button type="submit">Analyze Application</button></p>
</form>"#,
    );
    page(&body)
}

fn keyword_list(out: &mut String, title: &str, keywords: &[String], mark: &str, empty: &str) {
    let _ = write!(out, "<div><div class=\"section-header\">{title}</div>");
    if keywords.is_empty() {
        let _ = write!(out, "<p>{empty}</p>");
    } else {
        out.push_str("<ul>");
        for keyword in keywords {
            let _ = write!(out, "<li>{mark} {}</li>", escape(keyword));
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>");
}

/// The results page for a finished run.
pub fn render_results(report: &ApplicationReport) -> String {
    let mut body = String::new();

    for failure in &report.failures {
        let _ = write!(
            body,
            "<div class=\"warning\"><b>{}</b>: {}</div>",
            escape(failure.stage),
            escape(&failure.message)
        );
    }

    // ATS analysis
    let _ = write!(
        body,
        "<div class=\"section-header\">ATS Compatibility Score</div>\
         <div class=\"score-box {}-score\">{}%</div>\
         <div class=\"section-header\">Company Identified</div><h3>{}</h3>",
        report.score_band.as_str(),
        report.ats_score,
        escape(&report.company_name)
    );
    if let Some(job_id) = &report.job_id {
        let _ = write!(body, "<p>Job ID: {}</p>", escape(job_id));
    }
    body.push_str("<div class=\"columns\">");
    keyword_list(
        &mut body,
        "Matched Keywords",
        &report.matched_keywords,
        "&#9989;",
        "No keywords matched.",
    );
    keyword_list(
        &mut body,
        "Missing Keywords",
        &report.missing_keywords,
        "&#10060;",
        "No missing keywords.",
    );
    body.push_str("</div>");

    // Resume suggestions
    body.push_str("<div class=\"section-header\">Resume Edit Suggestions</div>");
    if report.edit_suggestions.trim().is_empty() {
        body.push_str("<p>No suggestions available.</p>");
    } else {
        let _ = write!(body, "<pre>{}</pre>", escape(&report.edit_suggestions));
    }

    // Cold email
    body.push_str("<div class=\"section-header\">Cold Email Generator</div>");
    if report.potential_emails.is_empty() {
        body.push_str("<div class=\"warning\">No potential email contacts found.</div>");
    } else {
        body.push_str("<div class=\"section-header\">Potential Contacts</div><table><tr><th>Email</th></tr>");
        for email in &report.potential_emails {
            let _ = write!(body, "<tr><td>{}</td></tr>", escape(email));
        }
        body.push_str("</table>");
    }
    let _ = write!(
        body,
        "<div class=\"section-header\">Email Template</div>\
         <p><b>Subject:</b> {}</p>\
         <textarea rows=\"12\" readonly>{}</textarea>",
        escape(&report.cold_mail_subject),
        escape(&report.cold_mail_body)
    );
    if let Some(link) = &report.mailto_link {
        let _ = write!(
            body,
            "<p><a class=\"button\" href=\"{}\" target=\"_blank\">Open Email Client</a></p>",
            escape(link)
        );
    }

    body.push_str("<p><a href=\"/\">Analyze another application</a></p>");
    page(&body)
}

/// GET /
pub async fn handle_form() -> Html<String> {
    Html(render_form(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::report::ScoreBand;
    use crate::pipeline::StageFailure;
    use chrono::Utc;
    use uuid::Uuid;

    fn report() -> ApplicationReport {
        ApplicationReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            ats_score: 64,
            score_band: ScoreBand::Medium,
            company_name: "Acme <script>".to_string(),
            job_id: None,
            matched_keywords: vec!["Rust".to_string()],
            missing_keywords: vec![],
            edit_suggestions: String::new(),
            cold_mail_subject: "Hi".to_string(),
            cold_mail_body: "Body".to_string(),
            potential_emails: vec!["hr@acme.io".to_string()],
            company_domain: Some("acme.io".to_string()),
            mailto_link: Some("mailto:hr@acme.io?subject=Hi&body=Body".to_string()),
            failures: vec![StageFailure {
                stage: "email_finder",
                message: "x & y".to_string(),
            }],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_results_escape_llm_text() {
        let html = render_results(&report());
        assert!(html.contains("Acme &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_results_show_band_keywords_and_mailto() {
        let html = render_results(&report());
        assert!(html.contains("medium-score"));
        assert!(html.contains("64%"));
        assert!(html.contains("No missing keywords."));
        assert!(html.contains("No suggestions available."));
        assert!(html.contains("href=\"mailto:hr@acme.io?subject=Hi&amp;body=Body\""));
        assert!(html.contains("x &amp; y"));
    }

    #[test]
    fn test_form_posts_multipart_to_analyze() {
        let html = render_form(Some("Please upload"));
        assert!(html.contains("action=\"/analyze\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("name=\"resume\""));
        assert!(html.contains("name=\"job_description\""));
        assert!(html.contains("Please upload"));
    }
}
