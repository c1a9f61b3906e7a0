//! Human-readable summaries of matched jobs for downstream notifiers.
//!
//! Output is HTML-safe text (Telegram-style `<b>` labels, one field per line).
//! Every value taken from the job is escaped.

use serde_json::Value;

use crate::scoring::passes::parse_timestamp;
use crate::scoring::ScoredJob;

const MISSING: &str = "N/A";

/// Escapes the three characters that matter inside HTML text nodes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render_match_digest(scored: &ScoredJob) -> String {
    let job = &scored.job;
    let text = |key: &str| escape_html(job.str_field(key).unwrap_or_default());
    let first = |path: &str| job.extract(path).into_iter().find(|s| !s.is_empty());

    let skills = job
        .extract("skill_requirements.skill.name")
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let skills = if skills.is_empty() {
        MISSING.to_string()
    } else {
        escape_html(&skills)
    };

    let location = match job.get("city") {
        Some(Value::Object(_)) => format!(
            "{}, {}",
            escape_html(first("city.name").unwrap_or_default()),
            escape_html(first("city.country.name").unwrap_or_default())
        ),
        _ => "Remote".to_string(),
    };

    let compensation = match job.get("compensation_amount_cents").and_then(Value::as_f64) {
        Some(cents) if cents > 0.0 => format!("{}", cents / 100.0),
        _ => MISSING.to_string(),
    };

    let deadline = job
        .str_field("deadline")
        .and_then(parse_timestamp)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| MISSING.to_string());

    let sector = first("sectors.sector.name")
        .map(escape_html)
        .unwrap_or_else(|| MISSING.to_string());
    let company = first("entity.name")
        .map(escape_html)
        .unwrap_or_else(|| MISSING.to_string());

    format!(
        "<b>Job Title:</b> {title}\n\
         <b>Job Type:</b> {job_type}\n\
         <b>Location:</b> {location}\n\
         <b>Experience:</b> {experience}\n\
         <b>Salary/Compensation:</b> {compensation} {currency} / {compensation_type}\n\
         <b>Deadline:</b> {deadline}\n\n\
         <b>Sector:</b> {sector}\n\
         <b>Company:</b> {company}\n\n\
         <b>Skills Required:</b> {skills}\n\
         <b>Matching Score:</b> {score}",
        title = text("title"),
        job_type = text("job_type"),
        experience = text("experience_level"),
        currency = text("compensation_currency"),
        compensation_type = text("compensation_type"),
        score = scored.score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Job;
    use serde_json::json;

    fn scored(value: Value, score: f64) -> ScoredJob {
        ScoredJob {
            job: serde_json::from_value::<Job>(value).unwrap(),
            score,
            is_match: true,
            match_details: vec![],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("R&D <lead>"), "R&amp;D &lt;lead&gt;");
    }

    #[test]
    fn test_full_digest() {
        let digest = render_match_digest(&scored(
            json!({
                "title": "Planning Engineer",
                "job_type": "full_time",
                "city": { "name": "Addis Ababa", "country": { "name": "Ethiopia" } },
                "experience_level": "senior",
                "compensation_amount_cents": 4500000,
                "compensation_currency": "ETB",
                "compensation_type": "monthly",
                "deadline": "2024-07-01T00:00:00Z",
                "sectors": [{ "sector": { "name": "Construction" } }, { "sector": { "name": "Civil" } }],
                "entity": { "name": "Eyufree Trading PLC" },
                "skill_requirements": [{ "skill": { "name": "Primavera" } }, { "skill": { "name": "WBS" } }]
            }),
            12.5,
        ));

        assert!(digest.contains("<b>Job Title:</b> Planning Engineer\n"));
        assert!(digest.contains("<b>Location:</b> Addis Ababa, Ethiopia\n"));
        assert!(digest.contains("<b>Salary/Compensation:</b> 45000 ETB / monthly\n"));
        assert!(digest.contains("<b>Deadline:</b> 01/07/2024\n"));
        assert!(digest.contains("<b>Sector:</b> Construction\n"));
        assert!(digest.contains("<b>Company:</b> Eyufree Trading PLC\n"));
        assert!(digest.contains("<b>Skills Required:</b> Primavera, WBS\n"));
        assert!(digest.ends_with("<b>Matching Score:</b> 12.5"));
    }

    #[test]
    fn test_sparse_job_uses_placeholders() {
        let digest = render_match_digest(&scored(json!({ "title": "Site <Lead>", "city": null }), 9.0));

        assert!(digest.contains("<b>Job Title:</b> Site &lt;Lead&gt;\n"));
        assert!(digest.contains("<b>Location:</b> Remote\n"));
        assert!(digest.contains("<b>Salary/Compensation:</b> N/A  / \n"));
        assert!(digest.contains("<b>Deadline:</b> N/A\n"));
        assert!(digest.contains("<b>Sector:</b> N/A\n"));
        assert!(digest.contains("<b>Company:</b> N/A\n"));
        assert!(digest.contains("<b>Skills Required:</b> N/A\n"));
        assert!(digest.ends_with("<b>Matching Score:</b> 9"));
    }
}
