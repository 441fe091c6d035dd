use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A job posting as handed over by a scraper or API caller.
///
/// Every text field may be missing or `null` on the wire; both become an empty
/// string so scoring never has to special-case absent text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub source: Option<String>,
    /// As scraped: "2026-03-14", "3 days ago", "Recently" or blank. Never parsed.
    #[serde(deserialize_with = "lenient_text")]
    pub posted_date: Option<String>,
}

impl JobPosting {
    #[cfg(test)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Text sent to the semantic provider for the job side of the comparison.
    pub fn semantic_text(&self) -> String {
        format!(
            "{}. {}. Company: {}",
            self.title, self.description, self.company
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional metadata accepts any JSON value: blank strings and `null` become
/// `None`, non-strings are kept in their JSON form.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let job: JobPosting = serde_json::from_str(r#"{"title": "Data Engineer"}"#).unwrap();
        assert_eq!(job.title, "Data Engineer");
        assert!(job.description.is_empty());
        assert!(job.location.is_empty());
        assert!(job.source.is_none());
        assert!(job.posted_date.is_none());
    }

    #[test]
    fn test_null_description_is_empty() {
        let job: JobPosting =
            serde_json::from_str(r#"{"title": "x", "description": null, "location": null}"#)
                .unwrap();
        assert_eq!(job.description, "");
        assert_eq!(job.location, "");
    }

    #[test]
    fn test_posted_date_kept_as_text() {
        let job: JobPosting =
            serde_json::from_str(r#"{"title": "x", "posted_date": "2026-03-14", "source": "linkedin"}"#)
                .unwrap();
        assert_eq!(job.posted_date.as_deref(), Some("2026-03-14"));
        assert_eq!(job.source.as_deref(), Some("linkedin"));
    }

    #[test]
    fn test_free_text_posted_dates_are_accepted() {
        let cases = [
            (r#""Recently""#, Some("Recently")),
            (r#""3 days ago""#, Some("3 days ago")),
            (r#""""#, None),
            ("null", None),
            ("1710374400", Some("1710374400")),
        ];
        for (raw, expected) in cases {
            let body = format!(r#"{{"title": "x", "posted_date": {raw}}}"#);
            let job: JobPosting = serde_json::from_str(&body).unwrap();
            assert_eq!(job.posted_date.as_deref(), expected, "posted_date {raw}");
        }
    }

    #[test]
    fn test_semantic_text_layout() {
        let job = JobPosting::new("ML Engineer", "Build models", "Remote").with_company("Acme");
        assert_eq!(job.semantic_text(), "ML Engineer. Build models. Company: Acme");
    }
}
