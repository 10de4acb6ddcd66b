//! Map Lever JSON records to domain entities.
//!
//! Lever fields are loosely typed (`archived` is an object or null,
//! `locations` a list or a string, `contact` an id or an object), so mapping
//! works on `serde_json::Value`.

use crate::domain::{Candidate, Posting};
use serde_json::Value;

pub const PROFILE_URL_BASE: &str = "https://hire.lever.co/candidates";

/// Map a Lever posting to domain Posting. `None` without an id.
pub fn posting_from_json(value: &Value) -> Option<Posting> {
    let id = value.get("id")?.as_str()?.to_string();
    let categories = value.get("categories");
    Some(Posting {
        id,
        title: text(value.get("text")).unwrap_or_else(|| "Untitled posting".to_string()),
        state: text(value.get("state")),
        team: categories.and_then(|c| text(c.get("team"))),
        location: categories.and_then(|c| text(c.get("location"))),
    })
}

/// Map a Lever opportunity to domain Candidate. `None` without an id.
pub fn candidate_from_json(value: &Value) -> Option<Candidate> {
    let id = value.get("id")?.as_str()?.to_string();

    let contact_location = value
        .get("contact")
        .filter(|c| c.is_object())
        .and_then(|c| text(c.get("location")));

    let linkedin_url = value
        .get("urls")
        .filter(|u| u.is_object())
        .and_then(|u| text(u.get("linkedin")));

    Some(Candidate {
        name: text(value.get("name")).unwrap_or_else(|| "Unknown Candidate".to_string()),
        emails: strings(value.get("emails")),
        phone_numbers: phones(value.get("phones")),
        location: text(value.get("location")),
        locations: strings(value.get("locations")),
        contact_location,
        links: strings(value.get("links")),
        linkedin_url,
        profile_url: Some(format!("{}/{}", PROFILE_URL_BASE, id)),
        archived: is_archived(value),
        posting_name: None,
        resume_text: None,
        id,
    })
}

/// Archived opportunities carry a non-null `archived` object (or `true`).
pub fn is_archived(value: &Value) -> bool {
    match value.get("archived") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(_) => true,
    }
}

/// Non-empty string for strings and numbers; `None` otherwise.
fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// A list of strings, or a single string as a one-element list.
fn strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| text(Some(v))).collect(),
        Some(v) => text(Some(v)).into_iter().collect(),
        None => Vec::new(),
    }
}

/// `phones: [{ "type": "mobile", "value": "+1 415..." }]`, plain strings tolerated.
fn phones(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|p| match p {
            Value::Object(_) => text(p.get("value")),
            other => text(Some(other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_mapping() {
        let c = candidate_from_json(&json!({
            "id": "opp-1",
            "name": "Jane Doe",
            "emails": ["jane@example.com"],
            "phones": [{"type": "mobile", "value": "(415) 555-1234"}],
            "location": "San Francisco, CA",
            "links": ["https://github.com/jane", "https://www.linkedin.com/in/jane"],
            "contact": "contact-id",
            "archived": null
        }))
        .unwrap();

        assert_eq!(c.id, "opp-1");
        assert_eq!(c.name, "Jane Doe");
        assert_eq!(c.primary_email(), Some("jane@example.com"));
        assert_eq!(c.phone_numbers, vec!["(415) 555-1234"]);
        assert_eq!(c.structured_location(), Some("San Francisco, CA"));
        assert_eq!(c.linkedin(), Some("https://www.linkedin.com/in/jane"));
        assert_eq!(
            c.profile_url.as_deref(),
            Some("https://hire.lever.co/candidates/opp-1")
        );
        assert!(c.contact_location.is_none());
        assert!(!c.archived);
    }

    #[test]
    fn test_loose_location_fields() {
        let c = candidate_from_json(&json!({
            "id": "opp-2",
            "locations": "Austin, TX",
            "contact": {"location": "Dallas, TX"},
            "urls": {"linkedin": "https://linkedin.com/in/x"},
            "archived": {"reason": "hired", "archivedAt": 1700000000000u64}
        }))
        .unwrap();

        assert_eq!(c.name, "Unknown Candidate");
        assert_eq!(c.locations, vec!["Austin, TX"]);
        assert_eq!(c.contact_location.as_deref(), Some("Dallas, TX"));
        assert_eq!(c.structured_location(), Some("Austin, TX"));
        assert_eq!(c.linkedin(), Some("https://linkedin.com/in/x"));
        assert!(c.archived);
    }

    #[test]
    fn test_posting_mapping() {
        let p = posting_from_json(&json!({
            "id": "post-1",
            "text": "Senior Rust Engineer",
            "state": "published",
            "categories": {"team": "Platform", "location": "Remote"}
        }))
        .unwrap();
        assert_eq!(p.title, "Senior Rust Engineer");
        assert_eq!(p.team.as_deref(), Some("Platform"));
        assert_eq!(p.location.as_deref(), Some("Remote"));
        assert!(posting_from_json(&json!({"text": "no id"})).is_none());
    }
}
