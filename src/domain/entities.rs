//! Domain entities. Pure data structures for the core business.
//!
//! No Lever/HTTP types here; adapters map into these.

use serde::{Deserialize, Serialize};

/// A job posting in the ATS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: String,
    pub title: String,
    /// Posting state as reported by the ATS (published, closed, ...).
    pub state: Option<String>,
    pub team: Option<String>,
    pub location: Option<String>,
}

/// A candidate (Lever "opportunity"). Owned by the ATS; the core only reads it,
/// except for attaching `resume_text` once fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    /// Primary structured location field.
    pub location: Option<String>,
    /// Secondary "locations" collection; only the first element is consulted.
    pub locations: Vec<String>,
    /// Location nested in the contact record.
    pub contact_location: Option<String>,
    pub links: Vec<String>,
    pub linkedin_url: Option<String>,
    pub profile_url: Option<String>,
    pub archived: bool,
    pub posting_name: Option<String>,
    pub resume_text: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Structured location: `location`, then first of `locations`, then the
    /// contact location. Blank strings count as absent.
    pub fn structured_location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
            .or_else(|| non_blank(self.locations.first().map(String::as_str)))
            .or_else(|| non_blank(self.contact_location.as_deref()))
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// First link mentioning linkedin, else the explicit `linkedin_url`.
    pub fn linkedin(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.to_lowercase().contains("linkedin"))
            .map(String::as_str)
            .or(self.linkedin_url.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// A candidate paired with its parsed resume text, ready for scoring.
#[derive(Debug, Clone)]
pub struct CandidateWithResume {
    pub candidate: Candidate,
    pub resume_text: String,
}
