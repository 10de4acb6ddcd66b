//! Multi-source location detection for a single candidate.
//!
//! Priority: structured ATS field, then resume text, then phone area code.

use super::extract;
use crate::domain::Candidate;
use std::fmt;

/// Where a detected location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Structured,
    Resume,
    Phone,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Structured => "structured",
            Self::Resume => "resume",
            Self::Phone => "phone",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLocation {
    pub location: String,
    pub source: LocationSource,
}

/// Location from the candidate record only; never touches resume or phone.
pub fn detect_structured(candidate: &Candidate) -> Option<String> {
    candidate.structured_location().map(str::to_string)
}

/// First non-empty location by source priority. `resume_text` falls back to
/// the text already attached to the candidate. `None` means the candidate
/// cannot be placed and is excluded from location-restricted results.
pub fn detect_with_source(
    candidate: &Candidate,
    resume_text: Option<&str>,
) -> Option<DetectedLocation> {
    if let Some(location) = detect_structured(candidate) {
        return Some(DetectedLocation {
            location,
            source: LocationSource::Structured,
        });
    }

    let resume_text = resume_text.or(candidate.resume_text.as_deref());

    if let Some(location) = resume_text.and_then(extract::extract_location_from_resume) {
        return Some(DetectedLocation {
            location,
            source: LocationSource::Resume,
        });
    }

    let resume_phones = resume_text
        .map(extract::extract_phone_numbers)
        .unwrap_or_default();
    candidate
        .phone_numbers
        .iter()
        .chain(resume_phones.iter())
        .find_map(|phone| extract::location_from_phone_number(phone))
        .map(|location| DetectedLocation {
            location,
            source: LocationSource::Phone,
        })
}

pub fn detect(candidate: &Candidate, resume_text: Option<&str>) -> Option<String> {
    detect_with_source(candidate, resume_text).map(|d| d.location)
}
