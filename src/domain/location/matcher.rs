//! Does a filter term denote the same place as a candidate location?
//!
//! Rules run in order and the first decisive one wins:
//!
//! 1. Region terms are expanded once; any member city matching is a match.
//! 2. Exact (case-insensitive) match of the trimmed strings.
//! 3. Both sides name a country: different countries never match; same
//!    country matches unless both also name a state and the states differ.
//! 4. Both sides name a state: states must be equal.
//! 5. A state on one side and the state-scheme country on the other.
//! 6. City containment in either direction.
//! 7. Shared word of two or more characters.

use super::region;
use super::resolver::{self, GeoDescriptor};
use std::collections::HashSet;

/// Matches a user filter term against a candidate location.
pub fn matches(filter_term: &str, candidate_location: &str) -> bool {
    matches_with(filter_term, candidate_location, false)
}

/// `already_expanded` stops region expansion after one level.
pub fn matches_with(filter_term: &str, candidate_location: &str, already_expanded: bool) -> bool {
    if filter_term.trim().is_empty() || candidate_location.trim().is_empty() {
        return false;
    }

    if !already_expanded {
        let expanded = region::expand(filter_term);
        if expanded.len() > 1 {
            return expanded
                .iter()
                .any(|city| matches_with(city, candidate_location, true));
        }
    }

    let filter = resolver::resolve(filter_term);
    let candidate = resolver::resolve(candidate_location);
    descriptors_match(&filter, &candidate)
}

fn descriptors_match(a: &GeoDescriptor, b: &GeoDescriptor) -> bool {
    if a.original.eq_ignore_ascii_case(&b.original) {
        return true;
    }

    if let (Some(ca), Some(cb)) = (&a.country, &b.country) {
        if !ca.eq_ignore_ascii_case(cb) {
            return false;
        }
        return match (&a.state, &b.state) {
            (Some(sa), Some(sb)) => sa.eq_ignore_ascii_case(sb),
            _ => true,
        };
    }

    if let (Some(sa), Some(sb)) = (&a.state, &b.state) {
        return sa.eq_ignore_ascii_case(sb);
    }

    if (a.state.is_some() && b.in_state_scheme_country())
        || (b.state.is_some() && a.in_state_scheme_country())
    {
        return true;
    }

    if let (Some(city_a), Some(city_b)) = (&a.city, &b.city) {
        let (city_a, city_b) = (city_a.to_lowercase(), city_b.to_lowercase());
        if city_a.contains(&city_b) || city_b.contains(&city_a) {
            return true;
        }
    }

    let words_a = significant_words(&a.original);
    let words_b = significant_words(&b.original);
    !words_a.is_disjoint(&words_b)
}

fn significant_words(s: &str) -> HashSet<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 1)
        .map(str::to_lowercase)
        .collect()
}
