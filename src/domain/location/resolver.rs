//! Free-text location -> structured `GeoDescriptor`.
//!
//! Never fails: anything that cannot be classified is dropped.

use super::tables::{self, CountryInfo, STATE_SCHEME_COUNTRY, STATE_SCHEME_COUNTRY_CODE};
use serde::Serialize;

/// Words that begin many multi-word city names ("San Jose", "New Haven").
/// A single token equal to one of these is never treated as a country prefix.
const CITY_PREFIX_DENYLIST: &[&str] = &[
    "san", "santa", "new", "saint", "st", "los", "las", "la", "el", "fort", "port", "north",
    "south", "east", "west", "lake", "mount", "costa", "palm", "green",
];

/// Minimum length of a single-word token for a country-name prefix lookup.
const MIN_PREFIX_LEN: usize = 4;

/// Normalized view of a location string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoDescriptor {
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_abbr: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    /// Trimmed input; empty for empty input.
    pub original: String,
}

impl GeoDescriptor {
    /// Country of this descriptor equals the nation owning the state scheme.
    pub fn in_state_scheme_country(&self) -> bool {
        self.country
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(STATE_SCHEME_COUNTRY))
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.country.is_none()
    }
}

/// Splits on `,` `;` `/` `-` and classifies each token as state, then
/// country, then (first unclassified token only) city.
pub fn resolve(raw: &str) -> GeoDescriptor {
    let original = raw.trim();
    let mut geo = GeoDescriptor {
        original: original.to_string(),
        ..GeoDescriptor::default()
    };

    for token in split_tokens(original) {
        if let Some(state) = tables::lookup_state(token) {
            geo.state = Some(state.name.to_string());
            geo.state_abbr = Some(state.abbr.to_string());
            if geo.country.is_none() {
                geo.country = Some(STATE_SCHEME_COUNTRY.to_string());
                geo.country_code = Some(STATE_SCHEME_COUNTRY_CODE.to_string());
            }
            continue;
        }

        if let Some(country) = lookup_country(token) {
            geo.country = Some(country.name.to_string());
            geo.country_code = Some(country.iso3.to_string());
            continue;
        }

        if geo.city.is_none() {
            geo.city = Some(token.to_string());
        }
    }

    if geo.state.is_some() && geo.country.is_none() {
        geo.country = Some(STATE_SCHEME_COUNTRY.to_string());
        geo.country_code = Some(STATE_SCHEME_COUNTRY_CODE.to_string());
    }

    geo
}

fn split_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split([',', ';', '/', '-'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Exact name/alias/code match first. Falls back to a country-name prefix
/// match for single words only ("Czech", "Saudi"), skipping tokens with a
/// space and common city-name prefixes so "San Jose" or "New Haven" never
/// resolve to a country.
fn lookup_country(token: &str) -> Option<&'static CountryInfo> {
    if let Some(country) = tables::lookup_country_exact(token) {
        return Some(country);
    }

    let lower = token.to_lowercase();
    if lower.contains(char::is_whitespace)
        || lower.chars().count() < MIN_PREFIX_LEN
        || CITY_PREFIX_DENYLIST.contains(&lower.as_str())
    {
        return None;
    }

    tables::countries().iter().find(|c| {
        let name = c.name.to_lowercase();
        name.starts_with(&lower)
            && name[lower.len()..].starts_with(char::is_whitespace)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_state_abbr() {
        let geo = resolve("San Francisco, CA");
        assert_eq!(geo.city.as_deref(), Some("San Francisco"));
        assert_eq!(geo.state.as_deref(), Some("California"));
        assert_eq!(geo.state_abbr.as_deref(), Some("CA"));
        assert_eq!(geo.country.as_deref(), Some("United States"));
        assert_eq!(geo.country_code.as_deref(), Some("USA"));
        assert_eq!(geo.original, "San Francisco, CA");
    }

    #[test]
    fn test_empty_input() {
        let geo = resolve("   ");
        assert_eq!(geo, GeoDescriptor::default());
        assert_eq!(geo.original, "");
        assert!(geo.is_empty());
    }

    #[test]
    fn test_country_only() {
        let geo = resolve("United Kingdom");
        assert_eq!(geo.country.as_deref(), Some("United Kingdom"));
        assert_eq!(geo.country_code.as_deref(), Some("GBR"));
        assert!(geo.city.is_none());
        assert!(geo.state.is_none());

        assert_eq!(resolve("USA").country.as_deref(), Some("United States"));
    }

    #[test]
    fn test_city_and_country() {
        let geo = resolve("Toronto, Canada");
        assert_eq!(geo.city.as_deref(), Some("Toronto"));
        assert_eq!(geo.country.as_deref(), Some("Canada"));
        assert!(geo.state.is_none());

        let geo = resolve("London, UK");
        assert_eq!(geo.city.as_deref(), Some("London"));
        assert_eq!(geo.country.as_deref(), Some("United Kingdom"));
    }

    #[test]
    fn test_explicit_country_is_kept_over_state_default() {
        let geo = resolve("Canada / Georgia");
        assert_eq!(geo.country.as_deref(), Some("Canada"));
        assert_eq!(geo.state.as_deref(), Some("Georgia"));
    }

    #[test]
    fn test_only_first_unclassified_token_is_city() {
        let geo = resolve("Toronto, Ontario, Canada");
        assert_eq!(geo.city.as_deref(), Some("Toronto"));
        assert_eq!(geo.country.as_deref(), Some("Canada"));
    }

    #[test]
    fn test_semicolon_slash_and_hyphen_delimiters() {
        let geo = resolve("Remote - Austin; TX");
        assert_eq!(geo.city.as_deref(), Some("Remote"));
        assert_eq!(geo.state.as_deref(), Some("Texas"));
    }

    #[test]
    fn test_country_prefix_lookup() {
        assert_eq!(resolve("Saudi").country.as_deref(), Some("Saudi Arabia"));
        // Denylisted and multi-word tokens never prefix-match a country.
        let geo = resolve("San");
        assert!(geo.country.is_none());
        assert_eq!(geo.city.as_deref(), Some("San"));
        let geo = resolve("New Haven");
        assert!(geo.country.is_none());
        assert_eq!(geo.city.as_deref(), Some("New Haven"));
    }

    #[test]
    fn test_state_full_name() {
        let geo = resolve("Austin, Texas");
        assert_eq!(geo.city.as_deref(), Some("Austin"));
        assert_eq!(geo.state_abbr.as_deref(), Some("TX"));
        assert!(geo.in_state_scheme_country());
    }
}
