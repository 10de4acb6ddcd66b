//! Named region expansion ("Bay Area" -> member cities).

use super::tables;

/// Expands `term` to a region's member cities when a region name occurs
/// anywhere in it (case-insensitive substring, first region wins). Any other
/// term comes back unchanged as a single-element list.
///
/// Substring matching is deliberate: "San Francisco Bay Area" expands like
/// "Bay Area". Regions of regions are not supported.
pub fn expand(term: &str) -> Vec<String> {
    let lower = term.to_lowercase();
    tables::regions()
        .iter()
        .find(|region| lower.contains(region.name))
        .map(|region| {
            region
                .member_cities
                .iter()
                .map(|c| c.to_string())
                .collect()
        })
        .unwrap_or_else(|| vec![term.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_expands_to_members() {
        let cities = expand("Bay Area");
        assert!(cities.len() > 1);
        assert!(cities.iter().any(|c| c == "Oakland"));
        assert!(!cities.iter().any(|c| c == "Los Angeles"));
    }

    #[test]
    fn test_region_substring_in_longer_phrase() {
        assert_eq!(expand("San Francisco Bay Area"), expand("bay area"));
        assert!(expand("NYC Metro").iter().any(|c| c == "Newark"));
    }

    #[test]
    fn test_non_region_passes_through() {
        assert_eq!(expand("Austin, TX"), vec!["Austin, TX".to_string()]);
        assert_eq!(expand(""), vec![String::new()]);
    }
}
