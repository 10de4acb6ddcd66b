//! Static reference tables: US states, countries, named regions, NANP area codes.
//!
//! Built once on first use and read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A US state (or DC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub name: &'static str,
    pub abbr: &'static str,
}

/// A country with its short name, ISO codes and common aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    pub name: &'static str,
    pub iso2: &'static str,
    pub iso3: &'static str,
    pub aliases: &'static [&'static str],
}

/// A named multi-city region. Member cities are bare city names so that a
/// member never matches a whole state on its own. A city whose name is also
/// a state name carries its own state ("Washington, DC") so it compares by
/// state instead of by shared words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDefinition {
    pub name: &'static str,
    pub member_cities: &'static [&'static str],
}

/// Country owning the state naming scheme.
pub const STATE_SCHEME_COUNTRY: &str = "United States";
pub const STATE_SCHEME_COUNTRY_CODE: &str = "USA";

#[rustfmt::skip]
const STATES: &[StateInfo] = &[
    StateInfo { name: "Alabama", abbr: "AL" },
    StateInfo { name: "Alaska", abbr: "AK" },
    StateInfo { name: "Arizona", abbr: "AZ" },
    StateInfo { name: "Arkansas", abbr: "AR" },
    StateInfo { name: "California", abbr: "CA" },
    StateInfo { name: "Colorado", abbr: "CO" },
    StateInfo { name: "Connecticut", abbr: "CT" },
    StateInfo { name: "Delaware", abbr: "DE" },
    StateInfo { name: "District of Columbia", abbr: "DC" },
    StateInfo { name: "Florida", abbr: "FL" },
    StateInfo { name: "Georgia", abbr: "GA" },
    StateInfo { name: "Hawaii", abbr: "HI" },
    StateInfo { name: "Idaho", abbr: "ID" },
    StateInfo { name: "Illinois", abbr: "IL" },
    StateInfo { name: "Indiana", abbr: "IN" },
    StateInfo { name: "Iowa", abbr: "IA" },
    StateInfo { name: "Kansas", abbr: "KS" },
    StateInfo { name: "Kentucky", abbr: "KY" },
    StateInfo { name: "Louisiana", abbr: "LA" },
    StateInfo { name: "Maine", abbr: "ME" },
    StateInfo { name: "Maryland", abbr: "MD" },
    StateInfo { name: "Massachusetts", abbr: "MA" },
    StateInfo { name: "Michigan", abbr: "MI" },
    StateInfo { name: "Minnesota", abbr: "MN" },
    StateInfo { name: "Mississippi", abbr: "MS" },
    StateInfo { name: "Missouri", abbr: "MO" },
    StateInfo { name: "Montana", abbr: "MT" },
    StateInfo { name: "Nebraska", abbr: "NE" },
    StateInfo { name: "Nevada", abbr: "NV" },
    StateInfo { name: "New Hampshire", abbr: "NH" },
    StateInfo { name: "New Jersey", abbr: "NJ" },
    StateInfo { name: "New Mexico", abbr: "NM" },
    StateInfo { name: "New York", abbr: "NY" },
    StateInfo { name: "North Carolina", abbr: "NC" },
    StateInfo { name: "North Dakota", abbr: "ND" },
    StateInfo { name: "Ohio", abbr: "OH" },
    StateInfo { name: "Oklahoma", abbr: "OK" },
    StateInfo { name: "Oregon", abbr: "OR" },
    StateInfo { name: "Pennsylvania", abbr: "PA" },
    StateInfo { name: "Rhode Island", abbr: "RI" },
    StateInfo { name: "South Carolina", abbr: "SC" },
    StateInfo { name: "South Dakota", abbr: "SD" },
    StateInfo { name: "Tennessee", abbr: "TN" },
    StateInfo { name: "Texas", abbr: "TX" },
    StateInfo { name: "Utah", abbr: "UT" },
    StateInfo { name: "Vermont", abbr: "VT" },
    StateInfo { name: "Virginia", abbr: "VA" },
    StateInfo { name: "Washington", abbr: "WA" },
    StateInfo { name: "West Virginia", abbr: "WV" },
    StateInfo { name: "Wisconsin", abbr: "WI" },
    StateInfo { name: "Wyoming", abbr: "WY" },
];

#[rustfmt::skip]
const COUNTRIES: &[CountryInfo] = &[
    CountryInfo {
        name: "United States",
        iso2: "US",
        iso3: "USA",
        aliases: &[
            "united states of america",
            "u.s.",
            "u.s.a.",
            "us",
            "usa",
            "america",
        ],
    },
    CountryInfo {
        name: "United Kingdom",
        iso2: "GB",
        iso3: "GBR",
        aliases: &[
            "uk",
            "u.k.",
            "great britain",
            "britain",
            "england",
            "scotland",
            "wales",
            "northern ireland",
        ],
    },
    CountryInfo { name: "Canada", iso2: "CA", iso3: "CAN", aliases: &[] },
    CountryInfo { name: "Mexico", iso2: "MX", iso3: "MEX", aliases: &["méxico"] },
    CountryInfo { name: "Brazil", iso2: "BR", iso3: "BRA", aliases: &["brasil"] },
    CountryInfo { name: "Argentina", iso2: "AR", iso3: "ARG", aliases: &[] },
    CountryInfo { name: "Chile", iso2: "CL", iso3: "CHL", aliases: &[] },
    CountryInfo { name: "Colombia", iso2: "CO", iso3: "COL", aliases: &[] },
    CountryInfo { name: "Peru", iso2: "PE", iso3: "PER", aliases: &[] },
    CountryInfo { name: "Uruguay", iso2: "UY", iso3: "URY", aliases: &[] },
    CountryInfo { name: "Costa Rica", iso2: "CR", iso3: "CRI", aliases: &[] },
    CountryInfo { name: "Puerto Rico", iso2: "PR", iso3: "PRI", aliases: &[] },
    CountryInfo { name: "Dominican Republic", iso2: "DO", iso3: "DOM", aliases: &[] },
    CountryInfo { name: "Ireland", iso2: "IE", iso3: "IRL", aliases: &["eire"] },
    CountryInfo { name: "France", iso2: "FR", iso3: "FRA", aliases: &[] },
    CountryInfo { name: "Germany", iso2: "DE", iso3: "DEU", aliases: &["deutschland"] },
    CountryInfo { name: "Spain", iso2: "ES", iso3: "ESP", aliases: &["españa", "espana"] },
    CountryInfo { name: "Portugal", iso2: "PT", iso3: "PRT", aliases: &[] },
    CountryInfo { name: "Italy", iso2: "IT", iso3: "ITA", aliases: &["italia"] },
    CountryInfo {
        name: "Netherlands",
        iso2: "NL",
        iso3: "NLD",
        aliases: &["the netherlands", "holland"],
    },
    CountryInfo { name: "Belgium", iso2: "BE", iso3: "BEL", aliases: &[] },
    CountryInfo { name: "Luxembourg", iso2: "LU", iso3: "LUX", aliases: &[] },
    CountryInfo { name: "Switzerland", iso2: "CH", iso3: "CHE", aliases: &[] },
    CountryInfo { name: "Austria", iso2: "AT", iso3: "AUT", aliases: &[] },
    CountryInfo { name: "Denmark", iso2: "DK", iso3: "DNK", aliases: &[] },
    CountryInfo { name: "Sweden", iso2: "SE", iso3: "SWE", aliases: &[] },
    CountryInfo { name: "Norway", iso2: "NO", iso3: "NOR", aliases: &[] },
    CountryInfo { name: "Finland", iso2: "FI", iso3: "FIN", aliases: &[] },
    CountryInfo { name: "Iceland", iso2: "IS", iso3: "ISL", aliases: &[] },
    CountryInfo { name: "Poland", iso2: "PL", iso3: "POL", aliases: &[] },
    CountryInfo { name: "Czechia", iso2: "CZ", iso3: "CZE", aliases: &["czech republic"] },
    CountryInfo { name: "Slovakia", iso2: "SK", iso3: "SVK", aliases: &[] },
    CountryInfo { name: "Hungary", iso2: "HU", iso3: "HUN", aliases: &[] },
    CountryInfo { name: "Romania", iso2: "RO", iso3: "ROU", aliases: &[] },
    CountryInfo { name: "Bulgaria", iso2: "BG", iso3: "BGR", aliases: &[] },
    CountryInfo { name: "Greece", iso2: "GR", iso3: "GRC", aliases: &[] },
    CountryInfo { name: "Croatia", iso2: "HR", iso3: "HRV", aliases: &[] },
    CountryInfo { name: "Serbia", iso2: "RS", iso3: "SRB", aliases: &[] },
    CountryInfo { name: "Ukraine", iso2: "UA", iso3: "UKR", aliases: &[] },
    CountryInfo { name: "Estonia", iso2: "EE", iso3: "EST", aliases: &[] },
    CountryInfo { name: "Latvia", iso2: "LV", iso3: "LVA", aliases: &[] },
    CountryInfo { name: "Lithuania", iso2: "LT", iso3: "LTU", aliases: &[] },
    CountryInfo { name: "Turkey", iso2: "TR", iso3: "TUR", aliases: &["türkiye", "turkiye"] },
    CountryInfo { name: "Israel", iso2: "IL", iso3: "ISR", aliases: &[] },
    CountryInfo {
        name: "United Arab Emirates",
        iso2: "AE",
        iso3: "ARE",
        aliases: &["uae", "emirates"],
    },
    CountryInfo { name: "Saudi Arabia", iso2: "SA", iso3: "SAU", aliases: &[] },
    CountryInfo { name: "Egypt", iso2: "EG", iso3: "EGY", aliases: &[] },
    CountryInfo { name: "Nigeria", iso2: "NG", iso3: "NGA", aliases: &[] },
    CountryInfo { name: "Kenya", iso2: "KE", iso3: "KEN", aliases: &[] },
    CountryInfo { name: "South Africa", iso2: "ZA", iso3: "ZAF", aliases: &[] },
    CountryInfo { name: "Morocco", iso2: "MA", iso3: "MAR", aliases: &[] },
    CountryInfo { name: "India", iso2: "IN", iso3: "IND", aliases: &["bharat"] },
    CountryInfo { name: "Pakistan", iso2: "PK", iso3: "PAK", aliases: &[] },
    CountryInfo { name: "Bangladesh", iso2: "BD", iso3: "BGD", aliases: &[] },
    CountryInfo { name: "Sri Lanka", iso2: "LK", iso3: "LKA", aliases: &[] },
    CountryInfo { name: "China", iso2: "CN", iso3: "CHN", aliases: &["prc"] },
    CountryInfo { name: "Hong Kong", iso2: "HK", iso3: "HKG", aliases: &[] },
    CountryInfo { name: "Taiwan", iso2: "TW", iso3: "TWN", aliases: &[] },
    CountryInfo { name: "Japan", iso2: "JP", iso3: "JPN", aliases: &[] },
    CountryInfo {
        name: "South Korea",
        iso2: "KR",
        iso3: "KOR",
        aliases: &["korea", "republic of korea"],
    },
    CountryInfo { name: "Singapore", iso2: "SG", iso3: "SGP", aliases: &[] },
    CountryInfo { name: "Malaysia", iso2: "MY", iso3: "MYS", aliases: &[] },
    CountryInfo { name: "Indonesia", iso2: "ID", iso3: "IDN", aliases: &[] },
    CountryInfo { name: "Philippines", iso2: "PH", iso3: "PHL", aliases: &[] },
    CountryInfo { name: "Thailand", iso2: "TH", iso3: "THA", aliases: &[] },
    CountryInfo { name: "Vietnam", iso2: "VN", iso3: "VNM", aliases: &["viet nam"] },
    CountryInfo { name: "Australia", iso2: "AU", iso3: "AUS", aliases: &[] },
    CountryInfo { name: "New Zealand", iso2: "NZ", iso3: "NZL", aliases: &[] },
];

/// Ordered: the first region whose name is a substring of the term wins.
const REGIONS: &[RegionDefinition] = &[
    RegionDefinition {
        name: "silicon valley",
        member_cities: &[
            "Palo Alto",
            "Mountain View",
            "Sunnyvale",
            "Cupertino",
            "Menlo Park",
            "Campbell",
            "Milpitas",
            "Saratoga",
        ],
    },
    RegionDefinition {
        name: "bay area",
        member_cities: &[
            "San Francisco",
            "Oakland",
            "San Jose",
            "Berkeley",
            "Palo Alto",
            "Mountain View",
            "Sunnyvale",
            "Santa Clara",
            "Cupertino",
            "Fremont",
            "Hayward",
            "Redwood City",
            "San Mateo",
            "Menlo Park",
            "Walnut Creek",
            "Daly City",
            "Emeryville",
            "Pleasanton",
            "Milpitas",
        ],
    },
    RegionDefinition {
        name: "nyc metro",
        member_cities: &[
            "New York City",
            "Manhattan",
            "Brooklyn",
            "Queens",
            "Bronx",
            "Staten Island",
            "Newark",
            "Jersey City",
            "Hoboken",
            "Yonkers",
            "White Plains",
            "Stamford",
        ],
    },
    RegionDefinition {
        name: "tri-state area",
        member_cities: &[
            "New York City",
            "Manhattan",
            "Brooklyn",
            "Queens",
            "Newark",
            "Jersey City",
            "Hoboken",
            "Stamford",
            "Greenwich",
        ],
    },
    RegionDefinition {
        name: "greater boston",
        member_cities: &[
            "Boston",
            "Cambridge",
            "Somerville",
            "Brookline",
            "Newton",
            "Waltham",
            "Quincy",
        ],
    },
    RegionDefinition {
        name: "dc metro",
        member_cities: &[
            "Washington, DC",
            "Arlington",
            "Alexandria",
            "Bethesda",
            "Silver Spring",
            "Reston",
            "Tysons",
        ],
    },
    RegionDefinition {
        name: "greater seattle",
        member_cities: &["Seattle", "Bellevue", "Redmond", "Kirkland", "Tacoma", "Everett"],
    },
    RegionDefinition {
        name: "greater los angeles",
        member_cities: &[
            "Los Angeles",
            "Santa Monica",
            "Pasadena",
            "Burbank",
            "Culver City",
            "Long Beach",
            "Irvine",
        ],
    },
    RegionDefinition {
        name: "chicagoland",
        member_cities: &["Chicago", "Evanston", "Naperville", "Schaumburg", "Oak Park"],
    },
    RegionDefinition {
        name: "research triangle",
        member_cities: &["Raleigh", "Durham", "Chapel Hill", "Cary", "Morrisville"],
    },
    RegionDefinition {
        name: "twin cities",
        member_cities: &["Minneapolis", "Saint Paul", "Bloomington", "Eden Prairie"],
    },
    RegionDefinition {
        name: "dfw",
        member_cities: &["Dallas", "Fort Worth", "Plano", "Irving", "Arlington", "Frisco"],
    },
];

/// NANP area code -> coarse place description.
#[rustfmt::skip]
const AREA_CODES: &[(&str, &str)] = &[
    ("201", "Jersey City, New Jersey"),
    ("202", "Washington, District of Columbia"),
    ("203", "New Haven, Connecticut"),
    ("205", "Birmingham, Alabama"),
    ("206", "Seattle, Washington"),
    ("207", "Portland, Maine"),
    ("208", "Boise, Idaho"),
    ("210", "San Antonio, Texas"),
    ("212", "New York, New York"),
    ("213", "Los Angeles, California"),
    ("214", "Dallas, Texas"),
    ("215", "Philadelphia, Pennsylvania"),
    ("216", "Cleveland, Ohio"),
    ("217", "Springfield, Illinois"),
    ("248", "Troy, Michigan"),
    ("253", "Tacoma, Washington"),
    ("267", "Philadelphia, Pennsylvania"),
    ("281", "Houston, Texas"),
    ("301", "Bethesda, Maryland"),
    ("302", "Wilmington, Delaware"),
    ("303", "Denver, Colorado"),
    ("304", "Charleston, West Virginia"),
    ("305", "Miami, Florida"),
    ("307", "Cheyenne, Wyoming"),
    ("310", "Santa Monica, California"),
    ("312", "Chicago, Illinois"),
    ("313", "Detroit, Michigan"),
    ("314", "St. Louis, Missouri"),
    ("317", "Indianapolis, Indiana"),
    ("323", "Los Angeles, California"),
    ("332", "New York, New York"),
    ("336", "Greensboro, North Carolina"),
    ("346", "Houston, Texas"),
    ("347", "New York, New York"),
    ("385", "Salt Lake City, Utah"),
    ("401", "Providence, Rhode Island"),
    ("402", "Omaha, Nebraska"),
    ("404", "Atlanta, Georgia"),
    ("405", "Oklahoma City, Oklahoma"),
    ("406", "Billings, Montana"),
    ("407", "Orlando, Florida"),
    ("408", "San Jose, California"),
    ("410", "Baltimore, Maryland"),
    ("412", "Pittsburgh, Pennsylvania"),
    ("414", "Milwaukee, Wisconsin"),
    ("415", "San Francisco, California"),
    ("425", "Bellevue, Washington"),
    ("432", "Midland, Texas"),
    ("469", "Dallas, Texas"),
    ("470", "Atlanta, Georgia"),
    ("480", "Scottsdale, Arizona"),
    ("501", "Little Rock, Arkansas"),
    ("502", "Louisville, Kentucky"),
    ("503", "Portland, Oregon"),
    ("504", "New Orleans, Louisiana"),
    ("505", "Albuquerque, New Mexico"),
    ("510", "Oakland, California"),
    ("512", "Austin, Texas"),
    ("513", "Cincinnati, Ohio"),
    ("515", "Des Moines, Iowa"),
    ("516", "Hempstead, New York"),
    ("518", "Albany, New York"),
    ("520", "Tucson, Arizona"),
    ("601", "Jackson, Mississippi"),
    ("602", "Phoenix, Arizona"),
    ("603", "Manchester, New Hampshire"),
    ("605", "Sioux Falls, South Dakota"),
    ("608", "Madison, Wisconsin"),
    ("612", "Minneapolis, Minnesota"),
    ("614", "Columbus, Ohio"),
    ("615", "Nashville, Tennessee"),
    ("617", "Boston, Massachusetts"),
    ("619", "San Diego, California"),
    ("626", "Pasadena, California"),
    ("628", "San Francisco, California"),
    ("630", "Naperville, Illinois"),
    ("646", "New York, New York"),
    ("650", "Palo Alto, California"),
    ("651", "Saint Paul, Minnesota"),
    ("667", "Baltimore, Maryland"),
    ("669", "San Jose, California"),
    ("678", "Atlanta, Georgia"),
    ("701", "Fargo, North Dakota"),
    ("702", "Las Vegas, Nevada"),
    ("703", "Arlington, Virginia"),
    ("704", "Charlotte, North Carolina"),
    ("707", "Santa Rosa, California"),
    ("708", "Cicero, Illinois"),
    ("713", "Houston, Texas"),
    ("714", "Anaheim, California"),
    ("716", "Buffalo, New York"),
    ("718", "New York, New York"),
    ("720", "Denver, Colorado"),
    ("725", "Las Vegas, Nevada"),
    ("732", "New Brunswick, New Jersey"),
    ("737", "Austin, Texas"),
    ("747", "Burbank, California"),
    ("754", "Fort Lauderdale, Florida"),
    ("757", "Virginia Beach, Virginia"),
    ("770", "Atlanta, Georgia"),
    ("773", "Chicago, Illinois"),
    ("774", "Worcester, Massachusetts"),
    ("781", "Waltham, Massachusetts"),
    ("786", "Miami, Florida"),
    ("801", "Salt Lake City, Utah"),
    ("802", "Burlington, Vermont"),
    ("804", "Richmond, Virginia"),
    ("808", "Honolulu, Hawaii"),
    ("813", "Tampa, Florida"),
    ("816", "Kansas City, Missouri"),
    ("817", "Fort Worth, Texas"),
    ("818", "Burbank, California"),
    ("832", "Houston, Texas"),
    ("843", "Charleston, South Carolina"),
    ("857", "Boston, Massachusetts"),
    ("858", "San Diego, California"),
    ("862", "Newark, New Jersey"),
    ("901", "Memphis, Tennessee"),
    ("904", "Jacksonville, Florida"),
    ("907", "Anchorage, Alaska"),
    ("913", "Overland Park, Kansas"),
    ("916", "Sacramento, California"),
    ("917", "New York, New York"),
    ("919", "Raleigh, North Carolina"),
    ("925", "Walnut Creek, California"),
    ("929", "New York, New York"),
    ("949", "Irvine, California"),
    ("954", "Fort Lauderdale, Florida"),
    ("971", "Portland, Oregon"),
    ("972", "Dallas, Texas"),
    ("973", "Newark, New Jersey"),
    ("978", "Lowell, Massachusetts"),
    // Canada (NANP)
    ("416", "Toronto, Ontario, Canada"),
    ("437", "Toronto, Ontario, Canada"),
    ("514", "Montreal, Quebec, Canada"),
    ("604", "Vancouver, British Columbia, Canada"),
    ("613", "Ottawa, Ontario, Canada"),
    ("647", "Toronto, Ontario, Canada"),
    ("778", "Vancouver, British Columbia, Canada"),
    ("403", "Calgary, Alberta, Canada"),
];

static STATE_INDEX: OnceLock<HashMap<String, &'static StateInfo>> = OnceLock::new();
static COUNTRY_INDEX: OnceLock<HashMap<String, &'static CountryInfo>> = OnceLock::new();
static AREA_CODE_INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn state_index() -> &'static HashMap<String, &'static StateInfo> {
    STATE_INDEX.get_or_init(|| {
        let mut map = HashMap::with_capacity(STATES.len() * 2);
        for state in STATES {
            map.insert(state.name.to_lowercase(), state);
            map.insert(state.abbr.to_lowercase(), state);
        }
        map
    })
}

fn country_index() -> &'static HashMap<String, &'static CountryInfo> {
    COUNTRY_INDEX.get_or_init(|| {
        let mut map = HashMap::new();
        for country in COUNTRIES {
            map.insert(country.name.to_lowercase(), country);
            map.insert(country.iso2.to_lowercase(), country);
            map.insert(country.iso3.to_lowercase(), country);
            for alias in country.aliases {
                map.insert(alias.to_string(), country);
            }
        }
        map
    })
}

fn area_code_index() -> &'static HashMap<&'static str, &'static str> {
    AREA_CODE_INDEX.get_or_init(|| AREA_CODES.iter().copied().collect())
}

/// State by full name or two-letter abbreviation, case-insensitive.
pub fn lookup_state(token: &str) -> Option<&'static StateInfo> {
    state_index().get(&token.trim().to_lowercase()).copied()
}

/// Country by short name, alias, ISO2 or ISO3 code, case-insensitive.
pub fn lookup_country_exact(token: &str) -> Option<&'static CountryInfo> {
    country_index().get(&token.trim().to_lowercase()).copied()
}

/// Countries in table order, for prefix lookups.
pub fn countries() -> &'static [CountryInfo] {
    COUNTRIES
}

pub fn regions() -> &'static [RegionDefinition] {
    REGIONS
}

/// Coarse place for a three-digit NANP area code.
pub fn lookup_area_code(area_code: &str) -> Option<&'static str> {
    area_code_index().get(area_code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lookup_by_name_and_abbr() {
        assert_eq!(lookup_state("california").map(|s| s.abbr), Some("CA"));
        assert_eq!(lookup_state("TX").map(|s| s.name), Some("Texas"));
        assert_eq!(lookup_state("wa").map(|s| s.name), Some("Washington"));
        assert!(lookup_state("Ontario").is_none());
    }

    #[test]
    fn test_country_lookup_aliases_and_codes() {
        assert_eq!(lookup_country_exact("USA").map(|c| c.name), Some("United States"));
        assert_eq!(lookup_country_exact("uk").map(|c| c.iso3), Some("GBR"));
        assert_eq!(lookup_country_exact("DEU").map(|c| c.name), Some("Germany"));
        assert_eq!(lookup_country_exact("Canada").map(|c| c.iso2), Some("CA"));
        assert!(lookup_country_exact("Springfield").is_none());
    }

    #[test]
    fn test_area_codes() {
        assert_eq!(lookup_area_code("415"), Some("San Francisco, California"));
        assert_eq!(lookup_area_code("512"), Some("Austin, Texas"));
        assert!(lookup_area_code("999").is_none());
    }

    #[test]
    fn test_region_names_are_lowercase() {
        for region in regions() {
            assert_eq!(region.name, region.name.to_lowercase());
            assert!(region.member_cities.len() > 1, "{} has one member", region.name);
        }
    }
}
