//! Region code derivation and display names
//!
//! World codes carry their region as a two-letter prefix ("pts1" is a
//! Portuguese special world, "de99" a German one). The prefix is looked up
//! against a fixed ISO 3166 alpha-2 table; codes without a listed region
//! simply yield no name rather than failing the whole server table.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading two-letter prefix of a world code
static REGION_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-zA-Z]{2})").unwrap());

/// Derive the uppercased region code from a world code
///
/// Returns `None` when the code does not start with two ASCII letters.
pub fn region_code(server_code: &str) -> Option<String> {
    REGION_PREFIX
        .captures(server_code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// English display name for an ISO 3166 alpha-2 region code
///
/// Covers the regions the game operates portals in plus nearby markets.
/// Unknown codes return `None`.
pub fn region_display_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "AE" => "United Arab Emirates",
        "AT" => "Austria",
        "AU" => "Australia",
        "BA" => "Bosnia and Herzegovina",
        "BE" => "Belgium",
        "BG" => "Bulgaria",
        "BR" => "Brazil",
        "CA" => "Canada",
        "CH" => "Switzerland",
        "CZ" => "Czechia",
        "DE" => "Germany",
        "DK" => "Denmark",
        "EE" => "Estonia",
        "ES" => "Spain",
        "FI" => "Finland",
        "FR" => "France",
        "GB" => "United Kingdom",
        "GR" => "Greece",
        "HR" => "Croatia",
        "HU" => "Hungary",
        "IT" => "Italy",
        "LT" => "Lithuania",
        "LV" => "Latvia",
        "MX" => "Mexico",
        "NL" => "Netherlands",
        "NO" => "Norway",
        "PL" => "Poland",
        "PT" => "Portugal",
        "RO" => "Romania",
        "RS" => "Serbia",
        "RU" => "Russian Federation",
        "SE" => "Sweden",
        "SI" => "Slovenia",
        "SK" => "Slovakia",
        "TR" => "Turkey",
        "UA" => "Ukraine",
        "US" => "United States",
        _ => return None,
    };
    Some(name)
}
