//! Shared test utilities and fixtures for record parser tests

use chrono::NaiveDate;

pub mod layout_tests;

/// Capture date used across parser tests
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// A small village export with names already normalized
pub const VILLAGE_PAYLOAD: &str = "\
1,Barbarian village,469,696,0,96
2,Aldeia do Bárbaro,470,696,101,26
3,Capital,471,697,101,9800
";

/// An offense ranking export
pub const OFFENSE_PAYLOAD: &str = "\
1150,351544,53328
1151,351545,53000
";
