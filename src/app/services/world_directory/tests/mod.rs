//! Tests for the world directory service

pub mod directory_tests;

/// Directory payload in the portal's serialized form, announcing two worlds
pub const DIRECTORY_PAYLOAD: &str = concat!(
    r#"a:2:{s:4:"pts1";s:30:"https://pts1.tribalwars.com.pt";"#,
    r#"s:4:"pt92";s:30:"https://pt92.tribalwars.com.pt";}"#
);
