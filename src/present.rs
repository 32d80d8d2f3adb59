//! Display-ready views derived from joined artists.
//!
//! Everything here is a pure function of its input and never touches the
//! catalog store.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::join::clean_dates;

/// Concert dates for one location of one artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationGroup {
    pub raw: String,
    pub label: String,
    pub dates: Vec<String>,
    pub count: usize,
}

/// Groups an artist's relation map by location, sorted by display label.
///
/// Ties between labels keep the order of the raw keys.
pub fn group_by_location(dates_locations: &BTreeMap<String, Vec<String>>) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = dates_locations
        .iter()
        .map(|(location, dates)| {
            let dates = clean_dates(dates);
            LocationGroup {
                raw: location.clone(),
                label: format_location(location),
                count: dates.len(),
                dates,
            }
        })
        .collect();
    groups.sort_by(|a, b| a.label.cmp(&b.label));
    groups
}

/// `new_york-usa` becomes `New York (USA)`, `paris` becomes `Paris`.
///
/// Only the first two `-` segments are used.
pub fn format_location(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let mut parts = raw.split('-');
    let city = title_case(&parts.next().unwrap_or_default().replace('_', " "));
    match parts.next() {
        Some(country) => format!("{city} ({})", country.replace('_', " ").to_uppercase()),
        None => city,
    }
}

/// Rewrites `YYYY-MM-DD` shaped values as `YYYY/MM/DD`.
pub fn format_date(value: &str) -> String {
    let parts: Vec<&str> = value.split('-').collect();
    match parts.as_slice() {
        [a, b, c] => format!("{a}/{b}/{c}"),
        _ => value.to_string(),
    }
}

/// Upper-cases the first character of every word and lower-cases the rest.
///
/// Runs of whitespace separate words and collapse to a single space.
/// Acronyms are not preserved: `LA` becomes `La`.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut word: String = first.to_uppercase().collect();
                    word.push_str(&chars.as_str().to_lowercase());
                    word
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn members_label(members: &[String]) -> String {
    members.join(", ")
}
