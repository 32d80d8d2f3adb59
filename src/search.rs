use crate::domain::Artist;

/// Keeps the artists matching `query`, in their original order.
///
/// A blank query returns `artists` as given. Otherwise the trimmed query is
/// matched case-insensitively as a substring of the name, any member, the
/// formation year, the first album or any location.
pub fn filter(artists: Vec<Artist>, query: &str) -> Vec<Artist> {
    let needle = query.trim();
    if needle.is_empty() {
        return artists;
    }
    let needle = needle.to_lowercase();
    artists
        .into_iter()
        .filter(|artist| matches(artist, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches(artist: &Artist, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);

    contains(&artist.name)
        || artist.members.iter().any(|member| contains(member))
        || artist.creation_date.to_string().contains(needle)
        || contains(&artist.first_album)
        || artist.locations.iter().any(|location| contains(location))
}
