use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four remote resources a refresh cycle reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Artists,
    Locations,
    Dates,
    Relation,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Artists,
        Endpoint::Locations,
        Endpoint::Dates,
        Endpoint::Relation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Artists => "artists",
            Endpoint::Locations => "locations",
            Endpoint::Dates => "dates",
            Endpoint::Relation => "relation",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An artist as served by the primary endpoint, before any join.
///
/// The payload also carries `locations`, `concertDates` and `relations` URLs;
/// they point at per-artist views of the index endpoints and are not read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteArtist {
    pub id: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub creation_date: i64,
    #[serde(default)]
    pub first_album: String,
}

/// A fully joined catalog entry.
///
/// Only the join produces this type, so every `Artist` a reader sees carries
/// its auxiliary data; ids missing from an index get empty containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    pub creation_date: i64,
    pub first_album: String,
    pub locations: Vec<String>,
    pub concert_dates: Vec<String>,
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

impl Artist {
    pub fn from_remote(
        remote: RemoteArtist,
        locations: Vec<String>,
        concert_dates: Vec<String>,
        dates_locations: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            id: remote.id,
            image: remote.image,
            name: remote.name,
            members: remote.members,
            creation_date: remote.creation_date,
            first_album: remote.first_album,
            locations,
            concert_dates,
            dates_locations,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsIndex {
    #[serde(default)]
    pub index: Vec<LocationsEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsEntry {
    pub id: i64,
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatesIndex {
    #[serde(default)]
    pub index: Vec<DatesEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatesEntry {
    pub id: i64,
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelationsIndex {
    #[serde(default)]
    pub index: Vec<RelationsEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationsEntry {
    pub id: i64,
    #[serde(default)]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_artist_ignores_url_fields() {
        let raw = r#"{
            "id": 1,
            "image": "https://example.test/queen.jpeg",
            "name": "Queen",
            "members": ["Freddie Mercury", "Brian May"],
            "creationDate": 1970,
            "firstAlbum": "14-12-1973",
            "locations": "https://example.test/api/locations/1",
            "concertDates": "https://example.test/api/dates/1",
            "relations": "https://example.test/api/relation/1"
        }"#;
        let artist: RemoteArtist = serde_json::from_str(raw).unwrap();
        assert_eq!(artist.id, 1);
        assert_eq!(artist.creation_date, 1970);
        assert_eq!(artist.first_album, "14-12-1973");
        assert_eq!(artist.members.len(), 2);
    }

    #[test]
    fn relations_entry_reads_camel_case_map() {
        let raw = r#"{"index":[{"id":3,"datesLocations":{"paris-france":["01-01-2020"]}}]}"#;
        let payload: RelationsIndex = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.index[0].id, 3);
        assert_eq!(
            payload.index[0].dates_locations["paris-france"],
            vec!["01-01-2020".to_string()]
        );
    }

    #[test]
    fn endpoint_display() {
        assert_eq!(Endpoint::Relation.to_string(), "relation");
        assert_eq!(Endpoint::ALL.len(), 4);
    }
}
