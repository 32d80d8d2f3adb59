use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::{Artist, DatesIndex, LocationsIndex, RelationsIndex, RemoteArtist};
use crate::error::CatalogError;
use crate::source::CatalogSource;

/// Runs the fetch half of a refresh cycle and joins the results.
///
/// The four fetches run in order and the first failure aborts the cycle, so a
/// caller either gets a complete catalog or an error, never a partial one.
pub fn build_catalog<S: CatalogSource + ?Sized>(source: &S) -> Result<Vec<Artist>, CatalogError> {
    let artists = source.fetch_artists()?;
    let locations = source.fetch_locations()?;
    let dates = source.fetch_dates()?;
    let relations = source.fetch_relations()?;
    Ok(join_artists(artists, locations, dates, relations))
}

/// Attaches auxiliary data to every primary artist, keeping primary order.
///
/// Ids missing from an index get empty fields. Index entries whose id is not
/// in the primary list are dropped. When an index repeats an id, the last
/// entry wins.
pub fn join_artists(
    artists: Vec<RemoteArtist>,
    locations: LocationsIndex,
    dates: DatesIndex,
    relations: RelationsIndex,
) -> Vec<Artist> {
    let location_map: HashMap<i64, Vec<String>> = locations
        .index
        .into_iter()
        .map(|entry| (entry.id, entry.locations))
        .collect();
    let date_map: HashMap<i64, Vec<String>> = dates
        .index
        .into_iter()
        .map(|entry| (entry.id, entry.dates))
        .collect();
    let relation_map: HashMap<i64, BTreeMap<String, Vec<String>>> = relations
        .index
        .into_iter()
        .map(|entry| (entry.id, entry.dates_locations))
        .collect();

    log_orphans(&artists, &location_map, &date_map, &relation_map);

    artists
        .into_iter()
        .map(|remote| {
            let id = remote.id;
            let locations = location_map.get(&id);
            let dates = date_map.get(&id);
            let relations = relation_map.get(&id);
            if locations.is_none() || dates.is_none() || relations.is_none() {
                tracing::debug!(id, name = %remote.name, "artist missing auxiliary data");
            }
            Artist::from_remote(
                remote,
                locations.cloned().unwrap_or_default(),
                dates.map(|dates| clean_dates(dates)).unwrap_or_default(),
                relations.cloned().unwrap_or_default(),
            )
        })
        .collect()
}

/// Trims each date, strips one leading `*` marker and drops empty entries.
pub fn clean_dates<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|value| {
            let trimmed = value.as_ref().trim();
            trimmed.strip_prefix('*').unwrap_or(trimmed)
        })
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn log_orphans(
    artists: &[RemoteArtist],
    locations: &HashMap<i64, Vec<String>>,
    dates: &HashMap<i64, Vec<String>>,
    relations: &HashMap<i64, BTreeMap<String, Vec<String>>>,
) {
    let known: HashSet<i64> = artists.iter().map(|artist| artist.id).collect();
    let orphans = locations
        .keys()
        .chain(dates.keys())
        .chain(relations.keys())
        .filter(|id| !known.contains(id))
        .collect::<HashSet<_>>();
    if !orphans.is_empty() {
        tracing::debug!(count = orphans.len(), "ignoring index entries without a primary artist");
    }
}
