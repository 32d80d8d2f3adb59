mod common;

use assert_matches::assert_matches;

use groupie_catalog::domain::Endpoint;
use groupie_catalog::error::CatalogError;
use groupie_catalog::join::build_catalog;

use common::FixtureSource;

#[test]
fn join_keeps_every_primary_artist_in_order() {
    let source = FixtureSource::new();
    let artists = build_catalog(&source).unwrap();

    let ids: Vec<i64> = artists.iter().map(|artist| artist.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(
        source.calls(),
        vec![
            Endpoint::Artists,
            Endpoint::Locations,
            Endpoint::Dates,
            Endpoint::Relation
        ]
    );
}

#[test]
fn join_attaches_auxiliary_data_by_id() {
    let artists = build_catalog(&FixtureSource::new()).unwrap();
    let queen = &artists[0];

    assert_eq!(queen.name, "Queen");
    assert_eq!(
        queen.locations,
        vec!["north_carolina-usa", "georgia-usa", "saitama-japan", "osaka-japan"]
    );
    assert_eq!(
        queen.concert_dates,
        vec!["23-08-2019", "22-08-2019", "20-08-2019", "28-01-2020"]
    );
    assert_eq!(queen.dates_locations.len(), 4);
    assert_eq!(queen.dates_locations["osaka-japan"], vec!["28-01-2020"]);
}

#[test]
fn join_cleans_concert_dates() {
    let artists = build_catalog(&FixtureSource::new()).unwrap();
    let abba = &artists[1];
    assert_eq!(abba.concert_dates, vec!["12-05-1979", "01-11-1979"]);
}

#[test]
fn join_leaves_relation_dates_raw() {
    let artists = build_catalog(&FixtureSource::new()).unwrap();
    let abba = &artists[1];
    assert_eq!(abba.dates_locations["london-uk"], vec!["*01-11-1979"]);
}

#[test]
fn artist_missing_from_indexes_gets_empty_fields() {
    let artists = build_catalog(&FixtureSource::new()).unwrap();
    let soja = &artists[3];

    assert_eq!(soja.id, 4);
    assert!(soja.locations.is_empty());
    assert!(soja.concert_dates.is_empty());
    assert!(soja.dates_locations.is_empty());
}

#[test]
fn index_entries_without_artist_are_ignored() {
    let artists = build_catalog(&FixtureSource::new()).unwrap();
    assert!(artists.iter().all(|artist| artist.id != 99));
    assert!(
        artists
            .iter()
            .all(|artist| !artist.locations.contains(&"nowhere-atlantis".to_string()))
    );
}

#[test]
fn duplicate_index_id_uses_last_entry() {
    let source = FixtureSource::new();
    source.set_payload(
        Endpoint::Locations,
        r#"{"index":[{"id":1,"locations":["first-x"]},{"id":1,"locations":["second-y"]}]}"#,
    );
    let artists = build_catalog(&source).unwrap();
    assert_eq!(artists[0].locations, vec!["second-y"]);
}

#[test]
fn any_failed_fetch_aborts_the_build() {
    for endpoint in Endpoint::ALL {
        let source = FixtureSource::new();
        source.fail_on(Some(endpoint));
        let err = build_catalog(&source).unwrap_err();
        assert_matches!(err, CatalogError::Status { status: 503, .. });
        assert_eq!(err.endpoint(), Some(endpoint));
        assert_eq!(source.calls().last(), Some(&endpoint));
    }
}

#[test]
fn malformed_payload_is_a_decode_error() {
    let source = FixtureSource::new();
    source.set_payload(Endpoint::Dates, r#"{"index": "nope"}"#);
    let err = build_catalog(&source).unwrap_err();
    assert_matches!(
        err,
        CatalogError::Decode {
            endpoint: Endpoint::Dates,
            ..
        }
    );
    assert!(err.is_retryable());
}

#[test]
fn empty_primary_list_gives_empty_catalog() {
    let source = FixtureSource::new();
    source.set_payload(Endpoint::Artists, "[]");
    let artists = build_catalog(&source).unwrap();
    assert!(artists.is_empty());
}
