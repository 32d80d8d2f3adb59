#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use groupie_catalog::domain::{DatesIndex, Endpoint, LocationsIndex, RelationsIndex, RemoteArtist};
use groupie_catalog::error::CatalogError;
use groupie_catalog::source::CatalogSource;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).unwrap()
}

/// Serves JSON fixtures per endpoint; payloads and failures can be swapped
/// between refreshes.
pub struct FixtureSource {
    payloads: Mutex<HashMap<Endpoint, String>>,
    failing: Mutex<Option<Endpoint>>,
    calls: Mutex<Vec<Endpoint>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        let payloads = HashMap::from([
            (Endpoint::Artists, fixture("artists.json")),
            (Endpoint::Locations, fixture("locations.json")),
            (Endpoint::Dates, fixture("dates.json")),
            (Endpoint::Relation, fixture("relation.json")),
        ]);
        Self {
            payloads: Mutex::new(payloads),
            failing: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_payload(&self, endpoint: Endpoint, json: &str) {
        self.payloads
            .lock()
            .unwrap()
            .insert(endpoint, json.to_string());
    }

    pub fn fail_on(&self, endpoint: Option<Endpoint>) {
        *self.failing.lock().unwrap() = endpoint;
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn load<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, CatalogError> {
        self.calls.lock().unwrap().push(endpoint);
        if *self.failing.lock().unwrap() == Some(endpoint) {
            return Err(CatalogError::Status {
                endpoint,
                status: 503,
            });
        }
        let payload = self.payloads.lock().unwrap()[&endpoint].clone();
        serde_json::from_str(&payload).map_err(|err| CatalogError::Decode {
            endpoint,
            message: err.to_string(),
        })
    }
}

impl CatalogSource for FixtureSource {
    fn fetch_artists(&self) -> Result<Vec<RemoteArtist>, CatalogError> {
        self.load(Endpoint::Artists)
    }

    fn fetch_locations(&self) -> Result<LocationsIndex, CatalogError> {
        self.load(Endpoint::Locations)
    }

    fn fetch_dates(&self) -> Result<DatesIndex, CatalogError> {
        self.load(Endpoint::Dates)
    }

    fn fetch_relations(&self) -> Result<RelationsIndex, CatalogError> {
        self.load(Endpoint::Relation)
    }
}

pub fn artist(id: i64, name: &str) -> groupie_catalog::domain::Artist {
    groupie_catalog::domain::Artist {
        id,
        image: String::new(),
        name: name.to_string(),
        members: Vec::new(),
        creation_date: 0,
        first_album: String::new(),
        locations: Vec::new(),
        concert_dates: Vec::new(),
        dates_locations: Default::default(),
    }
}
