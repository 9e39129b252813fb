use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

use crate::config::constants::{
    DEFAULT_ZONE_RADIUS_M, GEOCODER_BASE_URL, INITIAL_CENTER_LAT, INITIAL_CENTER_LON,
    INITIAL_ZOOM, LESTE_CENTER, NORTE_CENTER, OESTE_CENTER, OSM_TILE_URL, OVERPASS_BASE_URL,
    SEED_ADDRESSES, SUL_CENTER,
};
use crate::data::geo::LatLon;
use crate::models::zone::{Zone, ZoneCatalog, ZoneKey};

/// Startup configuration: initial viewport, service endpoints, zone table and
/// the address list seeded into markers on launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub center: LatLon,
    pub zoom: u8,
    pub geocoder_url: String,
    pub overpass_url: String,
    pub tile_url: String,
    pub zones: BTreeMap<ZoneKey, Zone>,
    pub seed_addresses: Vec<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        let mut zones = BTreeMap::new();
        let entries = [
            (ZoneKey::Norte, NORTE_CENTER),
            (ZoneKey::Sul, SUL_CENTER),
            (ZoneKey::Leste, LESTE_CENTER),
            (ZoneKey::Oeste, OESTE_CENTER),
        ];
        for (key, (lat, lon)) in entries {
            let zone = Zone::new(LatLon::new(lat, lon), DEFAULT_ZONE_RADIUS_M)
                .expect("default zone radius is positive");
            zones.insert(key, zone);
        }

        Self {
            center: LatLon::new(INITIAL_CENTER_LAT, INITIAL_CENTER_LON),
            zoom: INITIAL_ZOOM,
            geocoder_url: GEOCODER_BASE_URL.to_string(),
            overpass_url: OVERPASS_BASE_URL.to_string(),
            tile_url: OSM_TILE_URL.to_string(),
            zones,
            seed_addresses: SEED_ADDRESSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl MapConfig {
    pub fn load_from_json(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn zone_catalog(&self) -> ZoneCatalog {
        ZoneCatalog::new(self.zones.clone())
    }
}
