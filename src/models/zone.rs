use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::data::geo::LatLon;

/// The four administrative zones POI queries can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKey {
    Norte,
    Sul,
    Leste,
    Oeste,
}

impl ZoneKey {
    pub const ALL: [ZoneKey; 4] = [ZoneKey::Norte, ZoneKey::Sul, ZoneKey::Leste, ZoneKey::Oeste];

    /// Color of the rendered zone circle.
    pub fn color(&self) -> &'static str {
        match self {
            ZoneKey::Norte => "blue",
            ZoneKey::Sul => "green",
            ZoneKey::Leste => "red",
            ZoneKey::Oeste => "yellow",
        }
    }
}

impl FromStr for ZoneKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "norte" => Ok(ZoneKey::Norte),
            "sul" => Ok(ZoneKey::Sul),
            "leste" => Ok(ZoneKey::Leste),
            "oeste" => Ok(ZoneKey::Oeste),
            _ => Err(format!("Unknown zone: {}", s)),
        }
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZoneKey::Norte => write!(f, "norte"),
            ZoneKey::Sul => write!(f, "sul"),
            ZoneKey::Leste => write!(f, "leste"),
            ZoneKey::Oeste => write!(f, "oeste"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub center: LatLon,
    pub radius_m: f64,
}

impl Zone {
    pub fn new(center: LatLon, radius_m: f64) -> Result<Self> {
        if radius_m <= 0.0 {
            bail!("Zone radius must be positive, got {}", radius_m);
        }
        Ok(Self { center, radius_m })
    }
}

/// Lookup table `ZoneKey -> Zone`, injected at startup. Radius mutation goes
/// through the explicit `grow_radius` command; invariant: radius stays > 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCatalog {
    zones: BTreeMap<ZoneKey, Zone>,
}

impl ZoneCatalog {
    pub fn new(zones: BTreeMap<ZoneKey, Zone>) -> Self {
        Self { zones }
    }

    pub fn get(&self, key: ZoneKey) -> Option<&Zone> {
        self.zones.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneKey, &Zone)> {
        self.zones.iter().map(|(k, z)| (*k, z))
    }

    pub fn grow_radius(&mut self, key: ZoneKey, delta_m: f64) -> Result<f64> {
        let zone = match self.zones.get_mut(&key) {
            Some(zone) => zone,
            None => bail!("Zone {} is not in the catalog", key),
        };
        let new_radius = zone.radius_m + delta_m;
        if new_radius <= 0.0 {
            bail!(
                "Growing zone {} by {} m would leave a non-positive radius",
                key,
                delta_m
            );
        }
        zone.radius_m = new_radius;
        Ok(new_radius)
    }
}
