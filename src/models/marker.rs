use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::constants::{
    ARTS_CENTRE_ICON_URL, BATTLE_RAP_ICON_URL, DEFAULT_ICON_URL, SPORTS_ICON_URL,
    THEATRE_ICON_URL,
};
use crate::data::geo::LatLon;

/// Event categories the POI query can filter on. The string form doubles as
/// the OSM tag used in spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Theatre,
    ArtsCentre,
    Sports,
    BattleRap,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Theatre,
        Category::ArtsCentre,
        Category::Sports,
        Category::BattleRap,
    ];

    pub fn osm_tag(&self) -> &'static str {
        match self {
            Category::Theatre => "theatre",
            Category::ArtsCentre => "arts_centre",
            Category::Sports => "sports",
            Category::BattleRap => "battle_rap",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "theatre" => Ok(Category::Theatre),
            "arts_centre" => Ok(Category::ArtsCentre),
            "sports" => Ok(Category::Sports),
            "battle_rap" => Ok(Category::BattleRap),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.osm_tag())
    }
}

lazy_static! {
    static ref ICON_URLS: HashMap<Category, &'static str> = {
        let mut icons = HashMap::new();
        icons.insert(Category::Theatre, THEATRE_ICON_URL);
        icons.insert(Category::ArtsCentre, ARTS_CENTRE_ICON_URL);
        icons.insert(Category::Sports, SPORTS_ICON_URL);
        icons.insert(Category::BattleRap, BATTLE_RAP_ICON_URL);
        icons
    };
}

/// Icon for a marker's category; markers without one (search results) get the
/// default icon.
pub fn icon_url(category: Option<Category>) -> &'static str {
    category
        .and_then(|c| ICON_URLS.get(&c).copied())
        .unwrap_or(DEFAULT_ICON_URL)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLon,
    pub label: String,
    pub category: Option<Category>,
}

impl Marker {
    pub fn new(position: LatLon, label: String, category: Option<Category>) -> Self {
        Self {
            position,
            label,
            category,
        }
    }

    pub fn icon_url(&self) -> &'static str {
        icon_url(self.category)
    }
}
