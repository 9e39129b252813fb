use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::constants::DEFAULT_POI_CATEGORY_TAG;
use crate::models::marker::Category;
use crate::models::zone::ZoneKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneFilter {
    All,
    Zone(ZoneKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    All,
    Category(Category),
}

impl FromStr for ZoneFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ZoneFilter::All),
            other => other.parse::<ZoneKey>().map(ZoneFilter::Zone),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CategoryFilter::All),
            other => other.parse::<Category>().map(CategoryFilter::Category),
        }
    }
}

impl fmt::Display for ZoneFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZoneFilter::All => write!(f, "all"),
            ZoneFilter::Zone(key) => write!(f, "{}", key),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(category) => write!(f, "{}", category),
        }
    }
}

/// The session's filter/search state. One instance, owned by the coordinator,
/// mutated only through `transition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub zone_filter: ZoneFilter,
    pub category_filter: CategoryFilter,
    pub search_input: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            zone_filter: ZoneFilter::All,
            category_filter: CategoryFilter::All,
            search_input: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    ZoneSelected(ZoneFilter),
    CategorySelected(CategoryFilter),
    SearchSubmitted(String),
}

/// Side-effect description returned by `transition`. `FetchPois` results
/// replace the marker set; a successful `Geocode` appends to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    ClearMarkers,
    FetchPois { category_tag: String, zone: ZoneKey },
    Geocode { address: String },
}

/// Pure transition: `(state, event) -> (state, effect)`.
///
/// Gating policy: zone selection always fetches for a concrete zone, falling
/// back to the "amenity" tag when no category filter is active; category
/// selection fetches only when a concrete zone is already active. Either
/// filter set to "all" clears the marker set. Every emitted fetch is
/// therefore scoped to a zone.
pub fn transition(state: &FilterState, event: &FilterEvent) -> (FilterState, Effect) {
    let mut next = state.clone();
    let effect = match event {
        FilterEvent::ZoneSelected(selection) => {
            next.zone_filter = *selection;
            match selection {
                ZoneFilter::All => Effect::ClearMarkers,
                ZoneFilter::Zone(zone) => Effect::FetchPois {
                    category_tag: effective_category_tag(&next.category_filter),
                    zone: *zone,
                },
            }
        }
        FilterEvent::CategorySelected(selection) => {
            next.category_filter = *selection;
            match (selection, next.zone_filter) {
                (CategoryFilter::Category(category), ZoneFilter::Zone(zone)) => {
                    Effect::FetchPois {
                        category_tag: category.osm_tag().to_string(),
                        zone,
                    }
                }
                _ => Effect::ClearMarkers,
            }
        }
        FilterEvent::SearchSubmitted(address) => {
            let address = address.trim();
            if address.is_empty() {
                Effect::None
            } else {
                next.search_input = address.to_string();
                Effect::Geocode {
                    address: address.to_string(),
                }
            }
        }
    };
    (next, effect)
}

fn effective_category_tag(filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => DEFAULT_POI_CATEGORY_TAG.to_string(),
        CategoryFilter::Category(category) => category.osm_tag().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch(tag: &str, zone: ZoneKey) -> Effect {
        Effect::FetchPois {
            category_tag: tag.to_string(),
            zone,
        }
    }

    #[test]
    fn selecting_a_zone_with_no_category_falls_back_to_amenity() {
        let state = FilterState::default();
        for zone in ZoneKey::ALL {
            let (next, effect) =
                transition(&state, &FilterEvent::ZoneSelected(ZoneFilter::Zone(zone)));
            assert_eq!(next.zone_filter, ZoneFilter::Zone(zone));
            assert_eq!(effect, fetch("amenity", zone));
        }
    }

    #[test]
    fn selecting_a_zone_with_an_active_category_uses_its_tag() {
        let state = FilterState {
            category_filter: CategoryFilter::Category(Category::Theatre),
            ..FilterState::default()
        };
        let (_, effect) = transition(
            &state,
            &FilterEvent::ZoneSelected(ZoneFilter::Zone(ZoneKey::Sul)),
        );
        assert_eq!(effect, fetch("theatre", ZoneKey::Sul));
    }

    #[test]
    fn selecting_zone_all_clears_regardless_of_category() {
        let state = FilterState {
            zone_filter: ZoneFilter::Zone(ZoneKey::Norte),
            category_filter: CategoryFilter::Category(Category::Sports),
            ..FilterState::default()
        };
        let (next, effect) = transition(&state, &FilterEvent::ZoneSelected(ZoneFilter::All));
        assert_eq!(next.zone_filter, ZoneFilter::All);
        assert_eq!(effect, Effect::ClearMarkers);
    }

    #[test]
    fn selecting_a_category_with_an_active_zone_fetches_it() {
        let state = FilterState {
            zone_filter: ZoneFilter::Zone(ZoneKey::Leste),
            ..FilterState::default()
        };
        for category in Category::ALL {
            let (next, effect) = transition(
                &state,
                &FilterEvent::CategorySelected(CategoryFilter::Category(category)),
            );
            assert_eq!(next.category_filter, CategoryFilter::Category(category));
            assert_eq!(effect, fetch(category.osm_tag(), ZoneKey::Leste));
        }
    }

    #[test]
    fn selecting_a_category_without_a_zone_clears() {
        let state = FilterState::default();
        let (next, effect) = transition(
            &state,
            &FilterEvent::CategorySelected(CategoryFilter::Category(Category::BattleRap)),
        );
        assert_eq!(
            next.category_filter,
            CategoryFilter::Category(Category::BattleRap)
        );
        assert_eq!(effect, Effect::ClearMarkers);
    }

    #[test]
    fn selecting_category_all_clears() {
        let state = FilterState {
            zone_filter: ZoneFilter::Zone(ZoneKey::Oeste),
            category_filter: CategoryFilter::Category(Category::Theatre),
            ..FilterState::default()
        };
        let (_, effect) = transition(&state, &FilterEvent::CategorySelected(CategoryFilter::All));
        assert_eq!(effect, Effect::ClearMarkers);
    }

    #[test]
    fn re_selecting_the_active_zone_repeats_the_same_fetch() {
        let state = FilterState::default();
        let event = FilterEvent::ZoneSelected(ZoneFilter::Zone(ZoneKey::Norte));
        let (first_state, first_effect) = transition(&state, &event);
        let (second_state, second_effect) = transition(&first_state, &event);
        assert_eq!(first_state, second_state);
        assert_eq!(first_effect, second_effect);
    }

    #[test]
    fn search_submission_records_the_address_and_geocodes() {
        let state = FilterState::default();
        let (next, effect) = transition(
            &state,
            &FilterEvent::SearchSubmitted("Avenida Paulista, 1000".to_string()),
        );
        assert_eq!(next.search_input, "Avenida Paulista, 1000");
        assert_eq!(
            effect,
            Effect::Geocode {
                address: "Avenida Paulista, 1000".to_string()
            }
        );
    }

    #[test]
    fn blank_search_submission_is_inert() {
        let state = FilterState::default();
        let (next, effect) = transition(&state, &FilterEvent::SearchSubmitted("   ".to_string()));
        assert_eq!(next, state);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn filter_strings_parse_including_the_all_sentinel() {
        assert_eq!("all".parse::<ZoneFilter>().unwrap(), ZoneFilter::All);
        assert_eq!(
            "oeste".parse::<ZoneFilter>().unwrap(),
            ZoneFilter::Zone(ZoneKey::Oeste)
        );
        assert_eq!(
            "arts_centre".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Category(Category::ArtsCentre)
        );
        assert!("nowhere".parse::<ZoneFilter>().is_err());
    }
}
