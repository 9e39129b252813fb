use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::constants::{SEARCH_RESULT_ZOOM, ZONE_RADIUS_STEP_M};
use crate::core::filter_state::{transition, Effect, FilterEvent, FilterState};
use crate::data::geo::LatLon;
use crate::models::marker::Marker;
use crate::models::zone::{Zone, ZoneCatalog, ZoneKey};

/// Current viewport. Mutated only by a successful address search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewState {
    pub center: LatLon,
    pub zoom: u8,
}

/// Sequence number for a dispatched POI fetch. A completion presenting a
/// ticket older than the latest issued one is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoiTicket(u64);

/// Sequence number for a dispatched geocode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeTicket(u64);

/// A side effect the caller must perform; the embedded zone is a snapshot of
/// the catalog entry at dispatch time, so the query sees the current radius.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingFetch {
    Pois {
        ticket: PoiTicket,
        category_tag: String,
        zone: Zone,
    },
    Geocode {
        ticket: GeocodeTicket,
        address: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeCompletion {
    /// Marker appended, view recentered.
    Added,
    /// Address resolved to nothing; state untouched, input left for correction.
    NotFound,
    /// A newer geocode was issued meanwhile; result dropped.
    Stale,
}

/// Owns the filter state, the marker set, the viewport and the zone catalog.
/// Filter results replace the marker set; search results append to it.
#[derive(Debug, Clone)]
pub struct FilterCoordinator {
    state: FilterState,
    markers: Vec<Marker>,
    view: MapViewState,
    zones: ZoneCatalog,
    issued_poi: u64,
    issued_geocode: u64,
}

impl FilterCoordinator {
    pub fn new(view: MapViewState, zones: ZoneCatalog) -> Self {
        Self {
            state: FilterState::default(),
            markers: Vec::new(),
            view,
            zones,
            issued_poi: 0,
            issued_geocode: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn view(&self) -> &MapViewState {
        &self.view
    }

    pub fn zones(&self) -> &ZoneCatalog {
        &self.zones
    }

    /// Applies a filter or search event. Returns the fetch the caller must
    /// perform, if the transition asked for one.
    pub fn handle(&mut self, event: FilterEvent) -> Result<Option<PendingFetch>> {
        let (next, effect) = transition(&self.state, &event);
        self.state = next;
        match effect {
            Effect::None => Ok(None),
            Effect::ClearMarkers => {
                self.markers.clear();
                Ok(None)
            }
            Effect::FetchPois { category_tag, zone } => {
                let snapshot = match self.zones.get(zone) {
                    Some(zone) => *zone,
                    None => bail!("Zone {} is not in the catalog", zone),
                };
                self.issued_poi += 1;
                Ok(Some(PendingFetch::Pois {
                    ticket: PoiTicket(self.issued_poi),
                    category_tag,
                    zone: snapshot,
                }))
            }
            Effect::Geocode { address } => {
                self.issued_geocode += 1;
                Ok(Some(PendingFetch::Geocode {
                    ticket: GeocodeTicket(self.issued_geocode),
                    address,
                }))
            }
        }
    }

    /// Applies a finished POI fetch: the result replaces the whole marker
    /// set. Returns false when the ticket is stale and the result was dropped.
    pub fn complete_pois(&mut self, ticket: PoiTicket, markers: Vec<Marker>) -> bool {
        if ticket.0 != self.issued_poi {
            debug!("dropping stale POI result (ticket {} of {})", ticket.0, self.issued_poi);
            return false;
        }
        self.markers = markers;
        true
    }

    /// Applies a finished geocode. A hit appends one marker labeled with the
    /// searched address, recenters the view and clears the search input; a
    /// miss changes nothing so the input can be corrected.
    pub fn complete_geocode(
        &mut self,
        ticket: GeocodeTicket,
        address: &str,
        position: Option<LatLon>,
    ) -> GeocodeCompletion {
        if ticket.0 != self.issued_geocode {
            debug!(
                "dropping stale geocode result (ticket {} of {})",
                ticket.0, self.issued_geocode
            );
            return GeocodeCompletion::Stale;
        }
        match position {
            Some(position) => {
                self.markers
                    .push(Marker::new(position, address.to_string(), None));
                self.view = MapViewState {
                    center: position,
                    zoom: SEARCH_RESULT_ZOOM,
                };
                self.state.search_input.clear();
                GeocodeCompletion::Added
            }
            None => GeocodeCompletion::NotFound,
        }
    }

    /// Appends a marker outside the filter/search flow (session seeding).
    pub fn append_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Grows a zone circle by one step; later fetches see the new radius.
    pub fn grow_zone_radius(&mut self, key: ZoneKey) -> Result<f64> {
        self.zones.grow_radius(key, ZONE_RADIUS_STEP_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::{INITIAL_ZOOM, SEARCH_RESULT_ZOOM};
    use crate::config::map_config::MapConfig;
    use crate::core::filter_state::{CategoryFilter, ZoneFilter};
    use crate::models::marker::Category;

    fn coordinator() -> FilterCoordinator {
        let config = MapConfig::default();
        let view = MapViewState {
            center: config.center,
            zoom: config.zoom,
        };
        FilterCoordinator::new(view, config.zone_catalog())
    }

    fn poi_marker(label: &str) -> Marker {
        Marker::new(
            LatLon::new(-23.6, -46.6),
            label.to_string(),
            Some(Category::Theatre),
        )
    }

    fn select_zone(c: &mut FilterCoordinator, zone: ZoneKey) -> PendingFetch {
        c.handle(FilterEvent::ZoneSelected(ZoneFilter::Zone(zone)))
            .unwrap()
            .expect("zone selection dispatches a fetch")
    }

    #[test]
    fn zone_selection_fetches_amenity_and_replaces_markers() {
        let mut c = coordinator();
        c.append_marker(poi_marker("leftover"));

        for key in ZoneKey::ALL {
            let pending = select_zone(&mut c, key);
            let (ticket, category_tag, zone) = match pending {
                PendingFetch::Pois {
                    ticket,
                    category_tag,
                    zone,
                } => (ticket, category_tag, zone),
                other => panic!("expected a POI fetch, got {:?}", other),
            };
            assert_eq!(category_tag, "amenity");
            assert_eq!(zone, *c.zones().get(key).unwrap());

            assert!(c.complete_pois(ticket, vec![poi_marker("a"), poi_marker("b")]));
            assert_eq!(c.markers().len(), 2);
        }
    }

    #[test]
    fn zone_all_empties_the_marker_set() {
        let mut c = coordinator();
        c.handle(FilterEvent::CategorySelected(CategoryFilter::Category(
            Category::Sports,
        )))
        .unwrap();
        c.append_marker(poi_marker("stale"));

        let pending = c
            .handle(FilterEvent::ZoneSelected(ZoneFilter::All))
            .unwrap();
        assert!(pending.is_none());
        assert!(c.markers().is_empty());
    }

    #[test]
    fn category_selection_with_active_zone_fetches_and_replaces() {
        let mut c = coordinator();
        let ticket = match select_zone(&mut c, ZoneKey::Norte) {
            PendingFetch::Pois { ticket, .. } => ticket,
            other => panic!("expected a POI fetch, got {:?}", other),
        };
        c.complete_pois(ticket, vec![poi_marker("old")]);

        let pending = c
            .handle(FilterEvent::CategorySelected(CategoryFilter::Category(
                Category::ArtsCentre,
            )))
            .unwrap()
            .expect("category over a zone dispatches a fetch");
        match pending {
            PendingFetch::Pois {
                ticket,
                category_tag,
                zone,
            } => {
                assert_eq!(category_tag, "arts_centre");
                assert_eq!(zone.center, c.zones().get(ZoneKey::Norte).unwrap().center);
                assert!(c.complete_pois(ticket, vec![poi_marker("new")]));
            }
            other => panic!("expected a POI fetch, got {:?}", other),
        }
        assert_eq!(c.markers().len(), 1);
        assert_eq!(c.markers()[0].label, "new");
    }

    #[test]
    fn category_selection_without_a_zone_empties_the_marker_set() {
        let mut c = coordinator();
        c.append_marker(poi_marker("seeded"));
        let pending = c
            .handle(FilterEvent::CategorySelected(CategoryFilter::Category(
                Category::Theatre,
            )))
            .unwrap();
        assert!(pending.is_none());
        assert!(c.markers().is_empty());
    }

    #[test]
    fn successful_search_appends_one_marker_and_recenters() {
        let mut c = coordinator();
        c.append_marker(poi_marker("existing"));
        assert_eq!(c.view().zoom, INITIAL_ZOOM);

        let (ticket, address) = match c
            .handle(FilterEvent::SearchSubmitted(
                "Avenida Paulista, 1000".to_string(),
            ))
            .unwrap()
            .expect("search dispatches a geocode")
        {
            PendingFetch::Geocode { ticket, address } => (ticket, address),
            other => panic!("expected a geocode, got {:?}", other),
        };

        let found = LatLon::new(-23.561, -46.656);
        let outcome = c.complete_geocode(ticket, &address, Some(found));
        assert_eq!(outcome, GeocodeCompletion::Added);
        assert_eq!(c.markers().len(), 2);
        let appended = c.markers().last().unwrap();
        assert_eq!(appended.position, found);
        assert_eq!(appended.label, "Avenida Paulista, 1000");
        assert_eq!(appended.category, None);
        assert_eq!(c.view().center, found);
        assert_eq!(c.view().zoom, SEARCH_RESULT_ZOOM);
        assert!(c.state().search_input.is_empty());
    }

    #[test]
    fn failed_search_leaves_markers_view_and_input_alone() {
        let mut c = coordinator();
        c.append_marker(poi_marker("existing"));
        let view_before = *c.view();

        let (ticket, address) = match c
            .handle(FilterEvent::SearchSubmitted("Rua Inexistente, 0".to_string()))
            .unwrap()
            .unwrap()
        {
            PendingFetch::Geocode { ticket, address } => (ticket, address),
            other => panic!("expected a geocode, got {:?}", other),
        };

        let outcome = c.complete_geocode(ticket, &address, None);
        assert_eq!(outcome, GeocodeCompletion::NotFound);
        assert_eq!(c.markers().len(), 1);
        assert_eq!(*c.view(), view_before);
        assert_eq!(c.state().search_input, "Rua Inexistente, 0");
    }

    #[test]
    fn re_selecting_the_active_zone_issues_identical_fetch_parameters() {
        let mut c = coordinator();
        let first = select_zone(&mut c, ZoneKey::Oeste);
        let second = select_zone(&mut c, ZoneKey::Oeste);
        match (first, second) {
            (
                PendingFetch::Pois {
                    category_tag: tag_a,
                    zone: zone_a,
                    ..
                },
                PendingFetch::Pois {
                    category_tag: tag_b,
                    zone: zone_b,
                    ..
                },
            ) => {
                assert_eq!(tag_a, tag_b);
                assert_eq!(zone_a, zone_b);
            }
            other => panic!("expected two POI fetches, got {:?}", other),
        }
    }

    #[test]
    fn stale_poi_result_is_dropped() {
        let mut c = coordinator();
        let slow = match select_zone(&mut c, ZoneKey::Norte) {
            PendingFetch::Pois { ticket, .. } => ticket,
            other => panic!("expected a POI fetch, got {:?}", other),
        };
        let fast = match select_zone(&mut c, ZoneKey::Sul) {
            PendingFetch::Pois { ticket, .. } => ticket,
            other => panic!("expected a POI fetch, got {:?}", other),
        };

        // The later request resolves first; the earlier one must not clobber it.
        assert!(c.complete_pois(fast, vec![poi_marker("sul result")]));
        assert!(!c.complete_pois(slow, vec![poi_marker("norte result")]));
        assert_eq!(c.markers().len(), 1);
        assert_eq!(c.markers()[0].label, "sul result");
    }

    #[test]
    fn stale_geocode_result_is_dropped() {
        let mut c = coordinator();
        let first = match c
            .handle(FilterEvent::SearchSubmitted("Praça da Sé".to_string()))
            .unwrap()
            .unwrap()
        {
            PendingFetch::Geocode { ticket, .. } => ticket,
            other => panic!("expected a geocode, got {:?}", other),
        };
        c.handle(FilterEvent::SearchSubmitted("Rua Augusta, 1500".to_string()))
            .unwrap();

        let outcome = c.complete_geocode(first, "Praça da Sé", Some(LatLon::new(-23.55, -46.63)));
        assert_eq!(outcome, GeocodeCompletion::Stale);
        assert!(c.markers().is_empty());
    }

    #[test]
    fn grown_radius_is_visible_in_the_next_fetch_snapshot() {
        let mut c = coordinator();
        let before = match select_zone(&mut c, ZoneKey::Leste) {
            PendingFetch::Pois { zone, .. } => zone.radius_m,
            other => panic!("expected a POI fetch, got {:?}", other),
        };
        c.grow_zone_radius(ZoneKey::Leste).unwrap();
        let after = match select_zone(&mut c, ZoneKey::Leste) {
            PendingFetch::Pois { zone, .. } => zone.radius_m,
            other => panic!("expected a POI fetch, got {:?}", other),
        };
        assert_eq!(after, before + ZONE_RADIUS_STEP_M);
    }

    #[test]
    fn repeated_searches_accumulate_markers() {
        let mut c = coordinator();
        for _ in 0..2 {
            let (ticket, address) = match c
                .handle(FilterEvent::SearchSubmitted("Praça da Sé".to_string()))
                .unwrap()
                .unwrap()
            {
                PendingFetch::Geocode { ticket, address } => (ticket, address),
                other => panic!("expected a geocode, got {:?}", other),
            };
            c.complete_geocode(ticket, &address, Some(LatLon::new(-23.55, -46.634)));
        }
        // no dedup: the same address twice yields two markers
        assert_eq!(c.markers().len(), 2);
    }
}
