use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::map_config::MapConfig;
use crate::core::coordinator::{
    FilterCoordinator, GeocodeCompletion, MapViewState, PendingFetch,
};
use crate::core::filter_state::{CategoryFilter, FilterEvent, ZoneFilter};
use crate::data::geo::LatLon;
use crate::data::geocoder::GeocodeClient;
use crate::data::overpass::OverpassClient;
use crate::models::marker::Marker;
use crate::models::zone::ZoneKey;

/// User-visible result of a search submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Added,
    NotFound,
    EmptyInput,
}

/// Wires the coordinator to the two HTTP clients. Each operation performs at
/// most one network call and feeds the result back through the coordinator.
pub struct MapSession {
    coordinator: FilterCoordinator,
    geocoder: GeocodeClient,
    overpass: OverpassClient,
    seed_addresses: Vec<String>,
}

impl MapSession {
    pub fn new(config: &MapConfig) -> Result<Self> {
        let view = MapViewState {
            center: config.center,
            zoom: config.zoom,
        };
        Ok(Self {
            coordinator: FilterCoordinator::new(view, config.zone_catalog()),
            geocoder: GeocodeClient::new(config.geocoder_url.clone())?,
            overpass: OverpassClient::new(config.overpass_url.clone())?,
            seed_addresses: config.seed_addresses.clone(),
        })
    }

    pub fn coordinator(&self) -> &FilterCoordinator {
        &self.coordinator
    }

    /// Geocodes the configured address list into the initial marker set.
    /// Addresses that resolve to nothing are skipped with a warning.
    pub async fn seed_markers(&mut self) -> Result<usize> {
        let bar = ProgressBar::new(self.seed_addresses.len() as u64);
        bar.set_style(ProgressStyle::with_template(
            "{bar:30} {pos}/{len} {msg}",
        )?);

        let mut added = 0;
        for address in self.seed_addresses.clone() {
            bar.set_message(address.clone());
            let resolved = self.geocoder.resolve(&address).await?;
            if apply_seed_result(&mut self.coordinator, &address, resolved) {
                added += 1;
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
        info!("seeded {} of {} addresses", added, self.seed_addresses.len());
        Ok(added)
    }

    pub async fn select_zone(&mut self, selection: ZoneFilter) -> Result<()> {
        let pending = self
            .coordinator
            .handle(FilterEvent::ZoneSelected(selection))?;
        self.run_pending(pending).await?;
        Ok(())
    }

    pub async fn select_category(&mut self, selection: CategoryFilter) -> Result<()> {
        let pending = self
            .coordinator
            .handle(FilterEvent::CategorySelected(selection))?;
        self.run_pending(pending).await?;
        Ok(())
    }

    pub async fn search(&mut self, address: &str) -> Result<SearchOutcome> {
        let pending = self
            .coordinator
            .handle(FilterEvent::SearchSubmitted(address.to_string()))?;
        match self.run_pending(pending).await? {
            Some(GeocodeCompletion::Added) => Ok(SearchOutcome::Added),
            Some(GeocodeCompletion::NotFound) => Ok(SearchOutcome::NotFound),
            // the session is sequential, so a stale ticket cannot occur here
            Some(GeocodeCompletion::Stale) | None => Ok(SearchOutcome::EmptyInput),
        }
    }

    pub fn grow_zone(&mut self, key: ZoneKey) -> Result<f64> {
        self.coordinator.grow_zone_radius(key)
    }

    async fn run_pending(
        &mut self,
        pending: Option<PendingFetch>,
    ) -> Result<Option<GeocodeCompletion>> {
        match pending {
            None => Ok(None),
            Some(PendingFetch::Pois {
                ticket,
                category_tag,
                zone,
            }) => {
                let markers = self.overpass.fetch_pois(&category_tag, &zone).await?;
                info!("POI fetch for [{}] returned {} markers", category_tag, markers.len());
                self.coordinator.complete_pois(ticket, markers);
                Ok(None)
            }
            Some(PendingFetch::Geocode { ticket, address }) => {
                let resolved = self.geocoder.resolve(&address).await?;
                Ok(Some(self.coordinator.complete_geocode(
                    ticket, &address, resolved,
                )))
            }
        }
    }
}

/// Appends one seed marker when the address resolved; reports skips.
fn apply_seed_result(
    coordinator: &mut FilterCoordinator,
    address: &str,
    resolved: Option<LatLon>,
) -> bool {
    match resolved {
        Some(position) => {
            coordinator.append_marker(Marker::new(position, address.to_string(), None));
            true
        }
        None => {
            warn!("seed address \"{}\" did not resolve, skipping", address);
            false
        }
    }
}
