use serde::Serialize;

use crate::core::coordinator::MapViewState;
use crate::data::geo::LatLon;
use crate::models::marker::Marker;
use crate::models::zone::ZoneCatalog;

/// Complete render description for an external map canvas: viewport, tile
/// source, zone circles and marker sprites. Built statelessly from current
/// coordinator state.
#[derive(Debug, Clone, Serialize)]
pub struct MapScene {
    pub center: LatLon,
    pub zoom: u8,
    pub tile_url: String,
    pub circles: Vec<CircleOverlay>,
    pub markers: Vec<MarkerSprite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircleOverlay {
    pub center: LatLon,
    pub radius_m: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerSprite {
    pub position: LatLon,
    pub icon_url: String,
    pub popup: String,
}

pub fn build_scene(
    view: &MapViewState,
    zones: &ZoneCatalog,
    markers: &[Marker],
    tile_url: &str,
) -> MapScene {
    let circles = zones
        .iter()
        .map(|(key, zone)| CircleOverlay {
            center: zone.center,
            radius_m: zone.radius_m,
            color: key.color().to_string(),
        })
        .collect();

    let sprites = markers
        .iter()
        .map(|marker| MarkerSprite {
            position: marker.position,
            icon_url: marker.icon_url().to_string(),
            popup: marker.label.clone(),
        })
        .collect();

    MapScene {
        center: view.center,
        zoom: view.zoom,
        tile_url: tile_url.to_string(),
        circles,
        markers: sprites,
    }
}
