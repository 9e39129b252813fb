use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::config::constants::HTTP_USER_AGENT;
use crate::data::geo::LatLon;

/// One hit from the geocoding service. Coordinates arrive as numeric strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Client for a Nominatim-style free-text address lookup.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Resolves `address` to coordinates. The first hit is authoritative;
    /// an empty result set yields `Ok(None)`. No retry, no timeout.
    pub async fn resolve(&self, address: &str) -> Result<Option<LatLon>> {
        debug!("geocoding \"{}\"", address);
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", address), ("format", "json")])
            .send()
            .await
            .with_context(|| format!("geocoder request for \"{}\" failed", address))?;
        let hits: Vec<GeocodeHit> = response
            .json()
            .await
            .context("geocoder returned an unreadable body")?;
        first_coordinates(&hits)
    }
}

fn first_coordinates(hits: &[GeocodeHit]) -> Result<Option<LatLon>> {
    let hit = match hits.first() {
        Some(hit) => hit,
        None => return Ok(None),
    };
    let lat: f64 = hit
        .lat
        .parse()
        .with_context(|| format!("geocoder returned a non-numeric latitude: {}", hit.lat))?;
    let lon: f64 = hit
        .lon
        .parse()
        .with_context(|| format!("geocoder returned a non-numeric longitude: {}", hit.lon))?;
    Ok(Some(LatLon::new(lat, lon)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(body: &str) -> Vec<GeocodeHit> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn first_hit_wins() {
        let hits = hits(
            r#"[{"lat": "-23.561", "lon": "-46.656", "display_name": "Avenida Paulista"},
                {"lat": "0.0", "lon": "0.0"}]"#,
        );
        let point = first_coordinates(&hits).unwrap().unwrap();
        assert_eq!(point, LatLon::new(-23.561, -46.656));
    }

    #[test]
    fn empty_result_set_is_none() {
        assert!(first_coordinates(&hits("[]")).unwrap().is_none());
    }

    #[test]
    fn non_numeric_coordinates_are_an_error() {
        let hits = hits(r#"[{"lat": "not-a-number", "lon": "-46.656"}]"#);
        assert!(first_coordinates(&hits).is_err());
    }
}
