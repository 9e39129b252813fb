use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::constants::{HTTP_USER_AGENT, UNKNOWN_POI_NAME};
use crate::data::geo::LatLon;
use crate::models::marker::{Category, Marker};
use crate::models::zone::Zone;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: f64,
    lon: f64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

/// Client for an Overpass-style radius-bounded spatial POI query.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Fetches the POI nodes tagged `category_tag` within the zone's current
    /// radius around its center. Every query is radius-bounded; the caller
    /// never passes an unscoped zone here.
    pub async fn fetch_pois(&self, category_tag: &str, zone: &Zone) -> Result<Vec<Marker>> {
        let query = build_query(category_tag, zone);
        debug!("overpass query: {}", query);
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .await
            .with_context(|| format!("POI query for tag \"{}\" failed", category_tag))?;
        let body: OverpassResponse = response
            .json()
            .await
            .context("POI service returned an unreadable body")?;
        Ok(into_markers(body, category_tag))
    }
}

fn build_query(category_tag: &str, zone: &Zone) -> String {
    format!(
        "[out:json];node[{}](around:{},{},{});out;",
        category_tag, zone.radius_m, zone.center.lat, zone.center.lon
    )
}

fn into_markers(response: OverpassResponse, category_tag: &str) -> Vec<Marker> {
    let category = category_tag.parse::<Category>().ok();
    response
        .elements
        .into_iter()
        .map(|element| {
            let label = element
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| UNKNOWN_POI_NAME.to_string());
            Marker::new(LatLon::new(element.lat, element.lon), label, category)
        })
        .collect()
}
