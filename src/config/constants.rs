// Initial Viewport
pub const INITIAL_CENTER_LAT: f64 = -23.55052;
pub const INITIAL_CENTER_LON: f64 = -46.633308;
pub const INITIAL_ZOOM: u8 = 11;
pub const SEARCH_RESULT_ZOOM: u8 = 15;

// Zone Geometry
pub const NORTE_CENTER: (f64, f64) = (-23.490, -46.650);
pub const SUL_CENTER: (f64, f64) = (-23.650, -46.650);
pub const LESTE_CENTER: (f64, f64) = (-23.550, -46.500);
pub const OESTE_CENTER: (f64, f64) = (-23.550, -46.800);
pub const DEFAULT_ZONE_RADIUS_M: f64 = 5000.0;
pub const ZONE_RADIUS_STEP_M: f64 = 1000.0;        // one grow-radius command

// POI Queries
pub const DEFAULT_POI_CATEGORY_TAG: &str = "amenity"; // fallback when no event filter is active
pub const UNKNOWN_POI_NAME: &str = "Unknown";

// Service Endpoints
pub const GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const OVERPASS_BASE_URL: &str = "https://overpass-api.de/api/interpreter";
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const HTTP_USER_AGENT: &str = concat!("sampamap/", env!("CARGO_PKG_VERSION"));

// Marker Icons
pub const THEATRE_ICON_URL: &str = "https://example.com/path-to-theatre-icon.png";
pub const ARTS_CENTRE_ICON_URL: &str = "https://example.com/path-to-arts-centre-icon.png";
pub const SPORTS_ICON_URL: &str = "https://example.com/path-to-sports-icon.png";
pub const BATTLE_RAP_ICON_URL: &str = "https://example.com/path-to-battle-rap-icon.png";
pub const DEFAULT_ICON_URL: &str = "https://example.com/path-to-default-icon.png";

// Addresses geocoded into markers at session start
pub const SEED_ADDRESSES: [&str; 5] = [
    "Avenida Paulista, 1000, Bela Vista, São Paulo",
    "Rua Augusta, 1500, Consolação, São Paulo",
    "Praça da Sé, Sé, São Paulo",
    "Avenida Brás Leme, 1000, Santana, São Paulo",
    "Avenida Indianópolis, 1000, Moema, São Paulo",
];
