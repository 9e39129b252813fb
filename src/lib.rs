// Module declarations for the sampamap explorer

// Core filter/search state machine
pub mod core {
    pub mod coordinator;
    pub mod filter_state;
    pub mod session;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod map_config;
}

// Model definitions
pub mod models {
    pub mod marker;
    pub mod zone;
}

// External service clients
pub mod data {
    pub mod geo;
    pub mod geocoder;
    pub mod overpass;
}

// Scene construction for the rendering surface
pub mod view {
    pub mod scene;
}

// Utility functions
pub mod utils {
    pub mod csv_export;
    pub mod logging;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::core::coordinator::FilterCoordinator;
pub use crate::core::session::MapSession;
pub use crate::data::geo::LatLon;
pub use crate::models::marker::Marker;
pub use crate::models::zone::{Zone, ZoneCatalog, ZoneKey};
