use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Path to a JSON map configuration file")]
    config: Option<String>,

    #[arg(long, help = "Override the geocoding service base URL")]
    geocoder_url: Option<String>,

    #[arg(long, help = "Override the spatial POI service base URL")]
    overpass_url: Option<String>,

    #[arg(long, default_value_t = false, help = "Skip geocoding the seed address list at startup")]
    skip_seed: bool,

    #[arg(short, long, default_value = "exports")]
    export_dir: String,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// Add getter methods for all fields
impl Args {
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn geocoder_url(&self) -> Option<&str> {
        self.geocoder_url.as_deref()
    }

    pub fn overpass_url(&self) -> Option<&str> {
        self.overpass_url.as_deref()
    }

    pub fn skip_seed(&self) -> bool {
        self.skip_seed
    }

    pub fn export_dir(&self) -> &str {
        &self.export_dir
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
