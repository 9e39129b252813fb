use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Parser;

use sampamap::cli::cli::Args;
use sampamap::config::map_config::MapConfig;
use sampamap::core::filter_state::{CategoryFilter, ZoneFilter};
use sampamap::core::session::{MapSession, SearchOutcome};
use sampamap::models::zone::ZoneKey;
use sampamap::utils::csv_export;
use sampamap::utils::logging;
use sampamap::view::scene::build_scene;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Parse command line arguments
    let args = Args::parse();

    logging::init_logging(args.verbose());

    println!("SampaMap: São Paulo zone and event explorer");

    let config = load_config(&args);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(&args, config))?;

    Ok(())
}

fn load_config(args: &Args) -> MapConfig {
    let mut config = match args.config() {
        Some(path) => match MapConfig::load_from_json(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Failed to load config from {}: {}. Using built-in defaults.",
                    path, e
                );
                MapConfig::default()
            }
        },
        None => MapConfig::default(),
    };

    if let Some(url) = args.geocoder_url() {
        config.geocoder_url = url.to_string();
    }
    if let Some(url) = args.overpass_url() {
        config.overpass_url = url.to_string();
    }
    config
}

async fn run(args: &Args, config: MapConfig) -> anyhow::Result<()> {
    let tile_url = config.tile_url.clone();
    let mut session = MapSession::new(&config)?;

    if !args.skip_seed() {
        match session.seed_markers().await {
            Ok(count) => println!("Seeded {} markers from the address list", count),
            Err(e) => eprintln!("Seeding failed: {}. Starting with an empty map.", e),
        }
    }

    print_summary(&session);
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "zone" => match rest.parse::<ZoneFilter>() {
                Ok(selection) => {
                    if let Err(e) = session.select_zone(selection).await {
                        eprintln!("Zone filter failed: {}", e);
                    }
                    print_summary(&session);
                }
                Err(e) => println!("{} (expected all, norte, sul, leste or oeste)", e),
            },
            "event" => match rest.parse::<CategoryFilter>() {
                Ok(selection) => {
                    if let Err(e) = session.select_category(selection).await {
                        eprintln!("Event filter failed: {}", e);
                    }
                    print_summary(&session);
                }
                Err(e) => println!(
                    "{} (expected all, theatre, arts_centre, sports or battle_rap)",
                    e
                ),
            },
            "search" => {
                if rest.is_empty() {
                    println!("Usage: search <address>");
                    continue;
                }
                match session.search(rest).await {
                    Ok(SearchOutcome::Added) => {
                        let view = session.coordinator().view();
                        println!("Marker added; map centered on {} (zoom {})", view.center, view.zoom);
                    }
                    Ok(SearchOutcome::NotFound) => {
                        println!("Address not found: {}", rest);
                    }
                    Ok(SearchOutcome::EmptyInput) => println!("Usage: search <address>"),
                    Err(e) => eprintln!("Search failed: {}", e),
                }
                print_summary(&session);
            }
            "grow" => match rest.parse::<ZoneKey>() {
                Ok(key) => match session.grow_zone(key) {
                    Ok(radius) => println!("Zone {} radius is now {} m", key, radius),
                    Err(e) => eprintln!("{}", e),
                },
                Err(e) => println!("{} (expected norte, sul, leste or oeste)", e),
            },
            "show" => {
                print_summary(&session);
                for marker in session.coordinator().markers() {
                    println!("  [{}] {}", marker.position, marker.label);
                }
            }
            "scene" => {
                let coordinator = session.coordinator();
                let scene = build_scene(
                    coordinator.view(),
                    coordinator.zones(),
                    coordinator.markers(),
                    &tile_url,
                );
                println!("{}", serde_json::to_string_pretty(&scene)?);
            }
            "export" => {
                let dir = if rest.is_empty() { args.export_dir() } else { rest };
                match csv_export::export_markers(dir, session.coordinator().markers()) {
                    Ok(path) => println!("Exported {} markers to {}", session.coordinator().markers().len(), path.display()),
                    Err(e) => eprintln!("Export failed: {}", e),
                }
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Unknown command: {}. Type 'help' for the command list.", command),
        }
    }

    Ok(())
}

fn print_summary(session: &MapSession) {
    let coordinator = session.coordinator();
    let state = coordinator.state();
    let view = coordinator.view();
    println!(
        "zone={} event={} | {} markers | center {} zoom {}",
        state.zone_filter,
        state.category_filter,
        coordinator.markers().len(),
        view.center,
        view.zoom,
    );
}

fn print_help() {
    println!("Commands:");
    println!("  zone <all|norte|sul|leste|oeste>                 scope POIs to a zone");
    println!("  event <all|theatre|arts_centre|sports|battle_rap> filter by event category");
    println!("  search <address>                                 geocode and pin an address");
    println!("  grow <zone>                                      widen a zone circle by 1000 m");
    println!("  show                                             list current markers");
    println!("  scene                                            print the render scene as JSON");
    println!("  export [dir]                                     write markers to a CSV file");
    println!("  quit                                             leave");
}
