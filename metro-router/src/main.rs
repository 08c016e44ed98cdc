use std::io::{self, BufRead, Write};

use chrono::Local;
use tracing_subscriber::EnvFilter;

use metro_router::dataset::{
    self, DatasetCache, DatasetCacheConfig, DatasetClient, DatasetClientConfig,
};
use metro_router::domain::StationId;
use metro_router::graph::{GraphConfig, build_graph};
use metro_router::network::{StationNetwork, build_network};
use metro_router::planner::{Planner, RouteError};
use metro_router::report::RouteSummary;
use metro_router::resolve::{
    MatchResult, MatchSource, Selection, StationResolver, menu, parse_selection,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let graph_config = match GraphConfig::from_vars(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let client_config = match std::env::var("METRO_DATA_URL") {
        Ok(url) => DatasetClientConfig::new(url),
        Err(_) => DatasetClientConfig::default(),
    };
    let cache_config = match std::env::var("METRO_CACHE_PATH") {
        Ok(path) => DatasetCacheConfig::new(path),
        Err(_) => DatasetCacheConfig::default(),
    };

    println!("=== Metro Route Estimator ===");
    println!("Fetching station data...");

    let client = DatasetClient::new(client_config).expect("Failed to create dataset client");
    let cache = DatasetCache::new(cache_config);
    let collection = match dataset::load(&client, &cache).await {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("Error fetching data: {e}");
            std::process::exit(1);
        }
    };

    let (network, report) = match build_network(&collection) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    println!(
        "Loaded {} stations on {} lines ({} features skipped).",
        network.len(),
        network.lines().len(),
        report.features_skipped
    );

    // Stations and config are fixed for the session, so one graph serves every query.
    let graph = build_graph(&network, &graph_config);
    let planner = Planner::new(&network, &graph);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("{}", "-".repeat(30));

        let Some(from) = prompt_station(&mut input, &network, "Origin Station") else {
            break;
        };
        let Some(to) = prompt_station(&mut input, &network, "Destination Station") else {
            break;
        };

        match planner.plan(&from, &to) {
            Ok(route) => match RouteSummary::new(&route, &network, Local::now().naive_local()) {
                Ok(summary) => {
                    println!();
                    println!("{summary}");
                }
                Err(e) => eprintln!("Error: {e}"),
            },
            Err(RouteError::NoRoute { .. }) => println!("No route found (graph disconnected)."),
            Err(e) => eprintln!("Error: {e}"),
        }

        let again = read_line(&mut input, "\nCheck another route? (y/n): ");
        if !again.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")) {
            break;
        }
    }
}

/// Ask for a station until one is chosen. `None` means the user gave up.
fn prompt_station(
    input: &mut impl BufRead,
    network: &StationNetwork,
    label: &str,
) -> Option<StationId> {
    let resolver = StationResolver::new(network);

    loop {
        let query = read_line(input, &format!("{label}: "))?;

        let (candidates, source) = match resolver.resolve(&query) {
            MatchResult::Cancelled => return None,
            MatchResult::NoMatch => {
                println!("No matches found. Check spelling.");
                continue;
            }
            MatchResult::Candidates { stations, source } => (stations, source),
        };

        if source == MatchSource::Similarity {
            println!("No exact match. Did you mean...?");
        }

        if let [only] = candidates.as_slice() {
            println!("Selected: {}", only.display_name);
            return Some(only.id.clone());
        }

        println!("Multiple matches found:");
        for line in menu(&candidates) {
            println!("{line}");
        }

        let reply = read_line(input, "Select number (or Enter to search again): ")?;
        if let Selection::Chosen(index) = parse_selection(&reply, candidates.len()) {
            return Some(candidates[index].id.clone());
        }
    }
}

/// Print a prompt and read one line. `None` on end of input or read error.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}
