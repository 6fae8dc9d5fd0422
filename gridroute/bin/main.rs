use std::{
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use gridroute::{find::find_path, render::render_with, Grid, Legend};

/// Find the cheapest route from S to X through a character map and print the map with it marked
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Map file to read, standard input when missing or `-`
    map: Option<PathBuf>,

    /// JSON file overriding the map symbols, e.g. {"blocked": "#"}
    #[arg(long)]
    legend: Option<PathBuf>,

    /// Character used to mark the route
    #[arg(long)]
    marker: Option<char>,

    /// Print the route as JSON instead of the marked map
    #[arg(long)]
    json: bool,

    /// Print the total cost of the route after the map
    #[arg(long)]
    cost: bool,

    /// More log output, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn read_map(path: Option<&PathBuf>) -> Result<String, anyhow::Error> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read map {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read map from stdin")?;
            Ok(text)
        }
    }
}

fn load_legend(args: &Args) -> Result<Legend, anyhow::Error> {
    let mut legend = match &args.legend {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read legend {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse legend {}", path.display()))?
        }
        None => Legend::default(),
    };

    if let Some(marker) = args.marker {
        legend.path = marker;
    }

    legend.validate()?;
    Ok(legend)
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let level = match (args.quiet, args.verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let legend = load_legend(&args)?;
    let text = read_map(args.map.as_ref())?;

    let grid = Grid::parse_with(&text, &legend)?;
    log::info!("read {}x{} map", grid.rows(), grid.columns());

    let result = find_path(&grid)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_with(&text, &result.path, legend.path));
        if !text.ends_with('\n') {
            println!();
        }
        if args.cost {
            println!("cost: {}", result.total_cost);
        }
    }

    Ok(())
}
