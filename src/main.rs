use anyhow::Context;
use clap::{Parser, Subcommand};
use geofinder::config::{AppConfig, SecretStore, API_KEY_VAR};
use geofinder::enrich::Field;
use geofinder::export;
use geofinder::interactive::Session;
use geofinder::place::{
    GeoFinder, PlaceRecord, SearchOutcome, SearchQuery, DEFAULT_LAT, DEFAULT_LIMIT, DEFAULT_LON,
    DEFAULT_RADIUS_M, MAX_LIMIT,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GeoFinder: nearby places with local time, currency and capital city.
///
/// Examples:
///   geofinder search --lat 38.7071 --lon -9.1355 --category catering
///   geofinder search --category catering --subcategory cafe --csv out.csv
///   geofinder categories catering
///   geofinder interactive
///   geofinder serve --port 8080
#[derive(Parser)]
#[command(name = "geofinder", version, about, long_about = None)]
struct Cli {
    /// Places API key.
    #[arg(long, env = "GEOAPIFY_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Places API endpoint.
    #[arg(long, env = "GEOFINDER_API_URL", global = true)]
    api_url: Option<String>,

    /// Category list, one dotted identifier per line.
    #[arg(long, env = "GEOFINDER_CATEGORIES", global = true)]
    categories: Option<PathBuf>,

    /// Country-to-currency mapping file.
    #[arg(long, env = "GEOFINDER_CURRENCIES", global = true)]
    currencies: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. info, geofinder=debug).
    #[arg(long, env = "GEOFINDER_LOG", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search once and print enriched results.
    Search {
        #[arg(long, default_value_t = DEFAULT_LAT, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, default_value_t = DEFAULT_LON, allow_hyphen_values = true)]
        lon: f64,

        /// Search radius in metres.
        #[arg(long, default_value_t = DEFAULT_RADIUS_M)]
        radius: f64,

        /// Parent category (e.g. catering) or full identifier.
        #[arg(long)]
        category: Option<String>,

        /// Child of --category, full (catering.cafe) or short (cafe).
        #[arg(long)]
        subcategory: Option<String>,

        #[arg(long, default_value_t = DEFAULT_LIMIT,
              value_parser = clap::value_parser!(u32).range(1..=MAX_LIMIT as i64))]
        limit: u32,

        /// Omit the proximity bias toward the centre.
        #[arg(long)]
        no_bias: bool,

        /// Also write the results as CSV.
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// List parent categories, or the children of one parent.
    Categories { parent: Option<String> },

    /// Prompt for searches until told to stop.
    Interactive,

    /// Serve the JSON API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

impl Cli {
    fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            api_key: self.api_key.clone(),
            api_url: self.api_url.clone().unwrap_or(defaults.api_url),
            categories_path: self.categories.clone().unwrap_or(defaults.categories_path),
            currencies_path: self.currencies.clone().unwrap_or(defaults.currencies_path),
            log_level: self.log.clone().unwrap_or(defaults.log_level),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = cli.config();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    config = config.with_secret_fallback(&SecretStore::discover());
    tracing::debug!(?config, "configuration");
    let finder = GeoFinder::from_config(&config);

    match cli.command {
        Command::Search {
            lat,
            lon,
            radius,
            category,
            subcategory,
            limit,
            no_bias,
            csv,
        } => {
            let catalog = finder.catalog();
            let parent = category.unwrap_or_else(|| catalog.default_category().to_string());
            let category = if parent.contains('.') {
                parent
            } else {
                catalog.select(&parent, subcategory.as_deref())
            };
            let mut query = SearchQuery::new(lat, lon, radius, category, limit)?;
            if no_bias {
                query = query.without_bias();
            }
            run_search(&finder, &query, csv)
        }
        Command::Categories { parent } => {
            list_categories(&finder, parent.as_deref());
            Ok(())
        }
        Command::Interactive => {
            if !finder.has_credential() {
                eprintln!("  Warning: {} is not set; searches will fail.", API_KEY_VAR);
            }
            let stdin = io::stdin();
            Session::new(&finder, stdin.lock(), io::stdout()).run()?;
            Ok(())
        }
        Command::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(geofinder::server::start(finder, &host, port))
        }
    }
}

fn run_search(finder: &GeoFinder, query: &SearchQuery, csv: Option<PathBuf>) -> anyhow::Result<()> {
    eprintln!("  GeoFinder: {}", query);

    let records = match finder.search(query) {
        SearchOutcome::Found(records) => records,
        SearchOutcome::Empty => {
            eprintln!("  No places found.");
            Vec::new()
        }
        SearchOutcome::Failed(e) => {
            eprintln!("  Warning: search failed: {}", e);
            std::process::exit(1);
        }
    };

    if !records.is_empty() {
        print_table(&records);
    }
    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
        export::write_csv(&records, BufWriter::new(file))?;
        eprintln!("  Wrote {} rows to {}", records.len(), path.display());
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn print_table(records: &[PlaceRecord]) {
    let cell = |f: Option<&Field>| f.map(Field::as_display).unwrap_or("N/A").to_string();
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            let e = r.enrichment.as_ref();
            [
                r.name.clone(),
                r.distance_m.map(|d| format!("{:.0}", d)).unwrap_or_default(),
                cell(e.map(|e| &e.local_time)),
                cell(e.map(|e| &e.currency)),
                cell(e.map(|e| &e.capital)),
            ]
        })
        .collect();

    let header = ["Name", "Dist (m)", "Local Time", "Currency", "Capital"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{:<w$}", c, w = w))
            .collect();
        eprintln!("  {}", padded.join("  ").trim_end());
    };
    eprintln!();
    line(&header);
    eprintln!("  {}", "─".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    for row in &rows {
        line(&row.each_ref().map(String::as_str));
    }
    eprintln!();
}

fn list_categories(finder: &GeoFinder, parent: Option<&str>) {
    let catalog = finder.catalog();
    match parent {
        Some(p) if catalog.contains_parent(p) => {
            for child in catalog.children(p) {
                println!("{}", child);
            }
        }
        Some(p) => eprintln!("  Unknown category '{}'.", p),
        None => {
            for p in catalog.parents() {
                println!("{}", p);
            }
        }
    }
}
