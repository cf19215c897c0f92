//! # choreworld
//!
//! Command-line entry point: builds the static site and sends the weekly
//! and bins-night reminders.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use chore_catalog::load_catalog;
use chore_notify::dispatch::{notify_bins, notify_week};
use chore_notify::{EndpointTable, NtfyClient, endpoints};
use chore_rota::{BinsSchedule, RotaCalendar, assign, assign_all};
use chore_site::{Builder, PageSpec};

/// Pages of the site: catalog file, template, and target path.
const PAGES: &[(&str, &str, &str)] = &[
    ("chch.yaml", "chch.jinja", "/"),
    ("welly.yaml", "welly.jinja", "/welly"),
];

/// Asset directories copied verbatim into every build, when present.
const STATIC_DIRS: &[&str] = &["static", "assets", "badges"];

/// Domain-pin file contents.
const CNAME: &str = "chore.world\n";

/// Generate chore.world and send chore reminders.
#[derive(Parser, Debug)]
#[command(name = "choreworld", about = "Generate chore.world and send chore reminders")]
struct Cli {
    /// Directory holding templates, static assets, and chore configs.
    #[arg(long, default_value = ".", global = true)]
    site_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the site and atomically publish it to the output directory.
    Generate {
        /// Output directory.
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Generate ntfy endpoints for each person.
    NtfyUrls {
        /// ntfy host endpoints are minted under.
        #[arg(long, default_value = "https://ntfy.sh")]
        host: String,

        /// Output path, or `-` for stdout.
        #[arg(long, short, default_value = "-")]
        output: String,

        /// Merge with the existing table at the output path, preserving
        /// previously issued endpoints.
        #[arg(long)]
        existing: bool,

        /// Pretty-print the table with this indent width.
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Send everyone their chores for the week.
    Notify {
        /// Endpoint table file.
        endpoints_file: PathBuf,
    },

    /// Remind whoever has the bins that they go out tonight.
    NotifyChchBins {
        /// Endpoint table file.
        endpoints_file: PathBuf,
    },
}

fn pages() -> Vec<PageSpec> {
    PAGES
        .iter()
        .map(|(config, template, path)| PageSpec::new(*config, *template, *path))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    chore_core::logging::init("info");
    let cli = Cli::parse();
    match cli.command {
        Command::Generate { output } => generate(&cli.site_dir, &output),
        Command::NtfyUrls {
            host,
            output,
            existing,
            indent,
        } => ntfy_urls(&cli.site_dir, &host, &output, existing, indent),
        Command::Notify { endpoints_file } => notify(&cli.site_dir, &endpoints_file).await,
        Command::NotifyChchBins { endpoints_file } => {
            notify_chch_bins(&cli.site_dir, &endpoints_file).await
        }
    }
}

/// Stage, render, and atomically publish the site.
fn generate(site_dir: &Path, output: &Path) -> Result<()> {
    let calendar = RotaCalendar::default();
    let now = calendar.now();
    let builder = Builder::stage(site_dir, output, calendar)?;

    for &dir in STATIC_DIRS {
        let src = site_dir.join(dir);
        if src.is_dir() {
            builder.copy_dir(&src, &format!("/{dir}"))?;
            info!(dir, "assets staged");
        }
    }
    builder.write_file("/CNAME", CNAME)?;
    builder.write_file("/.nojekyll", "")?;

    for page in pages() {
        builder.render_chores(&page, now)?;
    }

    let published = builder.finish()?;
    info!(output = %published.display(), "site generated");
    Ok(())
}

/// (Re)generate the endpoint table for everyone on a roster.
fn ntfy_urls(
    site_dir: &Path,
    host: &str,
    output: &str,
    existing: bool,
    indent: Option<usize>,
) -> Result<()> {
    let existing_table = if existing {
        let path = Path::new(output);
        if !path.exists() {
            bail!("path does not exist: {}", path.display());
        }
        endpoints::load(path)?
    } else {
        EndpointTable::new()
    };

    let mut rosters = BTreeMap::new();
    for (config, _, _) in PAGES {
        let catalog = load_catalog(&site_dir.join(config))
            .with_context(|| format!("loading {config}"))?;
        let mut people: Vec<String> = catalog
            .values()
            .flat_map(|group| group.people.iter().cloned())
            .collect();
        people.sort();
        people.dedup();
        let _ = rosters.insert((*config).to_string(), people);
    }

    let table = endpoints::generate(host, &rosters, &existing_table);
    let text = endpoints::render(&table, indent)?;
    if output == "-" {
        print!("{text}");
    } else {
        fs::write(output, text).with_context(|| format!("writing {output}"))?;
        info!(output, "endpoint table written");
    }
    Ok(())
}

/// Weekly fan-out: every person with at least one chore gets one message.
async fn notify(site_dir: &Path, endpoints_file: &Path) -> Result<()> {
    let calendar = RotaCalendar::default();
    let week = calendar.current_week();
    let table = endpoints::load(endpoints_file)?;
    let client = NtfyClient::new()?;

    let mut failures = 0usize;
    for (source, people) in &table {
        let catalog = load_catalog(&site_dir.join(source))
            .with_context(|| format!("loading {source}"))?;
        let assignments = assign_all(week.offset, &catalog)?;
        let outcomes = notify_week(&client, &catalog, &assignments, people).await;
        failures += outcomes.iter().filter(|o| !o.success).count();
    }
    if failures > 0 {
        warn!(failures, "some notifications were not delivered");
    }
    Ok(())
}

/// Targeted bins-night reminder for whoever holds the bins chore this week.
async fn notify_chch_bins(site_dir: &Path, endpoints_file: &Path) -> Result<()> {
    let calendar = RotaCalendar::default();
    let week = calendar.current_week();

    let catalog = load_catalog(&site_dir.join("chch.yaml")).context("loading chch.yaml")?;
    let main = catalog
        .get("main")
        .context("no 'main' group in chch.yaml")?;
    let assignments = assign(week.offset, main)?;
    let person = assignments
        .get("bins")
        .context("no 'bins' chore in the main group")?;

    let table = endpoints::load(endpoints_file)?;
    let endpoint = table
        .get("chch.yaml")
        .and_then(|people| people.get(person))
        .with_context(|| format!("no endpoint on file for {person}"))?;

    let colours = BinsSchedule::default().colours(week.sunday);
    let client = NtfyClient::new()?;
    let delivery = notify_bins(&client, person, endpoint, colours).await;
    if !delivery.success {
        warn!(person = %delivery.person, "bins reminder was not delivered");
    }
    Ok(())
}
