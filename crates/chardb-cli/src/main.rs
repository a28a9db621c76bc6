//! Character database CLI
//!
//! Command-line tool for viewing, summarising, and exporting character databases.

use chardb_core::{
    export_to_file, Catalog, CatalogConfig, ExportFormat, SortDirection, SortField, SortSpec,
    TextSource, EXPORT_HEADERS,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chardb")]
#[command(about = "Game character database viewer", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the character table
    Show {
        #[command(flatten)]
        load: LoadArgs,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show catalog counts
    Stats {
        #[command(flatten)]
        load: LoadArgs,
    },

    /// Export the visible rows to a file
    Export {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file path (defaults to the config's export path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv or json); inferred from the extension if omitted
        #[arg(long)]
        format: Option<String>,
    },

    /// Create a config file template
    InitConfig {
        /// Output path for the config file
        #[arg(short, long, default_value = "chardb.json")]
        output: PathBuf,

        /// Sources to include (URL or file path)
        #[arg(short, long)]
        source: Vec<String>,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Text sources (URL or file path), tried in order; overrides the config
    #[arg(short, long)]
    source: Vec<String>,

    /// Config file
    #[arg(short, long, default_value = "chardb.json")]
    config: PathBuf,

    /// Field to sort by (name, damage, defense, energy-rate, move-speed, average, beast)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Hide beasts
    #[arg(long, conflicts_with = "only_beasts")]
    hide_beasts: bool,

    /// Show only beasts
    #[arg(long)]
    only_beasts: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "chardb=debug,chardb_core=debug"
    } else {
        "chardb=info,chardb_core=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> chardb_core::Result<()> {
    match command {
        Commands::Show { load, limit } => cmd_show(&load, limit),
        Commands::Stats { load } => cmd_stats(&load),
        Commands::Export {
            load,
            output,
            format,
        } => cmd_export(&load, output, format.as_deref()),
        Commands::InitConfig { output, source } => cmd_init_config(&output, &source),
    }
}

/// Load the config, apply CLI overrides, and load the catalog
fn open_catalog(load: &LoadArgs) -> chardb_core::Result<(Catalog, CatalogConfig)> {
    let mut config = CatalogConfig::load(&load.config)?;

    if !load.source.is_empty() {
        config.sources = load.source.iter().map(|s| TextSource::from_arg(s)).collect();
    }
    if load.hide_beasts {
        config.view.set_show_beasts(false);
    }
    if load.only_beasts {
        config.view.set_only_beasts(true);
    }

    let mut catalog = Catalog::new(config.view);
    catalog.reload(&config.sources)?;

    if let Some(field) = &load.sort {
        let field: SortField = field.parse()?;
        let direction = if load.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        catalog.apply_sort(SortSpec::new(field, direction));
    }

    Ok((catalog, config))
}

fn cmd_show(load: &LoadArgs, limit: Option<usize>) -> chardb_core::Result<()> {
    let (catalog, _) = open_catalog(load)?;
    let rows = catalog.export_rows();

    println!("{}", EXPORT_HEADERS.join("\t"));
    println!("{}", "-".repeat(EXPORT_HEADERS.len() * 12));

    let row_limit = limit.unwrap_or(rows.len());
    for row in rows.iter().take(row_limit) {
        let values: Vec<String> = (0..EXPORT_HEADERS.len())
            .filter_map(|col| row.cell(col))
            .collect();
        println!("{}", values.join("\t"));
    }

    if rows.len() > row_limit {
        println!("... ({} more rows)", rows.len() - row_limit);
    }

    Ok(())
}

fn cmd_stats(load: &LoadArgs) -> chardb_core::Result<()> {
    let (catalog, _) = open_catalog(load)?;
    let stats = catalog.stats();

    println!("Characters: {}", stats.total);
    println!("  Beasts: {}", stats.beasts);
    println!("  Non-beasts: {}", stats.non_beasts);
    println!("  Visible: {}", stats.visible);
    println!("Distinct names: {}", stats.distinct_names);
    println!("Names with multiple forms: {}", stats.multi_form_names);

    Ok(())
}

fn cmd_export(
    load: &LoadArgs,
    output: Option<PathBuf>,
    format: Option<&str>,
) -> chardb_core::Result<()> {
    let (catalog, config) = open_catalog(load)?;
    let output = output.unwrap_or(config.export_path);

    let format = match format {
        Some(f) => f.parse()?,
        None => ExportFormat::from_path(&output).unwrap_or(ExportFormat::Csv),
    };

    let rows = catalog.export_rows();
    export_to_file(&rows, format, &config.sheet_name, &output)?;

    println!("Exported {} rows to {}", rows.len(), output.display());

    Ok(())
}

fn cmd_init_config(output: &PathBuf, sources: &[String]) -> chardb_core::Result<()> {
    let mut config = CatalogConfig {
        sources: sources.iter().map(|s| TextSource::from_arg(s)).collect(),
        ..CatalogConfig::default()
    };

    // If no sources provided, add a placeholder
    if config.sources.is_empty() {
        config.sources.push(TextSource::from_arg("characters.txt"));
    }

    config.save(output)?;
    println!("Created config file: {}", output.display());
    println!("Sources: {}", config.sources.len());
    println!();
    println!("Edit the file to configure your sources, then run:");
    println!("  chardb show --config {}", output.display());

    Ok(())
}
