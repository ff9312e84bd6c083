//! Command line front end for a directory of data sets

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nc_core::DataSetRecord;
use nc_data::{DataSetConfig, DataSetLibrary};

#[derive(Parser, Debug)]
#[command(name = "ncdata", version, about = "Manage saved neuroConstruct data sets", long_about = None)]
struct Args {
    /// Directory holding the data set files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// JSON configuration file (directory, extension, naming)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the data sets in the directory
    List,
    /// Print the points of a data set
    Show {
        /// Row number or reference
        target: String,
    },
    /// Create a new data set
    New {
        /// Reference of the new data set; a free name is suggested if omitted
        name: Option<String>,
    },
    /// Change the reference (and file name) of a data set
    Rename {
        target: String,
        new_name: String,
    },
    /// Delete a data set file
    Delete {
        target: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(args: &Args) -> Result<DataSetConfig> {
    let mut config = match &args.config {
        Some(path) => DataSetConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DataSetConfig::default(),
    };
    if let Some(dir) = &args.dir {
        config.directory = dir.clone();
    }
    Ok(config)
}

/// Resolve a row number or a reference to a row
fn resolve_row(library: &DataSetLibrary, target: &str) -> Result<usize> {
    if let Some(row) = library.find(target) {
        return Ok(row);
    }
    match target.parse::<usize>() {
        Ok(row) if row < library.len() => Ok(row),
        _ => bail!("No data set {:?} in {}", target, library.directory().display()),
    }
}

fn print_listing(library: &DataSetLibrary) {
    let format = &library.config().timestamp_format;
    println!("{:>4}  {:<24} {:<20} {:<24} Description", "Row", "File", "Last saved", "Data Set Reference");
    for (row, entry) in library.entries().iter().enumerate() {
        let description = entry.description().replace('\n', " - ");
        println!(
            "{:>4}  {:<24} {:<20} {:<24} {}",
            row,
            entry.file_name(),
            entry.last_saved(format),
            entry.reference(),
            description
        );
    }
}

fn print_record(record: &DataSetRecord) {
    println!("{}", record);
    println!("Description: {}", record.description);
    println!("Format: {}, colour: {}", record.graph_format, record.graph_colour);
    println!("X: {} ({}), Y: {} ({})", record.x_legend, record.x_unit, record.y_legend, record.y_unit);
    for point in record.points() {
        match &point.comment {
            Some(comment) => println!("{}\t{}\t// {}", point.x, point.y, comment),
            None => println!("{}\t{}", point.x, point.y),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(&args)?;
    info!("Using data set directory {}", config.directory.display());
    let library = DataSetLibrary::open(config).context("listing data sets")?;

    match &args.command {
        Command::List => print_listing(&library),
        Command::Show { target } => {
            let row = resolve_row(&library, target)?;
            let record = library.load(row)?;
            print_record(&record);
        }
        Command::New { name } => {
            let name = name.clone().unwrap_or_else(|| library.suggest_name());
            if library.find(&name).is_some() {
                bail!("A data set called {:?} already exists", name);
            }
            let record = library.create(&name)?;
            println!("Created {}", record.reference);
        }
        Command::Rename { target, new_name } => {
            let row = resolve_row(&library, target)?;
            if library.find(new_name).is_some_and(|other| other != row) {
                bail!("A data set called {:?} already exists", new_name);
            }
            let record = library.rename(row, new_name)?;
            println!("Renamed to {}", record.reference);
        }
        Command::Delete { target } => {
            let row = resolve_row(&library, target)?;
            let reference = library.entry(row)?.reference().to_string();
            library.delete(row)?;
            println!("Deleted {}", reference);
        }
    }

    Ok(())
}
