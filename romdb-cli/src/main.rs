//! romdb CLI
//!
//! Converts the emulator's game database text files into SQLite and keeps
//! their product identifiers in line with an authoritative code list.

mod commands;
mod error;
mod settings;
mod summary;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romdb_rdb::Dialect;

use commands::convert::ConvertInputs;
use commands::lookup::{LookupKey, parse_crc};
use commands::update::UpdateOptions;
pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "romdb")]
#[command(about = "Convert and maintain the emulator game database", long_about = None)]
struct Cli {
    /// Directory holding the database text files (defaults to settings, then current directory)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// SQLite database path (defaults to settings, then <data-dir>/rom_database.sqlite)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Grammar of the file being updated.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    /// Line-walked settings databases (.rdb)
    Line,
    /// Block-split details database (.rdx)
    Block,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Line => Dialect::Line,
            DialectArg::Block => Dialect::Block,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the SQLite database from the text database files
    Convert {
        /// Core settings database (default: <data-dir>/Project64.rdb)
        #[arg(long)]
        core: Option<PathBuf>,

        /// Details database (default: <data-dir>/Project64.rdx)
        #[arg(long)]
        details: Option<PathBuf>,

        /// Audio settings database (default: <data-dir>/Audio.rdb)
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Video settings database (default: <data-dir>/Video.rdb)
        #[arg(long)]
        video: Option<PathBuf>,

        /// Setting descriptions text (default: <data-dir>/RDB Info.txt)
        #[arg(long)]
        info: Option<PathBuf>,

        /// Delete an existing database before converting
        #[arg(long)]
        fresh: bool,
    },

    /// Update ProductID values from an authoritative code list
    UpdateProductIds {
        /// Product code list (title and NUS-XXXX-XXX code per line)
        codes: PathBuf,

        /// Database file to update (default: <data-dir>/Project64.rdx)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Markdown summary output (default: <data-dir>/update_summary.md)
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Grammar of the file being updated
        #[arg(long, value_enum, default_value = "block")]
        dialect: DialectArg,

        /// Show planned updates without writing any files
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Look up a game in the SQLite database
    Lookup {
        /// Exact ROM identifier (e.g. 8F1B2A5A-FC3E9E0E-C:45)
        #[arg(conflicts_with_all = ["crc1", "crc2"], required_unless_present = "crc1")]
        rom_id: Option<String>,

        /// First header CRC, in hex
        #[arg(long, value_parser = parse_crc, requires = "crc2")]
        crc1: Option<u32>,

        /// Second header CRC, in hex
        #[arg(long, value_parser = parse_crc, requires = "crc1")]
        crc2: Option<u32>,

        /// Cartridge country code (letter or hex, e.g. E or 45)
        #[arg(long, default_value = "45")]
        country: String,
    },

    /// Assign a cartridge color to a game in the SQLite database
    SetColor {
        /// Exact ROM identifier
        rom_id: String,

        /// One of the known cartridge colors (e.g. Gold)
        color: String,
    },

    /// Show database statistics
    Stats,

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the settings file and resolved paths
    Show,
    /// Print the settings file path
    Path,
}

/// Print an empty line through the logger so output ordering is preserved.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logger(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        })
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = settings::load_settings()?;
    let paths = settings.resolve(cli.data_dir, cli.database);

    match cli.command {
        Commands::Convert {
            core,
            details,
            audio,
            video,
            info,
            fresh,
        } => commands::convert::run_convert(
            &paths,
            ConvertInputs {
                core,
                details,
                audio,
                video,
                info,
            },
            fresh,
        ),
        Commands::UpdateProductIds {
            codes,
            file,
            summary,
            dialect,
            dry_run,
        } => commands::update::run_update_product_ids(
            &paths,
            UpdateOptions {
                database_file: file,
                codes,
                summary,
                dialect: dialect.into(),
                dry_run,
            },
        ),
        Commands::Lookup {
            rom_id,
            crc1,
            crc2,
            country,
        } => {
            let key = match (rom_id, crc1, crc2) {
                (Some(rom_id), _, _) => LookupKey::RomId(rom_id),
                (None, Some(crc1), Some(crc2)) => LookupKey::Crc {
                    crc1,
                    crc2,
                    country,
                },
                _ => {
                    return Err(CliError::invalid_argument(
                        "Give a ROM identifier or both --crc1 and --crc2",
                    ));
                }
            };
            commands::lookup::run_lookup(&paths, key)
        }
        Commands::SetColor { rom_id, color } => {
            commands::color::run_set_color(&paths, &rom_id, &color)
        }
        Commands::Stats => commands::stats::run_stats(&paths),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&paths),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
