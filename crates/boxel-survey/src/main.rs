//! Command-line entry point for the `boxel-survey` tool.
//!
//! Decodes id64 system addresses, renders their names, and answers the two
//! surveying questions: which star in this boxel comes next, and which boxel
//! comes next along the layer's Hilbert curve.

use std::{
    io,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};

use anyhow::Result;
use boxel::{BoxelCoord, SectorCoord};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// CLI command implementations.
mod cmd;

/// A comma-separated coordinate triple parsed from `X,Y,Z`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Triple([u32; 3]);

impl FromStr for Triple {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(',').collect();
        let [x, y, z] = parts.as_slice() else {
            return Err("coordinates must be in X,Y,Z form".to_string());
        };
        let parse_axis = |label: &str, axis: &str| -> Result<u32, String> {
            axis.trim().parse::<u32>().map_err(|_| {
                format!("invalid {label} coordinate '{axis}': expected a non-negative integer")
            })
        };
        Ok(Self([parse_axis("X", x)?, parse_axis("Y", y)?, parse_axis("Z", z)?]))
    }
}

/// Parse an id64 given in decimal or as `0x`-prefixed hex.
fn parse_id64(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|_| format!("invalid id64 '{s}': expected a decimal or 0x-prefixed hex u64"))
}

#[derive(Parser)]
#[command(name = "boxel-survey")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top-level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, global = true, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    /// CSV sector list used to name sectors.
    #[arg(
        long = "sectors",
        global = true,
        env = "BOXEL_SECTORS",
        value_name = "CSV",
        help = "Sector list with 'id64 X', 'id64 Y', 'id64 Z' and 'Sector' columns"
    )]
    sectors: Option<PathBuf>,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Options that supply the known indices of a boxel.
#[derive(Args, Debug, Default)]
struct KnownArgs {
    /// Indices already catalogued in the boxel.
    #[arg(
        long = "known",
        value_name = "N",
        value_delimiter = ',',
        help = "Indices already catalogued in this boxel (repeatable, comma separated)"
    )]
    known: Vec<u32>,

    /// File of catalogued names, one per line.
    #[arg(
        long = "catalogue",
        value_name = "FILE",
        help = "File of catalogued system names, one per line"
    )]
    catalogue: Option<PathBuf>,

    /// Ignore known indices and step the index by one.
    #[arg(
        long = "include-known",
        default_value_t = false,
        help = "Do not skip known systems; just step the index by one"
    )]
    include_known: bool,
}

impl KnownArgs {
    /// Borrow these options as a [`cmd::KnownSource`].
    fn source(&self) -> cmd::KnownSource<'_> {
        cmd::KnownSource {
            indices: &self.known,
            catalogue: self.catalogue.as_deref(),
            include_known: self.include_known,
        }
    }
}

#[derive(Subcommand)]
/// Subcommands supported by the `boxel-survey` tool.
enum Commands {
    #[command(about = "Print every field of an id64")]
    /// Print every field of an id64.
    Decode {
        #[arg(help = "System address", value_parser = parse_id64)]
        /// System address.
        id64: u64,
    },

    #[command(about = "Pack fields into an id64")]
    /// Pack fields into an id64.
    Encode {
        #[arg(long = "mass-code", value_parser = clap::value_parser!(u8).range(0..=7))]
        /// Size class, 0 to 7.
        mass_code: u8,

        #[arg(long = "sector", value_name = "X,Y,Z", help = "Sector coordinates")]
        /// Sector coordinates.
        sector: Triple,

        #[arg(
            long = "boxel",
            value_name = "X,Y,Z",
            default_value = "0,0,0",
            help = "Boxel coordinates within the sector"
        )]
        /// Boxel coordinates.
        boxel: Triple,

        #[arg(long = "index", default_value_t = 0, help = "Object index within the boxel")]
        /// Object index.
        index: u32,

        #[arg(long = "body", default_value_t = 0, help = "Body identifier")]
        /// Body identifier.
        body: u32,
    },

    #[command(about = "Print the display name of an id64")]
    /// Print the display name of an id64.
    Name {
        #[arg(help = "System address", value_parser = parse_id64)]
        /// System address.
        id64: u64,
    },

    #[command(about = "Name the next uncatalogued star in the same boxel")]
    /// Name the next uncatalogued star in the same boxel.
    Next {
        #[arg(help = "System address", value_parser = parse_id64)]
        /// System address.
        id64: u64,

        /// Known-index options.
        #[command(flatten)]
        known: KnownArgs,
    },

    #[command(about = "Name the first star of the boxel OFFSET steps along the curve")]
    /// Name the first star of the boxel `offset` steps along the curve.
    Boxel {
        #[arg(help = "System address", value_parser = parse_id64)]
        /// System address.
        id64: u64,

        #[arg(
            long = "offset",
            default_value_t = 1,
            allow_negative_numbers = true,
            help = "Signed number of boxels to move along the curve"
        )]
        /// Signed curve offset.
        offset: i64,
    },

    #[command(about = "Print the curve position of an id64's boxel")]
    /// Print the curve position of an id64's boxel.
    Position {
        #[arg(help = "System address", value_parser = parse_id64)]
        /// System address.
        id64: u64,
    },

    #[command(about = "Split a boxel-addressed name into prefix and index")]
    /// Split a boxel-addressed name into prefix and index.
    Parse {
        #[arg(help = "System name")]
        /// System name.
        name: String,
    },

    #[command(about = "Print the id64 of a boxel-addressed name")]
    /// Print the id64 of a boxel-addressed name.
    Lookup {
        #[arg(help = "System name")]
        /// System name.
        name: String,
    },

    #[command(about = "Print the full survey for an id64")]
    /// Print the full survey for an id64.
    Survey {
        #[arg(help = "System address", value_parser = parse_id64)]
        /// System address.
        id64: u64,

        #[arg(
            long = "steps",
            default_value_t = 0,
            allow_negative_numbers = true,
            help = "Press the next (+) or previous (-) boxel control this many times"
        )]
        /// Stepper presses; negative steps backwards.
        steps: i64,

        /// Known-index options.
        #[command(flatten)]
        known: KnownArgs,
    },
}

/// Install a stderr subscriber at the level selected by `-v`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run the selected command and return its output.
fn run(command: Commands, sectors: Option<&Path>) -> Result<String> {
    let table = cmd::load_sectors(sectors)?;
    Ok(match command {
        Commands::Decode { id64 } => cmd::decode_fields(table, id64),
        Commands::Encode {
            mass_code,
            sector: Triple([sx, sy, sz]),
            boxel: Triple(boxel),
            index,
            body,
        } => cmd::encode_fields(cmd::EncodeFields {
            mass_code,
            sector: SectorCoord::new(sx, sy, sz),
            boxel: BoxelCoord::from(boxel),
            index,
            body_id: body,
        })?
        .to_string(),
        Commands::Name { id64 } => boxel::id64_to_name(id64),
        Commands::Next { id64, known } => cmd::next(table, id64, &known.source())?,
        Commands::Boxel { id64, offset } => cmd::boxel(table, id64, offset)?,
        Commands::Position { id64 } => cmd::position(table, id64)?,
        Commands::Parse { name } => cmd::parse_name(&name)?,
        Commands::Lookup { name } => cmd::lookup(table, &name)?.to_string(),
        Commands::Survey { id64, steps, known } => {
            cmd::survey(table, id64, steps, &known.source())?
        }
    })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.v);

    match run(cli.command, cli.sectors.as_deref()) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    }
}
