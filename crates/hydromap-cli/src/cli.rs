use clap::{Args, Parser, Subcommand};
use hydromap::engine::config::{DEFAULT_BITRATE, DEFAULT_CODEC, DEFAULT_DPI, DEFAULT_FRAME_RATE};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "HydroMap CLI - A command-line interface for mapping protein hydration from INDUS umbrella-sampling output.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bin per-atom dewetting order parameters and render classification frame sets.
    Chars(CharsArgs),
    /// Average an INDUS water-count log over a time window and plot its series.
    Waters(WatersArgs),
}

/// Arguments for the `chars` subcommand.
#[derive(Args, Debug)]
pub struct CharsArgs {
    // --- Core Arguments ---
    /// Name of the protein, used in figure titles.
    #[arg(short, long, required = true, value_name = "NAME")]
    pub name: String,

    /// Path to the input structure file (.pqr).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Path to the per-atom order parameter table (.csv).
    #[arg(short = 'p', long, required = true, value_name = "PATH")]
    pub order_parameters: PathBuf,

    /// Threshold ladder parameters: start value, end value, and step count.
    #[arg(
        long,
        required = true,
        num_args = 3,
        value_names = ["START", "END", "STEPS"],
        allow_negative_numbers = true
    )]
    pub phi_bins: Vec<f64>,

    // --- Buried/Surface Classification ---
    /// Per-atom buried indicator table (.csv).
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Buried/surface classification",
        requires = "buried_frames"
    )]
    pub buried_flags: Option<PathBuf>,

    /// Frame path template with a `{}` placeholder for the frame index.
    #[arg(
        long,
        value_name = "TEMPLATE",
        help_heading = "Buried/surface classification",
        requires = "buried_flags"
    )]
    pub buried_frames: Option<String>,

    /// Output path for the cumulative-count plot.
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Buried/surface classification",
        requires = "buried_frames"
    )]
    pub buried_plot: Option<PathBuf>,

    // --- Residue Type Classification ---
    /// Frame path template with a `{}` placeholder for the frame index.
    #[arg(
        long,
        value_name = "TEMPLATE",
        help_heading = "Residue type classification"
    )]
    pub restype_frames: Option<String>,

    /// Output path for the cumulative-count plot.
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Residue type classification",
        requires = "restype_frames"
    )]
    pub restype_plot: Option<PathBuf>,

    // --- Atom Polarity Classification ---
    /// Polarity scale table (.csv), e.g. the Kapcha-Rossky scale.
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Atom polarity classification",
        requires = "polarity_frames"
    )]
    pub polarity_scale: Option<PathBuf>,

    /// Force field whose atom-name corrections apply before scale lookups.
    #[arg(
        long,
        value_name = "NAME",
        default_value = "amber99sb",
        help_heading = "Atom polarity classification"
    )]
    pub force_field: String,

    /// Frame path template with a `{}` placeholder for the frame index.
    #[arg(
        long,
        value_name = "TEMPLATE",
        help_heading = "Atom polarity classification",
        requires = "polarity_scale"
    )]
    pub polarity_frames: Option<String>,

    /// Output path for the cumulative-count plot.
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Atom polarity classification",
        requires = "polarity_frames"
    )]
    pub polarity_plot: Option<PathBuf>,

    // --- Secondary Structure Classification ---
    /// Per-residue STRIDE class table (.csv).
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Secondary structure classification",
        requires = "ssclass_frames"
    )]
    pub stride_classes: Option<PathBuf>,

    /// Frame path template with a `{}` placeholder for the frame index.
    #[arg(
        long,
        value_name = "TEMPLATE",
        help_heading = "Secondary structure classification",
        requires = "stride_classes"
    )]
    pub ssclass_frames: Option<String>,

    /// Output path for the cumulative-count plot.
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "Secondary structure classification",
        requires = "ssclass_frames"
    )]
    pub ssclass_plot: Option<PathBuf>,

    // --- Output Options ---
    /// Path to a classification settings file in TOML format.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Raster resolution of rendered frames, in dots per inch.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_DPI)]
    pub dpi: u32,

    /// Frame rate of encoded movies, in frames per second.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_FRAME_RATE)]
    pub frame_rate: u32,

    /// Video codec passed to the encoder.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CODEC)]
    pub codec: String,

    /// Video bitrate passed to the encoder.
    #[arg(long, value_name = "RATE", default_value = DEFAULT_BITRATE)]
    pub bitrate: String,

    /// Render frames only; skip movie encoding.
    #[arg(long)]
    pub no_movie: bool,

    /// Directory for per-scheme cumulative-count CSV exports.
    #[arg(long, value_name = "DIR")]
    pub series_csv_dir: Option<PathBuf>,

    /// Write a PDB with order parameters in the B-factor column.
    #[arg(long, value_name = "PATH")]
    pub hydration_pdb: Option<PathBuf>,
}

/// Arguments for the `waters` subcommand.
#[derive(Args, Debug)]
pub struct WatersArgs {
    /// Path to the INDUS water-count log.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Time (ps) to start averaging at.
    #[arg(long, value_name = "TIME", allow_negative_numbers = true)]
    pub avg_start: Option<f64>,

    /// Time (ps) to stop averaging at.
    #[arg(long, value_name = "TIME", allow_negative_numbers = true)]
    pub avg_end: Option<f64>,

    /// File to append the averaged observables to.
    #[arg(long, value_name = "PATH")]
    pub avg_to: Option<PathBuf>,

    /// Path of the output image.
    #[arg(short, long, value_name = "PATH", default_value = "phiout.png")]
    pub output: PathBuf,

    /// Raster resolution of the output image, in dots per inch.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_DPI)]
    pub dpi: u32,
}
