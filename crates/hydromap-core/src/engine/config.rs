use crate::core::chem;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("No classification scheme is enabled")]
    NoSchemeEnabled,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Tunable constants of the classification schemes.
///
/// These are the knobs that were hard-coded in earlier analysis scripts:
/// the absolute-charge cutoff separating charged from uncharged residues,
/// the residue names treated as hydrophobic, and the per-force-field
/// atom-name corrections applied before polarity-scale lookups. A TOML file
/// can override any subset; omitted keys keep the built-in defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ClassificationSettings {
    /// Residues with |total charge| above this value classify as charged.
    #[serde(rename = "charged-cutoff")]
    pub charged_cutoff: f64,
    /// Residue names classified as hydrophobic when not charged.
    #[serde(rename = "hydrophobic-residues")]
    pub hydrophobic_residues: Vec<String>,
    /// Per-force-field atom-name rewrites applied before scale lookups.
    #[serde(rename = "forcefield-corrections")]
    pub forcefield_corrections: HashMap<String, HashMap<String, String>>,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        let mut forcefield_corrections = HashMap::new();
        let amber: HashMap<String, String> =
            chem::default_atom_aliases("amber99sb").into_iter().collect();
        forcefield_corrections.insert("amber99sb".to_string(), amber);

        Self {
            charged_cutoff: 0.5,
            hydrophobic_residues: chem::default_hydrophobic_residues(),
            forcefield_corrections,
        }
    }
}

impl ClassificationSettings {
    /// Loads settings from a TOML file, filling omitted keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read and
    /// [`SettingsError::Toml`] when it does not parse.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| SettingsError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Checks whether a residue name is configured as hydrophobic.
    pub fn is_hydrophobic(&self, residue_name: &str) -> bool {
        let trimmed = residue_name.trim();
        self.hydrophobic_residues.iter().any(|name| name == trimmed)
    }

    /// Resolves an atom name through the corrections of a force field.
    ///
    /// Names without a correction, and force fields without a correction
    /// table, pass through unchanged.
    pub fn corrected_atom_name<'a>(&'a self, force_field: &str, atom_name: &'a str) -> &'a str {
        let trimmed = atom_name.trim();
        self.forcefield_corrections
            .get(force_field)
            .and_then(|table| table.get(trimmed))
            .map(String::as_str)
            .unwrap_or(trimmed)
    }
}

/// The three-number specification of the phi threshold ladder.
///
/// Thresholds are generated as `steps` evenly spaced values from `start`
/// down to `end` (both included), preceded by a repeat of `start` and an
/// infinite sentinel so the first bin captures atoms above every finite
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSpec {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

/// Default frame rate for movie encoding, in frames per second.
pub const DEFAULT_FRAME_RATE: u32 = 5;
/// Default video codec passed to the encoder.
pub const DEFAULT_CODEC: &str = "mpeg4";
/// Default video bitrate passed to the encoder.
pub const DEFAULT_BITRATE: &str = "40M";
/// Default raster resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Options for stitching rendered frames into a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieOptions {
    pub frame_rate: u32,
    pub codec: String,
    pub bitrate: String,
}

impl Default for MovieOptions {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            codec: DEFAULT_CODEC.to_string(),
            bitrate: DEFAULT_BITRATE.to_string(),
        }
    }
}

/// Configuration of the burial classification scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct BurialSchemeConfig {
    /// CSV file with the per-atom buried indicator.
    pub flags_path: PathBuf,
    /// Frame path template containing a `{}` placeholder for the frame index.
    pub frame_template: String,
    /// Optional path for the cumulative-count line plot.
    pub series_plot_path: Option<PathBuf>,
}

/// Configuration of the residue-type classification scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueTypeSchemeConfig {
    pub frame_template: String,
    pub series_plot_path: Option<PathBuf>,
}

/// Configuration of the atom-polarity classification scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct PolaritySchemeConfig {
    /// CSV file with the per-atom polarity scale (e.g., Kapcha-Rossky).
    pub scale_path: PathBuf,
    /// Force field whose atom-name corrections apply before lookups.
    pub force_field: String,
    pub frame_template: String,
    pub series_plot_path: Option<PathBuf>,
}

/// Configuration of the secondary-structure classification scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryStructureSchemeConfig {
    /// CSV file with per-residue STRIDE class assignments.
    pub assignments_path: PathBuf,
    pub frame_template: String,
    pub series_plot_path: Option<PathBuf>,
}

/// Configuration for the hydration-characteristics workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct CharsConfig {
    /// Display name of the protein, used in figure titles.
    pub protein_name: String,
    /// PQR structure the per-atom arrays were computed from.
    pub structure_path: PathBuf,
    /// CSV file with the per-atom order parameters (phi_i*).
    pub order_parameters_path: PathBuf,
    /// The phi threshold ladder.
    pub bins: BinSpec,
    pub burial: Option<BurialSchemeConfig>,
    pub residue_type: Option<ResidueTypeSchemeConfig>,
    pub polarity: Option<PolaritySchemeConfig>,
    pub secondary_structure: Option<SecondaryStructureSchemeConfig>,
    pub settings: ClassificationSettings,
    /// Raster resolution for rendered frames.
    pub dpi: u32,
    /// Movie encoding options; `None` disables encoding.
    pub movie: Option<MovieOptions>,
    /// Directory for per-scheme cumulative-count CSV exports.
    pub series_csv_dir: Option<PathBuf>,
    /// Optional PDB output carrying phi_i* in the B-factor column.
    pub hydration_pdb_path: Option<PathBuf>,
}

#[derive(Default)]
pub struct CharsConfigBuilder {
    protein_name: Option<String>,
    structure_path: Option<PathBuf>,
    order_parameters_path: Option<PathBuf>,
    bins: Option<BinSpec>,
    burial: Option<BurialSchemeConfig>,
    residue_type: Option<ResidueTypeSchemeConfig>,
    polarity: Option<PolaritySchemeConfig>,
    secondary_structure: Option<SecondaryStructureSchemeConfig>,
    settings: Option<ClassificationSettings>,
    dpi: Option<u32>,
    movie: Option<MovieOptions>,
    no_movie: bool,
    series_csv_dir: Option<PathBuf>,
    hydration_pdb_path: Option<PathBuf>,
}

impl CharsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protein_name(mut self, name: &str) -> Self {
        self.protein_name = Some(name.to_string());
        self
    }
    pub fn structure_path(mut self, path: PathBuf) -> Self {
        self.structure_path = Some(path);
        self
    }
    pub fn order_parameters_path(mut self, path: PathBuf) -> Self {
        self.order_parameters_path = Some(path);
        self
    }
    pub fn bins(mut self, bins: BinSpec) -> Self {
        self.bins = Some(bins);
        self
    }
    pub fn burial(mut self, scheme: BurialSchemeConfig) -> Self {
        self.burial = Some(scheme);
        self
    }
    pub fn residue_type(mut self, scheme: ResidueTypeSchemeConfig) -> Self {
        self.residue_type = Some(scheme);
        self
    }
    pub fn polarity(mut self, scheme: PolaritySchemeConfig) -> Self {
        self.polarity = Some(scheme);
        self
    }
    pub fn secondary_structure(mut self, scheme: SecondaryStructureSchemeConfig) -> Self {
        self.secondary_structure = Some(scheme);
        self
    }
    pub fn settings(mut self, settings: ClassificationSettings) -> Self {
        self.settings = Some(settings);
        self
    }
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }
    pub fn movie(mut self, options: MovieOptions) -> Self {
        self.movie = Some(options);
        self
    }
    pub fn no_movie(mut self) -> Self {
        self.no_movie = true;
        self
    }
    pub fn series_csv_dir(mut self, dir: PathBuf) -> Self {
        self.series_csv_dir = Some(dir);
        self
    }
    pub fn hydration_pdb_path(mut self, path: PathBuf) -> Self {
        self.hydration_pdb_path = Some(path);
        self
    }

    pub fn build(self) -> Result<CharsConfig, ConfigError> {
        if self.burial.is_none()
            && self.residue_type.is_none()
            && self.polarity.is_none()
            && self.secondary_structure.is_none()
        {
            return Err(ConfigError::NoSchemeEnabled);
        }
        let movie = if self.no_movie {
            None
        } else {
            Some(self.movie.unwrap_or_default())
        };
        Ok(CharsConfig {
            protein_name: self
                .protein_name
                .ok_or(ConfigError::MissingParameter("protein_name"))?,
            structure_path: self
                .structure_path
                .ok_or(ConfigError::MissingParameter("structure_path"))?,
            order_parameters_path: self
                .order_parameters_path
                .ok_or(ConfigError::MissingParameter("order_parameters_path"))?,
            bins: self.bins.ok_or(ConfigError::MissingParameter("bins"))?,
            burial: self.burial,
            residue_type: self.residue_type,
            polarity: self.polarity,
            secondary_structure: self.secondary_structure,
            settings: self.settings.unwrap_or_default(),
            dpi: self.dpi.unwrap_or(DEFAULT_DPI),
            movie,
            series_csv_dir: self.series_csv_dir,
            hydration_pdb_path: self.hydration_pdb_path,
        })
    }
}

/// Configuration for the INDUS log averaging workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WatersConfig {
    /// The INDUS water-count log to analyse.
    pub log_path: PathBuf,
    /// Time (ps) to start averaging at; the first sample when absent.
    pub avg_start: Option<f64>,
    /// Time (ps) to stop averaging at; the last sample when absent.
    pub avg_end: Option<f64>,
    /// File to append the averaged observables to.
    pub append_path: Option<PathBuf>,
    /// Path of the time-series plot.
    pub plot_path: PathBuf,
    /// Raster resolution of the plot.
    pub dpi: u32,
}

#[derive(Default)]
pub struct WatersConfigBuilder {
    log_path: Option<PathBuf>,
    avg_start: Option<f64>,
    avg_end: Option<f64>,
    append_path: Option<PathBuf>,
    plot_path: Option<PathBuf>,
    dpi: Option<u32>,
}

impl WatersConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_path(mut self, path: PathBuf) -> Self {
        self.log_path = Some(path);
        self
    }
    pub fn avg_start(mut self, time: f64) -> Self {
        self.avg_start = Some(time);
        self
    }
    pub fn avg_end(mut self, time: f64) -> Self {
        self.avg_end = Some(time);
        self
    }
    pub fn append_path(mut self, path: PathBuf) -> Self {
        self.append_path = Some(path);
        self
    }
    pub fn plot_path(mut self, path: PathBuf) -> Self {
        self.plot_path = Some(path);
        self
    }
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn build(self) -> Result<WatersConfig, ConfigError> {
        Ok(WatersConfig {
            log_path: self
                .log_path
                .ok_or(ConfigError::MissingParameter("log_path"))?,
            avg_start: self.avg_start,
            avg_end: self.avg_end,
            append_path: self.append_path,
            plot_path: self
                .plot_path
                .unwrap_or_else(|| PathBuf::from("phiout.png")),
            dpi: self.dpi.unwrap_or(DEFAULT_DPI),
        })
    }
}
