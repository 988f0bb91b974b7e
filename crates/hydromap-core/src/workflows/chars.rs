use super::error::WorkflowError;
use super::movie::FfmpegEncoder;
use crate::core::io::pdb::PdbFile;
use crate::core::io::pqr::PqrFile;
use crate::core::io::tables;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::ProteinStructure;
use crate::engine::binner::HydrationBinner;
use crate::engine::bins;
use crate::engine::classify::{ClassificationTable, TallyLevel};
use crate::engine::config::CharsConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::plot::{palette, pie, series};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const FRAME_PLACEHOLDER: &str = "{}";

/// What one classification scheme produced.
#[derive(Debug, Clone)]
pub struct SchemeReport {
    pub scheme: &'static str,
    pub frames_written: usize,
    /// Selection atoms the scheme could not classify (polarity gaps).
    pub skipped_atoms: usize,
    pub series_plot: Option<PathBuf>,
    pub series_csv: Option<PathBuf>,
    pub movie: Option<PathBuf>,
}

/// Outcome of the hydration-characteristics workflow.
#[derive(Debug, Clone)]
pub struct CharsResult {
    pub atoms_selected: usize,
    /// Selection atoms at or below the lowest threshold, captured by no bin.
    pub uncovered_atoms: usize,
    pub schemes: Vec<SchemeReport>,
    pub hydration_pdb: Option<PathBuf>,
}

struct SchemeJob<'a> {
    table: ClassificationTable,
    frame_template: &'a str,
    series_plot_path: Option<&'a Path>,
}

#[instrument(skip_all, name = "chars_workflow")]
pub fn run(config: &CharsConfig, reporter: &ProgressReporter) -> Result<CharsResult, WorkflowError> {
    // === Phase 0: Load structure and per-atom arrays ===
    reporter.report(Progress::PhaseStart {
        name: "Loading inputs",
    });
    info!(
        structure = %config.structure_path.display(),
        "Loading structure and per-atom arrays."
    );

    let structure = PqrFile::read_from_path(&config.structure_path)?;
    let selection = structure.protein_heavy_atoms();
    if selection.is_empty() {
        return Err(WorkflowError::Invalid(
            "the structure contains no protein heavy atoms".to_string(),
        ));
    }
    let order_parameters = tables::load_order_parameters(&config.order_parameters_path)?;
    if order_parameters.len() != selection.len() {
        return Err(WorkflowError::Invalid(format!(
            "order parameters cover {} atoms but the heavy-atom selection has {}",
            order_parameters.len(),
            selection.len()
        )));
    }

    let thresholds = bins::build_thresholds(&config.bins)?;
    let binner = HydrationBinner::new(thresholds, &order_parameters)?;
    info!(
        atoms = selection.len(),
        bins = binner.bin_count(),
        uncovered = binner.uncovered_atoms(),
        "Assigned order parameters to threshold bins."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Build classification tables ===
    reporter.report(Progress::PhaseStart {
        name: "Classifying atoms",
    });
    let jobs = build_jobs(config, &structure, &selection)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Tabulate and render each scheme ===
    let mut schemes = Vec::with_capacity(jobs.len());
    for job in &jobs {
        schemes.push(run_scheme(job, &binner, config, reporter)?);
    }

    // === Phase 3: Write the hydration-colored structure ===
    let hydration_pdb = match &config.hydration_pdb_path {
        Some(path) => {
            info!(path = %path.display(), "Writing order parameters into the B-factor column.");
            PdbFile::write_to_path(&structure, &selection, &order_parameters, path)?;
            Some(path.clone())
        }
        None => None,
    };

    info!(schemes = schemes.len(), "Workflow complete.");
    Ok(CharsResult {
        atoms_selected: selection.len(),
        uncovered_atoms: binner.uncovered_atoms(),
        schemes,
        hydration_pdb,
    })
}

fn build_jobs<'a>(
    config: &'a CharsConfig,
    structure: &ProteinStructure,
    selection: &[usize],
) -> Result<Vec<SchemeJob<'a>>, WorkflowError> {
    let mut jobs = Vec::new();

    if let Some(cfg) = &config.burial {
        validate_template(&cfg.frame_template)?;
        let flags = tables::load_burial_flags(&cfg.flags_path)?;
        jobs.push(SchemeJob {
            table: ClassificationTable::burial(selection.len(), &flags)?,
            frame_template: &cfg.frame_template,
            series_plot_path: cfg.series_plot_path.as_deref(),
        });
    }

    if let Some(cfg) = &config.residue_type {
        validate_template(&cfg.frame_template)?;
        jobs.push(SchemeJob {
            table: ClassificationTable::residue_type(structure, selection, &config.settings)?,
            frame_template: &cfg.frame_template,
            series_plot_path: cfg.series_plot_path.as_deref(),
        });
    }

    if let Some(cfg) = &config.polarity {
        validate_template(&cfg.frame_template)?;
        let scale = tables::load_polarity_scale(&cfg.scale_path)?;
        let table = ClassificationTable::polarity(
            structure,
            selection,
            &scale,
            &cfg.force_field,
            &config.settings,
        )?;
        if table.skipped_atoms() > 0 {
            warn!(
                skipped = table.skipped_atoms(),
                "Atoms without a polarity entry are excluded from polar/nonpolar tallies."
            );
        }
        jobs.push(SchemeJob {
            table,
            frame_template: &cfg.frame_template,
            series_plot_path: cfg.series_plot_path.as_deref(),
        });
    }

    if let Some(cfg) = &config.secondary_structure {
        validate_template(&cfg.frame_template)?;
        let classes = tables::load_stride_classes(&cfg.assignments_path)?;
        jobs.push(SchemeJob {
            table: ClassificationTable::secondary_structure(structure, selection, &classes)?,
            frame_template: &cfg.frame_template,
            series_plot_path: cfg.series_plot_path.as_deref(),
        });
    }

    Ok(jobs)
}

fn run_scheme(
    job: &SchemeJob,
    binner: &HydrationBinner,
    config: &CharsConfig,
    reporter: &ProgressReporter,
) -> Result<SchemeReport, WorkflowError> {
    let name = job.table.kind().name();
    let output = binner.analyze(&job.table)?;
    let labels = job.table.labels();
    let colors = palette::scheme_colors(job.table.kind());

    let first_frame = frame_path(job.frame_template, 0);
    if let Some(parent) = first_frame.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| WorkflowError::io(parent, e))?;
        }
    }

    reporter.report(Progress::FrameSetStart {
        scheme: name.to_string(),
        total_frames: output.frames.len() as u64,
    });
    for (index, frame) in output.frames.iter().enumerate() {
        let path = frame_path(job.frame_template, index);
        pie::render_frame(&path, frame, &config.protein_name, labels, colors, config.dpi)?;
        reporter.report(Progress::FrameRendered);
    }
    reporter.report(Progress::FrameSetFinish);
    info!(scheme = name, frames = output.frames.len(), "Rendered frame set.");

    let series_plot = match job.series_plot_path {
        Some(path) => {
            let y_desc = match job.table.kind().level() {
                TallyLevel::Residue => "Residues",
                TallyLevel::Atom => "Atoms",
            };
            series::render_phi_series(
                path,
                &format!("{} {}", config.protein_name, name),
                y_desc,
                &output.series,
                labels,
                colors,
                config.dpi,
            )?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    let series_csv = match &config.series_csv_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|e| WorkflowError::io(dir, e))?;
            let path = dir.join(format!("{}_series.csv", name));
            let label_columns: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
            tables::write_series_csv(
                &path,
                &label_columns,
                &output.series.lower_bounds,
                &output.series.rows,
            )?;
            Some(path)
        }
        None => None,
    };

    let movie = match &config.movie {
        Some(options) => {
            let encoder = FfmpegEncoder::new(options);
            let target = movie_path(job.frame_template);
            match encoder.encode(&encoder_pattern(job.frame_template), &target) {
                Ok(()) => Some(target),
                Err(error) => {
                    warn!(scheme = name, %error, "Movie encoding failed; frames are kept on disk.");
                    reporter.report(Progress::Message(format!(
                        "Movie encoding for {} failed: {}",
                        name, error
                    )));
                    None
                }
            }
        }
        None => None,
    };

    Ok(SchemeReport {
        scheme: name,
        frames_written: output.frames.len(),
        skipped_atoms: job.table.skipped_atoms(),
        series_plot,
        series_csv,
        movie,
    })
}

fn validate_template(template: &str) -> Result<(), WorkflowError> {
    if !template.contains(FRAME_PLACEHOLDER) {
        return Err(WorkflowError::Invalid(format!(
            "frame template '{}' has no '{{}}' placeholder",
            template
        )));
    }
    Ok(())
}

fn frame_path(template: &str, index: usize) -> PathBuf {
    PathBuf::from(template.replacen(FRAME_PLACEHOLDER, &format!("{:05}", index), 1))
}

fn encoder_pattern(template: &str) -> String {
    template.replacen(FRAME_PLACEHOLDER, "%05d", 1)
}

fn movie_path(template: &str) -> PathBuf {
    PathBuf::from(template.replacen(FRAME_PLACEHOLDER, "", 1)).with_extension("mp4")
}
