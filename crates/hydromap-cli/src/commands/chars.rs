use crate::cli::CharsArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use hydromap::engine::config::{
    BinSpec, BurialSchemeConfig, CharsConfig, CharsConfigBuilder, ClassificationSettings,
    MovieOptions, PolaritySchemeConfig, ResidueTypeSchemeConfig, SecondaryStructureSchemeConfig,
};
use hydromap::engine::progress::ProgressReporter;
use hydromap::workflows;
use tracing::info;

pub fn run(args: CharsArgs) -> Result<()> {
    let config = build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting hydration analysis...");
    info!("Invoking the characteristics workflow...");

    let result = workflows::chars::run(&config, &reporter)?;

    println!(
        "Binned {} heavy atoms ({} below the lowest threshold).",
        result.atoms_selected, result.uncovered_atoms
    );
    for report in &result.schemes {
        match &report.movie {
            Some(path) => println!(
                "✓ {}: {} frames rendered, movie written to: {}",
                report.scheme,
                report.frames_written,
                path.display()
            ),
            None => println!(
                "✓ {}: {} frames rendered.",
                report.scheme, report.frames_written
            ),
        }
        if report.skipped_atoms > 0 {
            println!(
                "  {} atoms had no scale entry and were left untallied.",
                report.skipped_atoms
            );
        }
    }
    if let Some(path) = &result.hydration_pdb {
        println!("✓ Hydration structure written to: {}", path.display());
    }

    Ok(())
}

fn build_config(args: &CharsArgs) -> Result<CharsConfig> {
    let bins = parse_bins(&args.phi_bins)?;
    let settings = match &args.settings {
        Some(path) => ClassificationSettings::load_from_path(path)?,
        None => ClassificationSettings::default(),
    };

    let mut builder = CharsConfigBuilder::new()
        .protein_name(&args.name)
        .structure_path(args.structure.clone())
        .order_parameters_path(args.order_parameters.clone())
        .bins(bins)
        .settings(settings)
        .dpi(args.dpi)
        .movie(MovieOptions {
            frame_rate: args.frame_rate,
            codec: args.codec.clone(),
            bitrate: args.bitrate.clone(),
        });
    if args.no_movie {
        builder = builder.no_movie();
    }

    if let (Some(flags), Some(frames)) = (&args.buried_flags, &args.buried_frames) {
        builder = builder.burial(BurialSchemeConfig {
            flags_path: flags.clone(),
            frame_template: frames.clone(),
            series_plot_path: args.buried_plot.clone(),
        });
    }
    if let Some(frames) = &args.restype_frames {
        builder = builder.residue_type(ResidueTypeSchemeConfig {
            frame_template: frames.clone(),
            series_plot_path: args.restype_plot.clone(),
        });
    }
    if let (Some(scale), Some(frames)) = (&args.polarity_scale, &args.polarity_frames) {
        builder = builder.polarity(PolaritySchemeConfig {
            scale_path: scale.clone(),
            force_field: args.force_field.clone(),
            frame_template: frames.clone(),
            series_plot_path: args.polarity_plot.clone(),
        });
    }
    if let (Some(classes), Some(frames)) = (&args.stride_classes, &args.ssclass_frames) {
        builder = builder.secondary_structure(SecondaryStructureSchemeConfig {
            assignments_path: classes.clone(),
            frame_template: frames.clone(),
            series_plot_path: args.ssclass_plot.clone(),
        });
    }
    if let Some(dir) = &args.series_csv_dir {
        builder = builder.series_csv_dir(dir.clone());
    }
    if let Some(path) = &args.hydration_pdb {
        builder = builder.hydration_pdb_path(path.clone());
    }

    Ok(builder.build()?)
}

fn parse_bins(values: &[f64]) -> Result<BinSpec> {
    // Clap's num_args(3) guarantees exactly three values.
    let steps = values[2];
    if steps < 0.0 || steps.fract() != 0.0 {
        return Err(CliError::Argument(format!(
            "the threshold step count must be a non-negative integer, got {}",
            steps
        )));
    }
    Ok(BinSpec {
        start: values[0],
        end: values[1],
        steps: steps as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bins_accepts_an_integral_step_count() {
        let bins = parse_bins(&[2.0, 0.0, 21.0]).unwrap();
        assert_eq!(
            bins,
            BinSpec {
                start: 2.0,
                end: 0.0,
                steps: 21,
            }
        );
    }

    #[test]
    fn parse_bins_rejects_fractional_and_negative_step_counts() {
        assert!(matches!(
            parse_bins(&[2.0, 0.0, 1.5]),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            parse_bins(&[2.0, 0.0, -3.0]),
            Err(CliError::Argument(_))
        ));
    }
}
