use super::error::WorkflowError;
use crate::core::io::indus::IndusLog;
use crate::engine::config::WatersConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::plot::series;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Outcome of the INDUS log averaging workflow.
#[derive(Debug, Clone)]
pub struct WatersResult {
    /// The bias value carried by the log's `mu` comment, if present.
    pub mu: Option<f64>,
    /// First frame of the averaging window.
    pub window_start: usize,
    /// One past the last frame of the averaging window.
    pub window_end: usize,
    pub mean_waters: f64,
    pub std_waters: f64,
    pub mean_coarse: f64,
    pub std_coarse: f64,
    pub plot_path: PathBuf,
    pub appended: Option<PathBuf>,
}

#[instrument(skip_all, name = "waters_workflow")]
pub fn run(config: &WatersConfig, reporter: &ProgressReporter) -> Result<WatersResult, WorkflowError> {
    // === Phase 0: Parse the log ===
    reporter.report(Progress::PhaseStart {
        name: "Parsing log",
    });
    info!(log = %config.log_path.display(), "Parsing INDUS water counts.");
    let log = IndusLog::read_from_path(&config.log_path)?;
    match log.mu {
        Some(mu) => info!(mu, samples = log.len(), "Parsed log."),
        None => info!(samples = log.len(), "Parsed log without a mu comment."),
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Average the window ===
    reporter.report(Progress::PhaseStart {
        name: "Averaging window",
    });
    let (window_start, window_end) = window_frames(&log, config.avg_start, config.avg_end)?;
    let (mean_waters, std_waters) = mean_and_std(&log.waters[window_start..window_end]);
    let (mean_coarse, std_coarse) = mean_and_std(&log.coarse_waters[window_start..window_end]);
    info!(
        window_start,
        window_end,
        mean_waters,
        std_waters,
        mean_coarse,
        std_coarse,
        "Averaged the windowed water counts."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Append the averages ===
    let appended = match &config.append_path {
        Some(path) => {
            let mu = log.mu.ok_or_else(|| {
                WorkflowError::Invalid(
                    "the log carries no mu comment to key the appended averages by".to_string(),
                )
            })?;
            append_averages(path, mu, mean_waters, std_waters, mean_coarse, std_coarse)?;
            info!(path = %path.display(), "Appended the averages.");
            Some(path.clone())
        }
        None => None,
    };

    // === Phase 3: Render the time series ===
    reporter.report(Progress::PhaseStart {
        name: "Rendering plot",
    });
    series::render_waters_series(
        &config.plot_path,
        &log.times,
        &log.waters,
        &log.coarse_waters,
        config.dpi,
    )?;
    info!(plot = %config.plot_path.display(), "Rendered the time series.");
    reporter.report(Progress::PhaseFinish);

    Ok(WatersResult {
        mu: log.mu,
        window_start,
        window_end,
        mean_waters,
        std_waters,
        mean_coarse,
        std_coarse,
        plot_path: config.plot_path.clone(),
        appended,
    })
}

/// Resolves the averaging window to frame indices `[start, end)`.
///
/// Times convert to frames by floor division against the sampling interval
/// and clamp to the sampled range; absent bounds default to the full series.
fn window_frames(
    log: &IndusLog,
    avg_start: Option<f64>,
    avg_end: Option<f64>,
) -> Result<(usize, usize), WorkflowError> {
    let samples = log.len();
    let mut start = 0;
    let mut end = samples;

    if avg_start.is_some() || avg_end.is_some() {
        let tstep = log.time_step();
        if !(tstep > 0.0) {
            return Err(WorkflowError::Invalid(format!(
                "cannot window by time: the sampling interval is {}",
                tstep
            )));
        }
        if let Some(time) = avg_start {
            start = frame_of(time, tstep, samples);
        }
        if let Some(time) = avg_end {
            end = frame_of(time, tstep, samples);
        }
    }

    if start >= end {
        return Err(WorkflowError::Invalid(format!(
            "the averaging window covers no samples (frames {} to {})",
            start, end
        )));
    }
    Ok((start, end))
}

fn frame_of(time: f64, tstep: f64, samples: usize) -> usize {
    let frame = (time / tstep).floor();
    if frame <= 0.0 {
        0
    } else {
        (frame as usize).min(samples)
    }
}

/// Returns the mean and population standard deviation of a window.
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn append_averages(
    path: &Path,
    mu: f64,
    mean_waters: f64,
    std_waters: f64,
    mean_coarse: f64,
    std_coarse: f64,
) -> Result<(), WorkflowError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| WorkflowError::io(path, e))?;
    writeln!(
        file,
        "{}  {}  {}  {}  {}",
        mu, mean_waters, std_waters, mean_coarse, std_coarse
    )
    .map_err(|e| WorkflowError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::WatersConfigBuilder;
    use std::fs;
    use tempfile::tempdir;

    const LOG: &str = "\
# GROMACS-INDUS umbrella sampling output
# mu = 5.25 kJ/mol
0.0  10.0  9.0
1.0  12.0  11.0
2.0  8.0  7.0
";

    fn write_log(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("indus.dat");
        fs::write(&path, content).unwrap();
        path
    }

    fn base_builder(dir: &Path, content: &str) -> WatersConfigBuilder {
        WatersConfigBuilder::new()
            .log_path(write_log(dir, content))
            .plot_path(dir.join("phiout.svg"))
            .dpi(60)
    }

    #[test]
    fn run_averages_the_requested_window() {
        let dir = tempdir().unwrap();
        let config = base_builder(dir.path(), LOG)
            .avg_start(0.0)
            .avg_end(2.0)
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new()).unwrap();

        // Frames [0, 2): the rows at t = 0 and t = 1.
        assert_eq!((result.window_start, result.window_end), (0, 2));
        assert_eq!(result.mean_waters, 11.0);
        assert_eq!(result.std_waters, 1.0);
        assert_eq!(result.mean_coarse, 10.0);
        assert_eq!(result.std_coarse, 1.0);
        assert_eq!(result.mu, Some(5.25));
        assert!(result.plot_path.exists());
    }

    #[test]
    fn run_defaults_to_the_full_series() {
        let dir = tempdir().unwrap();
        let config = base_builder(dir.path(), LOG).build().unwrap();

        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!((result.window_start, result.window_end), (0, 3));
        assert_eq!(result.mean_waters, 10.0);
        assert_eq!(result.mean_coarse, 9.0);
        assert!(result.appended.is_none());
    }

    #[test]
    fn run_appends_one_line_per_invocation() {
        let dir = tempdir().unwrap();
        let averages = dir.path().join("averages.dat");
        fs::write(&averages, "1.0  9.0  0.5  8.0  0.5\n").unwrap();
        let config = base_builder(dir.path(), LOG)
            .avg_start(0.0)
            .avg_end(2.0)
            .append_path(averages.clone())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.appended.as_deref(), Some(averages.as_path()));
        let content = fs::read_to_string(&averages).unwrap();
        assert_eq!(content, "1.0  9.0  0.5  8.0  0.5\n5.25  11  1  10  1\n");
    }

    #[test]
    fn run_refuses_to_append_without_a_mu_comment() {
        let dir = tempdir().unwrap();
        let averages = dir.path().join("averages.dat");
        let config = base_builder(dir.path(), "0.0  10.0  9.0\n1.0  12.0  11.0\n")
            .append_path(averages.clone())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());

        assert!(matches!(result, Err(WorkflowError::Invalid(_))));
        assert!(!averages.exists());
    }

    #[test]
    fn run_rejects_an_empty_averaging_window() {
        let dir = tempdir().unwrap();
        let config = base_builder(dir.path(), LOG)
            .avg_start(2.0)
            .avg_end(2.0)
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(WorkflowError::Invalid(_))));
    }

    #[test]
    fn window_frames_clamp_to_the_sampled_range() {
        let log = IndusLog {
            mu: None,
            times: vec![0.0, 0.5, 1.0, 1.5],
            waters: vec![1.0; 4],
            coarse_waters: vec![1.0; 4],
        };
        // Times beyond either end of the log clamp to the first and last frame.
        assert_eq!(window_frames(&log, Some(-3.0), Some(100.0)).unwrap(), (0, 4));
        // Fractional times floor toward the frame they fall in.
        assert_eq!(window_frames(&log, Some(0.6), Some(1.4)).unwrap(), (1, 2));
    }
}
