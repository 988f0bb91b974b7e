use super::canvas::{figure_size, is_svg};
use super::error::PlotError;
use super::palette::CategoryColors;
use crate::engine::binner::PhiSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::full_palette::ORANGE;
use std::path::Path;

/// Renders the cumulative category counts of a scheme against the
/// descending threshold, one line per category.
///
/// # Errors
///
/// Returns [`PlotError::Inconsistency`] when the series rows, labels, and
/// colors disagree, and [`PlotError::Backend`] when drawing fails.
pub fn render_phi_series(
    path: &Path,
    title: &str,
    y_desc: &str,
    series: &PhiSeries,
    labels: &[&'static str],
    colors: &[CategoryColors],
    dpi: u32,
) -> Result<(), PlotError> {
    if series.is_empty() || series.lower_bounds.len() != series.rows.len() {
        return Err(PlotError::Inconsistency(
            "series rows and lower bounds disagree".to_string(),
        ));
    }
    if labels.len() != colors.len() || series.rows.iter().any(|row| row.len() != labels.len()) {
        return Err(PlotError::Inconsistency(format!(
            "series categories do not match {} labels and {} colors",
            labels.len(),
            colors.len()
        )));
    }

    let size = figure_size(dpi);
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_phi_series(&root, title, y_desc, series, labels, colors, dpi)
            .map_err(|e| PlotError::backend(path, e))
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_phi_series(&root, title, y_desc, series, labels, colors, dpi)
            .map_err(|e| PlotError::backend(path, e))
    }
}

/// Renders the raw and coarse-grained water counts of an INDUS log against
/// simulation time.
pub fn render_waters_series(
    path: &Path,
    times: &[f64],
    waters: &[f64],
    coarse_waters: &[f64],
    dpi: u32,
) -> Result<(), PlotError> {
    if times.is_empty() || times.len() != waters.len() || times.len() != coarse_waters.len() {
        return Err(PlotError::Inconsistency(format!(
            "got {} times with {} and {} observable samples",
            times.len(),
            waters.len(),
            coarse_waters.len()
        )));
    }

    let size = figure_size(dpi);
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_waters_series(&root, times, waters, coarse_waters, dpi)
            .map_err(|e| PlotError::backend(path, e))
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_waters_series(&root, times, waters, coarse_waters, dpi)
            .map_err(|e| PlotError::backend(path, e))
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    (min, max)
}

fn draw_phi_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    series: &PhiSeries,
    labels: &[&'static str],
    colors: &[CategoryColors],
    dpi: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_range(series.lower_bounds.iter().copied());
    let y_max = series
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .fold(0u64, |max, &count| max.max(count));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", (dpi / 10).max(12)))
        .margin((dpi / 15).max(8))
        .x_label_area_size((dpi / 5).max(20))
        .y_label_area_size((dpi / 4).max(25))
        .build_cartesian_2d(x_min..x_max, 0.0..(y_max as f64 * 1.1).max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("phi")
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", (dpi / 12).max(10)))
        .draw()?;

    for (category, &label) in labels.iter().enumerate() {
        let color = colors[category].base;
        let points: Vec<(f64, f64)> = series
            .lower_bounds
            .iter()
            .zip(&series.rows)
            .map(|(&bound, row)| (bound, row[category] as f64))
            .collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_waters_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    times: &[f64],
    waters: &[f64],
    coarse_waters: &[f64],
    dpi: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_range(times.iter().copied());
    let (y_low, y_high) = padded_range(waters.iter().chain(coarse_waters).copied());
    let y_min = (y_low * 1.1).min(0.0);
    let y_max = (y_high * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .margin((dpi / 15).max(8))
        .x_label_area_size((dpi / 5).max(20))
        .y_label_area_size((dpi / 4).max(25))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time, in ps")
        .y_desc("N_v and coarse-grained N_v")
        .axis_desc_style(("sans-serif", (dpi / 12).max(10)))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            times.iter().zip(waters).map(|(&t, &n)| (t, n)),
            BLUE.stroke_width(2),
        ))?
        .label("N")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            times.iter().zip(coarse_waters).map(|(&t, &n)| (t, n)),
            ORANGE.stroke_width(2),
        ))?
        .label("N~")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify::SchemeKind;
    use crate::plot::palette::scheme_colors;
    use tempfile::tempdir;

    fn sample_series() -> PhiSeries {
        PhiSeries {
            lower_bounds: vec![3.0, 2.0, 1.0, 0.0],
            rows: vec![vec![0, 1], vec![1, 1], vec![1, 2], vec![2, 2]],
        }
    }

    #[test]
    fn phi_series_renders_a_vector_figure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.svg");

        render_phi_series(
            &path,
            "ubiquitin buried-surface",
            "Atoms",
            &sample_series(),
            &["Buried", "Surface"],
            scheme_colors(SchemeKind::Burial),
            100,
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn phi_series_accepts_a_single_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.svg");
        let series = PhiSeries {
            lower_bounds: vec![2.0],
            rows: vec![vec![1, 0]],
        };

        render_phi_series(
            &path,
            "ubiquitin buried-surface",
            "Atoms",
            &series,
            &["Buried", "Surface"],
            scheme_colors(SchemeKind::Burial),
            100,
        )
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn phi_series_rejects_mismatched_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.svg");
        let series = PhiSeries {
            lower_bounds: vec![2.0, 1.0],
            rows: vec![vec![1, 0]],
        };

        let result = render_phi_series(
            &path,
            "ubiquitin buried-surface",
            "Atoms",
            &series,
            &["Buried", "Surface"],
            scheme_colors(SchemeKind::Burial),
            100,
        );
        assert!(matches!(result, Err(PlotError::Inconsistency(_))));
    }

    #[test]
    fn waters_series_renders_both_observables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phiout.svg");
        let times = [0.0, 0.5, 1.0, 1.5];
        let waters = [30.0, 28.0, 31.0, 29.0];
        let coarse = [29.5, 28.2, 30.6, 29.1];

        render_waters_series(&path, &times, &waters, &coarse, 100).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn waters_series_rejects_ragged_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phiout.svg");

        let result = render_waters_series(&path, &[0.0, 0.5], &[30.0], &[29.5, 28.2], 100);
        assert!(matches!(result, Err(PlotError::Inconsistency(_))));
    }
}
