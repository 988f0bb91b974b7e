use super::canvas::{figure_size, is_svg};
use super::error::PlotError;
use super::palette::CategoryColors;
use crate::engine::binner::Frame;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// One pie wedge: its share, fill, and outer label.
#[derive(Debug, Clone, PartialEq)]
struct Wedge {
    size: f64,
    color: RGBColor,
    label: String,
}

/// Renders one frame of a classification scheme as a pie chart.
///
/// The backend follows the file extension: `.svg` renders as vector
/// graphics, everything else through the bitmap backend. Wedges with a
/// count of zero are dropped before drawing so their labels and
/// percentages never clutter the figure.
///
/// # Errors
///
/// Returns [`PlotError::Inconsistency`] when labels, colors, and the
/// frame's category counts disagree, and [`PlotError::Backend`] when the
/// drawing backend fails.
pub fn render_frame(
    path: &Path,
    frame: &Frame,
    protein_name: &str,
    labels: &[&'static str],
    colors: &[CategoryColors],
    dpi: u32,
) -> Result<(), PlotError> {
    if labels.len() != colors.len() || labels.len() != frame_categories(frame) {
        return Err(PlotError::Inconsistency(format!(
            "frame has {} categories, with {} labels and {} colors",
            frame_categories(frame),
            labels.len(),
            colors.len()
        )));
    }

    let wedges = frame_wedges(frame, labels, colors);
    let title = frame_title(frame, protein_name);
    let size = figure_size(dpi);

    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_frame(&root, &wedges, &title, dpi).map_err(|e| PlotError::backend(path, e))
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_frame(&root, &wedges, &title, dpi).map_err(|e| PlotError::backend(path, e))
    }
}

fn frame_categories(frame: &Frame) -> usize {
    match frame {
        Frame::Composition { totals } => totals.len(),
        Frame::Baseline { totals, .. } => totals.len(),
        Frame::Ensemble { totals, .. } => totals.len(),
    }
}

/// Expands a frame into its wedge sequence.
///
/// Composition frames carry one wedge per category. The sentinel-bin frame
/// interleaves a white hydrated wedge with the remainder of each category.
/// Ensemble frames interleave three wedges per category: the white
/// sentinel share, the saturated wetted share beyond it, and the still-dry
/// remainder, with only the dry wedge labeled.
fn frame_wedges(frame: &Frame, labels: &[&'static str], colors: &[CategoryColors]) -> Vec<Wedge> {
    let mut wedges = Vec::new();
    match frame {
        Frame::Composition { totals } => {
            for (category, &count) in totals.iter().enumerate() {
                wedges.push(Wedge {
                    size: count as f64,
                    color: colors[category].base,
                    label: labels[category].to_string(),
                });
            }
        }
        Frame::Baseline {
            baseline, totals, ..
        } => {
            for (category, &count) in totals.iter().enumerate() {
                wedges.push(Wedge {
                    size: baseline[category] as f64,
                    color: WHITE,
                    label: format!("{}-hydrated", labels[category]),
                });
                wedges.push(Wedge {
                    size: count.saturating_sub(baseline[category]) as f64,
                    color: colors[category].base,
                    label: labels[category].to_string(),
                });
            }
        }
        Frame::Ensemble {
            baseline,
            cumulative,
            totals,
            ..
        } => {
            for (category, &count) in totals.iter().enumerate() {
                wedges.push(Wedge {
                    size: baseline[category] as f64,
                    color: WHITE,
                    label: String::new(),
                });
                wedges.push(Wedge {
                    size: cumulative[category].saturating_sub(baseline[category]) as f64,
                    color: colors[category].wet,
                    label: String::new(),
                });
                wedges.push(Wedge {
                    size: count.saturating_sub(cumulative[category]) as f64,
                    color: colors[category].base,
                    label: labels[category].to_string(),
                });
            }
        }
    }
    wedges.retain(|wedge| wedge.size > 0.0);
    wedges
}

fn frame_title(frame: &Frame, protein_name: &str) -> String {
    match frame {
        Frame::Composition { .. } => format!("{} composition", protein_name),
        Frame::Baseline { start, .. } => {
            format!("Linear fit atoms (phi = {} <- inf)", start)
        }
        Frame::Ensemble { lower, start, .. } => {
            format!("phi = {:.2} <- {:.2}", lower, start)
        }
    }
}

fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    wedges: &[Wedge],
    title: &str,
    dpi: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (width, height) = root.dim_in_pixel();

    let title_style = TextStyle::from(("sans-serif", (dpi / 6).max(16)).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(
        title.to_string(),
        ((width / 2) as i32, (dpi / 12).max(8) as i32),
        title_style,
    ))?;

    if wedges.is_empty() {
        root.present()?;
        return Ok(());
    }

    let sizes: Vec<f64> = wedges.iter().map(|wedge| wedge.size).collect();
    let fills: Vec<RGBColor> = wedges.iter().map(|wedge| wedge.color).collect();
    let labels: Vec<String> = wedges.iter().map(|wedge| wedge.label.clone()).collect();

    let center = ((width / 2) as i32, (height / 2 + dpi / 12) as i32);
    let radius = f64::from(height) * 0.3;
    let mut pie = Pie::new(&center, &radius, &sizes, &fills, &labels);
    pie.label_style(("sans-serif", (dpi / 12).max(10)).into_font());
    pie.percentages(("sans-serif", (dpi / 15).max(8)).into_font());
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}
