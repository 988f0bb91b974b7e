use std::path::Path;

/// Figure size in inches, matching the aspect the frames were designed at.
const FIGURE_WIDTH_IN: u32 = 6;
const FIGURE_HEIGHT_IN: u32 = 4;

/// Returns the pixel dimensions of a figure at the given resolution.
pub(crate) fn figure_size(dpi: u32) -> (u32, u32) {
    (FIGURE_WIDTH_IN * dpi, FIGURE_HEIGHT_IN * dpi)
}

/// Selects the vector backend when the target carries an `.svg` extension;
/// every other extension renders through the bitmap backend.
pub(crate) fn is_svg(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}
