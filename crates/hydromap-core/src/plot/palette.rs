use crate::engine::classify::SchemeKind;
use plotters::style::RGBColor;
use plotters::style::colors::RED;

pub const SALMON: RGBColor = RGBColor(250, 128, 114);
pub const SKYBLUE: RGBColor = RGBColor(135, 206, 235);
pub const LIMEGREEN: RGBColor = RGBColor(50, 205, 50);
pub const DODGERBLUE: RGBColor = RGBColor(30, 144, 255);
pub const WEB_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const GOLD: RGBColor = RGBColor(255, 215, 0);
pub const DARKORANGE: RGBColor = RGBColor(255, 140, 0);
pub const ORCHID: RGBColor = RGBColor(218, 112, 214);
pub const MAGENTA: RGBColor = RGBColor(255, 0, 255);
pub const TAN: RGBColor = RGBColor(210, 180, 140);
pub const PERU: RGBColor = RGBColor(205, 133, 63);
pub const LIGHTGRAY: RGBColor = RGBColor(211, 211, 211);
pub const DIMGRAY: RGBColor = RGBColor(105, 105, 105);

/// The two fills of one category: its muted base tone for dry wedges and
/// composition figures, and a saturated tone for wetted ensemble wedges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryColors {
    pub base: RGBColor,
    pub wet: RGBColor,
}

const BURIAL_COLORS: [CategoryColors; 2] = [
    CategoryColors {
        base: SALMON,
        wet: RED,
    },
    CategoryColors {
        base: SKYBLUE,
        wet: DODGERBLUE,
    },
];

const RESIDUE_TYPE_COLORS: [CategoryColors; 3] = [
    CategoryColors {
        base: LIMEGREEN,
        wet: WEB_GREEN,
    },
    CategoryColors {
        base: SALMON,
        wet: RED,
    },
    CategoryColors {
        base: SKYBLUE,
        wet: DODGERBLUE,
    },
];

const POLARITY_COLORS: [CategoryColors; 2] = [
    CategoryColors {
        base: SKYBLUE,
        wet: DODGERBLUE,
    },
    CategoryColors {
        base: SALMON,
        wet: RED,
    },
];

// Order follows the STRIDE class letters H, G, I, E, T, B, C.
const SECONDARY_STRUCTURE_COLORS: [CategoryColors; 7] = [
    CategoryColors {
        base: SALMON,
        wet: RED,
    },
    CategoryColors {
        base: GOLD,
        wet: DARKORANGE,
    },
    CategoryColors {
        base: ORCHID,
        wet: MAGENTA,
    },
    CategoryColors {
        base: SKYBLUE,
        wet: DODGERBLUE,
    },
    CategoryColors {
        base: LIMEGREEN,
        wet: WEB_GREEN,
    },
    CategoryColors {
        base: TAN,
        wet: PERU,
    },
    CategoryColors {
        base: LIGHTGRAY,
        wet: DIMGRAY,
    },
];

/// Returns the category colors of a scheme, parallel to its labels.
pub fn scheme_colors(kind: SchemeKind) -> &'static [CategoryColors] {
    match kind {
        SchemeKind::Burial => &BURIAL_COLORS,
        SchemeKind::ResidueType => &RESIDUE_TYPE_COLORS,
        SchemeKind::Polarity => &POLARITY_COLORS,
        SchemeKind::SecondaryStructure => &SECONDARY_STRUCTURE_COLORS,
    }
}
