use super::classify::ClassificationTable;
use super::error::EngineError;

/// Per-frame category tallies, in the order a rendering sink consumes them.
///
/// Frame 0 shows the composition of the whole selection, frame 1 the
/// sentinel bin on its own, and every later frame one more rung of the
/// threshold ladder folded into the running union. `baseline`, `cumulative`
/// and `totals` are parallel to the scheme's category labels; a renderer
/// derives its wedges by subtraction (`cumulative - baseline` is the wetted
/// ensemble beyond the sentinel bin, `totals - cumulative` the remainder).
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Composition {
        totals: Vec<u64>,
    },
    Baseline {
        start: f64,
        baseline: Vec<u64>,
        totals: Vec<u64>,
    },
    Ensemble {
        lower: f64,
        start: f64,
        baseline: Vec<u64>,
        cumulative: Vec<u64>,
        totals: Vec<u64>,
    },
}

/// Cumulative category counts as a function of the descending threshold.
///
/// Row 0 holds the sentinel-bin tallies; row `r` tallies the union of the
/// sentinel bin and the first `r` finite bins. `lower_bounds[r]` is the
/// lowest threshold folded into row `r`, which makes the rows directly
/// plottable against phi.
#[derive(Debug, Clone, PartialEq)]
pub struct PhiSeries {
    pub lower_bounds: Vec<f64>,
    pub rows: Vec<Vec<u64>>,
}

impl PhiSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The full tabulation of one classification scheme over the ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeOutput {
    pub frames: Vec<Frame>,
    pub series: PhiSeries,
}

/// Assigns selection atoms to threshold bins and tabulates classification
/// schemes cumulatively over them.
///
/// Bin `i` (1-based) covers order parameters in `(thresholds[i],
/// thresholds[i-1]]`; since the ladder descends, the bins partition
/// everything above its lowest value and each atom lands in at most one
/// bin. Atoms at or below the lowest threshold belong to no bin and are
/// reported through [`HydrationBinner::uncovered_atoms`].
#[derive(Debug, Clone)]
pub struct HydrationBinner {
    thresholds: Vec<f64>,
    bin_sets: Vec<Vec<usize>>,
    atom_count: usize,
    covered: usize,
}

impl HydrationBinner {
    /// Builds the binner from a threshold ladder and the per-atom order
    /// parameters of the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when the ladder is shorter
    /// than two entries, contains a NaN, increases anywhere, or the
    /// selection is empty.
    pub fn new(thresholds: Vec<f64>, order_parameters: &[f64]) -> Result<Self, EngineError> {
        if thresholds.len() < 2 {
            return Err(EngineError::Configuration(format!(
                "threshold ladder needs at least 2 entries, got {}",
                thresholds.len()
            )));
        }
        if thresholds.iter().any(|t| t.is_nan()) {
            return Err(EngineError::Configuration(
                "threshold ladder contains NaN".to_string(),
            ));
        }
        if thresholds.windows(2).any(|pair| pair[0] < pair[1]) {
            return Err(EngineError::Configuration(
                "threshold ladder must be non-increasing".to_string(),
            ));
        }
        if order_parameters.is_empty() {
            return Err(EngineError::Configuration(
                "atom selection is empty".to_string(),
            ));
        }

        let mut bin_sets = Vec::with_capacity(thresholds.len() - 1);
        let mut covered = 0;
        for bin in 1..thresholds.len() {
            let (lower, upper) = (thresholds[bin], thresholds[bin - 1]);
            let positions: Vec<usize> = order_parameters
                .iter()
                .enumerate()
                .filter(|&(_, &phi)| phi > lower && phi <= upper)
                .map(|(position, _)| position)
                .collect();
            covered += positions.len();
            bin_sets.push(positions);
        }

        Ok(Self {
            thresholds,
            bin_sets,
            atom_count: order_parameters.len(),
            covered,
        })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Returns the number of bins (one fewer than the ladder length).
    pub fn bin_count(&self) -> usize {
        self.thresholds.len() - 1
    }

    /// Returns the ascending selection positions of bin `bin` (1-based).
    pub fn bin_positions(&self, bin: usize) -> &[usize] {
        &self.bin_sets[bin - 1]
    }

    /// Returns the number of frames a scheme analysis produces.
    pub fn frame_count(&self) -> usize {
        self.thresholds.len()
    }

    /// Returns the number of selection atoms captured by no bin.
    pub fn uncovered_atoms(&self) -> usize {
        self.atom_count - self.covered
    }

    /// Tabulates one classification scheme over the ladder.
    ///
    /// The returned frames are ordered for consumption: composition first,
    /// then the sentinel bin, then one frame per finite bin with the union
    /// grown by that bin. Because the bins are disjoint and every row
    /// tallies a superset of the previous one, the cumulative counts never
    /// decrease and never exceed the totals.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LengthMismatch`] when the table does not
    /// cover the selection the binner was built over.
    pub fn analyze(&self, table: &ClassificationTable) -> Result<SchemeOutput, EngineError> {
        if table.len() != self.atom_count {
            return Err(EngineError::LengthMismatch {
                scheme: table.kind().name(),
                expected: self.atom_count,
                found: table.len(),
            });
        }

        let start = self.thresholds[1];
        let totals = table.tally_full();
        let baseline = table.tally(&self.bin_sets[0]);

        let mut frames = Vec::with_capacity(self.frame_count());
        frames.push(Frame::Composition {
            totals: totals.clone(),
        });
        frames.push(Frame::Baseline {
            start,
            baseline: baseline.clone(),
            totals: totals.clone(),
        });

        let mut lower_bounds = vec![start];
        let mut rows = vec![baseline.clone()];
        let mut union = self.bin_sets[0].clone();
        for bin in 2..self.thresholds.len() {
            union.extend_from_slice(&self.bin_sets[bin - 1]);
            let cumulative = table.tally(&union);
            lower_bounds.push(self.thresholds[bin]);
            rows.push(cumulative.clone());
            frames.push(Frame::Ensemble {
                lower: self.thresholds[bin],
                start,
                baseline: baseline.clone(),
                cumulative,
                totals: totals.clone(),
            });
        }

        Ok(SchemeOutput {
            frames,
            series: PhiSeries { lower_bounds, rows },
        })
    }
}
