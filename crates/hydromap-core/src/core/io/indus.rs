use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndusLogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("Log contains {found} data rows (at least 2 are required)")]
    TooShort { found: usize },
}

/// The parsed contents of an INDUS water-count log.
///
/// The log is the plain-text output of a biased simulation run: `#`-prefixed
/// comment lines followed by rows of exactly three floats (time in ps, the
/// instantaneous water count, and its coarse-grained counterpart). A comment
/// of the form `# mu = <value>` carries the bias value for the run.
#[derive(Debug, Clone, PartialEq)]
pub struct IndusLog {
    /// The bias value parsed from the `mu` comment, if present.
    pub mu: Option<f64>,
    /// Sample times in ps.
    pub times: Vec<f64>,
    /// Instantaneous water counts per sample.
    pub waters: Vec<f64>,
    /// Coarse-grained water counts per sample.
    pub coarse_waters: Vec<f64>,
}

impl IndusLog {
    /// Parses an INDUS log from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`IndusLogError::Malformed`] for any data row that does not
    /// hold exactly three floats, or for a `mu` comment whose value cannot
    /// be parsed; returns [`IndusLogError::TooShort`] when fewer than two
    /// data rows are present (the sampling interval is taken from the
    /// second row's time).
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, IndusLogError> {
        let mut mu = None;
        let mut times = Vec::new();
        let mut waters = Vec::new();
        let mut coarse_waters = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(comment) = trimmed.strip_prefix('#') {
                let tokens: Vec<&str> = comment.split_whitespace().collect();
                if tokens.first() == Some(&"mu") {
                    let value = tokens.get(2).ok_or_else(|| IndusLogError::Malformed {
                        line: line_num,
                        reason: "mu comment has no value".into(),
                    })?;
                    let parsed = value.parse().map_err(|_| IndusLogError::Malformed {
                        line: line_num,
                        reason: format!("invalid mu value '{}'", value),
                    })?;
                    mu = Some(parsed);
                }
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(IndusLogError::Malformed {
                    line: line_num,
                    reason: format!("expected 3 columns, found {}", fields.len()),
                });
            }
            let mut parsed = [0.0f64; 3];
            for (slot, field) in parsed.iter_mut().zip(&fields) {
                *slot = field.parse().map_err(|_| IndusLogError::Malformed {
                    line: line_num,
                    reason: format!("invalid float '{}'", field),
                })?;
            }
            times.push(parsed[0]);
            waters.push(parsed[1]);
            coarse_waters.push(parsed[2]);
        }

        if times.len() < 2 {
            return Err(IndusLogError::TooShort { found: times.len() });
        }
        Ok(Self {
            mu,
            times,
            waters,
            coarse_waters,
        })
    }

    /// Parses an INDUS log from a file path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, IndusLogError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Returns the sampling interval, taken from the second sample time.
    pub fn time_step(&self) -> f64 {
        self.times[1]
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const VALID_LOG: &str = "\
# GROMACS-INDUS umbrella sampling output
# mu = 5.25 kJ/mol
0.0  10.0  9.0
1.0  12.0  11.0
2.0  8.0  7.0
";

    fn parse(content: &str) -> Result<IndusLog, IndusLogError> {
        IndusLog::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn read_from_parses_columns_and_mu() {
        let log = parse(VALID_LOG).unwrap();
        assert_eq!(log.mu, Some(5.25));
        assert_eq!(log.times, vec![0.0, 1.0, 2.0]);
        assert_eq!(log.waters, vec![10.0, 12.0, 11.0]);
        assert_eq!(log.coarse_waters, vec![9.0, 11.0, 7.0]);
    }

    #[test]
    fn read_from_without_mu_comment_leaves_mu_unset() {
        let log = parse("0.0 10.0 9.0\n1.0 12.0 11.0\n").unwrap();
        assert_eq!(log.mu, None);
    }

    #[test]
    fn read_from_skips_blank_lines() {
        let log = parse("0.0 10.0 9.0\n\n1.0 12.0 11.0\n").unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn time_step_is_the_second_sample_time() {
        let log = parse("0.0 10.0 9.0\n0.5 12.0 11.0\n1.0 8.0 7.0\n").unwrap();
        assert_eq!(log.time_step(), 0.5);
    }

    #[test]
    fn read_from_fails_on_wrong_column_count() {
        let result = parse("0.0 10.0\n1.0 12.0\n");
        assert!(matches!(
            result,
            Err(IndusLogError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn read_from_fails_on_non_numeric_field() {
        let result = parse("0.0 ten 9.0\n1.0 12.0 11.0\n");
        assert!(matches!(
            result,
            Err(IndusLogError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn read_from_fails_on_malformed_mu_comment() {
        let result = parse("# mu = abc\n0.0 10.0 9.0\n1.0 12.0 11.0\n");
        assert!(matches!(
            result,
            Err(IndusLogError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn read_from_fails_with_fewer_than_two_rows() {
        let result = parse("# only comments\n0.0 10.0 9.0\n");
        assert!(matches!(result, Err(IndusLogError::TooShort { found: 1 })));
    }

    #[test]
    fn read_from_path_reads_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indus.dat");
        std::fs::write(&path, VALID_LOG).unwrap();

        let log = IndusLog::read_from_path(&path).unwrap();
        assert_eq!(log.len(), 3);
    }
}
