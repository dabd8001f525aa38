use crate::dataset::row::{BandwidthRow, RttRow};
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::io;

/// Result of trying to load a dataset.
///
/// A missing file is an ordinary outcome (the probe tool may not have
/// produced that dataset yet), so it is a variant the caller inspects, not
/// an error. Anything else that goes wrong while reading or parsing is.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<R> {
    Loaded(Vec<R>),
    SourceMissing,
}

// An integer, a float, and optionally further columns we don't care about
// (the probe tool appends a precomputed jitter column to the RTT file; we
// recompute jitter from the RTT sequence instead of trusting it).
const ROW_RE: &str = r"^\s*(\d+)\s*,\s*([+-]?[0-9]+(?:\.[0-9]+)?)\s*(?:,.*)?$";

/// Load the bandwidth dataset.
///
/// Expected columns (comma-separated):
/// payload,bandwidth
///
/// Example:
/// 64,120.50
pub fn load_bandwidth_file(path: &str) -> anyhow::Result<LoadOutcome<BandwidthRow>> {
    let Some(text) = source_text(path)? else {
        return Ok(LoadOutcome::SourceMissing);
    };
    let re = Regex::new(ROW_RE)?;

    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;

        if line.trim().is_empty() {
            continue;
        }

        // Skip header line if present.
        if line.contains("payload") && line.contains("bandwidth") {
            continue;
        }

        let caps = match re.captures(line) {
            Some(c) => c,
            None => {
                bail!(
                    "bandwidth dataset parse error at {}:{}: cannot parse line: {:?}",
                    path,
                    lno,
                    line
                );
            }
        };

        let payload: u64 = caps.get(1).unwrap().as_str().parse().with_context(|| {
            format!("bad payload at {}:{}", path, lno)
        })?;
        let bandwidth: f64 = caps.get(2).unwrap().as_str().parse().with_context(|| {
            format!("bad bandwidth at {}:{}", path, lno)
        })?;

        out.push(BandwidthRow { payload, bandwidth });
    }

    Ok(LoadOutcome::Loaded(out))
}

/// Load the jitter dataset.
///
/// Expected columns (comma-separated):
/// seq,rtt[,...]
///
/// Example:
/// 3,11.204,0.812
pub fn load_rtt_file(path: &str) -> anyhow::Result<LoadOutcome<RttRow>> {
    let Some(text) = source_text(path)? else {
        return Ok(LoadOutcome::SourceMissing);
    };
    let re = Regex::new(ROW_RE)?;

    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;

        if line.trim().is_empty() {
            continue;
        }

        // Skip header line if present.
        if line.contains("seq") && line.contains("rtt") {
            continue;
        }

        let caps = match re.captures(line) {
            Some(c) => c,
            None => {
                bail!(
                    "jitter dataset parse error at {}:{}: cannot parse line: {:?}",
                    path,
                    lno,
                    line
                );
            }
        };

        let seq: u32 = caps.get(1).unwrap().as_str().parse().with_context(|| {
            format!("bad seq at {}:{}", path, lno)
        })?;
        let rtt: f64 = caps.get(2).unwrap().as_str().parse().with_context(|| {
            format!("bad rtt at {}:{}", path, lno)
        })?;

        out.push(RttRow { seq, rtt });
    }

    Ok(LoadOutcome::Loaded(out))
}

/// Read a dataset file, mapping "file does not exist" to `None`.
fn source_text(path: &str) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("read dataset file {}", path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn write_fixture(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn loads_bandwidth_rows_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "bandwidth_data.csv",
            "payload,bandwidth\n64,120.50\n128,118.20\n256,95.00\n",
        );

        let outcome = load_bandwidth_file(&path).unwrap();
        assert_eq!(
            outcome,
            LoadOutcome::Loaded(vec![
                BandwidthRow { payload: 64, bandwidth: 120.50 },
                BandwidthRow { payload: 128, bandwidth: 118.20 },
                BandwidthRow { payload: 256, bandwidth: 95.00 },
            ])
        );
    }

    #[test]
    fn loads_rtt_rows_and_ignores_trailing_columns() {
        let dir = tempfile::tempdir().unwrap();
        // The probe tool writes a third, precomputed jitter column.
        let path = write_fixture(
            dir.path(),
            "jitter_data.csv",
            "seq,rtt,jitter\n1,10.0,0.0\n2,12.0,2.0\n3,9.0,-3.0\n",
        );

        let outcome = load_rtt_file(&path).unwrap();
        assert_eq!(
            outcome,
            LoadOutcome::Loaded(vec![
                RttRow { seq: 1, rtt: 10.0 },
                RttRow { seq: 2, rtt: 12.0 },
                RttRow { seq: 3, rtt: 9.0 },
            ])
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let outcome = load_bandwidth_file(path.to_str().unwrap()).unwrap();
        assert_eq!(outcome, LoadOutcome::SourceMissing);

        let outcome = load_rtt_file(path.to_str().unwrap()).unwrap();
        assert_eq!(outcome, LoadOutcome::SourceMissing);
    }

    #[test]
    fn malformed_row_aborts_with_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "bandwidth_data.csv",
            "payload,bandwidth\n64,120.50\nsixty-four,oops\n",
        );

        let err = load_bandwidth_file(&path).unwrap_err();
        assert!(err.to_string().contains(":3"), "unexpected error: {}", err);
    }

    #[test]
    fn blank_lines_and_header_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "jitter_data.csv",
            "\nseq,rtt\n\n1,10.5\n\n",
        );

        let outcome = load_rtt_file(&path).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded(vec![RttRow { seq: 1, rtt: 10.5 }]));
    }

    #[test]
    fn empty_file_loads_as_zero_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "bandwidth_data.csv", "payload,bandwidth\n");

        let outcome = load_bandwidth_file(&path).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded(vec![]));
    }
}
