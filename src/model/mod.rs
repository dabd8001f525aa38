//! Derivation of chart-ready series from raw measurement rows.

use crate::dataset::{BandwidthRow, RttRow};
use thiserror::Error;

/// One bar of the bandwidth chart. Payload size is a categorical label, not
/// a numeric position: bars stay evenly spaced even when the tested payload
/// sizes are not.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthBar {
    pub label: String,
    pub value: f64,
}

/// Map bandwidth rows to bars, one-to-one and order-preserving. Duplicate
/// payload sizes are kept as separate bars.
pub fn bandwidth_bars(rows: &[BandwidthRow]) -> Vec<BandwidthBar> {
    rows.iter()
        .map(|row| BandwidthBar {
            label: row.payload.to_string(),
            value: row.bandwidth,
        })
        .collect()
}

/// Signed first-difference jitter for one probe, keyed by the sequence
/// number of the later of the two probes it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterSample {
    pub seq: u32,
    pub jitter: f64,
}

/// Summary of an RTT sequence: the mean plus the derived jitter series.
///
/// The jitter series always has exactly one element fewer than the RTT
/// sequence it was derived from; the first probe has no predecessor and
/// therefore no jitter value.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub mean_rtt: f64,
    pub jitter: Vec<JitterSample>,
    pub mean_jitter: f64,
}

/// Fewer than two probes: no jitter series exists and its mean is undefined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("degenerate rtt series: {len} sample(s), need at least 2")]
pub struct DegenerateSeries {
    pub len: usize,
}

/// Derive mean RTT and the jitter series from raw probe rows.
///
/// Jitter is the signed difference between consecutive RTT samples, taken on
/// the raw sequence. No smoothing, clamping, or absolute value.
pub fn derive_quality(rows: &[RttRow]) -> Result<QualityReport, DegenerateSeries> {
    if rows.len() < 2 {
        return Err(DegenerateSeries { len: rows.len() });
    }

    let mean_rtt = rows.iter().map(|r| r.rtt).sum::<f64>() / rows.len() as f64;

    let jitter: Vec<JitterSample> = rows
        .windows(2)
        .map(|pair| JitterSample {
            seq: pair[1].seq,
            jitter: pair[1].rtt - pair[0].rtt,
        })
        .collect();

    let mean_jitter = jitter.iter().map(|s| s.jitter).sum::<f64>() / jitter.len() as f64;

    Ok(QualityReport {
        mean_rtt,
        jitter,
        mean_jitter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rtt_rows(samples: &[(u32, f64)]) -> Vec<RttRow> {
        samples.iter().map(|&(seq, rtt)| RttRow { seq, rtt }).collect()
    }

    #[test]
    fn bars_preserve_order_and_stringify_payload() {
        let rows = vec![
            BandwidthRow { payload: 64, bandwidth: 120.50 },
            BandwidthRow { payload: 128, bandwidth: 118.20 },
            BandwidthRow { payload: 256, bandwidth: 95.00 },
        ];

        let bars = bandwidth_bars(&rows);
        assert_eq!(
            bars,
            vec![
                BandwidthBar { label: "64".to_string(), value: 120.50 },
                BandwidthBar { label: "128".to_string(), value: 118.20 },
                BandwidthBar { label: "256".to_string(), value: 95.00 },
            ]
        );
    }

    #[test]
    fn duplicate_payloads_stay_separate_bars() {
        let rows = vec![
            BandwidthRow { payload: 64, bandwidth: 120.0 },
            BandwidthRow { payload: 64, bandwidth: 117.5 },
        ];

        let bars = bandwidth_bars(&rows);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, bars[1].label);
        assert_eq!(bars[1].value, 117.5);
    }

    #[test]
    fn mean_rtt_and_jitter_series() {
        let rows = rtt_rows(&[(1, 10.0), (2, 12.0), (3, 9.0), (4, 11.0)]);

        let report = derive_quality(&rows).unwrap();
        assert!((report.mean_rtt - 10.5).abs() < 1e-9);
        assert_eq!(
            report.jitter,
            vec![
                JitterSample { seq: 2, jitter: 2.0 },
                JitterSample { seq: 3, jitter: -3.0 },
                JitterSample { seq: 4, jitter: 2.0 },
            ]
        );
        assert!((report.mean_jitter - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn jitter_series_is_one_shorter_than_rtt_series() {
        let rows = rtt_rows(&[(1, 5.0), (2, 5.5), (3, 5.25), (4, 6.0), (5, 4.75)]);

        let report = derive_quality(&rows).unwrap();
        assert_eq!(report.jitter.len(), rows.len() - 1);
        for (pair, sample) in rows.windows(2).zip(&report.jitter) {
            assert_eq!(sample.seq, pair[1].seq);
            assert!((sample.jitter - (pair[1].rtt - pair[0].rtt)).abs() < 1e-9);
        }
    }

    #[test]
    fn fewer_than_two_probes_is_degenerate() {
        assert_eq!(derive_quality(&[]), Err(DegenerateSeries { len: 0 }));
        assert_eq!(
            derive_quality(&rtt_rows(&[(1, 10.0)])),
            Err(DegenerateSeries { len: 1 })
        );
    }

    #[test]
    fn negative_jitter_is_kept_signed() {
        let rows = rtt_rows(&[(1, 20.0), (2, 10.0)]);

        let report = derive_quality(&rows).unwrap();
        assert_eq!(report.jitter, vec![JitterSample { seq: 2, jitter: -10.0 }]);
        assert!((report.mean_jitter + 10.0).abs() < 1e-9);
    }
}
