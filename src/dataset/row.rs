/// A single row of the bandwidth dataset: one payload size tested.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthRow {
    pub payload: u64,
    pub bandwidth: f64,
}

/// A single row of the jitter dataset: one echo probe.
#[derive(Debug, Clone, PartialEq)]
pub struct RttRow {
    pub seq: u32,
    pub rtt: f64,
}
