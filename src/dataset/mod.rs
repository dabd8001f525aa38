//! Parsing for the probe tool's measurement CSVs.

pub mod parse;
pub mod row;

pub use parse::{LoadOutcome, load_bandwidth_file, load_rtt_file};
pub use row::{BandwidthRow, RttRow};
