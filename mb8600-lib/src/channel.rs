//! Decoders for the channel tables reported by the modem.
//!
//! Tables arrive as a single string: records are joined with `|+|` and the
//! fields of a record with `^`. Each record may end with a stray `^`
//! terminator, e.g.
//!
//! ```text
//! 1^Locked^QAM256^20^531.0^ 2.8^45.1^0^0^|+|2^Locked^QAM256^13^489.0^ 3.1^45.4^0^0^
//! ```

use crate::constants::{DOWNSTREAM_FIELD_COUNT, FIELD_SEPARATOR, RECORD_SEPARATOR, UPSTREAM_FIELD_COUNT};
use crate::error::HnapError;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownstreamChannel {
    pub channel: u32,
    pub lock_status: String,
    pub modulation: String,
    pub channel_id: u32,
    /// Frequency in MHz
    pub frequency: f64,
    /// Signal-to-noise ratio in dB
    pub signal_to_noise: f64,
    /// Power in dBmV
    pub power: f64,
    /// The modem reports wrapped counters as negative values
    pub corrected_errors: i64,
    pub uncorrected_errors: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamChannel {
    pub channel: u32,
    pub lock_status: String,
    pub channel_type: String,
    pub channel_id: u32,
    pub symbol_rate: u32,
    /// Frequency in MHz
    pub frequency: f64,
    /// Power in dBmV
    pub power: f64,
}

impl FromStr for DownstreamChannel {
    type Err = HnapError;

    /// Parse one record. Power precedes SNR on the wire.
    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let fields = Fields::split(record, DOWNSTREAM_FIELD_COUNT)?;
        Ok(DownstreamChannel {
            channel: fields.parse(0, "channel")?,
            lock_status: fields.text(1),
            modulation: fields.text(2),
            channel_id: fields.parse(3, "channel ID")?,
            frequency: fields.parse(4, "frequency")?,
            power: fields.parse(5, "power")?,
            signal_to_noise: fields.parse(6, "signal-to-noise ratio")?,
            corrected_errors: fields.parse(7, "corrected errors")?,
            uncorrected_errors: fields.parse(8, "uncorrected errors")?,
        })
    }
}

impl FromStr for UpstreamChannel {
    type Err = HnapError;

    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let fields = Fields::split(record, UPSTREAM_FIELD_COUNT)?;
        Ok(UpstreamChannel {
            channel: fields.parse(0, "channel")?,
            lock_status: fields.text(1),
            channel_type: fields.text(2),
            channel_id: fields.parse(3, "channel ID")?,
            symbol_rate: fields.parse(4, "symbol rate")?,
            frequency: fields.parse(5, "frequency")?,
            power: fields.parse(6, "power")?,
        })
    }
}

/// Decode a `MotoConnDownstreamChannel` string. Empty input yields no channels.
pub fn decode_downstream(raw: &str) -> Result<Vec<DownstreamChannel>, HnapError> {
    decode_records(raw)
}

/// Decode a `MotoConnUpstreamChannel` string. Empty input yields no channels.
pub fn decode_upstream(raw: &str) -> Result<Vec<UpstreamChannel>, HnapError> {
    decode_records(raw)
}

fn decode_records<R>(raw: &str) -> Result<Vec<R>, HnapError>
where
    R: FromStr<Err = HnapError>,
{
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(RECORD_SEPARATOR).map(str::parse::<R>).collect()
}

/// The `^`-separated fields of one record
struct Fields<'a> {
    record: &'a str,
    values: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(record: &'a str, expected: usize) -> Result<Self, HnapError> {
        let body = record.strip_suffix(FIELD_SEPARATOR).unwrap_or(record);
        let values: Vec<&str> = body.split(FIELD_SEPARATOR).collect();

        if values.len() > expected {
            return Err(HnapError::malformed_record(
                record,
                format!("too many fields: expected {}, got {}", expected, values.len()),
            ));
        }
        if values.len() < expected {
            return Err(HnapError::malformed_record(
                record,
                format!("too few fields: expected {}, got {}", expected, values.len()),
            ));
        }

        Ok(Self { record, values })
    }

    fn text(&self, index: usize) -> String {
        self.values[index].trim().to_string()
    }

    fn parse<N: FromStr>(&self, index: usize, name: &str) -> Result<N, HnapError> {
        let value = self.values[index].trim();
        value
            .parse()
            .map_err(|_| HnapError::malformed_record(self.record, format!("invalid {}: {:?}", name, value)))
    }
}
