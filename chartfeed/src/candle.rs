//! Canonical candle model and the normalisation step that converts raw
//! provider records into a clean, time-ordered, deduplicated series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalised OHLCV record keyed by a whole-second UTC timestamp.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct Candle {
    /// Candle open time in whole seconds since the UTC epoch.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Traded volume over the candle period, quote-denominated.
    pub volume: f64,
}

impl Candle {
    /// Candle open time as a UTC datetime, for display and log boundaries.
    pub fn time_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.time, 0).unwrap_or_else(Utc::now)
    }
}

/// Unit of a raw provider timestamp field.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TimestampUnit {
    Seconds,
    Millis,
}

impl TimestampUnit {
    /// Convert a raw timestamp to whole seconds, flooring when the source
    /// unit is milliseconds.
    pub fn to_seconds(&self, raw: i64) -> i64 {
        match self {
            TimestampUnit::Seconds => raw,
            TimestampUnit::Millis => raw.div_euclid(1000),
        }
    }
}

/// Field-mapping descriptor for a raw provider candle record: each provider
/// response type states how its fields project onto the canonical shape.
pub trait RawCandle {
    fn candle(&self) -> Candle;
}

/// Convert a raw provider array into the canonical candle sequence.
///
/// Upstream order is not guaranteed, so records are stable-sorted ascending
/// by timestamp; duplicate timestamps collapse to the last-seen record
/// (provider resend policy). An empty input yields an empty sequence, which
/// downstream consumers treat as "no data yet".
pub fn normalize<R>(raw: &[R]) -> Vec<Candle>
where
    R: RawCandle,
{
    let mut mapped: Vec<Candle> = raw.iter().map(RawCandle::candle).collect();
    // stable sort keeps arrival order within equal timestamps, so the
    // last-seen record survives the collapse below
    mapped.sort_by_key(|candle| candle.time);

    let mut candles: Vec<Candle> = Vec::with_capacity(mapped.len());
    for candle in mapped {
        match candles.last_mut() {
            Some(last) if last.time == candle.time => *last = candle,
            _ => candles.push(candle),
        }
    }
    candles
}
