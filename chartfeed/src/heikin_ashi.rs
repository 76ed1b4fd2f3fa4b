//! Heikin-Ashi smoothing of the canonical candle sequence.

use crate::candle::Candle;

/// Derive the Heikin-Ashi representation of a candle sequence.
///
/// Each smoothed open depends on the previous smoothed candle, so this is a
/// strict left-to-right fold carrying `(prev_ha_open, prev_ha_close)`; it
/// cannot be computed per-index. The output has the same length and
/// timestamps as the input.
pub fn heikin_ashi(candles: &[Candle]) -> Vec<Candle> {
    let mut out = Vec::with_capacity(candles.len());
    let mut prev: Option<(f64, f64)> = None;

    for candle in candles {
        let ha_close = (candle.open + candle.high + candle.low + candle.close) / 4.0;
        let ha_open = match prev {
            Some((prev_open, prev_close)) => (prev_open + prev_close) / 2.0,
            None => (candle.open + candle.close) / 2.0,
        };
        let ha_high = candle.high.max(ha_open).max(ha_close);
        let ha_low = candle.low.min(ha_open).min(ha_close);

        out.push(Candle {
            time: candle.time,
            open: ha_open,
            high: ha_high,
            low: ha_low,
            close: ha_close,
            volume: candle.volume,
        });
        prev = Some((ha_open, ha_close));
    }
    out
}
