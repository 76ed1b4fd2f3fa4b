//! Derived indicator series computed over the canonical candle sequence.
//!
//! Every output point reuses the exact timestamp of its corresponding source
//! candle: the first output aligns with the candle at index `warm-up offset`
//! and each subsequent point follows positionally. Values are never
//! interpolated or re-timestamped. An off-by-one here silently shifts every
//! overlay against the candles, so alignment is covered explicitly by tests.
//!
//! Numeric conventions match the technical-indicators library the dashboard
//! chart originally delegated to: trailing SMA, SMA-seeded EMA with
//! `alpha = 2 / (period + 1)`, population standard deviation for the
//! Bollinger envelope, Wilder smoothing for RSI, and
//! `histogram = line - signal` for MACD.

use crate::candle::Candle;
use serde::{Deserialize, Serialize};

/// Single-value overlay point, positionally aligned with its source candle.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct Point {
    pub time: i64,
    pub value: f64,
}

/// Bollinger envelope point.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct BandPoint {
    pub time: i64,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// MACD line, signal line, and histogram point.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct MacdPoint {
    pub time: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Candle field an indicator reads its input values from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl Source {
    fn extract(&self, candle: &Candle) -> f64 {
        match self {
            Source::Open => candle.open,
            Source::High => candle.high,
            Source::Low => candle.low,
            Source::Close => candle.close,
        }
    }
}

/// Pure indicator configuration; holds no mutable state.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Sma { period: usize },
    Ema { period: usize },
    Bollinger { period: usize, std_dev: f64 },
    Rsi { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
}

/// Output of [`compute`], one variant per indicator family.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub enum DerivedSeries {
    Line(Vec<Point>),
    Bands(Vec<BandPoint>),
    Macd(Vec<MacdPoint>),
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        match self {
            DerivedSeries::Line(points) => points.len(),
            DerivedSeries::Bands(points) => points.len(),
            DerivedSeries::Macd(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute a derived series for one indicator specification.
///
/// Periods exceeding the candle count yield an empty series, not an error.
pub fn compute(candles: &[Candle], spec: &IndicatorSpec, source: Source) -> DerivedSeries {
    match *spec {
        IndicatorSpec::Sma { period } => DerivedSeries::Line(sma(candles, period, source)),
        IndicatorSpec::Ema { period } => DerivedSeries::Line(ema(candles, period, source)),
        IndicatorSpec::Bollinger { period, std_dev } => {
            DerivedSeries::Bands(bollinger(candles, period, std_dev, source))
        }
        IndicatorSpec::Rsi { period } => DerivedSeries::Line(rsi(candles, period, source)),
        IndicatorSpec::Macd { fast, slow, signal } => {
            DerivedSeries::Macd(macd(candles, fast, slow, signal, source))
        }
    }
}

/// Trailing simple moving average. Warm-up offset is `period - 1`.
pub fn sma(candles: &[Candle], period: usize, source: Source) -> Vec<Point> {
    let values = extract(candles, source);
    align(candles, period.saturating_sub(1), &sma_values(&values, period))
}

/// SMA-seeded exponential moving average. Warm-up offset is `period - 1`.
pub fn ema(candles: &[Candle], period: usize, source: Source) -> Vec<Point> {
    let values = extract(candles, source);
    align(candles, period.saturating_sub(1), &ema_values(&values, period))
}

/// Bollinger bands over a trailing SMA with a population standard deviation
/// envelope. Warm-up offset is `period - 1`.
pub fn bollinger(candles: &[Candle], period: usize, std_dev: f64, source: Source) -> Vec<BandPoint> {
    if period == 0 || candles.len() < period {
        return vec![];
    }

    let values = extract(candles, source);
    let offset = period - 1;

    values
        .windows(period)
        .zip(&candles[offset..])
        .map(|(window, candle)| {
            let mean = window.iter().sum::<f64>() / period as f64;
            let variance = window
                .iter()
                .map(|value| {
                    let diff = value - mean;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let band = std_dev * variance.sqrt();

            BandPoint {
                time: candle.time,
                upper: mean + band,
                middle: mean,
                lower: mean - band,
            }
        })
        .collect()
}

/// Relative strength index with Wilder smoothing. The first output needs
/// `period` deltas, so the warm-up offset is `period`.
pub fn rsi(candles: &[Candle], period: usize, source: Source) -> Vec<Point> {
    let values = extract(candles, source);
    align(candles, period, &rsi_values(&values, period))
}

/// MACD line (fast EMA minus slow EMA), EMA-smoothed signal line, and
/// histogram. Warm-up offset is `slow + signal - 2`.
pub fn macd(
    candles: &[Candle],
    fast: usize,
    slow: usize,
    signal: usize,
    source: Source,
) -> Vec<MacdPoint> {
    if fast == 0 || signal == 0 || fast >= slow || candles.len() < slow + signal - 1 {
        return vec![];
    }

    let values = extract(candles, source);
    let fast_ema = ema_values(&values, fast);
    let slow_ema = ema_values(&values, slow);

    // both EMAs are aligned to their own seed; drop the fast head so the
    // line starts where the slow EMA starts
    let line: Vec<f64> = fast_ema[slow - fast..]
        .iter()
        .zip(&slow_ema)
        .map(|(fast_value, slow_value)| fast_value - slow_value)
        .collect();

    let signal_line = ema_values(&line, signal);
    let offset = slow + signal - 2;

    line[signal - 1..]
        .iter()
        .zip(&signal_line)
        .zip(&candles[offset..])
        .map(|((line_value, signal_value), candle)| MacdPoint {
            time: candle.time,
            macd: *line_value,
            signal: *signal_value,
            histogram: line_value - signal_value,
        })
        .collect()
}

/// Close-price line series for the plain line chart, same length as the
/// candle sequence.
pub fn close_line(candles: &[Candle]) -> Vec<Point> {
    candles
        .iter()
        .map(|candle| Point {
            time: candle.time,
            value: candle.close,
        })
        .collect()
}

/// Signed volume histogram: positive for up-candles (close >= open),
/// negative for down-candles, same length as the candle sequence.
pub fn volume_histogram(candles: &[Candle]) -> Vec<Point> {
    candles
        .iter()
        .map(|candle| Point {
            time: candle.time,
            value: if candle.close >= candle.open {
                candle.volume
            } else {
                -candle.volume
            },
        })
        .collect()
}

fn extract(candles: &[Candle], source: Source) -> Vec<f64> {
    candles.iter().map(|candle| source.extract(candle)).collect()
}

/// Re-key raw indicator values onto candle timestamps starting at the
/// warm-up offset.
fn align(candles: &[Candle], offset: usize, values: &[f64]) -> Vec<Point> {
    if values.is_empty() || offset >= candles.len() {
        return vec![];
    }

    candles[offset..]
        .iter()
        .zip(values)
        .map(|(candle, value)| Point {
            time: candle.time,
            value: *value,
        })
        .collect()
}

fn sma_values(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    values
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period as f64)
        .collect()
}

fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);

    let mut prev = seed;
    for value in &values[period..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

fn rsi_values(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() <= period {
        return vec![];
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let delta = values[i] - values[i - 1];
        if delta >= 0.0 {
            gains += delta;
        } else {
            losses -= delta;
        }
    }

    let mut avg_gain = gains / period as f64;
    let mut avg_loss = losses / period as f64;

    let mut out = Vec::with_capacity(values.len() - period);
    out.push(rsi_from_averages(avg_gain, avg_loss));

    for i in period + 1..values.len() {
        let delta = values[i] - values[i - 1];
        let (gain, loss) = if delta >= 0.0 {
            (delta, 0.0)
        } else {
            (0.0, -delta)
        };

        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
        out.push(rsi_from_averages(avg_gain, avg_loss));
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Candle series with one-minute spacing and linearly rising closes.
    fn candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle {
                    time: 1_700_000_000 + i as i64 * 60,
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 10.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_sma_length_and_first_timestamp() {
        let candles = candles(500);
        let out = sma(&candles, 20, Source::Close);

        assert_eq!(out.len(), 481);
        assert_eq!(out[0].time, candles[19].time);
        assert_eq!(out.last().unwrap().time, candles[499].time);
    }

    #[test]
    fn test_sma_values() {
        let candles = candles(5);
        let out = sma(&candles, 3, Source::Close);

        // closes are 100..104, so each window mean is the middle close
        assert_eq!(out.len(), 3);
        assert!((out[0].value - 101.0).abs() < 1e-9);
        assert!((out[2].value - 103.0).abs() < 1e-9);
    }

    #[test]
    fn test_ema_seed_is_sma_of_first_window() {
        let candles = candles(10);
        let out = ema(&candles, 4, Source::Close);

        assert_eq!(out.len(), 7);
        assert_eq!(out[0].time, candles[3].time);
        // seed = mean(100, 101, 102, 103)
        assert!((out[0].value - 101.5).abs() < 1e-9);
        // next = 0.4 * 104 + 0.6 * 101.5
        assert!((out[1].value - 102.5).abs() < 1e-9);
    }

    #[test]
    fn test_alignment_invariant_across_indicators() {
        let candles = candles(120);

        let specs = vec![
            (IndicatorSpec::Sma { period: 20 }, 19usize),
            (IndicatorSpec::Ema { period: 12 }, 11),
            (
                IndicatorSpec::Bollinger {
                    period: 20,
                    std_dev: 2.0,
                },
                19,
            ),
            (IndicatorSpec::Rsi { period: 14 }, 14),
            (
                IndicatorSpec::Macd {
                    fast: 12,
                    slow: 26,
                    signal: 9,
                },
                33,
            ),
        ];

        for (spec, offset) in specs {
            let series = compute(&candles, &spec, Source::Close);
            assert_eq!(
                series.len(),
                candles.len() - offset,
                "warm-up length wrong for {spec:?}"
            );

            let times: Vec<i64> = match &series {
                DerivedSeries::Line(points) => points.iter().map(|p| p.time).collect(),
                DerivedSeries::Bands(points) => points.iter().map(|p| p.time).collect(),
                DerivedSeries::Macd(points) => points.iter().map(|p| p.time).collect(),
            };

            for (i, time) in times.iter().enumerate() {
                assert_eq!(
                    *time,
                    candles[i + offset].time,
                    "misaligned point {i} for {spec:?}"
                );
            }
        }
    }

    #[test]
    fn test_empty_input_yields_empty_series_for_every_spec() {
        let candles: Vec<Candle> = vec![];

        let specs = vec![
            IndicatorSpec::Sma { period: 20 },
            IndicatorSpec::Ema { period: 12 },
            IndicatorSpec::Bollinger {
                period: 20,
                std_dev: 2.0,
            },
            IndicatorSpec::Rsi { period: 14 },
            IndicatorSpec::Macd {
                fast: 12,
                slow: 26,
                signal: 9,
            },
        ];

        for spec in specs {
            assert!(compute(&candles, &spec, Source::Close).is_empty());
        }
    }

    #[test]
    fn test_period_exceeding_candle_count_yields_empty_series() {
        let candles = candles(10);
        assert!(sma(&candles, 11, Source::Close).is_empty());
        assert!(ema(&candles, 50, Source::Close).is_empty());
        assert!(rsi(&candles, 10, Source::Close).is_empty());
        assert!(bollinger(&candles, 20, 2.0, Source::Close).is_empty());
        assert!(macd(&candles, 12, 26, 9, Source::Close).is_empty());
    }

    #[test]
    fn test_bollinger_bands_symmetric_around_middle() {
        let candles = candles(60);
        let out = bollinger(&candles, 20, 2.0, Source::Close);

        assert_eq!(out.len(), 41);
        for point in &out {
            let upper_gap = point.upper - point.middle;
            let lower_gap = point.middle - point.lower;
            assert!((upper_gap - lower_gap).abs() < 1e-9);
            assert!(upper_gap > 0.0);
        }
    }

    #[test]
    fn test_bollinger_population_std_dev() {
        // constant closes collapse the envelope onto the middle band
        let mut flat = candles(30);
        for candle in &mut flat {
            candle.close = 100.0;
        }

        let out = bollinger(&flat, 20, 2.0, Source::Close);
        for point in &out {
            assert!((point.upper - 100.0).abs() < 1e-9);
            assert!((point.lower - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rsi_monotonic_gains_pin_at_100() {
        let candles = candles(40);
        let out = rsi(&candles, 14, Source::Close);

        assert_eq!(out.len(), 26);
        for point in &out {
            assert!((point.value - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rsi_alternating_moves_stay_bounded() {
        let mut alternating = candles(60);
        for (i, candle) in alternating.iter_mut().enumerate() {
            candle.close = if i % 2 == 0 { 100.0 } else { 101.0 };
        }

        let out = rsi(&alternating, 14, Source::Close);
        assert!(!out.is_empty());
        for point in &out {
            assert!(point.value > 0.0 && point.value < 100.0);
        }
    }

    #[test]
    fn test_macd_histogram_is_line_minus_signal() {
        let candles = candles(200);
        let out = macd(&candles, 12, 26, 9, Source::Close);

        assert_eq!(out.len(), 200 - 33);
        assert_eq!(out[0].time, candles[33].time);
        for point in &out {
            assert!((point.histogram - (point.macd - point.signal)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_source_field_selection() {
        let candles = candles(30);
        let from_close = sma(&candles, 5, Source::Close);
        let from_high = sma(&candles, 5, Source::High);

        // highs sit exactly 1.0 above closes in the fixture
        for (close_point, high_point) in from_close.iter().zip(&from_high) {
            assert!((high_point.value - close_point.value - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_close_line_and_volume_histogram() {
        let candles = candles(8);
        let line = close_line(&candles);
        assert_eq!(line.len(), candles.len());
        assert_eq!(line[0].value, candles[0].close);

        let mut mixed = candles.clone();
        mixed[2].close = mixed[2].open - 5.0;
        let volume = volume_histogram(&mixed);
        assert!(volume[0].value > 0.0);
        assert!(volume[2].value < 0.0);
    }
}
