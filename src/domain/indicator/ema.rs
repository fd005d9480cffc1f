//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with the SMA of the first n prices, then
//! EMA = (P - EMA) * k + EMA for every later price.
//! Absent when fewer than n prices are available.

pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = prices[..period].iter().sum::<f64>() / period as f64;

    for &price in &prices[period..] {
        ema = (price - ema) * k + ema;
    }

    Some(ema)
}
