//! Risk-based position sizing.
//!
//! risk = equity × max_risk% ; qty = floor(risk / (price × stop%)) ; at least 1.
//! Inputs are assumed finite and positive; callers validate upstream.

pub fn size_position(equity: f64, price: f64, max_risk_percent: f64, stop_percent: f64) -> u64 {
    let risk_amount = equity * (max_risk_percent / 100.0);
    let per_share_risk = price * (stop_percent / 100.0);
    let qty = (risk_amount / per_share_risk).floor();

    // `as` saturates: NaN -> 0, +inf -> u64::MAX
    (qty as u64).max(1)
}
