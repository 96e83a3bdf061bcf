use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Seconds are the unit of simulation time the host supplies each frame.
pub type Seconds = Fixed64;

/// Convert an f64 to Seconds. Use only at the host boundary, never in the tick loop.
#[inline]
pub fn f64_to_seconds(v: f64) -> Seconds {
    Seconds::from_num(v)
}

/// Convert Seconds to f64. Use only for display, never in the tick loop.
#[inline]
pub fn seconds_to_f64(v: Seconds) -> f64 {
    v.to_num::<f64>()
}
