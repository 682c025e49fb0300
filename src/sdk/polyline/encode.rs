use super::{scale_factor, Coordinate, PolylineError, DEFAULT_PRECISION, MAX_PRECISION};

/// Encodes points at the default 1e-5 precision; inverse of [`super::decode`].
pub fn encode(points: &[Coordinate]) -> String {
    encode_scaled(points, scale_factor(DEFAULT_PRECISION))
}

/// Encodes at `precision` decimal places, up to [`MAX_PRECISION`].
pub fn encode_with(points: &[Coordinate], precision: u32) -> Result<String, PolylineError> {
    if precision > MAX_PRECISION {
        return Err(PolylineError::InvalidPrecision(precision));
    }
    Ok(encode_scaled(points, scale_factor(precision)))
}

fn encode_scaled(points: &[Coordinate], factor: f64) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);

    for point in points {
        let lat = scaled(point.latitude, factor);
        let lng = scaled(point.longitude, factor);
        push_value(&mut out, lat.wrapping_sub(prev_lat));
        push_value(&mut out, lng.wrapping_sub(prev_lng));
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

// `as` saturates, and NaN becomes 0.
fn scaled(value: f64, factor: f64) -> i64 {
    (value * factor).round() as i64
}

fn push_value(out: &mut String, delta: i64) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= 0x20 {
        out.push(char::from(((value & 0x1f) as u8 | 0x20) + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}
