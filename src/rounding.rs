//! Decimal rounding for reported scores.
//!
//! Scores are rounded half-up (away from zero) on their shortest decimal
//! representation, not on the binary value, so `0.285` becomes `0.29` even
//! though the nearest `f64` is slightly below it.

/// Round `value` to `digits` decimal places, half-up.
///
/// Non-finite values are returned unchanged.
#[must_use]
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Display for f64 prints the shortest round-tripping decimal, never exponent form
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let digits = digits as usize;
    if frac_part.len() <= digits {
        return value;
    }

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    if frac_part.as_bytes()[digits] >= b'5' {
        increment_decimal(&mut kept);
    }

    let split = kept.len() - digits;
    let mut rounded = String::with_capacity(kept.len() + 1);
    rounded.extend(kept[..split].iter().map(|&b| b as char));
    if digits > 0 {
        rounded.push('.');
        rounded.extend(kept[split..].iter().map(|&b| b as char));
    }

    let magnitude = rounded.parse::<f64>().unwrap_or(value.abs());
    magnitude.copysign(value)
}

/// Add one unit in the last place to a string of ASCII digits.
fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
