/// Currency helpers.
///
/// All monetary values in the database are stored in cents to avoid
/// floating-point precision issues; percentages are carried in basis points
/// (1 bps = 0.01%). Conversion to display units happens only at the DTO
/// boundary.

/// Convert display units to cents (multiply by 100)
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents to display units (divide by 100)
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Apply a basis-point rate to an amount in cents, rounding down.
pub fn apply_bps(amount: i64, bps: i64) -> i64 {
    amount * bps / 10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(100.0), 10000);
        assert_eq!(to_cents(0.50), 50);
        assert_eq!(to_cents(123.45), 12345);
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(10000), 100.0);
        assert_eq!(from_cents(50), 0.50);
        assert_eq!(from_cents(12345), 123.45);
    }

    #[test]
    fn test_apply_bps() {
        // 2.5% of 150.00
        assert_eq!(apply_bps(15_000, 250), 375);
        // 1% of 1000.00
        assert_eq!(apply_bps(100_000, 100), 1_000);
        assert_eq!(apply_bps(0, 250), 0);
    }
}
