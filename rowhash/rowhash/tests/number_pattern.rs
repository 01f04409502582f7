use rowhash::pattern::{NumberPattern, PatternError};

fn f64_with(pattern: &str, value: f64) -> Result<String, Box<dyn std::error::Error>> {
    Ok(NumberPattern::parse(pattern)?.format_f64(value)?)
}

#[test]
fn synthesized_decimal_pattern_pads_fraction_digits() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(f64_with("#################0.00", 12.5)?, "12.50");
    assert_eq!(f64_with("#################0.00", 0.0)?, "0.00");
    assert_eq!(f64_with("#################0.000", -3.25)?, "-3.250");
    Ok(())
}

#[test]
fn zero_scale_pattern_keeps_trailing_separator() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(f64_with("#################0.", 12.0)?, "12.");
    Ok(())
}

#[test]
fn fraction_rounds_half_to_even() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(f64_with("0.00", 0.125)?, "0.12");
    assert_eq!(f64_with("0.00", 0.375)?, "0.38");
    assert_eq!(f64_with("0", 2.5)?, "2");
    assert_eq!(f64_with("0", 3.5)?, "4");
    Ok(())
}

#[test]
fn wide_scales_do_not_expose_binary_digits() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        f64_with("#################0.00000000", 1234567890.12)?,
        "1234567890.12000000"
    );
    assert_eq!(
        f64_with("#################0.000000000000000000", 0.1)?,
        "0.100000000000000000"
    );
    Ok(())
}

#[test]
fn decimal_ties_follow_the_binary_value() -> Result<(), Box<dyn std::error::Error>> {
    // 0.15 and 2.675 are stored slightly below the written value.
    assert_eq!(f64_with("0.0", 0.15)?, "0.1");
    assert_eq!(f64_with("0.00", 2.675)?, "2.67");
    assert_eq!(f64_with("0.00", 9.996)?, "10.00");
    Ok(())
}

#[test]
fn optional_digits_trim_trailing_zeros() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(f64_with("#.##", 0.5)?, ".5");
    assert_eq!(f64_with("0.0#", 1.5)?, "1.5");
    assert_eq!(f64_with("0.0#", 1.257)?, "1.26");
    assert_eq!(f64_with("#", 0.0)?, "0");
    Ok(())
}

#[test]
fn grouping_prefix_suffix_and_percent() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(f64_with("#,##0.00", 1234567.891)?, "1,234,567.89");
    assert_eq!(f64_with("'$'#,##0", 1234.0)?, "$1,234");
    assert_eq!(f64_with("0.0%", 0.256)?, "25.6%");
    assert_eq!(f64_with("0.00;(0.00)", -1.5)?, "(1.50)");
    Ok(())
}

#[test]
fn integers_are_rendered_exactly() -> Result<(), PatternError> {
    let plain = NumberPattern::parse("#################0")?;
    assert_eq!(plain.format_i64(i64::MAX), "9223372036854775807");
    assert_eq!(plain.format_i64(i64::MIN), "-9223372036854775808");
    assert_eq!(plain.format_i64(0), "0");

    let grouped = NumberPattern::parse("#,##0.00")?;
    assert_eq!(grouped.format_i64(-1234), "-1,234.00");

    let padded = NumberPattern::parse("00000")?;
    assert_eq!(padded.format_i64(42), "00042");
    Ok(())
}

#[test]
fn non_finite_values_fail() -> Result<(), PatternError> {
    let pattern = NumberPattern::parse("0.00")?;
    assert!(pattern.format_f64(f64::NAN).is_err());
    assert!(pattern.format_f64(f64::INFINITY).is_err());
    Ok(())
}

#[test]
fn malformed_patterns_are_rejected() {
    for pattern in ["", "abc", "0#", "0.#0", "0.0.0", "#,", "0 0", "0.00E0"] {
        assert!(
            NumberPattern::parse(pattern).is_err(),
            "pattern {pattern:?} should be rejected"
        );
    }
}
