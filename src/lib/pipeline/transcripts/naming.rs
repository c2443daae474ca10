//! Output file naming for filtered transcript tables.

use crate::pipeline::transcripts::filter::SpatialWindow;

pub const FILTERED_SUFFIX: &str = "filtered_transcripts.csv";

/// Format a bound the way the output names have always spelled floats:
/// integral values keep a trailing `.0`, very large or very small magnitudes
/// use a two-digit signed exponent (`1e+16`, `1e-05`).
pub fn format_bound(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn format_exponent(value: f64) -> String {
    let repr = format!("{:e}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => repr,
        },
        None => repr,
    }
}

/// `X{min_x}-{max_x}_Y{min_y}-{max_y}_filtered_transcripts.csv`
pub fn filtered_file_name(window: &SpatialWindow) -> String {
    format!(
        "X{}-{}_Y{}-{}_{}",
        format_bound(window.min_x),
        format_bound(window.max_x),
        format_bound(window.min_y),
        format_bound(window.max_y),
        FILTERED_SUFFIX
    )
}
