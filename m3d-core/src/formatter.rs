/// `matrix3d(...)` serialization
use nalgebra::Matrix4;

/// Magnitudes below this are written as `0`
pub const ZERO_EPSILON: f64 = 1e-10;

const DECIMALS: f64 = 1e6;

// Past 2^53 a scaled value has no fractional part left to round
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// Serialize as `matrix3d(v1, ..., v16)`.
///
/// `matrix3d()` lists the CSS matrix column by column. That matrix is the
/// transpose of ours, and nalgebra iterates column-major, so the values come
/// out as our rows in order.
pub fn format_matrix(matrix: &Matrix4<f64>) -> String {
    let values: Vec<String> = matrix
        .transpose()
        .iter()
        .map(|value| format_number(*value))
        .collect();

    format!("matrix3d({})", values.join(", "))
}

/// Round to 6 decimals and drop trailing zeros (`2`, `1.5`, `-0.333333`).
pub fn format_number(value: f64) -> String {
    if value.abs() < ZERO_EPSILON {
        return "0".to_string();
    }

    let scaled = value * DECIMALS;
    let rounded = if scaled.abs() < MAX_EXACT {
        scaled.round() / DECIMALS
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }

    // Display on f64 is the shortest round-trip form, never exponential
    rounded.to_string()
}
