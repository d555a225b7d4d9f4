/// Elementary 4x4 transformation matrices in the row-vector convention
///
/// A point `[x, y, z, 1]` is transformed as `p' = p * M`, so every matrix
/// here is the transpose of the one browsers write down: translations live
/// in the last row.
use nalgebra::{Matrix4, Vector3};

/// The 4x4 identity matrix
pub fn identity() -> Matrix4<f64> {
    Matrix4::identity()
}

/// Standard 4x4 product `a * b`
pub fn multiply(a: &Matrix4<f64>, b: &Matrix4<f64>) -> Matrix4<f64> {
    a * b
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Transform builder for elementary CSS transforms
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z)).transpose()
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Rotation about the X axis (angle in radians)
    #[rustfmt::skip]
    pub fn rotation_x_matrix(angle: f64) -> Matrix4<f64> {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, cos, sin, 0.0,
            0.0, -sin, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Y axis (angle in radians)
    #[rustfmt::skip]
    pub fn rotation_y_matrix(angle: f64) -> Matrix4<f64> {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            cos, 0.0, -sin, 0.0,
            0.0, 1.0, 0.0, 0.0,
            sin, 0.0, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Z axis (angle in radians)
    #[rustfmt::skip]
    pub fn rotation_z_matrix(angle: f64) -> Matrix4<f64> {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            cos, sin, 0.0, 0.0,
            -sin, cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Horizontal shear: x' = x + tan(angle) * y
    pub fn skew_x_matrix(angle: f64) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m[(1, 0)] = angle.tan();
        m
    }

    /// Vertical shear: y' = y + tan(angle) * x
    pub fn skew_y_matrix(angle: f64) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m[(0, 1)] = angle.tan();
        m
    }

    /// Embed the 2-D affine `matrix(a, b, c, d, e, f)` into 4x4
    #[rustfmt::skip]
    pub fn affine_2d_matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Matrix4<f64> {
        Matrix4::new(
            a, b, 0.0, 0.0,
            c, d, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            e, f, 0.0, 1.0,
        )
    }

    /// Unpack the 16 `matrix3d()` values.
    ///
    /// They list the CSS matrix column by column, which is exactly our
    /// transposed matrix row by row.
    pub fn matrix3d(values: &[f64; 16]) -> Matrix4<f64> {
        Matrix4::from_row_slice(values)
    }
}
