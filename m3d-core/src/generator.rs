/// Maps parsed transform calls to their elementary matrices
use nalgebra::Matrix4;

use crate::error::{Result, TransformError};
use crate::function::TransformKind;
use crate::parser::TransformCall;
use crate::transform::{deg_to_rad, Transform};

/// Matrix for `call`, or `None` when the call contributes nothing
pub fn matrix_for(call: &TransformCall) -> Option<Matrix4<f64>> {
    try_matrix_for(call).ok()
}

/// Matrix for `call`, naming why a call is rejected.
///
/// Missing and non-numeric arguments take the per-function default; an
/// explicit `0` is kept.
pub fn try_matrix_for(call: &TransformCall) -> Result<Matrix4<f64>> {
    let arg = |index: usize, default: f64| call.arg(index, default);
    let angle = || deg_to_rad(call.arg(0, 0.0));

    let matrix = match &call.kind {
        TransformKind::TranslateX => Transform::translation_matrix(arg(0, 0.0), 0.0, 0.0),
        TransformKind::TranslateY => Transform::translation_matrix(0.0, arg(0, 0.0), 0.0),
        TransformKind::TranslateZ => Transform::translation_matrix(0.0, 0.0, arg(0, 0.0)),
        TransformKind::Translate => Transform::translation_matrix(arg(0, 0.0), arg(1, 0.0), 0.0),
        TransformKind::Translate3d => {
            Transform::translation_matrix(arg(0, 0.0), arg(1, 0.0), arg(2, 0.0))
        }
        TransformKind::ScaleX => Transform::scale_matrix(arg(0, 1.0), 1.0, 1.0),
        TransformKind::ScaleY => Transform::scale_matrix(1.0, arg(0, 1.0), 1.0),
        TransformKind::ScaleZ => Transform::scale_matrix(1.0, 1.0, arg(0, 1.0)),
        TransformKind::Scale => {
            let sx = arg(0, 1.0);
            Transform::scale_matrix(sx, arg(1, sx), 1.0)
        }
        TransformKind::Scale3d => Transform::scale_matrix(arg(0, 1.0), arg(1, 1.0), arg(2, 1.0)),
        TransformKind::RotateX => Transform::rotation_x_matrix(angle()),
        TransformKind::RotateY => Transform::rotation_y_matrix(angle()),
        TransformKind::RotateZ => Transform::rotation_z_matrix(angle()),
        TransformKind::SkewX => Transform::skew_x_matrix(angle()),
        TransformKind::SkewY => Transform::skew_y_matrix(angle()),
        TransformKind::Matrix => {
            let [a, b, c, d, e, f] = values::<6>(call, "matrix")?;
            Transform::affine_2d_matrix(a, b, c, d, e, f)
        }
        TransformKind::Matrix3d => Transform::matrix3d(&values::<16>(call, "matrix3d")?),
        TransformKind::Unknown(name) => {
            return Err(TransformError::UnknownFunction(name.clone()));
        }
    };

    Ok(matrix)
}

/// Exactly `N` arguments, non-numeric ones read as 0
fn values<const N: usize>(call: &TransformCall, function: &'static str) -> Result<[f64; N]> {
    if call.args.len() != N {
        return Err(TransformError::Arity {
            function,
            expected: N,
            found: call.args.len(),
        });
    }

    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(&call.args) {
        *slot = value.unwrap_or(0.0);
    }
    Ok(out)
}
