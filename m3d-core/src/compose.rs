/// Folds a transform list into one accumulated matrix
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::try_matrix_for;
use crate::parser::TransformList;
use crate::transform::{identity, multiply};

/// What composition does with a call the generator rejects
/// (unknown function, wrong `matrix`/`matrix3d` arity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidCallPolicy {
    /// The call contributes nothing; the rest still composes
    #[default]
    Skip,
    /// The whole composition fails with the rejection
    Abort,
}

/// Compose with [`InvalidCallPolicy::Skip`]. `None` for an empty list.
pub fn compose(list: &TransformList) -> Option<Matrix4<f64>> {
    compose_with(list, InvalidCallPolicy::Skip).ok().flatten()
}

/// Right-multiply each call's matrix onto the identity in source order:
/// `accumulated = accumulated * elementary`.
///
/// With row vectors this applies earlier functions first, so a translate
/// followed by a scale has its offset scaled, while a scale followed by a
/// translate does not.
pub fn compose_with(
    list: &TransformList,
    policy: InvalidCallPolicy,
) -> Result<Option<Matrix4<f64>>> {
    if list.is_empty() {
        return Ok(None);
    }

    let mut accumulated = identity();
    for call in list {
        match try_matrix_for(call) {
            Ok(elementary) => accumulated = multiply(&accumulated, &elementary),
            Err(e) => match policy {
                InvalidCallPolicy::Skip => tracing::debug!("skipping {}: {}", call.name, e),
                InvalidCallPolicy::Abort => return Err(e),
            },
        }
    }

    Ok(Some(accumulated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::generator::matrix_for;
    use crate::parser::parse;
    use crate::transform::Transform;

    #[test]
    fn test_empty_list_is_none() {
        assert!(compose(&TransformList::default()).is_none());
        assert!(compose_with(&TransformList::default(), InvalidCallPolicy::Abort)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_translate_then_scale_scales_offset() {
        let m = compose(&parse("translateX(100px) scale(2)")).unwrap();
        assert_eq!(m[(3, 0)], 200.0);
        assert_eq!(m[(0, 0)], 2.0);

        let m = compose(&parse("scale(2) translateX(100px)")).unwrap();
        assert_eq!(m[(3, 0)], 100.0);
    }

    #[test]
    fn test_order_is_right_multiplication() {
        let list = parse("rotate(30deg) skewX(10deg)");
        let a = matrix_for(&list.calls()[0]).unwrap();
        let b = matrix_for(&list.calls()[1]).unwrap();
        assert_eq!(compose(&list).unwrap(), a * b);
        assert_ne!(compose(&list).unwrap(), b * a);
    }

    #[test]
    fn test_skip_policy_ignores_rejected_calls() {
        let m = compose(&parse("foo(1) translate(1px, 2px) matrix3d(1, 2)")).unwrap();
        assert_eq!(m, Transform::translation_matrix(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_only_rejected_calls_gives_identity() {
        let m = compose(&parse("perspective(10px)")).unwrap();
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_abort_policy_fails_on_first_rejection() {
        let result = compose_with(&parse("scale(2) foo(1)"), InvalidCallPolicy::Abort);
        assert!(matches!(result, Err(TransformError::UnknownFunction(_))));

        let result = compose_with(&parse("scale(2)"), InvalidCallPolicy::Abort).unwrap();
        assert_eq!(result, Some(Transform::scale_matrix(2.0, 2.0, 1.0)));
    }
}
