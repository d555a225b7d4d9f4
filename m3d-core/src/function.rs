/// Supported CSS transform functions
use std::fmt;

/// The kind of a CSS transform function, resolved from its name.
///
/// Names are matched ASCII case-insensitively. `rotate` and `rotateZ`
/// resolve to the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformKind {
    TranslateX,
    TranslateY,
    TranslateZ,
    Translate,
    Translate3d,
    ScaleX,
    ScaleY,
    ScaleZ,
    Scale,
    Scale3d,
    RotateX,
    RotateY,
    RotateZ,
    SkewX,
    SkewY,
    Matrix,
    Matrix3d,
    /// Any other function name, kept verbatim
    Unknown(String),
}

impl TransformKind {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "translatex" => Self::TranslateX,
            "translatey" => Self::TranslateY,
            "translatez" => Self::TranslateZ,
            "translate" => Self::Translate,
            "translate3d" => Self::Translate3d,
            "scalex" => Self::ScaleX,
            "scaley" => Self::ScaleY,
            "scalez" => Self::ScaleZ,
            "scale" => Self::Scale,
            "scale3d" => Self::Scale3d,
            "rotatex" => Self::RotateX,
            "rotatey" => Self::RotateY,
            "rotatez" | "rotate" => Self::RotateZ,
            "skewx" => Self::SkewX,
            "skewy" => Self::SkewY,
            "matrix" => Self::Matrix,
            "matrix3d" => Self::Matrix3d,
            _ => Self::Unknown(name.to_string()),
        }
    }

    /// Canonical CSS spelling
    pub fn name(&self) -> &str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::Translate => "translate",
            Self::Translate3d => "translate3d",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::ScaleZ => "scaleZ",
            Self::Scale => "scale",
            Self::Scale3d => "scale3d",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Matrix => "matrix",
            Self::Matrix3d => "matrix3d",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_aliases_rotate_z() {
        assert_eq!(TransformKind::from_name("rotate"), TransformKind::RotateZ);
        assert_eq!(TransformKind::from_name("rotateZ"), TransformKind::RotateZ);
    }

    #[test]
    fn test_case_insensitive_names() {
        assert_eq!(
            TransformKind::from_name("TRANSLATEX"),
            TransformKind::TranslateX
        );
        assert_eq!(TransformKind::from_name("Matrix3D"), TransformKind::Matrix3d);
    }

    #[test]
    fn test_unknown_keeps_name() {
        let kind = TransformKind::from_name("perspective");
        assert_eq!(kind, TransformKind::Unknown("perspective".to_string()));
        assert!(!kind.is_known());
        assert_eq!(kind.to_string(), "perspective");
    }
}
