/// Error types shared across the compiler
pub type Result<T> = std::result::Result<T, TransformError>;

pub const MAX_QUOTED_INPUT: usize = 64;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// The value could not be tokenized at all. `input` keeps at most the
    /// first [`MAX_QUOTED_INPUT`] characters.
    #[error("failed to tokenize transform value {input:?}: {message}")]
    Parse { input: String, message: String },

    #[error("unknown transform function: {0}")]
    UnknownFunction(String),

    /// `matrix()` / `matrix3d()` called with the wrong number of values
    #[error("{function}() expects {expected} values, got {found}")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("composed matrix contains a non-finite value")]
    NonFinite,

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TransformError {
    pub fn parse(input: &str, message: impl Into<String>) -> Self {
        let mut quoted: String = input.chars().take(MAX_QUOTED_INPUT).collect();
        if quoted.len() < input.len() {
            quoted.push_str("...");
        }
        Self::Parse {
            input: quoted,
            message: message.into(),
        }
    }
}
