/// The `convert` entry point: parse, compose, format
use crate::compose::{compose_with, InvalidCallPolicy};
use crate::config::ConvertOptions;
use crate::error::{Result, TransformError};
use crate::formatter::format_matrix;
use crate::parser::try_parse;

/// Convert a `transform` value to `matrix3d(...)` with default options.
///
/// `None` means "leave the value as it is": nothing recognizable was found,
/// or the conversion failed (the failure is logged as a warning).
pub fn convert(value: &str) -> Option<String> {
    convert_with(value, InvalidCallPolicy::Skip)
}

fn convert_with(value: &str, policy: InvalidCallPolicy) -> Option<String> {
    match try_convert(value, policy) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("failed to convert transform to matrix3d: {}", e);
            None
        }
    }
}

/// Like [`convert`] but surfaces failures instead of logging them
pub fn try_convert(value: &str, policy: InvalidCallPolicy) -> Result<Option<String>> {
    let list = try_parse(value)?;
    let Some(matrix) = compose_with(&list, policy)? else {
        return Ok(None);
    };

    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::NonFinite);
    }

    Ok(Some(format_matrix(&matrix)))
}

/// A converter bound to a set of options
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn convert(&self, value: &str) -> Option<String> {
        convert_with(value, self.options.on_invalid)
    }
}
