/// m3d Core Library - CSS `transform` to `matrix3d()` compiler
///
/// A transform value flows through four stateless stages: the parser turns
/// text into transform calls, the generator maps each call to a 4x4 matrix,
/// the composer multiplies them in source order, and the formatter writes the
/// result back out as `matrix3d(...)`.

pub mod compose;
pub mod config;
pub mod convert;
pub mod error;
pub mod formatter;
pub mod function;
pub mod generator;
pub mod parser;
pub mod stylesheet;
pub mod transform;

// Re-export commonly used types
pub use compose::{compose, compose_with, InvalidCallPolicy};
pub use config::{ConvertOptions, CONFIG_FILE_NAME};
pub use convert::{convert, try_convert, Converter};
pub use error::{Result, TransformError};
pub use formatter::{format_matrix, format_number};
pub use function::TransformKind;
pub use generator::{matrix_for, try_matrix_for};
pub use parser::{parse, try_parse, TransformCall, TransformList};
pub use stylesheet::{rewrite_stylesheet, Rewrite};
pub use transform::{deg_to_rad, identity, multiply, Transform};
