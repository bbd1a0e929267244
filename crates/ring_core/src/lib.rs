//! Swagger ring core: the IO-free document engine.
//!
//! Sources are parsed into [`DocumentTree`]s, folded together with [`merge`],
//! post-processed by [`annotate`] and rendered by [`serialize`].
mod annotate;
mod emit;
mod error;
mod merge;
mod parse;
mod serialize;
mod source;
mod tree;

pub use annotate::{annotate, QUOTED_FIELDS};
pub use error::{ParseError, SerializeError, UnknownFormatError};
pub use merge::merge;
pub use parse::{parse, parse_json, parse_yaml};
pub use serialize::{serialize, OutputFormat, RenderOptions};
pub use source::{DocFormat, SourceDescriptor};
pub use tree::{DocumentTree, Mapping, Scalar};
