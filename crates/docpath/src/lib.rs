//! docpath – dynamic documents addressed by dotted paths.

pub mod codec;
pub mod document;
pub mod error;
pub mod overrides;
pub mod path;
mod slice;
pub mod validate;
pub mod value;

pub use codec::{Codec, FnCodec, Format};
pub use document::Document;
pub use error::{CodecError, Error, OverrideError, RequiredViolation, Result, ValidationErrors};
pub use overrides::Override;
pub use path::Path;
pub use validate::{REQUIRED, Validate};
pub use value::{Map, TIME_FORMAT, Value};
