//! # Error Records
//!
//! One immutable observation of a failure, and the flat key/value codec
//! used to persist it.
//!
//! ## Compatibility
//!
//! - Unknown keys are ignored
//! - Only `category`, `message` and `timestamp` are required
//! - Unknown categories reject the whole payload

mod codec;
mod errors;
mod record;

pub use codec::{decode, decode_value, encode, encode_value, SCHEMA_VERSION};
pub use errors::{RecordError, RecordResult};
pub use record::ErrorRecord;
