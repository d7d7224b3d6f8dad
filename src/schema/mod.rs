//! Declarative schemas: which keys a configuration defines, requires, and
//! defaults.
//!
//! A schema is a table whose top-level keys are configuration keys and whose
//! values are metadata tables:
//!
//! ```toml
//! name = { required = true }
//! port = { default = 8080 }
//! debug = { required = "no", default = false }
//! ```

mod error;
mod parser;
mod truthy;
mod validate;

pub use error::SchemaError;
pub use parser::Schema;
pub use truthy::is_truthy;
pub use validate::{apply_defaults, missing_required, validate};
