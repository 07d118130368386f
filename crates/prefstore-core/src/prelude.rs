pub use prefstore_types::prelude::*;

// vim: ts=4
