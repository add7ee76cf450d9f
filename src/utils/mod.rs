pub mod validate;

pub use validate::{ValidatedJson, ValidatedQuery, non_blank};
