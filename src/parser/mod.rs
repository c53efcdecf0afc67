pub mod mietubl_parser;

pub use mietubl_parser::{MietublParser, ModelExtractor};
