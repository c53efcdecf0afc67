//! Screen-protector compatibility lookup against the Mietubl model search page.
//!
//! [`search::CompatibilitySearch`] runs one fetch, extract and match cycle per call;
//! [`server`] exposes it as `POST /mietubl_api`.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod scraper;
pub mod search;
pub mod server;
pub mod utils;
