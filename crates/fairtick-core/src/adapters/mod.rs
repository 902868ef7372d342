//! Statement-source adapters.

mod yahoo;

pub use yahoo::YahooStatementSource;
