//! Date argument tokens and the ranges they describe.

mod error;
mod range;
mod token;
mod wrapper;

pub use error::ArgumentError;
pub use range::{DateRange, Granularity};
pub use token::DateTokenKind;
pub use wrapper::DateArgument;
