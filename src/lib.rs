pub mod batch;
pub mod config;
pub mod normalizer;
pub mod phone;
pub mod pipeline;
pub mod stage;
#[doc(hidden)]
pub mod testing;
pub mod unicode;

pub use normalizer::{
    NormalizeError, Normalizer, Operation, remove_symbols, remove_whitespace, to_fullwidth,
};
pub use phone::{Availability, check_availability, is_valid_phone_number};
pub use stage::{RemoveSymbols, RemoveWhitespace, ToFullWidth};
