pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;

#[cfg(test)]
mod tests;
