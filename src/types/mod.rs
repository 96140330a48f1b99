mod amount;
mod errors;

pub use amount::Amount;
pub use errors::AmountError;
