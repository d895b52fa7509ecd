pub mod aggregate;
pub mod crypto;
pub mod price;

pub use aggregate::*;
pub use crypto::*;
pub use price::*;
