//! Local branches and the checkout protocol

pub mod checkout;
pub mod operations;

pub use checkout::{checkout, CheckoutOptions, CheckoutState};
pub use operations::{current_branch, Branch};
