pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod entry;
pub mod error;
pub mod persistence;
pub mod pricing;
pub mod service;
pub mod utils;
