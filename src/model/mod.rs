pub mod company;

pub use company::{Address, Company};
