pub mod client;
pub mod product;

pub use client::*;
pub use product::*;
