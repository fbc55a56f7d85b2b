mod auth;
mod client;
mod domain;
mod error;
mod memory;

pub use auth::*;
pub use client::*;
pub use domain::*;
pub use error::*;
pub use memory::*;
