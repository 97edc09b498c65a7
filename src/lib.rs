#![cfg_attr(not(feature = "std"), no_std)]

pub mod format;
pub mod types;

#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod platform;
#[cfg(feature = "std")]
pub mod resource;

// Re-exports
pub use format::*;
pub use types::*;

#[cfg(feature = "std")]
pub use error::*;
#[cfg(feature = "std")]
pub use resource::*;
