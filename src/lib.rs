#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod contract;
pub mod error;
pub mod format;
pub mod sample;
pub mod time;
pub mod types;

#[cfg(feature = "std")]
pub mod platform;
#[cfg(feature = "alloc")]
pub mod sink;
#[cfg(feature = "alloc")]
pub mod video_sample;

// Re-exports
pub use error::*;
pub use format::*;
pub use sample::*;
pub use time::*;
pub use types::*;

#[cfg(feature = "alloc")]
pub use sink::*;
#[cfg(feature = "alloc")]
pub use video_sample::*;
