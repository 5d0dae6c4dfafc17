//! Small, dependency-light helpers shared across the `chainsync` workspace.
//!
//! Each module is gated behind a feature of the same name so downstream
//! crates only pull in what they actually use.
#![cfg_attr(not(feature = "std"), no_std)]

//---------------------------------------------------------------------------------------------------- Public API
#[cfg(feature = "asynch")]
pub mod asynch; // async collides

#[cfg(feature = "cast")]
pub mod cast;

#[cfg(feature = "constants")]
pub mod constants;

#[cfg(feature = "fs")]
pub mod fs;

#[cfg(feature = "num")]
pub mod num;

#[cfg(feature = "thread")]
pub mod thread;

#[cfg(feature = "time")]
pub mod time;
//---------------------------------------------------------------------------------------------------- Private Usage

//----------------------------------------------------------------------------------------------------
