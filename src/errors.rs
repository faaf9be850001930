//! Crate-wide result type.
//!
//! Subsystems keep their own tagged errors (`video::errors::Error`,
//! `application::errors::Error`), these are folded into `failure::Error` once they reach the
//! scene and engine layers.

pub use failure::{Error, ResultExt};

pub type Result<T> = ::std::result::Result<T, Error>;
