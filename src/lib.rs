//! Interception - marker-selected before/after method advice
//!
//! A small interception host: types declare their methods and markers,
//! selection rules pick which types an interceptor attaches to, and the
//! kernel hands out instances wrapped so that calls to overridable
//! methods run through the matched interceptors' before/after hooks.

pub mod advice;
pub mod config;
pub mod demo;
pub mod descriptor;
pub mod error;
pub mod invocation;
pub mod kernel;
pub mod output;
pub mod registration;
pub mod selection;
pub mod utils;

pub use error::{Error, Result};
