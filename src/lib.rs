//! Industrial furniture concept generator
//!
//! A small web application that turns a furniture description into an
//! AI-generated concept image: an HTTP proxy holding the provider
//! credential, the client gateway that calls it, and the session state
//! machine that drives a generation round from the form fields.

pub mod ai;
pub mod error;
pub mod gateway;
pub mod models;
pub mod prompts;
pub mod server;
pub mod studio;

pub use error::{Error, Result};
