//! Scans the service interfaces of a Bifrost client project, synthesizes a
//! sample request body for every routed method and renders Postman and
//! OpenAPI documents from them.
//!
//! Pipeline: [`corpus`] (read and parse `.cs` files) → [`symbols`] (bind
//! names, implements [`introspect::TypeIntrospection`]) → [`extract`] →
//! [`sample`] → [`generate`] → [`emit`].
pub mod cli;
pub mod corpus;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generate;
pub mod introspect;
pub mod logging;
pub mod sample;
pub mod source;
pub mod symbols;

pub use error::{Diagnostic, Error, Result};
pub use generate::{Endpoint, EndpointGroup, Generation, generate, generate_from_dir};
pub use sample::SampleValue;
