//! Core components for signed Product Advertising API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! paapi crates: the error taxonomy, the [`Context`] that carries the
//! pluggable collaborators, and small hashing and time helpers.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Error**: A single error type whose [`ErrorKind`] tells validation, configuration and request failures apart
//!
//! ## Example
//!
//! ```no_run
//! use paapi_core::{Context, HttpSend, Result, TlsOptions};
//! use bytes::Bytes;
//!
//! #[derive(Debug)]
//! struct MyHttpSend;
//!
//! impl HttpSend for MyHttpSend {
//!     fn http_send(
//!         &self,
//!         _req: http::Request<Bytes>,
//!         _tls: &TlsOptions,
//!     ) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(Bytes::from_static(b"<Response/>")))
//!     }
//! }
//!
//! let ctx = Context::new().with_http_send(MyHttpSend);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;
pub use context::TlsOptions;

mod error;
pub use error::{Error, ErrorKind, Result};
