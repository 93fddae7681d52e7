// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Amazon Product Advertising API client.
//!
//! This crate keeps the query parameters of a client, signs them with the
//! Product Advertising signature (HMAC-SHA256 over the canonical query) and
//! classifies the XML answer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paapi::{Client, ResponseFormat};
//! use paapi_core::{Context, OsEnv, Result};
//! use paapi_file_read_std::StdFileRead;
//! use paapi_http_send_reqwest::ReqwestHttpSend;
//!
//! fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(StdFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let mut client = Client::builder()
//!         .from_env(&ctx)
//!         .with_response_format(ResponseFormat::Map)
//!         .build(ctx)?;
//!
//!     client
//!         .params_mut()
//!         .set_search_index("Books")
//!         .set_author("John Grisham")
//!         .set_book_after_year(1979)?
//!         .set_book_before_year(1991)?;
//!
//!     let resp = client.item_search(None)?;
//!     println!("{:?}", resp.as_map());
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export PAAPI_ACCESS_KEY_ID=your-access-key-id
//! export PAAPI_SECRET_ACCESS_KEY=your-secret-access-key
//! export PAAPI_ASSOCIATE_TAG=your-tag-20
//! export PAAPI_LOCATION=co.uk        # Optional, default to com
//! export PAAPI_VERSION=2011-08-01    # Optional
//! export PAAPI_CA_BUNDLE=cacert.pem  # Optional, used when ssl is enabled
//! ```
//!
//! ## Outcomes
//!
//! Every executed request ends in exactly one [`RequestOutcome`]. The
//! operation methods turn everything but a success into an error of kind
//! `Transport`, `Parse` or `Api`; use [`Client::outcome`] to inspect the
//! outcome itself.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{
    DEFAULT_CA_BUNDLE, DEFAULT_VERSION, PAAPI_ACCESS_KEY_ID, PAAPI_ASSOCIATE_TAG,
    PAAPI_CA_BUNDLE, PAAPI_LOCATION, PAAPI_SECRET_ACCESS_KEY, PAAPI_VERSION,
};

mod canonical;
pub use canonical::canonical_query_string;
pub use canonical::percent_encode;

mod client;
pub use client::Client;
pub use client::ClientBuilder;
pub use client::Operation;

mod config;
pub use config::Config;
pub use config::Location;
pub use config::ResponseFormat;

mod delay;
pub use delay::Delay;
pub use delay::FixedDelay;

mod format;
pub use format::to_map;
pub use format::Response;

mod params;
pub use params::ItemPage;
pub use params::Params;

mod power;
pub use power::PowerExpression;
pub use power::PowerExpressionSet;
pub use power::PowerSlot;
pub use power::PowerValue;

mod response;
pub use response::api_error_messages;
pub use response::Payload;
pub use response::RequestOutcome;

mod sign_request;
pub use sign_request::RequestSigner;

mod xml;
pub use xml::Descendants;
pub use xml::Namespace;
pub use xml::XmlDocument;
pub use xml::XmlElement;
pub use xml::XmlNode;
