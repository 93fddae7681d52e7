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

//! Blocking reqwest transport for paapi.
//!
//! `ReqwestHttpSend` implements [`HttpSend`] with a blocking
//! `reqwest::blocking::Client`. Plain requests share one client; requests
//! carrying a CA bundle get a client that trusts only that bundle.
//!
//! ```no_run
//! use paapi_core::Context;
//! use paapi_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use bytes::Bytes;
use log::debug;
use paapi_core::{Error, HttpSend, Result, TlsOptions};
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Certificate;

/// HttpSend implementation on top of a blocking reqwest client.
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap_or_default();
        Self::new(client)
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    ///
    /// The client is used for requests without a CA bundle as is, so it
    /// should not be configured to follow redirects.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn client_for(&self, tls: &TlsOptions) -> Result<Client> {
        let Some(path) = &tls.ca_bundle else {
            return Ok(self.client.clone());
        };

        let pem = std::fs::read(path).map_err(|e| {
            Error::certificate_missing("failed to read CA bundle")
                .with_source(e)
                .with_context(format!("path: {}", path.display()))
        })?;
        let cert = Certificate::from_pem(&pem).map_err(|e| {
            Error::certificate_missing("CA bundle is not valid PEM")
                .with_source(e)
                .with_context(format!("path: {}", path.display()))
        })?;

        let mut builder = Client::builder()
            .redirect(Policy::none())
            .tls_built_in_root_certs(false)
            .add_root_certificate(cert);
        if !tls.verify_host {
            builder = builder.danger_accept_invalid_hostnames(true);
        }

        builder
            .build()
            .map_err(|e| Error::transport(format!("failed to build tls client: {e}")).with_source(e))
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(
        &self,
        req: http::Request<Bytes>,
        tls: &TlsOptions,
    ) -> Result<http::Response<Bytes>> {
        let client = self.client_for(tls)?;

        let (parts, body) = req.into_parts();
        let url = parts.uri.to_string();
        debug!("sending {} request to {}", parts.method, parts.uri.host().unwrap_or_default());

        let mut builder = client.request(parts.method, &url).headers(parts.headers);
        if !body.is_empty() {
            builder = builder.body(body.to_vec());
        }

        let resp = builder
            .send()
            .map_err(|e| Error::transport(format!("failed to send request: {e}")).with_source(e))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .map_err(|e| Error::transport(format!("failed to read response: {e}")).with_source(e))?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
