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

use log::debug;
use paapi_core::hash::base64_hmac_sha256;

use crate::canonical::percent_encode;
use crate::config::{Config, Location};
use crate::constants::{PATH, SIGNATURE};

/// RequestSigner that implements the Product Advertising API signature
/// version 2.
///
/// - [Authenticating requests](https://docs.aws.amazon.com/AWSECommerceService/latest/DG/rest-signature.html)
///
/// The signer is a pure function of the canonical query string, the secret
/// key, the host and the scheme.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    host: String,
    ssl: bool,
}

impl RequestSigner {
    /// Create a new signer for the given marketplace.
    pub fn new(location: Location, ssl: bool) -> Self {
        Self {
            host: location.host(),
            ssl,
        }
    }

    /// Create a signer matching the config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.location(), config.ssl())
    }

    /// Host requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }

    /// Build the string to sign: method, host, path and canonical query
    /// joined by `\n`.
    pub fn string_to_sign(&self, canonical_query: &str) -> String {
        format!("GET\n{}\n{PATH}\n{canonical_query}", self.host)
    }

    /// Compute the percent encoded signature.
    pub fn signature(&self, secret_key: &str, canonical_query: &str) -> String {
        let string_to_sign = self.string_to_sign(canonical_query);
        debug!("calculated string to sign: {string_to_sign}");

        let signature = base64_hmac_sha256(secret_key.as_bytes(), string_to_sign.as_bytes());
        percent_encode(&signature)
    }

    /// Sign the canonical query and return the final request url.
    pub fn sign(&self, secret_key: &str, canonical_query: &str) -> String {
        let signature = self.signature(secret_key, canonical_query);
        format!(
            "{}://{}{PATH}?{canonical_query}&{SIGNATURE}={signature}",
            self.scheme(),
            self.host
        )
    }
}
