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

use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;
use paapi_core::utils::Redact;
use paapi_core::{Context, Error, Result, TlsOptions};

use crate::constants::{DEFAULT_CA_BUNDLE, HOST_PREFIX};

/// Marketplace a client talks to.
///
/// The code is appended to the endpoint host, for example `co.uk` selects
/// `webservices.amazon.co.uk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    /// Canada
    Ca,
    /// China
    Cn,
    /// Japan
    CoJp,
    /// United Kingdom
    CoUk,
    /// United States
    #[default]
    Com,
    /// Germany
    De,
    /// Spain
    Es,
    /// France
    Fr,
    /// India
    In,
    /// Italy
    It,
}

impl Location {
    /// All supported marketplaces.
    pub const ALL: [Location; 10] = [
        Location::Ca,
        Location::Cn,
        Location::CoJp,
        Location::CoUk,
        Location::Com,
        Location::De,
        Location::Es,
        Location::Fr,
        Location::In,
        Location::It,
    ];

    /// The marketplace code as used in the host name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Ca => "ca",
            Location::Cn => "cn",
            Location::CoJp => "co.jp",
            Location::CoUk => "co.uk",
            Location::Com => "com",
            Location::De => "de",
            Location::Es => "es",
            Location::Fr => "fr",
            Location::In => "in",
            Location::It => "it",
        }
    }

    /// Host of the endpoint for this marketplace.
    pub fn host(&self) -> String {
        format!("{HOST_PREFIX}.{}", self.as_str())
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.to_lowercase();
        Location::ALL
            .into_iter()
            .find(|l| l.as_str() == code)
            .ok_or_else(|| Error::validation_failed("Location", format!("invalid location '{s}'")))
    }
}

/// Representation a successful response is handed back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// The response body exactly as received.
    Raw,
    /// The parsed XML tree.
    #[default]
    Tree,
    /// The XML tree converted into an ordered JSON value.
    Map,
}

impl FromStr for ResponseFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "raw" | "string" => Ok(ResponseFormat::Raw),
            "tree" | "simplexml" => Ok(ResponseFormat::Tree),
            "map" | "array" => Ok(ResponseFormat::Map),
            _ => Err(Error::validation_failed(
                "ResponseFormat",
                format!("invalid response format '{s}'"),
            )),
        }
    }
}

/// Config carries the settings that shape a request but are never sent as
/// query parameters.
#[derive(Clone)]
pub struct Config {
    location: Location,
    ssl: bool,
    delay: bool,
    response_format: ResponseFormat,
    secret_key: String,
    ca_bundle: PathBuf,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("location", &self.location)
            .field("ssl", &self.ssl)
            .field("delay", &self.delay)
            .field("response_format", &self.response_format)
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("ca_bundle", &self.ca_bundle)
            .finish()
    }
}

impl Config {
    /// Create a new config for the `com` marketplace.
    ///
    /// SSL and the rate limit delay start disabled and responses are
    /// returned as [`ResponseFormat::Tree`].
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            location: Location::default(),
            ssl: false,
            delay: false,
            response_format: ResponseFormat::default(),
            secret_key: String::new(),
            ca_bundle: PathBuf::from(DEFAULT_CA_BUNDLE),
        };
        config.set_secret_key(secret_key)?;
        Ok(config)
    }

    /// Use another CA bundle path.
    ///
    /// Only affects later calls to [`Config::set_ssl`].
    pub fn with_ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = path.into();
        self
    }

    /// Get the marketplace.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether requests are sent over https.
    pub fn ssl(&self) -> bool {
        self.ssl
    }

    /// Whether a courtesy delay runs before each request.
    pub fn delay(&self) -> bool {
        self.delay
    }

    /// Get the response format.
    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    /// Get the secret key used to sign requests.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Get the CA bundle path.
    pub fn ca_bundle(&self) -> &PathBuf {
        &self.ca_bundle
    }

    /// Set the marketplace from its code, case insensitive.
    pub fn set_location(&mut self, location: &str) -> Result<&mut Self> {
        self.location = location.parse()?;
        Ok(self)
    }

    /// Enable or disable the courtesy delay.
    pub fn set_delay(&mut self, delay: bool) -> &mut Self {
        self.delay = delay;
        self
    }

    /// Set the response format.
    pub fn set_response_format(&mut self, format: ResponseFormat) -> &mut Self {
        self.response_format = format;
        self
    }

    /// Set the secret key, which must not be empty.
    pub fn set_secret_key(&mut self, secret_key: impl Into<String>) -> Result<&mut Self> {
        let secret_key = secret_key.into();
        if secret_key.is_empty() {
            return Err(Error::validation_failed(
                "SecretKey",
                "secret key must not be empty",
            ));
        }
        self.secret_key = secret_key;
        Ok(self)
    }

    /// Enable or disable https.
    ///
    /// Enabling checks right away that the CA bundle can be read through
    /// `ctx`. On failure the flag keeps its previous value.
    pub fn set_ssl(&mut self, ctx: &Context, ssl: bool) -> Result<&mut Self> {
        if ssl {
            let path = self.ca_bundle.to_string_lossy();
            ctx.file_read(&path).map_err(|e| {
                Error::certificate_missing("SSL root CA bundle is not present")
                    .with_source(e)
                    .with_context(format!("path: {path}"))
            })?;
            debug!("ssl enabled with CA bundle {path}");
        }

        self.ssl = ssl;
        Ok(self)
    }

    /// Scheme requests are sent with.
    pub fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }

    /// TLS options handed to the transport.
    pub fn tls_options(&self) -> TlsOptions {
        if self.ssl {
            TlsOptions {
                ca_bundle: Some(self.ca_bundle.clone()),
                verify_host: true,
            }
        } else {
            TlsOptions::default()
        }
    }
}
