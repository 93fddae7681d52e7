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

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use log::debug;
use paapi_core::time::{now, DateTime};
use paapi_core::utils::Redact;
use paapi_core::{Context, Error, Result};

use crate::canonical::canonical_query_string;
use crate::config::{Config, ResponseFormat};
use crate::constants::*;
use crate::delay::{Delay, FixedDelay};
use crate::format::Response;
use crate::params::Params;
use crate::response::RequestOutcome;
use crate::sign_request::RequestSigner;

/// The catalog operations a client can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Look up a browse node and its children.
    BrowseNodeLookup {
        /// Id of the node.
        browse_node_id: String,
    },
    /// Look up one or more items by id.
    ItemLookup {
        /// Item id, an ASIN unless `IdType` says otherwise.
        item_id: String,
    },
    /// Search items, optionally by keywords.
    ItemSearch {
        /// Keywords; `None` sends no `Keywords` key at all.
        keywords: Option<String>,
    },
}

impl Operation {
    /// Value of the `Operation` query key.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::BrowseNodeLookup { .. } => "BrowseNodeLookup",
            Operation::ItemLookup { .. } => "ItemLookup",
            Operation::ItemSearch { .. } => "ItemSearch",
        }
    }
}

/// Client for the Product Advertising API.
///
/// The client owns its [`Config`] and [`Params`]; both are mutated only
/// through their setters and survive across requests until
/// [`Client::reset_params`] is called.
#[derive(Debug)]
pub struct Client {
    ctx: Context,
    config: Config,
    params: Params,
    delay: Arc<dyn Delay>,

    time: Option<DateTime>,
}

impl Client {
    /// Create a client for the `com` marketplace.
    pub fn new(
        ctx: Context,
        access_key_id: &str,
        associate_tag: &str,
        secret_key: &str,
        version: &str,
    ) -> Result<Self> {
        Ok(Self {
            ctx,
            config: Config::new(secret_key)?,
            params: Params::new(access_key_id, associate_tag, version)?,
            delay: Arc::new(FixedDelay::default()),
            time: None,
        })
    }

    /// Create a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Replace the delay run before each request when delay is enabled.
    pub fn with_delay(mut self, delay: impl Delay) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Get the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Get the config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the config for mutation.
    ///
    /// Use [`Client::set_ssl`] to toggle ssl, it needs the context.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Get the params.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Get the params for mutation.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Enable or disable https, checking the CA bundle when enabling.
    pub fn set_ssl(&mut self, ssl: bool) -> Result<&mut Self> {
        self.config.set_ssl(&self.ctx, ssl)?;
        Ok(self)
    }

    /// Keep only `AWSAccessKeyId`, `AssociateTag` and `Version`.
    pub fn reset_params(&mut self) -> &mut Self {
        self.params.reset();
        self
    }

    /// The parameters handed to the canonicalizer for `op`, before
    /// `Service` and `Timestamp` are added.
    pub fn query_params(&self, op: &Operation) -> Result<BTreeMap<String, String>> {
        let mut params: BTreeMap<String, String> = self
            .params
            .to_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        params.insert(OPERATION.to_string(), op.name().to_string());

        match op {
            Operation::BrowseNodeLookup { browse_node_id } => {
                params.insert(
                    BROWSE_NODE_ID.to_string(),
                    required(BROWSE_NODE_ID, browse_node_id)?,
                );
            }
            Operation::ItemLookup { item_id } => {
                params.insert(ITEM_ID.to_string(), required(ITEM_ID, item_id)?);
            }
            Operation::ItemSearch { keywords } => {
                if let Some(keywords) = keywords {
                    params.insert(KEYWORDS.to_string(), required(KEYWORDS, keywords)?);
                }
                if let Some(power) = self.params.power().build()? {
                    params.insert(POWER.to_string(), power);
                }
            }
        }

        Ok(params)
    }

    /// Build the signed url for `op`.
    pub fn signed_url(&self, op: &Operation) -> Result<String> {
        let now = self.time.unwrap_or_else(now);
        let canonical = canonical_query_string(self.query_params(op)?, now);
        let signer = RequestSigner::from_config(&self.config);
        Ok(signer.sign(self.config.secret_key(), &canonical))
    }

    /// Run `op` and return its classified outcome.
    ///
    /// Only errors raised before the request is sent are returned as `Err`,
    /// everything after that is part of the outcome.
    pub fn outcome(&self, op: &Operation) -> Result<RequestOutcome> {
        let url = self.signed_url(op)?;
        let req = http::Request::get(url.as_str()).body(Bytes::new())?;

        if self.config.delay() {
            debug!("delaying {} request", op.name());
            self.delay.wait();
        }

        debug!(
            "sending {} request to {}",
            op.name(),
            self.config.location().host()
        );
        let sent = self.ctx.http_send_as_string(req, &self.config.tls_options());
        let outcome = RequestOutcome::classify(sent);
        debug!(
            "{} request finished, success: {}",
            op.name(),
            outcome.is_success()
        );
        Ok(outcome)
    }

    /// Run `op` and adapt a successful response to the configured format.
    pub fn execute(&self, op: &Operation) -> Result<Response> {
        let payload = self.outcome(op)?.into_result()?;
        Ok(Response::adapt(payload, self.config.response_format()))
    }

    /// Look up a browse node.
    pub fn browse_node_lookup(&self, browse_node_id: &str) -> Result<Response> {
        self.execute(&Operation::BrowseNodeLookup {
            browse_node_id: browse_node_id.to_string(),
        })
    }

    /// Look up an item.
    pub fn item_lookup(&self, item_id: &str) -> Result<Response> {
        self.execute(&Operation::ItemLookup {
            item_id: item_id.to_string(),
        })
    }

    /// Search items. Power expressions are only sent by this operation.
    pub fn item_search(&self, keywords: Option<&str>) -> Result<Response> {
        self.execute(&Operation::ItemSearch {
            keywords: keywords.map(|v| v.to_string()),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::request_invalid(format!("{field} must not be empty"))
            .with_context(format!("field: {field}")));
    }
    Ok(value.to_string())
}

/// Builder of [`Client`].
///
/// Every field can be given explicitly or loaded with
/// [`ClientBuilder::from_env`]; explicit values win.
#[derive(Clone, Default)]
pub struct ClientBuilder {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `associate_tag` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_ASSOCIATE_TAG`]
    pub associate_tag: Option<String>,
    /// `version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_VERSION`]
    /// - default to [`DEFAULT_VERSION`]
    pub version: Option<String>,
    /// `location` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_LOCATION`]
    /// - default to `com`
    pub location: Option<String>,
    /// `ca_bundle` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_CA_BUNDLE`]
    /// - default to [`DEFAULT_CA_BUNDLE`]
    pub ca_bundle: Option<PathBuf>,
    /// Response format, default to [`ResponseFormat::Tree`].
    pub response_format: Option<ResponseFormat>,
    /// Send requests over https.
    pub ssl: bool,
    /// Run the courtesy delay before each request.
    pub delay: bool,
}

impl Debug for ClientBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field(
                "access_key_id",
                &self.access_key_id.as_deref().map(Redact::from),
            )
            .field(
                "secret_access_key",
                &self.secret_access_key.as_deref().map(Redact::from),
            )
            .field("associate_tag", &self.associate_tag)
            .field("version", &self.version)
            .field("location", &self.location)
            .field("ca_bundle", &self.ca_bundle)
            .field("response_format", &self.response_format)
            .field("ssl", &self.ssl)
            .field("delay", &self.delay)
            .finish()
    }
}

impl ClientBuilder {
    /// Set the access key id.
    pub fn with_access_key_id(mut self, v: impl Into<String>) -> Self {
        self.access_key_id = Some(v.into());
        self
    }

    /// Set the secret access key.
    pub fn with_secret_access_key(mut self, v: impl Into<String>) -> Self {
        self.secret_access_key = Some(v.into());
        self
    }

    /// Set the associate tag.
    pub fn with_associate_tag(mut self, v: impl Into<String>) -> Self {
        self.associate_tag = Some(v.into());
        self
    }

    /// Set the API version.
    pub fn with_version(mut self, v: impl Into<String>) -> Self {
        self.version = Some(v.into());
        self
    }

    /// Set the marketplace code.
    pub fn with_location(mut self, v: impl Into<String>) -> Self {
        self.location = Some(v.into());
        self
    }

    /// Set the CA bundle path.
    pub fn with_ca_bundle(mut self, v: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(v.into());
        self
    }

    /// Set the response format.
    pub fn with_response_format(mut self, v: ResponseFormat) -> Self {
        self.response_format = Some(v);
        self
    }

    /// Enable or disable https.
    pub fn with_ssl(mut self, v: bool) -> Self {
        self.ssl = v;
        self
    }

    /// Enable or disable the courtesy delay.
    pub fn with_delay(mut self, v: bool) -> Self {
        self.delay = v;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(PAAPI_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_ASSOCIATE_TAG) {
            self.associate_tag.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_VERSION) {
            self.version.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_LOCATION) {
            self.location.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_CA_BUNDLE) {
            self.ca_bundle.get_or_insert(PathBuf::from(v));
        }

        self
    }

    /// Build the client, validating every value through the client setters.
    pub fn build(self, ctx: Context) -> Result<Client> {
        let access_key_id = self
            .access_key_id
            .ok_or_else(|| missing("access_key_id", PAAPI_ACCESS_KEY_ID))?;
        let secret_access_key = self
            .secret_access_key
            .ok_or_else(|| missing("secret_access_key", PAAPI_SECRET_ACCESS_KEY))?;
        let associate_tag = self
            .associate_tag
            .ok_or_else(|| missing("associate_tag", PAAPI_ASSOCIATE_TAG))?;
        let version = self.version.as_deref().unwrap_or(DEFAULT_VERSION);

        let mut client = Client::new(
            ctx,
            &access_key_id,
            &associate_tag,
            &secret_access_key,
            version,
        )?;

        if let Some(ca_bundle) = self.ca_bundle {
            client.config = client.config.with_ca_bundle(ca_bundle);
        }
        if let Some(location) = &self.location {
            client.config.set_location(location)?;
        }
        client
            .config
            .set_response_format(self.response_format.unwrap_or_default())
            .set_delay(self.delay);
        if self.ssl {
            client.set_ssl(true)?;
        }

        debug!("client built: {:?}", client.config);
        Ok(client)
    }
}

fn missing(field: &str, env: &str) -> Error {
    Error::config_invalid(format!("{field} is required"))
        .with_context(format!("env: {env}"))
}
