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

mod mock;
mod operations;
mod signing;

use std::env;

use log::{debug, warn};
use paapi::{Client, Operation, RequestOutcome};
use paapi_core::{Context, OsEnv, Result};
use paapi_file_read_std::StdFileRead;
use paapi_http_send_reqwest::ReqwestHttpSend;

fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("PAAPI_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(StdFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::builder()
        .from_env(&ctx)
        .build(ctx)
        .expect("PAAPI_ACCESS_KEY_ID, PAAPI_SECRET_ACCESS_KEY and PAAPI_ASSOCIATE_TAG must be set");

    Some(client)
}

#[test]
fn test_live_item_search() -> Result<()> {
    let Some(mut client) = init_live_client() else {
        warn!("PAAPI_TEST is not set, skipped");
        return Ok(());
    };

    client
        .params_mut()
        .set_search_index("Books")
        .set_response_group("Small");

    let outcome = client.outcome(&Operation::ItemSearch {
        keywords: Some("rust programming".to_string()),
    })?;
    debug!("got outcome: {outcome:?}");

    // The endpoint must answer with XML, even when it rejects the request.
    assert!(
        !matches!(
            outcome,
            RequestOutcome::TransportError(_) | RequestOutcome::ParseError(_)
        ),
        "unexpected outcome: {outcome:?}"
    );
    Ok(())
}
