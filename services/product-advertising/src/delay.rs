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

use std::fmt::Debug;
use std::time::Duration;

/// Courtesy pause run right before a request is sent, when the config
/// enables it.
pub trait Delay: Debug + Send + Sync + 'static {
    /// Block the calling thread.
    fn wait(&self);
}

/// Sleep for a fixed duration, one second by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    duration: Duration,
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FixedDelay {
    /// Create a delay of `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Get the duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Delay for FixedDelay {
    fn wait(&self) {
        std::thread::sleep(self.duration);
    }
}
