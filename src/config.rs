// Copyright 2020 - 2021 Alex Dukhno
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{env, str::FromStr, thread};

const CONNECTOR_ID_VAR: &str = "MEMORY_CONNECTOR_ID";
const SPLITS_PER_NODE_VAR: &str = "MEMORY_SPLITS_PER_NODE";
const MAX_DATA_PER_NODE_VAR: &str = "MEMORY_MAX_DATA_PER_NODE";

const DEFAULT_CONNECTOR_ID: &str = "memory";
const DEFAULT_MAX_DATA_PER_NODE: u64 = 128 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConfig {
    connector_id: String,
    splits_per_node: usize,
    max_data_per_node: u64,
}

impl MemoryConfig {
    pub fn new<C: ToString>(connector_id: C, splits_per_node: usize, max_data_per_node: u64) -> MemoryConfig {
        MemoryConfig {
            connector_id: connector_id.to_string(),
            splits_per_node: splits_per_node.max(1),
            max_data_per_node,
        }
    }

    /// Defaults overridden by `MEMORY_CONNECTOR_ID`, `MEMORY_SPLITS_PER_NODE`
    /// and `MEMORY_MAX_DATA_PER_NODE`.
    pub fn from_env() -> MemoryConfig {
        MemoryConfig::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<L: Fn(&str) -> Option<String>>(lookup: L) -> MemoryConfig {
        let defaults = MemoryConfig::default();
        MemoryConfig::new(
            lookup(CONNECTOR_ID_VAR)
                .filter(|connector_id| !connector_id.trim().is_empty())
                .unwrap_or(defaults.connector_id),
            parse_or(&lookup, SPLITS_PER_NODE_VAR, defaults.splits_per_node),
            parse_or(&lookup, MAX_DATA_PER_NODE_VAR, defaults.max_data_per_node),
        )
    }

    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn splits_per_node(&self) -> usize {
        self.splits_per_node
    }

    pub fn max_data_per_node(&self) -> u64 {
        self.max_data_per_node
    }
}

impl Default for MemoryConfig {
    fn default() -> MemoryConfig {
        let splits_per_node = thread::available_parallelism().map(|cpus| cpus.get()).unwrap_or(1);
        MemoryConfig::new(DEFAULT_CONNECTOR_ID, splits_per_node, DEFAULT_MAX_DATA_PER_NODE)
    }
}

fn parse_or<T: FromStr, L: Fn(&str) -> Option<String>>(lookup: &L, name: &str, default: T) -> T {
    match lookup(name) {
        None => default,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::warn!("{} has invalid value {:?}, default is used", name, value);
                default
            }
        },
    }
}
