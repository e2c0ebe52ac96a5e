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

//! Memory connector: an in-process catalog of schemas, tables and views
//! together with the split manager that hands table data out to workers.

use catalog::MemoryMetadata;
use data_definition_execution_plan::TableLayout;
use definition::ConnectorSession;
use node::{InMemoryNodeManager, NodeManager};
use std::sync::Arc;

pub use catalog::TableState;
pub use config::MemoryConfig;
pub use split_manager::{MemorySplit, MemorySplitManager};

mod config;
mod split_manager;

pub struct MemoryConnector {
    config: MemoryConfig,
    node_manager: Arc<dyn NodeManager>,
    metadata: MemoryMetadata,
    split_manager: MemorySplitManager,
}

impl MemoryConnector {
    /// Connector for a single process cluster configured from environment.
    pub fn from_env() -> MemoryConnector {
        MemoryConnector::new(MemoryConfig::from_env(), Arc::new(InMemoryNodeManager::default()))
    }

    pub fn new(config: MemoryConfig, node_manager: Arc<dyn NodeManager>) -> MemoryConnector {
        log::info!(
            "memory connector {:?} with {} split(s) per node and {} bytes per node",
            config.connector_id(),
            config.splits_per_node(),
            config.max_data_per_node()
        );
        MemoryConnector {
            metadata: MemoryMetadata::new(node_manager.clone(), config.connector_id()),
            split_manager: MemorySplitManager::new(config.splits_per_node()),
            node_manager,
            config,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn node_manager(&self) -> &dyn NodeManager {
        self.node_manager.as_ref()
    }

    pub fn metadata(&self) -> &MemoryMetadata {
        &self.metadata
    }

    pub fn split_manager(&self) -> &MemorySplitManager {
        &self.split_manager
    }

    pub fn splits(&self, session: &ConnectorSession, layout: &TableLayout) -> Vec<MemorySplit> {
        self.split_manager.splits(session, layout)
    }
}
