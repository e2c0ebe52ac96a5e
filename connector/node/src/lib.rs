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

use definition::HostAddress;
use std::sync::{PoisonError, RwLock};

const LOCAL_HOST: &str = "127.0.0.1";
const LOCAL_PORT: u16 = 8080;
const LOCAL_NODE: &str = "local";

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_identifier: String,
    host_address: HostAddress,
    coordinator: bool,
}

impl Node {
    pub fn worker<I: ToString>(node_identifier: I, host_address: HostAddress) -> Node {
        Node {
            node_identifier: node_identifier.to_string(),
            host_address,
            coordinator: false,
        }
    }

    pub fn coordinator<I: ToString>(node_identifier: I, host_address: HostAddress) -> Node {
        Node {
            node_identifier: node_identifier.to_string(),
            host_address,
            coordinator: true,
        }
    }

    pub fn node_identifier(&self) -> &str {
        &self.node_identifier
    }

    pub fn host_address(&self) -> &HostAddress {
        &self.host_address
    }

    pub fn is_coordinator(&self) -> bool {
        self.coordinator
    }
}

/// Cluster topology as seen by a connector.
pub trait NodeManager: Send + Sync {
    fn all_nodes(&self) -> Vec<Node>;

    fn current_node(&self) -> Node;

    fn worker_nodes(&self) -> Vec<Node> {
        self.all_nodes().into_iter().filter(|node| !node.is_coordinator()).collect()
    }

    /// Nodes that data may be placed on. Falls back to the current node when
    /// the cluster has no dedicated workers (single process deployments).
    fn required_worker_nodes(&self) -> Vec<Node> {
        let workers = self.worker_nodes();
        if workers.is_empty() {
            vec![self.current_node()]
        } else {
            workers
        }
    }
}

/// Topology of a single process, optionally extended with extra nodes.
#[derive(Debug)]
pub struct InMemoryNodeManager {
    current: Node,
    others: RwLock<Vec<Node>>,
}

impl InMemoryNodeManager {
    pub fn new(current: Node, others: Vec<Node>) -> InMemoryNodeManager {
        InMemoryNodeManager {
            current,
            others: RwLock::new(others),
        }
    }

    pub fn add_node(&self, node: Node) {
        let mut others = self.others.write().unwrap_or_else(PoisonError::into_inner);
        if self.current.node_identifier == node.node_identifier
            || others.iter().any(|known| known.node_identifier == node.node_identifier)
        {
            log::warn!("node {:?} is already known", node.node_identifier);
        } else {
            log::debug!("node {:?} joined at {}", node.node_identifier, node.host_address);
            others.push(node);
        }
    }
}

impl Default for InMemoryNodeManager {
    fn default() -> InMemoryNodeManager {
        InMemoryNodeManager::new(Node::worker(LOCAL_NODE, HostAddress::new(LOCAL_HOST, LOCAL_PORT)), vec![])
    }
}

impl NodeManager for InMemoryNodeManager {
    fn all_nodes(&self) -> Vec<Node> {
        let others = self.others.read().unwrap_or_else(PoisonError::into_inner);
        let mut nodes = Vec::with_capacity(others.len() + 1);
        nodes.push(self.current.clone());
        nodes.extend(others.iter().cloned());
        nodes
    }

    fn current_node(&self) -> Node {
        self.current.clone()
    }
}
