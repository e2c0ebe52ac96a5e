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

use super::*;
use definition::HostAddress;
use node::{InMemoryNodeManager, Node};
use types::SqlType;

#[cfg(test)]
mod schema;
#[cfg(test)]
mod view;

const CONNECTOR: &str = "test";
const DEFAULT: &str = "default";
const SCHEMA: &str = "schema_name";
const OTHER_SCHEMA: &str = "other_schema_name";
const TABLE: &str = "table_name";
const OTHER_TABLE: &str = "other_table_name";
const VIEW: &str = "view_name";
const OTHER_VIEW: &str = "other_view_name";

fn setup_logger() {
    if let Ok(()) = simple_logger::SimpleLogger::new().init() {};
}

fn session() -> ConnectorSession {
    ConnectorSession::new("query_id", "user")
}

fn local_host() -> HostAddress {
    HostAddress::new("127.0.0.1", 8080)
}

fn table_metadata(schema_name: &str, table_name: &str) -> TableMetadata {
    TableMetadata::new(
        FullTableName::from((&schema_name, &table_name)),
        vec![
            ColumnMetadata::new("col_1", SqlType::big_int()),
            ColumnMetadata::new("col_2", SqlType::var_char(10)),
        ],
    )
}

#[rstest::fixture]
fn metadata() -> MemoryMetadata {
    setup_logger();
    MemoryMetadata::new(Arc::new(InMemoryNodeManager::default()), CONNECTOR)
}

#[rstest::fixture]
fn metadata_with_schema(metadata: MemoryMetadata) -> MemoryMetadata {
    metadata
        .create_schema(&session(), &SchemaName::from(&SCHEMA), HashMap::new())
        .expect("schema created");
    metadata
}

#[rstest::fixture]
fn metadata_with_table(metadata_with_schema: MemoryMetadata) -> MemoryMetadata {
    metadata_with_schema
        .create_table(&session(), &table_metadata(SCHEMA, TABLE), false)
        .expect("table created");
    metadata_with_schema
}

#[rstest::fixture]
fn two_workers() -> MemoryMetadata {
    setup_logger();
    let node_manager = InMemoryNodeManager::new(
        Node::coordinator("coordinator", local_host()),
        vec![
            Node::worker("worker-1", HostAddress::new("10.0.0.1", 8080)),
            Node::worker("worker-2", HostAddress::new("10.0.0.2", 8080)),
        ],
    );
    MemoryMetadata::new(Arc::new(node_manager), CONNECTOR)
}
