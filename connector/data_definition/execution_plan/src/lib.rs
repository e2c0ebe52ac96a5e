// Copyright 2020 - present Alex Dukhno
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

use definition::{FullTableName, HostAddress, TableId};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use types::SqlType;

mod errors;

pub use errors::{ErrorKind, ExecutionError};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHandle {
    name: String,
    sql_type: SqlType,
    ordinal: usize,
}

impl ColumnHandle {
    pub fn new<N: ToString>(name: N, sql_type: SqlType, ordinal: usize) -> ColumnHandle {
        ColumnHandle {
            name: name.to_string(),
            sql_type,
            ordinal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Identity of one logical table as seen by the planner.
///
/// A handle is a value snapshot: renaming the table registers a new name for
/// the same `table_id` but does not touch handles already given out.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHandle {
    connector_id: String,
    full_table_name: FullTableName,
    table_id: TableId,
    columns: Vec<ColumnHandle>,
}

impl TableHandle {
    pub fn new<C: ToString>(
        connector_id: C,
        full_table_name: FullTableName,
        table_id: TableId,
        columns: Vec<ColumnHandle>,
    ) -> TableHandle {
        TableHandle {
            connector_id: connector_id.to_string(),
            full_table_name,
            table_id,
            columns,
        }
    }

    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn full_table_name(&self) -> &FullTableName {
        &self.full_table_name
    }

    pub fn schema_name(&self) -> &str {
        self.full_table_name.schema()
    }

    pub fn table_name(&self) -> &str {
        self.full_table_name.table()
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn columns(&self) -> &[ColumnHandle] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }

    pub fn column_types(&self) -> Vec<SqlType> {
        self.columns.iter().map(|col| col.sql_type).collect()
    }
}

/// Rows that a write placed on one worker host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFragment {
    host: HostAddress,
    rows: u64,
}

impl DataFragment {
    pub fn new(host: HostAddress, rows: u64) -> DataFragment {
        DataFragment { host, rows }
    }

    pub fn host(&self) -> &HostAddress {
        &self.host
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn merge(&self, other: &DataFragment) -> DataFragment {
        debug_assert_eq!(self.host, other.host, "fragments of different hosts can't be merged");
        DataFragment {
            host: self.host.clone(),
            rows: self.rows.saturating_add(other.rows),
        }
    }
}

/// Partitioning the engine would like a new table to have. The memory
/// connector accepts it and lays data out by writer host regardless.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewTableLayout {
    partition_columns: Vec<String>,
}

impl NewTableLayout {
    pub fn new(partition_columns: Vec<String>) -> NewTableLayout {
        NewTableLayout { partition_columns }
    }

    pub fn partition_columns(&self) -> &[String] {
        &self.partition_columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputTableHandle {
    table: TableHandle,
    active_table_ids: BTreeSet<TableId>,
}

impl OutputTableHandle {
    pub fn new(table: TableHandle, active_table_ids: BTreeSet<TableId>) -> OutputTableHandle {
        OutputTableHandle {
            table,
            active_table_ids,
        }
    }

    pub fn table(&self) -> &TableHandle {
        &self.table
    }

    pub fn active_table_ids(&self) -> &BTreeSet<TableId> {
        &self.active_table_ids
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertTableHandle {
    table: TableHandle,
    active_table_ids: BTreeSet<TableId>,
}

impl InsertTableHandle {
    pub fn new(table: TableHandle, active_table_ids: BTreeSet<TableId>) -> InsertTableHandle {
        InsertTableHandle {
            table,
            active_table_ids,
        }
    }

    pub fn table(&self) -> &TableHandle {
        &self.table
    }

    pub fn active_table_ids(&self) -> &BTreeSet<TableId> {
        &self.active_table_ids
    }
}

/// Token of an in-flight write, handed back to the catalog when the write ends.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteHandle {
    Create(OutputTableHandle),
    Insert(InsertTableHandle),
}

impl WriteHandle {
    pub fn table(&self) -> &TableHandle {
        match self {
            WriteHandle::Create(handle) => handle.table(),
            WriteHandle::Insert(handle) => handle.table(),
        }
    }

    pub fn active_table_ids(&self) -> &BTreeSet<TableId> {
        match self {
            WriteHandle::Create(handle) => handle.active_table_ids(),
            WriteHandle::Insert(handle) => handle.active_table_ids(),
        }
    }
}

impl From<OutputTableHandle> for WriteHandle {
    fn from(handle: OutputTableHandle) -> WriteHandle {
        WriteHandle::Create(handle)
    }
}

impl From<InsertTableHandle> for WriteHandle {
    fn from(handle: InsertTableHandle) -> WriteHandle {
        WriteHandle::Insert(handle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayoutHandle {
    table: TableHandle,
    data_fragments: Vec<DataFragment>,
}

impl TableLayoutHandle {
    pub fn new(table: TableHandle, data_fragments: Vec<DataFragment>) -> TableLayoutHandle {
        TableLayoutHandle { table, data_fragments }
    }

    pub fn table(&self) -> &TableHandle {
        &self.table
    }

    pub fn data_fragments(&self) -> &[DataFragment] {
        &self.data_fragments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    handle: TableLayoutHandle,
    worker_nodes: Vec<HostAddress>,
}

impl TableLayout {
    pub fn new(handle: TableLayoutHandle, worker_nodes: Vec<HostAddress>) -> TableLayout {
        TableLayout { handle, worker_nodes }
    }

    pub fn handle(&self) -> &TableLayoutHandle {
        &self.handle
    }

    pub fn worker_nodes(&self) -> &[HostAddress] {
        &self.worker_nodes
    }
}

impl Display for TableLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} fragment(s) on {} worker(s)]",
            self.handle.table.full_table_name,
            self.handle.data_fragments.len(),
            self.worker_nodes.len()
        )
    }
}
