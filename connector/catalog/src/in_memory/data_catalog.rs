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

use data_definition_execution_plan::{ColumnHandle, DataFragment, ExecutionError, TableHandle};
use definition::{
    ColumnMetadata, FullTableName, HostAddress, SchemaFilter, SchemaTablePrefix, TableId, TableMetadata,
    DEFAULT_SCHEMA,
};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        PoisonError, RwLock,
    },
};

#[derive(Default, Debug)]
pub(crate) struct TableIdGenerator {
    next: AtomicU64,
}

impl TableIdGenerator {
    pub(crate) fn next_id(&self) -> TableId {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub(crate) struct SchemaRegistry {
    names: RwLock<BTreeSet<String>>,
}

impl Default for SchemaRegistry {
    fn default() -> SchemaRegistry {
        let mut names = BTreeSet::new();
        names.insert(DEFAULT_SCHEMA.to_owned());
        SchemaRegistry {
            names: RwLock::new(names),
        }
    }
}

impl SchemaRegistry {
    pub(crate) fn list(&self) -> Vec<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub(crate) fn exists(&self, schema_name: &str) -> bool {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(schema_name)
    }

    pub(crate) fn create(&self, schema_name: &str) -> Result<(), ExecutionError> {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        if names.contains(schema_name) {
            Err(ExecutionError::SchemaAlreadyExists(schema_name.to_owned()))
        } else {
            names.insert(schema_name.to_owned());
            Ok(())
        }
    }

    /// Removes the schema unless `has_objects` reports something still living in it.
    /// `has_objects` runs under the registry write lock.
    pub(crate) fn remove<F: FnOnce(&str) -> bool>(
        &self,
        schema_name: &str,
        has_objects: F,
    ) -> Result<(), ExecutionError> {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        if schema_name == DEFAULT_SCHEMA {
            Err(ExecutionError::SchemaCannotBeDropped(schema_name.to_owned()))
        } else if !names.contains(schema_name) {
            Err(ExecutionError::SchemaDoesNotExist(schema_name.to_owned()))
        } else if has_objects(schema_name) {
            Err(ExecutionError::SchemaNotEmpty(schema_name.to_owned()))
        } else {
            names.remove(schema_name);
            Ok(())
        }
    }

    /// Runs `operation` while the schema is guaranteed to exist. Returns `None`
    /// when it does not.
    pub(crate) fn work_with<T, F: FnOnce() -> T>(&self, schema_name: &str, operation: F) -> Option<T> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        if names.contains(schema_name) {
            Some(operation())
        } else {
            None
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TableState {
    Pending,
    Committed,
}

#[derive(Debug)]
struct TableInfo {
    table_id: TableId,
    full_table_name: FullTableName,
    columns: Vec<ColumnMetadata>,
    properties: HashMap<String, String>,
    fragments: BTreeMap<HostAddress, DataFragment>,
    state: TableState,
}

impl TableInfo {
    fn handle(&self, connector_id: &str) -> TableHandle {
        TableHandle::new(
            connector_id,
            self.full_table_name.clone(),
            self.table_id,
            self.columns
                .iter()
                .enumerate()
                .map(|(ordinal, column)| ColumnHandle::new(column.name(), column.sql_type(), ordinal))
                .collect(),
        )
    }

    fn metadata(&self) -> TableMetadata {
        TableMetadata::with_properties(
            self.full_table_name.clone(),
            self.columns.clone(),
            self.properties.clone(),
        )
    }

    fn attach(&mut self, fragments: Vec<DataFragment>) {
        for fragment in fragments {
            let merged = match self.fragments.get(fragment.host()) {
                Some(existing) => existing.merge(&fragment),
                None => fragment,
            };
            self.fragments.insert(merged.host().clone(), merged);
        }
    }
}

#[derive(Default, Debug)]
struct Tables {
    ids: BTreeMap<FullTableName, TableId>,
    infos: HashMap<TableId, TableInfo>,
}

impl Tables {
    fn active_ids(&self) -> BTreeSet<TableId> {
        self.ids.values().copied().collect()
    }
}

/// Name index and per-table state, both behind one lock so that a table is
/// never listed without its state or the other way around.
#[derive(Debug)]
pub(crate) struct TableCatalog {
    connector_id: String,
    id_generator: TableIdGenerator,
    inner: RwLock<Tables>,
}

impl TableCatalog {
    pub(crate) fn new(connector_id: String) -> TableCatalog {
        TableCatalog {
            connector_id,
            id_generator: TableIdGenerator::default(),
            inner: RwLock::default(),
        }
    }

    /// Registers the table and returns its handle together with the ids of
    /// every table known right after the registration.
    pub(crate) fn create(
        &self,
        metadata: &TableMetadata,
        state: TableState,
    ) -> Result<(TableHandle, BTreeSet<TableId>), ExecutionError> {
        let mut tables = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let full_table_name = metadata.full_table_name();
        if tables.ids.contains_key(full_table_name) {
            return Err(ExecutionError::TableAlreadyExists(full_table_name.clone()));
        }
        let table_id = self.id_generator.next_id();
        let info = TableInfo {
            table_id,
            full_table_name: full_table_name.clone(),
            columns: metadata.columns().to_vec(),
            properties: metadata.properties().clone(),
            fragments: BTreeMap::new(),
            state,
        };
        let handle = info.handle(&self.connector_id);
        tables.ids.insert(full_table_name.clone(), table_id);
        tables.infos.insert(table_id, info);
        Ok((handle, tables.active_ids()))
    }

    pub(crate) fn handle(&self, full_table_name: &FullTableName) -> Option<TableHandle> {
        let tables = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .ids
            .get(full_table_name)
            .and_then(|table_id| tables.infos.get(table_id))
            .map(|info| info.handle(&self.connector_id))
    }

    pub(crate) fn list(&self, filter: &SchemaFilter) -> Vec<FullTableName> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .keys()
            .filter(|name| filter.accepts(name))
            .cloned()
            .collect()
    }

    pub(crate) fn has_objects_in(&self, schema_name: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .keys()
            .any(|name| name.in_schema(schema_name))
    }

    pub(crate) fn active_ids(&self) -> BTreeSet<TableId> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).active_ids()
    }

    /// Merges `fragments` into the table layout. Returns `false` when the
    /// table is gone.
    /// Merges `fragments` into the table and moves it to `state` when one is
    /// given. Returns `false` when the table is gone.
    pub(crate) fn attach(&self, table_id: TableId, fragments: Vec<DataFragment>, state: Option<TableState>) -> bool {
        let mut tables = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match tables.infos.get_mut(&table_id) {
            None => false,
            Some(info) => {
                info.attach(fragments);
                if let Some(state) = state {
                    info.state = state;
                }
                true
            }
        }
    }

    /// Moves the table to `new_name`. Returns `Ok(false)` when the table is gone.
    pub(crate) fn rename(&self, table_id: TableId, new_name: &FullTableName) -> Result<bool, ExecutionError> {
        let mut tables = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if tables.ids.contains_key(new_name) {
            return Err(ExecutionError::TableAlreadyExists(new_name.clone()));
        }
        let old_name = match tables.infos.get_mut(&table_id) {
            None => return Ok(false),
            Some(info) => std::mem::replace(&mut info.full_table_name, new_name.clone()),
        };
        tables.ids.remove(&old_name);
        tables.ids.insert(new_name.clone(), table_id);
        Ok(true)
    }

    pub(crate) fn remove(&self, table_id: TableId) -> Option<FullTableName> {
        let mut tables = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let info = tables.infos.remove(&table_id)?;
        tables.ids.remove(&info.full_table_name);
        Some(info.full_table_name)
    }

    pub(crate) fn metadata(&self, table_id: TableId) -> Option<TableMetadata> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .infos
            .get(&table_id)
            .map(TableInfo::metadata)
    }

    pub(crate) fn state(&self, table_id: TableId) -> Option<TableState> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .infos
            .get(&table_id)
            .map(|info| info.state)
    }

    pub(crate) fn data_fragments(&self, table_id: TableId) -> Option<(TableHandle, Vec<DataFragment>)> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .infos
            .get(&table_id)
            .map(|info| (info.handle(&self.connector_id), info.fragments.values().cloned().collect()))
    }

    pub(crate) fn columns(&self, prefix: &SchemaTablePrefix) -> HashMap<FullTableName, Vec<ColumnMetadata>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .infos
            .values()
            .filter(|info| prefix.matches(&info.full_table_name))
            .map(|info| (info.full_table_name.clone(), info.columns.clone()))
            .collect()
    }
}
