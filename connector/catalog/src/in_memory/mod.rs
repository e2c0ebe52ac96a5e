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

use crate::in_memory::{
    data_catalog::{SchemaRegistry, TableCatalog},
    view_registry::ViewRegistry,
};
use data_definition_execution_plan::{
    ColumnHandle, DataFragment, ExecutionError, InsertTableHandle, NewTableLayout, OutputTableHandle, TableHandle,
    TableLayout, TableLayoutHandle, WriteHandle,
};
use definition::{
    ColumnMetadata, ConnectorSession, FullTableName, SchemaFilter, SchemaName, SchemaTablePrefix, TableId,
    TableMetadata, ViewDefinition,
};
use node::NodeManager;
use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

pub use data_catalog::TableState;

mod data_catalog;
mod view_registry;

/// Catalog of the memory connector.
///
/// Schemas, tables and views live in three registries. Operations touching
/// more than one of them lock in the order schemas, tables, views.
pub struct MemoryMetadata {
    connector_id: String,
    node_manager: Arc<dyn NodeManager>,
    schemas: SchemaRegistry,
    tables: TableCatalog,
    views: ViewRegistry,
}

impl MemoryMetadata {
    pub fn new<C: ToString>(node_manager: Arc<dyn NodeManager>, connector_id: C) -> MemoryMetadata {
        let connector_id = connector_id.to_string();
        log::debug!(
            "memory catalog {:?} starts with {} worker node(s)",
            connector_id,
            node_manager.required_worker_nodes().len()
        );
        MemoryMetadata {
            tables: TableCatalog::new(connector_id.clone()),
            connector_id,
            node_manager,
            schemas: SchemaRegistry::default(),
            views: ViewRegistry::default(),
        }
    }

    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn list_schema_names(&self, _session: &ConnectorSession) -> Vec<String> {
        self.schemas.list()
    }

    pub fn schema_exists(&self, _session: &ConnectorSession, schema_name: &SchemaName) -> bool {
        self.schemas.exists(schema_name.as_ref())
    }

    pub fn create_schema(
        &self,
        session: &ConnectorSession,
        schema_name: &SchemaName,
        properties: HashMap<String, String>,
    ) -> Result<(), ExecutionError> {
        self.schemas.create(schema_name.as_ref())?;
        log::debug!(
            "[{}] schema {} created, {} propert(ies) ignored",
            session,
            schema_name,
            properties.len()
        );
        Ok(())
    }

    pub fn drop_schema(&self, session: &ConnectorSession, schema_name: &SchemaName) -> Result<(), ExecutionError> {
        self.schemas.remove(schema_name.as_ref(), |schema_name| {
            self.tables.has_objects_in(schema_name) || self.views.has_objects_in(schema_name)
        })?;
        log::debug!("[{}] schema {} dropped", session, schema_name);
        Ok(())
    }

    pub fn list_tables(&self, _session: &ConnectorSession, filter: &SchemaFilter) -> Vec<FullTableName> {
        self.tables.list(filter)
    }

    pub fn table_handle(&self, _session: &ConnectorSession, full_table_name: &FullTableName) -> Option<TableHandle> {
        self.tables.handle(full_table_name)
    }

    pub fn table_metadata(&self, _session: &ConnectorSession, table: &TableHandle) -> Option<TableMetadata> {
        self.tables.metadata(table.table_id())
    }

    pub fn table_state(&self, _session: &ConnectorSession, table: &TableHandle) -> Option<TableState> {
        self.tables.state(table.table_id())
    }

    pub fn column_handles(&self, _session: &ConnectorSession, table: &TableHandle) -> HashMap<String, ColumnHandle> {
        table
            .columns()
            .iter()
            .map(|column| (column.name().to_owned(), column.clone()))
            .collect()
    }

    pub fn list_table_columns(
        &self,
        _session: &ConnectorSession,
        prefix: &SchemaTablePrefix,
    ) -> HashMap<FullTableName, Vec<ColumnMetadata>> {
        self.tables.columns(prefix)
    }

    pub fn create_table(
        &self,
        session: &ConnectorSession,
        metadata: &TableMetadata,
        ignore_existing: bool,
    ) -> Result<(), ExecutionError> {
        match self.register_table(metadata, TableState::Committed) {
            Ok((table, _)) => {
                log::debug!(
                    "[{}] table {} created with id {}",
                    session,
                    table.full_table_name(),
                    table.table_id()
                );
                Ok(())
            }
            Err(ExecutionError::TableAlreadyExists(full_table_name)) if ignore_existing => {
                log::debug!("[{}] table {} already exists, ignored", session, full_table_name);
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Registers the table right away so that planners can see it while the
    /// data-producing write runs. It stays `Pending` until `finish_create_table`.
    pub fn begin_create_table(
        &self,
        session: &ConnectorSession,
        metadata: &TableMetadata,
        layout: Option<&NewTableLayout>,
    ) -> Result<OutputTableHandle, ExecutionError> {
        if let Some(layout) = layout {
            log::debug!(
                "[{}] partitioning on {:?} requested for {} is not supported, using writer layout",
                session,
                layout.partition_columns(),
                metadata.full_table_name()
            );
        }
        let (table, active_table_ids) = self.register_table(metadata, TableState::Pending)?;
        log::debug!(
            "[{}] table {} pending with id {}",
            session,
            table.full_table_name(),
            table.table_id()
        );
        log::trace!("[{}] active table ids {:?}", session, active_table_ids);
        Ok(OutputTableHandle::new(table, active_table_ids))
    }

    pub fn finish_create_table(
        &self,
        session: &ConnectorSession,
        handle: &OutputTableHandle,
        fragments: Vec<DataFragment>,
    ) {
        self.attach_fragments(session, handle.table(), fragments, Some(TableState::Committed));
    }

    pub fn begin_insert(&self, session: &ConnectorSession, table: &TableHandle) -> InsertTableHandle {
        let active_table_ids = self.tables.active_ids();
        log::trace!(
            "[{}] insert into {} sees active table ids {:?}",
            session,
            table.full_table_name(),
            active_table_ids
        );
        InsertTableHandle::new(table.clone(), active_table_ids)
    }

    /// Adds rows without touching the table state: a pending table stays
    /// pending until `finish_create_table`.
    pub fn finish_insert(&self, session: &ConnectorSession, handle: &InsertTableHandle, fragments: Vec<DataFragment>) {
        self.attach_fragments(session, handle.table(), fragments, None);
    }

    pub fn finish_write(&self, session: &ConnectorSession, handle: &WriteHandle, fragments: Vec<DataFragment>) {
        match handle {
            WriteHandle::Create(handle) => self.finish_create_table(session, handle, fragments),
            WriteHandle::Insert(handle) => self.finish_insert(session, handle, fragments),
        }
    }

    pub fn rename_table(
        &self,
        session: &ConnectorSession,
        table: &TableHandle,
        new_name: &FullTableName,
    ) -> Result<(), ExecutionError> {
        let renamed = self
            .schemas
            .work_with(new_name.schema(), || self.tables.rename(table.table_id(), new_name))
            .unwrap_or_else(|| Err(ExecutionError::SchemaDoesNotExist(new_name.schema().to_owned())))?;
        if renamed {
            log::debug!("[{}] table {} renamed to {}", session, table.full_table_name(), new_name);
        } else {
            log::warn!(
                "[{}] table {} with id {} was dropped before rename",
                session,
                table.full_table_name(),
                table.table_id()
            );
        }
        Ok(())
    }

    pub fn drop_table(&self, session: &ConnectorSession, table: &TableHandle) {
        match self.tables.remove(table.table_id()) {
            Some(full_table_name) => log::debug!("[{}] table {} dropped", session, full_table_name),
            None => log::warn!("[{}] table {} is already dropped", session, table.full_table_name()),
        }
    }

    /// Single layout covering every data fragment written so far. A pending
    /// table has a layout with no fragments.
    pub fn table_layouts(&self, _session: &ConnectorSession, table: &TableHandle) -> Vec<TableLayout> {
        let worker_nodes = self
            .node_manager
            .required_worker_nodes()
            .into_iter()
            .map(|node| node.host_address().clone())
            .collect::<Vec<_>>();
        self.tables
            .data_fragments(table.table_id())
            .map(|(table, fragments)| TableLayout::new(TableLayoutHandle::new(table, fragments), worker_nodes))
            .into_iter()
            .collect()
    }

    pub fn create_view(
        &self,
        session: &ConnectorSession,
        full_view_name: &FullTableName,
        view_data: &str,
        replace: bool,
    ) -> Result<(), ExecutionError> {
        self.schemas
            .work_with(full_view_name.schema(), || {
                self.views.create(full_view_name, view_data, replace)
            })
            .unwrap_or_else(|| Err(ExecutionError::SchemaDoesNotExist(full_view_name.schema().to_owned())))?;
        log::debug!("[{}] view {} created", session, full_view_name);
        Ok(())
    }

    pub fn drop_view(&self, session: &ConnectorSession, full_view_name: &FullTableName) {
        if self.views.remove(full_view_name) {
            log::debug!("[{}] view {} dropped", session, full_view_name);
        } else {
            log::warn!("[{}] view {} does not exist", session, full_view_name);
        }
    }

    pub fn list_views(&self, _session: &ConnectorSession, filter: &SchemaFilter) -> Vec<FullTableName> {
        self.views.list(filter)
    }

    pub fn views(
        &self,
        _session: &ConnectorSession,
        prefix: &SchemaTablePrefix,
    ) -> HashMap<FullTableName, ViewDefinition> {
        self.views.matching(prefix)
    }

    fn register_table(
        &self,
        metadata: &TableMetadata,
        state: TableState,
    ) -> Result<(TableHandle, BTreeSet<TableId>), ExecutionError> {
        let full_table_name = metadata.full_table_name();
        self.schemas
            .work_with(full_table_name.schema(), || self.tables.create(metadata, state))
            .unwrap_or_else(|| Err(ExecutionError::SchemaDoesNotExist(full_table_name.schema().to_owned())))
    }

    fn attach_fragments(
        &self,
        session: &ConnectorSession,
        table: &TableHandle,
        fragments: Vec<DataFragment>,
        state: Option<TableState>,
    ) {
        let rows = fragments.iter().map(DataFragment::rows).fold(0, u64::saturating_add);
        if self.tables.attach(table.table_id(), fragments, state) {
            log::debug!(
                "[{}] {} row(s) written to {}",
                session,
                rows,
                table.full_table_name()
            );
        } else {
            log::warn!(
                "[{}] table {} with id {} was dropped before its write finished",
                session,
                table.full_table_name(),
                table.table_id()
            );
        }
    }
}

#[cfg(test)]
mod tests;
