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

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use types::SqlType;

pub const DEFAULT_SCHEMA: &str = "default";

pub type TableId = u64;

#[derive(Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Clone)]
pub struct FullTableName {
    schema: String,
    table: String,
}

impl FullTableName {
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn in_schema(&self, schema_name: &str) -> bool {
        self.schema == schema_name
    }
}

impl<S: ToString, T: ToString> From<(&S, &T)> for FullTableName {
    fn from(tuple: (&S, &T)) -> Self {
        let (schema, table) = tuple;
        FullTableName {
            schema: schema.to_string(),
            table: table.to_string(),
        }
    }
}

impl Display for FullTableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Clone)]
pub struct SchemaName(String);

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl SchemaName {
    pub fn from<S: ToString>(schema_name: &S) -> SchemaName {
        SchemaName(schema_name.to_string())
    }
}

impl Display for SchemaName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Restricts a listing to one schema or lets it span every schema.
///
/// An empty schema name is a real (and most likely nonexistent) schema,
/// not a shorthand for "everything".
#[derive(Debug, PartialEq, Clone)]
pub enum SchemaFilter {
    All,
    One(SchemaName),
}

impl SchemaFilter {
    pub fn one<S: ToString>(schema_name: &S) -> SchemaFilter {
        SchemaFilter::One(SchemaName::from(schema_name))
    }

    pub fn accepts(&self, full_table_name: &FullTableName) -> bool {
        match self {
            SchemaFilter::All => true,
            SchemaFilter::One(schema_name) => full_table_name.in_schema(schema_name.as_ref()),
        }
    }
}

/// Lookup prefix used by view and column listings: nothing, a schema, or an exact name.
#[derive(Debug, PartialEq, Clone)]
pub enum SchemaTablePrefix {
    All,
    Schema(SchemaName),
    Table(FullTableName),
}

impl SchemaTablePrefix {
    pub fn schema<S: ToString>(schema_name: &S) -> SchemaTablePrefix {
        SchemaTablePrefix::Schema(SchemaName::from(schema_name))
    }

    pub fn table<S: ToString, T: ToString>(schema_name: &S, table_name: &T) -> SchemaTablePrefix {
        SchemaTablePrefix::Table(FullTableName::from((schema_name, table_name)))
    }

    pub fn matches(&self, full_table_name: &FullTableName) -> bool {
        match self {
            SchemaTablePrefix::All => true,
            SchemaTablePrefix::Schema(schema_name) => full_table_name.in_schema(schema_name.as_ref()),
            SchemaTablePrefix::Table(name) => name == full_table_name,
        }
    }
}

impl From<&FullTableName> for SchemaTablePrefix {
    fn from(full_table_name: &FullTableName) -> SchemaTablePrefix {
        SchemaTablePrefix::Table(full_table_name.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    name: String,
    sql_type: SqlType,
}

impl ColumnMetadata {
    pub fn new<N: ToString>(name: N, sql_type: SqlType) -> ColumnMetadata {
        ColumnMetadata {
            name: name.to_string(),
            sql_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    full_table_name: FullTableName,
    columns: Vec<ColumnMetadata>,
    properties: HashMap<String, String>,
}

impl TableMetadata {
    pub fn new(full_table_name: FullTableName, columns: Vec<ColumnMetadata>) -> TableMetadata {
        TableMetadata::with_properties(full_table_name, columns, HashMap::new())
    }

    pub fn with_properties(
        full_table_name: FullTableName,
        columns: Vec<ColumnMetadata>,
        properties: HashMap<String, String>,
    ) -> TableMetadata {
        TableMetadata {
            full_table_name,
            columns,
            properties,
        }
    }

    pub fn full_table_name(&self) -> &FullTableName {
        &self.full_table_name
    }

    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    full_view_name: FullTableName,
    view_data: String,
}

impl ViewDefinition {
    pub fn new<D: ToString>(full_view_name: FullTableName, view_data: D) -> ViewDefinition {
        ViewDefinition {
            full_view_name,
            view_data: view_data.to_string(),
        }
    }

    pub fn full_view_name(&self) -> &FullTableName {
        &self.full_view_name
    }

    pub fn view_data(&self) -> &str {
        &self.view_data
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Clone)]
pub struct HostAddress {
    host: String,
    port: u16,
}

impl HostAddress {
    pub fn new<H: ToString>(host: H, port: u16) -> HostAddress {
        HostAddress {
            host: host.to_string(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Display for HostAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Identity of the caller. The catalog never inspects it beyond logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorSession {
    query_id: String,
    user: String,
}

impl ConnectorSession {
    pub fn new<Q: ToString, U: ToString>(query_id: Q, user: U) -> ConnectorSession {
        ConnectorSession {
            query_id: query_id.to_string(),
            user: user.to_string(),
        }
    }

    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

impl Display for ConnectorSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.query_id)
    }
}
