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

use definition::FullTableName;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    NotEmpty,
    NotSupported,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExecutionError {
    SchemaAlreadyExists(String),
    SchemaDoesNotExist(String),
    SchemaNotEmpty(String),
    SchemaCannotBeDropped(String),
    TableAlreadyExists(FullTableName),
    ViewAlreadyExists(FullTableName),
}

impl ExecutionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecutionError::SchemaAlreadyExists(_)
            | ExecutionError::TableAlreadyExists(_)
            | ExecutionError::ViewAlreadyExists(_) => ErrorKind::AlreadyExists,
            ExecutionError::SchemaDoesNotExist(_) => ErrorKind::NotFound,
            ExecutionError::SchemaNotEmpty(_) => ErrorKind::NotEmpty,
            ExecutionError::SchemaCannotBeDropped(_) => ErrorKind::NotSupported,
        }
    }
}

impl Display for ExecutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::SchemaAlreadyExists(schema_name) => write!(f, "Schema [{}] already exists", schema_name),
            ExecutionError::SchemaDoesNotExist(schema_name) => write!(f, "Schema {} not found", schema_name),
            ExecutionError::SchemaNotEmpty(schema_name) => write!(f, "Schema not empty: {}", schema_name),
            ExecutionError::SchemaCannotBeDropped(schema_name) => {
                write!(f, "Schema [{}] can not be dropped", schema_name)
            }
            ExecutionError::TableAlreadyExists(full_table_name) => {
                write!(f, "Table [{}] already exists", full_table_name)
            }
            ExecutionError::ViewAlreadyExists(full_view_name) => write!(f, "View already exists: {}", full_view_name),
        }
    }
}

impl std::error::Error for ExecutionError {}
