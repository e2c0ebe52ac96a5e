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

use dashmap::{mapref::entry::Entry, DashMap};
use data_definition_execution_plan::ExecutionError;
use definition::{FullTableName, SchemaFilter, SchemaTablePrefix, ViewDefinition};
use std::collections::HashMap;

#[derive(Default, Debug)]
pub(crate) struct ViewRegistry {
    views: DashMap<FullTableName, ViewDefinition>,
}

impl ViewRegistry {
    pub(crate) fn create(
        &self,
        full_view_name: &FullTableName,
        view_data: &str,
        replace: bool,
    ) -> Result<(), ExecutionError> {
        let definition = ViewDefinition::new(full_view_name.clone(), view_data);
        match self.views.entry(full_view_name.clone()) {
            Entry::Occupied(mut existing) => {
                if replace {
                    existing.insert(definition);
                    Ok(())
                } else {
                    Err(ExecutionError::ViewAlreadyExists(full_view_name.clone()))
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(definition);
                Ok(())
            }
        }
    }

    pub(crate) fn remove(&self, full_view_name: &FullTableName) -> bool {
        self.views.remove(full_view_name).is_some()
    }

    pub(crate) fn list(&self, filter: &SchemaFilter) -> Vec<FullTableName> {
        let mut names = self
            .views
            .iter()
            .map(|view| view.key().clone())
            .filter(|name| filter.accepts(name))
            .collect::<Vec<FullTableName>>();
        names.sort();
        names
    }

    pub(crate) fn matching(&self, prefix: &SchemaTablePrefix) -> HashMap<FullTableName, ViewDefinition> {
        match prefix {
            SchemaTablePrefix::Table(full_view_name) => self
                .views
                .get(full_view_name)
                .map(|view| (full_view_name.clone(), view.value().clone()))
                .into_iter()
                .collect(),
            _ => self
                .views
                .iter()
                .filter(|view| prefix.matches(view.key()))
                .map(|view| (view.key().clone(), view.value().clone()))
                .collect(),
        }
    }

    pub(crate) fn has_objects_in(&self, schema_name: &str) -> bool {
        self.views.iter().any(|view| view.key().in_schema(schema_name))
    }
}
