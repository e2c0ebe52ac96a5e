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

use data_definition_execution_plan::TableLayout;
use definition::{ConnectorSession, HostAddress, TableId};
use std::fmt::{self, Display, Formatter};

/// Unit of scan work addressed to the worker that holds a data fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySplit {
    table_id: TableId,
    part_number: usize,
    total_parts_per_worker: usize,
    address: HostAddress,
    expected_rows: u64,
}

impl MemorySplit {
    pub fn new(
        table_id: TableId,
        part_number: usize,
        total_parts_per_worker: usize,
        address: HostAddress,
        expected_rows: u64,
    ) -> MemorySplit {
        MemorySplit {
            table_id,
            part_number,
            total_parts_per_worker,
            address,
            expected_rows,
        }
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn part_number(&self) -> usize {
        self.part_number
    }

    pub fn total_parts_per_worker(&self) -> usize {
        self.total_parts_per_worker
    }

    pub fn address(&self) -> &HostAddress {
        &self.address
    }

    pub fn expected_rows(&self) -> u64 {
        self.expected_rows
    }
}

impl Display for MemorySplit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table {} part {}/{} at {} ({} rows)",
            self.table_id, self.part_number, self.total_parts_per_worker, self.address, self.expected_rows
        )
    }
}

pub struct MemorySplitManager {
    splits_per_node: usize,
}

impl MemorySplitManager {
    pub fn new(splits_per_node: usize) -> MemorySplitManager {
        MemorySplitManager {
            splits_per_node: splits_per_node.max(1),
        }
    }

    pub fn splits(&self, session: &ConnectorSession, layout: &TableLayout) -> Vec<MemorySplit> {
        let handle = layout.handle();
        let table_id = handle.table().table_id();
        let splits = handle
            .data_fragments()
            .iter()
            .flat_map(|fragment| {
                (0..self.splits_per_node).map(move |part_number| {
                    MemorySplit::new(
                        table_id,
                        part_number,
                        self.splits_per_node,
                        fragment.host().clone(),
                        fragment.rows(),
                    )
                })
            })
            .collect::<Vec<MemorySplit>>();
        log::debug!(
            "[{}] {} split(s) for {}",
            session,
            splits.len(),
            handle.table().full_table_name()
        );
        splits
    }
}
