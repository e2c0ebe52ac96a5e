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

#[rstest::rstest]
fn default_schema_only(metadata: MemoryMetadata) {
    assert_eq!(metadata.list_schema_names(&session()), vec![DEFAULT.to_owned()]);
    assert!(metadata.schema_exists(&session(), &SchemaName::from(&DEFAULT)));
}

#[rstest::rstest]
fn create_schemas_with_different_names(metadata: MemoryMetadata) {
    assert_eq!(
        metadata.create_schema(&session(), &SchemaName::from(&SCHEMA), HashMap::new()),
        Ok(())
    );
    assert_eq!(
        metadata.create_schema(&session(), &SchemaName::from(&OTHER_SCHEMA), HashMap::new()),
        Ok(())
    );

    assert_eq!(
        metadata.list_schema_names(&session()),
        vec![DEFAULT.to_owned(), OTHER_SCHEMA.to_owned(), SCHEMA.to_owned()]
    );
}

#[rstest::rstest]
fn create_schema_with_the_same_name(metadata_with_schema: MemoryMetadata) {
    let mut properties = HashMap::new();
    properties.insert("location".to_owned(), "memory".to_owned());

    assert_eq!(
        metadata_with_schema.create_schema(&session(), &SchemaName::from(&SCHEMA), properties),
        Err(ExecutionError::SchemaAlreadyExists(SCHEMA.to_owned()))
    );
    assert_eq!(
        metadata_with_schema.list_schema_names(&session()),
        vec![DEFAULT.to_owned(), SCHEMA.to_owned()]
    );
}

#[rstest::rstest]
fn drop_empty_schema(metadata_with_schema: MemoryMetadata) {
    assert_eq!(
        metadata_with_schema.drop_schema(&session(), &SchemaName::from(&SCHEMA)),
        Ok(())
    );
    assert!(!metadata_with_schema.schema_exists(&session(), &SchemaName::from(&SCHEMA)));
}

#[rstest::rstest]
fn drop_nonexistent_schema(metadata: MemoryMetadata) {
    assert_eq!(
        metadata.drop_schema(&session(), &SchemaName::from(&SCHEMA)),
        Err(ExecutionError::SchemaDoesNotExist(SCHEMA.to_owned()))
    );
}

#[rstest::rstest]
fn drop_default_schema(metadata: MemoryMetadata) {
    assert_eq!(
        metadata.drop_schema(&session(), &SchemaName::from(&DEFAULT)),
        Err(ExecutionError::SchemaCannotBeDropped(DEFAULT.to_owned()))
    );
    assert_eq!(metadata.list_schema_names(&session()), vec![DEFAULT.to_owned()]);
}

#[rstest::rstest]
fn drop_schema_with_table(metadata_with_table: MemoryMetadata) {
    assert_eq!(
        metadata_with_table.drop_schema(&session(), &SchemaName::from(&SCHEMA)),
        Err(ExecutionError::SchemaNotEmpty(SCHEMA.to_owned()))
    );
    assert!(metadata_with_table.schema_exists(&session(), &SchemaName::from(&SCHEMA)));
}

#[rstest::rstest]
fn drop_schema_with_view(metadata_with_schema: MemoryMetadata) {
    metadata_with_schema
        .create_view(&session(), &FullTableName::from((&SCHEMA, &VIEW)), "select 1", false)
        .expect("view created");

    assert_eq!(
        metadata_with_schema.drop_schema(&session(), &SchemaName::from(&SCHEMA)),
        Err(ExecutionError::SchemaNotEmpty(SCHEMA.to_owned()))
    );

    metadata_with_schema.drop_view(&session(), &FullTableName::from((&SCHEMA, &VIEW)));

    assert_eq!(
        metadata_with_schema.drop_schema(&session(), &SchemaName::from(&SCHEMA)),
        Ok(())
    );
}
