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

fn view(schema_name: &str, view_name: &str) -> FullTableName {
    FullTableName::from((&schema_name, &view_name))
}

#[rstest::rstest]
fn create_view_without_replace(metadata_with_schema: MemoryMetadata) {
    assert_eq!(
        metadata_with_schema.create_view(&session(), &view(SCHEMA, VIEW), "aaa", false),
        Ok(())
    );

    let error = metadata_with_schema
        .create_view(&session(), &view(SCHEMA, VIEW), "bbb", false)
        .unwrap_err();

    assert_eq!(error, ExecutionError::ViewAlreadyExists(view(SCHEMA, VIEW)));
    assert_eq!(error.to_string(), "View already exists: schema_name.view_name");
    assert_eq!(
        metadata_with_schema
            .views(&session(), &SchemaTablePrefix::from(&view(SCHEMA, VIEW)))
            .get(&view(SCHEMA, VIEW))
            .map(|definition| definition.view_data().to_owned()),
        Some("aaa".to_owned())
    );
}

#[rstest::rstest]
fn create_view_with_replace(metadata_with_schema: MemoryMetadata) {
    metadata_with_schema
        .create_view(&session(), &view(SCHEMA, VIEW), "aaa", true)
        .expect("view created");
    metadata_with_schema
        .create_view(&session(), &view(SCHEMA, VIEW), "bbb", true)
        .expect("view replaced");

    assert_eq!(
        metadata_with_schema
            .views(&session(), &SchemaTablePrefix::from(&view(SCHEMA, VIEW)))
            .get(&view(SCHEMA, VIEW))
            .map(|definition| definition.view_data().to_owned()),
        Some("bbb".to_owned())
    );
    assert_eq!(
        metadata_with_schema.list_views(&session(), &SchemaFilter::All),
        vec![view(SCHEMA, VIEW)]
    );
}

#[rstest::rstest]
fn create_view_in_nonexistent_schema(metadata: MemoryMetadata) {
    for replace in vec![false, true] {
        assert_eq!(
            metadata.create_view(&session(), &view(SCHEMA, VIEW), "aaa", replace),
            Err(ExecutionError::SchemaDoesNotExist(SCHEMA.to_owned()))
        );
    }
    assert!(metadata.list_views(&session(), &SchemaFilter::All).is_empty());
    assert_eq!(metadata.list_schema_names(&session()), vec![DEFAULT.to_owned()]);
}

#[rstest::rstest]
fn views_by_prefix(metadata_with_schema: MemoryMetadata) {
    metadata_with_schema
        .create_view(&session(), &view(SCHEMA, VIEW), "first", false)
        .expect("view created");
    metadata_with_schema
        .create_view(&session(), &view(SCHEMA, OTHER_VIEW), "second", false)
        .expect("view created");
    metadata_with_schema
        .create_view(&session(), &view(DEFAULT, VIEW), "third", false)
        .expect("view created");

    assert_eq!(
        metadata_with_schema.list_views(&session(), &SchemaFilter::one(&SCHEMA)),
        vec![view(SCHEMA, OTHER_VIEW), view(SCHEMA, VIEW)]
    );
    assert_eq!(
        metadata_with_schema
            .views(&session(), &SchemaTablePrefix::All)
            .len(),
        3
    );

    let in_schema = metadata_with_schema.views(&session(), &SchemaTablePrefix::schema(&SCHEMA));
    assert_eq!(in_schema.len(), 2);
    assert_eq!(
        in_schema.get(&view(SCHEMA, OTHER_VIEW)),
        Some(&ViewDefinition::new(view(SCHEMA, OTHER_VIEW), "second"))
    );

    assert_eq!(
        metadata_with_schema
            .views(&session(), &SchemaTablePrefix::table(&SCHEMA, &VIEW))
            .keys()
            .cloned()
            .collect::<Vec<_>>(),
        vec![view(SCHEMA, VIEW)]
    );
    assert!(metadata_with_schema
        .views(&session(), &SchemaTablePrefix::table(&SCHEMA, &"nonexistent_view"))
        .is_empty());
    assert!(metadata_with_schema
        .views(&session(), &SchemaTablePrefix::schema(&OTHER_SCHEMA))
        .is_empty());
}

#[rstest::rstest]
fn drop_views(metadata_with_schema: MemoryMetadata) {
    metadata_with_schema
        .create_view(&session(), &view(SCHEMA, VIEW), "first", false)
        .expect("view created");
    metadata_with_schema
        .create_view(&session(), &view(SCHEMA, OTHER_VIEW), "second", false)
        .expect("view created");

    metadata_with_schema.drop_view(&session(), &view(SCHEMA, VIEW));
    assert_eq!(
        metadata_with_schema.list_views(&session(), &SchemaFilter::one(&SCHEMA)),
        vec![view(SCHEMA, OTHER_VIEW)]
    );

    metadata_with_schema.drop_view(&session(), &view(SCHEMA, OTHER_VIEW));
    metadata_with_schema.drop_view(&session(), &view(SCHEMA, OTHER_VIEW));
    assert!(metadata_with_schema
        .views(&session(), &SchemaTablePrefix::All)
        .is_empty());
}

#[rstest::rstest]
fn tables_and_views_do_not_share_names(metadata_with_table: MemoryMetadata) {
    assert_eq!(
        metadata_with_table.create_view(&session(), &view(SCHEMA, TABLE), "select 1", false),
        Ok(())
    );
    assert_eq!(
        metadata_with_table.list_tables(&session(), &SchemaFilter::one(&SCHEMA)),
        vec![FullTableName::from((&SCHEMA, &TABLE))]
    );
}
