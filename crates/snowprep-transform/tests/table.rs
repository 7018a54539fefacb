//! Tests for whole-table translation.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use snowprep_model::CodeMapping;
use snowprep_transform::{TransformError, column_values, first_example_value, translate_export};

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn mapping() -> CodeMapping {
    [("A1", "Billing Error"), ("B2", "Late Fee")]
        .into_iter()
        .collect()
}

fn export_df() -> DataFrame {
    test_df(vec![
        ("Complaint Number", vec![Some("1"), Some("2"), Some("3"), Some("4")]),
        (
            "Codes",
            vec![Some(r#"["A1","Z9"]"#), None, Some("not json"), Some("[]")],
        ),
        (
            "Product Type Sub Category",
            vec![
                Some(r#"["Loans","Mortgage"]"#),
                Some("[]"),
                None,
                Some("{oops"),
            ],
        ),
        ("Assignee", vec![Some("Ana"), None, Some("Bo"), Some("Cy")]),
    ])
}

#[test]
fn translates_codes_and_subcategories_per_row() {
    let (df, _) = translate_export(export_df(), &mapping()).unwrap();

    assert_eq!(
        column_values(&df, "Codes").unwrap(),
        vec![
            Some(r#"["Billing Error","Z9"]"#.to_string()),
            Some("[]".to_string()),
            Some("[]".to_string()),
            None,
        ]
    );
    assert_eq!(
        column_values(&df, "Product Type Sub Category").unwrap(),
        vec![Some("Loans,Mortgage".to_string()), None, None, None]
    );
}

#[test]
fn preserves_rows_and_columns() {
    let input = export_df();
    let names: Vec<String> = input
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let (df, stats) = translate_export(input, &mapping()).unwrap();

    assert_eq!(df.height(), 4);
    assert_eq!(stats.rows, 4);
    let out_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(out_names, names);
    assert_eq!(
        column_values(&df, "Assignee").unwrap(),
        vec![
            Some("Ana".to_string()),
            None,
            Some("Bo".to_string()),
            Some("Cy".to_string())
        ]
    );
}

#[test]
fn collects_translation_stats() {
    let (_, stats) = translate_export(export_df(), &mapping()).unwrap();

    assert_eq!(stats.codes_translated, 1);
    assert_eq!(stats.codes_mapped, 1);
    assert_eq!(stats.codes_unmapped, 1);
    assert_eq!(stats.codes_missing, 1);
    assert_eq!(stats.codes_malformed, 1);
    assert_eq!(stats.codes_empty, 1);
    assert_eq!(stats.subcategories_joined, 1);
    assert_eq!(stats.subcategories_empty, 1);
    assert_eq!(stats.subcategories_missing, 1);
    assert_eq!(stats.subcategories_malformed, 1);
    assert_eq!(stats.malformed_fields(), 2);
    assert!(!stats.has_code_category);
}

#[test]
fn code_category_nulls_become_empty_array() {
    let df = test_df(vec![
        ("Complaint Number", vec![Some("1"), Some("2")]),
        ("Codes", vec![Some("[]"), Some("[]")]),
        ("Product Type Sub Category", vec![None, None]),
        ("Code Category", vec![None, Some(r#"["Fees"]"#)]),
    ]);

    let (df, stats) = translate_export(df, &mapping()).unwrap();

    assert!(stats.has_code_category);
    assert_eq!(stats.code_categories_filled, 1);
    assert_eq!(
        column_values(&df, "Code Category").unwrap(),
        vec![Some("[]".to_string()), Some(r#"["Fees"]"#.to_string())]
    );
}

#[test]
fn missing_codes_column_is_an_error() {
    let df = test_df(vec![("Complaint Number", vec![Some("1")])]);
    let result = translate_export(df, &mapping());
    assert!(matches!(
        result,
        Err(TransformError::MissingColumn { ref column }) if column == "Codes"
    ));
}

#[test]
fn first_example_value_skips_only_empty_arrays() {
    let df = test_df(vec![(
        "Codes",
        vec![Some("[]"), Some(r#"["Late Fee"]"#), Some(r#"["x"]"#)],
    )]);
    assert_eq!(
        first_example_value(&df, "Codes").unwrap(),
        Some(Some(r#"["Late Fee"]"#.to_string()))
    );

    let with_null = test_df(vec![("Codes", vec![Some("[]"), None, Some(r#"["x"]"#)])]);
    assert_eq!(first_example_value(&with_null, "Codes").unwrap(), Some(None));

    let all_empty = test_df(vec![("Codes", vec![Some("[]"), Some("[]")])]);
    assert_eq!(first_example_value(&all_empty, "Codes").unwrap(), None);
    assert_eq!(first_example_value(&df, "Code Category").unwrap(), None);
}
