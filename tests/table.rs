use schema_bridge::schema::{ColumnType, Field, Schema};
use schema_bridge::table::{render_schema, render_table};

#[test]
fn render_table_aligns_columns() {
    let headers = vec!["tag".to_string(), "type".to_string()];
    let rows = vec![
        vec!["INT".to_string(), "integer".to_string()],
        vec!["LARGEINT".to_string(), "string".to_string()],
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "tag       type",
            "--------  -------",
            "INT       integer",
            "LARGEINT  string",
        ]
    );
}

#[test]
fn render_table_normalizes_control_characters() {
    let headers = vec!["comment".to_string()];
    let rows = vec![vec!["line1\nline2\tvalue".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "line1 line2 value");
}

#[test]
fn render_schema_of_empty_schema_prints_only_headers() {
    let rendered = render_schema(&Schema::default());
    assert_eq!(rendered.lines().count(), 2);

    let single = render_schema(&Schema::new(vec![Field::nullable("x", ColumnType::Null)]));
    assert!(single.lines().last().unwrap().starts_with("1  x"));
}
