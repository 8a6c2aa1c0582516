//! Tests for ABAP-specific SELECT clauses.

mod common;
use common::*;

use sapsql_core::ast::{Expr, IntoKind, ParameterStyle};

#[test]
fn select_single() {
    let select = parse_select("SELECT SINGLE carrid, connid FROM sflight WHERE carrid = 'AA'");
    assert!(select.flags.single);
    assert_eq!(select.columns.len(), 2);
}

#[test]
fn up_to_rows_without_where() {
    let result = assert_valid("SELECT carrid, connid FROM sflight UP TO 10 ROWS");
    let select = parse_select("SELECT carrid, connid FROM sflight UP TO 10 ROWS");
    assert_eq!(select.flags.up_to_rows, Some(10));
    assert!(result.warnings.is_empty());
}

#[test]
fn up_to_rows_after_where() {
    let select = parse_select("SELECT * FROM sflight WHERE carrid = 'AA' UP TO 100 ROWS");
    assert_eq!(select.flags.up_to_rows, Some(100));
    assert!(select.where_clause.is_some());
}

#[test]
fn bypassing_buffer_before_where() {
    let select = parse_select("SELECT * FROM sflight BYPASSING BUFFER WHERE carrid = 'AA'");
    assert!(select.flags.bypassing_buffer);
    assert!(select.where_clause.is_some());
}

#[test]
fn client_specified() {
    assert_valid("SELECT * FROM t000 CLIENT SPECIFIED WHERE mandt = '100'");
    let select = parse_select(
        "SELECT mandt, bukrs FROM t001 CLIENT SPECIFIED WHERE mandt IN ('100', '200')",
    );
    assert!(select.flags.client_specified);
}

#[test]
fn for_update_with_up_to() {
    let select =
        parse_select("SELECT * FROM sflight WHERE carrid = 'AA' UP TO 10 ROWS FOR UPDATE");
    assert!(select.flags.for_update);
    assert_eq!(select.flags.up_to_rows, Some(10));
}

#[test]
fn package_size() {
    let select = parse_select("SELECT carrid INTO TABLE @lt_data FROM sflight PACKAGE SIZE 500");
    assert_eq!(select.flags.package_size, Some(500));
    assert_eq!(select.flags.into.map(|i| i.kind), Some(IntoKind::Table));
}

#[test]
fn into_variants() {
    let cases = [
        (
            "SELECT SINGLE carrid, connid INTO @lv_data FROM sflight WHERE carrid = 'AA'",
            IntoKind::Fields,
        ),
        (
            "SELECT carrid, connid INTO TABLE @lt_flights FROM sflight WHERE carrid = 'AA'",
            IntoKind::Table,
        ),
        (
            "SELECT * INTO CORRESPONDING FIELDS OF @ls_flight FROM sflight WHERE carrid = 'AA'",
            IntoKind::CorrespondingFields,
        ),
        (
            "SELECT * FROM sflight WHERE carrid = 'AA' INTO CORRESPONDING FIELDS OF TABLE @lt_f",
            IntoKind::CorrespondingTable,
        ),
    ];
    for (sql, kind) in cases {
        assert_valid(sql);
        assert_eq!(parse_select(sql).flags.into.map(|i| i.kind), Some(kind), "{sql}");
    }
}

#[test]
fn into_field_list() {
    let select = parse_select(
        "SELECT carrid, connid FROM spfli WHERE cityfrom = 'FRANKFURT' INTO (@lv_carrid, @lv_connid)",
    );
    let into = select.flags.into.unwrap();
    assert_eq!(into.targets.len(), 2);
}

#[test]
fn appending_table() {
    let select = parse_select(
        "SELECT carrid, connid APPENDING TABLE @lt_flights FROM sflight WHERE carrid = 'AA'",
    );
    assert_eq!(select.flags.appending.map(|a| a.kind), Some(IntoKind::Table));
}

#[test]
fn inline_declaration_target() {
    let select = parse_select("SELECT carrid FROM scarr INTO TABLE @DATA(lt_carriers)");
    let into = select.flags.into.unwrap();
    assert!(matches!(
        &into.targets[0],
        Expr::Parameter { style: ParameterStyle::Host, name: Some(name), .. } if name == "DATA(lt_carriers)"
    ));
}

#[test]
fn host_variables() {
    assert_valid("SELECT * FROM sflight WHERE carrid = @lv_carrid AND connid = @lv_connid");
    assert_valid("SELECT * FROM sflight WHERE carrid = :lv_carrid");
    assert_valid("SELECT * INTO TABLE @lt_flights FROM sflight WHERE carrid IN @lt_carriers");
}

#[test]
fn duplicate_suffix_clause_is_error() {
    let errors =
        assert_invalid("SELECT * FROM sflight UP TO 1 ROWS WHERE carrid = 'AA' UP TO 5 ROWS");
    assert!(errors[0].starts_with("Syntax error: Duplicate UP TO ROWS clause"));
}

#[test]
fn up_to_without_rows_is_error() {
    assert_invalid("SELECT * FROM sflight UP TO 10");
}

#[test]
fn clause_words_as_names() {
    let select = parse_select(
        "SELECT size, client FROM package WHERE client = '100' AND size > 0 \
         CLIENT SPECIFIED UP TO 5 ROWS",
    );
    assert_eq!(select.columns.len(), 2);
    assert!(select.flags.client_specified);
    assert_eq!(select.flags.up_to_rows, Some(5));

    assert_valid("SELECT table~size FROM table WHERE table~size CP '1*'");
    assert_valid("UPDATE buffer SET size = 10 WHERE client = '100'");
    assert_valid("SELECT * FROM sflight WHERE fields = 'x' BYPASSING BUFFER");
}

#[test]
fn operator_words_are_not_names() {
    let errors = assert_invalid("SELECT cp FROM sflight");
    assert!(errors[0].starts_with("Syntax error: "), "{errors:?}");
    assert_invalid("SELECT * FROM sflight WHERE single = 1");
}
