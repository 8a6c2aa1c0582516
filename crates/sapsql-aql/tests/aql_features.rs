//! Tests for AQL objects, dot notation and the function library.

mod common;
use common::*;

use sapsql_aql::aql_checker;
use sapsql_core::ast::{BuiltinFunction, Expr, TableRef};
use sapsql_core::Clause;

#[test]
fn business_objects() {
    for (object, fields) in [
        ("Document", "DocumentId, Document.Title, Document.Status, Document.Amount"),
        ("Project", "ProjectId, Project.ProjectName, Project.Status"),
        ("Supplier", "SupplierId, Supplier.Name, Supplier.Region"),
        ("Invoice", "InvoiceId, Invoice.InvoiceNumber, Invoice.Amount"),
        ("Contract", "ContractId, Contract.ContractAmount"),
        ("Requisition", "RequisitionId, Requisition.TotalAmount"),
        ("Order", "OrderId, Order.OrderNumber, Order.OrderAmount"),
    ] {
        let sql = format!("SELECT {object}.{fields} FROM {object}");
        assert_valid(&sql);
        assert!(
            matches!(parse_select(&sql).from, Some(TableRef::Table { object: true, .. })),
            "{sql}"
        );
    }
}

#[test]
fn plain_tables_are_not_objects() {
    let select = parse_select("SELECT a FROM sflight");
    assert!(matches!(
        select.from,
        Some(TableRef::Table { object: false, .. })
    ));
}

#[test]
fn order_object_and_order_by() {
    assert_valid("SELECT o.OrderId FROM Order o WHERE o.Status = 'Open' ORDER BY o.OrderId");
}

#[test]
fn dot_notation() {
    let select = parse_select(
        "SELECT RFXBid.ContentDocumentReference.DocumentId FROM ariba.sourcing.rfx.RFXBid AS RFXBid",
    );
    assert!(matches!(
        &select.columns[0].expr,
        Expr::Column { table: Some(t), name, .. }
            if t == "RFXBid.ContentDocumentReference" && name == "DocumentId"
    ));
}

#[test]
fn dot_notation_in_join() {
    assert_valid(
        "SELECT * FROM Document d INNER JOIN Project p ON d.ProjectId = p.ProjectId \
         WHERE Document.Status = 'Active'",
    );
}

#[test]
fn library_functions() {
    let select = parse_select(
        "SELECT FORMATDATE(CreateDate, 'yyyy-MM-dd'), ADDDAYS(CreateDate, 30), \
         ISNULL(Amount, 0), IIF(Amount > 0, 'Y', 'N'), CEILING(Amount) FROM Invoice",
    );
    let exprs: Vec<&Expr> = select.columns.iter().map(|c| &c.expr).collect();
    assert!(matches!(exprs[0], Expr::Anonymous(call) if call.name == "FORMATDATE"));
    assert!(matches!(exprs[1], Expr::Anonymous(call) if call.name == "ADDDAYS"));
    assert!(matches!(exprs[2], Expr::Function(call) if call.func == BuiltinFunction::Coalesce));
    assert!(matches!(exprs[3], Expr::Function(call) if call.func == BuiltinFunction::If));
    assert!(matches!(exprs[4], Expr::Function(call) if call.func == BuiltinFunction::Ceil));
}

#[test]
fn lenient_function_arguments() {
    assert_valid("SELECT SUBSTRING(Title) FROM Document");
    assert_valid("SELECT FORMATDATE(CreatedDate, INVALID_FORMAT) FROM Document");
}

#[test]
fn complex_queries() {
    for sql in [
        "SELECT Project.ProjectName, COUNT(DISTINCT Document.DocumentId) AS DocCount, \
         SUM(Document.Amount) AS TotalAmount FROM Project \
         INNER JOIN Document ON Project.ProjectId = Document.ProjectId \
         WHERE Project.Status = 'Active' AND Document.Amount > 1000 \
         GROUP BY Project.ProjectName HAVING COUNT(*) > 5 ORDER BY TotalAmount DESC",
        "SELECT Supplier.Region, \
         SUM(CASE WHEN Invoice.Status = 'Paid' THEN Invoice.Amount ELSE 0 END) AS PaidAmount \
         FROM Invoice GROUP BY Supplier.Region",
        "SELECT d.DocumentId, p.ProjectName, s.Name FROM Document d \
         INNER JOIN Project p ON d.ProjectId = p.ProjectId \
         INNER JOIN Supplier s ON d.SupplierId = s.SupplierId \
         WHERE d.Amount > (SELECT AVG(Amount) FROM Document WHERE Status = 'Active')",
        "SELECT Status, COUNT(*) FROM Document",
    ] {
        assert_valid(sql);
    }
}

#[test]
fn no_advisory_warnings() {
    let result = assert_valid("SELECT * FROM Document");
    assert!(result.warnings.is_empty());
}

#[test]
fn batch_with_valid_and_invalid() {
    let results = aql_checker().batch_check(&[
        "SELECT * FROM Document WHERE Status = 'Active'",
        "SELECT WHERE Status = 'Active'",
        "SELECT COUNT(*) FROM Invoice",
    ]);
    let valid: Vec<bool> = results.iter().map(|r| r.valid).collect();
    assert_eq!(valid, vec![true, false, true]);
    assert!(results[0].analysis.has_clause(Clause::Where));
}
