use pretty_assertions::assert_eq;
use sable_ir::{Position, StringInterner};

use super::*;

fn pos_at(interner: &StringInterner, line: u32, column: u32) -> Position {
    Position::new(interner.intern("main.sbl"), line, column)
}

#[test]
fn error_line_without_code_segment() {
    let interner = StringInterner::new();
    let mut diags = Diagnostics::new();

    diags.report_error(
        ErrorCode::UndefinedIdent,
        pos_at(&interner, 4, 9),
        "Use of undefined identifier 'foo'",
    );

    assert_eq!(
        diags.render(&interner),
        "ERROR(main.sbl:4:9): Use of undefined identifier 'foo'\n"
    );
}

#[test]
fn error_line_with_code_segment() {
    let interner = StringInterner::new();
    let mut diags = Diagnostics::with_config(DiagnosticConfig { error_codes: true });

    diags.report_error(
        ErrorCode::Redefinition,
        pos_at(&interner, 2, 1),
        "Duplicate definition of symbol x",
    );

    assert_eq!(
        diags.render(&interner),
        "ERROR(main.sbl:2:1, E0014): Duplicate definition of symbol x\n"
    );
}

#[test]
fn notes_chain_to_most_recent_error() {
    let interner = StringInterner::new();
    let mut diags = Diagnostics::new();

    diags.report_error(
        ErrorCode::Redefinition,
        pos_at(&interner, 5, 1),
        "Duplicate definition of symbol x",
    );
    diags.report_note(pos_at(&interner, 1, 1), "Previous definition of x");
    diags.report_error(
        ErrorCode::UndefinedIdent,
        pos_at(&interner, 7, 3),
        "Use of undefined identifier 'y'",
    );

    assert_eq!(
        diags.render(&interner),
        "ERROR(main.sbl:5:1): Duplicate definition of symbol x\n\
         NOTE(main.sbl:1:1): Previous definition of x\n\
         ERROR(main.sbl:7:3): Use of undefined identifier 'y'\n"
    );
}

#[test]
fn flush_clears_the_list() {
    let interner = StringInterner::new();
    let mut diags = Diagnostics::new();

    diags.report_error(ErrorCode::Syntax, pos_at(&interner, 1, 1), "bad");
    assert!(diags.has_errors());

    let out = diags.output_reported_errors(&interner);
    assert!(out.contains("bad"));
    assert!(!diags.has_errors());
    assert_eq!(diags.render(&interner), "");
}

#[test]
fn absorb_appends_in_order() {
    let interner = StringInterner::new();
    let mut diags = Diagnostics::new();
    let mut batch = Diagnostics::new();

    diags.report_error(ErrorCode::Syntax, pos_at(&interner, 1, 1), "first");
    batch.report_error(ErrorCode::Syntax, pos_at(&interner, 2, 1), "second");
    diags.absorb(batch);

    assert_eq!(diags.error_count(), 2);
    let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);
}
