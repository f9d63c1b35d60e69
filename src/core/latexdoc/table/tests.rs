//! Tests for the table engine: buffering, repacking and width negotiation

use proptest::prelude::*;

use super::cell::{ColumnId, TabCell, TabMem, TabRow};
use super::router::{TableEvent, TableRouter};
use super::simulate::{monospace, simulate, NegotiationOutcome, PageMetrics};
use super::widths::{negotiate, Instruction};
use crate::utils::error::DocGenError;

const EPS: f64 = 1e-6;
const HEAD: &str = "\\begin{longtable}[l]{*{2}{l}}\n";

fn feed(router: &mut TableRouter, events: &[TableEvent<'_>]) -> String {
    events
        .iter()
        .map(|e| router.handle(*e).unwrap())
        .collect()
}

fn text_row(texts: &[&str]) -> TabRow {
    TabRow {
        cells: texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                TabCell::new(ColumnId::from_index(i).unwrap(), 1, "\\multicolumn{1}{l}")
                    .with_content(*t)
            })
            .collect(),
        tail: "\\\\ ".into(),
        addit: "%\n".into(),
    }
}

fn negotiate_rows(rows: Vec<TabRow>, columns: usize) -> NegotiationOutcome {
    negotiate_with_picture(rows, columns, 0.0)
}

fn negotiate_with_picture(rows: Vec<TabRow>, columns: usize, picture_width: f64) -> NegotiationOutcome {
    let mut table = TabMem::new(HEAD, columns);
    table.rows = rows;
    let mut instructions = vec![Instruction::InitTable { columns }];
    instructions.extend(negotiate(&mut table, picture_width).unwrap());
    simulate(&instructions, PageMetrics::default(), monospace(6.0))
}

fn picture_cell(width: f64) -> String {
    format!("\\grmkpicture{{p.jpg}}{{{:.1}}}{{{:.1}}}{{p}}", width, width)
}

// ============================================================================
// Buffering
// ============================================================================

#[test]
fn test_span_adds_phantoms_before_cell() {
    let mut router = TableRouter::new();
    feed(
        &mut router,
        &[
            TableEvent::TableBegin { head: HEAD, columns: 3 },
            TableEvent::RowBegin,
            TableEvent::CellBegin { head: "\\multicolumn{3}{l}", span: 3 },
            TableEvent::CellText("wide"),
            TableEvent::CellEnd,
            TableEvent::RowEnd { terminator: "\\\\ ", decoration: "%\n" },
        ],
    );
    let table = router.buffered().unwrap();
    let cells = &table.rows[0].cells;
    assert_eq!(cells.len(), 3);
    assert!(cells[0].is_phantom());
    assert_eq!(cells[0].column.index(), 0);
    assert!(cells[1].is_phantom());
    assert_eq!(cells[1].column.index(), 1);
    assert_eq!(cells[2].column.index(), 2);
    assert_eq!(cells[2].span, 3);
    assert_eq!(cells[2].content, "wide");
}

#[test]
fn test_cell_text_is_trimmed() {
    let mut router = TableRouter::new();
    feed(
        &mut router,
        &[
            TableEvent::TableBegin { head: HEAD, columns: 1 },
            TableEvent::RowBegin,
            TableEvent::CellBegin { head: "", span: 1 },
            TableEvent::CellText("\n  "),
            TableEvent::CellText("Name "),
            TableEvent::CellEnd,
            TableEvent::RowEnd { terminator: "\\\\ ", decoration: "%\n" },
        ],
    );
    assert_eq!(router.buffered().unwrap().rows[0].cells[0].content, "Name");
}

#[test]
fn test_repack_transposes_paragraphs() {
    let mut router = TableRouter::new();
    router
        .handle(TableEvent::TableBegin { head: HEAD, columns: 2 })
        .unwrap();
    router.handle(TableEvent::RowBegin).unwrap();
    router.enter_multirow_cell();
    feed(
        &mut router,
        &[
            TableEvent::CellBegin { head: "A", span: 1 },
            TableEvent::CellText("x1&&x2&&"),
            TableEvent::CellEnd,
            TableEvent::CellBegin { head: "B", span: 1 },
            TableEvent::CellText("y1&&"),
            TableEvent::CellEnd,
            TableEvent::RowEnd { terminator: "\\\\ ", decoration: "\\hline %\n" },
        ],
    );

    let table = router.buffered().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells[0].content, "x1");
    assert_eq!(table.rows[0].cells[1].content, "y1");
    assert_eq!(table.rows[1].cells[0].content, "x2");
    assert_eq!(table.rows[1].cells[1].content, "");
    assert_eq!(table.rows[1].cells[1].head, "B");
    assert_eq!(table.rows[0].addit, "");
    assert_eq!(table.rows[1].addit, "\\hline %\n");
}

#[test]
fn test_repack_drops_empty_last_cell() {
    let mut router = TableRouter::new();
    router
        .handle(TableEvent::TableBegin { head: HEAD, columns: 3 })
        .unwrap();
    router.handle(TableEvent::RowBegin).unwrap();
    router.enter_multirow_cell();
    feed(
        &mut router,
        &[
            TableEvent::CellBegin { head: "A", span: 1 },
            TableEvent::CellText("x1&&"),
            TableEvent::CellEnd,
            TableEvent::CellBegin { head: "B", span: 1 },
            TableEvent::CellText("y1&&"),
            TableEvent::CellEnd,
            TableEvent::CellBegin { head: "C", span: 1 },
            TableEvent::CellEnd,
            TableEvent::RowEnd { terminator: "\\\\ ", decoration: "%\n" },
        ],
    );
    let table = router.buffered().unwrap();
    assert_eq!(table.columns, 2);
    assert_eq!(table.rows[0].cells.len(), 2);
}

#[test]
fn test_too_many_columns() {
    let mut router = TableRouter::new();
    let err = router
        .handle(TableEvent::TableBegin { head: HEAD, columns: 27 })
        .unwrap_err();
    assert!(matches!(
        err,
        DocGenError::TooManyColumns { columns: 27, max: 26 }
    ));
}

#[test]
fn test_cell_past_last_column() {
    let mut router = TableRouter::new();
    feed(
        &mut router,
        &[
            TableEvent::TableBegin { head: HEAD, columns: 26 },
            TableEvent::RowBegin,
            TableEvent::CellBegin { head: "", span: 26 },
            TableEvent::CellEnd,
        ],
    );
    let err = router
        .handle(TableEvent::CellBegin { head: "", span: 1 })
        .unwrap_err();
    assert!(err.is_capacity());
}

// ============================================================================
// Negotiation
// ============================================================================

#[test]
fn test_span_counter_exhaustion() {
    let mut table = TabMem::new(HEAD, 2);
    for _ in 0..17577 {
        let mut row = TabRow::new();
        row.cells.push(TabCell::phantom(ColumnId::from_index(0).unwrap()));
        row.cells
            .push(TabCell::new(ColumnId::from_index(1).unwrap(), 2, "").with_content("x"));
        table.rows.push(row);
    }
    let err = negotiate(&mut table, 0.0).unwrap_err();
    assert!(matches!(err, DocGenError::SpanCounterExhausted { width: 3 }));
}

#[test]
fn test_single_wide_column_fills_page() {
    let wide = "x".repeat(200);
    let out = negotiate_rows(vec![text_row(&[wide.as_str()])], 1);
    let width = PageMetrics::default().text_width;
    assert_eq!(out.unresolved, 0);
    assert!((out.final_widths()[0] - width).abs() < EPS);
}

#[test]
fn test_single_narrow_column_keeps_natural_width() {
    let out = negotiate_rows(vec![text_row(&["short"])], 1);
    assert_eq!(out.unresolved, 0);
    assert_eq!(out.final_widths(), vec![30.0 + 12.0]);
}

#[test]
fn test_equal_wide_columns_share_page() {
    let wide = "x".repeat(120);
    for columns in [2usize, 10] {
        let texts: Vec<&str> = (0..columns).map(|_| wide.as_str()).collect();
        let out = negotiate_rows(vec![text_row(&texts), text_row(&texts)], columns);
        let width = PageMetrics::default().text_width;
        assert_eq!(out.unresolved, 0, "{columns} columns");
        assert_eq!(out.widest_columns, columns as i64);
        for w in out.final_widths() {
            assert!((w - width / columns as f64).abs() < EPS);
        }
        assert!(out.total_width() <= width + EPS);
    }
}

#[test]
fn test_one_wide_column_takes_the_rest() {
    let wide = "x".repeat(100);
    let out = negotiate_rows(vec![text_row(&[wide.as_str(), "ab", "abc"])], 3);
    let width = PageMetrics::default().text_width;
    let widths = out.final_widths();
    assert_eq!(out.unresolved, 0);
    assert_eq!(widths[1], 24.0);
    assert_eq!(widths[2], 30.0);
    assert!((widths[0] - (width - 54.0)).abs() < EPS);
    assert!((out.total_width() - width).abs() < EPS);
}

#[test]
fn test_wide_column_that_fits_keeps_natural_width() {
    let wide = "x".repeat(40);
    let out = negotiate_rows(vec![text_row(&[wide.as_str(), "ab", "abc"])], 3);
    assert_eq!(out.unresolved, 0);
    assert_eq!(out.final_widths(), vec![252.0, 24.0, 30.0]);
}

#[test]
fn test_picture_column_gets_its_width() {
    let mut table = TabMem::new(HEAD, 2);
    let wide = "x".repeat(120);
    let mut row = text_row(&[wide.as_str(), ""]);
    row.cells[1].content = "\\grmkpicture{p.jpg}{3.0}{3.0}{p}".into();
    table.rows.push(row);

    let mut instructions = vec![Instruction::InitTable { columns: 2 }];
    instructions.extend(negotiate(&mut table, 3.0).unwrap());
    let metrics = PageMetrics::default();
    let out = simulate(&instructions, metrics, monospace(6.0));

    let pict = out.column(ColumnId::from_index(1).unwrap()).unwrap();
    assert_eq!(pict.pict_req, 90.0);
    assert_eq!(out.unresolved, 0);
    assert!(out.final_widths().iter().all(|w| *w > 0.0));
    assert!(out.total_width() <= metrics.text_width + EPS);
}

#[test]
fn test_picture_column_stays_within_page() {
    let wide = "x".repeat(200);
    let mut row = text_row(&["x", wide.as_str(), ""]);
    row.cells[2].content = picture_cell(9.0);
    let out = negotiate_with_picture(vec![row], 3, 9.0);

    let width = PageMetrics::default().text_width;
    let share = (width - 18.0) / 2.0;
    let pict = out.column(ColumnId::from_index(2).unwrap()).unwrap();
    assert_eq!(pict.pict_req, 270.0);
    assert_eq!(out.unresolved, 0);

    let widths = out.final_widths();
    assert!((widths[0] - 18.0).abs() < EPS);
    assert!((widths[1] - share).abs() < EPS);
    assert!((widths[2] - share).abs() < EPS);
    assert!(out.total_width() <= width + EPS);
}

#[test]
fn test_narrow_picture_column_keeps_its_request() {
    let wide = "x".repeat(200);
    let mut row = text_row(&[wide.as_str(), "x".repeat(100).as_str(), ""]);
    row.cells[2].content = picture_cell(4.0);
    let out = negotiate_with_picture(vec![row], 3, 4.0);

    let width = PageMetrics::default().text_width;
    let widths = out.final_widths();
    assert_eq!(out.unresolved, 0);
    assert_eq!(widths[2], 132.0);
    assert!((widths[0] - (width - 132.0) / 2.0).abs() < EPS);
    assert!((out.total_width() - width).abs() < EPS);
}

#[test]
fn test_two_by_two_instruction_counts() {
    let mut router = TableRouter::new();
    let mut events = vec![TableEvent::TableBegin { head: HEAD, columns: 2 }];
    for _ in 0..2 {
        events.push(TableEvent::RowBegin);
        for _ in 0..2 {
            events.push(TableEvent::CellBegin { head: "\\multicolumn{1}{|l|}", span: 1 });
            events.push(TableEvent::CellText("cell"));
            events.push(TableEvent::CellEnd);
        }
        events.push(TableEvent::RowEnd { terminator: "\\\\ ", decoration: "\\hline %\n" });
    }
    events.push(TableEvent::TableEnd {
        tail: "%\n\\end{longtable}%\n",
        head_rule: true,
    });
    let out = feed(&mut router, &events);

    assert_eq!(out.matches("\\grinittab").count(), 1);
    assert_eq!(out.matches("\\begin{longtable}").count(), 1);
    assert_eq!(out.matches("\\grcolsfirstfix").count(), 2);
    assert_eq!(out.matches("\\grcolssecondfix").count(), 2);
    assert_eq!(out.matches("\\grcolsthirdfix").count(), 2);
    assert_eq!(out.matches("\\grcolsfourthfix").count(), 2);
    assert_eq!(out.matches("\\grdividelength").count(), 3);
    assert_eq!(out.matches("\\grcolpart").count(), 4);
    assert_eq!(out.matches("\\grtabpgbreak").count(), 4);
    assert!(!router.is_open());
}

proptest! {
    #[test]
    fn prop_negotiation_resolves_all_columns(
        lengths in prop::collection::vec(prop::collection::vec(0usize..150, 1..8), 1..5),
        picture in proptest::option::of(0.5f64..12.0)
    ) {
        let columns = lengths.iter().map(Vec::len).min().unwrap_or(1);
        let texts: Vec<Vec<String>> = lengths
            .iter()
            .map(|row| row.iter().take(columns).map(|n| "x".repeat(*n)).collect())
            .collect();
        let rows: Vec<TabRow> = texts
            .iter()
            .map(|row| {
                let refs: Vec<&str> = row.iter().map(String::as_str).collect();
                let mut row = text_row(&refs);
                if let (Some(w), Some(last)) = (picture, row.cells.last_mut()) {
                    last.content = picture_cell(w);
                }
                row
            })
            .collect();

        let out = negotiate_with_picture(rows, columns, picture.unwrap_or(0.0));
        let width = PageMetrics::default().text_width;
        prop_assert_eq!(out.unresolved, 0);
        prop_assert!(out.final_widths().iter().all(|w| *w > 0.0));
        prop_assert!(out.total_width() <= width + EPS);
    }
}
