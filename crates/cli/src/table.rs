//! Human-readable report tables.

use ledgermatch_recon::model::{AmountMismatch, DisplayRecord, MatchedRow};
use ledgermatch_recon::{DataError, ReconciliationReport};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 12;

/// Pad or cut `s` to exactly `width` display columns. Cut names end in "..".
pub(crate) fn fit(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw <= width {
        return format!("{s}{}", " ".repeat(width - sw));
    }

    let budget = width.saturating_sub(2);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    let dots = ".".repeat(width.min(2));
    format!("{out}{dots}{}", " ".repeat(budget - used))
}

fn amount(value: f64) -> String {
    format!("{value:>AMOUNT_WIDTH$.2}")
}

fn record_cells(r: &DisplayRecord) -> String {
    format!("{:>4}  {} {}", r.id, fit(&r.name, NAME_WIDTH), amount(r.amount))
}

fn print_pairs(title: &str, rows: &[MatchedRow]) {
    println!("{title} ({})", rows.len());
    if rows.is_empty() {
        println!();
        return;
    }
    println!(
        "{:>4}  {} {:>AMOUNT_WIDTH$}   {:>4}  {} {:>AMOUNT_WIDTH$}  {}",
        "A#",
        fit("NAME A", NAME_WIDTH),
        "AMOUNT",
        "B#",
        fit("NAME B", NAME_WIDTH),
        "AMOUNT",
        "EVIDENCE",
    );
    for m in rows {
        let evidence = m.evidence.map(|e| e.to_string()).unwrap_or_else(|| "-".into());
        println!("{}   {}  {evidence}", record_cells(&m.a), record_cells(&m.b));
    }
    println!();
}

fn print_records(title: &str, rows: &[DisplayRecord]) {
    println!("{title} ({})", rows.len());
    if rows.is_empty() {
        println!();
        return;
    }
    println!("{:>4}  {} {:>AMOUNT_WIDTH$}  {}", "#", fit("NAME", NAME_WIDTH), "AMOUNT", "ROW");
    for r in rows {
        println!("{}  {}", record_cells(r), r.row);
    }
    println!();
}

fn print_rejected(rows: &[DataError]) {
    if rows.is_empty() {
        return;
    }
    println!("REJECTED ROWS ({})", rows.len());
    for err in rows {
        println!("  {err}");
    }
    println!();
}

fn print_hints(rows: &[AmountMismatch]) {
    if rows.is_empty() {
        return;
    }
    println!("POSSIBLE AMOUNT MISMATCHES ({})", rows.len());
    for h in rows {
        println!(
            "  A#{} {} {}  vs  B#{} {} {}",
            h.a.id,
            fit(&h.a.name, NAME_WIDTH),
            amount(h.a.amount),
            h.b.id,
            fit(&h.b.name, NAME_WIDTH),
            amount(h.b.amount),
        );
    }
    println!();
}

pub(crate) fn print_report(report: &ReconciliationReport) {
    print_pairs("EXACT MATCHES", &report.exact);
    print_pairs("FUZZY MATCHES", &report.fuzzy);
    print_records("UNMATCHED IN A", &report.unmatched_a);
    print_records("UNMATCHED IN B", &report.unmatched_b);
    print_rejected(&report.rejected);
    print_hints(&report.amount_mismatches);
}

/// One-line summary for stderr.
pub(crate) fn summary_line(report: &ReconciliationReport) -> String {
    let s = &report.summary;
    format!(
        "{} A / {} B records: {} exact, {} fuzzy ({} per-token, {} whole-string), \
         {} unmatched A, {} unmatched B, {} rejected",
        s.records_a,
        s.records_b,
        s.exact_pairs,
        s.fuzzy_pairs,
        s.fuzzy_per_token,
        s.fuzzy_whole_string,
        s.unmatched_a,
        s.unmatched_b,
        s.rejected_rows,
    )
}
