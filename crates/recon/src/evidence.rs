use crate::model::{FuzzyEvidence, MatchedRow, ReconciliationReport, ReportSummary};

/// Compute summary statistics from an assembled report.
pub fn compute_summary(report: &ReconciliationReport) -> ReportSummary {
    let (fuzzy_per_token, fuzzy_whole_string) =
        report
            .fuzzy
            .iter()
            .fold((0, 0), |(per_token, whole), m: &MatchedRow| match m.evidence {
                Some(FuzzyEvidence::PerToken { .. }) => (per_token + 1, whole),
                Some(FuzzyEvidence::WholeString { .. }) => (per_token, whole + 1),
                None => (per_token, whole),
            });

    let matched = report.exact.len() + report.fuzzy.len();

    ReportSummary {
        records_a: matched + report.unmatched_a.len(),
        records_b: matched + report.unmatched_b.len(),
        exact_pairs: report.exact.len(),
        fuzzy_pairs: report.fuzzy.len(),
        fuzzy_per_token,
        fuzzy_whole_string,
        unmatched_a: report.unmatched_a.len(),
        unmatched_b: report.unmatched_b.len(),
        rejected_rows: report.rejected.len(),
        amount_mismatches: report.amount_mismatches.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DataError, DataErrorKind, Side};
    use crate::model::{DisplayRecord, MatchLayer, ReportMeta};

    fn rec(id: usize) -> DisplayRecord {
        DisplayRecord {
            id,
            row: id,
            name: "x".into(),
            raw_name: "x".into(),
            amount: 1.0,
            identifiers: None,
        }
    }

    fn pair(layer: MatchLayer, evidence: Option<FuzzyEvidence>, id: usize) -> MatchedRow {
        MatchedRow {
            layer,
            evidence,
            a: rec(id),
            b: rec(id),
        }
    }

    #[test]
    fn summary_counts() {
        let mut report = ReconciliationReport {
            meta: ReportMeta {
                config_name: None,
                engine_version: "test".into(),
                layout: None,
            },
            summary: ReportSummary {
                records_a: 0,
                records_b: 0,
                exact_pairs: 0,
                fuzzy_pairs: 0,
                fuzzy_per_token: 0,
                fuzzy_whole_string: 0,
                unmatched_a: 0,
                unmatched_b: 0,
                rejected_rows: 0,
                amount_mismatches: 0,
            },
            exact: vec![pair(MatchLayer::Exact, None, 0), pair(MatchLayer::Exact, None, 1)],
            fuzzy: vec![
                pair(MatchLayer::Fuzzy, Some(FuzzyEvidence::PerToken { score: 90 }), 2),
                pair(MatchLayer::Fuzzy, Some(FuzzyEvidence::WholeString { score: 81 }), 3),
                pair(MatchLayer::Fuzzy, Some(FuzzyEvidence::WholeString { score: 84 }), 4),
            ],
            unmatched_a: vec![rec(5)],
            unmatched_b: vec![],
            rejected: vec![DataError {
                side: Side::B,
                row: 9,
                value: "?".into(),
                kind: DataErrorKind::NonNumericAmount,
            }],
            amount_mismatches: vec![],
        };
        report.summary = compute_summary(&report);

        let s = &report.summary;
        assert_eq!(s.records_a, 6);
        assert_eq!(s.records_b, 5);
        assert_eq!(s.exact_pairs, 2);
        assert_eq!(s.fuzzy_pairs, 3);
        assert_eq!(s.fuzzy_per_token, 1);
        assert_eq!(s.fuzzy_whole_string, 2);
        assert_eq!(s.unmatched_a, 1);
        assert_eq!(s.unmatched_b, 0);
        assert_eq!(s.rejected_rows, 1);
        assert!(!s.is_reconciled());
    }
}
