use crate::config::{ExactConfig, FuzzyConfig, MatchConfig};
use crate::error::{ReconError, Side};
use crate::evidence::compute_summary;
use crate::hints::find_amount_mismatches;
use crate::matcher::{first_candidate, fuzzy_match, strict_match};
use crate::model::{
    FuzzyEvidence, LedgerInput, MatchLayer, MatchPair, MatchedRow, ReconciliationReport, Record,
    ReportMeta, ReportSummary,
};
use crate::pool::LedgerPool;

/// Two-layer greedy reconciliation of ledger A against ledger B.
///
/// Both layers are driven from B in original order; for each B record the
/// first acceptable A candidate of equal amount (in A's original order) is
/// taken and both are consumed. The result is not a globally optimal
/// assignment: reordering either ledger may change which records pair up.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: MatchConfig,
}

impl ReconciliationEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn run(&self, input: &LedgerInput) -> Result<ReconciliationReport, ReconError> {
        let (mut pool_a, mut rejected) = LedgerPool::from_rows(Side::A, &input.a);
        let (mut pool_b, rejected_b) = LedgerPool::from_rows(Side::B, &input.b);
        rejected.extend(rejected_b);

        log::debug!(
            "reconciling {} A record(s) against {} B record(s), {} row(s) rejected",
            pool_a.len(),
            pool_b.len(),
            rejected.len()
        );

        let exact = run_exact_layer(&mut pool_a, &mut pool_b, &self.config.exact)?;
        let fuzzy = run_fuzzy_layer(&mut pool_a, &mut pool_b, &self.config.fuzzy)?;

        let leftover_a: Vec<&Record> = pool_a.unconsumed().collect();
        let leftover_b: Vec<&Record> = pool_b.unconsumed().collect();

        let amount_mismatches = if self.config.report.amount_mismatch_hints {
            find_amount_mismatches(&leftover_a, &leftover_b)
        } else {
            Vec::new()
        };

        let mut report = ReconciliationReport {
            meta: ReportMeta {
                config_name: self.config.name.clone(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                layout: input.layout,
            },
            summary: empty_summary(),
            exact: to_rows(&exact, &pool_a, &pool_b),
            fuzzy: to_rows(&fuzzy, &pool_a, &pool_b),
            unmatched_a: leftover_a.iter().map(|r| r.display()).collect(),
            unmatched_b: leftover_b.iter().map(|r| r.display()).collect(),
            rejected,
            amount_mismatches,
        };
        report.summary = compute_summary(&report);

        Ok(report)
    }
}

/// Run reconciliation with `config`. Convenience over `ReconciliationEngine`.
pub fn run(config: &MatchConfig, input: &LedgerInput) -> Result<ReconciliationReport, ReconError> {
    ReconciliationEngine::new(config.clone()).run(input)
}

/// Layer 1: exact token containment (`strict_match`).
pub fn run_exact_layer(
    pool_a: &mut LedgerPool,
    pool_b: &mut LedgerPool,
    config: &ExactConfig,
) -> Result<Vec<MatchPair>, ReconError> {
    run_layer(pool_a, pool_b, MatchLayer::Exact, |a, b| {
        strict_match(&a.tokens, &b.tokens, config).then_some(None)
    })
}

/// Layer 2: fuzzy similarity (`fuzzy_match`) over whatever Layer 1 left.
pub fn run_fuzzy_layer(
    pool_a: &mut LedgerPool,
    pool_b: &mut LedgerPool,
    config: &FuzzyConfig,
) -> Result<Vec<MatchPair>, ReconError> {
    run_layer(pool_a, pool_b, MatchLayer::Fuzzy, |a, b| {
        fuzzy_match(&a.tokens, &b.tokens, config).map(Some)
    })
}

/// Drive one layer from B. `accept(a, b)` returns `Some(evidence)` when the
/// pair is acceptable.
fn run_layer<F>(
    pool_a: &mut LedgerPool,
    pool_b: &mut LedgerPool,
    layer: MatchLayer,
    mut accept: F,
) -> Result<Vec<MatchPair>, ReconError>
where
    F: FnMut(&Record, &Record) -> Option<Option<FuzzyEvidence>>,
{
    let pending: Vec<usize> = pool_b.unconsumed().map(|r| r.id).collect();
    let mut pairs = Vec::new();

    for b_id in pending {
        let b = &pool_b.records()[b_id];
        let hit = first_candidate(pool_a.candidates(b.amount), |a| accept(a, b));

        if let Some((a_id, evidence)) = hit {
            pool_a.consume(a_id, layer.state())?;
            pool_b.consume(b_id, layer.state())?;
            log::trace!("{layer:?} pair: A#{a_id} <-> B#{b_id} {evidence:?}");
            pairs.push(MatchPair {
                a: a_id,
                b: b_id,
                layer,
                evidence,
            });
        }
    }

    log::debug!("{layer:?} layer matched {} pair(s)", pairs.len());
    Ok(pairs)
}

fn to_rows(pairs: &[MatchPair], pool_a: &LedgerPool, pool_b: &LedgerPool) -> Vec<MatchedRow> {
    pairs
        .iter()
        .map(|p| MatchedRow {
            layer: p.layer,
            evidence: p.evidence,
            a: pool_a.records()[p.a].display(),
            b: pool_b.records()[p.b].display(),
        })
        .collect()
}

fn empty_summary() -> ReportSummary {
    ReportSummary {
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
    }
}
