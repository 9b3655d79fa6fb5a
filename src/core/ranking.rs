//! Ranks selected funds by 1-year return and projects them for display.

use crate::core::record::{FundRecord, FundTable};
use crate::core::selection::select;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Stable sort by 1-year return, highest first.
///
/// Funds without a return rank below everything else; ties keep dataset order.
pub fn rank<'a>(records: &[&'a FundRecord]) -> Vec<&'a FundRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| compare_returns(b.return_1yr, a.return_1yr));

    for record in ranked.iter().filter(|r| r.return_1yr.is_none()) {
        debug!(
            row = record.row + 1,
            name = %record.name,
            "Ranking fund without a 1-year return last"
        );
    }
    ranked
}

fn compare_returns(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// The first `n` of an already ranked sequence.
pub fn top<'a, 'r>(records: &'r [&'a FundRecord], n: usize) -> &'r [&'a FundRecord] {
    &records[..n.min(records.len())]
}

/// One bar of the returns chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub return_1yr: Option<f64>,
}

/// Summary of the numeric returns in a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStats {
    pub count: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
}

/// The ranked funds for one category/AMC pair.
///
/// Chart and table projections both read the same ranked order.
#[derive(Debug, Clone)]
pub struct RankedView {
    table: Arc<FundTable>,
    category: String,
    amc_name: String,
    order: Vec<usize>,
}

impl RankedView {
    pub fn new(table: Arc<FundTable>, category: &str, amc_name: &str) -> Self {
        let selected = select(&table, category, amc_name);
        let order = rank(&selected).iter().map(|r| r.row).collect::<Vec<_>>();
        debug!("Ranked {} funds for {category} / {amc_name}", order.len());
        RankedView {
            table,
            category: category.to_string(),
            amc_name: amc_name.to_string(),
            order,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amc_name(&self) -> &str {
        &self.amc_name
    }

    pub fn table(&self) -> &FundTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Full records in ranked order.
    pub fn rows(&self) -> Vec<&FundRecord> {
        let records = self.table.records();
        self.order.iter().map(|&idx| &records[idx]).collect()
    }

    /// `(label, return)` pairs for the top `limit` funds, or all of them.
    pub fn chart(&self, limit: Option<usize>) -> Vec<ChartPoint> {
        let rows = self.rows();
        let shown = top(&rows, limit.unwrap_or(rows.len()));
        shown
            .iter()
            .map(|r| ChartPoint {
                label: r.label(),
                return_1yr: r.return_1yr,
            })
            .collect()
    }

    /// Best, worst and mean return, ignoring funds without one.
    pub fn stats(&self) -> Option<ReturnStats> {
        let returns: Vec<f64> = self.rows().iter().filter_map(|r| r.return_1yr).collect();
        if returns.is_empty() {
            return None;
        }
        let best = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = returns.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        Some(ReturnStats {
            count: returns.len(),
            best,
            worst,
            mean,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::{LoadOptions, load_from_reader};

    const FUNDS: &str = "\
MutualFundName,category,AMC_name,return_1yr
Alpha Bluechip,Equity,Alpha,5.2
Alpha Midcap,Equity,Alpha,12.7
Beta Flexi,Equity,Beta,9.1
Alpha Smallcap,Equity,Alpha,12.7
Alpha Contra,Equity,Alpha,
Alpha Value,Equity,Alpha,-2.5
Gamma Liquid,Debt,Gamma,6.4
";

    fn table() -> Arc<FundTable> {
        Arc::new(load_from_reader(FUNDS.as_bytes(), &LoadOptions::default()).unwrap())
    }

    fn names(records: &[&FundRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test_log::test]
    fn test_rank_descending_with_stable_ties_and_missing_last() {
        let table = table();
        let selected = select(&table, "Equity", "Alpha");
        let ranked = rank(&selected);

        assert_eq!(
            names(&ranked),
            vec![
                "Alpha Midcap",
                "Alpha Smallcap",
                "Alpha Bluechip",
                "Alpha Value",
                "Alpha Contra"
            ]
        );
    }

    #[test]
    fn test_rank_tie_scenario() {
        let data = "\
MutualFundName,category,AMC_name,return_1yr
first,Equity,Alpha,5.2
second,Equity,Alpha,12.7
third,Equity,Alpha,12.7
";
        let table = load_from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();
        let ranked = rank(&select(&table, "Equity", "Alpha"));

        let returns: Vec<_> = ranked.iter().map(|r| r.return_1yr).collect();
        assert_eq!(returns, vec![Some(12.7), Some(12.7), Some(5.2)]);
        assert_eq!(names(&ranked), vec!["second", "third", "first"]);
    }

    #[test]
    fn test_rank_missing_below_negative_infinity() {
        let data = "\
MutualFundName,category,AMC_name,return_1yr
blank,Equity,Alpha,
floor,Equity,Alpha,-inf
n/a,Equity,Alpha,N/A
";
        let table = load_from_reader(data.as_bytes(), &LoadOptions::default()).unwrap();
        let ranked = rank(&select(&table, "Equity", "Alpha"));

        assert_eq!(names(&ranked), vec!["floor", "blank", "n/a"]);
        assert_eq!(ranked[0].return_1yr, Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_rank_is_idempotent() {
        let table = table();
        let all: Vec<&FundRecord> = table.records().iter().collect();
        let once = rank(&all);
        let twice = rank(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_top_edge_cases() {
        let table = table();
        let all: Vec<&FundRecord> = table.records().iter().collect();
        let ranked = rank(&all);

        assert_eq!(top(&ranked, ranked.len() + 5), ranked.as_slice());
        assert_eq!(top(&ranked, ranked.len()), ranked.as_slice());
        assert!(top(&ranked, 0).is_empty());
        assert_eq!(top(&ranked, 2), &ranked[..2]);

        let empty: Vec<&FundRecord> = Vec::new();
        assert!(top(&empty, 5).is_empty());
    }

    #[test]
    fn test_view_chart_and_rows_share_order() {
        let view = RankedView::new(table(), "Equity", "Alpha");

        let chart = view.chart(None);
        let rows = view.rows();
        assert_eq!(chart.len(), rows.len());
        for (point, row) in chart.iter().zip(&rows) {
            assert_eq!(point.label, row.name);
            assert_eq!(point.return_1yr, row.return_1yr);
        }

        let top_two = view.chart(Some(2));
        assert_eq!(top_two, chart[..2].to_vec());
    }

    #[test]
    fn test_view_empty_selection() {
        let view = RankedView::new(table(), "Debt", "Alpha");

        assert!(view.is_empty());
        assert!(view.chart(Some(5)).is_empty());
        assert!(view.stats().is_none());
    }

    #[test]
    fn test_view_stats_ignore_missing_returns() {
        let view = RankedView::new(table(), "Equity", "Alpha");
        let stats = view.stats().unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.best, 12.7);
        assert_eq!(stats.worst, -2.5);
        assert!((stats.mean - 7.025).abs() < 1e-9);
    }
}
