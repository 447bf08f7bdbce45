use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::aggregation::{refresh, Snapshot, SummarySet};
use crate::config::LoanType;
use crate::decimal::{ratio_percent, Money};
use crate::records::FinancialRecord;
use crate::types::Currency;

use super::types::{
    CurrencyPortfolio, FinancialReport, LoanTypeCount, PerformanceMetrics, PerformanceReport,
    PortfolioFigures, PortfolioReport, PortfolioSnapshot, ReportSet, RevenueBreakdown,
    RevenueLine, RevenueReport, RevenueSource,
};

/// ratios for one set of counters, every zero divisor yields zero
pub fn performance_metrics(portfolio: &CurrencyPortfolio) -> PerformanceMetrics {
    let active = Decimal::from(portfolio.active_loans);
    let overdue = Decimal::from(portfolio.overdue_loans);
    let portfolio_at_risk = ratio_percent(overdue, active);

    PerformanceMetrics {
        portfolio_at_risk,
        default_rate: portfolio_at_risk,
        collection_efficiency: ratio_percent(
            portfolio.total_collections.as_decimal(),
            portfolio.portfolio_value.as_decimal(),
        ),
        average_loan_size: portfolio.portfolio_value.checked_div_count(portfolio.active_loans),
    }
}

/// builds report view models
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn financial(summaries: &SummarySet) -> FinancialReport {
        FinancialReport {
            usd: summaries.usd.clone(),
            lrd: summaries.lrd.clone(),
            combined: summaries.combined.clone(),
        }
    }

    pub fn portfolio(summaries: &SummarySet, portfolio: &PortfolioSnapshot) -> PortfolioReport {
        let mut counts: BTreeMap<LoanType, LoanTypeCount> = LoanType::ALL
            .into_iter()
            .map(|loan_type| {
                (
                    loan_type,
                    LoanTypeCount {
                        loan_type,
                        usd: 0,
                        lrd: 0,
                        total: 0,
                    },
                )
            })
            .collect();

        for entry in &portfolio.loan_distribution {
            if let Some(count) = counts.get_mut(&entry.loan_type) {
                match entry.currency {
                    Currency::USD => count.usd += entry.count,
                    Currency::LRD => count.lrd += entry.count,
                }
                count.total += entry.count;
            }
        }

        let figures = |currency: Currency| {
            let counters = portfolio.get(currency);
            let summary = summaries.get(currency);
            PortfolioFigures {
                currency,
                portfolio_value: counters.portfolio_value,
                outstanding_loans: summary.outstanding_loans,
                total_loans: summary.total_loans,
                total_collections: counters.total_collections,
            }
        };

        PortfolioReport {
            total_clients: portfolio.total_clients,
            active_loans: portfolio.usd.active_loans + portfolio.lrd.active_loans,
            overdue_loans: portfolio.usd.overdue_loans + portfolio.lrd.overdue_loans,
            distribution: counts.into_values().collect(),
            usd: figures(Currency::USD),
            lrd: figures(Currency::LRD),
        }
    }

    pub fn revenue(records: &[FinancialRecord]) -> RevenueReport {
        RevenueReport {
            usd: Self::revenue_breakdown(records, Currency::USD),
            lrd: Self::revenue_breakdown(records, Currency::LRD),
        }
    }

    fn revenue_breakdown(records: &[FinancialRecord], currency: Currency) -> RevenueBreakdown {
        let mut by_source: BTreeMap<String, RevenueSource> = BTreeMap::new();
        let mut details = Vec::new();

        for record in records.iter().filter(|r| r.currency == currency) {
            let Some(source) = record.revenue_source() else {
                continue;
            };

            let entry = by_source
                .entry(source.clone())
                .or_insert_with(|| RevenueSource {
                    source: source.clone(),
                    amount: Money::ZERO,
                    count: 0,
                });
            entry.amount += record.amount;
            entry.count += 1;

            details.push(RevenueLine {
                source,
                record_type: record.record_type,
                amount: record.amount,
                client_id: record.client_id,
                recorded_on: record.recorded_on,
            });
        }

        let total = by_source.values().map(|s| s.amount).sum();

        RevenueBreakdown {
            currency,
            total,
            by_source: by_source.into_values().collect(),
            details,
        }
    }

    pub fn performance(portfolio: &PortfolioSnapshot) -> PerformanceReport {
        let combined = portfolio.usd.combined(&portfolio.lrd);

        PerformanceReport {
            usd: performance_metrics(&portfolio.usd),
            lrd: performance_metrics(&portfolio.lrd),
            combined: performance_metrics(&combined),
            active_loans: combined.active_loans,
            overdue_loans: combined.overdue_loans,
        }
    }

    /// recompute summaries from `snapshot` and build every report
    pub fn assemble(snapshot: &Snapshot, portfolio: &PortfolioSnapshot) -> ReportSet {
        let summaries = refresh(snapshot);

        let reports = ReportSet {
            financial: Self::financial(&summaries),
            portfolio: Self::portfolio(&summaries, portfolio),
            revenue: Self::revenue(&snapshot.records),
            performance: Self::performance(portfolio),
        };

        debug!(
            par = %reports.performance.combined.portfolio_at_risk,
            usd_revenue = %reports.revenue.usd.total,
            lrd_revenue = %reports.revenue.lrd.total,
            "reports assembled"
        );

        reports
    }
}
