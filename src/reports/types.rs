use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::CurrencySummary;
use crate::config::LoanType;
use crate::decimal::Money;
use crate::types::{ClientId, Currency, RecordType};

/// loan book counters for one currency, supplied by the loan service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPortfolio {
    pub active_loans: u64,
    pub overdue_loans: u64,
    pub portfolio_value: Money,
    pub total_collections: Money,
}

impl CurrencyPortfolio {
    /// counter-wise sum, mixes currencies numerically
    pub fn combined(&self, other: &CurrencyPortfolio) -> CurrencyPortfolio {
        CurrencyPortfolio {
            active_loans: self.active_loans + other.active_loans,
            overdue_loans: self.overdue_loans + other.overdue_loans,
            portfolio_value: self.portfolio_value + other.portfolio_value,
            total_collections: self.total_collections + other.total_collections,
        }
    }
}

/// number of loans of one type in one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDistribution {
    pub loan_type: LoanType,
    pub currency: Currency,
    pub count: u64,
}

/// externally supplied loan and client counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub usd: CurrencyPortfolio,
    pub lrd: CurrencyPortfolio,
    pub total_clients: u64,
    pub loan_distribution: Vec<LoanDistribution>,
}

impl PortfolioSnapshot {
    pub fn get(&self, currency: Currency) -> &CurrencyPortfolio {
        match currency {
            Currency::USD => &self.usd,
            Currency::LRD => &self.lrd,
        }
    }
}

/// per-currency summaries side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub usd: CurrencySummary,
    pub lrd: CurrencySummary,
    /// display-only sum of both currencies
    pub combined: CurrencySummary,
}

/// portfolio money figures for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioFigures {
    pub currency: Currency,
    pub portfolio_value: Money,
    pub outstanding_loans: Money,
    pub total_loans: Money,
    pub total_collections: Money,
}

/// loans per type across both currencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTypeCount {
    pub loan_type: LoanType,
    pub usd: u64,
    pub lrd: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub total_clients: u64,
    pub active_loans: u64,
    pub overdue_loans: u64,
    pub distribution: Vec<LoanTypeCount>,
    pub usd: PortfolioFigures,
    pub lrd: PortfolioFigures,
}

/// revenue from one source tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSource {
    pub source: String,
    pub amount: Money,
    pub count: u64,
}

/// one revenue-bearing record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLine {
    pub source: String,
    pub record_type: RecordType,
    pub amount: Money,
    pub client_id: Option<ClientId>,
    pub recorded_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub currency: Currency,
    pub total: Money,
    /// sorted by source tag
    pub by_source: Vec<RevenueSource>,
    pub details: Vec<RevenueLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub usd: RevenueBreakdown,
    pub lrd: RevenueBreakdown,
}

/// ratios for one set of portfolio counters, all percentages except the loan size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub portfolio_at_risk: Decimal,
    /// same formula as `portfolio_at_risk`
    pub default_rate: Decimal,
    pub collection_efficiency: Decimal,
    pub average_loan_size: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub usd: PerformanceMetrics,
    pub lrd: PerformanceMetrics,
    pub combined: PerformanceMetrics,
    pub active_loans: u64,
    pub overdue_loans: u64,
}

/// all four reports from one refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSet {
    pub financial: FinancialReport,
    pub portfolio: PortfolioReport,
    pub revenue: RevenueReport,
    pub performance: PerformanceReport,
}
