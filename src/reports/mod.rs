pub mod assembler;
pub mod types;

#[cfg(test)]
mod props;

use serde::Serialize;

use crate::errors::Result;

pub use assembler::{performance_metrics, ReportAssembler};
pub use types::*;

/// json rendering for report view models
pub trait JsonReport: Serialize {
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl JsonReport for FinancialReport {}
impl JsonReport for PortfolioReport {}
impl JsonReport for RevenueReport {}
impl JsonReport for PerformanceReport {}
impl JsonReport for ReportSet {}
