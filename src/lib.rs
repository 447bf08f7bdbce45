pub mod aggregation;
pub mod config;
pub mod decimal;
pub mod dues;
pub mod errors;
pub mod events;
pub mod loan;
pub mod records;
pub mod reports;
pub mod types;

// re-export key types
pub use aggregation::{
    combine, compute_summary, partition, refresh, CurrencyBucket, CurrencySummary, Partitioned,
    RefreshSequencer, RefreshToken, Snapshot, SummarySet,
};
pub use config::{LoanType, LoanTypeConfig, LoanTypeTable, ValidationRules};
pub use decimal::{ratio_percent, Money, Percentage};
pub use dues::{monthly_dues, status, ClientDuesAccount, DuesLedger, DuesPayment};
pub use errors::{EngineError, Field, FieldError, Result, ValidationError, ValidationErrors};
pub use events::{Event, EventStore};
pub use loan::{
    apply_loan_type, parse_input, recalc_default_charges, recalc_principal, recalc_upfront,
    LoanApplication, LoanDraft, LoanTermsCalculator, RepaymentSchedule,
};
pub use records::{FinancialRecord, RawRecord};
pub use reports::{
    performance_metrics, CurrencyPortfolio, FinancialReport, JsonReport, PerformanceMetrics,
    PerformanceReport, PortfolioReport, PortfolioSnapshot, ReportAssembler, ReportSet,
    RevenueReport,
};
pub use types::{ClientId, Currency, DuesState, DuesStatus, InterestMethod, RecordType};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
