use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Percentage;
use crate::errors::{EngineError, Result};
use crate::types::InterestMethod;

/// loan categories offered by the institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Personal,
    Excess,
    Business,
    Emergency,
    Micro,
}

impl LoanType {
    pub const ALL: [LoanType; 5] = [
        LoanType::Personal,
        LoanType::Excess,
        LoanType::Business,
        LoanType::Emergency,
        LoanType::Micro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::Personal => "personal",
            LoanType::Excess => "excess",
            LoanType::Business => "business",
            LoanType::Emergency => "emergency",
            LoanType::Micro => "micro",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        LoanType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::UnknownLoanType {
                name: s.to_string(),
            })
    }
}

/// fixed terms for one loan category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTypeConfig {
    pub name: String,
    pub interest_rate: Percentage,
    pub upfront_percentage: Percentage,
    pub interest_method: InterestMethod,
    pub has_default_charges: bool,
    /// suggested default-charge percentage when the draft leaves it blank
    #[serde(default)]
    pub default_charges_percentage: Option<Percentage>,
}

impl LoanTypeConfig {
    fn standard(
        name: &str,
        interest_rate: Decimal,
        upfront_percentage: Decimal,
        interest_method: InterestMethod,
        default_charges: Option<Decimal>,
    ) -> Self {
        Self {
            name: name.to_string(),
            interest_rate: Percentage::from_decimal_unchecked(interest_rate),
            upfront_percentage: Percentage::from_decimal_unchecked(upfront_percentage),
            interest_method,
            has_default_charges: default_charges.is_some(),
            default_charges_percentage: default_charges.map(Percentage::from_decimal_unchecked),
        }
    }

    fn check(&self, loan_type: LoanType) -> Result<()> {
        let mut fields = vec![
            ("interest_rate", self.interest_rate),
            ("upfront_percentage", self.upfront_percentage),
        ];
        if let Some(pct) = self.default_charges_percentage {
            fields.push(("default_charges_percentage", pct));
        }

        for (field, pct) in fields {
            Percentage::new(pct.as_decimal()).map_err(|e| EngineError::InvalidConfiguration {
                message: format!("{loan_type}.{field}: {e}"),
            })?;
        }

        if self.default_charges_percentage.is_some() && !self.has_default_charges {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "{loan_type}: default_charges_percentage set but has_default_charges is false"
                ),
            });
        }

        Ok(())
    }
}

/// loan category lookup, one entry per `LoanType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanTypeTable {
    personal: LoanTypeConfig,
    excess: LoanTypeConfig,
    business: LoanTypeConfig,
    emergency: LoanTypeConfig,
    micro: LoanTypeConfig,
}

impl LoanTypeTable {
    /// institution's standard catalogue
    pub fn standard() -> Self {
        Self {
            personal: LoanTypeConfig::standard(
                "Personal Loan",
                dec!(10),
                dec!(10),
                InterestMethod::Flat,
                None,
            ),
            excess: LoanTypeConfig::standard(
                "Excess Loan",
                dec!(12),
                dec!(10),
                InterestMethod::Flat,
                None,
            ),
            business: LoanTypeConfig::standard(
                "Business Loan",
                dec!(15),
                dec!(5),
                InterestMethod::DecliningBalance,
                None,
            ),
            emergency: LoanTypeConfig::standard(
                "Emergency Loan",
                dec!(5),
                dec!(5),
                InterestMethod::Flat,
                Some(dec!(5)),
            ),
            micro: LoanTypeConfig::standard(
                "Micro Loan",
                dec!(8),
                dec!(5),
                InterestMethod::DecliningBalance,
                Some(dec!(5)),
            ),
        }
    }

    /// load a full table from json, every loan type must be present
    pub fn from_json(json: &str) -> Result<Self> {
        let table: LoanTypeTable =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfiguration {
                message: format!("loan type table: {e}"),
            })?;

        for loan_type in LoanType::ALL {
            table.get(loan_type).check(loan_type)?;
        }

        Ok(table)
    }

    pub fn get(&self, loan_type: LoanType) -> &LoanTypeConfig {
        match loan_type {
            LoanType::Personal => &self.personal,
            LoanType::Excess => &self.excess,
            LoanType::Business => &self.business,
            LoanType::Emergency => &self.emergency,
            LoanType::Micro => &self.micro,
        }
    }

    /// lookup by the loosely-typed name used by forms
    pub fn by_name(&self, name: &str) -> Result<&LoanTypeConfig> {
        Ok(self.get(name.parse()?))
    }
}

impl Default for LoanTypeTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// tunable validation thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub min_purpose_len: usize,
    pub min_term_months: u32,
    pub max_term_months: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_purpose_len: 10,
            min_term_months: 1,
            max_term_months: 600,
        }
    }
}
