//! Property-based tests for currency aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{combine, compute_summary, partition};
use crate::decimal::Money;
use crate::dues::ClientDuesAccount;
use crate::records::FinancialRecord;
use crate::types::{Currency, RecordType};

/// Strategy for non-negative amounts with cent precision (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Money> {
    (0i64..100_000_000i64).prop_map(|cents| Money::from_decimal(Decimal::new(cents, 2)))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::USD), Just(Currency::LRD)]
}

fn record_type() -> impl Strategy<Value = RecordType> {
    prop_oneof![
        Just(RecordType::SavingsBalance),
        Just(RecordType::PersonalInterestPayment),
        Just(RecordType::GeneralInterest),
        Just(RecordType::DuePayment),
        Just(RecordType::LoanPrincipal),
        Just(RecordType::LoanOutstanding),
        Just(RecordType::Penalty),
        Just(RecordType::Fee),
    ]
}

fn record() -> impl Strategy<Value = FinancialRecord> {
    (record_type(), amount(), currency())
        .prop_map(|(record_type, amount, currency)| FinancialRecord::new(record_type, amount, currency))
}

fn client() -> impl Strategy<Value = ClientDuesAccount> {
    (amount(), currency()).prop_map(|(owed, currency)| {
        let mut account = ClientDuesAccount::new(Uuid::new_v4(), currency);
        account.total_dues = Money::ZERO - owed;
        account.assigned_yearly = owed;
        account
    })
}

fn sum_of(records: &[FinancialRecord], record_type: RecordType) -> Money {
    records
        .iter()
        .filter(|r| r.record_type == record_type)
        .map(|r| r.amount)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every record and client lands in exactly one bucket, in its own currency.
    #[test]
    fn prop_partition_is_total_and_disjoint(
        records in prop::collection::vec(record(), 0..40),
        clients in prop::collection::vec(client(), 0..20),
    ) {
        let buckets = partition(&records, &clients);

        prop_assert_eq!(buckets.usd.records.len() + buckets.lrd.records.len(), records.len());
        prop_assert_eq!(buckets.usd.clients.len() + buckets.lrd.clients.len(), clients.len());
        prop_assert!(buckets.usd.records.iter().all(|r| r.currency == Currency::USD));
        prop_assert!(buckets.lrd.records.iter().all(|r| r.currency == Currency::LRD));
        prop_assert!(buckets.usd.clients.iter().all(|c| c.currency == Currency::USD));
        prop_assert!(buckets.lrd.clients.iter().all(|c| c.currency == Currency::LRD));
    }

    /// Combined additive fields equal the unpartitioned sums.
    #[test]
    fn prop_combine_matches_unpartitioned_sum(
        records in prop::collection::vec(record(), 0..40),
        clients in prop::collection::vec(client(), 0..20),
    ) {
        let buckets = partition(&records, &clients);
        let combined = combine(&compute_summary(&buckets.usd), &compute_summary(&buckets.lrd));

        prop_assert_eq!(combined.total_savings, sum_of(&records, RecordType::SavingsBalance));
        prop_assert_eq!(
            combined.total_personal_interest,
            sum_of(&records, RecordType::PersonalInterestPayment)
        );
        prop_assert_eq!(combined.total_general_interest, sum_of(&records, RecordType::GeneralInterest));
        prop_assert_eq!(combined.total_loans, sum_of(&records, RecordType::LoanPrincipal));
        prop_assert_eq!(combined.outstanding_loans, sum_of(&records, RecordType::LoanOutstanding));
        prop_assert_eq!(
            combined.total_fines,
            sum_of(&records, RecordType::Penalty) + sum_of(&records, RecordType::Fee)
        );

        let owed: Money = clients
            .iter()
            .filter(|c| c.total_dues.is_negative())
            .map(|c| c.total_dues.abs())
            .sum();
        prop_assert_eq!(combined.outstanding_dues, owed);
        prop_assert_eq!(
            combined.clients_with_outstanding_dues,
            clients.iter().filter(|c| c.total_dues.is_negative()).count() as u64
        );
    }

    /// Summaries of an unchanged bucket are identical.
    #[test]
    fn prop_summary_is_idempotent(
        records in prop::collection::vec(record(), 0..40),
        clients in prop::collection::vec(client(), 0..20),
    ) {
        let buckets = partition(&records, &clients);
        prop_assert_eq!(compute_summary(&buckets.usd), compute_summary(&buckets.usd));
        prop_assert_eq!(compute_summary(&buckets.lrd), compute_summary(&buckets.lrd));
    }

    /// Derived totals follow their definitions in every bucket.
    #[test]
    fn prop_derived_totals(
        records in prop::collection::vec(record(), 0..40),
        clients in prop::collection::vec(client(), 0..20),
    ) {
        let buckets = partition(&records, &clients);
        for bucket in [&buckets.usd, &buckets.lrd] {
            let s = compute_summary(bucket);
            prop_assert_eq!(
                s.grand_total,
                s.total_savings + s.total_personal_interest + s.total_general_interest
                    - s.outstanding_dues
            );
            prop_assert_eq!(s.overall_total_savings, s.grand_total - s.outstanding_loans);
            prop_assert_eq!(s.monthly_dues, s.outstanding_dues / Decimal::from(12));
        }
    }
}
