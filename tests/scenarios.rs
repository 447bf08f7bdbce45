use microfinance_rs::{
    partition, refresh, compute_summary, combine, recalc_principal, recalc_upfront,
    ClientDuesAccount, Currency, CurrencyPortfolio, DuesLedger, DuesState, DuesStatus,
    EventStore, Field, FinancialRecord, LoanDraft, LoanTermsCalculator, LoanType, Money,
    PortfolioSnapshot, RecordType, ReportAssembler, Snapshot, ValidationError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn scenario_a_upfront_fee_and_principal() {
    let upfront = recalc_upfront(Some(dec!(1000)), Some(dec!(10)));
    assert_eq!(upfront, Money::from_major(100));
    assert_eq!(recalc_principal(Money::from_major(1000), upfront), Money::from_major(900));

    let calculator = LoanTermsCalculator::default();
    let mut events = EventStore::new();
    let draft = LoanDraft::new(LoanType::Personal, Currency::USD)
        .with_amount(dec!(1000))
        .with_term(12)
        .with_purpose("working capital for tailoring")
        .with_upfront_percentage(dec!(10));

    let loan = calculator.calculate(&draft, &mut events).unwrap();
    assert_eq!(loan.upfront_amount, Money::from_major(100));
    assert_eq!(loan.principal, Money::from_major(900));
}

#[test]
fn scenario_b_twelve_monthly_dues_payments() {
    let mut ledger = DuesLedger::new();
    let fresh = ClientDuesAccount::new(Uuid::new_v4(), Currency::USD);
    let mut account = ledger.set_yearly_dues(&fresh, Money::from_major(1200), Currency::USD);

    for _ in 0..12 {
        assert_eq!(account.monthly_dues(), Money::from_major(100));
        assert_eq!(account.status(), DuesStatus::Outstanding);
        account = ledger.apply_payment(&account, Money::from_major(100)).unwrap();
    }

    assert_eq!(account.total_dues, Money::ZERO);
    assert_eq!(account.status(), DuesStatus::Paid);
    assert_eq!(account.state, DuesState::Paid);
    assert_eq!(account.monthly_dues(), Money::from_major(100));
    assert_eq!(ledger.payments().len(), 12);
}

#[test]
fn scenario_c_savings_per_currency() {
    let records = vec![
        FinancialRecord::new(RecordType::SavingsBalance, Money::from_major(500), Currency::USD),
        FinancialRecord::new(RecordType::SavingsBalance, Money::from_major(300), Currency::LRD),
    ];

    let buckets = partition(&records, &[]);
    let usd = compute_summary(&buckets.usd);
    let lrd = compute_summary(&buckets.lrd);

    assert_eq!(usd.total_savings, Money::from_major(500));
    assert_eq!(lrd.total_savings, Money::from_major(300));
    assert_eq!(combine(&usd, &lrd).total_savings, Money::from_major(800));

    let summaries = refresh(&Snapshot::new(records, Vec::new()));
    assert_eq!(summaries.combined.total_savings, Money::from_major(800));
}

#[test]
fn scenario_d_empty_portfolio_ratios() {
    let portfolio = PortfolioSnapshot {
        usd: CurrencyPortfolio::default(),
        lrd: CurrencyPortfolio::default(),
        ..PortfolioSnapshot::default()
    };

    let report = ReportAssembler::performance(&portfolio);
    for metrics in [&report.usd, &report.lrd, &report.combined] {
        assert_eq!(metrics.portfolio_at_risk, Decimal::ZERO);
        assert_eq!(metrics.default_rate, Decimal::ZERO);
        assert_eq!(metrics.collection_efficiency, Decimal::ZERO);
        assert_eq!(metrics.average_loan_size, Money::ZERO);
    }
}

#[test]
fn scenario_e_payment_of_exact_balance() {
    let mut ledger = DuesLedger::new();
    let fresh = ClientDuesAccount::new(Uuid::new_v4(), Currency::LRD);
    let account = ledger.set_yearly_dues(&fresh, Money::from_major(750), Currency::LRD);

    let err = ledger
        .apply_payment(&account, Money::from_major(751))
        .unwrap_err();
    assert!(matches!(
        err.validation().and_then(|e| e.for_field(Field::PaymentAmount)),
        Some(ValidationError::DuesPaymentExceedsBalance { .. })
    ));
    // the rejected payment left nothing behind
    assert!(ledger.payments().is_empty());

    let settled = ledger.apply_payment(&account, Money::from_major(750)).unwrap();
    assert_eq!(settled.total_dues, Money::ZERO);
    assert_eq!(settled.status(), DuesStatus::Paid);
}

#[test]
fn dues_payments_feed_paid_client_count() {
    let mut ledger = DuesLedger::new();
    let fresh = ClientDuesAccount::new(Uuid::new_v4(), Currency::USD);
    let owing = ClientDuesAccount::new(Uuid::new_v4(), Currency::USD);

    let account = ledger.set_yearly_dues(&fresh, Money::from_major(120), Currency::USD);
    let paid = ledger.apply_payment(&account, Money::from_major(120)).unwrap();
    let owing = ledger.set_yearly_dues(&owing, Money::from_major(60), Currency::USD);

    let snapshot = Snapshot::new(ledger.payment_records(), vec![paid, owing]);
    let summaries = refresh(&snapshot);

    assert_eq!(summaries.usd.clients_paid_dues, 1);
    assert_eq!(summaries.usd.clients_with_outstanding_dues, 1);
    assert_eq!(summaries.usd.outstanding_dues, Money::from_major(60));
    assert_eq!(summaries.usd.monthly_dues, Money::from_major(5));
    assert_eq!(summaries.usd.grand_total, Money::from_major(-60));
}
