//! Failure-policy behaviour for entities that support only some audit
//! fields.

use std::sync::Arc;

use crate::in_memory::helpers::{acting_as, breakfast};
use crate::test_helpers::{SteppedClock, instant, order_service};
use chrono::{DateTime, Utc};
use ordering::audit::{
    domain::{ActorId, AuditField, AuditFieldError, AuditFieldResult, OperationType},
    ports::Auditable,
    services::{AutoFill, AutoFillConfig, AutoFillError, FillOutcome},
};
use rstest::rstest;

const RECEIPT_INSERT: &str = "repository.receipt.insert";

/// Entity carrying timestamps but no actor columns.
#[derive(Debug, Default)]
struct Receipt {
    create_time: Option<DateTime<Utc>>,
    update_time: Option<DateTime<Utc>>,
}

impl Auditable for Receipt {
    fn set_create_time(&mut self, at: DateTime<Utc>) -> AuditFieldResult {
        self.create_time = Some(at);
        Ok(())
    }

    fn set_update_time(&mut self, at: DateTime<Utc>) -> AuditFieldResult {
        self.update_time = Some(at);
        Ok(())
    }

    fn set_create_user(&mut self, _actor: Option<ActorId>) -> AuditFieldResult {
        Err(AuditFieldError::Unsupported(AuditField::CreateUser))
    }

    fn set_update_user(&mut self, _actor: Option<ActorId>) -> AuditFieldResult {
        Err(AuditFieldError::Unsupported(AuditField::UpdateUser))
    }
}

fn interceptor(config: AutoFillConfig) -> Result<AutoFill<SteppedClock>, eyre::Report> {
    let clock = Arc::new(SteppedClock::at(instant(2026, 10, 5, 9, 0)));
    Ok(AutoFill::new(clock, config).mark(RECEIPT_INSERT, OperationType::Insert)?)
}

#[rstest]
fn fail_open_stamps_supported_fields_and_reports_the_rest() -> Result<(), eyre::Report> {
    let auto_fill = interceptor(AutoFillConfig::lenient())?;
    let mut args = [Receipt::default()];

    let outcome = auto_fill.intercept(RECEIPT_INSERT, &mut args, &acting_as(77))?;

    let report = outcome
        .report()
        .ok_or_else(|| eyre::eyre!("receipt should have been stamped"))?;
    assert_eq!(report.filled, vec![AuditField::CreateTime, AuditField::UpdateTime]);
    assert_eq!(
        report.skipped,
        vec![
            AuditFieldError::Unsupported(AuditField::CreateUser),
            AuditFieldError::Unsupported(AuditField::UpdateUser),
        ]
    );
    let [receipt] = &args;
    assert_eq!(receipt.create_time, Some(instant(2026, 10, 5, 9, 0)));
    assert_eq!(receipt.update_time, receipt.create_time);
    Ok(())
}

#[rstest]
fn fail_closed_refuses_after_attempting_every_field() -> Result<(), eyre::Report> {
    let auto_fill = interceptor(AutoFillConfig::strict())?;
    let mut args = [Receipt::default()];

    let result = auto_fill.intercept(RECEIPT_INSERT, &mut args, &acting_as(77));

    assert_eq!(
        result,
        Err(AutoFillError::Incomplete {
            marker: OperationType::Insert,
            failures: vec![
                AuditFieldError::Unsupported(AuditField::CreateUser),
                AuditFieldError::Unsupported(AuditField::UpdateUser),
            ],
        })
    );
    let [receipt] = &args;
    assert!(receipt.create_time.is_some());
    Ok(())
}

#[rstest]
fn marked_operation_without_arguments_is_not_fatal() -> Result<(), eyre::Report> {
    let auto_fill = interceptor(AutoFillConfig::strict())?;
    let mut args: [Receipt; 0] = [];

    let outcome = auto_fill.intercept(RECEIPT_INSERT, &mut args, &acting_as(77))?;

    assert_eq!(outcome, FillOutcome::NoEntity);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_policy_accepts_fully_auditable_orders() -> Result<(), eyre::Report> {
    let clock = Arc::new(SteppedClock::at(instant(2026, 10, 5, 9, 0)));
    let service = order_service(&clock, AutoFillConfig::strict())?;

    let order = service.place_order(breakfast(3), &acting_as(77)).await?;

    assert_eq!(order.create_user(), Some(ActorId::new(77)));
    assert_eq!(order.update_time(), Some(instant(2026, 10, 5, 9, 0)));
    Ok(())
}
