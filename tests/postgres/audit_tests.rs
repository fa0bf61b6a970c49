//! Audit stamps persisted through the `PostgreSQL` repository.

use crate::postgres::helpers::{PgHarness, acting_as, basket, opening, pg};
use crate::test_helpers::instant;
use ordering::{
    audit::domain::{ActorContext, ActorId},
    order::domain::{OrderStatus, PayMethod},
};
use rstest::rstest;

#[rstest]
fn insert_then_update_round_trips_audit_columns(pg: PgHarness) {
    let t1 = instant(2026, 10, 16, 9, 40);
    let placed = pg
        .runtime
        .block_on(pg.service.place_order(
            basket(4, "13800000001", &[("noodles", 2, 3_000)]),
            &acting_as(77),
        ))
        .expect("order placed");

    let mut stored = pg
        .runtime
        .block_on(pg.service.find_by_id(placed.id()))
        .expect("lookup")
        .expect("order stored");
    assert_eq!(stored.create_time(), Some(opening()));
    assert_eq!(stored.update_time(), Some(opening()));
    assert_eq!(stored.create_user(), Some(ActorId::new(77)));
    assert_eq!(stored.update_user(), Some(ActorId::new(77)));
    assert_eq!(stored.lines().len(), 1);

    pg.clock.set(t1);
    stored.record_payment(PayMethod::Alipay, t1);
    stored.set_status(OrderStatus::AwaitingConfirmation);
    pg.runtime
        .block_on(pg.service.save(&mut stored, &acting_as(88)))
        .expect("order saved");

    let reloaded = pg
        .runtime
        .block_on(pg.service.find_by_number(placed.number()))
        .expect("lookup")
        .expect("order stored");
    assert_eq!(reloaded.create_time(), Some(opening()));
    assert_eq!(reloaded.create_user(), Some(ActorId::new(77)));
    assert_eq!(reloaded.update_time(), Some(t1));
    assert_eq!(reloaded.update_user(), Some(ActorId::new(88)));
    assert_eq!(reloaded.status(), OrderStatus::AwaitingConfirmation);
    assert_eq!(reloaded.pay_method(), Some(PayMethod::Alipay));
}

#[rstest]
fn anonymous_update_clears_the_stored_update_user(pg: PgHarness) {
    let mut order = pg
        .runtime
        .block_on(pg.service.place_order(
            basket(5, "13800000002", &[("tea", 1, 800)]),
            &acting_as(77),
        ))
        .expect("order placed");

    pg.clock.set(instant(2026, 10, 16, 10, 0));
    order.set_status(OrderStatus::Confirmed);
    pg.runtime
        .block_on(pg.service.save(&mut order, &ActorContext::anonymous()))
        .expect("order saved");

    let reloaded = pg
        .runtime
        .block_on(pg.service.find_by_id(order.id()))
        .expect("lookup")
        .expect("order stored");
    assert_eq!(reloaded.update_user(), None);
    assert_eq!(reloaded.update_time(), Some(instant(2026, 10, 16, 10, 0)));
    assert_eq!(reloaded.create_user(), Some(ActorId::new(77)));
}

#[rstest]
fn unpaid_sweep_persists_cancellation_and_stamps(pg: PgHarness) {
    let stale = pg
        .runtime
        .block_on(pg.service.place_order(
            basket(6, "13800000003", &[("dumplings", 3, 2_400)]),
            &acting_as(31),
        ))
        .expect("stale order placed");
    pg.clock.set(instant(2026, 10, 16, 9, 30));
    let fresh = pg
        .runtime
        .block_on(pg.service.place_order(
            basket(6, "13800000003", &[("soup", 1, 900)]),
            &acting_as(31),
        ))
        .expect("fresh order placed");

    let sweep_time = instant(2026, 10, 16, 9, 45);
    pg.clock.set(sweep_time);
    let cancelled = pg
        .runtime
        .block_on(
            pg.service
                .cancel_unpaid_before(instant(2026, 10, 16, 9, 15), &ActorContext::anonymous()),
        )
        .expect("sweep runs");
    assert_eq!(cancelled, vec![stale.id()]);

    let swept = pg
        .runtime
        .block_on(pg.service.find_by_id(stale.id()))
        .expect("lookup")
        .expect("order stored");
    assert_eq!(swept.status(), OrderStatus::Cancelled);
    assert_eq!(swept.cancel_time(), Some(sweep_time));
    assert!(swept.cancel_reason().is_some());
    assert_eq!(swept.update_time(), Some(sweep_time));
    assert_eq!(swept.update_user(), None);
    assert_eq!(swept.create_user(), Some(ActorId::new(31)));

    let untouched = pg
        .runtime
        .block_on(pg.service.find_by_id(fresh.id()))
        .expect("lookup")
        .expect("order stored");
    assert_eq!(untouched.status(), OrderStatus::PendingPayment);
}
