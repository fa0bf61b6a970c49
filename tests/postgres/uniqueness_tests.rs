//! Uniqueness and missing-row handling in the `PostgreSQL` repository.

use crate::postgres::helpers::{PgHarness, acting_as, basket, pg};
use ordering::order::{
    domain::{CustomerId, DeliveryContact, NewOrder, Order, OrderLine, OrderStatus},
    ports::{OrderRepository, OrderRepositoryError},
    services::OrderServiceError,
};
use rstest::rstest;

fn order_numbered_like(pg: &PgHarness, existing: &Order) -> Order {
    let data = NewOrder {
        number: existing.number().clone(),
        customer_id: CustomerId::new(12),
        contact: DeliveryContact::new("Edsger", "13600000000", "1 Shortest Path")
            .expect("valid contact"),
        lines: vec![OrderLine::new("coffee", 1, 1_500).expect("valid line")],
        remark: None,
    };
    Order::place(data, &*pg.clock).expect("valid order")
}

#[rstest]
fn insert_rejects_a_taken_order_number(pg: PgHarness) {
    let placed = pg
        .runtime
        .block_on(pg.service.place_order(
            basket(11, "13900000011", &[("tea", 1, 800)]),
            &acting_as(2),
        ))
        .expect("order placed");
    let mut duplicate = order_numbered_like(&pg, &placed);

    let result = pg.runtime.block_on(pg.repository.insert(&mut duplicate));

    assert!(
        matches!(&result, Err(OrderRepositoryError::DuplicateNumber(number)) if number == placed.number()),
        "expected DuplicateNumber, got: {result:?}"
    );
    let stored = pg
        .runtime
        .block_on(pg.repository.find_by_id(duplicate.id()))
        .expect("lookup");
    assert!(stored.is_none());
}

#[rstest]
fn saving_an_unknown_order_reports_not_found(pg: PgHarness) {
    let placed = pg
        .runtime
        .block_on(pg.service.place_order(
            basket(11, "13900000011", &[("tea", 1, 800)]),
            &acting_as(2),
        ))
        .expect("order placed");
    let mut never_stored = order_numbered_like(&pg, &placed);
    never_stored.set_status(OrderStatus::Confirmed);

    let result = pg
        .runtime
        .block_on(pg.service.save(&mut never_stored, &acting_as(2)));

    assert!(
        matches!(
            &result,
            Err(OrderServiceError::Repository(OrderRepositoryError::NotFound(id)))
                if *id == never_stored.id()
        ),
        "expected NotFound, got: {result:?}"
    );
}
