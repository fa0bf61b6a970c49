//! Paging, metric and top-sales queries against `PostgreSQL`.

use crate::postgres::helpers::{PgHarness, acting_as, basket, pg};
use crate::test_helpers::instant;
use ordering::order::domain::{
    CustomerId, GoodsSales, Order, OrderMetricsFilter, OrderPageQuery, OrderStatus,
};
use rstest::rstest;

fn place_at(pg: &PgHarness, hour: u32, phone: &str, lines: &[(&str, u32, i64)]) -> Order {
    pg.clock.set(instant(2026, 10, 16, hour, 0));
    pg.runtime
        .block_on(pg.service.place_order(basket(9, phone, lines), &acting_as(1)))
        .expect("order placed")
}

fn complete(pg: &PgHarness, order: &mut Order) {
    order.set_status(OrderStatus::Completed);
    pg.runtime
        .block_on(pg.service.save(order, &acting_as(1)))
        .expect("order completed");
}

#[rstest]
fn page_query_range_includes_begin_and_excludes_end(pg: PgHarness) {
    let nine = place_at(&pg, 9, "13900000009", &[("tea", 1, 800)]);
    let ten = place_at(&pg, 10, "13900000010", &[("tea", 1, 800)]);
    place_at(&pg, 11, "13900000011", &[("tea", 1, 800)]);

    let query = OrderPageQuery::new(1, 10)
        .expect("valid page")
        .with_customer(CustomerId::new(9))
        .with_time_range(
            Some(instant(2026, 10, 16, 9, 0)),
            Some(instant(2026, 10, 16, 11, 0)),
        );
    let page = pg
        .runtime
        .block_on(pg.service.history(&query))
        .expect("page query");

    assert_eq!(page.total, 2);
    let ids: Vec<_> = page.records.iter().map(Order::id).collect();
    assert_eq!(ids, vec![ten.id(), nine.id()]);
    assert!(page.records.iter().all(|order| order.lines().len() == 1));
}

#[rstest]
fn page_query_pages_newest_first(pg: PgHarness) {
    place_at(&pg, 9, "13900000009", &[("tea", 1, 800)]);
    place_at(&pg, 10, "13900000010", &[("tea", 1, 800)]);
    let oldest_page = OrderPageQuery::new(2, 1).expect("valid page");

    let page = pg
        .runtime
        .block_on(pg.service.history(&oldest_page))
        .expect("page query");

    assert_eq!(page.total, 2);
    let times: Vec<_> = page.records.iter().map(Order::order_time).collect();
    assert_eq!(times, vec![instant(2026, 10, 16, 9, 0)]);
}

#[rstest]
#[case("_")]
#[case("%")]
#[case("\\")]
fn phone_filter_matches_wildcards_literally(pg: PgHarness, #[case] fragment: &str) {
    place_at(&pg, 9, "13900000009", &[("tea", 1, 800)]);
    let query = OrderPageQuery::new(1, 10)
        .expect("valid page")
        .with_phone(fragment);

    let page = pg
        .runtime
        .block_on(pg.service.history(&query))
        .expect("page query");

    assert_eq!(page.total, 0);
    assert!(page.records.is_empty());
}

#[rstest]
fn phone_filter_matches_a_fragment(pg: PgHarness) {
    place_at(&pg, 9, "13900000009", &[("tea", 1, 800)]);
    place_at(&pg, 10, "13722220010", &[("tea", 1, 800)]);
    let query = OrderPageQuery::new(1, 10)
        .expect("valid page")
        .with_phone("2222");

    let page = pg
        .runtime
        .block_on(pg.service.history(&query))
        .expect("page query");

    assert_eq!(page.total, 1);
}

#[rstest]
fn metrics_on_an_empty_table_are_zero(pg: PgHarness) {
    let turnover = pg
        .runtime
        .block_on(pg.service.turnover(&OrderMetricsFilter::all()))
        .expect("turnover");
    let count = pg
        .runtime
        .block_on(pg.service.order_count(&OrderMetricsFilter::all()))
        .expect("order count");
    let top = pg
        .runtime
        .block_on(pg.service.top_sales(
            instant(2026, 10, 16, 0, 0),
            instant(2026, 10, 17, 0, 0),
        ))
        .expect("top sales");

    assert_eq!(turnover, 0);
    assert_eq!(count, 0);
    assert!(top.is_empty());
}

#[rstest]
fn turnover_and_count_follow_the_filter(pg: PgHarness) {
    let mut morning = place_at(&pg, 9, "13900000009", &[("noodles", 2, 3_000)]);
    place_at(&pg, 10, "13900000010", &[("tea", 1, 800)]);
    let mut evening = place_at(&pg, 18, "13900000018", &[("rice", 1, 1_200)]);
    complete(&pg, &mut morning);
    complete(&pg, &mut evening);

    let completed_before_noon =
        OrderMetricsFilter::between(instant(2026, 10, 16, 0, 0), instant(2026, 10, 16, 12, 0))
            .with_status(OrderStatus::Completed);
    let turnover = pg
        .runtime
        .block_on(pg.service.turnover(&completed_before_noon))
        .expect("turnover");
    let count = pg
        .runtime
        .block_on(pg.service.order_count(&OrderMetricsFilter::all()))
        .expect("order count");
    let pending = pg
        .runtime
        .block_on(pg.service.count_by_status(OrderStatus::PendingPayment))
        .expect("status count");

    assert_eq!(turnover, 3_000);
    assert_eq!(count, 3);
    assert_eq!(pending, 1);
}

#[rstest]
fn top_sales_ranks_completed_quantities_with_ties_by_name(pg: PgHarness) {
    let mut first = place_at(
        &pg,
        9,
        "13900000009",
        &[("tea", 3, 2_400), ("noodles", 2, 3_000)],
    );
    let mut second = place_at(&pg, 10, "13900000010", &[("bun", 2, 400), ("tea", 1, 800)]);
    place_at(&pg, 11, "13900000011", &[("zongzi", 9, 4_500)]);
    complete(&pg, &mut first);
    complete(&pg, &mut second);

    let top = pg
        .runtime
        .block_on(pg.service.top_sales(
            instant(2026, 10, 16, 0, 0),
            instant(2026, 10, 17, 0, 0),
        ))
        .expect("top sales");

    let expected: Vec<GoodsSales> = [("tea", 4), ("bun", 2), ("noodles", 2)]
        .into_iter()
        .map(|(name, quantity)| GoodsSales {
            name: name.to_owned(),
            quantity,
        })
        .collect();
    assert_eq!(top, expected);
}

#[rstest]
fn top_sales_excludes_the_end_of_the_range(pg: PgHarness) {
    let mut order = place_at(&pg, 12, "13900000012", &[("tea", 1, 800)]);
    complete(&pg, &mut order);

    let top = pg
        .runtime
        .block_on(pg.service.top_sales(
            instant(2026, 10, 16, 0, 0),
            instant(2026, 10, 16, 12, 0),
        ))
        .expect("top sales");

    assert!(top.is_empty());
}
