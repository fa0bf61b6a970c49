//! When steps for order auto-fill BDD scenarios.

use super::world::{OrderWorld, lunch_request, parse_instant, run_async};
use eyre::WrapErr;
use ordering::{
    audit::domain::{ActorContext, ActorId},
    order::domain::OrderStatus,
};
use rstest_bdd_macros::when;

#[when("the order is placed")]
fn order_is_placed(world: &mut OrderWorld) -> Result<(), eyre::Report> {
    let order = run_async(world.service.place_order(lunch_request(), &world.context))
        .wrap_err("place scenario order")?;
    world.order = Some(order);
    Ok(())
}

#[when(r#"the clock moves to "{at}""#)]
fn clock_moves(world: &mut OrderWorld, at: String) -> Result<(), eyre::Report> {
    world.clock.set(parse_instant(&at)?);
    Ok(())
}

#[when("actor {actor:i64} confirms the order")]
fn actor_confirms(world: &mut OrderWorld, actor: i64) -> Result<(), eyre::Report> {
    let id = world.placed()?.id();
    let mut order = run_async(world.service.find_by_id(id))?
        .ok_or_else(|| eyre::eyre!("placed order missing from store"))?;
    order.set_status(OrderStatus::Confirmed);

    let context = ActorContext::anonymous().with_actor(ActorId::new(actor));
    run_async(world.service.save(&mut order, &context)).wrap_err("save confirmed order")?;
    world.order = Some(order);
    Ok(())
}

#[when("the order is looked up by number")]
fn order_looked_up(world: &mut OrderWorld) -> Result<(), eyre::Report> {
    let number = world.placed()?.number().clone();
    world.looked_up = run_async(world.service.find_by_number(&number))?;
    Ok(())
}
