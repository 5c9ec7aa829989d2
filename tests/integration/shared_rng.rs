use lottery_rng::Error as RngError;
use soroban_sdk::{testutils::Address as _, Address};

use crate::assert_host_rejected;
use crate::utils::constants::*;
use crate::utils::*;

#[test]
fn test_sales_draw_from_one_stream() {
    let lp = Launchpad::new();
    let first = lp.launch_sale(Schedule::starting_at(GENESIS), 2);
    let second = lp.launch_sale(Schedule::starting_at(GENESIS), 2);

    lp.warp(first.schedule.registration.0);
    let a = lp.register_users(&first, 4);
    let b = lp.register_users(&second, 5);
    lp.warp(first.schedule.registration.1);

    assert_eq!(first.client.select_winners(&lp.admin, &0, &3, &4), 2);
    assert_eq!(lp.rng.draws(), 4);
    assert_eq!(second.client.select_winners(&lp.admin, &0, &4, &5), 2);
    assert_eq!(lp.rng.draws(), 9);

    let won = |sale: &SaleHandle, users: &[Address]| -> u32 {
        users.iter().map(|u| sale.client.get_allocation(u)).sum()
    };
    assert_eq!(won(&first, &a), 2);
    assert_eq!(won(&second, &b), 2);
}

#[test]
fn test_signatures_are_bound_to_one_sale() {
    let lp = Launchpad::new();
    let first = lp.launch_sale(Schedule::starting_at(GENESIS), 1);
    let second = lp.launch_sale(Schedule::starting_at(GENESIS), 1);
    let user = Address::generate(&lp.env);

    lp.warp(first.schedule.registration.0);
    let signature = lp.registration_signature(&first, &user, 1);
    assert_host_rejected!(second
        .client
        .try_register_user(&user, &1, &signature, &SIG_EXPIRATION));

    first
        .client
        .register_user(&user, &1, &signature, &SIG_EXPIRATION);
    assert!(first.client.is_registered(&user));
    assert!(!second.client.is_registered(&user));
}

#[test]
fn test_only_granted_sales_draw() {
    let lp = Launchpad::new();
    let granted = lp.launch_sale(Schedule::starting_at(GENESIS), 1);
    let rogue = lp.deploy_sale(Schedule::starting_at(GENESIS), 1);
    let outsider = Address::generate(&lp.env);

    assert_eq!(lp.rng.try_next(&outsider), Err(Ok(RngError::UnknownConsumer)));
    assert_eq!(lp.rng.draws(), 0);

    lp.warp(granted.schedule.registration.0);
    lp.register_users(&granted, 3);
    lp.register_users(&rogue, 3);
    lp.warp(granted.schedule.registration.1);

    // A sale the RNG admin never granted cannot advance the shared stream.
    assert!(rogue.client.try_select_winners(&lp.admin, &0, &2, &3).is_err());
    assert_eq!(lp.rng.draws(), 0);

    assert_eq!(granted.client.select_winners(&lp.admin, &0, &2, &3), 1);
    assert_eq!(lp.rng.draws(), 3);
}

#[test]
fn test_weights_flow_into_selection() {
    let lp = Launchpad::new();
    let sale = lp.launch_sale(Schedule::starting_at(GENESIS), 1);

    lp.warp(sale.schedule.registration.0);
    let users = lp.register_weighted(&sale, &[1, 1, 1_000_000, 1, 1]);
    lp.warp(sale.schedule.registration.1);
    sale.client.select_winners(&lp.admin, &0, &4, &5);

    assert_eq!(sale.client.get_current_sale().aggregate.total_weight, 1_000_004);
    assert_eq!(sale.client.get_allocation(&users[2]), 1);
    let others: u32 = users
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2)
        .map(|(_, u)| sale.client.get_allocation(u))
        .sum();
    assert_eq!(others, 0);
}
