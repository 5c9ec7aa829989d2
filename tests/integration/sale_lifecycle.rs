use ido_sale::{Error, Phase};
use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::assert_contract_error;
use crate::utils::constants::*;
use crate::utils::*;

fn split_by_allocation(
    sale: &SaleHandle,
    users: &[Address],
) -> (std::vec::Vec<Address>, std::vec::Vec<Address>) {
    users
        .iter()
        .cloned()
        .partition(|user| sale.client.get_allocation(user) == 1)
}

#[test]
fn test_full_sale_lifecycle() {
    let lp = Launchpad::new();
    let sale = lp.launch_sale(Schedule::starting_at(GENESIS), 3);
    let schedule = sale.schedule.clone();

    lp.warp(schedule.registration.0);
    assert_eq!(sale.client.get_phase(), Phase::Registration);
    let users = lp.register_users(&sale, 6);
    assert_eq!(sale.client.get_registration().number_of_registrants, 6);

    lp.warp(schedule.registration.1);
    let first = sale.client.select_winners(&lp.admin, &0, &5, &4);
    let second = sale.client.select_winners(&lp.admin, &0, &5, &4);
    assert_eq!(first + second, 3);
    let (winners, losers) = split_by_allocation(&sale, &users);
    assert_eq!(winners.len(), 3);

    lp.warp(schedule.purchase.0);
    assert_eq!(sale.client.get_phase(), Phase::Purchase);
    for winner in &winners {
        assert_eq!(lp.buy(&sale, winner, 100 * E18, 300 * E18), Ok(amount(E18)));
    }
    for loser in &losers {
        assert_eq!(
            lp.buy(&sale, loser, 100 * E18, 300 * E18),
            Err(Error::NoAllocation)
        );
    }

    let aggregate = sale.client.get_current_sale().aggregate;
    assert_eq!(aggregate.number_of_participants, 3);
    assert_eq!(aggregate.total_raised, amount(300 * E18));
    assert_eq!(aggregate.total_tokens_sold, amount(3 * E18));
    assert_eq!(lp.payment.balance(&sale.client.address), (300 * E18) as i128);

    lp.warp(schedule.unlock_times[3]);
    assert_eq!(sale.client.get_phase(), Phase::Vesting);
    let all = vec![&lp.env, 1u32, 2, 3, 4];
    for winner in &winners {
        assert_eq!(
            sale.client.withdraw_multiple_portions(winner, &all),
            amount(E18)
        );
        assert_eq!(sale.token.balance(winner), E18 as i128);
    }

    assert_eq!(sale.client.withdraw_earnings(&sale.owner), amount(300 * E18));
    assert_eq!(
        sale.client.withdraw_leftovers(&sale.owner),
        amount(TOKENS_TO_SELL - 3 * E18)
    );
    assert_eq!(lp.payment.balance(&sale.client.address), 0);
    assert_eq!(sale.token.balance(&sale.client.address), 0);
}

#[test]
fn test_vesting_shift_delays_claims() {
    let lp = Launchpad::new();
    let sale = lp.launch_sale(Schedule::starting_at(GENESIS), 1);
    let schedule = sale.schedule.clone();

    lp.warp(schedule.registration.0);
    let buyer = lp.register_users(&sale, 1).pop().unwrap();
    lp.warp(schedule.registration.1);
    sale.client.select_winners(&lp.admin, &0, &0, &1);
    lp.warp(schedule.purchase.0);
    lp.buy(&sale, &buyer, 200 * E18, 300 * E18).unwrap();

    sale.client
        .shift_vesting_unlocking_times(&lp.admin, &(7 * DAY));

    lp.warp(schedule.unlock_times[0]);
    assert_contract_error!(
        sale.client.try_withdraw_tokens(&buyer, &1),
        Error::TokensNotUnlocked
    );
    lp.warp(schedule.unlock_times[0] + 7 * DAY);
    assert_eq!(sale.client.withdraw_tokens(&buyer, &1), amount(2 * E18 / 10));
}

#[test]
fn test_participation_is_per_signed_limit() {
    let lp = Launchpad::new();
    let sale = lp.launch_sale(Schedule::starting_at(GENESIS), 2);
    let schedule = sale.schedule.clone();

    lp.warp(schedule.registration.0);
    let users = lp.register_users(&sale, 2);
    lp.warp(schedule.registration.1);
    sale.client.select_winners(&lp.admin, &0, &1, &2);

    lp.warp(schedule.purchase.0);
    // 2 tokens against a 1 token limit.
    assert_eq!(
        lp.buy(&sale, &users[0], 200 * E18, E18),
        Err(Error::ExceedingAllowance)
    );
    assert_eq!(lp.buy(&sale, &users[0], 100 * E18, E18), Ok(amount(E18)));

    let stranger = Address::generate(&lp.env);
    assert_eq!(
        lp.buy(&sale, &stranger, 100 * E18, E18),
        Err(Error::NoAllocation)
    );
}
