mod common;

use common::*;
use crowdsale::{Error, SalePhase};
use soroban_sdk::{testutils::Address as _, Address};

const ALLOCATION: i128 = 1_000_000 * E18;

/// Opens a sale where 0.5 native at $30,000 buys 150,000 tokens plus 20% bonus.
fn open_sale(t: &SaleTest<'_>) {
    t.initialize_sale(
        ALLOCATION,
        &Prices {
            native: 3_000_000,
            token: 10,
            currency_a: 1_100,
            currency_b: 1_200,
            min_contribution: 1_000,
        },
    );
    t.open();
}

fn buyer_with_contribution(t: &SaleTest<'_>) -> Address {
    let buyer = t.whitelisted();
    t.fund(&t.native, &buyer, E18);
    t.client.contribute(&buyer, &(E18 / 2));
    buyer
}

#[test]
fn test_bonus_locked_until_release_date() {
    for_each_kind(ALLOCATION, |t| {
        open_sale(t);
        let buyer = buyer_with_contribution(t);
        assert_eq!(t.client.bonus_of(&buyer), 30_000 * E18);

        // No release date yet.
        t.warp(t.closing_time + 10 * DAY);
        assert_eq!(
            t.client.try_withdraw_bonus(&buyer),
            Err(Ok(Error::BonusNotReleased))
        );

        let release = t.closing_time + 20 * DAY;
        t.client.set_release_date(&t.owner, &release);
        assert_eq!(
            t.client.try_withdraw_bonus(&buyer),
            Err(Ok(Error::BonusNotReleased))
        );
        assert_eq!(t.client.bonus_of(&buyer), 30_000 * E18);
    });
}

#[test]
fn test_bonus_claim_after_finalize() {
    for_each_kind(ALLOCATION, |t| {
        open_sale(t);
        let buyer = buyer_with_contribution(t);
        assert_eq!(t.token.client.balance(&buyer), 150_000 * E18);

        t.client.set_release_date(&t.owner, &(t.closing_time + DAY));
        t.warp(t.closing_time + DAY);

        let swept = t.client.finalize_crowdsale(&t.owner);
        assert_eq!(swept, ALLOCATION - 150_000 * E18 - 30_000 * E18);
        assert_eq!(t.token.client.balance(&t.owner), swept);
        assert_eq!(t.token.client.balance(&t.sale), 30_000 * E18);

        assert_eq!(t.client.withdraw_bonus(&buyer), 30_000 * E18);
        assert_eq!(t.token.client.balance(&buyer), 180_000 * E18);
        assert_eq!(t.client.bonus_of(&buyer), 0);
        assert_eq!(t.client.bonus_withdrawn(), 30_000 * E18);
        assert_eq!(t.client.outstanding_bonus(), 0);
        assert_eq!(t.token.client.balance(&t.sale), 0);

        assert_eq!(
            t.client.try_withdraw_bonus(&buyer),
            Err(Ok(Error::NoBonusBalance))
        );

        // Dust sent to the sale afterwards can still be recovered.
        t.token.client.transfer(&buyer, &t.sale, &1);
        assert_eq!(t.client.withdraw_token(&t.owner, &t.token.address), 1);
        assert_eq!(t.token.client.balance(&t.sale), 0);
    });
}

#[test]
fn test_claim_without_bonus_fails() {
    for_each_kind(ALLOCATION, |t| {
        open_sale(t);
        t.client.set_release_date(&t.owner, &t.opening_time);

        let nobody = Address::generate(t.env);
        assert_eq!(
            t.client.try_withdraw_bonus(&nobody),
            Err(Ok(Error::NoBonusBalance))
        );
    });
}

#[test]
fn test_finalize_reserves_outstanding_bonus() {
    for_each_kind(ALLOCATION, |t| {
        open_sale(t);
        let early = buyer_with_contribution(t);
        let late = buyer_with_contribution(t);

        // Released while the sale is still running.
        t.client.set_release_date(&t.owner, &(t.opening_time + 20));
        t.warp(t.opening_time + 20);
        assert_eq!(t.client.withdraw_bonus(&early), 30_000 * E18);

        t.warp(t.closing_time);
        assert!(t.client.has_closed());
        let swept = t.client.finalize_crowdsale(&t.owner);
        assert_eq!(swept, ALLOCATION - 2 * 150_000 * E18 - 2 * 30_000 * E18);
        assert_eq!(t.token.client.balance(&t.sale), 30_000 * E18);

        assert_eq!(t.client.withdraw_bonus(&late), 30_000 * E18);
        assert_eq!(t.token.client.balance(&t.sale), 0);
        assert_eq!(t.client.bonus_withdrawn(), t.client.bonus_provided());
    });
}

#[test]
fn test_added_admin_finalizes() {
    for_each_kind(ALLOCATION, |t| {
        open_sale(t);
        buyer_with_contribution(t);

        let admin = Address::generate(t.env);
        t.client.add_admin(&t.owner, &admin);
        t.warp(t.closing_time + 1);

        let swept = t.client.finalize_crowdsale(&admin);
        assert_eq!(t.token.client.balance(&admin), swept);
        assert_eq!(
            swept,
            t.client.total_sale_allocation() - t.client.total_tokens_sold()
        );
        assert!(t.client.is_finalized());
        assert_eq!(t.client.phase(), SalePhase::Finalized);
    });
}

#[test]
fn test_finalize_guards() {
    for_each_kind(ALLOCATION, |t| {
        open_sale(t);
        let buyer = buyer_with_contribution(t);

        assert_eq!(
            t.client.try_finalize_crowdsale(&t.owner),
            Err(Ok(Error::SaleNotClosed))
        );

        t.warp(t.closing_time);
        let stranger = Address::generate(t.env);
        assert_eq!(
            t.client.try_finalize_crowdsale(&stranger),
            Err(Ok(Error::NotAdmin))
        );

        t.client.finalize_crowdsale(&t.owner);
        assert_eq!(
            t.client.try_finalize_crowdsale(&t.owner),
            Err(Ok(Error::AlreadyFinalized))
        );

        // Reopening the window does not reopen a finalized sale.
        t.client.change_closing_time(&t.owner, &(t.closing_time + 30 * DAY));
        assert!(!t.client.is_open());
        assert_eq!(
            t.client.try_contribute(&buyer, &(E18 / 2)),
            Err(Ok(Error::SaleNotOpen))
        );
    });
}

#[test]
fn test_sold_out_sale_finalizes_early() {
    for_each_kind(120 * E18, |t| {
        t.initialize_sale(
            120 * E18,
            &Prices {
                native: 1_000,
                token: 10,
                currency_a: 1_100,
                currency_b: 1_200,
                min_contribution: 10,
            },
        );
        t.open();
        let buyer = t.whitelisted();
        t.fund(&t.native, &buyer, E18);
        t.client.contribute(&buyer, &E18);

        assert!(t.client.has_closed());
        assert!(t.now() < t.closing_time);
        assert_eq!(t.client.finalize_crowdsale(&t.owner), 0);
        assert_eq!(t.token.client.balance(&t.sale), 20 * E18);
    });
}
