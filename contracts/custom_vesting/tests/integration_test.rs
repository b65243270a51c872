#![cfg(test)]

use custom_vesting::{CustomVesting, CustomVestingClient, Error};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

// 18 decimals, 1000 whole tokens
const UNIT: i128 = 1_000_000_000_000_000_000;
const MINT_AMOUNT: i128 = 1_000 * UNIT;

// start, mid, end, end + 1
const TIMESTAMPS: [u64; 4] = [1_614_556_800, 1_630_324_800, 1_646_092_800, 1_646_092_801];

struct TestContext {
    env: Env,
    owner: Address,
    p1: Address,
    bogey: Address,
    asset: Address,
    vesting_id: Address,
}

fn setup_test() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let p1 = Address::generate(&env);
    let bogey = Address::generate(&env);
    let asset_admin = Address::generate(&env);

    env.ledger().set_timestamp(TIMESTAMPS[0] - 86_400);

    // Vested asset (Stellar Asset Contract)
    let asset = env
        .register_stellar_asset_contract_v2(asset_admin)
        .address();

    let vesting_id = env.register(CustomVesting, ());
    let vesting = CustomVestingClient::new(&env, &vesting_id);
    vesting.initialize(&owner);

    // Custody is funded before any schedule exists
    token::StellarAssetClient::new(&env, &asset).mint(&vesting_id, &MINT_AMOUNT);

    TestContext {
        env,
        owner,
        p1,
        bogey,
        asset,
        vesting_id,
    }
}

#[test]
fn test_full_vesting_lifecycle() {
    let ctx = setup_test();
    let vesting = CustomVestingClient::new(&ctx.env, &ctx.vesting_id);
    let asset = token::Client::new(&ctx.env, &ctx.asset);

    // No pause without a schedule
    let result = vesting.try_set_pause(&ctx.owner, &ctx.p1, &true);
    assert_eq!(result, Err(Ok(Error::NoSchedule)));

    // Reversed window is rejected, then the real schedule is added
    let result = vesting.try_add_vesting_schedule(
        &ctx.owner,
        &ctx.p1,
        &ctx.asset,
        &MINT_AMOUNT,
        &TIMESTAMPS[2],
        &TIMESTAMPS[0],
    );
    assert_eq!(result, Err(Ok(Error::InvalidRange)));

    vesting.add_vesting_schedule(
        &ctx.owner,
        &ctx.p1,
        &ctx.asset,
        &MINT_AMOUNT,
        &TIMESTAMPS[0],
        &TIMESTAMPS[2],
    );
    let schedule = vesting.get_vesting(&ctx.p1).unwrap();
    assert!(!schedule.is_paused);
    assert_eq!(schedule.released_amount, 0);
    assert_eq!(schedule.total_amount, MINT_AMOUNT);
    assert_eq!(schedule.start_time, TIMESTAMPS[0]);
    assert_eq!(schedule.end_time, TIMESTAMPS[2]);

    let result = vesting.try_add_vesting_schedule(
        &ctx.owner,
        &ctx.p1,
        &ctx.asset,
        &MINT_AMOUNT,
        &TIMESTAMPS[0],
        &TIMESTAMPS[2],
    );
    assert_eq!(result, Err(Ok(Error::AlreadyExists)));

    // Pause blocks vest, and cannot be applied twice
    vesting.set_pause(&ctx.owner, &ctx.p1, &true);
    let result = vesting.try_set_pause(&ctx.owner, &ctx.p1, &true);
    assert_eq!(result, Err(Ok(Error::PauseStateUnchanged)));
    assert_eq!(vesting.try_vest(&ctx.p1), Err(Ok(Error::Paused)));
    vesting.set_pause(&ctx.owner, &ctx.p1, &false);

    // Half of the allocation after six months
    ctx.env.ledger().set_timestamp(TIMESTAMPS[1]);
    vesting.vest(&ctx.p1);
    assert_eq!(asset.balance(&ctx.p1), MINT_AMOUNT / 2);

    // Deleting an unknown beneficiary fails
    let result = vesting.try_delete_vesting_schedule(&ctx.owner, &ctx.bogey, &true);
    assert_eq!(result, Err(Ok(Error::NoSchedule)));

    // At the end, the beneficiary gets the rest and the owner the unvested part
    ctx.env.ledger().set_timestamp(TIMESTAMPS[2]);
    let custody_before = asset.balance(&ctx.vesting_id);
    let p1_before = asset.balance(&ctx.p1);
    let releasable = vesting.releasable_amount(&ctx.p1);

    vesting.delete_vesting_schedule(&ctx.owner, &ctx.p1, &true);

    assert_eq!(asset.balance(&ctx.p1), p1_before + releasable);
    assert_eq!(asset.balance(&ctx.owner), custody_before - releasable);
    assert_eq!(asset.balance(&ctx.owner), 0);

    assert_eq!(vesting.get_vesting(&ctx.p1), None);
    assert_eq!(vesting.try_vest(&ctx.p1), Err(Ok(Error::NoSchedule)));
}

#[test]
fn test_midyear_releasable_amount() {
    let ctx = setup_test();
    let vesting = CustomVestingClient::new(&ctx.env, &ctx.vesting_id);

    vesting.add_vesting_schedule(
        &ctx.owner,
        &ctx.p1,
        &ctx.asset,
        &1_000,
        &TIMESTAMPS[0],
        &TIMESTAMPS[2],
    );

    ctx.env.ledger().set_timestamp(TIMESTAMPS[0] + 15_768_000);
    assert_eq!(vesting.releasable_amount(&ctx.p1), 500);

    ctx.env.ledger().set_timestamp(TIMESTAMPS[3]);
    assert_eq!(vesting.releasable_amount(&ctx.p1), 1_000);
}

#[test]
fn test_early_termination_splits_balance() {
    let ctx = setup_test();
    let vesting = CustomVestingClient::new(&ctx.env, &ctx.vesting_id);
    let asset = token::Client::new(&ctx.env, &ctx.asset);

    vesting.add_vesting_schedule(
        &ctx.owner,
        &ctx.p1,
        &ctx.asset,
        &MINT_AMOUNT,
        &TIMESTAMPS[0],
        &TIMESTAMPS[2],
    );

    // A quarter in: 250 vested, 750 clawed back
    let quarter = TIMESTAMPS[0] + (TIMESTAMPS[2] - TIMESTAMPS[0]) / 4;
    ctx.env.ledger().set_timestamp(quarter);
    vesting.delete_vesting_schedule(&ctx.owner, &ctx.p1, &true);

    assert_eq!(asset.balance(&ctx.p1), MINT_AMOUNT / 4);
    assert_eq!(asset.balance(&ctx.owner), MINT_AMOUNT * 3 / 4);
    assert_eq!(asset.balance(&ctx.vesting_id), 0);
}
