use soroban_sdk::{contracttype, Address, Env};

use crate::error::Error;

// Roughly one day / one week of ledgers at 5s close time.
pub const LEDGER_THRESHOLD: u32 = 17_280;
pub const LEDGER_BUMP: u32 = 120_960;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    /// Asset contract released by this schedule
    pub asset: Address,
    /// Full entitlement, fixed at creation
    pub total_amount: i128,
    /// Cumulative amount already transferred to the beneficiary
    pub released_amount: i128,
    /// Unix timestamp where accrual begins
    pub start_time: u64,
    /// Unix timestamp where accrual reaches 100%
    pub end_time: u64,
    /// Blocks vest while set; accrual keeps running
    pub is_paused: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Vesting(Address), // beneficiary → VestingSchedule
}

pub fn read_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD, LEDGER_BUMP);
}

pub fn has_schedule(env: &Env, beneficiary: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vesting(beneficiary.clone()))
}

pub fn read_schedule(env: &Env, beneficiary: &Address) -> Option<VestingSchedule> {
    env.storage()
        .persistent()
        .get(&DataKey::Vesting(beneficiary.clone()))
}

pub fn load_schedule(env: &Env, beneficiary: &Address) -> Result<VestingSchedule, Error> {
    read_schedule(env, beneficiary).ok_or(Error::NoSchedule)
}

pub fn write_schedule(env: &Env, beneficiary: &Address, schedule: &VestingSchedule) {
    let key = DataKey::Vesting(beneficiary.clone());
    env.storage().persistent().set(&key, schedule);
    env.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);
}

pub fn remove_schedule(env: &Env, beneficiary: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Vesting(beneficiary.clone()));
}
