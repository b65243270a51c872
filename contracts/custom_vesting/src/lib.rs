#![no_std]

mod accrual;
mod error;
mod events;
mod storage;

pub use error::Error;
pub use storage::VestingSchedule;

use events::*;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};

#[contract]
pub struct CustomVesting;

#[contractimpl]
impl CustomVesting {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger with its administrator
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        storage::set_initialized(&env);
        storage::write_admin(&env, &admin);

        env.events().publish(
            (Symbol::new(&env, "initialized"),),
            InitializedEvent { admin },
        );

        Ok(())
    }

    /// Hand the administrator role to another address
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        let previous = Self::require_admin(&env, &caller)?;

        storage::write_admin(&env, &new_admin);

        env.events().publish(
            (Symbol::new(&env, "admin_changed"),),
            AdminChangedEvent {
                previous,
                new_admin,
            },
        );

        Ok(())
    }

    // ============================================
    // SCHEDULE MANAGEMENT (ADMIN)
    // ============================================

    /// Create the vesting schedule of a beneficiary
    ///
    /// The contract must already hold (or be funded with) `total_amount` of
    /// `asset` before the beneficiary starts claiming.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `AlreadyExists`: Beneficiary already has a schedule
    /// - `InvalidRange`: start_time >= end_time
    /// - `InvalidAmount`: total_amount must be positive
    pub fn add_vesting_schedule(
        env: Env,
        caller: Address,
        beneficiary: Address,
        asset: Address,
        total_amount: i128,
        start_time: u64,
        end_time: u64,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        if storage::has_schedule(&env, &beneficiary) {
            return Err(Error::AlreadyExists);
        }

        if start_time >= end_time {
            return Err(Error::InvalidRange);
        }

        if total_amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let schedule = VestingSchedule {
            asset: asset.clone(),
            total_amount,
            released_amount: 0,
            start_time,
            end_time,
            is_paused: false,
        };
        storage::write_schedule(&env, &beneficiary, &schedule);

        env.events().publish(
            (Symbol::new(&env, "schedule_added"), beneficiary.clone()),
            ScheduleAddedEvent {
                beneficiary,
                asset,
                total_amount,
                start_time,
                end_time,
            },
        );

        Ok(())
    }

    /// Pause or resume a beneficiary's schedule
    ///
    /// Pausing only blocks `vest`; time keeps accruing while paused.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `NoSchedule`: Beneficiary has no schedule
    /// - `PauseStateUnchanged`: Schedule is already in the requested state
    pub fn set_pause(
        env: Env,
        caller: Address,
        beneficiary: Address,
        pause: bool,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let mut schedule = storage::load_schedule(&env, &beneficiary)?;

        if schedule.is_paused == pause {
            return Err(Error::PauseStateUnchanged);
        }

        schedule.is_paused = pause;
        storage::write_schedule(&env, &beneficiary, &schedule);

        env.events().publish(
            (Symbol::new(&env, "pause_changed"), beneficiary.clone()),
            PauseChangedEvent {
                beneficiary,
                is_paused: pause,
            },
        );

        Ok(())
    }

    /// Terminate a beneficiary's schedule
    ///
    /// With `settle_beneficiary` the vested-but-unreleased balance goes to the
    /// beneficiary and the unvested remainder to the admin. Without it the
    /// whole outstanding balance is clawed back to the admin.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `NoSchedule`: Beneficiary has no schedule
    /// - `TransferFailed`: Asset contract rejected a payout; nothing is removed
    pub fn delete_vesting_schedule(
        env: Env,
        caller: Address,
        beneficiary: Address,
        settle_beneficiary: bool,
    ) -> Result<(), Error> {
        let admin = Self::require_admin(&env, &caller)?;

        let schedule = storage::load_schedule(&env, &beneficiary)?;

        let now = env.ledger().timestamp();
        let releasable = accrual::releasable_amount(&schedule, now);
        let unvested = accrual::unvested_amount(&schedule, now);

        let (to_beneficiary, to_admin) = if settle_beneficiary {
            (releasable, unvested)
        } else {
            let clawed = releasable
                .checked_add(unvested)
                .ok_or(Error::InvalidAmount)?;
            (0, clawed)
        };

        log!(
            &env,
            "deleting schedule: {} to beneficiary, {} to admin",
            to_beneficiary,
            to_admin
        );

        Self::pay_out(&env, &schedule.asset, &beneficiary, to_beneficiary)?;
        Self::pay_out(&env, &schedule.asset, &admin, to_admin)?;

        storage::remove_schedule(&env, &beneficiary);

        env.events().publish(
            (Symbol::new(&env, "schedule_deleted"), beneficiary.clone()),
            ScheduleDeletedEvent {
                beneficiary,
                to_beneficiary,
                to_admin,
            },
        );

        Ok(())
    }

    // ============================================
    // BENEFICIARY
    // ============================================

    /// Release everything accrued so far to the calling beneficiary
    ///
    /// Returns the amount transferred; 0 when nothing new has accrued.
    ///
    /// # Errors
    /// - `NoSchedule`: Beneficiary has no schedule
    /// - `Paused`: Schedule is paused
    /// - `TransferFailed`: Asset contract rejected the payout; nothing is recorded
    pub fn vest(env: Env, beneficiary: Address) -> Result<i128, Error> {
        beneficiary.require_auth();

        let mut schedule = storage::load_schedule(&env, &beneficiary)?;

        if schedule.is_paused {
            return Err(Error::Paused);
        }

        let now = env.ledger().timestamp();
        let releasable = accrual::releasable_amount(&schedule, now);

        if releasable == 0 {
            log!(&env, "nothing to release at {}", now);
            return Ok(0);
        }

        Self::pay_out(&env, &schedule.asset, &beneficiary, releasable)?;

        schedule.released_amount = schedule
            .released_amount
            .checked_add(releasable)
            .ok_or(Error::InvalidAmount)?;
        storage::write_schedule(&env, &beneficiary, &schedule);

        env.events().publish(
            (Symbol::new(&env, "vested"), beneficiary.clone()),
            VestedEvent {
                beneficiary,
                amount: releasable,
                released_total: schedule.released_amount,
            },
        );

        Ok(releasable)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Amount the beneficiary could claim right now (0 without a schedule)
    pub fn releasable_amount(env: Env, beneficiary: Address) -> i128 {
        storage::read_schedule(&env, &beneficiary)
            .map(|s| accrual::releasable_amount(&s, env.ledger().timestamp()))
            .unwrap_or(0)
    }

    /// Amount accrued so far, released or not (0 without a schedule)
    pub fn vested_amount(env: Env, beneficiary: Address) -> i128 {
        storage::read_schedule(&env, &beneficiary)
            .map(|s| accrual::vested_amount(&s, env.ledger().timestamp()))
            .unwrap_or(0)
    }

    /// Get a beneficiary's schedule
    pub fn get_vesting(env: Env, beneficiary: Address) -> Option<VestingSchedule> {
        storage::read_schedule(&env, &beneficiary)
    }

    /// Get the administrator
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        storage::read_admin(&env)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_admin(env: &Env, caller: &Address) -> Result<Address, Error> {
        let admin = storage::read_admin(env)?;
        caller.require_auth();

        if *caller != admin {
            return Err(Error::Unauthorized);
        }

        storage::bump_instance(env);
        Ok(admin)
    }

    fn pay_out(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }

        let asset_client = token::Client::new(env, asset);
        match asset_client.try_transfer(&env.current_contract_address(), to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(Error::TransferFailed),
        }
    }
}
