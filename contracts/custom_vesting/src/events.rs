use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub previous: Address,
    pub new_admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleAddedEvent {
    pub beneficiary: Address,
    pub asset: Address,
    pub total_amount: i128,
    pub start_time: u64,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub beneficiary: Address,
    pub is_paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestedEvent {
    pub beneficiary: Address,
    pub amount: i128,
    pub released_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleDeletedEvent {
    pub beneficiary: Address,
    /// Vested-but-unreleased amount paid to the beneficiary
    pub to_beneficiary: i128,
    /// Amount clawed back to the administrator
    pub to_admin: i128,
}
