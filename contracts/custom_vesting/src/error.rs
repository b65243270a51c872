use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the administrator
    Unauthorized = 10,

    // ============================================
    // SCHEDULE ERRORS (20-29)
    // ============================================
    /// Beneficiary has no vesting schedule
    NoSchedule = 20,
    /// Beneficiary already has a vesting schedule
    AlreadyExists = 21,
    /// start_time must be strictly before end_time
    InvalidRange = 22,
    /// set_pause called with the current pause state
    PauseStateUnchanged = 23,
    /// Schedule is paused, vest is blocked
    Paused = 24,

    // ============================================
    // AMOUNT ERRORS (30-39)
    // ============================================
    /// Total amount must be positive
    InvalidAmount = 30,

    // ============================================
    // SETTLEMENT ERRORS (40-49)
    // ============================================
    /// Asset contract rejected the transfer
    TransferFailed = 40,
}
