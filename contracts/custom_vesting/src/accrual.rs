use crate::storage::VestingSchedule;

/// Amount of `total` unlocked at `now` for a linear window `[start, end]`
///
/// Formula: vested(t) = total × (t - start) / (end - start), floored
///
/// - t <= start: 0
/// - t >= end: total
///
/// The product is split as `q × elapsed + r × elapsed / duration` with
/// `q, r = divmod(total, duration)`, so it never overflows for any `i128`
/// total and `u64` timestamps and matches the single-division result exactly.
///
/// `total` is positive for every stored schedule (`add_vesting_schedule`
/// rejects anything else).
///
/// Example:
/// - total: 1,000, window: one year
/// - At half a year: vested = 1,000 × 0.5 = 500
pub fn linear_vested(total: i128, start: u64, end: u64, now: u64) -> i128 {
    debug_assert!(total >= 0);
    if now <= start {
        return 0;
    }
    if now >= end {
        return total;
    }

    let total = total as u128;
    let duration = (end - start) as u128;
    let elapsed = (now - start) as u128;

    let whole = (total / duration) * elapsed;
    let partial = (total % duration) * elapsed / duration;

    (whole + partial) as i128
}

/// Accrued amount of a schedule at `now`. Pausing does not stop accrual.
pub fn vested_amount(schedule: &VestingSchedule, now: u64) -> i128 {
    linear_vested(
        schedule.total_amount,
        schedule.start_time,
        schedule.end_time,
        now,
    )
}

/// Vested but not yet released.
///
/// Accrual never decreases and only accrued amounts are ever released, so
/// this cannot go negative.
pub fn releasable_amount(schedule: &VestingSchedule, now: u64) -> i128 {
    let vested = vested_amount(schedule, now);
    debug_assert!(schedule.released_amount <= vested);
    vested - schedule.released_amount
}

/// Part of the entitlement that has not accrued yet.
pub fn unvested_amount(schedule: &VestingSchedule, now: u64) -> i128 {
    schedule.total_amount - vested_amount(schedule, now)
}
