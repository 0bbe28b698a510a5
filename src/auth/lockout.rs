/**
 * Lockout Policy
 *
 * Per-account state machine over consecutive failed sign-ins:
 *
 * - `OPEN --failure--> OPEN` while the new count stays below the
 *   threshold
 * - `OPEN --failure--> LOCKED` when the new count reaches the threshold
 * - `* --success--> OPEN` with the counter reset to 0
 *
 * `LOCKED` is terminal for this policy. There is no time-based recovery;
 * only the explicit admin unblock endpoint clears the flag (and resets
 * the counter). The decision functions here are pure; the authenticator
 * persists every transition to the employees table before the triggering
 * request completes.
 */

/// Maximum consecutive failed sign-ins before an account is locked.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lockout state derived from the failed-attempt counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutState {
    /// Account accepts credential checks; counter below the threshold.
    Open { failed_attempts: i32 },
    /// Counter reached the threshold; credential checks are rejected.
    Locked,
}

/// State after recording one more failure on an open account.
///
/// `failed_attempts` is the counter value after the increment.
pub fn state_after_failure(failed_attempts: i32) -> LockoutState {
    if failed_attempts >= MAX_FAILED_ATTEMPTS {
        LockoutState::Locked
    } else {
        LockoutState::Open { failed_attempts }
    }
}

/// State after a successful credential check. The counter always resets.
pub fn state_after_success() -> LockoutState {
    LockoutState::Open { failed_attempts: 0 }
}
