use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::math::SafeMath;
use crate::state::{Sale, VestingRecord};

// ─────────────────────────────────────────────────────────────────────────────
// Vesting ledger
// ─────────────────────────────────────────────────────────────────────────────
//
// One record per beneficiary, ever. A claimed record is kept so that `claimed`
// stays true and the beneficiary cannot be vested a second time.

impl Sale {
    /// `caller` must be the admin; the beneficiary is a co-signer of the instruction.
    pub fn create_vesting(
        &mut self,
        caller: &Pubkey,
        record: &mut VestingRecord,
        amount: u64,
        release_time: i64,
        now: i64,
    ) -> Result<()> {
        self.require_admin(caller)?;
        require!(amount > 0, LaunchpadError::ZeroAmount);
        require!(release_time > now, LaunchpadError::InvalidReleaseTime);
        require!(!record.exists(), LaunchpadError::VestingExists);

        self.vesting_count = self.vesting_count.safe_add(1)?;
        record.amount = amount;
        record.release_time = release_time;
        record.claimed = false;
        Ok(())
    }
}

impl VestingRecord {
    /// Marks the record claimed and returns the amount to release.
    pub fn claim(&mut self, now: i64) -> Result<u64> {
        require!(self.exists(), LaunchpadError::NoVestingRecord);
        require!(!self.claimed, LaunchpadError::AlreadyClaimed);
        require!(self.is_releasable(now), LaunchpadError::NotYetReleasable);

        self.claimed = true;
        Ok(self.amount)
    }
}
