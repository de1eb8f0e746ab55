use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::state::{Participant, Sale};

impl Sale {
    /// Sets the purchase cap for the participant, replacing any previous cap.
    /// The cap may not fall below what the identity has already bought.
    pub fn set_allocation(
        &mut self,
        caller: &Pubkey,
        participant: &mut Participant,
        cap: u64,
    ) -> Result<()> {
        self.require_admin(caller)?;
        require!(
            cap >= participant.purchased,
            LaunchpadError::InvalidAllocation
        );

        participant.allocation = Some(cap);
        Ok(())
    }
}
