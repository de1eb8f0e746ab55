use anchor_lang::prelude::*;

use crate::math::SafeMath;
use crate::state::{Participant, Sale};

impl Sale {
    /// Admits the participant. Adding an identity twice is a no-op success.
    pub fn add_to_whitelist(&mut self, caller: &Pubkey, participant: &mut Participant) -> Result<()> {
        self.require_admin(caller)?;

        if participant.is_whitelisted() {
            return Ok(());
        }
        self.whitelisted_count = self.whitelisted_count.safe_add(1)?;
        participant.whitelisted = true;
        Ok(())
    }

    /// Removing an absent identity is a no-op success. Purchases and caps
    /// already recorded for the identity are kept.
    pub fn remove_from_whitelist(
        &mut self,
        caller: &Pubkey,
        participant: &mut Participant,
    ) -> Result<()> {
        self.require_admin(caller)?;

        if !participant.is_whitelisted() {
            return Ok(());
        }
        self.whitelisted_count = self.whitelisted_count.safe_sub(1)?;
        participant.whitelisted = false;
        Ok(())
    }
}
