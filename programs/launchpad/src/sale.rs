use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;
use crate::math::SafeMath;
use crate::state::{Participant, Purchase, Sale, SaleStatus};

// ─────────────────────────────────────────────────────────────────────────────
// Sale lifecycle: Uninitialized -> Active <-> Paused
// ─────────────────────────────────────────────────────────────────────────────
//
// Every method validates all of its preconditions before the first write, so a
// returned error always leaves the records exactly as they were.

impl Sale {
    /// Fixes the admin and opens the sale. Valid only once per record.
    pub fn initialize(&mut self, admin: Pubkey, total_tokens: u64, price: u64) -> Result<()> {
        require!(!self.is_initialized(), LaunchpadError::AlreadyInitialized);

        self.admin = admin;
        self.total_tokens = total_tokens;
        self.tokens_sold = 0;
        self.price = price;
        self.total_raised = 0;
        self.buyer_count = 0;
        self.whitelisted_count = 0;
        self.vesting_count = 0;
        self.status = SaleStatus::Active;

        Ok(())
    }

    /// Idempotent: pausing a paused sale succeeds and changes nothing.
    pub fn pause(&mut self, caller: &Pubkey) -> Result<()> {
        self.require_admin(caller)?;
        self.status = SaleStatus::Paused;
        Ok(())
    }

    /// Idempotent: resuming an active sale succeeds and changes nothing.
    pub fn unpause(&mut self, caller: &Pubkey) -> Result<()> {
        self.require_admin(caller)?;
        self.status = SaleStatus::Active;
        Ok(())
    }

    /// Overwrites price and/or supply. `None` keeps the current value.
    pub fn update_parameters(
        &mut self,
        caller: &Pubkey,
        new_price: Option<u64>,
        new_total_tokens: Option<u64>,
    ) -> Result<()> {
        self.require_admin(caller)?;

        let total_tokens = new_total_tokens.unwrap_or(self.total_tokens);
        require!(
            total_tokens >= self.tokens_sold,
            LaunchpadError::InvalidParameters
        );

        if let Some(price) = new_price {
            self.price = price;
        }
        self.total_tokens = total_tokens;

        Ok(())
    }

    /// Records a purchase by `buyer` and returns the transfers it authorizes.
    ///
    /// Checks run in a fixed order so the reported error is deterministic:
    /// active, whitelisted, non-zero amount, allocation, supply.
    pub fn buy_tokens(&mut self, buyer: &mut Participant, amount: u64) -> Result<Purchase> {
        require!(self.is_active(), LaunchpadError::SaleInactive);
        require!(buyer.is_whitelisted(), LaunchpadError::NotWhitelisted);
        require!(amount > 0, LaunchpadError::ZeroAmount);

        let purchased = buyer.purchased.safe_add(amount)?;
        if let Some(cap) = buyer.allocation_of() {
            require!(purchased <= cap, LaunchpadError::ExceedsAllocation);
        }

        let remaining = self.total_tokens.safe_sub(self.tokens_sold)?;
        require!(amount <= remaining, LaunchpadError::ExceedsSupply);

        let cost = amount.safe_mul(self.price)?;
        let total_raised = self.total_raised.safe_add(cost)?;
        let buyer_count = if buyer.purchased == 0 {
            self.buyer_count.safe_add(1)?
        } else {
            self.buyer_count
        };

        self.tokens_sold += amount;
        self.total_raised = total_raised;
        self.buyer_count = buyer_count;
        buyer.purchased = purchased;

        Ok(Purchase {
            tokens: amount,
            cost,
        })
    }
}
