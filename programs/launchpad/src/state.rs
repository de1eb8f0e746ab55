use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;

// ─────────────────────────────────────────────────────────────────────────────
// Sale status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SaleStatus {
    /// Account allocated but `initialize` has not run yet.
    #[default]
    Uninitialized,
    /// Purchases are accepted.
    Active,
    /// Purchases are rejected; admin configuration is still allowed.
    Paused,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sale — one per launch
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"sale", admin.key().as_ref(), sale_id.to_le_bytes().as_ref()]

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Sale {
    /// Creator-supplied identifier, part of the PDA seeds.
    pub sale_id: u64,

    /// Fixed at initialization; the only key allowed to configure the sale.
    pub admin: Pubkey,

    /// Mint of the token being sold.
    pub mint: Pubkey,

    /// Receives buyer payments (lamports).
    pub treasury: Pubkey,

    /// Tokens offered in total (raw units).
    pub total_tokens: u64,

    /// Tokens sold so far. Never exceeds `total_tokens`.
    pub tokens_sold: u64,

    /// Price per token unit in lamports.
    pub price: u64,

    /// Lamports authorized for transfer to the treasury so far.
    pub total_raised: u64,

    /// Participants with a non-zero purchase total.
    pub buyer_count: u32,

    /// Participants currently admitted to buy.
    pub whitelisted_count: u32,

    /// Vesting records ever created for this sale.
    pub vesting_count: u32,

    pub status: SaleStatus,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl Sale {
    /// Account discriminator (8) + all fields.
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // sale_id
        + 32  // admin
        + 32  // mint
        + 32  // treasury
        + 8   // total_tokens
        + 8   // tokens_sold
        + 8   // price
        + 8   // total_raised
        + 4   // buyer_count
        + 4   // whitelisted_count
        + 4   // vesting_count
        + 1   // status (enum)
        + 1; // bump

    pub fn is_initialized(&self) -> bool {
        self.status != SaleStatus::Uninitialized
    }

    pub fn paused(&self) -> bool {
        self.status == SaleStatus::Paused
    }

    pub fn is_active(&self) -> bool {
        self.status == SaleStatus::Active
    }

    pub fn is_admin(&self, caller: &Pubkey) -> bool {
        self.is_initialized() && *caller == self.admin
    }

    /// Gate for every privileged mutation. Must run before any write.
    pub fn require_admin(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_admin(caller), LaunchpadError::Unauthorized);
        Ok(())
    }

    pub fn tokens_remaining(&self) -> u64 {
        self.total_tokens.saturating_sub(self.tokens_sold)
    }

    pub fn stats(&self) -> SaleStats {
        SaleStats {
            sale_id: self.sale_id,
            admin: self.admin,
            mint: self.mint,
            total_tokens: self.total_tokens,
            tokens_sold: self.tokens_sold,
            tokens_remaining: self.tokens_remaining(),
            price: self.price,
            total_raised: self.total_raised,
            buyer_count: self.buyer_count,
            paused: self.paused(),
            whitelisted: self.whitelisted_count,
            vesting_count: self.vesting_count,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Participant — one per identity per sale
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"participant", sale.key().as_ref(), identity.as_ref()]
//
// Holds the identity's whitelist flag, purchase cap and cumulative purchases.
// The PDA address makes the record unique per (sale, identity).

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Participant {
    /// The sale this record belongs to.
    pub sale: Pubkey,

    /// The wallet this record describes.
    pub identity: Pubkey,

    pub whitelisted: bool,

    /// Purchase cap in raw token units. `None` means no per-buyer cap.
    pub allocation: Option<u64>,

    /// Tokens bought so far.
    pub purchased: u64,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl Participant {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 32  // sale
        + 32  // identity
        + 1   // whitelisted
        + 1 + 8  // allocation (Option<u64>)
        + 8   // purchased
        + 1; // bump

    /// Stamps the PDA identity on a freshly allocated record.
    pub fn bind(&mut self, sale: Pubkey, identity: Pubkey, bump: u8) {
        self.sale = sale;
        self.identity = identity;
        self.bump = bump;
    }

    pub fn is_whitelisted(&self) -> bool {
        self.whitelisted
    }

    pub fn allocation_of(&self) -> Option<u64> {
        self.allocation
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// VestingRecord — one per beneficiary per sale
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"vesting", sale.key().as_ref(), beneficiary.as_ref()]

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VestingRecord {
    pub sale: Pubkey,

    pub beneficiary: Pubkey,

    /// Tokens released to the beneficiary on claim. Zero until created.
    pub amount: u64,

    /// Unix timestamp from which the record can be claimed.
    pub release_time: i64,

    /// Set once on claim; never cleared.
    pub claimed: bool,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl VestingRecord {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 32  // sale
        + 32  // beneficiary
        + 8   // amount
        + 8   // release_time
        + 1   // claimed
        + 1; // bump

    pub fn bind(&mut self, sale: Pubkey, beneficiary: Pubkey, bump: u8) {
        self.sale = sale;
        self.beneficiary = beneficiary;
        self.bump = bump;
    }

    /// A record exists once `create_vesting` has written a non-zero amount.
    pub fn exists(&self) -> bool {
        self.amount > 0
    }

    pub fn is_releasable(&self, now: i64) -> bool {
        now >= self.release_time
    }
}

/// Read-only snapshot returned by `get_sale_stats`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SaleStats {
    pub sale_id: u64,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub total_tokens: u64,
    pub tokens_sold: u64,
    pub tokens_remaining: u64,
    pub price: u64,
    pub total_raised: u64,
    pub buyer_count: u32,
    pub paused: bool,
    pub whitelisted: u32,
    pub vesting_count: u32,
}

/// Transfers authorized by a successful purchase. The program shell moves
/// `cost` lamports buyer -> treasury and `tokens` vault -> buyer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub tokens: u64,
    pub cost: u64,
}
