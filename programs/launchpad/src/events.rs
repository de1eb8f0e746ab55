use anchor_lang::prelude::*;

#[event]
pub struct SaleInitialized {
    pub sale: Pubkey,
    pub sale_id: u64,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub total_tokens: u64,
    pub price: u64,
}

#[event]
pub struct WhitelistUpdated {
    pub sale: Pubkey,
    pub identity: Pubkey,
    pub admitted: bool,
}

#[event]
pub struct AllocationSet {
    pub sale: Pubkey,
    pub identity: Pubkey,
    pub cap: u64,
}

/// Emitted after both custody transfers of a purchase succeed.
#[event]
pub struct TokensPurchased {
    pub sale: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub cost: u64,
    pub tokens_sold: u64,
}

#[event]
pub struct SalePaused {
    pub sale: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct SaleResumed {
    pub sale: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct ParametersUpdated {
    pub sale: Pubkey,
    pub price: u64,
    pub total_tokens: u64,
}

#[event]
pub struct VestingCreated {
    pub sale: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub release_time: i64,
}

#[event]
pub struct VestingClaimed {
    pub sale: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
}
