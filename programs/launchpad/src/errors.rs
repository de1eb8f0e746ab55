use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchpadError {
    #[msg("Sale has already been initialized")]
    AlreadyInitialized,
    #[msg("Only the sale admin can call this")]
    Unauthorized,
    #[msg("Buyer is not on the whitelist")]
    NotWhitelisted,
    #[msg("Sale is paused or not initialized")]
    SaleInactive,
    #[msg("Purchase would exceed the buyer's allocation")]
    ExceedsAllocation,
    #[msg("Purchase would exceed the tokens left for sale")]
    ExceedsSupply,
    #[msg("Allocation cannot be lower than what the buyer already purchased")]
    InvalidAllocation,
    #[msg("Total tokens cannot be lower than tokens already sold")]
    InvalidParameters,
    #[msg("An unclaimed or claimed vesting record already exists for this identity")]
    VestingExists,
    #[msg("No vesting record found for this identity")]
    NoVestingRecord,
    #[msg("Vesting release time has not been reached")]
    NotYetReleasable,
    #[msg("Vested tokens have already been claimed")]
    AlreadyClaimed,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Release time must be in the future")]
    InvalidReleaseTime,
    #[msg("Invalid mint for this sale")]
    InvalidMint,
    #[msg("Invalid token vault for this sale")]
    InvalidVault,
    #[msg("Invalid treasury for this sale")]
    InvalidTreasury,
}
