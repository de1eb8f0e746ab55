/// PDA seed prefix for sale accounts: `[SALE_SEED, admin, sale_id.to_le_bytes()]`.
pub const SALE_SEED: &[u8] = b"sale";

/// PDA seed prefix for per-identity records: `[PARTICIPANT_SEED, sale, identity]`.
pub const PARTICIPANT_SEED: &[u8] = b"participant";

/// PDA seed prefix for vesting records: `[VESTING_SEED, sale, beneficiary]`.
pub const VESTING_SEED: &[u8] = b"vesting";
