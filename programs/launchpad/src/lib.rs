use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

pub mod allocation;
pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod sale;
pub mod state;
pub mod vesting;
pub mod whitelist;

use constants::{PARTICIPANT_SEED, SALE_SEED, VESTING_SEED};
use errors::LaunchpadError;
use events::*;
use state::*;

declare_id!("5fpYVDg9wmsNi2nfzKVZMtdZ2Z5QtvsXxs9mbnP7VJTy");

#[program]
pub mod launchpad {
    use super::*;

    // ═════════════════════════════════════════════════════════════════════
    // 1. INITIALIZE
    // ═════════════════════════════════════════════════════════════════════
    /// Creates the sale record at `["sale", admin, sale_id]`. The signer
    /// becomes the admin for the lifetime of the sale.
    ///
    /// The account is allocated with `init_if_needed` so that a repeated call
    /// reaches the ledger and fails with `AlreadyInitialized`.
    pub fn initialize(
        ctx: Context<Initialize>,
        sale_id: u64,
        total_tokens: u64,
        price: u64,
    ) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        let sale = &mut ctx.accounts.sale;

        sale.initialize(admin, total_tokens, price)?;
        sale.sale_id = sale_id;
        sale.mint = ctx.accounts.mint.key();
        sale.treasury = ctx.accounts.treasury.key();
        sale.bump = ctx.bumps.sale;

        emit!(SaleInitialized {
            sale: sale_key,
            sale_id,
            admin,
            mint: sale.mint,
            total_tokens,
            price,
        });
        msg!(
            "LAUNCHPAD: Sale {} initialized. total_tokens={}, price={}",
            sale_id,
            total_tokens,
            price
        );

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 2. WHITELIST
    // ═════════════════════════════════════════════════════════════════════
    /// Admits `identity`, creating its participant record on first use.
    pub fn add_to_whitelist(ctx: Context<ConfigureParticipant>, identity: Pubkey) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        let participant = &mut ctx.accounts.participant;
        participant.bind(sale_key, identity, ctx.bumps.participant);

        ctx.accounts.sale.add_to_whitelist(&admin, participant)?;

        emit!(WhitelistUpdated {
            sale: sale_key,
            identity,
            admitted: true,
        });
        msg!("LAUNCHPAD: Whitelisted {}", identity);
        Ok(())
    }

    pub fn remove_from_whitelist(ctx: Context<ConfigureParticipant>, identity: Pubkey) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        let participant = &mut ctx.accounts.participant;
        participant.bind(sale_key, identity, ctx.bumps.participant);

        ctx.accounts.sale.remove_from_whitelist(&admin, participant)?;

        emit!(WhitelistUpdated {
            sale: sale_key,
            identity,
            admitted: false,
        });
        msg!("LAUNCHPAD: Removed {} from whitelist", identity);
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 3. ALLOCATION
    // ═════════════════════════════════════════════════════════════════════
    /// Sets (overwrites) the purchase cap for `identity`.
    pub fn set_allocation(
        ctx: Context<ConfigureParticipant>,
        identity: Pubkey,
        cap: u64,
    ) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        let participant = &mut ctx.accounts.participant;
        participant.bind(sale_key, identity, ctx.bumps.participant);

        ctx.accounts.sale.set_allocation(&admin, participant, cap)?;

        emit!(AllocationSet {
            sale: sale_key,
            identity,
            cap,
        });
        msg!("LAUNCHPAD: Allocation for {} set to {}", identity, cap);
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 4. BUY TOKENS
    // ═════════════════════════════════════════════════════════════════════
    /// Whitelisted buyer purchases `amount` tokens at the sale price.
    ///
    /// The ledger records the purchase first; the buyer then pays
    /// `amount * price` lamports to the treasury and receives `amount` tokens
    /// from the vault, signed by the sale PDA. Any failed transfer reverts
    /// the whole instruction, ledger update included.
    pub fn buy_tokens(ctx: Context<BuyTokens>, amount: u64) -> Result<()> {
        let buyer = ctx.accounts.buyer.key();
        let sale_key = ctx.accounts.sale.key();
        let participant = &mut ctx.accounts.participant;
        participant.bind(sale_key, buyer, ctx.bumps.participant);

        let sale = &mut ctx.accounts.sale;
        let purchase = sale.buy_tokens(participant, amount)?;
        let tokens_sold = sale.tokens_sold;
        let admin = sale.admin;
        let sale_id_bytes = sale.sale_id.to_le_bytes();
        let bump = sale.bump;

        // ── Payment: buyer -> treasury ──────────────────────────────────
        if purchase.cost > 0 {
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: ctx.accounts.buyer.to_account_info(),
                        to: ctx.accounts.treasury.to_account_info(),
                    },
                ),
                purchase.cost,
            )?;
        }

        // ── Delivery: vault -> buyer, signed by the sale PDA ────────────
        let sale_seeds: &[&[u8]] = &[SALE_SEED, admin.as_ref(), &sale_id_bytes, &[bump]];
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.token_vault.to_account_info(),
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.buyer_token_account.to_account_info(),
                    authority: ctx.accounts.sale.to_account_info(),
                },
                &[sale_seeds],
            ),
            purchase.tokens,
            ctx.accounts.mint.decimals,
        )?;

        emit!(TokensPurchased {
            sale: sale_key,
            buyer,
            amount: purchase.tokens,
            cost: purchase.cost,
            tokens_sold,
        });
        msg!(
            "LAUNCHPAD: Buyer {} bought {} tokens for {} lamports (sold: {})",
            buyer,
            purchase.tokens,
            purchase.cost,
            tokens_sold
        );

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 5. PAUSE / UNPAUSE
    // ═════════════════════════════════════════════════════════════════════
    /// Blocks purchases. Configuration and vesting claims stay available.
    pub fn pause_sale(ctx: Context<ConfigureSale>) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        ctx.accounts.sale.pause(&admin)?;

        emit!(SalePaused {
            sale: sale_key,
            admin,
        });
        msg!("LAUNCHPAD: Sale paused");
        Ok(())
    }

    pub fn unpause_sale(ctx: Context<ConfigureSale>) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        ctx.accounts.sale.unpause(&admin)?;

        emit!(SaleResumed {
            sale: sale_key,
            admin,
        });
        msg!("LAUNCHPAD: Sale resumed");
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 6. UPDATE PARAMETERS
    // ═════════════════════════════════════════════════════════════════════
    pub fn update_parameters(
        ctx: Context<ConfigureSale>,
        new_price: Option<u64>,
        new_total_tokens: Option<u64>,
    ) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let sale_key = ctx.accounts.sale.key();
        let sale = &mut ctx.accounts.sale;
        sale.update_parameters(&admin, new_price, new_total_tokens)?;

        emit!(ParametersUpdated {
            sale: sale_key,
            price: sale.price,
            total_tokens: sale.total_tokens,
        });
        msg!(
            "LAUNCHPAD: Parameters updated. price={}, total_tokens={}",
            sale.price,
            sale.total_tokens
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 7. VESTING
    // ═════════════════════════════════════════════════════════════════════
    /// Admin and beneficiary both sign. One record per beneficiary.
    pub fn create_vesting(ctx: Context<CreateVesting>, amount: u64, release_time: i64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let admin = ctx.accounts.admin.key();
        let beneficiary = ctx.accounts.beneficiary.key();
        let sale_key = ctx.accounts.sale.key();
        let vesting = &mut ctx.accounts.vesting;
        vesting.bind(sale_key, beneficiary, ctx.bumps.vesting);

        ctx.accounts
            .sale
            .create_vesting(&admin, vesting, amount, release_time, now)?;

        emit!(VestingCreated {
            sale: sale_key,
            beneficiary,
            amount,
            release_time,
        });
        msg!(
            "LAUNCHPAD: Vesting of {} for {} releasable at {}",
            amount,
            beneficiary,
            release_time
        );
        Ok(())
    }

    /// Beneficiary claims their vested tokens once `release_time` has passed.
    pub fn claim_vesting(ctx: Context<ClaimVesting>) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let beneficiary = ctx.accounts.beneficiary.key();
        let sale_key = ctx.accounts.sale.key();
        let vesting = &mut ctx.accounts.vesting;
        vesting.bind(sale_key, beneficiary, ctx.bumps.vesting);

        let amount = vesting.claim(now)?;
        let sale = &ctx.accounts.sale;
        let admin = sale.admin;
        let sale_id_bytes = sale.sale_id.to_le_bytes();
        let bump = sale.bump;

        let sale_seeds: &[&[u8]] = &[SALE_SEED, admin.as_ref(), &sale_id_bytes, &[bump]];
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.token_vault.to_account_info(),
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.beneficiary_token_account.to_account_info(),
                    authority: ctx.accounts.sale.to_account_info(),
                },
                &[sale_seeds],
            ),
            amount,
            ctx.accounts.mint.decimals,
        )?;

        emit!(VestingClaimed {
            sale: sale_key,
            beneficiary,
            amount,
        });
        msg!("LAUNCHPAD: {} claimed {} vested tokens", beneficiary, amount);
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 8. STATS
    // ═════════════════════════════════════════════════════════════════════
    pub fn get_sale_stats(ctx: Context<GetSaleStats>) -> Result<SaleStats> {
        Ok(ctx.accounts.sale.stats())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// ACCOUNT CONTEXTS
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(sale_id: u64)]
pub struct Initialize<'info> {
    /// Sale creator and admin, pays for the account.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Sale PDA — counters, parameters and status.
    #[account(
        init_if_needed,
        payer = admin,
        space = Sale::MAX_SIZE,
        seeds = [SALE_SEED, admin.key().as_ref(), sale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub sale: Account<'info, Sale>,

    /// Mint of the token being sold.
    pub mint: InterfaceAccount<'info, Mint>,

    /// Receives purchase payments.
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Shared by the sale-wide admin instructions. The signer is checked against
/// `sale.admin` by the ledger itself.
#[derive(Accounts)]
pub struct ConfigureSale<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SALE_SEED, sale.admin.as_ref(), sale.sale_id.to_le_bytes().as_ref()],
        bump = sale.bump,
    )]
    pub sale: Account<'info, Sale>,
}

/// Shared by the per-identity admin instructions (whitelist, allocation).
#[derive(Accounts)]
#[instruction(identity: Pubkey)]
pub struct ConfigureParticipant<'info> {
    /// Pays for the participant record on first use.
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SALE_SEED, sale.admin.as_ref(), sale.sale_id.to_le_bytes().as_ref()],
        bump = sale.bump,
    )]
    pub sale: Account<'info, Sale>,

    #[account(
        init_if_needed,
        payer = admin,
        space = Participant::MAX_SIZE,
        seeds = [PARTICIPANT_SEED, sale.key().as_ref(), identity.as_ref()],
        bump,
    )]
    pub participant: Account<'info, Participant>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct BuyTokens<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [SALE_SEED, sale.admin.as_ref(), sale.sale_id.to_le_bytes().as_ref()],
        bump = sale.bump,
    )]
    pub sale: Account<'info, Sale>,

    /// The buyer's record. A buyer who was never whitelisted gets a blank
    /// record here and the ledger rejects the purchase.
    #[account(
        init_if_needed,
        payer = buyer,
        space = Participant::MAX_SIZE,
        seeds = [PARTICIPANT_SEED, sale.key().as_ref(), buyer.key().as_ref()],
        bump,
    )]
    pub participant: Account<'info, Participant>,

    #[account(
        constraint = mint.key() == sale.mint @ LaunchpadError::InvalidMint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Holds the tokens for sale; owned by the sale PDA.
    #[account(
        mut,
        constraint = token_vault.mint == sale.mint @ LaunchpadError::InvalidVault,
        constraint = token_vault.owner == sale.key() @ LaunchpadError::InvalidVault,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = buyer_token_account.mint == sale.mint @ LaunchpadError::InvalidMint,
    )]
    pub buyer_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        address = sale.treasury @ LaunchpadError::InvalidTreasury,
    )]
    pub treasury: SystemAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateVesting<'info> {
    /// Pays for the vesting record.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Co-signs to accept the vesting schedule.
    pub beneficiary: Signer<'info>,

    #[account(
        mut,
        seeds = [SALE_SEED, sale.admin.as_ref(), sale.sale_id.to_le_bytes().as_ref()],
        bump = sale.bump,
    )]
    pub sale: Account<'info, Sale>,

    #[account(
        init_if_needed,
        payer = admin,
        space = VestingRecord::MAX_SIZE,
        seeds = [VESTING_SEED, sale.key().as_ref(), beneficiary.key().as_ref()],
        bump,
    )]
    pub vesting: Account<'info, VestingRecord>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimVesting<'info> {
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    #[account(
        seeds = [SALE_SEED, sale.admin.as_ref(), sale.sale_id.to_le_bytes().as_ref()],
        bump = sale.bump,
    )]
    pub sale: Account<'info, Sale>,

    /// Missing records are allocated blank and rejected by the ledger with
    /// `NoVestingRecord`, which reverts the allocation.
    #[account(
        init_if_needed,
        payer = beneficiary,
        space = VestingRecord::MAX_SIZE,
        seeds = [VESTING_SEED, sale.key().as_ref(), beneficiary.key().as_ref()],
        bump,
    )]
    pub vesting: Account<'info, VestingRecord>,

    #[account(
        constraint = mint.key() == sale.mint @ LaunchpadError::InvalidMint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = token_vault.mint == sale.mint @ LaunchpadError::InvalidVault,
        constraint = token_vault.owner == sale.key() @ LaunchpadError::InvalidVault,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == sale.mint @ LaunchpadError::InvalidMint,
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GetSaleStats<'info> {
    pub sale: Account<'info, Sale>,
}
