//! Instruction-level harness: runs the launchpad program inside
//! `solana-program-test` with the SPL Token program alongside it.

#![allow(dead_code)]

use anchor_lang::{AccountDeserialize, AnchorDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::token::spl_token;
use launchpad::constants::{PARTICIPANT_SEED, SALE_SEED, VESTING_SEED};
use launchpad::errors::LaunchpadError;
use launchpad::state::SaleStats;
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    clock::Clock,
    instruction::{Instruction, InstructionError},
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};

/// Test result type alias
pub type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

pub const SALE_ID: u64 = 7;
pub const DECIMALS: u8 = 6;
pub const VAULT_SUPPLY: u64 = 10_000_000;
pub const SOL: u64 = 1_000_000_000;

pub fn program_test() -> ProgramTest {
    ProgramTest::new(
        "launchpad",
        launchpad::ID,
        processor!(|program_id, accounts, data| {
            // SAFETY: only the lifetimes differ; the generated entry ties the
            // account slice and its infos to a single lifetime.
            let accounts = unsafe { core::mem::transmute(accounts) };
            launchpad::entry(program_id, accounts, data)
        }),
    )
}

pub fn sale_address(admin: &Pubkey, sale_id: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[SALE_SEED, admin.as_ref(), sale_id.to_le_bytes().as_ref()],
        &launchpad::ID,
    )
    .0
}

pub fn participant_address(sale: &Pubkey, identity: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[PARTICIPANT_SEED, sale.as_ref(), identity.as_ref()],
        &launchpad::ID,
    )
    .0
}

pub fn vesting_address(sale: &Pubkey, beneficiary: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[VESTING_SEED, sale.as_ref(), beneficiary.as_ref()],
        &launchpad::ID,
    )
    .0
}

/// Custom error code a failed launchpad instruction reports to the client.
pub fn launchpad_code(err: LaunchpadError) -> u32 {
    err as u32 + anchor_lang::error::ERROR_CODE_OFFSET
}

/// Extracts the custom error code from a failed transaction.
pub fn custom_code(result: Result<(), BanksClientError>) -> u32 {
    let err = result.expect_err("transaction should have failed");
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("expected a custom program error, got {other:?}"),
    }
}

/// One initialized sale with a funded, PDA-owned token vault.
pub struct SaleFixture {
    pub context: ProgramTestContext,
    pub admin: Keypair,
    pub mint: Pubkey,
    pub treasury: Pubkey,
    pub sale: Pubkey,
    pub vault: Pubkey,
}

impl SaleFixture {
    pub async fn new(total_tokens: u64, price: u64) -> TestResult<Self> {
        let context = program_test().start_with_context().await;
        let admin = Keypair::new();
        let treasury = Keypair::new().pubkey();
        let sale = sale_address(&admin.pubkey(), SALE_ID);

        let mut fixture = Self {
            context,
            admin,
            mint: Pubkey::default(),
            treasury,
            sale,
            vault: Pubkey::default(),
        };

        let admin_key = fixture.admin.pubkey();
        fixture.airdrop(&admin_key, 10 * SOL).await?;
        fixture.airdrop(&treasury, SOL).await?;
        fixture.mint = fixture.create_mint().await?;

        let admin = fixture.admin.insecure_clone();
        let ix = fixture.initialize_ix(total_tokens, price);
        fixture.process(&[ix], &[&admin]).await?;

        let vault = fixture.create_token_account(&sale).await?;
        fixture.mint_to(&vault, VAULT_SUPPLY).await?;
        fixture.vault = vault;
        Ok(fixture)
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub async fn try_process(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let blockhash = self
            .context
            .get_new_latest_blockhash()
            .await
            .expect("fresh blockhash");
        let payer = self.context.payer.insecure_clone();
        let mut all: Vec<&Keypair> = vec![&payer];
        all.extend_from_slice(signers);

        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &all,
            blockhash,
        );
        self.context.banks_client.process_transaction(tx).await
    }

    pub async fn process(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> TestResult<()> {
        Ok(self.try_process(instructions, signers).await?)
    }

    pub async fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> TestResult<()> {
        let payer = self.context.payer.pubkey();
        let ix = system_instruction::transfer(&payer, to, lamports);
        self.process(&[ix], &[]).await
    }

    pub async fn funded_wallet(&mut self) -> TestResult<Keypair> {
        let wallet = Keypair::new();
        self.airdrop(&wallet.pubkey(), 10 * SOL).await?;
        Ok(wallet)
    }

    // ── Token helpers ────────────────────────────────────────────────────

    async fn create_mint(&mut self) -> TestResult<Pubkey> {
        let mint = Keypair::new();
        let payer = self.context.payer.pubkey();
        let rent = self.context.banks_client.get_rent().await?;

        let instructions = [
            system_instruction::create_account(
                &payer,
                &mint.pubkey(),
                rent.minimum_balance(spl_token::state::Mint::LEN),
                spl_token::state::Mint::LEN as u64,
                &spl_token::ID,
            ),
            spl_token::instruction::initialize_mint(
                &spl_token::ID,
                &mint.pubkey(),
                &payer,
                None,
                DECIMALS,
            )?,
        ];
        self.process(&instructions, &[&mint]).await?;
        Ok(mint.pubkey())
    }

    pub async fn create_token_account(&mut self, owner: &Pubkey) -> TestResult<Pubkey> {
        let account = Keypair::new();
        let payer = self.context.payer.pubkey();
        let rent = self.context.banks_client.get_rent().await?;

        let instructions = [
            system_instruction::create_account(
                &payer,
                &account.pubkey(),
                rent.minimum_balance(spl_token::state::Account::LEN),
                spl_token::state::Account::LEN as u64,
                &spl_token::ID,
            ),
            spl_token::instruction::initialize_account(
                &spl_token::ID,
                &account.pubkey(),
                &self.mint,
                owner,
            )?,
        ];
        self.process(&instructions, &[&account]).await?;
        Ok(account.pubkey())
    }

    pub async fn mint_to(&mut self, to: &Pubkey, amount: u64) -> TestResult<()> {
        let payer = self.context.payer.pubkey();
        let ix = spl_token::instruction::mint_to(&spl_token::ID, &self.mint, to, &payer, &[], amount)?;
        self.process(&[ix], &[]).await
    }

    pub async fn token_balance(&mut self, account: &Pubkey) -> TestResult<u64> {
        let account = self
            .context
            .banks_client
            .get_account(*account)
            .await?
            .ok_or("token account not found")?;
        Ok(spl_token::state::Account::unpack(&account.data)?.amount)
    }

    pub async fn lamports(&mut self, address: &Pubkey) -> TestResult<u64> {
        Ok(self.context.banks_client.get_balance(*address).await?)
    }

    // ── Program state ────────────────────────────────────────────────────

    pub async fn account(&mut self, address: &Pubkey) -> TestResult<Option<Account>> {
        Ok(self.context.banks_client.get_account(*address).await?)
    }

    pub async fn fetch<T: AccountDeserialize>(&mut self, address: &Pubkey) -> TestResult<T> {
        let account = self.account(address).await?.ok_or("account not found")?;
        T::try_deserialize(&mut account.data.as_slice()).map_err(|e| format!("{e:?}").into())
    }

    /// Runs `get_sale_stats` and decodes its return data.
    pub async fn sale_stats(&mut self) -> TestResult<SaleStats> {
        let blockhash = self.context.get_new_latest_blockhash().await?;
        let payer = self.context.payer.insecure_clone();
        let tx = Transaction::new_signed_with_payer(
            &[self.get_sale_stats_ix()],
            Some(&payer.pubkey()),
            &[&payer],
            blockhash,
        );

        let outcome = self
            .context
            .banks_client
            .process_transaction_with_metadata(tx)
            .await?;
        outcome.result?;
        let return_data = outcome
            .metadata
            .and_then(|metadata| metadata.return_data)
            .ok_or("get_sale_stats returned no data")?;
        Ok(SaleStats::try_from_slice(&return_data.data)?)
    }

    pub async fn advance_clock(&mut self, seconds: i64) -> TestResult<i64> {
        let mut clock: Clock = self.context.banks_client.get_sysvar().await?;
        clock.unix_timestamp += seconds;
        self.context.set_sysvar(&clock);
        Ok(clock.unix_timestamp)
    }

    pub async fn now(&mut self) -> TestResult<i64> {
        let clock: Clock = self.context.banks_client.get_sysvar().await?;
        Ok(clock.unix_timestamp)
    }

    // ── Instruction builders ─────────────────────────────────────────────

    pub fn initialize_ix(&self, total_tokens: u64, price: u64) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: launchpad::accounts::Initialize {
                admin: self.admin.pubkey(),
                sale: self.sale,
                mint: self.mint,
                treasury: self.treasury,
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: launchpad::instruction::Initialize {
                sale_id: SALE_ID,
                total_tokens,
                price,
            }
            .data(),
        }
    }

    fn participant_accounts(&self, signer: &Pubkey, identity: &Pubkey) -> Vec<solana_sdk::instruction::AccountMeta> {
        launchpad::accounts::ConfigureParticipant {
            admin: *signer,
            sale: self.sale,
            participant: participant_address(&self.sale, identity),
            system_program: anchor_lang::system_program::ID,
        }
        .to_account_metas(None)
    }

    pub fn add_to_whitelist_ix(&self, signer: &Pubkey, identity: Pubkey) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: self.participant_accounts(signer, &identity),
            data: launchpad::instruction::AddToWhitelist { identity }.data(),
        }
    }

    pub fn remove_from_whitelist_ix(&self, signer: &Pubkey, identity: Pubkey) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: self.participant_accounts(signer, &identity),
            data: launchpad::instruction::RemoveFromWhitelist { identity }.data(),
        }
    }

    pub fn set_allocation_ix(&self, signer: &Pubkey, identity: Pubkey, cap: u64) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: self.participant_accounts(signer, &identity),
            data: launchpad::instruction::SetAllocation { identity, cap }.data(),
        }
    }

    pub fn buy_tokens_ix(
        &self,
        buyer: &Pubkey,
        buyer_token_account: &Pubkey,
        vault: &Pubkey,
        treasury: &Pubkey,
        amount: u64,
    ) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: launchpad::accounts::BuyTokens {
                buyer: *buyer,
                sale: self.sale,
                participant: participant_address(&self.sale, buyer),
                mint: self.mint,
                token_vault: *vault,
                buyer_token_account: *buyer_token_account,
                treasury: *treasury,
                token_program: spl_token::ID,
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: launchpad::instruction::BuyTokens { amount }.data(),
        }
    }

    fn configure_sale_accounts(&self, signer: &Pubkey) -> Vec<solana_sdk::instruction::AccountMeta> {
        launchpad::accounts::ConfigureSale {
            admin: *signer,
            sale: self.sale,
        }
        .to_account_metas(None)
    }

    pub fn pause_ix(&self, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: self.configure_sale_accounts(signer),
            data: launchpad::instruction::PauseSale {}.data(),
        }
    }

    pub fn unpause_ix(&self, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: self.configure_sale_accounts(signer),
            data: launchpad::instruction::UnpauseSale {}.data(),
        }
    }

    pub fn update_parameters_ix(
        &self,
        signer: &Pubkey,
        new_price: Option<u64>,
        new_total_tokens: Option<u64>,
    ) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: self.configure_sale_accounts(signer),
            data: launchpad::instruction::UpdateParameters {
                new_price,
                new_total_tokens,
            }
            .data(),
        }
    }

    pub fn create_vesting_ix(
        &self,
        beneficiary: &Pubkey,
        amount: u64,
        release_time: i64,
    ) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: launchpad::accounts::CreateVesting {
                admin: self.admin.pubkey(),
                beneficiary: *beneficiary,
                sale: self.sale,
                vesting: vesting_address(&self.sale, beneficiary),
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: launchpad::instruction::CreateVesting {
                amount,
                release_time,
            }
            .data(),
        }
    }

    pub fn claim_vesting_ix(&self, beneficiary: &Pubkey, beneficiary_token_account: &Pubkey) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: launchpad::accounts::ClaimVesting {
                beneficiary: *beneficiary,
                sale: self.sale,
                vesting: vesting_address(&self.sale, beneficiary),
                mint: self.mint,
                token_vault: self.vault,
                beneficiary_token_account: *beneficiary_token_account,
                token_program: spl_token::ID,
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: launchpad::instruction::ClaimVesting {}.data(),
        }
    }

    pub fn get_sale_stats_ix(&self) -> Instruction {
        Instruction {
            program_id: launchpad::ID,
            accounts: launchpad::accounts::GetSaleStats { sale: self.sale }.to_account_metas(None),
            data: launchpad::instruction::GetSaleStats {}.data(),
        }
    }
}
