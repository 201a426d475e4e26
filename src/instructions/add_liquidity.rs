//! Deposits `amount` tokens of a mint into the pool. The first deposit of a
//! mint registers it as a pool asset, growing the pool account by one slot.
//! The pool's associated token account is created on demand.
use pinocchio::{AccountView, ProgramResult};
use pinocchio_log::log;

use crate::helpers::errors::DexProgramError;
use crate::helpers::utils::{
    SignerAccount, MintInterface, TokenInterface, TokenProgram,
    TokenAccount, ProgramAccount, AssociatedTokenAccount,
};
use crate::pool::LiquidityPool;

pub struct AddLiquidityAccounts<'info> {
    // Liquidity provider. Signs the token transfer and funds any new accounts.
    pub payer: &'info AccountView,
    // The pool PDA.(mutable)
    pub pool: &'info AccountView,
    // Mint of the deposited token.
    pub mint: &'info AccountView,
    // Pool's associated token account for the mint. Created if missing.(mutable)
    pub pool_token_account: &'info AccountView,
    // Payer's associated token account for the mint.(mutable)
    pub payer_token_account: &'info AccountView,
    pub system_program: &'info AccountView,
    pub token_program: &'info AccountView,
    pub associated_token_program: &'info AccountView,
}

impl<'info> TryFrom<&'info [AccountView]> for AddLiquidityAccounts<'info> {
    type Error = DexProgramError;
    fn try_from(accounts: &'info [AccountView]) -> Result<Self, Self::Error> {
        let [
            payer, pool, mint, pool_token_account, payer_token_account,
            system_program, token_program, associated_token_program, _rem_data @ ..
        ] = accounts else {
            return Err(DexProgramError::NotEnoughAccountKeys);
        };
        SignerAccount::check(payer)?;
        LiquidityPool::check_address(pool)?;
        LiquidityPool::check(pool)?;
        MintInterface::check(mint)?;
        TokenProgram::check(token_program)?;
        AssociatedTokenAccount::check(payer_token_account, payer.address(), mint.address())?;

        Ok(Self {
            payer, pool, mint, pool_token_account, payer_token_account,
            system_program, token_program, associated_token_program,
        })
    }
}

pub struct AddLiquidityInstructionData {
    pub amount: u64,
}

impl<'a> TryFrom<&'a [u8]> for AddLiquidityInstructionData {
    type Error = DexProgramError;
    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        let amount = data
            .try_into()
            .map(u64::from_le_bytes)
            .map_err(|_| DexProgramError::InvalidInstructionData)?;
        if amount == 0 {
            return Err(DexProgramError::InvalidInstructionData);
        }
        Ok(Self { amount })
    }
}

pub struct AddLiquidity<'info> {
    pub accounts: AddLiquidityAccounts<'info>,
    pub instruction_data: AddLiquidityInstructionData,
}

impl<'info> TryFrom<(&'info [u8], &'info [AccountView])> for AddLiquidity<'info> {
    type Error = DexProgramError;
    fn try_from((data, accounts): (&'info [u8], &'info [AccountView])) -> Result<Self, Self::Error> {
        let accounts = AddLiquidityAccounts::try_from(accounts)?;
        let instruction_data = AddLiquidityInstructionData::try_from(data)?;
        Ok(Self { accounts, instruction_data })
    }
}

impl<'info> AddLiquidity<'info> {
    pub const DISCRIMINATOR: &'info u8 = &1;

    pub fn process(&mut self) -> ProgramResult {
        let amount = self.instruction_data.amount;
        if TokenInterface::amount(self.accounts.payer_token_account)? < amount {
            return Err(DexProgramError::InsufficientFunds.into());
        }

        AssociatedTokenAccount::init_if_needed(
            self.accounts.pool_token_account,
            self.accounts.mint,
            self.accounts.payer,
            self.accounts.pool,
            self.accounts.system_program,
            self.accounts.token_program,
        )?;

        self.register_asset()?;

        TokenAccount::transfer_spl_tokens(
            self.accounts.payer_token_account,
            self.accounts.pool_token_account,
            self.accounts.payer, // Wallet signer
            amount,
            None, // payer signs normally.
        ).map_err(|_| DexProgramError::FailedToAddLiquidity)?;
        log!("Added {} tokens of liquidity", amount);
        Ok(())
    }

    // Appends the mint to the pool assets unless it is already there.
    fn register_asset(&self) -> ProgramResult {
        let asset_count = {
            let data = self.accounts.pool.try_borrow()?;
            if LiquidityPool::contains_asset(&data, self.accounts.mint.address())? {
                return Ok(());
            }
            LiquidityPool::from_bytes(&data)?.asset_count()
        };

        let new_count = asset_count
            .checked_add(1)
            .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?;
        ProgramAccount::reallocate(
            self.accounts.payer,
            self.accounts.pool,
            LiquidityPool::account_size(new_count)?,
        )?;

        let mut data = self.accounts.pool.try_borrow_mut()?;
        LiquidityPool::push_asset(&mut data, self.accounts.mint.address())?;
        log!("Registered pool asset number {}", new_count as u64);
        Ok(())
    }
}
