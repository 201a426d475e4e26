//! Withdraws a proportional slice of two pool assets. `shares` is expressed
//! in basis points of each pool reserve, so the pair's ratio is preserved.
//!
//! The pool keeps no record of who deposited what. Any signer may withdraw
//! up to the whole of both reserves; this is not a guarded withdrawal.
use pinocchio::{
    AccountView, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::errors::DexProgramError;
use crate::helpers::math_procs::pool_ops::share_of_reserve;
use crate::helpers::utils::{
    SignerAccount, TokenInterface, TokenProgram, TokenAccount, AssociatedTokenAccount,
};
use crate::pool::LiquidityPool;

pub struct RemoveLiquidityAccounts<'info> {
    pub payer: &'info AccountView,
    pub pool: &'info AccountView,
    pub mint_token_one: &'info AccountView,
    pub mint_token_two: &'info AccountView,
    // Pool reserves for each mint.(mutable)
    pub pool_token_account_one: &'info AccountView,
    pub pool_token_account_two: &'info AccountView,
    // Receiving accounts owned by the payer.(mutable)
    pub user_token_account_one: &'info AccountView,
    pub user_token_account_two: &'info AccountView,
    pub token_program: &'info AccountView,
}

impl<'info> TryFrom<&'info [AccountView]> for RemoveLiquidityAccounts<'info> {
    type Error = DexProgramError;
    fn try_from(accounts: &'info [AccountView]) -> Result<Self, Self::Error> {
        let [
            payer, pool, mint_token_one, mint_token_two,
            pool_token_account_one, pool_token_account_two,
            user_token_account_one, user_token_account_two,
            token_program, _rem_data @ ..
        ] = accounts else {
            return Err(DexProgramError::NotEnoughAccountKeys);
        };
        SignerAccount::check(payer)?;
        if mint_token_one.address().eq(mint_token_two.address()) {
            return Err(DexProgramError::DuplicateTokenNotAllowed);
        }
        LiquidityPool::check_address(pool)?;
        LiquidityPool::check(pool)?;
        TokenProgram::check(token_program)?;
        {
            let data = pool.try_borrow()?;
            if !LiquidityPool::contains_asset(&data, mint_token_one.address())?
                || !LiquidityPool::contains_asset(&data, mint_token_two.address())? {
                return Err(DexProgramError::UnknownAsset);
            }
        }
        AssociatedTokenAccount::check(pool_token_account_one, pool.address(), mint_token_one.address())?;
        AssociatedTokenAccount::check(pool_token_account_two, pool.address(), mint_token_two.address())?;
        AssociatedTokenAccount::check(user_token_account_one, payer.address(), mint_token_one.address())?;
        AssociatedTokenAccount::check(user_token_account_two, payer.address(), mint_token_two.address())?;

        Ok(Self {
            payer, pool, mint_token_one, mint_token_two,
            pool_token_account_one, pool_token_account_two,
            user_token_account_one, user_token_account_two,
            token_program,
        })
    }
}

pub struct RemoveLiquidityInstructionData {
    pub shares: u64,
}

impl<'info> TryFrom<&'info [u8]> for RemoveLiquidityInstructionData {
    type Error = DexProgramError;
    fn try_from(data: &'info [u8]) -> Result<Self, Self::Error> {
        let shares = data
            .try_into()
            .map(u64::from_le_bytes)
            .map_err(|_| DexProgramError::InvalidInstructionData)?;
        if shares == 0 || shares > LiquidityPool::MAX_SHARES_BPS {
            return Err(DexProgramError::InvalidInstructionData);
        }
        Ok(Self { shares })
    }
}

pub struct RemoveLiquidity<'info> {
    pub accounts: RemoveLiquidityAccounts<'info>,
    pub instruction_data: RemoveLiquidityInstructionData,
}

impl<'info> TryFrom<(&'info [u8], &'info [AccountView])> for RemoveLiquidity<'info> {
    type Error = DexProgramError;
    fn try_from((data, accounts): (&'info [u8], &'info [AccountView])) -> Result<Self, Self::Error> {
        let accounts = RemoveLiquidityAccounts::try_from(accounts)?;
        let instruction_data = RemoveLiquidityInstructionData::try_from(data)?;
        Ok(Self { accounts, instruction_data })
    }
}

impl<'info> RemoveLiquidity<'info> {
    pub const DISCRIMINATOR: &'info u8 = &2;

    pub fn process(&mut self) -> ProgramResult {
        let shares = self.instruction_data.shares;
        let amount_one = share_of_reserve(
            TokenInterface::amount(self.accounts.pool_token_account_one)?, shares,
        )?;
        let amount_two = share_of_reserve(
            TokenInterface::amount(self.accounts.pool_token_account_two)?, shares,
        )?;
        if amount_one == 0 || amount_two == 0 {
            return Err(DexProgramError::InsufficientFunds.into());
        }

        let bump_binding = {
            let data = self.accounts.pool.try_borrow()?;
            [LiquidityPool::from_bytes(&data)?.bump()]
        };
        let pool_signer_seeds = [
            Seed::from(LiquidityPool::SEED),
            Seed::from(&bump_binding),
        ];
        let signer_seeds = [Signer::from(&pool_signer_seeds)];

        TokenAccount::transfer_spl_tokens(
            self.accounts.pool_token_account_one,
            self.accounts.user_token_account_one,
            self.accounts.pool,
            amount_one,
            Some(&signer_seeds),
        )?;
        TokenAccount::transfer_spl_tokens(
            self.accounts.pool_token_account_two,
            self.accounts.user_token_account_two,
            self.accounts.pool,
            amount_two,
            Some(&signer_seeds),
        )?;
        log!("Removed liquidity: {} and {}", amount_one, amount_two);
        Ok(())
    }
}
