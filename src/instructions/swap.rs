//! Swapping one pool asset for another along the constant product curve.
use pinocchio::{
    AccountView, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::errors::DexProgramError;
use crate::helpers::math_procs::pool_ops::quote_exact_in;
use crate::helpers::utils::{
    SignerAccount, TokenInterface, TokenProgram, TokenAccount, AssociatedTokenAccount,
};
use crate::pool::LiquidityPool;

pub struct SwapAccounts<'info> {
    pub user: &'info AccountView,
    pub pool: &'info AccountView,
    // Mint sold into the pool.
    pub mint_in: &'info AccountView,
    // Mint bought from the pool.
    pub mint_out: &'info AccountView,
    // Pool reserve receiving the input.(mutable)
    pub pool_token_account_in: &'info AccountView,
    // Pool reserve paying the output.(mutable)
    pub pool_token_account_out: &'info AccountView,
    // Sends the input token to the pool.(mutable)
    pub user_token_account_in: &'info AccountView,
    // Receives the output token from the pool.(mutable)
    pub user_token_account_out: &'info AccountView,
    // SPL token program account.
    pub token_program: &'info AccountView,
}

impl<'info> TryFrom<&'info [AccountView]> for SwapAccounts<'info> {
    type Error = DexProgramError;
    fn try_from(accounts: &'info [AccountView]) -> Result<Self, Self::Error> {
        let [
            user, pool, mint_in, mint_out,
            pool_token_account_in, pool_token_account_out,
            user_token_account_in, user_token_account_out,
            token_program, _rem_data @ ..
        ] = accounts else {
            return Err(DexProgramError::NotEnoughAccountKeys);
        };
        SignerAccount::check(user)?;
        if mint_in.address().eq(mint_out.address()) {
            return Err(DexProgramError::DuplicateTokenNotAllowed);
        }
        LiquidityPool::check_address(pool)?;
        LiquidityPool::check(pool)?;
        TokenProgram::check(token_program)?;
        {
            let data = pool.try_borrow()?;
            if !LiquidityPool::contains_asset(&data, mint_in.address())?
                || !LiquidityPool::contains_asset(&data, mint_out.address())? {
                return Err(DexProgramError::UnknownAsset);
            }
        }
        AssociatedTokenAccount::check(pool_token_account_in, pool.address(), mint_in.address())?;
        AssociatedTokenAccount::check(pool_token_account_out, pool.address(), mint_out.address())?;
        AssociatedTokenAccount::check(user_token_account_in, user.address(), mint_in.address())?;
        AssociatedTokenAccount::check(user_token_account_out, user.address(), mint_out.address())?;

        Ok(Self {
            user, pool, mint_in, mint_out,
            pool_token_account_in, pool_token_account_out,
            user_token_account_in, user_token_account_out,
            token_program,
        })
    }
}

pub struct SwapInstructionData {
    pub amount_in: u64,
    pub min_amount_out: u64,
}

impl<'info> TryFrom<&'info [u8]> for SwapInstructionData {
    type Error = DexProgramError;
    fn try_from(data: &'info [u8]) -> Result<Self, Self::Error> {
        if data.len() != size_of::<u64>() * 2 {
            return Err(DexProgramError::InvalidInstructionData);
        }
        let (amount_in, min_amount_out) = data.split_at(size_of::<u64>());
        let amount_in = amount_in
            .try_into()
            .map(u64::from_le_bytes)
            .map_err(|_| DexProgramError::InvalidInstructionData)?;
        let min_amount_out = min_amount_out
            .try_into()
            .map(u64::from_le_bytes)
            .map_err(|_| DexProgramError::InvalidInstructionData)?;

        if amount_in == 0 {
            return Err(DexProgramError::InvalidInstructionData);
        }

        Ok(Self { amount_in, min_amount_out })
    }
}

pub struct Swap<'info> {
    pub accounts: SwapAccounts<'info>,
    pub instruction_data: SwapInstructionData,
}

impl<'info> TryFrom<(&'info [u8], &'info [AccountView])> for Swap<'info> {
    type Error = DexProgramError;
    fn try_from((data, accounts): (&'info [u8], &'info [AccountView])) -> Result<Self, Self::Error> {
        let accounts = SwapAccounts::try_from(accounts)?;
        let instruction_data = SwapInstructionData::try_from(data)?;
        Ok(Self { accounts, instruction_data })
    }
}

impl<'info> Swap<'info> {
    pub const DISCRIMINATOR: &'info u8 = &3;

    pub fn process(&mut self) -> ProgramResult {
        let amount_in = self.instruction_data.amount_in;
        if TokenInterface::amount(self.accounts.user_token_account_in)? < amount_in {
            return Err(DexProgramError::InsufficientFunds.into());
        }

        let quote = quote_exact_in(
            TokenInterface::amount(self.accounts.pool_token_account_in)?,
            TokenInterface::amount(self.accounts.pool_token_account_out)?,
            amount_in,
            LiquidityPool::SWAP_FEE_BPS,
        )?;
        // Check for Slippage.
        if quote.amount_out < self.instruction_data.min_amount_out {
            return Err(DexProgramError::SlippageExceeded.into());
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
            self.accounts.user_token_account_in,
            self.accounts.pool_token_account_in,
            self.accounts.user,
            quote.amount_in,
            None,
        )?;
        TokenAccount::transfer_spl_tokens(
            self.accounts.pool_token_account_out,
            self.accounts.user_token_account_out,
            self.accounts.pool,
            quote.amount_out,
            Some(&signer_seeds),
        )?;
        log!("Swapped {} for {} (fee {})", quote.amount_in, quote.amount_out, quote.fee);
        Ok(())
    }
}
