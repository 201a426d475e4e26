//! Creates the liquidity pool account at its PDA and stores the bump.
//! The pool starts without any registered assets.
use pinocchio::{
    AccountView, Address, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::errors::DexProgramError;
use crate::helpers::utils::{SignerAccount, ProgramAccount};
use crate::pool::LiquidityPool;

pub struct InitializeLiquidityPoolAccounts<'a> {
    // Pays for the pool account. Signer and mutable.
    pub payer: &'a AccountView,
    // The pool PDA being created. Must be mutable and empty.
    pub pool: &'a AccountView,
    pub system_program: &'a AccountView,
}

impl<'a> TryFrom<&'a [AccountView]> for InitializeLiquidityPoolAccounts<'a> {
    type Error = DexProgramError;
    fn try_from(accounts: &'a [AccountView]) -> Result<Self, Self::Error> {
        let [payer, pool, system_program, _rem_data @ ..] = accounts else {
            return Err(DexProgramError::NotEnoughAccountKeys);
        };
        SignerAccount::check(payer)?;
        // Re-initialization is rejected, the pool must not exist yet.
        if pool.owned_by(&Address::from(crate::ID)) || pool.data_len() != 0 {
            return Err(DexProgramError::AlreadyInitialized);
        }

        Ok(Self { payer, pool, system_program })
    }
}

pub struct InitializeLiquidityPool<'a> {
    pub accounts: InitializeLiquidityPoolAccounts<'a>,
    pub bump: u8,
}

impl<'a> TryFrom<(&'a [u8], &'a [AccountView])> for InitializeLiquidityPool<'a> {
    type Error = DexProgramError;
    fn try_from((data, accounts): (&'a [u8], &'a [AccountView])) -> Result<Self, Self::Error> {
        if !data.is_empty() {
            return Err(DexProgramError::InvalidInstructionData);
        }
        let accounts = InitializeLiquidityPoolAccounts::try_from(accounts)?;
        let bump = LiquidityPool::check_address(accounts.pool)?;
        Ok(Self { accounts, bump })
    }
}

impl<'a> InitializeLiquidityPool<'a> {
    pub const DISCRIMINATOR: &'a u8 = &0;

    pub fn process(&mut self) -> ProgramResult {
        let bump_binding = [self.bump];
        let pool_signer_seeds = [
            Seed::from(LiquidityPool::SEED),
            Seed::from(&bump_binding),
        ];
        let signer_seeds = [Signer::from(&pool_signer_seeds)];
        ProgramAccount::init(
            self.accounts.payer,
            self.accounts.pool,
            &signer_seeds,
            LiquidityPool::INITIAL_ACCOUNT_SIZE,
        )?;

        let mut data = self.accounts.pool.try_borrow_mut()?;
        LiquidityPool::initialize(&mut data, self.bump)?;
        log!("Liquidity pool created with bump {}", self.bump);
        Ok(())
    }
}
