//! This is the program's entrypoint.
#![cfg_attr(not(feature = "std"), no_std)]

use pinocchio::{
    Address, AccountView, ProgramResult, error::ProgramError,
};
use pinocchio_pubkey::declare_id;

pub mod helpers;
pub mod instructions;
pub mod pool;
use instructions::{
    initialize_liquidity_pool::InitializeLiquidityPool,
    add_liquidity::AddLiquidity,
    remove_liquidity::RemoveLiquidity,
    swap::Swap,
};

declare_id!("HHtpy5cez4guhvwoXVCZzo8EUce6ouJyXaxZ7r9CVR24");

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instructions);

pub fn process_instructions(
    _program_id: &Address,
    accounts: &[AccountView],
    instruction_data: &[u8]
) -> ProgramResult {
    match instruction_data.split_first() {
        Some((InitializeLiquidityPool::DISCRIMINATOR, data)) => {
            InitializeLiquidityPool::try_from((data, accounts))?.process()
        }
        Some((AddLiquidity::DISCRIMINATOR, data)) => AddLiquidity::try_from((data, accounts))?.process(),
        Some((RemoveLiquidity::DISCRIMINATOR, data)) => RemoveLiquidity::try_from((data, accounts))?.process(),
        Some((Swap::DISCRIMINATOR, data)) => Swap::try_from((data, accounts))?.process(),
        _ => Err(ProgramError::InvalidInstructionData),
    }
}
