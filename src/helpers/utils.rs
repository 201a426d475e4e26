//! Accounts creation and verification utilities.
//! Only the legacy SPL token program is supported.
use pinocchio::{
    AccountView, Address, ProgramResult,
    cpi::Signer, sysvars::{rent::Rent, Sysvar},
};
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer as SystemTransfer};
use pinocchio_token::instructions::Transfer;
use pinocchio_associated_token_account::instructions::CreateIdempotent;

use crate::helpers::errors::DexProgramError;

// Signer accounts checks.
pub struct SignerAccount;
impl SignerAccount {
    /// Confirm if account is signer or not.
    pub fn check(account: &AccountView) -> Result<(), DexProgramError> {
        if !account.is_signer() {
            return Err(DexProgramError::InvalidSignature);
        }
        Ok(())
    }
}

pub struct TokenProgram;
impl TokenProgram {
    pub fn check(account: &AccountView) -> Result<(), DexProgramError> {
        if account.address().ne(&pinocchio_token::ID) {
            return Err(DexProgramError::InvalidAddress);
        }
        Ok(())
    }
}

pub struct MintInterface;
impl MintInterface {
    pub fn check(account: &AccountView) -> Result<(), DexProgramError> {
        if !account.owned_by(&pinocchio_token::ID) {
            return Err(DexProgramError::InvalidOwner);
        }
        if account.data_len().ne(&pinocchio_token::state::Mint::LEN) {
            return Err(DexProgramError::InvalidAccountData);
        }
        Ok(())
    }
}

pub struct TokenInterface;
impl TokenInterface {
    pub fn check(account: &AccountView) -> Result<(), DexProgramError> {
        if !account.owned_by(&pinocchio_token::ID) {
            return Err(DexProgramError::InvalidOwner);
        }
        if account.data_len().ne(&pinocchio_token::state::TokenAccount::LEN) {
            return Err(DexProgramError::InvalidAccountData);
        }
        Ok(())
    }

    /// Token balance of an account already validated by `check`.
    pub fn amount(account: &AccountView) -> Result<u64, DexProgramError> {
        let data = account.try_borrow()?;
        let token_account = unsafe {
            pinocchio_token::state::TokenAccount::from_bytes_unchecked(&data)
        };
        Ok(token_account.amount())
    }
}

// TOKEN ACCOUNTS OPERATIONS. NOT DOING CHECKS. ITS HANDLED BY THE INTERFACES.
pub struct TokenAccount;
impl TokenAccount {
    pub fn transfer_spl_tokens(
        from: &AccountView, to: &AccountView,
        authority: &AccountView, amount: u64,
        signer_seeds: Option<&[Signer]>,
    ) -> ProgramResult {
        match signer_seeds {
            Some(seeds) => {
                Transfer {
                    from, to, authority, amount,
                }.invoke_signed(seeds)
            },
            None => {
                Transfer {
                    from, to, authority, amount
                }.invoke()
            }
        }
    }
}

pub struct AssociatedTokenAccount;
impl AssociatedTokenAccount {
    /// Derives the ATA of `authority` for `mint` under the legacy token program.
    pub fn find_address(authority: &Address, mint: &Address) -> Address {
        Address::find_program_address(
            &[authority.as_ref(), pinocchio_token::ID.as_ref(), mint.as_ref()],
            &pinocchio_associated_token_account::ID,
        ).0
    }

    pub fn check(
        account: &AccountView,
        authority: &Address,
        mint: &Address,
    ) -> Result<(), DexProgramError> {
        // Validate token account structure and owner
        TokenInterface::check(account)?;
        // Validating the PDA address.
        if Self::find_address(authority, mint).ne(account.address()) {
            return Err(DexProgramError::InvalidAddress);
        }
        Ok(())
    }

    pub fn init_if_needed(
        account: &AccountView,
        mint: &AccountView,
        payer: &AccountView,
        owner: &AccountView,
        system_program: &AccountView,
        token_program: &AccountView,
    ) -> Result<(), DexProgramError> {
        match Self::check(account, owner.address(), mint.address()) {
            Ok(_) => Ok(()),
            Err(_) => {
                CreateIdempotent {
                    funding_account: payer,
                    account,
                    wallet: owner,
                    mint,
                    system_program,
                    token_program,
                }.invoke()?;
                Self::check(account, owner.address(), mint.address())
            }
        }
    }
}

pub struct ProgramAccount;
impl ProgramAccount {
    pub fn init(
        payer: &AccountView, account: &AccountView,
        signer: &[Signer], space: usize
    ) -> ProgramResult {
        // Get required lamports for rent.
        let rent = Rent::get()?;
        let lamports = rent.try_minimum_balance(space)?;
        let owner = Address::from(crate::ID);
        let current = account.lamports();
        if current == 0 {
            CreateAccount {
                from: payer,
                to: account,
                lamports,
                space: space as u64,
                owner: &owner,
            }.invoke_signed(signer)?;
            return Ok(());
        }

        // CreateAccount rejects funded addresses, so a pre-funded PDA is
        // topped up, allocated and assigned instead.
        if lamports > current {
            SystemTransfer {
                from: payer,
                to: account,
                lamports: lamports - current,
            }.invoke()?;
        }
        Allocate {
            account,
            space: space as u64,
        }.invoke_signed(signer)?;
        Assign {
            account,
            owner: &owner,
        }.invoke_signed(signer)?;
        Ok(())
    }

    /// Grows or shrinks a program account, with `payer` covering any rent shortfall.
    pub fn reallocate(
        payer: &AccountView, account: &AccountView, new_space: usize,
    ) -> ProgramResult {
        let rent = Rent::get()?;
        let required = rent.try_minimum_balance(new_space)?;
        let current = account.lamports();
        if required > current {
            SystemTransfer {
                from: payer,
                to: account,
                lamports: required - current,
            }.invoke()?;
        }
        account.resize(new_space)?;
        Ok(())
    }
}
