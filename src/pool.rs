//! The liquidity pool account. A single pool lives at the PDA derived from
//! `LiquidityPool::SEED` and keeps the ordered list of token mints it holds.
//!
//! Layout: a fixed header followed by `asset_count` 32 byte mint addresses.
use pinocchio::{AccountView, Address};

use crate::helpers::errors::DexProgramError;

#[repr(C)]
pub struct LiquidityPool {
    state: u8, // Tracks the current status of the pool.
    bump: [u8; 1], // PDA pool account derivation bump seed.
    asset_count: [u8; 4], // Number of mints stored after the header.
}

#[repr(u8)]
pub enum PoolState {
    Uninitialized = 0u8,
    Initialized = 1u8,
}
impl From<PoolState> for u8 {
    fn from(state: PoolState) -> Self {
        state as u8
    }
}

pub type Asset = [u8; 32];

impl LiquidityPool {
    pub const SEED: &'static [u8] = b"liquidity_pool";
    pub const LEN: usize = size_of::<LiquidityPool>();
    pub const ASSET_LEN: usize = size_of::<Asset>();
    pub const INITIAL_ACCOUNT_SIZE: usize = Self::LEN;
    // Swap fee in basis points, taken from the input amount.
    pub const SWAP_FEE_BPS: u16 = 30;
    pub const MAX_SHARES_BPS: u64 = 10_000;

    /// Space needed to hold `asset_count` mints.
    pub fn account_size(asset_count: usize) -> Result<usize, DexProgramError> {
        asset_count
            .checked_mul(Self::ASSET_LEN)
            .and_then(|assets_len| assets_len.checked_add(Self::LEN))
            .ok_or(DexProgramError::OverflowOrUnderflowOccurred)
    }

    /// Derives the pool address and bump for `program_id`.
    pub fn find_address(program_id: &Address) -> (Address, u8) {
        Address::find_program_address(&[Self::SEED], program_id)
    }

    /// Confirms `account` sits at the pool PDA, returning the canonical bump.
    pub fn check_address(account: &AccountView) -> Result<u8, DexProgramError> {
        let (expected, bump) = Self::find_address(&Address::from(crate::ID));
        if expected.ne(account.address()) {
            return Err(DexProgramError::InvalidAddress);
        }
        Ok(bump)
    }

    /// Confirms the pool account is owned by this program and laid out correctly.
    pub fn check(account: &AccountView) -> Result<(), DexProgramError> {
        if !account.owned_by(&Address::from(crate::ID)) {
            return Err(DexProgramError::InvalidOwner);
        }
        let data = account.try_borrow()?;
        Self::from_bytes(&data)?;
        Ok(())
    }

    // ====================== READING DATA ===========================
    /// Validates the header and total length of raw pool data.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self, DexProgramError> {
        if bytes.len() < Self::LEN {
            return Err(DexProgramError::InvalidAccountData);
        }
        let pool = unsafe { Self::from_bytes_unchecked(bytes) };
        if pool.state() != u8::from(PoolState::Initialized) {
            return Err(DexProgramError::InvalidAccountData);
        }
        if Self::account_size(pool.asset_count())? != bytes.len() {
            return Err(DexProgramError::InvalidAccountData);
        }
        Ok(pool)
    }

    // Return LiquidityPool from given bytes.
    #[inline(always)]
    pub unsafe fn from_bytes_unchecked(bytes: &[u8]) -> &Self {
        &*(bytes.as_ptr() as *const LiquidityPool)
    }

    #[inline(always)]
    pub fn state(&self) -> u8 { self.state }
    #[inline(always)]
    pub fn bump(&self) -> u8 { self.bump[0] }
    #[inline(always)]
    pub fn asset_count(&self) -> usize { u32::from_le_bytes(self.asset_count) as usize }

    /// The registered mints, in insertion order.
    pub fn assets(bytes: &[u8]) -> Result<&[Asset], DexProgramError> {
        let pool = Self::from_bytes(bytes)?;
        let tail = &bytes[Self::LEN..];
        // `Asset` has an alignment of 1, any offset is valid.
        Ok(unsafe {
            core::slice::from_raw_parts(tail.as_ptr() as *const Asset, pool.asset_count())
        })
    }

    pub fn contains_asset(bytes: &[u8], asset: &Address) -> Result<bool, DexProgramError> {
        let asset = asset.to_bytes();
        Ok(Self::assets(bytes)?.iter().any(|stored| *stored == asset))
    }

    // =========================== WRITING DATA ====================
    #[inline(always)]
    pub unsafe fn from_bytes_unchecked_mut(bytes: &mut [u8]) -> &mut Self {
        &mut *(bytes.as_mut_ptr() as *mut LiquidityPool)
    }

    /// Writes a fresh, empty pool header.
    pub fn initialize(bytes: &mut [u8], bump: u8) -> Result<(), DexProgramError> {
        if bytes.len() != Self::INITIAL_ACCOUNT_SIZE {
            return Err(DexProgramError::InvalidAccountData);
        }
        let pool = unsafe { Self::from_bytes_unchecked_mut(bytes) };
        if pool.state == u8::from(PoolState::Initialized) {
            return Err(DexProgramError::AlreadyInitialized);
        }
        pool.state = PoolState::Initialized.into();
        pool.bump = [bump];
        pool.asset_count = 0u32.to_le_bytes();
        Ok(())
    }

    /// Appends `asset` into the slot freed by a reallocation. `bytes` must
    /// already be sized for `asset_count + 1` mints.
    pub fn push_asset(bytes: &mut [u8], asset: &Address) -> Result<(), DexProgramError> {
        if bytes.len() < Self::LEN {
            return Err(DexProgramError::InvalidAccountData);
        }
        let count = unsafe { Self::from_bytes_unchecked(bytes) }.asset_count();
        let new_count = count
            .checked_add(1)
            .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?;
        if Self::account_size(new_count)? != bytes.len() {
            return Err(DexProgramError::InvalidAccountData);
        }
        let new_count =
            u32::try_from(new_count).map_err(|_| DexProgramError::OverflowOrUnderflowOccurred)?;

        let offset = Self::account_size(count)?;
        bytes[offset..offset + Self::ASSET_LEN].copy_from_slice(asset.as_ref());
        let pool = unsafe { Self::from_bytes_unchecked_mut(bytes) };
        pool.asset_count = new_count.to_le_bytes();
        Ok(())
    }
}
