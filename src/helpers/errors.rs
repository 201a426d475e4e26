//! Defining the program's errors.
use pinocchio::error::ProgramError as P;

// All fields will be of type u32
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DexProgramError {
    InvalidInstructionData = 1,
    InvalidOwner = 2,
    Unauthorized = 3,
    InvalidAccountData = 4,
    InvalidAddress = 5,
    NotEnoughAccountKeys = 6,
    InvalidSignature = 7,
    // Liquidity pool errors.
    InsufficientFunds = 8,
    DuplicateTokenNotAllowed = 9,
    FailedToAddLiquidity = 10,
    OverflowOrUnderflowOccurred = 11,
    AlreadyInitialized = 12,
    UnknownAsset = 13,
    SlippageExceeded = 14,
}

impl From<DexProgramError> for P {
    fn from(e: DexProgramError) -> Self {
        P::Custom(e as u32)
    }
}

impl From<P> for DexProgramError {
    fn from(e: P) -> Self {
        match e {
            P::AccountBorrowFailed => DexProgramError::Unauthorized,
            P::MissingRequiredSignature => DexProgramError::InvalidSignature,
            P::InvalidInstructionData => DexProgramError::InvalidInstructionData,
            P::NotEnoughAccountKeys => DexProgramError::NotEnoughAccountKeys,
            P::ArithmeticOverflow => DexProgramError::OverflowOrUnderflowOccurred,
            P::InsufficientFunds => DexProgramError::InsufficientFunds,
            _ => DexProgramError::InvalidAccountData,
        }
    }
}
