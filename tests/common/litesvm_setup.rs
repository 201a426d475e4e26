//! Setting up accounts. Every test will call this.
//! Instruction builders for the dex program live here too.
#![allow(dead_code)]
use litesvm::{
    types::{FailedTransactionMetadata, TransactionMetadata},
    LiteSVM,
};
use solana_program::program_pack::Pack; //Trait to enable Mint::LEN
use solana_sdk::{
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use solana_system_interface::instruction as system_instruction;
use solana_system_interface::program::ID as SYSTEM_PROGRAM_ID;
use spl_associated_token_account::{
    get_associated_token_address,
    instruction::create_associated_token_account,
    ID as ATA_PROGRAM_ID,
};
use spl_token::instruction as token_ix;
use spl_token::state::Account as TokenAccount;
use spl_token::state::Mint;
use spl_token::ID as TOKEN_PROGRAM_ID;

use dex::helpers::errors::DexProgramError;
use dex::pool::{Asset, LiquidityPool};

use crate::common::context::{DexTestContext, FundedPoolContext};

/// Loads the compiled program into a fresh LiteSVM. The program must be
/// built with `cargo build-sbf` before the tests are compiled.
pub fn setup_dex() -> DexTestContext {
    let bytes = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/target/deploy/dex.so"));
    let program_id = Pubkey::new_from_array(dex::ID);

    let mut svm = LiteSVM::new();
    svm.add_program(program_id, bytes).unwrap();
    let payer = Keypair::new();
    svm.airdrop(&payer.pubkey(), 100_000_000_000).unwrap();

    let (pool_pda, pool_bump) = Pubkey::find_program_address(
        &[LiquidityPool::SEED],
        &program_id,
    );

    DexTestContext { svm, program_id, payer, pool_pda, pool_bump }
}

/// `setup_dex` followed by a successful pool initialization.
pub fn setup_initialized_pool() -> DexTestContext {
    let mut ctx = setup_dex();
    let ix = initialize_liquidity_pool_ix(&ctx);
    let payer = ctx.payer.insecure_clone();
    send(&mut ctx.svm, ix, &payer).unwrap();
    ctx
}

/// Creates two mints, funds the payer, and deposits `reserve` of each into the pool.
pub fn setup_funded_pool(reserve: u64) -> (DexTestContext, FundedPoolContext) {
    let mut ctx = setup_initialized_pool();
    let payer = ctx.payer.insecure_clone();

    let mint_a = create_test_mint(&mut ctx.svm, &payer, 6);
    let mint_b = create_test_mint(&mut ctx.svm, &payer, 6);
    let payer_a_ata = create_ata(&mut ctx.svm, &payer, &mint_a, &payer.pubkey());
    let payer_b_ata = create_ata(&mut ctx.svm, &payer, &mint_b, &payer.pubkey());
    mint_tokens(&mut ctx.svm, &payer, &mint_a, &payer_a_ata, 1_000_000_000);
    mint_tokens(&mut ctx.svm, &payer, &mint_b, &payer_b_ata, 1_000_000_000);

    let ix = add_liquidity_ix(&ctx, &mint_a, reserve);
    send(&mut ctx.svm, ix, &payer).unwrap();
    let ix = add_liquidity_ix(&ctx, &mint_b, reserve);
    send(&mut ctx.svm, ix, &payer).unwrap();

    let pool_a_ata = get_associated_token_address(&ctx.pool_pda, &mint_a);
    let pool_b_ata = get_associated_token_address(&ctx.pool_pda, &mint_b);
    (ctx, FundedPoolContext {
        mint_a, mint_b, payer_a_ata, payer_b_ata, pool_a_ata, pool_b_ata,
    })
}

// ====================== INSTRUCTION BUILDERS =======================
pub fn initialize_liquidity_pool_ix(ctx: &DexTestContext) -> Instruction {
    Instruction::new_with_bytes(
        ctx.program_id,
        &[0u8], // initialize discriminator, no arguments.
        vec![
            AccountMeta::new(ctx.payer.pubkey(), true),
            AccountMeta::new(ctx.pool_pda, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
    )
}

pub fn add_liquidity_ix(ctx: &DexTestContext, mint: &Pubkey, amount: u64) -> Instruction {
    let mut data = vec![1u8];
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction::new_with_bytes(
        ctx.program_id,
        &data,
        vec![
            AccountMeta::new(ctx.payer.pubkey(), true),
            AccountMeta::new(ctx.pool_pda, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(get_associated_token_address(&ctx.pool_pda, mint), false),
            AccountMeta::new(get_associated_token_address(&ctx.payer.pubkey(), mint), false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ATA_PROGRAM_ID, false),
        ],
    )
}

pub fn remove_liquidity_ix(
    ctx: &DexTestContext, mint_one: &Pubkey, mint_two: &Pubkey, shares: u64,
) -> Instruction {
    let mut data = vec![2u8];
    data.extend_from_slice(&shares.to_le_bytes());

    Instruction::new_with_bytes(
        ctx.program_id,
        &data,
        vec![
            AccountMeta::new(ctx.payer.pubkey(), true),
            AccountMeta::new(ctx.pool_pda, false),
            AccountMeta::new_readonly(*mint_one, false),
            AccountMeta::new_readonly(*mint_two, false),
            AccountMeta::new(get_associated_token_address(&ctx.pool_pda, mint_one), false),
            AccountMeta::new(get_associated_token_address(&ctx.pool_pda, mint_two), false),
            AccountMeta::new(get_associated_token_address(&ctx.payer.pubkey(), mint_one), false),
            AccountMeta::new(get_associated_token_address(&ctx.payer.pubkey(), mint_two), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
    )
}

pub fn swap_ix(
    ctx: &DexTestContext, mint_in: &Pubkey, mint_out: &Pubkey,
    amount_in: u64, min_amount_out: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(1 + 8 * 2);
    data.push(3u8); // Swap discriminator (must match on-chain)
    data.extend_from_slice(&amount_in.to_le_bytes());
    data.extend_from_slice(&min_amount_out.to_le_bytes());

    Instruction::new_with_bytes(
        ctx.program_id,
        &data,
        vec![
            AccountMeta::new(ctx.payer.pubkey(), true),
            AccountMeta::new(ctx.pool_pda, false),
            AccountMeta::new_readonly(*mint_in, false),
            AccountMeta::new_readonly(*mint_out, false),
            AccountMeta::new(get_associated_token_address(&ctx.pool_pda, mint_in), false),
            AccountMeta::new(get_associated_token_address(&ctx.pool_pda, mint_out), false),
            AccountMeta::new(get_associated_token_address(&ctx.payer.pubkey(), mint_in), false),
            AccountMeta::new(get_associated_token_address(&ctx.payer.pubkey(), mint_out), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
    )
}

// ====================== TRANSACTIONS AND ACCOUNTS =======================
/// Sends `ix` signed by `payer` on a fresh blockhash, so identical
/// instructions can be replayed.
pub fn send(
    svm: &mut LiteSVM, ix: Instruction, payer: &Keypair,
) -> Result<TransactionMetadata, FailedTransactionMetadata> {
    svm.expire_blockhash();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&payer.pubkey()),
        &[payer],
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

/// Asserts a transaction failed with the given program error.
pub fn assert_dex_error(
    result: Result<TransactionMetadata, FailedTransactionMetadata>,
    expected: DexProgramError,
) {
    let failure = result.expect_err("transaction should have failed");
    assert_eq!(
        failure.err,
        TransactionError::InstructionError(0, InstructionError::Custom(expected as u32)),
    );
}

pub fn create_test_mint(svm: &mut LiteSVM, payer: &Keypair, decimals: u8) -> Pubkey {
    let mint = Keypair::new();
    let mint_space = Mint::LEN;
    let lamports = svm.minimum_balance_for_rent_exemption(mint_space);

    // Create mint account
    let create_account_ix = system_instruction::create_account(
        &payer.pubkey(),
        &mint.pubkey(),
        lamports,
        mint_space as u64,
        &TOKEN_PROGRAM_ID,
    );

    // Initialize mint
    let init_mint_ix = token_ix::initialize_mint2(
        &TOKEN_PROGRAM_ID,
        &mint.pubkey(),
        &payer.pubkey(),
        None,
        decimals,
    ).unwrap();

    let tx = Transaction::new_signed_with_payer(
        &[create_account_ix, init_mint_ix],
        Some(&payer.pubkey()),
        &[payer, &mint],
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx).unwrap();

    mint.pubkey()
}

pub fn create_ata(
    svm: &mut LiteSVM,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Pubkey {
    let ix = create_associated_token_account(
        &payer.pubkey(),
        owner,
        mint,
        &TOKEN_PROGRAM_ID,
    );
    send(svm, ix, payer).unwrap();
    get_associated_token_address(owner, mint)
}

pub fn mint_tokens(
    svm: &mut LiteSVM, authority: &Keypair, mint: &Pubkey,
    destination_ata: &Pubkey, amount: u64,
) {
    let ix = token_ix::mint_to(
        &TOKEN_PROGRAM_ID, mint, destination_ata,
        &authority.pubkey(), &[], amount,
    ).unwrap();
    send(svm, ix, authority).unwrap();
}

pub fn get_token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let acc = svm.get_account(token_account).unwrap();
    let token_acc = TokenAccount::unpack(&acc.data).unwrap();
    token_acc.amount
}

/// Raw pool account data as stored on chain.
pub fn fetch_pool_data(svm: &LiteSVM, pool: &Pubkey) -> Vec<u8> {
    svm.get_account(pool).expect("pool account should exist").data
}

pub fn fetch_pool_assets(svm: &LiteSVM, pool: &Pubkey) -> Vec<Asset> {
    let data = fetch_pool_data(svm, pool);
    LiquidityPool::assets(&data).unwrap().to_vec()
}
