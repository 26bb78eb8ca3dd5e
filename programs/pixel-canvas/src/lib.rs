use anchor_lang::prelude::*;

declare_id!("5wverGuNkKAs6FQbQ741Ht58W4FsmLBXSvmLJSjBhMAG");

pub mod events;
pub mod instructions;
pub mod state;

pub use events::*;
pub use instructions::*;
pub use state::*;

/// A contestable pixel canvas.
///
/// Every coordinate on a 256x256 grid lives at its own program-derived
/// address. Claiming a free coordinate stakes lamports into a shared vault
/// for a number of slots; anyone can take the coordinate over later by
/// staking a strictly larger total, which refunds the incumbent. Each
/// committed claim or takeover emits one `PixelChanged` event.
#[program]
pub mod pixel_canvas {
    use super::*;

    /// One-time creation of the singleton vault that escrows all stakes.
    /// Fails if the vault already exists.
    pub fn init_vault(ctx: Context<InitVault>) -> Result<()> {
        instructions::init_vault(ctx)
    }

    /// Claim an unclaimed coordinate, staking
    /// `price_per_slot * num_slots` lamports into the vault.
    /// Fails if the coordinate already has a pixel account.
    pub fn create_pixel(
        ctx: Context<CreatePixel>,
        pos_x: u8,
        pos_y: u8,
        col_r: u8,
        col_g: u8,
        col_b: u8,
        price_per_slot: u64,
        num_slots: u64,
    ) -> Result<()> {
        instructions::create_pixel(
            ctx,
            pos_x,
            pos_y,
            col_r,
            col_g,
            col_b,
            price_per_slot,
            num_slots,
        )
    }

    /// Take over an already-claimed coordinate. The new total stake must
    /// strictly exceed the current holder's total stake; the current holder
    /// is paid back out of the vault.
    pub fn update_pixel(
        ctx: Context<UpdatePixel>,
        col_r: u8,
        col_g: u8,
        col_b: u8,
        price_per_slot: u64,
        num_slots: u64,
    ) -> Result<()> {
        instructions::update_pixel(ctx, col_r, col_g, col_b, price_per_slot, num_slots)
    }
}

#[error_code]
pub enum ErrorCode {
    #[msg("Price per slot must be at least 1 lamport")]
    InvalidPricePerSlot,
    #[msg("Number of slots must be at least 1")]
    InvalidSlotCount,
    #[msg("Stake arithmetic overflowed")]
    NumericOverflow,
    #[msg("Total stake does not exceed the current holder's total stake")]
    StakeTooLow,
    #[msg("Payout account does not match the pixel's recorded holder")]
    HolderMismatch,
    #[msg("Vault balance is insufficient to refund the previous holder")]
    VaultUnderfunded,
}
