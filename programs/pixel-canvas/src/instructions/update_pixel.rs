use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::events::PixelChanged;
use crate::state::{debit_vault, stake_total, Pixel, Vault};
use crate::ErrorCode;

/// Take over an already-claimed coordinate.
///
/// The new total stake must strictly exceed the total the current holder
/// staked, whether or not that claim has expired; ties lose. The caller
/// names the current holder as the payout destination and must match the
/// holder recorded on the pixel exactly.
///
/// Payout policy: the outgoing holder is refunded their full previous total
/// stake out of the vault, and the vault keeps the incoming stake. The vault
/// therefore always holds exactly one active stake per claimed pixel on top
/// of its rent reserve.
pub fn update_pixel(
    ctx: Context<UpdatePixel>,
    col_r: u8,
    col_g: u8,
    col_b: u8,
    price_per_slot: u64,
    num_slots: u64,
) -> Result<()> {
    let new_total = stake_total(price_per_slot, num_slots)?;
    let current_total = ctx.accounts.pixel.total_stake()?;

    if new_total <= current_total {
        return err!(ErrorCode::StakeTooLow);
    }

    let clock = Clock::get()?;

    // New stake into vault custody.
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        new_total,
    )?;

    // Refund the outgoing holder. The vault is program-owned, so its
    // lamports are debited directly rather than through a CPI.
    let vault_info = ctx.accounts.vault.to_account_info();
    let holder_info = ctx.accounts.previous_holder.to_account_info();
    let vault_lamports = vault_info.lamports();
    let holder_lamports = holder_info.lamports();
    **vault_info.try_borrow_mut_lamports()? = debit_vault(vault_lamports, current_total)?;
    **holder_info.try_borrow_mut_lamports()? = holder_lamports
        .checked_add(current_total)
        .ok_or(ErrorCode::NumericOverflow)?;

    let pixel = &mut ctx.accounts.pixel;
    pixel.col_r = col_r;
    pixel.col_g = col_g;
    pixel.col_b = col_b;
    pixel.price_per_slot = price_per_slot;
    pixel.num_slots = num_slots;
    pixel.expiry_slot = clock
        .slot
        .checked_add(num_slots)
        .ok_or(ErrorCode::NumericOverflow)?;
    pixel.holder = ctx.accounts.user.key();

    msg!(
        "Pixel ({}, {}) taken over by {}: {} lamports beats {}",
        pixel.pos_x,
        pixel.pos_y,
        pixel.holder,
        new_total,
        current_total
    );

    emit!(PixelChanged::from(&**pixel));
    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePixel<'info> {
    /// The pixel must already exist; its address is re-derived from the
    /// coordinate stored in the record, so a forged or mismatched account
    /// fails the seeds check.
    #[account(
        mut,
        seeds = [Pixel::SEED, [pixel.pos_x, pixel.pos_y].as_ref()],
        bump = pixel.bump,
    )]
    pub pixel: Account<'info, Pixel>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [Vault::SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: payout destination, required to be the holder currently
    /// recorded on the pixel
    #[account(
        mut,
        constraint = previous_holder.key() == pixel.holder @ ErrorCode::HolderMismatch,
    )]
    pub previous_holder: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
