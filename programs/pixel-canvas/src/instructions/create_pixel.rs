use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::events::PixelChanged;
use crate::state::{stake_total, Pixel, Vault};
use crate::ErrorCode;

/// Claim an unclaimed coordinate.
///
/// The pixel account is allocated at the address derived from the
/// coordinate, so a coordinate can only ever be claimed once: a concurrent
/// or repeated claim fails the `init` allocation with "already in use" and
/// the takeover path is the only way the cell changes hands afterwards.
/// Supplying a pixel address derived from a different coordinate fails the
/// seeds constraint before this handler runs.
///
/// The caller stakes `price_per_slot * num_slots` lamports into the vault
/// and holds the cell until `expiry_slot = current slot + num_slots`.
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
    let total = stake_total(price_per_slot, num_slots)?;
    let clock = Clock::get()?;

    // Stake moves into vault custody in the same transaction as the record
    // write; if anything below fails the runtime rolls the transfer back.
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        total,
    )?;

    let pixel = &mut ctx.accounts.pixel;
    pixel.pos_x = pos_x;
    pixel.pos_y = pos_y;
    pixel.col_r = col_r;
    pixel.col_g = col_g;
    pixel.col_b = col_b;
    pixel.bump = ctx.bumps.pixel;
    pixel.price_per_slot = price_per_slot;
    pixel.num_slots = num_slots;
    pixel.expiry_slot = clock
        .slot
        .checked_add(num_slots)
        .ok_or(ErrorCode::NumericOverflow)?;
    pixel.holder = ctx.accounts.user.key();

    msg!(
        "Pixel ({}, {}) claimed by {} for {} lamports until slot {}",
        pos_x,
        pos_y,
        pixel.holder,
        total,
        pixel.expiry_slot
    );

    emit!(PixelChanged::from(&**pixel));
    Ok(())
}

#[derive(Accounts)]
#[instruction(pos_x: u8, pos_y: u8)]
pub struct CreatePixel<'info> {
    #[account(
        init,
        payer = user,
        space = Pixel::LEN,
        seeds = [Pixel::SEED, [pos_x, pos_y].as_ref()],
        bump,
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

    pub system_program: Program<'info, System>,
}
