use anchor_lang::prelude::*;

use crate::state::Pixel;

/// Emitted exactly once per committed claim or takeover, carrying the
/// post-commit state of the pixel. Failed instructions emit nothing; the
/// runtime discards the log along with the rest of the transaction.
#[event]
pub struct PixelChanged {
    pub pos_x: u8,
    pub pos_y: u8,
    pub col_r: u8,
    pub col_g: u8,
    pub col_b: u8,
    pub price_per_slot: u64,
    pub expiry_slot: u64,
    pub holder: Pubkey,
}

impl From<&Pixel> for PixelChanged {
    fn from(pixel: &Pixel) -> Self {
        Self {
            pos_x: pixel.pos_x,
            pos_y: pixel.pos_y,
            col_r: pixel.col_r,
            col_g: pixel.col_g,
            col_b: pixel.col_b,
            price_per_slot: pixel.price_per_slot,
            expiry_slot: pixel.expiry_slot,
            holder: pixel.holder,
        }
    }
}
