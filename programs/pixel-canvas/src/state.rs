use anchor_lang::prelude::*;

use crate::ErrorCode;

/// Singleton escrow vault, stored at PDA seeds `[b"vault"]`
///
/// Custodies every active stake on the canvas. Beyond its rent-exempt
/// reserve, the vault balance always equals the sum of the total stakes of
/// all currently claimed pixels: a claim deposits its full stake, a takeover
/// deposits the new stake and refunds the old one.
#[account]
pub struct Vault {
    /// The account that initialized the vault. Set once, never changed.
    pub owner: Pubkey,
    /// Canonical bump for cheap PDA re-derivation
    pub bump: u8,
}

impl Vault {
    pub const SEED: &'static [u8] = b"vault";

    /// Space required for this account
    /// 8 bytes discriminator + 32 bytes pubkey + 1 byte bump
    pub const LEN: usize = 8 + 32 + 1;

    /// Derive the vault's address and bump for a program id.
    pub fn find_address(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED], program_id)
    }
}

/// One canvas cell, stored at PDA seeds `[b"pixel", [pos_x, pos_y]]`
///
/// The coordinate is baked into the address derivation, so no two
/// coordinates can share an account and a pixel account always matches the
/// coordinate stored in it. Created once per coordinate on the first claim;
/// thereafter only ever overwritten in place by takeovers, never re-created.
#[account]
pub struct Pixel {
    /// X coordinate, fixed at creation
    pub pos_x: u8,
    /// Y coordinate, fixed at creation
    pub pos_y: u8,
    /// Red channel
    pub col_r: u8,
    /// Green channel
    pub col_g: u8,
    /// Blue channel
    pub col_b: u8,
    /// Canonical bump for cheap PDA re-derivation
    pub bump: u8,
    /// Lamports the current holder staked per slot
    pub price_per_slot: u64,
    /// Number of slots the current holder staked for
    pub num_slots: u64,
    /// Absolute slot at which the current claim expires
    pub expiry_slot: u64,
    /// The account currently controlling this coordinate
    pub holder: Pubkey,
}

impl Pixel {
    pub const SEED: &'static [u8] = b"pixel";

    /// Space required for this account
    /// 8 bytes discriminator + 2 coords + 3 colors + 1 bump + 3 u64 + 32 holder
    pub const LEN: usize = 8 + 2 + 3 + 1 + (3 * 8) + 32;

    /// Derive the address and bump of the pixel account for a coordinate.
    pub fn find_address(program_id: &Pubkey, pos_x: u8, pos_y: u8) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, &[pos_x, pos_y]], program_id)
    }

    /// The total stake the current holder committed for this pixel.
    pub fn total_stake(&self) -> std::result::Result<u64, ErrorCode> {
        self.price_per_slot
            .checked_mul(self.num_slots)
            .ok_or(ErrorCode::NumericOverflow)
    }
}

/// Validate stake terms and return the total stake in lamports.
///
/// Both the price and the slot count must be at least 1; the product must
/// fit in a u64. Used by both the claim and the takeover path, before any
/// lamports move.
pub fn stake_total(price_per_slot: u64, num_slots: u64) -> std::result::Result<u64, ErrorCode> {
    if price_per_slot < 1 {
        return Err(ErrorCode::InvalidPricePerSlot);
    }
    if num_slots < 1 {
        return Err(ErrorCode::InvalidSlotCount);
    }
    price_per_slot
        .checked_mul(num_slots)
        .ok_or(ErrorCode::NumericOverflow)
}

/// Compute the vault balance left after refunding a stake.
///
/// The vault custodies every active stake, so a shortfall here means the
/// escrow invariant is broken; it is reported as its own condition rather
/// than a generic arithmetic failure.
pub fn debit_vault(balance: u64, refund: u64) -> std::result::Result<u64, ErrorCode> {
    balance
        .checked_sub(refund)
        .ok_or(ErrorCode::VaultUnderfunded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_at(pos_x: u8, pos_y: u8, price_per_slot: u64, num_slots: u64) -> Pixel {
        Pixel {
            pos_x,
            pos_y,
            col_r: 0,
            col_g: 0,
            col_b: 255,
            bump: 255,
            price_per_slot,
            num_slots,
            expiry_slot: 0,
            holder: Pubkey::new_unique(),
        }
    }

    #[test]
    fn stake_total_rejects_zero_price() {
        assert!(matches!(
            stake_total(0, 10),
            Err(ErrorCode::InvalidPricePerSlot)
        ));
    }

    #[test]
    fn stake_total_rejects_zero_slots() {
        assert!(matches!(stake_total(5, 0), Err(ErrorCode::InvalidSlotCount)));
    }

    #[test]
    fn stake_total_rejects_overflow() {
        assert!(matches!(
            stake_total(u64::MAX, 2),
            Err(ErrorCode::NumericOverflow)
        ));
    }

    #[test]
    fn stake_total_multiplies() {
        assert!(matches!(stake_total(1, 10), Ok(10)));
        assert!(matches!(stake_total(2, 10), Ok(20)));
    }

    #[test]
    fn outbid_comparison_is_strict() {
        // A pixel claimed at 1 lamport for 10 slots holds a total stake of 10.
        let current = pixel_at(10, 10, 1, 10).total_stake().unwrap();
        assert_eq!(current, 10);

        // 2 * 10 = 20 beats it; 2 * 2 = 4 does not; 1 * 10 = 10 ties and
        // must also lose.
        assert!(stake_total(2, 10).unwrap() > current);
        assert!(stake_total(2, 2).unwrap() <= current);
        assert!(stake_total(1, 10).unwrap() <= current);
    }

    #[test]
    fn debit_vault_flags_shortfall() {
        assert!(matches!(debit_vault(30, 10), Ok(20)));
        assert!(matches!(debit_vault(10, 10), Ok(0)));
        assert!(matches!(debit_vault(9, 10), Err(ErrorCode::VaultUnderfunded)));
    }

    #[test]
    fn pixel_addresses_are_deterministic() {
        let program_id = Pubkey::new_unique();
        let (a, bump_a) = Pixel::find_address(&program_id, 10, 10);
        let (b, bump_b) = Pixel::find_address(&program_id, 10, 10);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }

    #[test]
    fn distinct_coordinates_get_distinct_addresses() {
        let program_id = Pubkey::new_unique();
        let (a, _) = Pixel::find_address(&program_id, 10, 10);
        let (b, _) = Pixel::find_address(&program_id, 10, 11);
        let (c, _) = Pixel::find_address(&program_id, 11, 10);
        assert_ne!(a, b);
        assert_ne!(a, c);
        // (x, y) is ordered: (1, 2) and (2, 1) are different cells.
        let (d, _) = Pixel::find_address(&program_id, 1, 2);
        let (e, _) = Pixel::find_address(&program_id, 2, 1);
        assert_ne!(d, e);
    }

    #[test]
    fn vault_and_pixel_namespaces_do_not_collide() {
        let program_id = Pubkey::new_unique();
        let (vault, _) = Vault::find_address(&program_id);
        for coord in [0u8, 1, 127, 255] {
            let (pixel, _) = Pixel::find_address(&program_id, coord, coord);
            assert_ne!(vault, pixel);
        }
    }

    #[test]
    fn account_space_matches_layout() {
        assert_eq!(Vault::LEN, 41);
        assert_eq!(Pixel::LEN, 70);
    }
}
