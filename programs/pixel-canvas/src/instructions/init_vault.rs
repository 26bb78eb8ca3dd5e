use anchor_lang::prelude::*;

use crate::state::Vault;

/// Create the singleton vault that escrows every stake on the canvas.
///
/// The `init` constraint allocates the account at its derived address and
/// refuses to allocate over an address already in use, so a second call
/// fails inside the runtime before this handler runs. The first caller
/// becomes the vault owner, permanently.
pub fn init_vault(ctx: Context<InitVault>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;

    vault.owner = ctx.accounts.user.key();
    vault.bump = ctx.bumps.vault;

    msg!("Vault initialized, owner: {}", vault.owner);
    Ok(())
}

#[derive(Accounts)]
pub struct InitVault<'info> {
    #[account(
        init,
        payer = user,
        space = Vault::LEN,
        seeds = [Vault::SEED],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}
