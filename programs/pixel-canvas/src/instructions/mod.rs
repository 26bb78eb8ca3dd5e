pub mod create_pixel;
pub mod init_vault;
pub mod update_pixel;

pub use create_pixel::*;
pub use init_vault::*;
pub use update_pixel::*;
