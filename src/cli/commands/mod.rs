//! One module per subcommand.

pub mod key_gen;
pub mod pubkey;
pub mod seed_gen;
pub mod show;
