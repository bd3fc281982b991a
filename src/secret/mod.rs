//! Secret material and where it comes from.
//!
//! - `SecretMaterial`, `SecretKind` and `ResolutionSource` (`material`)
//! - `SecretResolver` and the generators it falls back to (`resolver`)

pub mod material;
pub mod resolver;

pub use material::{ResolutionSource, Resolved, SecretKind, SecretMaterial};
pub use resolver::{
    FixedGenerator, MnemonicGenerator, RandomKeyGenerator, ResolveRequest, SecretGenerator,
    SecretResolver, SeedDerivedKeyGenerator,
};

/// Drop one trailing `\n` or `\r\n`.
pub(crate) fn strip_line_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
