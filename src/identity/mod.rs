//! Nostr identity helpers.
//!
//! Thin adapters over the ecosystem crates that own the actual
//! cryptography:
//! - BIP-39 mnemonics (`bip39`)
//! - NIP-06 key derivation along `m/44'/1237'/<account>'/0/0` (`bip32`)
//! - BIP-340 x-only public keys (`k256`)
//! - `npub` / `nsec` bech32 encoding (`bech32`)

use bech32::{Bech32, Hrp};
use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use k256::schnorr::SigningKey;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{NostrVaultError, Result};

/// Entropy for freshly generated mnemonics (256 bits, 24 words).
const MNEMONIC_ENTROPY_LEN: usize = 32;

/// SLIP-44 coin type registered for nostr.
const NOSTR_COIN_TYPE: u32 = 1237;

const NPUB_HRP: &str = "npub";
const NSEC_HRP: &str = "nsec";

/// A 32-byte secp256k1 secret key, zeroed on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct PrivateKey {
    bytes: [u8; 32],
}

impl PrivateKey {
    /// Wrap raw bytes, rejecting values that are not a valid scalar.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        SigningKey::from_bytes(&bytes).map_err(|_| {
            NostrVaultError::Validation("private key is not a valid secp256k1 scalar".into())
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Lowercase hex encoding, the form persisted in key vaults.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Generate a new 24-word English mnemonic from fresh entropy.
pub fn generate_mnemonic() -> Result<Zeroizing<String>> {
    let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_LEN]);
    rand::rng().fill_bytes(&mut entropy[..]);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..])
        .map_err(|e| NostrVaultError::Identity(format!("mnemonic generation failed: {e}")))?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Check a phrase against the English word list and its checksum.
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    parse_mnemonic(phrase).map(|_| ())
}

fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    Mnemonic::parse_in_normalized(Language::English, phrase.trim())
        .map_err(|e| NostrVaultError::Validation(format!("invalid seed phrase: {e}")))
}

/// Derive the nostr private key for `account` from a mnemonic (NIP-06).
pub fn private_key_from_mnemonic(phrase: &str, account: u32) -> Result<PrivateKey> {
    let mnemonic = parse_mnemonic(phrase)?;
    let seed = Zeroizing::new(mnemonic.to_seed_normalized(""));

    let path: DerivationPath = format!("m/44'/{NOSTR_COIN_TYPE}'/{account}'/0/0")
        .parse()
        .map_err(|e| NostrVaultError::Identity(format!("invalid derivation path: {e}")))?;

    let xprv = XPrv::derive_from_path(&seed[..], &path)
        .map_err(|e| NostrVaultError::Identity(format!("key derivation failed: {e}")))?;

    let bytes: [u8; 32] = xprv.private_key().to_bytes().into();
    PrivateKey::from_bytes(bytes)
}

/// Generate a random private key.
pub fn generate_private_key() -> Result<PrivateKey> {
    let mut bytes = [0u8; 32];
    // Out-of-range scalars are astronomically rare; draw again if one shows up.
    loop {
        rand::rng().fill_bytes(&mut bytes);
        if let Ok(key) = PrivateKey::from_bytes(bytes) {
            bytes.zeroize();
            return Ok(key);
        }
    }
}

/// Parse a private key written as 64 hex characters or as `nsec1…`.
pub fn parse_private_key(text: &str) -> Result<PrivateKey> {
    let text = text.trim();

    let mut decoded = if text.starts_with(NSEC_HRP) {
        let (hrp, data) = bech32::decode(text)
            .map_err(|e| NostrVaultError::Validation(format!("invalid nsec encoding: {e}")))?;
        if hrp.as_str() != NSEC_HRP {
            return Err(NostrVaultError::Validation(format!(
                "expected an nsec key, got prefix '{hrp}'"
            )));
        }
        data
    } else {
        hex::decode(text).map_err(|_| {
            NostrVaultError::Validation("private key must be 64 hex characters or nsec1…".into())
        })?
    };

    let result = <[u8; 32]>::try_from(decoded.as_slice())
        .map_err(|_| {
            NostrVaultError::Validation(format!(
                "private key must be 32 bytes, got {}",
                decoded.len()
            ))
        })
        .and_then(PrivateKey::from_bytes);
    decoded.zeroize();
    result
}

/// The BIP-340 x-only public key for `key`.
pub fn public_key(key: &PrivateKey) -> Result<[u8; 32]> {
    let signing = SigningKey::from_bytes(key.as_bytes())
        .map_err(|e| NostrVaultError::Identity(format!("invalid private key: {e}")))?;
    Ok(signing.verifying_key().to_bytes().into())
}

/// Encode a public key as `npub1…`.
pub fn encode_npub(public_key: &[u8; 32]) -> Result<String> {
    encode_bech32(NPUB_HRP, public_key)
}

/// Encode a private key as `nsec1…`.
pub fn encode_nsec(key: &PrivateKey) -> Result<Zeroizing<String>> {
    encode_bech32(NSEC_HRP, key.as_bytes()).map(Zeroizing::new)
}

fn encode_bech32(hrp: &str, data: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| NostrVaultError::Identity(format!("invalid bech32 prefix: {e}")))?;
    bech32::encode::<Bech32>(hrp, data)
        .map_err(|e| NostrVaultError::Identity(format!("bech32 encoding failed: {e}")))
}
