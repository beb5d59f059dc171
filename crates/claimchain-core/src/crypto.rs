//! Cryptographic primitives for Claimchain.
//!
//! Addresses are hex-encoded Ed25519 public keys. A claim is admitted only
//! when its challenge message carries a valid signature from that key.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::CoreError;

/// The identity that owns claims.
///
/// The ledger treats it as an opaque string; [`Ed25519Verifier`] interprets
/// it as 64 hex characters encoding a public key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap an address string without interpreting it.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Derive the address for an Ed25519 public key.
    pub fn from_public_key(key: &VerifyingKey) -> Self {
        Self(hex::encode(key.to_bytes()))
    }

    /// Get the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the address as an Ed25519 public key.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, CoreError> {
        let bytes = hex::decode(&self.0).map_err(|_| CoreError::InvalidAddress(self.0.clone()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::InvalidAddress(self.0.clone()))?;
        VerifyingKey::from_bytes(&arr).map_err(|_| CoreError::InvalidAddress(self.0.clone()))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A 64-byte Ed25519 signature over a challenge message.
///
/// Serialized as a hex string so encoded claim bodies stay readable.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ClaimSignature(pub [u8; 64]);

impl ClaimSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidSignatureEncoding(e.to_string()))?;
        let arr: [u8; 64] = bytes.as_slice().try_into().map_err(|_| {
            CoreError::InvalidSignatureEncoding(format!("expected 64 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// The zero signature (never valid).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for ClaimSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimSignature({}...)", &self.to_hex()[..16])
    }
}

impl From<[u8; 64]> for ClaimSignature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl Serialize for ClaimSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ClaimSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Checks that a message was signed by the holder of an address.
///
/// Implementations must be pure: the same inputs always give the same answer.
pub trait SignatureVerifier: Send + Sync {
    /// Return `true` iff `signature` is a valid signature of `message` by `address`.
    fn verify(&self, message: &str, address: &Address, signature: &ClaimSignature) -> bool;
}

/// Ed25519 verification where the address is the hex-encoded public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &Address, signature: &ClaimSignature) -> bool {
        let Ok(key) = address.to_verifying_key() else {
            return false;
        };
        let sig = Signature::from_bytes(&signature.0);
        key.verify(message.as_bytes(), &sig).is_ok()
    }
}

/// A client keypair that can sign challenge messages.
///
/// Wallets are external to the ledger; this exists for fixtures and tools
/// that play the client role.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The address controlled by this keypair.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.signing_key.verifying_key())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> ClaimSignature {
        ClaimSignature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.address())
    }
}
