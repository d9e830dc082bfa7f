use crate::{PublicKey, Signature};

/// Checks that a signature over a message was produced by the owner of a public key.
/// Implementations must be deterministic and free of side effects.
pub trait SignatureVerifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        (**self).verify(public_key, message, signature)
    }
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for Box<V> {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        (**self).verify(public_key, message, signature)
    }
}

/// Verifies Ed25519 signatures. Public keys are the 32-byte compressed points and signatures
/// the 64-byte encodings. Anything that doesn't decode fails verification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        let key_bytes = match <[u8; 32]>::try_from(public_key.as_bytes()) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let verifying_key = match ed25519_dalek::VerifyingKey::from_bytes(&key_bytes) {
            Ok(key) => key,
            Err(_) => return false,
        };
        match ed25519_dalek::Signature::from_slice(signature.as_bytes()) {
            Ok(signature) => verifying_key.verify_strict(message, &signature).is_ok(),
            Err(_) => false,
        }
    }
}
