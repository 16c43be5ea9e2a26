use qbft_types::{OperatorId, SignatureOracle, Signature};

/// A [`SignatureOracle`] that stands in for BLS threshold signing in tests
/// (§1 Non-goals): `sign` returns the message bytes themselves as the
/// "signature" and `aggregate` concatenates its parts in signer order, so
/// assertions can check the oracle was driven correctly without any real
/// cryptography. `verify` mirrors that shape: a genuine signature over
/// `message_bytes` by `signers.len()` operators is `message_bytes` repeated
/// once per signer.
#[derive(Default)]
pub struct StubOracle;

impl SignatureOracle for StubOracle {
    fn sign(&self, message_bytes: &[u8]) -> Signature {
        Signature(message_bytes.to_vec())
    }

    fn verify(&self, message_bytes: &[u8], signers: &[OperatorId], signature: &Signature) -> bool {
        signature.0 == message_bytes.repeat(signers.len())
    }

    fn aggregate(&self, parts: &[(OperatorId, Signature)]) -> Signature {
        let mut ordered = parts.to_vec();
        ordered.sort_by_key(|(operator, _)| *operator);
        let mut bytes = Vec::new();
        for (_, signature) in ordered {
            bytes.extend(signature.0);
        }
        Signature(bytes)
    }
}
