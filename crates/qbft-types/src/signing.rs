use crate::share::OperatorId;
use crate::signed_message::Signature;

/// The BLS threshold-signing collaborator (§1 Non-goals: "generating or
/// verifying BLS threshold signatures from scratch" is treated as an
/// oracle, not implemented here).
///
/// A `SignatureOracle` signs this operator's share of a message and
/// verifies/aggregates signatures produced by other operators. The core
/// never inspects signature bytes itself.
pub trait SignatureOracle: Send + Sync {
    /// Produce this operator's partial signature over `message_bytes`.
    fn sign(&self, message_bytes: &[u8]) -> Signature;

    /// Verify that `signature` is a valid aggregate of the given signers
    /// over `message_bytes`.
    fn verify(&self, message_bytes: &[u8], signers: &[OperatorId], signature: &Signature) -> bool;

    /// Aggregate multiple single-signer signatures into one signature
    /// attributed to the union of their signers.
    fn aggregate(&self, parts: &[(OperatorId, Signature)]) -> Signature;
}
