use std::collections::BTreeSet;

use qbft_types::{Height, Message, MessageId, MsgType, OperatorId, Round, SignatureOracle, SignedMessage};

/// Build a single-signer [`SignedMessage`] as if `signer` sent it, signed
/// with `oracle`. Used to drive an instance under test with messages from
/// the *other* committee members, bypassing that instance's own signing.
pub fn signed_by(
    oracle: &dyn SignatureOracle,
    signer: OperatorId,
    msg_type: MsgType,
    height: Height,
    round: Round,
    id: MessageId,
    data: Vec<u8>,
) -> SignedMessage {
    let message = Message::new(msg_type, height, round, id, data);
    let signature = oracle.sign(&message.data);
    let mut signers = BTreeSet::new();
    signers.insert(signer);
    SignedMessage::new(message, signers, signature)
}
