use crate::chain::{CallReceipt, ChainClient, ChainError, ContractCall};
use crate::config::DispatchParams;
use crate::message::{HyperlaneMessage, MESSAGE_VERSION};
use crate::resolver::ContractHandle;
use fuel_tx::Bytes32;
use fuels::types::{Bits256, Bytes};

pub const DISPATCH: &str = "dispatch";
pub const COUNT: &str = "count";

/// Builds the `dispatch` call for `params`.
///
/// Through the test recipient the body is passed as a `Vec<u8>`, and the mailbox is always
/// declared as an external contract since the recipient forwards to it. Without a recipient
/// the mailbox's own `dispatch(u32, b256, Bytes)` is called.
pub fn dispatch_call(
    mailbox: &ContractHandle,
    recipient: Option<&ContractHandle>,
    params: &DispatchParams,
) -> ContractCall {
    match recipient {
        Some(recipient) => ContractCall::new(recipient.id, DISPATCH)
            .arg(params.body.clone())
            .arg(Bits256(*mailbox.id))
            .arg(params.destination_domain)
            .arg(Bits256(*params.recipient))
            .with_external_contract(mailbox.id),
        None => ContractCall::new(mailbox.id, DISPATCH)
            .arg(params.destination_domain)
            .arg(Bits256(*params.recipient))
            .arg(Bytes(params.body.clone())),
    }
}

/// Submits the dispatch and waits for it to be committed. Never simulated: only a committed
/// transaction inserts the message into the mailbox.
pub async fn dispatch_message<C: ChainClient>(
    client: &C,
    mailbox: &ContractHandle,
    recipient: Option<&ContractHandle>,
    params: &DispatchParams,
) -> Result<CallReceipt, ChainError> {
    let call = dispatch_call(mailbox, recipient, params);
    client.submit(&call).await
}

/// Number of messages the mailbox has dispatched so far, which is also the next nonce.
pub async fn message_count<C: ChainClient>(
    client: &C,
    mailbox: &ContractHandle,
) -> Result<u32, ChainError> {
    client.simulate(&ContractCall::new(mailbox.id, COUNT)).await
}

/// The message the mailbox will emit for this dispatch if it is assigned `nonce`.
///
/// The sender is whoever calls the mailbox: the recipient contract when routed through it,
/// otherwise the signing account.
pub fn expected_message(
    mailbox: &ContractHandle,
    recipient: Option<&ContractHandle>,
    params: &DispatchParams,
    origin: u32,
    nonce: u32,
) -> HyperlaneMessage {
    let sender = match recipient {
        Some(recipient) => Bytes32::new(*recipient.id),
        None => Bytes32::new(*mailbox.account),
    };

    HyperlaneMessage {
        version: MESSAGE_VERSION,
        nonce,
        origin,
        sender,
        destination: params.destination_domain,
        recipient: params.recipient,
        body: params.body.clone(),
    }
}
