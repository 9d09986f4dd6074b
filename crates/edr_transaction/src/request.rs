mod eip1559;
mod eip2930;
mod legacy;

pub use self::{eip1559::Eip1559, eip2930::Eip2930, legacy::Legacy};
use crate::{signed::TypedTransaction, Address};

/// A transaction request and the sender's address, used for fake-signing
/// impersonated transactions where no real secret key is available.
#[derive(Clone, Debug)]
pub struct RequestAndSender<RequestT> {
    /// The transaction request.
    pub request: RequestT,
    /// The sender's address.
    pub sender: Address,
}

/// An unsigned transaction request, not yet committed to a specific
/// transaction type's wire encoding.
#[derive(Clone, Debug)]
pub enum TransactionRequest {
    /// A legacy (optionally EIP-155) transaction request.
    Legacy(Legacy),
    /// An EIP-2930 transaction request.
    Eip2930(Eip2930),
    /// An EIP-1559 transaction request.
    Eip1559(Eip1559),
}

impl TransactionRequest {
    /// Signs the request with the given secret key, producing a
    /// [`TypedTransaction`].
    pub fn sign(
        self,
        secret_key: &edr_signer::SecretKey,
    ) -> Result<TypedTransaction, edr_signer::SignatureError> {
        match self {
            Self::Legacy(request) => request.sign(secret_key).map(TypedTransaction::Legacy),
            Self::Eip2930(request) => request.sign(secret_key).map(TypedTransaction::Eip2930),
            Self::Eip1559(request) => request.sign(secret_key).map(TypedTransaction::Eip1559),
        }
    }

    /// Fake-signs the request for the given sender, for impersonation.
    pub fn fake_sign(self, sender: Address) -> TypedTransaction {
        match self {
            Self::Legacy(request) => TypedTransaction::Legacy(request.fake_sign(sender)),
            Self::Eip2930(request) => TypedTransaction::Eip2930(request.fake_sign(sender)),
            Self::Eip1559(request) => TypedTransaction::Eip1559(request.fake_sign(sender)),
        }
    }
}
