//! A `Wallet` is a wrapper around an ethers local wallet that owns the smart account and signs
//! user operations and EIP-7702 authorizations
use crate::{authorization::Eip7702Auth, authorization_hash, UserOperationSigned};
use ethers::{
    prelude::{k256::ecdsa::SigningKey, rand},
    signers::{LocalWallet, Signer},
    types::{Address, Bytes},
    utils::hex,
};
use tracing::debug;

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Builds a `Wallet` from a randomly generated private key
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance
    pub fn build_random() -> Self {
        let mut rng = rand::thread_rng();
        Self { signer: LocalWallet::new(&mut rng) }
    }

    /// Create a new wallet from a hex encoded private key (with or without `0x` prefix)
    ///
    /// # Arguments
    /// * `private_key` - The private key
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance
    pub fn from_private_key(private_key: &str) -> eyre::Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let bytes = hex::decode(key)?;
        if bytes.len() != 32 {
            eyre::bail!("Private key must be 32 bytes, got {}", bytes.len());
        }
        let signer = LocalWallet::from_bytes(&bytes)?;
        Ok(Self { signer })
    }

    /// Address of the EOA owning the key
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The private key as `0x`-prefixed hex
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signer.signer().to_bytes()))
    }

    /// Signs the user operation
    ///
    /// The ECDSA validator checks an EIP-191 signature over the user operation hash.
    ///
    /// # Arguments
    /// * `uo` - The [UserOperationSigned](UserOperationSigned) to be signed
    /// * `ep` - The entry point contract address
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `Bytes` - The 65 bytes signature
    pub async fn sign_user_operation(
        &self,
        uo: &UserOperationSigned,
        ep: &Address,
        chain_id: u64,
    ) -> eyre::Result<Bytes> {
        let h = uo.hash(ep, chain_id);
        let sig = self.signer.sign_message(h.as_fixed_bytes()).await?;
        Ok(sig.to_vec().into())
    }

    /// Signs an EIP-7702 authorization delegating this EOA to `contract`
    ///
    /// # Arguments
    /// * `chain_id` - The chain the authorization is valid on
    /// * `contract` - The implementation the EOA delegates to
    /// * `nonce` - The EOA nonce the authorization will be processed with
    pub fn sign_authorization(
        &self,
        chain_id: u64,
        contract: Address,
        nonce: u64,
    ) -> eyre::Result<Eip7702Auth> {
        let hash = authorization_hash(chain_id, contract, nonce);
        let sig = self.signer.sign_hash(hash)?;
        debug!("Signed EIP-7702 authorization for {:?} (nonce {nonce})", self.address());
        Ok(Eip7702Auth::from_signature(chain_id, contract, nonce, sig))
    }
}
