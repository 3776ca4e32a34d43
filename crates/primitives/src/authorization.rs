//! EIP-7702 authorization support

use crate::{constants::eip7702::MAGIC, utils::as_checksum_addr};
use ethers::{
    types::{Address, Signature, H256, U256, U64},
    utils::{keccak256, rlp::RlpStream},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("invalid authorization signature: {0}")]
    Signature(String),

    #[error("authorization signed by {recovered:?}, expected {expected:?}")]
    WrongAuthority { recovered: Address, expected: Address },
}

/// Signed authorization tuple delegating an EOA to a contract implementation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip7702Auth {
    /// The chain ID of the authorization (0 means any chain)
    pub chain_id: U64,
    /// The contract the EOA delegates to
    #[serde(serialize_with = "as_checksum_addr")]
    pub address: Address,
    /// The nonce of the EOA at the time the authorization is processed
    pub nonce: U64,
    pub y_parity: U64,
    pub r: U256,
    pub s: U256,
}

/// `keccak256(0x05 || rlp([chain_id, address, nonce]))`
pub fn authorization_hash(chain_id: u64, address: Address, nonce: u64) -> H256 {
    let mut stream = RlpStream::new_list(3);
    stream.append(&chain_id);
    stream.append(&address);
    stream.append(&nonce);

    let mut buf = vec![MAGIC];
    buf.extend_from_slice(&stream.out());
    keccak256(buf).into()
}

impl Eip7702Auth {
    /// Builds the authorization from the signature over [authorization_hash]
    pub fn from_signature(chain_id: u64, address: Address, nonce: u64, sig: Signature) -> Self {
        Self {
            chain_id: chain_id.into(),
            address,
            nonce: nonce.into(),
            // legacy `v` (27/28) or bare parity (0/1)
            y_parity: U64::from(if sig.v >= 27 { sig.v - 27 } else { sig.v }),
            r: sig.r,
            s: sig.s,
        }
    }

    /// Hash that was signed by the authority
    pub fn signing_hash(&self) -> H256 {
        authorization_hash(self.chain_id.as_u64(), self.address, self.nonce.as_u64())
    }

    /// Recovers the EOA that signed the authorization
    pub fn recover_authority(&self) -> Result<Address, AuthorizationError> {
        let parity = self.y_parity.as_u64();
        if parity > 1 {
            return Err(AuthorizationError::Signature(format!("y parity {parity} is not 0 or 1")));
        }
        let sig = Signature { r: self.r, s: self.s, v: parity + 27 };
        sig.recover(self.signing_hash())
            .map_err(|err| AuthorizationError::Signature(err.to_string()))
    }

    /// Checks that the authorization was signed by `expected`
    pub fn validate(&self, expected: Address) -> Result<(), AuthorizationError> {
        let recovered = self.recover_authority()?;
        if recovered == expected {
            Ok(())
        } else {
            Err(AuthorizationError::WrongAuthority { recovered, expected })
        }
    }
}
