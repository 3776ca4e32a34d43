use crate::{
    addresses::{DUMMY_SIGNATURE, ECDSA_VALIDATOR},
    error::AccountError,
};
use ethers::types::{Address, Bytes, U256};
use quickstart_primitives::{
    constants::kernel::{validator_mode, validator_type},
    UserOperationSigned, Wallet,
};

/// ECDSA validator module owned by a single key
#[derive(Clone, Debug)]
pub struct EcdsaValidator {
    address: Address,
    owner: Wallet,
}

impl EcdsaValidator {
    /// Validator deployed for Kernel v3.1
    pub fn new(owner: Wallet) -> Self {
        Self::with_address(owner, *ECDSA_VALIDATOR)
    }

    pub fn with_address(owner: Wallet, address: Address) -> Self {
        Self { address, owner }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> &Wallet {
        &self.owner
    }

    /// Data the validator is installed with: the owner address
    pub fn enable_data(&self) -> Bytes {
        self.owner.address().as_bytes().to_vec().into()
    }

    /// `bytes21` validation id of the validator when installed as root
    pub fn root_validator_id(&self) -> [u8; 21] {
        let mut id = [0u8; 21];
        id[0] = validator_type::VALIDATOR;
        id[1..].copy_from_slice(self.address.as_bytes());
        id
    }

    /// 192-bit entry point nonce key: mode, validation type, validator, then `key`
    pub fn nonce_key(&self, key: u16) -> U256 {
        let mut buf = [0u8; 24];
        buf[0] = validator_mode::DEFAULT;
        buf[1] = validator_type::ROOT;
        buf[2..22].copy_from_slice(self.address.as_bytes());
        buf[22..].copy_from_slice(&key.to_be_bytes());
        U256::from_big_endian(&buf)
    }

    pub fn dummy_signature(&self) -> Bytes {
        DUMMY_SIGNATURE.clone()
    }

    pub async fn sign_user_operation(
        &self,
        uo: &UserOperationSigned,
        entry_point: &Address,
        chain_id: u64,
    ) -> Result<Bytes, AccountError> {
        self.owner
            .sign_user_operation(uo, entry_point, chain_id)
            .await
            .map_err(AccountError::signer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::hex;

    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn validator() -> EcdsaValidator {
        EcdsaValidator::new(Wallet::from_private_key(PRIVATE_KEY).unwrap())
    }

    #[test]
    fn enable_data_and_root_id() {
        let validator = validator();
        assert_eq!(
            validator.enable_data(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Bytes>().unwrap()
        );
        assert_eq!(
            hex::encode(validator.root_validator_id()),
            "01845adb2c711129d4f3966735ed98a9f09fc4ce57"
        );
    }

    #[test]
    fn nonce_key() {
        let validator = validator();
        let expected = U256::from_big_endian(
            &hex::decode("0000845adb2c711129d4f3966735ed98a9f09fc4ce570000").unwrap(),
        );
        assert_eq!(validator.nonce_key(0), expected);
        assert_eq!(validator.nonce_key(1), expected + 1);
        assert!(validator.nonce_key(u16::MAX) < U256::one() << 192);
    }

    #[test]
    fn dummy_signature() {
        let signature = validator().dummy_signature();
        assert_eq!(signature.len(), 65);
        assert_eq!(signature[64], 0x1c);
        assert!(signature.iter().any(|b| *b != 0));
    }
}
