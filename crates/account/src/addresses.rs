use ethers::types::{Address, Bytes};
use lazy_static::lazy_static;
use quickstart_primitives::constants::{ecdsa_validator, entry_point, kernel};

lazy_static! {
    pub static ref ENTRY_POINT: Address =
        entry_point::ADDRESS.parse().expect("Entry point address valid");
    pub static ref ACCOUNT_IMPLEMENTATION: Address =
        kernel::ACCOUNT_IMPLEMENTATION.parse().expect("Kernel implementation address valid");
    pub static ref FACTORY: Address =
        kernel::FACTORY.parse().expect("Kernel factory address valid");
    pub static ref META_FACTORY: Address =
        kernel::META_FACTORY.parse().expect("Meta factory address valid");
    pub static ref ECDSA_VALIDATOR: Address =
        ecdsa_validator::ADDRESS.parse().expect("ECDSA validator address valid");
    pub(crate) static ref DUMMY_SIGNATURE: Bytes =
        ecdsa_validator::DUMMY_SIGNATURE.parse().expect("Dummy signature valid");
}
