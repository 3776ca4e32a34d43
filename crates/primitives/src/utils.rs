//! Misc utils

use ethers::{
    types::{Address, Bytes, U128, U256},
    utils::to_checksum,
};

/// Converts address to checksum address
pub fn as_checksum_addr<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&to_checksum(val, None))
}

/// Converts Option address to checksum
pub fn as_checksum_addr_opt<S>(val: &Option<Address>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if let Some(addr) = val {
        s.serialize_str(&to_checksum(addr, None))
    } else {
        s.serialize_none()
    }
}

/// Packs paymaster address, its two gas limits and its data into `paymasterAndData`
pub fn pack_paymaster_data(
    addr: Address,
    paymaster_verification_gas_limit: U256,
    paymaster_post_op_gas_limit: U256,
    paymaster_data: &Bytes,
) -> Vec<u8> {
    if addr.is_zero() {
        vec![]
    } else {
        let gas_data = pack_uint128(paymaster_verification_gas_limit, paymaster_post_op_gas_limit);
        [addr.as_bytes(), gas_data.as_slice(), paymaster_data.as_ref()].concat()
    }
}

/// Packs factory address and factory data into `initCode`
pub fn pack_factory_data(factory: Address, factory_data: &Bytes) -> Vec<u8> {
    if factory.is_zero() {
        vec![]
    } else {
        [factory.as_bytes(), factory_data.as_ref()].concat()
    }
}

/// Packs two uint128 (upper 128 bits of each value are dropped)
pub fn pack_uint128(a: U256, b: U256) -> [u8; 32] {
    let mut res = [0u8; 32];
    let a: U128 = {
        let mut tem = [0; 32];
        a.to_big_endian(&mut tem);
        U128::from_big_endian(&tem[16..32])
    };
    let b: U128 = {
        let mut tem = [0; 32];
        b.to_big_endian(&mut tem);
        U128::from_big_endian(&tem[16..32])
    };
    a.to_big_endian(&mut res[0..16]);
    b.to_big_endian(&mut res[16..32]);
    res
}
