use crate::error::AccountError;
use ethers::{
    abi::{AbiEncode, Token},
    types::{Address, Bytes, U256},
};
use quickstart_contracts::kernel_api::ExecuteCall;
use quickstart_primitives::constants::kernel::call_type;

/// A call executed by the smart account
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Call {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl Call {
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value, data }
    }

    fn into_token(self) -> Token {
        Token::Tuple(vec![
            Token::Address(self.to),
            Token::Uint(self.value),
            Token::Bytes(self.data.to_vec()),
        ])
    }
}

/// ERC-7579 execution mode: call type, exec type (default), unused, mode selector, mode payload
fn execution_mode(call_type: u8) -> [u8; 32] {
    let mut mode = [0u8; 32];
    mode[0] = call_type;
    mode
}

/// Encodes the calls into the `execute(bytes32,bytes)` call data of the account
///
/// A single call is packed as `target || value || data`, several calls are ABI encoded as an
/// `Execution[]` array and executed as a batch.
pub fn encode_calls(calls: &[Call]) -> Result<Bytes, AccountError> {
    let (exec_mode, execution_calldata) = match calls {
        [] => return Err(AccountError::NoCalls),
        [call] => {
            let mut value = [0u8; 32];
            call.value.to_big_endian(&mut value);
            let packed = [call.to.as_bytes(), &value, call.data.as_ref()].concat();
            (execution_mode(call_type::SINGLE), packed)
        }
        calls => {
            let executions = calls.iter().cloned().map(Call::into_token).collect();
            let encoded = ethers::abi::encode(&[Token::Array(executions)]);
            (execution_mode(call_type::BATCH), encoded)
        }
    };

    Ok(ExecuteCall { exec_mode, execution_calldata: execution_calldata.into() }.encode().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::{decode, AbiDecode, ParamType};

    #[test]
    fn no_calls() {
        assert!(matches!(encode_calls(&[]), Err(AccountError::NoCalls)));
    }

    #[test]
    fn single_zero_call() {
        let call_data = encode_calls(&[Call::default()]).unwrap();

        assert_eq!(&call_data[..4], &[0xe9, 0xae, 0x5c, 0x53]);
        // selector, mode, offset, length, 52 bytes padded to 64
        assert_eq!(call_data.len(), 4 + 32 * 3 + 64);

        let execute = ExecuteCall::decode(&call_data).unwrap();
        assert_eq!(execute.exec_mode, [0u8; 32]);
        assert_eq!(execute.execution_calldata, Bytes::from(vec![0u8; 52]));
    }

    #[test]
    fn single_call_packing() {
        let call = Call::new(Address::repeat_byte(0x11), 5.into(), vec![0xab, 0xcd].into());
        let execute = ExecuteCall::decode(&encode_calls(&[call]).unwrap()).unwrap();

        let packed = execute.execution_calldata;
        assert_eq!(packed.len(), 20 + 32 + 2);
        assert_eq!(&packed[..20], Address::repeat_byte(0x11).as_bytes());
        assert_eq!(U256::from_big_endian(&packed[20..52]), 5.into());
        assert_eq!(&packed[52..], &[0xab, 0xcd]);
    }

    #[test]
    fn batch_calls() {
        let calls = vec![
            Call::default(),
            Call::new(Address::repeat_byte(0x22), 1.into(), vec![0x01].into()),
        ];
        let execute = ExecuteCall::decode(&encode_calls(&calls).unwrap()).unwrap();

        assert_eq!(execute.exec_mode[0], 0x01);
        assert!(execute.exec_mode[1..].iter().all(|b| *b == 0));

        let execution =
            ParamType::Tuple(vec![ParamType::Address, ParamType::Uint(256), ParamType::Bytes]);
        let tokens =
            decode(&[ParamType::Array(Box::new(execution))], &execute.execution_calldata).unwrap();
        let expected = Token::Array(calls.into_iter().map(Call::into_token).collect());
        assert_eq!(tokens, vec![expected]);
    }
}
