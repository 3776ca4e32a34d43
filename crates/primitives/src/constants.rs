//! Account abstraction (ERC-4337 v0.7, Kernel v3.1, ZeroDev)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x0000000071727De22E5E9d8BAf0edAc6f37da032";
}

/// Kernel smart account (v3.1)
pub mod kernel {
    /// Kernel account implementation (also the EIP-7702 delegation target)
    pub const ACCOUNT_IMPLEMENTATION: &str = "0xBAC849bB641841b44E965fB01A4Bf5F074f84b4D";
    /// Kernel account factory
    pub const FACTORY: &str = "0xaac5D4240AF87249B3f71BC8E4A2cae074A3E419";
    /// Factory staker (meta factory) that forwards deployments to an approved factory
    pub const META_FACTORY: &str = "0xd703aaE79538628d27099B8c4f621bE4CCd142d5";

    /// Validation modes (first byte of the nonce key)
    pub mod validator_mode {
        pub const DEFAULT: u8 = 0x00;
    }

    /// Validation types (second byte of the nonce key)
    pub mod validator_type {
        pub const ROOT: u8 = 0x00;
        pub const VALIDATOR: u8 = 0x01;
    }

    /// ERC-7579 call types (first byte of the execution mode)
    pub mod call_type {
        pub const SINGLE: u8 = 0x00;
        pub const BATCH: u8 = 0x01;
    }
}

/// ECDSA validator plugin
pub mod ecdsa_validator {
    /// ECDSA validator address for Kernel v3.1
    pub const ADDRESS: &str = "0x845ADb2C711129d4f3966735eD98a9F09fC4cE57";
    /// Signature with a valid shape, used while gas is estimated or sponsored
    pub const DUMMY_SIGNATURE: &str =
        "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
}

/// EIP-7702
pub mod eip7702 {
    /// Magic byte prepended to the RLP encoded authorization before hashing
    pub const MAGIC: u8 = 0x05;
    /// Prefix of the delegation designator stored as the code of a delegated EOA
    pub const DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];
}

/// ZeroDev hosted bundler and paymaster
pub mod zerodev {
    /// Base URL of the ZeroDev v2 RPC API
    pub const RPC_BASE_URL: &str = "https://rpc.zerodev.app/api/v2";
    /// Project identifier used by the plain quickstart
    pub const DEFAULT_PROJECT_ID: &str = "c5c1e190-8845-40e9-b6b8-9ec3fadc4e8f";
}

/// User operation receipt polling
pub mod receipt {
    /// Default time to wait for a receipt (in milliseconds)
    pub const TIMEOUT: u64 = 120_000;
    /// Time to wait for a receipt in the plain quickstart (in milliseconds)
    pub const QUICKSTART_TIMEOUT: u64 = 15_000;
    /// Interval between two `eth_getUserOperationReceipt` calls (in milliseconds)
    pub const POLL_INTERVAL: u64 = 1_000;
}

/// Supported chains
pub mod supported_chains {
    use alloy_chains::NamedChain;

    pub const CHAINS: [NamedChain; 2] = [NamedChain::Sepolia, NamedChain::BaseSepolia];

    /// Names accepted by [`parse_chain`](crate::chain::parse_chain)
    pub const NAMES: [&str; 2] = ["sepolia", "base-sepolia"];
}
