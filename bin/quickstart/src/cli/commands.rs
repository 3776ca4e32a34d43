use super::args::{GenerateKeyArgs, Send7702Args, SendArgs};
use crate::quickstart::{generate_key, send, send_7702};
use clap::Parser;

/// Send one sponsored user operation from a counterfactual Kernel account
#[derive(Debug, Parser)]
pub struct SendCommand {
    #[clap(flatten)]
    send: SendArgs,
}

impl SendCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        send(self.send).await
    }
}

/// Delegate an EOA to Kernel with EIP-7702 and send one sponsored user operation from it
#[derive(Debug, Parser)]
pub struct Send7702Command {
    #[clap(flatten)]
    send: Send7702Args,
}

impl Send7702Command {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        send_7702(self.send).await
    }
}

/// Generate an owner key
#[derive(Debug, Parser)]
pub struct GenerateKeyCommand {
    #[clap(flatten)]
    generate_key: GenerateKeyArgs,
}

impl GenerateKeyCommand {
    /// Execute the command
    pub fn execute(self) -> eyre::Result<()> {
        generate_key(self.generate_key)
    }
}
