use crate::utils::run_until_ctrl_c;
use clap::{value_parser, Parser, Subcommand};

pub mod args;
pub mod commands;

/// Kernel smart account quickstart
#[derive(Debug, Parser)]
#[command(author, version, about = "Kernel smart account quickstart", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(long, short, global = true, default_value_t = 2, value_parser = value_parser!(u8).range(..=4))]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send one sponsored user operation from a counterfactual Kernel account
    #[command(name = "send")]
    Send(commands::SendCommand),

    /// Delegate an EOA to Kernel with EIP-7702 and send one sponsored user operation from it
    #[command(name = "send-7702")]
    Send7702(commands::Send7702Command),

    /// Generate an owner key
    #[command(name = "generate-key")]
    GenerateKey(commands::GenerateKeyCommand),
}

pub fn run() -> eyre::Result<()> {
    // `PROJECT_ID` and `PRIVATE_KEY` may come from a `.env` file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let rust_log = match std::env::var("RUST_LOG") {
        Ok(val) => format!("{val},quickstart={}", cli.get_log_level()),
        Err(_) => format!("quickstart={}", cli.get_log_level()),
    };
    std::env::set_var("RUST_LOG", rust_log);
    tracing_subscriber::fmt::init();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    let task = async move {
        match cli.command {
            Commands::Send(command) => command.execute().await,
            Commands::Send7702(command) => command.execute().await,
            Commands::GenerateKey(command) => command.execute(),
        }
    };

    rt.block_on(run_until_ctrl_c(task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        let cli = Cli::try_parse_from(["quickstart", "generate-key", "-v", "4"]).unwrap();
        assert_eq!(cli.get_log_level(), "trace");

        let cli = Cli::try_parse_from(["quickstart", "generate-key"]).unwrap();
        assert_eq!(cli.get_log_level(), "info");

        assert!(Cli::try_parse_from(["quickstart", "generate-key", "-v", "5"]).is_err());
    }

    #[test]
    fn subcommands() {
        let cli = Cli::try_parse_from(["quickstart", "send"]).unwrap();
        assert!(matches!(cli.command, Commands::Send(_)));

        assert!(Cli::try_parse_from(["quickstart", "deploy"]).is_err());
    }
}
