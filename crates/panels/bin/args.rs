use clap::{Parser, Subcommand};
use stxdesk_cli::opts::{AppOpts, NetworkOpts, WalletOpts};

/// Manage the STX Blacklist Manager and Div-Manager contracts from the terminal.
///
/// State-changing commands are approved in the browser wallet: stxdesk serves a local page that
/// connects the wallet and forwards each contract call to it.
#[derive(Debug, Parser)]
#[command(name = "stxdesk", version, next_display_order = None)]
pub struct Stxdesk {
    #[command(flatten)]
    pub network: NetworkOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,

    #[command(flatten)]
    pub app: AppOpts,

    /// The principal read-only calls are evaluated as.
    ///
    /// Defaults to the contract deployer.
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub sender: Option<String>,

    #[command(subcommand)]
    pub cmd: StxdeskSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum StxdeskSubcommand {
    /// Blacklist Manager commands.
    #[command(subcommand, visible_alias = "bl")]
    Blacklist(BlacklistSubcommand),

    /// Div-Manager commands.
    #[command(subcommand, visible_alias = "div")]
    Dividends(DividendsSubcommand),

    /// Connect the browser wallet and print the connected address.
    Connection,
}

#[derive(Debug, Subcommand)]
pub enum BlacklistSubcommand {
    /// Restrict an address. Admin only.
    Restrict {
        /// The address to restrict.
        address: String,
    },

    /// Lift the restriction of an address. Admin only.
    Unrestrict {
        /// The address to unrestrict.
        address: String,
    },

    /// Hand the admin role to another address. Admin only.
    UpdateAdmin {
        /// The new admin.
        address: String,
    },

    /// Set the transfer fee. Admin only.
    SetTransferFee {
        /// The fee, in micro-STX.
        fee: String,
    },

    /// Set the address that receives transfer fees. Admin only.
    SetFeeRecipient {
        /// The new fee recipient.
        address: String,
    },

    /// Send STX through the contract.
    SendStx {
        /// The amount, in micro-STX.
        amount: String,

        /// The recipient.
        recipient: String,
    },

    /// Check whether an address is restricted.
    IsRestricted {
        /// The address to check.
        address: String,
    },
}

impl BlacklistSubcommand {
    /// Whether the command is reserved for the contract admin.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Restrict { .. }
                | Self::Unrestrict { .. }
                | Self::UpdateAdmin { .. }
                | Self::SetTransferFee { .. }
                | Self::SetFeeRecipient { .. }
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum DividendsSubcommand {
    /// Print the payouts per token and the contract holdings.
    Info,

    /// Print the claimable amount of an address.
    Claimable {
        /// The holder. Defaults to `--sender`.
        address: Option<String>,
    },

    /// Record the connected wallet's current token holdings.
    UpdateHoldings,

    /// Claim the connected wallet's payouts.
    #[command(visible_alias = "claim-payouts")]
    Claim,

    /// Add payouts for distribution. Admin only.
    AddPayouts {
        /// The amount, in micro-STX.
        amount: String,
    },

    /// Snapshot the token supply. Admin only.
    UpdateTokenSupply,

    /// Withdraw unclaimed payouts. Admin only.
    #[command(visible_alias = "withdraw-unclaimed-payouts")]
    WithdrawUnclaimed,
}

impl DividendsSubcommand {
    /// Whether the command is reserved for the contract admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::AddPayouts { .. } | Self::UpdateTokenSupply | Self::WithdrawUnclaimed)
    }
}
