use super::{AppContext, finish, start_bridge, stop_bridge};
use crate::args::{DividendsSubcommand, Stxdesk};
use eyre::{Result, bail};
use std::sync::Arc;
use stxdesk::{
    Session,
    dividends::{self, AdminActions, ContractInfo, DividendApp, UserActions},
};
use stxdesk_common::sh_println;
use stxdesk_config::AppKind;
use stxdesk_wallets::BrowserWalletServer;
use yansi::Paint;

pub async fn run(args: &Stxdesk, cmd: &DividendsSubcommand) -> Result<()> {
    let ctx = AppContext::load(args, AppKind::Dividends)?;

    match cmd {
        DividendsSubcommand::Info => {
            let info = ContractInfo::new(ctx.client(ctx.idle_wallet()));
            let (payouts, holdings) = info.load().await;
            finish(payouts)?;
            finish(holdings)?;
            for line in info.lines() {
                sh_println!("{line}")?;
            }
            Ok(())
        }
        DividendsSubcommand::Claimable { address } => {
            let Some(address) = address.clone().or_else(|| args.sender.clone()) else {
                bail!("no holder given; pass an ADDRESS or --sender");
            };
            let user = UserActions::new(ctx.client(ctx.idle_wallet()), Session::connected(address));
            finish(user.refresh_claimable().await)?;
            for line in user.lines() {
                sh_println!("{line}")?;
            }
            Ok(())
        }
        _ => {
            let bridge = start_bridge(&ctx.config).await?;
            let client = ctx.client(Arc::new(bridge.clone()));
            let app = DividendApp::new(client, Session::new(), ctx.gate(AppKind::Dividends));
            let result = submit(&ctx, &bridge, &app, cmd).await;
            stop_bridge(bridge, result).await
        }
    }
}

async fn submit(
    ctx: &AppContext,
    bridge: &BrowserWalletServer,
    app: &DividendApp,
    cmd: &DividendsSubcommand,
) -> Result<()> {
    app.session().connect_with(bridge).await?;
    if let Some(line) = app.connection_line() {
        sh_println!("{} | {line}", dividends::TITLE.bold())?;
    }

    let outcome = match cmd {
        DividendsSubcommand::UpdateHoldings => user_actions(app)?.update_holdings().await,
        DividendsSubcommand::Claim => user_actions(app)?.claim_payouts().await,
        DividendsSubcommand::AddPayouts { amount } => {
            let admin = admin_actions(ctx, app)?;
            admin.set_payout_amount(amount.clone());
            admin.add_payouts().await
        }
        DividendsSubcommand::UpdateTokenSupply => {
            admin_actions(ctx, app)?.update_token_supply().await
        }
        DividendsSubcommand::WithdrawUnclaimed => {
            admin_actions(ctx, app)?.withdraw_unclaimed_payouts().await
        }
        DividendsSubcommand::Info | DividendsSubcommand::Claimable { .. } => {
            bail!("`{cmd:?}` is read-only")
        }
    };

    if let Some(submission) = finish(outcome)? {
        sh_println!("Transaction: {}", submission.txid)?;
    }
    if let Some(user) = app.user_actions()
        && !cmd.is_admin()
    {
        for line in user.lines() {
            sh_println!("{line}")?;
        }
    }
    Ok(())
}

fn user_actions(app: &DividendApp) -> Result<&UserActions> {
    match app.user_actions() {
        Some(user) => Ok(user),
        None => bail!("no wallet connected"),
    }
}

fn admin_actions<'a>(ctx: &AppContext, app: &'a DividendApp) -> Result<&'a AdminActions> {
    match app.admin_actions() {
        Some(admin) => Ok(admin),
        None => bail!(
            "{} is not the admin of {}",
            app.session().identity().unwrap_or_default(),
            ctx.contract
        ),
    }
}
