use super::{AppContext, finish, start_bridge, stop_bridge};
use crate::args::{BlacklistSubcommand, Stxdesk};
use eyre::{Result, bail};
use std::sync::Arc;
use stxdesk::{
    Session,
    blacklist::{self, AdminPanel, BlacklistApp},
};
use stxdesk_common::sh_println;
use stxdesk_config::AppKind;
use stxdesk_wallets::BrowserWalletServer;
use yansi::Paint;

pub async fn run(args: &Stxdesk, cmd: &BlacklistSubcommand) -> Result<()> {
    let ctx = AppContext::load(args, AppKind::Blacklist)?;
    let gate = ctx.gate(AppKind::Blacklist);

    if let BlacklistSubcommand::IsRestricted { address } = cmd {
        let session = args.sender.clone().map(Session::connected).unwrap_or_default();
        let app = BlacklistApp::new(ctx.client(ctx.idle_wallet()), session, gate);
        let panel = app.user_panel();
        panel.edit_form(|form| form.check_address = address.clone());
        finish(panel.check_restricted().await)?;
        if let Some(line) = panel.status_line() {
            sh_println!("{line}")?;
        }
        return Ok(());
    }

    let bridge = start_bridge(&ctx.config).await?;
    let client = ctx.client(Arc::new(bridge.clone()));
    let app = BlacklistApp::new(client, Session::new(), gate);
    let result = submit(&ctx, &bridge, &app, cmd).await;
    stop_bridge(bridge, result).await
}

async fn submit(
    ctx: &AppContext,
    bridge: &BrowserWalletServer,
    app: &BlacklistApp,
    cmd: &BlacklistSubcommand,
) -> Result<()> {
    app.login(bridge).await?;
    if let Some(line) = app.header_line() {
        sh_println!("{} | {line}", blacklist::TITLE.bold())?;
    }

    let outcome = match cmd {
        BlacklistSubcommand::Restrict { address } => {
            let admin = admin_panel(ctx, app)?;
            admin.edit_form(|form| form.target_address = address.clone());
            admin.restrict_address().await
        }
        BlacklistSubcommand::Unrestrict { address } => {
            let admin = admin_panel(ctx, app)?;
            admin.edit_form(|form| form.target_address = address.clone());
            admin.unrestrict_address().await
        }
        BlacklistSubcommand::UpdateAdmin { address } => {
            let admin = admin_panel(ctx, app)?;
            admin.edit_form(|form| form.new_admin = address.clone());
            admin.update_admin().await
        }
        BlacklistSubcommand::SetTransferFee { fee } => {
            let admin = admin_panel(ctx, app)?;
            admin.edit_form(|form| form.new_fee = fee.clone());
            admin.set_transfer_fee().await
        }
        BlacklistSubcommand::SetFeeRecipient { address } => {
            let admin = admin_panel(ctx, app)?;
            admin.edit_form(|form| form.new_fee_recipient = address.clone());
            admin.set_fee_recipient().await
        }
        BlacklistSubcommand::SendStx { amount, recipient } => {
            let user = app.user_panel();
            user.edit_form(|form| {
                form.amount = amount.clone();
                form.recipient = recipient.clone();
            });
            user.send_stx().await
        }
        BlacklistSubcommand::IsRestricted { .. } => bail!("`is-restricted` is read-only"),
    };

    if let Some(submission) = finish(outcome)? {
        sh_println!("Transaction: {}", submission.txid)?;
    }
    Ok(())
}

fn admin_panel<'a>(ctx: &AppContext, app: &'a BlacklistApp) -> Result<&'a AdminPanel> {
    match app.admin_panel() {
        Some(panel) => Ok(panel),
        None => bail!(
            "{} is not the admin of {}",
            app.session().identity().unwrap_or_default(),
            ctx.contract
        ),
    }
}
