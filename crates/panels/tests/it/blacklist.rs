use crate::utils::{Harness, principal};
use std::sync::Arc;
use stxdesk::{
    ActionOutcome, AdminGate, Level, Session,
    blacklist::{BlacklistApp, RestrictionStatus},
};
use stxdesk_common::{ClarityValue, ExecutorError};
use stxdesk_test_utils::addresses::{DEPLOYER, RECIPIENT, TARGET};

fn app(harness: &Harness, admin: Option<&str>) -> BlacklistApp {
    let gate = match admin {
        Some(admin) => AdminGate::new(Some(admin.to_string())),
        None => AdminGate::open(),
    };
    BlacklistApp::new(harness.client(), Session::new(), gate)
}

#[tokio::test]
async fn admin_panel_follows_the_connected_identity() {
    let harness = Harness::new("SP_ADMIN");
    let app = app(&harness, Some("SP_ADMIN"));
    assert!(app.admin_panel().is_none());
    assert_eq!(app.header_line(), None);
    assert_eq!(app.header_control(), "Login");

    app.login(&*harness.wallet).await.unwrap();
    assert!(app.admin_panel().is_some());
    assert_eq!(app.header_line().as_deref(), Some("Logged in as: SP_ADMIN"));
    assert_eq!(app.header_control(), "Logout");

    app.logout(&*harness.wallet);
    assert!(app.admin_panel().is_none());
    assert_eq!(harness.wallet.sign_outs(), 1);

    harness.wallet.set_connect_result(Ok("SP_USER".to_string()));
    app.login(&*harness.wallet).await.unwrap();
    assert!(app.admin_panel().is_none());
    assert_eq!(app.header_line().as_deref(), Some("Logged in as: SP_USER"));
}

#[tokio::test]
async fn restrict_address_succeeds() {
    let harness = Harness::new(DEPLOYER);
    let app = app(&harness, Some(DEPLOYER));
    app.login(&*harness.wallet).await.unwrap();

    let admin = app.admin_panel().unwrap();
    admin.edit_form(|form| form.target_address = TARGET.to_string());
    let outcome = admin.restrict_address().await;

    assert!(outcome.is_success());
    assert!(!admin.is_busy());
    let last = harness.log.last().unwrap();
    assert_eq!(last.level, Level::Success);
    assert_eq!(last.message, "restrict-address operation successful");

    let calls = harness.wallet.calls_to("restrict-address");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec![principal(TARGET)]);
}

#[tokio::test]
async fn admin_actions_send_typed_arguments() {
    let harness = Harness::new(DEPLOYER);
    let app = app(&harness, None);
    app.login(&*harness.wallet).await.unwrap();

    let admin = app.admin_panel().unwrap();
    admin.edit_form(|form| {
        form.target_address = TARGET.to_string();
        form.new_admin = RECIPIENT.to_string();
        form.new_fee = "250".to_string();
        form.new_fee_recipient = RECIPIENT.to_string();
    });
    assert!(admin.unrestrict_address().await.is_success());
    assert!(admin.update_admin().await.is_success());
    assert!(admin.set_transfer_fee().await.is_success());
    assert!(admin.set_fee_recipient().await.is_success());

    let calls: Vec<_> =
        harness.wallet.calls().into_iter().map(|call| (call.function, call.args)).collect();
    similar_asserts::assert_eq!(
        calls,
        vec![
            ("unrestrict-address".to_string(), vec![principal(TARGET)]),
            ("update-admin".to_string(), vec![principal(RECIPIENT)]),
            ("set-transfer-fee".to_string(), vec![ClarityValue::UInt(250)]),
            ("set-fee-recipient".to_string(), vec![principal(RECIPIENT)]),
        ]
    );
    assert_eq!(harness.log.len(), 4);
}

#[tokio::test]
async fn rejected_send_reports_the_reason() {
    let harness = Harness::new(RECIPIENT);
    harness.wallet.reject("send-stx", "User cancelled");
    let app = app(&harness, None);
    app.login(&*harness.wallet).await.unwrap();

    let user = app.user_panel();
    user.edit_form(|form| {
        form.amount = "100".to_string();
        form.recipient = TARGET.to_string();
    });
    let outcome = user.send_stx().await;

    assert_eq!(outcome, ActionOutcome::Failure("User cancelled".to_string()));
    assert!(!user.is_sending());
    let all = harness.log.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].level, Level::Error);
    assert!(all[0].message.contains("User cancelled"));
    assert_eq!(all[0].message, "Error sending STX: User cancelled");

    let calls = harness.wallet.calls_to("send-stx");
    assert_eq!(calls[0].args, vec![ClarityValue::UInt(100), principal(TARGET)]);
}

#[tokio::test]
async fn send_succeeds_with_custom_text() {
    let harness = Harness::new(RECIPIENT);
    let app = app(&harness, None);
    let user = app.user_panel();
    user.edit_form(|form| {
        form.amount = "5".to_string();
        form.recipient = TARGET.to_string();
    });

    let submission = user.send_stx().await.success().unwrap();
    assert!(submission.txid.starts_with("0x"));
    assert_eq!(harness.log.messages(), vec!["STX sent successfully"]);
}

#[tokio::test]
async fn restriction_status_text() {
    let harness = Harness::new(RECIPIENT);
    harness.node.push("is-restricted", Ok(ClarityValue::Bool(true)));
    harness.node.push("is-restricted", Ok(ClarityValue::Bool(false)));
    let app = app(&harness, None);
    let user = app.user_panel();
    assert_eq!(user.status_line(), None);
    user.edit_form(|form| form.check_address = TARGET.to_string());

    let outcome = user.check_restricted().await;
    assert_eq!(outcome, ActionOutcome::Success(RestrictionStatus::Restricted));
    assert_eq!(RestrictionStatus::Restricted.to_string(), "restricted");
    assert_eq!(user.status_line().as_deref(), Some("Address is restricted"));

    user.check_restricted().await;
    assert_eq!(user.restriction().value(), Some(RestrictionStatus::NotRestricted));
    assert_eq!(RestrictionStatus::NotRestricted.to_string(), "not restricted");
    assert_eq!(user.status_line().as_deref(), Some("Address is not restricted"));

    assert!(harness.log.is_empty());
    let calls = harness.node.calls_to("is-restricted");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].args, vec![principal(TARGET)]);
    assert_eq!(calls[0].sender, DEPLOYER);
}

#[tokio::test]
async fn failed_check_keeps_the_previous_status() {
    let harness = Harness::new(RECIPIENT);
    harness.node.push("is-restricted", Ok(ClarityValue::Bool(true)));
    harness
        .node
        .push("is-restricted", Err(ExecutorError::Transport("connection refused".to_string())));
    let app = app(&harness, None);
    app.login(&*harness.wallet).await.unwrap();
    let user = app.user_panel();
    user.edit_form(|form| form.check_address = TARGET.to_string());

    user.check_restricted().await;
    let outcome = user.check_restricted().await;

    assert!(outcome.is_failure());
    assert!(!user.is_checking());
    assert_eq!(user.status_line().as_deref(), Some("Address is restricted"));
    assert_eq!(user.restriction().error().as_deref(), Some("connection refused"));
    assert_eq!(harness.log.messages(), vec!["Error checking restriction: connection refused"]);
    assert_eq!(harness.node.calls_to("is-restricted")[1].sender, RECIPIENT);
}

#[tokio::test]
async fn contract_rejects_admin_calls_from_others() {
    let harness = Harness::new(RECIPIENT);
    harness.wallet.enforce_admin(DEPLOYER, &["restrict-address", "set-transfer-fee"]);
    // no admin configured, so every connected identity sees the admin panel
    let app = app(&harness, None);
    app.login(&*harness.wallet).await.unwrap();

    let admin = app.admin_panel().unwrap();
    admin.edit_form(|form| form.target_address = TARGET.to_string());
    let outcome = admin.restrict_address().await;

    assert_eq!(outcome.failure(), Some("restrict-address aborted: (err u100)"));
    assert_eq!(
        harness.log.last().unwrap().message,
        "Error in restrict-address: restrict-address aborted: (err u100)"
    );
    assert!(!admin.is_busy());
}

#[tokio::test]
async fn bad_fields_never_reach_the_wallet() {
    let harness = Harness::new(DEPLOYER);
    let app = app(&harness, None);
    app.login(&*harness.wallet).await.unwrap();

    let admin = app.admin_panel().unwrap();
    admin.edit_form(|form| form.new_fee = "ten".to_string());
    assert!(admin.set_transfer_fee().await.is_failure());
    assert!(admin.restrict_address().await.is_failure());

    let user = app.user_panel();
    user.edit_form(|form| {
        form.amount = "100".to_string();
        form.recipient = "SP_X".to_string();
    });
    assert!(user.send_stx().await.is_failure());

    assert!(harness.wallet.calls().is_empty());
    assert!(!admin.is_busy() && !user.is_sending());
    let messages = harness.log.messages();
    assert_eq!(messages[0], "Error in set-transfer-fee: invalid uint `ten`");
    assert_eq!(messages[1], "Error in restrict-address: address is required");
    assert!(messages[2].starts_with("Error sending STX: invalid principal"));
}

#[tokio::test]
async fn send_and_check_run_independently() {
    let harness = Harness::new(RECIPIENT);
    harness.node.set("is-restricted", Ok(ClarityValue::Bool(false)));
    harness.wallet.gate().hold();
    let app = Arc::new(app(&harness, None));
    app.user_panel().edit_form(|form| {
        form.amount = "100".to_string();
        form.recipient = TARGET.to_string();
        form.check_address = TARGET.to_string();
    });

    let sending = app.clone();
    let pending = tokio::spawn(async move { sending.user_panel().send_stx().await });
    harness.wallet.gate().wait_entered(1).await;
    let user = app.user_panel();
    assert!(user.is_sending());

    // the send keeps its button disabled
    assert_eq!(user.send_stx().await, ActionOutcome::Busy);
    assert_eq!(harness.wallet.calls_to("send-stx").len(), 1);

    // while the check has its own flag
    let checked = user.check_restricted().await;
    assert_eq!(checked, ActionOutcome::Success(RestrictionStatus::NotRestricted));
    assert!(user.is_sending());

    harness.wallet.gate().release(1);
    assert!(pending.await.unwrap().is_success());
    assert!(!user.is_sending());
    assert_eq!(harness.log.messages(), vec!["STX sent successfully"]);
}
