use crate::utils::{Harness, principal};
use std::sync::Arc;
use stxdesk::{
    ActionOutcome, AdminGate, Session,
    dividends::{AdminActions, DividendApp},
};
use stxdesk_common::{ClarityValue, ExecutorError};
use stxdesk_test_utils::addresses::{DEPLOYER, RECIPIENT};

fn app(harness: &Harness, admin: Option<&str>) -> DividendApp {
    DividendApp::new(harness.client(), Session::new(), AdminGate::new(admin.map(Into::into)))
}

fn ok(value: u128) -> Result<ClarityValue, ExecutorError> {
    Ok(ClarityValue::ResponseOk(Box::new(ClarityValue::UInt(value))))
}

#[tokio::test]
async fn connect_shows_panels_and_loads_values() {
    let harness = Harness::new(DEPLOYER);
    harness.node.set("get-payouts-per-token", Ok(ClarityValue::UInt(5)));
    harness.node.set("get-contract-holdings", ok(1000));
    harness.node.set("get-claimable-sum", ok(42));
    let app = app(&harness, Some(DEPLOYER));
    assert!(app.contract_info().is_none());
    assert!(app.user_actions().is_none());
    assert!(app.admin_actions().is_none());

    app.connect(&*harness.wallet).await.unwrap();
    assert_eq!(app.connection_line(), Some(format!("Connected: {DEPLOYER}")));
    assert_eq!(app.session().control_label(), "Sign Out");

    let info = app.contract_info().unwrap();
    assert_eq!(info.lines(), vec!["Payouts per Token: 5", "Contract Holdings: 1000 STX"]);
    let user = app.user_actions().unwrap();
    assert_eq!(user.lines(), vec!["Claimable Amount: 42 STX"]);
    assert!(app.admin_actions().is_some());

    let claimable = harness.node.calls_to("get-claimable-sum");
    assert_eq!(claimable.len(), 1);
    assert_eq!(claimable[0].args, vec![principal(DEPLOYER)]);
    assert_eq!(claimable[0].sender, DEPLOYER);
    assert!(harness.log.is_empty());

    app.sign_out(&*harness.wallet);
    assert!(app.contract_info().is_none());
    assert!(app.admin_actions().is_none());
    assert_eq!(app.session().control_label(), "Connect Wallet");
}

#[tokio::test]
async fn admin_actions_need_the_admin() {
    let harness = Harness::new(RECIPIENT);
    let app = app(&harness, Some(DEPLOYER));
    app.session().connect_with(&*harness.wallet).await.unwrap();

    assert!(app.contract_info().is_some());
    assert!(app.user_actions().is_some());
    assert!(app.admin_actions().is_none());
}

#[tokio::test]
async fn contract_info_fetches_concurrently() {
    let harness = Harness::new(DEPLOYER);
    harness.node.set("get-payouts-per-token", Ok(ClarityValue::UInt(7)));
    harness.node.set("get-contract-holdings", ok(300));
    harness.node.gate().hold();
    let app = Arc::new(app(&harness, None));
    app.session().connect_with(&*harness.wallet).await.unwrap();

    let loading = app.clone();
    let pending = tokio::spawn(async move { loading.contract_info().unwrap().load().await });
    harness.node.gate().wait_entered(2).await;
    assert!(app.contract_info().unwrap().is_loading());

    harness.node.gate().release(2);
    let (payouts, holdings) = pending.await.unwrap();
    assert_eq!(payouts, ActionOutcome::Success(7));
    assert_eq!(holdings, ActionOutcome::Success(300));
    assert!(!app.contract_info().unwrap().is_loading());
}

#[tokio::test]
async fn update_holdings_twice_refreshes_twice() {
    let harness = Harness::new(RECIPIENT);
    harness.node.push("get-claimable-sum", ok(10));
    harness.node.push("get-claimable-sum", ok(20));
    let app = app(&harness, None);
    app.session().connect_with(&*harness.wallet).await.unwrap();
    let user = app.user_actions().unwrap();

    let first = user.update_holdings().await;
    assert!(first.is_success());
    assert_eq!(user.claimable().value(), Some(10));

    let second = user.update_holdings().await;
    assert!(second.is_success());
    assert_ne!(first, second);
    assert_eq!(user.claimable().value(), Some(20));

    assert_eq!(
        harness.log.messages(),
        vec!["update-holdings operation successful", "update-holdings operation successful"]
    );
    assert_eq!(harness.wallet.calls_to("update-holdings").len(), 2);
    assert_eq!(harness.node.calls_to("get-claimable-sum").len(), 2);
    assert!(!user.is_busy());
}

#[tokio::test]
async fn failed_claim_skips_the_refresh() {
    let harness = Harness::new(RECIPIENT);
    harness.wallet.reject("claim-payouts", "User cancelled");
    let app = app(&harness, None);
    app.session().connect_with(&*harness.wallet).await.unwrap();
    let user = app.user_actions().unwrap();

    let outcome = user.claim_payouts().await;
    assert_eq!(outcome, ActionOutcome::Failure("User cancelled".to_string()));
    assert!(harness.node.calls_to("get-claimable-sum").is_empty());
    assert_eq!(harness.log.messages(), vec!["Error: User cancelled"]);
    assert!(!user.is_busy());
}

#[tokio::test]
async fn failed_refresh_keeps_the_claimable_amount() {
    let harness = Harness::new(RECIPIENT);
    harness.node.push("get-claimable-sum", ok(10));
    harness.node.push("get-claimable-sum", Err(ExecutorError::Node("boom".to_string())));
    let app = app(&harness, None);
    app.session().connect_with(&*harness.wallet).await.unwrap();
    let user = app.user_actions().unwrap();

    assert_eq!(user.refresh_claimable().await, ActionOutcome::Success(10));
    assert!(user.claim_payouts().await.is_success());

    assert_eq!(user.claimable().value(), Some(10));
    assert_eq!(user.claimable().error().as_deref(), Some("boom"));
    assert_eq!(user.lines(), vec!["Claimable Amount: 10 STX"]);
    assert_eq!(harness.log.messages(), vec!["claim-payouts operation successful", "Error: boom"]);
}

#[tokio::test]
async fn add_payouts_clears_the_amount_on_success() {
    let harness = Harness::new(DEPLOYER);
    let app = app(&harness, Some(DEPLOYER));
    app.session().connect_with(&*harness.wallet).await.unwrap();
    let admin = app.admin_actions().unwrap();

    admin.set_payout_amount("abc");
    assert!(admin.add_payouts().await.is_failure());
    assert_eq!(admin.payout_amount(), "abc");
    assert!(harness.wallet.calls().is_empty());

    admin.set_payout_amount("1000");
    assert!(admin.add_payouts().await.is_success());
    assert_eq!(admin.payout_amount(), "");
    assert_eq!(harness.wallet.calls_to("add-payouts")[0].args, vec![ClarityValue::UInt(1000)]);

    assert!(admin.update_token_supply().await.is_success());
    assert!(admin.withdraw_unclaimed_payouts().await.is_success());
    assert_eq!(
        harness.log.messages(),
        vec![
            "Error: invalid uint `abc`",
            "add-payouts operation successful",
            "update-token-supply operation successful",
            "withdraw-unclaimed-payouts operation successful",
        ]
    );
}

#[tokio::test]
async fn admin_actions_need_a_configured_admin() {
    let harness = Harness::new(RECIPIENT);
    for admin in [None, Some(DEPLOYER)] {
        let app = app(&harness, admin);
        app.session().connect_with(&*harness.wallet).await.unwrap();
        assert!(app.user_actions().is_some());
        assert!(app.admin_actions().is_none());
    }
}

#[tokio::test]
async fn contract_rejects_admin_calls_from_others() {
    let harness = Harness::new(RECIPIENT);
    harness.wallet.enforce_admin(DEPLOYER, &["update-token-supply"]);
    let admin = AdminActions::new(harness.client());

    let outcome = admin.update_token_supply().await;
    assert_eq!(outcome.failure(), Some("update-token-supply aborted: (err u100)"));
    assert_eq!(
        harness.log.messages(),
        vec!["Error: update-token-supply aborted: (err u100)"]
    );
}

#[tokio::test]
async fn claimable_needs_a_connection() {
    let harness = Harness::new(RECIPIENT);
    let app = app(&harness, None);
    assert!(app.user_actions().is_none());

    let user = stxdesk::dividends::UserActions::new(harness.client(), Session::new());
    assert!(user.refresh_claimable().await.is_failure());
    assert!(harness.node.calls().is_empty());
    assert_eq!(harness.log.messages(), vec!["Error: no wallet connected"]);
}
