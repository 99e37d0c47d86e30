//! End-to-end runs of the store against an in-process resource server.

use ledger_sync::core::ordering::SortDirective;
use ledger_sync::io::config::SyncConfig;
use ledger_sync::io::http::HttpGateway;
use ledger_sync::model::Group;
use ledger_sync::store::Store;
use ledger_sync::test_support::{group, new_expense};
use resource_server::spawn_server;
use resource_server::state::AppState;

async fn connect() -> Store<HttpGateway> {
    let addr = spawn_server("127.0.0.1:0".parse().expect("addr"), AppState::new())
        .await
        .expect("spawn server");
    let config = SyncConfig {
        base_url: format!("http://{addr}/"),
        ..SyncConfig::default()
    };
    Store::connect(&config).expect("connect")
}

#[tokio::test]
async fn create_then_list_sorted_over_http() {
    let store = connect().await;
    let expenses = store.expenses();

    for amount in ["5", "30", "20"] {
        let created = expenses.create(new_expense(amount, 1, 2)).await;
        assert!(created.is_fulfilled(), "{created:?}");
        expenses.settle_dependents().await;
    }
    assert_eq!(expenses.snapshot().entities.len(), 3);

    let settled = expenses
        .fetch_list(SortDirective::parse("amount,desc"))
        .await;

    assert!(settled.is_fulfilled());
    let amounts: Vec<_> = expenses
        .snapshot()
        .entities
        .iter()
        .filter_map(|record| record.amount.clone())
        .collect();
    assert_eq!(amounts, vec!["30", "20", "5"]);
}

#[tokio::test]
async fn patch_merges_and_delete_settles_on_no_content() {
    let store = connect().await;
    let groups = store.groups();
    let created = groups
        .create(Group {
            name: Some("trip".to_string()),
            admin_id: Some(4),
            ..Group::default()
        })
        .await
        .fulfilled()
        .expect("created");
    let id = created.id.expect("server id");
    groups.settle_dependents().await;

    let patched = groups
        .partial_update(group(id, "holiday"))
        .await
        .fulfilled()
        .expect("patched");
    assert_eq!(patched.name.as_deref(), Some("holiday"));
    assert_eq!(patched.admin_id, Some(4));
    groups.settle_dependents().await;

    let deleted = groups.delete(id).await;
    groups.settle_dependents().await;

    assert!(deleted.is_fulfilled());
    let state = groups.snapshot();
    assert!(state.is_idle());
    assert_eq!(state.entity, Group::default());
    assert!(state.entities.is_empty());
}

#[tokio::test]
async fn missing_record_surfaces_status_message() {
    let store = connect().await;

    let settled = store.user_profiles().fetch_one(99).await;

    assert_eq!(
        settled.rejection(),
        Some("Request failed with status code 404")
    );
    assert_eq!(
        store.user_profiles().snapshot().error_message.as_deref(),
        Some("Request failed with status code 404")
    );
}

#[tokio::test]
async fn server_side_validation_is_a_rejection() {
    let store = connect().await;

    let settled = store.groups().update(group(5, "ghost")).await;
    store.settle_dependents().await;

    assert_eq!(
        settled.rejection(),
        Some("Request failed with status code 400")
    );
    let state = store.groups().snapshot();
    assert!(state.is_idle());
    assert!(!state.update_success);
}
