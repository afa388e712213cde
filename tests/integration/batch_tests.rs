//! Batch submission over a scripted client

use crate::common::mock_client::receipt;
use crate::common::{RowFactory, RowTableAssertions, ScriptedClient, TableFactory};
use journal_batch::config::BatchConfig;
use journal_batch::{
    ApiError, BatchSubmitter, CancellationFlag, EntryBuilder, FailureKind, GroupOutcome,
    RowTable,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn submitter(client: Arc<ScriptedClient>, concurrency: usize) -> BatchSubmitter<Arc<ScriptedClient>> {
    BatchSubmitter::new(
        client,
        EntryBuilder::default(),
        BatchConfig::default().with_concurrency(concurrency),
    )
}

#[tokio::test]
async fn test_every_group_is_accounted_for() {
    let mut table = TableFactory::balanced_groups(5);
    // Break Group G2's balance
    let mut rows = table.into_rows();
    rows[5] = RowFactory::line(5, "", "9000", "-1");
    table = RowTable::new(rows);

    let client = Arc::new(
        ScriptedClient::new()
            .on_submit("1003", Err(ApiError::Rejected("Account 1003 is blocked".into()))),
    );
    let report = submitter(client.clone(), 3)
        .submit(&mut table)
        .await
        .unwrap();

    assert_eq!(report.total_groups, 5);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 2);
    assert_eq!(report.skipped + report.cancelled, 0);

    let mut submitted = client.submitted();
    submitted.sort();
    assert_eq!(submitted, vec!["1000", "1001", "1003", "1004"]);

    for group in &report.groups {
        table.assert_group_uniform(group);
    }
    table.assert_group_failed(&report.groups[2], "unbalanced");
    table.assert_group_failed(&report.groups[3], "blocked");
    assert!(matches!(
        report.groups[3].outcome,
        GroupOutcome::Failed {
            kind: FailureKind::Rejected,
            ..
        }
    ));
    assert_eq!(
        table.rows()[9].result().document.as_deref(),
        Some("JE-1004")
    );
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let mut table = TableFactory::balanced_groups(8);
    let client = Arc::new(ScriptedClient::new().with_delay(Duration::from_millis(20)));

    let report = submitter(client.clone(), 3)
        .submit(&mut table)
        .await
        .unwrap();

    assert_eq!(report.succeeded, 8);
    assert!(client.max_in_flight() <= 3);
    assert!(client.max_in_flight() >= 2);
}

#[tokio::test]
async fn test_cancellation_lets_in_flight_group_commit() {
    let mut table = TableFactory::balanced_groups(4);
    let cancel = CancellationFlag::new();
    let client = Arc::new(ScriptedClient::new().cancelling(cancel.clone()));

    let report = submitter(client.clone(), 1)
        .submit_with_cancel(&mut table, &cancel)
        .await
        .unwrap();

    assert_eq!(client.submitted(), vec!["1000"]);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.cancelled, 3);
    assert_eq!(table.rows()[0].result().document.as_deref(), Some("JE-1000"));
    assert_eq!(table.rows()[1].result().document.as_deref(), Some("JE-1000"));
    assert!(table.rows()[2..].iter().all(|row| row.result().document.is_none()));
}

#[tokio::test]
async fn test_rerun_only_submits_what_is_left() {
    let mut table = TableFactory::balanced_groups(3);
    let flaky = Arc::new(ScriptedClient::new().on_submit(
        "1001",
        Err(ApiError::Timeout("gateway timeout".into())),
    ));
    let first = submitter(flaky, 2).submit(&mut table).await.unwrap();
    assert_eq!(first.succeeded, 2);
    assert_eq!(first.failed, 1);

    let healthy = Arc::new(ScriptedClient::new().on_submit("1001", Ok(receipt("JE-77", "Posted"))));
    let second = submitter(healthy.clone(), 2)
        .submit(&mut table)
        .await
        .unwrap();

    assert_eq!(healthy.submitted(), vec!["1001"]);
    assert_eq!(second.skipped, 2);
    assert_eq!(second.succeeded, 1);
    let result = table.rows()[2].result();
    assert_eq!(result.document.as_deref(), Some("JE-77"));
    assert_eq!(result.status.as_deref(), Some("Posted"));
    assert_eq!(result.warning, None);
}

#[tokio::test]
async fn test_json_table_with_implicit_group() {
    let mut table = TableFactory::from_json(json!([
        { "index": 0, "fields": { "account": "A", "amount": 100 } },
        { "index": 1, "fields": { "account": "B", "amount": -100 } },
        { "index": 2, "group_marker": "G1", "fields": { "account": "C", "amount": 50 } },
        { "index": 3, "fields": { "account": "D", "amount": -40 } }
    ]));
    let client = Arc::new(ScriptedClient::new());

    let report = submitter(client.clone(), 2)
        .submit(&mut table)
        .await
        .unwrap();

    assert_eq!(report.groups[0].key, "row-0");
    assert_eq!(report.groups[1].key, "G1");
    assert_eq!(client.submitted(), vec!["A"]);
    table.assert_group_failed(&report.groups[1], "10");
    assert!(table.rows()[2..].iter().all(|row| row.result().document.is_none()));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["groups"][0]["outcome"]["outcome"], "submitted");
    assert_eq!(json["groups"][1]["outcome"]["kind"], "validation");
}
