//! End-to-end tests of the housework rotation and reminders

mod helpers;

use helpers::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_shortcut_marks_task_done() {
    let house = TestHousehold::new().await;

    house.send(&ALICE, house_chat_id(), "/hw1").await;

    assert_eq!(house.cell("Tasks!D3"), "15/01/2024");
    assert_eq!(house.cell("Tasks!E3"), "17/01/2024");
    assert_eq!(house.cell("Tasks!F3"), "@bob");
    assert!(house.telegram.last_text().await.contains("Next up: @bob"));
}

#[tokio::test]
#[serial]
async fn test_assign_keeps_dates() {
    let house = TestHousehold::new().await;

    house.click(&ALICE, house_chat_id(), "housework.2.assign").await;

    assert_eq!(house.cell("Tasks!F4"), "@carol");
    assert_eq!(house.cell("Tasks!D4"), "10/01/2024");
    assert_eq!(house.cell("Tasks!E4"), "17/01/2024");

    house.click(&ALICE, house_chat_id(), "housework.2.assign").await;
    assert_eq!(house.cell("Tasks!F4"), "@alice");
}

#[tokio::test]
#[serial]
async fn test_weighted_task_keeps_assignee_for_its_turns() {
    let workbook = seeded_workbook();
    workbook.put("Tasks!L1", &[&["2"]]).unwrap();
    workbook.put("Tasks!K3", &[&["1", "alice", "2"], &["1", "bob", "1"]]).unwrap();
    let house = TestHousehold::with_workbook(workbook).await;

    house.click(&ALICE, house_chat_id(), "housework.1.done").await;
    assert_eq!(house.cell("Tasks!F3"), "@alice");
    assert_eq!(house.cell("Tasks!G3"), "1");

    house.click(&ALICE, house_chat_id(), "housework.1.done").await;
    assert_eq!(house.cell("Tasks!F3"), "@bob");
    assert_eq!(house.cell("Tasks!G3"), "1");
}

#[tokio::test]
#[serial]
async fn test_unknown_task() {
    let house = TestHousehold::new().await;

    house.send(&ALICE, house_chat_id(), "/hw9").await;
    assert_eq!(house.telegram.last_text().await, "🔍 Task 9 not found.");
}

#[tokio::test]
#[serial]
async fn test_reminder_sweep() {
    let house = TestHousehold::new().await;
    let notifier = &house.ctx.services.notification_service;

    let summary = notifier.notify_due_tasks().await.unwrap();
    assert_eq!(summary.due, 1);
    assert_eq!(summary.sent, 1);

    let sent = house.telegram.requests_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["chat_id"], house_chat_id());
    assert!(sent[0]["text"].as_str().unwrap().contains("Dishes"));
    assert!(sent[0]["reply_markup"].to_string().contains("housework.1.done"));
}

#[tokio::test]
#[serial]
async fn test_reminders_can_be_switched_off() {
    let house = TestHousehold::new().await;

    house.click(&ALICE, house_chat_id(), "settings.reminders.toggle").await;
    assert!(house.telegram.last_text().await.contains("OFF"));

    let summary = house.ctx.services.notification_service.notify_due_tasks().await.unwrap();
    assert!(summary.disabled);
    assert_eq!(summary.sent, 0);
}

#[tokio::test]
#[serial]
async fn test_failed_reminder_does_not_stop_sweep() {
    let workbook = seeded_workbook();
    workbook.put("Tasks!E4", &[&["15/01/2024"]]).unwrap();

    let house = TestHousehold::with_workbook(workbook).await;
    house.telegram.reset_with_failing_send().await;

    let summary = house.ctx.services.notification_service.notify_due_tasks().await.unwrap();
    assert_eq!(summary.due, 2);
    assert_eq!(summary.failed, 2);
}
