//! End-to-end tests of the split-bill flows

mod helpers;

use helpers::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_add_expense_with_defaults() {
    let house = TestHousehold::new().await;

    house.click(&ALICE, house_chat_id(), "splitbill.add").await;
    assert!(house.telegram.last_text().await.contains("15/01/2024"));

    house.send(&ALICE, house_chat_id(), "Groceries\n50k\n\n").await;

    assert_eq!(house.cell("'1/2024'!A4"), "1");
    assert_eq!(house.cell("'1/2024'!B4"), "Groceries");
    assert_eq!(house.cell("'1/2024'!C4"), "50000");
    assert_eq!(house.cell("'1/2024'!D4"), "15/01/2024");
    assert_eq!(house.cell("'1/2024'!E4"), "@alice");
    assert!(house.cell("'1/2024'!G4").contains("added by @alice"));
    assert_eq!(house.cell("'1/2024'!B2"), "2");

    let reply = house.telegram.last_text().await;
    assert!(reply.contains("Expense added"));
    assert!(reply.contains("50,000 ₫"));
}

#[tokio::test]
#[serial]
async fn test_invalid_expense_keeps_conversation_open() {
    let house = TestHousehold::new().await;

    house.click(&ALICE, house_chat_id(), "splitbill.add").await;
    house.send(&ALICE, house_chat_id(), "Groceries\nlots").await;

    assert!(house.telegram.last_text().await.contains("Cannot parse 'lots' as an amount."));
    assert_eq!(house.cell("'1/2024'!B4"), "");

    house.send(&ALICE, house_chat_id(), "Groceries\n120000\n14/01/2024\n@bob").await;
    assert_eq!(house.cell("'1/2024'!C4"), "120000");
    assert_eq!(house.cell("'1/2024'!D4"), "14/01/2024");
    assert_eq!(house.cell("'1/2024'!E4"), "@bob");
}

#[tokio::test]
#[serial]
async fn test_cancel_ends_add_conversation() {
    let house = TestHousehold::new().await;

    house.click(&ALICE, house_chat_id(), "splitbill.add").await;
    house.send(&ALICE, house_chat_id(), "/cancel").await;
    assert_eq!(house.telegram.last_text().await, "Oh, goodbye!");

    let sent_before = house.telegram.sent_texts().await.len();
    house.send(&ALICE, house_chat_id(), "Groceries\n50k").await;

    assert_eq!(house.cell("'1/2024'!B4"), "");
    assert_eq!(house.telegram.sent_texts().await.len(), sent_before);
}

#[tokio::test]
#[serial]
async fn test_expense_named_rent_starts_rent_flow() {
    let house = TestHousehold::new().await;

    house.click(&ALICE, house_chat_id(), "splitbill.add").await;
    house.send(&ALICE, house_chat_id(), "Rent\n5m").await;

    assert!(house.telegram.last_text().await.contains("total rent bill"));
    assert_eq!(house.cell("'1/2024'!B4"), "");
}

#[tokio::test]
#[serial]
async fn test_soft_delete() {
    let house = TestHousehold::new().await;
    house
        .add_expenses(&ALICE, &["Groceries\n50k", "Internet\n300k", "Pizza\n200k", "Soap\n30k"])
        .await;

    house.click(&BOB, house_chat_id(), "splitbill.delete.3").await;
    assert!(house.telegram.last_text().await.contains("Delete this expense?"));
    house.click(&BOB, house_chat_id(), "splitbill.delete.confirm.3").await;

    assert_eq!(house.telegram.last_text().await, "🗑 Expense 3 deleted.");
    assert_eq!(house.cell("'1/2024'!A6"), "3");
    assert_eq!(house.cell("'1/2024'!B6"), "");
    assert_eq!(house.cell("'1/2024'!C6"), "");

    let splitbill = &house.ctx.services.splitbill_service;
    let recent: Vec<i64> = splitbill.recent().await.unwrap().iter().map(|e| e.id).collect();
    assert_eq!(recent, vec![1, 2, 4]);

    let deleted = splitbill.get(3).await.unwrap();
    assert_eq!(deleted.id, 3);
    assert!(deleted.is_deleted());
    assert!(deleted.note.contains("added by @alice"));
    assert!(deleted.note.contains("deleted by @bob"));

    house.click(&BOB, house_chat_id(), "splitbill.delete.confirm.3").await;
    assert!(house.telegram.last_text().await.contains("has been deleted"));
}

#[tokio::test]
#[serial]
async fn test_update_amount() {
    let house = TestHousehold::new().await;
    house.add_expenses(&ALICE, &["Groceries\n50k"]).await;

    house.click(&ALICE, house_chat_id(), "splitbill.update").await;
    house.send(&ALICE, house_chat_id(), "1").await;
    assert!(house.telegram.last_text().await.contains("Send the new amount"));

    house.send(&ALICE, house_chat_id(), "65k").await;

    assert_eq!(house.cell("'1/2024'!C4"), "65000");
    assert_eq!(house.cell("'1/2024'!B4"), "Groceries");
    assert!(house
        .cell("'1/2024'!G4")
        .contains("amount changed from 50,000 ₫ to 65,000 ₫ by @alice"));
}

#[tokio::test]
#[serial]
async fn test_view_shows_recent_expenses() {
    let house = TestHousehold::new().await;
    house.add_expenses(&ALICE, &["Groceries\n50k", "Internet\n300k"]).await;

    house.click(&ALICE, house_chat_id(), "splitbill.view").await;

    let reply = house.telegram.last_text().await;
    assert!(reply.contains("Groceries"));
    assert!(reply.contains("300,000 ₫"));
}

#[tokio::test]
#[serial]
async fn test_report_reads_summary_and_member_balances() {
    let house = TestHousehold::new().await;
    house
        .sheet
        .put(
            "'1/2024'!I4",
            &[
                &["Expenses", "300000", "100000"],
                &["Rent", "6000000", "2000000", "paid by @bob"],
                &["Total", "6300000", "2100000"],
            ],
        )
        .unwrap();
    house
        .sheet
        .put(
            "'1/2024'!I16",
            &[
                &["@alice", "300000", "100000", "200000", "-1800000"],
                &["@bob", "0", "100000", "-100000", "3900000"],
                &["@carol", "0", "100000", "-100000", "-2100000"],
                &["@former", "0", "0", "0", "0"],
            ],
        )
        .unwrap();

    house.click(&ALICE, house_chat_id(), "splitbill.report").await;

    let reply = house.telegram.last_text().await;
    assert!(reply.contains("*Expenses*: 300,000 ₫ (avg 100,000 ₫)"));
    assert!(reply.contains("*Rent*: 6,000,000 ₫ (avg 2,000,000 ₫) _paid by @bob_"));
    assert!(reply.contains("*Total*: 6,300,000 ₫"));
    assert!(reply.contains("Final: *-1,800,000 ₫*"));
    assert!(reply.contains("Final: *3,900,000 ₫*"));
    assert!(reply.contains("@carol"));
    // only as many balance rows as there are members
    assert!(!reply.contains("@former"));
}
