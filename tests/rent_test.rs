//! End-to-end tests of the rent conversation

mod helpers;

use helpers::*;
use serial_test::serial;
use Housemate::state::SessionKey;

#[tokio::test]
#[serial]
async fn test_rent_flow_writes_cells() {
    let house = TestHousehold::new().await;

    house.send(&ALICE, house_chat_id(), "/rent").await;
    house.send(&ALICE, house_chat_id(), "5m").await;
    assert!(house.telegram.last_text().await.contains("5,000,000 ₫"));

    // the conversation belongs to the chat, anyone may answer
    house.send(&BOB, house_chat_id(), "1m").await;
    house.send(&ALICE, house_chat_id(), "500k").await;

    assert_eq!(house.cell("'1/2024'!J9"), "1000000");
    assert_eq!(house.cell("'1/2024'!J10"), "500000");
    assert_eq!(house.cell("'1/2024'!J11"), "3500000");
    assert_eq!(house.cell("'1/2024'!J12"), "5000000");
    assert_eq!(house.cell("'1/2024'!J13"), "@alice");

    let reply = house.telegram.last_text().await;
    assert!(reply.contains("Rent saved"));
    assert!(reply.contains("Per-member breakdown"));

    let session = house
        .ctx
        .state_storage
        .load_context(SessionKey::Chat(house_chat_id()))
        .await
        .unwrap();
    assert!(session.is_none());
}

#[tokio::test]
#[serial]
async fn test_invalid_amount_reprompts() {
    let house = TestHousehold::new().await;

    house.send(&ALICE, house_chat_id(), "/rent").await;
    house.send(&ALICE, house_chat_id(), "five million").await;
    assert!(house.telegram.last_text().await.contains("Invalid amount"));

    house.send(&ALICE, house_chat_id(), "5000000").await;
    assert!(house.telegram.last_text().await.contains("electric"));
}

#[tokio::test]
#[serial]
async fn test_bills_exceeding_total_write_nothing() {
    let house = TestHousehold::new().await;

    house.send(&ALICE, house_chat_id(), "/rent").await;
    house.send(&ALICE, house_chat_id(), "1m").await;
    house.send(&ALICE, house_chat_id(), "800k").await;
    house.send(&ALICE, house_chat_id(), "300k").await;

    assert!(house.telegram.last_text().await.contains("exceeds Total"));
    for cell in ["J9", "J10", "J11", "J12", "J13"] {
        assert_eq!(house.cell(&format!("'1/2024'!{}", cell)), "");
    }

    let session = house
        .ctx
        .state_storage
        .load_context(SessionKey::Chat(house_chat_id()))
        .await
        .unwrap();
    assert!(session.is_none());
}

#[tokio::test]
#[serial]
async fn test_huge_bills_are_rejected() {
    let house = TestHousehold::new().await;

    house.send(&ALICE, house_chat_id(), "/rent").await;
    house.send(&ALICE, house_chat_id(), "0").await;
    house.send(&ALICE, house_chat_id(), "9000000000000m").await;
    assert!(house.telegram.last_text().await.contains("Invalid amount"));

    let session = house
        .ctx
        .state_storage
        .load_context(SessionKey::Chat(house_chat_id()))
        .await
        .unwrap()
        .unwrap();
    assert!(session.is_at("rent", "electric"));
    assert_eq!(house.cell("'1/2024'!J11"), "");
}
