//! Integration tests for the registration dialog over a seeded in-memory database.
//!
//! Covers: the end-to-end registration, reuse of a claimed code, callbacks outside the pick
//! states, retry on wrong code, store failures leaving the state in place, `/cancel`, and flows
//! aborted on internal inconsistency.

mod common;

use campus_bot::dialog::messages;
use campus_bot::{Flow, FlowState, Scratch};
use campus_storage::UniversityStore;
use common::mock_bot::BotCall;
use common::{Harness, FACULTY};

/// **Test: Full registration claims the seeded record for the chat.**
///
/// **Setup:** Demo data; chat 100 idle.
/// **Action:** /register, pick faculty and AA-25-07, code ST-456, password "secret".
/// **Expected:** User linked to chat 100 with password "secret"; both axes idle; flow prompts retracted.
#[tokio::test]
async fn test_end_to_end_registration() {
    let h = Harness::new().await;

    h.text(100, "/register").await;
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingFaculty)
    );
    let faculties = h.bot.last_sent().unwrap().keyboard.unwrap();
    assert_eq!(faculties.callback_data(), vec![format!("faculty:{}", FACULTY)]);

    h.press(100, &format!("faculty:{}", FACULTY)).await;
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingGroup)
    );
    let groups = h.bot.last_sent().unwrap().keyboard.unwrap();
    assert_eq!(groups.callback_data(), vec!["group:AA-25-07", "group:AA-25-08"]);

    h.press(100, "group:AA-25-07").await;
    assert_eq!(h.bot.last_text(), messages::ENTER_CODE);

    h.text(100, "ST-456").await;
    let session = h.sessions.get(Flow::Registration, 100).unwrap();
    assert_eq!(session.state, FlowState::AwaitingPassword);
    assert!(session.scratch.matched_user_id.is_some());
    assert!(h.bot.last_text().contains("Иван Иванов"));
    assert!(h.bot.tracked_count(100) >= 4);

    h.text(100, "secret").await;

    let user = h.repo.find_user_by_chat(100).await.unwrap().unwrap();
    assert_eq!(user.name, "Иван Иванов");
    assert_eq!(user.telegram_id, 100);
    assert_eq!(user.password, "secret");
    assert!(h.sessions.is_idle(100));
    assert_eq!(h.bot.tracked_count(100), 0);
    assert!(h.bot.last_text().contains("Регистрация завершена"));
}

/// **Test: A code that was already claimed yields NotFound and keeps the user at the code step.**
#[tokio::test]
async fn test_reused_code_is_not_found() {
    let h = Harness::new().await;
    h.register(100, "AA-25-07", "ST-456", "secret").await;

    h.text(200, "/register").await;
    h.press(200, &format!("faculty:{}", FACULTY)).await;
    h.press(200, "group:AA-25-07").await;
    h.text(200, "ST-456").await;

    assert_eq!(h.bot.last_text(), messages::CODE_NOT_FOUND);
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 200),
        Some(FlowState::AwaitingCode)
    );
}

/// **Test: A wrong code is retried in place; the right one then proceeds.**
#[tokio::test]
async fn test_wrong_code_retries_in_place() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.press(100, &format!("faculty:{}", FACULTY)).await;
    h.press(100, "group:AA-25-07").await;

    // Right code, wrong group.
    h.text(100, "ST-789").await;
    assert_eq!(h.bot.last_text(), messages::CODE_NOT_FOUND);
    h.text(100, "WRONG").await;
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingCode)
    );

    h.text(100, "ST-456").await;
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingPassword)
    );
}

/// **Test: Callbacks while awaiting the password leave scratch untouched.**
///
/// **Setup:** Chat reaches AwaitingPassword.
/// **Action:** Press a faculty button and a group button.
/// **Expected:** Session identical to before; each press acknowledged silently; nothing sent.
#[tokio::test]
async fn test_callback_during_awaiting_password_does_not_alter_scratch() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.press(100, &format!("faculty:{}", FACULTY)).await;
    h.press(100, "group:AA-25-07").await;
    h.text(100, "ST-456").await;

    let before = h.sessions.get(Flow::Registration, 100).unwrap();
    h.bot.clear();

    h.press(100, "faculty:Другой факультет").await;
    h.press(100, "group:AA-25-08").await;

    assert_eq!(h.sessions.get(Flow::Registration, 100).unwrap(), before);
    assert!(h.bot.sent_texts().is_empty());
    assert_eq!(h.bot.acks().len(), 2);
    assert!(h.bot.acks().iter().all(|(_, toast)| toast.is_none()));
}

/// **Test: Text while a button pick is expected asks for the buttons and changes nothing.**
#[tokio::test]
async fn test_text_during_faculty_pick_asks_for_buttons() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.text(100, "Факультет Информатики").await;

    assert_eq!(h.bot.last_text(), messages::USE_BUTTONS);
    assert_eq!(
        h.sessions.get(Flow::Registration, 100).unwrap().scratch,
        Scratch::default()
    );
}

/// **Test: An unknown faculty is rejected with a toast and the state stays.**
#[tokio::test]
async fn test_unknown_faculty_is_toasted() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.press(100, "faculty:Несуществующий").await;

    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingFaculty)
    );
    let (_, toast) = h.bot.acks().pop().unwrap();
    assert_eq!(toast.as_deref(), Some(messages::UNKNOWN_FACULTY));
}

/// **Test: Store failure at the code step apologises and leaves the state for a retry.**
#[tokio::test]
async fn test_store_failure_keeps_state() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.press(100, &format!("faculty:{}", FACULTY)).await;
    h.press(100, "group:AA-25-07").await;

    h.store.set_failing(true);
    h.text(100, "ST-456").await;
    assert_eq!(h.bot.last_text(), messages::STORE_ERROR);
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingCode)
    );

    h.store.set_failing(false);
    h.text(100, "ST-456").await;
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingPassword)
    );
}

/// **Test: Store failure on /register leaves the chat idle.**
#[tokio::test]
async fn test_store_failure_on_register_stays_idle() {
    let h = Harness::new().await;
    h.store.set_failing(true);
    h.text(100, "/register").await;

    assert_eq!(h.bot.last_text(), messages::STORE_ERROR);
    assert!(h.sessions.is_idle(100));
}

/// **Test: Commands typed mid-flow are treated as flow input.**
#[tokio::test]
async fn test_commands_mid_flow_are_flow_input() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.press(100, &format!("faculty:{}", FACULTY)).await;
    h.press(100, "group:AA-25-07").await;

    h.text(100, "/start").await;
    assert_eq!(h.bot.last_text(), messages::CODE_NOT_FOUND);
    assert_eq!(
        h.sessions.get_state(Flow::Registration, 100),
        Some(FlowState::AwaitingCode)
    );
}

/// **Test: /cancel clears the flow and retracts its prompts; a second /cancel has nothing to do.**
#[tokio::test]
async fn test_cancel_mid_flow() {
    let h = Harness::new().await;
    h.text(100, "/register").await;
    h.press(100, &format!("faculty:{}", FACULTY)).await;

    h.text(100, "/cancel").await;
    assert!(h.sessions.is_idle(100));
    assert_eq!(h.bot.tracked_count(100), 0);
    assert_eq!(h.bot.last_text(), messages::CANCELLED);
    assert!(h
        .bot
        .calls()
        .iter()
        .any(|c| matches!(c, BotCall::Retract { chat_id: 100, count } if *count > 0)));

    h.text(100, "/cancel").await;
    assert_eq!(h.bot.last_text(), messages::NOTHING_TO_CANCEL);
}

/// **Test: Text in the reserved AwaitingRole state aborts the flow.**
#[tokio::test]
async fn test_awaiting_role_aborts_to_idle() {
    let h = Harness::new().await;
    h.sessions
        .set_state(Flow::Registration, 100, FlowState::AwaitingRole, Scratch::default());

    h.text(100, "student").await;

    assert!(h.sessions.is_idle(100));
    assert_eq!(h.bot.last_text(), messages::FLOW_ABORTED);
}

/// **Test: Password step without a remembered user aborts the flow.**
#[tokio::test]
async fn test_password_without_matched_user_aborts() {
    let h = Harness::new().await;
    h.sessions.set_state(
        Flow::Registration,
        100,
        FlowState::AwaitingPassword,
        Scratch::default(),
    );

    h.text(100, "secret").await;

    assert!(h.sessions.is_idle(100));
    assert_eq!(h.bot.last_text(), messages::FLOW_ABORTED);
}

/// **Test: Two chats race for one record; the loser is sent back to /register.**
#[tokio::test]
async fn test_record_claimed_meanwhile_aborts_second_chat() {
    let h = Harness::new().await;
    for chat in [100, 200] {
        h.text(chat, "/register").await;
        h.press(chat, &format!("faculty:{}", FACULTY)).await;
        h.press(chat, "group:AA-25-07").await;
        h.text(chat, "ST-456").await;
    }

    h.text(100, "first").await;
    h.text(200, "second").await;

    assert_eq!(h.bot.last_text(), messages::REGISTRATION_STALE);
    assert!(h.sessions.is_idle(200));
    let user = h.repo.find_user_by_chat(100).await.unwrap().unwrap();
    assert_eq!(user.password, "first");
    assert!(h.repo.find_user_by_chat(200).await.unwrap().is_none());
}

/// **Test: A teacher registers through the curated group with the teacher code.**
#[tokio::test]
async fn test_teacher_registration() {
    let h = Harness::new().await;
    h.register(300, "AA-25-07", "TC-123", "pw").await;

    let user = h.repo.find_user_by_chat(300).await.unwrap().unwrap();
    assert_eq!(user.name, "Анна Смирнова");
    assert_eq!(user.role, campus_core::Role::Teacher);
}

/// **Test: Plain text with no flow suggests /register or /login; unknown commands get a notice.**
#[tokio::test]
async fn test_idle_text_and_unknown_command() {
    let h = Harness::new().await;
    h.text(100, "привет").await;
    assert_eq!(h.bot.last_text(), messages::NO_STATE_HINT);

    h.text(100, "/frobnicate").await;
    assert_eq!(h.bot.last_text(), messages::UNKNOWN_COMMAND);

    h.text(100, "/start").await;
    assert_eq!(h.bot.last_text(), messages::GREETING);
}
