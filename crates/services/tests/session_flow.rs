mod support;

use std::sync::Arc;

use prep_core::{Difficulty, Role, StudyMode, fixed_clock};
use services::{ActiveView, FlashcardPhase, QuizPhase, SessionController};
use support::{FakeGateway, wait_for};

fn controller() -> (FakeGateway, SessionController) {
    let fake = FakeGateway::new();
    let shared: Arc<FakeGateway> = Arc::new(fake.clone());
    (fake, SessionController::new(shared, fixed_clock()))
}

#[tokio::test]
async fn upload_prompt_shows_whenever_the_corpus_is_empty() {
    let (fake, session) = controller();

    assert_eq!(session.active_view(), ActiveView::UploadPrompt);
    session.set_mode(StudyMode::Quiz);
    assert_eq!(session.active_view(), ActiveView::UploadPrompt);

    fake.seed_documents(&["dsa.pdf"]);
    session.corpus().refresh().await;
    assert_eq!(session.active_view(), ActiveView::Quiz);

    session.set_mode(StudyMode::Flashcards);
    assert_eq!(session.active_view(), ActiveView::Flashcards);
    session.set_mode(StudyMode::General);
    assert_eq!(session.active_view(), ActiveView::Chat);
}

#[tokio::test]
async fn mode_round_trips_never_preserve_engine_progress() {
    let (_fake, session) = controller();

    session.set_mode(StudyMode::Quiz);
    session.generate_quiz(Difficulty::Medium, 3).await.unwrap();
    session.quiz().submit_answer("an answer").await.unwrap();
    assert_eq!(session.quiz().progress().answered, 1);

    session.set_mode(StudyMode::Flashcards);
    assert_eq!(session.quiz().progress().phase, QuizPhase::NotStarted);

    session.generate_flashcards(4).await.unwrap();
    session.flashcards().next();
    assert_eq!(session.flashcards().progress().current, 1);

    session.set_mode(StudyMode::Quiz);
    assert_eq!(
        session.flashcards().progress().phase,
        FlashcardPhase::NotStarted
    );
    assert_eq!(session.quiz().progress().phase, QuizPhase::NotStarted);

    session.set_mode(StudyMode::Flashcards);
    assert_eq!(
        session.flashcards().progress().phase,
        FlashcardPhase::NotStarted
    );
}

#[tokio::test]
async fn chat_thread_survives_switches_between_chat_modes() {
    let (_fake, session) = controller();

    let greeting = session.chat().messages();
    assert_eq!(greeting.len(), 1);
    assert_eq!(greeting[0].role(), Role::Assistant);

    session.send_chat("Explain B-trees").await.unwrap();
    assert_eq!(session.chat().messages().len(), 3);

    // Chat-to-chat switches keep the history; no duplicate greeting.
    session.set_mode(StudyMode::MockInterview);
    assert_eq!(session.chat().messages().len(), 3);
}

#[tokio::test]
async fn leaving_chat_drops_the_thread_and_reentry_reseeds_it() {
    let (_fake, session) = controller();

    session.send_chat("Explain B-trees").await.unwrap();
    assert_eq!(session.chat().messages().len(), 3);

    session.set_mode(StudyMode::Quiz);
    session.set_mode(StudyMode::ResumeReview);

    let messages = session.chat().messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].content().contains("Resume Review"));
}

#[tokio::test]
async fn filters_take_effect_on_the_next_call_only() {
    let (fake, session) = controller();

    session.set_topic(Some("DSA".into()));
    session.set_mode(StudyMode::Quiz);
    session.generate_quiz(Difficulty::Hard, 2).await.unwrap();
    assert_eq!(fake.last_quiz_topic(), Some(Some("DSA".to_string())));
    assert_eq!(fake.last_quiz_difficulty(), Some(Difficulty::Hard));

    // Changing the filter mid-run does not touch the fetched questions.
    let before = session.quiz().progress().current_question;
    session.set_topic(Some("OS".into()));
    assert_eq!(session.quiz().progress().current_question, before);

    session.quiz().restart();
    session.generate_quiz(Difficulty::Easy, 2).await.unwrap();
    assert_eq!(fake.last_quiz_topic(), Some(Some("OS".to_string())));
}

#[tokio::test]
async fn blank_filters_normalize_to_none() {
    let (_fake, session) = controller();

    session.set_company(Some("  ".into()));
    assert_eq!(session.company(), None);
    session.set_company(Some("Amazon".into()));
    assert_eq!(session.company(), Some("Amazon".to_string()));
    session.set_company(None);
    assert_eq!(session.company(), None);

    session.set_topic(Some(String::new()));
    assert_eq!(session.topic(), None);
}

#[tokio::test]
async fn filters_survive_mode_switches() {
    let (_fake, session) = controller();

    session.set_company(Some("Google".into()));
    session.set_topic(Some("System Design".into()));
    session.set_mode(StudyMode::Quiz);
    session.set_mode(StudyMode::CompanySpecific);

    assert_eq!(session.company(), Some("Google".to_string()));
    assert_eq!(session.topic(), Some("System Design".to_string()));
}

#[tokio::test]
async fn company_scoped_greeting_uses_the_active_filter() {
    let (_fake, session) = controller();

    session.set_company(Some("Amazon".into()));
    session.set_mode(StudyMode::Quiz);
    session.set_mode(StudyMode::CompanySpecific);

    let messages = session.chat().messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].content().contains("Amazon"));
}

#[tokio::test]
async fn stale_chat_response_never_reaches_the_new_thread() {
    let (fake, session) = controller();

    fake.pause();
    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.send_chat("Old question").await })
    };
    {
        let chat = session.chat().clone();
        wait_for(move || chat.is_pending()).await;
    }

    // Switching away discards the thread while the query is in flight.
    session.set_mode(StudyMode::Quiz);
    fake.release();
    pending.await.unwrap().unwrap();

    session.set_mode(StudyMode::General);
    let messages = session.chat().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role(), Role::Assistant);
    assert!(!session.chat().is_pending());
}

#[tokio::test]
async fn requests_of_different_engines_may_overlap() {
    let (fake, session) = controller();
    fake.seed_documents(&["dsa.pdf"]);

    fake.pause();
    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.send_chat("Slow question").await })
    };
    {
        let chat = session.chat().clone();
        wait_for(move || chat.is_pending()).await;
    }

    // The corpus refresh is not gated by the chat engine's in-flight query.
    session.corpus().refresh().await;
    assert_eq!(session.corpus().documents(), vec!["dsa.pdf".to_string()]);

    fake.release();
    pending.await.unwrap().unwrap();
    assert_eq!(session.chat().messages().len(), 3);
}

#[tokio::test]
async fn switching_to_the_same_mode_is_a_no_op() {
    let (_fake, session) = controller();

    session.set_mode(StudyMode::Quiz);
    session.generate_quiz(Difficulty::Medium, 2).await.unwrap();
    session.quiz().submit_answer("an answer").await.unwrap();

    session.set_mode(StudyMode::Quiz);
    assert_eq!(session.quiz().progress().answered, 1);
}
