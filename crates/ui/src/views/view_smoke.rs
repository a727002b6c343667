use learn_core::model::Module;

use super::test_harness::{ViewKind, learner, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_question_of_the_day_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Home, None, 0).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question of the Day"), "missing daily question in {html}");
    assert!(html.contains("Question 1 of 1"), "missing quiz header in {html}");
    assert!(html.contains("Submit Answer"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_greets_signed_in_learner() {
    let mut harness = setup_view_harness(ViewKind::Home, Some(learner()), 2).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Asha Nair!"), "missing greeting in {html}");
    assert!(html.contains("2/5"), "missing days counter in {html}");
    assert!(html.contains("Continue Day 3"), "missing continue card in {html}");
    assert!(!html.contains("Question of the Day"), "landing shown to learner: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn days_view_smoke_locks_later_days() {
    let mut harness = setup_view_harness(ViewKind::Days, Some(learner()), 1).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1/5 Days Completed (20%)"), "missing progress in {html}");
    assert!(html.contains("Complete Day 2 to unlock"), "missing lock on day 3 in {html}");
    assert!(!html.contains("Complete Day 1 to unlock"), "day 2 should be open: {html}");
    assert!(html.contains("✓ Completed"), "missing completed badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn days_view_smoke_opens_only_day_one_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Days, None, 0).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0/5 Days Completed (0%)"), "missing progress in {html}");
    assert!(html.contains("Complete Day 1 to unlock"), "day 2 should be locked: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_first_day() {
    let mut harness = setup_view_harness(ViewKind::Lesson("day-1".into()), None, 0).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Day 1: Introduction to Malayalam"), "missing heading in {html}");
    assert!(html.contains("Take the Test (5 questions)"), "missing quiz button in {html}");
    assert!(html.contains("Score 60% or more to unlock Day 2!"), "missing hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_blocks_locked_day() {
    let mut harness = setup_view_harness(ViewKind::Lesson("day-3".into()), Some(learner()), 1).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Complete Day 2 to unlock Day 3."),
        "missing lock message in {html}"
    );
    assert!(html.contains("Back to Days"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_reports_unknown_lesson() {
    let mut harness = setup_view_harness(ViewKind::Lesson("day-42".into()), None, 0).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("This lesson does not exist."), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_lists_basics() {
    let mut harness = setup_view_harness(ViewKind::Module(Module::Basics), None, 0).await;
    harness.settle().await;
    let html = harness.render();
    for title in ["Alphabets", "Greetings", "Pronouns"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(!html.contains("✓ Completed"), "nothing is completed yet: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_prompts_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Progress, None, 0).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in to track your progress"), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_overview() {
    let mut harness = setup_view_harness(ViewKind::Progress, Some(learner()), 5).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("5 of 10 lessons completed"), "missing caption in {html}");
    assert!(html.contains("50%"), "missing overall percentage in {html}");
    assert!(html.contains("5/5"), "missing days label in {html}");
}
