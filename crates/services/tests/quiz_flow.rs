use learn_core::model::{LessonId, Module};
use learn_core::time::fixed_clock;
use learn_core::{Advance, QuizSession};
use services::{AppServices, LessonServiceError, SignUpOutcome, SignUpRequest};

fn day(n: u8) -> LessonId {
    LessonId::new(format!("day-{n}")).unwrap()
}

/// Answer every question, picking the right option for the first `correct` ones.
fn play(quiz: &mut QuizSession, correct: usize) -> learn_core::QuizResult {
    loop {
        let question = quiz.current_question().unwrap().clone();
        let pick = if quiz.current_index() < correct {
            question.correct_index()
        } else {
            (question.correct_index() + 1) % question.options().len()
        };
        quiz.select_answer(pick).unwrap();
        quiz.submit_answer().unwrap();
        if let Advance::Completed(result) = quiz.advance().unwrap() {
            return result;
        }
    }
}

#[tokio::test]
async fn completing_a_day_unlocks_the_next() {
    let services = AppServices::in_memory(fixed_clock()).unwrap();
    let SignUpOutcome::SignedIn(me) = services
        .auth()
        .sign_up(&SignUpRequest {
            full_name: "Asha Nair".into(),
            email: "asha@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        })
        .await
        .unwrap()
    else {
        panic!("offline sign-up signs in");
    };

    let lessons = services.lessons();
    let progress = services.progress();

    let records = progress.records(Some(&me)).await.unwrap();
    assert!(matches!(
        lessons.ensure_accessible(&records, &day(2)),
        Err(LessonServiceError::Locked { .. })
    ));

    // 2 of 5 is 40%: stored, but not completed.
    let mut quiz = lessons.start_quiz(&day(1)).unwrap();
    let result = play(&mut quiz, 2);
    assert_eq!(result.percentage(), 40);
    progress
        .record_result(Some(&me), &day(1), &result)
        .await
        .unwrap();
    let records = progress.records(Some(&me)).await.unwrap();
    assert!(lessons.ensure_accessible(&records, &day(2)).is_err());

    // Retake at 3 of 5 is exactly the threshold.
    let mut retake = quiz.restarted();
    let result = play(&mut retake, 3);
    assert!(result.is_passing());
    progress
        .record_result(Some(&me), &day(1), &result)
        .await
        .unwrap();

    let records = progress.records(Some(&me)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(lessons.ensure_accessible(&records, &day(2)).is_ok());
    assert!(lessons.ensure_accessible(&records, &day(3)).is_err());

    let overview = progress.overview(Some(&me)).await.unwrap();
    assert_eq!(overview.days.completed_days, 1);
    assert_eq!(overview.days.current_day.value(), 2);
    assert_eq!(overview.module(Module::Days), 20);
    assert_eq!(overview.stats.lessons_completed, 1);
}

#[tokio::test]
async fn anonymous_learner_can_finish_a_quiz() {
    let services = AppServices::in_memory(fixed_clock()).unwrap();
    let lessons = services.lessons();

    let mut quiz = lessons.start_quiz(&day(1)).unwrap();
    let result = play(&mut quiz, 5);
    assert_eq!(result.percentage(), 100);

    let saved = services
        .progress()
        .record_result(None, &day(1), &result)
        .await
        .unwrap();
    assert!(saved.is_none());

    let overview = services.progress().overview(None).await.unwrap();
    assert_eq!(overview.days.completed_days, 0);
    assert_eq!(overview.overall.percentage, 0);
}
