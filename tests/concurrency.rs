mod common;

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};
use chrono::Utc;
use quizcast::{
    api::QueryService,
    state::{QuestionState, QuestionType},
    AppState, CommandInterpreter,
};

use common::app_state;

const READERS: usize = 8;
const WRITES: u64 = 100;

/// Spawn readers that run `check` until `done` is set; each returns its read count
fn spawn_readers<F>(state: &Arc<AppState>, done: &Arc<AtomicBool>, check: F) -> Vec<thread::JoinHandle<usize>>
where
    F: Fn(&AppState) + Send + Sync + 'static,
{
    let check = Arc::new(check);
    (0..READERS)
        .map(|_| {
            let state = Arc::clone(state);
            let done = Arc::clone(done);
            let check = Arc::clone(&check);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) || reads == 0 {
                    check(&state);
                    reads += 1;
                }
                reads
            })
        })
        .collect()
}

#[test]
fn readers_only_see_written_question_texts() {
    let state = app_state();
    let interpreter = CommandInterpreter::new(Arc::clone(&state));
    let done = Arc::new(AtomicBool::new(false));

    let mut written: HashSet<String> = (0..WRITES).map(|i| format!("Otazka cislo {}", i)).collect();
    written.insert("Default question".to_string());

    let readers = spawn_readers(&state, &done, move |state| {
        let display = QueryService::new(&state.store).current_at(Utc::now()).unwrap();
        assert!(written.contains(&display.question), "unexpected text {:?}", display.question);
    });

    for i in 0..WRITES {
        let execution = interpreter.execute_line(&format!("question Otazka cislo {i}"));
        assert_eq!(execution.replies.len(), 1);
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(state.store.question().unwrap().text, "Otazka cislo 99");
}

#[test]
fn whole_record_replacements_are_never_mixed() {
    let state = app_state();
    let done = Arc::new(AtomicBool::new(false));

    let readers = spawn_readers(&state, &done, |state| {
        let question = state.store.question().unwrap();
        if let Some(index) = question.text.strip_prefix("Q") {
            let index: u64 = index.parse().unwrap();
            assert_eq!(question.duration_budget, Duration::from_secs(index));
            let expected = if index % 2 == 0 { QuestionType::Rozstrel } else { QuestionType::Waiting };
            assert_eq!(question.kind, expected);
            assert_eq!(question.count_up, index % 3 == 0);
        }
    });

    for i in 0..WRITES {
        let kind = if i % 2 == 0 { QuestionType::Rozstrel } else { QuestionType::Waiting };
        let mut question = QuestionState::new(format!("Q{i}"), Duration::from_secs(i), kind, Utc::now());
        question.count_up = i % 3 == 0;
        state.store.replace(question).unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
}
