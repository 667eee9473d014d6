//! Randomized checks over operation sequences.

use md_toolbar::{Command, CommandOutcome, NoopReason, Operation, Selection, ToolbarExecutor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED_TEXT: &str = "First line\nsecond line with ünïcödé\n\n- existing item\n  indented 日本語";

fn random_selection(rng: &mut StdRng, len: usize) -> (usize, usize) {
    let a = rng.gen_range(0..=len);
    let b = rng.gen_range(0..=len);
    (a.min(b), a.max(b))
}

#[test]
fn test_every_operation_noops_on_caret() {
    let len = SEED_TEXT.chars().count();
    for op in Operation::ALL {
        for caret in [0, 5, len] {
            let mut executor = ToolbarExecutor::new(SEED_TEXT);
            executor.set_selection(caret, caret).unwrap();

            let outcome = executor.execute(Command::Format(op));
            assert_eq!(outcome, CommandOutcome::Noop(NoopReason::EmptySelection));
            assert_eq!(executor.text(), SEED_TEXT);
            assert_eq!(executor.undo_depth(), 0);
            assert_eq!(executor.redo_depth(), 0);
        }
    }
}

#[test]
fn test_transform_selection_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut executor = ToolbarExecutor::new(SEED_TEXT);

    for _ in 0..500 {
        let len = executor.text().chars().count();
        let (start, end) = random_selection(&mut rng, len);
        executor.set_selection(start, end).unwrap();

        let op = Operation::ALL[rng.gen_range(0..Operation::ALL.len())];
        if let CommandOutcome::Applied(request) = executor.execute(Command::Format(op)) {
            let new_len = request.text.chars().count();
            assert!(request.selection.start <= request.selection.end);
            assert!(request.selection.end <= new_len, "{op} produced {:?}", request.selection);
            assert!(request.restore_focus);
        }
    }
}

#[test]
fn test_random_sequence_undo_all_restores_original() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut executor = ToolbarExecutor::new(SEED_TEXT);
    let mut applied = 0;
    let mut final_text = String::new();

    while applied < 30 {
        let len = executor.text().chars().count();
        let (start, end) = random_selection(&mut rng, len);
        executor.set_selection(start, end).unwrap();
        let op = Operation::ALL[rng.gen_range(0..Operation::ALL.len())];
        if executor.execute(Command::Format(op)).is_applied() {
            applied += 1;
            final_text = executor.text().to_string();
        }
    }

    for _ in 0..applied {
        assert!(executor.execute(Command::Undo).is_applied());
    }
    assert_eq!(executor.text(), SEED_TEXT);

    for _ in 0..applied {
        assert!(executor.execute(Command::Redo).is_applied());
    }
    assert_eq!(executor.text(), final_text);
}

#[test]
fn test_transform_only_touches_selection() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let len = SEED_TEXT.chars().count();
        let (start, end) = random_selection(&mut rng, len);
        if start == end {
            continue;
        }
        let op = Operation::ALL[rng.gen_range(0..Operation::ALL.len())];
        let result = md_toolbar::transform::apply(op, SEED_TEXT, Selection::new(start, end));

        let prefix: String = SEED_TEXT.chars().take(start).collect();
        let suffix: String = SEED_TEXT.chars().skip(end).collect();
        assert!(result.text.starts_with(&prefix));
        assert!(result.text.ends_with(&suffix));
    }
}
