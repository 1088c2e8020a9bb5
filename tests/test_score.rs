use invaders::score::{HighScoreRecord, HighScoreStore};

use tempfile::tempdir;

fn record(name: &str, score: u32) -> HighScoreRecord {
    HighScoreRecord {
        name: Some(name.to_string()),
        score,
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path().join("score.dat"));

    store.save(&record("Bob", 5000));
    assert_eq!(store.load(), record("Bob", 5000));
}

#[test]
fn save_overwrites_the_previous_record() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path().join("score.dat"));

    store.save(&record("Bob", 5000));
    store.save(&record("Alice", 7200));
    assert_eq!(store.load(), record("Alice", 7200));
}

#[test]
fn missing_file_loads_the_default() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path().join("does_not_exist"));
    assert_eq!(store.load(), HighScoreRecord::default());
}

#[test]
fn garbage_content_loads_the_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("score.dat");
    std::fs::write(&path, "not a record at all").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), HighScoreRecord::default());
}

#[test]
fn unparsable_score_loads_the_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("score.dat");
    std::fs::write(&path, "Bob;over9000").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), HighScoreRecord::default());
}

#[test]
fn empty_name_loads_the_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("score.dat");
    std::fs::write(&path, ";123").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), HighScoreRecord::default());
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("score.dat");
    std::fs::write(&path, " Alice ; 4200 \n").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), record("Alice", 4200));
}

#[test]
fn write_failure_is_swallowed() {
    let dir = tempdir().unwrap();
    // Parent directory does not exist, so the write fails
    let store = HighScoreStore::new(dir.path().join("no_such_dir").join("score.dat"));
    store.save(&record("Bob", 5000));
    assert_eq!(store.load(), HighScoreRecord::default());
}

#[test]
fn display_name_defaults_to_none() {
    assert_eq!(HighScoreRecord::default().display_name(), "None");
    assert_eq!(record("Ada", 1).display_name(), "Ada");
}
