//! Preferences persisted through a file-backed store
//!
//! Verifies that a second session sees exactly what the first one wrote.

use lesson_core::LessonId;
use lesson_storage::{JsonFileStore, Preferences, ProgressMap};
use tempfile::TempDir;

#[test]
fn progress_and_preferences_survive_a_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("player.json");

    {
        let mut prefs = Preferences::new(JsonFileStore::open(&path).unwrap());
        let mut progress = ProgressMap::new();
        progress.record(&LessonId::new("4"), 125.5);
        progress.record(&LessonId::new("9"), 3.0);

        prefs.save_progress(&progress).unwrap();
        prefs.set_last_lesson_id(&LessonId::new("4")).unwrap();
        prefs.set_auto_play_next(true).unwrap();
        prefs.set_playback_speed(1.75).unwrap();
    }

    let prefs = Preferences::new(JsonFileStore::open(&path).unwrap());
    let progress = prefs.progress().unwrap();

    assert_eq!(progress.get(&LessonId::new("4")), Some(125.5));
    assert_eq!(progress.get(&LessonId::new("9")), Some(3.0));
    assert_eq!(prefs.last_lesson_id().unwrap(), Some(LessonId::new("4")));
    assert_eq!(prefs.auto_play_next().unwrap(), Some(true));
    assert_eq!(prefs.playback_speed().unwrap(), Some(1.75));
}

#[test]
fn overwriting_progress_keeps_other_lessons() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Preferences::new(JsonFileStore::open(dir.path().join("p.json")).unwrap());

    let mut progress = prefs.progress().unwrap();
    progress.record(&LessonId::new("1"), 10.0);
    prefs.save_progress(&progress).unwrap();

    let mut progress = prefs.progress().unwrap();
    progress.record(&LessonId::new("2"), 20.0);
    progress.record(&LessonId::new("1"), 15.0);
    prefs.save_progress(&progress).unwrap();

    let progress = prefs.progress().unwrap();
    assert_eq!(progress.len(), 2);
    assert_eq!(progress.get(&LessonId::new("1")), Some(15.0));
}
