//! Property tests for transport clamping

use lesson_core::Catalog;
use lesson_playback::{LessonPlayer, MediaElement, PlayerConfig};
use lesson_storage::MemoryStore;
use proptest::prelude::*;

struct FixedMedia {
    time: f64,
    duration: f64,
}

impl MediaElement for FixedMedia {
    fn set_src(&mut self, _url: &str) {}
    fn load(&mut self) {
        self.time = 0.0;
    }
    fn play(&mut self) -> lesson_playback::Result<()> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn paused(&self) -> bool {
        true
    }
    fn current_time(&self) -> f64 {
        self.time
    }
    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }
    fn duration(&self) -> f64 {
        self.duration
    }
    fn set_playback_rate(&mut self, _rate: f64) {}
}

fn player(duration: f64) -> LessonPlayer<FixedMedia, MemoryStore> {
    let catalog = Catalog::from_json(r#"[{"title": "One", "url": "https://example.com/one.mp3"}]"#)
        .unwrap();
    LessonPlayer::new(
        catalog,
        FixedMedia {
            time: 0.0,
            duration,
        },
        MemoryStore::new(),
        PlayerConfig::default(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn seek_stays_within_track(fraction in -2.0f64..3.0, duration in 1.0f64..20_000.0) {
        let mut player = player(duration);
        let target = player.seek_to_fraction(fraction).unwrap();
        prop_assert!((0.0..=duration).contains(&target));
        prop_assert_eq!(player.media().current_time(), target);
    }

    #[test]
    fn skips_stay_within_track(
        start in 0.0f64..600.0,
        steps in prop::collection::vec(-120.0f64..120.0, 1..20),
    ) {
        let duration = 600.0;
        let mut player = player(duration);
        player.media_mut().set_current_time(start);

        for step in steps {
            let position = player.skip(step).unwrap();
            prop_assert!((0.0..=duration).contains(&position));
        }
    }
}
