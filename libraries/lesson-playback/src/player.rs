//! Lesson player - core orchestration
//!
//! Keeps the transport, the progress view and the persisted state in step
//! with a native media element's playback clock.

use crate::{
    error::{PlayerError, Result},
    events::PlayerEvent,
    media::{known_duration, MediaElement},
    types::{LayoutDirection, LessonListItem, PlayIcon, PlaybackState, PlayerConfig, PlayerView},
};
use lesson_core::{format_time, resolve_source, Catalog, Lesson};
use lesson_storage::{KeyValueStore, Preferences, ProgressMap};

/// Playback rate used until the user picks one
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

/// A clock within this distance of a pending resume offset counts as resumed
const RESUME_TOLERANCE_SECS: f64 = 1.0;

/// Left-to-right pointer fraction for a click on the progress bar
pub fn pointer_fraction(client_x: f64, bar_left: f64, bar_width: f64) -> f64 {
    if bar_width <= 0.0 {
        return 0.0;
    }
    (client_x - bar_left) / bar_width
}

/// Lesson player controller
///
/// Owns the catalog, the media element and the preference store. All
/// methods run on the UI thread in response to input or media events;
/// there is no internal concurrency.
///
/// # Example
///
/// ```rust,ignore
/// let mut player = LessonPlayer::new(catalog, audio, store, PlayerConfig::default())?;
///
/// // wire media events
/// player.on_loaded_metadata();
/// player.on_time_update();
///
/// // transport
/// player.toggle_play_pause()?;
/// player.play_next()?;
/// ```
pub struct LessonPlayer<M, S> {
    catalog: Catalog,
    media: M,
    preferences: Preferences<S>,
    config: PlayerConfig,

    current_index: Option<usize>,
    state: PlaybackState,

    progress: ProgressMap,
    auto_play_next: bool,
    playback_speed: f64,

    /// Saved offset waiting for metadata before it can be trusted
    pending_resume: Option<f64>,

    // Progress view
    percent: f64,
    current_time_label: String,
    duration_label: String,

    events: Vec<PlayerEvent>,
}

impl<M: MediaElement, S: KeyValueStore> LessonPlayer<M, S> {
    /// Create a player and open the last lesson (paused)
    ///
    /// Restores saved progress, the auto-advance flag and the playback
    /// speed, then loads the lesson recorded as open last, falling back to
    /// the first one. An empty catalog leaves the player stopped.
    pub fn new(catalog: Catalog, media: M, store: S, config: PlayerConfig) -> Result<Self> {
        let preferences = Preferences::new(store);
        let progress = preferences.progress()?;
        let auto_play_next = preferences.auto_play_next()?.unwrap_or(false);
        let playback_speed = preferences
            .playback_speed()?
            .unwrap_or(DEFAULT_PLAYBACK_SPEED);
        let last_lesson = preferences.last_lesson_id()?;

        let mut player = Self {
            catalog,
            media,
            preferences,
            config,
            current_index: None,
            state: PlaybackState::Stopped,
            progress,
            auto_play_next,
            playback_speed,
            pending_resume: None,
            percent: 0.0,
            current_time_label: format_time(0.0),
            duration_label: format_time(f64::NAN),
            events: Vec::new(),
        };

        player.media.set_playback_rate(playback_speed);

        if player.catalog.is_empty() {
            tracing::warn!("No lessons available");
            return Ok(player);
        }

        let start = last_lesson
            .and_then(|id| player.catalog.index_of(&id))
            .unwrap_or(0);
        player.load_lesson(start, false)?;

        Ok(player)
    }

    // ===== Lesson Selection =====

    /// Load the lesson at `index`, optionally starting playback
    ///
    /// Drive-hosted lessons are routed through the audio proxy; anything
    /// else is handed to the media element as-is. A saved position is
    /// applied right away and again once metadata arrives.
    pub fn load_lesson(&mut self, index: usize, should_play: bool) -> Result<()> {
        let lesson = self
            .catalog
            .get(index)
            .ok_or(PlayerError::IndexOutOfBounds(index))?;
        let id = lesson.id.clone();
        let src = resolve_source(&lesson.url).playable_url(&self.config.proxy_route);

        tracing::debug!("Loading lesson {} ({})", id, src);

        self.current_index = Some(index);
        self.media.set_src(&src);
        self.media.load();
        self.media.set_playback_rate(self.playback_speed);

        self.percent = 0.0;
        self.current_time_label = format_time(0.0);
        self.duration_label = format_time(f64::NAN);

        self.pending_resume = self.progress.get(&id).filter(|secs| *secs > 0.0);
        if let Some(position) = self.pending_resume {
            self.media.set_current_time(position);
        }

        let result = self.preferences.set_last_lesson_id(&id);
        self.persist(result);

        self.events.push(PlayerEvent::LessonChanged {
            index,
            lesson_id: id,
        });

        if should_play {
            self.start_playback();
        } else {
            self.set_state(PlaybackState::Paused);
        }

        Ok(())
    }

    /// Load the previous lesson and play it; `false` at the first lesson
    pub fn play_previous(&mut self) -> Result<bool> {
        match self.previous_index() {
            Some(index) => {
                self.load_lesson(index, true)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Load the next lesson and play it; `false` at the last lesson
    pub fn play_next(&mut self) -> Result<bool> {
        match self.next_index() {
            Some(index) => {
                self.load_lesson(index, true)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.previous_index().is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_index().is_some()
    }

    fn previous_index(&self) -> Option<usize> {
        self.current_index.and_then(|i| i.checked_sub(1))
    }

    fn next_index(&self) -> Option<usize> {
        self.current_index
            .map(|i| i + 1)
            .filter(|i| *i < self.catalog.len())
    }

    // ===== Transport =====

    /// Play if paused, pause if playing; returns the new state
    pub fn toggle_play_pause(&mut self) -> Result<PlaybackState> {
        self.require_lesson()?;

        if self.media.paused() {
            self.start_playback();
        } else {
            self.media.pause();
            self.set_state(PlaybackState::Paused);
        }

        Ok(self.state)
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        self.require_lesson()?;
        self.start_playback();
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.current_index.is_some() {
            self.media.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Move the clock by `seconds` (negative skips back)
    ///
    /// Clamped at zero, and at the duration once it is known. Returns the
    /// new position.
    pub fn skip(&mut self, seconds: f64) -> Result<f64> {
        self.require_lesson()?;

        let mut target = (self.media.current_time() + seconds).max(0.0);
        if let Some(duration) = known_duration(&self.media) {
            target = target.min(duration);
        }

        self.seek_media(target);
        Ok(target)
    }

    /// Skip forward by the configured step
    pub fn skip_forward(&mut self) -> Result<f64> {
        self.skip(self.config.skip_seconds)
    }

    /// Skip back by the configured step
    pub fn skip_back(&mut self) -> Result<f64> {
        self.skip(-self.config.skip_seconds)
    }

    /// Seek to a point on the progress bar
    ///
    /// `fraction` is the left-to-right pointer position (0.0-1.0, clamped).
    /// In a right-to-left layout it is mirrored, since 0% sits on the right.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<f64> {
        self.require_lesson()?;
        let duration = known_duration(&self.media).ok_or(PlayerError::DurationUnknown)?;

        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let fraction = match self.config.direction {
            LayoutDirection::LeftToRight => fraction,
            LayoutDirection::RightToLeft => 1.0 - fraction,
        };

        let target = fraction * duration;
        self.seek_media(target);
        Ok(target)
    }

    /// Set and persist the playback rate
    pub fn set_playback_speed(&mut self, speed: f64) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PlayerError::InvalidSpeed(speed));
        }

        self.playback_speed = speed;
        self.media.set_playback_rate(speed);

        let result = self.preferences.set_playback_speed(speed);
        self.persist(result);
        Ok(())
    }

    /// Set and persist the auto-advance flag
    pub fn set_auto_play_next(&mut self, enabled: bool) {
        self.auto_play_next = enabled;

        let result = self.preferences.set_auto_play_next(enabled);
        self.persist(result);
    }

    // ===== Media Events =====

    /// Handle the media element's `timeupdate`
    ///
    /// Refreshes the progress view and records the position for the
    /// current lesson. Nothing happens until the duration is known.
    pub fn on_time_update(&mut self) {
        let Some(duration) = known_duration(&self.media) else {
            return;
        };
        let position = self.media.current_time();

        self.percent = (position / duration * 100.0).clamp(0.0, 100.0);
        self.current_time_label = format_time(position);
        self.events.push(PlayerEvent::PositionChanged {
            position_secs: position,
            duration_secs: duration,
        });

        if let Some(pending) = self.pending_resume {
            // Until the saved offset is applied the clock still reads from
            // zero; recording it would wipe the saved position.
            if (position - pending).abs() > RESUME_TOLERANCE_SECS {
                return;
            }
            self.pending_resume = None;
        }

        let Some(id) = self.current_lesson().map(|lesson| lesson.id.clone()) else {
            return;
        };

        if self.progress.record(&id, position) {
            let result = self.preferences.save_progress(&self.progress);
            self.persist(result);
        }
    }

    /// Handle the media element's `loadedmetadata`
    pub fn on_loaded_metadata(&mut self) {
        let duration = self.media.duration();
        self.duration_label = format_time(duration);

        if let Some(duration) = known_duration(&self.media) {
            self.events.push(PlayerEvent::DurationChanged {
                duration_secs: duration,
            });
        }

        if let Some(position) = self.pending_resume.take() {
            self.media.set_current_time(position);

            if let Some(lesson) = self.current_lesson() {
                self.events.push(PlayerEvent::Resumed {
                    lesson_id: lesson.id.clone(),
                    position_secs: position,
                });
            }
        }
    }

    /// Handle the media element's `ended`
    ///
    /// Advances to the next lesson when auto-advance is on and there is
    /// one; otherwise the transport returns to its paused look.
    pub fn on_ended(&mut self) -> Result<()> {
        let Some(lesson_id) = self.current_lesson().map(|lesson| lesson.id.clone()) else {
            return Ok(());
        };

        if self.auto_play_next {
            if let Some(next) = self.next_index() {
                self.events.push(PlayerEvent::LessonEnded {
                    lesson_id,
                    advanced: true,
                });
                return self.load_lesson(next, true);
            }
        }

        self.set_state(PlaybackState::Paused);
        self.events.push(PlayerEvent::LessonEnded {
            lesson_id,
            advanced: false,
        });
        Ok(())
    }

    /// Handle the media element's `pause` (OS controls, headset, end of buffer)
    pub fn on_paused(&mut self) {
        if self.current_index.is_some() && self.media.paused() {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Handle a `play()` request the platform refused after accepting it
    ///
    /// Browsers report autoplay refusals asynchronously, after `play()`
    /// already returned.
    pub fn on_play_rejected(&mut self, reason: &str) {
        if self.current_index.is_none() {
            return;
        }

        tracing::warn!("Playback blocked: {}", reason);
        self.events.push(PlayerEvent::Error {
            message: PlayerError::MediaElement(reason.to_string()).to_string(),
        });
        self.set_state(PlaybackState::Paused);
    }

    // ===== State Queries =====

    /// Snapshot for the transport and details panels
    pub fn view(&self) -> PlayerView {
        let lesson = self.current_lesson();

        PlayerView {
            lesson_number: self.current_index.map(|i| i + 1),
            total_lessons: self.catalog.len(),
            title: lesson.map(|l| l.title.clone()).unwrap_or_default(),
            description: lesson
                .map(|l| l.description.lines().into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            transcription: lesson.and_then(|l| l.transcription.clone()),
            percent: self.percent,
            current_time: self.current_time_label.clone(),
            duration: self.duration_label.clone(),
            state: self.state,
            icon: PlayIcon::from(self.state),
            auto_play_next: self.auto_play_next,
            playback_speed: self.playback_speed,
        }
    }

    /// Rows for the sidebar lesson list
    pub fn lesson_list(&self) -> Vec<LessonListItem> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(index, lesson)| LessonListItem {
                index,
                id: lesson.id.clone(),
                title: lesson.title.clone(),
                resume_at: self
                    .progress
                    .get(&lesson.id)
                    .filter(|secs| *secs > 0.0)
                    .map(format_time),
                active: self.current_index == Some(index),
                download_url: lesson.url.clone(),
            })
            .collect()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.current_index.and_then(|i| self.catalog.get(i))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn auto_play_next(&self) -> bool {
        self.auto_play_next
    }

    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    /// Tear down the player, returning the media element and store
    pub fn into_parts(self) -> (M, S) {
        (self.media, self.preferences.into_inner())
    }

    // ===== Internals =====

    fn require_lesson(&self) -> Result<usize> {
        self.current_index.ok_or(PlayerError::NoLessonLoaded)
    }

    fn start_playback(&mut self) {
        match self.media.play() {
            Ok(()) => self.set_state(PlaybackState::Playing),
            Err(e) => {
                tracing::warn!("Playback blocked: {}", e);
                self.events.push(PlayerEvent::Error {
                    message: e.to_string(),
                });
                self.set_state(PlaybackState::Paused);
            }
        }
    }

    fn seek_media(&mut self, position: f64) {
        // An explicit seek supersedes any resume still waiting for metadata
        self.pending_resume = None;
        self.media.set_current_time(position);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn persist(&mut self, result: lesson_storage::Result<()>) {
        if let Err(e) = result {
            tracing::warn!("Failed to persist player state: {}", e);
            self.events.push(PlayerEvent::Error {
                message: e.to_string(),
            });
        }
    }
}
