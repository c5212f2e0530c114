//! Core types for the lesson player

use lesson_core::{drive::DEFAULT_PROXY_ROUTE, LessonId};
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No lesson loaded (empty catalog)
    Stopped,

    /// Lesson loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Icon the play/pause button should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    /// SVG path data for the icon
    pub fn svg_path(self) -> &'static str {
        match self {
            PlayIcon::Play => "M8 5v14l11-7z",
            PlayIcon::Pause => "M6 5h4v14H6zm8 0h4v14h-4z",
        }
    }
}

impl From<PlaybackState> for PlayIcon {
    fn from(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Playing => PlayIcon::Pause,
            PlaybackState::Paused | PlaybackState::Stopped => PlayIcon::Play,
        }
    }
}

/// Reading direction of the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// 0% on the left
    LeftToRight,

    /// 0% on the right
    RightToLeft,
}

/// Configuration for the lesson player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Route of the audio proxy (default: `/api/audio`)
    pub proxy_route: String,

    /// Step used by the skip buttons, in seconds (default: 5)
    pub skip_seconds: f64,

    /// Progress bar direction (default: right-to-left)
    pub direction: LayoutDirection,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            proxy_route: DEFAULT_PROXY_ROUTE.to_string(),
            skip_seconds: 5.0,
            direction: LayoutDirection::RightToLeft,
        }
    }
}

/// Snapshot of everything the transport and details panels display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// 1-based position of the current lesson
    pub lesson_number: Option<usize>,
    pub total_lessons: usize,
    pub title: String,
    pub description: Vec<String>,
    pub transcription: Option<String>,
    /// Progress bar fill, 0-100
    pub percent: f64,
    pub current_time: String,
    pub duration: String,
    pub state: PlaybackState,
    pub icon: PlayIcon,
    pub auto_play_next: bool,
    pub playback_speed: f64,
}

/// One row of the sidebar lesson list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonListItem {
    pub index: usize,
    pub id: LessonId,
    pub title: String,
    /// Formatted resume position, `None` when not started
    pub resume_at: Option<String>,
    pub active: bool,
    /// Original lesson URL, for the download button
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.proxy_route, "/api/audio");
        assert_eq!(config.skip_seconds, 5.0);
        assert_eq!(config.direction, LayoutDirection::RightToLeft);
    }

    #[test]
    fn icon_follows_state() {
        assert_eq!(PlayIcon::from(PlaybackState::Playing), PlayIcon::Pause);
        assert_eq!(PlayIcon::from(PlaybackState::Paused), PlayIcon::Play);
        assert_eq!(PlayIcon::from(PlaybackState::Stopped), PlayIcon::Play);
    }
}
