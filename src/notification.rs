//! User-facing notifications.
//!
//! Each surface (alert, popup, notification) shows at most one message at
//! a time. Messages added while a surface is busy wait in that surface's
//! queue until the current one is dismissed. Rendering is delegated to a
//! [`Presenter`].

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Short toast
    #[default]
    Alert,
    /// Modal with a title
    Popup,
    /// Longer-lived side panel message
    Notification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Danger,
    Warning,
    #[default]
    Info,
    Success,
}

/// Defaults applied to requests that leave fields unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub default_surface: Surface,
    pub default_level: Level,
    pub alert_ms: u64,
    pub popup_ms: u64,
    pub notification_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_surface: Surface::Alert,
            default_level: Level::Info,
            alert_ms: 2000,
            popup_ms: 6000,
            notification_ms: 4000,
        }
    }
}

impl NotificationConfig {
    pub fn default_duration(&self, surface: Surface) -> Duration {
        let ms = match surface {
            Surface::Alert => self.alert_ms,
            Surface::Popup => self.popup_ms,
            Surface::Notification => self.notification_ms,
        };
        Duration::from_millis(ms)
    }
}

/// A message as it is displayed
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub surface: Surface,
    pub level: Level,
    pub title: String,
    /// `None` stays up until dismissed
    pub duration: Option<Duration>,
}

/// A message to display; unset fields take the configured defaults
#[derive(Debug, Clone, Default)]
pub struct NotificationRequest {
    pub text: String,
    pub surface: Option<Surface>,
    pub level: Option<Level>,
    pub title: Option<String>,
    pub duration: Option<Option<Duration>>, // Some(None) to stay until dismissed
}

impl NotificationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(Some(duration));
        self
    }

    pub fn sticky(mut self) -> Self {
        self.duration = Some(None);
        self
    }
}

/// Renders a notification on its surface
pub trait Presenter {
    fn present(&mut self, notification: &Notification);
}

#[derive(Debug, Default)]
struct Lane {
    queue: VecDeque<Notification>,
    active: Option<Notification>,
}

/// Per-surface single-flight notification queues
pub struct NotificationCenter {
    config: NotificationConfig,
    lanes: HashMap<Surface, Lane>,
    presenter: Box<dyn Presenter>,
}

impl NotificationCenter {
    pub fn new(config: NotificationConfig, presenter: Box<dyn Presenter>) -> Self {
        Self {
            config,
            lanes: HashMap::new(),
            presenter,
        }
    }

    /// Queue a message, showing it right away if its surface is free.
    ///
    /// Returns true if the message is now on screen.
    pub fn add(&mut self, request: NotificationRequest) -> bool {
        let surface = request.surface.unwrap_or(self.config.default_surface);
        let notification = Notification {
            text: request.text,
            surface,
            level: request.level.unwrap_or(self.config.default_level),
            title: request.title.unwrap_or_default(),
            duration: request
                .duration
                .unwrap_or_else(|| Some(self.config.default_duration(surface))),
        };

        self.lane_mut(surface).queue.push_back(notification);
        self.dequeue(surface)
    }

    /// Shorthand for a message on the default surface
    pub fn notify(&mut self, level: Level, text: impl Into<String>) -> bool {
        self.add(NotificationRequest::new(text).level(level))
    }

    /// Show the next queued message if the surface is free
    pub fn dequeue(&mut self, surface: Surface) -> bool {
        let lane = self.lane_mut(surface);
        if lane.active.is_some() {
            return false;
        }
        let Some(next) = lane.queue.pop_front() else {
            return false;
        };
        lane.active = Some(next.clone());
        self.presenter.present(&next);
        true
    }

    /// Close the message on `surface` and show the next one.
    ///
    /// Returns false if nothing was showing.
    pub fn dismiss(&mut self, surface: Surface) -> bool {
        if self.lane_mut(surface).active.take().is_none() {
            return false;
        }
        self.dequeue(surface);
        true
    }

    /// Dismiss until the surface is idle; returns how many were dismissed
    pub fn drain(&mut self, surface: Surface) -> usize {
        let mut dismissed = 0;
        while self.dismiss(surface) {
            dismissed += 1;
        }
        dismissed
    }

    pub fn drain_all(&mut self) -> usize {
        [Surface::Alert, Surface::Popup, Surface::Notification]
            .into_iter()
            .map(|surface| self.drain(surface))
            .sum()
    }

    pub fn active(&self, surface: Surface) -> Option<&Notification> {
        self.lanes.get(&surface).and_then(|lane| lane.active.as_ref())
    }

    pub fn pending(&self, surface: Surface) -> usize {
        self.lanes.get(&surface).map_or(0, |lane| lane.queue.len())
    }

    fn lane_mut(&mut self, surface: Surface) -> &mut Lane {
        self.lanes.entry(surface).or_default()
    }
}
