use std::sync::{Arc, Mutex};

use crate::domain::hotel::Hotel;
use crate::domain::ports::{Navigator, Notice, NoticeLevel, Notifier, Route, ThemeTarget};
use crate::domain::session::Theme;

// Terminal renditions of the browser-side ports. User-facing output goes to stdout;
// diagnostics stay on the tracing subscriber (stderr).

#[derive(Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        println!("[{tag}] {}", notice.message);
    }
}

// Remembers where the last page wanted to go; the CLI prints it and exits.
#[derive(Clone, Default)]
pub struct ConsoleNavigator {
    last: Arc<Mutex<Option<Route>>>,
}

impl ConsoleNavigator {
    pub fn last_route(&self) -> Option<Route> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for ConsoleNavigator {
    fn push(&self, route: Route) {
        println!("-> {}", route.path());
        *self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(route);
    }
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleTheme;

impl ThemeTarget for ConsoleTheme {
    fn apply(&self, theme: Theme) {
        tracing::debug!(dark = theme.is_dark(), "theme applied");
    }
}

pub fn render_stars(hotel: &Hotel) -> String {
    let filled = hotel.rating.display_value() as usize;
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}

// One hotel card as a few lines of text.
pub fn render_hotel(hotel: &Hotel, bookmarked: bool) -> String {
    let marker = if bookmarked { "[saved] " } else { "" };
    let mut card = format!(
        "{marker}{} ({})  {}  {}\n  {}\n  {}\n  {}",
        hotel.name,
        hotel.id,
        render_stars(hotel),
        hotel.price_label(),
        hotel.location_line(),
        hotel.description_text(),
        hotel.image_url(),
    );
    if let Some(added) = hotel.date_added {
        card.push_str(&format!("\n  Added on: {}", added.format("%Y-%m-%d")));
    }
    card
}
