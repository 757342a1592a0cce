use crate::domain::location::{DESTINATIONS, Destination};
use crate::domain::ports::{Navigator, Route};
use crate::use_cases::autocomplete::{Autocomplete, Suggestion};

pub const SEARCH_ERROR: &str = "Please enter a valid location (city).";

// Home page: destination gallery with a destination search box.
pub struct HomePage<V> {
    pub navigator: V,
    pub search: Autocomplete<Destination>,
    search_error: bool,
}

impl<V> HomePage<V>
where
    V: Navigator,
{
    pub fn new(navigator: V) -> Self {
        Self {
            navigator,
            search: Autocomplete::new(&DESTINATIONS),
            search_error: false,
        }
    }

    pub fn destinations(&self) -> &'static [Destination] {
        &DESTINATIONS
    }

    pub fn search_error(&self) -> bool {
        self.search_error
    }

    pub fn select(&mut self, destination: &Destination) {
        self.search.select(destination);
        self.search_error = false;
    }

    // Exact title first, then the first suggestion; anything else flags the input.
    pub fn submit(&mut self) -> Option<&'static str> {
        let query = self.search.value().trim().to_lowercase();
        if query.is_empty() {
            self.search_error = true;
            return None;
        }

        let exact = DESTINATIONS
            .iter()
            .find(|destination| destination.title.to_lowercase() == query);
        let chosen = exact.or_else(|| self.search.suggestions().first().copied());

        match chosen {
            Some(destination) => {
                self.search_error = false;
                self.pick(destination.code());
                Some(destination.code())
            }
            None => {
                self.search_error = true;
                None
            }
        }
    }

    pub fn pick(&self, code: &str) {
        self.navigator.push(Route::SearchFilter {
            location: Some(code.to_string()),
        });
    }
}
