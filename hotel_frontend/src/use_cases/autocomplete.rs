use crate::domain::location::{self, Destination, Location};

// Anything the autocomplete can offer: a label to fill in, a country to match on and a code.
pub trait Suggestion: 'static {
    fn label(&self) -> &'static str;
    fn country(&self) -> &'static str;
    fn code(&self) -> &'static str;

    fn matches(&self, needle: &str) -> bool {
        location::label_or_country_contains(self.label(), self.country(), needle)
    }
}

impl Suggestion for Location {
    fn label(&self) -> &'static str {
        self.name
    }

    fn country(&self) -> &'static str {
        self.country
    }

    fn code(&self) -> &'static str {
        self.code
    }
}

impl Suggestion for Destination {
    fn label(&self) -> &'static str {
        self.title
    }

    fn country(&self) -> &'static str {
        self.country
    }

    fn code(&self) -> &'static str {
        self.code
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

// Screen rectangle of the control (input plus suggestion panel).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

pub struct Autocomplete<T: 'static> {
    source: &'static [T],
    value: String,
    open: bool,
    bounds: Bounds,
}

impl<T: Suggestion> Autocomplete<T> {
    pub fn new(source: &'static [T]) -> Self {
        Self {
            source,
            value: String::new(),
            open: false,
            bounds: Bounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    // Pre-fills the field from a deep-link code unless the user already typed something.
    pub fn with_initial_code(mut self, code: &str) -> Self {
        if self.value.is_empty() {
            if let Some(item) = self.source.iter().find(|item| item.code() == code) {
                self.value = item.label().to_string();
            }
        }
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.open = !self.value.is_empty();
    }

    pub fn suggestions(&self) -> Vec<&'static T> {
        if self.value.is_empty() {
            return Vec::new();
        }
        let needle = self.value.to_lowercase();
        self.source.iter().filter(|item| item.matches(&needle)).collect()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn select(&mut self, item: &T) {
        self.value = item.label().to_string();
        self.open = false;
    }

    // Any press outside the control closes the panel.
    pub fn pointer_down(&mut self, point: Point) {
        if !self.bounds.contains(point) {
            self.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::{DESTINATIONS, LOCATIONS};

    fn labels<T: Suggestion>(items: &[&T]) -> Vec<&'static str> {
        items.iter().map(|item| item.label()).collect()
    }

    #[test]
    fn when_paris_is_typed_then_paris_is_suggested_and_selection_closes_panel() {
        let mut field = Autocomplete::new(&LOCATIONS);

        field.set_value("paris");
        let suggestions = field.suggestions();
        assert!(field.is_open());
        assert_eq!(labels(&suggestions), vec!["Paris"]);

        field.select(suggestions[0]);

        assert_eq!(field.value(), "Paris");
        assert!(!field.is_open());
    }

    #[test]
    fn when_input_is_cleared_then_panel_closes_with_no_suggestions() {
        let mut field = Autocomplete::new(&LOCATIONS);
        field.set_value("lo");
        assert!(field.is_open());

        field.set_value("");

        assert!(!field.is_open());
        assert!(field.suggestions().is_empty());
    }

    #[test]
    fn when_pointer_goes_down_outside_the_control_then_panel_closes() {
        let bounds = Bounds { x: 10.0, y: 10.0, width: 200.0, height: 40.0 };
        let mut field = Autocomplete::new(&LOCATIONS).with_bounds(bounds);
        field.set_value("tok");

        field.pointer_down(Point { x: 50.0, y: 20.0 });
        assert!(field.is_open());

        field.pointer_down(Point { x: 500.0, y: 20.0 });
        assert!(!field.is_open());
    }

    #[test]
    fn when_initial_code_is_known_then_field_is_prefilled_once() {
        let field = Autocomplete::new(&LOCATIONS).with_initial_code("IST");
        assert_eq!(field.value(), "Istanbul");

        let mut typed = Autocomplete::new(&LOCATIONS);
        typed.set_value("Rome");
        let typed = typed.with_initial_code("IST");
        assert_eq!(typed.value(), "Rome");
    }

    #[test]
    fn when_gallery_is_searched_by_country_then_destinations_match() {
        let mut field = Autocomplete::new(&DESTINATIONS);

        field.set_value("NEPAL");

        assert_eq!(labels(&field.suggestions()), vec!["Kathmandu"]);
    }

    #[test]
    fn when_locations_are_searched_then_field_and_lookup_agree() {
        for query in ["united", "PARIS", "an", "zz"] {
            let mut field = Autocomplete::new(&LOCATIONS);
            field.set_value(query);

            assert_eq!(field.suggestions(), location::matching(query), "query {query}");
        }
    }
}
