use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::domain::errors::CriteriaError;
use crate::domain::filter::PriceRange;
use crate::domain::location;

const DEFAULT_STAY_NIGHTS: u64 = 3;
pub const DEFAULT_MAX_RATES_PER_ROOM: u32 = 5;

/// Selected star checkboxes (1 to 5).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarSelection(BTreeSet<u32>);

impl StarSelection {
    pub fn from_stars(stars: impl IntoIterator<Item = u32>) -> Self {
        Self(stars.into_iter().filter(|s| (1..=5).contains(s)).collect())
    }

    pub fn toggle(&mut self, star: u32) {
        if !(1..=5).contains(&star) {
            return;
        }
        if !self.0.remove(&star) {
            self.0.insert(star);
        }
    }

    pub fn contains(&self, star: u32) -> bool {
        self.0.contains(&star)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Collapses the selection into the backend's min/max category pair.
    ///
    /// This is lossy for disjoint selections: {2, 5} is sent as 2..=5 and the backend
    /// will also return 3 and 4 star hotels.
    pub fn category_range(&self) -> Option<(u32, u32)> {
        let min = *self.0.first()?;
        let max = *self.0.last()?;
        Some((min, max))
    }
}

// How a load-more page combines with the results already shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultAccumulation {
    #[default]
    Replace,
    Append,
}

impl FromStr for ResultAccumulation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(format!("unknown results mode '{other}' (expected replace or append)")),
        }
    }
}

// Search form state; rebuilt into a query on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub location: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub price: PriceRange,
    pub stars: StarSelection,
    pub max_rates_per_room: u32,
}

impl SearchCriteria {
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            location: String::new(),
            check_in: Some(today),
            check_out: today.checked_add_days(Days::new(DEFAULT_STAY_NIGHTS)),
            rooms: 1,
            adults: 2,
            children: 0,
            price: PriceRange::default(),
            stars: StarSelection::default(),
            max_rates_per_room: DEFAULT_MAX_RATES_PER_ROOM,
        }
    }

    pub fn set_rooms(&mut self, rooms: u32) {
        self.rooms = rooms.max(1);
    }

    pub fn set_adults(&mut self, adults: u32) {
        self.adults = adults.max(1);
    }

    pub fn reset_filters(&mut self) {
        self.price = PriceRange::default();
        self.stars.clear();
        self.max_rates_per_room = DEFAULT_MAX_RATES_PER_ROOM;
    }

    pub fn location_code(&self) -> Option<&'static str> {
        location::code_for(&self.location)
    }

    pub fn to_query(&self, page: u32) -> Result<SearchQuery, CriteriaError> {
        let code = self.location_code().ok_or(CriteriaError::LocationRequired)?;
        Ok(self.to_query_for(code, page))
    }

    fn to_query_for(&self, location_code: &str, page: u32) -> SearchQuery {
        SearchQuery {
            location_code: location_code.to_string(),
            next_page: page,
            rooms: self.rooms.max(1),
            adults: self.adults,
            children: self.children,
            min_rate: self.price.min,
            max_rate: self.price.max,
            max_rates_per_room: self.max_rates_per_room,
            check_in: self.check_in,
            check_out: self.check_out,
            category: self.stars.category_range(),
        }
    }
}

// Query string of POST /hotels/search/.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub location_code: String,
    pub next_page: u32,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub min_rate: f64,
    pub max_rate: f64,
    pub max_rates_per_room: u32,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub category: Option<(u32, u32)>,
}

impl SearchQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("location_code", self.location_code.clone()),
            ("next_page", self.next_page.to_string()),
            ("rooms", self.rooms.to_string()),
            ("adults", self.adults.to_string()),
            ("children", self.children.to_string()),
            ("minRate", self.min_rate.to_string()),
            ("maxRate", self.max_rate.to_string()),
            ("maxRatesPerRoom", self.max_rates_per_room.to_string()),
        ];
        if let Some(check_in) = self.check_in {
            pairs.push(("check_in", check_in.format("%Y-%m-%d").to_string()));
        }
        if let Some(check_out) = self.check_out {
            pairs.push(("check_out", check_out.format("%Y-%m-%d").to_string()));
        }
        if let Some((min, max)) = self.category {
            pairs.push(("minCategory", min.to_string()));
            pairs.push(("maxCategory", max.to_string()));
        }
        pairs
    }
}
