use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::criteria::ResultAccumulation;
use crate::domain::filter::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "hotel")]
#[command(about = "Search hotels and manage bookmarks against the hotel backend")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides HOTEL_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest locations whose name or country contains the text
    Suggest { query: String },

    /// Show the destination gallery, or open a destination by name
    Home { query: Option<String> },

    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Log in and store the token pair
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Log out (always clears the local session)
    Logout,

    /// Show the logged-in user and theme
    Whoami,

    /// Show the theme, or switch it with --toggle
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Search hotels at a location
    Search(SearchArgs),

    /// Toggle the bookmark of a hotel
    Bookmark { hotel_id: String },

    /// List bookmarked hotels
    Bookmarks(BookmarksArgs),

    /// Remove a bookmark
    Unbookmark { hotel_id: String },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Location name or 3-letter code
    pub location: String,

    #[arg(long)]
    pub check_in: Option<NaiveDate>,

    #[arg(long)]
    pub check_out: Option<NaiveDate>,

    #[arg(long, default_value_t = 1)]
    pub rooms: u32,

    #[arg(long, default_value_t = 2)]
    pub adults: u32,

    #[arg(long, default_value_t = 0)]
    pub children: u32,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Star ratings to include, e.g. --stars 3,4
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=5))]
    pub stars: Vec<u32>,

    #[arg(long)]
    pub max_rates_per_room: Option<u32>,

    /// Number of pages to load (the first search plus load-more requests)
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// price-low, price-high, stars-high, stars-low or recent
    #[arg(long)]
    pub sort: Option<SortOrder>,

    /// replace or append (overrides HOTEL_RESULTS_MODE)
    #[arg(long)]
    pub results_mode: Option<ResultAccumulation>,
}

#[derive(Args, Debug)]
pub struct BookmarksArgs {
    /// Text matched against name, description, address and city
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=5))]
    pub stars: Vec<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=5))]
    pub max_stars: Option<u32>,

    #[arg(long)]
    pub sort: Option<SortOrder>,
}

impl BookmarksArgs {
    // Price or star options mean "Apply Filters"; a bare query is a plain search.
    pub fn has_filters(&self) -> bool {
        self.min_price.is_some()
            || self.max_price.is_some()
            || !self.stars.is_empty()
            || self.max_stars.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_search_arguments_are_parsed_then_typed_values_are_filled() {
        let cli = Cli::try_parse_from([
            "hotel", "search", "Paris", "--stars", "2,5", "--check-in", "2025-06-01", "--sort",
            "price-low", "--results-mode", "append", "--pages", "2",
        ])
        .expect("arguments parse");

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.location, "Paris");
        assert_eq!(args.stars, vec![2, 5]);
        assert_eq!(args.check_in, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(args.sort, Some(SortOrder::PriceLowToHigh));
        assert_eq!(args.results_mode, Some(ResultAccumulation::Append));
        assert_eq!(args.adults, 2);
        assert_eq!(args.pages, 2);
    }

    #[test]
    fn when_sort_name_is_unknown_then_parsing_fails() {
        let result = Cli::try_parse_from(["hotel", "bookmarks", "--sort", "cheapest"]);

        assert!(result.is_err());
    }

    #[test]
    fn when_star_is_out_of_range_then_parsing_fails() {
        assert!(Cli::try_parse_from(["hotel", "search", "PAR", "--stars", "7"]).is_err());
        assert!(Cli::try_parse_from(["hotel", "bookmarks", "--stars", "0,3"]).is_err());
        assert!(Cli::try_parse_from(["hotel", "bookmarks", "--max-stars", "6"]).is_err());
    }

    #[test]
    fn when_only_a_query_is_given_then_bookmarks_are_searched_not_filtered() {
        let cli = Cli::try_parse_from(["hotel", "bookmarks", "--query", "spa"]).expect("arguments parse");

        let Command::Bookmarks(args) = cli.command else {
            panic!("expected bookmarks command");
        };
        assert!(!args.has_filters());
    }
}
