use chrono::{Local, NaiveDate};

use crate::domain::criteria::{SearchCriteria, StarSelection};
use crate::domain::errors::StorageError;
use crate::domain::filter::{BookmarkFilter, PriceRange};
use crate::domain::location::{self, LOCATIONS};
use crate::domain::ports::Clock;
use crate::domain::session::Session;
use crate::domain::signup::SignupForm;
use crate::frameworks::cli::{BookmarksArgs, Cli, Command, SearchArgs};
use crate::frameworks::config::{ConfigError, Settings};
use crate::interface_adapters::console::render_hotel;
use crate::interface_adapters::{
    BackendClient, ConsoleNavigator, ConsoleNotifier, ConsoleTheme, FileStorage,
};
use crate::use_cases::home::SEARCH_ERROR;
use crate::use_cases::search::LOCATION_REQUIRED;
use crate::use_cases::{
    AuthGuard, Autocomplete, BookmarksPage, BookmarksStatus, HomePage, LoginPage, Navbar, SearchPage,
    SearchStatus, SignupPage, ToggleOutcome, password_hints,
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("login required")]
    LoginRequired,
    // The page ended in a failure state; the message was already shown to the user.
    #[error("{0}")]
    Command(String),
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

// Process wiring shared by every command.
struct App {
    settings: Settings,
    client: BackendClient,
    storage: FileStorage,
    notifier: ConsoleNotifier,
    navigator: ConsoleNavigator,
    clock: SystemClock,
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let mut settings = Settings::from_env()?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    tracing::debug!(?settings, "settings resolved");

    let app = App::new(settings)?;
    app.dispatch(cli.command).await
}

impl App {
    fn new(settings: Settings) -> Result<Self, AppError> {
        let client = BackendClient::new(settings.api_url.clone(), settings.request_timeout)?;
        let storage = FileStorage::new(settings.storage_path.clone());
        Ok(Self {
            settings,
            client,
            storage,
            notifier: ConsoleNotifier,
            navigator: ConsoleNavigator::default(),
            clock: SystemClock,
        })
    }

    async fn dispatch(&self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Suggest { query } => {
                self.suggest(&query);
                Ok(())
            }
            Command::Home { query } => self.home(query).await,
            Command::Signup {
                username,
                email,
                password,
                confirm_password,
            } => {
                let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
                let form = SignupForm {
                    username,
                    email,
                    password,
                    confirm_password,
                };
                self.signup(&form).await
            }
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => self.logout().await,
            Command::Whoami => self.whoami(),
            Command::Theme { toggle } => self.theme(toggle),
            Command::Search(args) => self.search(args).await,
            Command::Bookmark { hotel_id } => self.bookmark(&hotel_id).await,
            Command::Bookmarks(args) => self.bookmarks(args).await,
            Command::Unbookmark { hotel_id } => self.unbookmark(&hotel_id).await,
        }
    }

    fn navbar(&self) -> Navbar<BackendClient, FileStorage, ConsoleNavigator, ConsoleTheme> {
        Navbar::new(
            self.client.clone(),
            self.storage.clone(),
            self.navigator.clone(),
            ConsoleTheme,
        )
    }

    // Every page behind the auth guard starts here.
    fn guarded_session(&self) -> Result<Session, AppError> {
        let mut guard = AuthGuard::new(self.storage.clone(), self.notifier, self.navigator.clone());
        guard.mount();
        guard
            .render(|session| session.clone())
            .ok_or(AppError::LoginRequired)
    }

    fn suggest(&self, query: &str) {
        let matches = location::matching(query);
        if matches.is_empty() {
            println!("No matching locations");
        }
        for location in matches {
            println!("{} ({}) - {}", location.name, location.code, location.country);
        }
    }

    async fn home(&self, query: Option<String>) -> Result<(), AppError> {
        let mut home = HomePage::new(self.navigator.clone());
        let Some(query) = query else {
            for destination in home.destinations() {
                println!("{:<10} {:<14} {}", destination.code, destination.title, destination.country);
            }
            return Ok(());
        };

        home.search.set_value(query);
        match home.submit() {
            Some(code) => {
                let criteria = SearchCriteria::starting(self.clock.today());
                let mut page = self.search_page(self.guarded_session()?, criteria, None);
                page.mount(Some(code)).await;
                self.show_results(&page)
            }
            None => {
                println!("{SEARCH_ERROR}");
                Err(AppError::Command(SEARCH_ERROR.to_string()))
            }
        }
    }

    async fn signup(&self, form: &SignupForm) -> Result<(), AppError> {
        for hint in password_hints(&form.password) {
            println!("  - {hint}");
        }
        let mut page = SignupPage::new(self.client.clone(), self.notifier, self.navigator.clone())
            .with_redirect_delay(self.settings.signup_redirect);
        if page.submit(form).await {
            return Ok(());
        }
        Err(self.page_error(page.error()))
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), AppError> {
        let mut page = LoginPage::new(
            self.client.clone(),
            self.storage.clone(),
            self.notifier,
            self.navigator.clone(),
        );
        if page.submit(username, password).await {
            return Ok(());
        }
        Err(self.page_error(page.error()))
    }

    async fn logout(&self) -> Result<(), AppError> {
        let mut navbar = self.navbar();
        // Logout clears local tokens even when the stored state cannot be read.
        if let Err(err) = navbar.mount() {
            tracing::warn!(error = %err, "could not read stored session before logout");
        }
        navbar.logout().await;
        Ok(())
    }

    fn whoami(&self) -> Result<(), AppError> {
        let mut navbar = self.navbar();
        navbar.mount()?;
        match (navbar.is_logged_in(), navbar.username()) {
            (true, Some(username)) => println!("Logged in as {username}"),
            (true, None) => println!("Logged in"),
            (false, _) => println!("Not logged in"),
        }
        println!("Theme: {}", theme_name(navbar.theme().is_dark()));
        Ok(())
    }

    fn theme(&self, toggle: bool) -> Result<(), AppError> {
        let mut navbar = self.navbar();
        navbar.mount()?;
        let theme = if toggle {
            navbar.toggle_theme()?
        } else {
            navbar.theme()
        };
        println!("Theme: {}", theme_name(theme.is_dark()));
        Ok(())
    }

    fn search_page(
        &self,
        session: Session,
        criteria: SearchCriteria,
        args: Option<&SearchArgs>,
    ) -> SearchPage<BackendClient, ConsoleNotifier> {
        let mode = args
            .and_then(|args| args.results_mode)
            .unwrap_or(self.settings.results_mode);
        SearchPage::new(self.client.clone(), self.notifier, session, criteria, mode)
    }

    async fn search(&self, args: SearchArgs) -> Result<(), AppError> {
        let session = self.guarded_session()?;
        let criteria = criteria_from(&args, &self.clock);
        let mut page = self.search_page(session, criteria, Some(&args));

        page.mount(None).await;
        page.search().await;
        if page.location_required() {
            self.suggest_locations(&args.location);
        }
        for _ in 1..args.pages {
            if !matches!(page.status(), SearchStatus::Success) {
                break;
            }
            page.load_more().await;
        }
        if let Some(order) = args.sort {
            page.sort(order);
        }
        self.show_results(&page)
    }

    fn suggest_locations(&self, text: &str) {
        let mut field = Autocomplete::new(&LOCATIONS);
        field.set_value(text.trim());
        let suggestions = field.suggestions();
        if suggestions.is_empty() {
            return;
        }
        println!("Did you mean:");
        for location in suggestions {
            println!("  {} ({})", location.name, location.code);
        }
    }

    fn show_results(&self, page: &SearchPage<BackendClient, ConsoleNotifier>) -> Result<(), AppError> {
        if page.location_required() {
            return Err(AppError::Command(LOCATION_REQUIRED.to_string()));
        }
        if let SearchStatus::Failed(message) = page.status() {
            println!("{message}");
            return Err(AppError::Command(message.clone()));
        }
        for hotel in page.hotels() {
            println!("{}\n", render_hotel(hotel, page.is_bookmarked(&hotel.id)));
        }
        Ok(())
    }

    async fn bookmark(&self, hotel_id: &str) -> Result<(), AppError> {
        let session = self.guarded_session()?;
        let criteria = SearchCriteria::starting(self.clock.today());
        let mut page = self.search_page(session, criteria, None);
        page.mount(None).await;

        match page.toggle_bookmark(hotel_id).await {
            ToggleOutcome::Added | ToggleOutcome::Removed => Ok(()),
            ToggleOutcome::Dropped => Err(AppError::Command("bookmark update already in progress".to_string())),
            ToggleOutcome::Reverted => Err(AppError::Command("bookmark update failed".to_string())),
        }
    }

    async fn bookmarks(&self, args: BookmarksArgs) -> Result<(), AppError> {
        let session = self.guarded_session()?;
        let mut page = BookmarksPage::new(self.client.clone(), self.notifier, session);
        page.mount().await;
        if let BookmarksStatus::Failed(message) = page.status() {
            println!("{message}");
            return Err(AppError::Command(message.clone()));
        }

        page.filter = filter_from(&args);
        if args.has_filters() {
            page.apply_filters();
        } else {
            page.search();
        }
        if let Some(order) = args.sort {
            page.sort(order);
        }

        if let Some(message) = page.empty_message() {
            println!("No bookmarked hotels found\n{message}");
        }
        for hotel in page.hotels() {
            println!("{}\n", render_hotel(hotel, true));
        }
        Ok(())
    }

    async fn unbookmark(&self, hotel_id: &str) -> Result<(), AppError> {
        let session = self.guarded_session()?;
        let mut page = BookmarksPage::new(self.client.clone(), self.notifier, session);
        if page.remove(hotel_id).await {
            return Ok(());
        }
        Err(AppError::Command("bookmark removal failed".to_string()))
    }

    fn page_error(&self, message: Option<&str>) -> AppError {
        let message = message.unwrap_or("request failed");
        println!("{message}");
        AppError::Command(message.to_string())
    }
}

fn theme_name(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

pub fn criteria_from(args: &SearchArgs, clock: &dyn Clock) -> SearchCriteria {
    let mut criteria = SearchCriteria::starting(clock.today());
    criteria.location = args.location.clone();
    if args.check_in.is_some() {
        criteria.check_in = args.check_in;
    }
    if args.check_out.is_some() {
        criteria.check_out = args.check_out;
    }
    criteria.set_rooms(args.rooms);
    criteria.set_adults(args.adults);
    criteria.children = args.children;
    criteria.price = PriceRange::new(
        args.min_price.unwrap_or(criteria.price.min),
        args.max_price.unwrap_or(criteria.price.max),
    );
    criteria.stars = StarSelection::from_stars(args.stars.iter().copied());
    if let Some(max_rates) = args.max_rates_per_room {
        criteria.max_rates_per_room = max_rates;
    }
    criteria
}

pub fn filter_from(args: &BookmarksArgs) -> BookmarkFilter {
    let defaults = BookmarkFilter::default();
    BookmarkFilter {
        query: args.query.clone().unwrap_or_default(),
        price: PriceRange::new(
            args.min_price.unwrap_or(defaults.price.min),
            args.max_price.unwrap_or(defaults.price.max),
        ),
        stars: StarSelection::from_stars(args.stars.iter().copied()),
        max_stars: args.max_stars.unwrap_or(defaults.max_stars),
    }
}
