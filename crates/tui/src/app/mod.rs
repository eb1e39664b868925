use std::time::Duration;

use chrono::Local;
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};

use listview::{
    Facet, FilterPatch, ListViewController, RemoteResource, STATUS_ACTIVE, STATUS_EXPIRED,
    STATUS_EXPIRING_SOON,
};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    form::ContractForm,
    model::{Contract, Dashboard, KIND_CREDIT, KIND_DEBIT, WalletTotals, WalletTransaction},
    session::{SessionState, SessionUser},
    ui,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Contracts,
    Transactions,
    Wallet,
    Profile,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::Home,
        Self::Contracts,
        Self::Transactions,
        Self::Wallet,
        Self::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Contracts => "Contracts",
            Self::Transactions => "Transactions",
            Self::Wallet => "Wallet",
            Self::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractsMode {
    List,
    Create,
}

#[derive(Debug)]
pub struct ContractsState {
    pub controller: ListViewController<Contract>,
    pub mode: ContractsMode,
    pub form: ContractForm,
    pub selected: usize,
    pub search_active: bool,
    pub notice: Option<String>,
    status_options: Vec<&'static str>,
}

impl ContractsState {
    fn new(expiring_soon: bool) -> Self {
        let mut status_options = vec![STATUS_ACTIVE, STATUS_EXPIRED];
        if expiring_soon {
            status_options.insert(1, STATUS_EXPIRING_SOON);
        }
        Self {
            controller: ListViewController::new(),
            mode: ContractsMode::List,
            form: ContractForm::default(),
            selected: 0,
            search_active: false,
            notice: None,
            status_options,
        }
    }

    pub fn status_options(&self) -> &[&'static str] {
        &self.status_options
    }

    /// Distinct categories of the loaded contracts, in encounter order.
    pub fn category_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        for contract in self.controller.rows() {
            if let Some(category) = contract.category.as_deref()
                && !options.iter().any(|known| known == category)
            {
                options.push(category.to_string());
            }
        }
        options
    }

    pub fn cycle_status(&mut self) {
        let next = next_facet(self.controller.filter().status.label(), &self.status_options);
        self.controller.set_filter(FilterPatch::status(next));
        self.clamp_selection();
    }

    pub fn cycle_category(&mut self) {
        let options = self.category_options();
        let refs: Vec<&str> = options.iter().map(String::as_str).collect();
        let next = next_facet(self.controller.filter().category.label(), &refs);
        self.controller.set_filter(FilterPatch::category(next));
        self.clamp_selection();
    }

    pub fn push_query(&mut self, ch: char) {
        let mut query = self.controller.filter().query.clone();
        query.push(ch);
        self.controller.set_filter(FilterPatch::query(query));
        self.clamp_selection();
    }

    pub fn pop_query(&mut self) {
        let mut query = self.controller.filter().query.clone();
        query.pop();
        self.controller.set_filter(FilterPatch::query(query));
        self.clamp_selection();
    }

    pub fn clear_query(&mut self) {
        self.controller.set_filter(FilterPatch::query(""));
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.controller.visible_len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.controller.visible_len().saturating_sub(1));
    }
}

#[derive(Debug)]
pub struct TransactionsState {
    pub controller: ListViewController<WalletTransaction>,
    pub selected: usize,
    pub search_active: bool,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            controller: ListViewController::new(),
            selected: 0,
            search_active: false,
        }
    }
}

impl TransactionsState {
    pub fn cycle_kind(&mut self) {
        let next = next_facet(
            self.controller.filter().status.label(),
            &[KIND_CREDIT, KIND_DEBIT],
        );
        self.controller.set_filter(FilterPatch::status(next));
        self.clamp_selection();
    }

    pub fn push_query(&mut self, ch: char) {
        let mut query = self.controller.filter().query.clone();
        query.push(ch);
        self.controller.set_filter(FilterPatch::query(query));
        self.clamp_selection();
    }

    pub fn pop_query(&mut self) {
        let mut query = self.controller.filter().query.clone();
        query.pop();
        self.controller.set_filter(FilterPatch::query(query));
        self.clamp_selection();
    }

    pub fn clear_query(&mut self) {
        self.controller.set_filter(FilterPatch::query(""));
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.controller.visible_len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.controller.visible_len().saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct WalletState {
    pub summary: RemoteResource<WalletTotals>,
    pub transactions: TransactionsState,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub totals: RemoteResource<Dashboard>,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginState,
    pub user: Option<SessionUser>,
    pub contracts: ContractsState,
    pub transactions: TransactionsState,
    pub wallet: WalletState,
    pub dashboard: DashboardState,
    pub base_url: String,
    pub tz: Tz,
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: SessionState,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let session = SessionState::load(&config.session_path).unwrap_or_else(|err| {
            tracing::warn!("failed to load session: {err}");
            SessionState::default()
        });

        let user = session.user.clone();
        let email = user
            .as_ref()
            .and_then(|u| u.email.clone())
            .unwrap_or_else(|| config.email.clone());

        let state = AppState {
            screen: if session.signed_in() {
                Screen::Home
            } else {
                Screen::Login
            },
            section: Section::Home,
            login: LoginState {
                email,
                password: String::new(),
                focus: LoginField::Email,
                message: None,
            },
            user,
            contracts: ContractsState::new(config.expiring_soon_days.is_some()),
            transactions: TransactionsState::default(),
            wallet: WalletState::default(),
            dashboard: DashboardState::default(),
            base_url: config.base_url.clone(),
            tz: config.tz(),
        };

        Ok(Self {
            config,
            client,
            session,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.state.screen == Screen::Home {
            self.load_all().await;
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        use crate::ui::keymap::{AppAction, map_key};

        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Home => self.handle_home_key(action).await,
        }
    }

    async fn handle_login_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                self.advance_login_focus();
            }
            AppAction::Submit => self.attempt_login().await,
            AppAction::Backspace => {
                self.active_login_field_mut().pop();
            }
            AppAction::Input(ch) => {
                self.active_login_field_mut().push(ch);
            }
            _ => {}
        }
    }

    async fn handle_home_key(&mut self, action: crate::ui::keymap::AppAction) {
        if self.state.section == Section::Contracts
            && self.state.contracts.mode == ContractsMode::Create
        {
            self.handle_form_key(action).await;
            return;
        }
        if self.search_active() {
            self.handle_search_key(action);
            return;
        }
        self.handle_browse_key(action).await;
    }

    async fn handle_form_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Cancel => {
                self.state.contracts.mode = ContractsMode::List;
                self.state.contracts.form = ContractForm::default();
            }
            AppAction::NextField => self.state.contracts.form.focus_next(),
            AppAction::PrevField => self.state.contracts.form.focus_prev(),
            AppAction::Up => self.state.contracts.form.cycle(false),
            AppAction::Down => self.state.contracts.form.cycle(true),
            AppAction::Backspace => self.state.contracts.form.backspace(),
            AppAction::Input(ch) => self.state.contracts.form.input(ch),
            AppAction::Submit => self.submit_contract().await,
            _ => {}
        }
    }

    fn handle_search_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Cancel => {
                self.with_search_state(|state| state.clear());
            }
            AppAction::Submit | AppAction::Search => {
                self.with_search_state(|state| state.close());
            }
            AppAction::Backspace => self.with_search_state(|state| state.pop()),
            AppAction::Input(ch) => self.with_search_state(|state| state.push(ch)),
            AppAction::Up => self.move_selection(false),
            AppAction::Down => self.move_selection(true),
            _ => {}
        }
    }

    async fn handle_browse_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Search => self.open_search(),
            AppAction::Up => self.move_selection(false),
            AppAction::Down => self.move_selection(true),
            AppAction::Cancel => {
                self.state.contracts.notice = None;
            }
            AppAction::Input(ch) => self.handle_browse_char(ch).await,
            _ => {}
        }
    }

    async fn handle_browse_char(&mut self, ch: char) {
        match ch.to_ascii_lowercase() {
            'q' => self.should_quit = true,
            'h' => self.state.section = Section::Home,
            'c' => self.state.section = Section::Contracts,
            't' => self.state.section = Section::Transactions,
            'w' => self.state.section = Section::Wallet,
            'p' => self.state.section = Section::Profile,
            'r' => self.refresh_section().await,
            '/' => self.open_search(),
            'j' => self.move_selection(true),
            'k' => self.move_selection(false),
            'n' if self.state.section == Section::Contracts => {
                self.state.contracts.mode = ContractsMode::Create;
                self.state.contracts.form = ContractForm::default();
                self.state.contracts.notice = None;
            }
            's' if self.state.section == Section::Contracts => {
                self.state.contracts.cycle_status();
            }
            'g' if self.state.section == Section::Contracts => {
                self.state.contracts.cycle_category();
            }
            'f' if self.state.section == Section::Transactions => {
                self.state.transactions.cycle_kind();
            }
            'f' if self.state.section == Section::Wallet => {
                self.state.wallet.transactions.cycle_kind();
            }
            'o' if self.state.section == Section::Profile => self.logout(),
            _ => {}
        }
    }

    fn open_search(&mut self) {
        match self.state.section {
            Section::Contracts => self.state.contracts.search_active = true,
            Section::Transactions => self.state.transactions.search_active = true,
            Section::Wallet => self.state.wallet.transactions.search_active = true,
            _ => {}
        }
    }

    fn search_active(&self) -> bool {
        match self.state.section {
            Section::Contracts => self.state.contracts.search_active,
            Section::Transactions => self.state.transactions.search_active,
            Section::Wallet => self.state.wallet.transactions.search_active,
            _ => false,
        }
    }

    fn with_search_state(&mut self, edit: impl FnOnce(&mut dyn SearchTarget)) {
        match self.state.section {
            Section::Contracts => edit(&mut self.state.contracts),
            Section::Transactions => edit(&mut self.state.transactions),
            Section::Wallet => edit(&mut self.state.wallet.transactions),
            _ => {}
        }
    }

    fn move_selection(&mut self, forward: bool) {
        match self.state.section {
            Section::Contracts => {
                if forward {
                    self.state.contracts.select_next();
                } else {
                    self.state.contracts.select_prev();
                }
            }
            Section::Transactions => {
                if forward {
                    self.state.transactions.select_next();
                } else {
                    self.state.transactions.select_prev();
                }
            }
            Section::Wallet => {
                if forward {
                    self.state.wallet.transactions.select_next();
                } else {
                    self.state.wallet.transactions.select_prev();
                }
            }
            _ => {}
        }
    }

    fn advance_login_focus(&mut self) {
        self.state.login.focus = match self.state.login.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Email => &mut self.state.login.email,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    async fn attempt_login(&mut self) {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.password.trim().to_string();
        if email.is_empty() || password.is_empty() {
            self.state.login.message = Some("Fill in both fields.".to_string());
            return;
        }

        match self.client.login(&email, &password).await {
            Ok(view) => {
                let user = SessionUser::from(view);
                self.session.user = Some(user.clone());
                if let Err(err) = self.session.save(&self.config.session_path) {
                    tracing::warn!("failed to save session: {err}");
                }
                self.state.user = Some(user);
                self.state.login.password.clear();
                self.state.login.message = None;
                self.state.screen = Screen::Home;
                self.load_all().await;
            }
            Err(err) => {
                self.state.login.message = Some(err.to_string());
            }
        }
    }

    fn logout(&mut self) {
        self.session.clear();
        if let Err(err) = self.session.save(&self.config.session_path) {
            tracing::warn!("failed to save session: {err}");
        }
        self.state.user = None;
        self.state.screen = Screen::Login;
        self.state.section = Section::Home;
        self.state.contracts = ContractsState::new(self.config.expiring_soon_days.is_some());
        self.state.transactions = TransactionsState::default();
        self.state.wallet = WalletState::default();
        self.state.dashboard = DashboardState::default();
    }

    async fn refresh_section(&mut self) {
        match self.state.section {
            Section::Home => self.load_dashboard().await,
            Section::Contracts => self.load_contracts().await,
            Section::Transactions => self.load_transactions().await,
            Section::Wallet => self.load_wallet().await,
            Section::Profile => {}
        }
    }

    async fn load_all(&mut self) {
        self.load_dashboard().await;
        self.load_contracts().await;
        self.load_wallet().await;
        self.load_transactions().await;
    }

    async fn load_dashboard(&mut self) {
        let Some(user) = self.state.user.clone() else {
            return;
        };
        let client = self.client.clone();
        let role = user.role.unwrap_or_default();
        let email = user.email.unwrap_or_default();
        self.state
            .dashboard
            .totals
            .load(async move {
                client
                    .dashboard_totals(&role, &email)
                    .await
                    .map(Dashboard::from)
            })
            .await;
    }

    async fn load_contracts(&mut self) {
        let Some(user) = self.state.user.clone() else {
            return;
        };
        let client = self.client.clone();
        let today = Local::now().date_naive();
        let policy = self.config.expiry_policy();
        self.state
            .contracts
            .controller
            .load(async move {
                let views = client.contracts(&user.id).await?;
                Ok(views
                    .into_iter()
                    .map(|view| Contract::from_view(view, today, policy))
                    .collect())
            })
            .await;
        self.state.contracts.clamp_selection();
    }

    async fn load_transactions(&mut self) {
        let Some(user) = self.state.user.clone() else {
            return;
        };
        let client = self.client.clone();
        let role = user.role.unwrap_or_default();
        let email = user.email.unwrap_or_default();
        self.state
            .transactions
            .controller
            .load(async move {
                let views = client.wallet_transactions(&role, &email).await?;
                Ok(views.into_iter().map(WalletTransaction::from).collect())
            })
            .await;
        self.state.transactions.clamp_selection();
    }

    async fn load_wallet(&mut self) {
        let Some(user) = self.state.user.clone() else {
            return;
        };

        let client = self.client.clone();
        let admin_id = user.id.clone();
        self.state
            .wallet
            .summary
            .load(async move {
                client
                    .wallet_summary(&admin_id)
                    .await
                    .map(WalletTotals::from)
            })
            .await;

        let client = self.client.clone();
        let role = user.role.unwrap_or_default();
        let email = user.email.unwrap_or_default();
        self.state
            .wallet
            .transactions
            .controller
            .load(async move {
                let views = client.wallet_transactions(&role, &email).await?;
                Ok(views.into_iter().map(WalletTransaction::from).collect())
            })
            .await;
        self.state.wallet.transactions.clamp_selection();
    }

    async fn submit_contract(&mut self) {
        let Some(user) = self.state.user.clone() else {
            return;
        };
        let today = Local::now().date_naive();
        let body = match self.state.contracts.form.build(&user.id, today) {
            Ok(body) => body,
            Err(message) => {
                self.state.contracts.form.error = Some(message);
                return;
            }
        };

        match self.client.create_contract(&body).await {
            Ok(message) => {
                self.state.contracts.mode = ContractsMode::List;
                self.state.contracts.form = ContractForm::default();
                self.state.contracts.notice = Some(message);
                self.load_contracts().await;
            }
            Err(err) => {
                self.state.contracts.form.error = Some(err.to_string());
            }
        }
    }
}

/// Shared search-box behavior for the three list sections.
trait SearchTarget {
    fn push(&mut self, ch: char);
    fn pop(&mut self);
    fn clear(&mut self);
    fn close(&mut self);
}

impl SearchTarget for ContractsState {
    fn push(&mut self, ch: char) {
        self.push_query(ch);
    }

    fn pop(&mut self) {
        self.pop_query();
    }

    fn clear(&mut self) {
        self.clear_query();
        self.search_active = false;
    }

    fn close(&mut self) {
        self.search_active = false;
    }
}

impl SearchTarget for TransactionsState {
    fn push(&mut self, ch: char) {
        self.push_query(ch);
    }

    fn pop(&mut self) {
        self.pop_query();
    }

    fn clear(&mut self) {
        self.clear_query();
        self.search_active = false;
    }

    fn close(&mut self) {
        self.search_active = false;
    }
}

/// Advances a facet through `All -> options[0] -> ... -> All`.
fn next_facet(current: Option<&str>, options: &[&str]) -> Facet {
    match current {
        None => options.first().map(|first| Facet::only(*first)).unwrap_or(Facet::All),
        Some(current) => match options.iter().position(|option| *option == current) {
            Some(idx) if idx + 1 < options.len() => Facet::only(options[idx + 1]),
            _ => Facet::All,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_cycle_walks_options_and_wraps_to_all() {
        let options = ["Active", "Expired"];
        assert_eq!(next_facet(None, &options), Facet::only("Active"));
        assert_eq!(next_facet(Some("Active"), &options), Facet::only("Expired"));
        assert_eq!(next_facet(Some("Expired"), &options), Facet::All);
        // A stale selection (e.g. the data changed) falls back to All.
        assert_eq!(next_facet(Some("Suspended"), &options), Facet::All);
    }

    #[test]
    fn facet_cycle_with_no_options_stays_on_all() {
        assert_eq!(next_facet(None, &[]), Facet::All);
    }

    #[test]
    fn expiring_soon_bucket_is_policy_gated() {
        let two = ContractsState::new(false);
        assert_eq!(two.status_options(), &[STATUS_ACTIVE, STATUS_EXPIRED]);

        let three = ContractsState::new(true);
        assert_eq!(
            three.status_options(),
            &[STATUS_ACTIVE, STATUS_EXPIRING_SOON, STATUS_EXPIRED]
        );
    }
}
