//! # Application Controller
//!
//! Wires configuration, the HTTP stack and the overview view model
//! together, then maps typed commands to view model intents and prints
//! item updates as they arrive.

use super::user_command::UserCommand;
use crate::overview::{
    events::{ItemsUpdate, LoadStatus, StateChangeMode, Subscription},
    models::CollectionItem,
    services::{FetchCollectionService, HttpTransport, Resolver, RijksCollectionService},
    view_models::{OverviewDelegate, OverviewViewModel},
};
use crate::{cmd_args::CommandLineArgs, config, config::ApiSettings};
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

const HELP: &str = "\
Commands:
  <Enter>, more      load the next page
  search <text>      start a new search (plain 'search' clears it)
  open <n>           show where to find item n
  help               show this help
  quit               exit";

/// Address of the public web page for an object
pub fn detail_page_url(culture: &str, object_number: &str) -> String {
    format!("https://www.rijksmuseum.nl/{culture}/collection/{object_number}")
}

/// Delegate that answers selection by printing the object's web page
struct DetailLinkPrinter {
    culture: String,
}

impl OverviewDelegate for DetailLinkPrinter {
    fn user_wants_more_info_on(&self, object_number: &str) {
        println!(
            "More info: {}",
            detail_page_url(&self.culture, object_number)
        );
    }
}

/// The main application controller driving the overview
pub struct AppController {
    view_model: OverviewViewModel,
    load_status: watch::Receiver<LoadStatus>,
    displayed: Arc<Mutex<Vec<CollectionItem>>>,
    _display_subscription: Subscription,
    interactive: bool,
}

impl AppController {
    /// Build the controller from command line arguments and the profile file
    pub fn new(cmd_args: CommandLineArgs) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let settings = Self::load_settings(&cmd_args, &profile_path)?;

        if settings.api_key.is_none() {
            tracing::warn!(
                "No API key configured; set {} or add api_key to profile '{}'",
                config::API_KEY_ENV_VAR,
                cmd_args.profile()
            );
        }

        let transport = HttpTransport::new().context("Failed to create HTTP client")?;
        let culture = settings.culture.clone();
        let service = RijksCollectionService::new(Resolver::new(transport), settings);

        Ok(Self::with_service(
            cmd_args.query().cloned(),
            Arc::new(service),
            &culture,
        ))
    }

    /// Build the controller around any fetch service (dependency injection)
    pub fn with_service(
        query: Option<String>,
        service: Arc<dyn FetchCollectionService>,
        culture: &str,
    ) -> Self {
        let mut view_model = OverviewViewModel::new(query, service);
        view_model.set_delegate(Arc::new(DetailLinkPrinter {
            culture: culture.to_string(),
        }));

        let displayed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&displayed);
        let display_subscription = view_model
            .item_updates()
            .subscribe(move |update| Self::apply_update(&sink, update));

        let load_status = view_model.load_status();
        Self {
            view_model,
            load_status,
            displayed,
            _display_subscription: display_subscription,
            interactive: atty::is(atty::Stream::Stdin),
        }
    }

    fn load_settings(cmd_args: &CommandLineArgs, profile_path: &str) -> Result<ApiSettings> {
        tracing::debug!(
            "Loading profile '{}' from '{}'",
            cmd_args.profile(),
            profile_path
        );
        let settings = config::load_api_settings(cmd_args.profile(), profile_path)?;

        Ok(match cmd_args.page_size() {
            Some(page_size) => settings.with_page_size(page_size),
            None => settings,
        })
    }

    /// Mirror an update into the displayed list and print the new rows
    fn apply_update(displayed: &Mutex<Vec<CollectionItem>>, update: &ItemsUpdate) {
        let mut displayed = displayed.lock().unwrap_or_else(PoisonError::into_inner);
        if update.mode == StateChangeMode::Overwrite {
            displayed.clear();
        }

        let start = displayed.len();
        for (offset, item) in update.items.iter().enumerate() {
            println!(
                "{:>4}. {} - {} [{}]",
                start + offset + 1,
                item.name,
                item.section.name,
                item.object_number
            );
        }
        displayed.extend(update.items.iter().cloned());
    }

    pub fn view_model(&self) -> &OverviewViewModel {
        &self.view_model
    }

    pub fn displayed_items(&self) -> Vec<CollectionItem> {
        self.displayed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run the main command loop until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", self.view_model.title());
        println!("Type 'help' for commands.\n");
        self.settle().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            self.prompt()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = UserCommand::parse(&line);
            tracing::debug!("Command: {:?}", command);
            if !self.dispatch(command) {
                break;
            }
            self.settle().await;
        }

        Ok(())
    }

    /// Apply one command; returns false when the loop should stop
    pub fn dispatch(&self, command: UserCommand) -> bool {
        match command {
            UserCommand::More => self.view_model.user_reached_end(),
            UserCommand::Search(query) => {
                match &query {
                    Some(query) => println!("\nSearching for '{query}'"),
                    None => println!("\nShowing the whole collection"),
                }
                self.view_model.user_changed_query(query);
            }
            UserCommand::Open(position) => self.open(position),
            UserCommand::Help => println!("{HELP}"),
            UserCommand::Quit => return false,
            UserCommand::Unknown(line) => println!("Unknown command '{line}', type 'help'"),
        }
        true
    }

    /// Select the item at 1-based `position` in the displayed list
    fn open(&self, position: usize) {
        let displayed = self.displayed.lock().unwrap_or_else(PoisonError::into_inner);
        let item = position
            .checked_sub(1)
            .and_then(|index| displayed.get(index))
            .cloned();
        drop(displayed);

        match item {
            Some(item) => self.view_model.user_selected_item(&item),
            None => println!("There is no item {position}"),
        }
    }

    /// Wait for pending work, then report a failed load once
    async fn settle(&mut self) {
        self.view_model.wait_until_idle().await;

        if !self.load_status.has_changed().unwrap_or(false) {
            return;
        }
        if let LoadStatus::Failed { page, error } = &*self.load_status.borrow_and_update() {
            eprintln!("Could not load page {page}: {error}");
            eprintln!("Press Enter to retry.");
        }
    }

    fn prompt(&self) -> Result<()> {
        if self.interactive {
            let count = self
                .displayed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len();
            print!("[{count}]> ");
            std::io::stdout().flush()?;
        }
        Ok(())
    }
}
