//! # Line Shell
//!
//! Reads one command per line and answers each with one line of JSON.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin                          stdout                                  │
//! │  ─────                          ──────                                  │
//! │  login mor_2314 83r5^_   ──►    {"ok":true,"data":{"authenticated":..}} │
//! │  search backpack         ──►    {"ok":true,"data":{"page":{..},..}}     │
//! │  add 1                   ──►    {"ok":true,"data":{"items":[..],..}}    │
//! │  add 999                 ──►    {"ok":false,"error":{"code":            │
//! │                                   "NOT_FOUND","message":..}}            │
//! │  quit                    ──►    (exit)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank lines are ignored. A failed command never ends the loop.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use storefront_core::validation::{validate_price, ValidationResult};
use storefront_core::{Catalog, Money};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands;
use crate::error::ApiError;
use crate::source::Authenticator;
use crate::state::{CartState, CatalogState, ConfigState, SessionState};

/// Usage lines printed by `help`.
pub const USAGE: &[&str] = &[
    "signup <username> <email> <password>",
    "login <username> <password>",
    "logout",
    "session",
    "theme",
    "catalog",
    "search [text]",
    "category <name|all>",
    "price <min> <max>",
    "clear-filters",
    "page <n>",
    "categories",
    "cart",
    "add <product id>",
    "remove <product id>",
    "empty",
    "help",
    "quit",
];

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Signup {
        username: String,
        email: String,
        password: String,
    },
    Login { username: String, password: String },
    Logout,
    Session,
    Theme,
    Catalog,
    /// Everything after `search ` verbatim.
    Search(String),
    Category(String),
    Price { min: Money, max: Money },
    ClearFilters,
    Page(usize),
    Categories,
    Cart,
    Add(u64),
    Remove(u64),
    Empty,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        let command = match verb {
            "signup" => {
                let mut fields = rest.split_whitespace();
                match (fields.next(), fields.next(), fields.next(), fields.next()) {
                    (Some(username), Some(email), Some(password), None) => Command::Signup {
                        username: username.to_string(),
                        email: email.to_string(),
                        password: password.to_string(),
                    },
                    _ => {
                        return Err(ApiError::bad_command(
                            "usage: signup <username> <email> <password>",
                        ))
                    }
                }
            }
            "login" => {
                let (username, password) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
                Command::Login {
                    username: username.to_string(),
                    password: password.trim().to_string(),
                }
            }
            "logout" => Command::Logout,
            "session" => Command::Session,
            "theme" => Command::Theme,
            "catalog" => Command::Catalog,
            "search" => Command::Search(rest.to_string()),
            "category" => Command::Category(rest.trim().to_string()),
            "price" => {
                let mut bounds = rest.split_whitespace();
                match (bounds.next(), bounds.next(), bounds.next()) {
                    (Some(min), Some(max), None) => Command::Price {
                        min: parse_price("min", min)?,
                        max: parse_price("max", max)?,
                    },
                    _ => return Err(ApiError::bad_command("usage: price <min> <max>")),
                }
            }
            "clear-filters" => Command::ClearFilters,
            "page" => Command::Page(parse_number("page", rest)?),
            "categories" => Command::Categories,
            "cart" => Command::Cart,
            "add" => Command::Add(parse_number("product id", rest)?),
            "remove" => Command::Remove(parse_number("product id", rest)?),
            "empty" => Command::Empty,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ApiError::bad_command(format!("unknown command: {}", other))),
        };
        Ok(command)
    }
}

fn parse_number<T: FromStr>(what: &str, raw: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_command(format!("{} must be a whole number: '{}'", what, raw.trim())))
}

fn parse_price(what: &str, raw: &str) -> Result<Money, ApiError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| ApiError::bad_command(format!("{} price must be a number: '{}'", what, raw)))?;
    Ok(validate_price(value)?)
}

/// One line of output.
#[derive(Debug, Serialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Reply {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Reply {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// All state of one running storefront.
#[derive(Debug)]
pub struct Shell {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartState,
    session: SessionState,
    auth: Authenticator,
}

impl Shell {
    pub fn new(config: ConfigState, catalog: Catalog, auth: Authenticator) -> ValidationResult<Self> {
        Ok(Shell {
            catalog: CatalogState::new(catalog, config.page_size)?,
            cart: CartState::new(),
            session: SessionState::new(),
            config,
            auth,
        })
    }

    /// Runs one command against the shell state.
    pub async fn execute(&self, command: Command) -> Result<Value, ApiError> {
        let (session, catalog, cart, config) = (&self.session, &self.catalog, &self.cart, &self.config);

        match command {
            Command::Signup {
                username,
                email,
                password,
            } => to_json(commands::signup(&self.auth, &username, &email, &password).await?),
            Command::Login { username, password } => {
                to_json(commands::login(session, &self.auth, &username, &password).await?)
            }
            Command::Logout => to_json(commands::logout(session, cart)),
            Command::Session => to_json(commands::get_session(session)),
            Command::Theme => to_json(commands::toggle_theme(session)),
            Command::Catalog => to_json(commands::get_catalog(session, catalog)?),
            Command::Search(text) => to_json(commands::search(session, catalog, &text)?),
            Command::Category(name) => to_json(commands::set_category(session, catalog, &name)?),
            Command::Price { min, max } => {
                to_json(commands::set_price_range(session, catalog, min, max)?)
            }
            Command::ClearFilters => to_json(commands::clear_filters(session, catalog)?),
            Command::Page(page) => to_json(commands::set_page(session, catalog, page)?),
            Command::Categories => to_json(commands::list_categories(session, catalog)?),
            Command::Cart => to_json(commands::get_cart(session, cart, config)?),
            Command::Add(id) => to_json(commands::add_to_cart(session, catalog, cart, config, id)?),
            Command::Remove(id) => to_json(commands::remove_from_cart(session, cart, config, id)?),
            Command::Empty => to_json(commands::clear_cart(session, cart, config)?),
            Command::Help => to_json(USAGE),
            Command::Quit => Ok(Value::Null),
        }
    }

    /// Reads commands from `reader` until EOF or `quit`, writing one JSON
    /// reply per command to `writer`.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let result = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    debug!(?command, "executing");
                    self.execute(command).await
                }
                Err(e) => Err(e),
            };

            let mut out = serde_json::to_vec(&Reply::from(result))?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }
        Ok(())
    }
}
