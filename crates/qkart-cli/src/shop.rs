//! Interactive shop loop.
//!
//! Each plain input line is treated as the new contents of the search box and
//! goes through the debounced search. Lines starting with `:` are commands.

use qkart_storefront::{CatalogEvent, Notifier, Storefront, UserAction};
use tokio::io::{AsyncBufReadExt, BufReader};

pub(crate) const HELP: &str = "\
type to search, or:
  :add <product-id>        add a product to the cart
  :qty <product-id> <n>    set quantity (0 removes)
  :show                    redraw the page
  :logout                  log out
  :help                    this text
  :quit                    leave";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShopInput {
    Action(UserAction),
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub(crate) fn parse_shop_input(line: &str) -> ShopInput {
    let Some(command) = line.strip_prefix(':') else {
        return ShopInput::Action(UserAction::Search(line.to_owned()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("add"), Some(id), None, None) => {
            ShopInput::Action(UserAction::AddToCart(id.to_owned()))
        }
        (Some("qty"), Some(id), Some(qty), None) => match qty.parse::<i64>() {
            Ok(qty) => ShopInput::Action(UserAction::SetQuantity {
                product_id: id.to_owned(),
                qty,
            }),
            Err(_) => ShopInput::Invalid(format!("quantity must be a number, got '{qty}'")),
        },
        (Some("show"), None, None, None) => ShopInput::Show,
        (Some("logout"), None, None, None) => ShopInput::Action(UserAction::Logout),
        (Some("help"), None, None, None) => ShopInput::Help,
        (Some("quit" | "q"), None, None, None) => ShopInput::Quit,
        _ => ShopInput::Invalid(format!("unknown command ':{command}'")),
    }
}

/// Runs until `:quit` or end of input.
pub(crate) async fn run_shop(
    storefront: &mut Storefront,
    notifier: &mut dyn Notifier,
) -> anyhow::Result<()> {
    storefront.begin_mount();
    println!("{}", storefront.render());
    storefront.mount(notifier).await;
    println!("{}", storefront.render());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_shop_input(line.trim_end()) {
                    ShopInput::Quit => break,
                    ShopInput::Help => println!("{HELP}"),
                    ShopInput::Show => println!("{}", storefront.render()),
                    ShopInput::Invalid(reason) => eprintln!("{reason}"),
                    ShopInput::Action(action @ UserAction::Search(_)) => {
                        storefront.dispatch(action, notifier).await;
                    }
                    ShopInput::Action(action) => {
                        storefront.dispatch(action, notifier).await;
                        println!("{}", storefront.render());
                    }
                }
            }
            event = storefront.next_event(notifier) => {
                match event {
                    Some(CatalogEvent::SearchApplied { .. }) => println!("{}", storefront.render()),
                    Some(CatalogEvent::SearchIssued { ticket, query }) => {
                        tracing::debug!(ticket, query = %query, "search issued");
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
