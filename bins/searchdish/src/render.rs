//! Tables and JSON output for list views

use crate::app::App;
use owo_colors::OwoColorize;
use searchdish_api_client::listing::{ListController, ListItem, ListView, PageSource};
use searchdish_api_client::models::{Dish, Restaurant, RestaurantDish, User};
use searchdish_cli::output::{Status, Table, format_count, format_page, format_price, truncate};
use serde::Serialize;
use serde_json::json;

const DESCRIPTION_WIDTH: usize = 40;

/// Print any value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("{} {e}", "Error:".red().bold()),
    }
}

/// Wording for one kind of list
pub struct Labels {
    pub singular: &'static str,
    pub plural: &'static str,
    pub empty: &'static str,
}

/// Render the current page of a list: table, empty state or no-match state
pub fn print_list<T, S>(app: &App, list: &ListController<T, S>, labels: &Labels, table: fn(&[&T]) -> Table)
where
    T: ListItem + Serialize,
    S: PageSource<T>,
{
    let total_pages = list.total_pages().unwrap_or(1);

    if app.is_json() {
        print_json(&json!({
            "page": list.page(),
            "totalPages": total_pages,
            "total": list.total(),
            "query": list.filter().query(),
            "category": list.filter().category(),
            "items": list.visible(),
        }));
        return;
    }

    match list.view() {
        ListView::Loading => Status::empty("Loading..."),
        ListView::Empty => Status::empty(labels.empty),
        ListView::NoMatch => Status::empty(&format!(
            "No {} match \"{}\" on this page",
            labels.plural,
            list.filter().query()
        )),
        ListView::Items(items) => {
            table(&items).print();
            println!();
            println!(
                "{}",
                format!(
                    "{} shown. {}",
                    format_count(items.len(), labels.singular, labels.plural),
                    format_page(list.page(), total_pages, list.total())
                )
                .dimmed()
            );
        }
    }
}

fn yes_no(flag: bool) -> String {
    if flag {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

pub fn restaurant_table(restaurants: &[&Restaurant]) -> Table {
    let mut table = Table::new(["ID", "Name", "City", "Phone", "Active"]);
    for r in restaurants {
        table.row([
            r.id.clone(),
            r.name.clone(),
            r.country.clone(),
            r.phone.clone(),
            yes_no(r.is_active),
        ]);
    }
    table
}

pub fn dish_table(dishes: &[&Dish]) -> Table {
    let mut table = Table::new(["ID", "Name", "Category", "Description"]);
    for d in dishes {
        table.row([
            d.id.clone(),
            d.name.clone(),
            d.category.clone(),
            truncate(&d.description, DESCRIPTION_WIDTH),
        ]);
    }
    table
}

/// One restaurant's menu
pub fn menu_table(entries: &[&RestaurantDish]) -> Table {
    let mut table = Table::new(["ID", "Dish", "Price", "Available", "Description"]);
    for e in entries {
        table.row([
            e.id.clone(),
            e.dish_name().to_string(),
            format_price(e.price, &e.currency),
            yes_no(e.is_available),
            truncate(&e.description, DESCRIPTION_WIDTH),
        ]);
    }
    table
}

/// Menu entries across restaurants (explore and dish search)
pub fn offer_table(entries: &[&RestaurantDish]) -> Table {
    let mut table = Table::new(["Dish", "Restaurant", "City", "Price", "Available"]);
    for e in entries {
        let city = e.restaurant.as_ref().map_or("", |r| r.country.as_str());
        table.row([
            e.dish_name().to_string(),
            e.restaurant_name().to_string(),
            city.to_string(),
            format_price(e.price, &e.currency),
            yes_no(e.is_available),
        ]);
    }
    table
}

/// Profile block for `whoami` and `login`
pub fn print_user(user: &User) {
    println!("  {:<12} {}", "Name:".dimmed(), user.display_name());
    println!("  {:<12} {}", "Email:".dimmed(), user.email);
    println!("  {:<12} {}", "Role:".dimmed(), user.role);
    if let Some(restaurants) = user.restaurants.as_deref().filter(|r| !r.is_empty()) {
        for r in restaurants {
            let status = if r.is_active {
                "active".green().to_string()
            } else {
                "pending approval".yellow().to_string()
            };
            println!("  {:<12} {} ({}) {}", "Restaurant:".dimmed(), r.name, r.id, status);
        }
    }
}
