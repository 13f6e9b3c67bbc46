//! Customer views: dishes in a city, restaurants serving a dish

use crate::app::App;
use crate::render::{Labels, offer_table, print_list};
use anyhow::Result;
use clap::Args;
use searchdish_api_client::listing::{CityDishPages, DishNamePages, ListController};
use searchdish_api_client::models::RestaurantDish;
use searchdish_cli::progress::while_loading;
use searchdish_core::validation::Validator;

#[derive(Args)]
pub struct ExploreArgs {
    /// City to search
    #[arg(long)]
    pub city: String,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Narrow the page by dish name
    #[arg(long)]
    pub dish: Option<String>,
}

#[derive(Args)]
pub struct SearchDishArgs {
    /// Dish name to search for
    #[arg(long)]
    pub name: String,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,
}

/// The city view searches dish names only
fn dish_name_matches(entry: &RestaurantDish, query: &str) -> bool {
    entry.dish_name().to_lowercase().contains(query)
}

pub async fn explore(app: &App, args: ExploreArgs) -> Result<()> {
    Validator::new().required("city", args.city.trim()).validate().to_result()?;

    let source = CityDishPages::new(app.client().restaurant_dishes(), args.city.trim());
    let mut list = ListController::new(source, args.limit.unwrap_or(app.page_size))
        .with_matcher(dish_name_matches)
        .starting_at(args.page);
    while_loading("Searching...", app.interactive(), list.load()).await?;

    if let Some(dish) = &args.dish {
        list.set_filter(dish);
    }

    let labels = Labels {
        singular: "dish",
        plural: "dishes",
        empty: "No dishes found in this city.",
    };
    print_list(app, &list, &labels, offer_table);
    Ok(())
}

pub async fn search_dish(app: &App, args: SearchDishArgs) -> Result<()> {
    Validator::new().required("name", args.name.trim()).validate().to_result()?;

    let source = DishNamePages::new(app.client().restaurant_dishes(), args.name.trim());
    let mut list = ListController::new(source, args.limit.unwrap_or(app.page_size)).starting_at(args.page);
    while_loading("Searching...", app.interactive(), list.load()).await?;

    let labels = Labels {
        singular: "offer",
        plural: "offers",
        empty: "No restaurant serves this dish yet.",
    };
    print_list(app, &list, &labels, offer_table);
    Ok(())
}
