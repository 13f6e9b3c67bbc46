//! Restaurant menus: browse (anyone) and manage (restaurateur)

use crate::app::{App, check, load_image};
use crate::render::{Labels, menu_table, print_json, print_list};
use anyhow::Result;
use clap::Subcommand;
use searchdish_api_client::listing::{ListController, MenuPages};
use searchdish_api_client::models::{
    CreateRestaurantDishDto, DEFAULT_CURRENCY, Role, UpdateDishDto, UpdateRestaurantDishDto, User,
};
use searchdish_cli::output::{Status, format_price};
use searchdish_cli::progress::while_loading;
use searchdish_core::validation::Validate;
use searchdish_core::{Error as CoreError, ErrorCode};
use std::path::PathBuf;
use tracing::info;

const MENU: Labels = Labels {
    singular: "menu entry",
    plural: "menu entries",
    empty: "This restaurant has no dishes on its menu yet.",
};

#[derive(Subcommand)]
pub enum MenuCommand {
    /// Show a restaurant's menu
    Show {
        /// Restaurant id
        restaurant_id: String,

        /// Narrow by dish name, description or category
        #[arg(long)]
        filter: Option<String>,

        /// Only this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,
    },

    /// Put a catalog dish on your menu (restaurateur)
    Add {
        /// Catalog dish id (see `searchdish dishes list`)
        #[arg(long)]
        dish: String,

        /// Price
        #[arg(long)]
        price: f64,

        #[arg(long, default_value = DEFAULT_CURRENCY)]
        currency: String,

        /// How your restaurant prepares it
        #[arg(long)]
        description: String,

        /// Restaurant id (defaults to your first restaurant)
        #[arg(long)]
        restaurant: Option<String>,

        /// Add it as not currently served
        #[arg(long)]
        unavailable: bool,

        /// Photo of the dish; also updates the catalog entry's description
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Change a menu entry (restaurateur)
    Update {
        /// Menu entry id
        id: String,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        currency: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Whether the dish is currently served
        #[arg(long)]
        available: Option<bool>,
    },

    /// Take a dish off your menu (restaurateur)
    Remove {
        /// Menu entry id
        id: String,

        /// Restaurant the entry belongs to
        #[arg(long)]
        restaurant: String,
    },
}

pub async fn run(app: &App, command: MenuCommand) -> Result<()> {
    match command {
        MenuCommand::Show {
            restaurant_id,
            filter,
            category,
        } => show(app, &restaurant_id, filter, category).await,
        MenuCommand::Add {
            dish,
            price,
            currency,
            description,
            restaurant,
            unavailable,
            image,
        } => {
            let dto = CreateRestaurantDishDto {
                dish_id: dish,
                price,
                currency,
                description,
                is_available: !unavailable,
                ..Default::default()
            };
            add(app, dto, restaurant, image).await
        }
        MenuCommand::Update {
            id,
            price,
            currency,
            description,
            available,
        } => {
            let dto = UpdateRestaurantDishDto {
                price,
                currency,
                description,
                is_available: available,
            };
            update(app, &id, dto).await
        }
        MenuCommand::Remove { id, restaurant } => remove(app, &id, &restaurant).await,
    }
}

async fn show(app: &App, restaurant_id: &str, filter: Option<String>, category: Option<String>) -> Result<()> {
    let source = MenuPages::new(app.client().restaurant_dishes(), restaurant_id);
    let mut menu = ListController::new(source, app.page_size);
    while_loading("Loading menu...", app.interactive(), menu.load()).await?;

    if let Some(text) = &filter {
        menu.set_filter(text);
    }
    if let Some(category) = &category {
        menu.set_category(category);
    }

    if !app.is_json() {
        if let Some(name) = menu.items().first().map(|e| e.restaurant_name()).filter(|n| !n.is_empty()) {
            Status::header(name);
        }
    }
    print_list(app, &menu, &MENU, menu_table);
    Ok(())
}

/// Restaurant to act on: the one given, else the user's first
fn resolve_restaurant(user: &User, requested: Option<String>) -> Result<String, CoreError> {
    if let Some(id) = requested {
        return Ok(id);
    }
    user.primary_restaurant().map(|r| r.id.clone()).ok_or_else(|| {
        CoreError::new(ErrorCode::NotFound, "You have no restaurant yet")
            .with_suggestion("Register one with `searchdish restaurants create`")
    })
}

async fn add(
    app: &App,
    mut dto: CreateRestaurantDishDto,
    restaurant: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    let user = app.require_role(Role::Restaurateur).await?;
    dto.restaurant_id = resolve_restaurant(&user, restaurant)?;
    check(dto.validate(), app.format)?;
    let image = load_image(image).await?;

    let entry = while_loading(
        "Adding to menu...",
        app.interactive(),
        app.client().restaurant_dishes().create(&dto),
    )
    .await?;

    // The photo belongs to the catalog dish, sent with this menu's description
    if let Some(image) = image {
        let dish_update = UpdateDishDto {
            description: Some(dto.description.clone()),
            ..Default::default()
        };
        while_loading(
            "Uploading photo...",
            app.interactive(),
            app.client().dishes().update(&dto.dish_id, &dish_update, Some(image)),
        )
        .await?;
        info!(dish_id = %dto.dish_id, "Dish photo updated");
    }

    if app.is_json() {
        print_json(&entry);
    } else {
        Status::success(&format!(
            "Added to the menu at {} ({})",
            format_price(entry.price, &entry.currency),
            entry.id
        ));
    }
    Ok(())
}

async fn update(app: &App, id: &str, dto: UpdateRestaurantDishDto) -> Result<()> {
    app.require_role(Role::Restaurateur).await?;
    check(dto.validate(), app.format)?;

    let entry = while_loading(
        "Saving...",
        app.interactive(),
        app.client().restaurant_dishes().update(id, &dto),
    )
    .await?;

    if app.is_json() {
        print_json(&entry);
    } else {
        Status::success(&format!("Menu entry {} updated", entry.id));
    }
    Ok(())
}

/// Delete an entry, drop it from the loaded menu, then re-fetch
async fn remove(app: &App, id: &str, restaurant_id: &str) -> Result<()> {
    app.require_role(Role::Restaurateur).await?;
    let api = app.client().restaurant_dishes();
    let mut menu = ListController::new(MenuPages::new(api.clone(), restaurant_id), app.page_size);
    while_loading("Loading menu...", app.interactive(), menu.load()).await?;

    while_loading("Removing...", app.interactive(), api.delete(id)).await?;
    if !menu.remove_local(id) {
        Status::warning(&format!("{id} was not on the loaded menu"));
    }
    menu.refresh().await?;

    if app.is_json() {
        print_json(&serde_json::json!({
            "deleted": id,
            "remaining": menu.items(),
        }));
    } else {
        Status::success(&format!("Removed {id}"));
        print_list(app, &menu, &MENU, menu_table);
    }
    Ok(())
}
