//! Global dish catalog (admin)

use crate::app::{App, check, load_image};
use crate::render::{Labels, dish_table, print_json, print_list};
use anyhow::Result;
use clap::Subcommand;
use searchdish_api_client::listing::{CatalogPages, ListController};
use searchdish_api_client::models::{CreateDishDto, Role, UpdateDishDto};
use searchdish_cli::output::Status;
use searchdish_cli::progress::while_loading;
use searchdish_core::validation::Validate;
use std::path::PathBuf;

const DISHES: Labels = Labels {
    singular: "dish",
    plural: "dishes",
    empty: "The catalog is empty.",
};

#[derive(Subcommand)]
pub enum DishesCommand {
    /// Show the catalog
    List {
        /// Narrow by name, description or category
        #[arg(long)]
        filter: Option<String>,

        /// Only this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,
    },

    /// Add a dish to the catalog (admin)
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        category: String,
    },

    /// Change a catalog dish (admin)
    Update {
        /// Dish id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// New photo
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Remove a dish from the catalog (admin)
    Delete {
        /// Dish id
        id: String,
    },
}

pub async fn run(app: &App, command: DishesCommand) -> Result<()> {
    match command {
        DishesCommand::List { filter, category } => list(app, filter, category).await,
        DishesCommand::Create {
            name,
            description,
            category,
        } => {
            create(
                app,
                CreateDishDto {
                    name,
                    description,
                    category,
                },
            )
            .await
        }
        DishesCommand::Update {
            id,
            name,
            description,
            category,
            image,
        } => {
            let dto = UpdateDishDto {
                name,
                description,
                category,
            };
            update(app, &id, dto, image).await
        }
        DishesCommand::Delete { id } => delete(app, &id).await,
    }
}

async fn list(app: &App, filter: Option<String>, category: Option<String>) -> Result<()> {
    let mut list = ListController::new(CatalogPages::new(app.client().dishes()), app.page_size);
    while_loading("Loading dishes...", app.interactive(), list.load()).await?;

    if let Some(text) = &filter {
        list.set_filter(text);
    }
    if let Some(category) = &category {
        list.set_category(category);
    }

    print_list(app, &list, &DISHES, dish_table);
    if !app.is_json() {
        let categories = list.categories();
        if !categories.is_empty() {
            println!("Categories: {}", categories.join(", "));
        }
    }
    Ok(())
}

async fn create(app: &App, dto: CreateDishDto) -> Result<()> {
    app.require_role(Role::Admin).await?;
    check(dto.validate(), app.format)?;

    let dish = while_loading("Saving dish...", app.interactive(), app.client().dishes().create(&dto)).await?;

    if app.is_json() {
        print_json(&dish);
    } else {
        Status::success(&format!("{} added to the catalog ({})", dish.name, dish.id));
    }
    Ok(())
}

async fn update(app: &App, id: &str, dto: UpdateDishDto, image: Option<PathBuf>) -> Result<()> {
    app.require_role(Role::Admin).await?;
    check(dto.validate(), app.format)?;

    let image = load_image(image).await?;

    let dish = while_loading(
        "Saving dish...",
        app.interactive(),
        app.client().dishes().update(id, &dto, image),
    )
    .await?;

    if app.is_json() {
        print_json(&dish);
    } else {
        Status::success(&format!("{} updated", dish.name));
    }
    Ok(())
}

async fn delete(app: &App, id: &str) -> Result<()> {
    app.require_role(Role::Admin).await?;
    while_loading("Deleting dish...", app.interactive(), app.client().dishes().delete(id)).await?;

    if app.is_json() {
        print_json(&serde_json::json!({ "deleted": id }));
    } else {
        Status::success(&format!("Dish {id} deleted"));
    }
    Ok(())
}
