//! Restaurant review (admin) and restaurant settings (restaurateur)

use crate::app::{App, check, load_image};
use crate::render::{Labels, print_json, print_list, restaurant_table};
use anyhow::Result;
use clap::Subcommand;
use searchdish_api_client::listing::{ListController, PendingRestaurantPages, RestaurantPages};
use searchdish_api_client::models::{
    CreateRestaurantDto, Restaurant, Role, UpdateRestaurantDto, parse_opening_hours,
};
use searchdish_cli::output::Status;
use searchdish_cli::progress::while_loading;
use searchdish_core::validation::Validate;
use searchdish_core::{Error as CoreError, ErrorCode};
use std::path::PathBuf;
use tracing::debug;

/// Cards per page on the admin grid
pub const ADMIN_PAGE_SIZE: u32 = 9;

const RESTAURANTS: Labels = Labels {
    singular: "restaurant",
    plural: "restaurants",
    empty: "No restaurants yet.",
};

const PENDING: Labels = Labels {
    singular: "pending restaurant",
    plural: "pending restaurants",
    empty: "No restaurants waiting for approval on this page.",
};

#[derive(Subcommand)]
pub enum RestaurantsCommand {
    /// List all restaurants (admin)
    List {
        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Restaurants per page
        #[arg(long, default_value_t = ADMIN_PAGE_SIZE)]
        limit: u32,

        /// Narrow the page by name or city
        #[arg(long)]
        filter: Option<String>,
    },

    /// List restaurants waiting for approval (admin)
    Pending {
        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Restaurants per page
        #[arg(long, default_value_t = ADMIN_PAGE_SIZE)]
        limit: u32,

        /// Narrow the page by name or city
        #[arg(long)]
        filter: Option<String>,
    },

    /// Activate a restaurant and its owner's account (admin)
    Approve {
        /// Restaurant id
        id: String,
    },

    /// Register a restaurant for approval (restaurateur)
    Create {
        /// Restaurant name
        #[arg(long)]
        name: String,

        /// What the restaurant serves
        #[arg(long)]
        description: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// City
        #[arg(long, alias = "country")]
        city: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Website (http or https)
        #[arg(long)]
        website: Option<String>,

        /// Opening hours as day=range, e.g. --hours monday=08:00-22:00 (repeatable)
        #[arg(long = "hours", value_name = "DAY=RANGE")]
        hours: Vec<String>,

        /// Photo to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Change one of your restaurants (restaurateur)
    Update {
        /// Restaurant id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        website: Option<String>,

        /// Replace opening hours with these day=range pairs (repeatable)
        #[arg(long = "hours", value_name = "DAY=RANGE")]
        hours: Vec<String>,

        /// New photo
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

pub async fn run(app: &App, command: RestaurantsCommand) -> Result<()> {
    match command {
        RestaurantsCommand::List { page, limit, filter } => list(app, page, limit, filter, false).await,
        RestaurantsCommand::Pending { page, limit, filter } => list(app, page, limit, filter, true).await,
        RestaurantsCommand::Approve { id } => approve(app, &id).await,
        RestaurantsCommand::Create {
            name,
            description,
            address,
            city,
            phone,
            website,
            hours,
            image,
        } => {
            let dto = CreateRestaurantDto {
                name,
                description,
                address,
                country: city,
                phone,
                website: website.filter(|w| !w.trim().is_empty()),
                is_active: false,
                opening_hours: None,
                user_id: String::new(),
            };
            create(app, dto, &hours, image).await
        }
        RestaurantsCommand::Update {
            id,
            name,
            description,
            address,
            phone,
            website,
            hours,
            image,
        } => {
            let changes = SettingsChanges {
                name,
                description,
                address,
                phone,
                website,
                hours,
            };
            update(app, &id, changes, image).await
        }
    }
}

async fn list(app: &App, page: u32, limit: u32, filter: Option<String>, pending_only: bool) -> Result<()> {
    app.require_role(Role::Admin).await?;
    let source = RestaurantPages::new(app.client().restaurants());

    if pending_only {
        let mut list = ListController::new(PendingRestaurantPages::new(source), limit).starting_at(page);
        while_loading("Loading restaurants...", app.interactive(), list.load()).await?;
        if let Some(text) = &filter {
            list.set_filter(text);
        }
        print_list(app, &list, &PENDING, restaurant_table);
    } else {
        let mut list = ListController::new(source, limit).starting_at(page);
        while_loading("Loading restaurants...", app.interactive(), list.load()).await?;
        if let Some(text) = &filter {
            list.set_filter(text);
        }
        print_list(app, &list, &RESTAURANTS, restaurant_table);
    }
    Ok(())
}

/// Walk the paginated listing until `id` turns up
async fn find_restaurant(app: &App, id: &str) -> Result<Restaurant> {
    let api = app.client().restaurants();
    let mut page = 1;
    loop {
        debug!(page, "Looking for restaurant {id}");
        let batch = api.find_all(app.page_size.max(ADMIN_PAGE_SIZE), page).await?;
        let more = batch.has_next();
        if let Some(found) = batch.data.into_iter().find(|r| r.id == id) {
            return Ok(found);
        }
        if !more {
            break;
        }
        page += 1;
    }
    Err(CoreError::new(ErrorCode::NotFound, format!("No restaurant with id {id}"))
        .with_suggestion("Run `searchdish restaurants pending` to see ids")
        .into())
}

async fn approve(app: &App, id: &str) -> Result<()> {
    app.require_role(Role::Admin).await?;
    let restaurant = while_loading("Looking up restaurant...", app.interactive(), find_restaurant(app, id)).await?;

    if restaurant.is_active {
        if app.is_json() {
            print_json(&restaurant);
        } else {
            Status::info(&format!("{} is already active", restaurant.name));
        }
        return Ok(());
    }

    while_loading(
        "Approving...",
        app.interactive(),
        app.client().restaurants().approve(&restaurant),
    )
    .await?;

    if app.is_json() {
        print_json(&serde_json::json!({
            "approved": restaurant.id,
            "owner": restaurant.user_id,
        }));
    } else {
        Status::success(&format!("{} approved; its owner can now log in", restaurant.name));
    }
    Ok(())
}

async fn create(app: &App, mut dto: CreateRestaurantDto, hours: &[String], image: Option<PathBuf>) -> Result<()> {
    let user = app.require_role(Role::Restaurateur).await?;
    dto.user_id = user.id;
    if !hours.is_empty() {
        dto.opening_hours = Some(parse_opening_hours(hours)?);
    }
    check(dto.validate(), app.format)?;
    let image = load_image(image).await?;

    let created = while_loading(
        "Registering restaurant...",
        app.interactive(),
        app.client().restaurants().create(&dto, image),
    )
    .await?;

    if app.is_json() {
        print_json(&created);
    } else {
        Status::success(&format!("{} registered ({})", created.name, created.id));
        Status::info("An admin must approve it before it appears in searches");
    }
    Ok(())
}

/// Fields given on the command line for `restaurants update`
struct SettingsChanges {
    name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    hours: Vec<String>,
}

impl SettingsChanges {
    fn apply(self, dto: &mut UpdateRestaurantDto) -> searchdish_core::Result<()> {
        if let Some(name) = self.name {
            dto.name = name;
        }
        if self.description.is_some() {
            dto.description = self.description;
        }
        if self.address.is_some() {
            dto.address = self.address;
        }
        if self.phone.is_some() {
            dto.phone = self.phone;
        }
        if let Some(website) = self.website {
            dto.website = (!website.trim().is_empty()).then_some(website);
        }
        if !self.hours.is_empty() {
            dto.opening_hours = Some(parse_opening_hours(&self.hours)?);
        }
        Ok(())
    }
}

async fn update(app: &App, id: &str, changes: SettingsChanges, image: Option<PathBuf>) -> Result<()> {
    let user = app.require_role(Role::Restaurateur).await?;
    let current = user
        .restaurants
        .iter()
        .flatten()
        .find(|r| r.id == id)
        .ok_or_else(|| {
            CoreError::new(ErrorCode::NotFound, format!("You have no restaurant with id {id}"))
                .with_suggestion("Run `searchdish whoami` to list your restaurants")
        })?;

    let mut dto = UpdateRestaurantDto::from_current(current);
    changes.apply(&mut dto)?;
    check(dto.validate(), app.format)?;
    let image = load_image(image).await?;

    let updated = while_loading(
        "Saving...",
        app.interactive(),
        app.client().restaurants().update(id, &dto, image),
    )
    .await?;

    if app.is_json() {
        print_json(&updated);
    } else {
        Status::success(&format!("{} updated", updated.name));
    }
    Ok(())
}
