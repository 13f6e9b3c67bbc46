//! Contact form

use crate::app::{App, check};
use crate::render::print_json;
use anyhow::Result;
use clap::Args;
use searchdish_api_client::models::{ContactMessage, ContactSubject};
use searchdish_cli::output::Status;
use searchdish_cli::progress::while_loading;
use searchdish_core::validation::Validate;

#[derive(Args)]
pub struct ContactArgs {
    /// appreciation, report or suggestion
    #[arg(long, default_value_t = ContactSubject::Appreciation)]
    pub subject: ContactSubject,

    /// What you want to tell us (at least 20 characters)
    #[arg(long)]
    pub message: String,

    /// Your name (defaults to the account's)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Reply address (defaults to the account's)
    #[arg(long, default_value = "")]
    pub email: String,

    /// Restaurant this is about
    #[arg(long, default_value = "")]
    pub restaurant: String,

    /// Dish this is about
    #[arg(long, default_value = "")]
    pub dish: String,

    #[arg(long, default_value = "")]
    pub dish_description: String,
}

impl From<ContactArgs> for ContactMessage {
    fn from(args: ContactArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            subject: args.subject,
            message: args.message.trim().to_string(),
            restaurant_name: args.restaurant,
            dish_name: args.dish,
            dish_description: args.dish_description,
            ..Default::default()
        }
    }
}

pub async fn run(app: &App, args: ContactArgs) -> Result<()> {
    let user = app.require_user().await?;
    let message = ContactMessage::from(args);
    check(message.validate(), app.format)?;

    let reply = while_loading(
        "Sending...",
        app.interactive(),
        app.client().contact().send(&user, message),
    )
    .await?;

    if app.is_json() {
        print_json(&reply);
    } else {
        Status::success("Message sent, thank you");
    }
    Ok(())
}
