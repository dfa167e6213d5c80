//! Command dispatch

use anyhow::Context;
use serde::Serialize;

use super::parser::Commands;
use crate::actions::Actions;
use crate::models::{LoginRequest, RegisterRequest, SearchParams, SubscribeRequest};

/// Run one command against the actions and print its result as JSON.
pub async fn execute_command(command: &Commands, actions: &Actions) -> anyhow::Result<()> {
    match command {
        Commands::Recent { period } => {
            if let Some(period) = period {
                actions.set_period(period.as_str());
            }
            print_json(&actions.fetch_recent_posts().await?)
        }
        Commands::Featured => print_json(&actions.fetch_featured_posts().await?),
        Commands::Posts { page } => print_json(&actions.fetch_all_posts(*page).await?),
        Commands::Post { slug } => print_json(&actions.fetch_by_slug(slug).await?),
        Commands::Company { slug } => print_json(&actions.fetch_by_company(slug).await?),
        Commands::Tag { slug } => print_json(&actions.fetch_by_tag(slug).await?),
        Commands::Search { params } => {
            let params: SearchParams = params.iter().cloned().collect();
            print_json(&actions.search(&params).await?)
        }
        Commands::Tags => {
            actions.fetch_tags().await?;
            print_json(&actions.store().read(|s| s.tags.clone()))
        }
        Commands::Related { slug } => {
            let post = actions.fetch_by_slug(slug).await?;
            print_json(&actions.fetch_related_posts(&post.data).await?)
        }
        Commands::Locations => {
            actions.fetch_available_locations().await?;
            print_json(&actions.store().read(|s| s.available_locations.clone()))
        }
        Commands::Me => {
            actions.fetch_me().await?;
            print_json(&actions.store().read(|s| s.me.clone()))
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            actions
                .try_sign_up(&RegisterRequest::new(name, email, password))
                .await
                .context("Registration failed")?;
            eprintln!("Registered and signed in");
            Ok(())
        }
        Commands::Login { email, password } => {
            let request = LoginRequest {
                email: email.clone(),
                password: password.clone(),
            };
            actions.try_login(&request).await.context("Login failed")?;
            eprintln!("Signed in");
            Ok(())
        }
        Commands::Logout => {
            actions.logout().await?;
            eprintln!("Logged out");
            Ok(())
        }
        Commands::Subscribe { email } => {
            let request = SubscribeRequest {
                email: email.clone(),
            };
            print_json(&actions.subscribe(&request).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
