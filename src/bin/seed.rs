use inventory_tracker::{
    config::AppConfig,
    dto::{auth::Credentials, items::ItemInput},
    entity::{items::Column as ItemCol, Items},
    error::AppError,
    services::{auth_service::register_user, item_service::create_item},
    state::AppState,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Connecting also applies migrations.
    let state = AppState::init(&config).await?;

    let username = std::env::var("SEED_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "admin1234".to_string());
    ensure_user(&state, &username, &password).await?;
    seed_items(&state).await?;

    println!("Seed completed. Log in as {username}");
    Ok(())
}

async fn ensure_user(state: &AppState, username: &str, password: &str) -> anyhow::Result<()> {
    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    match register_user(state, credentials).await {
        Ok(user) => println!("Created user {} (id={})", user.username, user.id),
        Err(AppError::Conflict(_)) => println!("User {username} already exists"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn seed_items(state: &AppState) -> anyhow::Result<()> {
    let items = vec![
        ("Widget", "Standard blue widget", 10, 2.5),
        ("Gadget", "Pocket-sized gadget", 25, 7.99),
        ("Sprocket", "12-tooth steel sprocket", 40, 1.25),
        ("Cable", "USB-C cable, 1m", 60, 4.0),
    ];

    for (name, desc, quantity, price) in items {
        let exists = Items::find()
            .filter(ItemCol::Name.eq(name))
            .one(&state.orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        let input = ItemInput::new(name.to_string(), desc.to_string(), quantity, price)?;
        let created = create_item(state, input).await?;
        println!("Seeded item {} (id={})", created.item.name, created.item.id);
    }

    Ok(())
}
