use inventory_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    seed::{ADMIN_EMAIL, ADMIN_PASSWORD, seed_all},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url, 2).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let admin_id = seed_all(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    println!("Default login: {ADMIN_EMAIL} / {ADMIN_PASSWORD}");
    Ok(())
}
