use crate::core::AppConfig;
use crate::core::db::{async_db, initialize_db};
use anyhow::Result;

pub async fn run() -> Result<()> {
    let config = AppConfig::default();

    println!("Initializing db...");
    let db = async_db(&config.db_path)
        .await
        .expect("Failed to connect to db");
    db.call(|conn| {
        initialize_db(conn).expect("DB initialization failed");
        Ok(())
    })
    .await?;
    println!("Finished initializing db");

    Ok(())
}
