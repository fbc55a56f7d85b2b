use journal_api::{ApiError, Credentials, HttpJournalClient, JournalApi};
use std::env;
use std::error::Error;

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let api_url = env::var("JOURNAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let username = env::var("JOURNAL_USERNAME").expect("JOURNAL_USERNAME must be set");
    let password = env::var("JOURNAL_PASSWORD").expect("JOURNAL_PASSWORD must be set");

    let client = HttpJournalClient::new(&api_url)?;
    let credentials = Credentials::new(&username, &password)?;

    println!("{} says: {}", api_url, client.health_check().await?);

    let entries = match client.list_entries(&credentials).await {
        Ok(entries) => entries,
        Err(ApiError::NotFound { .. }) => vec![],
        Err(e) => return Err(e.into()),
    };

    println!("{} has {} entries", username, entries.len());
    for entry in entries {
        println!(
            "{} | {} | {}",
            entry.id,
            entry.date.as_deref().unwrap_or("-"),
            entry.title
        );
    }

    Ok(())
}
