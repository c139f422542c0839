use pocket_api::{ApiError, Client, DEFAULT_BASE_URL, Request};
use secrecy::SecretString;

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new(DEFAULT_BASE_URL, &SecretString::from("api_token"));

    let ledgers = client.fetch(Request::accounts().list()).await?;
    if let Some(ledger) = ledgers.first() {
        let req = Request::postings().with_limit(10).list(ledger.account.clone());
        let _page = client.fetch(req).await?;
    }
    Ok(())
}
