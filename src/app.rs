use anyhow::Context as _;
use reqwest::Client;

use crate::{
    google_photos::{InstalledAppFlow, PhotosClient},
    *,
};

/// Everything a run needs, built once at startup.
pub struct Context {
    pub config: Config,
    pub http: Client,
}

impl Context {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Could not build HTTP client")?;

        Ok(Self { config, http })
    }
}

/// Authenticates, then exports every filename in the library.
pub async fn run(ctx: &Context) -> Result<ExportResult, Error> {
    let config = &ctx.config;

    let store = CredentialStore::new(&config.token_path);
    let flow = InstalledAppFlow::new(ctx.http.clone(), &config.client_secrets, config.port);
    let credential = obtain_credential(&store, &flow).await?;

    let session = Session::new(store, flow, credential);
    let client = PhotosClient::new(ctx.http.clone(), &config.api_base_url, session);
    let result = export_filenames(&client, &config.output).await?;

    if let ExportResult::Written(count) = result {
        tracing::info!(count, path = %config.output.display(), "Exported filenames");
    }

    Ok(result)
}
