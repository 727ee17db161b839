use std::path::PathBuf;

use clap::Parser;

use crate::google_photos::API_BASE;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "photos-export",
    version,
    about = "Export the filenames of a Google Photos library to CSV"
)]
pub struct Config {
    /// CSV file to write
    #[arg(long, default_value = "google_photos_filenames.csv")]
    pub output: PathBuf,

    /// Where the OAuth credential is cached between runs
    #[arg(long, default_value = "token.json")]
    pub token_path: PathBuf,

    /// OAuth client descriptor downloaded from the Google Cloud console
    #[arg(long, default_value = "credentials.json")]
    pub client_secrets: PathBuf,

    /// Local port receiving the authorization redirect
    #[arg(long, default_value_t = 55240)]
    pub port: u16,

    #[arg(long, default_value = API_BASE, hide = true)]
    pub api_base_url: String,
}
