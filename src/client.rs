use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::codec;
use crate::config::CatalogSettings;
use crate::error::{CatalogError, Result};
use crate::models::MovieRecord;

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
struct BaseClient {
    base_url: String,
    http: Client,
}

impl BaseClient {
    fn new(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the full URL for a given endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Map the status code to an error, or hand back the raw body.
    fn handle_response(&self, response: Response) -> Result<Vec<u8>> {
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        if (200..300).contains(&status) {
            return Ok(body);
        }

        // Catalog errors carry `status_message`; fall back to `message`.
        let msg = serde_json::from_slice::<serde_json::Value>(&body)
            .ok()
            .and_then(|data| {
                data.get("status_message")
                    .or_else(|| data.get("message"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        match status {
            401 => Err(CatalogError::Authentication {
                message: if msg.is_empty() {
                    "Unauthenticated".into()
                } else {
                    msg
                },
            }),
            404 => Err(CatalogError::NotFound {
                message: if msg.is_empty() {
                    "Not found".into()
                } else {
                    msg
                },
            }),
            _ => Err(CatalogError::Api {
                status,
                message: if msg.is_empty() {
                    format!("HTTP {status}")
                } else {
                    msg
                },
            }),
        }
    }

    fn get(&self, endpoint: &str) -> Result<Vec<u8>> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let resp = self.http.get(url).send()?;
        self.handle_response(resp)
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Client for the movie catalog API.
///
/// ```no_run
/// use movie_shelf::CatalogClient;
///
/// let client = CatalogClient::new("https://api.example-catalog/3", "token").unwrap();
/// for movie in client.popular().unwrap() {
///     println!("{} ({})", movie.title, movie.release_date);
/// }
/// ```
pub struct CatalogClient {
    base: BaseClient,
}

impl CatalogClient {
    /// Create a new client.
    ///
    /// * `base_url` – API root, e.g. `https://api.example-catalog/3`
    /// * `token`    – bearer token sent with every request
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(base_url, token)?,
        })
    }

    /// First page of popular movies.
    pub fn popular(&self) -> Result<Vec<MovieRecord>> {
        let body = self.base.get("/movie/popular")?;
        Ok(codec::decode_page(&body)?)
    }
}

/// Fetch popular movies with the token currently set in the environment.
pub fn fetch_popular(settings: &CatalogSettings) -> Result<Vec<MovieRecord>> {
    let token = settings.bearer_token()?;
    CatalogClient::new(&settings.api_url, &token)?.popular()
}
