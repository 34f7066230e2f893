use citysync_boundary as json;
use citysync_core::{
    entities::{Category, ContactInfo, Event, Id, ParseError, Url},
    usecases::merge_unique_events,
};
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] ParseError),

    #[error("Events API error: {0}")]
    Api(#[from] json::ApiError),

    #[error("Events API responded with HTTP status {0}")]
    Status(u16),
}

async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.bytes().await?;
    match serde_json::from_slice::<json::ApiError>(&body) {
        Ok(err) => Err(err.into()),
        Err(_) => Err(Error::Status(status.as_u16())),
    }
}

/// Read-only client of the CitySync REST backend.
#[derive(Debug, Clone)]
pub struct EventsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl EventsApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        // Relative paths are joined to the last path segment otherwise
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn events_url(&self, category_slug: Option<&str>) -> Result<Url> {
        let mut url = self.endpoint("events/")?;
        if let Some(slug) = category_slug {
            url.query_pairs_mut().append_pair("category", slug);
        }
        Ok(url)
    }

    async fn get<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        into_json(response).await
    }

    /// All events, or only those of a single category.
    pub async fn fetch_events(&self, category_slug: Option<&str>) -> Result<Vec<Event>> {
        let url = self.events_url(category_slug)?;
        let events: Vec<json::Event> = self.get(url).await?;
        Ok(events.into_iter().map(Event::from).collect())
    }

    /// Events of several categories without duplicates.
    pub async fn fetch_events_for_categories<S>(&self, slugs: &[S]) -> Result<Vec<Event>>
    where
        S: AsRef<str>,
    {
        let mut lists = Vec::with_capacity(slugs.len());
        for slug in slugs {
            lists.push(self.fetch_events(Some(slug.as_ref())).await?);
        }
        Ok(merge_unique_events(lists))
    }

    pub async fn fetch_event(&self, id: Id) -> Result<Event> {
        let url = self.endpoint(&format!("events/{id}/"))?;
        let event: json::Event = self.get(url).await?;
        Ok(event.into())
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let url = self.endpoint("categories/")?;
        let categories: Vec<json::Category> = self.get(url).await?;
        Ok(categories.into_iter().map(Category::from).collect())
    }

    pub async fn fetch_category(&self, slug: &str) -> Result<Category> {
        let url = self.endpoint(&format!("categories/{slug}/"))?;
        let category: json::Category = self.get(url).await?;
        Ok(category.into())
    }

    pub async fn fetch_contacts(&self) -> Result<Vec<ContactInfo>> {
        let url = self.endpoint("contact/")?;
        let contacts: Vec<json::ContactInfo> = self.get(url).await?;
        Ok(contacts.into_iter().map(ContactInfo::from).collect())
    }
}
