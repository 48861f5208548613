//! HTTP implementation of `EntityApi` against the platform's REST API.
//!
//! `PATCH {base}/{resource}/{id}` with the draft as JSON applies an update;
//! `GET {base}/{resource}/{id}` loads an entity for hydration. Unlike most
//! HTTP clients there is no retry loop: a failed update is surfaced to the
//! user, who decides whether to submit again.
//!
//! A successful update with an empty body (`204 No Content`) is followed by
//! a `GET` so the store still receives the server's copy.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{EntityApi, MutationRequest};
use crate::config::Config;
use crate::errors::MutationError;
use crate::models::{Entity, EntityId};

/// Error body shape returned by the API on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpEntityApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpEntityApi {
    pub fn new(client: Client, base_url: Url, token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(
            client,
            config.api_base_url.clone(),
            config.api_token.clone(),
        ))
    }

    /// `{base}/{resource}/{id}`, with the id percent-encoded as one segment.
    pub fn endpoint<E: Entity>(&self, id: &EntityId) -> Result<Url, MutationError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(E::RESOURCE.split('/'))
            .push(id.as_str());
        Ok(url)
    }

    /// Loads one entity, for the data-fetch step that hydrates the store.
    pub async fn fetch<E: Entity>(&self, id: &EntityId) -> Result<E, MutationError> {
        let url = self.endpoint::<E>(id)?;
        debug!("GET {url}");
        let response = self.authorize(self.client.get(url)).send().await?;
        let body = success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl<E: Entity> EntityApi<E> for HttpEntityApi {
    async fn update_entity(&self, request: &MutationRequest<E::Values>) -> Result<E, MutationError> {
        let url = self.endpoint::<E>(request.id())?;
        debug!("PATCH {url}");
        let response = self
            .authorize(self.client.patch(url))
            .json(request.values())
            .send()
            .await?;
        let body = success_body(response).await?;

        if body.trim().is_empty() {
            debug!("Update of {} {} returned no body, reloading", E::RESOURCE, request.id());
            return self
                .fetch::<E>(request.id())
                .await
                .map_err(|e| MutationError::Unconfirmed(Box::new(e)));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Reads the body of a 2xx response. Anything else becomes
/// `MutationError::Api` carrying the server's message (falling back to the raw body).
async fn success_body(response: Response) -> Result<String, MutationError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("API returned {status}: {body}");
        return Err(MutationError::Api {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        });
    }

    Ok(body)
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.message;
    }
    let body = body.trim();
    if body.is_empty() {
        reason.unwrap_or("Request failed").to_string()
    } else {
        body.to_string()
    }
}
