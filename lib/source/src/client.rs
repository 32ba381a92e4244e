//! HTTP client for the REST catalog.
//!
//! The upstream contract is plain: collection endpoints (`/movies`, `/prices`,
//! `/discounts`, `/reviews`) return JSON arrays, item endpoints return a
//! single object. There is no filtered query surface, so reverse lookups
//! (movie id -> price/discount) fetch the whole collection and scan it. The
//! `*_by_movie` variants do that scan once for a whole batch of movie ids.

use std::collections::HashMap;

use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SourceError;
use crate::records::{DiscountRecord, MovieRecord, PriceRecord, ReviewRecord};

#[derive(Clone)]
pub struct RestSource {
    http: reqwest::Client,
    base_url: String,
}

impl RestSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, SourceError> {
        debug!(path, "fetching collection from REST source");
        let response = self.http.get(format!("{}{}", self.base_url, path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status,
                path: path.to_string(),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetches a single record. A 404 from the source means the record does
    /// not exist and maps to `None`; any other non-2xx status is an error.
    async fn get_item<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, SourceError> {
        debug!(path, "fetching item from REST source");
        let response = self.http.get(format!("{}{}", self.base_url, path)).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status,
                path: path.to_string(),
            });
        }
        Ok(Some(response.json().await?))
    }

    pub async fn movies(&self) -> Result<Vec<MovieRecord>, SourceError> {
        self.get_collection("/movies").await
    }

    pub async fn movie(&self, id: &str) -> Result<Option<MovieRecord>, SourceError> {
        self.get_item(&format!("/movies/{id}")).await
    }

    pub async fn prices(&self) -> Result<Vec<PriceRecord>, SourceError> {
        self.get_collection("/prices").await
    }

    pub async fn price(&self, id: &str) -> Result<Option<PriceRecord>, SourceError> {
        self.get_item(&format!("/prices/{id}")).await
    }

    pub async fn discounts(&self) -> Result<Vec<DiscountRecord>, SourceError> {
        self.get_collection("/discounts").await
    }

    pub async fn discount(&self, id: &str) -> Result<Option<DiscountRecord>, SourceError> {
        self.get_item(&format!("/discounts/{id}")).await
    }

    pub async fn reviews(&self) -> Result<Vec<ReviewRecord>, SourceError> {
        self.get_collection("/reviews").await
    }

    pub async fn review(&self, id: &str) -> Result<Option<ReviewRecord>, SourceError> {
        self.get_item(&format!("/reviews/{id}")).await
    }

    /// First price whose `referenceEntityId` matches the movie, or `None`.
    pub async fn price_for_movie(&self, movie_id: u64) -> Result<Option<PriceRecord>, SourceError> {
        let prices = self.prices().await?;
        Ok(prices
            .into_iter()
            .find(|price| price.reference_entity_id == Some(movie_id)))
    }

    /// First discount whose `referenceEntityId` matches the movie, or `None`.
    pub async fn discount_for_movie(
        &self,
        movie_id: u64,
    ) -> Result<Option<DiscountRecord>, SourceError> {
        let discounts = self.discounts().await?;
        Ok(discounts
            .into_iter()
            .find(|discount| discount.reference_entity_id == Some(movie_id)))
    }

    /// Batched reverse lookup: one collection fetch for any number of movie
    /// ids. Per id, the first matching record wins, same as the single-id
    /// scan. Ids without a match are absent from the map.
    pub async fn prices_by_movie(
        &self,
        movie_ids: &[u64],
    ) -> Result<HashMap<u64, PriceRecord>, SourceError> {
        let prices = self.prices().await?;
        Ok(index_by_reference(prices, movie_ids, |price| {
            price.reference_entity_id
        }))
    }

    /// Batched variant of [`discount_for_movie`](Self::discount_for_movie).
    pub async fn discounts_by_movie(
        &self,
        movie_ids: &[u64],
    ) -> Result<HashMap<u64, DiscountRecord>, SourceError> {
        let discounts = self.discounts().await?;
        Ok(index_by_reference(discounts, movie_ids, |discount| {
            discount.reference_entity_id
        }))
    }
}

fn index_by_reference<T>(
    records: Vec<T>,
    movie_ids: &[u64],
    reference: impl Fn(&T) -> Option<u64>,
) -> HashMap<u64, T> {
    let mut by_movie = HashMap::with_capacity(movie_ids.len());
    for record in records {
        match reference(&record) {
            Some(movie_id) if movie_ids.contains(&movie_id) => {
                // First match wins, matching the linear-scan semantics.
                by_movie.entry(movie_id).or_insert(record);
            }
            _ => {}
        }
    }
    by_movie
}
