//! Prices subgraph (port 4002).
//!
//! Owns the `Price` entity and contributes `Movie.price` / `Movie.priceDetails`.
//! The REST source has no filtered lookup, so the movie -> price reverse
//! lookup loads the whole collection; a dataloader batches every movie id
//! requested in a tick into a single fetch while keeping the per-id
//! first-match semantics.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use async_graphql::{
    ComplexObject, Context, EmptyMutation, EmptySubscription, Error, Object, Result, Schema,
    SimpleObject, ID,
};
use moviegraph_source::records::{PriceDetailsRecord, PriceRecord, ServiceChargesRecord};
use moviegraph_source::{RestSource, SourceError};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Price {
    pub id: ID,
    #[graphql(skip)]
    pub reference_entity_id: Option<u64>,
    pub entity_price: Option<PriceDetails>,
    pub service_charges: Option<ServiceCharges>,
}

#[ComplexObject]
impl Price {
    /// Reference to the owning movie. The stub only carries the key; the
    /// gateway resolves the rest through the movies subgraph.
    async fn entity(&self) -> Option<Movie> {
        self.reference_entity_id.map(|movie_id| Movie {
            id: ID::from(movie_id.to_string()),
        })
    }
}

#[derive(SimpleObject, Clone)]
pub struct PriceDetails {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(SimpleObject, Clone)]
pub struct ServiceCharges {
    pub stream: Option<PriceDetails>,
    pub support: Option<PriceDetails>,
}

impl From<PriceRecord> for Price {
    fn from(record: PriceRecord) -> Self {
        Self {
            id: ID::from(record.id.to_string()),
            reference_entity_id: record.reference_entity_id,
            entity_price: record.entity_price.map(PriceDetails::from),
            service_charges: record.service_charges.map(ServiceCharges::from),
        }
    }
}

impl From<PriceDetailsRecord> for PriceDetails {
    fn from(record: PriceDetailsRecord) -> Self {
        Self {
            amount: record.amount,
            currency: record.currency,
        }
    }
}

impl From<ServiceChargesRecord> for ServiceCharges {
    fn from(record: ServiceChargesRecord) -> Self {
        Self {
            stream: record.stream.map(PriceDetails::from),
            support: record.support.map(PriceDetails::from),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(extends, complex)]
pub struct Movie {
    #[graphql(external)]
    pub id: ID,
}

#[ComplexObject]
impl Movie {
    /// First price record referencing this movie, or null.
    async fn price(&self, ctx: &Context<'_>) -> Result<Option<Price>> {
        self.lookup(ctx).await
    }

    /// Same record as `price`, under the name the movies subgraph requires
    /// for its computed fields.
    async fn price_details(&self, ctx: &Context<'_>) -> Result<Option<Price>> {
        self.lookup(ctx).await
    }
}

impl Movie {
    async fn lookup(&self, ctx: &Context<'_>) -> Result<Option<Price>> {
        // A non-numeric movie id can never match a referenceEntityId.
        let Ok(movie_id) = self.id.parse::<u64>() else {
            return Ok(None);
        };
        let loader = ctx.data_unchecked::<DataLoader<PriceByMovieLoader>>();
        Ok(loader.load_one(movie_id).await?.map(Price::from))
    }
}

pub struct PriceByMovieLoader {
    source: RestSource,
}

impl PriceByMovieLoader {
    pub fn new(source: RestSource) -> Self {
        Self { source }
    }
}

impl Loader<u64> for PriceByMovieLoader {
    type Value = PriceRecord;
    type Error = Arc<SourceError>;

    async fn load(&self, movie_ids: &[u64]) -> Result<HashMap<u64, PriceRecord>, Self::Error> {
        self.source
            .prices_by_movie(movie_ids)
            .await
            .map_err(Arc::new)
    }
}

pub struct Query;

#[Object(extends = true)]
impl Query {
    async fn price(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Price>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source.price(id.as_str()).await?.map(Price::from))
    }

    async fn prices(&self, ctx: &Context<'_>) -> Result<Vec<Price>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source.prices().await?.into_iter().map(Price::from).collect())
    }

    #[graphql(entity)]
    async fn find_price_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Price> {
        let source = ctx.data_unchecked::<RestSource>();
        source
            .price(id.as_str())
            .await?
            .map(Price::from)
            .ok_or_else(|| Error::new(format!("price '{}' not found", id.as_str())))
    }

    #[graphql(entity)]
    async fn find_movie_by_id(&self, id: ID) -> Movie {
        Movie { id }
    }
}

pub type PricesSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema(source: RestSource) -> PricesSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(source.clone())
        .data(DataLoader::new(
            PriceByMovieLoader::new(source),
            tokio::spawn,
        ))
        .enable_federation()
        .finish()
}
