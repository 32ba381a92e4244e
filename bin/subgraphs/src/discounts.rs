//! Discounts subgraph (port 4003).
//!
//! Owns the `Discount` entity and contributes `Movie.discount` /
//! `Movie.discountDetails`, batched through a dataloader the same way the
//! prices subgraph batches its reverse lookup.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use async_graphql::{
    ComplexObject, Context, EmptyMutation, EmptySubscription, Error, Object, Result, Schema,
    SimpleObject, ID,
};
use moviegraph_source::records::{DiscountRecord, ValidityPeriodRecord};
use moviegraph_source::{RestSource, SourceError};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Discount {
    pub id: ID,
    #[graphql(skip)]
    pub reference_entity_id: Option<u64>,
    pub validity_period: Option<ValidityPeriod>,
    pub amount: Option<f64>,
    #[graphql(name = "type")]
    pub discount_type: Option<String>,
}

#[ComplexObject]
impl Discount {
    /// Reference to the owning movie. The stub only carries the key; the
    /// gateway resolves the rest through the movies subgraph.
    async fn entity(&self) -> Option<Movie> {
        self.reference_entity_id.map(|movie_id| Movie {
            id: ID::from(movie_id.to_string()),
        })
    }
}

/// Calendar-month validity window, 1-based and inclusive on both ends.
#[derive(SimpleObject, Clone)]
pub struct ValidityPeriod {
    pub begin_month: Option<i32>,
    pub end_month: Option<i32>,
}

impl From<DiscountRecord> for Discount {
    fn from(record: DiscountRecord) -> Self {
        Self {
            id: ID::from(record.id.to_string()),
            reference_entity_id: record.reference_entity_id,
            validity_period: record.validity_period.map(ValidityPeriod::from),
            amount: record.amount,
            discount_type: record.discount_type,
        }
    }
}

impl From<ValidityPeriodRecord> for ValidityPeriod {
    fn from(record: ValidityPeriodRecord) -> Self {
        Self {
            begin_month: record.begin_month,
            end_month: record.end_month,
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
    /// First discount record referencing this movie, or null.
    async fn discount(&self, ctx: &Context<'_>) -> Result<Option<Discount>> {
        self.lookup(ctx).await
    }

    /// Same record as `discount`, under the name the movies subgraph requires
    /// for its computed fields.
    async fn discount_details(&self, ctx: &Context<'_>) -> Result<Option<Discount>> {
        self.lookup(ctx).await
    }
}

impl Movie {
    async fn lookup(&self, ctx: &Context<'_>) -> Result<Option<Discount>> {
        let Ok(movie_id) = self.id.parse::<u64>() else {
            return Ok(None);
        };
        let loader = ctx.data_unchecked::<DataLoader<DiscountByMovieLoader>>();
        Ok(loader.load_one(movie_id).await?.map(Discount::from))
    }
}

pub struct DiscountByMovieLoader {
    source: RestSource,
}

impl DiscountByMovieLoader {
    pub fn new(source: RestSource) -> Self {
        Self { source }
    }
}

impl Loader<u64> for DiscountByMovieLoader {
    type Value = DiscountRecord;
    type Error = Arc<SourceError>;

    async fn load(&self, movie_ids: &[u64]) -> Result<HashMap<u64, DiscountRecord>, Self::Error> {
        self.source
            .discounts_by_movie(movie_ids)
            .await
            .map_err(Arc::new)
    }
}

pub struct Query;

#[Object(extends = true)]
impl Query {
    async fn discount(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Discount>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source.discount(id.as_str()).await?.map(Discount::from))
    }

    async fn discounts(&self, ctx: &Context<'_>) -> Result<Vec<Discount>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source
            .discounts()
            .await?
            .into_iter()
            .map(Discount::from)
            .collect())
    }

    #[graphql(entity)]
    async fn find_discount_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Discount> {
        let source = ctx.data_unchecked::<RestSource>();
        source
            .discount(id.as_str())
            .await?
            .map(Discount::from)
            .ok_or_else(|| Error::new(format!("discount '{}' not found", id.as_str())))
    }

    #[graphql(entity)]
    async fn find_movie_by_id(&self, id: ID) -> Movie {
        Movie { id }
    }
}

pub type DiscountsSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema(source: RestSource) -> DiscountsSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(source.clone())
        .data(DataLoader::new(
            DiscountByMovieLoader::new(source),
            tokio::spawn,
        ))
        .enable_federation()
        .finish()
}
