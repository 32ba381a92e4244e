//! Reviews subgraph (shares the prices listener, mounted at `/reviews`).
//!
//! Standalone: `Review` has no cross-subgraph relationships.

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Error, Object, Result, Schema, SimpleObject, ID,
};
use moviegraph_source::records::ReviewRecord;
use moviegraph_source::RestSource;

#[derive(SimpleObject, Clone)]
pub struct Review {
    pub id: ID,
    pub movie_id: Option<i32>,
    pub reviewer: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Self {
            id: ID::from(record.id.to_string()),
            movie_id: record.movie_id,
            reviewer: record.reviewer,
            comment: record.comment,
            rating: record.rating,
        }
    }
}

pub struct Query;

#[Object(extends = true)]
impl Query {
    async fn review(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Review>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source.review(id.as_str()).await?.map(Review::from))
    }

    async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<Review>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source
            .reviews()
            .await?
            .into_iter()
            .map(Review::from)
            .collect())
    }

    #[graphql(entity)]
    async fn find_review_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Review> {
        let source = ctx.data_unchecked::<RestSource>();
        source
            .review(id.as_str())
            .await?
            .map(Review::from)
            .ok_or_else(|| Error::new(format!("review '{}' not found", id.as_str())))
    }
}

pub type ReviewsSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema(source: RestSource) -> ReviewsSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(source)
        .enable_federation()
        .finish()
}
