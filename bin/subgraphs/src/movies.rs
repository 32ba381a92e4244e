//! Movies subgraph (port 4001).
//!
//! Owns the `Movie` entity. `discountDetails` and `priceDetails` are owned by
//! the discounts and prices subgraphs; they only exist here so the computed
//! `discountedAmount` and `finalPrice` fields can `@requires` them. When the
//! gateway resolves a Movie reference it sends those nested values in the
//! representation, and the entity resolver overlays them on the record
//! fetched from the REST source.

use async_graphql::{
    ComplexObject, Context, EmptyMutation, EmptySubscription, Error, InputObject, Object, Result,
    Schema, SimpleObject, ID,
};
use moviegraph_source::records::MovieRecord;
use moviegraph_source::RestSource;

use crate::pricing;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Movie {
    pub id: ID,
    pub name: Option<String>,
    pub duration: Option<i32>,
    pub genre: Option<String>,
    pub views: Option<i32>,
    #[graphql(external)]
    pub discount_details: Option<Discount>,
    #[graphql(external)]
    pub price_details: Option<Price>,
}

#[ComplexObject]
impl Movie {
    /// The discount amount if the current calendar month falls inside the
    /// discount's validity window, otherwise 0.
    #[graphql(
        requires = "discountDetails { id amount type validityPeriod { beginMonth endMonth } }"
    )]
    async fn discounted_amount(&self) -> f64 {
        pricing::discounted_amount(self.discount_details.as_ref(), pricing::current_month())
    }

    /// Sum of the price components minus `discountedAmount`. Not floored at
    /// zero.
    #[graphql(
        requires = "priceDetails { id entityPrice { amount } serviceCharges { stream { amount } support { amount } } } discountDetails { id amount validityPeriod { beginMonth endMonth } }"
    )]
    async fn final_price(&self) -> f64 {
        pricing::final_price(
            self.price_details.as_ref(),
            self.discount_details.as_ref(),
            pricing::current_month(),
        )
    }
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Self {
            id: ID::from(record.id.to_string()),
            name: record.name,
            duration: record.duration,
            genre: record.genre,
            views: record.views,
            discount_details: None,
            price_details: None,
        }
    }
}

// Shadow declarations of the discount and price shapes owned by the other
// subgraphs, limited to the fields the computed fields consume.

#[derive(SimpleObject, Clone)]
#[graphql(extends)]
pub struct Discount {
    #[graphql(external)]
    pub id: ID,
    #[graphql(external)]
    pub amount: Option<f64>,
    #[graphql(name = "type", external)]
    pub discount_type: Option<String>,
    #[graphql(external)]
    pub validity_period: Option<ValidityPeriod>,
}

#[derive(SimpleObject, Clone)]
#[graphql(extends)]
pub struct ValidityPeriod {
    #[graphql(external)]
    pub begin_month: Option<i32>,
    #[graphql(external)]
    pub end_month: Option<i32>,
}

#[derive(SimpleObject, Clone)]
#[graphql(extends)]
pub struct Price {
    #[graphql(external)]
    pub id: ID,
    #[graphql(external)]
    pub entity_price: Option<PriceDetails>,
    #[graphql(external)]
    pub service_charges: Option<ServiceCharges>,
}

#[derive(SimpleObject, Clone)]
#[graphql(extends)]
pub struct PriceDetails {
    #[graphql(external)]
    pub amount: Option<f64>,
}

#[derive(SimpleObject, Clone)]
#[graphql(extends)]
pub struct ServiceCharges {
    #[graphql(external)]
    pub stream: Option<PriceDetails>,
    #[graphql(external)]
    pub support: Option<PriceDetails>,
}

// Representation inputs. The gateway sends the `@requires` selections as part
// of the Movie representation; these mirror the shadow types field for field.

#[derive(InputObject, Clone)]
pub struct DiscountInput {
    pub id: Option<ID>,
    pub amount: Option<f64>,
    #[graphql(name = "type")]
    pub discount_type: Option<String>,
    pub validity_period: Option<ValidityPeriodInput>,
}

#[derive(InputObject, Clone)]
pub struct ValidityPeriodInput {
    pub begin_month: Option<i32>,
    pub end_month: Option<i32>,
}

#[derive(InputObject, Clone)]
pub struct PriceInput {
    pub id: Option<ID>,
    pub entity_price: Option<PriceDetailsInput>,
    pub service_charges: Option<ServiceChargesInput>,
}

#[derive(InputObject, Clone)]
pub struct PriceDetailsInput {
    pub amount: Option<f64>,
}

#[derive(InputObject, Clone)]
pub struct ServiceChargesInput {
    pub stream: Option<PriceDetailsInput>,
    pub support: Option<PriceDetailsInput>,
}

impl From<DiscountInput> for Discount {
    fn from(input: DiscountInput) -> Self {
        Self {
            id: input.id.unwrap_or_default(),
            amount: input.amount,
            discount_type: input.discount_type,
            validity_period: input.validity_period.map(|period| ValidityPeriod {
                begin_month: period.begin_month,
                end_month: period.end_month,
            }),
        }
    }
}

impl From<PriceInput> for Price {
    fn from(input: PriceInput) -> Self {
        Self {
            id: input.id.unwrap_or_default(),
            entity_price: input.entity_price.map(|details| PriceDetails {
                amount: details.amount,
            }),
            service_charges: input.service_charges.map(|charges| ServiceCharges {
                stream: charges.stream.map(|details| PriceDetails {
                    amount: details.amount,
                }),
                support: charges.support.map(|details| PriceDetails {
                    amount: details.amount,
                }),
            }),
        }
    }
}

pub struct Query;

#[Object(extends = true)]
impl Query {
    async fn movie(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Movie>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source.movie(id.as_str()).await?.map(Movie::from))
    }

    async fn movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let source = ctx.data_unchecked::<RestSource>();
        Ok(source.movies().await?.into_iter().map(Movie::from).collect())
    }

    #[graphql(entity)]
    async fn find_movie_by_id(
        &self,
        ctx: &Context<'_>,
        #[graphql(key)] id: ID,
        discount_details: Option<DiscountInput>,
        price_details: Option<PriceInput>,
    ) -> Result<Movie> {
        let source = ctx.data_unchecked::<RestSource>();
        let record = source
            .movie(id.as_str())
            .await?
            .ok_or_else(|| Error::new(format!("movie '{}' not found", id.as_str())))?;

        // Overlay only what the gateway supplied; an absent representation
        // field must stay absent rather than clobber the base record.
        let mut movie = Movie::from(record);
        if let Some(discount) = discount_details {
            movie.discount_details = Some(discount.into());
        }
        if let Some(price) = price_details {
            movie.price_details = Some(price.into());
        }
        Ok(movie)
    }

    // Key declarations for the externally-owned entities referenced above.
    // Nothing is resolved here beyond echoing the key back.

    #[graphql(entity)]
    async fn find_discount_by_id(&self, id: ID) -> Discount {
        Discount {
            id,
            amount: None,
            discount_type: None,
            validity_period: None,
        }
    }

    #[graphql(entity)]
    async fn find_price_by_id(&self, id: ID) -> Price {
        Price {
            id,
            entity_price: None,
            service_charges: None,
        }
    }
}

pub type MoviesSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema(source: RestSource) -> MoviesSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(source)
        .enable_federation()
        .finish()
}
