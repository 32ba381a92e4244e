//! Record types matching the JSON shapes served by the REST catalog.
//!
//! Every entity is a read-only view: nothing in this layer creates, mutates
//! or deletes upstream records. `Price` and `Discount` records point back at
//! their movie through `referenceEntityId`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: u64,
    pub name: Option<String>,
    pub duration: Option<i32>,
    pub genre: Option<String>,
    pub views: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub id: u64,
    pub reference_entity_id: Option<u64>,
    pub entity_price: Option<PriceDetailsRecord>,
    pub service_charges: Option<ServiceChargesRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetailsRecord {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChargesRecord {
    pub stream: Option<PriceDetailsRecord>,
    pub support: Option<PriceDetailsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    pub id: u64,
    pub reference_entity_id: Option<u64>,
    pub validity_period: Option<ValidityPeriodRecord>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub discount_type: Option<String>,
}

/// Calendar-month validity window, 1-based (1 = January, 12 = December).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityPeriodRecord {
    pub begin_month: Option<i32>,
    pub end_month: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: u64,
    pub movie_id: Option<i32>,
    pub reviewer: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
}
