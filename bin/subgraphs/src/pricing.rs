//! Discount eligibility and price composition rules for the Movie computed
//! fields. One shared implementation feeds both `discountedAmount` and
//! `finalPrice`.

use chrono::{Datelike, Utc};

use crate::movies::{Discount, Price};

/// Current calendar month, 0-based (0 = January).
pub fn current_month() -> u32 {
    Utc::now().month0()
}

/// Discount amount if `this_month` (0-based) falls inside the stored 1-based
/// validity window, inclusive on both ends, else 0.
///
/// A window whose `beginMonth` is greater than its `endMonth` (e.g. 12..1,
/// wrapping the year boundary) never matches under this comparison. That is
/// the upstream contract and is pinned by tests; callers must not "fix" it
/// here.
pub fn discounted_amount(discount: Option<&Discount>, this_month: u32) -> f64 {
    let Some(discount) = discount else {
        return 0.0;
    };
    let Some(period) = discount.validity_period.as_ref() else {
        return 0.0;
    };
    let (Some(begin), Some(end)) = (period.begin_month, period.end_month) else {
        return 0.0;
    };

    let this_month = this_month as i32;
    if begin - 1 <= this_month && this_month <= end - 1 {
        discount.amount.unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Sum of the entity price and both service charges; missing components
/// contribute 0.
pub fn total_price(price: Option<&Price>) -> f64 {
    let Some(price) = price else {
        return 0.0;
    };
    let entity = price
        .entity_price
        .as_ref()
        .and_then(|details| details.amount)
        .unwrap_or(0.0);
    let stream = price
        .service_charges
        .as_ref()
        .and_then(|charges| charges.stream.as_ref())
        .and_then(|details| details.amount)
        .unwrap_or(0.0);
    let support = price
        .service_charges
        .as_ref()
        .and_then(|charges| charges.support.as_ref())
        .and_then(|details| details.amount)
        .unwrap_or(0.0);
    entity + stream + support
}

/// `totalPrice - discountedAmount`. A discount larger than the total yields a
/// negative result; there is deliberately no floor at zero.
pub fn final_price(price: Option<&Price>, discount: Option<&Discount>, this_month: u32) -> f64 {
    total_price(price) - discounted_amount(discount, this_month)
}

#[cfg(test)]
mod tests {
    use async_graphql::ID;

    use super::*;
    use crate::movies::{PriceDetails, ServiceCharges, ValidityPeriod};

    fn discount(amount: f64, begin_month: i32, end_month: i32) -> Discount {
        Discount {
            id: ID::from("3"),
            amount: Some(amount),
            discount_type: Some("seasonal".to_string()),
            validity_period: Some(ValidityPeriod {
                begin_month: Some(begin_month),
                end_month: Some(end_month),
            }),
        }
    }

    fn price(entity: Option<f64>, stream: Option<f64>, support: Option<f64>) -> Price {
        Price {
            id: ID::from("1"),
            entity_price: entity.map(|amount| PriceDetails {
                amount: Some(amount),
            }),
            service_charges: Some(ServiceCharges {
                stream: stream.map(|amount| PriceDetails {
                    amount: Some(amount),
                }),
                support: support.map(|amount| PriceDetails {
                    amount: Some(amount),
                }),
            }),
        }
    }

    #[test]
    fn eligible_only_inside_window() {
        // beginMonth=1, endMonth=3 covers January..March (months 0..=2).
        let d = discount(10.0, 1, 3);
        for month in 0..12 {
            let expected = if month <= 2 { 10.0 } else { 0.0 };
            assert_eq!(discounted_amount(Some(&d), month), expected, "month {month}");
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let d = discount(25.0, 4, 6);
        assert_eq!(discounted_amount(Some(&d), 3), 25.0); // April
        assert_eq!(discounted_amount(Some(&d), 5), 25.0); // June
        assert_eq!(discounted_amount(Some(&d), 2), 0.0); // March
        assert_eq!(discounted_amount(Some(&d), 6), 0.0); // July
    }

    #[test]
    fn absent_discount_or_window_is_zero() {
        assert_eq!(discounted_amount(None, 5), 0.0);

        let no_window = Discount {
            id: ID::from("3"),
            amount: Some(10.0),
            discount_type: None,
            validity_period: None,
        };
        assert_eq!(discounted_amount(Some(&no_window), 5), 0.0);
    }

    #[test]
    fn partial_window_is_zero() {
        let mut d = discount(10.0, 1, 12);
        d.validity_period = Some(ValidityPeriod {
            begin_month: Some(1),
            end_month: None,
        });
        assert_eq!(discounted_amount(Some(&d), 5), 0.0);
    }

    #[test]
    fn year_wrapping_window_never_matches() {
        // Known-odd upstream behavior: begin=12, end=1 is empty, not Dec..Jan.
        let d = discount(10.0, 12, 1);
        for month in 0..12 {
            assert_eq!(discounted_amount(Some(&d), month), 0.0, "month {month}");
        }
    }

    #[test]
    fn eligible_amount_defaults_to_zero_when_missing() {
        let mut d = discount(10.0, 1, 12);
        d.amount = None;
        assert_eq!(discounted_amount(Some(&d), 5), 0.0);
    }

    #[test]
    fn total_price_sums_present_components() {
        assert_eq!(total_price(Some(&price(Some(100.0), Some(20.0), Some(5.0)))), 125.0);
        assert_eq!(total_price(Some(&price(Some(100.0), None, Some(5.0)))), 105.0);
        assert_eq!(total_price(Some(&price(None, None, None))), 0.0);
        assert_eq!(total_price(None), 0.0);
    }

    #[test]
    fn final_price_subtracts_eligible_discount() {
        let p = price(Some(100.0), Some(20.0), Some(5.0));
        let d = discount(10.0, 1, 12);
        assert_eq!(final_price(Some(&p), Some(&d), 5), 115.0);
    }

    #[test]
    fn final_price_ignores_out_of_window_discount() {
        let p = price(Some(100.0), Some(20.0), Some(5.0));
        let d = discount(10.0, 12, 1);
        assert_eq!(final_price(Some(&p), Some(&d), 5), 125.0);
    }

    #[test]
    fn final_price_may_go_negative() {
        let p = price(Some(5.0), None, None);
        let d = discount(10.0, 1, 12);
        assert_eq!(final_price(Some(&p), Some(&d), 5), -5.0);
    }
}
