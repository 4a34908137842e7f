//! Pure mapping between carrier rate quotes and platform shipping options.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use shipping_types::domain::package::{BoxPackage, CartItem};
use shipping_types::domain::rate::RateQuote;
use shipping_types::domain::shipping_option::ShippingOption;

use crate::carrier;

const UNKNOWN_LABEL: &str = "Unknown Option";
const UNKNOWN_CODE: &str = "unknown";

/// Correios quotes deadlines in the carrier's home timezone (UTC-3, no DST).
fn carrier_offset() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).expect("UTC-3 is a valid offset")
}

/// Fold cart items into the aggregate package quoted against, preserving the
/// item order given.
pub fn package_from_items(items: &[CartItem]) -> BoxPackage {
    BoxPackage::from_items(items)
}

/// Map one merchant/consumer quote pair to a platform shipping option.
///
/// The merchant price is always the full-cart quote; the consumer price is
/// the consumer-side quote, forced to 0 when the whole cart ships free.
/// Unrecognized service codes map to an "Unknown Option" entry, never an
/// error. The delivery window is now + the merchant quote's transit days,
/// at second precision in the carrier timezone.
pub fn rate_pair_to_option(
    merchant: &RateQuote,
    consumer: &RateQuote,
    free_shipping_cart: bool,
    now: DateTime<Utc>,
) -> ShippingOption {
    let label = carrier::service_label(&merchant.service).unwrap_or(UNKNOWN_LABEL);
    let code = carrier::option_code(&merchant.service).unwrap_or(UNKNOWN_CODE);

    let eta = now.with_timezone(&carrier_offset()) + Duration::days(merchant.days);
    let eta = eta.format("%Y-%m-%dT%H:%M:%S%:z").to_string();

    let price = if free_shipping_cart { 0.0 } else { consumer.price };

    ShippingOption {
        name: format!("CorreiosApp - {label}"),
        code: code.to_string(),
        price,
        price_merchant: merchant.price,
        kind: carrier::OPTION_TYPE.to_string(),
        currency: carrier::OPTION_CURRENCY.to_string(),
        min_delivery_date: eta.clone(),
        max_delivery_date: eta,
    }
}

/// Single-quote variant: merchant and consumer prices come from the same
/// rate request.
pub fn rate_to_option(
    rate: &RateQuote,
    free_shipping_cart: bool,
    now: DateTime<Utc>,
) -> ShippingOption {
    rate_pair_to_option(rate, rate, free_shipping_cart, now)
}
