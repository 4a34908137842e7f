use chrono::Utc;

use crate::carrier;
use crate::errors::QuoteError;
use crate::translate;
use shipping_types::domain::package::CartItem;
use shipping_types::domain::rate::RateSet;
use shipping_types::domain::shipping_option::ShippingOption;
use shipping_types::ports::rate_service::RateService;

/// Shipping-option quoting: aggregate the cart into one package, fetch
/// carrier rates for the fixed service set, and translate them into
/// platform options.
pub struct QuoteService<C: RateService> {
    rates: C,
}

impl<C: RateService> QuoteService<C> {
    pub fn new(rates: C) -> Self {
        Self { rates }
    }

    pub async fn quote(
        &self,
        origin: &str,
        destination: &str,
        items: &[CartItem],
    ) -> Result<Vec<ShippingOption>, QuoteError> {
        let package = translate::package_from_items(items);
        let merchant_rates = self
            .rates
            .shipping_rates(origin, destination, &package, &carrier::AVAILABLE_SERVICES)
            .await?;

        // Any per-service rejection rejects the whole request; no partial
        // success response.
        if merchant_rates.has_errors() {
            log_service_errors(&merchant_rates);
            return Err(QuoteError::CarrierService);
        }

        let free_items = items.iter().filter(|i| i.free_shipping).count();
        let free_shipping_cart = free_items == items.len();

        let consumer_rates = if free_items > 0 && !free_shipping_cart {
            self.non_free_rates(origin, destination, items, &merchant_rates)
                .await
        } else {
            merchant_rates.clone()
        };

        let now = Utc::now();
        let options = merchant_rates
            .services
            .iter()
            .zip(consumer_rates.services.iter())
            .map(|(merchant, consumer)| {
                translate::rate_pair_to_option(merchant, consumer, free_shipping_cart, now)
            })
            .collect();
        Ok(options)
    }

    /// Second rate request over the non-free items only, to price the
    /// consumer side of a mixed cart. Any failure here falls back to the
    /// full-cart rates; the fallback is intended behavior, not recovery.
    async fn non_free_rates(
        &self,
        origin: &str,
        destination: &str,
        items: &[CartItem],
        full_cart_rates: &RateSet,
    ) -> RateSet {
        let non_free: Vec<CartItem> = items
            .iter()
            .filter(|i| !i.free_shipping)
            .cloned()
            .collect();
        let package = translate::package_from_items(&non_free);

        match self
            .rates
            .shipping_rates(origin, destination, &package, &carrier::AVAILABLE_SERVICES)
            .await
        {
            Ok(rates) if !rates.has_errors() => rates,
            Ok(rates) => {
                log_service_errors(&rates);
                full_cart_rates.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "consumer-price rate request failed, using full-cart rates");
                full_cart_rates.clone()
            }
        }
    }
}

fn log_service_errors(rates: &RateSet) {
    for service in rates.errors() {
        tracing::warn!(
            service = %service.service,
            error_code = ?service.error_code,
            error_message = ?service.error_message,
            "carrier returned an error for service"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shipping_types::domain::package::{BoxPackage, Dimensions};
    use shipping_types::domain::rate::RateQuote;
    use shipping_types::ports::rate_service::RateError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a canned response per call, in order; records call count.
    struct ScriptedRates {
        responses: Vec<Result<RateSet, RateError>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedRates {
        fn new(responses: Vec<Result<RateSet, RateError>>) -> Self {
            Self {
                responses,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl RateService for ScriptedRates {
        async fn shipping_rates(
            &self,
            _origin: &str,
            _destination: &str,
            _package: &BoxPackage,
            _services: &[&str],
        ) -> Result<RateSet, RateError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(n) {
                Some(Ok(set)) => Ok(set.clone()),
                Some(Err(e)) => Err(RateError::Transport(e.to_string())),
                None => panic!("unexpected rate request #{}", n + 1),
            }
        }
    }

    fn item(grams: u32, free_shipping: bool) -> CartItem {
        CartItem {
            dimensions: Dimensions {
                height: 10.0,
                width: 10.0,
                depth: 10.0,
            },
            quantity: 1,
            grams,
            free_shipping,
        }
    }

    fn both_services(pac_price: f64, sedex_price: f64) -> RateSet {
        RateSet::new(vec![
            RateQuote::quoted("04510", pac_price, 6),
            RateQuote::quoted("04014", sedex_price, 2),
        ])
    }

    #[tokio::test]
    async fn paid_cart_quotes_both_services_with_one_request() {
        let rates = ScriptedRates::new(vec![Ok(both_services(21.5, 35.9))]);
        let calls = rates.calls.clone();
        let svc = QuoteService::new(rates);

        let options = svc
            .quote("01310-100", "89010-000", &[item(500, false)])
            .await
            .unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].code, "pac");
        assert!((options[0].price - 21.5).abs() < 1e-9);
        assert_eq!(options[1].code, "sedex");
        assert!((options[1].price_merchant - 35.9).abs() < 1e-9);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_free_cart_zeroes_consumer_prices_without_second_request() {
        let rates = ScriptedRates::new(vec![Ok(both_services(21.5, 35.9))]);
        let calls = rates.calls.clone();
        let svc = QuoteService::new(rates);

        let options = svc
            .quote("01310-100", "89010-000", &[item(500, true), item(200, true)])
            .await
            .unwrap();

        assert!(options.iter().all(|o| o.price == 0.0));
        assert!((options[0].price_merchant - 21.5).abs() < 1e-9);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mixed_cart_prices_consumer_side_from_second_request() {
        let rates = ScriptedRates::new(vec![
            Ok(both_services(30.0, 45.0)),
            Ok(both_services(12.5, 20.0)),
        ]);
        let calls = rates.calls.clone();
        let svc = QuoteService::new(rates);

        let options = svc
            .quote(
                "01310-100",
                "89010-000",
                &[item(500, true), item(200, false)],
            )
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!((options[0].price - 12.5).abs() < 1e-9);
        assert!((options[0].price_merchant - 30.0).abs() < 1e-9);
        assert!((options[1].price - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mixed_cart_falls_back_to_full_rates_when_second_request_fails() {
        let rates = ScriptedRates::new(vec![
            Ok(both_services(30.0, 45.0)),
            Err(RateError::Transport("connection reset".into())),
        ]);
        let svc = QuoteService::new(rates);

        let options = svc
            .quote(
                "01310-100",
                "89010-000",
                &[item(500, true), item(200, false)],
            )
            .await
            .unwrap();

        assert!((options[0].price - 30.0).abs() < 1e-9);
        assert!((options[1].price - 45.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mixed_cart_falls_back_when_second_request_has_service_errors() {
        let second = RateSet::new(vec![
            RateQuote::quoted("04510", 12.5, 6),
            RateQuote::errored("04014", "-3", "fora da area"),
        ]);
        let rates = ScriptedRates::new(vec![Ok(both_services(30.0, 45.0)), Ok(second)]);
        let svc = QuoteService::new(rates);

        let options = svc
            .quote(
                "01310-100",
                "89010-000",
                &[item(500, true), item(200, false)],
            )
            .await
            .unwrap();

        assert!((options[0].price - 30.0).abs() < 1e-9);
        assert!((options[1].price - 45.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn per_service_error_rejects_whole_request() {
        let errored = RateSet::new(vec![
            RateQuote::quoted("04510", 21.5, 6),
            RateQuote::errored("04014", "-3", "CEP invalido"),
        ]);
        let rates = ScriptedRates::new(vec![Ok(errored)]);
        let svc = QuoteService::new(rates);

        let res = svc
            .quote("01310-100", "00000-000", &[item(500, false)])
            .await;
        assert!(matches!(res, Err(QuoteError::CarrierService)));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let rates = ScriptedRates::new(vec![Err(RateError::Transport("timeout".into()))]);
        let svc = QuoteService::new(rates);

        let res = svc
            .quote("01310-100", "89010-000", &[item(500, false)])
            .await;
        assert!(matches!(res, Err(QuoteError::Rate(_))));
    }
}
