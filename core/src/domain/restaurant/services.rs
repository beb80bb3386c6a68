use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    listing::{
        pipeline::{facets, render},
        value_objects::{Facets, FilterSelection, ListedRestaurant},
    },
    restaurant::{
        entities::{DEFAULT_PRICE_TIER, Restaurant},
        ports::{DirectoryService, RestaurantGateway},
    },
    snapshot::entities::{DirectoryView, Snapshot},
};

/// Price range ids in first-seen order, without duplicates.
fn distinct_price_range_ids(restaurants: &[Restaurant]) -> Vec<String> {
    let mut seen = HashSet::new();
    restaurants
        .iter()
        .filter(|restaurant| seen.insert(restaurant.price_range_id.as_str()))
        .map(|restaurant| restaurant.price_range_id.clone())
        .collect()
}

impl<G> Service<G>
where
    G: RestaurantGateway,
{
    async fn aggregate(&self) -> Result<Snapshot, CoreError> {
        let (restaurants, categories) = futures::try_join!(
            self.gateway.fetch_restaurants(),
            self.gateway.fetch_filters()
        )
        .map_err(|e| {
            tracing::error!(
                resource = e.resource(),
                "Failed to fetch directory collection: {}",
                e
            );
            CoreError::from(e)
        })?;

        let gateway = &self.gateway;

        let open_lookups = restaurants.iter().map(|restaurant| async move {
            let is_open = gateway.fetch_open_status(restaurant.id.clone()).await;
            (restaurant.id.clone(), is_open)
        });

        let price_range_ids = distinct_price_range_ids(&restaurants);
        let price_lookups = price_range_ids.into_iter().map(|price_range_id| async move {
            let tier = match gateway.fetch_price_range(price_range_id.clone()).await {
                Some(price_range) => price_range.range,
                None => {
                    tracing::warn!(
                        price_range_id = %price_range_id,
                        "Price range unavailable, using {}",
                        DEFAULT_PRICE_TIER
                    );
                    DEFAULT_PRICE_TIER.to_string()
                }
            };
            (price_range_id, tier)
        });

        let (open_statuses, price_tiers) =
            futures::join!(join_all(open_lookups), join_all(price_lookups));

        let open_by_restaurant_id: HashMap<String, bool> = open_statuses.into_iter().collect();
        let price_tier_by_range_id: HashMap<String, String> = price_tiers.into_iter().collect();

        Ok(Snapshot::new(
            restaurants,
            categories,
            price_tier_by_range_id,
            open_by_restaurant_id,
        ))
    }

    fn current_snapshot(&self) -> Result<Arc<Snapshot>, CoreError> {
        match self.store.view() {
            DirectoryView::Ready(snapshot) => Ok(snapshot),
            DirectoryView::Loading => Err(CoreError::SnapshotLoading),
            DirectoryView::Failed { message } => Err(CoreError::SnapshotUnavailable(message)),
        }
    }
}

impl<G> DirectoryService for Service<G>
where
    G: RestaurantGateway,
{
    #[instrument(skip(self))]
    async fn load_snapshot(&self) -> Result<Arc<Snapshot>, CoreError> {
        let run = self.store.begin_run();

        match self.aggregate().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                if self.store.publish(run, Arc::clone(&snapshot)) {
                    tracing::info!(
                        run = run.value(),
                        restaurants = snapshot.restaurants.len(),
                        categories = snapshot.categories.len(),
                        price_ranges = snapshot.price_tier_by_range_id.len(),
                        "Published directory snapshot"
                    );
                } else {
                    tracing::debug!(run = run.value(), "Snapshot superseded by a newer run");
                }
                Ok(snapshot)
            }
            Err(e) => {
                if !self.store.record_failure(run, e.to_string()) {
                    tracing::debug!(run = run.value(), "Ignoring failure of superseded run");
                }
                Err(e)
            }
        }
    }

    fn view(&self) -> DirectoryView {
        self.store.view()
    }

    fn last_error(&self) -> Option<String> {
        self.store.last_error()
    }

    fn list_restaurants(
        &self,
        selection: &FilterSelection,
    ) -> Result<(Arc<Snapshot>, Vec<ListedRestaurant>), CoreError> {
        let snapshot = self.current_snapshot()?;
        let rows = render(&snapshot, selection, &self.asset_origin);
        Ok((snapshot, rows))
    }

    fn facets(&self) -> Result<Facets, CoreError> {
        let snapshot = self.current_snapshot()?;
        Ok(facets(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use mockall::predicate::eq;

    use super::*;
    use crate::domain::restaurant::{
        entities::{Category, GatewayError, PriceRange},
        ports::MockRestaurantGateway,
    };

    fn restaurant(id: &str, price_range_id: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Restaurant {}", id),
            rating: Some(4.5),
            filter_ids: vec!["1".to_string()],
            image_url: format!("/images/{}.png", id),
            delivery_time_minutes: 20,
            price_range_id: price_range_id.to_string(),
        }
    }

    fn pizza() -> Category {
        Category {
            id: "1".to_string(),
            name: "Pizza".to_string(),
            image_url: "/images/pizza.png".to_string(),
        }
    }

    fn service(gateway: MockRestaurantGateway) -> Service<MockRestaurantGateway> {
        Service::new(gateway, "https://example.test".to_string())
    }

    #[tokio::test]
    async fn test_load_snapshot_merges_sources() {
        let mut gateway = MockRestaurantGateway::new();
        gateway.expect_fetch_restaurants().times(1).returning(|| {
            Box::pin(std::future::ready(Ok(vec![
                restaurant("a", "1"),
                restaurant("b", "2"),
                restaurant("c", "1"),
            ])))
        });
        gateway
            .expect_fetch_filters()
            .times(1)
            .returning(|| Box::pin(std::future::ready(Ok(vec![pizza()]))));
        gateway
            .expect_fetch_open_status()
            .times(3)
            .returning(|id| Box::pin(std::future::ready(id != "b")));
        gateway
            .expect_fetch_price_range()
            .with(eq("1".to_string()))
            .times(1)
            .returning(|id| {
                Box::pin(std::future::ready(Some(PriceRange {
                    id,
                    range: "$".to_string(),
                })))
            });
        gateway
            .expect_fetch_price_range()
            .with(eq("2".to_string()))
            .times(1)
            .returning(|_| Box::pin(std::future::ready(None)));

        let service = service(gateway);
        let snapshot = service.load_snapshot().await.unwrap();

        assert_eq!(snapshot.restaurants.len(), 3);
        assert_eq!(snapshot.categories, vec![pizza()]);
        assert_eq!(snapshot.price_tier_by_range_id.len(), 2);
        assert_eq!(snapshot.price_tier_by_range_id["1"], "$");
        assert_eq!(snapshot.price_tier_by_range_id["2"], DEFAULT_PRICE_TIER);
        assert!(snapshot.open_by_restaurant_id["a"]);
        assert!(!snapshot.open_by_restaurant_id["b"]);
        assert!(snapshot.open_by_restaurant_id["c"]);
        assert_eq!(service.view(), DirectoryView::Ready(snapshot));
    }

    #[tokio::test]
    async fn test_collection_failure_fails_load() {
        let mut gateway = MockRestaurantGateway::new();
        gateway.expect_fetch_restaurants().returning(|| {
            Box::pin(std::future::ready(Err(GatewayError::Status {
                resource: "restaurants".to_string(),
                status: 500,
                body: "boom".to_string(),
            })))
        });
        gateway
            .expect_fetch_filters()
            .returning(|| Box::pin(std::future::ready(Ok(vec![pizza()]))));
        gateway.expect_fetch_open_status().never();
        gateway.expect_fetch_price_range().never();

        let service = service(gateway);
        let result = service.load_snapshot().await;

        assert!(matches!(
            result,
            Err(CoreError::Gateway(GatewayError::Status { status: 500, .. }))
        ));
        assert!(matches!(service.view(), DirectoryView::Failed { .. }));
        assert!(matches!(
            service.list_restaurants(&FilterSelection::new()),
            Err(CoreError::SnapshotUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_filters_failure_fails_load() {
        let mut gateway = MockRestaurantGateway::new();
        gateway.expect_fetch_restaurants().returning(|| {
            Box::pin(std::future::ready(Ok(vec![
                restaurant("a", "1"),
                restaurant("b", "2"),
            ])))
        });
        gateway.expect_fetch_filters().returning(|| {
            Box::pin(std::future::ready(Err(GatewayError::Transport {
                resource: "filter".to_string(),
                message: "connection refused".to_string(),
            })))
        });
        gateway.expect_fetch_open_status().never();
        gateway.expect_fetch_price_range().never();

        let service = service(gateway);
        let result = service.load_snapshot().await;

        assert!(matches!(
            result,
            Err(CoreError::Gateway(GatewayError::Transport { .. }))
        ));
        assert!(service.view().snapshot().is_none());
        assert!(service.last_error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_list_before_load_reports_loading() {
        let service = service(MockRestaurantGateway::new());
        assert!(matches!(
            service.list_restaurants(&FilterSelection::new()),
            Err(CoreError::SnapshotLoading)
        ));
        assert!(matches!(service.facets(), Err(CoreError::SnapshotLoading)));
    }

    #[tokio::test]
    async fn test_list_restaurants_orders_open_first() {
        let mut gateway = MockRestaurantGateway::new();
        gateway.expect_fetch_restaurants().returning(|| {
            Box::pin(std::future::ready(Ok(vec![
                restaurant("a", "1"),
                restaurant("b", "1"),
            ])))
        });
        gateway
            .expect_fetch_filters()
            .returning(|| Box::pin(std::future::ready(Ok(vec![]))));
        gateway
            .expect_fetch_open_status()
            .returning(|id| Box::pin(std::future::ready(id == "b")));
        gateway.expect_fetch_price_range().returning(|id| {
            Box::pin(std::future::ready(Some(PriceRange {
                id,
                range: "$$$".to_string(),
            })))
        });

        let service = service(gateway);
        service.load_snapshot().await.unwrap();

        let (_, rows) = service.list_restaurants(&FilterSelection::new()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(rows[0].price_tier, "$$$");
        assert_eq!(rows[0].image_url, "https://example.test/images/b.png");

        let facets = service.facets().unwrap();
        assert_eq!(facets.price_tiers, vec!["$$$"]);
    }

    #[test]
    fn test_distinct_price_range_ids_keeps_first_seen_order() {
        let restaurants = vec![
            restaurant("a", "2"),
            restaurant("b", "1"),
            restaurant("c", "2"),
            restaurant("d", "3"),
        ];
        assert_eq!(distinct_price_range_ids(&restaurants), vec!["2", "1", "3"]);
    }

    /// Gateway whose restaurant collection answers slower on the first call,
    /// so an older run can finish after a newer one.
    struct SlowFirstGateway {
        calls: AtomicUsize,
        names: Vec<&'static str>,
    }

    impl RestaurantGateway for SlowFirstGateway {
        async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let name = self.names[call];
            if call == 0 {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            Ok(vec![restaurant(name, "1")])
        }

        async fn fetch_filters(&self) -> Result<Vec<Category>, GatewayError> {
            Ok(vec![])
        }

        async fn fetch_price_range(&self, price_range_id: String) -> Option<PriceRange> {
            Some(PriceRange {
                id: price_range_id,
                range: "$".to_string(),
            })
        }

        async fn fetch_open_status(&self, _restaurant_id: String) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_stale_run_does_not_overwrite_newer_snapshot() {
        let service = service_with(SlowFirstGateway {
            calls: AtomicUsize::new(0),
            names: vec!["stale", "fresh"],
        });

        let (stale, fresh) = tokio::join!(service.load_snapshot(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            service.load_snapshot().await
        });

        assert_eq!(stale.unwrap().restaurants[0].id, "stale");
        assert_eq!(fresh.unwrap().restaurants[0].id, "fresh");

        let published = service.view();
        assert_eq!(published.snapshot().unwrap().restaurants[0].id, "fresh");
    }

    fn service_with<G: RestaurantGateway>(gateway: G) -> Service<G> {
        Service::new(gateway, "https://example.test".to_string())
    }

    const ROUND_TRIP: Duration = Duration::from_millis(100);

    /// Gateway where every call takes one round trip and in-flight calls are counted.
    #[derive(Default)]
    struct LatencyGateway {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl LatencyGateway {
        async fn round_trip(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(ROUND_TRIP).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl RestaurantGateway for LatencyGateway {
        async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, GatewayError> {
            self.round_trip().await;
            Ok((0..10)
                .map(|i| restaurant(&format!("r{}", i), &(i % 3).to_string()))
                .collect())
        }

        async fn fetch_filters(&self) -> Result<Vec<Category>, GatewayError> {
            self.round_trip().await;
            Ok(vec![pizza()])
        }

        async fn fetch_price_range(&self, price_range_id: String) -> Option<PriceRange> {
            self.round_trip().await;
            Some(PriceRange {
                id: price_range_id,
                range: "$".to_string(),
            })
        }

        async fn fetch_open_status(&self, _restaurant_id: String) -> bool {
            self.round_trip().await;
            true
        }
    }

    #[tokio::test]
    async fn test_lookups_run_concurrently() {
        let service = service_with(LatencyGateway::default());

        let started = std::time::Instant::now();
        let snapshot = service.load_snapshot().await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(snapshot.open_by_restaurant_id.len(), 10);
        assert_eq!(snapshot.price_tier_by_range_id.len(), 3);

        let gateway = &service.gateway;
        // 2 collections, 10 open statuses, 3 distinct price ranges
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 15);
        assert_eq!(gateway.peak.load(Ordering::SeqCst), 13);
        assert!(elapsed >= ROUND_TRIP * 2);
        assert!(
            elapsed < ROUND_TRIP * 5,
            "load took {:?}, expected about two round trips",
            elapsed
        );
    }
}
