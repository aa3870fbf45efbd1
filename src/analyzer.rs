//! Route analysis
//!
//! Resolves both endpoints, samples the path between them, fetches weather
//! at every sample and classifies it, then aggregates a [`RouteReport`].
//! Provider failures degrade as locally as possible:
//!
//! - a geocoding miss or fault aborts only this route with a resolution error
//! - a weather miss or fault turns that single point Unknown
//! - anything else unexpected (a panicking provider) becomes an analysis error

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::config::SkyRouteConfig;
use crate::geo::{self, DEFAULT_SAMPLE_POINTS};
use crate::models::{Coordinate, PathPoint, PlaceLocation, RouteReport, WeatherObservation};
use crate::providers::{self, GeoResolver, OpenWeatherGeocoder, OpenWeatherProvider, WeatherProvider};
use crate::suitability::{FlightStatus, SuitabilityVerdict};
use crate::{Result, SkyRouteError};

pub const UNRESOLVED_ENDPOINTS: &str = "Could not find coordinates for one or both cities";

/// Orchestrates geocoding, sampling, weather lookups and classification
pub struct RouteAnalyzer {
    geocoder: Arc<dyn GeoResolver>,
    weather: Arc<dyn WeatherProvider>,
    sample_points: usize,
}

impl RouteAnalyzer {
    pub fn new(geocoder: Arc<dyn GeoResolver>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            geocoder,
            weather,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }

    /// Number of intermediate points between the endpoints
    #[must_use]
    pub fn with_sample_points(mut self, sample_points: usize) -> Self {
        self.sample_points = sample_points;
        self
    }

    /// Wire the OpenWeather adapters from configuration
    pub fn from_config(config: &SkyRouteConfig) -> Result<Self> {
        let client = providers::http_client(&config.providers)?;
        let geocoder = OpenWeatherGeocoder::new(client.clone(), &config.providers);
        let weather = OpenWeatherProvider::new(client, &config.providers);

        Ok(Self::new(Arc::new(geocoder), Arc::new(weather))
            .with_sample_points(config.analysis.sample_points))
    }

    /// Analyze weather along the path between two named places
    #[instrument(skip(self))]
    pub async fn analyze_route(&self, departure: &str, arrival: &str) -> Result<RouteReport> {
        AssertUnwindSafe(self.build_report(departure, arrival))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected fault".to_string());
                warn!("Route analysis aborted: {}", message);
                Err(SkyRouteError::analysis(message))
            })
    }

    /// Weather and verdict for a single coordinate
    pub async fn weather_at(
        &self,
        coordinate: &Coordinate,
    ) -> (Option<WeatherObservation>, SuitabilityVerdict) {
        let weather = self.observe(coordinate).await;
        let verdict = SuitabilityVerdict::classify(weather.as_ref());
        (weather, verdict)
    }

    async fn build_report(&self, departure: &str, arrival: &str) -> Result<RouteReport> {
        let (departure, arrival) = futures::join!(self.resolve(departure), self.resolve(arrival));
        let (Some(departure), Some(arrival)) = (departure, arrival) else {
            return Err(SkyRouteError::resolution(UNRESOLVED_ENDPOINTS));
        };

        let samples = geo::sample_path(&departure.coordinate, &arrival.coordinate, self.sample_points);
        debug!("Sampling {} points from {} to {}", samples.len(), departure.name, arrival.name);

        // join_all yields in input order, so indices follow the route
        let observations = join_all(samples.iter().map(|c| self.observe(c))).await;

        let mut points = Vec::with_capacity(samples.len());
        let mut warnings = Vec::new();
        for (i, (coordinate, weather)) in samples.into_iter().zip(observations).enumerate() {
            let index = i + 1;
            let verdict = SuitabilityVerdict::classify(weather.as_ref());
            if verdict.status() == FlightStatus::NotSuitable {
                warnings.push(format!("Point {index}: {}", verdict.details()));
            }
            points.push(PathPoint {
                index,
                coordinate,
                weather,
                verdict,
            });
        }

        let distance_km = geo::distance_km(&departure.coordinate, &arrival.coordinate);

        // Marginal and Unknown points do not downgrade the route
        let overall_status = if warnings.is_empty() {
            FlightStatus::Suitable
        } else {
            FlightStatus::NotSuitable
        };

        info!(
            "Route {} -> {}: {:.1} km, {}, {} warning(s)",
            departure.name,
            arrival.name,
            distance_km,
            overall_status,
            warnings.len()
        );

        Ok(RouteReport {
            departure,
            arrival,
            distance_km,
            overall_status,
            warnings,
            points,
            analyzed_at: Utc::now(),
        })
    }

    async fn resolve(&self, name: &str) -> Option<PlaceLocation> {
        match self.geocoder.resolve(name).await {
            Ok(place) => place,
            Err(e) => {
                warn!("Geocoding '{}' failed: {}", name, e);
                None
            }
        }
    }

    async fn observe(&self, coordinate: &Coordinate) -> Option<WeatherObservation> {
        match self.weather.fetch_current(coordinate).await {
            Ok(weather) => weather,
            Err(e) => {
                warn!("Weather lookup at {} failed: {}", coordinate.format_coordinates(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeGeocoder {
        places: HashMap<&'static str, PlaceLocation>,
        fail: bool,
    }

    impl FakeGeocoder {
        /// "South" sits at (0, 0) and "North" at (60, 30)
        fn new() -> Self {
            let place = |lat, lon, name: &str| {
                PlaceLocation::new(
                    Coordinate {
                        latitude: lat,
                        longitude: lon,
                    },
                    name.to_string(),
                    "XX".to_string(),
                )
            };
            let places = HashMap::from([
                ("South", place(0.0, 0.0, "South")),
                ("North", place(60.0, 30.0, "North")),
            ]);
            Self {
                places,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl GeoResolver for FakeGeocoder {
        async fn resolve(&self, name: &str) -> Result<Option<PlaceLocation>> {
            if self.fail {
                return Err(SkyRouteError::provider("fake", "connection refused"));
            }
            Ok(self.places.get(name).cloned())
        }
    }

    #[derive(Clone, Copy)]
    enum Reply {
        Weather(f64),
        Missing,
        Fault,
        Panic,
    }

    /// Replies keyed by sample index, recovered from latitude (10° per step
    /// on the South -> North route with five intermediate points)
    struct FakeWeather {
        replies: Vec<Reply>,
        calls: AtomicUsize,
    }

    impl FakeWeather {
        fn calm() -> Self {
            Self::with(vec![Reply::Weather(5.0); 7])
        }

        fn with(replies: Vec<Reply>) -> Self {
            Self {
                replies,
                calls: AtomicUsize::new(0),
            }
        }
    }

    fn observation(wind_speed: f64) -> WeatherObservation {
        WeatherObservation {
            temperature: 20.0,
            humidity: 40,
            pressure: 1015.0,
            wind_speed,
            wind_direction: 90,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            visibility: 10_000,
            cloud_cover: 10,
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeWeather {
        async fn fetch_current(
            &self,
            coordinate: &Coordinate,
        ) -> Result<Option<WeatherObservation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index = (coordinate.latitude / 10.0).round() as usize;
            match self.replies[index] {
                Reply::Weather(wind) => Ok(Some(observation(wind))),
                Reply::Missing => Ok(None),
                Reply::Fault => Err(SkyRouteError::provider("fake", "timed out")),
                Reply::Panic => panic!("provider exploded"),
            }
        }
    }

    fn analyzer(geocoder: FakeGeocoder, weather: Arc<FakeWeather>) -> RouteAnalyzer {
        RouteAnalyzer::new(Arc::new(geocoder), weather)
    }

    #[tokio::test]
    async fn test_calm_route_is_suitable() {
        let weather = Arc::new(FakeWeather::calm());
        let report = analyzer(FakeGeocoder::new(), weather.clone())
            .analyze_route("South", "North")
            .await
            .unwrap();

        assert_eq!(report.overall_status, FlightStatus::Suitable);
        assert!(report.warnings.is_empty());
        assert_eq!(report.points.len(), 7);
        assert_eq!(weather.calls.load(Ordering::SeqCst), 7);
        assert_eq!(report.departure.name, "South");
        assert_eq!(report.arrival.name, "North");
        assert!(report.distance_km > 0.0);
    }

    #[tokio::test]
    async fn test_points_ordered_from_departure_to_arrival() {
        let report = analyzer(FakeGeocoder::new(), Arc::new(FakeWeather::calm()))
            .analyze_route("South", "North")
            .await
            .unwrap();

        let indices: Vec<usize> = report.points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(report.points[0].coordinate, report.departure.coordinate);
        assert_eq!(report.points[6].coordinate, report.arrival.coordinate);
        assert!((report.points[3].coordinate.latitude - 30.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_single_unsafe_point_fails_route() {
        let mut replies = vec![Reply::Weather(5.0); 7];
        replies[3] = Reply::Weather(60.0);
        let report = analyzer(FakeGeocoder::new(), Arc::new(FakeWeather::with(replies)))
            .analyze_route("South", "North")
            .await
            .unwrap();

        assert_eq!(report.overall_status, FlightStatus::NotSuitable);
        assert_eq!(report.warnings, vec!["Point 4: High wind speed: 60 m/s".to_string()]);
        assert_eq!(report.points_with_status(FlightStatus::NotSuitable).count(), 1);
    }

    #[tokio::test]
    async fn test_marginal_points_do_not_downgrade_route() {
        let replies = vec![Reply::Weather(30.0); 7];
        let report = analyzer(FakeGeocoder::new(), Arc::new(FakeWeather::with(replies)))
            .analyze_route("South", "North")
            .await
            .unwrap();

        assert_eq!(report.points_with_status(FlightStatus::Marginal).count(), 7);
        assert_eq!(report.overall_status, FlightStatus::Suitable);
        assert!(report.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_weather_failures_degrade_to_unknown() {
        let mut replies = vec![Reply::Weather(5.0); 7];
        replies[1] = Reply::Missing;
        replies[5] = Reply::Fault;
        let report = analyzer(FakeGeocoder::new(), Arc::new(FakeWeather::with(replies)))
            .analyze_route("South", "North")
            .await
            .unwrap();

        let unknown: Vec<usize> = report
            .points_with_status(FlightStatus::Unknown)
            .map(|p| p.index)
            .collect();
        assert_eq!(unknown, vec![2, 6]);
        assert!(report.points[1].weather.is_none());
        assert_eq!(report.points[5].verdict.details(), "No weather data available");
        assert_eq!(report.overall_status, FlightStatus::Suitable);
    }

    #[tokio::test]
    async fn test_unresolved_city_skips_weather_calls() {
        let weather = Arc::new(FakeWeather::calm());
        let err = analyzer(FakeGeocoder::new(), weather.clone())
            .analyze_route("Atlantis", "North")
            .await
            .unwrap_err();

        assert!(matches!(err, SkyRouteError::Resolution { .. }));
        assert_eq!(err.to_string(), UNRESOLVED_ENDPOINTS);
        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_geocoder_fault_is_resolution_error() {
        let mut geocoder = FakeGeocoder::new();
        geocoder.fail = true;
        let weather = Arc::new(FakeWeather::calm());
        let err = analyzer(geocoder, weather.clone())
            .analyze_route("South", "North")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), UNRESOLVED_ENDPOINTS);
        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_panic_becomes_analysis_error() {
        let mut replies = vec![Reply::Weather(5.0); 7];
        replies[2] = Reply::Panic;
        let err = analyzer(FakeGeocoder::new(), Arc::new(FakeWeather::with(replies)))
            .analyze_route("South", "North")
            .await
            .unwrap_err();

        assert!(matches!(err, SkyRouteError::Analysis { .. }));
        assert_eq!(err.to_string(), "Analysis failed: provider exploded");
    }

    #[tokio::test]
    async fn test_zero_sample_points_checks_endpoints_only() {
        let weather = Arc::new(FakeWeather::calm());
        let report = analyzer(FakeGeocoder::new(), weather.clone())
            .with_sample_points(0)
            .analyze_route("South", "North")
            .await
            .unwrap();

        assert_eq!(report.points.len(), 2);
        assert_eq!(weather.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_weather_at_single_point() {
        let analyzer = analyzer(FakeGeocoder::new(), Arc::new(FakeWeather::calm()));
        let (weather, verdict) = analyzer
            .weather_at(&Coordinate {
                latitude: 10.0,
                longitude: 5.0,
            })
            .await;

        assert!(weather.is_some());
        assert_eq!(verdict.status(), FlightStatus::Suitable);
    }
}
