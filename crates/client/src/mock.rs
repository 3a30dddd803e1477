//! Deterministic demo data.
//!
//! Placeholder for a real prediction/data pipeline: the weekly forecast is a
//! pure sine-seeded function, so repeated calls over the same start date
//! produce identical records. Tests rely on that determinism; keep the
//! arithmetic as written instead of swapping in a real random source.

use crate::config::ClientConfig;
use aeris_core::{AlertSeverity, PollutionAlert, PollutionData};
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use rand::Rng;
use std::sync::Mutex;
use std::time::Instant;

/// Synthetic forecast for the seven days following `start`.
///
/// Weekdays carry a higher base AQI than weekends (85 vs 65); a sinusoidal
/// weather factor and a sine-derived noise term perturb it, floored at 30.
/// Per-pollutant values are fixed fractions of the unrounded AQI.
pub fn weekly_forecast(start: DateTime<Utc>) -> Vec<PollutionData> {
    (1i64..=7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            let base_aqi = if weekend { 65.0 } else { 85.0 };

            let day = offset as f64;
            let weather_factor = 1.0 + (day * 0.5).sin() * 0.3;
            let pseudo_random = ((day * 123.0).sin() + 1.0) / 2.0;
            let aqi = (base_aqi * weather_factor + (pseudo_random - 0.5) * 20.0).max(30.0);

            PollutionData {
                id: format!("week_{offset}"),
                date,
                pm25: (aqi * 0.5).round(),
                pm10: (aqi * 0.7).round(),
                no2: (aqi * 0.8).round(),
                o3: (aqi * 0.9).round(),
                aqi: aqi.round(),
                location: ClientConfig::DEMO_LOCATION.to_string(),
                prediction: true,
            }
        })
        .collect()
}

/// Synthetic "right now" reading.
pub fn current_reading(now: DateTime<Utc>) -> PollutionData {
    PollutionData {
        id: "current".to_string(),
        date: now,
        pm25: 42.0,
        pm10: 58.0,
        no2: 67.0,
        o3: 89.0,
        aqi: 84.0,
        location: ClientConfig::DEMO_LOCATION.to_string(),
        prediction: false,
    }
}

/// Synthetic alert feed: one warning, one info, one critical.
pub fn sample_alerts(now: DateTime<Utc>) -> Vec<PollutionAlert> {
    vec![
        PollutionAlert {
            id: "1".to_string(),
            severity: AlertSeverity::Warning,
            pollutant: "PM2.5".to_string(),
            value: 52.0,
            threshold: 50.0,
            location: "Lyon city centre".to_string(),
            timestamp: now - Duration::hours(2),
            message: "PM2.5 threshold exceeded".to_string(),
        },
        PollutionAlert {
            id: "2".to_string(),
            severity: AlertSeverity::Info,
            pollutant: "O3".to_string(),
            value: 95.0,
            threshold: 100.0,
            location: "Part-Dieu".to_string(),
            timestamp: now - Duration::hours(4),
            message: "O3 level approaching the alert threshold".to_string(),
        },
        PollutionAlert {
            id: "3".to_string(),
            severity: AlertSeverity::Critical,
            pollutant: "NO2".to_string(),
            value: 125.0,
            threshold: 100.0,
            location: "Eastern ring road".to_string(),
            timestamp: now - Duration::hours(6),
            message: "Critical NO2 alert, avoid outdoor activity".to_string(),
        },
    ]
}

struct CacheEntry {
    generated_at: Instant,
    forecast: Vec<PollutionData>,
}

/// Time-window cache over [`weekly_forecast`].
///
/// Entries stay fresh for the configured TTL (wall clock); a miss
/// regenerates the forecast and pays a simulated network delay, a hit
/// returns immediately.
pub struct ForecastCache {
    entry: Mutex<Option<CacheEntry>>,
    ttl: std::time::Duration,
    simulate_delay: bool,
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::with_ttl(ClientConfig::FORECAST_CACHE_TTL)
    }

    pub fn with_ttl(ttl: std::time::Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
            simulate_delay: true,
        }
    }

    /// Disable the simulated network delay. Intended for tests.
    pub fn without_delay(mut self) -> Self {
        self.simulate_delay = false;
        self
    }

    /// Drop any cached forecast.
    pub fn invalidate(&self) {
        let mut entry = self.entry.lock().expect("forecast cache lock poisoned");
        *entry = None;
    }

    /// Cached forecast if fresh, otherwise a newly generated one.
    pub async fn get(&self) -> Vec<PollutionData> {
        {
            let entry = self.entry.lock().expect("forecast cache lock poisoned");
            if let Some(entry) = entry.as_ref() {
                if entry.generated_at.elapsed() < self.ttl {
                    return entry.forecast.clone();
                }
            }
        }

        let forecast = weekly_forecast(Utc::now());
        {
            let mut entry = self.entry.lock().expect("forecast cache lock poisoned");
            *entry = Some(CacheEntry {
                generated_at: Instant::now(),
                forecast: forecast.clone(),
            });
        }

        if self.simulate_delay {
            let (min, max) = ClientConfig::SIMULATED_DELAY_MS;
            let delay = rand::thread_rng().gen_range(min..=max);
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        forecast
    }
}
