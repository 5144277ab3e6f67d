//! Synthetic dataset with the same shape as the real one

use async_trait::async_trait;
use chrono::NaiveDate;
use cv_core::data::{short_name_for, Conflict, Event, MonthlyAggregate};
use cv_core::state::{DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use cv_core::{Dataset, ViolenceType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::DatasetSource;
use crate::DataError;

const CONFLICT_COUNT: usize = 20;
const EVENT_COUNT: usize = 1000;

const CONFLICT_NAMES: [&str; CONFLICT_COUNT] = [
    "Syria: Government - IS",
    "Iraq: Government - IS",
    "Afghanistan: Government - Taliban",
    "Yemen: Government - Houthis",
    "Somalia: Government - Al-Shabaab",
    "Nigeria: Government - Boko Haram",
    "DR Congo: Various conflicts",
    "South Sudan: Government - SPLA-IO",
    "Myanmar: Government - Arakan Army",
    "Ukraine: Government - Separatists",
    "Colombia: Government - FARC",
    "Libya: Government - Haftar forces",
    "Mali: Government - JNIM",
    "Mozambique: Government - ISIS",
    "Cameroon: Government - Ambazonia",
    "Ethiopia: Government - TPLF",
    "Sudan: Government - RSF",
    "India: Government - Naxalites",
    "Philippines: Government - Abu Sayyaf",
    "Rwanda: Genocide",
];

/// Regional centroids events are scattered around (lat, lon, country)
const REGIONS: [(f64, f64, &str); 7] = [
    (33.5, 36.3, "Syria"),
    (33.3, 44.4, "Iraq"),
    (34.5, 69.2, "Afghanistan"),
    (15.5, 48.5, "Yemen"),
    (2.0, 45.3, "Somalia"),
    (9.0, 8.7, "Nigeria"),
    (-4.0, 21.8, "DR Congo"),
];

/// Generates a random dataset when the real files are unavailable
#[derive(Debug, Clone, Default)]
pub struct SyntheticSource {
    seed: Option<u64>,
}

impl SyntheticSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Build the dataset synchronously
    pub fn generate(&self) -> Dataset {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Dataset {
            conflicts: generate_conflicts(&mut rng),
            events: generate_events(&mut rng),
            monthly_deaths: generate_monthly_deaths(&mut rng),
        }
    }
}

#[async_trait]
impl DatasetSource for SyntheticSource {
    async fn load(&self) -> Result<Dataset, DataError> {
        let dataset = self.generate();
        tracing::info!(
            "Generated {} conflicts and {} events (sample)",
            dataset.conflicts.len(),
            dataset.events.len()
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        "synthetic"
    }
}

fn random_type(rng: &mut StdRng) -> ViolenceType {
    ViolenceType::ALL[rng.gen_range(0..ViolenceType::ALL.len())]
}

fn generate_conflicts(rng: &mut StdRng) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = CONFLICT_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let best: u64 = rng.gen_range(5_000..85_000);
            let civilian_ratio = 0.3 + rng.gen::<f64>() * 0.6;
            let civilian_deaths = (best as f64 * civilian_ratio).floor() as u64;
            let start_year = rng.gen_range(2000..2015);
            let end_year = rng.gen_range(2015..2025).max(start_year);

            Conflict {
                id: i as u32 + 1,
                name: name.to_string(),
                short_name: short_name_for(name),
                violence_type: random_type(rng),
                low: (best as f64 * 0.7).floor() as u64,
                best,
                high: (best as f64 * 1.3).floor() as u64,
                civilian_deaths,
                combatant_deaths: best - civilian_deaths,
                civilian_ratio,
                start_year,
                end_year,
                event_count: rng.gen_range(100..5_100),
            }
        })
        .collect();

    conflicts.sort_by(|a, b| b.civilian_deaths.cmp(&a.civilian_deaths));
    conflicts
}

fn generate_events(rng: &mut StdRng) -> Vec<Event> {
    let mut events = Vec::with_capacity(EVENT_COUNT);

    for id in 1..=EVENT_COUNT as u64 {
        let (latitude, longitude, country) = REGIONS[rng.gen_range(0..REGIONS.len())];
        let year = rng.gen_range(DEFAULT_START_YEAR..=DEFAULT_END_YEAR);
        let month = rng.gen_range(1..=12);
        let day = rng.gen_range(1..=28);
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let best = rng.gen_range(5..105);
        let civilian_deaths = rng.gen_range(0..=best);

        events.push(Event {
            id,
            date,
            latitude: latitude + (rng.gen::<f64>() - 0.5) * 2.0,
            longitude: longitude + (rng.gen::<f64>() - 0.5) * 2.0,
            type_of_violence: random_type(rng),
            best,
            civilian_deaths,
            combatant_deaths: best - civilian_deaths,
            conflict_id: rng.gen_range(1..=CONFLICT_COUNT as u32),
            country: country.to_string(),
            region: None,
        });
    }

    events
}

fn generate_monthly_deaths(rng: &mut StdRng) -> Vec<MonthlyAggregate> {
    let mut monthly = Vec::new();

    for year in DEFAULT_START_YEAR..=DEFAULT_END_YEAR {
        for month in 1..=12 {
            for violence_type in ViolenceType::ALL {
                monthly.push(MonthlyAggregate {
                    year,
                    month,
                    violence_type,
                    deaths: rng.gen_range(100..5_100),
                });
            }
        }
    }

    monthly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_shape() {
        let dataset = SyntheticSource::new(Some(42)).generate();

        assert_eq!(dataset.conflicts.len(), 20);
        assert_eq!(dataset.events.len(), 1000);
        assert_eq!(dataset.monthly_deaths.len(), 36 * 12 * 3);

        for pair in dataset.conflicts.windows(2) {
            assert!(pair[0].civilian_deaths >= pair[1].civilian_deaths);
        }
        for conflict in &dataset.conflicts {
            assert!(conflict.low <= conflict.best && conflict.best <= conflict.high);
            assert!(conflict.end_year >= conflict.start_year);
            assert_eq!(conflict.civilian_deaths + conflict.combatant_deaths, conflict.best);
        }
        for event in &dataset.events {
            assert!(dataset.conflict(event.conflict_id).is_some());
            assert!((1989..=2024).contains(&chrono::Datelike::year(&event.date)));
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = SyntheticSource::new(Some(7)).generate();
        let b = SyntheticSource::new(Some(7)).generate();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_load_never_fails() {
        let source = SyntheticSource::default();
        assert!(source.load().await.is_ok());
        assert_eq!(source.source_name(), "synthetic");
    }
}
