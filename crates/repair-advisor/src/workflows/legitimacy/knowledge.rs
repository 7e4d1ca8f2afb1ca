use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use super::domain::{CostRange, ServiceCategory, ServiceInterval};

/// Read-only table of maintenance facts, built once and shared by reference.
#[derive(Debug)]
pub struct IntervalKnowledgeBase {
    entries: Vec<ServiceInterval>,
}

/// Autocomplete row exposed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub category: ServiceCategory,
}

/// Everything a client needs for service-label autocomplete.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCatalog {
    pub services: Vec<CatalogEntry>,
    pub vocabulary: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("duplicate service key {0}")]
    DuplicateKey(&'static str),
    #[error("service {0} must have non-zero mile and month intervals")]
    ZeroInterval(&'static str),
    #[error("service {0} has interval bounds out of order")]
    IntervalBounds(&'static str),
    #[error("service {0} has a cost range with min above max")]
    CostRange(&'static str),
    #[error("service {0} has a severe-driving multiplier outside (0, 1)")]
    SevereMultiplier(&'static str),
}

impl IntervalKnowledgeBase {
    /// The built-in table. Rows failing validation are logged and left out.
    pub fn standard() -> Self {
        let mut seen = HashSet::new();
        let entries = standard_intervals()
            .into_iter()
            .filter(|entry| match admit_entry(entry, &mut seen) {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, "dropping invalid knowledge base entry");
                    false
                }
            })
            .collect();
        Self { entries }
    }

    /// Builds a knowledge base from caller-provided entries, enforcing the
    /// ordering invariants on every entry.
    pub fn from_entries(entries: Vec<ServiceInterval>) -> Result<Self, KnowledgeBaseError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            admit_entry(entry, &mut seen)?;
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, key: &str) -> Option<&ServiceInterval> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn entries(&self) -> &[ServiceInterval] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Every label the resolver recognizes outright: keys plus canonical names.
    pub fn vocabulary(&self) -> Vec<&'static str> {
        self.keys()
            .chain(self.entries.iter().map(|entry| entry.name))
            .collect()
    }

    pub fn catalog(&self) -> ServiceCatalog {
        let services = self
            .entries
            .iter()
            .map(|entry| CatalogEntry {
                key: entry.key,
                name: entry.name,
                category: entry.category,
            })
            .collect();
        ServiceCatalog {
            services,
            vocabulary: self.vocabulary(),
        }
    }
}

fn admit_entry(
    entry: &ServiceInterval,
    seen: &mut HashSet<&'static str>,
) -> Result<(), KnowledgeBaseError> {
    if !seen.insert(entry.key) {
        return Err(KnowledgeBaseError::DuplicateKey(entry.key));
    }
    validate_entry(entry)
}

fn validate_entry(entry: &ServiceInterval) -> Result<(), KnowledgeBaseError> {
    if entry.interval_miles == 0 || entry.interval_months == 0 {
        return Err(KnowledgeBaseError::ZeroInterval(entry.key));
    }
    if let Some(min) = entry.min_interval_miles {
        if min > entry.interval_miles {
            return Err(KnowledgeBaseError::IntervalBounds(entry.key));
        }
    }
    if let Some(max) = entry.max_interval_miles {
        if max < entry.interval_miles {
            return Err(KnowledgeBaseError::IntervalBounds(entry.key));
        }
    }
    if entry.cost.min > entry.cost.max {
        return Err(KnowledgeBaseError::CostRange(entry.key));
    }
    if let Some(multiplier) = entry.severe_multiplier {
        if !(multiplier > 0.0 && multiplier < 1.0) {
            return Err(KnowledgeBaseError::SevereMultiplier(entry.key));
        }
    }
    Ok(())
}

fn cost(min: f64, max: f64) -> CostRange {
    CostRange { min, max }
}

fn standard_intervals() -> Vec<ServiceInterval> {
    vec![
        ServiceInterval {
            key: "oil_change",
            name: "Oil Change",
            category: ServiceCategory::Engine,
            interval_miles: 7_500,
            interval_months: 6,
            min_interval_miles: Some(5_000),
            max_interval_miles: Some(10_000),
            urgency_factors: vec![
                "oil pressure light",
                "low oil level",
                "oil leak",
                "burning oil smell",
                "engine knocking",
            ],
            scam_indicators: vec![
                "oil looks dirty",
                "dark oil",
                "every 3,000 miles",
                "3000 mile service",
            ],
            description: "Synthetic oil and filter change. Modern engines run 5,000-10,000 miles between changes.",
            cost: cost(35.0, 100.0),
            severe_multiplier: Some(0.5),
            often_scam: false,
        },
        ServiceInterval {
            key: "engine_flush",
            name: "Engine Flush",
            category: ServiceCategory::Engine,
            interval_miles: 60_000,
            interval_months: 60,
            min_interval_miles: Some(30_000),
            max_interval_miles: None,
            urgency_factors: vec!["sludge on dipstick", "clogged oil passages"],
            scam_indicators: vec![
                "dirty engine",
                "carbon buildup",
                "preventive flush",
                "engine looks gunked up",
            ],
            description: "Solvent flush of the crankcase. Rarely needed when oil changes are kept up.",
            cost: cost(50.0, 150.0),
            severe_multiplier: None,
            often_scam: true,
        },
        ServiceInterval {
            key: "transmission_fluid_change",
            name: "Transmission Fluid Change",
            category: ServiceCategory::Transmission,
            interval_miles: 60_000,
            interval_months: 48,
            min_interval_miles: Some(30_000),
            max_interval_miles: Some(100_000),
            urgency_factors: vec![
                "slipping gears",
                "delayed engagement",
                "burnt fluid smell",
                "rough shifting",
            ],
            scam_indicators: vec!["fluid looks dark", "fluid is dirty"],
            description: "Drain-and-fill of automatic transmission fluid per the owner's manual.",
            cost: cost(100.0, 250.0),
            severe_multiplier: Some(0.5),
            often_scam: false,
        },
        ServiceInterval {
            key: "transmission_flush",
            name: "Transmission Flush",
            category: ServiceCategory::Transmission,
            interval_miles: 60_000,
            interval_months: 60,
            min_interval_miles: Some(45_000),
            max_interval_miles: Some(100_000),
            urgency_factors: vec!["slipping", "hard shifting", "contaminated fluid"],
            scam_indicators: vec![
                "flush will fix",
                "fluid is dirty",
                "fluid looks dark",
                "machine flush",
            ],
            description: "Pressurized fluid exchange. Many manufacturers recommend a drain-and-fill instead.",
            cost: cost(150.0, 300.0),
            severe_multiplier: Some(0.75),
            often_scam: true,
        },
        ServiceInterval {
            key: "front_brake_pads",
            name: "Front Brake Pads",
            category: ServiceCategory::Brakes,
            interval_miles: 40_000,
            interval_months: 36,
            min_interval_miles: Some(25_000),
            max_interval_miles: Some(70_000),
            urgency_factors: vec![
                "squealing",
                "grinding",
                "reduced stopping power",
                "brake warning light",
                "vibration when braking",
                "pulling when braking",
            ],
            scam_indicators: vec![
                "pads are getting low",
                "might as well do them now",
                "preventive pad replacement",
            ],
            description: "Front pad replacement. Wear depends on driving style; measure pad thickness.",
            cost: cost(150.0, 300.0),
            severe_multiplier: Some(0.7),
            often_scam: false,
        },
        ServiceInterval {
            key: "rear_brake_pads",
            name: "Rear Brake Pads",
            category: ServiceCategory::Brakes,
            interval_miles: 50_000,
            interval_months: 48,
            min_interval_miles: Some(30_000),
            max_interval_miles: Some(80_000),
            urgency_factors: vec![
                "squealing",
                "grinding",
                "parking brake not holding",
                "brake warning light",
            ],
            scam_indicators: vec!["pads are getting low", "might as well do them now"],
            description: "Rear pads wear slower than fronts on most vehicles.",
            cost: cost(150.0, 300.0),
            severe_multiplier: Some(0.7),
            often_scam: false,
        },
        ServiceInterval {
            key: "brake_rotors",
            name: "Brake Rotors",
            category: ServiceCategory::Brakes,
            interval_miles: 70_000,
            interval_months: 60,
            min_interval_miles: Some(50_000),
            max_interval_miles: Some(100_000),
            urgency_factors: vec![
                "pulsating pedal",
                "grinding",
                "deep grooves",
                "steering wheel shake when braking",
            ],
            scam_indicators: vec![
                "rotors always need replacing",
                "cannot be resurfaced",
                "rotors are warped",
            ],
            description: "Rotor replacement. Rotors usually last through two sets of pads.",
            cost: cost(200.0, 500.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "brake_fluid_flush",
            name: "Brake Fluid Flush",
            category: ServiceCategory::Fluids,
            interval_miles: 30_000,
            interval_months: 24,
            min_interval_miles: Some(20_000),
            max_interval_miles: Some(45_000),
            urgency_factors: vec!["spongy pedal", "soft brake pedal", "brake fluid leak"],
            scam_indicators: vec!["fluid is dark", "test strip", "moisture test"],
            description: "Replaces hygroscopic brake fluid to protect ABS components.",
            cost: cost(80.0, 150.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "coolant_flush",
            name: "Coolant Flush",
            category: ServiceCategory::Cooling,
            interval_miles: 60_000,
            interval_months: 60,
            min_interval_miles: Some(30_000),
            max_interval_miles: Some(100_000),
            urgency_factors: vec![
                "overheating",
                "coolant leak",
                "sweet smell",
                "temperature gauge high",
            ],
            scam_indicators: vec!["coolant looks dirty", "ph test", "coolant is old"],
            description: "Long-life coolant typically lasts five years or more.",
            cost: cost(100.0, 200.0),
            severe_multiplier: None,
            often_scam: true,
        },
        ServiceInterval {
            key: "power_steering_flush",
            name: "Power Steering Flush",
            category: ServiceCategory::Fluids,
            interval_miles: 75_000,
            interval_months: 60,
            min_interval_miles: Some(50_000),
            max_interval_miles: None,
            urgency_factors: vec![
                "whining when turning",
                "stiff steering",
                "power steering leak",
            ],
            scam_indicators: vec!["fluid is dark", "preventive flush"],
            description: "Not on most maintenance schedules; electric steering has no fluid at all.",
            cost: cost(80.0, 150.0),
            severe_multiplier: None,
            often_scam: true,
        },
        ServiceInterval {
            key: "fuel_injection_cleaning",
            name: "Fuel Injection Cleaning",
            category: ServiceCategory::Fuel,
            interval_miles: 45_000,
            interval_months: 36,
            min_interval_miles: Some(30_000),
            max_interval_miles: None,
            urgency_factors: vec![
                "rough idle",
                "misfire",
                "poor fuel economy",
                "hesitation",
            ],
            scam_indicators: vec![
                "injectors are dirty",
                "carbon buildup",
                "performance restoration",
            ],
            description: "Detergent gasoline keeps injectors clean; cleaning is rarely scheduled.",
            cost: cost(80.0, 200.0),
            severe_multiplier: None,
            often_scam: true,
        },
        ServiceInterval {
            key: "engine_air_filter",
            name: "Engine Air Filter",
            category: ServiceCategory::Filters,
            interval_miles: 15_000,
            interval_months: 12,
            min_interval_miles: Some(10_000),
            max_interval_miles: Some(30_000),
            urgency_factors: vec!["reduced acceleration", "filter visibly clogged"],
            scam_indicators: vec!["filter looks dirty", "dirty filter"],
            description: "A five-minute swap most owners can do without tools.",
            cost: cost(20.0, 60.0),
            severe_multiplier: Some(0.5),
            often_scam: false,
        },
        ServiceInterval {
            key: "cabin_air_filter",
            name: "Cabin Air Filter",
            category: ServiceCategory::Filters,
            interval_miles: 20_000,
            interval_months: 24,
            min_interval_miles: Some(15_000),
            max_interval_miles: Some(30_000),
            urgency_factors: vec!["musty odor", "weak airflow from vents", "allergy symptoms"],
            scam_indicators: vec!["filter looks dirty", "dirty filter"],
            description: "Usually behind the glove box; replaceable in minutes.",
            cost: cost(30.0, 75.0),
            severe_multiplier: Some(0.5),
            often_scam: false,
        },
        ServiceInterval {
            key: "fuel_filter",
            name: "Fuel Filter",
            category: ServiceCategory::Fuel,
            interval_miles: 40_000,
            interval_months: 36,
            min_interval_miles: Some(20_000),
            max_interval_miles: Some(60_000),
            urgency_factors: vec!["hard starting", "stalling", "loss of power"],
            scam_indicators: vec!["all cars need fuel filters", "filter is clogged"],
            description: "Many modern vehicles use a lifetime in-tank filter.",
            cost: cost(50.0, 150.0),
            severe_multiplier: Some(0.75),
            often_scam: false,
        },
        ServiceInterval {
            key: "spark_plugs",
            name: "Spark Plug Replacement",
            category: ServiceCategory::Engine,
            interval_miles: 100_000,
            interval_months: 96,
            min_interval_miles: Some(60_000),
            max_interval_miles: Some(120_000),
            urgency_factors: vec![
                "misfire",
                "rough idle",
                "check engine light",
                "hard starting",
            ],
            scam_indicators: vec!["plugs look worn", "tune-up due"],
            description: "Iridium plugs are rated for roughly 100,000 miles.",
            cost: cost(100.0, 300.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "timing_belt",
            name: "Timing Belt Replacement",
            category: ServiceCategory::Engine,
            interval_miles: 90_000,
            interval_months: 84,
            min_interval_miles: Some(60_000),
            max_interval_miles: Some(105_000),
            urgency_factors: vec![
                "ticking noise",
                "belt cracking",
                "oil leak near timing cover",
            ],
            scam_indicators: vec!["belt looks worn", "your car has a timing chain"],
            description: "Interference engines are destroyed if the belt snaps; follow the manual.",
            cost: cost(500.0, 1_000.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "serpentine_belt",
            name: "Serpentine Belt",
            category: ServiceCategory::Engine,
            interval_miles: 60_000,
            interval_months: 60,
            min_interval_miles: Some(40_000),
            max_interval_miles: Some(100_000),
            urgency_factors: vec![
                "squealing from engine",
                "cracks in belt",
                "battery light",
            ],
            scam_indicators: vec!["belt looks dry", "belt is glazed"],
            description: "Inspect for cracks; replacement is simple when actually worn.",
            cost: cost(80.0, 200.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "battery_replacement",
            name: "Battery Replacement",
            category: ServiceCategory::Electrical,
            interval_miles: 50_000,
            interval_months: 48,
            min_interval_miles: Some(30_000),
            max_interval_miles: None,
            urgency_factors: vec![
                "slow crank",
                "battery warning light",
                "corroded terminals",
                "won't start",
            ],
            scam_indicators: vec!["replace before winter", "battery is old"],
            description: "Lead-acid batteries last three to five years; ask for a load test printout.",
            cost: cost(100.0, 250.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "alternator",
            name: "Alternator Replacement",
            category: ServiceCategory::Electrical,
            interval_miles: 120_000,
            interval_months: 120,
            min_interval_miles: Some(80_000),
            max_interval_miles: None,
            urgency_factors: vec!["battery light", "dimming lights", "dead battery"],
            scam_indicators: vec!["output is low", "preventive replacement"],
            description: "Alternators fail on condition, not on a schedule.",
            cost: cost(300.0, 700.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "oxygen_sensor",
            name: "Oxygen Sensor Replacement",
            category: ServiceCategory::Electrical,
            interval_miles: 100_000,
            interval_months: 120,
            min_interval_miles: Some(60_000),
            max_interval_miles: None,
            urgency_factors: vec![
                "check engine light",
                "poor fuel economy",
                "failed emissions",
            ],
            scam_indicators: vec!["sensors are lazy", "preventive replacement"],
            description: "Replace on a stored fault code, not on mileage alone.",
            cost: cost(150.0, 400.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "tire_rotation",
            name: "Tire Rotation",
            category: ServiceCategory::Tires,
            interval_miles: 7_500,
            interval_months: 6,
            min_interval_miles: Some(5_000),
            max_interval_miles: Some(10_000),
            urgency_factors: vec!["uneven tire wear", "vibration at highway speed"],
            scam_indicators: vec![],
            description: "Often bundled free with oil changes.",
            cost: cost(20.0, 50.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "tire_replacement",
            name: "Tire Replacement",
            category: ServiceCategory::Tires,
            interval_miles: 50_000,
            interval_months: 72,
            min_interval_miles: Some(30_000),
            max_interval_miles: Some(80_000),
            urgency_factors: vec![
                "tread below 2/32",
                "sidewall bulge",
                "sidewall damage",
                "cord showing",
            ],
            scam_indicators: vec!["tires are getting old", "tread is low"],
            description: "Measure tread depth with a gauge or the penny test before agreeing.",
            cost: cost(400.0, 1_000.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "wheel_alignment",
            name: "Wheel Alignment",
            category: ServiceCategory::Suspension,
            interval_miles: 25_000,
            interval_months: 24,
            min_interval_miles: Some(12_000),
            max_interval_miles: None,
            urgency_factors: vec![
                "pulling to one side",
                "uneven tire wear",
                "off-center steering wheel",
            ],
            scam_indicators: vec!["free alignment check", "slightly out of spec"],
            description: "Needed after suspension work or a hard pothole hit; ask for the printout.",
            cost: cost(80.0, 150.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "shocks_struts",
            name: "Shocks and Struts",
            category: ServiceCategory::Suspension,
            interval_miles: 75_000,
            interval_months: 84,
            min_interval_miles: Some(50_000),
            max_interval_miles: Some(100_000),
            urgency_factors: vec![
                "excessive bouncing",
                "nose dive when braking",
                "leaking fluid",
            ],
            scam_indicators: vec!["bounce test failed", "struts are worn"],
            description: "Replace in axle pairs when leaking or clearly worn.",
            cost: cost(400.0, 1_000.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "ball_joints",
            name: "Ball Joint Replacement",
            category: ServiceCategory::Suspension,
            interval_miles: 100_000,
            interval_months: 120,
            min_interval_miles: Some(70_000),
            max_interval_miles: None,
            urgency_factors: vec![
                "clunking over bumps",
                "wandering steering",
                "torn boot",
            ],
            scam_indicators: vec!["slight play", "preventive replacement"],
            description: "Worn ball joints are a safety issue; ask to see the play measured.",
            cost: cost(250.0, 600.0),
            severe_multiplier: Some(0.8),
            often_scam: false,
        },
        ServiceInterval {
            key: "differential_fluid",
            name: "Differential Fluid Change",
            category: ServiceCategory::Fluids,
            interval_miles: 50_000,
            interval_months: 48,
            min_interval_miles: Some(30_000),
            max_interval_miles: Some(60_000),
            urgency_factors: vec!["whining from rear", "gear noise"],
            scam_indicators: vec!["fluid looks dark"],
            description: "Gear oil change; shortened intervals apply when towing.",
            cost: cost(80.0, 150.0),
            severe_multiplier: Some(0.6),
            often_scam: false,
        },
        ServiceInterval {
            key: "transfer_case_fluid",
            name: "Transfer Case Fluid",
            category: ServiceCategory::Fluids,
            interval_miles: 60_000,
            interval_months: 60,
            min_interval_miles: Some(30_000),
            max_interval_miles: None,
            urgency_factors: vec!["grinding when engaging 4wd", "transfer case leak"],
            scam_indicators: vec!["fluid looks dark"],
            description: "Applies only to four-wheel and all-wheel drive vehicles.",
            cost: cost(80.0, 150.0),
            severe_multiplier: Some(0.5),
            often_scam: false,
        },
        ServiceInterval {
            key: "radiator_hoses",
            name: "Radiator Hose Replacement",
            category: ServiceCategory::Cooling,
            interval_miles: 100_000,
            interval_months: 96,
            min_interval_miles: Some(60_000),
            max_interval_miles: None,
            urgency_factors: vec!["coolant leak", "swollen hose", "overheating"],
            scam_indicators: vec!["hoses feel soft", "preventive replacement"],
            description: "Replace when cracked, swollen, or leaking.",
            cost: cost(150.0, 350.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "thermostat",
            name: "Thermostat Replacement",
            category: ServiceCategory::Cooling,
            interval_miles: 100_000,
            interval_months: 120,
            min_interval_miles: None,
            max_interval_miles: None,
            urgency_factors: vec![
                "overheating",
                "heater blows cold",
                "temperature gauge fluctuates",
            ],
            scam_indicators: vec!["replace with coolant flush"],
            description: "Fails on condition; there is no fixed replacement interval.",
            cost: cost(150.0, 300.0),
            severe_multiplier: None,
            often_scam: false,
        },
        ServiceInterval {
            key: "throttle_body_cleaning",
            name: "Throttle Body Cleaning",
            category: ServiceCategory::Fuel,
            interval_miles: 50_000,
            interval_months: 48,
            min_interval_miles: Some(30_000),
            max_interval_miles: None,
            urgency_factors: vec!["stalling at idle", "erratic idle"],
            scam_indicators: vec!["carbon buildup", "induction service"],
            description: "Only warranted when idle quality has actually degraded.",
            cost: cost(80.0, 150.0),
            severe_multiplier: None,
            often_scam: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_entries_satisfy_invariants() {
        let kb = IntervalKnowledgeBase::standard();
        assert_eq!(kb.entries().len(), standard_intervals().len());
        assert_eq!(kb.entries().len(), 30);
        IntervalKnowledgeBase::from_entries(kb.entries().to_vec()).expect("standard table valid");
    }

    #[test]
    fn lookup_finds_known_keys_only() {
        let kb = IntervalKnowledgeBase::standard();
        let oil = kb.lookup("oil_change").expect("oil change present");
        assert_eq!(oil.interval_miles, 7_500);
        assert!(kb.lookup("flux_capacitor").is_none());
    }

    #[test]
    fn multipliers_only_where_wear_depends_on_use() {
        let kb = IntervalKnowledgeBase::standard();
        assert!(kb.lookup("oil_change").and_then(|e| e.severe_multiplier).is_some());
        assert!(kb.lookup("engine_air_filter").and_then(|e| e.severe_multiplier).is_some());
        assert!(kb.lookup("battery_replacement").and_then(|e| e.severe_multiplier).is_none());
        assert!(kb.lookup("alternator").and_then(|e| e.severe_multiplier).is_none());
    }

    #[test]
    fn from_entries_rejects_broken_rows() {
        let kb = IntervalKnowledgeBase::standard();
        let mut rows = kb.entries().to_vec();
        rows[0].min_interval_miles = Some(rows[0].interval_miles + 1);
        assert_eq!(
            IntervalKnowledgeBase::from_entries(rows).unwrap_err(),
            KnowledgeBaseError::IntervalBounds("oil_change")
        );

        let mut rows = kb.entries().to_vec();
        rows[1].cost = cost(200.0, 100.0);
        assert_eq!(
            IntervalKnowledgeBase::from_entries(rows).unwrap_err(),
            KnowledgeBaseError::CostRange("engine_flush")
        );

        let mut rows = kb.entries().to_vec();
        let duplicate = rows[0].clone();
        rows.push(duplicate);
        assert_eq!(
            IntervalKnowledgeBase::from_entries(rows).unwrap_err(),
            KnowledgeBaseError::DuplicateKey("oil_change")
        );
    }

    #[test]
    fn vocabulary_covers_keys_and_names() {
        let kb = IntervalKnowledgeBase::standard();
        let vocabulary = kb.vocabulary();
        assert_eq!(vocabulary.len(), kb.entries().len() * 2);
        assert!(vocabulary.contains(&"oil_change"));
        assert!(kb.keys().all(|key| vocabulary.contains(&key)));
    }

    #[test]
    fn catalog_lists_every_entry() {
        let kb = IntervalKnowledgeBase::standard();
        let catalog = kb.catalog();
        assert_eq!(catalog.services.len(), kb.entries().len());
        assert!(catalog.services.iter().any(|row| {
            row.key == "cabin_air_filter" && row.category == ServiceCategory::Filters
        }));
        assert!(catalog.vocabulary.contains(&"Cabin Air Filter"));
    }
}
