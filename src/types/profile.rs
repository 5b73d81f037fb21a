//! Named criteria presets for common outdoor events.

use crate::types::criteria::CriteriaSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper humidity bound for presets that do not limit humidity.
const ANY_HUMIDITY: f64 = 100.0;

/// An event type with a preset [`CriteriaSet`].
///
/// # Examples
///
/// ```
/// use climate_odds::EventProfile;
///
/// let picnic: EventProfile = "piquenique".parse().unwrap();
/// let criteria = picnic.criteria();
/// assert_eq!(criteria.precipitation_max, 0.5);
/// assert_eq!(criteria.humidity_min, Some(40.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventProfile {
    /// Beach day.
    Praia,
    /// Barbecue.
    Churrasco,
    /// Casual football match.
    Pelada,
    FestaJunina,
    SambaPagode,
    Carnaval,
    VoleiPraia,
    /// Fishing trip.
    Pescaria,
    /// Picnic.
    Piquenique,
    /// Hike.
    Trilha,
    /// Mild general purpose starting point.
    Customizavel,
}

impl EventProfile {
    pub const ALL: [EventProfile; 11] = [
        EventProfile::Praia,
        EventProfile::Churrasco,
        EventProfile::Pelada,
        EventProfile::FestaJunina,
        EventProfile::SambaPagode,
        EventProfile::Carnaval,
        EventProfile::VoleiPraia,
        EventProfile::Pescaria,
        EventProfile::Piquenique,
        EventProfile::Trilha,
        EventProfile::Customizavel,
    ];

    /// Key used in configuration files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            EventProfile::Praia => "praia",
            EventProfile::Churrasco => "churrasco",
            EventProfile::Pelada => "pelada",
            EventProfile::FestaJunina => "festa_junina",
            EventProfile::SambaPagode => "samba_pagode",
            EventProfile::Carnaval => "carnaval",
            EventProfile::VoleiPraia => "volei_praia",
            EventProfile::Pescaria => "pescaria",
            EventProfile::Piquenique => "piquenique",
            EventProfile::Trilha => "trilha",
            EventProfile::Customizavel => "customizavel",
        }
    }

    pub fn criteria(self) -> CriteriaSet {
        // (temp_min, temp_max, precipitation_max, wind_max, humidity_min, humidity_max)
        let (temp_min, temp_max, precipitation_max, wind_max, humidity_min, humidity_max) =
            match self {
                EventProfile::Praia => (28.0, 45.0, 1.0, 20.0, None, 80.0),
                EventProfile::Churrasco => (20.0, 40.0, 1.0, 15.0, None, ANY_HUMIDITY),
                EventProfile::Pelada => (20.0, 38.0, 3.0, 15.0, None, ANY_HUMIDITY),
                EventProfile::FestaJunina => (16.0, 32.0, 1.0, 12.0, Some(35.0), 65.0),
                EventProfile::SambaPagode => (24.0, 36.0, 2.0, 12.0, None, 80.0),
                EventProfile::Carnaval => (24.0, 42.0, 5.0, 15.0, Some(55.0), 90.0),
                EventProfile::VoleiPraia => (28.0, 42.0, 1.0, 10.0, None, 75.0),
                EventProfile::Pescaria => (20.0, 32.0, 2.0, 12.0, None, ANY_HUMIDITY),
                EventProfile::Piquenique => (22.0, 30.0, 0.5, 10.0, Some(40.0), 70.0),
                EventProfile::Trilha => (18.0, 28.0, 5.0, 12.0, Some(40.0), 85.0),
                EventProfile::Customizavel => (20.0, 30.0, 2.0, 10.0, Some(40.0), 70.0),
            };
        CriteriaSet {
            temp_min,
            temp_max,
            precipitation_min: None,
            precipitation_max,
            wind_max,
            humidity_min,
            humidity_max,
        }
    }
}

impl fmt::Display for EventProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event profile '{0}'")]
pub struct UnknownProfile(pub String);

impl FromStr for EventProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        EventProfile::ALL
            .into_iter()
            .find(|profile| profile.key() == key)
            .ok_or_else(|| UnknownProfile(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profiles() {
        assert_eq!("praia".parse(), Ok(EventProfile::Praia));
        assert_eq!("Festa-Junina".parse(), Ok(EventProfile::FestaJunina));
        assert_eq!(
            "rave".parse::<EventProfile>(),
            Err(UnknownProfile("rave".to_string()))
        );
    }

    #[test]
    fn test_keys_round_trip() {
        for profile in EventProfile::ALL {
            assert_eq!(profile.key().parse(), Ok(profile));
        }
    }

    #[test]
    fn test_festa_junina_criteria() {
        let criteria = EventProfile::FestaJunina.criteria();
        assert_eq!(criteria.temp_min, 16.0);
        assert_eq!(criteria.temp_max, 32.0);
        assert_eq!(criteria.wind_max, 12.0);
        assert_eq!(criteria.humidity_min, Some(35.0));
        assert_eq!(criteria.humidity_max, 65.0);
        assert_eq!(criteria.precipitation_min, None);
    }

    #[test]
    fn test_profiles_without_humidity_limit() {
        let criteria = EventProfile::Churrasco.criteria();
        assert_eq!(criteria.humidity_max, 100.0);
        assert_eq!(criteria.humidity_min, None);
    }

    #[test]
    fn test_profile_serde_key() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&EventProfile::VoleiPraia)?, "\"volei_praia\"");
        let parsed: EventProfile = serde_json::from_str("\"samba_pagode\"")?;
        assert_eq!(parsed, EventProfile::SambaPagode);
        Ok(())
    }
}
