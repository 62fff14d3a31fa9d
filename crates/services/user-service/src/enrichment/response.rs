//! Response bodies of the demographic inference services.
//!
//! Only the fields we use are modelled; `count`, `name` and friends are ignored.

use serde::Deserialize;

use super::error::{EnrichmentError, Lookup};

/// `GET {agify}/?name=..`
#[derive(Debug, Deserialize)]
pub struct AgeResponse {
    pub age: Option<i32>,
}

impl AgeResponse {
    pub fn into_age(self) -> Result<i32, EnrichmentError> {
        self.age.ok_or(EnrichmentError::NoPrediction {
            lookup: Lookup::Age,
        })
    }
}

/// `GET {genderize}/?name=..`
#[derive(Debug, Deserialize)]
pub struct GenderResponse {
    pub gender: Option<String>,
}

impl GenderResponse {
    pub fn into_gender(self) -> Result<String, EnrichmentError> {
        self.gender.ok_or(EnrichmentError::NoPrediction {
            lookup: Lookup::Gender,
        })
    }
}

/// `GET {nationalize}/?name=..`
#[derive(Debug, Deserialize)]
pub struct NationalityResponse {
    #[serde(default)]
    pub country: Vec<CountryPrediction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryPrediction {
    pub country_id: String,
    pub probability: f64,
}

impl NationalityResponse {
    /// Country with the highest probability; the earliest entry wins a tie.
    pub fn into_top_country(self) -> Result<String, EnrichmentError> {
        self.country
            .into_iter()
            .reduce(|best, next| {
                if next.probability > best.probability {
                    next
                } else {
                    best
                }
            })
            .map(|prediction| prediction.country_id)
            .ok_or(EnrichmentError::NoPrediction {
                lookup: Lookup::Nationality,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_null_is_no_prediction() {
        let response: AgeResponse =
            serde_json::from_str(r#"{"count":0,"name":"zzz","age":null}"#).unwrap();
        assert!(matches!(
            response.into_age(),
            Err(EnrichmentError::NoPrediction {
                lookup: Lookup::Age
            })
        ));
    }

    #[test]
    fn test_gender_extracted() {
        let response: GenderResponse =
            serde_json::from_str(r#"{"name":"timur","gender":"male","probability":0.99}"#)
                .unwrap();
        assert_eq!(response.into_gender().unwrap(), "male");
    }

    #[test]
    fn test_top_country_picks_highest_probability() {
        let response: NationalityResponse = serde_json::from_str(
            r#"{"country":[
                {"country_id":"KZ","probability":0.2},
                {"country_id":"TR","probability":0.9},
                {"country_id":"RU","probability":0.5}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.into_top_country().unwrap(), "TR");
    }

    #[test]
    fn test_top_country_tie_keeps_first() {
        let response: NationalityResponse = serde_json::from_str(
            r#"{"country":[
                {"country_id":"UA","probability":0.4},
                {"country_id":"RU","probability":0.4}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.into_top_country().unwrap(), "UA");
    }

    #[test]
    fn test_missing_country_list_is_no_prediction() {
        let response: NationalityResponse = serde_json::from_str(r#"{"name":"zzz"}"#).unwrap();
        assert!(matches!(
            response.into_top_country(),
            Err(EnrichmentError::NoPrediction {
                lookup: Lookup::Nationality
            })
        ));
    }
}
