use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub birth_date: NaiveDate,
}

#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("invalid date (use YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

impl Profile {
    pub fn from_input(name: Option<String>, date: &str) -> Result<Self, ProfileError> {
        let trimmed = date.trim();
        let birth_date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| ProfileError::InvalidDate(trimmed.to_string()))?;
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Ok(Profile { name, birth_date })
    }

    pub fn greeting(&self) -> String {
        match &self.name {
            Some(name) => format!("Happy Birthday, {}!", name),
            None => "Happy Birthday!".to_string(),
        }
    }

    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => format!("{}'s Birthday Countdown", name),
            None => "Your Birthday Countdown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_date() {
        let profile = Profile::from_input(Some("Ada".into()), "2000-06-15").unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(
            profile.birth_date,
            NaiveDate::from_ymd_opt(2000, 6, 15).unwrap()
        );
    }

    #[test]
    fn blank_name_is_none() {
        let profile = Profile::from_input(Some("   ".into()), "1990-01-01").unwrap();
        assert!(profile.name.is_none());
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Profile::from_input(None, "15/06/2000").is_err());
        assert!(Profile::from_input(None, "").is_err());
        assert!(Profile::from_input(None, "2001-02-29").is_err());
    }

    #[test]
    fn trims_date_input() {
        let profile = Profile::from_input(None, " 2000-06-15 ").unwrap();
        assert_eq!(
            profile.birth_date,
            NaiveDate::from_ymd_opt(2000, 6, 15).unwrap()
        );
    }
}
