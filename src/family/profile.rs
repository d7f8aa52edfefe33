//! Profile type and related structures.
//!
//! A profile is one person in the genealogy. The layout engine treats it as
//! an opaque payload attached to a node; only the renderer reads the name
//! and date fields. Extra fields sent by the REST API (residence, places,
//! career records) are ignored on decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable profile identifier, as assigned by the genealogy service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u32);

impl ProfileId {
    /// Create a new ProfileId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Profile({})", self.0)
    }
}

impl From<u32> for ProfileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ProfileId> for u32 {
    #[inline]
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

/// Gender as stored by the service. Drives the colour bar on a node card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A person, reduced to the fields a tree diagram needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: Gender,
    /// ISO-8601 date or date-time string.
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: Option<String>,
}

impl Profile {
    /// Create a profile with an id and a name; dates left empty.
    pub fn new(id: u32, first_name: &str, last_name: &str) -> Self {
        Self {
            id: ProfileId(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: Gender::Unknown,
            date_of_birth: String::new(),
            date_of_death: None,
        }
    }

    /// "First Last", as printed on the card.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn birth_year(&self) -> Option<i32> {
        year_of(&self.date_of_birth)
    }

    pub fn death_year(&self) -> Option<i32> {
        self.date_of_death.as_deref().and_then(year_of)
    }

    /// Card subtitle: `"1985"`, or `"1955 – 2020"` for deceased people.
    pub fn lifespan_label(&self) -> String {
        match (self.birth_year(), self.death_year()) {
            (Some(b), Some(d)) => format!("{b} – {d}"),
            (Some(b), None) => b.to_string(),
            (None, Some(d)) => format!("? – {d}"),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
impl Profile {
    pub(crate) fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub(crate) fn with_dates(mut self, born: &str, died: Option<&str>) -> Self {
        self.date_of_birth = born.to_string();
        self.date_of_death = died.map(str::to_string);
        self
    }
}

/// Leading calendar year of an ISO-8601 date (`1985-03-15T00:00:00Z` → 1985).
fn year_of(date: &str) -> Option<i32> {
    let date = date.trim();
    // Skip a leading sign so negative years still split on the first '-'.
    let sign_len = usize::from(date.starts_with('-') || date.starts_with('+'));
    let end = date[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(date.len(), |i| i + sign_len);
    if end == sign_len {
        return None;
    }
    date[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id() {
        let id = ProfileId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Profile(42)");

        let raw: u32 = ProfileId::from(7).into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_display_name() {
        let p = Profile::new(1, "Jean", "Dupont");
        assert_eq!(p.display_name(), "Jean Dupont");

        let p = Profile::new(2, "Marie", "");
        assert_eq!(p.display_name(), "Marie");
    }

    #[test]
    fn test_years_from_iso_dates() {
        let p = Profile::new(1, "Pierre", "Dupont")
            .with_dates("1955-01-10T00:00:00Z", Some("2020-11-02"));
        assert_eq!(p.birth_year(), Some(1955));
        assert_eq!(p.death_year(), Some(2020));
        assert_eq!(p.lifespan_label(), "1955 – 2020");
    }

    #[test]
    fn test_lifespan_living_and_unknown() {
        let living = Profile::new(1, "Jean", "Dupont").with_dates("1985-03-15T00:00:00Z", None);
        assert_eq!(living.lifespan_label(), "1985");

        let unknown = Profile::new(2, "X", "Y");
        assert_eq!(unknown.birth_year(), None);
        assert_eq!(unknown.lifespan_label(), "");

        let garbled = Profile::new(3, "X", "Y").with_dates("n/a", Some("1901-01-01"));
        assert_eq!(garbled.lifespan_label(), "? – 1901");
    }

    #[test]
    fn test_decode_rest_payload() {
        let json = r#"{
            "id": 3,
            "userId": 1,
            "firstName": "Marie",
            "lastName": "Dupont",
            "gender": "FEMALE",
            "dateOfBirth": "1958-06-20T00:00:00Z",
            "dateOfDeath": null,
            "age": 67,
            "residence": "Paris",
            "birthPlace": null,
            "deathPlace": null,
            "professionalRecords": [],
            "academicRecords": []
        }"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProfileId(3));
        assert_eq!(p.gender, Gender::Female);
        assert_eq!(p.date_of_death, None);
        assert_eq!(p.birth_year(), Some(1958));
    }

    #[test]
    fn test_unrecognised_gender_is_unknown() {
        let p: Profile =
            serde_json::from_str(r#"{"id": 9, "gender": "OTHER", "dateOfBirth": ""}"#).unwrap();
        assert_eq!(p.gender, Gender::Unknown);
        assert_eq!(p.first_name, "");
    }

    #[test]
    fn test_encode_camel_case() {
        let p = Profile::new(5, "Sophie", "Martin").with_gender(Gender::Female);
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["firstName"], "Sophie");
        assert_eq!(value["gender"], "FEMALE");
        assert_eq!(value["id"], 5);
    }
}
