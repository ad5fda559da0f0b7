//! Profile model plus the completeness predicate and the weighted
//! completion percentage used for progress display.
//!
//! Completeness gates feature access (see [`crate::gating`]); the percentage
//! is display-only and never consulted by the gate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PROFILE_PHOTOS;
use crate::types::{ProfileId, UserRole};

/// A member profile as returned by the server.
///
/// Every field the server may omit carries `#[serde(default)]` so partial
/// profiles (fresh signups) still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: Option<ProfileId>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub city: String,
    pub state: String,
    pub religion: String,
    pub caste: String,
    pub education: String,
    pub occupation: String,
    pub annual_income: Option<u32>,
    pub family_details: String,
    /// Photo URLs, server-relative.
    pub photos: Vec<String>,
    pub is_verified: bool,
    pub role: UserRole,
}

/// Checklist predicate gating feature access.
///
/// True iff first name, last name, city, state, religion, and caste are all
/// non-empty, a date of birth is set, and at least three photos exist.
pub fn is_profile_complete(profile: &Profile) -> bool {
    let strings = [
        &profile.first_name,
        &profile.last_name,
        &profile.city,
        &profile.state,
        &profile.religion,
        &profile.caste,
    ];

    strings.iter().all(|s| !s.is_empty())
        && profile.date_of_birth.is_some()
        && profile.photos.len() >= MIN_PROFILE_PHOTOS
}

// Fixed weights per field group; they sum to 100.
const WEIGHT_PERSONAL: u32 = 30;
const WEIGHT_LOCATION: u32 = 10;
const WEIGHT_RELIGION: u32 = 10;
const WEIGHT_EDUCATION: u32 = 10;
const WEIGHT_CAREER: u32 = 10;
const WEIGHT_FAMILY: u32 = 10;
const WEIGHT_PHOTOS: u32 = 20;

const TOTAL_WEIGHT: u32 = WEIGHT_PERSONAL
    + WEIGHT_LOCATION
    + WEIGHT_RELIGION
    + WEIGHT_EDUCATION
    + WEIGHT_CAREER
    + WEIGHT_FAMILY
    + WEIGHT_PHOTOS;

/// Weighted completion percentage in `[0, 100]`, for progress bars only.
///
/// A group contributes its full weight once every field in it is filled;
/// partially filled groups contribute nothing, so the value only ever rises
/// as fields are completed.
pub fn completion_percentage(profile: &Profile) -> u8 {
    let mut completed: u32 = 0;

    if !profile.first_name.is_empty()
        && !profile.last_name.is_empty()
        && profile.date_of_birth.is_some()
    {
        completed += WEIGHT_PERSONAL;
    }
    if !profile.city.is_empty() && !profile.state.is_empty() {
        completed += WEIGHT_LOCATION;
    }
    if !profile.religion.is_empty() && !profile.caste.is_empty() {
        completed += WEIGHT_RELIGION;
    }
    if !profile.education.is_empty() {
        completed += WEIGHT_EDUCATION;
    }
    if !profile.occupation.is_empty() {
        completed += WEIGHT_CAREER;
    }
    if !profile.family_details.is_empty() {
        completed += WEIGHT_FAMILY;
    }
    if profile.photos.len() >= MIN_PROFILE_PHOTOS {
        completed += WEIGHT_PHOTOS;
    }

    ((100 * completed + TOTAL_WEIGHT / 2) / TOTAL_WEIGHT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_profile() -> Profile {
        Profile {
            id: Some(ProfileId("p1".into())),
            first_name: "Asha".into(),
            last_name: "Patil".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 6, 12),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            religion: "Hindu".into(),
            caste: "Maratha".into(),
            education: "B.E.".into(),
            occupation: "Engineer".into(),
            annual_income: Some(1_200_000),
            family_details: "Nuclear family".into(),
            photos: vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
            is_verified: true,
            role: UserRole::Member,
        }
    }

    #[test]
    fn complete_profile_passes() {
        assert!(is_profile_complete(&full_profile()));
    }

    #[test]
    fn empty_string_field_fails() {
        for clear in [
            |p: &mut Profile| p.first_name.clear(),
            |p: &mut Profile| p.last_name.clear(),
            |p: &mut Profile| p.city.clear(),
            |p: &mut Profile| p.state.clear(),
            |p: &mut Profile| p.religion.clear(),
            |p: &mut Profile| p.caste.clear(),
        ] {
            let mut p = full_profile();
            clear(&mut p);
            assert!(!is_profile_complete(&p));
        }
    }

    #[test]
    fn missing_dob_fails() {
        let mut p = full_profile();
        p.date_of_birth = None;
        assert!(!is_profile_complete(&p));
    }

    #[test]
    fn two_photos_fail_three_pass() {
        let mut p = full_profile();
        p.photos.pop();
        assert!(!is_profile_complete(&p));
        p.photos.push("c.jpg".into());
        assert!(is_profile_complete(&p));
    }

    #[test]
    fn percentage_bounds() {
        assert_eq!(completion_percentage(&Profile::default()), 0);
        assert_eq!(completion_percentage(&full_profile()), 100);
    }

    #[test]
    fn percentage_monotonic_as_groups_fill() {
        let mut p = Profile::default();
        let mut last = completion_percentage(&p);

        let steps: Vec<fn(&mut Profile)> = vec![
            |p| {
                p.first_name = "Asha".into();
                p.last_name = "Patil".into();
                p.date_of_birth = NaiveDate::from_ymd_opt(1994, 6, 12);
            },
            |p| {
                p.city = "Pune".into();
                p.state = "Maharashtra".into();
            },
            |p| {
                p.religion = "Hindu".into();
                p.caste = "Maratha".into();
            },
            |p| p.education = "B.E.".into(),
            |p| p.occupation = "Engineer".into(),
            |p| p.family_details = "Nuclear family".into(),
            |p| p.photos = vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
        ];

        for step in steps {
            step(&mut p);
            let now = completion_percentage(&p);
            assert!(now >= last, "percentage regressed: {last} -> {now}");
            last = now;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn partial_group_contributes_nothing() {
        let mut p = Profile::default();
        p.first_name = "Asha".into();
        // last name and DOB still missing, so the personal group is worth 0
        assert_eq!(completion_percentage(&p), 0);
    }
}
