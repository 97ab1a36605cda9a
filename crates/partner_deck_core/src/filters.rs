//! crates/partner_deck_core/src/filters.rs
//!
//! Filter criteria for the deck and the pure function deriving the filtered view.

use serde::{Deserialize, Serialize};

use crate::domain::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    /// At least one verification badge.
    Verified,
}

/// Inclusion lists plus an optional verification requirement.
/// An empty list places no constraint on that attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub company_sizes: Vec<String>,
    #[serde(default)]
    pub geographies: Vec<String>,
    #[serde(default)]
    pub verification_level: Option<VerificationLevel>,
}

/// A partial update to [`FilterCriteria`]; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    pub industries: Option<Vec<String>>,
    pub company_sizes: Option<Vec<String>>,
    pub geographies: Option<Vec<String>>,
    pub verification_level: Option<Option<VerificationLevel>>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.industries.is_empty()
            && self.company_sizes.is_empty()
            && self.geographies.is_empty()
            && self.verification_level.is_none()
    }

    /// Number of active selections, as shown on the filter button badge.
    pub fn active_count(&self) -> usize {
        self.industries.len()
            + self.company_sizes.len()
            + self.geographies.len()
            + usize::from(self.verification_level.is_some())
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(industries) = patch.industries {
            self.industries = industries;
        }
        if let Some(sizes) = patch.company_sizes {
            self.company_sizes = sizes;
        }
        if let Some(geographies) = patch.geographies {
            self.geographies = geographies;
        }
        if let Some(level) = patch.verification_level {
            self.verification_level = level;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a single candidate survives every active criterion.
    pub fn admits(&self, candidate: &Candidate) -> bool {
        let company = &candidate.company;

        let industry_ok = self.industries.is_empty() || self.industries.contains(&company.industry);
        let size_ok =
            self.company_sizes.is_empty() || self.company_sizes.contains(&company.employee_range);
        let geography_ok = self.geographies.is_empty()
            || company.geographies.iter().any(|g| self.geographies.contains(g));
        let verification_ok = match self.verification_level {
            Some(VerificationLevel::Verified) => company.is_verified(),
            None => true,
        };

        industry_ok && size_ok && geography_ok && verification_ok
    }
}

/// Returns the candidates of `remaining` that pass `criteria`, in their original order.
pub fn apply_filters<'a>(
    remaining: impl IntoIterator<Item = &'a Candidate>,
    criteria: &FilterCriteria,
) -> Vec<&'a Candidate> {
    if criteria.is_unconstrained() {
        return remaining.into_iter().collect();
    }
    remaining.into_iter().filter(|c| criteria.admits(c)).collect()
}
