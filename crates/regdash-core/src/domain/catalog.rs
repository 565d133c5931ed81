//! Bundled CFR title catalog.
//!
//! The full set of 50 CFR titles with their administering agencies. Serves
//! as the offline fallback when the backend title endpoint is unreachable;
//! counts are zero until the backend fills them in.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one CFR title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfrTitle {
    pub number: u16,
    pub name: String,
    pub agency: String,
    #[serde(default)]
    pub regulation_count: u64,
    #[serde(default)]
    pub total_word_count: u64,
    #[serde(default)]
    pub average_word_count: u64,
    #[serde(default)]
    pub conflict_count: u64,
    #[serde(default)]
    pub last_updated: String,
    /// Agency seal image filename, when one is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seal: Option<String>,
}

impl CfrTitle {
    /// A catalog entry with zeroed statistics.
    fn bundled(number: u16, name: &str, agency: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            agency: agency.to_string(),
            regulation_count: 0,
            total_word_count: 0,
            average_word_count: 0,
            conflict_count: 0,
            last_updated: String::new(),
            seal: seal_option(agency),
        }
    }
}

#[rustfmt::skip]
const TITLES: [(u16, &str, &str); 50] = [
    (1, "General Provisions", "General Services Administration"),
    (2, "Federal Financial Assistance", "Office of Management and Budget"),
    (3, "The President", "Executive Office of the President"),
    (4, "Accounts", "Government Accountability Office"),
    (5, "Administrative Personnel", "Office of Personnel Management"),
    (6, "Domestic Security", "Department of Homeland Security"),
    (7, "Agriculture", "Department of Agriculture"),
    (8, "Aliens and Nationality", "Department of Homeland Security"),
    (9, "Animals and Animal Products", "Department of Agriculture"),
    (10, "Energy", "Department of Energy"),
    (11, "Federal Elections", "Federal Election Commission"),
    (12, "Banks and Banking", "Federal Reserve System"),
    (13, "Business Credit and Assistance", "Small Business Administration"),
    (14, "Aeronautics and Space", "Federal Aviation Administration"),
    (15, "Commerce and Foreign Trade", "Department of Commerce"),
    (16, "Commercial Practices", "Federal Trade Commission"),
    (17, "Commodity and Securities Exchanges", "Securities and Exchange Commission"),
    (18, "Conservation of Power and Water Resources", "Federal Energy Regulatory Commission"),
    (19, "Customs Duties", "Department of Homeland Security"),
    (20, "Employees Benefits", "Department of Labor"),
    (21, "Food and Drugs", "Food and Drug Administration"),
    (22, "Foreign Relations", "Department of State"),
    (23, "Highways", "Department of Transportation"),
    (24, "Housing and Urban Development", "Department of Housing and Urban Development"),
    (25, "Indians", "Department of the Interior"),
    (26, "Internal Revenue", "Internal Revenue Service"),
    (27, "Alcohol, Tobacco Products and Firearms", "Bureau of Alcohol, Tobacco, Firearms and Explosives"),
    (28, "Judicial Administration", "Department of Justice"),
    (29, "Labor", "Department of Labor"),
    (30, "Mineral Resources", "Department of the Interior"),
    (31, "Money and Finance: Treasury", "Department of the Treasury"),
    (32, "National Defense", "Department of Defense"),
    (33, "Navigation and Navigable Waters", "U.S. Army Corps of Engineers"),
    (34, "Education", "Department of Education"),
    (35, "Reserved", "Reserved"),
    (36, "Parks, Forests, and Public Property", "Department of the Interior"),
    (37, "Patents, Trademarks, and Copyrights", "Department of Commerce"),
    (38, "Pensions, Bounties, and Veterans Relief", "Department of Veterans Affairs"),
    (39, "Postal Service", "United States Postal Service"),
    (40, "Protection of Environment", "Environmental Protection Agency"),
    (41, "Public Contracts and Property Management", "General Services Administration"),
    (42, "Public Health", "Department of Health and Human Services"),
    (43, "Public Lands: Interior", "Department of the Interior"),
    (44, "Emergency Management and Assistance", "Federal Emergency Management Agency"),
    (45, "Public Welfare", "Department of Health and Human Services"),
    (46, "Shipping", "Department of Transportation"),
    (47, "Telecommunication", "Federal Communications Commission"),
    (48, "Federal Acquisition Regulations System", "General Services Administration"),
    (49, "Transportation", "Department of Transportation"),
    (50, "Wildlife and Fisheries", "Department of the Interior"),
];

#[rustfmt::skip]
const SEALS: [(&str, &str); 34] = [
    ("General Services Administration", "gsa.png"),
    ("Office of Management and Budget", "omb.png"),
    ("Executive Office of the President", "eop.png"),
    ("Government Accountability Office", "gao.png"),
    ("Office of Personnel Management", "opm.png"),
    ("Department of Homeland Security", "dhs.png"),
    ("Department of Agriculture", "agriculture.png"),
    ("Department of Energy", "energy.png"),
    ("Federal Election Commission", "fec.png"),
    ("Federal Reserve System", "fed.png"),
    ("Small Business Administration", "sba.png"),
    ("Federal Aviation Administration", "faa.png"),
    ("Department of Commerce", "commerce.png"),
    ("Federal Trade Commission", "ftc.png"),
    ("Securities and Exchange Commission", "sec.png"),
    ("Federal Energy Regulatory Commission", "ferc.png"),
    ("Food and Drug Administration", "fda.png"),
    ("Department of State", "state.png"),
    ("Department of Transportation", "transportation.png"),
    ("Department of Housing and Urban Development", "hud.png"),
    ("Department of the Interior", "interior.png"),
    ("Internal Revenue Service", "irs.png"),
    ("Department of the Treasury", "treasury.png"),
    ("Department of Justice", "justice.png"),
    ("Department of Labor", "labor.png"),
    ("Department of Defense", "defense.png"),
    ("U.S. Army Corps of Engineers", "army.png"),
    ("Department of Education", "education.png"),
    ("Department of Veterans Affairs", "va.png"),
    ("United States Postal Service", "usps.png"),
    ("Environmental Protection Agency", "epa.png"),
    ("Department of Health and Human Services", "hhs.png"),
    ("Federal Emergency Management Agency", "fema.png"),
    ("Federal Communications Commission", "fcc.png"),
];

/// The bundled catalog of all 50 CFR titles with zeroed statistics.
#[must_use]
pub fn bundled_titles() -> Vec<CfrTitle> {
    TITLES
        .iter()
        .map(|&(number, name, agency)| CfrTitle::bundled(number, name, agency))
        .collect()
}

/// Seal image filename for an agency, falling back to `default.png`.
#[must_use]
pub fn agency_seal(agency: &str) -> &'static str {
    SEALS
        .iter()
        .find(|&&(name, _)| name == agency)
        .map_or("default.png", |&(_, seal)| seal)
}

fn seal_option(agency: &str) -> Option<String> {
    if agency == "Reserved" {
        None
    } else {
        Some(agency_seal(agency).to_string())
    }
}

/// Unique administering agencies, sorted, with the "Reserved" placeholder
/// excluded. Used for filter dropdowns.
#[must_use]
pub fn unique_agencies() -> Vec<&'static str> {
    let mut agencies: Vec<&'static str> = TITLES
        .iter()
        .map(|&(_, _, agency)| agency)
        .filter(|&agency| agency != "Reserved")
        .collect();
    agencies.sort_unstable();
    agencies.dedup();
    agencies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_fifty_titles() {
        let titles = bundled_titles();
        assert_eq!(titles.len(), 50);
        for (idx, title) in titles.iter().enumerate() {
            assert_eq!(usize::from(title.number), idx + 1);
        }
    }

    #[test]
    fn test_known_agency_seal() {
        assert_eq!(agency_seal("Environmental Protection Agency"), "epa.png");
        assert_eq!(agency_seal("No Such Agency"), "default.png");
    }

    #[test]
    fn test_unique_agencies_sorted_without_reserved() {
        let agencies = unique_agencies();
        assert!(!agencies.contains(&"Reserved"));
        let mut sorted = agencies.clone();
        sorted.sort_unstable();
        assert_eq!(agencies, sorted);
        // DHS administers three titles but appears once.
        assert_eq!(
            agencies
                .iter()
                .filter(|a| **a == "Department of Homeland Security")
                .count(),
            1
        );
    }

    #[test]
    fn test_reserved_title_has_no_seal() {
        let titles = bundled_titles();
        let reserved = titles.iter().find(|t| t.number == 35).unwrap();
        assert_eq!(reserved.seal, None);
        let epa = titles.iter().find(|t| t.number == 40).unwrap();
        assert_eq!(epa.seal.as_deref(), Some("epa.png"));
    }
}
