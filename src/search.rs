use crate::types::Specialty;

/// Curated keyword list per specialty, matched as case-insensitive
/// substrings of the query.
const KEYWORDS: [(Specialty, &[&str]); 7] = [
    (Specialty::SoilScience, &["soil", "earth", "ground"]),
    (Specialty::PlantBiology, &["plant", "crop", "growth"]),
    (Specialty::WaterManagement, &["water", "irrigation", "hydro"]),
    (Specialty::Composting, &["compost", "organic", "waste"]),
    (Specialty::PestManagement, &["pest", "bug", "insect"]),
    (Specialty::Permaculture, &["permaculture", "sustainable", "eco"]),
    (Specialty::GeneralAgriculture, &["general", "basic", "beginner"]),
];

/// Maps free-form query text to matching specialties. Returns matches in
/// declaration order with no duplicates; empty or unrecognized input yields
/// an empty result. Never fails.
pub fn search_suggestions(query: &str) -> Vec<Specialty> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| query.contains(kw)))
        .map(|(specialty, _)| *specialty)
        .collect()
}
