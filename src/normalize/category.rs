pub const GENE: &str = "biolink:Gene";
pub const DISEASE: &str = "biolink:Disease";
pub const ANATOMICAL_ENTITY: &str = "biolink:AnatomicalEntity";
pub const PHENOTYPIC_FEATURE: &str = "biolink:PhenotypicFeature";
pub const CHEMICAL_ENTITY: &str = "biolink:ChemicalEntity";

/// Fixed prefix rules, checked in order before the chemical prefixes.
const PREFIX_RULES: &[(&str, &str)] = &[
    ("NCBIGene:", GENE),
    ("MONDO:", DISEASE),
    ("UBERON:", ANATOMICAL_ENTITY),
    ("HP:", PHENOTYPIC_FEATURE),
    ("DRUGBANK:", CHEMICAL_ENTITY),
    ("CHEBI:", CHEMICAL_ENTITY),
];

/// Classify a CURIE by its prefix. Unknown prefixes have no category.
///
/// `chemical_prefixes` are matched as plain string prefixes, without
/// requiring the `:` separator.
pub fn infer_category(id: &str, chemical_prefixes: &[String]) -> Option<&'static str> {
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, category)| *category)
        .or_else(|| {
            chemical_prefixes
                .iter()
                .any(|prefix| id.starts_with(prefix.as_str()))
                .then_some(CHEMICAL_ENTITY)
        })
}
