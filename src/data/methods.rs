use crate::models::CalculationMethod;

/// Country code → Aladhan method code. Anything unlisted gets
/// [`CalculationMethod::DEFAULT`].
const COUNTRY_METHODS: &[(&str, u8)] = &[
    ("IN", 1),
    ("BD", 1),
    ("PK", 5),
    ("EG", 5),
    ("US", 2),
    ("CA", 2),
    ("GB", 3),
    ("DE", 3),
    ("ZA", 3),
    ("NG", 3),
    ("AU", 3),
    ("SA", 4),
    ("AE", 16),
    ("FR", 12),
    ("TR", 13),
    ("MY", 17),
    ("ID", 20),
];

pub fn method_for_country(country_code: &str) -> CalculationMethod {
    COUNTRY_METHODS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country_code))
        .map(|(_, method)| CalculationMethod(*method))
        .unwrap_or(CalculationMethod::DEFAULT)
}
