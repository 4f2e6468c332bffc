//! Common regex patterns for order page fields.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Loose numeric date: 3/6/24, 03-06-2024, 3 6 2024 (month, day, year)
    pub static ref DATE_NUMERIC_TRIPLE: Regex = Regex::new(
        r"(\d{1,2})[\s/-](\d{1,2})[\s/-](\d{2,4})"
    ).unwrap();

    // First run of digits in a quantity cell
    pub static ref QUANTITY: Regex = Regex::new(r"\d+").unwrap();

    // Tax exemption note anywhere in a product block
    pub static ref TAX_EXEMPTION: Regex = Regex::new(r"(?i)tax exemption").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_exemption_phrase() {
        assert!(TAX_EXEMPTION.is_match("Tax Exemption applied"));
        assert!(TAX_EXEMPTION.is_match("order has TAX EXEMPTION"));
        assert!(!TAX_EXEMPTION.is_match("taxexemption"));
        assert!(!TAX_EXEMPTION.is_match("tax  exemption"));
        assert!(!TAX_EXEMPTION.is_match("sales tax"));
    }
}
