//! Cell values and their comparison semantics

use std::borrow::Cow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single cell: a finite number, a piece of text, or nothing at all.
///
/// Equality is strictly per-variant. Numbers compare by value, so `1`,
/// `1.0` and `001` are one and the same cell. Text compares
/// byte-for-byte. A number never equals its own textual rendering, and
/// `Missing` equals only `Missing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                // Parsing never produces NaN, but equality must stay reflexive.
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Missing, CellValue::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Number(n) => {
                // Fold the zero sign and NaN payloads so the hash
                // agrees with equality.
                let bits = if n.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    (*n + 0.0).to_bits()
                };
                bits.hash(state);
            }
            CellValue::Text(s) => s.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl CellValue {
    /// Check if the value is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Convert to a display string; `Missing` renders as the empty string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Missing => Cow::Borrowed(""),
        }
    }

    /// Total ordering used when sorting report rows by key.
    ///
    /// Missing sorts first, then numbers by value, then text
    /// lexicographically. Distinct variants never interleave.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Missing => 0,
            CellValue::Number(_) => 1,
            CellValue::Text(_) => 2,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_equality_by_value() {
        assert_eq!(CellValue::Number(1.0), CellValue::Number(1.0));
        assert_eq!(CellValue::Number(0.5), CellValue::Number(0.50));
        assert_ne!(CellValue::Number(1.0), CellValue::Number(2.0));
    }

    #[test]
    fn test_text_equality_is_byte_exact() {
        assert_eq!(CellValue::from("abc"), CellValue::from("abc"));
        assert_ne!(CellValue::from("abc"), CellValue::from("ABC"));
        assert_ne!(CellValue::from("abc"), CellValue::from(" abc"));
    }

    #[test]
    fn test_variants_never_compare_equal() {
        assert_ne!(CellValue::Number(1.0), CellValue::from("1"));
        assert_ne!(CellValue::Missing, CellValue::from(""));
        assert_ne!(CellValue::Missing, CellValue::Number(0.0));
    }

    #[test]
    fn test_missing_equals_missing() {
        assert_eq!(CellValue::Missing, CellValue::Missing);
    }

    #[test]
    fn test_signed_zero_equals_and_hashes_like_zero() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(value: &CellValue) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        assert_eq!(CellValue::Number(-0.0), CellValue::Number(0.0));
        assert_eq!(
            hash_of(&CellValue::Number(-0.0)),
            hash_of(&CellValue::Number(0.0))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(2.0).display(), "2");
        assert_eq!(CellValue::Number(2.5).display(), "2.5");
        assert_eq!(CellValue::from("hi").display(), "hi");
        assert_eq!(CellValue::Missing.display(), "");
    }

    #[test]
    fn test_sort_order_missing_then_numbers_then_text() {
        let mut values = vec![
            CellValue::from("beta"),
            CellValue::Number(10.0),
            CellValue::Missing,
            CellValue::from("alpha"),
            CellValue::Number(2.0),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(
            values,
            vec![
                CellValue::Missing,
                CellValue::Number(2.0),
                CellValue::Number(10.0),
                CellValue::from("alpha"),
                CellValue::from("beta"),
            ]
        );
    }
}
