//! Label encoding for categorical regressors.

use std::collections::BTreeMap;

/// Maps category labels to numeric codes.
///
/// Codes are assigned by sorted label order and derived fresh from the values
/// present in the dataset being fitted; they are not persisted across
/// invocations, so the same label can map to a different code in another run.
#[derive(Debug, Clone, Default)]
pub struct CategoryEncoder {
    codes: BTreeMap<String, usize>,
}

impl CategoryEncoder {
    /// Build an encoder over every label present in `values`.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut codes = BTreeMap::new();
        for value in values {
            codes.entry(value.to_string()).or_insert(0);
        }
        for (code, (_, slot)) in codes.iter_mut().enumerate() {
            *slot = code;
        }
        Self { codes }
    }

    /// Numeric code for a label. Labels unseen at fit time encode as 0.
    pub fn encode(&self, value: &str) -> f64 {
        self.codes.get(value).copied().unwrap_or(0) as f64
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
