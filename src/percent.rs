//! Percentage engine: turns a total and its parts into fractions of the whole.

use crate::error::DatasetError;

/// A total and the ordered parts to visualise against it.
///
/// Construction validates that total and parts accompany each other, so a
/// `Dataset` in hand always yields fractions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    total: Option<f64>,
    parts: Vec<f64>,
}

impl Dataset {
    /// A dataset with a known total.
    pub fn new(total: f64, parts: impl Into<Vec<f64>>) -> Result<Self, DatasetError> {
        Self::try_from_parts(Some(total), Some(parts.into()))
    }

    /// The "no data" dataset; renders nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from possibly missing total and parts, as a host attribute map
    /// would hand them over.
    pub fn try_from_parts(
        total: Option<f64>,
        parts: Option<Vec<f64>>,
    ) -> Result<Self, DatasetError> {
        let parts = parts.unwrap_or_default();
        compute_fractions(total, Some(parts.as_slice()))?;
        Ok(Self { total, parts })
    }

    pub fn total(&self) -> Option<f64> {
        self.total
    }

    pub fn parts(&self) -> &[f64] {
        &self.parts
    }

    pub fn fractions(&self) -> Fractions {
        // Validated at construction.
        compute_fractions(self.total, Some(self.parts.as_slice())).unwrap_or_default()
    }
}

/// Normalised proportions, one per part, in part order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fractions(Vec<f64>);

impl Fractions {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Share of the whole covered by all parts together.
    pub fn coverage(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Center label text, e.g. `50.00%`.
    pub fn label(&self) -> String {
        format!("{:.2}%", self.coverage() * 100.0)
    }

    /// Full sweep of each segment in degrees.
    pub fn sweep_angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|fraction| 360.0 * fraction)
    }
}

impl From<Vec<f64>> for Fractions {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Divide every part by the total.
///
/// A zero total (whatever the parts), or no data at all, yields no
/// fractions. A non-zero total without parts, or parts without a total, is
/// rejected.
pub fn compute_fractions(
    total: Option<f64>,
    parts: Option<&[f64]>,
) -> Result<Fractions, DatasetError> {
    let parts = parts.unwrap_or_default();
    match total {
        None if parts.is_empty() => Ok(Fractions::default()),
        None => Err(DatasetError::MissingTotal { parts: parts.len() }),
        Some(total) if total == 0.0 => Ok(Fractions::default()),
        Some(_) if parts.is_empty() => Err(DatasetError::MissingParts),
        Some(total) => Ok(Fractions(parts.iter().map(|part| part / total).collect())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn divides_each_part_by_total() {
        let fractions = compute_fractions(Some(100.0), Some(&[25.0, 25.0][..])).unwrap();
        assert_eq!(fractions.as_slice(), &[0.25, 0.25]);
        assert_eq!(fractions.label(), "50.00%");
    }

    #[test]
    fn zero_total_is_empty_not_an_error() {
        let fractions = compute_fractions(Some(0.0), Some(&[1.0, 2.0][..])).unwrap();
        assert!(fractions.is_empty());
    }

    #[test]
    fn zero_total_without_parts_is_empty() {
        assert!(compute_fractions(Some(0.0), None).unwrap().is_empty());
        assert!(compute_fractions(Some(0.0), Some(&[][..])).unwrap().is_empty());
        let dataset = Dataset::try_from_parts(Some(0.0), None).unwrap();
        assert!(dataset.fractions().is_empty());
    }

    #[test]
    fn nothing_at_all_is_empty() {
        assert!(compute_fractions(None, None).unwrap().is_empty());
        assert!(compute_fractions(None, Some(&[][..])).unwrap().is_empty());
    }

    #[test]
    fn parts_without_total_are_rejected() {
        let err = compute_fractions(None, Some(&[1.0, 2.0, 3.0][..])).unwrap_err();
        assert_eq!(err, DatasetError::MissingTotal { parts: 3 });
        assert!(err.to_string().contains("total must accompany parts"));
    }

    #[test]
    fn total_without_parts_is_rejected() {
        assert_eq!(
            compute_fractions(Some(10.0), None).unwrap_err(),
            DatasetError::MissingParts
        );
        assert!(Dataset::try_from_parts(Some(10.0), Some(vec![])).is_err());
    }

    #[test]
    fn fractions_are_not_clamped() {
        let fractions = compute_fractions(Some(10.0), Some(&[15.0][..])).unwrap();
        assert_eq!(fractions.as_slice(), &[1.5]);
        assert_eq!(fractions.label(), "150.00%");
    }

    #[test]
    fn fractions_stay_within_whole_when_parts_fit() {
        let parts = [1000.0, 1000.0, 750.0, 1250.0];
        let total = 4000.0;
        let fractions = compute_fractions(Some(total), Some(&parts[..])).unwrap();
        assert!(fractions.coverage() <= 1.0 + 1e-12);
        for (fraction, part) in fractions.as_slice().iter().zip(parts) {
            assert!((fraction - part / total).abs() < 1e-12);
        }
    }

    #[test]
    fn repeated_computation_is_identical() {
        let dataset = Dataset::new(4000.0, vec![1000.0, 1000.0]).unwrap();
        assert_eq!(dataset.fractions(), dataset.fractions());
        assert_eq!(dataset.fractions().label(), "50.00%");
    }

    #[test]
    fn sweep_angles_follow_fractions() {
        let fractions = Fractions::from(vec![0.25, 0.5]);
        assert_eq!(fractions.sweep_angles().collect::<Vec<_>>(), vec![90.0, 180.0]);
    }
}
