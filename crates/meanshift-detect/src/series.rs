use std::ops::Range;

/// An ordered univariate series with one label per value.
///
/// Labels are either externally supplied timestamps or, when the data has no
/// time column, a synthesized 1-based row counter. Both vectors are aligned
/// index-for-index and immutable once the series is built.
///
/// # Example
///
/// ```
/// use meanshift_detect::Series;
///
/// let series = Series::from_values(vec![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(series.labels(), ["1", "2", "3"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SeriesError {
    #[display("series has {values} values but {labels} labels")]
    LengthMismatch { values: usize, labels: usize },
    #[display("value at index {index} is not finite")]
    NonFiniteValue { index: usize },
}

impl Series {
    /// Creates a series from values and their aligned labels.
    pub fn new(values: Vec<f64>, labels: Vec<String>) -> Result<Self, SeriesError> {
        if values.len() != labels.len() {
            return Err(SeriesError::LengthMismatch {
                values: values.len(),
                labels: labels.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        Ok(Self { values, labels })
    }

    /// Creates a series labelled with a 1-based row counter.
    pub fn from_values(values: Vec<f64>) -> Result<Self, SeriesError> {
        let labels = (1..=values.len()).map(|row| row.to_string()).collect();
        Self::new(values, labels)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the values in `range`, or `None` if it is out of bounds.
    #[must_use]
    pub fn values_in(&self, range: Range<usize>) -> Option<&[f64]> {
        self.values.get(range)
    }

    /// Returns the labels in `range`, or `None` if it is out of bounds.
    #[must_use]
    pub fn labels_in(&self, range: Range<usize>) -> Option<&[String]> {
        self.labels.get(range)
    }
}
