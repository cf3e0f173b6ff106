use snafu::ensure;

pub use crate::config::*;
use crate::{run_topsis, valid_weight};
use crate::config::{CriterionTypeSnafu, InvalidWeightSnafu, RaggedRowSnafu};

/// A builder for assembling a decision table without going through a raw table.
///
/// ```
/// pub use topsis_ranking::builder::Builder;
/// pub use topsis_ranking::Impact;
/// # use topsis_ranking::TopsisError;
///
/// let mut builder = Builder::new("Model")
///     .criterion("Price", 1.0, Impact::Minimize)?
///     .criterion("Storage", 2.0, Impact::Maximize)?;
///
/// builder.add_alternative("M1", &[250.0, 16.0])?;
/// builder.add_alternative("M2", &[200.0, 32.0])?;
///
/// let result = builder.rank()?;
/// assert_eq!(result.alternatives[1].rank, 1);
///
/// # Ok::<(), TopsisError>(())
/// ```
pub struct Builder {
    pub(crate) _identifier: String,
    pub(crate) _criteria: Vec<Criterion>,
    pub(crate) _alternatives: Vec<Alternative>,
}

impl Builder {
    /// `identifier` is the name of the column holding the names of the alternatives.
    pub fn new(identifier: &str) -> Builder {
        Builder {
            _identifier: identifier.to_string(),
            _criteria: Vec::new(),
            _alternatives: Vec::new(),
        }
    }

    /// Adds a criterion. The criteria can only be declared before the alternatives: once an
    /// alternative has been added, a new criterion would leave it one value short, and a
    /// `RaggedRow` error is returned.
    pub fn criterion(
        self,
        name: &str,
        weight: f64,
        impact: Impact,
    ) -> Result<Builder, TopsisError> {
        if let Some(first) = self._alternatives.first() {
            return RaggedRowSnafu {
                row: 1_usize,
                expected: self._criteria.len() + 2,
                found: first.values.len() + 1,
            }
            .fail();
        }
        ensure!(
            valid_weight(weight),
            InvalidWeightSnafu {
                position: self._criteria.len() + 1,
                token: weight.to_string()
            }
        );
        let mut criteria = self._criteria;
        criteria.push(Criterion {
            name: name.to_string(),
            weight,
            impact,
        });
        Ok(Builder {
            _identifier: self._identifier,
            _criteria: criteria,
            _alternatives: Vec::new(),
        })
    }

    /// Adds an alternative, with one value per criterion in the order of declaration.
    pub fn add_alternative(&mut self, name: &str, values: &[f64]) -> Result<(), TopsisError> {
        let row = self._alternatives.len() + 1;
        ensure!(
            values.len() == self._criteria.len(),
            RaggedRowSnafu {
                row,
                expected: self._criteria.len() + 1,
                found: values.len() + 1
            }
        );
        for (x, c) in values.iter().zip(self._criteria.iter()) {
            ensure!(
                x.is_finite(),
                CriterionTypeSnafu {
                    column: c.name.clone(),
                    row,
                    value: x.to_string()
                }
            );
        }
        self._alternatives.push(Alternative {
            name: name.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    pub fn table(&self) -> DecisionTable {
        DecisionTable {
            identifier: self._identifier.clone(),
            criteria: self._criteria.iter().map(|c| c.name.clone()).collect(),
            alternatives: self._alternatives.clone(),
        }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self._criteria
    }

    pub fn rank(&self) -> Result<TopsisResult, TopsisError> {
        run_topsis(&self.table(), &self._criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_matches_raw_table() {
        let mut builder = Builder::new("Name")
            .criterion("C1", 1.0, Impact::Maximize)
            .unwrap()
            .criterion("C2", 1.0, Impact::Maximize)
            .unwrap();
        builder.add_alternative("M1", &[1.0, 1.0]).unwrap();
        builder.add_alternative("M2", &[2.0, 2.0]).unwrap();
        builder.add_alternative("M3", &[3.0, 3.0]).unwrap();
        let from_builder = builder.rank().unwrap();

        let raw = RawTable {
            headers: vec!["Name".to_string(), "C1".to_string(), "C2".to_string()],
            rows: vec![
                vec![
                    CellValue::Text("M1".to_string()),
                    CellValue::Number(1.0),
                    CellValue::Number(1.0),
                ],
                vec![
                    CellValue::Text("M2".to_string()),
                    CellValue::Number(2.0),
                    CellValue::Number(2.0),
                ],
                vec![
                    CellValue::Text("M3".to_string()),
                    CellValue::Number(3.0),
                    CellValue::Number(3.0),
                ],
            ],
        };
        let from_raw = crate::rank(&raw, "1,1", "+,+").unwrap();
        assert_eq!(from_builder, from_raw);
    }

    #[test]
    fn wrong_number_of_values() {
        let mut builder = Builder::new("Name")
            .criterion("C1", 1.0, Impact::Maximize)
            .unwrap()
            .criterion("C2", 1.0, Impact::Minimize)
            .unwrap();
        let err = builder.add_alternative("M1", &[1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        let err = builder.add_alternative("M1", &[1.0, f64::NAN]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn non_positive_weight() {
        let err = Builder::new("Name")
            .criterion("C1", 0.0, Impact::Maximize)
            .err()
            .unwrap();
        assert_eq!(
            err,
            TopsisError::InvalidWeight {
                position: 1,
                token: "0".to_string()
            }
        );
    }

    #[test]
    fn criterion_after_alternatives() {
        let mut builder = Builder::new("Name")
            .criterion("C1", 1.0, Impact::Maximize)
            .unwrap();
        builder.add_alternative("M1", &[1.0]).unwrap();
        builder.add_alternative("M2", &[2.0]).unwrap();
        let err = builder
            .criterion("C2", 1.0, Impact::Maximize)
            .err()
            .unwrap();
        assert_eq!(
            err,
            TopsisError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn not_enough_criteria() {
        let mut builder = Builder::new("Name")
            .criterion("C1", 1.0, Impact::Maximize)
            .unwrap();
        builder.add_alternative("M1", &[1.0]).unwrap();
        builder.add_alternative("M2", &[2.0]).unwrap();
        // A single criterion is enough for the procedure itself.
        let res = builder.rank().unwrap();
        assert_eq!(res.alternatives[1].rank, 1);
    }
}
