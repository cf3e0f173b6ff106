mod config;
use log::{debug, info};
use snafu::{ensure, OptionExt};

pub use crate::config::*;

pub mod builder;
pub mod manual;

// **** Entry points ****

/// Ranks the alternatives of a raw table.
///
/// Arguments:
/// * `table` the table as read from the input, with a header. The first column holds the names
/// of the alternatives, all the other columns are criteria.
/// * `weights` comma-separated positive numbers, one per criterion
/// * `impacts` comma-separated `+` or `-`, one per criterion
///
/// All the checks are performed before any computation. The first check to fail is returned.
pub fn rank(table: &RawTable, weights: &str, impacts: &str) -> Result<TopsisResult, TopsisError> {
    let decision = validate_table(table)?;
    let criteria = parse_criteria(&decision.criteria, weights, impacts)?;
    run_topsis(&decision, &criteria)
}

/// Checks the shape and the types of a raw table and converts it to a decision table.
pub fn validate_table(table: &RawTable) -> Result<DecisionTable, TopsisError> {
    let columns = table.column_count();
    ensure!(columns >= 3, TooFewColumnsSnafu { columns });
    for (idx, row) in table.rows.iter().enumerate() {
        ensure!(
            row.len() == columns,
            RaggedRowSnafu {
                row: idx + 1,
                expected: columns,
                found: row.len()
            }
        );
    }
    ensure!(!table.rows.is_empty(), NoAlternativesSnafu {});

    let mut names: Vec<String> = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        match &row[0] {
            CellValue::Text(s) => names.push(s.clone()),
            cell => {
                return IdentifierTypeSnafu {
                    row: idx + 1,
                    value: cell.to_string(),
                }
                .fail()
            }
        }
    }

    // Checked column by column, so that the first offending column is reported.
    let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(columns - 1); table.rows.len()];
    for col in 1..columns {
        for (idx, row) in table.rows.iter().enumerate() {
            match &row[col] {
                CellValue::Number(x) if x.is_finite() => values[idx].push(*x),
                cell => {
                    return CriterionTypeSnafu {
                        column: table.headers[col].clone(),
                        row: idx + 1,
                        value: cell.to_string(),
                    }
                    .fail()
                }
            }
        }
    }

    let alternatives: Vec<Alternative> = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Alternative { name, values })
        .collect();
    debug!(
        "validate_table: {} alternatives, criteria: {:?}",
        alternatives.len(),
        &table.headers[1..]
    );
    Ok(DecisionTable {
        identifier: table.headers[0].clone(),
        criteria: table.headers[1..].to_vec(),
        alternatives,
    })
}

/// Parses the weights and the impacts given as comma-separated strings.
///
/// The weights are converted first, then the number of weights and impacts is checked
/// against the number of criteria, and finally the impact symbols are checked.
pub fn parse_criteria(
    names: &[String],
    weights: &str,
    impacts: &str,
) -> Result<Vec<Criterion>, TopsisError> {
    let weight_values: Vec<f64> = weights
        .split(',')
        .enumerate()
        .map(|(idx, token)| parse_weight(idx + 1, token))
        .collect::<Result<_, _>>()?;
    let impact_symbols: Vec<&str> = impacts.split(',').collect();
    ensure!(
        weight_values.len() == names.len() && impact_symbols.len() == names.len(),
        CardinalitySnafu {
            weights: weight_values.len(),
            impacts: impact_symbols.len(),
            criteria: names.len()
        }
    );

    let mut criteria: Vec<Criterion> = Vec::with_capacity(names.len());
    for (idx, ((name, weight), symbol)) in names
        .iter()
        .zip(weight_values)
        .zip(impact_symbols)
        .enumerate()
    {
        let impact = Impact::parse(symbol).context(InvalidImpactSnafu {
            position: idx + 1,
            symbol,
        })?;
        criteria.push(Criterion {
            name: name.clone(),
            weight,
            impact,
        });
    }
    Ok(criteria)
}

fn parse_weight(position: usize, token: &str) -> Result<f64, TopsisError> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| valid_weight(*w))
        .context(InvalidWeightSnafu { position, token })
}

pub(crate) fn valid_weight(w: f64) -> bool {
    w.is_finite() && w > 0.0
}

/// Runs the TOPSIS procedure on a validated table.
pub fn run_topsis(
    table: &DecisionTable,
    criteria: &[Criterion],
) -> Result<TopsisResult, TopsisError> {
    info!(
        "Ranking {:?} alternatives over {:?} criteria",
        table.alternatives.len(),
        criteria.len()
    );
    // The table may have been assembled by hand, check it again.
    ensure!(
        criteria.len() == table.criteria.len(),
        CardinalitySnafu {
            weights: criteria.len(),
            impacts: criteria.len(),
            criteria: table.criteria.len()
        }
    );
    for (idx, c) in criteria.iter().enumerate() {
        ensure!(
            valid_weight(c.weight),
            InvalidWeightSnafu {
                position: idx + 1,
                token: c.weight.to_string()
            }
        );
    }
    ensure!(!table.alternatives.is_empty(), NoAlternativesSnafu {});
    for (idx, alt) in table.alternatives.iter().enumerate() {
        ensure!(
            alt.values.len() == criteria.len(),
            RaggedRowSnafu {
                row: idx + 1,
                expected: criteria.len() + 1,
                found: alt.values.len() + 1
            }
        );
    }

    let matrix: Vec<Vec<f64>> = table
        .alternatives
        .iter()
        .map(|a| a.values.clone())
        .collect();
    let normalized = normalize(&matrix, criteria)?;
    let weighted = apply_weights(&normalized, criteria);
    let (ideal_best, ideal_worst) = ideal_points(&weighted, criteria);
    debug!(
        "run_topsis: ideal best: {:?} ideal worst: {:?}",
        ideal_best, ideal_worst
    );
    let dist_best = distances(&weighted, &ideal_best);
    let dist_worst = distances(&weighted, &ideal_worst);
    let names: Vec<&str> = table.alternatives.iter().map(|a| a.name.as_str()).collect();
    let all_scores = scores(&names, &dist_best, &dist_worst)?;
    let ranks = truncate_ranks(&average_ranks(&all_scores));

    let alternatives: Vec<RankedAlternative> = table
        .alternatives
        .iter()
        .zip(all_scores.iter().zip(ranks.iter()))
        .map(|(alt, (score, rank))| RankedAlternative {
            name: alt.name.clone(),
            values: alt.values.clone(),
            score: *score,
            rank: *rank,
        })
        .collect();
    for a in alternatives.iter() {
        info!("{:>6} {:.6} {}", a.rank, a.score, a.name);
    }

    Ok(TopsisResult {
        identifier: table.identifier.clone(),
        criteria: criteria.to_vec(),
        ideal_best,
        ideal_worst,
        alternatives,
    })
}

// **** Steps of the procedure ****
// The matrices are stored row by row: one row per alternative, one column per criterion.

/// The Euclidean norm of each column.
pub fn column_norms(matrix: &[Vec<f64>], num_criteria: usize) -> Vec<f64> {
    (0..num_criteria)
        .map(|j| matrix.iter().map(|row| row[j] * row[j]).sum::<f64>().sqrt())
        .collect()
}

/// Divides every column by its Euclidean norm. A column with only zeros is an error.
pub fn normalize(
    matrix: &[Vec<f64>],
    criteria: &[Criterion],
) -> Result<Vec<Vec<f64>>, TopsisError> {
    let norms = column_norms(matrix, criteria.len());
    for (norm, c) in norms.iter().zip(criteria.iter()) {
        ensure!(
            *norm != 0.0,
            ZeroNormColumnSnafu {
                column: c.name.clone()
            }
        );
    }
    Ok(matrix
        .iter()
        .map(|row| row.iter().zip(norms.iter()).map(|(x, n)| x / n).collect())
        .collect())
}

pub fn apply_weights(matrix: &[Vec<f64>], criteria: &[Criterion]) -> Vec<Vec<f64>> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(criteria.iter())
                .map(|(x, c)| x * c.weight)
                .collect()
        })
        .collect()
}

/// Returns the ideal best and the ideal worst vectors.
pub fn ideal_points(matrix: &[Vec<f64>], criteria: &[Criterion]) -> (Vec<f64>, Vec<f64>) {
    let mut best: Vec<f64> = Vec::with_capacity(criteria.len());
    let mut worst: Vec<f64> = Vec::with_capacity(criteria.len());
    for (j, c) in criteria.iter().enumerate() {
        let max = matrix
            .iter()
            .map(|row| row[j])
            .fold(f64::NEG_INFINITY, f64::max);
        let min = matrix.iter().map(|row| row[j]).fold(f64::INFINITY, f64::min);
        match c.impact {
            Impact::Maximize => {
                best.push(max);
                worst.push(min);
            }
            Impact::Minimize => {
                best.push(min);
                worst.push(max);
            }
        }
    }
    (best, worst)
}

/// The Euclidean distance of each row to the given point.
pub fn distances(matrix: &[Vec<f64>], point: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(point.iter())
                .map(|(x, p)| (x - p) * (x - p))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

/// The relative closeness of each alternative to the ideal solution.
pub fn scores(
    names: &[&str],
    dist_best: &[f64],
    dist_worst: &[f64],
) -> Result<Vec<f64>, TopsisError> {
    let mut res: Vec<f64> = Vec::with_capacity(dist_best.len());
    for ((name, db), dw) in names.iter().zip(dist_best).zip(dist_worst) {
        let total = db + dw;
        ensure!(
            total != 0.0,
            IndeterminateScoreSnafu {
                alternative: *name
            }
        );
        res.push(dw / total);
    }
    Ok(res)
}

/// Fractional competition ranks by descending score.
///
/// Equal scores get the mean of the positions they jointly occupy: with the scores
/// `[0.9, 0.5, 0.5, 0.1]`, the ranks are `[1.0, 2.5, 2.5, 4.0]`.
pub fn average_ranks(scores: &[f64]) -> Vec<f64> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));

    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg_rank = (i + 1 + j + 1) as f64 / 2.0;
        for k in i..=j {
            ranks[order[k]] = avg_rank;
        }
        i = j + 1;
    }
    ranks
}

/// Drops the fractional part of the ranks.
///
/// Tied alternatives may end up with a rank that is not consecutive to the previous one:
/// `[1.0, 2.5, 2.5, 4.0]` becomes `[1, 2, 2, 4]`.
pub fn truncate_ranks(ranks: &[f64]) -> Vec<u32> {
    ranks.iter().map(|r| r.trunc() as u32).collect()
}
