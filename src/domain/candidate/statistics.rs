//! Aggregate, non-identifying statistics over stored candidate records.

use serde::{Deserialize, Serialize};

use super::CandidateRecord;
use crate::domain::foundation::Timestamp;

const TOP_TECHNOLOGIES: usize = 10;
const TOP_POSITIONS: usize = 5;

/// How often one value occurs across records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStatistics {
    pub total_candidates: usize,
    pub popular_technologies: Vec<Tally>,
    pub average_experience: f64,
    pub popular_positions: Vec<Tally>,
    pub computed_at: Timestamp,
}

impl CandidateStatistics {
    pub fn from_records(records: &[CandidateRecord], now: Timestamp) -> Self {
        let technologies = records
            .iter()
            .flat_map(|r| r.data.tech_stack.iter().map(String::as_str));
        let positions = records.iter().filter_map(|r| r.data.position.as_deref());
        let years: Vec<u32> = records.iter().filter_map(|r| r.data.experience).collect();

        let average_experience = if years.is_empty() {
            0.0
        } else {
            years.iter().map(|y| f64::from(*y)).sum::<f64>() / years.len() as f64
        };

        Self {
            total_candidates: records.len(),
            popular_technologies: most_common(technologies, TOP_TECHNOLOGIES),
            average_experience,
            popular_positions: most_common(positions, TOP_POSITIONS),
            computed_at: now,
        }
    }
}

/// Counts values, then keeps the `limit` most frequent. Ties keep first-seen order.
fn most_common<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    for value in values {
        match tallies.iter_mut().find(|t| t.value == value) {
            Some(tally) => tally.count += 1,
            None => tallies.push(Tally {
                value: value.to_string(),
                count: 1,
            }),
        }
    }
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(limit);
    tallies
}
