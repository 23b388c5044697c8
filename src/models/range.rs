use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Closed interval of image numbers owned by one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRange {
    pub start: u32,
    pub end: u32,
}

impl GenerationRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, image_number: u32) -> bool {
        (self.start..=self.end).contains(&image_number)
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn numbers(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for GenerationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Splits `1..=total` into `parts` contiguous ranges.
///
/// Earlier ranges take the smaller share, so `partition(49, 2)` yields
/// `1-24` and `25-49`.
pub fn partition(total: u32, parts: u32) -> Result<Vec<GenerationRange>, GenerationError> {
    if parts < 1 || total < parts {
        return Err(GenerationError::InvalidPartition { total, parts });
    }

    let base = total / parts;
    let larger_from = parts - total % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start: u32 = 1;
    for index in 0..parts {
        let size = if index < larger_from { base } else { base + 1 };
        let end = start + (size - 1);
        ranges.push(GenerationRange::new(start, end));
        if index + 1 < parts {
            start = end + 1;
        }
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_partition_midpoint_split() {
        let ranges = partition(49, 2).unwrap();
        assert_eq!(
            ranges,
            vec![GenerationRange::new(1, 24), GenerationRange::new(25, 49)]
        );
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        for parts in 1..=7 {
            let ranges = partition(49, parts).unwrap();
            assert_eq!(ranges.len(), parts as usize);

            let mut seen = HashSet::new();
            for range in &ranges {
                for n in range.numbers() {
                    assert!(seen.insert(n), "{} covered twice with {} parts", n, parts);
                }
            }
            assert_eq!(seen, (1..=49).collect::<HashSet<u32>>());
        }
    }

    #[test]
    fn test_partition_rejects_bad_parameters() {
        assert!(matches!(
            partition(49, 0),
            Err(GenerationError::InvalidPartition { total: 49, parts: 0 })
        ));
        assert!(matches!(
            partition(3, 4),
            Err(GenerationError::InvalidPartition { .. })
        ));
        assert_eq!(partition(4, 4).unwrap().len(), 4);
    }

    #[test]
    fn test_range_helpers() {
        let range = GenerationRange::new(25, 49);
        assert_eq!(range.len(), 25);
        assert!(range.contains(25));
        assert!(range.contains(49));
        assert!(!range.contains(24));
        assert_eq!(range.to_string(), "25-49");
        assert!(GenerationRange::new(5, 4).is_empty());
    }

    #[test]
    fn test_partition_near_u32_max() {
        let ranges = partition(u32::MAX, 1).unwrap();
        assert_eq!(ranges, vec![GenerationRange::new(1, u32::MAX)]);
        assert_eq!(ranges[0].len(), u32::MAX as usize);

        let ranges = partition(u32::MAX, 2).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].end + 1, ranges[1].start);
        assert_eq!(ranges[1].end, u32::MAX);
    }

    #[test]
    fn test_len_of_full_u32_span() {
        let range = GenerationRange::new(0, u32::MAX);
        assert_eq!(range.len(), u32::MAX as usize + 1);
        assert_eq!(GenerationRange::new(7, 7).len(), 1);
    }
}
