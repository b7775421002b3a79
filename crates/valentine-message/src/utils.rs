use crate::{Error, Result};
use rand::Rng;

/// Removes repeated elements, keeping the first occurrence of each.
pub fn dedupe<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len().min(8));
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Uniform integer in `min..=max`.
pub fn random_in_range_inclusive<R: Rng + ?Sized>(
    rng: &mut R,
    min: usize,
    max: usize,
) -> Result<usize> {
    if min > max {
        return Err(Error::Construction(format!(
            "{} is not smaller than {}",
            min, max
        )));
    }
    Ok(rng.gen_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        assert_eq!(dedupe(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert_eq!(dedupe(Vec::<u8>::new()), Vec::<u8>::new());
    }

    #[test]
    fn test_random_in_range_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let n = random_in_range_inclusive(&mut rng, 2, 5).unwrap();
            assert!((2..=5).contains(&n));
        }
        assert_eq!(random_in_range_inclusive(&mut rng, 4, 4).unwrap(), 4);
        assert!(random_in_range_inclusive(&mut rng, 5, 4).is_err());
    }
}
