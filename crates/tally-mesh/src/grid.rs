/// Lazy lexicographic walk over `{x : 0 <= x[i] <= bounds[i]}`.
///
/// The last coordinate varies fastest. Cloning or rebuilding a mesh restarts the
/// walk and reproduces the same sequence.
#[derive(Debug, Clone)]
pub struct Mesh {
    bounds: Vec<u64>,
    next: Option<Vec<u64>>,
    remaining: u128,
}

impl Mesh {
    fn advance(&mut self, current: &[u64]) -> Option<Vec<u64>> {
        let mut point = current.to_vec();
        for idx in (0..point.len()).rev() {
            if point[idx] < self.bounds[idx] {
                point[idx] += 1;
                return Some(point);
            }
            point[idx] = 0;
        }
        None
    }
}

impl Iterator for Mesh {
    type Item = Vec<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.advance(&current);
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Number of points in `mesh(bounds)`, saturating at `u128::MAX`.
pub fn mesh_size(bounds: &[u64]) -> u128 {
    bounds
        .iter()
        .fold(1u128, |acc, b| acc.saturating_mul(*b as u128 + 1))
}

/// All integer tuples `x` with `0 <= x[i] <= bounds[i]` in lexicographic order.
/// An empty `bounds` yields the single empty tuple.
pub fn mesh(bounds: &[u64]) -> Mesh {
    Mesh {
        bounds: bounds.to_vec(),
        next: Some(vec![0; bounds.len()]),
        remaining: mesh_size(bounds),
    }
}

/// 0/1 tuples of length `n` with exactly `weight` ones, filtered from
/// `mesh(ones(n))`.
pub fn masks(n: usize, weight: u64) -> impl Iterator<Item = Vec<u64>> {
    fixed_sum_mesh(&vec![1; n], weight)
}

/// Points of `mesh(bounds)` whose coordinates sum to `target_sum`.
pub fn fixed_sum_mesh(bounds: &[u64], target_sum: u64) -> impl Iterator<Item = Vec<u64>> {
    mesh(bounds).filter(move |point| point.iter().sum::<u64>() == target_sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_order() {
        let points: Vec<_> = mesh(&[1, 2]).collect();
        assert_eq!(
            points,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn degenerate_meshes() {
        assert_eq!(mesh(&[]).collect::<Vec<_>>(), vec![Vec::<u64>::new()]);
        assert_eq!(mesh(&[0, 0]).count(), 1);
        assert_eq!(mesh(&[3]).size_hint(), (4, Some(4)));
    }

    #[test]
    fn masks_keep_mesh_order() {
        let picked: Vec<_> = masks(3, 2).collect();
        assert_eq!(picked, vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]);
        assert_eq!(masks(0, 0).count(), 1);
        assert_eq!(masks(2, 3).count(), 0);
    }
}
