//! Fast non-dominated sorting and crowding distance.
//!
//! # Algorithm
//!
//! For every point `p`, count how many points dominate it (`n_p`) and
//! record the points it dominates (`S_p`). Points with `n_p = 0` form the
//! first front; removing a front decrements the counts of everything it
//! dominates, and the points reaching zero form the next front.
//!
//! # Complexity
//! O(M·N²) for M objectives and N points.
//!
//! # Reference
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II", §III-A/B

use crate::ga::FitnessVector;

/// Partitions `points` into Pareto fronts.
///
/// Returns indices into `points`; `fronts[0]` is the non-dominated set.
/// Indices within a front are in ascending order.
pub fn non_dominated_sort(points: &[FitnessVector]) -> Vec<Vec<usize>> {
    let n = points.len();
    let mut dominated_by_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            if points[i].dominates(&points[j]) {
                dominates[i].push(j);
                dominated_by_count[j] += 1;
            } else if points[j].dominates(&points[i]) {
                dominates[j].push(i);
                dominated_by_count[i] += 1;
            }
        }
    }

    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| dominated_by_count[i] == 0).collect();

    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            for &q in &dominates[p] {
                dominated_by_count[q] -= 1;
                if dominated_by_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    fronts
}

/// Crowding distance of each member of one front.
///
/// `front` holds indices into `points`; the result is parallel to `front`.
/// Per objective, the lowest and highest members get `+∞`; interior
/// members accumulate `(next - prev) / (max - min)`. An objective with a
/// zero range adds nothing to interior members.
pub fn crowding_distance(points: &[FitnessVector], front: &[usize]) -> Vec<f64> {
    let len = front.len();
    let mut distance = vec![0.0; len];
    if len == 0 {
        return distance;
    }
    if len <= 2 {
        distance.fill(f64::INFINITY);
        return distance;
    }

    for objective in 0..2 {
        let value = |slot: usize| points[front[slot]].objectives()[objective];

        // Stable: equal values keep front order.
        let mut order: Vec<usize> = (0..len).collect();
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let first = order[0];
        let last = order[len - 1];
        distance[first] = f64::INFINITY;
        distance[last] = f64::INFINITY;

        let range = value(last) - value(first);
        if range <= 0.0 {
            continue;
        }

        for k in 1..len - 1 {
            let slot = order[k];
            distance[slot] += (value(order[k + 1]) - value(order[k - 1])) / range;
        }
    }

    distance
}
