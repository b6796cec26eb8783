//! Radius selection for an accepted center.
//!
//! Distances from the center to every edge pixel are binned per integer radius.
//! The chosen radius maximizes circumference coverage: support in a 3-bin window
//! divided by the radius, so a complete small ring is not beaten by a scattered
//! large one.

use super::accumulator::EdgePoint;

/// Radius estimate with the number of edge pixels supporting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RadiusEstimate {
    pub radius: u32,
    pub support: u32,
}

pub(crate) fn estimate_radius(
    center: (u32, u32),
    points: &[EdgePoint],
    min_radius: u32,
    max_radius: u32,
    threshold: u32,
) -> Option<RadiusEstimate> {
    if max_radius < min_radius {
        return None;
    }
    let n_bins = (max_radius - min_radius + 1) as usize;
    let mut counts = vec![0u32; n_bins];
    let mut sums = vec![0.0f64; n_bins];
    let cx = center.0 as f64;
    let cy = center.1 as f64;
    let lo = min_radius as f64 - 0.5;
    let hi = max_radius as f64 + 0.5;

    for p in points {
        let dx = p.x as f64 - cx;
        let dy = p.y as f64 - cy;
        let d = (dx * dx + dy * dy).sqrt();
        if d < lo || d >= hi {
            continue;
        }
        let bin = (d.round() as u32).clamp(min_radius, max_radius) - min_radius;
        counts[bin as usize] += 1;
        sums[bin as usize] += d;
    }

    let mut best: Option<(f64, usize)> = None;
    for i in 0..n_bins {
        let window = i.saturating_sub(1)..(i + 2).min(n_bins);
        let support: u32 = counts[window].iter().sum();
        if support <= threshold {
            continue;
        }
        let score = support as f64 / (min_radius as usize + i) as f64;
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, i));
        }
    }

    let (_, i) = best?;
    let window = i.saturating_sub(1)..(i + 2).min(n_bins);
    let support: u32 = counts[window.clone()].iter().sum();
    let mean = sums[window].iter().sum::<f64>() / support as f64;
    Some(RadiusEstimate {
        radius: (mean.round() as u32).max(1),
        support,
    })
}
