// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Randomized checks of tracing and classification on occupancy masks

use dotplate::contour::{classify_contours, trace_contours, OccupancyMask};
use dotplate::utils::math::signed_area;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_mask(rng: &mut StdRng, width: usize, height: usize, fill: f64) -> OccupancyMask {
    let cells: Vec<bool> = (0..width * height).map(|_| rng.gen_bool(fill)).collect();
    OccupancyMask::from_bools(width, height, &cells)
}

fn boundary_edge_count(mask: &OccupancyMask) -> usize {
    let mut count = 0;
    for y in 0..mask.height() as i64 {
        for x in 0..mask.width() as i64 {
            if !mask.is_occupied(x, y) {
                continue;
            }
            count += [(0, -1), (1, 0), (0, 1), (-1, 0)]
                .iter()
                .filter(|(dx, dy)| !mask.is_occupied(x + dx, y + dy))
                .count();
        }
    }
    count
}

#[test]
fn test_signed_areas_sum_to_occupied_cells() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let (w, h) = (rng.gen_range(1..24), rng.gen_range(1..24));
        let fill = rng.gen_range(0.2..0.9);
        let mask = random_mask(&mut rng, w, h, fill);
        let contours = trace_contours(&mask);

        let total: f64 = contours.iter().map(|c| signed_area(&c.to_f64())).sum();
        assert_eq!(total, mask.occupied_count() as f64);
    }
}

#[test]
fn test_every_boundary_edge_used_once() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let (w, h) = (rng.gen_range(1..24), rng.gen_range(1..24));
        let mask = random_mask(&mut rng, w, h, 0.5);
        let contours = trace_contours(&mask);

        let traced: usize = contours.iter().map(|c| c.len()).sum();
        assert_eq!(traced, boundary_edge_count(&mask));
        assert!(contours.iter().all(|c| c.is_closed()));
    }
}

#[test]
fn test_classified_area_is_preserved() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..50 {
        let (w, h) = (rng.gen_range(2..20), rng.gen_range(2..20));
        let mask = random_mask(&mut rng, w, h, 0.6);
        let contours = trace_contours(&mask);
        let count = contours.len();
        let shapes = classify_contours(contours);

        let placed: usize = shapes.iter().map(|s| 1 + s.holes.len()).sum();
        assert_eq!(placed, count);

        let net: f64 = shapes.iter().map(|s| s.net_area()).sum();
        assert_eq!(net, mask.occupied_count() as f64);
    }
}

#[test]
fn test_rectangle_position_does_not_change_sign() {
    let (w, h) = (12, 9);
    for (x0, y0, rw, rh) in [(0, 0, 3, 2), (5, 4, 4, 3), (9, 6, 3, 3), (2, 7, 1, 1)] {
        let cells: Vec<bool> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                x >= x0 && x < x0 + rw && y >= y0 && y < y0 + rh
            })
            .collect();
        let mask = OccupancyMask::from_bools(w, h, &cells);
        let contours = trace_contours(&mask);

        assert_eq!(contours.len(), 1);
        assert_eq!(signed_area(&contours[0].to_f64()), (rw * rh) as f64);
    }
}
