//! Default value functions for serde deserialization.

pub fn cell_size() -> u32 {
    25
}

pub fn front_point_delta() -> f64 {
    10.0
}

pub fn fallback_radius() -> u32 {
    20
}

pub fn min_improvement() -> u64 {
    1
}

pub fn max_iterations() -> usize {
    1000
}

pub fn simplify_epsilon() -> f64 {
    2.0
}

pub fn min_contour_points() -> usize {
    4
}

pub fn min_edge_length() -> f64 {
    1.0
}

pub fn nudge_epsilon() -> f64 {
    1.0
}
