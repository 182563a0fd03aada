//! Content fingerprint of a floor layout.
//!
//! The hash covers dimensions, walls, fixed areas and the picking start/end
//! points. Rectangle lists are sorted before hashing, so reordering them
//! keeps the hash while any geometric change produces a new one. Cached
//! distances are keyed by this value and go stale by themselves.

use crate::core::{PixelPoint, Rect};

use super::Layout;

const DOMAIN: &[u8] = b"marga/layout/v1";

/// Hex-encoded blake3 fingerprint of the routing-relevant layout geometry
pub fn layout_hash(layout: &Layout) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN);
    put_f64(&mut hasher, layout.width);
    put_f64(&mut hasher, layout.height);
    put_rects(&mut hasher, b"walls", &layout.walls);
    put_rects(&mut hasher, b"fixed", &layout.fixed_areas);
    put_point(&mut hasher, layout.picking_start);
    match layout.picking_end {
        Some(end) => {
            hasher.update(&[1]);
            put_point(&mut hasher, end);
        }
        None => {
            hasher.update(&[0]);
        }
    }
    hasher.finalize().to_hex().to_string()
}

fn put_rects(hasher: &mut blake3::Hasher, tag: &[u8], rects: &[Rect]) {
    let mut sorted: Vec<&Rect> = rects.iter().collect();
    // Rectangles closer than a millipixel tie on `sort_key`; the exact bits
    // decide, so the order matches what gets hashed.
    sorted.sort_by_key(|r| (r.sort_key(), [r.x1, r.y1, r.x2, r.y2].map(canonical_bits)));
    hasher.update(tag);
    hasher.update(&(sorted.len() as u64).to_le_bytes());
    for r in sorted {
        for v in [r.x1, r.y1, r.x2, r.y2] {
            put_f64(hasher, v);
        }
    }
}

fn put_point(hasher: &mut blake3::Hasher, p: PixelPoint) {
    put_f64(hasher, p.x);
    put_f64(hasher, p.y);
}

fn put_f64(hasher: &mut blake3::Hasher, v: f64) {
    hasher.update(&canonical_bits(v).to_le_bytes());
}

/// Bit pattern with -0.0 folded into 0.0, so equal geometry hashes equally
fn canonical_bits(v: f64) -> u64 {
    (v + 0.0).to_bits()
}
