//! Raster planning service
//!
//! The pure parts of re-encoding: the downscale-only fit and the bounded
//! quality search. Both are independent of any concrete codec.

use bytes::Bytes;
use std::future::Future;

/// Computes output dimensions that fit within `max_dimension`
///
/// Never scales up. When scaling, the longer side becomes exactly
/// `max_dimension` and the shorter side is `floor(short * max / long)`,
/// clamped to at least 1.
pub fn fit_within(width: u32, height: u32, max_dimension: Option<u32>) -> (u32, u32) {
    let Some(max_dimension) = max_dimension.filter(|m| *m > 0) else {
        return (width, height);
    };
    let longer = width.max(height);
    if longer <= max_dimension {
        return (width, height);
    }

    let scale = |side: u32| -> u32 {
        let scaled = side as u64 * max_dimension as u64 / longer as u64;
        (scaled as u32).max(1)
    };
    (scale(width), scale(height))
}

/// Interval and budget of a quality search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityBounds {
    pub floor: f32,
    pub ceiling: f32,
    pub iterations: u32,
}

impl Default for QualityBounds {
    fn default() -> Self {
        Self {
            floor: 0.40,
            ceiling: 0.92,
            iterations: 7,
        }
    }
}

/// Outcome of a quality search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The selected encoding
    pub bytes: Bytes,
    /// Quality the selected encoding was produced at
    pub quality: f32,
    /// Whether the selected encoding is within the ceiling
    pub within_ceiling: bool,
    /// Number of encodes performed, including the fallback
    pub encodes: u32,
}

/// Binary-searches the encoder quality for the largest output `<= ceiling`
///
/// Each iteration encodes at the midpoint of the current interval. A result
/// within the ceiling becomes the best so far and raises the lower bound;
/// otherwise the upper bound drops. If no iteration fits, the encoding at
/// the quality floor is returned as a best effort.
pub async fn search_quality<F, Fut, E>(
    ceiling: u64,
    bounds: QualityBounds,
    mut encode: F,
) -> Result<SearchOutcome, E>
where
    F: FnMut(f32) -> Fut,
    Fut: Future<Output = Result<Bytes, E>>,
{
    let mut lo = bounds.floor;
    let mut hi = bounds.ceiling;
    let mut best: Option<(Bytes, f32)> = None;
    let mut encodes = 0;

    for iteration in 0..bounds.iterations {
        let mid = (lo + hi) / 2.0;
        let candidate = encode(mid).await?;
        encodes += 1;

        let fits = candidate.len() as u64 <= ceiling;
        tracing::debug!(
            iteration,
            quality = mid,
            size = candidate.len(),
            ceiling,
            fits,
            "quality search step"
        );

        if fits {
            best = Some((candidate, mid));
            lo = mid;
        } else {
            hi = mid;
        }
    }

    match best {
        Some((bytes, quality)) => Ok(SearchOutcome {
            bytes,
            quality,
            within_ceiling: true,
            encodes,
        }),
        None => {
            let bytes = encode(bounds.floor).await?;
            encodes += 1;
            let within_ceiling = bytes.len() as u64 <= ceiling;
            Ok(SearchOutcome {
                bytes,
                quality: bounds.floor,
                within_ceiling,
                encodes,
            })
        }
    }
}
