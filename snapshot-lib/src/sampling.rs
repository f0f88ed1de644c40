use crate::BlockNumber;

/// Number of blocks sampled across the range when nothing else is asked for.
pub const DEFAULT_SAMPLES: usize = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("end block {end} is lower than start block {start}")]
    InvalidRange {
        start: BlockNumber,
        end: BlockNumber,
    },

    #[error("at least one sample is required")]
    NoSamples,
}

/// Returns `samples` block numbers evenly spaced over `start..=end`.
///
/// Points are interpolated in floating point and truncated, so a range narrower
/// than the number of samples yields repeated block numbers. The first point is
/// always `start` and the last one always `end`.
pub fn sample_blocks(
    start: BlockNumber,
    end: BlockNumber,
    samples: usize,
) -> Result<Vec<BlockNumber>, Error> {
    if end < start {
        return Err(Error::InvalidRange { start, end });
    }
    match samples {
        0 => return Err(Error::NoSamples),
        1 => return Ok(vec![start]),
        _ => {}
    }

    let step = (end - start) as f64 / (samples - 1) as f64;
    let mut blocks = (0..samples)
        .map(|i| {
            let block = (start as f64 + i as f64 * step) as BlockNumber;
            // float rounding must not push a point out of the range
            block.clamp(start, end)
        })
        .collect::<Vec<_>>();
    if let Some(last) = blocks.last_mut() {
        *last = end;
    }
    Ok(blocks)
}
