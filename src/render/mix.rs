//! Additive placement of one hit into the window.

/*
Additive Mixing
===============

Each hit is ADDED into the window at its beat offset. Nothing is weighted or
renormalized: two hits that each peak at 1.0 can sum to 2.0.

    Window:  [ 0.0,  0.5,  0.5,  0.0,  0.0 ]
    Hit @1:        [ 1.0,  0.8, -0.5 ]
    Result:  [ 0.0,  1.5,  1.3, -0.5,  0.0 ]   ← exceeds ±1.0

Clipping Risk
-------------

The mixer never clamps. Values past ±1.0 survive into the finished buffer and
clip in whatever sink plays them. The renderer reports the final peak, and
the io module offers a soft-clip limiter for export; neither changes what the
mixer produced.

Boundary
--------

A hit that runs past the end of the window is cut off there:

    Window (len 5):  [ ., ., ., ., . ]
    Hit @3 (len 4):           [ a, b, c, d ]
    Added:                    [ a, b ]          c, d dropped, no wraparound
*/

/// Add `hit` into `window` starting at `offset`, dropping whatever runs past the end.
///
/// Returns the number of samples actually added.
#[inline]
pub fn mix_at(window: &mut [f32], offset: usize, hit: &[f32]) -> usize {
    let Some(target) = window.get_mut(offset..) else {
        return 0;
    };

    let n = target.len().min(hit.len());
    for (out, &sample) in target[..n].iter_mut().zip(&hit[..n]) {
        *out += sample;
    }
    n
}

/// Add the part of `hit` (placed at absolute `offset`) that falls inside the
/// block `[block_start, block_start + block.len())`.
#[inline]
pub fn mix_into_block(block: &mut [f32], block_start: usize, offset: usize, hit: &[f32]) -> usize {
    let block_end = block_start + block.len();
    let hit_end = offset + hit.len();
    if hit_end <= block_start || offset >= block_end {
        return 0;
    }

    let start = offset.max(block_start);
    let end = hit_end.min(block_end);
    let src = &hit[start - offset..end - offset];
    let dst = &mut block[start - block_start..end - block_start];

    for (out, &sample) in dst.iter_mut().zip(src) {
        *out += sample;
    }
    src.len()
}
