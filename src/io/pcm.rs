/*
PCM Conversion
==============

The renderer hands back unclamped f32. Anything that needs integer PCM has
two ways to get there:

  hard clamp   clamp to [-1, 1], scale by i16::MAX. Overs flatten into a
               square edge.

  soft clip    y = x / (1 + |x|), round(y * 32767), saturate. Always below
               full scale, bends smoothly instead of flattening, but also
               squeezes quiet material (0.5 → 0.333).

    out
     1 ┤          _____________ hard clamp
       │      ___/......------- soft clip
       │    ./
     0 ┼───/─────────────────→ in
           0     1     2     3
*/

/// `x / (1 + |x|)`: maps any finite input into (-1, 1).
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    x / (1.0 + x.abs())
}

/// Soft-clip then quantize to 16-bit.
pub fn soft_clip_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&x| {
            let v = (soft_clip(x) * 32_767.0).round() as i32;
            v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
        })
        .collect()
}

/// Clamp to [-1, 1] and quantize to 16-bit.
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}
