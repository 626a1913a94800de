//! Contrast-limited adaptive histogram equalization over one 8-bit channel.
//!
//! Per-tile clipped histograms with the excess redistributed uniformly, then
//! bilinear blending between neighboring tile mappings so tile seams do not
//! show. Fully deterministic: same channel, same parameters, same output.

/// Equalize `channel` (row-major, `width * height` samples).
///
/// Tiles partition the image exactly; when the image is smaller than the
/// requested grid the grid collapses so every tile keeps at least one pixel.
pub(crate) fn equalize(
    channel: &[u8],
    width: usize,
    height: usize,
    clip_limit: f32,
    grid: (usize, usize),
) -> Vec<u8> {
    debug_assert_eq!(channel.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let gx = grid.0.clamp(1, width);
    let gy = grid.1.clamp(1, height);
    let x_bound = |t: usize| t * width / gx;
    let y_bound = |t: usize| t * height / gy;

    let mut luts = vec![[0u8; 256]; gx * gy];
    for ty in 0..gy {
        for tx in 0..gx {
            let (x0, x1) = (x_bound(tx), x_bound(tx + 1));
            let (y0, y1) = (y_bound(ty), y_bound(ty + 1));
            let area = ((x1 - x0) * (y1 - y0)) as u32;

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                let row = &channel[y * width..(y + 1) * width];
                for &v in &row[x0..x1] {
                    hist[v as usize] += 1;
                }
            }

            // Clip, then hand the excess back evenly across all bins
            let clip = ((clip_limit * area as f32 / 256.0) as u32).max(1);
            let mut excess = 0u32;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let bonus = excess / 256;
            let residual = (excess % 256) as usize;
            for (i, bin) in hist.iter_mut().enumerate() {
                *bin += bonus + u32::from(i < residual);
            }

            let lut = &mut luts[ty * gx + tx];
            let scale = 255.0 / area as f32;
            let mut cum = 0u32;
            for (i, &count) in hist.iter().enumerate() {
                cum += count;
                lut[i] = (cum as f32 * scale).round().min(255.0) as u8;
            }
        }
    }

    let cx: Vec<f32> = (0..gx)
        .map(|t| (x_bound(t) + x_bound(t + 1)) as f32 / 2.0)
        .collect();
    let cy: Vec<f32> = (0..gy)
        .map(|t| (y_bound(t) + y_bound(t + 1)) as f32 / 2.0)
        .collect();

    let mut out = vec![0u8; width * height];
    for y in 0..height {
        let (ty0, ty1, wy) = axis_blend(y as f32 + 0.5, &cy);
        for x in 0..width {
            let (tx0, tx1, wx) = axis_blend(x as f32 + 0.5, &cx);
            let v = channel[y * width + x] as usize;
            let m00 = luts[ty0 * gx + tx0][v] as f32;
            let m01 = luts[ty0 * gx + tx1][v] as f32;
            let m10 = luts[ty1 * gx + tx0][v] as f32;
            let m11 = luts[ty1 * gx + tx1][v] as f32;
            let top = m00 + (m01 - m00) * wx;
            let bottom = m10 + (m11 - m10) * wx;
            out[y * width + x] = (top + (bottom - top) * wy).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Neighboring tile indices along one axis plus the blend weight toward the
/// second tile. Positions outside the first/last tile centers clamp.
fn axis_blend(pos: f32, centers: &[f32]) -> (usize, usize, f32) {
    let last = centers.len() - 1;
    if pos <= centers[0] {
        return (0, 0, 0.0);
    }
    if pos >= centers[last] {
        return (last, last, 0.0);
    }
    let mut i = 0;
    while centers[i + 1] < pos {
        i += 1;
    }
    let span = centers[i + 1] - centers[i];
    (i, i + 1, (pos - centers[i]) / span)
}
