use crate::{DESCRIPTOR_LENGTH,ORIENTATION_BINS,SPATIAL_BINS};

/// Re-indexes a descriptor computed on the transposed image.
///
/// The vertical spatial bin is mirrored (`j -> 3 - j`) and inside each spatial bin the
/// orientation bins are reversed around bin zero (`0 -> 0`, `t -> 8 - t`).
pub fn transpose_descriptor<T: Copy>(src: &[T; DESCRIPTOR_LENGTH]) -> [T; DESCRIPTOR_LENGTH] {
    let mut dst = *src;

    for j in 0..SPATIAL_BINS {
        let jp = SPATIAL_BINS - 1 - j;
        for i in 0..SPATIAL_BINS {
            let o = ORIENTATION_BINS*i + SPATIAL_BINS*ORIENTATION_BINS*j;
            let op = ORIENTATION_BINS*i + SPATIAL_BINS*ORIENTATION_BINS*jp;
            dst[op] = src[o];
            for t in 1..ORIENTATION_BINS {
                dst[ORIENTATION_BINS - t + op] = src[t + o];
            }
        }
    }

    dst
}

/// Position that entry `index` of the source occupies after `transpose_descriptor`
pub fn transposed_index(index: usize) -> usize {
    let t = index % ORIENTATION_BINS;
    let i = (index / ORIENTATION_BINS) % SPATIAL_BINS;
    let j = index / (SPATIAL_BINS*ORIENTATION_BINS);
    let jp = SPATIAL_BINS - 1 - j;
    let tp = (ORIENTATION_BINS - t) % ORIENTATION_BINS;
    tp + ORIENTATION_BINS*i + SPATIAL_BINS*ORIENTATION_BINS*jp
}
