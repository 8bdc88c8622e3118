// SIMD kernels for feature-vector comparisons
// Feature vectors are short (tens to a few hundred columns) and mostly sparse
// multi-hot bits, so only dot product and norm are vectorized.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

// Below these widths the scalar loop wins over the dispatch + horizontal sum
#[cfg(target_arch = "x86_64")]
const MIN_DIM_SIZE_AVX: usize = 32;

#[cfg(target_arch = "aarch64")]
const MIN_DIM_SIZE_NEON: usize = 16;

/// Dot product of two equal-length slices.
/// Returns 0.0 when the lengths differ.
#[inline]
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("fma")
            && a.len() >= MIN_DIM_SIZE_AVX
        {
            return unsafe { dot_product_avx2(a, b) };
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") && a.len() >= MIN_DIM_SIZE_NEON {
            return unsafe { dot_product_neon(a, b) };
        }
    }

    dot_product_scalar(a, b)
}

/// AVX2 dot product: one FMA accumulator over 8-lane chunks, scalar tail
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
unsafe fn dot_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    let body = a.len() - a.len() % 8;
    let mut acc = _mm256_setzero_ps();
    for off in (0..body).step_by(8) {
        let xa = _mm256_loadu_ps(a.as_ptr().add(off));
        let xb = _mm256_loadu_ps(b.as_ptr().add(off));
        acc = _mm256_fmadd_ps(xa, xb, acc);
    }

    let mut lanes = [0.0f32; 8];
    _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
    lanes.iter().sum::<f32>() + dot_product_scalar(&a[body..], &b[body..])
}

/// NEON dot product for ARM targets
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn dot_product_neon(a: &[f32], b: &[f32]) -> f32 {
    let dim = a.len();
    let mut i = 0;

    let mut acc_lo = vdupq_n_f32(0.0);
    let mut acc_hi = vdupq_n_f32(0.0);

    while i + 7 < dim {
        let xa = vld1q_f32(a.as_ptr().add(i));
        let xb = vld1q_f32(b.as_ptr().add(i));
        let ya = vld1q_f32(a.as_ptr().add(i + 4));
        let yb = vld1q_f32(b.as_ptr().add(i + 4));

        acc_lo = vfmaq_f32(acc_lo, xa, xb);
        acc_hi = vfmaq_f32(acc_hi, ya, yb);

        i += 8;
    }

    let mut dot = vaddvq_f32(vaddq_f32(acc_lo, acc_hi));
    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }

    dot
}

/// Scalar fallback with two independent accumulators
#[inline]
fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    let mut even = 0.0f32;
    let mut odd = 0.0f32;

    let chunks_a = a.chunks_exact(4);
    let tail_a = chunks_a.remainder();
    let chunks_b = b.chunks_exact(4);
    let tail_b = chunks_b.remainder();

    for (x, y) in chunks_a.zip(chunks_b) {
        even += x[0] * y[0] + x[2] * y[2];
        odd += x[1] * y[1] + x[3] * y[3];
    }

    for (x, y) in tail_a.iter().zip(tail_b) {
        even += x * y;
    }

    even + odd
}

/// Squared Euclidean length
#[inline]
pub fn norm_squared_simd(v: &[f32]) -> f32 {
    dot_product_simd(v, v)
}

/// Euclidean length
#[inline]
pub fn norm_simd(v: &[f32]) -> f32 {
    norm_squared_simd(v).sqrt()
}
