use num_traits::PrimInt;

pub mod bit_path;

/// Number of bits in `T`.
#[inline]
pub(crate) fn uint_width<T: PrimInt>() -> usize {
    T::zero().count_zeros() as usize
}

/// Bit `index` of `value`, counting from the most significant bit.
#[inline]
pub(crate) fn uint_bit_at<T: PrimInt>(value: T, index: usize) -> bool {
    let width = uint_width::<T>();
    debug_assert!(index < width);
    !(value & (T::one() << (width - 1 - index))).is_zero()
}

/// Mask keeping the `len` most significant bits of `T`.
#[inline]
pub(crate) fn uint_prefix_mask<T: PrimInt>(len: usize) -> T {
    let width = uint_width::<T>();
    debug_assert!(len <= width);
    if len == 0 {
        T::zero()
    } else {
        T::max_value() << (width - len)
    }
}
