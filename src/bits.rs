//! Bit vector primitives.
//!
//! Every function here treats a byte slice as an unbounded little-endian bit
//! string: bit `0` is the least-significant bit of byte `0`, bit `8` the
//! least-significant bit of byte `1`, and so on. Positions are absolute, and no
//! function touches bits outside `[start, start + len)`.
//!
//! Callers are responsible for staying inside the slice. Elements are at most
//! [`MAX_ELEMENT_BYTES`](crate::MAX_ELEMENT_BYTES) long, so every range used by
//! the converters is known to fit before it is touched.

//	Indexing is bounded by the element sizes validated up front, and the bit
//	arithmetic is all on positions within those elements.
#![allow(
	clippy::indexing_slicing,
	clippy::arithmetic_side_effects,
	reason = "Ranges are validated by the callers"
)]



//		Modules																											

#[cfg(test)]
#[path = "tests/bits.rs"]
mod tests;



//		Packages																										

use crate::descriptor::ByteOrder;



//		Enums																											

//		Direction																
/// The end of a bit range from which [`find()`] starts scanning.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
	/// Scan upwards from the least-significant bit.
	Lsb,
	
	/// Scan downwards from the most-significant bit.
	Msb,
}



//		Functions																										

//		bit																		
/// Reads a single bit.
#[must_use]
pub fn bit(buf: &[u8], pos: usize) -> bool {
	(buf[pos / 8] >> (pos % 8)) & 1 == 1
}

//		get																		
/// Reads `len` bits starting at `start` as an unsigned integer.
///
/// # Panics
///
/// Panics in debug builds if `len` exceeds 64.
///
#[must_use]
pub fn get(buf: &[u8], start: usize, len: usize) -> u64 {
	debug_assert!(len <= 64, "Cannot read more than 64 bits at once");
	let mut value = 0_u64;
	let mut done  = 0;
	while done < len {
		let pos   = start + done;
		let shift = pos % 8;
		let take  = (8 - shift).min(len - done);
		let chunk = (u64::from(buf[pos / 8]) >> shift) & ((1_u64 << take) - 1);
		value    |= chunk << done;
		done     += take;
	}
	value
}

//		set																		
/// Sets or clears every bit in the range.
pub fn set(buf: &mut [u8], start: usize, len: usize, value: bool) {
	let mut done = 0;
	while done < len {
		let pos   = start + done;
		let shift = pos % 8;
		let take  = (8 - shift).min(len - done);
		let mask  = byte_mask(shift, take);
		if value {
			buf[pos / 8] |= mask;
		} else {
			buf[pos / 8] &= !mask;
		}
		done += take;
	}
}

//		set_u64																	
/// Writes the low `len` bits of `value` into the range.
///
/// # Panics
///
/// Panics in debug builds if `len` exceeds 64.
///
pub fn set_u64(buf: &mut [u8], start: usize, len: usize, value: u64) {
	debug_assert!(len <= 64, "Cannot write more than 64 bits at once");
	let mut done = 0;
	while done < len {
		let pos   = start + done;
		let shift = pos % 8;
		let take  = (8 - shift).min(len - done);
		let mask  = byte_mask(shift, take);
		#[expect(clippy::cast_possible_truncation, reason = "Masked to at most 8 bits")]
		let chunk = ((value >> done) & ((1_u64 << take) - 1)) as u8;
		buf[pos / 8] = (buf[pos / 8] & !mask) | (chunk << shift);
		done += take;
	}
}

//		copy																	
/// Copies `len` bits from one buffer to another.
pub fn copy(dst: &mut [u8], dst_start: usize, src: &[u8], src_start: usize, len: usize) {
	let mut done = 0;
	while done < len {
		let n = (len - done).min(64);
		set_u64(dst, dst_start + done, n, get(src, src_start + done, n));
		done += n;
	}
}

//		copy_within																
/// Copies `len` bits between two ranges of the same buffer, which may overlap.
pub fn copy_within(buf: &mut [u8], dst_start: usize, src_start: usize, len: usize) {
	if dst_start <= src_start {
		let mut done = 0;
		while done < len {
			let n = (len - done).min(64);
			let v = get(buf, src_start + done, n);
			set_u64(buf, dst_start + done, n, v);
			done += n;
		}
	} else {
		let mut left = len;
		while left > 0 {
			let n = left.min(64);
			left -= n;
			let v = get(buf, src_start + left, n);
			set_u64(buf, dst_start + left, n, v);
		}
	}
}

//		find																	
/// Finds the first bit equal to `value`, scanning the range from the given
/// end.
///
/// Returns the absolute bit position, or [`None`] if every bit in the range
/// differs from `value`. Searching for a set bit from the
/// [`Msb`](Direction::Msb) end gives the position of the highest set bit;
/// [`None`] then means the range is zero.
///
#[must_use]
pub fn find(buf: &[u8], start: usize, len: usize, direction: Direction, value: bool) -> Option<usize> {
	let skip = if value { 0x00 } else { 0xFF };
	match direction {
		Direction::Lsb => {
			let end     = start + len;
			let mut pos = start;
			while pos < end {
				if pos % 8 == 0 && end - pos >= 8 && buf[pos / 8] == skip {
					pos += 8;
					continue;
				}
				if bit(buf, pos) == value {
					return Some(pos);
				}
				pos += 1;
			}
		},
		Direction::Msb => {
			let mut end = start + len;
			while end > start {
				if end % 8 == 0 && end - start >= 8 && buf[end / 8 - 1] == skip {
					end -= 8;
					continue;
				}
				end -= 1;
				if bit(buf, end) == value {
					return Some(end);
				}
			}
		},
	}
	None
}

//		shift																	
/// Shifts the bits of a range, filling vacated positions with zero.
///
/// A positive `amount` shifts towards the most-significant end, discarding the
/// bits that move past the top of the range. A negative `amount` shifts
/// towards the least-significant end. Sign is never extended.
///
pub fn shift(buf: &mut [u8], amount: isize, start: usize, len: usize) {
	let n = amount.unsigned_abs();
	if n == 0 || len == 0 {
		return;
	}
	if n >= len {
		set(buf, start, len, false);
		return;
	}
	if amount > 0 {
		copy_within(buf, start + n, start, len - n);
		set(buf, start, n, false);
	} else {
		copy_within(buf, start, start + n, len - n);
		set(buf, start + len - n, n, false);
	}
}

//		increment																
/// Adds one to the range as an unsigned integer.
///
/// Returns `true` if the addition carried out of the top of the range, in
/// which case the range wraps to zero.
///
pub fn increment(buf: &mut [u8], start: usize, len: usize) -> bool {
	match find(buf, start, len, Direction::Lsb, false) {
		None      => {
			set(buf, start, len, false);
			true
		},
		Some(pos) => {
			set(buf, start, pos - start, false);
			set(buf, pos, 1, true);
			false
		},
	}
}

//		decrement																
/// Subtracts one from the range as an unsigned integer.
///
/// Returns `true` if the subtraction borrowed from beyond the top of the
/// range, in which case the range wraps to all ones.
///
pub fn decrement(buf: &mut [u8], start: usize, len: usize) -> bool {
	match find(buf, start, len, Direction::Lsb, true) {
		None      => {
			set(buf, start, len, true);
			true
		},
		Some(pos) => {
			set(buf, start, pos - start, true);
			set(buf, pos, 1, false);
			false
		},
	}
}

//		negate																	
/// Inverts every bit in the range.
pub fn negate(buf: &mut [u8], start: usize, len: usize) {
	let mut done = 0;
	while done < len {
		let pos   = start + done;
		let shift = pos % 8;
		let take  = (8 - shift).min(len - done);
		buf[pos / 8] ^= byte_mask(shift, take);
		done += take;
	}
}

//		reorder																	
/// Converts an element between the given byte order and little-endian, in
/// place.
///
/// The transformation is its own inverse, so the same call normalizes a source
/// element and restores a destination element. VAX order swaps 16-bit words
/// around the middle of the element four bytes at a time, keeping the bytes
/// within each word. It is only defined for sizes that are a multiple of four.
///
pub fn reorder(buf: &mut [u8], order: ByteOrder) {
	match order {
		ByteOrder::LittleEndian => {},
		ByteOrder::BigEndian    => buf.reverse(),
		ByteOrder::VaxOrdered   => {
			let n = buf.len();
			debug_assert!(n % 4 == 0, "VAX elements are a whole number of 32-bit units");
			let mut i = 0;
			while i + 1 < n {
				buf.swap(i,     n - 2 - i);
				buf.swap(i + 1, n - 1 - i);
				i += 4;
			}
		},
	}
}

//		reverse_byte_order														
/// Writes a copy of `src` into `dst` with [`reorder()`] applied.
///
/// # Panics
///
/// Panics if the two slices differ in length.
///
pub fn reverse_byte_order(dst: &mut [u8], src: &[u8], order: ByteOrder) {
	dst.copy_from_slice(src);
	reorder(dst, order);
}

//		byte_mask																
/// Mask of `take` bits starting at bit `shift` of a byte.
#[expect(clippy::cast_possible_truncation, reason = "Shift plus take never exceeds 8")]
const fn byte_mask(shift: usize, take: usize) -> u8 {
	(((1_u16 << take) - 1) << shift) as u8
}
