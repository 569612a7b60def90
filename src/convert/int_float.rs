//! Integer to float conversion.



//		Packages																										

use super::{Fields, WORK_BYTES, i64_from_usize, integer_bits};
use crate::{
	bits::{self, Direction},
	descriptor::AtomicType,
	errors::ConversionError,
	except::Exceptions,
	walker::Outcome,
};



//		Functions																										

//		convert																	
/// Converts one little-endian integer element to a float.
///
/// Negative values are turned into their magnitude first, so the most negative
/// value of any width converts exactly when the destination has room for it.
/// Magnitudes wider than the destination significand are rounded to nearest,
/// ties to even, and anything beyond the destination exponent range becomes
/// infinity.
///
/// # Errors
///
/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
///
pub(super) fn convert(
	src:        &AtomicType,
	dst:        &Fields,
	s:          &[u8],
	d:          &mut [u8],
	exceptions: &mut Exceptions<'_, '_>,
) -> Result<Outcome, ConversionError> {
	let (offset, precision) = integer_bits(src);
	let mut work            = [0_u8; WORK_BYTES];
	bits::copy(&mut work, 0, s, offset, precision);
	
	let sign = src.is_signed() && bits::bit(&work, precision - 1);
	if sign {
		bits::negate(&mut work, 0, precision);
		bits::increment(&mut work, 0, precision);
	}
	
	let Some(msb) = bits::find(&work, 0, precision, Direction::Msb, true) else {
		dst.write_zero(d, false);
		return Ok(Outcome::Converted);
	};
	dst.encode(d, sign, &mut work, msb, i64_from_usize(msb), exceptions)
}
