//! Integer to integer conversion.
//!
//! Values are moved bit-for-bit between the significant ranges of the two
//! elements. Widening extends the sign of negative signed sources; narrowing
//! checks that every dropped bit is a copy of the sign (or zero, for unsigned
//! sources) and saturates otherwise.



//		Packages																										

use super::{integer_bits, saturate};
use crate::{
	bits::{self, Direction},
	descriptor::AtomicType,
	errors::ConversionError,
	except::{ExceptionKind, Exceptions},
	walker::Outcome,
};



//		Functions																										

//		convert																	
/// Converts one little-endian integer element.
///
/// # Errors
///
/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
///
pub(super) fn convert(
	src:        &AtomicType,
	dst:        &AtomicType,
	s:          &[u8],
	d:          &mut [u8],
	exceptions: &mut Exceptions<'_, '_>,
) -> Result<Outcome, ConversionError> {
	let (s_off, s_prec) = integer_bits(src);
	let (d_off, d_prec) = integer_bits(dst);
	bits::set(d, d_off, d_prec, false);
	
	//	Position of the highest set bit, relative to the start of the value.
	let Some(first) = bits::find(s, s_off, s_prec, Direction::Msb, true).map(|pos| pos - s_off) else {
		return Ok(Outcome::Converted);
	};
	let negative = src.is_signed() && first + 1 == s_prec;
	
	if negative {
		if !dst.is_signed() {
			return saturate(dst, d, ExceptionKind::RangeLow, exceptions);
		}
		//	A negative value fits if every bit from the destination sign
		//	upwards is set, so the highest clear bit must sit below it.
		let clear = bits::find(s, s_off, s_prec - 1, Direction::Msb, false).map(|pos| pos - s_off);
		if clear.is_some_and(|clear| clear + 1 >= d_prec) {
			return saturate(dst, d, ExceptionKind::RangeLow, exceptions);
		}
		let kept = s_prec.min(d_prec);
		bits::copy(d, d_off, s, s_off, kept);
		bits::set(d, d_off + kept, d_prec - kept, true);
		return Ok(Outcome::Converted);
	}
	
	let room = if dst.is_signed() { d_prec - 1 } else { d_prec };
	if first >= room {
		return saturate(dst, d, ExceptionKind::RangeHigh, exceptions);
	}
	bits::copy(d, d_off, s, s_off, first + 1);
	Ok(Outcome::Converted)
}
