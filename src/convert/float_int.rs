//! Float to integer conversion.
//!
//! Fractions are truncated towards zero. Values outside the destination range
//! saturate, and so do infinities. NaN becomes zero.



//		Packages																										

use super::{Class, Fields, WORK_BITS, WORK_BYTES, i64_from_usize, integer_bits, isize_from_usize, saturate, usize_from};
use crate::{
	bits::{self, Direction},
	descriptor::AtomicType,
	errors::ConversionError,
	except::{ExceptionKind, Exceptions, Resolution},
	walker::Outcome,
};



//		Functions																										

//		convert																	
/// Converts one little-endian float element to an integer.
///
/// # Errors
///
/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
///
pub(super) fn convert(
	src:        &Fields,
	dst:        &AtomicType,
	s:          &[u8],
	d:          &mut [u8],
	exceptions: &mut Exceptions<'_, '_>,
) -> Result<Outcome, ConversionError> {
	let (offset, precision) = integer_bits(dst);
	bits::set(d, offset, precision, false);
	
	let sign = src.sign_of(s);
	match src.classify(s) {
		Class::Zero     => return Ok(Outcome::Converted),
		Class::Infinite => {
			let kind = if sign { ExceptionKind::RangeLow } else { ExceptionKind::RangeHigh };
			return saturate(dst, d, kind, exceptions);
		},
		Class::NaN      => {
			if exceptions.raise(ExceptionKind::NaN, d)? == Resolution::Handled {
				return Ok(Outcome::Handled);
			}
			bits::set(d, offset, precision, false);
			return Ok(Outcome::Converted);
		},
		Class::Finite   => {},
	}
	
	let mut work = [0_u8; WORK_BYTES];
	let Some((msb, exponent)) = src.decode(s, &mut work) else {
		return Ok(Outcome::Converted);
	};
	
	//	Nothing survives truncation.
	if exponent < 0 {
		if exceptions.raise(ExceptionKind::PrecisionLoss, d)? == Resolution::Handled {
			return Ok(Outcome::Handled);
		}
		bits::set(d, offset, precision, false);
		return Ok(Outcome::Converted);
	}
	
	if sign && !dst.is_signed() {
		return saturate(dst, d, ExceptionKind::RangeLow, exceptions);
	}
	let room = if dst.is_signed() { precision - 1 } else { precision };
	if exponent > i64_from_usize(room) || (exponent == i64_from_usize(room) && !sign) {
		let kind = if sign { ExceptionKind::RangeLow } else { ExceptionKind::RangeHigh };
		return saturate(dst, d, kind, exceptions);
	}
	
	//	Move the integer part down to bit zero. The highest set bit lands on
	//	`top`, which is at most `room`.
	let top       = usize_from(exponent);
	let truncated = msb > top && bits::find(&work, 0, msb - top, Direction::Lsb, true).is_some();
	bits::shift(&mut work, isize_from_usize(top) - isize_from_usize(msb), 0, WORK_BITS);
	
	//	Only the most negative value reaches the sign bit of a signed result.
	if sign && top == room && bits::find(&work, 0, top, Direction::Lsb, true).is_some() {
		return saturate(dst, d, ExceptionKind::RangeLow, exceptions);
	}
	
	if truncated && exceptions.raise(ExceptionKind::PrecisionLoss, d)? == Resolution::Handled {
		return Ok(Outcome::Handled);
	}
	
	if sign {
		bits::negate(&mut work, 0, precision);
		bits::increment(&mut work, 0, precision);
	}
	bits::copy(d, offset, &work, 0, precision);
	Ok(Outcome::Converted)
}
