//! Float to float conversion.



//		Packages																										

use super::{Class, Fields, WORK_BYTES};
use crate::{
	errors::ConversionError,
	except::{ExceptionKind, Exceptions, Resolution},
	walker::Outcome,
};



//		Functions																										

//		convert																	
/// Converts one little-endian float element between layouts.
///
/// Zeros keep their sign. Infinities and NaNs are reported to the handler and
/// by default carried across with their sign. Finite values are rebiased and
/// rounded once into the destination, which may produce a denormal, a signed
/// zero, or an infinity.
///
/// # Errors
///
/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
///
pub(super) fn convert(
	src:        &Fields,
	dst:        &Fields,
	s:          &[u8],
	d:          &mut [u8],
	exceptions: &mut Exceptions<'_, '_>,
) -> Result<Outcome, ConversionError> {
	let sign = src.sign_of(s);
	match src.classify(s) {
		Class::Zero     => {
			dst.write_zero(d, sign);
			Ok(Outcome::Converted)
		},
		Class::Infinite => {
			if exceptions.raise(ExceptionKind::Infinity { negative: sign }, d)? == Resolution::Handled {
				return Ok(Outcome::Handled);
			}
			dst.write_infinity(d, sign);
			Ok(Outcome::Converted)
		},
		Class::NaN      => {
			if exceptions.raise(ExceptionKind::NaN, d)? == Resolution::Handled {
				return Ok(Outcome::Handled);
			}
			dst.write_nan(d, sign);
			Ok(Outcome::Converted)
		},
		Class::Finite   => {
			let mut work = [0_u8; WORK_BYTES];
			match src.decode(s, &mut work) {
				Some((msb, exponent)) => dst.encode(d, sign, &mut work, msb, exponent, exceptions),
				None                  => {
					dst.write_zero(d, sign);
					Ok(Outcome::Converted)
				},
			}
		},
	}
}
