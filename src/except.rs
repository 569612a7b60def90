//! The exception callback protocol.
//!
//! Converters report every exceptional condition they meet (overflow,
//! underflow, precision loss, infinity, NaN) to an optional
//! [`ExceptionHandler`]. The handler sees the unconverted source bytes in their
//! stored byte order, and a mutable view of the destination slot, and answers
//! with a [`Disposition`].



//		Modules																											

#[cfg(test)]
#[path = "tests/except.rs"]
mod tests;



//		Packages																										

use crate::{errors::ConversionError, stats::ConversionStats};
use core::fmt::{Display, Formatter, self};
use serde::{Deserialize, Serialize};
use tracing::trace;



//		Enums																											

//		Disposition																
/// The outcome chosen by an [`ExceptionHandler`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
	/// The engine applies its default policy for the exception.
	#[default]
	Unhandled,
	
	/// The handler has written the destination element in its final byte
	/// order. The engine leaves it untouched, including its padding.
	Handled,
	
	/// The whole conversion stops with
	/// [`ConversionAborted`](ConversionError::ConversionAborted).
	Abort,
}

//		ExceptionKind															
/// An exceptional condition met while converting one element.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
	/// The source magnitude exceeds the destination's largest value.
	///
	/// Default: saturate to the destination maximum, or infinity for floats.
	RangeHigh,
	
	/// The source is below the destination's smallest value, including a
	/// negative value headed for an unsigned destination, or a float too small
	/// to be stored as a normal number.
	///
	/// Default: saturate to the destination minimum (zero when unsigned), or a
	/// denormal or signed zero for floats.
	RangeLow,
	
	/// The source is an infinity being converted between float types.
	///
	/// Default: infinity of the same sign.
	Infinity {
		/// Whether this is negative infinity.
		negative: bool,
	},
	
	/// The source is not a number.
	///
	/// Default: a NaN for float destinations, zero for integers.
	NaN,
	
	/// Significant bits would be dropped.
	///
	/// Default: round to nearest, ties to even, for float destinations, and
	/// truncate towards zero for integer destinations.
	PrecisionLoss,
}

//󰭅		Display																	
impl Display for ExceptionKind {
	//		fmt																	
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::RangeHigh                    => write!(f, "range overflow"),
			Self::RangeLow                     => write!(f, "range underflow"),
			Self::Infinity { negative: false } => write!(f, "positive infinity"),
			Self::Infinity { negative: true }  => write!(f, "negative infinity"),
			Self::NaN                          => write!(f, "NaN"),
			Self::PrecisionLoss                => write!(f, "precision loss"),
		}
	}
}

//		Resolution																
/// What a converter does after raising an exception that did not abort.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Resolution {
	/// Apply the default policy.
	Default,
	
	/// Stop work on this element; the handler has written it.
	Handled,
}



//		Traits																											

//		ExceptionHandler														
/// A user-installed policy for exceptional conditions.
///
/// Handlers are called in visiting order. That is the element order, except
/// for in-place widening conversions without a stride, which visit the last
/// element first.
///
/// Any closure of the right shape is a handler, so state can be captured
/// directly:
///
/// ```
/// use bitconv::{AtomicType, ByteOrder, Disposition, ExceptionKind, convert};
///
/// let mut overflows = 0;
/// let mut handler   = |kind: ExceptionKind, _src: &[u8], _dst: &mut [u8]| {
///     if kind == ExceptionKind::RangeHigh {
///         overflows += 1;
///     }
///     Disposition::Unhandled
/// };
///
/// let mut buf = 300_u16.to_le_bytes();
/// let src     = AtomicType::unsigned(2, ByteOrder::LittleEndian);
/// let dst     = AtomicType::unsigned(1, ByteOrder::LittleEndian);
/// convert(&src, &dst, &mut buf, 1, None, Some(&mut handler)).unwrap();
/// assert_eq!(buf[0], 255);
/// assert_eq!(overflows, 1);
/// ```
///
pub trait ExceptionHandler {
	//		handle																
	/// Resolves one exception.
	///
	/// # Parameters
	///
	/// * `kind` - The condition met.
	/// * `src`  - The source element, in its stored byte order.
	/// * `dst`  - The destination element. Its contents are unspecified unless
	///            the handler writes them; if it returns
	///            [`Handled`](Disposition::Handled) they are kept as written.
	///
	fn handle(&mut self, kind: ExceptionKind, src: &[u8], dst: &mut [u8]) -> Disposition;
}

//󰭅		ExceptionHandler for FnMut												
impl<F> ExceptionHandler for F
where
	F: FnMut(ExceptionKind, &[u8], &mut [u8]) -> Disposition,
{
	//		handle																
	fn handle(&mut self, kind: ExceptionKind, src: &[u8], dst: &mut [u8]) -> Disposition {
		self(kind, src, dst)
	}
}



//		Structs																											

//		Exceptions																
/// Per-element gateway between a converter and the installed handler.
pub(crate) struct Exceptions<'a, 'h> {
	/// Index of the element being converted.
	pub(crate) element: usize,
	
	/// The source element in its stored byte order.
	pub(crate) raw:     &'a [u8],
	
	/// The installed handler, if any.
	handler:     Option<&'a mut (dyn ExceptionHandler + 'h)>,
	
	/// Per-call counters.
	stats:       &'a mut ConversionStats,
}

//󰭅		Exceptions																
impl<'a, 'h> Exceptions<'a, 'h> {
	//		new																	
	pub(crate) fn new(
		element: usize,
		raw:     &'a [u8],
		handler: Option<&'a mut (dyn ExceptionHandler + 'h)>,
		stats:   &'a mut ConversionStats,
	) -> Self {
		Self { element, raw, handler, stats }
	}
	
	//		raise																
	/// Reports an exception for the current element.
	///
	/// The exception is always counted. With no handler installed the result
	/// is [`Resolution::Default`].
	///
	/// # Errors
	///
	/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
	///
	pub(crate) fn raise(&mut self, kind: ExceptionKind, dst: &mut [u8]) -> Result<Resolution, ConversionError> {
		self.stats.record_exception(kind);
		let Some(handler) = self.handler.as_deref_mut() else {
			return Ok(Resolution::Default);
		};
		let disposition = handler.handle(kind, self.raw, dst);
		trace!(element = self.element, %kind, ?disposition, "Conversion exception");
		match disposition {
			Disposition::Unhandled => Ok(Resolution::Default),
			Disposition::Handled   => {
				self.stats.handled += 1;
				Ok(Resolution::Handled)
			},
			Disposition::Abort     => Err(ConversionError::ConversionAborted { element: self.element, kind }),
		}
	}
}
