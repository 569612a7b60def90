//! Conversion dispatch and the float handling shared by the converters.
//!
//! A [`Conversion`] validates a pair of descriptors once, picks one of the four
//! converters by descriptor shape, and then runs any number of bulk calls
//! through the [buffer walker](crate::walker).
//!
//! All converters work on a little-endian copy of the source element and write
//! a little-endian destination. Values that need arithmetic (shifting,
//! rounding, two's-complement negation) are staged in a fixed-size work area on
//! the stack, wide enough for any supported significand after alignment.

//	Bit positions are bounded by the descriptor limits checked in
//	AtomicType::validate(), so the arithmetic on them cannot overflow.
#![allow(clippy::arithmetic_side_effects, reason = "Positions are bounded by validated descriptors")]



//		Modules																											

mod float_float;
mod float_int;
mod int_float;
mod int_int;

#[cfg(test)]
#[path = "../tests/convert.rs"]
mod tests;



//		Packages																										

use crate::{
	bits::{self, Direction},
	descriptor::{AtomicType, FloatLayout, MAX_ELEMENT_BYTES, Normalization},
	errors::ConversionError,
	except::{ExceptionHandler, ExceptionKind, Exceptions, Resolution},
	stats::{ConversionStats, StatsSink},
	walker::{self, Buffers, Outcome},
};
use core::fmt::{Debug, Formatter, self};
use tracing::debug;



//		Constants																										

/// Size of the work area used for significands and integer magnitudes.
const WORK_BYTES: usize = 2 * MAX_ELEMENT_BYTES;

/// Size of the work area in bits.
const WORK_BITS: usize = WORK_BYTES * 8;



//		Enums																											

//		Pair																	
/// The converter chosen for a descriptor pair, with the float layouts it needs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Pair {
	/// Integer to integer.
	IntInt,
	
	/// Integer to float.
	IntFloat(Fields),
	
	/// Float to integer.
	FloatInt(Fields),
	
	/// Float to float.
	FloatFloat(Fields, Fields),
}

//󰭅		Pair																	
impl Pair {
	//		select																
	fn select(src: &AtomicType, dst: &AtomicType) -> Self {
		match (src.float_layout(), dst.float_layout()) {
			(None,    None)    => Self::IntInt,
			(None,    Some(d)) => Self::IntFloat(Fields::from(d)),
			(Some(s), None)    => Self::FloatInt(Fields::from(s)),
			(Some(s), Some(d)) => Self::FloatFloat(Fields::from(s), Fields::from(d)),
		}
	}
	
	//		name																
	const fn name(&self) -> &'static str {
		match self {
			Self::IntInt        => "integer to integer",
			Self::IntFloat(_)   => "integer to float",
			Self::FloatInt(_)   => "float to integer",
			Self::FloatFloat(..) => "float to float",
		}
	}
}

//		Class																	
/// The category of a floating-point value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Class {
	/// Positive or negative zero.
	Zero,
	
	/// Positive or negative infinity.
	Infinite,
	
	/// Not a number.
	NaN,
	
	/// Any other value, normal or denormal.
	Finite,
}



//		Structs																											

//		Fields																	
/// A [`FloatLayout`] with positions as `usize`, ready for bit operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Fields {
	pub(crate) sign:     usize,
	pub(crate) epos:     usize,
	pub(crate) esize:    usize,
	pub(crate) mpos:     usize,
	pub(crate) msize:    usize,
	pub(crate) fraction: usize,
	pub(crate) bias:     i64,
	pub(crate) emax:     i64,
	pub(crate) implied:  bool,
}

//󰭅		From<&FloatLayout> for Fields											
impl From<&FloatLayout> for Fields {
	//		from																
	fn from(layout: &FloatLayout) -> Self {
		Self {
			sign:     layout.sign_bit as usize,
			epos:     layout.exponent_pos as usize,
			esize:    layout.exponent_size as usize,
			mpos:     layout.mantissa_pos as usize,
			msize:    layout.mantissa_size as usize,
			fraction: layout.fraction_bits() as usize,
			bias:     layout.exponent_bias,
			emax:     layout.exponent_max(),
			implied:  layout.normalization == Normalization::Implied,
		}
	}
}

//󰭅		Fields																	
impl Fields {
	//		classify															
	/// Sorts a little-endian float element into zero, infinity, NaN, or a
	/// finite value.
	///
	/// With an explicit leading bit, an all-ones exponent whose mantissa holds
	/// only that bit is an infinity.
	///
	pub(crate) fn classify(&self, s: &[u8]) -> Class {
		let exp_all_ones = bits::find(s, self.epos, self.esize, Direction::Lsb, false).is_none();
		if bits::find(s, self.mpos, self.msize, Direction::Lsb, true).is_none() {
			if bits::find(s, self.epos, self.esize, Direction::Lsb, true).is_none() {
				return Class::Zero;
			}
			if exp_all_ones {
				return Class::Infinite;
			}
			return Class::Finite;
		}
		if exp_all_ones {
			let explicit_inf = !self.implied
				&& bits::find(s, self.mpos, self.msize - 1, Direction::Lsb, true).is_none();
			return if explicit_inf { Class::Infinite } else { Class::NaN };
		}
		Class::Finite
	}
	
	//		sign_of																
	/// Whether the sign bit of a little-endian float element is set.
	pub(crate) fn sign_of(&self, s: &[u8]) -> bool {
		bits::bit(s, self.sign)
	}
	
	//		decode																
	/// Loads the significand of a finite element into the low bits of `work`.
	///
	/// Returns the position `p` of its most-significant set bit and the
	/// unbiased exponent `e` of that bit, so that the value is
	/// `work * 2^(e - p)`. Returns [`None`] for an unnormalized zero.
	///
	pub(crate) fn decode(&self, s: &[u8], work: &mut [u8]) -> Option<(usize, i64)> {
		let raw_exp = i64_from(bits::get(s, self.epos, self.esize));
		bits::copy(work, 0, s, self.mpos, self.msize);
		if self.implied && raw_exp != 0 {
			bits::set(work, self.msize, 1, true);
		}
		let p = bits::find(work, 0, self.msize + 1, Direction::Msb, true)?;
		let e = raw_exp.max(1)
			.saturating_sub(self.bias)
			.saturating_sub(i64_from_usize(self.fraction))
			.saturating_add(i64_from_usize(p));
		Some((p, e))
	}
	
	//		write_zero															
	pub(crate) fn write_zero(&self, d: &mut [u8], sign: bool) {
		bits::set(d, self.sign, 1, sign);
		bits::set(d, self.epos, self.esize, false);
		bits::set(d, self.mpos, self.msize, false);
	}
	
	//		write_infinity														
	/// Writes an infinity. Without an implied bit, the explicit leading
	/// mantissa bit is set.
	pub(crate) fn write_infinity(&self, d: &mut [u8], sign: bool) {
		bits::set(d, self.sign, 1, sign);
		bits::set(d, self.epos, self.esize, true);
		bits::set(d, self.mpos, self.msize, false);
		if !self.implied {
			bits::set(d, self.mpos + self.msize - 1, 1, true);
		}
	}
	
	//		write_nan															
	/// Writes a NaN with every exponent and mantissa bit set.
	pub(crate) fn write_nan(&self, d: &mut [u8], sign: bool) {
		bits::set(d, self.sign, 1, sign);
		bits::set(d, self.epos, self.esize, true);
		bits::set(d, self.mpos, self.msize, true);
	}
	
	//		encode																
	/// Writes a finite value held in `work` as `work * 2^(e - p)`, where `p`
	/// is the position of the highest set bit of `work`.
	///
	/// The significand is rounded to nearest, ties to even, once. Values too
	/// small for a normal encoding become denormals or zero, and values too
	/// large become infinity, unless the handler says otherwise.
	///
	/// # Errors
	///
	/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
	///
	pub(crate) fn encode(
		&self,
		d:          &mut [u8],
		sign:       bool,
		work:       &mut [u8],
		p:          usize,
		e:          i64,
		exceptions: &mut Exceptions<'_, '_>,
	) -> Result<Outcome, ConversionError> {
		let mut biased = e.saturating_add(self.bias);
		if biased >= self.emax {
			return self.overflow(d, sign, exceptions);
		}
		
		//	Align the leading bit with the top of the fraction, then push
		//	denormals further right.
		let denormal    = biased < 1;
		let below       = if denormal { 1_i64.saturating_sub(biased) } else { 0 };
		let right       = (i64_from_usize(p) - i64_from_usize(self.fraction)).saturating_add(below);
		let mut inexact = false;
		if right > 0 {
			let amount = usize_from(right.min(i64_from_usize(WORK_BITS + 1)));
			inexact    = shift_right_even(work, WORK_BITS, amount);
		} else if right < 0 {
			bits::shift(work, isize_from(-right), 0, WORK_BITS);
		}
		if denormal {
			biased = 0;
			if bits::bit(work, self.fraction) {
				//	Rounded up into the smallest normal.
				biased = 1;
			}
		} else if bits::bit(work, self.fraction + 1) {
			//	Rounding carried out of the significand: 1.11..1 became 10.00..0.
			bits::shift(work, -1, 0, WORK_BITS);
			biased += 1;
			if biased >= self.emax {
				return self.overflow(d, sign, exceptions);
			}
		}
		
		if inexact {
			let kind = if denormal { ExceptionKind::RangeLow } else { ExceptionKind::PrecisionLoss };
			if exceptions.raise(kind, d)? == Resolution::Handled {
				return Ok(Outcome::Handled);
			}
		}
		
		bits::set(d, self.sign, 1, sign);
		bits::set_u64(d, self.epos, self.esize, u64::try_from(biased).unwrap_or(0));
		bits::copy(d, self.mpos, work, 0, self.msize);
		Ok(Outcome::Converted)
	}
	
	//		overflow															
	fn overflow(&self, d: &mut [u8], sign: bool, exceptions: &mut Exceptions<'_, '_>) -> Result<Outcome, ConversionError> {
		if exceptions.raise(ExceptionKind::RangeHigh, d)? == Resolution::Handled {
			return Ok(Outcome::Handled);
		}
		self.write_infinity(d, sign);
		Ok(Outcome::Converted)
	}
}

//		Conversion																
/// A validated conversion between two atomic types.
///
/// Build one with [`Conversion::new()`], optionally attach an
/// [`ExceptionHandler`] and a [`StatsSink`], and [`run()`](Conversion::run) it
/// over as many buffers as needed.
///
/// ```
/// use bitconv::{AtomicType, ByteOrder, Conversion};
///
/// let src = AtomicType::ieee_f64(ByteOrder::LittleEndian);
/// let dst = AtomicType::ieee_f32(ByteOrder::BigEndian);
///
/// let mut buf = Vec::new();
/// for v in [1.5_f64, -2.25] {
///     buf.extend_from_slice(&v.to_le_bytes());
/// }
/// let stats = Conversion::new(&src, &dst).unwrap().run(&mut buf, 2, None).unwrap();
/// assert_eq!(&buf[..4], &1.5_f32.to_be_bytes());
/// assert_eq!(&buf[4..8], &(-2.25_f32).to_be_bytes());
/// assert_eq!(stats.elements, 2);
/// ```
///
pub struct Conversion<'h> {
	src:     AtomicType,
	dst:     AtomicType,
	pair:    Pair,
	handler: Option<&'h mut dyn ExceptionHandler>,
	sink:    Option<&'h mut dyn StatsSink>,
}

//󰭅		Conversion																
impl<'h> Conversion<'h> {
	//		Constructors														
	
	//		new																	
	/// Validates both descriptors and selects the converter.
	///
	/// # Errors
	///
	/// Returns [`ConversionError::InvalidDescriptor`] if either descriptor is
	/// malformed or exceeds the engine limits.
	///
	pub fn new(src: &AtomicType, dst: &AtomicType) -> Result<Self, ConversionError> {
		for ty in [src, dst] {
			if let Err(err) = ty.validate() {
				debug!(?ty, %err, "Rejected descriptor");
				return Err(err.into());
			}
		}
		Ok(Self {
			src:     *src,
			dst:     *dst,
			pair:    Pair::select(src, dst),
			handler: None,
			sink:    None,
		})
	}
	
	//		Builders															
	
	//		with_handler														
	/// Installs an exception handler.
	#[must_use]
	pub fn with_handler(mut self, handler: &'h mut dyn ExceptionHandler) -> Self {
		self.handler = Some(handler);
		self
	}
	
	//		with_stats															
	/// Installs a sink that receives the statistics of every run.
	#[must_use]
	pub fn with_stats(mut self, sink: &'h mut dyn StatsSink) -> Self {
		self.sink = Some(sink);
		self
	}
	
	//		Public methods														
	
	//		run																	
	/// Converts `element_count` elements of `buffer` in place.
	///
	/// Without a stride, source elements are packed at the source size and
	/// the results are packed at the destination size, both starting at the
	/// beginning of the buffer. With a stride, the `n`th element of both
	/// lives at `n * stride`.
	///
	/// Elements are visited first to last, except that a widening conversion
	/// without a stride visits them last to first. The handler is called in
	/// the same order.
	///
	/// # Errors
	///
	/// Returns [`ConversionError::InvalidStride`] or
	/// [`ConversionError::BufferTooSmall`] before touching the buffer, or
	/// [`ConversionError::ConversionAborted`] if the handler aborts, in which
	/// case the elements already visited are committed and the rest of the
	/// buffer is unspecified. After a widening abort the committed elements
	/// are the trailing ones.
	///
	pub fn run(
		&mut self,
		buffer:        &mut [u8],
		element_count: usize,
		stride:        Option<usize>,
	) -> Result<ConversionStats, ConversionError> {
		self.execute(Buffers::Shared(buffer), element_count, stride)
	}
	
	//		run_into															
	/// Converts `element_count` elements of `src_buffer` into `dst_buffer`,
	/// leaving the source untouched.
	///
	/// Source elements are packed at the source size and results at the
	/// destination size, or both are `stride` bytes apart. Elements are
	/// visited first to last.
	///
	/// ```
	/// use bitconv::{AtomicType, ByteOrder, Conversion};
	///
	/// let src = AtomicType::unsigned(2, ByteOrder::BigEndian);
	/// let dst = AtomicType::unsigned(4, ByteOrder::LittleEndian);
	///
	/// let input      = [0x01, 0x02, 0xFF, 0xFF];
	/// let mut output = [0_u8; 8];
	/// Conversion::new(&src, &dst).unwrap().run_into(&input, &mut output, 2, None).unwrap();
	/// assert_eq!(output, [0x02, 0x01, 0, 0, 0xFF, 0xFF, 0, 0]);
	/// ```
	///
	/// # Errors
	///
	/// As for [`run()`](Conversion::run), with each buffer checked against
	/// its own array. On abort the elements before the failing one are
	/// committed.
	///
	pub fn run_into(
		&mut self,
		src_buffer:    &[u8],
		dst_buffer:    &mut [u8],
		element_count: usize,
		stride:        Option<usize>,
	) -> Result<ConversionStats, ConversionError> {
		self.execute(Buffers::Split { src: src_buffer, dst: dst_buffer }, element_count, stride)
	}
	
	//		Private methods														
	
	//		execute																
	/// Walks the buffers and reports the statistics.
	fn execute(
		&mut self,
		buffers:       Buffers<'_>,
		element_count: usize,
		stride:        Option<usize>,
	) -> Result<ConversionStats, ConversionError> {
		let mut stats = ConversionStats::default();
		let (src, dst, pair) = (self.src, self.dst, self.pair);
		let result = walker::walk(
			&src,
			&dst,
			buffers,
			element_count,
			stride,
			self.handler.as_deref_mut(),
			&mut stats,
			|s, d, exceptions| match pair {
				Pair::IntInt                => int_int::convert(&src, &dst, s, d, exceptions),
				Pair::IntFloat(df)          => int_float::convert(&src, &df, s, d, exceptions),
				Pair::FloatInt(sf)          => float_int::convert(&sf, &dst, s, d, exceptions),
				Pair::FloatFloat(sf, df)    => float_float::convert(&sf, &df, s, d, exceptions),
			},
		);
		debug!(
			path      = pair.name(),
			elements  = stats.elements,
			traversal = ?stats.traversal,
			overlap   = stats.overlap,
			"Converted buffer"
		);
		if let Err(err) = &result {
			debug!(%err, "Conversion stopped");
		}
		if let Some(sink) = self.sink.as_deref_mut() {
			sink.record(&stats);
		}
		result.map(|()| stats)
	}
}

//󰭅		Debug																	
impl Debug for Conversion<'_> {
	//		fmt																	
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Conversion")
			.field("src",     &self.src)
			.field("dst",     &self.dst)
			.field("pair",    &self.pair)
			.field("handler", &self.handler.is_some())
			.field("sink",    &self.sink.is_some())
			.finish()
	}
}



//		Functions																										

//		convert																	
/// Converts `element_count` elements of `buffer` from `src` to `dst` in place.
///
/// This is the one-shot form of [`Conversion`]. Conditions such as overflow
/// or precision loss are resolved by the default policy unless `handler`
/// resolves them, so a call without a handler always succeeds for valid
/// descriptors and a large enough buffer.
///
/// ```
/// use bitconv::{AtomicType, ByteOrder, convert};
///
/// let src = AtomicType::signed(1, ByteOrder::LittleEndian);
/// let dst = AtomicType::signed(4, ByteOrder::LittleEndian);
///
/// let mut buf = [0_u8; 8];
/// buf[0] = (-1_i8).to_le_bytes()[0];
/// buf[1] = 5;
/// convert(&src, &dst, &mut buf, 2, None, None).unwrap();
/// assert_eq!(i32::from_le_bytes(buf[..4].try_into().unwrap()), -1);
/// assert_eq!(i32::from_le_bytes(buf[4..].try_into().unwrap()), 5);
/// ```
///
/// # Errors
///
/// See [`Conversion::new()`] and [`Conversion::run()`].
///
pub fn convert(
	src:           &AtomicType,
	dst:           &AtomicType,
	buffer:        &mut [u8],
	element_count: usize,
	stride:        Option<usize>,
	handler:       Option<&mut dyn ExceptionHandler>,
) -> Result<(), ConversionError> {
	let mut conversion = Conversion::new(src, dst)?;
	if let Some(handler) = handler {
		conversion = conversion.with_handler(handler);
	}
	conversion.run(buffer, element_count, stride).map(|_| ())
}

//		shift_right_even														
/// Shifts the low `len` bits of `work` right by `amount`, rounding the result
/// to nearest with ties to even.
///
/// Returns whether any discarded bit was set. The rounding increment may carry
/// into the bit just above the kept result.
///
pub(crate) fn shift_right_even(work: &mut [u8], len: usize, amount: usize) -> bool {
	if amount == 0 {
		return false;
	}
	let guard  = amount <= len && bits::bit(work, amount - 1);
	let sticky = bits::find(work, 0, (amount - 1).min(len), Direction::Lsb, true).is_some();
	bits::shift(work, -isize_from_usize(amount), 0, len);
	if guard && (sticky || bits::bit(work, 0)) {
		bits::increment(work, 0, len);
	}
	guard || sticky
}

//		saturate																
/// Raises `kind` and, unless the handler resolves it, writes the largest
/// (for [`RangeHigh`](ExceptionKind::RangeHigh)) or smallest value of an
/// integer destination.
///
/// # Errors
///
/// Returns [`ConversionError::ConversionAborted`] if the handler aborts.
///
pub(crate) fn saturate(
	dst:        &AtomicType,
	d:          &mut [u8],
	kind:       ExceptionKind,
	exceptions: &mut Exceptions<'_, '_>,
) -> Result<Outcome, ConversionError> {
	if exceptions.raise(kind, d)? == Resolution::Handled {
		return Ok(Outcome::Handled);
	}
	let (offset, precision) = integer_bits(dst);
	let high                = kind == ExceptionKind::RangeHigh;
	bits::set(d, offset, precision, high);
	if dst.is_signed() {
		bits::set(d, offset + precision - 1, 1, !high);
	}
	Ok(Outcome::Converted)
}

//		integer_bits															
/// The offset and precision of an integer descriptor, as bit positions.
pub(crate) const fn integer_bits(ty: &AtomicType) -> (usize, usize) {
	(ty.bit_offset as usize, ty.precision as usize)
}

//		i64_from																
#[expect(clippy::cast_possible_wrap, reason = "Exponent fields are at most 63 bits wide")]
const fn i64_from(v: u64) -> i64 {
	v as i64
}

//		i64_from_usize															
#[expect(clippy::cast_possible_wrap, reason = "Bit positions are far below i64::MAX")]
pub(crate) const fn i64_from_usize(v: usize) -> i64 {
	v as i64
}

//		isize_from_usize														
#[expect(clippy::cast_possible_wrap, reason = "Shift amounts are bounded by the work area")]
pub(crate) const fn isize_from_usize(v: usize) -> isize {
	v as isize
}

//		isize_from																
#[expect(clippy::cast_possible_truncation, reason = "Shift amounts are bounded by the work area")]
const fn isize_from(v: i64) -> isize {
	v as isize
}

//		usize_from																
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "Only called on positive values")]
pub(crate) const fn usize_from(v: i64) -> usize {
	v as usize
}
