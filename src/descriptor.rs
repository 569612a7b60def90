//! Atomic type descriptors.
//!
//! An [`AtomicType`] describes the binary layout of one fixed-width integer or
//! floating-point element: its storage size, byte order, which bits are
//! significant, what the remaining padding bits hold, and, for floats, where
//! the sign, exponent, and mantissa live.



//		Modules																											

#[cfg(test)]
#[path = "tests/descriptor.rs"]
mod tests;



//		Packages																										

use crate::{bits, errors::DescriptorError};
use serde::{Deserialize, Serialize};



//		Constants																										

/// Largest element, in bytes, that the engine converts. This is the size of
/// the stack-allocated scratch element used by the buffer walker.
pub const MAX_ELEMENT_BYTES: usize = 64;

/// Widest exponent field, in bits, that can be held in an `i64` with room for
/// rebiasing.
pub const MAX_EXPONENT_BITS: u32 = 63;



//		Enums																											

//		ByteOrder																
/// The order in which the bytes of an element are stored.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
	/// Least-significant byte first.
	#[default]
	LittleEndian,
	
	/// Most-significant byte first.
	BigEndian,
	
	/// Legacy VAX order: 16-bit words stored most-significant first, with the
	/// bytes inside each word little-endian. Only valid for floating types whose
	/// size is a multiple of four bytes.
	VaxOrdered,
}

//		Normalization															
/// How the leading bit of a floating-point mantissa is represented.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
	/// The leading `1` of a normalized value is not stored.
	#[default]
	Implied,
	
	/// Every mantissa bit is stored, including the leading one.
	None,
}

//		Pad																		
/// The value held by padding bits.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pad {
	/// Padding bits are clear.
	#[default]
	Zero,
	
	/// Padding bits are set.
	One,
}

//󰭅		Pad																		
impl Pad {
	//		as_bool																
	/// The bit value used to fill padding.
	#[must_use]
	pub const fn as_bool(self) -> bool {
		matches!(self, Self::One)
	}
}

//		TypeKind																
/// The class of an element and its class-specific layout.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
	/// A two's-complement signed integer.
	IntegerSigned,
	
	/// An unsigned integer.
	IntegerUnsigned,
	
	/// A floating-point number.
	Float(FloatLayout),
}



//		Structs																											

//		FloatLayout																
/// Positions of the fields of a floating-point element.
///
/// All positions are absolute bit numbers within the element, counted from the
/// least-significant bit of the element once it is in little-endian order.
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FloatLayout {
	/// Position of the sign bit.
	pub sign_bit:      u32,
	
	/// Position of the least-significant exponent bit.
	pub exponent_pos:  u32,
	
	/// Width of the exponent field.
	pub exponent_size: u32,
	
	/// Bias added to the true exponent before it is stored.
	pub exponent_bias: i64,
	
	/// Position of the least-significant mantissa bit.
	pub mantissa_pos:  u32,
	
	/// Width of the stored mantissa.
	pub mantissa_size: u32,
	
	/// Whether the leading mantissa bit is stored.
	pub normalization: Normalization,
}

//󰭅		FloatLayout																
impl FloatLayout {
	//		exponent_max														
	/// The all-ones exponent field value, reserved for infinity and NaN.
	#[must_use]
	pub const fn exponent_max(&self) -> i64 {
		let bits = if self.exponent_size < MAX_EXPONENT_BITS { self.exponent_size } else { MAX_EXPONENT_BITS };
		i64::MAX >> (MAX_EXPONENT_BITS - bits)
	}
	
	//		fraction_bits														
	/// Number of mantissa bits that follow the leading one of a normalized
	/// value.
	#[must_use]
	pub const fn fraction_bits(&self) -> u32 {
		match self.normalization {
			Normalization::Implied => self.mantissa_size,
			Normalization::None    => self.mantissa_size.saturating_sub(1),
		}
	}
}

//		AtomicType																
/// The binary layout of a single integer or floating-point element.
///
/// The significant bits start at [`bit_offset`](Self::bit_offset) and span
/// [`precision`](Self::precision) bits. Bits below the offset are filled
/// according to [`lsb_pad`](Self::lsb_pad), and bits above the significant
/// range according to [`msb_pad`](Self::msb_pad).
///
/// Descriptors are plain data and can be deserialized from configuration:
///
/// ```
/// use bitconv::{AtomicType, ByteOrder};
///
/// let json = r#"{
///     "total_bits": 16,
///     "byte_order": "big_endian",
///     "bit_offset": 0,
///     "precision":  16,
///     "lsb_pad":    "zero",
///     "msb_pad":    "zero",
///     "kind":       "integer_signed"
/// }"#;
/// let ty: AtomicType = serde_json::from_str(json).unwrap();
/// assert_eq!(ty, AtomicType::signed(2, ByteOrder::BigEndian));
/// ```
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AtomicType {
	/// Storage size of one element, in bits. Always a whole number of bytes.
	pub total_bits: u32,
	
	/// Byte order of the stored element.
	pub byte_order: ByteOrder,
	
	/// Position of the least-significant significant bit.
	pub bit_offset: u32,
	
	/// Number of significant bits.
	pub precision:  u32,
	
	/// Fill for the bits below `bit_offset`.
	pub lsb_pad:    Pad,
	
	/// Fill for the bits above `bit_offset + precision`.
	pub msb_pad:    Pad,
	
	/// Integer or float, with the float field layout.
	pub kind:       TypeKind,
}

//󰭅		AtomicType																
impl AtomicType {
	//		Constructors														
	
	//		signed																
	/// A two's-complement signed integer using every bit of `bytes` bytes.
	#[must_use]
	pub const fn signed(bytes: u32, order: ByteOrder) -> Self {
		Self::integer(bytes, order, TypeKind::IntegerSigned)
	}
	
	//		unsigned															
	/// An unsigned integer using every bit of `bytes` bytes.
	#[must_use]
	pub const fn unsigned(bytes: u32, order: ByteOrder) -> Self {
		Self::integer(bytes, order, TypeKind::IntegerUnsigned)
	}
	
	//		float																
	/// A floating-point type with the given size and field layout, using every
	/// bit of its storage.
	#[must_use]
	pub const fn float(bytes: u32, order: ByteOrder, layout: FloatLayout) -> Self {
		Self {
			total_bits: bytes * 8,
			byte_order: order,
			bit_offset: 0,
			precision:  bytes * 8,
			lsb_pad:    Pad::Zero,
			msb_pad:    Pad::Zero,
			kind:       TypeKind::Float(layout),
		}
	}
	
	//		ieee_f16															
	/// IEEE 754 binary16.
	#[must_use]
	pub const fn ieee_f16(order: ByteOrder) -> Self {
		Self::float(2, order, FloatLayout {
			sign_bit:      15,
			exponent_pos:  10,
			exponent_size: 5,
			exponent_bias: 15,
			mantissa_pos:  0,
			mantissa_size: 10,
			normalization: Normalization::Implied,
		})
	}
	
	//		ieee_f32															
	/// IEEE 754 binary32.
	#[must_use]
	pub const fn ieee_f32(order: ByteOrder) -> Self {
		Self::float(4, order, FloatLayout {
			sign_bit:      31,
			exponent_pos:  23,
			exponent_size: 8,
			exponent_bias: 127,
			mantissa_pos:  0,
			mantissa_size: 23,
			normalization: Normalization::Implied,
		})
	}
	
	//		ieee_f64															
	/// IEEE 754 binary64.
	#[must_use]
	pub const fn ieee_f64(order: ByteOrder) -> Self {
		Self::float(8, order, FloatLayout {
			sign_bit:      63,
			exponent_pos:  52,
			exponent_size: 11,
			exponent_bias: 1023,
			mantissa_pos:  0,
			mantissa_size: 52,
			normalization: Normalization::Implied,
		})
	}
	
	//		x87_f80																
	/// The x87 80-bit extended type, stored in 16 bytes with zero padding
	/// above the significant bits. The leading mantissa bit is stored
	/// explicitly.
	#[must_use]
	pub const fn x87_f80(order: ByteOrder) -> Self {
		Self {
			total_bits: 128,
			byte_order: order,
			bit_offset: 0,
			precision:  80,
			lsb_pad:    Pad::Zero,
			msb_pad:    Pad::Zero,
			kind:       TypeKind::Float(FloatLayout {
				sign_bit:      79,
				exponent_pos:  64,
				exponent_size: 15,
				exponent_bias: 16383,
				mantissa_pos:  0,
				mantissa_size: 64,
				normalization: Normalization::None,
			}),
		}
	}
	
	//		vax_f32																
	/// The VAX F-floating type.
	#[must_use]
	pub const fn vax_f32() -> Self {
		Self::float(4, ByteOrder::VaxOrdered, FloatLayout {
			sign_bit:      31,
			exponent_pos:  23,
			exponent_size: 8,
			exponent_bias: 129,
			mantissa_pos:  0,
			mantissa_size: 23,
			normalization: Normalization::Implied,
		})
	}
	
	//		vax_f64																
	/// The VAX G-floating type.
	#[must_use]
	pub const fn vax_f64() -> Self {
		Self::float(8, ByteOrder::VaxOrdered, FloatLayout {
			sign_bit:      63,
			exponent_pos:  52,
			exponent_size: 11,
			exponent_bias: 1025,
			mantissa_pos:  0,
			mantissa_size: 52,
			normalization: Normalization::Implied,
		})
	}
	
	//		integer																
	const fn integer(bytes: u32, order: ByteOrder, kind: TypeKind) -> Self {
		Self {
			total_bits: bytes * 8,
			byte_order: order,
			bit_offset: 0,
			precision:  bytes * 8,
			lsb_pad:    Pad::Zero,
			msb_pad:    Pad::Zero,
			kind,
		}
	}
	
	//		Builders															
	
	//		with_order															
	/// Returns a copy stored in a different byte order.
	#[must_use]
	pub const fn with_order(mut self, order: ByteOrder) -> Self {
		self.byte_order = order;
		self
	}
	
	//		with_offset															
	/// Returns a copy whose significant bits start at `offset`.
	#[must_use]
	pub const fn with_offset(mut self, offset: u32) -> Self {
		self.bit_offset = offset;
		self
	}
	
	//		with_precision														
	/// Returns a copy with `precision` significant bits.
	#[must_use]
	pub const fn with_precision(mut self, precision: u32) -> Self {
		self.precision = precision;
		self
	}
	
	//		with_padding														
	/// Returns a copy with the given padding fills.
	#[must_use]
	pub const fn with_padding(mut self, lsb: Pad, msb: Pad) -> Self {
		self.lsb_pad = lsb;
		self.msb_pad = msb;
		self
	}
	
	//		Public methods														
	
	//		float_layout														
	/// The float field layout, if this is a floating-point type.
	#[must_use]
	pub const fn float_layout(&self) -> Option<&FloatLayout> {
		match &self.kind {
			TypeKind::Float(layout) => Some(layout),
			TypeKind::IntegerSigned | TypeKind::IntegerUnsigned => None,
		}
	}
	
	//		is_float															
	/// Whether this is a floating-point type.
	#[must_use]
	pub const fn is_float(&self) -> bool {
		matches!(self.kind, TypeKind::Float(_))
	}
	
	//		is_signed															
	/// Whether this is a signed integer type. Floats are always signed, but
	/// this only reports integer signedness.
	#[must_use]
	pub const fn is_signed(&self) -> bool {
		matches!(self.kind, TypeKind::IntegerSigned)
	}
	
	//		size																
	/// Storage size of one element, in bytes.
	#[must_use]
	pub const fn size(&self) -> usize {
		(self.total_bits / 8) as usize
	}
	
	//		validate															
	/// Checks the layout against the descriptor invariants and engine limits.
	///
	/// # Errors
	///
	/// Returns the first [`DescriptorError`] found.
	///
	pub fn validate(&self) -> Result<(), DescriptorError> {
		if self.total_bits == 0 {
			return Err(DescriptorError::ZeroSize);
		}
		if self.total_bits % 8 != 0 {
			return Err(DescriptorError::SizeNotByteAligned(self.total_bits));
		}
		if self.size() > MAX_ELEMENT_BYTES {
			return Err(DescriptorError::TooLarge(self.size()));
		}
		if self.precision == 0 {
			return Err(DescriptorError::ZeroPrecision);
		}
		if u64::from(self.bit_offset) + u64::from(self.precision) > u64::from(self.total_bits) {
			return Err(DescriptorError::PrecisionOutOfRange {
				offset:    self.bit_offset,
				precision: self.precision,
				total:     self.total_bits,
			});
		}
		match &self.kind {
			TypeKind::IntegerSigned | TypeKind::IntegerUnsigned => {
				if self.byte_order == ByteOrder::VaxOrdered {
					return Err(DescriptorError::UnsupportedByteOrder);
				}
			},
			TypeKind::Float(layout) => {
				if self.byte_order == ByteOrder::VaxOrdered && self.size() % 4 != 0 {
					return Err(DescriptorError::UnsupportedByteOrder);
				}
				self.validate_float(layout)?;
			},
		}
		Ok(())
	}
	
	//		Crate methods														
	
	//		fill_padding														
	/// Fills the bits outside the significant range of a little-endian element
	/// according to the padding policy.
	pub(crate) fn fill_padding(&self, element: &mut [u8]) {
		let offset = self.bit_offset as usize;
		let top    = offset + self.precision as usize;
		let total  = self.total_bits as usize;
		if offset > 0 {
			bits::set(element, 0, offset, self.lsb_pad.as_bool());
		}
		if top < total {
			bits::set(element, top, total - top, self.msb_pad.as_bool());
		}
	}
	
	//		Private methods														
	
	//		validate_float														
	fn validate_float(&self, layout: &FloatLayout) -> Result<(), DescriptorError> {
		if layout.exponent_size == 0 || layout.exponent_size > MAX_EXPONENT_BITS {
			return Err(DescriptorError::ExponentTooWide(layout.exponent_size));
		}
		if layout.mantissa_size == 0 {
			return Err(DescriptorError::EmptyMantissa);
		}
		
		let low    = u64::from(self.bit_offset);
		let high   = low + u64::from(self.precision);
		let fields = [
			("sign",     u64::from(layout.sign_bit),     1_u64),
			("exponent", u64::from(layout.exponent_pos), u64::from(layout.exponent_size)),
			("mantissa", u64::from(layout.mantissa_pos), u64::from(layout.mantissa_size)),
		];
		for &(name, pos, len) in &fields {
			if pos < low || pos + len > high {
				return Err(DescriptorError::FieldOutOfRange(name));
			}
		}
		for (i, &(_, a_pos, a_len)) in fields.iter().enumerate() {
			for &(_, b_pos, b_len) in fields.iter().skip(i + 1) {
				if a_pos < b_pos + b_len && b_pos < a_pos + a_len {
					return Err(DescriptorError::FieldsOverlap);
				}
			}
		}
		
		let span = 1 + layout.exponent_size + layout.mantissa_size;
		if span != self.precision {
			return Err(DescriptorError::FieldsDoNotSpanPrecision {
				fields:    span,
				precision: self.precision,
			});
		}
		Ok(())
	}
}
