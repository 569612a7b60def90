//! Contains error types used throughout the library.



//		Packages																										

use crate::except::ExceptionKind;
use thiserror::Error as ThisError;



//		Enums																											

//		ConversionError															
/// Represents all possible failures of a bulk conversion call.
///
/// Per-element conditions such as overflow or precision loss are not errors;
/// they are resolved by the default policy or by the exception handler. Only
/// the conditions below stop a call.
///
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ConversionError {
	/// The exception handler returned [`Abort`](crate::Disposition::Abort).
	/// Elements before `element` have been committed.
	#[error("Conversion aborted at element {element} on {kind}")]
	ConversionAborted {
		/// Index of the element being converted when the handler aborted.
		element: usize,
		
		/// The exception the handler was asked to resolve.
		kind:    ExceptionKind,
	},
	
	/// The buffer is shorter than the element count and layout require.
	#[error("Buffer too small: {required} bytes required, {actual} available")]
	BufferTooSmall {
		/// Number of bytes the call needs.
		required: usize,
		
		/// Number of bytes supplied.
		actual:   usize,
	},
	
	/// One of the descriptors is malformed or outside the engine's limits.
	#[error("Invalid descriptor: {0}")]
	InvalidDescriptor(#[from] DescriptorError),
	
	/// The stride is smaller than one of the element sizes.
	#[error("Invalid stride {stride} for element size {element_size}")]
	InvalidStride {
		/// The stride supplied.
		stride:       usize,
		
		/// The larger of the two element sizes.
		element_size: usize,
	},
}

//		DescriptorError															
/// Describes why an [`AtomicType`](crate::AtomicType) cannot be used.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum DescriptorError {
	/// The sign, exponent, and mantissa fields do not add up to the precision.
	#[error("Fields span {fields} bits but precision is {precision}")]
	FieldsDoNotSpanPrecision {
		/// Total width of the sign, exponent, and mantissa fields.
		fields:    u32,
		
		/// Declared precision.
		precision: u32,
	},
	
	/// Two of the sign, exponent, and mantissa fields share bits.
	#[error("Sign, exponent, and mantissa fields overlap")]
	FieldsOverlap,
	
	/// A float field lies outside the significant bits.
	#[error("The {0} field lies outside the significant bits")]
	FieldOutOfRange(&'static str),
	
	/// The mantissa field has no bits.
	#[error("Mantissa field is empty")]
	EmptyMantissa,
	
	/// The exponent field is empty or wider than 63 bits.
	#[error("Exponent field width {0} is not between 1 and 63 bits")]
	ExponentTooWide(u32),
	
	/// `bit_offset + precision` exceeds the storage size.
	#[error("Precision {precision} at offset {offset} exceeds {total} bits")]
	PrecisionOutOfRange {
		/// Declared bit offset.
		offset:    u32,
		
		/// Declared precision.
		precision: u32,
		
		/// Storage size in bits.
		total:     u32,
	},
	
	/// The storage size is not a whole number of bytes.
	#[error("Size of {0} bits is not a whole number of bytes")]
	SizeNotByteAligned(u32),
	
	/// The storage size exceeds the scratch element.
	#[error("Size of {0} bytes exceeds the 64-byte limit")]
	TooLarge(usize),
	
	/// The byte order cannot be used with this kind or size of element.
	#[error("Byte order is not supported for this element")]
	UnsupportedByteOrder,
	
	/// The element has no storage.
	#[error("Size is zero")]
	ZeroSize,
	
	/// The element has no significant bits.
	#[error("Precision is zero")]
	ZeroPrecision,
}
