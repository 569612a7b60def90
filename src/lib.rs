//! The Bitconv crate converts buffers of packed binary numbers from one
//! machine-independent encoding to another, bit for bit.
//!
//! Each element is described by an [`AtomicType`]: an integer or a float of
//! any whole number of bytes up to [`MAX_ELEMENT_BYTES`], with its own byte
//! order, bit offset, precision, padding, and (for floats) sign, exponent, and
//! mantissa layout. A conversion rewrites a whole buffer in place, coping with
//! source and destination elements of different sizes sharing the same
//! memory.
//!
//! Overflow, underflow, precision loss, infinities, and NaNs are never errors.
//! They are reported to an optional [`ExceptionHandler`], which can accept the
//! default policy, write the element itself, or abort the call.
//!
//! ```
//! use bitconv::{AtomicType, ByteOrder, convert};
//!
//! let src = AtomicType::signed(8, ByteOrder::LittleEndian);
//! let dst = AtomicType::unsigned(2, ByteOrder::BigEndian);
//!
//! let mut buf = i64::MAX.to_le_bytes();
//! convert(&src, &dst, &mut buf, 1, None, None).unwrap();
//! assert_eq!(&buf[..2], &[0xFF, 0xFF]);
//! ```



//		Global configuration

//	Customisations of the standard linting configuration
#![allow(clippy::items_after_test_module, reason = "Not needed with separated tests")]

//	Lints specifically disabled for unit tests
#![cfg_attr(test, allow(
	non_snake_case,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_precision_loss,
	clippy::cognitive_complexity,
	clippy::default_numeric_fallback,
	clippy::exhaustive_enums,
	clippy::exhaustive_structs,
	clippy::expect_used,
	clippy::float_cmp,
	clippy::indexing_slicing,
	clippy::let_underscore_must_use,
	clippy::let_underscore_untyped,
	clippy::missing_assert_message,
	clippy::missing_panics_doc,
	clippy::must_use_candidate,
	clippy::panic,
	clippy::print_stdout,
	clippy::unwrap_in_result,
	clippy::unwrap_used,
	reason = "Not useful in unit tests"
))]



//		Modules

pub mod bits;
mod convert;
mod descriptor;
mod errors;
mod except;
mod stats;
mod walker;



//		Packages

pub use convert::{Conversion, convert};
pub use descriptor::{
	AtomicType,
	ByteOrder,
	FloatLayout,
	MAX_ELEMENT_BYTES,
	MAX_EXPONENT_BITS,
	Normalization,
	Pad,
	TypeKind,
};
pub use errors::{ConversionError, DescriptorError};
pub use except::{Disposition, ExceptionHandler, ExceptionKind};
pub use stats::{ConversionStats, StatsSink, Traversal};
