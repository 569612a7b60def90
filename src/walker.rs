//! The buffer walker.
//!
//! Source and destination elements share one buffer. When they differ in size
//! and no stride is given, the destination array occupies the same span as the
//! source array, so elements must be visited in an order that never writes
//! over a source element that has not yet been read:
//!
//!   - Narrowing conversions walk forward. The destination trails behind the
//!     source, but the first few destination elements still overlap their own
//!     source element.
//!   - Widening conversions walk backward from the end, for the mirror-image
//!     reason.
//!
//! The elements that overlap their own source are written through a scratch
//! element and copied into place afterwards. When the results go to a buffer
//! of their own none of this applies, and elements are visited in order. Every source element is copied
//! out and normalized to little-endian before conversion, so the caller's
//! buffer never doubles as workspace.

//	Slot offsets are bounded by the length check in Plan::new.
#![allow(
	clippy::indexing_slicing,
	clippy::arithmetic_side_effects,
	reason = "Offsets are validated against the buffer length up front"
)]



//		Modules																											

#[cfg(test)]
#[path = "tests/walker.rs"]
mod tests;



//		Packages																										

use crate::{
	bits,
	descriptor::{AtomicType, MAX_ELEMENT_BYTES},
	errors::ConversionError,
	except::{ExceptionHandler, Exceptions},
	stats::{ConversionStats, Traversal},
};
use tracing::trace;



//		Enums																											

//		Buffers																	
/// The memory a bulk call reads from and writes to.
#[derive(Debug)]
pub(crate) enum Buffers<'b> {
	/// Source and destination arrays share one buffer.
	Shared(&'b mut [u8]),
	
	/// The destination array lives in a buffer of its own.
	Split {
		/// The source array.
		src: &'b [u8],
		
		/// The destination array.
		dst: &'b mut [u8],
	},
}

//󰭅		Buffers																	
impl Buffers<'_> {
	//		source																
	fn source(&self) -> &[u8] {
		match self {
			Self::Shared(buf)       => buf,
			Self::Split { src, .. } => src,
		}
	}
	
	//		destination															
	fn destination(&mut self) -> &mut [u8] {
		match self {
			Self::Shared(buf)       => buf,
			Self::Split { dst, .. } => dst,
		}
	}
}

//		Outcome																	
/// How a converter finished an element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
	/// The value bits are written in little-endian order; padding and byte
	/// order are still to be applied.
	Converted,
	
	/// The exception handler wrote the element; it is final as it stands.
	Handled,
}



//		Structs																											

//		Slot																	
/// Where one element lives in the buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Slot {
	/// Index of the element in the array.
	pub(crate) index:  usize,
	
	/// Byte offset of the source element.
	pub(crate) src:    usize,
	
	/// Byte offset of the destination element.
	pub(crate) dst:    usize,
	
	/// Whether the destination must be written through the scratch element.
	pub(crate) staged: bool,
}

//		Plan																	
/// The traversal order and overlap for one bulk call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Plan {
	/// Number of elements.
	pub(crate) count:     usize,
	
	/// Source element size in bytes.
	pub(crate) src_size:  usize,
	
	/// Destination element size in bytes.
	pub(crate) dst_size:  usize,
	
	/// Distance between consecutive source elements.
	pub(crate) src_step:  usize,
	
	/// Distance between consecutive destination elements.
	pub(crate) dst_step:  usize,
	
	/// Visiting order.
	pub(crate) traversal: Traversal,
	
	/// Number of elements, counted in visiting order, that are staged.
	pub(crate) overlap:   usize,
}

//󰭅		Plan																	
impl Plan {
	//		new																	
	/// Works out the traversal for `count` elements and checks that the buffer
	/// can hold them.
	///
	/// # Errors
	///
	/// Returns [`ConversionError::InvalidStride`] if the stride is smaller than
	/// either element, or [`ConversionError::BufferTooSmall`] if `buffer_len`
	/// cannot hold every element.
	///
	pub(crate) fn new(
		src_size:   usize,
		dst_size:   usize,
		count:      usize,
		stride:     Option<usize>,
		buffer_len: usize,
	) -> Result<Self, ConversionError> {
		let widest = src_size.max(dst_size);
		if let Some(stride) = stride {
			if stride < widest {
				return Err(ConversionError::InvalidStride { stride, element_size: widest });
			}
		}
		
		let (src_step, dst_step) = stride.map_or((src_size, dst_size), |stride| (stride, stride));
		check_length(count, src_step.max(dst_step), widest, buffer_len)?;
		
		let (traversal, overlap) = if stride.is_some() || src_size == dst_size {
			(Traversal::Forward, count)
		} else if src_size > dst_size {
			(Traversal::Forward, dst_size.div_ceil(src_size - dst_size))
		} else {
			(Traversal::Backward, src_size.div_ceil(dst_size - src_size))
		};
		
		Ok(Self { count, src_size, dst_size, src_step, dst_step, traversal, overlap })
	}
	
	//		split																
	/// Works out the traversal for `count` elements read from one buffer and
	/// written to another, and checks that each buffer can hold its array.
	///
	/// Elements are always visited first to last and none are staged.
	///
	/// # Errors
	///
	/// As for [`Plan::new()`], checked against the source buffer first.
	///
	pub(crate) fn split(
		src_size: usize,
		dst_size: usize,
		count:    usize,
		stride:   Option<usize>,
		src_len:  usize,
		dst_len:  usize,
	) -> Result<Self, ConversionError> {
		let widest = src_size.max(dst_size);
		if let Some(stride) = stride {
			if stride < widest {
				return Err(ConversionError::InvalidStride { stride, element_size: widest });
			}
		}
		let (src_step, dst_step) = stride.map_or((src_size, dst_size), |stride| (stride, stride));
		check_length(count, src_step, src_size, src_len)?;
		check_length(count, dst_step, dst_size, dst_len)?;
		Ok(Self { count, src_size, dst_size, src_step, dst_step, traversal: Traversal::Forward, overlap: 0 })
	}
	
	//		slot																
	/// The `n`th element in visiting order.
	pub(crate) const fn slot(&self, n: usize) -> Slot {
		let (index, staged) = match self.traversal {
			Traversal::Forward  => (n, n < self.overlap),
			Traversal::Backward => (self.count - 1 - n, n + self.overlap >= self.count),
		};
		Slot {
			index,
			src:    index * self.src_step,
			dst:    index * self.dst_step,
			staged,
		}
	}
	
	//		slots																
	/// Every element, in visiting order.
	pub(crate) fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
		(0..self.count).map(|n| self.slot(n))
	}
}



//		Functions																										

//		check_length															
/// Checks that `count` elements of `size` bytes, `step` bytes apart, fit in
/// `len` bytes.
fn check_length(count: usize, step: usize, size: usize, len: usize) -> Result<(), ConversionError> {
	let required = if count == 0 {
		Some(0)
	} else {
		(count - 1).checked_mul(step).and_then(|span| span.checked_add(size))
	};
	match required {
		Some(required) if required <= len => Ok(()),
		required                          => Err(ConversionError::BufferTooSmall {
			required: required.unwrap_or(usize::MAX),
			actual:   len,
		}),
	}
}

//		walk																	
/// Visits every element of the buffers, handing each converter call a
/// normalized copy of the source and a destination slot.
///
/// After a [`Converted`](Outcome::Converted) element the destination padding
/// is filled and the element is put into its declared byte order. A
/// [`Handled`](Outcome::Handled) element is left exactly as the handler wrote
/// it.
///
/// # Errors
///
/// Returns any layout error from [`Plan::new()`], or the first error returned
/// by `convert`. Elements visited before the error are committed.
///
#[expect(clippy::too_many_arguments, reason = "Mirrors the bulk conversion call")]
pub(crate) fn walk<F>(
	src_type:    &AtomicType,
	dst_type:    &AtomicType,
	mut buffers: Buffers<'_>,
	count:       usize,
	stride:      Option<usize>,
	mut handler: Option<&mut (dyn ExceptionHandler + '_)>,
	stats:       &mut ConversionStats,
	mut convert: F,
) -> Result<(), ConversionError>
where
	F: FnMut(&[u8], &mut [u8], &mut Exceptions<'_, '_>) -> Result<Outcome, ConversionError>,
{
	let plan      = match &buffers {
		Buffers::Shared(buf)        => Plan::new(src_type.size(), dst_type.size(), count, stride, buf.len())?,
		Buffers::Split { src, dst } => Plan::split(src_type.size(), dst_type.size(), count, stride, src.len(), dst.len())?,
	};
	let shared    = matches!(buffers, Buffers::Shared(_));
	let src_size  = plan.src_size;
	let dst_size  = plan.dst_size;
	stats.traversal = plan.traversal;
	stats.overlap   = plan.overlap.min(count);
	
	let mut raw_buf     = [0_u8; MAX_ELEMENT_BYTES];
	let mut src_buf     = [0_u8; MAX_ELEMENT_BYTES];
	let mut scratch_buf = [0_u8; MAX_ELEMENT_BYTES];
	
	for slot in plan.slots() {
		debug_assert!(
			!shared || slot.staged || stride.is_some() || slot.dst + dst_size <= slot.src || slot.src + src_size <= slot.dst,
			"Unstaged element {} overlaps its own source",
			slot.index,
		);
		
		raw_buf[..src_size].copy_from_slice(&buffers.source()[slot.src..slot.src + src_size]);
		bits::reverse_byte_order(&mut src_buf[..src_size], &raw_buf[..src_size], src_type.byte_order);
		let raw = &raw_buf[..src_size];
		let src = &src_buf[..src_size];
		
		let outcome = {
			let dst = if slot.staged {
				let scratch = &mut scratch_buf[..dst_size];
				scratch.fill(0);
				scratch
			} else {
				&mut buffers.destination()[slot.dst..slot.dst + dst_size]
			};
			let mut exceptions = Exceptions::new(slot.index, raw, handler.as_deref_mut(), stats);
			let outcome        = convert(src, dst, &mut exceptions)?;
			if outcome == Outcome::Converted {
				dst_type.fill_padding(dst);
				bits::reorder(dst, dst_type.byte_order);
			}
			outcome
		};
		
		if slot.staged {
			buffers.destination()[slot.dst..slot.dst + dst_size].copy_from_slice(&scratch_buf[..dst_size]);
			stats.staged += 1;
		} else {
			stats.direct += 1;
		}
		stats.elements += 1;
		if outcome == Outcome::Handled {
			trace!(element = slot.index, "Element written by handler");
		}
	}
	Ok(())
}
