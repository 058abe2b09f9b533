//! Cursor primitives shared by the message parsers
//!
//! Every reader takes the unread part of the input and hands back the
//! value together with what's left after it. Nothing is read past the
//! slice a reader is given, so bounding a nested structure is a matter
//! of slicing its length prefix off first.

use crate::ParseError;

/// A parsed value together with the unread remainder of the input
pub type Parsed<'a, T> = Result<(T, &'a [u8]), ParseError>;

/// A structure of the TLS wire format
pub trait Codec: Sized {
	/// Name of the structure, used in errors
	const NAME: &'static str;

	/// Reads a value from the front of `buf`
	fn read(buf: &[u8]) -> Parsed<'_, Self>;

	/// Appends the encoding of the value to `out`
	///
	/// Fails with [`ParseError::WrongLength`] if a variable length field
	/// doesn't fit its length prefix.
	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError>;

	/// Reads a value spanning all of `buf`
	fn decode(buf: &[u8]) -> Result<Self, ParseError> {
		let res = Self::read(buf).and_then(|(v, rest)| {
			finished(rest, Self::NAME)?;
			Ok(v)
		});
		if let Err(e) = &res {
			tracing::debug!(structure = Self::NAME, error = %e, "parsing failed");
		}
		res
	}

	/// The encoding of the value
	fn encode(&self) -> Result<Vec<u8>, ParseError> {
		let mut out = Vec::new();
		self.write(&mut out)?;
		Ok(out)
	}
}

/// Fails with [`ParseError::TrailingBytes`] unless `rest` is empty
pub(crate) fn finished(rest: &[u8], what: &'static str) -> Result<(), ParseError> {
	match rest.is_empty() {
		true => Ok(()),
		false => Err(ParseError::TrailingBytes(what)),
	}
}

pub(crate) fn take<'a>(buf: &'a [u8], n: usize, what: &'static str) -> Parsed<'a, &'a [u8]> {
	if buf.len() < n {
		return Err(ParseError::Underflow(what));
	}
	Ok(buf.split_at(n))
}

pub(crate) fn array<'a, const N: usize>(buf: &'a [u8], what: &'static str) -> Parsed<'a, [u8; N]> {
	let (bytes, rest) = take(buf, N, what)?;
	let arr = <[u8; N]>::try_from(bytes).map_err(|_| ParseError::Underflow(what))?;
	Ok((arr, rest))
}

pub(crate) fn read_u8<'a>(buf: &'a [u8], what: &'static str) -> Parsed<'a, u8> {
	let ([v], rest) = array::<1>(buf, what)?;
	Ok((v, rest))
}

pub(crate) fn read_u16<'a>(buf: &'a [u8], what: &'static str) -> Parsed<'a, u16> {
	let (v, rest) = array::<2>(buf, what)?;
	Ok((u16::from_be_bytes(v), rest))
}

pub(crate) fn read_u24<'a>(buf: &'a [u8], what: &'static str) -> Parsed<'a, usize> {
	let ([a, b, c], rest) = array::<3>(buf, what)?;
	Ok((u32::from_be_bytes([0, a, b, c]) as usize, rest))
}

/// Reads a field behind a one byte length prefix
pub(crate) fn vec8<'a>(buf: &'a [u8], what: &'static str) -> Parsed<'a, &'a [u8]> {
	let (len, rest) = read_u8(buf, what)?;
	take(rest, len.into(), what)
}

/// Reads a field behind a two byte length prefix
pub(crate) fn vec16<'a>(buf: &'a [u8], what: &'static str) -> Parsed<'a, &'a [u8]> {
	let (len, rest) = read_u16(buf, what)?;
	take(rest, len.into(), what)
}

/// Reads a field behind a three byte length prefix
pub(crate) fn vec24<'a>(buf: &'a [u8], what: &'static str) -> Parsed<'a, &'a [u8]> {
	let (len, rest) = read_u24(buf, what)?;
	take(rest, len, what)
}

/// Reads exactly `count` elements, dropping those `read` maps to `None`
pub(crate) fn counted<'a, T>(
	mut buf: &'a [u8],
	count: usize,
	mut read: impl FnMut(&'a [u8]) -> Parsed<'a, Option<T>>,
) -> Parsed<'a, Vec<T>> {
	let mut items = Vec::with_capacity(count.min(buf.len()));
	for _ in 0..count {
		let (item, rest) = read(buf)?;
		items.extend(item);
		buf = rest;
	}
	Ok((items, buf))
}

/// Reads elements until `buf` is used up, dropping those `read` maps to `None`
///
/// An element that doesn't consume anything is a [`ParseError::WrongLength`],
/// so this always terminates.
pub(crate) fn bounded<'a, T>(
	mut buf: &'a [u8],
	what: &'static str,
	mut read: impl FnMut(&'a [u8]) -> Parsed<'a, Option<T>>,
) -> Result<Vec<T>, ParseError> {
	let mut items = Vec::new();
	while !buf.is_empty() {
		let (item, rest) = read(buf)?;
		if rest.len() >= buf.len() {
			return Err(ParseError::WrongLength(what));
		}
		items.extend(item);
		buf = rest;
	}
	Ok(items)
}

/// A list of fixed size elements behind a length prefix of its own
///
/// The byte length must be a multiple of `width`, and all of it must be used.
pub(crate) fn fixed_list<'a, T>(
	list: &'a [u8],
	width: usize,
	what: &'static str,
	read: impl FnMut(&'a [u8]) -> Parsed<'a, Option<T>>,
) -> Result<Vec<T>, ParseError> {
	if list.len() % width != 0 {
		return Err(ParseError::WrongLength(what));
	}
	let (items, rest) = counted(list, list.len() / width, read)?;
	finished(rest, what)?;
	Ok(items)
}

pub(crate) fn put_u16(out: &mut Vec<u8>, v: u16) {
	out.extend_from_slice(&v.to_be_bytes());
}

/// Appends whatever `body` writes behind a `width` byte length prefix
pub(crate) fn put_prefixed(
	out: &mut Vec<u8>,
	width: usize,
	what: &'static str,
	body: impl FnOnce(&mut Vec<u8>) -> Result<(), ParseError>,
) -> Result<(), ParseError> {
	let start = out.len();
	out.resize(start + width, 0);
	body(out)?;
	let len = out.len() - start - width;
	if len >= 1 << (8 * width) {
		return Err(ParseError::WrongLength(what));
	}
	let be = (len as u32).to_be_bytes();
	out[start..start + width].copy_from_slice(&be[4 - width..]);
	Ok(())
}

pub(crate) fn put_vec(
	out: &mut Vec<u8>,
	width: usize,
	what: &'static str,
	bytes: &[u8],
) -> Result<(), ParseError> {
	put_prefixed(out, width, what, |out| {
		out.extend_from_slice(bytes);
		Ok(())
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn integers() {
		let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
		let (a, rest) = read_u8(&buf, "a").unwrap();
		let (b, rest) = read_u16(rest, "b").unwrap();
		let (c, rest) = read_u24(rest, "c").unwrap();
		assert_eq!((a, b, c), (0x01, 0x0203, 0x040506));
		assert!(rest.is_empty());
		assert_eq!(read_u16(&buf[..1], "b"), Err(ParseError::Underflow("b")));
	}

	#[test]
	fn length_prefixes() {
		let buf = [0x00, 0x02, 0xaa, 0xbb, 0xcc];
		let (v, rest) = vec16(&buf, "v").unwrap();
		assert_eq!(v, &[0xaa, 0xbb]);
		assert_eq!(rest, &[0xcc]);
		assert_eq!(vec8(&[0x03, 0x00], "v"), Err(ParseError::Underflow("v")));
		assert_eq!(vec24(&[0x00, 0x00], "v"), Err(ParseError::Underflow("v")));
	}

	#[test]
	fn counted_drops_none() {
		let buf = [1, 0, 2, 9];
		let (items, rest) = counted(&buf, 3, |b| {
			let (v, rest) = read_u8(b, "item")?;
			Ok(((v != 0).then_some(v), rest))
		})
		.unwrap();
		assert_eq!(items, vec![1, 2]);
		assert_eq!(rest, &[9]);
		assert!(counted(&buf, 5, |b| read_u8(b, "item").map(|(v, r)| (Some(v), r))).is_err());
	}

	#[test]
	fn bounded_rejects_stuck_reader() {
		let res = bounded(&[1, 2], "list", |b| Ok((Some(()), b)));
		assert_eq!(res, Err(ParseError::WrongLength("list")));
		let items = bounded(&[0, 1, 5, 0, 0], "list", |b| {
			let (v, rest) = vec8(b, "item")?;
			Ok((Some(v.len()), rest))
		})
		.unwrap();
		assert_eq!(items, vec![0, 1, 0, 0]);
	}

	fn item(b: &[u8]) -> Parsed<'_, Option<u16>> {
		read_u16(b, "item").map(|(v, r)| (Some(v), r))
	}

	#[test]
	fn fixed_list_needs_whole_elements() {
		assert_eq!(fixed_list(&[0, 1, 0, 2], 2, "list", item).unwrap(), vec![1, 2]);
		assert_eq!(
			fixed_list(&[0, 1, 0], 2, "list", item),
			Err(ParseError::WrongLength("list"))
		);
	}

	#[test]
	fn prefixed_writes() {
		let mut out = Vec::new();
		put_vec(&mut out, 3, "v", &[7, 8]).unwrap();
		assert_eq!(out, vec![0, 0, 2, 7, 8]);
		let mut out = Vec::new();
		assert_eq!(
			put_vec(&mut out, 1, "v", &[0; 256]),
			Err(ParseError::WrongLength("v"))
		);
	}
}
