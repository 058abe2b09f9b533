//! Bidirectional codecs on top of yasna
//!
//! Every structure in this crate implements [`Grammar`]: a reader and a
//! writer for the same ASN.1 production. The reader half runs inside a
//! yasna parse and can only surface yasna's own error type, so a
//! [`Context`] travels along with it to keep the typed [`DecodeError`]
//! and the name of the field being decoded.

use std::cell::{Cell, RefCell};

use yasna::{ASN1Error, ASN1ErrorKind, ASN1Result, BERReader, DERWriter};

use crate::DecodeError;

/// Encoding rules accepted when decoding
///
/// Encoding always produces DER.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
	/// Distinguished encoding rules, rejecting anything non-canonical
	#[default]
	Der,
	/// Basic encoding rules, additionally accepting indefinite lengths,
	/// constructed strings and non-minimal encodings
	Ber,
}

/// An ASN.1 production with a decoder and a DER encoder
///
/// `Self::from_der(&v.to_der())` yields a value equal to `v` for every
/// value a grammar can produce.
pub trait Grammar: Sized {
	/// Name of the production, used to label errors that occur outside of any field
	const NAME: &'static str;

	/// Decodes the production from `reader`
	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self>;

	/// Encodes the production into `writer`
	fn write(&self, writer: DERWriter<'_>);

	/// Decodes a DER encoded value, rejecting trailing data
	fn from_der(der: &[u8]) -> Result<Self, DecodeError> {
		decode(der, Mode::Der)
	}

	/// Decodes a BER encoded value, rejecting trailing data
	fn from_ber(ber: &[u8]) -> Result<Self, DecodeError> {
		decode(ber, Mode::Ber)
	}

	/// Serializes the value as DER
	fn to_der(&self) -> Vec<u8> {
		yasna::construct_der(|writer| self.write(writer))
	}
}

/// Decodes a `G` from `input` with the given encoding rules
pub fn decode<G: Grammar>(input: &[u8], mode: Mode) -> Result<G, DecodeError> {
	let cx = Context::default();
	let res = match mode {
		Mode::Der => yasna::parse_der(input, |reader| G::read(reader, &cx)),
		Mode::Ber => yasna::parse_ber(input, |reader| G::read(reader, &cx)),
	};
	cx.finish(G::NAME, res).map_err(|e| {
		tracing::debug!(grammar = G::NAME, ?mode, error = %e, "decoding failed");
		e
	})
}

/// Decode state shared by the readers of one [`decode`] call
#[derive(Default)]
pub struct Context {
	field: Cell<Option<&'static str>>,
	failure: RefCell<Option<DecodeError>>,
}

impl Context {
	/// Labels an error of `res` with `field`, unless a field nested
	/// inside of it was already blamed
	///
	/// Must not be used within [`yasna::BERReaderSeq::read_optional`]
	/// callbacks, as the label would stick even when the optional
	/// element turns out to be absent.
	pub fn field<T>(&self, field: &'static str, res: ASN1Result<T>) -> ASN1Result<T> {
		if res.is_err() && self.field.get().is_none() {
			self.field.set(Some(field));
		}
		res
	}

	/// Records `err` as the reason of the decoding failure
	///
	/// The returned value is meant to be propagated out of the yasna callback.
	pub fn fail(&self, err: DecodeError) -> ASN1Error {
		let mut failure = self.failure.borrow_mut();
		if failure.is_none() {
			*failure = Some(err);
		}
		ASN1Error::new(ASN1ErrorKind::Invalid)
	}

	/// Lifts a fallible conversion over a raw decoded value
	///
	/// This is the decoding half of a bidirectional mapping, the encoding
	/// half being the corresponding `write` call on the converted type.
	pub fn map<R, T>(
		&self,
		raw: ASN1Result<R>,
		f: impl FnOnce(R) -> Result<T, DecodeError>,
	) -> ASN1Result<T> {
		f(raw?).map_err(|e| self.fail(e))
	}

	fn finish<T>(self, root: &'static str, res: ASN1Result<T>) -> Result<T, DecodeError> {
		let e = match res {
			Ok(v) => return Ok(v),
			Err(e) => e,
		};
		if let Some(failure) = self.failure.into_inner() {
			return Err(failure);
		}
		Err(DecodeError::Asn1 {
			field: self.field.get().unwrap_or(root),
			kind: e.kind(),
		})
	}
}

/// Resolves a field declared with a DEFAULT value
pub fn undefault<T>(value: Option<T>, default: T) -> T {
	value.unwrap_or(default)
}

/// Inverse of [`undefault`]: yields `None` when `value` equals `default`
/// and therefore must be omitted from DER
pub fn redefault<'a, T: PartialEq>(value: &'a T, default: &T) -> Option<&'a T> {
	if value == default {
		None
	} else {
		Some(value)
	}
}

/// Mask of the unused low bits in the last byte of a bit string
fn padding(byte_len: usize, bit_len: usize) -> u8 {
	let unused = (byte_len * 8).saturating_sub(bit_len) as u32;
	!0xffu8.checked_shl(unused).unwrap_or(0)
}

/// An ASN.1 BIT STRING
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitString {
	bytes: Vec<u8>,
	bit_len: usize,
}

impl BitString {
	/// Creates a bit string of `bit_len` bits stored in `bytes`
	///
	/// Returns `None` if `bytes` is not the minimal number of bytes
	/// to hold `bit_len` bits, or if any of the padding bits is set.
	pub fn new(bytes: Vec<u8>, bit_len: usize) -> Option<Self> {
		if bytes.len() != (bit_len + 7) / 8 {
			return None;
		}
		if bytes.last().is_some_and(|last| last & padding(bytes.len(), bit_len) != 0) {
			return None;
		}
		Some(Self { bytes, bit_len })
	}

	/// Creates a bit string consisting of all bits of `bytes`
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		let bytes = bytes.into();
		let bit_len = bytes.len() * 8;
		Self { bytes, bit_len }
	}

	/// The bits, padded to the next full byte
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// The number of bits
	pub fn bit_len(&self) -> usize {
		self.bit_len
	}

	/// Reads a BIT STRING, clearing any padding bits BER lets through
	pub(crate) fn read(reader: BERReader<'_, '_>) -> ASN1Result<Self> {
		let (mut bytes, bit_len) = reader.read_bitvec_bytes()?;
		let mask = padding(bytes.len(), bit_len);
		if let Some(last) = bytes.last_mut() {
			*last &= !mask;
		}
		Ok(Self { bytes, bit_len })
	}

	pub(crate) fn write(&self, writer: DERWriter<'_>) {
		writer.write_bitvec_bytes(&self.bytes, self.bit_len);
	}
}
