use std::fmt;
use std::hash::{Hash, Hasher};

use yasna::tags::{
	TAG_BMPSTRING, TAG_IA5STRING, TAG_PRINTABLESTRING, TAG_TELETEXSTRING, TAG_UNIVERSALSTRING,
};
use yasna::{ASN1Result, BERReaderSeq, DERWriter, Tag};

use crate::grammar::Context;
use crate::DecodeError;

/// The ASN.1 string type an attribute value was encoded as
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKind {
	/// `UTF8String`, the canonical encoding
	Utf8,
	/// `PrintableString`: A-Z, a-z, 0-9, space and `'()+,-./:=?`
	Printable,
	/// `IA5String`: ASCII
	Ia5,
	/// `TeletexString`, interpreted as Latin-1
	Teletex,
	/// `UniversalString`: UTF-32BE
	Universal,
	/// `BMPString`: UCS-2 big endian
	Bmp,
}

impl StringKind {
	fn decode(self, bytes: Vec<u8>) -> Option<String> {
		match self {
			StringKind::Utf8 => String::from_utf8(bytes).ok(),
			StringKind::Printable => {
				let printable = bytes.iter().all(|&c| {
					matches!(c,
						b'A'..=b'Z'
						| b'a'..=b'z'
						| b'0'..=b'9'
						| b' '
						| b'\''
						| b'('
						| b')'
						| b'+'
						| b','
						| b'-'
						| b'.'
						| b'/'
						| b':'
						| b'='
						| b'?')
				});
				printable.then(|| bytes.into_iter().map(char::from).collect())
			},
			StringKind::Ia5 => bytes
				.is_ascii()
				.then(|| bytes.into_iter().map(char::from).collect()),
			StringKind::Teletex => Some(bytes.into_iter().map(char::from).collect()),
			StringKind::Universal => {
				if bytes.len() % 4 != 0 {
					return None;
				}
				bytes
					.chunks_exact(4)
					.map(|c| char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
					.collect()
			},
			StringKind::Bmp => {
				if bytes.len() % 2 != 0 {
					return None;
				}
				// UCS-2 has no surrogate pairs, so every code unit is a code point
				bytes
					.chunks_exact(2)
					.map(|c| char::from_u32(u16::from_be_bytes([c[0], c[1]]).into()))
					.collect()
			},
		}
	}
}

const TAGGED_KINDS: [(StringKind, Tag); 5] = [
	(StringKind::Printable, TAG_PRINTABLESTRING),
	(StringKind::Ia5, TAG_IA5STRING),
	(StringKind::Teletex, TAG_TELETEXSTRING),
	(StringKind::Universal, TAG_UNIVERSALSTRING),
	(StringKind::Bmp, TAG_BMPSTRING),
];

/// An attribute value of a distinguished name
///
/// Any of the six string types is accepted on decoding and converted to
/// text. Encoding always produces the [canonical](DirectoryString::canonical)
/// form, a `UTF8String`, so the original string type doesn't survive a
/// round trip. Equality and hashing consider the text only.
#[derive(Clone, Debug)]
pub struct DirectoryString {
	kind: StringKind,
	text: String,
}

impl DirectoryString {
	/// The string type this value was decoded from
	pub fn kind(&self) -> StringKind {
		self.kind
	}

	/// The text of the value
	pub fn as_str(&self) -> &str {
		&self.text
	}

	/// The text of the value
	pub fn into_string(self) -> String {
		self.text
	}

	/// The form this value gets encoded as
	pub fn canonical(&self) -> DirectoryString {
		DirectoryString {
			kind: StringKind::Utf8,
			text: self.text.clone(),
		}
	}

	/// Whether encoding preserves the string type
	pub fn is_canonical(&self) -> bool {
		self.kind == StringKind::Utf8
	}

	/// Reads the DirectoryString CHOICE as the next element of `seq`
	pub(crate) fn read(seq: &mut BERReaderSeq<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		if let Some(text) = seq.read_optional(|r| r.read_utf8string())? {
			return Ok(DirectoryString {
				kind: StringKind::Utf8,
				text,
			});
		}
		for (kind, tag) in TAGGED_KINDS {
			let Some(bytes) = seq.read_optional(|r| r.read_tagged_implicit(tag, |r| r.read_bytes()))?
			else {
				continue;
			};
			return cx.map(Ok(bytes), |bytes| match kind.decode(bytes) {
				Some(text) => Ok(DirectoryString { kind, text }),
				None => Err(DecodeError::MalformedStructure("DirectoryString")),
			});
		}
		Err(cx.fail(DecodeError::MalformedStructure("DirectoryString")))
	}

	pub(crate) fn write(&self, writer: DERWriter<'_>) {
		writer.write_utf8_string(self.canonical().as_str());
	}
}

impl PartialEq for DirectoryString {
	fn eq(&self, other: &Self) -> bool {
		self.text == other.text
	}
}

impl Eq for DirectoryString {}

/// The `Hash` trait is not derived, but implemented according to impl of the `PartialEq` trait
impl Hash for DirectoryString {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.text.hash(state);
	}
}

impl From<String> for DirectoryString {
	fn from(text: String) -> Self {
		DirectoryString {
			kind: StringKind::Utf8,
			text,
		}
	}
}

impl From<&str> for DirectoryString {
	fn from(text: &str) -> Self {
		text.to_owned().into()
	}
}

impl AsRef<str> for DirectoryString {
	fn as_ref(&self) -> &str {
		&self.text
	}
}

impl fmt::Display for DirectoryString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self.as_str(), f)
	}
}

impl PartialEq<str> for DirectoryString {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for DirectoryString {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grammar::{decode, Grammar, Mode};

	/// SEQUENCE { DirectoryString }, just enough structure to drive the CHOICE
	#[derive(Debug)]
	struct Wrapped(DirectoryString);

	impl Grammar for Wrapped {
		const NAME: &'static str = "Wrapped";

		fn read(reader: yasna::BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
			reader.read_sequence(|seq| DirectoryString::read(seq, cx).map(Wrapped))
		}

		fn write(&self, writer: DERWriter<'_>) {
			writer.write_sequence(|seq| self.0.write(seq.next()))
		}
	}

	fn wrapped(tag: u8, content: &[u8]) -> Vec<u8> {
		let mut der = vec![0x30, content.len() as u8 + 2, tag, content.len() as u8];
		der.extend_from_slice(content);
		der
	}

	#[test]
	fn printable_string() {
		let s = Wrapped::from_der(&wrapped(0x13, b"Crab widgits SE")).unwrap().0;
		assert_eq!(s.kind(), StringKind::Printable);
		assert_eq!(s, "Crab widgits SE");
		assert!(Wrapped::from_der(&wrapped(0x13, b"a@b")).is_err());
		assert!(Wrapped::from_der(&wrapped(0x13, b"*")).is_err());
	}

	#[test]
	fn ia5_string() {
		let s = Wrapped::from_der(&wrapped(0x16, b"ops@example.com")).unwrap().0;
		assert_eq!(s.kind(), StringKind::Ia5);
		assert_eq!(s, "ops@example.com");
		assert_eq!(
			Wrapped::from_der(&wrapped(0x16, &[0x8f])).unwrap_err(),
			DecodeError::MalformedStructure("DirectoryString")
		);
	}

	#[test]
	fn teletex_string() {
		let s = Wrapped::from_der(&wrapped(0x14, &[b'M', 0xfc, b'n'])).unwrap().0;
		assert_eq!(s.kind(), StringKind::Teletex);
		assert_eq!(s, "M\u{fc}n");
	}

	#[test]
	fn bmp_string() {
		const BYTES: &[u8] = &[0x00, 0x43, 0x00, 0x72, 0x00, 0x61, 0x00, 0x62];
		let s = Wrapped::from_der(&wrapped(0x1e, BYTES)).unwrap().0;
		assert_eq!(s.kind(), StringKind::Bmp);
		assert_eq!(s, "Crab");
		// odd length
		assert!(Wrapped::from_der(&wrapped(0x1e, &BYTES[..3])).is_err());
		// lone surrogate
		assert!(Wrapped::from_der(&wrapped(0x1e, &[0xd8, 0x00])).is_err());
	}

	#[test]
	fn universal_string() {
		const BYTES: &[u8] = &[0x00, 0x00, 0x00, 0x43, 0x00, 0x01, 0xf9, 0x80];
		let s = Wrapped::from_der(&wrapped(0x1c, BYTES)).unwrap().0;
		assert_eq!(s.kind(), StringKind::Universal);
		assert_eq!(s, "C\u{1f980}");
		assert!(Wrapped::from_der(&wrapped(0x1c, &[0x00, 0x11, 0x00, 0x00])).is_err());
	}

	#[test]
	fn other_types_are_rejected() {
		// INTEGER 5
		assert_eq!(
			Wrapped::from_der(&wrapped(0x02, &[0x05])).unwrap_err(),
			DecodeError::MalformedStructure("DirectoryString")
		);
	}

	#[test]
	fn encodes_canonical_form() {
		let der = wrapped(0x13, b"Master Cert");
		let s = decode::<Wrapped>(&der, Mode::Der).unwrap();
		assert!(!s.0.is_canonical());
		let reencoded = s.to_der();
		assert_eq!(reencoded, wrapped(0x0c, b"Master Cert"));
		let s2 = Wrapped::from_der(&reencoded).unwrap();
		assert!(s2.0.is_canonical());
		assert_eq!(s.0, s2.0);
	}
}
