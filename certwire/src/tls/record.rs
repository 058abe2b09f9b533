use super::codec::{array, read_u16, read_u8, take, Codec, Parsed};
use super::enums::{AlertDescription, AlertLevel, ContentType};
use crate::ParseError;

/// Largest record body allowed, which is the plaintext limit plus the
/// expansion compression and encryption may add
pub const MAX_RECORD_LEN: u16 = (1 << 14) + 2048;

/// A protocol version, as found in record headers and hellos
///
/// Versions order by age, with any unknown later version sorting last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
	/// SSL 3.0
	Ssl3,
	/// TLS 1.0
	Tls10,
	/// TLS 1.1
	Tls11,
	/// TLS 1.2
	Tls12,
	/// A later `3.minor` version
	///
	/// Only minor versions above 3 are read into this variant. `Other(0)`
	/// to `Other(3)` encode like the named versions and read back as those.
	Other(u8),
}

impl ProtocolVersion {
	fn minor(self) -> u8 {
		match self {
			ProtocolVersion::Ssl3 => 0,
			ProtocolVersion::Tls10 => 1,
			ProtocolVersion::Tls11 => 2,
			ProtocolVersion::Tls12 => 3,
			ProtocolVersion::Other(minor) => minor,
		}
	}
}

impl Codec for ProtocolVersion {
	const NAME: &'static str = "protocol version";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let ([major, minor], rest) = array::<2>(buf, Self::NAME)?;
		let version = match (major, minor) {
			(3, 0) => ProtocolVersion::Ssl3,
			(3, 1) => ProtocolVersion::Tls10,
			(3, 2) => ProtocolVersion::Tls11,
			(3, 3) => ProtocolVersion::Tls12,
			(3, minor) => ProtocolVersion::Other(minor),
			_ => return Err(ParseError::Unknown(format!("protocol version {major}.{minor}"))),
		};
		Ok((version, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		out.extend_from_slice(&[3, self.minor()]);
		Ok(())
	}
}

/// The five byte header in front of every record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordHeader {
	/// What the record carries
	pub content_type: ContentType,
	/// Version of the record layer
	pub version: ProtocolVersion,
	/// Length of the body, at most [`MAX_RECORD_LEN`]
	pub length: u16,
}

impl Codec for RecordHeader {
	const NAME: &'static str = "record";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (ty, rest) = read_u8(buf, Self::NAME)?;
		let content_type = ContentType::from_wire(ty)
			.ok_or_else(|| ParseError::Unknown(format!("content type {ty}")))?;
		let (version, rest) = ProtocolVersion::read(rest)?;
		let (length, rest) = read_u16(rest, Self::NAME)?;
		if length > MAX_RECORD_LEN {
			return Err(ParseError::WrongLength(Self::NAME));
		}
		let header = RecordHeader {
			content_type,
			version,
			length,
		};
		Ok((header, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		if self.length > MAX_RECORD_LEN {
			return Err(ParseError::WrongLength(Self::NAME));
		}
		out.push(self.content_type.to_wire());
		self.version.write(out)?;
		out.extend_from_slice(&self.length.to_be_bytes());
		Ok(())
	}
}

/// Splits the first record off `buf`
///
/// Returns the header, the record body and whatever follows the record.
pub fn record(buf: &[u8]) -> Result<(RecordHeader, &[u8], &[u8]), ParseError> {
	let (header, rest) = RecordHeader::read(buf)?;
	let (body, rest) = take(rest, header.length.into(), RecordHeader::NAME)?;
	Ok((header, body, rest))
}

/// An alert message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alert {
	/// Severity
	pub level: AlertLevel,
	/// What went wrong
	pub description: AlertDescription,
}

impl Codec for Alert {
	const NAME: &'static str = "alert";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let ([level, description], rest) = array::<2>(buf, Self::NAME)?;
		let level = AlertLevel::from_wire(level)
			.ok_or_else(|| ParseError::Unknown(format!("alert level {level}")))?;
		let description = AlertDescription::from_wire(description)
			.ok_or_else(|| ParseError::Unknown(format!("alert description {description}")))?;
		Ok((Alert { level, description }, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		out.extend_from_slice(&[self.level.to_wire(), self.description.to_wire()]);
		Ok(())
	}
}

/// The ChangeCipherSpec message, a single byte of value 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChangeCipherSpec;

impl Codec for ChangeCipherSpec {
	const NAME: &'static str = "change cipher spec";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		match read_u8(buf, Self::NAME)? {
			(1, rest) => Ok((ChangeCipherSpec, rest)),
			(v, _) => Err(ParseError::Unknown(format!("change cipher spec {v}"))),
		}
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		out.push(1);
		Ok(())
	}
}
