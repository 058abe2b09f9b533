use super::codec::{put_vec, read_u8, vec16, Codec, Parsed};
use super::enums::{HashAlgorithm, SignatureAlgorithm};
use super::record::ProtocolVersion;
use crate::ParseError;

/// Ephemeral Diffie-Hellman parameters of a ServerKeyExchange
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DhParameters {
	/// The prime modulus
	pub p: Vec<u8>,
	/// The generator
	pub g: Vec<u8>,
	/// The server's public value
	pub ys: Vec<u8>,
}

impl Codec for DhParameters {
	const NAME: &'static str = "DH parameters";

	/// Reads the parameters, leaving the signature that usually follows them
	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (p, rest) = vec16(buf, "DH p")?;
		let (g, rest) = vec16(rest, "DH g")?;
		let (ys, rest) = vec16(rest, "DH Ys")?;
		let params = DhParameters {
			p: p.to_vec(),
			g: g.to_vec(),
			ys: ys.to_vec(),
		};
		Ok((params, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		put_vec(out, 2, "DH p", &self.p)?;
		put_vec(out, 2, "DH g", &self.g)?;
		put_vec(out, 2, "DH Ys", &self.ys)
	}
}

pub(crate) fn read_signature_scheme(
	buf: &[u8],
) -> Parsed<'_, (HashAlgorithm, SignatureAlgorithm)> {
	let (hash, rest) = read_u8(buf, "hash algorithm")?;
	let hash = HashAlgorithm::from_wire(hash)
		.ok_or_else(|| ParseError::Unknown(format!("hash algorithm {hash}")))?;
	let (signature, rest) = read_u8(rest, "signature algorithm")?;
	let signature = SignatureAlgorithm::from_wire(signature)
		.ok_or_else(|| ParseError::Unknown(format!("signature algorithm {signature}")))?;
	Ok(((hash, signature), rest))
}

/// A `digitally-signed` value
///
/// From TLS 1.2 on it starts with the algorithm pair the signature was
/// made with; earlier versions imply the algorithms from the cipher suite.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DigitallySigned {
	/// The algorithms, present exactly for TLS 1.2 and later
	pub algorithm: Option<(HashAlgorithm, SignatureAlgorithm)>,
	/// The signature
	pub signature: Vec<u8>,
}

impl DigitallySigned {
	/// Reads the value in the form used by `version`
	pub fn read(buf: &[u8], version: ProtocolVersion) -> Parsed<'_, Self> {
		let (algorithm, rest) = match version >= ProtocolVersion::Tls12 {
			true => {
				let (pair, rest) = read_signature_scheme(buf)?;
				(Some(pair), rest)
			},
			false => (None, buf),
		};
		let (signature, rest) = vec16(rest, "signature")?;
		let signed = DigitallySigned {
			algorithm,
			signature: signature.to_vec(),
		};
		Ok((signed, rest))
	}

	/// Reads a value that spans all of `buf`
	pub fn decode(buf: &[u8], version: ProtocolVersion) -> Result<Self, ParseError> {
		let (signed, rest) = Self::read(buf, version)?;
		super::codec::finished(rest, "digitally-signed")?;
		Ok(signed)
	}

	/// Appends the encoding of the value to `out`
	pub fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		if let Some((hash, signature)) = self.algorithm {
			out.extend_from_slice(&[hash.to_wire(), signature.to_wire()]);
		}
		put_vec(out, 2, "signature", &self.signature)
	}
}
