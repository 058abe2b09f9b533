use pki_types::CertificateDer;

use super::codec::{
	array, bounded, finished, fixed_list, put_prefixed, put_u16, put_vec, read_u16, read_u24,
	read_u8, take, vec16, vec24, vec8, Codec, Parsed,
};
use super::enums::{
	CipherSuite, CompressionMethod, EcPointFormat, ExtensionType, HandshakeType, HashAlgorithm,
	MaxFragmentLength, NamedCurve, SignatureAlgorithm,
};
use super::key_exchange::read_signature_scheme;
use super::record::ProtocolVersion;
use crate::ParseError;

const HOST_NAME: u8 = 0;

/// A hello extension
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Extension {
	/// server_name, restricted to at most one host name
	Hostname(Option<String>),
	/// max_fragment_length
	MaxFragmentLength(MaxFragmentLength),
	/// elliptic_curves, also known as supported_groups
	EllipticCurves(Vec<NamedCurve>),
	/// ec_point_formats
	EcPointFormats(Vec<EcPointFormat>),
	/// renegotiation_info, carrying the verify data of the previous handshake
	SecureRenegotiation(Vec<u8>),
	/// padding of the given number of zero bytes
	Padding(usize),
	/// signature_algorithms
	SignatureAlgorithms(Vec<(HashAlgorithm, SignatureAlgorithm)>),
	/// Any other extension, with its type and raw data
	Unknown(u16, Vec<u8>),
}

impl Extension {
	/// The type of the extension
	pub fn extension_type(&self) -> ExtensionType {
		match self {
			Extension::Hostname(_) => ExtensionType::ServerName,
			Extension::MaxFragmentLength(_) => ExtensionType::MaxFragmentLength,
			Extension::EllipticCurves(_) => ExtensionType::EllipticCurves,
			Extension::EcPointFormats(_) => ExtensionType::EcPointFormats,
			Extension::SecureRenegotiation(_) => ExtensionType::RenegotiationInfo,
			Extension::Padding(_) => ExtensionType::Padding,
			Extension::SignatureAlgorithms(_) => ExtensionType::SignatureAlgorithms,
			Extension::Unknown(ty, _) => ExtensionType::from_wire(*ty),
		}
	}

	fn read_data(ty: ExtensionType, data: &[u8]) -> Result<Self, ParseError> {
		let ext = match ty {
			ExtensionType::ServerName => Extension::Hostname(read_hostname(data)?),
			ExtensionType::MaxFragmentLength => {
				let (v, rest) = read_u8(data, "max fragment length")?;
				finished(rest, "max fragment length")?;
				let mfl = MaxFragmentLength::from_wire(v)
					.ok_or_else(|| ParseError::Unknown(format!("max fragment length {v}")))?;
				Extension::MaxFragmentLength(mfl)
			},
			ExtensionType::EllipticCurves => {
				let (list, rest) = vec16(data, "elliptic curves")?;
				finished(rest, "elliptic curves")?;
				let curves = fixed_list(list, 2, "elliptic curves", |b| {
					let (v, rest) = read_u16(b, "elliptic curve")?;
					Ok((Some(NamedCurve::from_wire(v)), rest))
				})?;
				Extension::EllipticCurves(curves)
			},
			ExtensionType::EcPointFormats => {
				let (list, rest) = vec8(data, "ec point formats")?;
				finished(rest, "ec point formats")?;
				let formats = fixed_list(list, 1, "ec point formats", |b| {
					let (v, rest) = read_u8(b, "ec point format")?;
					Ok((Some(EcPointFormat::from_wire(v)), rest))
				})?;
				Extension::EcPointFormats(formats)
			},
			ExtensionType::SignatureAlgorithms => {
				let (list, rest) = vec16(data, "signature algorithms")?;
				finished(rest, "signature algorithms")?;
				let pairs = fixed_list(list, 2, "signature algorithms", |b| {
					let (pair, rest) = read_signature_scheme(b)?;
					Ok((Some(pair), rest))
				})?;
				Extension::SignatureAlgorithms(pairs)
			},
			ExtensionType::Padding => {
				if let Some(pos) = data.iter().position(|&b| b != 0) {
					return Err(ParseError::Unknown(format!("non-zero padding byte at {pos}")));
				}
				Extension::Padding(data.len())
			},
			ExtensionType::RenegotiationInfo => {
				let (verify_data, rest) = vec8(data, "renegotiation info")?;
				finished(rest, "renegotiation info")?;
				Extension::SecureRenegotiation(verify_data.to_vec())
			},
			ExtensionType::Unknown(ty) => {
				tracing::trace!(extension_type = ty, len = data.len(), "keeping unknown extension");
				Extension::Unknown(ty, data.to_vec())
			},
		};
		Ok(ext)
	}

	fn write_data(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		match self {
			Extension::Hostname(name) => put_prefixed(out, 2, "server name list", |out| {
				if let Some(name) = name {
					out.push(HOST_NAME);
					put_vec(out, 2, "host name", name.as_bytes())?;
				}
				Ok(())
			}),
			Extension::MaxFragmentLength(mfl) => {
				out.push(mfl.to_wire());
				Ok(())
			},
			Extension::EllipticCurves(curves) => put_prefixed(out, 2, "elliptic curves", |out| {
				for curve in curves {
					put_u16(out, curve.to_wire());
				}
				Ok(())
			}),
			Extension::EcPointFormats(formats) => put_prefixed(out, 1, "ec point formats", |out| {
				out.extend(formats.iter().map(|f| f.to_wire()));
				Ok(())
			}),
			Extension::SecureRenegotiation(verify_data) => {
				put_vec(out, 1, "renegotiation info", verify_data)
			},
			Extension::Padding(len) => {
				out.resize(out.len() + len, 0);
				Ok(())
			},
			Extension::SignatureAlgorithms(pairs) => {
				put_prefixed(out, 2, "signature algorithms", |out| {
					for (hash, signature) in pairs {
						out.extend_from_slice(&[hash.to_wire(), signature.to_wire()]);
					}
					Ok(())
				})
			},
			Extension::Unknown(_, data) => {
				out.extend_from_slice(data);
				Ok(())
			},
		}
	}
}

/// Reads the server_name extension data
///
/// Names of a type other than host_name are skipped. Empty data, as sent
/// by servers to acknowledge the extension, counts as no name.
fn read_hostname(data: &[u8]) -> Result<Option<String>, ParseError> {
	if data.is_empty() {
		return Ok(None);
	}
	let (list, rest) = vec16(data, "server name list")?;
	finished(rest, "server name list")?;
	let mut names = bounded(list, "server name list", |b| {
		let (ty, rest) = read_u8(b, "server name type")?;
		let (name, rest) = vec16(rest, "server name")?;
		if ty != HOST_NAME {
			tracing::trace!(name_type = ty, "skipping server name");
			return Ok((None, rest));
		}
		let name = String::from_utf8(name.to_vec())
			.map_err(|_| ParseError::Unknown("non-UTF-8 host name".to_string()))?;
		Ok((Some(name), rest))
	})?;
	match names.len() {
		0 | 1 => Ok(names.pop()),
		_ => Err(ParseError::Unknown("multiple names".to_string())),
	}
}

impl Codec for Extension {
	const NAME: &'static str = "extension";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (ty, rest) = read_u16(buf, "extension type")?;
		let (data, rest) = vec16(rest, Self::NAME)?;
		let ext = Self::read_data(ExtensionType::from_wire(ty), data)?;
		Ok((ext, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		put_u16(out, self.extension_type().to_wire());
		put_prefixed(out, 2, Self::NAME, |out| self.write_data(out))
	}
}

impl Codec for Vec<CipherSuite> {
	const NAME: &'static str = "cipher suites";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (list, rest) = vec16(buf, Self::NAME)?;
		let suites = fixed_list(list, 2, Self::NAME, |b| {
			let (v, rest) = read_u16(b, "cipher suite")?;
			Ok((Some(CipherSuite::from_wire(v)), rest))
		})?;
		Ok((suites, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		put_prefixed(out, 2, Self::NAME, |out| {
			for suite in self {
				put_u16(out, suite.to_wire());
			}
			Ok(())
		})
	}
}

impl Codec for CipherSuite {
	const NAME: &'static str = "cipher suite";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (v, rest) = read_u16(buf, Self::NAME)?;
		Ok((CipherSuite::from_wire(v), rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		put_u16(out, self.to_wire());
		Ok(())
	}
}

impl Codec for Vec<CompressionMethod> {
	const NAME: &'static str = "compression methods";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (list, rest) = vec8(buf, Self::NAME)?;
		let methods = fixed_list(list, 1, Self::NAME, |b| {
			let (v, rest) = read_u8(b, "compression method")?;
			Ok((Some(CompressionMethod::from_wire(v)), rest))
		})?;
		Ok((methods, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		put_prefixed(out, 1, Self::NAME, |out| {
			out.extend(self.iter().map(|m| m.to_wire()));
			Ok(())
		})
	}
}

impl Codec for CompressionMethod {
	const NAME: &'static str = "compression method";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (v, rest) = read_u8(buf, Self::NAME)?;
		Ok((CompressionMethod::from_wire(v), rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		out.push(self.to_wire());
		Ok(())
	}
}

/// The body shared by ClientHello and ServerHello
///
/// A client offers lists of cipher suites and compression methods, the
/// server picks one of each.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hello<S, C> {
	/// Highest version supported by the client, or the version chosen by the server
	pub version: ProtocolVersion,
	/// Random bytes
	pub random: [u8; 32],
	/// Session to resume, `None` when the session ID is empty
	pub session_id: Option<Vec<u8>>,
	/// Cipher suites offered, or the one chosen
	pub ciphersuites: S,
	/// Compression methods offered, or the one chosen
	pub compression_methods: C,
	/// Extensions, empty when the extensions block is missing
	pub extensions: Vec<Extension>,
}

/// A ClientHello message body
pub type ClientHello = Hello<Vec<CipherSuite>, Vec<CompressionMethod>>;

/// A ServerHello message body
pub type ServerHello = Hello<CipherSuite, CompressionMethod>;

impl<S, C> Hello<S, C> {
	/// Looks up the first extension of the given type
	pub fn extension(&self, ty: ExtensionType) -> Option<&Extension> {
		self.extensions
			.iter()
			.find(|ext| ext.extension_type() == ty)
	}
}

impl<S: Codec, C: Codec> Codec for Hello<S, C> {
	const NAME: &'static str = "hello";

	/// Reads a hello body, taking everything after the compression
	/// methods as the extensions block
	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (version, rest) = ProtocolVersion::read(buf)?;
		let (random, rest) = array::<32>(rest, "random")?;
		let (session_id, rest) = vec8(rest, "session id")?;
		if session_id.len() > 32 {
			return Err(ParseError::WrongLength("session id"));
		}
		let session_id = (!session_id.is_empty()).then(|| session_id.to_vec());
		let (ciphersuites, rest) = S::read(rest)?;
		let (compression_methods, rest) = C::read(rest)?;
		let (extensions, rest) = match rest.is_empty() {
			true => (Vec::new(), rest),
			false => {
				let (block, rest) = vec16(rest, "extensions")?;
				let extensions = bounded(block, "extensions", |b| {
					let (ext, rest) = Extension::read(b)?;
					Ok((Some(ext), rest))
				})?;
				(extensions, rest)
			},
		};
		let hello = Hello {
			version,
			random,
			session_id,
			ciphersuites,
			compression_methods,
			extensions,
		};
		Ok((hello, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		self.version.write(out)?;
		out.extend_from_slice(&self.random);
		let session_id = self.session_id.as_deref().unwrap_or_default();
		if session_id.len() > 32 {
			return Err(ParseError::WrongLength("session id"));
		}
		put_vec(out, 1, "session id", session_id)?;
		self.ciphersuites.write(out)?;
		self.compression_methods.write(out)?;
		if !self.extensions.is_empty() {
			put_prefixed(out, 2, "extensions", |out| {
				for ext in &self.extensions {
					ext.write(out)?;
				}
				Ok(())
			})?;
		}
		Ok(())
	}
}

/// A handshake message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handshake {
	/// HelloRequest
	HelloRequest,
	/// ClientHello
	ClientHello(ClientHello),
	/// ServerHello
	ServerHello(ServerHello),
	/// Certificate, the chain as sent with the leaf first
	Certificate(Vec<CertificateDer<'static>>),
	/// ServerKeyExchange, whose layout depends on the negotiated key exchange
	///
	/// See [`DhParameters`](super::DhParameters) and [`DigitallySigned`](super::DigitallySigned).
	ServerKeyExchange(Vec<u8>),
	/// CertificateRequest, kept opaque
	CertificateRequest(Vec<u8>),
	/// ServerHelloDone
	ServerHelloDone,
	/// ClientKeyExchange, the value behind its two byte length prefix
	ClientKeyExchange(Vec<u8>),
	/// Finished, with the verify data
	Finished([u8; 12]),
}

impl Handshake {
	/// The type of the message
	pub fn handshake_type(&self) -> HandshakeType {
		match self {
			Handshake::HelloRequest => HandshakeType::HelloRequest,
			Handshake::ClientHello(_) => HandshakeType::ClientHello,
			Handshake::ServerHello(_) => HandshakeType::ServerHello,
			Handshake::Certificate(_) => HandshakeType::Certificate,
			Handshake::ServerKeyExchange(_) => HandshakeType::ServerKeyExchange,
			Handshake::CertificateRequest(_) => HandshakeType::CertificateRequest,
			Handshake::ServerHelloDone => HandshakeType::ServerHelloDone,
			Handshake::ClientKeyExchange(_) => HandshakeType::ClientKeyExchange,
			Handshake::Finished(_) => HandshakeType::Finished,
		}
	}

	fn read_body(ty: HandshakeType, body: &[u8]) -> Result<Self, ParseError> {
		let msg = match ty {
			HandshakeType::HelloRequest => {
				empty(body, "hello request")?;
				Handshake::HelloRequest
			},
			HandshakeType::ServerHelloDone => {
				empty(body, "server hello done")?;
				Handshake::ServerHelloDone
			},
			HandshakeType::Finished => {
				let verify_data =
					<[u8; 12]>::try_from(body).map_err(|_| ParseError::WrongLength("finished"))?;
				Handshake::Finished(verify_data)
			},
			HandshakeType::ClientHello => Handshake::ClientHello(read_exact(body)?),
			HandshakeType::ServerHello => Handshake::ServerHello(read_exact(body)?),
			HandshakeType::Certificate => Handshake::Certificate(read_certificates(body)?),
			HandshakeType::ServerKeyExchange => Handshake::ServerKeyExchange(body.to_vec()),
			HandshakeType::CertificateRequest => Handshake::CertificateRequest(body.to_vec()),
			HandshakeType::ClientKeyExchange => {
				let (key, rest) = vec16(body, "client key exchange")?;
				finished(rest, "client key exchange")?;
				Handshake::ClientKeyExchange(key.to_vec())
			},
		};
		Ok(msg)
	}

	fn write_body(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		match self {
			Handshake::HelloRequest | Handshake::ServerHelloDone => Ok(()),
			Handshake::ClientHello(hello) => hello.write(out),
			Handshake::ServerHello(hello) => hello.write(out),
			Handshake::Certificate(certs) => put_prefixed(out, 3, "certificate list", |out| {
				for cert in certs {
					put_vec(out, 3, "certificate", cert)?;
				}
				Ok(())
			}),
			Handshake::ServerKeyExchange(body) | Handshake::CertificateRequest(body) => {
				out.extend_from_slice(body);
				Ok(())
			},
			Handshake::ClientKeyExchange(key) => put_vec(out, 2, "client key exchange", key),
			Handshake::Finished(verify_data) => {
				out.extend_from_slice(verify_data);
				Ok(())
			},
		}
	}
}

fn empty(body: &[u8], what: &'static str) -> Result<(), ParseError> {
	match body.is_empty() {
		true => Ok(()),
		false => Err(ParseError::WrongLength(what)),
	}
}

/// Reads a hello that has to fill the whole message body
fn read_exact<T: Codec>(body: &[u8]) -> Result<T, ParseError> {
	let (v, rest) = T::read(body)?;
	finished(rest, T::NAME)?;
	Ok(v)
}

fn read_certificates(body: &[u8]) -> Result<Vec<CertificateDer<'static>>, ParseError> {
	let (list, rest) = vec24(body, "certificate list")?;
	finished(rest, "certificate list")?;
	bounded(list, "certificate list", |b| {
		let (cert, rest) = vec24(b, "certificate")?;
		Ok((Some(CertificateDer::from(cert.to_vec())), rest))
	})
}

impl Codec for Handshake {
	const NAME: &'static str = "handshake";

	fn read(buf: &[u8]) -> Parsed<'_, Self> {
		let (ty, rest) = read_u8(buf, Self::NAME)?;
		let ty = HandshakeType::from_wire(ty)
			.ok_or_else(|| ParseError::Unknown(format!("handshake type {ty}")))?;
		let (len, rest) = read_u24(rest, Self::NAME)?;
		let (body, rest) = take(rest, len, Self::NAME)?;
		Ok((Self::read_body(ty, body)?, rest))
	}

	fn write(&self, out: &mut Vec<u8>) -> Result<(), ParseError> {
		out.push(self.handshake_type().to_wire());
		put_prefixed(out, 3, Self::NAME, |out| self.write_body(out))
	}
}

/// Reads the first handshake message of `buf`
///
/// Returns the message and whatever follows it, which may be the start of
/// the next message.
pub fn handshake(buf: &[u8]) -> Parsed<'_, Handshake> {
	Handshake::read(buf).map_err(|e| {
		tracing::debug!(error = %e, "parsing handshake message failed");
		e
	})
}
