use yasna::models::ObjectIdentifier;
use yasna::ASN1ErrorKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
/// The error type of the ASN.1 grammars
pub enum DecodeError {
	/// The algorithm identifier names an OID, or an OID and parameter
	/// combination, that isn't supported
	#[error("unsupported algorithm {0}")]
	UnsupportedAlgorithm(ObjectIdentifier),
	/// The input is well-formed ASN.1 but violates the grammar of the named production
	#[error("malformed {0}")]
	MalformedStructure(&'static str),
	/// The outer signature algorithm of a certificate differs from the one in its tbsCertificate
	#[error("certificate signature algorithm doesn't match the tbsCertificate signature field")]
	SignatureAlgorithmMismatch,
	/// The ASN.1 layer rejected the input while the named field was being decoded
	#[error("invalid ASN.1 in {field}: {kind:?}")]
	Asn1 {
		/// Innermost field being decoded
		field: &'static str,
		/// What the ASN.1 layer reported
		kind: ASN1ErrorKind,
	},
	/// The PEM armor couldn't be parsed or carries an unexpected tag
	#[cfg(feature = "pem")]
	#[error("PEM error: {0}")]
	Pem(String),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
/// The error type of the TLS wire parser
pub enum ParseError {
	/// Bytes remain after the named structure was fully decoded
	#[error("trailing bytes after {0}")]
	TrailingBytes(&'static str),
	/// A length field isn't a multiple of the element size, or is out of range
	#[error("wrong length of {0}")]
	WrongLength(&'static str),
	/// A type code or enumerant has no known meaning where one is required
	#[error("unknown {0}")]
	Unknown(String),
	/// The buffer ends before the named field does
	#[error("buffer too short for {0}")]
	Underflow(&'static str),
}

#[cfg(feature = "pem")]
pub(crate) trait ExternalError<T>: Sized {
	fn _err(self) -> Result<T, DecodeError>;
}

#[cfg(feature = "pem")]
impl<T> ExternalError<T> for Result<T, pem::PemError> {
	fn _err(self) -> Result<T, DecodeError> {
		self.map_err(|e| DecodeError::Pem(e.to_string()))
	}
}
