/*!
X.509 certificate and RSA key codecs, and a TLS handshake wire parser

The ASN.1 side of this crate decodes and encodes X.509 certificates
and PKCS#1 RSA keys. Every structure implements [`Grammar`], so it can be
read from DER or BER and written back as DER. Decoding a DER input and
encoding the result reproduces the input, with the exception of name
attribute values, which are always written as `UTF8String`.

The [`tls`] module parses the messages of the TLS 1.2 handshake and the
records that carry them, from raw bytes into typed values and back.
*/
#![cfg_attr(
	feature = "pem",
	doc = r##"
## Example

```
use certwire::{Certificate, Grammar};
# fn main () {
let key_pair = rcgen::KeyPair::generate().unwrap();
let cert = rcgen::CertificateParams::new(vec!["localhost".to_string()])
	.unwrap()
	.self_signed(&key_pair)
	.unwrap();

let decoded = Certificate::from_pem(&cert.pem()).unwrap();
assert_eq!(decoded.to_der(), cert.der().to_vec());
println!("{}", decoded.tbs_cert.subject);
# }
```"##
)]
#![forbid(unsafe_code)]
#![forbid(non_ascii_idents)]
#![deny(missing_docs)]
#![allow(clippy::complexity, clippy::style, clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "pem")]
use pem::Pem;

pub use crate::algorithm::{Algorithm, HashAlgorithm};
pub use crate::certificate::{
	Certificate, Extension, PublicKeyInfo, TbsCertificate, Validity, Version,
};
pub use crate::error::{DecodeError, ParseError};
#[cfg(feature = "pem")]
use crate::error::ExternalError;
pub use crate::grammar::{decode, redefault, undefault, BitString, Context, Grammar, Mode};
pub use crate::name::{Name, NameComponent};
pub use crate::rsa::{OtherPrimeInfo, RsaPrivateKey, RsaPublicKey};
pub use crate::string_types::{DirectoryString, StringKind};

mod algorithm;
mod certificate;
mod error;
mod grammar;
mod name;
pub mod oid;
mod rsa;
mod string_types;
pub mod tls;

#[cfg(feature = "pem")]
const ENCODE_CONFIG: pem::EncodeConfig = {
	let line_ending = match cfg!(target_family = "windows") {
		true => pem::LineEnding::CRLF,
		false => pem::LineEnding::LF,
	};
	pem::EncodeConfig::new().set_line_ending(line_ending)
};

/// Extracts the DER contents of a PEM block, which must carry `tag`
#[cfg(feature = "pem")]
pub(crate) fn pem_contents(pem_str: &str, tag: &'static str) -> Result<Vec<u8>, DecodeError> {
	let pem = pem::parse(pem_str)._err()?;
	if pem.tag() != tag {
		return Err(DecodeError::Pem(format!(
			"expected {tag} block, found {}",
			pem.tag()
		)));
	}
	Ok(pem.into_contents())
}

#[cfg(feature = "pem")]
pub(crate) fn pem_encode(tag: &'static str, der: Vec<u8>) -> String {
	pem::encode_config(&Pem::new(tag, der), ENCODE_CONFIG)
}
