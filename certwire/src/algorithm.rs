use std::fmt;

use yasna::models::ObjectIdentifier;
use yasna::{ASN1Result, BERReader, DERWriter};

use crate::grammar::{Context, Grammar};
use crate::oid::*;
use crate::DecodeError;

/// Digest algorithm of a signature algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum HashAlgorithm {
	Md2,
	Md4,
	Md5,
	Ripemd160,
	Sha1,
	Sha224,
	Sha256,
	Sha384,
	Sha512,
}

/// A public key or signature algorithm, as named by an AlgorithmIdentifier
///
/// Public key algorithms appear in subjectPublicKeyInfo, signature
/// algorithms in the signature fields of a certificate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
	/// rsaEncryption
	Rsa,
	/// id-ecPublicKey on the named curve
	EcPublicKey(ObjectIdentifier),
	/// md2WithRSAEncryption
	Md2WithRsa,
	/// md4WithRSAEncryption
	Md4WithRsa,
	/// md5WithRSAEncryption
	Md5WithRsa,
	/// rsaSignatureWithripemd160
	Ripemd160WithRsa,
	/// sha1WithRSAEncryption
	Sha1WithRsa,
	/// sha224WithRSAEncryption
	Sha224WithRsa,
	/// sha256WithRSAEncryption
	Sha256WithRsa,
	/// sha384WithRSAEncryption
	Sha384WithRsa,
	/// sha512WithRSAEncryption
	Sha512WithRsa,
	/// ecdsa-with-SHA1
	EcdsaWithSha1,
	/// ecdsa-with-SHA224
	EcdsaWithSha224,
	/// ecdsa-with-SHA256
	EcdsaWithSha256,
	/// ecdsa-with-SHA384
	EcdsaWithSha384,
	/// ecdsa-with-SHA512
	EcdsaWithSha512,
}

/// Shape of the parameters field following the algorithm OID
#[derive(Clone, Debug, PartialEq, Eq)]
enum Parameters {
	Absent,
	Null,
	Oid(ObjectIdentifier),
	Other,
}

impl Algorithm {
	fn oid_components(&self) -> &'static [u64] {
		match self {
			Algorithm::Rsa => OID_RSA_ENCRYPTION,
			Algorithm::EcPublicKey(_) => OID_EC_PUBLIC_KEY,
			Algorithm::Md2WithRsa => OID_MD2_WITH_RSA,
			Algorithm::Md4WithRsa => OID_MD4_WITH_RSA,
			Algorithm::Md5WithRsa => OID_MD5_WITH_RSA,
			Algorithm::Ripemd160WithRsa => OID_RIPEMD160_WITH_RSA,
			Algorithm::Sha1WithRsa => OID_SHA1_WITH_RSA,
			Algorithm::Sha224WithRsa => OID_SHA224_WITH_RSA,
			Algorithm::Sha256WithRsa => OID_SHA256_WITH_RSA,
			Algorithm::Sha384WithRsa => OID_SHA384_WITH_RSA,
			Algorithm::Sha512WithRsa => OID_SHA512_WITH_RSA,
			Algorithm::EcdsaWithSha1 => OID_ECDSA_WITH_SHA1,
			Algorithm::EcdsaWithSha224 => OID_ECDSA_WITH_SHA224,
			Algorithm::EcdsaWithSha256 => OID_ECDSA_WITH_SHA256,
			Algorithm::EcdsaWithSha384 => OID_ECDSA_WITH_SHA384,
			Algorithm::EcdsaWithSha512 => OID_ECDSA_WITH_SHA512,
		}
	}

	/// The OID of the AlgorithmIdentifier
	pub fn oid(&self) -> ObjectIdentifier {
		ObjectIdentifier::from_slice(self.oid_components())
	}

	/// The digest of a signature algorithm, `None` for public key algorithms
	pub fn hash(&self) -> Option<HashAlgorithm> {
		let hash = match self {
			Algorithm::Rsa | Algorithm::EcPublicKey(_) => return None,
			Algorithm::Md2WithRsa => HashAlgorithm::Md2,
			Algorithm::Md4WithRsa => HashAlgorithm::Md4,
			Algorithm::Md5WithRsa => HashAlgorithm::Md5,
			Algorithm::Ripemd160WithRsa => HashAlgorithm::Ripemd160,
			Algorithm::Sha1WithRsa | Algorithm::EcdsaWithSha1 => HashAlgorithm::Sha1,
			Algorithm::Sha224WithRsa | Algorithm::EcdsaWithSha224 => HashAlgorithm::Sha224,
			Algorithm::Sha256WithRsa | Algorithm::EcdsaWithSha256 => HashAlgorithm::Sha256,
			Algorithm::Sha384WithRsa | Algorithm::EcdsaWithSha384 => HashAlgorithm::Sha384,
			Algorithm::Sha512WithRsa | Algorithm::EcdsaWithSha512 => HashAlgorithm::Sha512,
		};
		Some(hash)
	}

	/// Whether this is a signature algorithm rather than a public key algorithm
	pub fn is_signature(&self) -> bool {
		self.hash().is_some()
	}

	/// Whether the algorithm is from the PKCS#1 family, which carries NULL parameters
	fn is_rsa(&self) -> bool {
		match self {
			Algorithm::Rsa
			| Algorithm::Md2WithRsa
			| Algorithm::Md4WithRsa
			| Algorithm::Md5WithRsa
			| Algorithm::Ripemd160WithRsa
			| Algorithm::Sha1WithRsa
			| Algorithm::Sha224WithRsa
			| Algorithm::Sha256WithRsa
			| Algorithm::Sha384WithRsa
			| Algorithm::Sha512WithRsa => true,
			_ => false,
		}
	}

	fn from_identifier(oid: ObjectIdentifier, params: Parameters) -> Result<Self, DecodeError> {
		let alg = match oid.components().as_slice() {
			OID_RSA_ENCRYPTION => Some(Algorithm::Rsa),
			OID_EC_PUBLIC_KEY => match &params {
				Parameters::Oid(curve) => Some(Algorithm::EcPublicKey(curve.clone())),
				_ => None,
			},
			OID_MD2_WITH_RSA => Some(Algorithm::Md2WithRsa),
			OID_MD4_WITH_RSA => Some(Algorithm::Md4WithRsa),
			OID_MD5_WITH_RSA => Some(Algorithm::Md5WithRsa),
			OID_RIPEMD160_WITH_RSA => Some(Algorithm::Ripemd160WithRsa),
			OID_SHA1_WITH_RSA => Some(Algorithm::Sha1WithRsa),
			OID_SHA224_WITH_RSA => Some(Algorithm::Sha224WithRsa),
			OID_SHA256_WITH_RSA => Some(Algorithm::Sha256WithRsa),
			OID_SHA384_WITH_RSA => Some(Algorithm::Sha384WithRsa),
			OID_SHA512_WITH_RSA => Some(Algorithm::Sha512WithRsa),
			OID_ECDSA_WITH_SHA1 => Some(Algorithm::EcdsaWithSha1),
			OID_ECDSA_WITH_SHA224 => Some(Algorithm::EcdsaWithSha224),
			OID_ECDSA_WITH_SHA256 => Some(Algorithm::EcdsaWithSha256),
			OID_ECDSA_WITH_SHA384 => Some(Algorithm::EcdsaWithSha384),
			OID_ECDSA_WITH_SHA512 => Some(Algorithm::EcdsaWithSha512),
			_ => None,
		};
		// The RSA family takes NULL or nothing, ECDSA takes nothing
		let params_ok = match (&alg, &params) {
			(Some(Algorithm::EcPublicKey(_)), Parameters::Oid(_)) => true,
			(Some(_), Parameters::Absent) => true,
			(Some(alg), Parameters::Null) => alg.is_rsa(),
			_ => false,
		};
		match alg {
			Some(alg) if params_ok => Ok(alg),
			_ => Err(DecodeError::UnsupportedAlgorithm(oid)),
		}
	}
}

impl Grammar for Algorithm {
	const NAME: &'static str = "AlgorithmIdentifier";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let oid = cx.field("algorithm", seq.next().read_oid())?;
			let params = if seq.read_optional(|r| r.read_null())?.is_some() {
				Parameters::Null
			} else if let Some(curve) = seq.read_optional(|r| r.read_oid())? {
				Parameters::Oid(curve)
			} else if seq.read_optional(|r| r.read_der())?.is_some() {
				Parameters::Other
			} else {
				Parameters::Absent
			};
			cx.map(Ok(params), |params| {
				Algorithm::from_identifier(oid, params)
			})
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			writer.next().write_oid(&self.oid());
			match self {
				Algorithm::EcPublicKey(curve) => writer.next().write_oid(curve),
				alg if alg.is_rsa() => writer.next().write_null(),
				_ => (),
			}
		});
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Algorithm::Rsa => "rsaEncryption",
			Algorithm::EcPublicKey(curve) => return write!(f, "id-ecPublicKey({curve})"),
			Algorithm::Md2WithRsa => "md2WithRSAEncryption",
			Algorithm::Md4WithRsa => "md4WithRSAEncryption",
			Algorithm::Md5WithRsa => "md5WithRSAEncryption",
			Algorithm::Ripemd160WithRsa => "rsaSignatureWithripemd160",
			Algorithm::Sha1WithRsa => "sha1WithRSAEncryption",
			Algorithm::Sha224WithRsa => "sha224WithRSAEncryption",
			Algorithm::Sha256WithRsa => "sha256WithRSAEncryption",
			Algorithm::Sha384WithRsa => "sha384WithRSAEncryption",
			Algorithm::Sha512WithRsa => "sha512WithRSAEncryption",
			Algorithm::EcdsaWithSha1 => "ecdsa-with-SHA1",
			Algorithm::EcdsaWithSha224 => "ecdsa-with-SHA224",
			Algorithm::EcdsaWithSha256 => "ecdsa-with-SHA256",
			Algorithm::EcdsaWithSha384 => "ecdsa-with-SHA384",
			Algorithm::EcdsaWithSha512 => "ecdsa-with-SHA512",
		};
		f.write_str(name)
	}
}
