use num_bigint::BigUint;
use yasna::{ASN1Result, BERReader, DERWriter};

use crate::grammar::{Context, Grammar};

fn bit_size(modulus: &BigUint) -> usize {
	8 * modulus.to_bytes_be().len()
}

/// PKCS#1 RSAPublicKey as per [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-A.1.1)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RsaPublicKey {
	/// n
	pub modulus: BigUint,
	/// e
	pub exponent: BigUint,
}

impl RsaPublicKey {
	/// Size of the key in bits, as the byte length of the modulus times 8
	pub fn size(&self) -> usize {
		bit_size(&self.modulus)
	}

	/// Parses a PEM encoded `RSA PUBLIC KEY`
	#[cfg(feature = "pem")]
	pub fn from_pem(pem_str: &str) -> Result<Self, crate::DecodeError> {
		Self::from_der(&crate::pem_contents(pem_str, "RSA PUBLIC KEY")?)
	}

	/// Serializes the key as a PEM encoded `RSA PUBLIC KEY`
	#[cfg(feature = "pem")]
	pub fn to_pem(&self) -> String {
		crate::pem_encode("RSA PUBLIC KEY", self.to_der())
	}
}

impl Grammar for RsaPublicKey {
	const NAME: &'static str = "RSAPublicKey";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let modulus = cx.field("modulus", seq.next().read_biguint())?;
			let exponent = cx.field("publicExponent", seq.next().read_biguint())?;
			Ok(RsaPublicKey { modulus, exponent })
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			writer.next().write_biguint(&self.modulus);
			writer.next().write_biguint(&self.exponent);
		});
	}
}

/// An additional prime of a multi-prime key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OtherPrimeInfo {
	/// r_i
	pub prime: BigUint,
	/// d_i
	pub exponent: BigUint,
	/// t_i
	pub coefficient: BigUint,
}

/// PKCS#1 RSAPrivateKey as per [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-A.1.2)
///
/// The version field is not kept. Decoding accepts any version, encoding
/// writes `two-prime` or, when [`other_prime_infos`](Self::other_prime_infos)
/// is present, `multi`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct RsaPrivateKey {
	pub modulus: BigUint,
	pub public_exponent: BigUint,
	pub private_exponent: BigUint,
	pub prime1: BigUint,
	pub prime2: BigUint,
	pub exponent1: BigUint,
	pub exponent2: BigUint,
	pub coefficient: BigUint,
	pub other_prime_infos: Option<Vec<OtherPrimeInfo>>,
}

const VERSION_TWO_PRIME: u64 = 0;
const VERSION_MULTI: u64 = 1;

impl RsaPrivateKey {
	/// Size of the key in bits, as the byte length of the modulus times 8
	pub fn size(&self) -> usize {
		bit_size(&self.modulus)
	}

	/// The public half of the key
	pub fn public_key(&self) -> RsaPublicKey {
		RsaPublicKey {
			modulus: self.modulus.clone(),
			exponent: self.public_exponent.clone(),
		}
	}

	/// Parses a PEM encoded `RSA PRIVATE KEY`
	#[cfg(feature = "pem")]
	pub fn from_pem(pem_str: &str) -> Result<Self, crate::DecodeError> {
		Self::from_der(&crate::pem_contents(pem_str, "RSA PRIVATE KEY")?)
	}

	/// Serializes the key as a PEM encoded `RSA PRIVATE KEY`
	#[cfg(feature = "pem")]
	pub fn to_pem(&self) -> String {
		crate::pem_encode("RSA PRIVATE KEY", self.to_der())
	}
}

impl Grammar for RsaPrivateKey {
	const NAME: &'static str = "RSAPrivateKey";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let _version = cx.field("version", seq.next().read_bigint())?;
			let modulus = cx.field("modulus", seq.next().read_biguint())?;
			let public_exponent = cx.field("publicExponent", seq.next().read_biguint())?;
			let private_exponent = cx.field("privateExponent", seq.next().read_biguint())?;
			let prime1 = cx.field("prime1", seq.next().read_biguint())?;
			let prime2 = cx.field("prime2", seq.next().read_biguint())?;
			let exponent1 = cx.field("exponent1", seq.next().read_biguint())?;
			let exponent2 = cx.field("exponent2", seq.next().read_biguint())?;
			let coefficient = cx.field("coefficient", seq.next().read_biguint())?;
			let other_prime_infos = seq.read_optional(|reader| {
				let mut infos = Vec::new();
				reader.read_sequence_of(|reader| {
					infos.push(reader.read_sequence(|seq| {
						Ok(OtherPrimeInfo {
							prime: seq.next().read_biguint()?,
							exponent: seq.next().read_biguint()?,
							coefficient: seq.next().read_biguint()?,
						})
					})?);
					Ok(())
				})?;
				Ok(infos)
			})?;
			Ok(RsaPrivateKey {
				modulus,
				public_exponent,
				private_exponent,
				prime1,
				prime2,
				exponent1,
				exponent2,
				coefficient,
				other_prime_infos,
			})
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			let version = match self.other_prime_infos {
				Some(_) => VERSION_MULTI,
				None => VERSION_TWO_PRIME,
			};
			writer.next().write_u64(version);
			writer.next().write_biguint(&self.modulus);
			writer.next().write_biguint(&self.public_exponent);
			writer.next().write_biguint(&self.private_exponent);
			writer.next().write_biguint(&self.prime1);
			writer.next().write_biguint(&self.prime2);
			writer.next().write_biguint(&self.exponent1);
			writer.next().write_biguint(&self.exponent2);
			writer.next().write_biguint(&self.coefficient);
			if let Some(infos) = &self.other_prime_infos {
				writer.next().write_sequence(|writer| {
					for info in infos {
						writer.next().write_sequence(|writer| {
							writer.next().write_biguint(&info.prime);
							writer.next().write_biguint(&info.exponent);
							writer.next().write_biguint(&info.coefficient);
						});
					}
				});
			}
		});
	}
}
