use num_bigint::BigInt;
use pki_types::CertificateDer;
use time::{OffsetDateTime, UtcOffset};
use yasna::models::{GeneralizedTime, ObjectIdentifier, UTCTime};
use yasna::{ASN1Result, BERReader, BERReaderSeq, DERWriter, Tag};

use crate::grammar::{redefault, undefault, BitString, Context, Grammar};
use crate::{Algorithm, DecodeError, Name, RsaPublicKey};

/// X.509 certificate version
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Version {
	/// v1, the default when the version field is absent
	#[default]
	V1,
	/// v2, adds the unique identifiers
	V2,
	/// v3, adds extensions
	V3,
}

impl Version {
	fn to_u64(self) -> u64 {
		match self {
			Version::V1 => 0,
			Version::V2 => 1,
			Version::V3 => 2,
		}
	}
}

impl TryFrom<u64> for Version {
	type Error = DecodeError;

	fn try_from(v: u64) -> Result<Self, DecodeError> {
		match v {
			0 => Ok(Version::V1),
			1 => Ok(Version::V2),
			2 => Ok(Version::V3),
			_ => Err(DecodeError::MalformedStructure("Version")),
		}
	}
}

/// The validity period of a certificate
///
/// Dates from 1950 to 2049 are written as UTCTime, others as
/// GeneralizedTime. Encoding panics for dates before the year 0, which
/// neither of them can represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Validity {
	/// notBefore
	pub not_before: OffsetDateTime,
	/// notAfter
	pub not_after: OffsetDateTime,
}

impl Validity {
	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let not_before = read_time(seq, cx)?;
			let not_after = read_time(seq, cx)?;
			Ok(Validity {
				not_before,
				not_after,
			})
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			write_time(writer.next(), self.not_before);
			write_time(writer.next(), self.not_after);
		});
	}
}

fn read_time(seq: &mut BERReaderSeq<'_, '_>, cx: &Context) -> ASN1Result<OffsetDateTime> {
	if let Some(t) = seq.read_optional(|r| r.read_utctime())? {
		return Ok(t.datetime().clone());
	}
	if let Some(t) = seq.read_optional(|r| r.read_generalized_time())? {
		return Ok(t.datetime().clone());
	}
	Err(cx.fail(DecodeError::MalformedStructure("Time")))
}

fn write_time(writer: DERWriter<'_>, dt: OffsetDateTime) {
	// RFC 5280 requires CAs to write certificate validity dates
	// below 2050 as UTCTime, and anything starting from 2050
	// as GeneralizedTime [1]. UTCTime can neither represent years
	// before 1950 nor fractional seconds.
	// [1]: https://tools.ietf.org/html/rfc5280#section-4.1.2.5
	let dt = dt.to_offset(UtcOffset::UTC);
	if (1950..2050).contains(&dt.year()) && dt.nanosecond() == 0 {
		writer.write_utctime(&UTCTime::from_datetime(dt));
	} else {
		writer.write_generalized_time(&GeneralizedTime::from_datetime(dt));
	}
}

/// SubjectPublicKeyInfo: the public key algorithm and the encoded key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKeyInfo {
	/// Public key algorithm
	pub algorithm: Algorithm,
	/// The key, in the encoding the algorithm defines
	pub key: BitString,
}

impl Grammar for PublicKeyInfo {
	const NAME: &'static str = "SubjectPublicKeyInfo";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let algorithm = cx.field("algorithm", Algorithm::read(seq.next(), cx))?;
			let key = cx.field("subjectPublicKey", BitString::read(seq.next()))?;
			Ok(PublicKeyInfo { algorithm, key })
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			self.algorithm.write(writer.next());
			self.key.write(writer.next());
		});
	}
}

/// A certificate extension, with its value left encoded
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Extension {
	/// extnID
	pub oid: ObjectIdentifier,
	/// Whether a relying party that doesn't understand the extension must reject the certificate
	pub critical: bool,
	/// Contents of the extnValue OCTET STRING
	pub value: Vec<u8>,
}

impl Extension {
	fn read(reader: BERReader<'_, '_>) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let oid = seq.next().read_oid()?;
			let critical = undefault(seq.read_optional(|r| r.read_bool())?, false);
			let value = seq.next().read_bytes()?;
			Ok(Extension {
				oid,
				critical,
				value,
			})
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			writer.next().write_oid(&self.oid);
			if let Some(critical) = redefault(&self.critical, &false) {
				writer.next().write_bool(*critical);
			}
			writer.next().write_bytes(&self.value);
		});
	}
}

/// The signed portion of a certificate, as per
/// [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#section-4.1)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TbsCertificate {
	/// Omitted from the encoding when [`Version::V1`]
	pub version: Version,
	/// serialNumber
	pub serial: BigInt,
	/// The signature algorithm, which must match [`Certificate::signature_algo`]
	pub signature: Algorithm,
	/// issuer
	pub issuer: Name,
	/// validity
	pub validity: Validity,
	/// subject
	pub subject: Name,
	/// subjectPublicKeyInfo
	pub pk_info: PublicKeyInfo,
	/// issuerUniqueID
	pub issuer_id: Option<BitString>,
	/// subjectUniqueID
	pub subject_id: Option<BitString>,
	/// Omitted from the encoding when empty
	pub extensions: Vec<Extension>,
}

impl TbsCertificate {
	/// Looks up the first extension with the given OID
	pub fn extension(&self, oid: &[u64]) -> Option<&Extension> {
		self.extensions
			.iter()
			.find(|ext| ext.oid.components().as_slice() == oid)
	}
}

impl Grammar for TbsCertificate {
	const NAME: &'static str = "TBSCertificate";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let version =
				seq.read_optional(|r| r.read_tagged(Tag::context(0), |r| r.read_u64()))?;
			let version = cx.map(Ok(version), |v| v.map(Version::try_from).transpose())?;
			let version = undefault(version, Version::V1);
			let serial = cx.field("serialNumber", seq.next().read_bigint())?;
			let signature = cx.field("signature", Algorithm::read(seq.next(), cx))?;
			let issuer = cx.field("issuer", Name::read(seq.next(), cx))?;
			let validity = cx.field("validity", Validity::read(seq.next(), cx))?;
			let subject = cx.field("subject", Name::read(seq.next(), cx))?;
			let pk_info = cx.field("subjectPublicKeyInfo", PublicKeyInfo::read(seq.next(), cx))?;
			let issuer_id = seq.read_optional(|r| {
				r.read_tagged_implicit(Tag::context(1), |r| BitString::read(r))
			})?;
			let subject_id = seq.read_optional(|r| {
				r.read_tagged_implicit(Tag::context(2), |r| BitString::read(r))
			})?;
			let extensions = seq.read_optional(|r| {
				r.read_tagged(Tag::context(3), |r| {
					let mut extensions = Vec::new();
					r.read_sequence_of(|r| {
						extensions.push(Extension::read(r)?);
						Ok(())
					})?;
					Ok(extensions)
				})
			})?;
			let extensions = undefault(extensions, Vec::new());
			Ok(TbsCertificate {
				version,
				serial,
				signature,
				issuer,
				validity,
				subject,
				pk_info,
				issuer_id,
				subject_id,
				extensions,
			})
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			if let Some(version) = redefault(&self.version, &Version::V1) {
				writer.next().write_tagged(Tag::context(0), |writer| {
					writer.write_u64(version.to_u64());
				});
			}
			writer.next().write_bigint(&self.serial);
			self.signature.write(writer.next());
			self.issuer.write(writer.next());
			self.validity.write(writer.next());
			self.subject.write(writer.next());
			self.pk_info.write(writer.next());
			if let Some(id) = &self.issuer_id {
				writer
					.next()
					.write_tagged_implicit(Tag::context(1), |writer| id.write(writer));
			}
			if let Some(id) = &self.subject_id {
				writer
					.next()
					.write_tagged_implicit(Tag::context(2), |writer| id.write(writer));
			}
			if let Some(extensions) = redefault(&self.extensions, &Vec::new()) {
				writer.next().write_tagged(Tag::context(3), |writer| {
					writer.write_sequence(|writer| {
						for ext in extensions {
							ext.write(writer.next());
						}
					});
				});
			}
		});
	}
}

/// An X.509 certificate
///
/// Decoding fails with [`DecodeError::SignatureAlgorithmMismatch`] unless
/// [`signature_algo`](Self::signature_algo) equals the `signature` field
/// of the [`TbsCertificate`]. The signature itself is not verified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Certificate {
	/// tbsCertificate
	pub tbs_cert: TbsCertificate,
	/// signatureAlgorithm
	pub signature_algo: Algorithm,
	/// signatureValue
	pub signature_val: BitString,
}

impl Certificate {
	/// The DER encoding of the signed portion
	pub fn tbs_der(&self) -> Vec<u8> {
		self.tbs_cert.to_der()
	}

	/// Extracts the RSA public key of the subject
	///
	/// # Panics
	///
	/// If the public key algorithm is not [`Algorithm::Rsa`]. Callers
	/// are expected to have checked `tbs_cert.pk_info.algorithm` first.
	pub fn rsa_public_key(&self) -> Result<RsaPublicKey, DecodeError> {
		let pk_info = &self.tbs_cert.pk_info;
		assert_eq!(
			pk_info.algorithm,
			Algorithm::Rsa,
			"certificate doesn't carry an RSA public key"
		);
		if pk_info.key.bit_len() % 8 != 0 {
			return Err(DecodeError::MalformedStructure("subjectPublicKey"));
		}
		RsaPublicKey::from_der(pk_info.key.as_bytes())
	}

	/// Parses a PEM encoded `CERTIFICATE`
	#[cfg(feature = "pem")]
	pub fn from_pem(pem_str: &str) -> Result<Self, DecodeError> {
		Self::from_der(&crate::pem_contents(pem_str, "CERTIFICATE")?)
	}

	/// Serializes the certificate as a PEM encoded `CERTIFICATE`
	#[cfg(feature = "pem")]
	pub fn to_pem(&self) -> String {
		crate::pem_encode("CERTIFICATE", self.to_der())
	}
}

impl Grammar for Certificate {
	const NAME: &'static str = "Certificate";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		let cert = reader.read_sequence(|seq| {
			let tbs_cert = cx.field("tbsCertificate", TbsCertificate::read(seq.next(), cx))?;
			let signature_algo = cx.field("signatureAlgorithm", Algorithm::read(seq.next(), cx))?;
			let signature_val = cx.field("signatureValue", BitString::read(seq.next()))?;
			Ok(Certificate {
				tbs_cert,
				signature_algo,
				signature_val,
			})
		})?;
		if cert.signature_algo != cert.tbs_cert.signature {
			tracing::debug!(
				outer = %cert.signature_algo,
				inner = %cert.tbs_cert.signature,
				"signature algorithm mismatch"
			);
			return Err(cx.fail(DecodeError::SignatureAlgorithmMismatch));
		}
		Ok(cert)
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			self.tbs_cert.write(writer.next());
			self.signature_algo.write(writer.next());
			self.signature_val.write(writer.next());
		});
	}
}

impl TryFrom<&CertificateDer<'_>> for Certificate {
	type Error = DecodeError;

	fn try_from(der: &CertificateDer<'_>) -> Result<Self, DecodeError> {
		Self::from_der(der.as_ref())
	}
}

impl From<&Certificate> for CertificateDer<'static> {
	fn from(cert: &Certificate) -> Self {
		CertificateDer::from(cert.to_der())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::oid::{OID_BASIC_CONSTRAINTS, OID_SUBJECT_KEY_IDENTIFIER};
	use crate::NameComponent;
	use num_bigint::BigUint;
	use time::macros::datetime;
	use time::{Date, Month};

	fn tbs() -> TbsCertificate {
		TbsCertificate {
			version: Version::V1,
			serial: BigInt::from(0x1234),
			signature: Algorithm::Sha256WithRsa,
			issuer: Name::from(vec![NameComponent::CommonName("issuer".into())]),
			validity: Validity {
				not_before: datetime!(2023-12-08 10:09:26 UTC),
				not_after: datetime!(2050-01-01 00:00:00 UTC),
			},
			subject: Name::from(vec![NameComponent::CommonName("subject".into())]),
			pk_info: PublicKeyInfo {
				algorithm: Algorithm::Rsa,
				key: BitString::from_bytes(vec![0x30, 0x06, 0x02, 0x01, 0x0d, 0x02, 0x01, 0x03]),
			},
			issuer_id: None,
			subject_id: None,
			extensions: Vec::new(),
		}
	}

	fn cert(tbs_cert: TbsCertificate) -> Certificate {
		Certificate {
			signature_algo: tbs_cert.signature.clone(),
			tbs_cert,
			signature_val: BitString::from_bytes(vec![0xab; 16]),
		}
	}

	fn has_context_tag(der: &[u8], n: u8) -> bool {
		der.contains(&(0xa0 | n))
	}

	/// The contents of a DER SEQUENCE, behind its short or long form length
	fn contents(der: &[u8]) -> &[u8] {
		assert_eq!(der[0], 0x30);
		match der[1] {
			len if len < 0x80 => &der[2..],
			long => &der[2 + usize::from(long & 0x7f)..],
		}
	}

	/// Wraps `contents` into a DER SEQUENCE
	fn sequence(contents: &[u8]) -> Vec<u8> {
		yasna::construct_der(|writer| {
			writer.write_sequence(|writer| writer.next().write_der(contents));
		})
	}

	#[test]
	fn v1_omits_version_and_extensions() {
		let tbs = tbs();
		let der = tbs.to_der();
		// SEQUENCE, then straight to the serial INTEGER
		assert_eq!(contents(&der)[0], 0x02);
		assert!(!has_context_tag(&der, 3));
		let decoded = TbsCertificate::from_der(&der).unwrap();
		assert_eq!(decoded.version, Version::V1);
		assert!(decoded.extensions.is_empty());
		assert_eq!(decoded, tbs);
		assert_eq!(decoded.to_der(), der);
	}

	#[test]
	fn v3_with_extensions_round_trips() {
		let mut tbs = tbs();
		tbs.version = Version::V3;
		tbs.extensions = vec![
			Extension {
				oid: ObjectIdentifier::from_slice(OID_SUBJECT_KEY_IDENTIFIER),
				critical: false,
				value: vec![0x04, 0x02, 0xca, 0xfe],
			},
			Extension {
				oid: ObjectIdentifier::from_slice(OID_BASIC_CONSTRAINTS),
				critical: true,
				value: vec![0x30, 0x03, 0x01, 0x01, 0xff],
			},
		];
		let der = tbs.to_der();
		assert!(der.len() > 0x80);
		assert_eq!(&contents(&der)[..5], &[0xa0, 0x03, 0x02, 0x01, 0x02]);
		assert!(has_context_tag(&der, 3));
		let decoded = TbsCertificate::from_der(&der).unwrap();
		assert_eq!(decoded, tbs);
		assert!(decoded.extension(OID_BASIC_CONSTRAINTS).unwrap().critical);
		assert!(!decoded.extension(OID_SUBJECT_KEY_IDENTIFIER).unwrap().critical);
		assert!(decoded.extension(&[2, 5, 29, 17]).is_none());
	}

	#[test]
	fn explicit_empty_extensions_decode_to_empty() {
		let mut tbs = tbs();
		tbs.version = Version::V3;
		let mut body = contents(&tbs.to_der()).to_vec();
		// [3] { SEQUENCE {} }
		body.extend([0xa3, 0x02, 0x30, 0x00]);
		let der = sequence(&body);
		let decoded = TbsCertificate::from_der(&der).unwrap();
		assert!(decoded.extensions.is_empty());
		assert_eq!(decoded, tbs);
		// omitted again on the way back
		assert_eq!(contents(&decoded.to_der()), &body[..body.len() - 4]);
	}

	#[test]
	fn unique_ids() {
		let mut tbs = tbs();
		tbs.version = Version::V2;
		tbs.issuer_id = Some(BitString::new(vec![0xf0], 4).unwrap());
		tbs.subject_id = Some(BitString::from_bytes(Vec::new()));
		let der = tbs.to_der();
		let decoded = TbsCertificate::from_der(&der).unwrap();
		assert_eq!(decoded, tbs);

		// a subject id alone stays a subject id
		tbs.issuer_id = None;
		let decoded = TbsCertificate::from_der(&tbs.to_der()).unwrap();
		assert_eq!(decoded.issuer_id, None);
		assert_eq!(decoded.subject_id, Some(BitString::from_bytes(Vec::new())));
	}

	#[test]
	fn unknown_version_is_rejected() {
		let mut tbs = tbs();
		tbs.version = Version::V3;
		let mut der = tbs.to_der();
		let version_at = der.len() - contents(&der).len() + 4;
		assert_eq!(der[version_at], 0x02);
		der[version_at] = 0x07;
		assert_eq!(
			TbsCertificate::from_der(&der),
			Err(DecodeError::MalformedStructure("Version"))
		);
	}

	#[test]
	fn times_pick_encoding_by_year() {
		let tbs = tbs();
		let der = tbs.validity.to_der_for_test();
		// UTCTime for 2023, GeneralizedTime for 2050
		assert_eq!(der[2], 0x17);
		assert_eq!(der[2 + 2 + 13], 0x18);

		let mut tbs = tbs;
		tbs.validity.not_before = datetime!(1949-12-31 23:59:59 UTC);
		tbs.validity.not_after = datetime!(2030-06-01 12:00:00.5 UTC);
		let der = tbs.validity.to_der_for_test();
		assert_eq!(der[2], 0x18);
		let decoded = TbsCertificate::from_der(&tbs.to_der()).unwrap();
		assert_eq!(decoded.validity, tbs.validity);
	}

	#[test]
	fn non_utc_offsets_are_normalized() {
		let mut tbs = tbs();
		tbs.validity.not_before = datetime!(2023-12-08 12:09:26 +02:00);
		let decoded = TbsCertificate::from_der(&tbs.to_der()).unwrap();
		assert_eq!(
			decoded.validity.not_before,
			datetime!(2023-12-08 10:09:26 UTC)
		);
		assert_eq!(decoded.validity.not_before.offset(), UtcOffset::UTC);
	}

	#[test]
	#[should_panic]
	fn negative_years_cannot_be_written() {
		let mut tbs = tbs();
		tbs.validity.not_before = Date::from_calendar_date(-1, Month::January, 1)
			.unwrap()
			.midnight()
			.assume_utc();
		let _ = tbs.to_der();
	}

	#[test]
	fn ber_bit_string_padding_is_cleared() {
		// SEQUENCE { { rsaEncryption, NULL }, BIT STRING of one bit with the padding set }
		let ber = [
			0x30, 0x13, 0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01,
			0x01, 0x05, 0x00, 0x03, 0x02, 0x07, 0x81,
		];
		let info = PublicKeyInfo::from_ber(&ber).unwrap();
		assert_eq!(info.key, BitString::new(vec![0x80], 1).unwrap());
		let der = info.to_der();
		assert_eq!(&der[der.len() - 2..], &[0x07, 0x80]);
		assert_eq!(PublicKeyInfo::from_der(&der).unwrap(), info);
	}

	#[test]
	fn signature_algorithm_mismatch() {
		let mut cert = cert(tbs());
		assert_eq!(Certificate::from_der(&cert.to_der()).unwrap(), cert);
		cert.signature_algo = Algorithm::Sha384WithRsa;
		assert_eq!(
			Certificate::from_der(&cert.to_der()),
			Err(DecodeError::SignatureAlgorithmMismatch)
		);
	}

	#[test]
	fn rsa_public_key_of_certificate() {
		let cert = cert(tbs());
		let key = cert.rsa_public_key().unwrap();
		assert_eq!(key.modulus, BigUint::from(13u32));
		assert_eq!(key.exponent, BigUint::from(3u32));
	}

	#[test]
	#[should_panic(expected = "RSA public key")]
	fn rsa_public_key_of_ec_certificate_panics() {
		let mut tbs = tbs();
		tbs.pk_info.algorithm =
			Algorithm::EcPublicKey(ObjectIdentifier::from_slice(crate::oid::OID_EC_SECP_256_R1));
		let _ = cert(tbs).rsa_public_key();
	}

	impl Validity {
		fn to_der_for_test(&self) -> Vec<u8> {
			yasna::construct_der(|writer| self.write(writer))
		}
	}
}
