use std::fmt;

use yasna::models::ObjectIdentifier;
use yasna::{ASN1Result, BERReader, DERWriter};

use crate::grammar::{Context, Grammar};
use crate::oid::*;
use crate::DirectoryString;

/// One attribute of a distinguished name
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameComponent {
	/// X520CommonName
	CommonName(DirectoryString),
	/// X520name surname
	Surname(DirectoryString),
	/// X520SerialNumber
	SerialNumber(DirectoryString),
	/// X520countryName
	Country(DirectoryString),
	/// X520LocalityName
	Locality(DirectoryString),
	/// X520StateOrProvinceName
	Province(DirectoryString),
	/// X520OrganizationName
	Organization(DirectoryString),
	/// X520OrganizationalUnitName
	OrganizationalUnit(DirectoryString),
	/// X520Title
	Title(DirectoryString),
	/// X520name givenName
	GivenName(DirectoryString),
	/// X520name initials
	Initials(DirectoryString),
	/// X520name generationQualifier
	GenerationQualifier(DirectoryString),
	/// X520dnQualifier
	DnQualifier(DirectoryString),
	/// X520Pseudonym
	Pseudonym(DirectoryString),
	/// domainComponent
	DomainComponent(DirectoryString),
	/// Any other attribute type with a string value
	Other(ObjectIdentifier, DirectoryString),
}

impl NameComponent {
	fn from_oid(oid: ObjectIdentifier, value: DirectoryString) -> Self {
		match oid.components().as_slice() {
			OID_COMMON_NAME => NameComponent::CommonName(value),
			OID_SURNAME => NameComponent::Surname(value),
			OID_SERIAL_NUMBER => NameComponent::SerialNumber(value),
			OID_COUNTRY_NAME => NameComponent::Country(value),
			OID_LOCALITY_NAME => NameComponent::Locality(value),
			OID_STATE_OR_PROVINCE_NAME => NameComponent::Province(value),
			OID_ORG_NAME => NameComponent::Organization(value),
			OID_ORG_UNIT_NAME => NameComponent::OrganizationalUnit(value),
			OID_TITLE => NameComponent::Title(value),
			OID_GIVEN_NAME => NameComponent::GivenName(value),
			OID_INITIALS => NameComponent::Initials(value),
			OID_GENERATION_QUALIFIER => NameComponent::GenerationQualifier(value),
			OID_DN_QUALIFIER => NameComponent::DnQualifier(value),
			OID_PSEUDONYM => NameComponent::Pseudonym(value),
			OID_DOMAIN_COMPONENT => NameComponent::DomainComponent(value),
			_ => NameComponent::Other(oid, value),
		}
	}

	/// The attribute type
	pub fn oid(&self) -> ObjectIdentifier {
		let sl = match self {
			NameComponent::CommonName(_) => OID_COMMON_NAME,
			NameComponent::Surname(_) => OID_SURNAME,
			NameComponent::SerialNumber(_) => OID_SERIAL_NUMBER,
			NameComponent::Country(_) => OID_COUNTRY_NAME,
			NameComponent::Locality(_) => OID_LOCALITY_NAME,
			NameComponent::Province(_) => OID_STATE_OR_PROVINCE_NAME,
			NameComponent::Organization(_) => OID_ORG_NAME,
			NameComponent::OrganizationalUnit(_) => OID_ORG_UNIT_NAME,
			NameComponent::Title(_) => OID_TITLE,
			NameComponent::GivenName(_) => OID_GIVEN_NAME,
			NameComponent::Initials(_) => OID_INITIALS,
			NameComponent::GenerationQualifier(_) => OID_GENERATION_QUALIFIER,
			NameComponent::DnQualifier(_) => OID_DN_QUALIFIER,
			NameComponent::Pseudonym(_) => OID_PSEUDONYM,
			NameComponent::DomainComponent(_) => OID_DOMAIN_COMPONENT,
			NameComponent::Other(oid, _) => return oid.clone(),
		};
		ObjectIdentifier::from_slice(sl)
	}

	/// The attribute value
	pub fn value(&self) -> &DirectoryString {
		match self {
			NameComponent::CommonName(v)
			| NameComponent::Surname(v)
			| NameComponent::SerialNumber(v)
			| NameComponent::Country(v)
			| NameComponent::Locality(v)
			| NameComponent::Province(v)
			| NameComponent::Organization(v)
			| NameComponent::OrganizationalUnit(v)
			| NameComponent::Title(v)
			| NameComponent::GivenName(v)
			| NameComponent::Initials(v)
			| NameComponent::GenerationQualifier(v)
			| NameComponent::DnQualifier(v)
			| NameComponent::Pseudonym(v)
			| NameComponent::DomainComponent(v)
			| NameComponent::Other(_, v) => v,
		}
	}

	fn short_name(&self) -> Option<&'static str> {
		let name = match self {
			NameComponent::CommonName(_) => "CN",
			NameComponent::Surname(_) => "SN",
			NameComponent::SerialNumber(_) => "serialNumber",
			NameComponent::Country(_) => "C",
			NameComponent::Locality(_) => "L",
			NameComponent::Province(_) => "ST",
			NameComponent::Organization(_) => "O",
			NameComponent::OrganizationalUnit(_) => "OU",
			NameComponent::Title(_) => "title",
			NameComponent::GivenName(_) => "GN",
			NameComponent::Initials(_) => "initials",
			NameComponent::GenerationQualifier(_) => "generationQualifier",
			NameComponent::DnQualifier(_) => "dnQualifier",
			NameComponent::Pseudonym(_) => "pseudonym",
			NameComponent::DomainComponent(_) => "DC",
			NameComponent::Other(..) => return None,
		};
		Some(name)
	}

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		reader.read_sequence(|seq| {
			let oid = cx.field("AttributeType", seq.next().read_oid())?;
			let value = DirectoryString::read(seq, cx)?;
			Ok(NameComponent::from_oid(oid, value))
		})
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			writer.next().write_oid(&self.oid());
			self.value().write(writer.next());
		});
	}
}

impl fmt::Display for NameComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.short_name() {
			Some(name) => write!(f, "{}={}", name, self.value()),
			None => write!(f, "{}={}", self.oid(), self.value()),
		}
	}
}

/**
Distinguished name used for the issuer and subject fields of a certificate

The ASN.1 structure is a sequence of relative distinguished names, each
of them a set of attributes. This type keeps the attributes in order but
flattens the sets: a multi-valued RDN decodes into several consecutive
components and is encoded back as one single-valued RDN per component.

See also the RFC 5280 sections on the [issuer](https://tools.ietf.org/html/rfc5280#section-4.1.2.4)
and [subject](https://tools.ietf.org/html/rfc5280#section-4.1.2.6) fields.
*/
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Name {
	components: Vec<NameComponent>,
}

impl Name {
	/// Creates a new, empty name
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a component
	///
	/// ```
	/// # use certwire::{Name, NameComponent};
	/// let mut name = Name::new();
	/// name.push(NameComponent::Organization("Crab widgits SE".into()));
	/// name.push(NameComponent::CommonName("Master Cert".into()));
	/// assert_eq!(name.common_name(), Some("Master Cert"));
	/// assert_eq!(name.to_string(), "O=Crab widgits SE, CN=Master Cert");
	/// ```
	pub fn push(&mut self, component: NameComponent) {
		self.components.push(component);
	}

	/// Iterate over the components
	pub fn iter(&self) -> std::slice::Iter<'_, NameComponent> {
		self.components.iter()
	}

	/// The components in order
	pub fn components(&self) -> &[NameComponent] {
		&self.components
	}

	/// The value of the first common name component
	pub fn common_name(&self) -> Option<&str> {
		self.iter().find_map(|c| match c {
			NameComponent::CommonName(v) => Some(v.as_str()),
			_ => None,
		})
	}

	/// Whether the name has no components
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl From<Vec<NameComponent>> for Name {
	fn from(components: Vec<NameComponent>) -> Self {
		Self { components }
	}
}

impl FromIterator<NameComponent> for Name {
	fn from_iter<I: IntoIterator<Item = NameComponent>>(iter: I) -> Self {
		Self {
			components: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a Name {
	type Item = &'a NameComponent;
	type IntoIter = std::slice::Iter<'a, NameComponent>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Display for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, component) in self.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{component}")?;
		}
		Ok(())
	}
}

impl Grammar for Name {
	const NAME: &'static str = "Name";

	fn read(reader: BERReader<'_, '_>, cx: &Context) -> ASN1Result<Self> {
		let mut components = Vec::new();
		reader.read_sequence_of(|reader| {
			reader.read_set_of(|reader| {
				components.push(NameComponent::read(reader, cx)?);
				Ok(())
			})
		})?;
		Ok(Name { components })
	}

	fn write(&self, writer: DERWriter<'_>) {
		writer.write_sequence(|writer| {
			for component in self.iter() {
				writer.next().write_set(|writer| {
					component.write(writer.next());
				});
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{DecodeError, StringKind};

	// CN=example.com as written by most tools
	const CN_EXAMPLE: &[u8] = &[
		0x30, 0x16, 0x31, 0x14, 0x30, 0x12, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x0b, b'e', b'x',
		b'a', b'm', b'p', b'l', b'e', b'.', b'c', b'o', b'm',
	];

	#[test]
	fn common_name() {
		let name = Name::from_der(CN_EXAMPLE).unwrap();
		assert_eq!(
			name.components(),
			&[NameComponent::CommonName("example.com".into())]
		);
		assert_eq!(name.common_name(), Some("example.com"));
		assert_eq!(name.to_der(), CN_EXAMPLE);
	}

	#[test]
	fn empty_name() {
		let name = Name::from_der(&[0x30, 0x00]).unwrap();
		assert!(name.is_empty());
		assert_eq!(name.to_der(), [0x30, 0x00]);
	}

	#[test]
	fn multi_valued_rdn_is_flattened() {
		// SET { CN=a, O=b } as a single RDN
		let der = [
			0x30, 0x1a, 0x31, 0x18, 0x30, 0x0a, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x03, b'a',
			b'a', b'a', 0x30, 0x0a, 0x06, 0x03, 0x55, 0x04, 0x0a, 0x0c, 0x03, b'b', b'b', b'b',
		];
		let name = Name::from_der(&der).unwrap();
		assert_eq!(
			name,
			Name::from(vec![
				NameComponent::CommonName("aaa".into()),
				NameComponent::Organization("bbb".into()),
			])
		);
		// one RDN per component on the way back
		let reencoded = name.to_der();
		assert_eq!(reencoded.len(), der.len() + 2);
		assert_eq!(Name::from_der(&reencoded).unwrap(), name);
	}

	#[test]
	fn every_attribute_type_round_trips() {
		let name: Name = [
			NameComponent::CommonName("cn".into()),
			NameComponent::Surname("sn".into()),
			NameComponent::SerialNumber("42".into()),
			NameComponent::Country("SE".into()),
			NameComponent::Locality("Lund".into()),
			NameComponent::Province("Skane".into()),
			NameComponent::Organization("Crabs".into()),
			NameComponent::OrganizationalUnit("Shells".into()),
			NameComponent::Title("Dr".into()),
			NameComponent::GivenName("Ferris".into()),
			NameComponent::Initials("F".into()),
			NameComponent::GenerationQualifier("III".into()),
			NameComponent::DnQualifier("q".into()),
			NameComponent::Pseudonym("rustacean".into()),
			NameComponent::DomainComponent("org".into()),
			NameComponent::Other(
				ObjectIdentifier::from_slice(&[1, 2, 840, 113549, 1, 9, 1]),
				"ops@example.com".into(),
			),
		]
		.into_iter()
		.collect();
		let decoded = Name::from_der(&name.to_der()).unwrap();
		assert_eq!(decoded, name);
		assert!(decoded.iter().all(|c| c.value().kind() == StringKind::Utf8));
	}

	#[test]
	fn printable_value_is_reencoded_as_utf8() {
		let mut der = CN_EXAMPLE.to_vec();
		der[11] = 0x13;
		let name = Name::from_der(&der).unwrap();
		assert_eq!(name.components()[0].value().kind(), StringKind::Printable);
		assert_eq!(name.to_der(), CN_EXAMPLE);
		assert_eq!(Name::from_der(CN_EXAMPLE).unwrap(), name);
	}

	#[test]
	fn truncated_name_names_the_failing_field() {
		let err = Name::from_der(&CN_EXAMPLE[..CN_EXAMPLE.len() - 1]).unwrap_err();
		assert!(matches!(err, DecodeError::Asn1 { .. }), "{err:?}");
	}

	#[test]
	fn display() {
		let name = Name::from(vec![
			NameComponent::Country("SE".into()),
			NameComponent::Other(ObjectIdentifier::from_slice(&[1, 2, 3]), "x".into()),
		]);
		assert_eq!(name.to_string(), "C=SE, 1.2.3=x");
	}
}
