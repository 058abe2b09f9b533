//! Object identifiers recognized by the grammars

/// rsaEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_RSA_ENCRYPTION: &[u64] = &[1, 2, 840, 113549, 1, 1, 1];
/// md2WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_MD2_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 2];
/// md4WithRSAEncryption in [RFC 1423](https://www.rfc-editor.org/rfc/rfc1423)
pub const OID_MD4_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 3];
/// md5WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_MD5_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 4];
/// sha1WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_SHA1_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 5];
/// sha256WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_SHA256_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 11];
/// sha384WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_SHA384_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 12];
/// sha512WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_SHA512_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 13];
/// sha224WithRSAEncryption in [RFC 8017](https://www.rfc-editor.org/rfc/rfc8017#appendix-C)
pub const OID_SHA224_WITH_RSA: &[u64] = &[1, 2, 840, 113549, 1, 1, 14];
/// rsaSignatureWithripemd160 in the TeleTrusT arc
pub const OID_RIPEMD160_WITH_RSA: &[u64] = &[1, 3, 36, 3, 3, 1, 2];

/// id-ecPublicKey in [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480#appendix-A)
pub const OID_EC_PUBLIC_KEY: &[u64] = &[1, 2, 840, 10045, 2, 1];
/// secp256r1 in [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480#appendix-A)
pub const OID_EC_SECP_256_R1: &[u64] = &[1, 2, 840, 10045, 3, 1, 7];
/// secp384r1 in [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480#appendix-A)
pub const OID_EC_SECP_384_R1: &[u64] = &[1, 3, 132, 0, 34];
/// secp521r1 in [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480#appendix-A)
pub const OID_EC_SECP_521_R1: &[u64] = &[1, 3, 132, 0, 35];

/// ecdsa-with-SHA1 in [RFC 3279](https://www.rfc-editor.org/rfc/rfc3279#section-2.2.3)
pub const OID_ECDSA_WITH_SHA1: &[u64] = &[1, 2, 840, 10045, 4, 1];
/// ecdsa-with-SHA224 in [RFC 5758](https://www.rfc-editor.org/rfc/rfc5758#section-3.2)
pub const OID_ECDSA_WITH_SHA224: &[u64] = &[1, 2, 840, 10045, 4, 3, 1];
/// ecdsa-with-SHA256 in [RFC 5758](https://www.rfc-editor.org/rfc/rfc5758#section-3.2)
pub const OID_ECDSA_WITH_SHA256: &[u64] = &[1, 2, 840, 10045, 4, 3, 2];
/// ecdsa-with-SHA384 in [RFC 5758](https://www.rfc-editor.org/rfc/rfc5758#section-3.2)
pub const OID_ECDSA_WITH_SHA384: &[u64] = &[1, 2, 840, 10045, 4, 3, 3];
/// ecdsa-with-SHA512 in [RFC 5758](https://www.rfc-editor.org/rfc/rfc5758#section-3.2)
pub const OID_ECDSA_WITH_SHA512: &[u64] = &[1, 2, 840, 10045, 4, 3, 4];

/// id-at-commonName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_COMMON_NAME: &[u64] = &[2, 5, 4, 3];
/// id-at-surname in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_SURNAME: &[u64] = &[2, 5, 4, 4];
/// id-at-serialNumber in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_SERIAL_NUMBER: &[u64] = &[2, 5, 4, 5];
/// id-at-countryName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_COUNTRY_NAME: &[u64] = &[2, 5, 4, 6];
/// id-at-localityName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_LOCALITY_NAME: &[u64] = &[2, 5, 4, 7];
/// id-at-stateOrProvinceName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_STATE_OR_PROVINCE_NAME: &[u64] = &[2, 5, 4, 8];
/// id-at-organizationName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_ORG_NAME: &[u64] = &[2, 5, 4, 10];
/// id-at-organizationalUnitName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_ORG_UNIT_NAME: &[u64] = &[2, 5, 4, 11];
/// id-at-title in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_TITLE: &[u64] = &[2, 5, 4, 12];
/// id-at-givenName in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_GIVEN_NAME: &[u64] = &[2, 5, 4, 42];
/// id-at-initials in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_INITIALS: &[u64] = &[2, 5, 4, 43];
/// id-at-generationQualifier in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_GENERATION_QUALIFIER: &[u64] = &[2, 5, 4, 44];
/// id-at-dnQualifier in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_DN_QUALIFIER: &[u64] = &[2, 5, 4, 46];
/// id-at-pseudonym in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_PSEUDONYM: &[u64] = &[2, 5, 4, 65];
/// id-domainComponent in [RFC 4519](https://www.rfc-editor.org/rfc/rfc4519#section-2.4)
pub const OID_DOMAIN_COMPONENT: &[u64] = &[0, 9, 2342, 19200300, 100, 1, 25];

/// id-ce-subjectKeyIdentifier in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_SUBJECT_KEY_IDENTIFIER: &[u64] = &[2, 5, 29, 14];
/// id-ce-keyUsage in [RFC 5280](https://tools.ietf.org/html/rfc5280#appendix-A.2)
pub const OID_KEY_USAGE: &[u64] = &[2, 5, 29, 15];
/// id-ce-subjectAltName in [RFC 5280](https://tools.ietf.org/html/rfc5280#appendix-A.2)
pub const OID_SUBJECT_ALT_NAME: &[u64] = &[2, 5, 29, 17];
/// id-ce-basicConstraints in [RFC 5280](https://tools.ietf.org/html/rfc5280#appendix-A.2)
pub const OID_BASIC_CONSTRAINTS: &[u64] = &[2, 5, 29, 19];
/// id-ce-authorityKeyIdentifier in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_AUTHORITY_KEY_IDENTIFIER: &[u64] = &[2, 5, 29, 35];
/// id-ce-extKeyUsage in [RFC 5280](https://www.rfc-editor.org/rfc/rfc5280#appendix-A)
pub const OID_EXT_KEY_USAGE: &[u64] = &[2, 5, 29, 37];
