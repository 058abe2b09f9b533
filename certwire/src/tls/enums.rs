#![allow(non_camel_case_types)]

/// Declares a fieldless enum backed by a fixed-width wire value.
///
/// `open` enums get an `Unknown` variant that keeps any unrecognized
/// value, so lists of them can be parsed without loss. `closed` enums
/// only convert through `from_wire(..) -> Option<Self>`, for places
/// where an unrecognized value is fatal.
macro_rules! wire_enum {
	(
		$(#[$meta:meta])*
		open enum $name:ident: $ty:ty {
			$( $variant:ident => $value:literal, )*
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$(
				#[doc = concat!("`", stringify!($variant), "`, ", stringify!($value), " on the wire")]
				$variant,
			)*
			/// Any other wire value
			Unknown($ty),
		}

		impl $name {
			/// Maps a wire value to its variant
			pub fn from_wire(v: $ty) -> Self {
				match v {
					$( $value => Self::$variant, )*
					_ => Self::Unknown(v),
				}
			}

			/// The wire value
			pub fn to_wire(self) -> $ty {
				match self {
					$( Self::$variant => $value, )*
					Self::Unknown(v) => v,
				}
			}
		}
	};
	(
		$(#[$meta:meta])*
		closed enum $name:ident: $ty:ty {
			$( $variant:ident => $value:literal, )*
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$(
				#[doc = concat!("`", stringify!($variant), "`, ", stringify!($value), " on the wire")]
				$variant,
			)*
		}

		impl $name {
			/// Maps a wire value to its variant, if there is one
			pub fn from_wire(v: $ty) -> Option<Self> {
				match v {
					$( $value => Some(Self::$variant), )*
					_ => None,
				}
			}

			/// The wire value
			pub fn to_wire(self) -> $ty {
				match self {
					$( Self::$variant => $value, )*
				}
			}
		}
	};
}

wire_enum! {
	/// The type of a TLS record
	closed enum ContentType: u8 {
		ChangeCipherSpec => 20,
		Alert => 21,
		Handshake => 22,
		ApplicationData => 23,
		Heartbeat => 24,
	}
}

wire_enum! {
	/// The type of a handshake message
	closed enum HandshakeType: u8 {
		HelloRequest => 0,
		ClientHello => 1,
		ServerHello => 2,
		Certificate => 11,
		ServerKeyExchange => 12,
		CertificateRequest => 13,
		ServerHelloDone => 14,
		ClientKeyExchange => 16,
		Finished => 20,
	}
}

wire_enum! {
	/// Severity of an alert
	closed enum AlertLevel: u8 {
		Warning => 1,
		Fatal => 2,
	}
}

wire_enum! {
	/// The condition an alert reports, as per
	/// [RFC 5246](https://www.rfc-editor.org/rfc/rfc5246#section-7.2)
	closed enum AlertDescription: u8 {
		CloseNotify => 0,
		UnexpectedMessage => 10,
		BadRecordMac => 20,
		DecryptionFailed => 21,
		RecordOverflow => 22,
		DecompressionFailure => 30,
		HandshakeFailure => 40,
		NoCertificate => 41,
		BadCertificate => 42,
		UnsupportedCertificate => 43,
		CertificateRevoked => 44,
		CertificateExpired => 45,
		CertificateUnknown => 46,
		IllegalParameter => 47,
		UnknownCa => 48,
		AccessDenied => 49,
		DecodeError => 50,
		DecryptError => 51,
		ExportRestriction => 60,
		ProtocolVersion => 70,
		InsufficientSecurity => 71,
		InternalError => 80,
		InappropriateFallback => 86,
		UserCanceled => 90,
		NoRenegotiation => 100,
		UnsupportedExtension => 110,
		UnrecognizedName => 112,
	}
}

wire_enum! {
	/// The hash half of a signature_algorithms entry
	closed enum HashAlgorithm: u8 {
		None => 0,
		Md5 => 1,
		Sha1 => 2,
		Sha224 => 3,
		Sha256 => 4,
		Sha384 => 5,
		Sha512 => 6,
	}
}

wire_enum! {
	/// The signature half of a signature_algorithms entry
	closed enum SignatureAlgorithm: u8 {
		Anonymous => 0,
		Rsa => 1,
		Dsa => 2,
		Ecdsa => 3,
	}
}

wire_enum! {
	/// Negotiated maximum plaintext fragment length, as per
	/// [RFC 6066](https://www.rfc-editor.org/rfc/rfc6066#section-4)
	closed enum MaxFragmentLength: u8 {
		TwoTo9 => 1,
		TwoTo10 => 2,
		TwoTo11 => 3,
		TwoTo12 => 4,
	}
}

impl MaxFragmentLength {
	/// The fragment length in bytes
	pub fn size(self) -> usize {
		1 << (8 + self.to_wire())
	}
}

wire_enum! {
	/// Type of a hello extension
	open enum ExtensionType: u16 {
		ServerName => 0x0000,
		MaxFragmentLength => 0x0001,
		EllipticCurves => 0x000a,
		EcPointFormats => 0x000b,
		SignatureAlgorithms => 0x000d,
		Padding => 0x0015,
		RenegotiationInfo => 0xff01,
	}
}

wire_enum! {
	/// A TLS 1.2 cipher suite
	open enum CipherSuite: u16 {
		TLS_NULL_WITH_NULL_NULL => 0x0000,
		TLS_RSA_WITH_NULL_MD5 => 0x0001,
		TLS_RSA_WITH_NULL_SHA => 0x0002,
		TLS_RSA_WITH_RC4_128_MD5 => 0x0004,
		TLS_RSA_WITH_RC4_128_SHA => 0x0005,
		TLS_RSA_WITH_3DES_EDE_CBC_SHA => 0x000a,
		TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA => 0x0016,
		TLS_RSA_WITH_AES_128_CBC_SHA => 0x002f,
		TLS_DHE_RSA_WITH_AES_128_CBC_SHA => 0x0033,
		TLS_RSA_WITH_AES_256_CBC_SHA => 0x0035,
		TLS_DHE_RSA_WITH_AES_256_CBC_SHA => 0x0039,
		TLS_RSA_WITH_AES_128_CBC_SHA256 => 0x003c,
		TLS_RSA_WITH_AES_256_CBC_SHA256 => 0x003d,
		TLS_DHE_RSA_WITH_AES_128_CBC_SHA256 => 0x0067,
		TLS_DHE_RSA_WITH_AES_256_CBC_SHA256 => 0x006b,
		TLS_RSA_WITH_AES_128_GCM_SHA256 => 0x009c,
		TLS_RSA_WITH_AES_256_GCM_SHA384 => 0x009d,
		TLS_DHE_RSA_WITH_AES_128_GCM_SHA256 => 0x009e,
		TLS_DHE_RSA_WITH_AES_256_GCM_SHA384 => 0x009f,
		TLS_EMPTY_RENEGOTIATION_INFO_SCSV => 0x00ff,
		TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA => 0xc009,
		TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA => 0xc00a,
		TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA => 0xc013,
		TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA => 0xc014,
		TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256 => 0xc023,
		TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384 => 0xc024,
		TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256 => 0xc027,
		TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384 => 0xc028,
		TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => 0xc02b,
		TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 => 0xc02c,
		TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 => 0xc02f,
		TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 => 0xc030,
		TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 => 0xcca8,
		TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256 => 0xcca9,
	}
}

wire_enum! {
	/// An elliptic curve, as per
	/// [RFC 4492](https://www.rfc-editor.org/rfc/rfc4492#section-5.1.1),
	/// [RFC 7027](https://www.rfc-editor.org/rfc/rfc7027) and
	/// [RFC 8422](https://www.rfc-editor.org/rfc/rfc8422#section-5.1.1)
	open enum NamedCurve: u16 {
		Sect163k1 => 1,
		Sect163r1 => 2,
		Sect163r2 => 3,
		Sect193r1 => 4,
		Sect193r2 => 5,
		Sect233k1 => 6,
		Sect233r1 => 7,
		Sect239k1 => 8,
		Sect283k1 => 9,
		Sect283r1 => 10,
		Sect409k1 => 11,
		Sect409r1 => 12,
		Sect571k1 => 13,
		Sect571r1 => 14,
		Secp160k1 => 15,
		Secp160r1 => 16,
		Secp160r2 => 17,
		Secp192k1 => 18,
		Secp192r1 => 19,
		Secp224k1 => 20,
		Secp224r1 => 21,
		Secp256k1 => 22,
		Secp256r1 => 23,
		Secp384r1 => 24,
		Secp521r1 => 25,
		BrainpoolP256r1 => 26,
		BrainpoolP384r1 => 27,
		BrainpoolP512r1 => 28,
		X25519 => 29,
		X448 => 30,
		ArbitraryExplicitPrimeCurves => 0xff01,
		ArbitraryExplicitChar2Curves => 0xff02,
	}
}

wire_enum! {
	/// Encoding of elliptic curve points
	open enum EcPointFormat: u8 {
		Uncompressed => 0,
		AnsiX962CompressedPrime => 1,
		AnsiX962CompressedChar2 => 2,
	}
}

wire_enum! {
	/// Record compression method
	open enum CompressionMethod: u8 {
		Null => 0,
		Deflate => 1,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn open_enums_keep_unknown_values() {
		assert_eq!(CipherSuite::from_wire(0xc02f), CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256);
		assert_eq!(CipherSuite::from_wire(0x1301), CipherSuite::Unknown(0x1301));
		assert_eq!(CipherSuite::Unknown(0x1301).to_wire(), 0x1301);
		assert_eq!(NamedCurve::from_wire(0xff02), NamedCurve::ArbitraryExplicitChar2Curves);
		assert_eq!(CompressionMethod::from_wire(64), CompressionMethod::Unknown(64));
	}

	#[test]
	fn closed_enums_reject_unknown_values() {
		assert_eq!(ContentType::from_wire(22), Some(ContentType::Handshake));
		assert_eq!(ContentType::from_wire(25), None);
		assert_eq!(HandshakeType::from_wire(4), None);
		assert_eq!(HashAlgorithm::from_wire(7), None);
		assert_eq!(AlertDescription::from_wire(112), Some(AlertDescription::UnrecognizedName));
	}

	#[test]
	fn max_fragment_length_sizes() {
		assert_eq!(MaxFragmentLength::TwoTo9.size(), 512);
		assert_eq!(MaxFragmentLength::TwoTo12.size(), 4096);
		assert_eq!(MaxFragmentLength::from_wire(5), None);
		assert_eq!(MaxFragmentLength::from_wire(0), None);
	}
}
