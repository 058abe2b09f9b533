//! TLS 1.2 handshake wire format
//!
//! A hand written, single pass parser for the records and handshake
//! messages exchanged before a TLS connection is established, and a writer
//! producing the same layout. Every variable length field is read through
//! its explicit length prefix and must be consumed exactly; a length that
//! doesn't add up is an error rather than something to truncate or pad.
//!
//! Unrecognized values are fatal where the message can't be interpreted
//! without them, such as the handshake type or an alert. Inside lists that
//! are offers, unrecognized cipher suites, curves, point formats,
//! compression methods and extensions are kept as `Unknown` values.
//!
//! ```
//! use certwire::tls::{handshake, Handshake};
//!
//! let buf = [14, 0, 0, 0, 20, 0, 0, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
//! let (msg, rest) = handshake(&buf).unwrap();
//! assert_eq!(msg, Handshake::ServerHelloDone);
//! let (msg, rest) = handshake(rest).unwrap();
//! assert_eq!(msg, Handshake::Finished([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]));
//! assert!(rest.is_empty());
//! ```

mod codec;
mod enums;
mod handshake;
mod key_exchange;
mod record;

pub use codec::{Codec, Parsed};
pub use enums::{
	AlertDescription, AlertLevel, CipherSuite, CompressionMethod, ContentType, EcPointFormat,
	ExtensionType, HandshakeType, HashAlgorithm, MaxFragmentLength, NamedCurve,
	SignatureAlgorithm,
};
pub use handshake::{handshake, ClientHello, Extension, Handshake, Hello, ServerHello};
pub use key_exchange::{DhParameters, DigitallySigned};
pub use record::{record, Alert, ChangeCipherSpec, ProtocolVersion, RecordHeader, MAX_RECORD_LEN};
