//! # Network Restrictions
//!
//! Locally the category is a single `restrictions` list of CIDR blocks. The
//! remote keeps IPv4 and IPv6 ranges in separate lists, so reads concatenate
//! them (IPv4 first) and writes split the declared list by address family.
//!
//! Every declared range is parsed and checked before the apply call is made;
//! one bad range rejects the whole write.

use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Category, ValidationError};
use crate::model::{settings_document, ConfigCategory, Nullable};

settings_document! {
    /// Allowed database client ranges
    pub struct NetworkSettings {
        restrictions as "restrictions": Vec<String>,
    }
}

/// Address family a declared range is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidrFamily {
    V4,
    V6,
}

/// Parse a CIDR block and decide which remote list it belongs to
///
/// IPv4-mapped IPv6 addresses count as IPv4. Private ranges (RFC 1918 and
/// IPv6 unique-local) are rejected.
///
/// # Errors
///
/// Returns [`ValidationError::MissingPrefix`] for a bare address,
/// [`ValidationError::InvalidCidr`] for unparsable input and
/// [`ValidationError::PrivateCidr`] for private ranges.
pub fn classify_cidr(cidr: &str) -> Result<CidrFamily, ValidationError> {
    // `IpNetwork` would read a bare address as a host route
    if !cidr.contains('/') {
        return Err(ValidationError::MissingPrefix {
            cidr: cidr.to_owned(),
        });
    }
    let network = IpNetwork::from_str(cidr).map_err(|source| ValidationError::InvalidCidr {
        cidr: cidr.to_owned(),
        source,
    })?;

    let ip = match network.ip() {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(IpAddr::V6(v6), IpAddr::V4),
        v4 @ IpAddr::V4(_) => v4,
    };

    let private = match ip {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => is_unique_local(v6),
    };
    if private {
        return Err(ValidationError::PrivateCidr {
            cidr: cidr.to_owned(),
        });
    }

    Ok(match ip {
        IpAddr::V4(_) => CidrFamily::V4,
        IpAddr::V6(_) => CidrFamily::V6,
    })
}

/// `fc00::/7`
fn is_unique_local(ip: Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xfe00) == 0xfc00
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RestrictionLists {
    #[serde(rename = "dbAllowedCidrs", default, skip_serializing_if = "Option::is_none")]
    v4: Option<Vec<String>>,
    #[serde(rename = "dbAllowedCidrsV6", default, skip_serializing_if = "Option::is_none")]
    v6: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct NetworkRestrictionsResponse {
    #[serde(default)]
    config: RestrictionLists,
}

#[derive(Debug)]
pub struct NetworkCategory;

impl Category for NetworkCategory {
    const KIND: ConfigCategory = ConfigCategory::Network;
    type Document = NetworkSettings;

    fn decode_read(body: &[u8]) -> Result<NetworkSettings, serde_json::Error> {
        let response: NetworkRestrictionsResponse = serde_json::from_slice(body)?;
        let RestrictionLists { v4, v6 } = response.config;
        let restrictions = match (v4, v6) {
            (None, None) => Nullable::Null,
            (v4, v6) => Nullable::Value(
                v4.into_iter()
                    .flatten()
                    .chain(v6.into_iter().flatten())
                    .collect(),
            ),
        };
        Ok(NetworkSettings { restrictions })
    }

    /// The apply call may answer before the new ranges are active, so the
    /// submitted list is authoritative
    fn decode_echo(
        _body: &[u8],
        submitted: &NetworkSettings,
    ) -> Result<NetworkSettings, serde_json::Error> {
        Ok(submitted.clone())
    }

    fn encode_write(document: &NetworkSettings) -> Result<Value, ValidationError> {
        let mut lists = RestrictionLists {
            v4: Some(Vec::new()),
            v6: Some(Vec::new()),
        };
        for cidr in document.restrictions.as_option().into_iter().flatten() {
            let target = match classify_cidr(cidr)? {
                CidrFamily::V4 => &mut lists.v4,
                CidrFamily::V6 => &mut lists.v6,
            };
            target.get_or_insert_with(Vec::new).push(cidr.clone());
        }
        serde_json::to_value(&lists).map_err(ValidationError::Encode)
    }
}
