//! Network address classification for SSRF protection.
//!
//! Every address falls into exactly one [`AddressClass`]. Only
//! [`AddressClass::Public`] is safe to store as a redirect target.

use ipnet::{Ipv4Net, Ipv6Net};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

/// Category of a network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    Public,
    /// `0.0.0.0/8`, `::`
    Unspecified,
    /// `127.0.0.0/8`, `::1`
    Loopback,
    /// `10.0.0.0/8`, `172.16.0.0/12`, `192.168.0.0/16`, `fc00::/7`
    Private,
    /// `169.254.0.0/16`, `fe80::/10`
    LinkLocal,
    /// `169.254.169.254`
    CloudMetadata,
}

impl AddressClass {
    pub fn is_public(self) -> bool {
        self == AddressClass::Public
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::Public => "public",
            AddressClass::Unspecified => "unspecified",
            AddressClass::Loopback => "loopback",
            AddressClass::Private => "private",
            AddressClass::LinkLocal => "link-local",
            AddressClass::CloudMetadata => "cloud metadata",
        };
        f.write_str(name)
    }
}

const CLOUD_METADATA_V4: Ipv4Addr = Ipv4Addr::new(169, 254, 169, 254);

/// IPv4 ranges checked in order; the first match wins.
static IPV4_RANGES: LazyLock<Vec<(Ipv4Net, AddressClass)>> = LazyLock::new(|| {
    [
        ("0.0.0.0/8", AddressClass::Unspecified),
        ("127.0.0.0/8", AddressClass::Loopback),
        ("10.0.0.0/8", AddressClass::Private),
        ("172.16.0.0/12", AddressClass::Private),
        ("192.168.0.0/16", AddressClass::Private),
        ("169.254.0.0/16", AddressClass::LinkLocal),
    ]
    .into_iter()
    .map(|(net, class)| (net.parse().unwrap(), class))
    .collect()
});

static IPV6_RANGES: LazyLock<Vec<(Ipv6Net, AddressClass)>> = LazyLock::new(|| {
    [
        ("::/128", AddressClass::Unspecified),
        ("::1/128", AddressClass::Loopback),
        ("fc00::/7", AddressClass::Private),
        ("fe80::/10", AddressClass::LinkLocal),
    ]
    .into_iter()
    .map(|(net, class)| (net.parse().unwrap(), class))
    .collect()
});

/// Classifies a single address.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are classified by the
/// embedded IPv4 address.
pub fn classify(ip: IpAddr) -> AddressClass {
    match ip {
        IpAddr::V4(v4) => classify_v4(v4),
        IpAddr::V6(v6) => classify_v6(v6),
    }
}

fn classify_v4(ip: Ipv4Addr) -> AddressClass {
    if ip == CLOUD_METADATA_V4 {
        return AddressClass::CloudMetadata;
    }

    IPV4_RANGES
        .iter()
        .find(|(net, _)| net.contains(&ip))
        .map_or(AddressClass::Public, |&(_, class)| class)
}

fn classify_v6(ip: Ipv6Addr) -> AddressClass {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return classify_v4(v4);
    }

    IPV6_RANGES
        .iter()
        .find(|(net, _)| net.contains(&ip))
        .map_or(AddressClass::Public, |&(_, class)| class)
}

/// Returns the first unsafe address in `addresses` with its class.
///
/// An empty set yields `None`; callers must treat it separately since an
/// unresolved host is never safe.
pub fn first_unsafe(addresses: &[IpAddr]) -> Option<(IpAddr, AddressClass)> {
    addresses
        .iter()
        .map(|&ip| (ip, classify(ip)))
        .find(|(_, class)| !class.is_public())
}
