//! Range to CIDR decomposition.

use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

use super::range::Family;

/// Split the inclusive range `[start, end]` into the fewest aligned blocks.
///
/// Each step takes the largest block that starts at the cursor, is aligned
/// to its own size, and does not run past `end`. Returns `(network,
/// prefix_len)` pairs in address order.
pub fn decompose(start: u128, end: u128, family: Family) -> Vec<(u128, u8)> {
    let width = family.bits();
    let mut blocks = Vec::new();
    let mut cursor = start;

    loop {
        let align = if cursor == 0 {
            width
        } else {
            cursor.trailing_zeros().min(width)
        };

        // floor(log2(remaining)), where remaining = end - cursor + 1
        let remaining = end - cursor;
        let fit = if remaining == u128::MAX {
            128
        } else {
            127 - (remaining + 1).leading_zeros()
        };

        let host_bits = align.min(fit);
        blocks.push((cursor, (width - host_bits) as u8));

        if host_bits >= 128 {
            break;
        }
        match cursor.checked_add(1u128 << host_bits) {
            Some(next) if next <= end => cursor = next,
            _ => break,
        }
    }

    blocks
}

/// Turn a decomposed block into an `IpNet`.
pub fn to_net(network: u128, prefix_len: u8, family: Family) -> Option<IpNet> {
    match family {
        Family::V4 => {
            let addr = Ipv4Addr::from(u32::try_from(network).ok()?);
            Ipv4Net::new(addr, prefix_len).ok().map(IpNet::V4)
        }
        Family::V6 => Ipv6Net::new(Ipv6Addr::from(network), prefix_len)
            .ok()
            .map(IpNet::V6),
    }
}
