// Packet Codec
// Groups two-digit symbol values into fixed-width decimal packets for RSA

use num_bigint::BigUint;
use num_traits::{Pow, Zero};
use rand::{thread_rng, Rng};

use crate::error::{Error, Result};

/// Largest number of symbols per packet; the padding marker has to fit in one group
pub const MAX_GROUP_SIZE: usize = 99;

/// Every symbol occupies two decimal digits
const GROUP_BASE: u32 = 100;

/// Number of decimal digits in one packet
pub fn packet_width(group_size: usize) -> usize {
    group_size * 2
}

/// Exclusive upper bound of packet values, 10^(2 * group_size).
/// The RSA modulus must be at least this large.
pub fn packet_bound(group_size: usize) -> BigUint {
    Pow::pow(BigUint::from(GROUP_BASE), group_size)
}

fn check_group_size(group_size: usize) -> Result<()> {
    if group_size == 0 || group_size > MAX_GROUP_SIZE {
        return Err(Error::InvalidGroupSize { group_size });
    }
    Ok(())
}

/// Pack symbol values (each below 100) into packets of `group_size` symbols.
pub fn packetize(digits: &[u8], group_size: usize) -> Result<Vec<BigUint>> {
    packetize_with_rng(digits, group_size, &mut thread_rng())
}

/// Pack symbol values into packets, drawing padding from `rng`.
///
/// The tail is filled with `pad` groups, 1 <= pad <= group_size. All but the
/// last hold random values; the last holds `pad`. When the input fills its
/// packets exactly, a whole packet of padding is appended so the marker
/// always exists.
pub fn packetize_with_rng<R>(digits: &[u8], group_size: usize, rng: &mut R) -> Result<Vec<BigUint>>
where
    R: Rng + ?Sized,
{
    check_group_size(group_size)?;
    if let Some(&value) = digits.iter().find(|&&d| u32::from(d) >= GROUP_BASE) {
        return Err(Error::DigitOutOfRange { value });
    }

    let pad = group_size - digits.len() % group_size;
    let mut groups = Vec::with_capacity(digits.len() + pad);
    groups.extend_from_slice(digits);
    groups.extend((1..pad).map(|_| rng.gen_range(0..100u8)));
    // pad <= 99
    groups.push(pad as u8);

    let packets: Vec<BigUint> = groups
        .chunks(group_size)
        .map(|chunk| {
            chunk
                .iter()
                .fold(BigUint::zero(), |acc, &d| acc * GROUP_BASE + u32::from(d))
        })
        .collect();

    tracing::trace!(
        symbols = digits.len(),
        padding = pad,
        packets = packets.len(),
        "packetized"
    );

    Ok(packets)
}

/// Undo [`packetize`]: split packets back into symbol values and strip the padding.
pub fn unpacketize(packets: &[BigUint], group_size: usize) -> Result<Vec<u8>> {
    check_group_size(group_size)?;
    if packets.is_empty() {
        return Err(Error::EmptyPacketStream);
    }

    let width = packet_width(group_size);
    let mut digits = Vec::with_capacity(packets.len() * group_size);

    for packet in packets {
        let text = packet.to_str_radix(10);
        if text.len() > width {
            return Err(Error::PacketOverflow {
                packet: text,
                width,
            });
        }

        // Restore leading zeros
        let text = format!("{:0>width$}", text);
        digits.extend(
            text.as_bytes()
                .chunks(2)
                .map(|pair| (pair[0] - b'0') * 10 + (pair[1] - b'0')),
        );
    }

    let marker = digits.last().copied().unwrap_or_default();
    if marker == 0 || usize::from(marker) > group_size {
        return Err(Error::InvalidPadding { marker });
    }
    digits.truncate(digits.len() - usize::from(marker));

    Ok(digits)
}
