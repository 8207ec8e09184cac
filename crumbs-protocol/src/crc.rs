//! CRC-8 used by CRUMBS frames
//!
//! Width 8, polynomial 0x07, init 0x00, no input/output reflection and no
//! final XOR (the CRC-8/SMBUS parameter set). Controllers and peripherals
//! built from different code bases must agree on this byte for byte.

const POLY: u8 = 0x07;

const fn build_crc8_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            if (crc & 0x80) != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

const CRC8_TABLE: [u8; 256] = build_crc8_table();

/// Compute the CRC-8 of `data`
///
/// An empty span yields 0.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc = CRC8_TABLE[(crc ^ byte) as usize];
    }
    crc
}
