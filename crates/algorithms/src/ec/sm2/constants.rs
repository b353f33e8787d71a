//! Shared constants for SM2 curve operations

/// Size of an SM2 scalar in bytes (32 bytes = 256 bits)
pub const SM2_SCALAR_SIZE: usize = 32;

/// Size of an SM2 field element in bytes (32 bytes = 256 bits)
pub const SM2_FIELD_ELEMENT_SIZE: usize = 32;

/// Size of an uncompressed SM2 point in bytes:
/// format byte (0x04) + x-coordinate + y-coordinate
pub const SM2_POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * SM2_FIELD_ELEMENT_SIZE; // 65 bytes
